use super::metrics::{ClassMetrics, ConfusionMatrix, EvaluationReport};
use crate::error::{Result, TitanicError};
use crate::models::IModel;
use crate::processing::FeatureTable;
use smartcore::metrics::{accuracy, f1, precision, recall};
use tracing::info;

pub struct ModelEvaluator;

impl ModelEvaluator {
    /// Vypočíta confusion matrix pre binárnu klasifikáciu
    pub fn confusion_matrix(y_true: &[i32], y_pred: &[i32]) -> ConfusionMatrix {
        let mut cm = ConfusionMatrix::default();
        for (t, p) in y_true.iter().zip(y_pred.iter()) {
            match (*t == 1, *p == 1) {
                (true, true) => cm.true_positives += 1,
                (false, false) => cm.true_negatives += 1,
                (false, true) => cm.false_positives += 1,
                (true, false) => cm.false_negatives += 1,
            }
        }
        cm
    }

    /// Vypočíta metriky pre klasifikačný model
    pub fn evaluate_classification(y_true: &[i32], y_pred: &[i32], model_name: &str) -> EvaluationReport {
        let mut report = EvaluationReport::new(model_name.to_string(), "classification".to_string());

        let cm = Self::confusion_matrix(y_true, y_pred);
        report.confusion = cm;
        if cm.total() == 0 {
            report.add_metric("accuracy".to_string(), 0.0);
            return report;
        }

        let y_true_vec: Vec<f64> = y_true.iter().map(|&c| f64::from(c)).collect();
        let y_pred_vec: Vec<f64> = y_pred.iter().map(|&c| f64::from(c)).collect();

        report.add_metric("accuracy".to_string(), accuracy(&y_true.to_vec(), &y_pred.to_vec()));

        // Trieda 1 (prežil) aj trieda 0 ako v classification reporte;
        // pre triedu 0 sa značky otočia
        let positive = class_metrics(&y_true_vec, &y_pred_vec, cm.true_positives + cm.false_negatives);
        let flipped_true: Vec<f64> = y_true_vec.iter().map(|v| 1.0 - v).collect();
        let flipped_pred: Vec<f64> = y_pred_vec.iter().map(|v| 1.0 - v).collect();
        let negative = class_metrics(&flipped_true, &flipped_pred, cm.true_negatives + cm.false_positives);

        report.add_metric("precision".to_string(), positive.precision);
        report.add_metric("recall".to_string(), positive.recall);
        report.add_metric("f1_score".to_string(), positive.f1_score);

        let tp = cm.true_positives as f64;
        let tn = cm.true_negatives as f64;
        let fp = cm.false_positives as f64;
        let fn_ = cm.false_negatives as f64;

        let specificity = if tn + fp > 0.0 { tn / (tn + fp) } else { 0.0 };
        report.add_metric("specificity".to_string(), specificity);

        // Matthews Correlation Coefficient
        let mcc_denom = ((tp + fp) * (tp + fn_) * (tn + fp) * (tn + fn_)).sqrt();
        let mcc = if mcc_denom > 0.0 { (tp * tn - fp * fn_) / mcc_denom } else { 0.0 };
        report.add_metric("mcc".to_string(), mcc);

        report.per_class.insert(0, negative);
        report.per_class.insert(1, positive);
        report
    }

    /// Predikuje model na označených dátach a vyhodnotí ho
    pub fn evaluate_model(model: &dyn IModel, features: &FeatureTable) -> Result<EvaluationReport> {
        if features.is_empty() {
            return Err(TitanicError::EmptyTable);
        }
        let (x, y) = features.labeled()?;
        let predictions = model.predict(&x)?;
        let report = Self::evaluate_classification(&y, &predictions, model.get_name());

        info!(
            samples = y.len(),
            accuracy = report.get_metric("accuracy").unwrap_or_default(),
            "evaluated model"
        );
        Ok(report)
    }
}

/// Precision/recall/F1 zo smartcore pre triedu kódovanú ako 1.
/// Nedefinovaný podiel (0/0) sa hlási ako 0.
fn class_metrics(y_true: &Vec<f64>, y_pred: &Vec<f64>, support: usize) -> ClassMetrics {
    let defined = |v: f64| if v.is_finite() { v } else { 0.0 };
    ClassMetrics {
        precision: defined(precision(y_true, y_pred)),
        recall: defined(recall(y_true, y_pred)),
        f1_score: defined(f1(y_true, y_pred, 1.0)),
        support,
    }
}
