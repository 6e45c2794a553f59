use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Binárna confusion matrix (trieda 1 = prežil)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    pub true_negatives: usize,
    pub false_positives: usize,
    pub false_negatives: usize,
    pub true_positives: usize,
}

impl ConfusionMatrix {
    pub fn total(&self) -> usize {
        self.true_negatives + self.false_positives + self.false_negatives + self.true_positives
    }
}

/// Riadok classification reportu pre jednu triedu
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
    pub support: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub metrics: BTreeMap<String, f64>,
    pub model_name: String,
    pub evaluation_type: String,
    pub confusion: ConfusionMatrix,
    /// Kľúč je trieda (0 / 1)
    pub per_class: BTreeMap<i32, ClassMetrics>,
}

impl EvaluationReport {
    pub fn new(model_name: String, evaluation_type: String) -> Self {
        Self {
            metrics: BTreeMap::new(),
            model_name,
            evaluation_type,
            confusion: ConfusionMatrix::default(),
            per_class: BTreeMap::new(),
        }
    }

    pub fn add_metric(&mut self, name: String, value: f64) {
        self.metrics.insert(name, value);
    }

    pub fn get_metric(&self, name: &str) -> Option<f64> {
        self.metrics.get(name).copied()
    }

    pub fn get_all_metrics(&self) -> &BTreeMap<String, f64> {
        &self.metrics
    }
}

impl fmt::Display for EvaluationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== {} ({}) ===", self.model_name, self.evaluation_type)?;
        if let Some(acc) = self.get_metric("accuracy") {
            writeln!(f, "Accuracy: {:.4}", acc)?;
        }
        writeln!(f, "Confusion Matrix:")?;
        writeln!(f, "  [[{:>4} {:>4}]", self.confusion.true_negatives, self.confusion.false_positives)?;
        writeln!(f, "   [{:>4} {:>4}]]", self.confusion.false_negatives, self.confusion.true_positives)?;
        writeln!(f, "Classification Report:")?;
        writeln!(f, "  {:>6} {:>10} {:>10} {:>10} {:>10}", "class", "precision", "recall", "f1-score", "support")?;
        for (class, m) in &self.per_class {
            writeln!(
                f,
                "  {:>6} {:>10.2} {:>10.2} {:>10.2} {:>10}",
                class, m.precision, m.recall, m.f1_score, m.support
            )?;
        }
        Ok(())
    }
}
