use super::grid_search::{GridSearch, GridSearchResult};
use super::split::train_test_split;
use crate::config::{Config, TrainingConfig};
use crate::data_loading::load_passengers;
use crate::error::Result;
use crate::evaluation::{EvaluationReport, ModelEvaluator};
use crate::inference::ModelArtifact;
use crate::models::{IModel, RandomForestClassifier};
use crate::processing::{FeatureSchema, FeatureTable, FeatureTransform, ImputationStats};
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::info;

/// Výsledok jedného behu trénovania
#[derive(Debug, Clone, Serialize)]
pub struct TrainingSummary {
    pub train_size: usize,
    pub test_size: usize,
    pub grid: GridSearchResult,
    pub test_report: EvaluationReport,
}

impl TrainingSummary {
    pub fn test_accuracy(&self) -> f64 {
        self.test_report.get_metric("accuracy").unwrap_or_default()
    }
}

pub struct Trainer {
    config: TrainingConfig,
}

impl Trainer {
    pub fn new(config: TrainingConfig) -> Self {
        Self { config }
    }

    /// Split, grid search s CV na trénovacej časti, fit víťaza a vyhodnotenie na teste
    pub fn train(
        &self,
        features: &FeatureTable,
        imputation: ImputationStats,
    ) -> Result<(ModelArtifact, TrainingSummary)> {
        let schema = FeatureSchema::current();
        schema.validate(features.schema_version(), features.columns())?;

        let (train_idx, test_idx) =
            train_test_split(features.len(), self.config.test_size, self.config.seed)?;
        let train = features.select(&train_idx);
        let test = features.select(&test_idx);
        let (x_train, y_train) = train.labeled()?;
        info!(train = train.len(), test = test.len(), "split dataset");

        let search = GridSearch::builder()
            .n_estimators(self.config.n_estimators.clone())
            .max_depth(self.config.depth_grid())
            .cv_folds(self.config.cv_folds)
            .seed(self.config.seed)
            .max_features(self.config.max_features)
            .build()?;
        let grid = search.fit(&x_train, &y_train)?;

        let mut model = RandomForestClassifier::new(grid.best_params);
        model.train(&x_train, &y_train)?;

        let test_report = ModelEvaluator::evaluate_model(&model, &test)?;
        info!(
            cv_accuracy = grid.best_score,
            test_accuracy = test_report.get_metric("accuracy").unwrap_or_default(),
            "training finished"
        );

        let artifact = ModelArtifact {
            schema,
            imputation,
            params: grid.best_params,
            cv_score: grid.best_score,
            model,
        };
        let summary = TrainingSummary {
            train_size: train.len(),
            test_size: test.len(),
            grid,
            test_report,
        };
        Ok((artifact, summary))
    }
}

/// Celý beh podľa konfigurácie: načítanie, transformácia, trénovanie, uloženie
pub fn run_training(config: &Config) -> Result<TrainingSummary> {
    let table = load_passengers(&config.data.csv_path)?;
    let transform = FeatureTransform::fit(&table)?;
    let features = transform.transform(&table)?;

    let (artifact, summary) =
        Trainer::new(config.training.clone()).train(&features, transform.stats().clone())?;
    artifact.save(&config.model.artifact_path)?;

    if let Some(report_path) = &config.output.report_path {
        write_report(&summary, report_path)?;
    }
    Ok(summary)
}

fn write_report<P: AsRef<Path>>(summary: &TrainingSummary, path: P) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, serde_json::to_string_pretty(summary)?)?;
    info!(path = %path.display(), "saved training report");
    Ok(())
}
