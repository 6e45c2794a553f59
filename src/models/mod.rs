use crate::error::Result;

/// Spoločné rozhranie klasifikátorov (binárna klasifikácia 0/1)
pub trait IModel {
    fn get_name(&self) -> &str;

    fn train(&mut self, x_train: &[Vec<f64>], y_train: &[i32]) -> Result<()>;

    /// Pravdepodobnosť triedy 1 pre každý riadok
    fn predict_proba(&self, x: &[Vec<f64>]) -> Result<Vec<f64>>;

    /// Trieda s vyššou pravdepodobnosťou (hranica 0.5)
    fn predict(&self, x: &[Vec<f64>]) -> Result<Vec<i32>> {
        Ok(self
            .predict_proba(x)?
            .into_iter()
            .map(|p| if p >= 0.5 { 1 } else { 0 })
            .collect())
    }
}

pub mod random_forest;

pub use random_forest::{ForestParams, RandomForestClassifier};
