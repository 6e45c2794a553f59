use crate::error::Result;
use crate::models::{ForestParams, RandomForestClassifier};
use crate::processing::{FeatureSchema, ImputationStats};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

/// Natrénovaný model spolu so všetkým, čo predikcia potrebuje:
/// schéma stĺpcov, imputačné hodnoty z trénovania a zvolené hyperparametre.
#[derive(Debug, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub schema: FeatureSchema,
    pub imputation: ImputationStats,
    pub params: ForestParams,
    /// Priemerná CV accuracy víťaznej konfigurácie
    pub cv_score: f64,
    pub model: RandomForestClassifier,
}

impl ModelArtifact {
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, serde_json::to_string(self)?)?;
        info!(path = %path.display(), "saved model artifact");
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let artifact: ModelArtifact = serde_json::from_str(&content)?;
        info!(
            path = %path.as_ref().display(),
            schema_version = artifact.schema.version,
            "loaded model artifact"
        );
        Ok(artifact)
    }
}
