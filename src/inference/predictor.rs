use super::artifact::ModelArtifact;
use crate::data_loading::PassengerTable;
use crate::error::Result;
use crate::models::IModel;
use crate::processing::{FeatureSchema, FeatureTable, FeatureTransform};
use serde::Serialize;
use std::fmt;
use std::path::Path;
use tracing::debug;

/// Hranica pre kategóriu High
pub const HIGH_THRESHOLD: f64 = 0.70;
/// Hranica pre kategóriu Medium
pub const MEDIUM_THRESHOLD: f64 = 0.40;

/// Zobrazovacia kategória šance na prežitie
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum SurvivalChance {
    High,
    Medium,
    Low,
}

impl SurvivalChance {
    pub fn from_probability(p: f64) -> Self {
        if p >= HIGH_THRESHOLD {
            SurvivalChance::High
        } else if p >= MEDIUM_THRESHOLD {
            SurvivalChance::Medium
        } else {
            SurvivalChance::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SurvivalChance::High => "High",
            SurvivalChance::Medium => "Medium",
            SurvivalChance::Low => "Low",
        }
    }

    pub fn all() -> [SurvivalChance; 3] {
        [SurvivalChance::High, SurvivalChance::Medium, SurvivalChance::Low]
    }
}

impl fmt::Display for SurvivalChance {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Predikcia pre jedného pasažiera
#[derive(Debug, Clone, Serialize)]
pub struct PassengerPrediction {
    pub passenger_id: i64,
    pub name: String,
    pub sex: String,
    pub age: Option<f64>,
    pub pclass: u8,
    pub probability: f64,
    pub chance: SurvivalChance,
}

/// Obal nad uloženým modelom, ktorý pred predikciou overí schému
pub struct Predictor {
    artifact: ModelArtifact,
}

impl Predictor {
    pub fn new(artifact: ModelArtifact) -> Self {
        Self { artifact }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(ModelArtifact::load(path)?))
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.artifact.schema
    }

    pub fn artifact(&self) -> &ModelArtifact {
        &self.artifact
    }

    /// Stĺpce a verzia feature tabuľky musia presne sedieť so schémou modelu
    pub fn validate(&self, features: &FeatureTable) -> Result<()> {
        self.artifact
            .schema
            .validate(features.schema_version(), features.columns())
    }

    /// Pravdepodobnosť triedy 1 pre každý riadok, v poradí vstupu
    pub fn predict_proba(&self, features: &FeatureTable) -> Result<Vec<f64>> {
        self.validate(features)?;
        let probabilities = self.artifact.model.predict_proba(features.rows())?;
        debug!(rows = probabilities.len(), "predicted survival probabilities");
        Ok(probabilities)
    }

    pub fn predict(&self, features: &FeatureTable) -> Result<Vec<i32>> {
        self.validate(features)?;
        self.artifact.model.predict(features.rows())
    }

    /// Transformácia s imputačnými hodnotami uloženými pri trénovaní
    pub fn transform(&self, table: &PassengerTable) -> Result<FeatureTable> {
        FeatureTransform::from_stats(self.artifact.imputation.clone()).transform(table)
    }

    /// Surové záznamy -> predikcie s kategóriou šance
    pub fn predict_passengers(&self, table: &PassengerTable) -> Result<Vec<PassengerPrediction>> {
        let features = self.transform(table)?;
        let probabilities = self.predict_proba(&features)?;

        Ok(table
            .records()
            .iter()
            .zip(probabilities)
            .map(|(record, probability)| PassengerPrediction {
                passenger_id: record.passenger_id,
                name: record.name.clone(),
                sex: record.sex.clone(),
                age: record.age,
                pclass: record.pclass,
                probability,
                chance: SurvivalChance::from_probability(probability),
            })
            .collect())
    }
}
