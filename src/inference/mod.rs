pub mod artifact;
pub mod predictor;

pub use artifact::ModelArtifact;
pub use predictor::{PassengerPrediction, Predictor, SurvivalChance, HIGH_THRESHOLD, MEDIUM_THRESHOLD};
