//! Chybové typy pre celú knižnicu.

use thiserror::Error;

/// Result alias používaný v celej knižnici
pub type Result<T> = std::result::Result<T, TitanicError>;

#[derive(Error, Debug)]
pub enum TitanicError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Chyba zo smartcore (fit/predict stromu, konštrukcia matice)
    #[error("Model error: {0}")]
    Model(#[from] smartcore::error::Failed),

    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("Input table is empty")]
    EmptyTable,

    /// Medián/modus nie je definovaný, ak stĺpec nemá žiadnu hodnotu
    #[error("Column '{0}' has no observed values to impute from")]
    NoObservedValues(String),

    #[error("Invalid value '{value}' in column '{column}' (row {row})")]
    InvalidValue {
        column: String,
        row: usize,
        value: String,
    },

    #[error("Unknown category '{value}' for field '{field}'")]
    UnknownCategory { field: String, value: String },

    #[error("Feature schema mismatch: missing {missing:?}, unexpected {unexpected:?}")]
    SchemaMismatch {
        missing: Vec<String>,
        unexpected: Vec<String>,
    },

    #[error("Feature schema version mismatch: model expects v{expected}, features are v{found}")]
    SchemaVersion { expected: u32, found: u32 },

    #[error("Target column 'Survived' is missing for passenger {0}")]
    MissingTarget(i64),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Model is not fitted")]
    NotFitted,
}
