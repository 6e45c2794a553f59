pub mod schema; // Pevná verzovaná schéma stĺpcov
pub mod null_handler; // Imputácia mediánom / modusom
pub mod title; // Oslovenie z mena
pub mod ohencoder; // One-hot kódovanie podľa schémy
pub mod feature_table;
pub mod feature_transform;

pub use feature_table::{to_matrix, FeatureTable};
pub use feature_transform::{load_and_clean_csv, load_and_clean_data, FeatureTransform, ImputationStats};
pub use null_handler::{median, ModeImputer, NullValueHandler, ReplacementStrategy};
pub use ohencoder::OneHotEncoder;
pub use schema::{CategoricalField, FeatureSchema, SCHEMA_VERSION};
