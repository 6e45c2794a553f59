//! Analýza prežitia pasažierov: načítanie dát, feature transformácia,
//! trénovanie random forest modelu, predikcia a dátová vrstva dashboardu.

pub mod config;
pub mod error;

pub mod data_loading; // Strategy: CSV / JSON loadery
pub mod processing; // Feature Transform a pevná schéma
pub mod models; // IModel + random forest
pub mod training; // Split, grid search, trainer
pub mod evaluation; // Metriky a report
pub mod inference; // Artefakt a predictor
pub mod dashboard; // Filtre, štatistiky, grafy
pub mod wasm_api; // wasm-bindgen rozhranie

pub use config::Config;
pub use error::{Result, TitanicError};

pub use data_loading::{load_passengers, DataLoader, DataLoaderFactory, PassengerRecord, PassengerTable};
pub use processing::{load_and_clean_csv, load_and_clean_data, FeatureSchema, FeatureTable, FeatureTransform};
pub use models::{ForestParams, IModel, RandomForestClassifier};
pub use training::{run_training, GridSearch, Trainer, TrainingSummary};
pub use evaluation::{EvaluationReport, ModelEvaluator};
pub use inference::{ModelArtifact, Predictor, SurvivalChance};
pub use dashboard::{Dashboard, DashboardFilter, UiState};
pub use wasm_api::WasmDashboard;
