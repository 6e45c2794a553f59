pub mod passenger; // Typované záznamy a kontrola stĺpcov
pub mod data_loader; // Strategy trait
pub mod csv_data_loader; // CSV implementation of strategy
pub mod json_data_loader; // JSON implementation of strategy
pub mod factory; // Factory for loaders

pub use passenger::{PassengerRecord, PassengerTable, REQUIRED_COLUMNS, TARGET_COLUMN};
pub use data_loader::DataLoader;
pub use csv_data_loader::CsvDataLoader;
pub use json_data_loader::JsonDataLoader;
pub use factory::{load_passengers, DataLoaderFactory};
