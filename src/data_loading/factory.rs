use super::csv_data_loader::CsvDataLoader;
use super::data_loader::DataLoader;
use super::json_data_loader::JsonDataLoader;
use super::passenger::PassengerTable;
use crate::error::{Result, TitanicError};
use std::path::Path;
use tracing::info;

/// Factory pre vytváranie data loaderov podľa typu
pub struct DataLoaderFactory;

impl DataLoaderFactory {
    /// Vytvorí loader na základe typu
    pub fn create(loader_type: &str) -> Result<Box<dyn DataLoader>> {
        match loader_type.to_lowercase().as_str() {
            "csv" => Ok(Box::new(CsvDataLoader::new())),
            "json" => Ok(Box::new(JsonDataLoader::new())),
            _ => Err(TitanicError::InvalidParameter(format!(
                "Neznámy typ loadera: {}",
                loader_type
            ))),
        }
    }

    /// Automaticky detekuje formát na základe obsahu
    pub fn create_auto(data: &str) -> Result<Box<dyn DataLoader>> {
        let trimmed = data.trim();

        if trimmed.starts_with('[') && trimmed.contains('{') {
            Ok(Box::new(JsonDataLoader::new()))
        } else if trimmed.contains(',') || trimmed.contains('\n') {
            Ok(Box::new(CsvDataLoader::new()))
        } else {
            Err(TitanicError::InvalidParameter(
                "Nepodarilo sa automaticky detekovať formát dát".to_string(),
            ))
        }
    }

    /// Vráti zoznam všetkých podporovaných formátov
    pub fn available_formats() -> Vec<&'static str> {
        vec!["csv", "json"]
    }
}

/// Načíta pasažierov zo súboru, formát podľa prípony (default CSV)
pub fn load_passengers<P: AsRef<Path>>(path: P) -> Result<PassengerTable> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;

    let loader = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => DataLoaderFactory::create("json")?,
        _ => DataLoaderFactory::create("csv")?,
    };

    let table = loader.load_from_string(&content)?;
    info!(path = %path.display(), loader = loader.get_name(), rows = table.len(), "loaded passengers");
    Ok(table)
}
