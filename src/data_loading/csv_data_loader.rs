use super::data_loader::DataLoader;
use super::passenger::PassengerTable;
use crate::error::{Result, TitanicError};
use csv::ReaderBuilder;
use std::collections::HashMap;
use tracing::debug;

/// CSV Data Loader - implementácia Strategy pattern pre CSV súbory
pub struct CsvDataLoader;

impl CsvDataLoader {
    pub fn new() -> Self {
        Self
    }

    /// Helper pre parsovanie CSV do string záznamov
    fn parse_csv(&self, csv_text: &str) -> Result<(Vec<String>, Vec<HashMap<String, String>>)> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(false)
            .trim(csv::Trim::All)
            .from_reader(csv_text.as_bytes());

        let headers: Vec<String> = rdr
            .headers()?
            .iter()
            .map(|s| s.trim().to_string())
            .collect();

        let mut records = Vec::new();
        for record in rdr.records() {
            let record = record?;
            records.push(
                headers
                    .iter()
                    .cloned()
                    .zip(record.iter().map(|val| val.to_string()))
                    .collect::<HashMap<_, _>>(),
            );
        }

        Ok((headers, records))
    }
}

impl DataLoader for CsvDataLoader {
    fn get_name(&self) -> &str {
        "CSV Data Loader"
    }

    fn load_from_string(&self, data: &str) -> Result<PassengerTable> {
        self.validate_format(data)?;

        let (headers, records) = self.parse_csv(data)?;
        debug!(rows = records.len(), columns = headers.len(), "parsed CSV");

        PassengerTable::from_raw(headers, &records)
    }

    fn get_available_columns(&self, data: &str) -> Result<Vec<String>> {
        let (headers, _) = self.parse_csv(data)?;
        Ok(headers)
    }

    fn validate_format(&self, data: &str) -> Result<()> {
        if data.trim().is_empty() {
            return Err(TitanicError::EmptyTable);
        }
        Ok(())
    }
}

impl Default for CsvDataLoader {
    fn default() -> Self {
        Self::new()
    }
}
