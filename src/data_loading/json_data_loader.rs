use super::data_loader::DataLoader;
use super::passenger::PassengerTable;
use crate::error::{Result, TitanicError};
use serde_json::Value;
use std::collections::HashMap;

/// JSON Data Loader - implementácia Strategy pattern pre JSON súbory
pub struct JsonDataLoader;

impl JsonDataLoader {
    pub fn new() -> Self {
        Self
    }

    /// Parsuje JSON array of objects formát
    /// Príklad: [{"PassengerId": 1, "Name": "Braund, Mr. Owen Harris", "Age": null, ...}, ...]
    fn parse_json_array(&self, json_text: &str) -> Result<(Vec<String>, Vec<HashMap<String, String>>)> {
        let parsed: Value = serde_json::from_str(json_text)?;

        let array = parsed
            .as_array()
            .ok_or_else(|| TitanicError::InvalidParameter("JSON musí byť array objektov".to_string()))?;

        if array.is_empty() {
            return Err(TitanicError::EmptyTable);
        }

        // Headers z prvého objektu
        let first_obj = array[0]
            .as_object()
            .ok_or_else(|| TitanicError::InvalidParameter("Prvý element musí byť objekt".to_string()))?;
        let headers: Vec<String> = first_obj.keys().map(|k| k.to_string()).collect();

        let mut records = Vec::new();
        for (idx, item) in array.iter().enumerate() {
            let obj = item.as_object().ok_or_else(|| {
                TitanicError::InvalidParameter(format!("Element {} nie je objekt", idx))
            })?;

            let mut record = HashMap::new();
            for header in &headers {
                let value_str = match obj.get(header) {
                    None | Some(Value::Null) => String::new(),
                    Some(Value::Number(n)) => n.to_string(),
                    Some(Value::String(s)) => s.clone(),
                    Some(Value::Bool(b)) => if *b { "1" } else { "0" }.to_string(),
                    Some(other) => {
                        return Err(TitanicError::InvalidValue {
                            column: header.clone(),
                            row: idx + 1,
                            value: other.to_string(),
                        })
                    }
                };
                record.insert(header.clone(), value_str);
            }
            records.push(record);
        }

        Ok((headers, records))
    }
}

impl DataLoader for JsonDataLoader {
    fn get_name(&self) -> &str {
        "JSON Data Loader"
    }

    fn load_from_string(&self, data: &str) -> Result<PassengerTable> {
        self.validate_format(data)?;
        let (headers, records) = self.parse_json_array(data)?;
        PassengerTable::from_raw(headers, &records)
    }

    fn get_available_columns(&self, data: &str) -> Result<Vec<String>> {
        let (headers, _) = self.parse_json_array(data)?;
        Ok(headers)
    }

    fn validate_format(&self, data: &str) -> Result<()> {
        let trimmed = data.trim();
        if trimmed.is_empty() {
            return Err(TitanicError::EmptyTable);
        }
        if !trimmed.starts_with('[') || !trimmed.ends_with(']') {
            return Err(TitanicError::InvalidParameter(
                "JSON musí byť array (začínať '[' a končiť ']')".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for JsonDataLoader {
    fn default() -> Self {
        Self::new()
    }
}
