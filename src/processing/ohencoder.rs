use super::schema::CategoricalField;
use crate::error::{Result, TitanicError};

/// One-hot encoder nad pevným zoznamom úrovní.
/// Referenčná (prvá) úroveň nemá vlastný stĺpec, takže k úrovní dáva k-1 stĺpcov.
#[derive(Debug, Clone, Copy)]
pub struct OneHotEncoder {
    field: CategoricalField,
}

impl OneHotEncoder {
    pub fn new(field: CategoricalField) -> Self {
        Self { field }
    }

    pub fn get_name(&self) -> &str {
        self.field.name
    }

    pub fn width(&self) -> usize {
        self.field.levels.len() - 1
    }

    pub fn column_names(&self) -> Vec<String> {
        self.field.indicator_columns()
    }

    /// Zakóduje jednu hodnotu. `None` dá samé nuly (rovnako ako referenčná úroveň),
    /// hodnota mimo schémy je chyba.
    pub fn encode(&self, value: Option<&str>) -> Result<Vec<f64>> {
        let mut row = vec![0.0; self.width()];

        let Some(value) = value else {
            return Ok(row);
        };

        let position = self
            .field
            .levels
            .iter()
            .position(|level| *level == value)
            .ok_or_else(|| TitanicError::UnknownCategory {
                field: self.field.name.to_string(),
                value: value.to_string(),
            })?;

        if position > 0 {
            row[position - 1] = 1.0;
        }
        Ok(row)
    }
}
