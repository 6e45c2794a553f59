//! Pevná, verzovaná schéma feature stĺpcov zdieľaná medzi transformáciou,
//! trénovaním a predikciou.
//!
//! Stĺpce one-hot kódovania sa neodvodzujú z obsahu dát, ale z pevných
//! zoznamov úrovní. Prvá úroveň každého poľa je referenčná a nemá vlastný
//! stĺpec.

use crate::error::{Result, TitanicError};
use serde::{Deserialize, Serialize};

/// Zvýšiť pri každej zmene stĺpcov alebo ich poradia
pub const SCHEMA_VERSION: u32 = 1;

/// Numerické stĺpce v poradí, v akom idú do modelu
pub const NUMERIC_COLUMNS: [&str; 7] = [
    "Pclass",
    "Age",
    "SibSp",
    "Parch",
    "Fare",
    "FamilySize",
    "IsAlone",
];

/// Kategorické pole s pevným zoznamom úrovní
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoricalField {
    pub name: &'static str,
    pub levels: &'static [&'static str],
}

impl CategoricalField {
    /// Úroveň kódovaná ako samé nuly
    pub fn reference_level(&self) -> &'static str {
        self.levels[0]
    }

    /// Názvy indikátorových stĺpcov (bez referenčnej úrovne), napr. `Sex_male`
    pub fn indicator_columns(&self) -> Vec<String> {
        self.levels[1..]
            .iter()
            .map(|level| format!("{}_{}", self.name, level))
            .collect()
    }
}

pub const SEX: CategoricalField = CategoricalField {
    name: "Sex",
    levels: &["female", "male"],
};

pub const EMBARKED: CategoricalField = CategoricalField {
    name: "Embarked",
    levels: &["C", "Q", "S"],
};

pub const TITLE: CategoricalField = CategoricalField {
    name: "Title",
    levels: &["Master", "Miss", "Mr", "Mrs", "Rare"],
};

pub const CATEGORICAL_FIELDS: [CategoricalField; 3] = [SEX, EMBARKED, TITLE];

/// Kontrakt medzi Feature Transform a modelom
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSchema {
    pub version: u32,
    pub columns: Vec<String>,
}

impl FeatureSchema {
    pub fn current() -> Self {
        let mut columns: Vec<String> = NUMERIC_COLUMNS.iter().map(|c| c.to_string()).collect();
        for field in CATEGORICAL_FIELDS.iter() {
            columns.extend(field.indicator_columns());
        }

        Self {
            version: SCHEMA_VERSION,
            columns,
        }
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Overí, že stĺpce (aj ich poradie) a verzia presne sedia
    pub fn validate(&self, version: u32, columns: &[String]) -> Result<()> {
        if version != self.version {
            return Err(TitanicError::SchemaVersion {
                expected: self.version,
                found: version,
            });
        }

        if columns == self.columns.as_slice() {
            return Ok(());
        }

        let missing: Vec<String> = self
            .columns
            .iter()
            .filter(|c| !columns.contains(c))
            .cloned()
            .collect();
        let unexpected: Vec<String> = columns
            .iter()
            .filter(|c| !self.columns.contains(c))
            .cloned()
            .collect();

        // Rovnaká množina, iné poradie - tiež nekompatibilné
        Err(TitanicError::SchemaMismatch {
            missing,
            unexpected,
        })
    }
}
