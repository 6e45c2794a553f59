//! Feature Transform: surová tabuľka pasažierov -> numerická tabuľka pre model.
//!
//! Kroky:
//! 1. imputácia veku mediánom
//! 2. imputácia prístavu (Embarked) najčastejšou hodnotou
//! 3. imputácia cestovného mediánom
//! 4. `FamilySize = SibSp + Parch + 1`
//! 5. `IsAlone = 1` práve vtedy, keď `FamilySize == 1`
//! 6. oslovenie z mena (zriedkavé -> `Rare`, `Mlle`/`Ms` -> `Miss`, `Mme` -> `Mrs`)
//! 7. one-hot kódovanie Sex, Embarked, Title bez referenčnej úrovne
//! 8. Name, Ticket, Cabin (a PassengerId) nejdú do výstupu
//!
//! Štatistiky z kroku 1-3 sa dajú uložiť (`ImputationStats`) a použiť znova
//! na nových záznamoch, aby sa predikcia robila s hodnotami z trénovania.

use super::feature_table::FeatureTable;
use super::null_handler::{ModeImputer, NullValueHandler};
use super::ohencoder::OneHotEncoder;
use super::schema::{FeatureSchema, EMBARKED, SEX, TITLE};
use super::title::title_level;
use crate::data_loading::{load_passengers, PassengerRecord, PassengerTable};
use crate::error::{Result, TitanicError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Hodnoty použité na doplnenie chýbajúcich údajov
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImputationStats {
    pub age_median: f64,
    pub fare_median: f64,
    pub embarked_mode: String,
}

impl ImputationStats {
    /// Medián veku a cestovného, modus prístavu
    pub fn fit(table: &PassengerTable) -> Result<Self> {
        if table.is_empty() {
            return Err(TitanicError::EmptyTable);
        }

        let records = table.records();
        let ages: Vec<Option<f64>> = records.iter().map(|r| r.age).collect();
        let fares: Vec<Option<f64>> = records.iter().map(|r| r.fare).collect();
        let ports: Vec<Option<&str>> = records.iter().map(|r| r.embarked.as_deref()).collect();

        Ok(Self {
            age_median: NullValueHandler::median("Age").replacement_value(&ages)?,
            fare_median: NullValueHandler::median("Fare").replacement_value(&fares)?,
            embarked_mode: ModeImputer::new("Embarked").replacement_value(&ports)?,
        })
    }
}

pub struct FeatureTransform {
    stats: ImputationStats,
    schema: FeatureSchema,
    sex: OneHotEncoder,
    embarked: OneHotEncoder,
    title: OneHotEncoder,
}

impl FeatureTransform {
    pub fn from_stats(stats: ImputationStats) -> Self {
        Self {
            stats,
            schema: FeatureSchema::current(),
            sex: OneHotEncoder::new(SEX),
            embarked: OneHotEncoder::new(EMBARKED),
            title: OneHotEncoder::new(TITLE),
        }
    }

    /// Vypočíta imputačné štatistiky z tabuľky
    pub fn fit(table: &PassengerTable) -> Result<Self> {
        table.check_required_columns()?;
        let stats = ImputationStats::fit(table)?;
        debug!(
            age_median = stats.age_median,
            fare_median = stats.fare_median,
            embarked_mode = %stats.embarked_mode,
            "fitted imputation statistics"
        );
        Ok(Self::from_stats(stats))
    }

    pub fn stats(&self) -> &ImputationStats {
        &self.stats
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    pub fn transform(&self, table: &PassengerTable) -> Result<FeatureTable> {
        table.check_required_columns()?;
        if table.is_empty() {
            return Err(TitanicError::EmptyTable);
        }

        let rows = table
            .records()
            .iter()
            .map(|record| self.transform_record(record))
            .collect::<Result<Vec<_>>>()?;

        Ok(FeatureTable::new(
            self.schema.version,
            self.schema.columns.clone(),
            rows,
            table.records().iter().map(|r| r.passenger_id).collect(),
            table.records().iter().map(|r| r.survived).collect(),
        ))
    }

    /// Jeden riadok v poradí `FeatureSchema::current()`
    fn transform_record(&self, record: &PassengerRecord) -> Result<Vec<f64>> {
        let age = record.age.unwrap_or(self.stats.age_median);
        let fare = record.fare.unwrap_or(self.stats.fare_median);
        let embarked = record
            .embarked
            .as_deref()
            .unwrap_or(self.stats.embarked_mode.as_str());

        let family_size = record.sib_sp + record.parch + 1;
        let is_alone = if family_size == 1 { 1.0 } else { 0.0 };

        let mut row = Vec::with_capacity(self.schema.width());
        row.extend([
            record.pclass as f64,
            age,
            record.sib_sp as f64,
            record.parch as f64,
            fare,
            family_size as f64,
            is_alone,
        ]);
        row.extend(self.sex.encode(Some(record.sex.as_str()))?);
        row.extend(self.embarked.encode(Some(embarked))?);
        row.extend(self.title.encode(title_level(&record.name))?);

        Ok(row)
    }
}

/// Fit + transform na tej istej tabuľke
pub fn load_and_clean_data(table: &PassengerTable) -> Result<FeatureTable> {
    FeatureTransform::fit(table)?.transform(table)
}

/// Načíta CSV/JSON a vráti tabuľku pripravenú pre model
pub fn load_and_clean_csv<P: AsRef<Path>>(path: P) -> Result<FeatureTable> {
    let table = load_passengers(path)?;
    load_and_clean_data(&table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_loading::{CsvDataLoader, DataLoader};

    const HEADER: &str = "PassengerId,Survived,Pclass,Name,Sex,Age,SibSp,Parch,Ticket,Fare,Cabin,Embarked";

    fn load(rows: &[&str]) -> PassengerTable {
        let csv = format!("{}\n{}\n", HEADER, rows.join("\n"));
        CsvDataLoader::new().load_from_string(&csv).unwrap()
    }

    fn three_passengers() -> PassengerTable {
        load(&[
            "1,1,1,\"Cumings, Mrs. John Bradley\",female,29,0,0,PC 17599,71.28,C85,C",
            "2,0,3,\"Braund, Mr. Owen Harris\",male,22,1,0,A/5 21171,7.25,,S",
            "3,0,3,\"Moran, Mr. James\",male,,0,0,330877,8.46,,S",
        ])
    }

    fn value(features: &FeatureTable, row: usize, column: &str) -> f64 {
        features.rows()[row][features.column_index(column).unwrap()]
    }

    #[test]
    fn test_three_row_scenario() {
        let features = load_and_clean_data(&three_passengers()).unwrap();

        assert_eq!(value(&features, 2, "Age"), 25.5);
        assert_eq!(value(&features, 1, "FamilySize"), 2.0);
        assert_eq!(value(&features, 1, "IsAlone"), 0.0);
        assert_eq!(value(&features, 0, "FamilySize"), 1.0);
        assert_eq!(value(&features, 0, "IsAlone"), 1.0);
        assert_eq!(value(&features, 2, "FamilySize"), 1.0);
        assert_eq!(value(&features, 2, "IsAlone"), 1.0);
        assert_eq!(features.targets(), &[Some(1), Some(0), Some(0)]);
        assert_eq!(features.passenger_ids(), &[1, 2, 3]);
    }

    #[test]
    fn test_one_hot_columns() {
        let features = load_and_clean_data(&three_passengers()).unwrap();

        assert_eq!(value(&features, 0, "Sex_male"), 0.0);
        assert_eq!(value(&features, 1, "Sex_male"), 1.0);
        assert_eq!(value(&features, 0, "Embarked_S"), 0.0);
        assert_eq!(value(&features, 0, "Embarked_Q"), 0.0);
        assert_eq!(value(&features, 1, "Embarked_S"), 1.0);
        assert_eq!(value(&features, 0, "Title_Mrs"), 1.0);
        assert_eq!(value(&features, 1, "Title_Mr"), 1.0);
    }

    #[test]
    fn test_output_has_no_missing_values() {
        let table = load(&[
            "1,1,1,\"A, Mrs. B\",female,,0,0,T1,,,",
            "2,0,3,\"C, Mr. D\",male,40,0,0,T2,10,,Q",
            "3,0,3,\"E, Mr. F\",male,30,0,0,T3,,,Q",
        ]);
        let features = load_and_clean_data(&table).unwrap();

        for row in features.rows() {
            assert_eq!(row.len(), features.columns().len());
            assert!(row.iter().all(|v| v.is_finite()));
        }
        assert_eq!(value(&features, 0, "Age"), 35.0);
        assert_eq!(value(&features, 0, "Fare"), 10.0);
        assert_eq!(value(&features, 0, "Embarked_Q"), 1.0);
    }

    #[test]
    fn test_nan_inf_and_na_markers_are_imputed() {
        let table = load(&[
            "1,1,1,\"A, Mrs. B\",Female,nan,0,0,T1,inf,,S",
            "2,0,3,\"C, Mr. D\",MALE,40,0,0,T2,10,,N/A",
            "3,0,3,\"E, Mr. F\",male,N/A,0,0,T3,20,,S",
            "4,1,2,\"G, Miss. H\",female,20,0,0,T4,NaN,,S",
        ]);
        let features = load_and_clean_data(&table).unwrap();

        for row in features.rows() {
            assert!(row.iter().all(|v| v.is_finite()));
        }
        // Medián známych vekov (40, 20) a cien (10, 20)
        assert_eq!(value(&features, 0, "Age"), 30.0);
        assert_eq!(value(&features, 2, "Age"), 30.0);
        assert_eq!(value(&features, 0, "Fare"), 15.0);
        assert_eq!(value(&features, 3, "Fare"), 15.0);
        assert_eq!(value(&features, 1, "Embarked_S"), 1.0);
        assert_eq!(value(&features, 0, "Sex_male"), 0.0);
        assert_eq!(value(&features, 1, "Sex_male"), 1.0);
    }

    #[test]
    fn test_is_alone_iff_family_size_one() {
        let table = load(&[
            "1,1,1,\"A, Mrs. B\",female,30,0,0,T1,10,,S",
            "2,0,3,\"C, Mr. D\",male,40,0,2,T2,10,,S",
            "3,0,3,\"E, Master. F\",male,3,3,1,T3,10,,S",
        ]);
        let features = load_and_clean_data(&table).unwrap();
        let family = features.column("FamilySize").unwrap();
        let alone = features.column("IsAlone").unwrap();

        assert_eq!(family, vec![1.0, 3.0, 5.0]);
        for (f, a) in family.iter().zip(alone.iter()) {
            assert_eq!(*a == 1.0, *f == 1.0);
        }
    }

    #[test]
    fn test_drops_text_and_identifier_columns() {
        let features = load_and_clean_data(&three_passengers()).unwrap();
        for dropped in ["Name", "Ticket", "Cabin", "PassengerId", "Survived", "Sex", "Embarked"] {
            assert!(features.column_index(dropped).is_none(), "{dropped} should be dropped");
        }
        assert_eq!(features.columns(), FeatureSchema::current().columns.as_slice());
    }

    #[test]
    fn test_schema_does_not_depend_on_data() {
        // Tabuľka bez žien, bez Q a bez Master má stále všetky stĺpce
        let table = load(&["1,0,3,\"Braund, Mr. Owen Harris\",male,22,1,0,A/5 21171,7.25,,S"]);
        let features = load_and_clean_data(&table).unwrap();
        assert_eq!(features.columns().len(), FeatureSchema::current().width());
    }

    #[test]
    fn test_idempotent() {
        let table = three_passengers();
        let first = load_and_clean_data(&table).unwrap();
        let second = load_and_clean_data(&table).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_required_column_fails() {
        let table = PassengerTable::new(vec!["PassengerId".to_string()], vec![]);
        let err = load_and_clean_data(&table).unwrap_err();
        assert!(matches!(err, TitanicError::MissingColumns(_)));
    }

    #[test]
    fn test_empty_table_rejected() {
        let headers = three_passengers().headers().to_vec();
        let err = load_and_clean_data(&PassengerTable::new(headers, vec![])).unwrap_err();
        assert!(matches!(err, TitanicError::EmptyTable));
    }

    #[test]
    fn test_unknown_port_rejected() {
        let table = load(&["1,0,3,\"Braund, Mr. Owen Harris\",male,22,1,0,A/5 21171,7.25,,X"]);
        let err = load_and_clean_data(&table).unwrap_err();
        assert!(matches!(err, TitanicError::UnknownCategory { ref field, .. } if field == "Embarked"));
    }

    #[test]
    fn test_stored_stats_are_reused() {
        let train = three_passengers();
        let transform = FeatureTransform::fit(&train).unwrap();

        let new = load(&["9,,2,\"Doe, Miss. Jane\",female,,0,0,X,,,"]);
        let features = transform.transform(&new).unwrap();

        assert_eq!(value(&features, 0, "Age"), 25.5);
        assert_eq!(value(&features, 0, "Fare"), 8.46);
        assert_eq!(value(&features, 0, "Embarked_S"), 1.0);
        assert_eq!(features.targets(), &[None]);
    }
}
