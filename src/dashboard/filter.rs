use crate::data_loading::PassengerRecord;
use crate::error::{Result, TitanicError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Uzavretý interval veku `[min, max]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgeRange {
    pub min: f64,
    pub max: f64,
}

impl AgeRange {
    pub fn new(min: f64, max: f64) -> Result<Self> {
        if min.is_nan() || max.is_nan() || min > max {
            return Err(TitanicError::InvalidParameter(format!(
                "Neplatný vekový interval [{}, {}]",
                min, max
            )));
        }
        Ok(Self { min, max })
    }

    pub fn contains(&self, age: f64) -> bool {
        age >= self.min && age <= self.max
    }
}

/// Výber používateľa: množina tried, množina pohlaví a vekový interval
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardFilter {
    pub classes: BTreeSet<u8>,
    pub genders: BTreeSet<String>,
    pub age_range: AgeRange,
}

impl DashboardFilter {
    /// Filter, ktorý prepustí všetky záznamy (všetky hodnoty, celý rozsah veku)
    pub fn all(records: &[PassengerRecord]) -> Self {
        let ages = records.iter().filter_map(|r| r.age);
        let (min, max) = ages.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), a| {
            (lo.min(a), hi.max(a))
        });
        let age_range = if min <= max {
            AgeRange { min, max }
        } else {
            AgeRange { min: 0.0, max: 0.0 }
        };

        Self {
            classes: records.iter().map(|r| r.pclass).collect(),
            genders: records.iter().map(|r| r.sex.clone()).collect(),
            age_range,
        }
    }

    pub fn with_classes<I: IntoIterator<Item = u8>>(mut self, classes: I) -> Self {
        self.classes = classes.into_iter().collect();
        self
    }

    /// Pohlavia sa porovnávajú malými písmenami, ako ich ukladá loader
    pub fn with_genders<I, S>(mut self, genders: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.genders = genders.into_iter().map(|g| g.into().to_lowercase()).collect();
        self
    }

    pub fn with_age_range(mut self, age_range: AgeRange) -> Self {
        self.age_range = age_range;
        self
    }

    /// Záznam bez veku neprejde vekovým filtrom
    pub fn matches(&self, record: &PassengerRecord) -> bool {
        self.classes.contains(&record.pclass)
            && self.genders.contains(&record.sex)
            && record.age.map_or(false, |age| self.age_range.contains(age))
    }

    /// Indexy vyhovujúcich záznamov v pôvodnom poradí
    pub fn apply(&self, records: &[PassengerRecord]) -> Vec<usize> {
        records
            .iter()
            .enumerate()
            .filter(|(_, r)| self.matches(r))
            .map(|(i, _)| i)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64, pclass: u8, sex: &str, age: f64) -> PassengerRecord {
        PassengerRecord {
            passenger_id: id,
            survived: Some(0),
            pclass,
            name: format!("Passenger {id}"),
            sex: sex.to_string(),
            age: Some(age),
            sib_sp: 0,
            parch: 0,
            ticket: "T".to_string(),
            fare: Some(10.0),
            cabin: None,
            embarked: Some("S".to_string()),
        }
    }

    fn records() -> Vec<PassengerRecord> {
        vec![
            record(1, 1, "female", 30.0),
            record(2, 3, "male", 18.0),
            record(3, 2, "male", 40.0),
            record(4, 3, "female", 65.0),
        ]
    }

    #[test]
    fn test_default_filter_selects_everything() {
        let records = records();
        let filter = DashboardFilter::all(&records);
        assert_eq!(filter.apply(&records), vec![0, 1, 2, 3]);
        assert_eq!(filter.age_range, AgeRange { min: 18.0, max: 65.0 });
        assert_eq!(filter.classes, BTreeSet::from([1, 2, 3]));
    }

    #[test]
    fn test_class_and_gender_membership() {
        let records = records();
        let filter = DashboardFilter::all(&records)
            .with_classes([3])
            .with_genders(["male"]);
        assert_eq!(filter.apply(&records), vec![1]);
    }

    #[test]
    fn test_age_range_is_inclusive() {
        let records = records();
        let filter =
            DashboardFilter::all(&records).with_age_range(AgeRange::new(18.0, 40.0).unwrap());
        assert_eq!(filter.apply(&records), vec![0, 1, 2]);
    }

    #[test]
    fn test_empty_selection() {
        let records = records();
        let filter = DashboardFilter::all(&records).with_classes(Vec::<u8>::new());
        assert!(filter.apply(&records).is_empty());
    }

    #[test]
    fn test_inverted_range_rejected() {
        assert!(AgeRange::new(50.0, 10.0).is_err());
        assert!(AgeRange::new(f64::NAN, 10.0).is_err());
    }
}
