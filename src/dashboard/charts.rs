//! Dátové série pre grafy. Nič sa tu nekreslí, frontend dostane len čísla.

use crate::data_loading::PassengerRecord;
use serde::Serialize;
use statrs::statistics::{Data, OrderStatistics};
use std::collections::BTreeMap;

pub const AGE_HISTOGRAM_BINS: usize = 30;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryCount {
    pub label: String,
    pub count: usize,
    /// Podiel v percentách
    pub share: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Gauge {
    pub value: f64,
    pub min: f64,
    pub max: f64,
}

/// Päťčíselné zhrnutie pre box plot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxSummary {
    pub group: String,
    pub count: usize,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub passenger_id: i64,
    pub age: f64,
    pub probability: f64,
    pub sex: String,
    pub pclass: u8,
}

/// Histogram s rovnako širokými košmi cez rozsah hodnôt; posledný kôš je zhora uzavretý
pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let width = if max > min { (max - min) / bins as f64 } else { 1.0 };

    let mut result: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            start: min + i as f64 * width,
            end: min + (i + 1) as f64 * width,
            count: 0,
        })
        .collect();

    for &v in values {
        let idx = (((v - min) / width) as usize).min(bins - 1);
        result[idx].count += 1;
    }
    result
}

pub fn age_histogram(records: &[&PassengerRecord]) -> Vec<HistogramBin> {
    let ages: Vec<f64> = records.iter().filter_map(|r| r.age).collect();
    histogram(&ages, AGE_HISTOGRAM_BINS)
}

fn category_counts(labels: impl Iterator<Item = String>) -> Vec<CategoryCount> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for label in labels {
        *counts.entry(label).or_insert(0) += 1;
    }
    let total: usize = counts.values().sum();

    counts
        .into_iter()
        .map(|(label, count)| CategoryCount {
            label,
            count,
            share: count as f64 / total as f64 * 100.0,
        })
        .collect()
}

/// Počty podľa triedy (zoradené podľa triedy)
pub fn class_distribution(records: &[&PassengerRecord]) -> Vec<CategoryCount> {
    category_counts(records.iter().map(|r| r.pclass.to_string()))
}

/// Počty podľa pohlavia, najčastejšie prvé
pub fn gender_counts(records: &[&PassengerRecord]) -> Vec<CategoryCount> {
    let mut counts = category_counts(records.iter().map(|r| r.sex.clone()));
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

pub fn survival_gauge(survival_pct: Option<f64>) -> Gauge {
    Gauge {
        value: survival_pct.unwrap_or(0.0),
        min: 0.0,
        max: 100.0,
    }
}

fn box_summary(group: String, values: Vec<f64>) -> BoxSummary {
    let count = values.len();
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mut data = Data::new(values);

    BoxSummary {
        group,
        count,
        min,
        q1: data.lower_quartile(),
        median: data.median(),
        q3: data.upper_quartile(),
        max,
    }
}

/// Rozdelenie pravdepodobností podľa skupiny; `probabilities` je zarovnané s `records`
pub fn probability_by<F>(
    records: &[&PassengerRecord],
    probabilities: &[f64],
    key: F,
) -> Vec<BoxSummary>
where
    F: Fn(&PassengerRecord) -> String,
{
    let mut groups: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    for (record, &p) in records.iter().zip(probabilities.iter()) {
        groups.entry(key(record)).or_default().push(p);
    }
    groups
        .into_iter()
        .map(|(group, values)| box_summary(group, values))
        .collect()
}

pub fn probability_by_gender(records: &[&PassengerRecord], probabilities: &[f64]) -> Vec<BoxSummary> {
    probability_by(records, probabilities, |r| r.sex.clone())
}

pub fn probability_by_class(records: &[&PassengerRecord], probabilities: &[f64]) -> Vec<BoxSummary> {
    probability_by(records, probabilities, |r| r.pclass.to_string())
}

/// Vek vs. pravdepodobnosť; záznamy bez veku sa vynechajú
pub fn age_probability_scatter(records: &[&PassengerRecord], probabilities: &[f64]) -> Vec<ScatterPoint> {
    records
        .iter()
        .zip(probabilities.iter())
        .filter_map(|(r, &probability)| {
            r.age.map(|age| ScatterPoint {
                passenger_id: r.passenger_id,
                age,
                probability,
                sex: r.sex.clone(),
                pclass: r.pclass,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64, pclass: u8, sex: &str, age: Option<f64>) -> PassengerRecord {
        PassengerRecord {
            passenger_id: id,
            survived: Some(1),
            pclass,
            name: String::new(),
            sex: sex.to_string(),
            age,
            sib_sp: 0,
            parch: 0,
            ticket: String::new(),
            fare: None,
            cabin: None,
            embarked: None,
        }
    }

    #[test]
    fn test_histogram_counts_every_value() {
        let values: Vec<f64> = (0..=80).map(f64::from).collect();
        let bins = histogram(&values, AGE_HISTOGRAM_BINS);

        assert_eq!(bins.len(), 30);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), values.len());
        assert_eq!(bins[0].start, 0.0);
        assert!((bins[29].end - 80.0).abs() < 1e-9);
        assert!(bins[29].count > 0);
    }

    #[test]
    fn test_histogram_single_value() {
        let bins = histogram(&[5.0, 5.0], 3);
        assert_eq!(bins[0].count, 2);
        assert!(histogram(&[], 3).is_empty());
    }

    #[test]
    fn test_class_distribution_and_gender_counts() {
        let records = vec![
            record(1, 3, "male", Some(20.0)),
            record(2, 3, "male", Some(30.0)),
            record(3, 1, "female", Some(40.0)),
            record(4, 3, "female", None),
            record(5, 2, "male", Some(50.0)),
        ];
        let refs: Vec<&PassengerRecord> = records.iter().collect();

        let classes = class_distribution(&refs);
        assert_eq!(
            classes.iter().map(|c| (c.label.as_str(), c.count)).collect::<Vec<_>>(),
            vec![("1", 1), ("2", 1), ("3", 3)]
        );
        assert_eq!(classes[2].share, 60.0);

        let genders = gender_counts(&refs);
        assert_eq!(genders[0].label, "male");
        assert_eq!(genders[0].count, 3);
    }

    #[test]
    fn test_probability_groups_and_scatter() {
        let records = vec![
            record(1, 1, "female", Some(20.0)),
            record(2, 3, "male", None),
            record(3, 3, "male", Some(30.0)),
        ];
        let refs: Vec<&PassengerRecord> = records.iter().collect();
        let probabilities = [0.9, 0.1, 0.3];

        let by_gender = probability_by_gender(&refs, &probabilities);
        assert_eq!(by_gender.len(), 2);
        assert_eq!(by_gender[0].group, "female");
        assert_eq!(by_gender[1].count, 2);
        assert_eq!(by_gender[1].min, 0.1);
        assert_eq!(by_gender[1].max, 0.3);

        let by_class = probability_by_class(&refs, &probabilities);
        assert_eq!(by_class[0].median, 0.9);

        let scatter = age_probability_scatter(&refs, &probabilities);
        assert_eq!(scatter.len(), 2);
        assert_eq!(scatter[1].passenger_id, 3);
    }

    #[test]
    fn test_gauge_range() {
        let gauge = survival_gauge(Some(38.4));
        assert_eq!((gauge.min, gauge.max, gauge.value), (0.0, 100.0, 38.4));
        assert_eq!(survival_gauge(None).value, 0.0);
    }
}
