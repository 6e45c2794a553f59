use crate::data_loading::PassengerRecord;
use crate::inference::{PassengerPrediction, SurvivalChance};
use serde::Serialize;

/// Počty pasažierov v kategóriách šance
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ChanceBreakdown {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl ChanceBreakdown {
    pub fn from_probabilities(probabilities: &[f64]) -> Self {
        probabilities
            .iter()
            .fold(Self::default(), |mut acc, &p| {
                match SurvivalChance::from_probability(p) {
                    SurvivalChance::High => acc.high += 1,
                    SurvivalChance::Medium => acc.medium += 1,
                    SurvivalChance::Low => acc.low += 1,
                }
                acc
            })
    }

    pub fn total(&self) -> usize {
        self.high + self.medium + self.low
    }
}

/// Tabuľka predikcií zoradená od najvyššej pravdepodobnosti
pub fn prediction_table(records: &[&PassengerRecord], probabilities: &[f64]) -> Vec<PassengerPrediction> {
    let mut rows: Vec<PassengerPrediction> = records
        .iter()
        .zip(probabilities.iter())
        .map(|(r, &probability)| PassengerPrediction {
            passenger_id: r.passenger_id,
            name: r.name.clone(),
            sex: r.sex.clone(),
            age: r.age,
            pclass: r.pclass,
            probability,
            chance: SurvivalChance::from_probability(probability),
        })
        .collect();

    // Stabilné triedenie: pri rovnakej pravdepodobnosti ostáva pôvodné poradie
    rows.sort_by(|a, b| b.probability.total_cmp(&a.probability));
    rows
}
