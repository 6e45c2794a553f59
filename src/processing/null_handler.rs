use crate::error::{Result, TitanicError};
use statrs::statistics::{Data, OrderStatistics, Statistics};
use std::collections::HashMap;

/// Stratégia nahradenia chýbajúcich numerických hodnôt
#[derive(Clone, Debug, PartialEq)]
pub enum ReplacementStrategy {
    Mean,           // Nahradiť priemerom stĺpca
    Median,         // Nahradiť mediánom stĺpca
    Constant(f64),  // Nahradiť konštantou
}

/// Procesor pre nahradenie null hodnôt v numerickom stĺpci
#[derive(Clone, Debug)]
pub struct NullValueHandler {
    column: String,
    replacement_strategy: ReplacementStrategy,
}

impl NullValueHandler {
    pub fn new(column: &str, replacement_strategy: ReplacementStrategy) -> Self {
        Self {
            column: column.to_string(),
            replacement_strategy,
        }
    }

    pub fn median(column: &str) -> Self {
        Self::new(column, ReplacementStrategy::Median)
    }

    /// Vypočíta náhradnú hodnotu z pozorovaných (nie-null) hodnôt
    pub fn replacement_value(&self, values: &[Option<f64>]) -> Result<f64> {
        if let ReplacementStrategy::Constant(val) = self.replacement_strategy {
            return Ok(val);
        }

        let observed: Vec<f64> = values
            .iter()
            .flatten()
            .copied()
            .filter(|v| !v.is_nan())
            .collect();

        if observed.is_empty() {
            return Err(TitanicError::NoObservedValues(self.column.clone()));
        }

        Ok(match self.replacement_strategy {
            ReplacementStrategy::Mean => observed.iter().mean(),
            _ => median(&observed),
        })
    }
}

/// Medián; pri párnom počte priemer dvoch stredných hodnôt. Prázdny vstup dáva NaN.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let mut data = Data::new(values.to_vec());
    data.median()
}

/// Imputácia kategorického stĺpca najčastejšou hodnotou
#[derive(Clone, Debug)]
pub struct ModeImputer {
    column: String,
}

impl ModeImputer {
    pub fn new(column: &str) -> Self {
        Self {
            column: column.to_string(),
        }
    }

    /// Najčastejšia hodnota; pri zhode vyhráva lexikograficky menšia
    pub fn replacement_value(&self, values: &[Option<&str>]) -> Result<String> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for val in values.iter().flatten() {
            *counts.entry(*val).or_insert(0) += 1;
        }

        counts
            .into_iter()
            .max_by(|(a_val, a_cnt), (b_val, b_cnt)| a_cnt.cmp(b_cnt).then_with(|| b_val.cmp(a_val)))
            .map(|(val, _)| val.to_string())
            .ok_or_else(|| TitanicError::NoObservedValues(self.column.clone()))
    }
}
