use crate::error::{Result, TitanicError};
use serde::{Deserialize, Serialize};
use smartcore::linalg::basic::matrix::DenseMatrix;

/// Výstup Feature Transform: čisto numerické riadky v poradí schémy.
///
/// `PassengerId` nie je feature, drží sa len ako kľúč riadku.
/// `targets` obsahuje `Survived`, ak bol v zdroji.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureTable {
    schema_version: u32,
    columns: Vec<String>,
    rows: Vec<Vec<f64>>,
    passenger_ids: Vec<i64>,
    targets: Vec<Option<i32>>,
}

impl FeatureTable {
    pub fn new(
        schema_version: u32,
        columns: Vec<String>,
        rows: Vec<Vec<f64>>,
        passenger_ids: Vec<i64>,
        targets: Vec<Option<i32>>,
    ) -> Self {
        Self {
            schema_version,
            columns,
            rows,
            passenger_ids,
            targets,
        }
    }

    pub fn schema_version(&self) -> u32 {
        self.schema_version
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn passenger_ids(&self) -> &[i64] {
        &self.passenger_ids
    }

    pub fn targets(&self) -> &[Option<i32>] {
        &self.targets
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Hodnoty jedného stĺpca
    pub fn column(&self, name: &str) -> Option<Vec<f64>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(|row| row[idx]).collect())
    }

    /// Podmnožina riadkov podľa indexov (zachová stĺpce aj schému)
    pub fn select(&self, indices: &[usize]) -> FeatureTable {
        FeatureTable {
            schema_version: self.schema_version,
            columns: self.columns.clone(),
            rows: indices.iter().map(|&i| self.rows[i].clone()).collect(),
            passenger_ids: indices.iter().map(|&i| self.passenger_ids[i]).collect(),
            targets: indices.iter().map(|&i| self.targets[i]).collect(),
        }
    }

    /// Riadky a cieľ pre trénovanie; každý riadok musí mať `Survived`
    pub fn labeled(&self) -> Result<(Vec<Vec<f64>>, Vec<i32>)> {
        let labels = self
            .targets
            .iter()
            .zip(self.passenger_ids.iter())
            .map(|(target, id)| target.ok_or(TitanicError::MissingTarget(*id)))
            .collect::<Result<Vec<i32>>>()?;

        Ok((self.rows.clone(), labels))
    }

    pub fn to_matrix(&self) -> Result<DenseMatrix<f64>> {
        to_matrix(&self.rows)
    }
}

/// Prevod riadkov na smartcore maticu
pub fn to_matrix(rows: &[Vec<f64>]) -> Result<DenseMatrix<f64>> {
    if rows.is_empty() {
        return Err(TitanicError::EmptyTable);
    }
    Ok(DenseMatrix::from_2d_vec(&rows.to_vec())?)
}
