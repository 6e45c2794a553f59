use super::split::stratified_k_fold;
use crate::error::{Result, TitanicError};
use crate::evaluation::ModelEvaluator;
use crate::models::{ForestParams, IModel, RandomForestClassifier};
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;
use tracing::{debug, info};

/// Builder pre konfiguráciu grid searchu
pub struct GridSearchBuilder {
    n_estimators: Vec<usize>,
    max_depth: Vec<Option<u16>>,
    cv_folds: usize,
    seed: u64,
    max_features: Option<usize>,
}

impl GridSearchBuilder {
    pub fn new() -> Self {
        Self {
            n_estimators: vec![100, 200],
            max_depth: vec![Some(5), Some(10), None],
            cv_folds: 5,
            seed: 42,
            max_features: None,
        }
    }

    /// Nastaví kandidátov na počet stromov
    pub fn n_estimators(mut self, values: Vec<usize>) -> Self {
        self.n_estimators = values;
        self
    }

    /// Nastaví kandidátov na hĺbku (`None` = neobmedzená)
    pub fn max_depth(mut self, values: Vec<Option<u16>>) -> Self {
        self.max_depth = values;
        self
    }

    pub fn cv_folds(mut self, k: usize) -> Self {
        self.cv_folds = k;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Počet stĺpcov na strom pre všetkých kandidátov (`None` = odmocnina)
    pub fn max_features(mut self, max_features: Option<usize>) -> Self {
        self.max_features = max_features;
        self
    }

    /// Vytvorí GridSearch s validáciou
    pub fn build(self) -> Result<GridSearch> {
        if self.n_estimators.is_empty() || self.max_depth.is_empty() {
            return Err(TitanicError::InvalidParameter("Grid nesmie byť prázdny".to_string()));
        }
        if self.n_estimators.contains(&0) {
            return Err(TitanicError::InvalidParameter(
                "n_estimators musí byť aspoň 1".to_string(),
            ));
        }
        if self.max_features == Some(0) {
            return Err(TitanicError::InvalidParameter(
                "max_features musí byť aspoň 1".to_string(),
            ));
        }
        if self.cv_folds < 2 {
            return Err(TitanicError::InvalidParameter(format!(
                "cv_folds musí byť aspoň 2, je {}",
                self.cv_folds
            )));
        }

        // Hĺbka je vonkajší cyklus, počet stromov vnútorný
        let candidates = self
            .max_depth
            .iter()
            .flat_map(|&depth| {
                self.n_estimators
                    .iter()
                    .map(move |&n| ForestParams {
                        max_features: self.max_features,
                        ..ForestParams::new(n, depth, self.seed)
                    })
            })
            .collect();

        Ok(GridSearch {
            candidates,
            cv_folds: self.cv_folds,
        })
    }
}

impl Default for GridSearchBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Skóre jedného kandidáta naprieč foldami
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateScore {
    pub params: ForestParams,
    pub fold_scores: Vec<f64>,
    pub mean_score: f64,
    pub std_score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridSearchResult {
    pub best_params: ForestParams,
    pub best_score: f64,
    pub candidates: Vec<CandidateScore>,
}

/// Cross-validovaný výber hyperparametrov podľa accuracy
pub struct GridSearch {
    candidates: Vec<ForestParams>,
    cv_folds: usize,
}

impl GridSearch {
    pub fn builder() -> GridSearchBuilder {
        GridSearchBuilder::new()
    }

    pub fn candidates(&self) -> &[ForestParams] {
        &self.candidates
    }

    /// Ohodnotí všetkých kandidátov; pri rovnakom skóre vyhráva skorší v poradí gridu
    pub fn fit(&self, x: &[Vec<f64>], y: &[i32]) -> Result<GridSearchResult> {
        let folds = stratified_k_fold(y, self.cv_folds)?;
        let mut scores = Vec::with_capacity(self.candidates.len());

        for params in &self.candidates {
            let mut fold_scores = Vec::with_capacity(folds.len());
            for (train_idx, test_idx) in &folds {
                let x_train: Vec<Vec<f64>> = train_idx.iter().map(|&i| x[i].clone()).collect();
                let y_train: Vec<i32> = train_idx.iter().map(|&i| y[i]).collect();
                let x_test: Vec<Vec<f64>> = test_idx.iter().map(|&i| x[i].clone()).collect();
                let y_test: Vec<i32> = test_idx.iter().map(|&i| y[i]).collect();

                let mut model = RandomForestClassifier::new(*params);
                model.train(&x_train, &y_train)?;
                let predictions = model.predict(&x_test)?;
                let report = ModelEvaluator::evaluate_classification(&y_test, &predictions, model.get_name());
                fold_scores.push(report.get_metric("accuracy").unwrap_or_default());
            }

            let mean_score = fold_scores.iter().mean();
            let std_score = fold_scores.iter().population_std_dev();
            debug!(
                n_estimators = params.n_estimators,
                max_depth = ?params.max_depth,
                mean_score,
                "scored candidate"
            );
            scores.push(CandidateScore {
                params: *params,
                fold_scores,
                mean_score,
                std_score,
            });
        }

        let (best_params, best_score) = scores
            .iter()
            .fold(None::<&CandidateScore>, |best, candidate| match best {
                Some(b) if b.mean_score >= candidate.mean_score => Some(b),
                _ => Some(candidate),
            })
            .map(|best| (best.params, best.mean_score))
            .ok_or_else(|| TitanicError::InvalidParameter("Grid nesmie byť prázdny".to_string()))?;

        info!(
            n_estimators = best_params.n_estimators,
            max_depth = ?best_params.max_depth,
            best_score,
            "grid search finished"
        );

        Ok(GridSearchResult {
            best_params,
            best_score,
            candidates: scores,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data() -> (Vec<Vec<f64>>, Vec<i32>) {
        let x: Vec<Vec<f64>> = (0..30)
            .map(|i| vec![(i % 6) as f64, (i % 4) as f64])
            .collect();
        let y = x.iter().map(|row| i32::from(row[0] >= 3.0)).collect();
        (x, y)
    }

    #[test]
    fn test_default_grid_order() {
        let search = GridSearch::builder().build().unwrap();
        let grid: Vec<(Option<u16>, usize)> = search
            .candidates()
            .iter()
            .map(|p| (p.max_depth, p.n_estimators))
            .collect();

        assert_eq!(
            grid,
            vec![
                (Some(5), 100),
                (Some(5), 200),
                (Some(10), 100),
                (Some(10), 200),
                (None, 100),
                (None, 200),
            ]
        );
        assert!(search.candidates().iter().all(|p| p.seed == 42));
    }

    #[test]
    fn test_builder_validation() {
        assert!(GridSearch::builder().n_estimators(vec![]).build().is_err());
        assert!(GridSearch::builder().cv_folds(1).build().is_err());
        assert!(GridSearch::builder().n_estimators(vec![0]).build().is_err());
        assert!(GridSearch::builder().max_features(Some(0)).build().is_err());
    }

    #[test]
    fn test_max_features_reaches_every_candidate() {
        let search = GridSearch::builder().max_features(Some(3)).build().unwrap();
        assert!(search.candidates().iter().all(|p| p.max_features == Some(3)));

        let default = GridSearch::builder().build().unwrap();
        assert!(default.candidates().iter().all(|p| p.max_features.is_none()));
    }

    #[test]
    fn test_fit_scores_every_candidate() {
        let (x, y) = data();
        let search = GridSearch::builder()
            .n_estimators(vec![3, 5])
            .max_depth(vec![Some(2), None])
            .cv_folds(3)
            .seed(1)
            .build()
            .unwrap();

        let result = search.fit(&x, &y).unwrap();
        assert_eq!(result.candidates.len(), 4);
        for candidate in &result.candidates {
            assert_eq!(candidate.fold_scores.len(), 3);
            assert!((0.0..=1.0).contains(&candidate.mean_score));
        }

        let max = result
            .candidates
            .iter()
            .map(|c| c.mean_score)
            .fold(f64::MIN, f64::max);
        assert_eq!(result.best_score, max);

        let first_best = result.candidates.iter().find(|c| c.mean_score == max).unwrap();
        assert_eq!(result.best_params, first_best.params);
    }
}
