use super::IModel;
use crate::error::{Result, TitanicError};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::tree::decision_tree_classifier::{
    DecisionTreeClassifier, DecisionTreeClassifierParameters,
};
use tracing::debug;

type Tree = DecisionTreeClassifier<f64, i32, DenseMatrix<f64>, Vec<i32>>;

/// Hyperparametre lesa
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ForestParams {
    pub n_estimators: usize,
    /// `None` = neobmedzená hĺbka
    pub max_depth: Option<u16>,
    pub min_samples_split: usize,
    /// Počet stĺpcov náhodne vybraných pre každý strom,
    /// `None` = zaokrúhlená odmocnina z počtu stĺpcov (aspoň 1)
    pub max_features: Option<usize>,
    pub seed: u64,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            max_depth: None,
            min_samples_split: 2,
            max_features: None,
            seed: 42,
        }
    }
}

impl ForestParams {
    pub fn new(n_estimators: usize, max_depth: Option<u16>, seed: u64) -> Self {
        Self {
            n_estimators,
            max_depth,
            seed,
            ..Self::default()
        }
    }

    /// Skutočný počet stĺpcov na strom pre dáta s `n_features` stĺpcami
    pub fn features_per_tree(&self, n_features: usize) -> usize {
        let default = (n_features as f64).sqrt().round() as usize;
        self.max_features.unwrap_or(default).clamp(1, n_features.max(1))
    }

    fn tree_parameters(&self) -> DecisionTreeClassifierParameters {
        let params = DecisionTreeClassifierParameters::default()
            .with_min_samples_split(self.min_samples_split);
        match self.max_depth {
            Some(depth) => params.with_max_depth(depth),
            None => params,
        }
    }
}

/// Jeden strom a stĺpce, na ktorých bol natrénovaný
#[derive(Debug, Serialize, Deserialize)]
struct ForestMember {
    features: Vec<usize>,
    model: MemberModel,
}

/// smartcore strom potrebuje aspoň dve triedy; bootstrap s jedinou triedou
/// sa uloží ako konštantná predikcia
#[derive(Debug, Serialize, Deserialize)]
enum MemberModel {
    Tree(Tree),
    Constant(i32),
}

impl ForestMember {
    fn predict(&self, x: &DenseMatrix<f64>, n_rows: usize) -> Result<Vec<i32>> {
        match &self.model {
            MemberModel::Tree(tree) => Ok(tree.predict(x)?),
            MemberModel::Constant(class) => Ok(vec![*class; n_rows]),
        }
    }
}

/// Random forest: bootstrap vzorky + smartcore rozhodovacie stromy.
/// Pravdepodobnosť triedy 1 je podiel stromov, ktoré hlasovali za 1.
#[derive(Debug, Serialize, Deserialize)]
pub struct RandomForestClassifier {
    params: ForestParams,
    n_features: usize,
    members: Vec<ForestMember>,
}

impl RandomForestClassifier {
    pub fn new(params: ForestParams) -> Self {
        Self {
            params,
            n_features: 0,
            members: Vec::new(),
        }
    }

    pub fn params(&self) -> &ForestParams {
        &self.params
    }

    pub fn is_fitted(&self) -> bool {
        !self.members.is_empty()
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    fn validate_training_data(&self, x: &[Vec<f64>], y: &[i32]) -> Result<usize> {
        if x.is_empty() {
            return Err(TitanicError::EmptyTable);
        }
        if x.len() != y.len() {
            return Err(TitanicError::InvalidParameter(format!(
                "Nesúlad v počte vzoriek: X má {}, y má {}",
                x.len(),
                y.len()
            )));
        }
        if self.params.n_estimators == 0 {
            return Err(TitanicError::InvalidParameter(
                "n_estimators musí byť aspoň 1".to_string(),
            ));
        }

        let n_features = x[0].len();
        if n_features == 0 || x.iter().any(|row| row.len() != n_features) {
            return Err(TitanicError::InvalidParameter(
                "Všetky riadky musia mať rovnaký nenulový počet stĺpcov".to_string(),
            ));
        }
        Ok(n_features)
    }

    fn project(rows: &[Vec<f64>], indices: &[usize], features: &[usize]) -> Vec<Vec<f64>> {
        indices
            .iter()
            .map(|&i| features.iter().map(|&j| rows[i][j]).collect())
            .collect()
    }
}

impl IModel for RandomForestClassifier {
    fn get_name(&self) -> &str {
        "Random Forest Classifier"
    }

    fn train(&mut self, x: &[Vec<f64>], y: &[i32]) -> Result<()> {
        let n_features = self.validate_training_data(x, y)?;
        let n_samples = x.len();
        let mtry = self.params.features_per_tree(n_features);

        let mut rng = StdRng::seed_from_u64(self.params.seed);
        let tree_params = self.params.tree_parameters();
        let mut members = Vec::with_capacity(self.params.n_estimators);

        for _ in 0..self.params.n_estimators {
            let sample: Vec<usize> = (0..n_samples).map(|_| rng.gen_range(0..n_samples)).collect();

            let mut features: Vec<usize> = (0..n_features).collect();
            if mtry < n_features {
                features.shuffle(&mut rng);
                features.truncate(mtry);
                features.sort_unstable();
            }

            let x_boot = DenseMatrix::from_2d_vec(&Self::project(x, &sample, &features))?;
            let y_boot: Vec<i32> = sample.iter().map(|&i| y[i]).collect();

            let model = match y_boot.first() {
                Some(&first) if y_boot.iter().all(|&c| c == first) => MemberModel::Constant(first),
                _ => MemberModel::Tree(Tree::fit(&x_boot, &y_boot, tree_params.clone())?),
            };
            members.push(ForestMember { features, model });
        }

        debug!(
            n_estimators = self.params.n_estimators,
            max_depth = ?self.params.max_depth,
            features_per_tree = mtry,
            samples = n_samples,
            "trained random forest"
        );

        self.n_features = n_features;
        self.members = members;
        Ok(())
    }

    fn predict_proba(&self, x: &[Vec<f64>]) -> Result<Vec<f64>> {
        if !self.is_fitted() {
            return Err(TitanicError::NotFitted);
        }
        if x.is_empty() {
            return Ok(Vec::new());
        }
        if let Some(row) = x.iter().find(|row| row.len() != self.n_features) {
            return Err(TitanicError::InvalidParameter(format!(
                "Model očakáva {} stĺpcov, riadok má {}",
                self.n_features,
                row.len()
            )));
        }

        let all_rows: Vec<usize> = (0..x.len()).collect();
        let mut votes = vec![0usize; x.len()];

        for member in &self.members {
            let matrix = DenseMatrix::from_2d_vec(&Self::project(x, &all_rows, &member.features))?;
            let predictions = member.predict(&matrix, x.len())?;
            for (vote, class) in votes.iter_mut().zip(predictions.iter()) {
                if *class == 1 {
                    *vote += 1;
                }
            }
        }

        let n_trees = self.members.len() as f64;
        Ok(votes.into_iter().map(|v| v as f64 / n_trees).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Trieda 1 práve vtedy, keď prvý stĺpec > 5; druhý stĺpec je šum
    fn separable() -> (Vec<Vec<f64>>, Vec<i32>) {
        let x: Vec<Vec<f64>> = (0..40)
            .map(|i| vec![(i % 10) as f64, ((i * 7) % 3) as f64])
            .collect();
        let y = x.iter().map(|row| if row[0] > 5.0 { 1 } else { 0 }).collect();
        (x, y)
    }

    #[test]
    fn test_learns_separable_data() {
        let (x, y) = separable();
        let mut forest = RandomForestClassifier::new(ForestParams {
            max_features: Some(2),
            ..ForestParams::new(25, Some(5), 7)
        });
        forest.train(&x, &y).unwrap();

        let predictions = forest.predict(&x).unwrap();
        let correct = predictions.iter().zip(y.iter()).filter(|(p, t)| p == t).count();
        assert!(correct as f64 / y.len() as f64 > 0.9);
    }

    #[test]
    fn test_probabilities_in_unit_interval() {
        let (x, y) = separable();
        let mut forest = RandomForestClassifier::new(ForestParams {
            max_features: Some(1),
            ..ForestParams::new(15, None, 3)
        });
        forest.train(&x, &y).unwrap();

        for p in forest.predict_proba(&x).unwrap() {
            assert!((0.0..=1.0).contains(&p));
        }
    }

    #[test]
    fn test_same_seed_same_model() {
        let (x, y) = separable();
        let mut a = RandomForestClassifier::new(ForestParams::new(10, Some(3), 11));
        let mut b = RandomForestClassifier::new(ForestParams::new(10, Some(3), 11));
        a.train(&x, &y).unwrap();
        b.train(&x, &y).unwrap();

        assert_eq!(a.predict_proba(&x).unwrap(), b.predict_proba(&x).unwrap());
    }

    #[test]
    fn test_single_class_training_data() {
        let x = vec![vec![1.0], vec![2.0], vec![3.0]];
        let mut forest = RandomForestClassifier::new(ForestParams::new(4, None, 1));
        forest.train(&x, &[1, 1, 1]).unwrap();
        assert_eq!(forest.predict_proba(&x).unwrap(), vec![1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_unfitted_model_errors() {
        let forest = RandomForestClassifier::new(ForestParams::default());
        assert!(matches!(
            forest.predict_proba(&[vec![1.0]]),
            Err(TitanicError::NotFitted)
        ));
    }

    #[test]
    fn test_wrong_width_rejected() {
        let (x, y) = separable();
        let mut forest = RandomForestClassifier::new(ForestParams::new(3, Some(2), 1));
        forest.train(&x, &y).unwrap();
        assert!(forest.predict_proba(&[vec![1.0, 2.0, 3.0]]).is_err());
    }

    #[test]
    fn test_mismatched_labels_rejected() {
        let mut forest = RandomForestClassifier::new(ForestParams::default());
        assert!(forest.train(&[vec![1.0]], &[0, 1]).is_err());
    }

    #[test]
    fn test_serde_round_trip_keeps_predictions() {
        let (x, y) = separable();
        let mut forest = RandomForestClassifier::new(ForestParams::new(5, Some(4), 5));
        forest.train(&x, &y).unwrap();

        let json = serde_json::to_string(&forest).unwrap();
        let restored: RandomForestClassifier = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.params(), forest.params());
        assert_eq!(restored.predict_proba(&x).unwrap(), forest.predict_proba(&x).unwrap());
    }

    #[test]
    fn test_features_per_tree_defaults_to_sqrt() {
        let params = ForestParams::default();
        assert_eq!(params.features_per_tree(14), 4);
        assert_eq!(params.features_per_tree(2), 1);
        assert_eq!(params.features_per_tree(1), 1);
        let explicit = ForestParams {
            max_features: Some(20),
            ..ForestParams::default()
        };
        assert_eq!(explicit.features_per_tree(14), 14);
    }

    #[test]
    fn test_members_train_on_column_subsets() {
        let x: Vec<Vec<f64>> = (0..60)
            .map(|i| (0..14).map(|j| ((i * (j + 3)) % 11) as f64).collect())
            .collect();
        let y: Vec<i32> = x.iter().map(|row| i32::from(row[0] + row[5] > 10.0)).collect();

        let mut forest = RandomForestClassifier::new(ForestParams::new(12, Some(4), 42));
        forest.train(&x, &y).unwrap();

        for member in &forest.members {
            assert_eq!(member.features.len(), 4);
            assert!(member.features.windows(2).all(|w| w[0] < w[1]));
            assert!(member.features.iter().all(|&j| j < 14));
        }
        let first = &forest.members[0].features;
        assert!(forest.members.iter().any(|m| &m.features != first));
    }
}
