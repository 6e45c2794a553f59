pub mod split; // Train/test split a stratifikovaný k-fold
pub mod grid_search; // Výber hyperparametrov cez CV
pub mod trainer;

pub use grid_search::{CandidateScore, GridSearch, GridSearchBuilder, GridSearchResult};
pub use split::{stratified_k_fold, train_test_split};
pub use trainer::{run_training, Trainer, TrainingSummary};
