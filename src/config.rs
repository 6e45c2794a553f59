//! Konfigurácia trénovania a ciest k dátam načítaná z `config.toml`.

use crate::error::Result;
use serde::Deserialize;
use std::path::Path;
use tracing::{info, warn};

/// Hlavná konfigurácia
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data: DataConfig,
    pub model: ModelConfig,
    pub training: TrainingConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// Cesta k CSV s pasažiermi
    pub csv_path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    /// Cesta k serializovanému modelu (JSON)
    pub artifact_path: String,
}

/// Hyperparametre grid searchu a splitu
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    pub test_size: f64,
    pub seed: u64,
    pub cv_folds: usize,
    pub n_estimators: Vec<usize>,
    /// 0 znamená neobmedzenú hĺbku
    pub max_depth: Vec<u16>,
    /// Stĺpce na strom; bez hodnoty zaokrúhlená odmocnina z počtu stĺpcov
    pub max_features: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Voliteľný JSON report z grid searchu
    pub report_path: Option<String>,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Config = toml::from_str(&content)?;
        info!(path = %path.as_ref().display(), "loaded configuration");
        Ok(config)
    }

    /// Načíta konfiguráciu, ak súbor existuje, inak vráti default
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            warn!(path = %path.as_ref().display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }
}

impl TrainingConfig {
    /// Mriežka hĺbok, kde `None` je neobmedzená hĺbka
    pub fn depth_grid(&self) -> Vec<Option<u16>> {
        self.max_depth
            .iter()
            .map(|&d| if d == 0 { None } else { Some(d) })
            .collect()
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data: DataConfig::default(),
            model: ModelConfig::default(),
            training: TrainingConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            csv_path: "data/train.csv".to_string(),
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            artifact_path: "models/titanic_model.json".to_string(),
        }
    }
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            test_size: 0.2,
            seed: 42,
            cv_folds: 5,
            n_estimators: vec![100, 200],
            max_depth: vec![5, 10, 0],
            max_features: None,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { report_path: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_grid_matches_search_space() {
        let config = Config::default();
        assert_eq!(config.training.n_estimators, vec![100, 200]);
        assert_eq!(
            config.training.depth_grid(),
            vec![Some(5), Some(10), None]
        );
        assert_eq!(config.training.cv_folds, 5);
        assert_eq!(config.training.seed, 42);
        assert_eq!(config.training.max_features, None);
    }

    #[test]
    fn test_max_features_from_toml() {
        let config: Config = toml::from_str("[training]\nmax_features = 6\n").unwrap();
        assert_eq!(config.training.max_features, Some(6));
        assert_eq!(config.training.n_estimators, vec![100, 200]);
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let config: Config = toml::from_str(
            r#"
            [data]
            csv_path = "other.csv"

            [training]
            cv_folds = 3
            "#,
        )
        .unwrap();

        assert_eq!(config.data.csv_path, "other.csv");
        assert_eq!(config.training.cv_folds, 3);
        assert_eq!(config.training.test_size, 0.2);
        assert_eq!(config.model.artifact_path, "models/titanic_model.json");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[model]\nartifact_path = \"m.json\"").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.model.artifact_path, "m.json");
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = Config::load_or_default("does/not/exist.toml").unwrap();
        assert_eq!(config.data.csv_path, "data/train.csv");
    }
}
