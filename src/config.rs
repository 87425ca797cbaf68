use crate::builder::DEFAULT_WEIGHT_RANGE;
use serde::{Deserialize, Serialize};
use std::{env, path::PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub output_directory: PathBuf,
    pub discovery: DiscoveryConfig,
    pub weighting: WeightingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    pub file_extensions: Vec<String>,
    pub max_file_size: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightingConfig {
    /// Constant applied to every edge when set; overridden by the CLI.
    pub default_weight: Option<f64>,
    /// Draw a random integer weight per edge instead of a constant.
    pub random_weights: bool,
    pub random_min: u32,
    pub random_max: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_directory: PathBuf::from("./graph-output"),
            discovery: DiscoveryConfig {
                file_extensions: vec![
                    "json".to_string(),
                    "yaml".to_string(),
                    "yml".to_string(),
                    "tf".to_string(),
                ],
                max_file_size: 1024 * 1024, // 1MB
            },
            weighting: WeightingConfig {
                default_weight: None,
                random_weights: false,
                random_min: DEFAULT_WEIGHT_RANGE.0,
                random_max: DEFAULT_WEIGHT_RANGE.1,
            },
        }
    }
}

impl Config {
    /// Get the default config file path (~/.iac-grapher.toml)
    pub fn default_config_path() -> crate::Result<PathBuf> {
        let home_dir = env::var("HOME")
            .or_else(|_| env::var("USERPROFILE"))
            .map_err(|_| anyhow::anyhow!("Could not determine home directory"))?;
        Ok(PathBuf::from(home_dir).join(".iac-grapher.toml"))
    }

    /// Load config from file, falling back to defaults if file doesn't exist
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::default_config_path()?;

        let config = if config_path.exists() {
            println!("📝 Loading configuration from: {}", config_path.display());
            Self::from_file(&config_path)?
        } else {
            Self::default()
        };

        Ok(config)
    }

    /// Load config from a specific file path
    pub fn from_file(path: &PathBuf) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save config to a file
    pub fn to_file(&self, path: &PathBuf) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Create a config file with all available options documented
    pub fn create_documented_config() -> String {
        r#"# IaC Grapher Configuration File
# This file configures how iac-grapher builds and exports dependency graphs

# Directory that reports and DOT exports are written to
output_directory = "./graph-output"

[discovery]
# File extensions treated as template candidates when scanning a directory
file_extensions = ["json", "yaml", "yml", "tf"]

# Maximum template size to consider (in bytes, default 1MB)
max_file_size = 1048576

[weighting]
# Constant weight applied to every edge (leave commented for unweighted)
# default_weight = 3.0

# Draw an independent random integer weight per edge instead
random_weights = false

# Inclusive range for random weights
random_min = 1
random_max = 25
"#
        .to_string()
    }
}
