use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::database::DEFAULT_DATABASE_PATH;
use crate::services::PageSize;

/// Settings read from an optional YAML file. Command-line flags override them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database: String,
    pub port: u16,
    pub cors_origin: Option<String>,
    pub default_page_size: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: DEFAULT_DATABASE_PATH.to_string(),
            port: 3000,
            cors_origin: None,
            default_page_size: PageSize::default().get(),
        }
    }
}

impl AppConfig {
    /// Load from `path`, or return the defaults when no file is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => {
                let content = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file {}", path.display()))?;
                Self::from_yaml(&content)
                    .with_context(|| format!("Invalid config file {}", path.display()))?
            }
            None => Self::default(),
        };
        config.page_size()?;
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn page_size(&self) -> Result<PageSize> {
        Ok(PageSize::new(self.default_page_size)?)
    }
}
