use anyhow::Result;
use serde::Deserialize;
use std::path::Path;

/// Top-level configuration, loaded from a YAML file. Every field has a
/// default so an empty or missing file means "no cache".
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct RunrsConfig {
    pub cache: CacheSettings,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    pub enabled: bool,
    pub backend: String,
    pub url: Option<String>,
}

impl Default for CacheSettings {
    fn default() -> Self {
        CacheSettings {
            enabled: false,
            backend: "memory".to_string(),
            url: None,
        }
    }
}

impl RunrsConfig {
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config = serde_yaml::from_str(content)?;
        Ok(config)
    }
}
