use crate::error::{CardError, CardResult};
use crate::settings::CardOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Card configuration for export/import
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardConfig {
    /// Version field for future compatibility
    pub version: u32,
    /// Card options (variant plus overrides)
    pub card: CardOptions,
    /// RNG seed for reproducible pixel layouts
    #[serde(default)]
    pub seed: Option<u64>,
}

impl CardConfig {
    /// Export config to a JSON file
    pub fn save_to_file(&self, path: &Path) -> CardResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| CardError::io(parent, e))?;
        }
        fs::write(path, json).map_err(|e| CardError::io(path, e))?;
        tracing::info!(path = %path.display(), "exported card config");
        Ok(())
    }

    /// Import config from a JSON file
    pub fn load_from_file(path: &Path) -> CardResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| CardError::io(path, e))?;
        let config = serde_json::from_str(&content)?;
        tracing::info!(path = %path.display(), "loaded card config");
        Ok(config)
    }

    /// `<config dir>/pixel-card/config.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("pixel-card").join("config.json"))
    }
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            version: 1,
            card: CardOptions::default(),
            seed: None,
        }
    }
}
