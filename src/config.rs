use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

pub const CONFIG_PATH: &str = "config/config.json";

/// Filtering threshold and drawing attributes, read once before any input is parsed.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct RenderConfig {
    pub min_indeg: i64,
    pub node_width: f64,
    pub font_size: f64,
    pub font_color: String,
    pub font_weight: String,
    /// Edge line width.
    pub width: f64,
    pub arrowsize: f64,
    pub alpha: f64,
    pub edge_color: String,
    pub node_color: String,
}

impl RenderConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<RenderConfig> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| Error::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;

        let config = RenderConfig::from_json(&raw).map_err(|message| Error::Config {
            path: path.to_path_buf(),
            message,
        })?;

        tracing::debug!(path = %path.display(), ?config, "loaded render config");
        Ok(config)
    }

    fn from_json(raw: &str) -> std::result::Result<RenderConfig, String> {
        let config: RenderConfig = serde_json::from_str(raw).map_err(|e| e.to_string())?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> std::result::Result<(), String> {
        if !(0.0..=1.0).contains(&self.alpha) {
            return Err(format!("alpha must be within [0, 1], got {}", self.alpha));
        }

        let sizes = [
            ("node_width", self.node_width),
            ("font_size", self.font_size),
            ("width", self.width),
            ("arrowsize", self.arrowsize),
        ];
        for (key, value) in sizes {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("{key} must be a non-negative number, got {value}"));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn sample() -> RenderConfig {
    RenderConfig {
        min_indeg: 0,
        node_width: 100.0,
        font_size: 8.0,
        font_color: "k".to_string(),
        font_weight: "bold".to_string(),
        width: 0.5,
        arrowsize: 6.0,
        alpha: 0.7,
        edge_color: "#888888".to_string(),
        node_color: "r".to_string(),
    }
}
