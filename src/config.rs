//! Runtime configuration for the host window and frame loop
//!
//! Stored as RON. Every field has a default, so a config file only needs
//! the values it changes.

use crate::color::Color;
use crate::error::Result;
use crate::mask::DEFAULT_ALPHA_THRESHOLD;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub window_title: String,
    /// Display surface size in pixels
    pub width: usize,
    pub height: usize,
    /// Integer upscale factor applied when presenting the display surface
    pub pixel_scale: u32,
    pub clear_color: Color,
    /// Alpha threshold used when deriving collision masks
    pub mask_threshold: u8,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            window_title: "blitkit".to_string(),
            width: 320,
            height: 240,
            pixel_scale: 3,
            clear_color: Color::new(16, 16, 24),
            mask_threshold: DEFAULT_ALPHA_THRESHOLD,
        }
    }
}

impl RuntimeConfig {
    pub fn from_ron_str(s: &str) -> Result<Self> {
        Ok(ron::from_str(s)?)
    }

    pub fn to_ron_string(&self) -> Result<String> {
        let config = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .indentor("  ".to_string());
        Ok(ron::ser::to_string_pretty(self, config)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_ron_str(&text)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load `path`, falling back to defaults when the file does not exist.
    /// A file that exists but fails to parse is still an error.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_ron_string()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BlitError;
    use tempfile::TempDir;

    #[test]
    fn test_partial_config_uses_defaults() {
        let cfg = RuntimeConfig::from_ron_str("(width: 640, clear_color: (b: 200))").unwrap();
        assert_eq!(cfg.width, 640);
        assert_eq!(cfg.height, 240);
        assert_eq!(cfg.clear_color, Color::new(0, 0, 200));
        assert_eq!(cfg.mask_threshold, 127);
    }

    #[test]
    fn test_bad_config_is_error() {
        let result = RuntimeConfig::from_ron_str("(width: \"wide\")");
        assert!(matches!(result, Err(BlitError::Config(_))));
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("blitkit.ron");

        let cfg = RuntimeConfig {
            window_title: "demo".to_string(),
            pixel_scale: 2,
            ..Default::default()
        };
        cfg.save(&path).unwrap();

        let loaded = RuntimeConfig::load(&path).unwrap();
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = TempDir::new().unwrap();
        let cfg = RuntimeConfig::load_or_default(&dir.path().join("missing.ron")).unwrap();
        assert_eq!(cfg, RuntimeConfig::default());
    }
}
