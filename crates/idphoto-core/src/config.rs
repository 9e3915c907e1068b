//! Editor configuration.
//!
//! Every field has a default, so a config document only needs to name the
//! values it changes. Out-of-range values are repaired by
//! [`EditorConfig::sanitize`], which reports what it changed instead of
//! failing.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::spec::{DEFAULT_PAPER, DEFAULT_PHOTO_SPEC};
use crate::transform::Viewport;

/// Photo counts offered by the print controls.
pub const PHOTO_COUNT_CHOICES: [u32; 5] = [2, 4, 6, 8, 12];

/// Errors from loading a config document.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {message}")]
    Io { path: String, message: String },

    #[error("Failed to parse config: {0}")]
    Parse(String),
}

/// Tunables for an editor session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// On-screen working area that shows the portrait and the crop window.
    pub viewport: Viewport,
    /// Scale multiplier for one wheel tick away from the user.
    pub zoom_in_factor: f64,
    /// Scale multiplier for one wheel tick toward the user.
    pub zoom_out_factor: f64,
    /// JPEG quality for saved photos and sheets.
    pub jpeg_quality: u8,
    /// Density tag written into saved JPEGs.
    pub export_dpi: u16,
    /// Recommended source size as a multiple of the target size.
    pub min_resolution_factor: u32,
    /// Print preview size relative to the full-resolution sheet.
    pub preview_scale: f64,
    pub default_photo_spec: String,
    pub default_paper: String,
    pub default_photo_count: u32,
    pub photo_count_choices: Vec<u32>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            zoom_in_factor: 1.1,
            zoom_out_factor: 0.9,
            jpeg_quality: 95,
            export_dpi: 300,
            min_resolution_factor: 2,
            preview_scale: 0.5,
            default_photo_spec: DEFAULT_PHOTO_SPEC.to_string(),
            default_paper: DEFAULT_PAPER.to_string(),
            default_photo_count: 4,
            photo_count_choices: PHOTO_COUNT_CHOICES.to_vec(),
        }
    }
}

impl EditorConfig {
    /// Parse a JSON config document. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load and sanitize a JSON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let mut config = Self::from_json_str(&contents)?;
        for warning in config.sanitize() {
            log::warn!("{}: {}", path.display(), warning);
        }
        Ok(config)
    }

    /// Replace invalid values with defaults. Returns one message per fix.
    pub fn sanitize(&mut self) -> Vec<String> {
        let defaults = Self::default();
        let mut warnings = Vec::new();

        if self.viewport.width == 0 || self.viewport.height == 0 {
            warnings.push(format!(
                "viewport {}x{} is empty, using {}x{}",
                self.viewport.width,
                self.viewport.height,
                defaults.viewport.width,
                defaults.viewport.height
            ));
            self.viewport = defaults.viewport;
        }
        if !(self.zoom_in_factor.is_finite() && self.zoom_in_factor > 1.0) {
            warnings.push(format!(
                "zoom_in_factor {} must be greater than 1, using {}",
                self.zoom_in_factor, defaults.zoom_in_factor
            ));
            self.zoom_in_factor = defaults.zoom_in_factor;
        }
        if !(self.zoom_out_factor > 0.0 && self.zoom_out_factor < 1.0) {
            warnings.push(format!(
                "zoom_out_factor {} must be between 0 and 1, using {}",
                self.zoom_out_factor, defaults.zoom_out_factor
            ));
            self.zoom_out_factor = defaults.zoom_out_factor;
        }
        if self.jpeg_quality == 0 || self.jpeg_quality > 100 {
            warnings.push(format!(
                "jpeg_quality {} is outside 1-100, using {}",
                self.jpeg_quality, defaults.jpeg_quality
            ));
            self.jpeg_quality = defaults.jpeg_quality;
        }
        if self.export_dpi == 0 {
            warnings.push(format!("export_dpi is zero, using {}", defaults.export_dpi));
            self.export_dpi = defaults.export_dpi;
        }
        if !(self.preview_scale.is_finite() && self.preview_scale > 0.0) {
            warnings.push(format!(
                "preview_scale {} must be positive, using {}",
                self.preview_scale, defaults.preview_scale
            ));
            self.preview_scale = defaults.preview_scale;
        }
        self.photo_count_choices.retain(|&count| count > 0);
        if self.photo_count_choices.is_empty() {
            warnings.push("photo_count_choices is empty, using defaults".to_string());
            self.photo_count_choices = defaults.photo_count_choices.clone();
        }
        if !self.photo_count_choices.contains(&self.default_photo_count) {
            let fallback = self.photo_count_choices[0];
            warnings.push(format!(
                "default_photo_count {} is not one of the choices, using {}",
                self.default_photo_count, fallback
            ));
            self.default_photo_count = fallback;
        }

        warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EditorConfig::default();
        assert_eq!(config.viewport, Viewport::new(800, 1000));
        assert_eq!(config.jpeg_quality, 95);
        assert_eq!(config.export_dpi, 300);
        assert_eq!(config.default_photo_count, 4);
        assert_eq!(config.photo_count_choices, vec![2, 4, 6, 8, 12]);
    }

    #[test]
    fn test_default_config_is_clean() {
        let mut config = EditorConfig::default();
        assert!(config.sanitize().is_empty());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = EditorConfig::from_json_str(r#"{"jpeg_quality": 80}"#).unwrap();
        assert_eq!(config.jpeg_quality, 80);
        assert_eq!(config.zoom_in_factor, 1.1);
        assert_eq!(config.default_paper, "4x6 inch");
    }

    #[test]
    fn test_viewport_from_json() {
        let config =
            EditorConfig::from_json_str(r#"{"viewport": {"width": 640, "height": 480}}"#).unwrap();
        assert_eq!(config.viewport, Viewport::new(640, 480));
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            EditorConfig::from_json_str("{"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_sanitize_repairs_values() {
        let mut config = EditorConfig {
            zoom_in_factor: 0.5,
            zoom_out_factor: 2.0,
            jpeg_quality: 0,
            export_dpi: 0,
            preview_scale: -1.0,
            default_photo_count: 5,
            ..EditorConfig::default()
        };
        let warnings = config.sanitize();
        assert_eq!(warnings.len(), 6);
        assert_eq!(config.zoom_in_factor, 1.1);
        assert_eq!(config.zoom_out_factor, 0.9);
        assert_eq!(config.jpeg_quality, 95);
        assert_eq!(config.export_dpi, 300);
        assert_eq!(config.preview_scale, 0.5);
        assert_eq!(config.default_photo_count, 2);
    }

    #[test]
    fn test_sanitize_empty_choices() {
        let mut config = EditorConfig {
            photo_count_choices: vec![0],
            ..EditorConfig::default()
        };
        config.sanitize();
        assert_eq!(config.photo_count_choices, PHOTO_COUNT_CHOICES.to_vec());
    }

    #[test]
    fn test_load_missing_file() {
        let result = EditorConfig::load(Path::new("/nonexistent/idphoto.json"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_load_file() {
        let path = std::env::temp_dir().join("idphoto_config_test.json");
        std::fs::write(&path, r#"{"preview_scale": 0.25, "jpeg_quality": 101}"#).unwrap();

        let config = EditorConfig::load(&path).unwrap();
        assert_eq!(config.preview_scale, 0.25);
        assert_eq!(config.jpeg_quality, 95);

        std::fs::remove_file(&path).ok();
    }
}
