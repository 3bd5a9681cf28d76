//! Editor configuration.
//!
//! Settings come from `cutout.toml` (all fields optional) with environment
//! variable overrides on top. Defaults: brush 5–100 px, zoom 0.5×–5×,
//! 20 undo steps, PNG export.

use std::path::Path;

use image::ImageFormat;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::history::DEFAULT_HISTORY_CAPACITY;

/// Default config file name, looked up in the current directory.
pub const CONFIG_FILE: &str = "cutout.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EditorConfig {
    pub brush: BrushConfig,
    pub zoom: ZoomConfig,
    pub history: HistoryConfig,
    pub export: ExportConfig,
}

/// Brush limits. Sizes are diameters in image pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrushConfig {
    pub min_size: f64,
    pub max_size: f64,
    pub default_size: f64,
    /// 1.0 = hard disc, 0.0 = fully soft.
    pub default_hardness: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    pub min_scale: f64,
    pub max_scale: f64,
    /// Scale change per key press / wheel notch.
    pub step: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    pub capacity: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Png,
    Tiff,
    Webp,
}

impl ExportFormat {
    pub fn image_format(self) -> ImageFormat {
        match self {
            ExportFormat::Png => ImageFormat::Png,
            ExportFormat::Tiff => ImageFormat::Tiff,
            ExportFormat::Webp => ImageFormat::WebP,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ExportConfig {
    pub format: ExportFormat,
}

impl Default for BrushConfig {
    fn default() -> Self {
        Self { min_size: 5.0, max_size: 100.0, default_size: 30.0, default_hardness: 1.0 }
    }
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self { min_scale: 0.5, max_scale: 5.0, step: 0.25 }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { capacity: DEFAULT_HISTORY_CAPACITY }
    }
}

impl EditorConfig {
    /// Parse a TOML string and validate it.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| Error::Config(format!("failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// `cutout.toml` from the current directory, or defaults if it is missing or broken.
    pub fn load_or_default() -> Self {
        match Self::load_from_file(CONFIG_FILE) {
            Ok(config) => config,
            Err(Error::Io(_)) => Self::default(),
            Err(e) => {
                tracing::warn!("ignoring {CONFIG_FILE}: {e}");
                Self::default()
            }
        }
    }

    /// File (or defaults), then environment overrides.
    pub fn load() -> Self {
        let mut config = Self::load_or_default();
        config.merge_with_env(|key| std::env::var(key).ok());
        config
    }

    /// Apply overrides from `lookup` (normally `std::env::var`).
    /// Values that don't parse, or that would break `validate`, are skipped.
    pub fn merge_with_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        fn parsed<T, F>(lookup: &F, key: &str) -> Option<T>
        where
            T: std::str::FromStr,
            F: Fn(&str) -> Option<String>,
        {
            let raw = lookup(key)?;
            match raw.trim().parse() {
                Ok(v) => Some(v),
                Err(_) => {
                    tracing::warn!("{key}={raw:?} is not a valid value, ignoring");
                    None
                }
            }
        }

        let mut next = self.clone();
        if let Some(size) = parsed::<f64, _>(&lookup, "CUTOUT_BRUSH_SIZE") {
            next.brush.default_size = size;
        }
        if let Some(hardness) = parsed::<f64, _>(&lookup, "CUTOUT_HARDNESS") {
            next.brush.default_hardness = hardness;
        }
        if let Some(capacity) = parsed::<usize, _>(&lookup, "CUTOUT_HISTORY_CAPACITY") {
            next.history.capacity = capacity;
        }
        if let Some(max) = parsed::<f64, _>(&lookup, "CUTOUT_MAX_ZOOM") {
            next.zoom.max_scale = max;
        }

        match next.validate() {
            Ok(()) => *self = next,
            Err(e) => tracing::warn!("environment overrides rejected: {e}"),
        }
    }

    /// Ranges must be non-empty and defaults must sit inside them.
    pub fn validate(&self) -> Result<()> {
        let b = &self.brush;
        if !(b.min_size > 0.0 && b.min_size <= b.max_size) {
            return Err(Error::Config(format!(
                "brush size range {}..{} is empty or non-positive",
                b.min_size, b.max_size
            )));
        }
        if !(b.min_size..=b.max_size).contains(&b.default_size) {
            return Err(Error::Config(format!(
                "default brush size {} is outside {}..{}",
                b.default_size, b.min_size, b.max_size
            )));
        }
        if !(0.0..=1.0).contains(&b.default_hardness) {
            return Err(Error::Config(format!("hardness {} is outside 0..1", b.default_hardness)));
        }

        let z = &self.zoom;
        if !(z.min_scale > 0.0 && z.min_scale <= z.max_scale) {
            return Err(Error::Config(format!(
                "zoom range {}..{} is empty or non-positive",
                z.min_scale, z.max_scale
            )));
        }
        if !(z.step > 0.0) {
            return Err(Error::Config(format!("zoom step {} must be positive", z.step)));
        }

        if self.history.capacity == 0 {
            return Err(Error::Config("history capacity must be at least 1".into()));
        }
        Ok(())
    }
}
