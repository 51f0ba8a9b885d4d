use crate::codec::{EncodeOptions, LdrConversion, DEFAULT_JPEG_QUALITY};
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct ImportConfig {
    #[serde(default = "ImportConfig::default_strict_dimensions")]
    pub strict_dimensions: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "ExportConfig::default_jpeg_quality")]
    pub jpeg_quality: u8,
    #[serde(default)]
    pub ldr_conversion: LdrConversion,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct EngineConfig {
    #[serde(default)]
    pub import: ImportConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineConfigOverrides {
    pub strict_dimensions: Option<bool>,
    pub jpeg_quality: Option<u8>,
    pub ldr_conversion: Option<LdrConversion>,
}

impl ImportConfig {
    const fn default_strict_dimensions() -> bool {
        true
    }
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self { strict_dimensions: Self::default_strict_dimensions() }
    }
}

impl ExportConfig {
    const fn default_jpeg_quality() -> u8 {
        DEFAULT_JPEG_QUALITY
    }

    pub fn encode_options(&self) -> EncodeOptions {
        EncodeOptions { jpeg_quality: self.jpeg_quality, ldr_conversion: self.ldr_conversion }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self { jpeg_quality: Self::default_jpeg_quality(), ldr_conversion: LdrConversion::default() }
    }
}

impl EngineConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes =
            fs::read(path).with_context(|| format!("Failed to read config file {}", path.display()))?;
        let cfg: Self = serde_json::from_slice(&bytes)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        cfg.validate().with_context(|| format!("Invalid config file {}", path.display()))?;
        Ok(cfg)
    }

    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(cfg) => cfg,
            Err(err) => {
                eprintln!("Config load error: {err:?}. Falling back to defaults.");
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(1..=100).contains(&self.export.jpeg_quality) {
            bail!("jpeg_quality must be within 1..=100, got {}", self.export.jpeg_quality);
        }
        Ok(())
    }

    pub fn apply_overrides(&mut self, overrides: &EngineConfigOverrides) {
        if let Some(strict) = overrides.strict_dimensions {
            self.import.strict_dimensions = strict;
        }
        if let Some(quality) = overrides.jpeg_quality {
            self.export.jpeg_quality = quality;
        }
        if let Some(conversion) = overrides.ldr_conversion {
            self.export.ldr_conversion = conversion;
        }
    }
}

impl EngineConfigOverrides {
    pub fn is_empty(&self) -> bool {
        self.strict_dimensions.is_none() && self.jpeg_quality.is_none() && self.ldr_conversion.is_none()
    }

    pub fn applied_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.strict_dimensions.is_some() {
            fields.push("strict_dimensions");
        }
        if self.jpeg_quality.is_some() {
            fields.push("jpeg_quality");
        }
        if self.ldr_conversion.is_some() {
            fields.push("ldr_conversion");
        }
        fields
    }
}
