//! bolt.toml configuration
//!
//! ```toml
//! # Where extracted files go (default: current directory)
//! output_dir = "extracted"
//!
//! # Palette resource applied before converting images
//! palette = "9D01"
//!
//! # Sample rate written to WAV headers (default: 22050)
//! sample_rate = 22050
//! ```

use anyhow::{Context, Result};
use bolt_archive::{ResourceId, SOUND_SAMPLE_RATE};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "bolt.toml";

/// Tool configuration, every field optional
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BoltConfig {
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Resource id of a palette, in the usual four-hex-digit form
    #[serde(default)]
    pub palette: Option<String>,

    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_sample_rate() -> u32 {
    SOUND_SAMPLE_RATE
}

impl Default for BoltConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            palette: None,
            sample_rate: default_sample_rate(),
        }
    }
}

impl BoltConfig {
    /// Load from an explicit path, or from `./bolt.toml` if it exists, or
    /// fall back to defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    Self::load(path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Load config from file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid config: {}", path.display()))
    }

    /// Parse config from string
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse bolt.toml")?;
        config.palette()?;
        if config.sample_rate == 0 {
            anyhow::bail!("sample_rate must be greater than zero");
        }
        Ok(config)
    }

    /// Configured palette resource, if any
    pub fn palette(&self) -> Result<Option<ResourceId>> {
        self.palette
            .as_deref()
            .map(|s| s.parse::<ResourceId>())
            .transpose()
            .context("Invalid palette resource id")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_config_empty() {
        let config = BoltConfig::parse("").unwrap();
        assert_eq!(config.output_dir, PathBuf::from("."));
        assert_eq!(config.palette().unwrap(), None);
        assert_eq!(config.sample_rate, 22050);
    }

    #[test]
    fn test_config_full() {
        let config = BoltConfig::parse(
            r#"
output_dir = "out"
palette = "9D01"
sample_rate = 11025
"#,
        )
        .unwrap();

        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.palette().unwrap(), Some(ResourceId(0x9D01)));
        assert_eq!(config.sample_rate, 11025);
    }

    #[test]
    fn test_config_bad_palette() {
        assert!(BoltConfig::parse(r#"palette = "XYZ""#).is_err());
    }

    #[test]
    fn test_config_zero_sample_rate() {
        assert!(BoltConfig::parse("sample_rate = 0").is_err());
    }

    #[test]
    fn test_config_unknown_key() {
        assert!(BoltConfig::parse("colour = 3").is_err());
    }

    #[test]
    fn test_config_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bolt.toml");
        std::fs::write(&path, "palette = \"0x0102\"\n").unwrap();

        let config = BoltConfig::resolve(Some(&path)).unwrap();
        assert_eq!(config.palette().unwrap(), Some(ResourceId(0x0102)));
    }

    #[test]
    fn test_config_missing_file() {
        let dir = tempdir().unwrap();
        assert!(BoltConfig::resolve(Some(&dir.path().join("nope.toml"))).is_err());
    }
}
