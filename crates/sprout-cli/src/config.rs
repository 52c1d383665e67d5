//! TOML configuration for the CLI.
//!
//! Every section is optional; anything left out takes its default value.
//!
//! ```toml
//! [style]
//! color_threshold = 20.0
//! palette = [{ name = "brand", hex = "#ff6600" }]
//!
//! [codegen]
//! asset_prefix = "/static/"
//! root_heading_level = 1
//!
//! [registry]
//! path = "config/component_registry.json"
//!
//! [merge]
//! protected_prefixes = ["hover:", "sm:"]
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::Deserialize;
use sprout_codegen::EmitOptions;
use sprout_merge::MergeOptions;
use sprout_style::{Palette, StyleResolver, Swatch, DEFAULT_COLOR_THRESHOLD};

use crate::error::{CliError, Result};

/// File looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "sprout.toml";

/// Default location of the component registry.
pub const DEFAULT_REGISTRY_FILE: &str = "component_registry.json";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SproutConfig {
    pub style: StyleConfig,
    pub codegen: EmitOptions,
    pub registry: RegistryConfig,
    pub merge: MergeOptions,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Largest RGB distance that still snaps to a palette color.
    pub color_threshold: f64,
    /// Replaces the built-in palette when set.
    pub palette: Option<Vec<Swatch>>,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            color_threshold: DEFAULT_COLOR_THRESHOLD,
            palette: None,
        }
    }
}

impl StyleConfig {
    pub fn resolver(&self) -> StyleResolver {
        let palette = match &self.palette {
            Some(swatches) => Palette::from_swatches(swatches),
            None => Palette::tailwind(),
        };
        StyleResolver::new(palette, self.color_threshold)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    pub path: PathBuf,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_REGISTRY_FILE),
        }
    }
}

/// Load configuration.
///
/// An explicit path must exist. Without one, [`DEFAULT_CONFIG_FILE`] is read
/// if present and defaults are used otherwise.
pub fn load_config(explicit: Option<&Path>) -> Result<SproutConfig> {
    let path = match explicit {
        Some(path) if !path.exists() => return Err(CliError::MissingConfig(path.to_path_buf())),
        Some(path) => path.to_path_buf(),
        None => {
            let local = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !local.exists() {
                debug!("No configuration file found, using defaults");
                return Ok(SproutConfig::default());
            }
            local
        }
    };

    info!(path = path.display().to_string(); "Loading configuration");
    let text = fs::read_to_string(&path)?;
    parse_config(&text)
}

/// Parse configuration from TOML text.
pub fn parse_config(text: &str) -> Result<SproutConfig> {
    toml::from_str(text).map_err(|err| CliError::ConfigParse(err.to_string()))
}
