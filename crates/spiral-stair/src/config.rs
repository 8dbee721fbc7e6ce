//! TOML configuration.

use serde::{Deserialize, Serialize};

use crate::{BuildOptions, Result, StairParameters};

/// Name of the container the staircase is delivered to by default.
pub const DEFAULT_TARGET: &str = "Staircase";

/// A complete generation request: where the mesh goes and how it is built.
///
/// Every field is optional in TOML; missing values take their defaults.
///
/// ```
/// use spiral_stair::StaircaseConfig;
///
/// let config = StaircaseConfig::from_toml_str(
///     r#"
///     target = "Tower"
///
///     [parameters]
///     floor_height = 4.5
///
///     [options]
///     pole_segments = 24
///     "#,
/// )
/// .unwrap();
/// assert_eq!(config.target, "Tower");
/// assert_eq!(config.parameters.floor_height, 4.5);
/// assert_eq!(config.parameters.stair_width, 1.2);
/// assert_eq!(config.options.pole_segments, 24);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StaircaseConfig {
    /// Container name handed to the sink.
    pub target: String,
    /// Physical dimensions.
    pub parameters: StairParameters,
    /// Mesh resolution.
    pub options: BuildOptions,
}

impl Default for StaircaseConfig {
    fn default() -> Self {
        Self {
            target: DEFAULT_TARGET.to_string(),
            parameters: StairParameters::default(),
            options: BuildOptions::default(),
        }
    }
}

impl StaircaseConfig {
    /// Parse a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// [`crate::StairError::Config`] on malformed TOML, wrong value types,
    /// or unknown keys.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Render the configuration as TOML.
    ///
    /// # Errors
    ///
    /// [`crate::StairError::ConfigEncode`] if a value has no TOML form.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
