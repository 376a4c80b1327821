// File: ./src/config.rs
// Renderer configuration: defaults, validation, builder, and TOML persistence.
use crate::color_utils;
use crate::context::AppContext;
use crate::storage::FileStore;
use anyhow::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use strum::{Display, EnumIter, EnumString};

fn default_width() -> Dimension {
    Dimension::px(40.0)
}
fn default_marker_color() -> String {
    "#000".to_string()
}
fn default_marker_width() -> Dimension {
    Dimension::px(3.0)
}
fn default_radius() -> Dimension {
    Dimension::px(7.0)
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid dimension '{0}': expected a positive pixel value such as 40 or 40px")]
    InvalidDimension(String),
    #[error("invalid marker color '{0}'")]
    InvalidColor(String),
    #[error("no icon mapped for group '{0}'")]
    MissingIcon(String),
}

/// A length in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DimensionRepr", into = "String")]
pub struct Dimension(f32);

#[derive(Deserialize)]
#[serde(untagged)]
enum DimensionRepr {
    Number(f64),
    Text(String),
}

impl TryFrom<DimensionRepr> for Dimension {
    type Error = ConfigError;

    fn try_from(repr: DimensionRepr) -> Result<Self, Self::Error> {
        match repr {
            DimensionRepr::Number(n) => Dimension::checked(n as f32)
                .ok_or_else(|| ConfigError::InvalidDimension(n.to_string())),
            DimensionRepr::Text(s) => s.parse(),
        }
    }
}

impl From<Dimension> for String {
    fn from(d: Dimension) -> Self {
        d.to_string()
    }
}

impl Dimension {
    /// Unchecked constructor for literal values; [`Config::validate`] catches bad ones.
    pub fn px(value: f32) -> Self {
        Self(value)
    }

    /// Fallible constructor: the value must be finite and greater than zero.
    pub fn try_px(value: f32) -> Result<Self, ConfigError> {
        Self::checked(value).ok_or_else(|| ConfigError::InvalidDimension(format_px(value)))
    }

    fn checked(value: f32) -> Option<Self> {
        (value.is_finite() && value > 0.0).then_some(Self(value))
    }

    pub fn is_valid(self) -> bool {
        Self::checked(self.0).is_some()
    }

    pub fn value(self) -> f32 {
        self.0
    }

    pub fn scale(self, factor: f32) -> Self {
        Self(self.0 * factor)
    }
}

impl FromStr for Dimension {
    type Err = ConfigError;

    /// Accepts `40`, `40px`, `7.5px`. Other units are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let number = trimmed.strip_suffix("px").unwrap_or(trimmed).trim();
        number
            .parse::<f32>()
            .ok()
            .and_then(Dimension::checked)
            .ok_or_else(|| ConfigError::InvalidDimension(s.to_string()))
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}px", format_px(self.0))
    }
}

/// Rounds to two decimals and drops a trailing `.0`.
pub fn format_px(value: f32) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 {
        // avoid "-0"
        return "0".to_string();
    }
    format!("{}", rounded)
}

/// What the first item of a group is decorated with.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, EnumIter, EnumString, Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum DecorationMode {
    /// An image looked up by group tag; the last box is shortened.
    #[default]
    Icon,
    /// The group's ordinal as text; boxes get rounded corners.
    Ordinal,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Config {
    /// Left padding of the list, i.e. the gutter the boxes live in.
    #[serde(default = "default_width")]
    pub width: Dimension,
    /// Any CSS colour, passed through as written, or `auto` for one colour per group.
    #[serde(default = "default_marker_color")]
    pub marker_color: String,
    #[serde(default = "default_marker_width")]
    pub marker_width: Dimension,
    /// Corner radius and box width in ordinal mode.
    #[serde(default = "default_radius")]
    pub radius: Dimension,
    #[serde(default)]
    pub mode: DecorationMode,
    /// Group tag -> image source, used in icon mode.
    #[serde(default)]
    pub icons: BTreeMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: default_width(),
            marker_color: default_marker_color(),
            marker_width: default_marker_width(),
            radius: default_radius(),
            mode: DecorationMode::default(),
            icons: BTreeMap::new(),
        }
    }
}

impl Config {
    // Builder: every setter returns a new value and leaves `self` untouched.

    pub fn with_width(&self, width: Dimension) -> Self {
        Self {
            width,
            ..self.clone()
        }
    }

    pub fn with_marker_width(&self, marker_width: Dimension) -> Self {
        Self {
            marker_width,
            ..self.clone()
        }
    }

    pub fn with_color(&self, color: &str) -> Self {
        Self {
            marker_color: color.to_string(),
            ..self.clone()
        }
    }

    pub fn with_radius(&self, radius: Dimension) -> Self {
        Self {
            radius,
            ..self.clone()
        }
    }

    pub fn with_mode(&self, mode: DecorationMode) -> Self {
        Self {
            mode,
            ..self.clone()
        }
    }

    /// Replaces the whole icon map.
    pub fn with_icons<I, K, V>(&self, icons: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            icons: icons
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            ..self.clone()
        }
    }

    /// Adds or replaces one icon.
    pub fn with_icon(&self, tag: &str, src: &str) -> Self {
        let mut next = self.clone();
        next.icons.insert(tag.to_string(), src.to_string());
        next
    }

    pub fn icon_for(&self, tag: &str) -> Result<&str, ConfigError> {
        self.icons
            .get(tag)
            .map(String::as_str)
            .ok_or_else(|| ConfigError::MissingIcon(tag.to_string()))
    }

    /// Marker colour for a given group, resolving `auto`.
    pub fn marker_color_for(&self, tag: &str) -> String {
        color_utils::marker_color_for(&self.marker_color, tag)
    }

    /// Checks values the builder lets through: colour syntax and positive, finite dimensions.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !color_utils::is_valid_color(&self.marker_color) {
            return Err(ConfigError::InvalidColor(self.marker_color.clone()));
        }
        for dimension in [self.width, self.marker_width, self.radius] {
            if !dimension.is_valid() {
                return Err(ConfigError::InvalidDimension(format_px(dimension.value())));
            }
        }
        Ok(())
    }

    /// Load the configuration from disk using an explicit context.
    /// Returns a contextualized error if reading or parsing fails.
    pub fn load(ctx: &dyn AppContext) -> Result<Self> {
        let path = ctx.get_config_file_path()?;

        if !path.exists() {
            return Err(anyhow::anyhow!("Config file not found"));
        }
        Self::load_from_path(&path)
    }

    /// Like [`Config::load`], but a missing file yields the defaults.
    pub fn load_or_default(ctx: &dyn AppContext) -> Result<Self> {
        match Self::load(ctx) {
            Ok(config) => Ok(config),
            Err(e) if Self::is_missing_config_error(&e) => {
                log::debug!("No config file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e)
        })?;

        let config: Config = toml::from_str(&contents).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e)
        })?;

        config.validate().map_err(|e| {
            anyhow::anyhow!("Invalid config file '{}': {}", path.display(), e)
        })?;

        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Whether an error from [`Config::load`] means the file simply is not there.
    pub fn is_missing_config_error(err: &Error) -> bool {
        if err.to_string().contains("Config file not found") {
            return true;
        }

        for cause in err.chain() {
            if let Some(io_err) = cause.downcast_ref::<std::io::Error>()
                && io_err.kind() == std::io::ErrorKind::NotFound
            {
                return true;
            }
        }

        false
    }

    /// Save configuration using an explicit context.
    pub fn save(&self, ctx: &dyn AppContext) -> Result<()> {
        let path = ctx.get_config_file_path()?;
        FileStore::with_lock(&path, || {
            let toml_str = toml::to_string_pretty(self)?;
            FileStore::atomic_write(&path, toml_str)?;
            Ok(())
        })?;
        log::info!("Saved config to {}", path.display());
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
