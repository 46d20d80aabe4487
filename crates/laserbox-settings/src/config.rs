//! Configuration and settings management for LaserBox
//!
//! A configuration holds the box parameters plus where and how the drawing is
//! written. Files may be JSON or TOML, chosen by extension. Individual values
//! can be overridden with `key=value` strings, which is how the command line
//! applies `--set`.

use crate::error::{ConfigError, SettingsError, SettingsResult};
use laserbox_core::units::{parse_length, to_drawing_units, Unit};
use laserbox_joinery::{derive_dimensions, BoxOptions, Color};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Keys understood by [`Config::set_setting`] and [`Config::get_setting`]
pub const SETTING_KEYS: &[&str] = &[
    "thickness",
    "line_width",
    "height",
    "width",
    "depth",
    "unit",
    "side_indent_count",
    "top_width_indent_count",
    "top_depth_indent_count",
    "include_lid",
    "merge_sides",
    "inside_specified",
    "stroke_color",
    "fill_color",
    "output",
    "document_width",
    "document_height",
];

/// Output destination and page size
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputSettings {
    /// SVG file to write; stdout when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// Page width in the box unit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_width: Option<f64>,
    /// Page height in the box unit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_height: Option<f64>,
}

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub box_options: BoxOptions,
    pub output: OutputSettings,
}

enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> SettingsResult<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        other => Err(ConfigError::UnsupportedFormat(other.unwrap_or("").to_string()).into()),
    }
}

/// Interpret a yes/no style value.
///
/// Accepts `yes`, `y`, `true`, `t`, `1` and `no`, `n`, `false`, `f`, `0`,
/// `0.0`, `none` and the empty string, ignoring case. Anything else is `None`.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "yes" | "y" | "true" | "t" | "1" => Some(true),
        "no" | "n" | "false" | "f" | "0" | "0.0" | "" | "none" => Some(false),
        _ => None,
    }
}

/// Default configuration file location under the platform config directory
pub fn default_config_path() -> SettingsResult<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| {
        SettingsError::ConfigDirectory("no configuration directory on this platform".to_string())
    })?;
    Ok(base.join("laserbox").join("config.toml"))
}

fn invalid(key: &str, reason: impl ToString) -> SettingsError {
    SettingsError::InvalidSetting {
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

fn ensure_positive(key: &str, value: f64) -> SettingsResult<()> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::ValueOutOfRange {
            key: key.to_string(),
            value: value.to_string(),
        }
        .into())
    }
}

impl Config {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a `.json` or `.toml` file
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = format_of(path)?;
        let content = std::fs::read_to_string(path)
            .map_err(|e| SettingsError::LoadError(format!("{}: {}", path.display(), e)))?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Save configuration to a `.json` or `.toml` file
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match format_of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;

        info!(path = %path.display(), "Saved configuration");
        Ok(())
    }

    /// Check that the options describe a buildable box
    pub fn validate(&self) -> SettingsResult<()> {
        let options = &self.box_options;

        ensure_positive("thickness", options.thickness)?;
        ensure_positive("line_width", options.line_width)?;
        ensure_positive("height", options.height)?;
        ensure_positive("width", options.width)?;
        ensure_positive("depth", options.depth)?;

        for (key, count) in [
            ("side_indent_count", options.side_indent_count),
            ("top_width_indent_count", options.top_width_indent_count),
            ("top_depth_indent_count", options.top_depth_indent_count),
        ] {
            ensure_positive(key, f64::from(count))?;
        }

        if let Some(width) = self.output.document_width {
            ensure_positive("document_width", width)?;
        }
        if let Some(height) = self.output.document_height {
            ensure_positive("document_height", height)?;
        }

        // walls thicker than the box
        derive_dimensions(options)?;
        Ok(())
    }

    /// Page size in drawing units, when both dimensions are configured
    pub fn page_size(&self) -> Option<(f64, f64)> {
        let unit = self.box_options.unit;
        match (self.output.document_width, self.output.document_height) {
            (Some(width), Some(height)) => Some((
                to_drawing_units(width, unit),
                to_drawing_units(height, unit),
            )),
            _ => None,
        }
    }

    /// Apply one override. Lengths are read in the currently configured unit,
    /// so `unit` should be set before the lengths that depend on it.
    pub fn set_setting(&mut self, key: &str, value: &str) -> SettingsResult<()> {
        let unit = self.box_options.unit;
        let length = |value: &str| parse_length(value, unit).map_err(|e| invalid(key, e));
        let count = |value: &str| value.trim().parse::<u32>().map_err(|e| invalid(key, e));
        let color = |value: &str| value.parse::<Color>().map_err(|e| invalid(key, e));
        let flag = |value: &str| {
            parse_bool(value).ok_or_else(|| invalid(key, format!("not a yes/no value: {}", value)))
        };

        let options = &mut self.box_options;
        match key {
            "thickness" => options.thickness = length(value)?,
            "line_width" => options.line_width = length(value)?,
            "height" => options.height = length(value)?,
            "width" => options.width = length(value)?,
            "depth" => options.depth = length(value)?,
            "unit" => options.unit = value.parse::<Unit>().map_err(|e| invalid(key, e))?,
            "side_indent_count" => options.side_indent_count = count(value)?,
            "top_width_indent_count" => options.top_width_indent_count = count(value)?,
            "top_depth_indent_count" => options.top_depth_indent_count = count(value)?,
            "include_lid" => options.include_lid = flag(value)?,
            "merge_sides" => options.merge_sides = flag(value)?,
            "inside_specified" => options.inside_specified = flag(value)?,
            "stroke_color" => options.stroke_color = color(value)?,
            "fill_color" => options.fill_color = color(value)?,
            "output" => {
                let value = value.trim();
                self.output.path = (!value.is_empty()).then(|| PathBuf::from(value));
            }
            "document_width" => self.output.document_width = Some(length(value)?),
            "document_height" => self.output.document_height = Some(length(value)?),
            _ => return Err(ConfigError::UnknownKey(key.to_string()).into()),
        }

        debug!(key, value, "Applied setting");
        Ok(())
    }

    /// Current value of a setting as a string, `None` for unknown or unset keys
    pub fn get_setting(&self, key: &str) -> Option<String> {
        let options = &self.box_options;
        let value = match key {
            "thickness" => options.thickness.to_string(),
            "line_width" => options.line_width.to_string(),
            "height" => options.height.to_string(),
            "width" => options.width.to_string(),
            "depth" => options.depth.to_string(),
            "unit" => options.unit.to_string(),
            "side_indent_count" => options.side_indent_count.to_string(),
            "top_width_indent_count" => options.top_width_indent_count.to_string(),
            "top_depth_indent_count" => options.top_depth_indent_count.to_string(),
            "include_lid" => options.include_lid.to_string(),
            "merge_sides" => options.merge_sides.to_string(),
            "inside_specified" => options.inside_specified.to_string(),
            "stroke_color" => options.stroke_color.to_string(),
            "fill_color" => options.fill_color.to_string(),
            "output" => self.output.path.as_ref()?.display().to_string(),
            "document_width" => self.output.document_width?.to_string(),
            "document_height" => self.output.document_height?.to_string(),
            _ => return None,
        };
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::new();
        assert!(config.validate().is_ok());
        assert_eq!(config.box_options.unit, Unit::Mm);
        assert!(config.output.path.is_none());
        assert!(config.page_size().is_none());
    }

    #[test]
    fn test_parse_bool() {
        for yes in ["yes", "Y", "true", "T", "1"] {
            assert_eq!(parse_bool(yes), Some(true), "{}", yes);
        }
        for no in ["no", "N", "false", "f", "0", "0.0", "", "None"] {
            assert_eq!(parse_bool(no), Some(false), "{}", no);
        }
        assert_eq!(parse_bool("maybe"), None);
        assert_eq!(parse_bool("2"), None);
    }

    #[test]
    fn test_set_and_get_settings() {
        let mut config = Config::new();
        config.set_setting("thickness", "4.5").unwrap();
        config.set_setting("side_indent_count", "7").unwrap();
        config.set_setting("include_lid", "no").unwrap();
        config.set_setting("merge_sides", "yes").unwrap();
        config.set_setting("output", "box.svg").unwrap();

        assert_eq!(config.get_setting("thickness").as_deref(), Some("4.5"));
        assert_eq!(config.get_setting("side_indent_count").as_deref(), Some("7"));
        assert_eq!(config.get_setting("include_lid").as_deref(), Some("false"));
        assert_eq!(config.get_setting("merge_sides").as_deref(), Some("true"));
        assert_eq!(config.get_setting("output").as_deref(), Some("box.svg"));
        assert_eq!(config.get_setting("document_width"), None);
        assert_eq!(config.get_setting("nope"), None);
    }

    #[test]
    fn test_colour_settings() {
        let mut config = Config::new();
        assert_eq!(config.get_setting("fill_color").as_deref(), Some("#808080"));

        config.set_setting("stroke_color", "#ff0000").unwrap();
        // packed RRGGBBAA as delivered by colour pickers
        config.set_setting("fill_color", "16711935").unwrap();
        assert_eq!(config.get_setting("stroke_color").as_deref(), Some("#FF0000"));
        assert_eq!(config.get_setting("fill_color").as_deref(), Some("#00FF00"));

        assert!(matches!(
            config.set_setting("fill_color", "green"),
            Err(SettingsError::InvalidSetting { .. })
        ));
    }

    #[test]
    fn test_every_listed_key_is_readable() {
        let mut config = Config::new();
        config.set_setting("output", "box.svg").unwrap();
        config.set_setting("document_width", "10").unwrap();
        config.set_setting("document_height", "10").unwrap();
        for key in SETTING_KEYS {
            assert!(config.get_setting(key).is_some(), "{}", key);
        }
    }

    #[test]
    fn test_lengths_follow_current_unit() {
        let mut config = Config::new();
        config.set_setting("unit", "in").unwrap();
        config.set_setting("thickness", "1/8").unwrap();
        config.set_setting("width", "4 1/2").unwrap();

        assert_relative_eq!(config.box_options.thickness, 0.125);
        assert_relative_eq!(config.box_options.width, 4.5);
    }

    #[test]
    fn test_rejected_settings() {
        let mut config = Config::new();
        assert!(matches!(
            config.set_setting("colour", "red"),
            Err(SettingsError::Config(ConfigError::UnknownKey(_)))
        ));
        assert!(matches!(
            config.set_setting("include_lid", "perhaps"),
            Err(SettingsError::InvalidSetting { .. })
        ));
        assert!(matches!(
            config.set_setting("side_indent_count", "-3"),
            Err(SettingsError::InvalidSetting { .. })
        ));
        assert!(matches!(
            config.set_setting("unit", "furlong"),
            Err(SettingsError::InvalidSetting { .. })
        ));
        assert_eq!(config, Config::new());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::new();
        config.box_options.line_width = 0.0;
        assert!(matches!(
            config.validate(),
            Err(SettingsError::Config(ConfigError::ValueOutOfRange { .. }))
        ));

        let mut config = Config::new();
        config.box_options.top_depth_indent_count = 0;
        assert!(config.validate().is_err());

        let mut config = Config::new();
        config.box_options.thickness = 30.0;
        assert!(matches!(
            config.validate(),
            Err(SettingsError::Parameter(_))
        ));
    }

    #[test]
    fn test_page_size_in_drawing_units() {
        let mut config = Config::new();
        config.set_setting("unit", "in").unwrap();
        config.set_setting("document_width", "8.5").unwrap();
        assert!(config.page_size().is_none());
        config.set_setting("document_height", "11").unwrap();
        assert_eq!(config.page_size(), Some((816.0, 1056.0)));
    }

    #[test]
    fn test_unsupported_extension() {
        let err = Config::new()
            .save_to_file(Path::new("config.yaml"))
            .unwrap_err();
        assert!(matches!(
            err,
            SettingsError::Config(ConfigError::UnsupportedFormat(ext)) if ext == "yaml"
        ));
    }

    #[test]
    fn test_default_config_path_is_under_laserbox() {
        if let Ok(path) = default_config_path() {
            assert!(path.ends_with("laserbox/config.toml"));
        }
    }
}
