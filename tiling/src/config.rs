//! INI configuration file.
//!
//! Settings live in `<config dir>/tiling/config.ini` (e.g.
//! `~/.config/tiling/config.ini` on Linux). A missing file means defaults;
//! missing keys fall back to their defaults individually; unknown sections
//! and keys are ignored.
//!
//! ```ini
//! [grid]
//! size = 256
//! stride = 256
//!
//! [output]
//! directory = tiles
//! format = png
//! prefix =
//! rotate = false
//! flip = false
//!
//! [filter]
//! lower = 0
//! upper = 255
//!
//! [assemble]
//! mode = RGB
//!
//! [logging]
//! level = info
//! file =
//! ```

use std::path::{Path, PathBuf};
use std::str::FromStr;

use ini::{Ini, Properties};
use thiserror::Error;

use crate::assemble::ColorMode;
use crate::error::TilingError;
use crate::export::{WriteOptions, DEFAULT_EXTENSION, DEFAULT_TARGET_DIR};
use crate::filter::FilterThresholds;
use crate::grid::GridConfig;
use crate::logging::LoggingConfig;

/// Default tile edge length in pixels.
pub const DEFAULT_TILE_SIZE: u32 = 256;

/// Errors reading or writing the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: ini::Error,
    },

    #[error("Failed to write config file {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid value for {section}.{key}: {value:?} ({reason})")]
    InvalidValue {
        section: &'static str,
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("Could not determine the user configuration directory")]
    NoConfigDir,
}

/// `[grid]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridSettings {
    pub size: u32,
    /// `None` (or 0) means edge-to-edge tiles.
    pub stride: Option<u32>,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            size: DEFAULT_TILE_SIZE,
            stride: None,
        }
    }
}

/// `[output]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputSettings {
    pub directory: PathBuf,
    pub format: String,
    pub prefix: Option<String>,
    pub rotate: bool,
    pub flip: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(DEFAULT_TARGET_DIR),
            format: DEFAULT_EXTENSION.to_string(),
            prefix: None,
            rotate: false,
            flip: false,
        }
    }
}

/// `[filter]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSettings {
    pub lower: f64,
    pub upper: f64,
}

impl Default for FilterSettings {
    fn default() -> Self {
        let thresholds = FilterThresholds::default();
        Self {
            lower: thresholds.lower,
            upper: thresholds.upper,
        }
    }
}

/// `[assemble]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssembleSettings {
    pub mode: ColorMode,
}

/// `[logging]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingSettings {
    pub level: String,
    pub file: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

/// Parsed configuration file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigFile {
    pub grid: GridSettings,
    pub output: OutputSettings,
    pub filter: FilterSettings,
    pub assemble: AssembleSettings,
    pub logging: LoggingSettings,
}

/// Directory holding the configuration file.
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("tiling"))
}

/// Path of the configuration file.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    config_dir()
        .map(|dir| dir.join("config.ini"))
        .ok_or(ConfigError::NoConfigDir)
}

impl ConfigFile {
    /// Load the user configuration file, or defaults if it does not exist.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&config_file_path()?)
    }

    /// Load a configuration file, or defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let ini = Ini::load_from_file(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ini(&ini)
    }

    /// Parse configuration from INI text.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let ini = Ini::load_from_str(text).map_err(|e| ConfigError::Read {
            path: PathBuf::from("<string>"),
            source: ini::Error::Parse(e),
        })?;
        Self::from_ini(&ini)
    }

    fn from_ini(ini: &Ini) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(section) = ini.section(Some("grid")) {
            if let Some(size) = parsed::<u32>(section, "grid", "size")? {
                config.grid.size = size;
            }
            config.grid.stride = parsed::<u32>(section, "grid", "stride")?.filter(|s| *s > 0);
        }

        if let Some(section) = ini.section(Some("output")) {
            if let Some(dir) = non_empty(section, "directory") {
                config.output.directory = PathBuf::from(dir);
            }
            if let Some(format) = non_empty(section, "format") {
                config.output.format = format.trim_start_matches('.').to_string();
            }
            config.output.prefix = non_empty(section, "prefix").map(str::to_string);
            if let Some(rotate) = parsed_bool(section, "output", "rotate")? {
                config.output.rotate = rotate;
            }
            if let Some(flip) = parsed_bool(section, "output", "flip")? {
                config.output.flip = flip;
            }
        }

        if let Some(section) = ini.section(Some("filter")) {
            if let Some(lower) = parsed::<f64>(section, "filter", "lower")? {
                config.filter.lower = lower;
            }
            if let Some(upper) = parsed::<f64>(section, "filter", "upper")? {
                config.filter.upper = upper;
            }
        }

        if let Some(section) = ini.section(Some("assemble")) {
            if let Some(mode) = non_empty(section, "mode") {
                config.assemble.mode = mode.parse().map_err(|e: TilingError| {
                    ConfigError::InvalidValue {
                        section: "assemble",
                        key: "mode",
                        value: mode.to_string(),
                        reason: e.to_string(),
                    }
                })?;
            }
        }

        if let Some(section) = ini.section(Some("logging")) {
            if let Some(level) = non_empty(section, "level") {
                config.logging.level = level.to_string();
            }
            config.logging.file = non_empty(section, "file").map(PathBuf::from);
        }

        Ok(config)
    }

    /// Save to the user configuration file, creating its directory.
    pub fn save(&self) -> Result<PathBuf, ConfigError> {
        let path = config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save to `path`, creating the parent directory.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        self.to_ini().write_to_file(path).map_err(write_err)
    }

    fn to_ini(&self) -> Ini {
        let mut ini = Ini::new();
        ini.with_section(Some("grid"))
            .set("size", self.grid.size.to_string())
            .set(
                "stride",
                self.grid.stride.map(|s| s.to_string()).unwrap_or_default(),
            );
        ini.with_section(Some("output"))
            .set("directory", self.output.directory.to_string_lossy())
            .set("format", self.output.format.as_str())
            .set("prefix", self.output.prefix.clone().unwrap_or_default())
            .set("rotate", self.output.rotate.to_string())
            .set("flip", self.output.flip.to_string());
        ini.with_section(Some("filter"))
            .set("lower", self.filter.lower.to_string())
            .set("upper", self.filter.upper.to_string());
        ini.with_section(Some("assemble"))
            .set("mode", self.assemble.mode.name());
        ini.with_section(Some("logging"))
            .set("level", self.logging.level.as_str())
            .set(
                "file",
                self.logging
                    .file
                    .as_ref()
                    .map(|p| p.to_string_lossy().into_owned())
                    .unwrap_or_default(),
            );
        ini
    }

    /// Grid configuration from the `[grid]` section.
    pub fn to_grid_config(&self) -> Result<GridConfig, TilingError> {
        GridConfig::new(self.grid.size, self.grid.stride)
    }

    /// Write options from the `[output]` section.
    pub fn write_options(&self) -> WriteOptions {
        WriteOptions {
            target_dir: self.output.directory.clone(),
            rotate: self.output.rotate,
            flip: self.output.flip,
            prefix: self.output.prefix.clone().filter(|p| !p.is_empty()),
            extension: self.output.format.clone(),
        }
    }

    /// Thresholds from the `[filter]` section.
    pub fn filter_thresholds(&self) -> FilterThresholds {
        FilterThresholds::new(self.filter.lower, self.filter.upper)
    }

    /// Logging setup from the `[logging]` section.
    pub fn logging_config(&self) -> LoggingConfig {
        LoggingConfig {
            level: self.logging.level.clone(),
            file: self.logging.file.clone(),
        }
    }
}

fn non_empty<'a>(section: &'a Properties, key: &str) -> Option<&'a str> {
    section.get(key).map(str::trim).filter(|v| !v.is_empty())
}

fn parsed<T>(
    section: &Properties,
    section_name: &'static str,
    key: &'static str,
) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    non_empty(section, key)
        .map(|value| {
            value.parse::<T>().map_err(|e| ConfigError::InvalidValue {
                section: section_name,
                key,
                value: value.to_string(),
                reason: e.to_string(),
            })
        })
        .transpose()
}

fn parsed_bool(
    section: &Properties,
    section_name: &'static str,
    key: &'static str,
) -> Result<Option<bool>, ConfigError> {
    non_empty(section, key)
        .map(|value| match value.to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Ok(true),
            "false" | "no" | "off" | "0" => Ok(false),
            _ => Err(ConfigError::InvalidValue {
                section: section_name,
                key,
                value: value.to_string(),
                reason: "expected true or false".to_string(),
            }),
        })
        .transpose()
}
