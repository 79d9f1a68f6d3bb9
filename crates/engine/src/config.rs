use crate::error::ConfigError;
use crate::section::{EnumElement, Mode, Section, TypeElement};
use serde::Deserialize;
use std::collections::HashSet;
use std::hash::Hash;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// File name looked up by [`find_config`]
pub const CONFIG_FILE_NAME: &str = ".go-reorder.toml";

/// Markers of a project root; discovery does not go above them
const ROOT_MARKERS: [&str; 2] = [".git", "go.mod"];

/// Reordering configuration
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Config {
    pub sections: SectionsConfig,
    pub types: TypesConfig,
    pub behavior: BehaviorConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionsConfig {
    /// Sections in emission order
    pub order: Vec<Section>,
}

impl Default for SectionsConfig {
    fn default() -> Self {
        Self {
            order: Section::ALL.to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypesConfig {
    pub type_layout: Vec<TypeElement>,
    pub enum_layout: Vec<EnumElement>,
}

impl Default for TypesConfig {
    fn default() -> Self {
        Self {
            type_layout: TypeElement::ALL.to_vec(),
            enum_layout: EnumElement::ALL.to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BehaviorConfig {
    pub mode: Mode,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    #[serde(default)]
    sections: RawSections,
    #[serde(default)]
    types: RawTypes,
    #[serde(default)]
    behavior: RawBehavior,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSections {
    order: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawTypes {
    type_layout: Option<Vec<String>>,
    enum_layout: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawBehavior {
    mode: Option<String>,
}

impl Config {
    /// Check for repeated sections or layout elements
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(section) = first_duplicate(&self.sections.order) {
            return Err(ConfigError::DuplicateSection(section.to_string()));
        }
        if let Some(element) = first_duplicate(&self.types.type_layout) {
            return Err(ConfigError::DuplicateLayoutElement {
                layout: "type_layout",
                element: element.to_string(),
            });
        }
        if let Some(element) = first_duplicate(&self.types.enum_layout) {
            return Err(ConfigError::DuplicateLayoutElement {
                layout: "enum_layout",
                element: element.to_string(),
            });
        }
        Ok(())
    }

    /// Parse TOML text; unset fields keep their defaults
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Self::parse(text, "<inline>")
    }

    /// Load a config file. A missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("no config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        Self::parse(&text, &path.display().to_string())
    }

    fn parse(text: &str, origin: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(text).map_err(|source| ConfigError::Toml {
            path: origin.to_string(),
            source,
        })?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawConfig) -> Result<Self, ConfigError> {
        let mut cfg = Self::default();

        if let Some(order) = raw.sections.order {
            cfg.sections.order = parse_all(&order)?;
        }
        if let Some(layout) = raw.types.type_layout {
            cfg.types.type_layout = parse_all(&layout)?;
        }
        if let Some(layout) = raw.types.enum_layout {
            cfg.types.enum_layout = parse_all(&layout)?;
        }
        if let Some(mode) = raw.behavior.mode {
            cfg.behavior.mode = mode.parse()?;
        }

        cfg.validate()?;
        Ok(cfg)
    }

    /// Whether `section` is listed in the order
    pub fn includes(&self, section: Section) -> bool {
        self.sections.order.contains(&section)
    }
}

fn parse_all<T>(names: &[String]) -> Result<Vec<T>, ConfigError>
where
    T: FromStr<Err = ConfigError>,
{
    names.iter().map(|name| name.parse()).collect()
}

fn first_duplicate<T: Copy + Eq + Hash>(items: &[T]) -> Option<T> {
    let mut seen = HashSet::new();
    items.iter().copied().find(|item| !seen.insert(*item))
}

/// Search `start` and its ancestors for [`CONFIG_FILE_NAME`].
///
/// The walk stops after the first directory containing `.git` or `go.mod`; that
/// directory is still checked.
pub fn find_config(start: impl AsRef<Path>) -> Option<PathBuf> {
    let mut dir = Some(start.as_ref());
    while let Some(current) = dir {
        let candidate = current.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            log::debug!("found config {}", candidate.display());
            return Some(candidate);
        }
        if ROOT_MARKERS.iter().any(|marker| current.join(marker).exists()) {
            return None;
        }
        dir = current.parent();
    }
    None
}
