//! Entity settings loaded from an INI document.
//!
//! Every entity kind reads its tuning values from its own section. Values are
//! opaque to the engine: a kind asks for a key and gets a number back or a
//! [`ConfigError`]. Lookups happen once, when the kind's static data is
//! created or an instance is spawned, never while ticking.
//!
//! # Settings File Format
//!
//! ```ini
//! [healer]
//! speed = 0.5
//! healInterval = 5
//! healDuration = 1.5
//! healAmount = 0.1
//! healRadius = 1.0
//!
//! [flyer]
//! speed = 1.2
//! ```
//!
//! Section and key names are case-sensitive.

use std::collections::HashMap;
use std::path::Path;

use configparser::ini::Ini;
use log::info;
use rustc_hash::FxHashMap;

use crate::error::ConfigError;

/// Settings used when no file is given.
pub const DEFAULT_SETTINGS: &str = "\
[healer]
speed = 0.5
healInterval = 5
healDuration = 1.5
healAmount = 0.1
healRadius = 1.0

[flyer]
speed = 1.2
";

/// All sections of a settings document.
#[derive(Debug, Clone, Default)]
pub struct GameSettings {
    sections: FxHashMap<String, EntitySettings>,
}

impl GameSettings {
    /// Parse settings from INI text.
    pub fn from_ini_str(text: &str) -> Result<Self, ConfigError> {
        let mut ini = Ini::new_cs();
        let map = ini.read(text.to_string()).map_err(ConfigError::Load)?;
        Ok(Self::from_map(map))
    }

    /// Load settings from an INI file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let mut ini = Ini::new_cs();
        let map = ini
            .load(path)
            .map_err(|e| ConfigError::Load(format!("{}: {}", path.display(), e)))?;
        let settings = Self::from_map(map);
        info!(
            "Loaded settings from {} ({} sections)",
            path.display(),
            settings.sections.len()
        );
        Ok(settings)
    }

    pub fn defaults() -> Result<Self, ConfigError> {
        Self::from_ini_str(DEFAULT_SETTINGS)
    }

    fn from_map(map: HashMap<String, HashMap<String, Option<String>>>) -> Self {
        let sections = map
            .into_iter()
            .map(|(section, values)| {
                let mut entity = EntitySettings::new(section.clone());
                for (key, value) in values {
                    if let Some(value) = value {
                        entity.values.insert(key, value);
                    }
                }
                (section, entity)
            })
            .collect();
        GameSettings { sections }
    }

    /// Insert or replace one section.
    pub fn insert(&mut self, settings: EntitySettings) {
        self.sections.insert(settings.section.clone(), settings);
    }

    /// Settings for one entity kind.
    pub fn entity(&self, kind: &str) -> Result<&EntitySettings, ConfigError> {
        self.sections
            .get(kind)
            .ok_or_else(|| ConfigError::MissingSection(kind.to_string()))
    }
}

/// Key/value settings of one entity kind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntitySettings {
    section: String,
    values: FxHashMap<String, String>,
}

impl EntitySettings {
    pub fn new(section: impl Into<String>) -> Self {
        EntitySettings {
            section: section.into(),
            values: FxHashMap::default(),
        }
    }

    /// Builder method to set a raw value.
    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.values.insert(key.into(), value.to_string());
        self
    }

    pub fn section(&self) -> &str {
        &self.section
    }

    pub fn get_str(&self, key: &str) -> Result<&str, ConfigError> {
        self.values
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| ConfigError::MissingKey {
                section: self.section.clone(),
                key: key.to_string(),
            })
    }

    /// Read a numeric value. Missing keys and values that do not parse as a
    /// finite number are errors.
    pub fn get_float(&self, key: &str) -> Result<f32, ConfigError> {
        let raw = self.get_str(key)?;
        match raw.trim().parse::<f32>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(ConfigError::NotNumeric {
                section: self.section.clone(),
                key: key.to_string(),
                value: raw.to_string(),
            }),
        }
    }
}
