use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Grid columns allowed by the directory layout.
const ALLOWED_COLUMNS: [u8; 3] = [2, 3, 4];
const DEFAULT_COLUMNS: u8 = 4;

/// Durable UI preferences.
///
/// The stored format keeps the column count as a string key; anything
/// outside "2"/"3"/"4" falls back to the default on load.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(
        serialize_with = "serialize_columns",
        deserialize_with = "deserialize_columns"
    )]
    pub grid_columns: u8,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            grid_columns: DEFAULT_COLUMNS,
        }
    }
}

impl Preferences {
    /// Returns the preference with the column count coerced into the
    /// allowed set.
    pub fn normalized(self) -> Self {
        if ALLOWED_COLUMNS.contains(&self.grid_columns) {
            self
        } else {
            Self::default()
        }
    }
}

fn serialize_columns<S>(columns: &u8, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&columns.to_string())
}

fn deserialize_columns<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(raw.parse::<u8>().unwrap_or(DEFAULT_COLUMNS))
}

pub struct PreferencesRepository;

impl PreferencesRepository {
    pub const DEFAULT_FILE: &'static str = "vitrina.prefs.json";

    /// Loads preferences from `path`, falling back to defaults when
    /// the file is missing or unreadable.
    pub fn load(path: &Path) -> Preferences {
        match fs::read_to_string(path) {
            Ok(content) => serde_json::from_str::<Preferences>(&content)
                .map(Preferences::normalized)
                .unwrap_or_default(),
            Err(_) => Preferences::default(),
        }
    }

    /// Writes preferences to `path`.
    pub fn save(preferences: &Preferences, path: &Path) -> Result<(), String> {
        match serde_json::to_string_pretty(preferences) {
            Ok(json) => fs::write(path, json).map_err(|e| e.to_string()),
            Err(e) => Err(format!("Serialization failed: {}", e)),
        }
    }
}
