// File: crates/casecurve-core/src/registry.rs
// Summary: Static location registry (identifier -> coordinates/population), loaded once from JSON.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Error, Result};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LocationInfo {
    #[serde(deserialize_with = "number_or_string")]
    pub lat: f64,
    #[serde(deserialize_with = "number_or_string")]
    pub lon: f64,
    #[serde(default)]
    pub population: Option<u64>,
}

/// Read-only lookup table keyed by normalized location identifier.
#[derive(Clone, Debug, Default)]
pub struct LocationRegistry {
    entries: BTreeMap<String, LocationInfo>,
}

impl LocationRegistry {
    pub fn from_entries<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, LocationInfo)>,
        K: AsRef<str>,
    {
        let entries = entries.into_iter().map(|(k, v)| (normalize_location_key(k.as_ref()), v)).collect();
        Self { entries }
    }

    /// Parse a JSON object `{"POLAND": {"lat": .., "lon": .., "population": ..}, ..}`.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let raw: BTreeMap<String, LocationInfo> =
            serde_json::from_str(text).map_err(|e| Error::Registry(e.to_string()))?;
        if raw.is_empty() {
            return Err(Error::Registry("registry has no locations".into()));
        }
        Ok(Self::from_entries(raw))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::Registry(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&text)
    }

    /// Look up a location, accepting any spelling that normalizes to a known key.
    pub fn resolve(&self, name: &str) -> Result<(&str, &LocationInfo)> {
        let key = normalize_location_key(name);
        self.entries
            .get_key_value(&key)
            .map(|(k, v)| (k.as_str(), v))
            .ok_or_else(|| Error::UnknownLocation(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool { self.entries.contains_key(&normalize_location_key(name)) }
    pub fn names(&self) -> impl Iterator<Item = &str> { self.entries.keys().map(String::as_str) }
    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
}

/// `"  United States, of America "` -> `"UNITED_STATES__OF_AMERICA"`.
pub fn normalize_location_key(name: &str) -> String {
    name.trim().to_uppercase().replace([' ', ','], "_")
}

// Coordinates arrive as strings in the upstream payload.
fn number_or_string<'de, D: Deserializer<'de>>(de: D) -> std::result::Result<f64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(f64),
        Str(String),
    }
    match Raw::deserialize(de)? {
        Raw::Num(n) => Ok(n),
        Raw::Str(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}
