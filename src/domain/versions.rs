use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::BTreeMap;

/// Identifier to new version mapping for one compilation unit.
///
/// Entries keep discovery order for raw output. Inserting an identifier that
/// is already present replaces its version in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Versions {
    entries: Vec<(String, String)>,
}

impl Versions {
    pub fn new() -> Self {
        Versions::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, version: impl Into<String>) {
        let name = name.into();
        let version = version.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = version,
            None => self.entries.push((name, version)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `(identifier, version)` pairs in discovery order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// New versions in discovery order
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(_, v)| v.as_str())
    }
}

impl Serialize for Versions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let sorted: BTreeMap<&str, &str> = self.iter().collect();
        let mut map = serializer.serialize_map(Some(sorted.len()))?;
        for (name, version) in sorted {
            map.serialize_entry(name, version)?;
        }
        map.end()
    }
}
