use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::prelude::SqmResult;
use crate::sqm::SeriesSummary;

/// Pre-generated index of measurement locations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub locations: Vec<Location>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Measurement file, relative to the manifest unless absolute.
    #[serde(default)]
    pub sqm_file: Option<String>,
}

/// A location together with the summary of its measurement file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationSummary {
    pub id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub source: Option<String>,
    pub summary: SeriesSummary,
}

impl Manifest {
    pub fn from_json(text: &str) -> SqmResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Resolved measurement source for each location, in manifest order.
    pub fn sources<'a>(
        &'a self,
        manifest_source: &'a str,
    ) -> impl Iterator<Item = (&'a Location, Option<String>)> + 'a {
        self.locations.iter().map(move |location| {
            let source = location
                .sqm_file
                .as_deref()
                .map(|file| resolve_source(manifest_source, file));
            (location, source)
        })
    }
}

impl LocationSummary {
    pub fn new(location: &Location, source: Option<String>, summary: SeriesSummary) -> Self {
        Self {
            id: location.id.clone(),
            name: location.name.clone(),
            latitude: location.latitude,
            longitude: location.longitude,
            source,
            summary,
        }
    }
}

fn is_url(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Resolve `file` against the location of the manifest it came from.
/// URLs and absolute paths are returned unchanged.
pub fn resolve_source(manifest_source: &str, file: &str) -> String {
    if is_url(file) || Path::new(file).is_absolute() {
        return file.to_string();
    }
    if is_url(manifest_source) {
        let base = match manifest_source.rfind('/') {
            Some(idx) if idx >= manifest_source.find("://").map_or(0, |s| s + 3) => {
                &manifest_source[..=idx]
            }
            _ => return format!("{manifest_source}/{file}"),
        };
        return format!("{base}{file}");
    }
    match Path::new(manifest_source).parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.join(file).to_string_lossy().into_owned(),
        _ => file.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::SqmError;

    #[test]
    fn manifest_parses_locations() {
        let manifest = Manifest::from_json(
            r#"{"locations":[
                {"id":"a","name":"Alpha","latitude":45.0,"longitude":13.0,"sqm_file":"a.dat"},
                {"id":"b","name":"Beta","latitude":46.0,"longitude":14.0}
            ]}"#,
        )
        .unwrap();
        assert_eq!(manifest.locations.len(), 2);
        assert_eq!(manifest.locations[1].sqm_file, None);
    }

    #[test]
    fn malformed_manifest_is_an_error() {
        let err = Manifest::from_json("{not json").unwrap_err();
        assert!(matches!(err, SqmError::Manifest(_)));
    }

    #[test]
    fn relative_files_resolve_against_url_base() {
        assert_eq!(
            resolve_source("https://example.org/data/manifest.json", "sqm/a.dat"),
            "https://example.org/data/sqm/a.dat"
        );
        assert_eq!(
            resolve_source("https://example.org", "a.dat"),
            "https://example.org/a.dat"
        );
    }

    #[test]
    fn relative_files_resolve_against_path_base() {
        let resolved = resolve_source("data/manifest.json", "a.dat");
        assert_eq!(Path::new(&resolved), Path::new("data").join("a.dat"));
        assert_eq!(resolve_source("manifest.json", "a.dat"), "a.dat");
    }

    #[test]
    fn absolute_entries_are_kept() {
        assert_eq!(
            resolve_source("data/manifest.json", "https://cdn.example.org/a.dat"),
            "https://cdn.example.org/a.dat"
        );
        assert_eq!(resolve_source("data/manifest.json", "/srv/a.dat"), "/srv/a.dat");
    }

    #[test]
    fn sources_pair_locations_with_resolved_files() {
        let manifest = Manifest {
            locations: vec![
                Location {
                    id: "a".into(),
                    name: "Alpha".into(),
                    latitude: 0.0,
                    longitude: 0.0,
                    sqm_file: Some("a.dat".into()),
                },
                Location {
                    id: "b".into(),
                    name: "Beta".into(),
                    latitude: 0.0,
                    longitude: 0.0,
                    sqm_file: None,
                },
            ],
        };
        let sources: Vec<Option<String>> = manifest
            .sources("https://example.org/m.json")
            .map(|(_, source)| source)
            .collect();
        assert_eq!(
            sources,
            vec![Some("https://example.org/a.dat".to_string()), None]
        );
    }
}
