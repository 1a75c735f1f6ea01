// 🩺 Symptom Database - Symptom → recommended acupoint mapping
//
// The mapping is data, not code: a JSON file lists symptom entries in
// priority order, each with its recommended points and source citations.
// Matching is deliberately simple - case-insensitive substring, first entry
// wins - so the file's order IS the ranking.
//
// The file is re-read on every lookup, never cached, so edits to the JSON
// take effect without a restart.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

// ============================================================================
// TYPES
// ============================================================================

/// One recommended point as the database states it: code plus the quick
/// orientation fields shown even when the catalog has nothing richer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SymptomPoint {
    pub code: String,
    pub name: String,
    pub meridian: String,
    pub location_hint: String,
    #[serde(default)]
    pub notes: String,
}

/// A symptom entry: bilingual label, recommended points, citations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymptomEntry {
    pub symptom: String,
    #[serde(default)]
    pub sources: Vec<String>,
    pub points: Vec<SymptomPoint>,
}

impl SymptomEntry {
    /// First segment of the label, e.g. "Low Back Pain / 腰痛" → "Low Back Pain".
    pub fn primary_name(&self) -> &str {
        self.symptom.split('/').next().unwrap_or(&self.symptom).trim()
    }

    /// Stable file-name form of the primary name, e.g. "low_back_pain".
    pub fn slug(&self) -> String {
        self.primary_name().replace(' ', "_").to_lowercase()
    }
}

/// The whole database as one read returns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymptomDb {
    pub symptoms: Vec<SymptomEntry>,
    #[serde(default = "default_disclaimer")]
    pub disclaimer: String,
}

fn default_disclaimer() -> String {
    "For educational reference only.".to_string()
}

// ============================================================================
// LOADING
// ============================================================================

/// Copy of the database compiled into the binary, so the CLI and server
/// work without any file in place.
const BUNDLED_JSON: &str = include_str!("../data/acupressure_by_symptom.json");

impl SymptomDb {
    /// Load from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<SymptomDb> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read symptom database: {}", path.display()))?;
        let db: SymptomDb = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse symptom database: {}", path.display()))?;
        Ok(db)
    }

    /// The compiled-in database.
    pub fn bundled() -> Result<SymptomDb> {
        serde_json::from_str(BUNDLED_JSON).context("Bundled symptom database is invalid")
    }

    /// First entry whose label contains the whole query, or failing that,
    /// any single query word. Entries are checked in file order; the first
    /// hit wins and no scoring is done.
    pub fn find(&self, query: &str) -> Option<&SymptomEntry> {
        let query_lower = query.to_lowercase();
        self.symptoms.iter().find(|entry| {
            let symptom = entry.symptom.to_lowercase();
            symptom.contains(&query_lower)
                || query_lower
                    .split_whitespace()
                    .any(|word| symptom.contains(word))
        })
    }

    /// All symptom labels, in file order.
    pub fn symptom_names(&self) -> Vec<String> {
        self.symptoms.iter().map(|s| s.symptom.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.symptoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symptoms.is_empty()
    }
}

/// Where lookups read the database from. `load` is called once per lookup,
/// so a `File` source always reflects the current file contents.
#[derive(Debug, Clone)]
pub enum DatabaseSource {
    /// The copy compiled into the binary.
    Bundled,
    /// An external JSON file, re-read on every load.
    File(PathBuf),
    /// A fixed in-memory database. Used by tests and embedders.
    Fixed(SymptomDb),
}

impl DatabaseSource {
    pub fn load(&self) -> Result<SymptomDb> {
        match self {
            DatabaseSource::Bundled => SymptomDb::bundled(),
            DatabaseSource::File(path) => SymptomDb::load(path),
            DatabaseSource::Fixed(db) => Ok(db.clone()),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn db() -> SymptomDb {
        SymptomDb::bundled().unwrap()
    }

    #[test]
    fn test_bundled_database_parses() {
        let db = db();
        assert!(!db.is_empty());
        assert!(db.disclaimer.contains("educational"));
        for entry in &db.symptoms {
            assert!(!entry.points.is_empty(), "{} has no points", entry.symptom);
        }
    }

    #[test]
    fn test_whole_query_match() {
        let db = db();
        let entry = db.find("low back pain").unwrap();
        assert!(entry.symptom.starts_with("Low Back Pain"));
    }

    #[test]
    fn test_single_word_match() {
        let db = db();
        let entry = db.find("neck").unwrap();
        assert!(entry.symptom.contains("Neck"));
    }

    #[test]
    fn test_first_entry_wins_in_file_order() {
        let db = db();
        // "pain" appears in several labels; the earliest entry containing it
        // must be returned
        let entry = db.find("pain").unwrap();
        let index = db
            .symptoms
            .iter()
            .position(|s| s.symptom == entry.symptom)
            .unwrap();
        for earlier in &db.symptoms[..index] {
            assert!(!earlier.symptom.to_lowercase().contains("pain"));
        }
    }

    #[test]
    fn test_match_is_case_insensitive() {
        let db = db();
        assert!(db.find("HEADACHE").is_some());
        assert!(db.find("Insomnia").is_some());
    }

    #[test]
    fn test_no_match_returns_none() {
        let db = db();
        assert!(db.find("broken keyboard").is_none());
    }

    #[test]
    fn test_primary_name_and_slug() {
        let entry = SymptomEntry {
            symptom: "Low Back Pain / 腰痛".to_string(),
            sources: vec![],
            points: vec![],
        };
        assert_eq!(entry.primary_name(), "Low Back Pain");
        assert_eq!(entry.slug(), "low_back_pain");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "symptoms": [
                    {{
                        "symptom": "Test / 测试",
                        "points": [
                            {{
                                "code": "LI4",
                                "name": "Hegu",
                                "meridian": "Large Intestine",
                                "location_hint": "hand"
                            }}
                        ]
                    }}
                ]
            }}"#
        )
        .unwrap();

        let db = SymptomDb::load(file.path()).unwrap();
        assert_eq!(db.len(), 1);
        // Omitted fields take their defaults
        assert_eq!(db.disclaimer, "For educational reference only.");
        assert_eq!(db.symptoms[0].points[0].notes, "");
        assert!(db.symptoms[0].sources.is_empty());
    }

    #[test]
    fn test_load_missing_file_is_an_error() {
        let err = SymptomDb::load("/no/such/path.json").unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }

    #[test]
    fn test_file_source_sees_external_changes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("db.json");
        let entry = |label: &str| {
            format!(
                r#"{{"symptoms": [{{"symptom": "{}", "points": [
                    {{"code": "LI4", "name": "Hegu", "meridian": "LI", "location_hint": "hand"}}
                ]}}]}}"#,
                label
            )
        };

        std::fs::write(&path, entry("Headache / 头痛")).unwrap();
        let source = DatabaseSource::File(path.clone());
        assert_eq!(source.load().unwrap().symptoms[0].symptom, "Headache / 头痛");

        // Each load re-reads the file, so the rewrite is visible immediately
        std::fs::write(&path, entry("Toothache / 牙痛")).unwrap();
        assert_eq!(source.load().unwrap().symptoms[0].symptom, "Toothache / 牙痛");
    }

    #[test]
    fn test_bundled_and_fixed_sources_load() {
        assert!(!DatabaseSource::Bundled.load().unwrap().is_empty());

        let fixed = DatabaseSource::Fixed(db());
        assert_eq!(fixed.load().unwrap().len(), db().len());
    }
}
