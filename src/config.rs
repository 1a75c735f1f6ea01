// ⚙️ Configuration - Environment overrides with working defaults
//
// Everything runs with zero configuration: the bundled database, port 8080,
// no advisor keys. Each knob is a single env var, read once at startup.
//
//   OPENAI_API_KEY / ANTHROPIC_API_KEY  advisor backends
//   ACUPRESSURE_DB                      symptom database file
//   ACUPRESSURE_PORT                    server port
//   ACUPRESSURE_IMAGE_DIR               local point photo archive
//   ACUPRESSURE_CHINESE_IMAGE_DIR       Chinese photo archive

use std::env;
use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::symptoms::{DatabaseSource, SymptomDb};

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_DB_PATH: &str = "data/acupressure_by_symptom.json";
pub const DEFAULT_IMAGE_DIR: &str = "DignoseSource/acupoint_images";
pub const DEFAULT_CHINESE_IMAGE_DIR: &str = "DignoseSource/Chinese acuPointData/acupoints.asp_files";

/// Keys for the optional LLM advisor. Empty strings count as unset.
#[derive(Debug, Clone, Default)]
pub struct AdvisorConfig {
    pub openai_api_key: Option<String>,
    pub anthropic_api_key: Option<String>,
}

impl AdvisorConfig {
    pub fn from_env() -> Self {
        AdvisorConfig {
            openai_api_key: non_empty(env::var("OPENAI_API_KEY").ok()),
            anthropic_api_key: non_empty(env::var("ANTHROPIC_API_KEY").ok()),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.openai_api_key.is_some() || self.anthropic_api_key.is_some()
    }
}

/// Server knobs, resolved once before the listener starts.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub database_path: Option<PathBuf>,
    pub image_dir: PathBuf,
    pub chinese_image_dir: PathBuf,
    pub advisor: AdvisorConfig,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        ServerConfig {
            port: parse_port(env::var("ACUPRESSURE_PORT").ok()),
            database_path: non_empty(env::var("ACUPRESSURE_DB").ok()).map(PathBuf::from),
            image_dir: non_empty(env::var("ACUPRESSURE_IMAGE_DIR").ok())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_IMAGE_DIR)),
            chinese_image_dir: non_empty(env::var("ACUPRESSURE_CHINESE_IMAGE_DIR").ok())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CHINESE_IMAGE_DIR)),
            advisor: AdvisorConfig::from_env(),
        }
    }
}

/// Pick the symptom database source: explicit path, then the conventional
/// file, then the compiled-in copy. An explicit path is loaded once up front
/// so a broken path fails here, not on the first query; a missing
/// conventional file just falls through to the bundled copy.
pub fn resolve_database(explicit: Option<&Path>) -> Result<DatabaseSource> {
    if let Some(path) = explicit {
        SymptomDb::load(path)?;
        return Ok(DatabaseSource::File(path.to_path_buf()));
    }
    let conventional = Path::new(DEFAULT_DB_PATH);
    if conventional.exists() {
        return Ok(DatabaseSource::File(conventional.to_path_buf()));
    }
    Ok(DatabaseSource::Bundled)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_port(raw: Option<String>) -> u16 {
    raw.and_then(|v| v.trim().parse().ok()).unwrap_or(DEFAULT_PORT)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_non_empty_filters_blank_values() {
        assert_eq!(non_empty(None), None);
        assert_eq!(non_empty(Some("".to_string())), None);
        assert_eq!(non_empty(Some("   ".to_string())), None);
        assert_eq!(non_empty(Some("sk-123".to_string())), Some("sk-123".to_string()));
    }

    #[test]
    fn test_parse_port_falls_back_on_garbage() {
        assert_eq!(parse_port(None), DEFAULT_PORT);
        assert_eq!(parse_port(Some("not-a-port".to_string())), DEFAULT_PORT);
        assert_eq!(parse_port(Some("9090".to_string())), 9090);
        assert_eq!(parse_port(Some(" 3000 ".to_string())), 3000);
    }

    #[test]
    fn test_advisor_config_detects_keys() {
        let none = AdvisorConfig::default();
        assert!(!none.is_configured());

        let with_key = AdvisorConfig {
            openai_api_key: Some("sk-123".to_string()),
            anthropic_api_key: None,
        };
        assert!(with_key.is_configured());
    }

    #[test]
    fn test_resolve_database_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"symptoms": []}}"#).unwrap();

        let source = resolve_database(Some(file.path())).unwrap();
        assert!(matches!(source, DatabaseSource::File(_)));
        assert!(source.load().unwrap().is_empty());
    }

    #[test]
    fn test_resolve_database_explicit_missing_path_errors() {
        assert!(resolve_database(Some(Path::new("/no/such/db.json"))).is_err());
    }

    #[test]
    fn test_resolve_database_default_always_loads() {
        // Either the conventional file or the bundled copy
        let source = resolve_database(None).unwrap();
        assert!(!source.load().unwrap().is_empty());
    }
}
