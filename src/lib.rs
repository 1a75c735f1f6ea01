// Acupressure Diagnosis System - Core Library
// Exposes all modules for use in CLI, API server, and tests

pub mod catalog;    // Static acupoint reference table
pub mod images;     // Image source URL synthesis
pub mod normalize;  // Point code normalization + aliases
pub mod symptoms;   // Symptom → acupoint database
pub mod diagnosis;  // Resolution engine
pub mod advisor;    // Optional LLM advisor capability
pub mod chat;       // Natural-language diagnosis
pub mod archive;    // Local image archives
pub mod export;     // Static site generation
pub mod config;     // Environment configuration

// Re-export commonly used types
pub use catalog::{AcupointCatalog, AcupointRecord, AcupointSummary};
pub use images::{fallback_source, synthesize, ImageSource, ImageSourceTemplate};
pub use normalize::canonical_key;
pub use symptoms::{DatabaseSource, SymptomDb, SymptomEntry, SymptomPoint};
pub use diagnosis::{
    DiagnosisEngine, DiagnosisMiss, DiagnosisOutcome, DiagnosisReport, EnrichedPoint,
    LocatedPoint, ReducedPoint, ResolvedPoint,
};
pub use advisor::{NoAdvisor, RecommendedPoint, SymptomAdvisor};
pub use chat::{ChatOutcome, NO_MATCH_MESSAGE};
pub use archive::{ImageArchive, ImageIndex};
pub use export::{generate_site, ExportSummary};
pub use config::{AdvisorConfig, ServerConfig};

#[cfg(feature = "server")]
pub use advisor::HttpAdvisor;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
