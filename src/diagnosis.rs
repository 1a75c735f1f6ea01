// 🧭 Diagnosis Engine - Symptom query → enriched acupoint recommendations
//
// Ties the three data layers together:
//   symptom DB (what to press) + catalog (where it is) + images (what it
//   looks like)
//
// Every outcome is data. A missed symptom is a structured miss with the
// full symptom list attached; a point the catalog lacks degrades to a
// reduced record with a single search link. Nothing here returns an error
// for "not found".

use anyhow::Result;
use serde::Serialize;
use std::path::Path;

use crate::catalog::{AcupointCatalog, AcupointRecord};
use crate::images::{self, ImageSource};
use crate::normalize;
use crate::symptoms::{DatabaseSource, SymptomDb, SymptomPoint};

// ============================================================================
// RESOLVED POINTS
// ============================================================================

/// A recommended point the catalog knows in full: database hint fields plus
/// catalog location text plus the synthesized image sources.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EnrichedPoint {
    pub code: String,
    pub name: String,
    pub chinese_name: String,
    pub meridian: String,
    pub basic_hint: String,
    pub notes: String,
    pub standard_location: String,
    pub standard_location_en: String,
    pub simple_method: String,
    pub simple_method_en: String,
    pub anatomical: String,
    pub caution: String,
    pub image_sources: Vec<ImageSource>,
}

/// A recommended point the catalog does not carry. Keeps the database's own
/// fields and exactly one fallback search link, so the caller still has
/// something to show.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ReducedPoint {
    pub code: String,
    pub name: String,
    pub meridian: String,
    pub basic_hint: String,
    pub notes: String,
    pub image_sources: Vec<ImageSource>,
}

/// Either resolution, serialized without a tag so the wire shape is just
/// the fields of whichever variant applied.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum ResolvedPoint {
    Enriched(EnrichedPoint),
    Reduced(ReducedPoint),
}

impl ResolvedPoint {
    pub fn code(&self) -> &str {
        match self {
            ResolvedPoint::Enriched(p) => &p.code,
            ResolvedPoint::Reduced(p) => &p.code,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            ResolvedPoint::Enriched(p) => &p.name,
            ResolvedPoint::Reduced(p) => &p.name,
        }
    }

    pub fn meridian(&self) -> &str {
        match self {
            ResolvedPoint::Enriched(p) => &p.meridian,
            ResolvedPoint::Reduced(p) => &p.meridian,
        }
    }

    pub fn basic_hint(&self) -> &str {
        match self {
            ResolvedPoint::Enriched(p) => &p.basic_hint,
            ResolvedPoint::Reduced(p) => &p.basic_hint,
        }
    }

    pub fn notes(&self) -> &str {
        match self {
            ResolvedPoint::Enriched(p) => &p.notes,
            ResolvedPoint::Reduced(p) => &p.notes,
        }
    }

    pub fn chinese_name(&self) -> Option<&str> {
        match self {
            ResolvedPoint::Enriched(p) => Some(&p.chinese_name),
            ResolvedPoint::Reduced(_) => None,
        }
    }

    pub fn image_sources(&self) -> &[ImageSource] {
        match self {
            ResolvedPoint::Enriched(p) => &p.image_sources,
            ResolvedPoint::Reduced(p) => &p.image_sources,
        }
    }

    pub fn is_enriched(&self) -> bool {
        matches!(self, ResolvedPoint::Enriched(_))
    }
}

// ============================================================================
// DIAGNOSIS OUTCOMES
// ============================================================================

/// Successful diagnosis: the matched entry with every point resolved.
#[derive(Debug, Clone, Serialize)]
pub struct DiagnosisReport {
    pub success: bool,
    pub symptom: String,
    pub sources: Vec<String>,
    pub acupoints: Vec<ResolvedPoint>,
    pub disclaimer: String,
}

/// No entry matched. Carries the full symptom list so callers can show
/// what IS available.
#[derive(Debug, Clone, Serialize)]
pub struct DiagnosisMiss {
    pub success: bool,
    pub error: String,
    pub available_symptoms: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum DiagnosisOutcome {
    Match(DiagnosisReport),
    NoMatch(DiagnosisMiss),
}

impl DiagnosisOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, DiagnosisOutcome::Match(_))
    }

    pub fn report(&self) -> Option<&DiagnosisReport> {
        match self {
            DiagnosisOutcome::Match(report) => Some(report),
            DiagnosisOutcome::NoMatch(_) => None,
        }
    }
}

/// Catalog record plus its synthesized image sources, as one flat object.
#[derive(Debug, Clone, Serialize)]
pub struct LocatedPoint {
    #[serde(flatten)]
    pub record: &'static AcupointRecord,
    pub image_sources: Vec<ImageSource>,
}

// ============================================================================
// ENGINE
// ============================================================================

/// The resolution engine. Holds the static catalog and a database source;
/// the symptom file is re-read on every query, so external edits to it are
/// picked up without a restart.
#[derive(Debug, Clone)]
pub struct DiagnosisEngine {
    catalog: AcupointCatalog,
    source: DatabaseSource,
}

impl DiagnosisEngine {
    /// Engine over a fixed in-memory database.
    pub fn new(db: SymptomDb) -> Self {
        Self::with_source(DatabaseSource::Fixed(db))
    }

    /// Engine over the compiled-in database.
    pub fn bundled() -> Self {
        Self::with_source(DatabaseSource::Bundled)
    }

    /// Engine over a database file, re-read per query.
    pub fn from_file(path: impl AsRef<Path>) -> Self {
        Self::with_source(DatabaseSource::File(path.as_ref().to_path_buf()))
    }

    pub fn with_source(source: DatabaseSource) -> Self {
        DiagnosisEngine {
            catalog: AcupointCatalog::new(),
            source,
        }
    }

    /// A fresh read of the symptom database.
    pub fn load_db(&self) -> Result<SymptomDb> {
        self.source.load()
    }

    pub fn catalog(&self) -> &AcupointCatalog {
        &self.catalog
    }

    /// Full record plus image sources for one point code, if the catalog
    /// knows it. Codes are normalized first, so "li4", "Auricular Shenmen",
    /// and the alias "LR3" all resolve.
    pub fn locate(&self, code: &str) -> Option<LocatedPoint> {
        let key = normalize::canonical_key(code);
        self.catalog.lookup(&key).map(|record| LocatedPoint {
            record,
            image_sources: images::synthesize(record),
        })
    }

    /// Match a symptom query and resolve every recommended point. Reads the
    /// database fresh; `Err` only for a database that cannot be read, never
    /// for a query that does not match.
    pub fn diagnose(&self, query: &str) -> Result<DiagnosisOutcome> {
        let db = self.load_db()?;
        Ok(self.diagnose_in(&db, query))
    }

    fn diagnose_in(&self, db: &SymptomDb, query: &str) -> DiagnosisOutcome {
        match db.find(query) {
            Some(entry) => DiagnosisOutcome::Match(DiagnosisReport {
                success: true,
                symptom: entry.symptom.clone(),
                sources: entry.sources.clone(),
                acupoints: entry
                    .points
                    .iter()
                    .map(|point| self.resolve_point(point))
                    .collect(),
                disclaimer: db.disclaimer.clone(),
            }),
            None => DiagnosisOutcome::NoMatch(DiagnosisMiss {
                success: false,
                error: format!("No matching symptom found for: {}", query),
                available_symptoms: db.symptom_names(),
            }),
        }
    }

    /// Resolve one database point against the catalog.
    ///
    /// Catalog hit → enriched (database fields win for meridian and code
    /// spelling; catalog supplies the location text and images). Miss →
    /// reduced, with exactly one fallback search link.
    pub fn resolve_point(&self, point: &SymptomPoint) -> ResolvedPoint {
        let key = normalize::canonical_key(&point.code);
        match self.catalog.lookup(&key) {
            Some(record) => ResolvedPoint::Enriched(EnrichedPoint {
                code: point.code.clone(),
                name: point.name.clone(),
                chinese_name: record.chinese_name.to_string(),
                meridian: point.meridian.clone(),
                basic_hint: point.location_hint.clone(),
                notes: point.notes.clone(),
                standard_location: record.standard_location.to_string(),
                standard_location_en: record.standard_location_en.to_string(),
                simple_method: record.simple_method.to_string(),
                simple_method_en: record.simple_method_en.to_string(),
                anatomical: record.anatomical.to_string(),
                caution: record.caution.unwrap_or_default().to_string(),
                image_sources: images::synthesize(record),
            }),
            None => ResolvedPoint::Reduced(ReducedPoint {
                code: point.code.clone(),
                name: point.name.clone(),
                meridian: point.meridian.clone(),
                basic_hint: point.location_hint.clone(),
                notes: point.notes.clone(),
                image_sources: vec![images::fallback_source(&point.code, &point.name)],
            }),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
