// 🖼️ Image URL Synthesizer - Deterministic reference links for acupoints
//
// No scraping, no HTTP: every "image source" is a URL synthesized from a
// template and the point's own attributes. Ten curated source sites, in
// priority order. A template whose placeholder cannot be filled for a given
// record is skipped; the rest still emit.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::catalog::AcupointRecord;

// ============================================================================
// TYPES
// ============================================================================

/// A curated source site and the URL shape it expects.
///
/// `capability` names what the site offers (meridian chart, 3D model, ...);
/// it is catalog metadata and never serialized into responses.
#[derive(Debug, Clone, Copy)]
pub struct ImageSourceTemplate {
    pub name: &'static str,
    pub url_pattern: &'static str,
    pub source_type: &'static str,
    pub capability: &'static str,
}

/// One synthesized link, as surfaced in API responses and exports.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImageSource {
    pub name: String,
    pub url: String,
    #[serde(rename = "type")]
    pub source_type: String,
}

// ============================================================================
// SOURCE TEMPLATES (priority order)
// ============================================================================

static IMAGE_SOURCES: &[ImageSourceTemplate] = &[
    ImageSourceTemplate {
        name: "Yin Yang House",
        url_pattern: "https://yinyanghouse.com/theory/acupuncturepoints/{code_lower}/",
        source_type: "educational",
        capability: "meridian_chart",
    },
    ImageSourceTemplate {
        name: "Acupuncture.com",
        url_pattern: "https://www.acupuncture.com/education/points/{meridian_lower}/{code_lower}.htm",
        source_type: "educational",
        capability: "point_diagram",
    },
    ImageSourceTemplate {
        name: "MeandQi",
        url_pattern: "https://www.meandqi.com/tcm-education-center/acupuncture/{meridian_lower}-channel/{name_lower}-{code_lower}",
        source_type: "educational",
        capability: "body_map",
    },
    ImageSourceTemplate {
        name: "Sacred Lotus",
        url_pattern: "https://www.sacredlotus.com/go/acupuncture/point/{code_lower}-{pinyin_lower}",
        source_type: "educational",
        capability: "chart",
    },
    ImageSourceTemplate {
        name: "TCM Wiki",
        url_pattern: "https://tcmwiki.com/wiki/{code_lower}",
        source_type: "reference",
        capability: "images",
    },
    ImageSourceTemplate {
        name: "Iaomai App (3D)",
        url_pattern: "https://www.iaomai.app/en/acupuncture-points/{code}-{pinyin_lower}",
        source_type: "3d_visualization",
        capability: "3d_model",
    },
    ImageSourceTemplate {
        name: "百度百科",
        url_pattern: "https://baike.baidu.com/item/{chinese_name}穴",
        source_type: "chinese_reference",
        capability: "images",
    },
    ImageSourceTemplate {
        name: "经络穴位网",
        url_pattern: "http://m.jingluoxuewei.com/search?q={chinese_name}",
        source_type: "chinese_educational",
        capability: "diagrams",
    },
    ImageSourceTemplate {
        name: "ResearchGate (Scientific)",
        url_pattern: "https://www.researchgate.net/search?q={code}+acupoint+location",
        source_type: "scientific",
        capability: "anatomical_diagrams",
    },
    ImageSourceTemplate {
        name: "Google Images",
        url_pattern: "https://www.google.com/search?tbm=isch&q={code}+{english_name}+acupoint+location",
        source_type: "image_search",
        capability: "multiple_images",
    },
];

/// All source templates in priority order.
pub fn templates() -> &'static [ImageSourceTemplate] {
    IMAGE_SOURCES
}

// ============================================================================
// SYNTHESIS
// ============================================================================

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{([a-z_0-9]+)\}").unwrap()
});

/// Placeholder values derived from one record.
///
/// An empty attribute yields no entry, so templates that reference it are
/// skipped rather than expanded into a broken URL.
fn placeholder_params(record: &AcupointRecord) -> Vec<(&'static str, String)> {
    let mut params = Vec::new();
    let mut push = |key: &'static str, value: String| {
        if !value.is_empty() {
            params.push((key, value));
        }
    };

    push("code", record.code.to_string());
    push("code_lower", record.code.to_lowercase());
    push("chinese_name", record.chinese_name.to_string());
    push("english_name", record.english_name.to_string());
    push("name_lower", record.english_name.to_lowercase());
    push("pinyin_lower", record.pinyin.to_lowercase());
    push(
        "meridian_lower",
        record.meridian.to_lowercase().replace(' ', "-"),
    );
    params
}

/// Expand one pattern, or `None` if any placeholder has no value.
fn expand(pattern: &str, params: &[(&'static str, String)]) -> Option<String> {
    let lookup = |name: &str| -> Option<&str> {
        params
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    };

    // Reject before substituting so a gap never emits a partial URL
    for caps in PLACEHOLDER.captures_iter(pattern) {
        if lookup(&caps[1]).is_none() {
            return None;
        }
    }

    let expanded = PLACEHOLDER.replace_all(pattern, |caps: &regex::Captures| {
        lookup(&caps[1]).unwrap_or_default().to_string()
    });
    Some(expanded.into_owned())
}

/// Synthesize the full prioritized source list for a record.
///
/// Pure and deterministic: same record in, same URLs out, template order
/// preserved. Templates with unfillable placeholders are silently dropped.
pub fn synthesize(record: &AcupointRecord) -> Vec<ImageSource> {
    let params = placeholder_params(record);
    IMAGE_SOURCES
        .iter()
        .filter_map(|template| {
            expand(template.url_pattern, &params).map(|url| ImageSource {
                name: template.name.to_string(),
                url,
                source_type: template.source_type.to_string(),
            })
        })
        .collect()
}

/// Single Google Images link for points known only by code and name.
///
/// Used when a symptom entry references a point the catalog does not carry:
/// the caller still gets one usable link instead of nothing.
pub fn fallback_source(code: &str, name: &str) -> ImageSource {
    ImageSource {
        name: "Google Images".to_string(),
        url: format!(
            "https://www.google.com/search?tbm=isch&q={}+{}+acupoint+location",
            code, name
        ),
        source_type: "image_search".to_string(),
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::AcupointCatalog;

    fn test_record() -> AcupointRecord {
        AcupointRecord {
            code: "LI4",
            chinese_name: "合谷",
            english_name: "Hegu",
            pinyin: "hegu",
            meridian: "Large Intestine",
            meridian_chinese: "手阳明大肠经",
            standard_location: "loc",
            standard_location_en: "loc en",
            simple_method: "method",
            simple_method_en: "method en",
            anatomical: "anatomy",
            indications: &["头痛 (headache)"],
            functions: &["通经活络 (unblock meridians)"],
            caution: None,
        }
    }

    #[test]
    fn test_synthesize_emits_all_sources_in_template_order() {
        let sources = synthesize(&test_record());
        assert_eq!(sources.len(), IMAGE_SOURCES.len());
        for (source, template) in sources.iter().zip(IMAGE_SOURCES.iter()) {
            assert_eq!(source.name, template.name);
            assert_eq!(source.source_type, template.source_type);
        }
    }

    #[test]
    fn test_synthesize_is_deterministic() {
        let record = test_record();
        assert_eq!(synthesize(&record), synthesize(&record));
    }

    #[test]
    fn test_placeholder_expansion() {
        let sources = synthesize(&test_record());
        let urls: Vec<&str> = sources.iter().map(|s| s.url.as_str()).collect();

        assert!(urls.contains(&"https://yinyanghouse.com/theory/acupuncturepoints/li4/"));
        // Multi-word meridian becomes hyphenated
        assert!(urls
            .contains(&"https://www.acupuncture.com/education/points/large-intestine/li4.htm"));
        // Chinese names pass through untouched
        assert!(urls.contains(&"https://baike.baidu.com/item/合谷穴"));
        // Raw code keeps its case where the template asks for it
        assert!(urls.contains(&"https://www.iaomai.app/en/acupuncture-points/LI4-hegu"));
    }

    #[test]
    fn test_empty_meridian_skips_only_meridian_templates() {
        let mut record = test_record();
        record.meridian = "";

        let sources = synthesize(&record);
        assert_eq!(sources.len(), IMAGE_SOURCES.len() - 2);
        assert!(sources.iter().all(|s| !s.url.contains("{meridian_lower}")));
        assert!(!sources.iter().any(|s| s.name == "Acupuncture.com"));
        assert!(!sources.iter().any(|s| s.name == "MeandQi"));
        // The rest survive, still in order
        assert_eq!(sources[0].name, "Yin Yang House");
        assert_eq!(sources.last().unwrap().name, "Google Images");
    }

    #[test]
    fn test_every_catalog_record_fills_every_template() {
        let catalog = AcupointCatalog::new();
        for (key, record) in catalog.records() {
            let sources = synthesize(record);
            assert_eq!(
                sources.len(),
                IMAGE_SOURCES.len(),
                "{} dropped a source",
                key
            );
            for source in &sources {
                assert!(!source.url.contains('{'), "unexpanded url: {}", source.url);
            }
        }
    }

    #[test]
    fn test_fallback_source_shape() {
        let fallback = fallback_source("LI20", "Yingxiang");
        assert_eq!(fallback.name, "Google Images");
        assert_eq!(fallback.source_type, "image_search");
        assert_eq!(
            fallback.url,
            "https://www.google.com/search?tbm=isch&q=LI20+Yingxiang+acupoint+location"
        );
    }
}
