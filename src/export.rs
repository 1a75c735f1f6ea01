// 📦 Static Site Exporter - The whole API as flat files
//
// Writes a docs/ tree that static hosting can serve as-is: the listing
// endpoints, one detail file per point, one pre-computed diagnosis per
// symptom, image indexes plus the image files themselves, the plugin
// manifest pair, and the landing page.
//
// Output is deterministic for a given database and archive, so regenerating
// over an up-to-date tree is a no-op diff.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::json;

use crate::archive::{self, ImageArchive};
use crate::diagnosis::DiagnosisEngine;
use crate::normalize;
use crate::symptoms::SymptomDb;

/// Landing page for the exported site.
pub const INDEX_HTML: &str = include_str!("../web/index.html");

// ============================================================================
// KEYWORD MAPPING (static chat)
// ============================================================================

// Trigger word → diagnose file slug, for clients that can only fetch
// static JSON. A trimmed-down sibling of the live chat keyword table.
static KEYWORD_TO_SLUG: &[(&str, &str)] = &[
    ("headache", "headache"),
    ("头痛", "headache"),
    ("头疼", "headache"),
    ("migraine", "headache"),
    ("偏头痛", "headache"),
    ("neck", "neck"),
    ("颈", "neck"),
    ("脖子", "neck"),
    ("shoulder", "neck"),
    ("肩", "neck"),
    ("back", "low_back_pain"),
    ("腰", "low_back_pain"),
    ("背", "low_back_pain"),
    ("sciatica", "low_back_pain"),
    ("坐骨", "low_back_pain"),
    ("anxiety", "anxiety"),
    ("焦虑", "anxiety"),
    ("紧张", "anxiety"),
    ("stress", "anxiety"),
    ("压力", "anxiety"),
    ("insomnia", "insomnia"),
    ("失眠", "insomnia"),
    ("睡不着", "insomnia"),
    ("sleep", "insomnia"),
    ("nausea", "nausea"),
    ("恶心", "nausea"),
    ("呕吐", "nausea"),
    ("晕车", "nausea"),
    ("vomit", "nausea"),
];

/// OpenAPI description served live and written into the static site.
pub const OPENAPI_SPEC: &str = r#"openapi: 3.0.1
info:
  title: 穴位诊断助手 API (Static)
  description: 根据症状推荐穴位按摩方案，提供穴位位置图片 (静态托管版本)
  version: 1.0.0
servers:
  - url: https://YOUR_USERNAME.github.io/YOUR_REPO
paths:
  /api/symptoms.json:
    get:
      operationId: listSymptoms
      summary: 获取所有支持的症状列表
      responses:
        "200":
          description: 症状列表

  /api/acupoints.json:
    get:
      operationId: listAcupoints
      summary: 获取所有穴位列表
      responses:
        "200":
          description: 穴位列表

  /api/diagnose/{symptom}.json:
    get:
      operationId: diagnoseSymptom
      summary: 根据症状获取穴位推荐
      parameters:
        - name: symptom
          in: path
          required: true
          schema:
            type: string
          description: 症状关键词 (headache, insomnia, anxiety, neck, low_back_pain, nausea)
      responses:
        "200":
          description: 穴位推荐结果

  /api/images/{code}.json:
    get:
      operationId: getAcupointImages
      summary: 获取穴位图片列表
      parameters:
        - name: code
          in: path
          required: true
          schema:
            type: string
          description: 穴位代码 (如 LI4, GB20, SP6)
      responses:
        "200":
          description: 图片URL列表
"#;

// ============================================================================
// EXPORT
// ============================================================================

/// What one export run produced.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct ExportSummary {
    pub symptoms: usize,
    pub acupoints: usize,
    pub diagnose_files: usize,
    pub image_indexes: usize,
    pub images_copied: usize,
}

// Lighter per-point row used in the pre-computed diagnosis files; static
// clients fetch location detail from the acupoint files instead.
#[derive(Debug, Serialize)]
struct StaticDiagnosePoint {
    code: String,
    name: String,
    chinese_name: String,
    location_hint: String,
    notes: String,
}

/// Write the complete static site under `output_dir`. The symptom database
/// is read once at the start of the run.
pub fn generate_site(
    engine: &DiagnosisEngine,
    image_archive: &ImageArchive,
    output_dir: &Path,
) -> Result<ExportSummary> {
    let db = engine.load_db()?;

    let api_dir = output_dir.join("api");
    for dir in [
        api_dir.join("acupoint"),
        api_dir.join("images"),
        api_dir.join("diagnose"),
        output_dir.join("images"),
        output_dir.join(".well-known"),
    ] {
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
    }

    let mut summary = ExportSummary::default();

    write_symptoms(&db, &api_dir, &mut summary)?;
    write_acupoints(engine, &api_dir, &mut summary)?;
    write_acupoint_details(engine, &api_dir)?;
    write_diagnose_files(engine, &db, &api_dir, &mut summary)?;
    copy_images(image_archive, output_dir, &api_dir, &mut summary)?;
    write_keyword_mapping(&api_dir)?;
    write_plugin_files(output_dir)?;
    fs::write(output_dir.join("index.html"), INDEX_HTML)
        .context("Failed to write index.html")?;

    Ok(summary)
}

fn write_symptoms(db: &SymptomDb, api_dir: &Path, summary: &mut ExportSummary) -> Result<()> {
    let symptoms = db.symptom_names();
    summary.symptoms = symptoms.len();
    write_json(
        &api_dir.join("symptoms.json"),
        &json!({"count": symptoms.len(), "symptoms": symptoms}),
    )
}

fn write_acupoints(engine: &DiagnosisEngine, api_dir: &Path, summary: &mut ExportSummary) -> Result<()> {
    let acupoints = engine.catalog().summaries();
    summary.acupoints = acupoints.len();
    write_json(
        &api_dir.join("acupoints.json"),
        &json!({"count": acupoints.len(), "acupoints": acupoints}),
    )
}

fn write_acupoint_details(engine: &DiagnosisEngine, api_dir: &Path) -> Result<()> {
    for (key, record) in engine.catalog().records() {
        write_json(
            &api_dir.join("acupoint").join(format!("{}.json", key)),
            &json!({"success": true, "acupoint": record}),
        )?;
    }
    Ok(())
}

fn write_diagnose_files(
    engine: &DiagnosisEngine,
    db: &SymptomDb,
    api_dir: &Path,
    summary: &mut ExportSummary,
) -> Result<()> {
    for entry in &db.symptoms {
        let acupoints: Vec<StaticDiagnosePoint> = entry
            .points
            .iter()
            .map(|point| {
                // Canonical codes here so the page can fetch matching
                // acupoint and image files
                let key = normalize::canonical_key(&point.code);
                let chinese_name = engine
                    .catalog()
                    .lookup(&key)
                    .map(|record| record.chinese_name.to_string())
                    .unwrap_or_default();
                StaticDiagnosePoint {
                    code: key,
                    name: point.name.clone(),
                    chinese_name,
                    location_hint: point.location_hint.clone(),
                    notes: point.notes.clone(),
                }
            })
            .collect();

        write_json(
            &api_dir.join("diagnose").join(format!("{}.json", entry.slug())),
            &json!({
                "success": true,
                "symptom": entry.symptom,
                "acupoints": acupoints,
                "disclaimer": db.disclaimer,
            }),
        )?;
        summary.diagnose_files += 1;
    }
    Ok(())
}

fn copy_images(
    image_archive: &ImageArchive,
    output_dir: &Path,
    api_dir: &Path,
    summary: &mut ExportSummary,
) -> Result<()> {
    fs::create_dir_all(output_dir.join("images/chinese"))
        .context("Failed to create images/chinese")?;

    let scraped_codes = image_archive.scraped_codes();
    for code in &scraped_codes {
        for file in image_archive.scraped_files(code) {
            let dest = output_dir.join(file.web_path.trim_start_matches('/'));
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            fs::copy(&file.path, &dest)
                .with_context(|| format!("Failed to copy {}", file.path.display()))?;
            summary.images_copied += 1;
        }
    }

    for file in image_archive.chinese_files() {
        let dest = output_dir.join(file.web_path.trim_start_matches('/'));
        fs::copy(&file.path, &dest)
            .with_context(|| format!("Failed to copy {}", file.path.display()))?;
        summary.images_copied += 1;
    }

    // One index per code with a scraped directory or a name mapping
    let mut index_codes: Vec<String> = scraped_codes;
    for code in archive::mapped_codes() {
        if !index_codes.iter().any(|c| c == code) {
            index_codes.push(code.to_string());
        }
    }
    for code in &index_codes {
        let index = image_archive.list(code);
        write_json(&api_dir.join("images").join(format!("{}.json", index.code)), &index)?;
        summary.image_indexes += 1;
    }
    Ok(())
}

fn write_keyword_mapping(api_dir: &Path) -> Result<()> {
    let mapping: serde_json::Map<String, serde_json::Value> = KEYWORD_TO_SLUG
        .iter()
        .map(|(keyword, slug)| ((*keyword).to_string(), json!(slug)))
        .collect();
    write_json(&api_dir.join("keyword_mapping.json"), &mapping)
}

/// AI plugin manifest, shared by the live server and the static export.
pub fn plugin_manifest() -> serde_json::Value {
    json!({
        "schema_version": "v1",
        "name_for_human": "穴位诊断助手",
        "name_for_model": "acupressure_diagnosis",
        "description_for_human": "输入症状，获取穴位按摩建议和位置图片。",
        "description_for_model": "This plugin helps users find acupressure points based on symptoms. When a user describes pain or discomfort, use this plugin to get recommended acupoints with location images. Endpoints: /api/symptoms.json for symptom list, /api/diagnose/{symptom}.json for diagnosis, /api/images/{code}.json for acupoint images.",
        "auth": {"type": "none"},
        "api": {
            "type": "openapi",
            "url": "https://YOUR_USERNAME.github.io/YOUR_REPO/openapi.yaml"
        },
        "logo_url": "https://YOUR_USERNAME.github.io/YOUR_REPO/logo.png",
        "contact_email": "your@email.com",
        "legal_info_url": "https://YOUR_USERNAME.github.io/YOUR_REPO/"
    })
}

fn write_plugin_files(output_dir: &Path) -> Result<()> {
    write_json(&output_dir.join(".well-known/ai-plugin.json"), &plugin_manifest())?;

    fs::write(output_dir.join("openapi.yaml"), OPENAPI_SPEC)
        .context("Failed to write openapi.yaml")
}

fn write_json(path: &Path, value: &impl Serialize) -> Result<()> {
    let pretty = serde_json::to_string_pretty(value)
        .with_context(|| format!("Failed to serialize {}", path.display()))?;
    fs::write(path, pretty).with_context(|| format!("Failed to write {}", path.display()))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use std::fs;

    fn read_json(path: &Path) -> Value {
        let content = fs::read_to_string(path).unwrap_or_else(|_| panic!("missing {:?}", path));
        serde_json::from_str(&content).unwrap()
    }

    fn export_fixture() -> (tempfile::TempDir, ExportSummary) {
        let dir = tempfile::tempdir().unwrap();
        let scraped = dir.path().join("scraped");
        let chinese = dir.path().join("chinese");
        fs::create_dir_all(scraped.join("LI4")).unwrap();
        fs::write(scraped.join("LI4/hand.jpg"), b"img").unwrap();
        fs::create_dir_all(&chinese).unwrap();
        fs::write(chinese.join("合谷穴1.jpg"), b"img").unwrap();

        let engine = DiagnosisEngine::bundled();
        let image_archive = ImageArchive::new(&scraped, &chinese);
        let out = dir.path().join("docs");
        let summary = generate_site(&engine, &image_archive, &out).unwrap();
        (dir, summary)
    }

    #[test]
    fn test_listing_files() {
        let (dir, summary) = export_fixture();
        let out = dir.path().join("docs");

        let symptoms = read_json(&out.join("api/symptoms.json"));
        assert_eq!(symptoms["count"], 9);
        assert_eq!(summary.symptoms, 9);

        let acupoints = read_json(&out.join("api/acupoints.json"));
        assert_eq!(acupoints["count"], 21);
        assert_eq!(acupoints["acupoints"][0]["code"], "GB30");
    }

    #[test]
    fn test_acupoint_detail_files() {
        let (dir, _) = export_fixture();
        let out = dir.path().join("docs");

        let li4 = read_json(&out.join("api/acupoint/LI4.json"));
        assert_eq!(li4["success"], true);
        assert_eq!(li4["acupoint"]["chinese_name"], "合谷");

        // File name uses the catalog key, content keeps the display code
        let ear = read_json(&out.join("api/acupoint/AURICULAR_SHENMEN.json"));
        assert_eq!(ear["acupoint"]["code"], "Auricular Shenmen");
    }

    #[test]
    fn test_diagnose_files_use_canonical_codes_and_light_shape() {
        let (dir, summary) = export_fixture();
        let out = dir.path().join("docs");
        assert_eq!(summary.diagnose_files, 9);

        let headache = read_json(&out.join("api/diagnose/headache.json"));
        assert_eq!(headache["success"], true);
        assert_eq!(headache["acupoints"][0]["code"], "LI4");
        assert_eq!(headache["acupoints"][0]["chinese_name"], "合谷");
        assert!(headache["acupoints"][0].get("standard_location").is_none());
        assert!(headache["disclaimer"].as_str().unwrap().contains("educational"));

        // The ear point's spaced label becomes its file-safe key
        let insomnia = read_json(&out.join("api/diagnose/insomnia.json"));
        let codes: Vec<&str> = insomnia["acupoints"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["code"].as_str().unwrap())
            .collect();
        assert!(codes.contains(&"AURICULAR_SHENMEN"));
    }

    #[test]
    fn test_images_copied_and_indexed() {
        let (dir, summary) = export_fixture();
        let out = dir.path().join("docs");

        assert!(out.join("images/LI4/hand.jpg").is_file());
        assert!(out.join("images/chinese/合谷穴1.jpg").is_file());
        assert_eq!(summary.images_copied, 2);

        let li4 = read_json(&out.join("api/images/LI4.json"));
        assert_eq!(li4["count"], 2);

        // Mapped codes with no files still get an empty index
        let gv20 = read_json(&out.join("api/images/GV20.json"));
        assert_eq!(gv20["count"], 0);
        assert!(summary.image_indexes >= archive::mapped_codes().len());
    }

    #[test]
    fn test_keyword_mapping_and_plugin_files() {
        let (dir, _) = export_fixture();
        let out = dir.path().join("docs");

        let mapping = read_json(&out.join("api/keyword_mapping.json"));
        assert_eq!(mapping["头痛"], "headache");
        assert_eq!(mapping["sciatica"], "low_back_pain");

        let manifest = read_json(&out.join(".well-known/ai-plugin.json"));
        assert_eq!(manifest["name_for_model"], "acupressure_diagnosis");
        assert_eq!(manifest["auth"]["type"], "none");

        let spec = fs::read_to_string(out.join("openapi.yaml")).unwrap();
        assert!(spec.starts_with("openapi: 3.0.1"));

        let html = fs::read_to_string(out.join("index.html")).unwrap();
        assert!(html.contains("穴位诊断助手"));
        assert!(html.contains("api/diagnose/${symptom}.json"));
    }

    #[test]
    fn test_export_is_deterministic() {
        let engine = DiagnosisEngine::bundled();
        let image_archive = ImageArchive::new("/no/such", "/no/such/either");

        let dir = tempfile::tempdir().unwrap();
        let out_a = dir.path().join("a");
        let out_b = dir.path().join("b");
        generate_site(&engine, &image_archive, &out_a).unwrap();
        generate_site(&engine, &image_archive, &out_b).unwrap();

        let a = fs::read_to_string(out_a.join("api/diagnose/headache.json")).unwrap();
        let b = fs::read_to_string(out_b.join("api/diagnose/headache.json")).unwrap();
        assert_eq!(a, b);
    }
}
