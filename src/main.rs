// CLI for the acupressure diagnosis system
// locate <CODE> | diagnose <SYMPTOM> | symptoms | export [DIR]

use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::path::PathBuf;

use acupressure_diagnosis::{
    config, export, normalize, DiagnosisEngine, DiagnosisOutcome, ImageArchive, LocatedPoint,
    ResolvedPoint, VERSION,
};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    match args.get(1).map(String::as_str) {
        Some("locate") => run_locate(args.get(2).map(String::as_str))?,
        Some("diagnose") => run_diagnose(args.get(2).map(String::as_str))?,
        Some("symptoms") => run_symptoms()?,
        Some("export") => run_export(args.get(2).map(String::as_str))?,
        _ => print_usage(),
    }

    Ok(())
}

fn print_usage() {
    println!("🎯 Acupressure Diagnosis System v{}", VERSION);
    println!();
    println!("Usage:");
    println!("  acupressure-diagnosis locate <CODE>        Point details + image links");
    println!("  acupressure-diagnosis diagnose <SYMPTOM>   Recommended points for a symptom");
    println!("  acupressure-diagnosis diagnose --list      List all symptoms");
    println!("  acupressure-diagnosis symptoms             List all symptoms");
    println!("  acupressure-diagnosis export [DIR]         Generate the static site (default: docs)");
    println!();
    println!("Examples:");
    println!("  acupressure-diagnosis locate GB30");
    println!("  acupressure-diagnosis diagnose \"low back pain\"");
    println!("  acupressure-diagnosis diagnose nausea");
}

fn engine() -> Result<DiagnosisEngine> {
    Ok(DiagnosisEngine::with_source(config::resolve_database(
        None,
    )?))
}

// ============================================================================
// LOCATE
// ============================================================================

fn run_locate(code: Option<&str>) -> Result<()> {
    let Some(code) = code else {
        print_usage();
        return Ok(());
    };

    let engine = engine()?;
    match engine.locate(code) {
        Some(located) => {
            print_located(&located);

            let key = normalize::canonical_key(code);
            let output_file = format!("acupoint_{}_info.json", key);
            let json = serde_json::to_string_pretty(&located)?;
            fs::write(&output_file, json)
                .with_context(|| format!("Failed to write {}", output_file))?;
            println!("\n✅ JSON saved to: {}", output_file);
        }
        None => {
            println!("❌ Acupoint '{}' not found in database.", code);
            println!("Available: {}", engine.catalog().codes().join(", "));
        }
    }
    Ok(())
}

fn print_located(located: &LocatedPoint) {
    let record = located.record;
    println!("\n{}", "=".repeat(60));
    println!(
        "穴位: {} - {} ({})",
        record.code, record.chinese_name, record.english_name
    );
    println!("经络: {} ({})", record.meridian_chinese, record.meridian);
    println!("{}", "=".repeat(60));

    println!("\n📍 标准定位:");
    println!("   {}", record.standard_location);
    println!("   {}", record.standard_location_en);

    println!("\n👆 简便取穴法:");
    println!("   {}", record.simple_method);
    println!("   {}", record.simple_method_en);

    println!("\n🔬 解剖位置:");
    println!("   {}", record.anatomical);

    println!("\n💊 主治 (Indications):");
    for indication in record.indications {
        println!("   • {}", indication);
    }

    println!("\n⚡ 功效 (Functions):");
    for function in record.functions {
        println!("   • {}", function);
    }

    if let Some(caution) = record.caution {
        println!("\n⚠️  注意: {}", caution);
    }

    println!("\n🖼️ 图片资源 (Image Sources):");
    for (i, source) in located.image_sources.iter().enumerate() {
        println!("   {}. [{}] ({})", i + 1, source.name, source.source_type);
        println!("      {}", source.url);
    }
}

// ============================================================================
// DIAGNOSE
// ============================================================================

fn run_diagnose(query: Option<&str>) -> Result<()> {
    let Some(query) = query else {
        print_usage();
        return Ok(());
    };

    if query == "--list" {
        return run_symptoms();
    }

    let engine = engine()?;
    let outcome = engine.diagnose(query)?;
    print_diagnosis(&outcome);

    if outcome.is_success() {
        let output_file = format!(
            "diagnosis_{}.json",
            query.replace(' ', "_").replace('/', "_")
        );
        let json = serde_json::to_string_pretty(&outcome)?;
        fs::write(&output_file, json)
            .with_context(|| format!("Failed to write {}", output_file))?;
        println!("✅ JSON saved to: {}", output_file);
    }
    Ok(())
}

fn print_diagnosis(outcome: &DiagnosisOutcome) {
    let report = match outcome {
        DiagnosisOutcome::Match(report) => report,
        DiagnosisOutcome::NoMatch(miss) => {
            println!("\n❌ {}\n", miss.error);
            println!("Available symptoms:");
            for symptom in &miss.available_symptoms {
                println!("  • {}", symptom);
            }
            return;
        }
    };

    println!("\n{}", "=".repeat(70));
    println!("🩺 症状诊断: {}", report.symptom);
    println!("{}", "=".repeat(70));

    for (i, point) in report.acupoints.iter().enumerate() {
        println!("\n{}", "─".repeat(70));
        println!(
            "【穴位 {}】{} - {} ({})",
            i + 1,
            point.code(),
            point.chinese_name().unwrap_or(""),
            point.name()
        );
        println!("经络: {}", point.meridian());

        match point {
            ResolvedPoint::Enriched(p) => {
                if !p.caution.is_empty() {
                    println!("⚠️  注意: {}", p.caution);
                }
                println!("\n📍 定位:");
                println!("   标准: {}", p.standard_location);
                println!("   EN: {}", p.standard_location_en);
                println!("\n👆 简便取穴:");
                println!("   {}", p.simple_method);
                println!("   {}", p.simple_method_en);
            }
            ResolvedPoint::Reduced(p) => {
                println!("\n👆 简便取穴:");
                println!("   {}", p.basic_hint);
            }
        }

        if !point.notes().is_empty() {
            println!("\n💡 提示: {}", point.notes());
        }

        println!("\n🖼️ 图片资源 (点击查看位置):");
        for (j, source) in point.image_sources().iter().take(5).enumerate() {
            println!("   {}. [{}] {}", j + 1, source.name, source.url);
        }
    }

    println!("\n{}", "=".repeat(70));
    println!("⚠️  {}", report.disclaimer);
    println!("{}\n", "=".repeat(70));
}

// ============================================================================
// SYMPTOMS
// ============================================================================

fn run_symptoms() -> Result<()> {
    let db = config::resolve_database(None)?.load()?;
    println!("\n📋 可查询症状列表:\n");
    for (i, symptom) in db.symptom_names().iter().enumerate() {
        println!("  {}. {}", i + 1, symptom);
    }
    Ok(())
}

// ============================================================================
// EXPORT
// ============================================================================

fn run_export(output_dir: Option<&str>) -> Result<()> {
    let output_dir = PathBuf::from(output_dir.unwrap_or("docs"));

    println!("{}", "=".repeat(50));
    println!("生成静态网站文件...");
    println!("{}", "=".repeat(50));

    let server_config = config::ServerConfig::from_env();
    let engine = DiagnosisEngine::with_source(config::resolve_database(
        server_config.database_path.as_deref(),
    )?);
    let image_archive = ImageArchive::new(
        server_config.image_dir.clone(),
        server_config.chinese_image_dir.clone(),
    );

    let summary = export::generate_site(&engine, &image_archive, &output_dir)?;

    println!("✓ Generated symptoms.json ({} symptoms)", summary.symptoms);
    println!("✓ Generated acupoints.json ({} acupoints)", summary.acupoints);
    println!("✓ Generated {} acupoint detail files", summary.acupoints);
    println!("✓ Generated {} diagnose files", summary.diagnose_files);
    println!(
        "✓ Copied {} images, wrote {} image indexes",
        summary.images_copied, summary.image_indexes
    );
    println!("✓ Generated keyword_mapping.json");
    println!("✓ Generated plugin files (ai-plugin.json, openapi.yaml)");
    println!("✓ Generated index.html");

    println!("{}", "=".repeat(50));
    println!("✅ 完成！静态文件已生成到 {}/ 目录", output_dir.display());
    println!();
    println!("下一步：");
    println!("1. 创建 GitHub 仓库");
    println!("2. 推送代码");
    println!("3. 在 Settings > Pages 启用 GitHub Pages (选择 docs/ 目录)");
    println!("4. 修改 docs/.well-known/ai-plugin.json 和 docs/openapi.yaml 中的域名");
    println!("{}", "=".repeat(50));

    Ok(())
}
