// Acupressure Diagnosis System - Web Server
// REST API with Axum: diagnosis, acupoint lookup, chat, and archived images

use acupressure_diagnosis::{
    chat, config::resolve_database, export, AcupointSummary, DiagnosisEngine, HttpAdvisor,
    ImageArchive, ImageIndex, LocatedPoint, ServerConfig, SymptomAdvisor, VERSION,
};
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Shared application state
#[derive(Clone)]
struct AppState {
    engine: Arc<DiagnosisEngine>,
    archive: Arc<ImageArchive>,
    advisor: Arc<HttpAdvisor>,
}

/// Plain error body, mirrored by every non-success response
#[derive(Serialize)]
struct ErrorMessage {
    error: String,
}

/// Symptom listing response
#[derive(Serialize)]
struct SymptomsResponse {
    count: usize,
    symptoms: Vec<String>,
}

/// Acupoint listing response
#[derive(Serialize)]
struct AcupointsResponse {
    count: usize,
    acupoints: Vec<AcupointSummary>,
}

/// Single acupoint response
#[derive(Serialize)]
struct AcupointFound {
    success: bool,
    acupoint: LocatedPoint,
}

#[derive(Serialize)]
struct AcupointMiss {
    success: bool,
    error: String,
    available: Vec<&'static str>,
}

/// Combined symptom + acupoint search response
#[derive(Serialize)]
struct SearchResponse {
    query: String,
    symptoms: Vec<String>,
    acupoints: Vec<AcupointSummary>,
}

#[derive(Deserialize)]
struct SearchQuery {
    #[serde(default)]
    q: String,
}

#[derive(Deserialize)]
struct ChatRequest {
    #[serde(default)]
    message: String,
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET / - API info and endpoint directory
async fn api_info() -> impl IntoResponse {
    Json(json!({
        "name": "Acupressure Diagnosis API",
        "version": VERSION,
        "endpoints": {
            "GET /symptoms": "List all available symptoms",
            "GET /diagnose/<symptom>": "Get acupoints for a symptom",
            "GET /acupoint/<code>": "Get acupoint details",
            "GET /acupoints": "List all acupoints",
            "GET /search?q=<query>": "Search symptoms and acupoints"
        }
    }))
}

/// GET /symptoms - List all symptom labels in the database
async fn list_symptoms(State(state): State<AppState>) -> impl IntoResponse {
    match state.engine.load_db() {
        Ok(db) => {
            let symptoms = db.symptom_names();
            (
                StatusCode::OK,
                Json(SymptomsResponse {
                    count: symptoms.len(),
                    symptoms,
                }),
            )
                .into_response()
        }
        Err(e) => database_error(e),
    }
}

/// GET /diagnose/:symptom - Diagnose a symptom and return matching acupoints
async fn diagnose_symptom(
    State(state): State<AppState>,
    Path(symptom): Path<String>,
) -> impl IntoResponse {
    // Decode URL-encoded symptom names (Chinese labels arrive percent-encoded)
    let decoded = urlencoding::decode(&symptom)
        .unwrap_or_else(|_| symptom.clone().into())
        .into_owned();

    match state.engine.diagnose(&decoded) {
        Ok(outcome) => (StatusCode::OK, Json(outcome)).into_response(),
        Err(e) => database_error(e),
    }
}

/// GET /acupoint/:code - Get details + image sources for one acupoint
async fn get_acupoint(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> impl IntoResponse {
    match state.engine.locate(&code) {
        Some(acupoint) => (
            StatusCode::OK,
            Json(AcupointFound {
                success: true,
                acupoint,
            }),
        )
            .into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(AcupointMiss {
                success: false,
                error: format!("Acupoint '{}' not found", code),
                available: state.engine.catalog().codes(),
            }),
        )
            .into_response(),
    }
}

/// GET /acupoints - List every acupoint in the catalog
async fn list_acupoints(State(state): State<AppState>) -> impl IntoResponse {
    let catalog = state.engine.catalog();
    Json(AcupointsResponse {
        count: catalog.len(),
        acupoints: catalog.summaries(),
    })
}

/// GET /search?q=<query> - Search symptoms and acupoints together
async fn search_all(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> impl IntoResponse {
    if params.q.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorMessage {
                error: "Please provide search query ?q=<query>".to_string(),
            }),
        )
            .into_response();
    }

    let query = params.q.to_lowercase();

    let db = match state.engine.load_db() {
        Ok(db) => db,
        Err(e) => return database_error(e),
    };
    let symptoms: Vec<String> = db
        .symptom_names()
        .into_iter()
        .filter(|label| label.to_lowercase().contains(&query))
        .collect();

    let acupoints = state.engine.catalog().search(&query);

    (
        StatusCode::OK,
        Json(SearchResponse {
            query,
            symptoms,
            acupoints,
        }),
    )
        .into_response()
}

/// POST /chat - Natural-language diagnosis
async fn handle_chat(
    State(state): State<AppState>,
    payload: Option<Json<ChatRequest>>,
) -> impl IntoResponse {
    let message = payload.map(|Json(req)| req.message).unwrap_or_default();
    if message.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorMessage {
                error: "Please provide a message".to_string(),
            }),
        )
            .into_response();
    }

    // The advisor issues blocking HTTP calls, so the whole turn runs off
    // the async worker threads.
    let engine = state.engine.clone();
    let advisor = state.advisor.clone();
    let outcome = tokio::task::spawn_blocking(move || {
        let advisor: &dyn SymptomAdvisor = advisor.as_ref();
        chat::respond(&engine, advisor, &message)
    })
    .await;

    match outcome {
        Ok(Ok(outcome)) => (StatusCode::OK, Json(outcome)).into_response(),
        Ok(Err(e)) => database_error(e),
        Err(e) => {
            eprintln!("Error running chat turn: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorMessage {
                    error: "Chat processing failed".to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// GET /images/:code - List archived image files for an acupoint
async fn list_images(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> impl IntoResponse {
    let index: ImageIndex = state.archive.list(&code);
    Json(index)
}

/// GET /images/:code/:filename - Serve one archived image file
///
/// The literal code "chinese" addresses the flat Chinese-language archive;
/// anything else is a per-code scraped directory.
async fn serve_image(
    State(state): State<AppState>,
    Path((code, filename)): Path<(String, String)>,
) -> impl IntoResponse {
    let resolved = if code == "chinese" {
        state.archive.resolve_chinese(&filename)
    } else {
        state.archive.resolve_scraped(&code, &filename)
    };

    match resolved {
        Some(path) => match tokio::fs::read(&path).await {
            Ok(bytes) => {
                ([(header::CONTENT_TYPE, content_type_for(&filename))], bytes).into_response()
            }
            Err(e) => {
                eprintln!("Error reading image {:?}: {}", path, e);
                (
                    StatusCode::NOT_FOUND,
                    Json(ErrorMessage {
                        error: "Image not found".to_string(),
                    }),
                )
                    .into_response()
            }
        },
        None => (
            StatusCode::NOT_FOUND,
            Json(ErrorMessage {
                error: "Image not found".to_string(),
            }),
        )
            .into_response(),
    }
}

/// GET /.well-known/ai-plugin.json - AI plugin manifest
async fn serve_plugin_manifest() -> impl IntoResponse {
    Json(export::plugin_manifest())
}

/// GET /openapi.yaml - OpenAPI description
async fn serve_openapi() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/yaml")], export::OPENAPI_SPEC)
}

/// GET /logo.png - Plugin logo
async fn serve_logo() -> impl IntoResponse {
    match tokio::fs::read("web/logo.png").await {
        Ok(bytes) => ([(header::CONTENT_TYPE, "image/png")], bytes).into_response(),
        Err(_) => (
            StatusCode::NOT_FOUND,
            Json(ErrorMessage {
                error: "Logo not found".to_string(),
            }),
        )
            .into_response(),
    }
}

/// 500 with a JSON body for a symptom database that failed to load.
fn database_error(e: anyhow::Error) -> axum::response::Response {
    eprintln!("Error reading symptom database: {:#}", e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorMessage {
            error: "Symptom database unavailable".to_string(),
        }),
    )
        .into_response()
}

fn content_type_for(filename: &str) -> &'static str {
    let ext = std::path::Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

// ============================================================================
// Main Server
// ============================================================================

#[tokio::main]
async fn main() {
    println!("🔌 Acupressure Diagnosis System - API Server");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let config = ServerConfig::from_env();

    // Resolve the symptom database source and prove it loads
    let source = match resolve_database(config.database_path.as_deref()) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("❌ Failed to load symptom database: {:#}", e);
            std::process::exit(1);
        }
    };
    match source.load() {
        Ok(db) => println!("✓ Symptom database loaded: {} symptoms", db.len()),
        Err(e) => {
            eprintln!("❌ Failed to load symptom database: {:#}", e);
            std::process::exit(1);
        }
    }

    let engine = DiagnosisEngine::with_source(source);
    println!("✓ Acupoint catalog: {} points", engine.catalog().len());

    let advisor = HttpAdvisor::new(config.advisor.clone()).expect("Failed to build HTTP client");
    if advisor.is_configured() {
        println!("✓ LLM advisor: configured");
    } else {
        println!("· LLM advisor: not configured (set OPENAI_API_KEY or ANTHROPIC_API_KEY)");
    }

    let archive = ImageArchive::new(config.image_dir.clone(), config.chinese_image_dir.clone());
    println!("✓ Image archive: {:?}", config.image_dir);

    // Create shared state
    let state = AppState {
        engine: Arc::new(engine),
        archive: Arc::new(archive),
        advisor: Arc::new(advisor),
    };

    // Build router
    let app = Router::new()
        .route("/", get(api_info))
        .route("/symptoms", get(list_symptoms))
        .route("/diagnose/:symptom", get(diagnose_symptom))
        .route("/acupoint/:code", get(get_acupoint))
        .route("/acupoints", get(list_acupoints))
        .route("/search", get(search_all))
        .route("/chat", post(handle_chat))
        .route("/images/:code", get(list_images))
        .route("/images/:code/:filename", get(serve_image))
        .route("/.well-known/ai-plugin.json", get(serve_plugin_manifest))
        .route("/openapi.yaml", get(serve_openapi))
        .route("/logo.png", get(serve_logo))
        .with_state(state)
        .layer(CorsLayer::permissive());

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    println!("\n🚀 Server running on http://localhost:{}", config.port);
    println!("   诊断: http://localhost:{}/diagnose/headache", config.port);
    println!("   穴位: http://localhost:{}/acupoint/LI4", config.port);
    println!("   对话: POST http://localhost:{}/chat", config.port);
    println!("\n   Press Ctrl+C to stop\n");

    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}
