// src/web/mod.rs

pub mod handlers;
pub mod types;

pub use types::*;

use anyhow::Result;
use rocket::data::{Limits, ToByteUnit};
use rocket::fairing::{Fairing, Info, Kind};
use rocket::form::Form;
use rocket::http::{Header, Status};
use rocket::serde::json::Json;
use rocket::{catchers, get, options, post, routes, Request, Response, State};
use tracing::info;

use crate::config::Settings;
use crate::{AnalysisResult, ResumeAnalyzer};

// CORS Fairing
pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "POST, GET, OPTIONS",
        ));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
    }
}

#[post("/analyze", data = "<upload>")]
pub async fn analyze_resume(
    upload: Form<ResumeUploadForm<'_>>,
    analyzer: &State<ResumeAnalyzer>,
    settings: &State<Settings>,
) -> Result<Json<DataResponse<AnalysisResult>>, Json<StandardErrorResponse>> {
    handlers::analyze_resume_handler(upload, analyzer, settings).await
}

#[post("/analyze-text", data = "<request>")]
pub async fn analyze_text(
    request: Json<AnalyzeTextRequest>,
    analyzer: &State<ResumeAnalyzer>,
) -> Result<Json<DataResponse<AnalysisResult>>, Json<StandardErrorResponse>> {
    handlers::analyze_text_handler(request, analyzer).await
}

#[get("/health")]
pub async fn health(analyzer: &State<ResumeAnalyzer>) -> Json<TextResponse> {
    handlers::health_handler(analyzer).await
}

#[options("/<_..>")]
pub async fn options() -> Status {
    Status::Ok
}

// Error catchers
#[rocket::catch(400)]
pub fn bad_request() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Invalid request format".to_string(),
        "BAD_REQUEST".to_string(),
        vec![
            "Check your request format".to_string(),
            "Verify all required fields are present".to_string(),
        ],
    ))
}

#[rocket::catch(500)]
pub fn internal_error() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Internal server error".to_string(),
        "INTERNAL_ERROR".to_string(),
        vec![
            "Try again in a few moments".to_string(),
            "Contact support if the problem persists".to_string(),
        ],
    ))
}

// Main server start function
pub async fn start_web_server(analyzer: ResumeAnalyzer, settings: Settings) -> Result<()> {
    info!("Starting resume analysis API server on port {}", settings.port);
    if analyzer.is_degraded() {
        info!("Annotation port unavailable; serving degraded results");
    }

    let limits = Limits::default()
        .limit("file", settings.max_upload_bytes.bytes())
        .limit("data-form", (settings.max_upload_bytes + 64 * 1024).bytes());
    let figment = rocket::Config::figment()
        .merge(("port", settings.port))
        .merge(("limits", limits));

    let _rocket = rocket::custom(figment)
        .attach(Cors)
        .manage(analyzer)
        .manage(settings)
        .register("/api", catchers![bad_request, internal_error])
        .mount(
            "/api",
            routes![analyze_resume, analyze_text, health, options],
        )
        .launch()
        .await;

    Ok(())
}
