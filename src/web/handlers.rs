// src/web/handlers.rs
//! Handler implementations. Uploads are persisted to a temp path, decoded
//! to plain text, then analyzed on a blocking task; the analyzer itself
//! never returns an error, so the only failure envelopes here are upload
//! and extraction problems.

use rocket::form::Form;
use rocket::serde::json::Json;
use rocket::State;
use tracing::{error, info, warn};

use crate::config::Settings;
use crate::extract::{self, SUPPORTED_EXTENSIONS};
use crate::utils::validate_file_extension;
use crate::web::types::{
    AnalyzeTextRequest, DataResponse, ResumeUploadForm, StandardErrorResponse, TextResponse,
};
use crate::{AnalysisResult, ResumeAnalyzer};

pub async fn analyze_resume_handler(
    mut upload: Form<ResumeUploadForm<'_>>,
    analyzer: &State<ResumeAnalyzer>,
    settings: &State<Settings>,
) -> Result<Json<DataResponse<AnalysisResult>>, Json<StandardErrorResponse>> {
    let filename = upload
        .file
        .raw_name()
        .and_then(|n| n.as_str())
        .unwrap_or("uploaded_resume.pdf")
        .to_string();

    if let Err(e) = validate_file_extension(&filename, &SUPPORTED_EXTENSIONS) {
        return Err(Json(StandardErrorResponse::new(
            e.to_string(),
            "INVALID_FORMAT".to_string(),
            vec![
                "Upload a PDF file (.pdf)".to_string(),
                "Upload a plain-text resume (.txt)".to_string(),
            ],
        )));
    }

    if upload.file.len() > settings.max_upload_bytes {
        return Err(Json(StandardErrorResponse::new(
            format!(
                "File size exceeds the {} byte limit",
                settings.max_upload_bytes
            ),
            "FILE_TOO_LARGE".to_string(),
            vec!["Upload a smaller resume file".to_string()],
        )));
    }

    let temp_path = std::env::temp_dir().join(format!("resume_upload_{}", uuid::Uuid::new_v4()));
    if let Err(e) = upload.file.persist_to(&temp_path).await {
        error!("Failed to save uploaded file: {}", e);
        return Err(Json(StandardErrorResponse::new(
            "Failed to process uploaded file".to_string(),
            "FILE_SAVE_ERROR".to_string(),
            vec!["Try uploading the file again".to_string()],
        )));
    }

    let extracted = extract::extract_content(&temp_path, &filename).await;
    let _ = tokio::fs::remove_file(&temp_path).await;

    let text = match extracted {
        Ok(text) => text,
        Err(e) => {
            error!("Text extraction failed for {}: {}", filename, e);
            return Err(Json(StandardErrorResponse::new(
                "Could not extract text from the uploaded file".to_string(),
                "EXTRACTION_ERROR".to_string(),
                vec![
                    "Ensure the file has readable text".to_string(),
                    "Check the file is not corrupted".to_string(),
                ],
            )));
        }
    };

    if text.trim().is_empty() {
        warn!("No extractable text in upload: {}", filename);
        return Err(Json(StandardErrorResponse::new(
            "Could not extract text from the resume. The file might be image-based, password-protected, or corrupted."
                .to_string(),
            "EXTRACTION_EMPTY".to_string(),
            vec!["Upload a text-based PDF".to_string()],
        )));
    }

    info!("Analyzing uploaded resume: {}", filename);
    run_analysis(analyzer, text).await.map(|result| {
        Json(DataResponse::success(
            "Resume analyzed".to_string(),
            result,
        ))
    })
}

pub async fn analyze_text_handler(
    request: Json<AnalyzeTextRequest>,
    analyzer: &State<ResumeAnalyzer>,
) -> Result<Json<DataResponse<AnalysisResult>>, Json<StandardErrorResponse>> {
    run_analysis(analyzer, request.into_inner().text)
        .await
        .map(|result| {
            Json(DataResponse::success(
                "Resume text analyzed".to_string(),
                result,
            ))
        })
}

pub async fn health_handler(analyzer: &State<ResumeAnalyzer>) -> Json<TextResponse> {
    let message = if analyzer.is_degraded() {
        "degraded: annotation port unavailable".to_string()
    } else {
        "healthy".to_string()
    };
    Json(TextResponse::success(message))
}

/// Analysis is CPU-bound; run it off the async workers.
async fn run_analysis(
    analyzer: &State<ResumeAnalyzer>,
    text: String,
) -> Result<AnalysisResult, Json<StandardErrorResponse>> {
    let analyzer = analyzer.inner().clone();
    tokio::task::spawn_blocking(move || analyzer.analyze(&text))
        .await
        .map_err(|e| {
            error!("Analysis task failed: {}", e);
            Json(StandardErrorResponse::new(
                "Analysis failed unexpectedly".to_string(),
                "ANALYSIS_ERROR".to_string(),
                vec!["Try again in a few moments".to_string()],
            ))
        })
}
