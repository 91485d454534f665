//! Axum route handlers for resume-building sessions.

use axum::{
    extract::{Path, State},
    http::{header, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::ats::{placeholder_report, AtsReport};
use crate::errors::AppError;
use crate::render::{
    export_pdf, export_text, pdf_file_name, preview_html, text_file_name, PDF_MIME, TEXT_MIME,
};
use crate::session::{ResumeForm, Session, Settings};
use crate::state::AppState;
use crate::summary::{generate_summary, is_fallback};

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct EntryCounts {
    pub experiences: usize,
    pub educations: usize,
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub summary: String,
    pub is_fallback: bool,
    /// True when the memoized summary was returned without calling the service.
    pub cached: bool,
}

#[derive(Debug, Serialize)]
pub struct CoverLetterResponse {
    pub cover_letter: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Session lifecycle
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions
pub async fn handle_create_session(State(state): State<AppState>) -> (StatusCode, Json<Session>) {
    (StatusCode::CREATED, Json(state.sessions.create().await))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Session>, AppError> {
    Ok(Json(state.sessions.get(id).await?))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.sessions.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ────────────────────────────────────────────────────────────────────────────
// Form and settings
// ────────────────────────────────────────────────────────────────────────────

/// PUT /api/v1/sessions/:id/resume
pub async fn handle_update_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(form): Json<ResumeForm>,
) -> Result<Json<Session>, AppError> {
    let session = state
        .sessions
        .update(id, |s| {
            s.replace_form(form)?;
            Ok(s.clone())
        })
        .await?;
    Ok(Json(session))
}

/// PUT /api/v1/sessions/:id/counts
pub async fn handle_resize_entries(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(counts): Json<EntryCounts>,
) -> Result<Json<Session>, AppError> {
    let session = state
        .sessions
        .update(id, |s| {
            s.resize_entries(counts.experiences, counts.educations);
            Ok(s.clone())
        })
        .await?;
    Ok(Json(session))
}

/// PUT /api/v1/sessions/:id/settings
pub async fn handle_update_settings(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(settings): Json<Settings>,
) -> Result<Json<Session>, AppError> {
    let session = state
        .sessions
        .update(id, |s| {
            s.apply_settings(settings);
            Ok(s.clone())
        })
        .await?;
    Ok(Json(session))
}

// ────────────────────────────────────────────────────────────────────────────
// Summary and cover letter
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions/:id/summary
///
/// Returns the memoized summary when one exists. Otherwise calls the summary
/// service once; failures resolve to fallback text, which is memoized too.
/// Concurrent requests for one session queue on its summary guard.
pub async fn handle_generate_summary(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SummaryResponse>, AppError> {
    let guard = state.sessions.get(id).await?.summary_guard();
    let _generating = guard.lock().await;

    // Read after acquiring: an earlier holder may have stored a summary.
    let session = state.sessions.get(id).await?;

    if let Some(summary) = session.summary {
        return Ok(Json(SummaryResponse {
            is_fallback: is_fallback(&summary),
            summary,
            cached: true,
        }));
    }

    let skills = session.summary_skills()?;
    let generated = generate_summary(state.summaries.as_ref(), &skills).await;
    info!(
        "Summary for session {id} generated (fallback: {})",
        generated.is_fallback
    );

    let summary = state
        .sessions
        .update(id, |s| Ok(s.remember_summary(generated.text.clone()).to_string()))
        .await?;

    Ok(Json(SummaryResponse {
        is_fallback: is_fallback(&summary),
        cached: summary != generated.text,
        summary,
    }))
}

/// DELETE /api/v1/sessions/:id/summary
pub async fn handle_clear_summary(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state
        .sessions
        .update(id, |s| {
            s.clear_summary();
            Ok(())
        })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/sessions/:id/cover-letter
pub async fn handle_cover_letter(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CoverLetterResponse>, AppError> {
    let cover_letter = state
        .sessions
        .update(id, |s| Ok(s.apply_cover_letter_template().to_string()))
        .await?;
    Ok(Json(CoverLetterResponse { cover_letter }))
}

// ────────────────────────────────────────────────────────────────────────────
// Outputs
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/sessions/:id/preview
pub async fn handle_preview(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Html<String>, AppError> {
    let session = state.sessions.get(id).await?;
    Ok(Html(preview_html(
        &session.resume_data(),
        session.preview_options(),
    )))
}

/// GET /api/v1/sessions/:id/export/pdf
///
/// Rendering runs on the blocking pool; a panic there surfaces as a 500, not a crash.
pub async fn handle_export_pdf(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let data = state.sessions.get(id).await?.resume_data();
    let file_name = pdf_file_name(&data.contact.name);

    let bytes = tokio::task::spawn_blocking(move || export_pdf(&data))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("PDF render task failed: {e}")))??;

    info!("Exported {file_name} ({} bytes) for session {id}", bytes.len());
    attachment(&file_name, PDF_MIME, bytes)
}

/// GET /api/v1/sessions/:id/export/txt
pub async fn handle_export_text(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let data = state.sessions.get(id).await?.resume_data();
    let text = export_text(&data)?;
    attachment(&text_file_name(&data.contact.name), TEXT_MIME, text.into_bytes())
}

/// GET /api/v1/sessions/:id/ats
pub async fn handle_ats_score(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AtsReport>, AppError> {
    state.sessions.get(id).await?;
    Ok(Json(placeholder_report()))
}

fn attachment(file_name: &str, mime: &'static str, body: Vec<u8>) -> Result<Response, AppError> {
    let safe_name: String = file_name
        .chars()
        .map(|c| if c.is_control() || c == '"' || c == '\\' { '_' } else { c })
        .collect();
    let disposition = HeaderValue::from_bytes(
        format!("attachment; filename=\"{safe_name}\"").as_bytes(),
    )
    .map_err(|e| AppError::Internal(e.into()))?;

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(mime)),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        Bytes::from(body),
    )
        .into_response())
}
