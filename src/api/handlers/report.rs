use crate::{
    AppState,
    report::render,
    types::{AppError, DisambiguationResponse, GenerateRequest, ReportDocument, ResolveRequest, Result},
};
use axum::{
    Json,
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};

/// Resolve a company name and either return the report directly or a
/// disambiguation list
#[utoipa::path(
    post,
    path = "/api/resolve",
    request_body = ResolveRequest,
    responses(
        (status = 200, description = "Report download or disambiguation candidates"),
        (status = 404, description = "No matching company found")
    ),
    tag = "report"
)]
pub async fn resolve(
    State(state): State<AppState>,
    Json(payload): Json<ResolveRequest>,
) -> Result<Response> {
    let candidates = state
        .resolver
        .search_companies(&payload.company_name)
        .await;

    if candidates.is_empty() {
        return Err(AppError::NoMatch(payload.company_name));
    }

    // A single high-confidence match skips disambiguation entirely
    if candidates.len() == 1 && candidates[0].score >= 0.9 {
        let selection = &candidates[0];
        let report = state
            .assembler
            .assemble(
                &selection.title,
                payload.expected_pages,
                payload.interests.as_deref(),
                &payload.reference_urls,
            )
            .await;
        return Ok(report_download(&report, &selection.title));
    }

    Ok(Json(DisambiguationResponse { candidates }).into_response())
}

/// Assemble and download the report for a selected title
#[utoipa::path(
    post,
    path = "/api/generate",
    request_body = GenerateRequest,
    responses((status = 200, description = "Report download")),
    tag = "report"
)]
pub async fn generate(
    State(state): State<AppState>,
    Json(payload): Json<GenerateRequest>,
) -> Result<Response> {
    if payload.selected_title.trim().is_empty() {
        return Err(AppError::InvalidInput("selected_title is required".to_string()));
    }

    let report = state
        .assembler
        .assemble(
            &payload.selected_title,
            payload.expected_pages,
            payload.interests.as_deref(),
            &payload.reference_urls,
        )
        .await;

    Ok(report_download(&report, &payload.selected_title))
}

fn report_download(report: &ReportDocument, selected_title: &str) -> Response {
    let html = render::report_html(report);
    let filename = render::download_filename(report, selected_title);

    (
        [
            (header::CONTENT_TYPE, "text/html; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={filename}"),
            ),
        ],
        html,
    )
        .into_response()
}
