// src/handlers/reports.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::i18n::Locale,
    models::report::{ReportCatalog, ReportPreview, ReportPreviewRequest},
};

// GET /api/reports/fields
#[utoipa::path(
    get,
    path = "/api/reports/fields",
    tag = "Reports",
    responses(
        (status = 200, description = "Campos e operadores disponíveis para filtros", body = ReportCatalog)
    )
)]
pub async fn get_catalog(State(app_state): State<AppState>) -> impl IntoResponse {
    (StatusCode::OK, Json(app_state.report_service.catalog()))
}

// POST /api/reports/preview
#[utoipa::path(
    post,
    path = "/api/reports/preview",
    tag = "Reports",
    request_body = ReportPreviewRequest,
    responses(
        (status = 200, description = "Filtros válidos e texto de pré-visualização", body = ReportPreview),
        (status = 400, description = "Relatório sem campos de saída")
    )
)]
pub async fn preview_report(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<ReportPreviewRequest>,
) -> Result<impl IntoResponse, ApiError> {

    let preview = app_state.report_service
        .preview(payload)
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(preview)))
}
