// src/handlers/guests.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::i18n::Locale,
    models::guest::{
        CheckInResult, EventRef, FollowUpStatus, FollowUpTask, Guest, GuestSource, GuestStatus,
        GuestVisit, NewGuest,
    },
    services::guest_service::GuestQuery,
};

// =============================================================================
//  ÁREA 1: CADASTRO E CONSULTA
// =============================================================================

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateGuestPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Adaeze Okafor")]
    pub name: String,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "+2348031234567")]
    pub phone: String,

    #[validate(email(message = "invalid_email"))]
    #[schema(example = "adaeze@email.com")]
    pub email: Option<String>,

    #[serde(default)]
    pub source: GuestSource,
    pub assigned_to: Option<String>,
    pub notes: Option<String>,

    pub status: Option<GuestStatus>,
    pub follow_up_status: Option<FollowUpStatus>,
    pub first_visit: Option<DateTime<Utc>>,
}

impl From<CreateGuestPayload> for NewGuest {
    fn from(payload: CreateGuestPayload) -> Self {
        // Texto vazio vira "não informado"
        let non_blank = |s: Option<String>| s.filter(|v| !v.trim().is_empty());

        NewGuest {
            name: payload.name,
            phone: payload.phone,
            email: non_blank(payload.email),
            source: payload.source,
            assigned_to: non_blank(payload.assigned_to),
            notes: non_blank(payload.notes),
            status: payload.status,
            follow_up_status: payload.follow_up_status,
            first_visit: payload.first_visit,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListGuestsQuery {
    /// Busca por nome, telefone ou e-mail (sem diferenciar maiúsculas)
    pub search: Option<String>,
    pub status: Option<GuestStatus>,
}

// POST /api/guests
#[utoipa::path(
    post,
    path = "/api/guests",
    tag = "Guests",
    request_body = CreateGuestPayload,
    responses(
        (status = 201, description = "Visitante cadastrado", body = Guest),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn create_guest(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(mut payload): Json<CreateGuestPayload>,
) -> Result<impl IntoResponse, ApiError> {

    // " " não conta como preenchido
    payload.name = payload.name.trim().to_string();
    payload.phone = payload.phone.trim().to_string();
    if payload.email.as_deref().is_some_and(|e| e.trim().is_empty()) {
        payload.email = None;
    }

    payload.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let guest = app_state.guest_service
        .create_guest(payload.into(), Utc::now())
        .await;

    Ok((StatusCode::CREATED, Json(guest)))
}

// GET /api/guests
#[utoipa::path(
    get,
    path = "/api/guests",
    tag = "Guests",
    params(ListGuestsQuery),
    responses(
        (status = 200, description = "Lista de visitantes", body = Vec<Guest>)
    )
)]
pub async fn list_guests(
    State(app_state): State<AppState>,
    Query(query): Query<ListGuestsQuery>,
) -> impl IntoResponse {

    let guests = app_state.guest_service
        .list_guests(&GuestQuery {
            search: query.search,
            status: query.status,
        })
        .await;

    (StatusCode::OK, Json(guests))
}

// GET /api/guests/{id}
#[utoipa::path(
    get,
    path = "/api/guests/{id}",
    tag = "Guests",
    params(("id" = Uuid, Path, description = "ID do visitante")),
    responses(
        (status = 200, description = "Visitante", body = Guest),
        (status = 404, description = "Visitante não encontrado")
    )
)]
pub async fn get_guest(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(guest_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {

    let guest = app_state.guest_service
        .get_guest(guest_id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(guest)))
}

// =============================================================================
//  ÁREA 2: VISITAS (CHECK-IN)
// =============================================================================

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordVisitPayload {
    pub guest_id: Uuid,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "sunday-service-2024-06-02")]
    pub event_id: String,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Sunday Service")]
    pub event_name: String,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "staff-3")]
    pub checked_in_by: String,
}

// POST /api/guests/visits
#[utoipa::path(
    post,
    path = "/api/guests/visits",
    tag = "Guests",
    request_body = RecordVisitPayload,
    responses(
        (status = 201, description = "Visita registrada e contagem atualizada", body = CheckInResult),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Visitante não encontrado")
    )
)]
pub async fn record_visit(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<RecordVisitPayload>,
) -> Result<impl IntoResponse, ApiError> {

    payload.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let event = EventRef {
        event_id: payload.event_id,
        event_name: payload.event_name,
        checked_in_by: payload.checked_in_by,
    };

    let result = app_state.guest_service
        .check_in(payload.guest_id, &event, Utc::now())
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(result)))
}

// GET /api/guests/{id}/visits
#[utoipa::path(
    get,
    path = "/api/guests/{id}/visits",
    tag = "Guests",
    params(("id" = Uuid, Path, description = "ID do visitante")),
    responses(
        (status = 200, description = "Histórico de visitas", body = Vec<GuestVisit>),
        (status = 404, description = "Visitante não encontrado")
    )
)]
pub async fn list_guest_visits(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(guest_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {

    let visits = app_state.guest_service
        .list_visits(guest_id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(visits)))
}

// =============================================================================
//  ÁREA 3: ACOMPANHAMENTO
// =============================================================================

// POST /api/guests/{id}/convert-to-member
#[utoipa::path(
    post,
    path = "/api/guests/{id}/convert-to-member",
    tag = "Guests",
    params(("id" = Uuid, Path, description = "ID do visitante")),
    responses(
        (status = 200, description = "Visitante convertido em membro", body = Guest),
        (status = 404, description = "Visitante não encontrado")
    )
)]
pub async fn convert_to_member(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(guest_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {

    let guest = app_state.guest_service
        .convert_to_member(guest_id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(guest)))
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFollowUpStatusPayload {
    pub follow_up_status: FollowUpStatus,
    #[schema(example = "staff-12")]
    pub assigned_to: Option<String>,
}

// PUT /api/guests/{id}/follow-up-status
#[utoipa::path(
    put,
    path = "/api/guests/{id}/follow-up-status",
    tag = "Guests",
    request_body = UpdateFollowUpStatusPayload,
    params(("id" = Uuid, Path, description = "ID do visitante")),
    responses(
        (status = 200, description = "Status de acompanhamento atualizado", body = Guest),
        (status = 404, description = "Visitante não encontrado")
    )
)]
pub async fn update_follow_up_status(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(guest_id): Path<Uuid>,
    Json(payload): Json<UpdateFollowUpStatusPayload>,
) -> Result<impl IntoResponse, ApiError> {

    let assigned_to = payload.assigned_to.filter(|s| !s.trim().is_empty());

    let guest = app_state.guest_service
        .update_follow_up_status(guest_id, payload.follow_up_status, assigned_to)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(guest)))
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct FollowUpTasksQuery {
    /// Ordena High -> Medium -> Low (estável). Padrão: ordem dos visitantes
    #[serde(default)]
    pub sort_by_priority: bool,
}

// GET /api/guests/follow-up-tasks
#[utoipa::path(
    get,
    path = "/api/guests/follow-up-tasks",
    tag = "Guests",
    params(FollowUpTasksQuery),
    responses(
        (status = 200, description = "Tarefas de acompanhamento do dia", body = Vec<FollowUpTask>)
    )
)]
pub async fn get_follow_up_tasks(
    State(app_state): State<AppState>,
    Query(query): Query<FollowUpTasksQuery>,
) -> impl IntoResponse {

    let tasks = app_state.guest_service
        .follow_up_tasks(Utc::now(), query.sort_by_priority)
        .await;

    (StatusCode::OK, Json(tasks))
}
