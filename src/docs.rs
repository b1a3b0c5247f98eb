// src/docs.rs

use utoipa::OpenApi;
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Guests ---
        handlers::guests::create_guest,
        handlers::guests::list_guests,
        handlers::guests::get_guest,
        handlers::guests::record_visit,
        handlers::guests::list_guest_visits,
        handlers::guests::convert_to_member,
        handlers::guests::update_follow_up_status,
        handlers::guests::get_follow_up_tasks,

        // --- Reports ---
        handlers::reports::get_catalog,
        handlers::reports::preview_report,
    ),
    components(
        schemas(
            // --- Guests ---
            models::guest::GuestStatus,
            models::guest::GuestSource,
            models::guest::FollowUpStatus,
            models::guest::TaskPriority,
            models::guest::Guest,
            models::guest::GuestVisit,
            models::guest::FollowUpTask,
            models::guest::CheckInResult,

            // --- Reports ---
            models::report::FilterOperator,
            models::report::FilterListKind,
            models::report::Filter,
            models::report::FieldOption,
            models::report::OperatorOption,
            models::report::ReportCatalog,
            models::report::ReportPreviewRequest,
            models::report::ReportPreview,

            // --- Payloads ---
            handlers::guests::CreateGuestPayload,
            handlers::guests::RecordVisitPayload,
            handlers::guests::UpdateFollowUpStatusPayload,
        )
    ),
    tags(
        (name = "Guests", description = "Visitantes, check-ins e tarefas de acompanhamento"),
        (name = "Reports", description = "Montagem e pré-visualização de filtros de relatório")
    )
)]
pub struct ApiDoc;
