// src/models/guest.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

// --- ENUMS ---

// Ciclo de vida do visitante. Só anda para frente: New -> Returning -> Member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum GuestStatus {
    New,
    Returning,
    Member,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub enum GuestSource {
    #[default]
    #[serde(rename = "Walk-in")]
    WalkIn,
    Invitation,
    Online,
    Event,
}

// Avançado pela equipe, nunca regride sozinho
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum FollowUpStatus {
    Pending,
    Contacted,
    Scheduled,
    Completed,
}

// A ordem de declaração é a ordem de prioridade (High primeiro)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
pub enum TaskPriority {
    High,
    Medium,
    Low,
}

// --- VISITANTE ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Guest {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,

    #[schema(example = "Adaeze Okafor")]
    pub name: String,
    #[schema(example = "+2348012345678")]
    pub phone: String,
    #[schema(example = "adaeze@email.com")]
    pub email: Option<String>,

    pub first_visit: DateTime<Utc>,
    pub last_visit: DateTime<Utc>,

    // Sempre >= 1
    #[schema(example = 1)]
    pub visit_count: u32,

    pub status: GuestStatus,
    pub source: GuestSource,
    pub follow_up_status: FollowUpStatus,

    // Referência ao membro da equipe responsável pelo contato (não é dono do visitante)
    #[schema(example = "staff-12")]
    pub assigned_to: Option<String>,
    pub notes: Option<String>,
}

/// Dados parciais para criar um visitante.
///
/// Campos opcionais preenchidos pelo chamador vencem os valores calculados
/// (status, followUpStatus e firstVisit).
#[derive(Debug, Clone, Default)]
pub struct NewGuest {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub source: GuestSource,
    pub assigned_to: Option<String>,
    pub notes: Option<String>,

    pub status: Option<GuestStatus>,
    pub follow_up_status: Option<FollowUpStatus>,
    pub first_visit: Option<DateTime<Utc>>,
}

// --- VISITA (CHECK-IN) ---

// Imutável: criada uma vez por check-in, nunca atualizada
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GuestVisit {
    pub id: Uuid,
    pub guest_id: Uuid,
    #[schema(example = "sunday-service-2024-06-02")]
    pub event_id: String,
    #[schema(example = "Culto de Domingo")]
    pub event_name: String,
    pub visit_date: DateTime<Utc>,
    #[schema(example = "staff-3")]
    pub checked_in_by: String,
}

// Referência ao evento/culto onde o check-in aconteceu
#[derive(Debug, Clone)]
pub struct EventRef {
    pub event_id: String,
    pub event_name: String,
    pub checked_in_by: String,
}

// --- TAREFA DE ACOMPANHAMENTO ---

// Derivada a cada chamada, não é persistida aqui
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FollowUpTask {
    pub guest_id: Uuid,
    pub guest_name: String,
    #[schema(example = "Welcome Call/Message")]
    pub task_type: String,
    pub priority: TaskPriority,
    pub due_date: DateTime<Utc>,
    pub description: String,
}

// Resposta do check-in: a visita registrada e o visitante já atualizado
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckInResult {
    pub visit: GuestVisit,
    pub guest: Guest,
}
