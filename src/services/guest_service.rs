// src/services/guest_service.rs

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::GuestRepository,
    models::guest::{
        CheckInResult, EventRef, FollowUpStatus, FollowUpTask, Guest, GuestStatus, GuestVisit,
        NewGuest, TaskPriority,
    },
};

// --- REGRAS (constantes fixas, sem configuração) ---

/// A partir de quantas visitas o visitante passa a ser "Returning".
pub const RETURNING_VISIT_THRESHOLD: u32 = 3;
/// Prazo da ligação de boas-vindas, contado a partir da primeira visita.
pub const WELCOME_DUE_DAYS: i64 = 2;
/// Dias sem visita para convidar à membresia.
pub const MEMBERSHIP_INVITE_AFTER_DAYS: i64 = 7;
/// Dias sem visita para tentar reengajar.
pub const RE_ENGAGEMENT_AFTER_DAYS: i64 = 30;
/// Visitas mínimas para o convite de membresia.
pub const MEMBERSHIP_INVITE_MIN_VISITS: u32 = 2;

pub const TASK_WELCOME: &str = "Welcome Call/Message";
pub const TASK_MEMBERSHIP_INVITATION: &str = "Membership Invitation";
pub const TASK_RE_ENGAGEMENT: &str = "Re-engagement";

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

// =========================================================================
//  1. CICLO DE VIDA (funções puras, "now" sempre vem de fora)
// =========================================================================

pub fn create_guest(partial: NewGuest, now: DateTime<Utc>) -> Guest {
    // Valores do chamador vencem os calculados
    let first_visit = partial.first_visit.unwrap_or(now);

    Guest {
        id: Uuid::new_v4(),
        name: partial.name,
        phone: partial.phone,
        email: partial.email,
        first_visit,
        last_visit: first_visit,
        visit_count: 1,
        status: partial.status.unwrap_or(GuestStatus::New),
        source: partial.source,
        follow_up_status: partial.follow_up_status.unwrap_or(FollowUpStatus::Pending),
        assigned_to: partial.assigned_to,
        notes: partial.notes,
    }
}

/// Registra o check-in. Não mexe no visitante: o chamador deve combinar
/// com `update_guest_visit_count`.
pub fn record_visit(guest: &Guest, event: &EventRef, now: DateTime<Utc>) -> GuestVisit {
    GuestVisit {
        id: Uuid::new_v4(),
        guest_id: guest.id,
        event_id: event.event_id.clone(),
        event_name: event.event_name.clone(),
        visit_date: now,
        checked_in_by: event.checked_in_by.clone(),
    }
}

pub fn update_guest_visit_count(guest: &Guest, now: DateTime<Utc>) -> Guest {
    let visit_count = guest.visit_count.saturating_add(1);

    // Member é decidido fora daqui e nunca é recalculado
    let status = match guest.status {
        GuestStatus::New if visit_count >= RETURNING_VISIT_THRESHOLD => GuestStatus::Returning,
        other => other,
    };

    Guest {
        visit_count,
        // Relógio atrasado não pode voltar o lastVisit
        last_visit: now.max(guest.last_visit),
        status,
        ..guest.clone()
    }
}

// =========================================================================
//  2. GERADOR DE TAREFAS DE ACOMPANHAMENTO
// =========================================================================

/// Dias inteiros entre `since` e `now` (divisão com piso sobre milissegundos).
pub fn days_since(since: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - since).num_milliseconds().div_euclid(MILLIS_PER_DAY)
}

/// Monta a lista de contatos do dia. Mantém a ordem dos visitantes de entrada;
/// um visitante pode gerar zero, uma ou várias tarefas.
pub fn generate_follow_up_tasks(guests: &[Guest], now: DateTime<Utc>) -> Vec<FollowUpTask> {
    let mut tasks = Vec::new();

    for guest in guests {
        let idle_days = days_since(guest.last_visit, now);

        // A. Boas-vindas: vence 2 dias após a PRIMEIRA visita, não após "agora"
        if guest.status == GuestStatus::New && guest.follow_up_status == FollowUpStatus::Pending {
            tasks.push(FollowUpTask {
                guest_id: guest.id,
                guest_name: guest.name.clone(),
                task_type: TASK_WELCOME.to_string(),
                priority: TaskPriority::High,
                due_date: guest.first_visit + Duration::days(WELCOME_DUE_DAYS),
                description: format!("Send welcome message to {}", guest.name),
            });
        }

        // B. Convite para membresia
        if guest.visit_count >= MEMBERSHIP_INVITE_MIN_VISITS
            && guest.status != GuestStatus::Member
            && idle_days > MEMBERSHIP_INVITE_AFTER_DAYS
        {
            tasks.push(FollowUpTask {
                guest_id: guest.id,
                guest_name: guest.name.clone(),
                task_type: TASK_MEMBERSHIP_INVITATION.to_string(),
                priority: TaskPriority::Medium,
                due_date: now,
                description: format!(
                    "Invite {} to membership class (visited {} times)",
                    guest.name, guest.visit_count
                ),
            });
        }

        // C. Reengajamento
        if idle_days > RE_ENGAGEMENT_AFTER_DAYS && guest.status == GuestStatus::Returning {
            tasks.push(FollowUpTask {
                guest_id: guest.id,
                guest_name: guest.name.clone(),
                task_type: TASK_RE_ENGAGEMENT.to_string(),
                priority: TaskPriority::Low,
                due_date: now,
                description: format!(
                    "Reconnect with {} - no visit in {} days",
                    guest.name, idle_days
                ),
            });
        }
    }

    tasks
}

/// Ordenação estável por prioridade (High, Medium, Low). O gerador não ordena.
pub fn sort_by_priority(tasks: &mut [FollowUpTask]) {
    tasks.sort_by_key(|task| task.priority);
}

// =========================================================================
//  3. SERVIÇO (liga as funções puras ao repositório)
// =========================================================================

#[derive(Debug, Default, Clone)]
pub struct GuestQuery {
    pub search: Option<String>,
    pub status: Option<GuestStatus>,
}

#[derive(Clone)]
pub struct GuestService {
    repo: GuestRepository,
}

impl GuestService {
    pub fn new(repo: GuestRepository) -> Self {
        Self { repo }
    }

    pub async fn create_guest(&self, partial: NewGuest, now: DateTime<Utc>) -> Guest {
        let guest = create_guest(partial, now);
        self.repo.insert_guest(guest.clone()).await;

        tracing::info!(guest_id = %guest.id, source = ?guest.source, "Visitante cadastrado");
        guest
    }

    pub async fn list_guests(&self, query: &GuestQuery) -> Vec<Guest> {
        let needle = query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        self.repo
            .list_guests()
            .await
            .into_iter()
            .filter(|g| query.status.is_none_or(|status| g.status == status))
            .filter(|g| match &needle {
                Some(needle) => {
                    g.name.to_lowercase().contains(needle)
                        || g.phone.to_lowercase().contains(needle)
                        || g.email
                            .as_deref()
                            .is_some_and(|email| email.to_lowercase().contains(needle))
                }
                None => true,
            })
            .collect()
    }

    pub async fn get_guest(&self, guest_id: Uuid) -> Result<Guest, AppError> {
        self.repo.find_guest(guest_id).await.ok_or(AppError::GuestNotFound)
    }

    pub async fn list_visits(&self, guest_id: Uuid) -> Result<Vec<GuestVisit>, AppError> {
        // 404 para visitante inexistente, lista vazia para quem não tem visitas
        self.get_guest(guest_id).await?;
        Ok(self.repo.list_visits(guest_id).await)
    }

    /// Check-in: registra a visita e atualiza a contagem juntos.
    pub async fn check_in(
        &self,
        guest_id: Uuid,
        event: &EventRef,
        now: DateTime<Utc>,
    ) -> Result<CheckInResult, AppError> {
        let (visit, guest) = self
            .repo
            .record_check_in(guest_id, |guest| {
                (record_visit(guest, event, now), update_guest_visit_count(guest, now))
            })
            .await
            .ok_or(AppError::GuestNotFound)?;

        tracing::info!(
            guest_id = %guest.id,
            event_id = %visit.event_id,
            visit_count = guest.visit_count,
            status = ?guest.status,
            "Check-in registrado"
        );

        Ok(CheckInResult { visit, guest })
    }

    pub async fn convert_to_member(&self, guest_id: Uuid) -> Result<Guest, AppError> {
        let guest = self
            .repo
            .replace_guest(guest_id, |guest| Guest {
                status: GuestStatus::Member,
                ..guest.clone()
            })
            .await
            .ok_or(AppError::GuestNotFound)?;

        tracing::info!(guest_id = %guest.id, "Visitante convertido em membro");
        Ok(guest)
    }

    pub async fn update_follow_up_status(
        &self,
        guest_id: Uuid,
        follow_up_status: FollowUpStatus,
        assigned_to: Option<String>,
    ) -> Result<Guest, AppError> {
        let guest = self
            .repo
            .replace_guest(guest_id, |guest| Guest {
                follow_up_status,
                // Sem responsável novo, mantém o atual
                assigned_to: assigned_to.clone().or_else(|| guest.assigned_to.clone()),
                ..guest.clone()
            })
            .await
            .ok_or(AppError::GuestNotFound)?;

        tracing::info!(
            guest_id = %guest.id,
            follow_up_status = ?guest.follow_up_status,
            "Status de acompanhamento atualizado"
        );
        Ok(guest)
    }

    pub async fn follow_up_tasks(&self, now: DateTime<Utc>, by_priority: bool) -> Vec<FollowUpTask> {
        let guests = self.repo.list_guests().await;
        let mut tasks = generate_follow_up_tasks(&guests, now);
        if by_priority {
            sort_by_priority(&mut tasks);
        }

        tracing::debug!(guests = guests.len(), tasks = tasks.len(), "Tarefas de acompanhamento geradas");
        tasks
    }
}
