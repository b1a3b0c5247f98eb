// src/db/guest_repo.rs

use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::guest::{Guest, GuestVisit};

// Tudo em memória: reinicia vazio (ou com a semente) a cada subida.
#[derive(Debug, Default)]
struct GuestStore {
    // Ordem de inserção preservada
    guests: Vec<Guest>,
    visits: Vec<GuestVisit>,
}

#[derive(Clone, Default)]
pub struct GuestRepository {
    store: Arc<RwLock<GuestStore>>,
}

impl GuestRepository {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    //  VISITANTES
    // =========================================================================

    pub async fn insert_guest(&self, guest: Guest) {
        self.store.write().await.guests.push(guest);
    }

    /// Cópia da lista inteira, na ordem de cadastro.
    pub async fn list_guests(&self) -> Vec<Guest> {
        self.store.read().await.guests.clone()
    }

    pub async fn find_guest(&self, guest_id: Uuid) -> Option<Guest> {
        self.store
            .read()
            .await
            .guests
            .iter()
            .find(|g| g.id == guest_id)
            .cloned()
    }

    /// Troca o visitante inteiro pelo valor calculado em `update`.
    pub async fn replace_guest<F>(&self, guest_id: Uuid, update: F) -> Option<Guest>
    where
        F: FnOnce(&Guest) -> Guest,
    {
        let mut store = self.store.write().await;
        let slot = store.guests.iter_mut().find(|g| g.id == guest_id)?;

        let updated = update(slot);
        *slot = updated.clone();
        Some(updated)
    }

    // =========================================================================
    //  VISITAS
    // =========================================================================

    /// Grava a visita e o visitante atualizado sob a mesma trava,
    /// para que a contagem e o histórico nunca divirjam.
    pub async fn record_check_in<F>(&self, guest_id: Uuid, check_in: F) -> Option<(GuestVisit, Guest)>
    where
        F: FnOnce(&Guest) -> (GuestVisit, Guest),
    {
        let mut store = self.store.write().await;
        let slot = store.guests.iter_mut().find(|g| g.id == guest_id)?;

        let (visit, updated) = check_in(slot);
        *slot = updated.clone();
        store.visits.push(visit.clone());

        Some((visit, updated))
    }

    pub async fn list_visits(&self, guest_id: Uuid) -> Vec<GuestVisit> {
        self.store
            .read()
            .await
            .visits
            .iter()
            .filter(|v| v.guest_id == guest_id)
            .cloned()
            .collect()
    }

    // =========================================================================
    //  SEMENTE (dados de demonstração)
    // =========================================================================

    pub async fn seed(&self, guests: Vec<Guest>, visits: Vec<GuestVisit>) {
        let mut store = self.store.write().await;
        store.guests.extend(guests);
        store.visits.extend(visits);
    }
}
