// src/config.rs

use std::env;

use chrono::Utc;

use crate::{
    common::i18n::I18nStore,
    db::{seed, GuestRepository},
    services::{guest_service::GuestService, report_service::ReportService},
};

const DEFAULT_SERVER_ADDR: &str = "0.0.0.0:3000";

#[derive(Debug, Clone)]
pub struct Settings {
    pub server_addr: String,
    // Carrega visitantes de demonstração na subida
    pub seed_demo_data: bool,
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let server_addr = env::var("SERVER_ADDR").unwrap_or_else(|_| DEFAULT_SERVER_ADDR.to_string());

        let seed_demo_data = match env::var("SEED_DEMO_DATA") {
            Ok(raw) => parse_flag(&raw)
                .ok_or_else(|| anyhow::anyhow!("SEED_DEMO_DATA inválido: '{}'", raw))?,
            Err(_) => false,
        };

        Ok(Self {
            server_addr,
            seed_demo_data,
        })
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

#[derive(Clone)]
pub struct AppState {
    pub i18n_store: I18nStore,
    pub guest_service: GuestService,
    pub report_service: ReportService,
}

impl AppState {
    pub async fn new(settings: &Settings) -> anyhow::Result<Self> {
        // --- Monta o gráfico de dependências ---
        let guest_repo = GuestRepository::new();

        if settings.seed_demo_data {
            let (guests, visits) = seed::demo_data(Utc::now());
            tracing::info!("🌱 Carregando {} visitantes de demonstração", guests.len());
            guest_repo.seed(guests, visits).await;
        }

        Ok(Self {
            i18n_store: I18nStore::new(),
            guest_service: GuestService::new(guest_repo),
            report_service: ReportService::new(),
        })
    }
}
