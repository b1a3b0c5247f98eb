use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::common::i18n::I18nStore;
use crate::middleware::i18n::Locale;

// Erros de domínio/serviço. Não sabem nada de HTTP nem de idioma.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Visitante não encontrado")]
    GuestNotFound,

    #[error("Relatório sem campos de saída")]
    EmptyOutputFields,

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

// O erro que realmente sai pela API (já traduzido)
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub details: Option<Value>,
}

impl AppError {
    /// Chave do catálogo de mensagens (ver `I18nStore`).
    pub fn code(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "validation_failed",
            AppError::GuestNotFound => "guest_not_found",
            AppError::EmptyOutputFields => "empty_output_fields",
            AppError::InternalServerError(_) => "internal_error",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) | AppError::EmptyOutputFields => StatusCode::BAD_REQUEST,
            AppError::GuestNotFound => StatusCode::NOT_FOUND,
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_api_error(&self, locale: &Locale, store: &I18nStore) -> ApiError {
        let lang = locale.0.as_str();

        let details = match self {
            // Retorna todos os detalhes da validação: campo -> mensagens traduzidas
            AppError::ValidationError(errors) => {
                let mut details = serde_json::Map::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<Value> = field_errors
                        .iter()
                        .map(|e| {
                            let key = e.message.as_deref().unwrap_or(e.code.as_ref());
                            Value::String(store.translate(lang, key))
                        })
                        .collect();
                    details.insert(field.to_string(), Value::Array(messages));
                }
                Some(Value::Object(details))
            }
            AppError::InternalServerError(e) => {
                // O detalhe fica só no log
                tracing::error!("Erro Interno do Servidor: {:?}", e);
                None
            }
            _ => None,
        };

        ApiError {
            status: self.status(),
            message: store.translate(lang, self.code()),
            details,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => json!({ "error": self.message, "details": details }),
            None => json!({ "error": self.message }),
        };
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locale(lang: &str) -> Locale {
        Locale(lang.to_string())
    }

    #[test]
    fn test_guest_not_found_maps_to_404_in_portuguese() {
        let store = I18nStore::new();
        let api = AppError::GuestNotFound.to_api_error(&locale("pt"), &store);

        assert_eq!(api.status, StatusCode::NOT_FOUND);
        assert_eq!(api.message, "Visitante não encontrado.");
        assert!(api.details.is_none());
    }

    #[test]
    fn test_validation_error_lists_translated_field_messages() {
        let mut errors = validator::ValidationErrors::new();
        let mut err = validator::ValidationError::new("length");
        err.message = Some("required".into());
        errors.add("name", err);

        let store = I18nStore::new();
        let api = AppError::ValidationError(errors).to_api_error(&locale("en"), &store);

        assert_eq!(api.status, StatusCode::BAD_REQUEST);
        let details = api.details.expect("validation errors carry details");
        assert_eq!(details["name"][0], "This field is required.");
    }

    #[test]
    fn test_internal_error_hides_the_cause() {
        let store = I18nStore::new();
        let err = AppError::InternalServerError(anyhow::anyhow!("lock poisoned"));
        let api = err.to_api_error(&locale("en"), &store);

        assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!api.message.contains("lock poisoned"));
    }
}
