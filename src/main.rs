//src/main.rs

use axum::{
    routing::{get, post, put},
    Router,
};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::{AppState, Settings};
use crate::docs::ApiDoc;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let settings = Settings::from_env().expect("Falha ao ler a configuração.");
    let app_state = AppState::new(&settings)
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    let app = build_router(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = TcpListener::bind(&settings.server_addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!(
        "🚀 Servidor escutando em {}",
        listener
            .local_addr()
            .map(|addr| addr.to_string())
            .unwrap_or_else(|_| settings.server_addr.clone())
    );
    axum::serve(listener, app)
        .await
        .expect("Erro no servidor Axum");
}

fn build_router(app_state: AppState) -> Router {
    let guest_routes = Router::new()
        .route("/"
               ,post(handlers::guests::create_guest)
               .get(handlers::guests::list_guests)
        )
        .route("/visits"
               ,post(handlers::guests::record_visit)
        )
        .route("/follow-up-tasks"
               ,get(handlers::guests::get_follow_up_tasks)
        )
        .route("/{id}"
               ,get(handlers::guests::get_guest)
        )
        .route("/{id}/visits"
               ,get(handlers::guests::list_guest_visits)
        )
        .route("/{id}/convert-to-member"
               ,post(handlers::guests::convert_to_member)
        )
        .route("/{id}/follow-up-status"
               ,put(handlers::guests::update_follow_up_status)
        );

    let report_routes = Router::new()
        .route("/fields", get(handlers::reports::get_catalog))
        .route("/preview", post(handlers::reports::preview_report));

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/guests", guest_routes)
        .nest("/api/reports", report_routes)
        .with_state(app_state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn test_app() -> Router {
        let settings = Settings {
            server_addr: "127.0.0.1:0".to_string(),
            seed_demo_data: false,
        };
        build_router(AppState::new(&settings).await.unwrap())
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::ACCEPT_LANGUAGE, "pt-BR");
        if body.is_some() {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
        }
        let req = builder
            .body(Body::from(body.map(|b| b.to_string()).unwrap_or_default()))
            .unwrap();

        let resp = app.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn test_guest_lifecycle_over_http() {
        let app = test_app().await;

        let (status, guest) = send(
            &app,
            Method::POST,
            "/api/guests",
            Some(json!({ "name": "Chioma Nwosu", "phone": "08030000000", "source": "Walk-in" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(guest["visitCount"], 1);
        assert_eq!(guest["status"], "New");
        assert_eq!(guest["followUpStatus"], "Pending");
        assert_eq!(guest["firstVisit"], guest["lastVisit"]);
        let id = guest["id"].as_str().unwrap().to_string();

        let (status, tasks) = send(&app, Method::GET, "/api/guests/follow-up-tasks", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(tasks[0]["taskType"], "Welcome Call/Message");
        assert_eq!(tasks[0]["priority"], "High");

        for _ in 0..2 {
            let (status, _) = send(
                &app,
                Method::POST,
                "/api/guests/visits",
                Some(json!({
                    "guestId": id,
                    "eventId": "sunday-1",
                    "eventName": "Sunday Service",
                    "checkedInBy": "usher-1"
                })),
            )
            .await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (_, guest) = send(&app, Method::GET, &format!("/api/guests/{id}"), None).await;
        assert_eq!(guest["visitCount"], 3);
        assert_eq!(guest["status"], "Returning");

        let (_, visits) = send(&app, Method::GET, &format!("/api/guests/{id}/visits"), None).await;
        assert_eq!(visits.as_array().map(Vec::len), Some(2));

        let (status, guest) = send(
            &app,
            Method::PUT,
            &format!("/api/guests/{id}/follow-up-status"),
            Some(json!({ "followUpStatus": "Contacted", "assignedTo": "staff-4" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(guest["followUpStatus"], "Contacted");
        assert_eq!(guest["assignedTo"], "staff-4");

        let (status, guest) = send(
            &app,
            Method::POST,
            &format!("/api/guests/{id}/convert-to-member"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(guest["status"], "Member");
    }

    #[tokio::test]
    async fn test_create_guest_requires_name_and_phone() {
        let app = test_app().await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/guests",
            Some(json!({ "name": "  ", "phone": "" })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Um ou mais campos são inválidos.");
        assert_eq!(body["details"]["name"][0], "Este campo é obrigatório.");
        assert!(body["details"]["phone"].is_array());
    }

    #[tokio::test]
    async fn test_unknown_guest_returns_localized_404() {
        let app = test_app().await;
        let uri = format!("/api/guests/{}", uuid::Uuid::new_v4());

        let (status, body) = send(&app, Method::GET, &uri, None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Visitante não encontrado.");
    }

    #[tokio::test]
    async fn test_report_preview_endpoint() {
        let app = test_app().await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/reports/preview",
            Some(json!({
                "variant": "reportBuilder",
                "filters": [
                    { "field": "status", "operator": "equals", "value": "Active" },
                    { "field": "joinDate", "operator": "isEmpty", "value": "" },
                    { "field": "gender", "operator": "", "value": "Male" }
                ],
                "outputFields": ["firstName", "email"]
            })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["preview"], "Status equals \"Active\" AND Join Date is empty");
        assert_eq!(body["filters"].as_array().map(Vec::len), Some(2));
        assert_eq!(body["outputFields"], json!(["firstName", "email"]));
    }
}
