//! axum routing, bearer auth and error mapping

use std::any::Any;
use std::future::Future;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tower_http::{
    catch_panic::CatchPanicLayer, cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer,
};
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use humanizer_core::{Error, HumanizeRequest, HumanizeResponse};

use crate::config::ServerConfig;
use crate::service::HumanizeService;

const SERVICE_NAME: &str = "Notecraft Humanizer API";

// --- Error Handling ---
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    Unauthorized,
    Internal(String),
}

impl From<Error> for AppError {
    fn from(err: Error) -> Self {
        match err {
            Error::InvalidInput(msg) => AppError::BadRequest(msg),
            Error::Authentication(_) => AppError::Unauthorized,
            other => AppError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, msg) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };
        (status, Json(json!({ "error": msg }))).into_response()
    }
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .cloned()
        .or_else(|| panic.downcast_ref::<&str>().map(|s| s.to_string()))
        .unwrap_or_else(|| "unknown panic".to_string());
    AppError::Internal(format!("handler panicked: {detail}")).into_response()
}

// --- State ---
#[derive(Clone)]
pub struct AppState {
    service: Arc<HumanizeService>,
    api_secret: Option<Arc<str>>,
}

impl AppState {
    pub fn new(service: HumanizeService, api_secret: Option<String>) -> Self {
        Self {
            service: Arc::new(service),
            api_secret: api_secret.map(Arc::from),
        }
    }
}

async fn require_bearer(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let Some(secret) = state.api_secret.as_deref() else {
        return next.run(req).await;
    };

    let authorized = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .is_some_and(|token| token == secret);

    if authorized {
        next.run(req).await
    } else {
        AppError::Unauthorized.into_response()
    }
}

// --- Handlers ---
async fn humanize_handler(
    State(state): State<AppState>,
    payload: Result<Json<HumanizeRequest>, JsonRejection>,
) -> Result<Json<HumanizeResponse>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let request_id = Uuid::new_v4();
    let span = info_span!("humanize", %request_id, tone = %request.tone, style = %request.style, length = %request.length);

    async move {
        info!(words = humanizer_core::word_count(&request.text), "humanize request");
        let response = state.service.humanize(&request).await?;
        info!(method = ?response.method, words = response.word_count, "humanize response");
        Ok::<_, AppError>(Json(response))
    }
    .instrument(span)
    .await
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "message": format!("{SERVICE_NAME} is running"),
    }))
}

async fn root() -> Json<Value> {
    Json(json!({
        "message": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "humanize": "/humanize",
            "health": "/healthz",
        },
    }))
}

pub fn router(state: AppState, body_limit_kb: usize) -> Router {
    let protected = Router::new()
        .route("/humanize", post(humanize_handler))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_bearer));

    Router::new()
        .route("/", get(root))
        .route("/healthz", get(health))
        .merge(protected)
        .with_state(state)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(RequestBodyLimitLayer::new(body_limit_kb * 1024))
}

pub async fn run_server<F>(
    config: &ServerConfig,
    service: HumanizeService,
    shutdown: F,
) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    if config.api_secret.is_none() {
        tracing::warn!("API_SECRET not set; /humanize accepts unauthenticated requests");
    }
    info!(
        model = service.model_id().unwrap_or("none"),
        "starting {}", SERVICE_NAME
    );

    let state = AppState::new(service, config.api_secret.clone());
    let app = router(state, config.body_limit_kb);

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    info!(addr = %config.bind, "{} listening", SERVICE_NAME);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown.await;
            info!("shutting down gracefully");
        })
        .await?;

    Ok(())
}
