//! HTTP endpoint server using Axum

use axum::{
    extract::{Path, Request, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{info, warn, Level};

use crate::config::AppConfig;
use crate::jobs::{self, JobContext};
use crate::metrics::Metrics;
use crate::models::instrument::default_watchlist;
use crate::models::signal::{EngineRun, InstrumentOutcome};
use crate::notify::LogNotifier;
use crate::services::chart_api::ChartApiProvider;
use crate::signals::engine::SignalEngine;

#[derive(Clone)]
pub struct AppState {
    pub health: Arc<RwLock<HealthStatus>>,
    pub metrics: Arc<Metrics>,
    pub start_time: Arc<Instant>,
    pub jobs: Arc<JobContext>,
    pub cron_secret: Option<Arc<str>>,
}

#[derive(Clone, Debug)]
pub struct HealthStatus {
    pub status: String,
}

impl Default for HealthStatus {
    fn default() -> Self {
        Self {
            status: "healthy".to_string(),
        }
    }
}

pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    let health = state.health.read().await;
    let uptime_seconds = state.start_time.elapsed().as_secs();
    Ok(Json(json!({
        "status": health.status,
        "uptime_seconds": uptime_seconds,
        "service": "metal-sniper-signal-engine"
    })))
}

pub async fn metrics_handler(State(state): State<AppState>) -> Result<String, StatusCode> {
    state
        .metrics
        .export()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Middleware to track HTTP request metrics
async fn metrics_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    state.metrics.http_requests_in_flight.inc();
    let response = next.run(request).await;
    let status = response.status();
    let duration = start.elapsed();
    state.metrics.http_requests_in_flight.dec();

    state.metrics.http_requests_total.inc();
    state
        .metrics
        .http_request_duration_seconds
        .observe(duration.as_secs_f64());

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            path = %path,
            status = %status,
            duration_ms = duration.as_millis(),
            "HTTP request error"
        );
    }

    response
}

/// Evaluate every instrument on the watchlist
async fn list_signals(State(state): State<AppState>) -> Json<EngineRun> {
    Json(jobs::evaluate_watchlist(&state.jobs).await)
}

/// Evaluate one instrument by its watchlist symbol
async fn get_signal(State(state): State<AppState>, Path(symbol): Path<String>) -> Response {
    let Some(instrument) = state.jobs.find_instrument(&symbol) else {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": format!("unknown symbol '{}'", symbol) })),
        )
            .into_response();
    };

    match jobs::evaluate_one(&state.jobs, instrument).await {
        InstrumentOutcome::Ready(report) => Json(report).into_response(),
        unavailable @ InstrumentOutcome::Unavailable { .. } => {
            (StatusCode::SERVICE_UNAVAILABLE, Json(unavailable)).into_response()
        }
    }
}

/// Scheduled trigger: evaluate and dispatch alerts. Requires the bearer secret.
async fn trigger_evaluation(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if !is_authorized(&headers, state.cron_secret.as_deref()) {
        warn!("rejected unauthorized evaluation trigger");
        return (StatusCode::UNAUTHORIZED, "Unauthorized").into_response();
    }

    let (run, summary) = jobs::handle_scheduled_evaluation(&state.jobs).await;
    let statuses: Vec<Value> = run
        .outcomes
        .iter()
        .map(|outcome| match outcome {
            InstrumentOutcome::Ready(report) => json!({
                "symbol": report.symbol,
                "tier": report.tier,
                "action": report.action,
            }),
            InstrumentOutcome::Unavailable { symbol, error, .. } => json!({
                "symbol": symbol,
                "error": error,
            }),
        })
        .collect();

    Json(json!({
        "success": true,
        "evaluated_at": run.evaluated_at,
        "statuses": statuses,
        "alerts_sent": summary.sent,
        "alerts_failed": summary.failed,
    }))
    .into_response()
}

fn is_authorized(headers: &HeaderMap, secret: Option<&str>) -> bool {
    let Some(secret) = secret else {
        return false;
    };

    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .is_some_and(|token| constant_time_eq(token.as_bytes(), secret.as_bytes()))
}

/// Byte-wise comparison that inspects every byte regardless of where the
/// first mismatch is. Only the length is observable.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route("/api/signals", get(list_signals))
        .route("/api/signals/{symbol}", get(get_signal))
        .route("/api/cron", post(trigger_evaluation))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                        .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
                )
                .layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    metrics_middleware,
                ))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn start_server(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let metrics = Arc::new(Metrics::new()?);
    let provider = Arc::new(ChartApiProvider::new(config.fetch.clone())?);

    let jobs = JobContext::new(
        SignalEngine::new(config.engine),
        provider,
        default_watchlist(),
        Arc::new(LogNotifier),
    )
    .with_metrics(metrics.clone());

    if config.cron_secret.is_none() {
        warn!("CRON_SECRET not set; POST /api/cron will reject every request");
    }

    let state = AppState {
        health: Arc::new(RwLock::new(HealthStatus::default())),
        metrics,
        start_time: Arc::new(Instant::now()),
        jobs: Arc::new(jobs),
        cron_secret: config.cron_secret.as_deref().map(Arc::from),
    };
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;

    info!(port = config.port, "HTTP server listening on port {}", config.port);
    axum::serve(listener, app).await?;

    Ok(())
}
