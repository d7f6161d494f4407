//! Test utilities for API server integration tests

use async_trait::async_trait;
use axum_test::TestServer;
use metal_sniper::core::http::{create_router, AppState, HealthStatus};
use metal_sniper::jobs::JobContext;
use metal_sniper::metrics::Metrics;
use metal_sniper::models::instrument::{Instrument, InstrumentClass};
use metal_sniper::notify::{Alert, Notifier, NotifyError};
use metal_sniper::services::market_data::StaticMarketDataProvider;
use metal_sniper::signals::engine::SignalEngine;
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tokio::sync::RwLock;

use crate::test_utils::{falling_closes, rising_closes, series_from_closes};

pub const CRON_SECRET: &str = "test-secret";

/// Notifier that keeps every alert it is handed.
#[derive(Default)]
pub struct RecordingNotifier {
    pub alerts: Mutex<Vec<Alert>>,
}

impl RecordingNotifier {
    pub fn subjects(&self) -> Vec<String> {
        self.alerts
            .lock()
            .expect("alerts lock")
            .iter()
            .map(|a| a.subject.clone())
            .collect()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, alert: &Alert) -> Result<(), NotifyError> {
        self.alerts.lock().expect("alerts lock").push(alert.clone());
        Ok(())
    }
}

/// Test helper for API server integration tests.
///
/// Gold has a deep dip (GREEN), silver is overheated (RED) and the index has
/// no series loaded, so it is always unavailable.
#[allow(dead_code)]
pub struct TestApiServer {
    pub server: TestServer,
    pub metrics: Arc<Metrics>,
    pub notifier: Arc<RecordingNotifier>,
}

impl TestApiServer {
    pub async fn new() -> Self {
        let metrics = Arc::new(Metrics::new().expect("metrics initialization"));
        let notifier = Arc::new(RecordingNotifier::default());

        let provider = StaticMarketDataProvider::new()
            .with_series("XAU", series_from_closes(&falling_closes(20), 1.0))
            .with_series("XAG", series_from_closes(&rising_closes(30), 0.5));
        let watchlist = vec![
            Instrument::new("XAU", "Gold", InstrumentClass::Commodity, &[]),
            Instrument::new("XAG", "Silver", InstrumentClass::Commodity, &[]),
            Instrument::new("NIFTY", "Nifty 50 Index", InstrumentClass::EquityFund, &[]),
        ];

        let jobs = JobContext::new(
            SignalEngine::default(),
            Arc::new(provider),
            watchlist,
            notifier.clone(),
        )
        .with_metrics(metrics.clone());

        let state = AppState {
            health: Arc::new(RwLock::new(HealthStatus::default())),
            metrics: metrics.clone(),
            start_time: Arc::new(Instant::now()),
            jobs: Arc::new(jobs),
            cron_secret: Some(Arc::from(CRON_SECRET)),
        };

        let app = create_router(state);
        let server = TestServer::new(app).expect("start test server");

        Self {
            server,
            metrics,
            notifier,
        }
    }
}
