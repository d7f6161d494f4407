//! Alert formatting and delivery seam.
//!
//! Delivery to a mail vendor lives outside this crate; [`LogNotifier`] writes
//! alerts to the structured log so scheduled runs leave an audit trail.

use async_trait::async_trait;
use thiserror::Error;
use tracing::{info, warn};

use crate::models::signal::{EngineRun, InstrumentOutcome, InstrumentReport, SignalTier};

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("alert delivery failed: {0}")]
    Delivery(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub symbol: String,
    pub tier: Option<SignalTier>,
    pub subject: String,
    pub body: String,
}

impl Alert {
    pub fn from_report(report: &InstrumentReport) -> Self {
        let mut body = format!("{} - {}\n", report.tier, report.action);
        body.push_str(&format!("Current price: {:.2}\n", report.price));
        body.push_str(&format!("RSI: {:.1}\n", report.rsi));
        body.push_str(&format!(
            "Rolling high: {:.2} ({:.1}% dip)\n",
            report.rolling_high, report.dip_percent
        ));
        if let Some(average) = report.rolling_average {
            body.push_str(&format!("Moving average: {:.2}\n", average));
        }
        body.push('\n');
        body.push_str(&report.rationale);

        Self {
            symbol: report.symbol.clone(),
            tier: Some(report.tier),
            subject: format!("Weekly Update: {} for {}", report.tier, report.name),
            body,
        }
    }

    pub fn from_outcome(outcome: &InstrumentOutcome) -> Self {
        match outcome {
            InstrumentOutcome::Ready(report) => Self::from_report(report),
            InstrumentOutcome::Unavailable {
                symbol,
                name,
                error,
            } => Self {
                symbol: symbol.clone(),
                tier: None,
                subject: format!("Weekly Update: DATA UNAVAILABLE for {}", name),
                body: format!("No price series could be obtained.\n\n{}", error),
            },
        }
    }
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, alert: &Alert) -> Result<(), NotifyError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, alert: &Alert) -> Result<(), NotifyError> {
        info!(
            symbol = %alert.symbol,
            tier = alert.tier.map(|t| t.as_str()).unwrap_or("UNAVAILABLE"),
            subject = %alert.subject,
            body = %alert.body,
            "alert"
        );
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    pub sent: usize,
    pub failed: usize,
}

/// Send one alert per outcome. A failed delivery does not stop the others.
pub async fn dispatch(notifier: &dyn Notifier, run: &EngineRun) -> DispatchSummary {
    let mut summary = DispatchSummary::default();

    for outcome in &run.outcomes {
        let alert = Alert::from_outcome(outcome);
        match notifier.send(&alert).await {
            Ok(()) => summary.sent += 1,
            Err(e) => {
                warn!(symbol = %alert.symbol, error = %e, "failed to deliver alert");
                summary.failed += 1;
            }
        }
    }

    summary
}
