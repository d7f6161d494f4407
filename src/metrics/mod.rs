//! Prometheus metrics for the API server and the worker.

use prometheus::{
    Encoder, Gauge, Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts, Registry,
    TextEncoder,
};

use crate::models::signal::SignalTier;

pub struct Metrics {
    registry: Registry,
    pub http_requests_total: IntCounter,
    pub http_requests_in_flight: Gauge,
    pub http_request_duration_seconds: Histogram,
    pub signals_evaluated_total: IntCounterVec,
    pub series_unavailable_total: IntCounterVec,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let http_requests_total =
            IntCounter::with_opts(Opts::new("http_requests_total", "Total HTTP requests"))?;
        let http_requests_in_flight = Gauge::with_opts(Opts::new(
            "http_requests_in_flight",
            "HTTP requests currently being served",
        ))?;
        let http_request_duration_seconds = Histogram::with_opts(HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request latency in seconds",
        ))?;
        let signals_evaluated_total = IntCounterVec::new(
            Opts::new("signals_evaluated_total", "Signals produced, by tier"),
            &["tier"],
        )?;
        let series_unavailable_total = IntCounterVec::new(
            Opts::new(
                "series_unavailable_total",
                "Instruments whose price series could not be obtained",
            ),
            &["symbol"],
        )?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_requests_in_flight.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(signals_evaluated_total.clone()))?;
        registry.register(Box::new(series_unavailable_total.clone()))?;

        Ok(Self {
            registry,
            http_requests_total,
            http_requests_in_flight,
            http_request_duration_seconds,
            signals_evaluated_total,
            series_unavailable_total,
        })
    }

    pub fn record_signal(&self, tier: SignalTier) {
        self.signals_evaluated_total
            .with_label_values(&[tier.as_str()])
            .inc();
    }

    pub fn record_unavailable(&self, symbol: &str) {
        self.series_unavailable_total
            .with_label_values(&[symbol])
            .inc();
    }

    /// Render all registered metrics in the Prometheus text format.
    pub fn export(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
