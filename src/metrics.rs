use metrics::{counter, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Build the Prometheus recorder and register all application metrics.
/// Returns a `PrometheusHandle` whose `render()` method produces the
/// text/plain Prometheus scrape payload.
///
/// Only one global recorder can exist per process; later calls (e.g. from
/// additional test apps) keep their handle but leave the first recorder
/// installed.
pub fn init_metrics() -> PrometheusHandle {
    let recorder = PrometheusBuilder::new().build_recorder();
    let handle = recorder.handle();

    if metrics::set_global_recorder(recorder).is_err() {
        tracing::debug!("Metrics recorder already installed, reusing existing one");
    }

    // Pre-register counters so they appear even before the first increment.
    counter!("analyses_total").absolute(0);
    counter!("analyses_rejected_total").absolute(0);
    counter!("explorer_network_errors_total").absolute(0);
    counter!("explorer_mock_fallbacks_total").absolute(0);
    counter!("narrator_fallbacks_total").absolute(0);

    // Histogram is lazily created on first record; force creation.
    histogram!("analysis_latency_seconds").record(0.0);

    handle
}
