use crate::utils::error::{Error, Result};
use metrics::{describe_counter, describe_gauge, describe_histogram, Unit};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;

static PROM_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Initialise the global Prometheus recorder and register the descriptions of
/// the feed and assistant metrics.
///
/// Call once at start-up, before any metrics are emitted. Later calls are a
/// no-op after the first success.
pub fn init() -> Result<()> {
    PROM_HANDLE.get_or_try_init(|| {
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .map_err(|e| Error::Other(format!("failed to install metrics recorder: {}", e)))?;

        describe_counter!("feed_refresh_total", "Feed refresh attempts");
        describe_counter!("feed_refresh_errors_total", "Feed refreshes that failed");
        describe_gauge!("feed_items", "Items in the latest successful refresh");
        describe_histogram!("assistant_request_ms", Unit::Milliseconds, "Chat completion round-trip time");
        Ok::<_, Error>(handle)
    })?;
    Ok(())
}

/// Global Prometheus handle, if `init` has run.
pub fn handle() -> Option<&'static PrometheusHandle> {
    PROM_HANDLE.get()
}

/// Current metrics in the Prometheus exposition format; empty before `init`.
pub fn render() -> String {
    handle().map(|h| h.render()).unwrap_or_default()
}
