use std::net::SocketAddr;
use std::sync::Once;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

use crate::errors::{PlatformError, PlatformResult};

/// Ensure we only install a single global recorder even if `init_metrics`
/// is called multiple times.
static INIT: Once = Once::new();

/// Install a Prometheus recorder listening on `bind_addr` (e.g. "127.0.0.1:9464").
///
/// Subsequent calls are ignored after the first attempt. Without a recorder every
/// `record_*` call below is a no-op, so library code can record unconditionally.
pub fn init_metrics(bind_addr: &str) -> PlatformResult<()> {
    let addr: SocketAddr = bind_addr
        .parse()
        .map_err(|e| PlatformError::Config(format!("invalid metrics bind address '{bind_addr}': {e}")))?;

    let mut init_result: PlatformResult<()> = Ok(());

    INIT.call_once(|| {
        let builder = PrometheusBuilder::new().with_http_listener(addr);

        if let Err(err) = builder.install() {
            init_result = Err(PlatformError::Telemetry(format!("failed to init metrics: {err}")));
        }
    });

    init_result
}

/// Record a counter metric by name.
///
/// The `name` parameter must be a string literal or other `'static` string.
pub fn record_counter(name: &'static str, value: u64) {
    counter!(name).increment(value);
}

/// Record a histogram sample.
///
/// The `name` parameter must be a string literal or other `'static` string.
pub fn record_histogram(name: &'static str, value: f64) {
    histogram!(name).record(value);
}
