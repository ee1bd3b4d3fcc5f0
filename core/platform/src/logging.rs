use std::env;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Layer};

use crate::errors::{PlatformError, PlatformResult};

/// Initialize structured logging for a persona service.
///
/// `APP_ENV=prod|staging` switches to JSON lines with UTC timestamps; anything else
/// gets the readable formatter. Filtering follows `RUST_LOG`, defaulting to `info`.
/// Returns an error if a global subscriber is already installed.
pub fn init_logging(service_name: &str) -> PlatformResult<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let environment = env::var("APP_ENV").unwrap_or_else(|_| "dev".to_string());

    let installed = if environment == "prod" || environment == "staging" {
        let json_layer = fmt::layer()
            .json()
            .with_timer(fmt::time::UtcTime::rfc_3339())
            .with_target(true)
            .with_current_span(true)
            .with_span_list(true)
            .with_filter(env_filter);

        tracing_subscriber::registry().with(json_layer).try_init()
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_thread_ids(false)
            .with_thread_names(false)
            .finish()
            .try_init()
    };
    installed.map_err(|e| PlatformError::Telemetry(format!("failed to install subscriber: {e}")))?;

    tracing::info!(
        service = %service_name,
        environment = %environment,
        "logging initialized"
    );
    Ok(())
}
