pub mod errors;
pub mod logging;
pub mod metrics;
pub mod tracing;

pub use errors::{PlatformError, PlatformResult};
pub use logging::init_logging;
pub use metrics::{init_metrics, record_counter, record_histogram};
pub use tracing::session_span;
