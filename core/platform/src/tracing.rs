use tracing::{span, Level, Span};
use uuid::Uuid;

/// Span wrapping one unit of persona work (a generation or a chat turn).
///
/// `session_id` is empty for work that is not bound to a conversation.
pub fn session_span(correlation_id: Uuid, operation: &str, session_id: &str) -> Span {
    span!(
        Level::INFO,
        "operation",
        %operation,
        correlation_id = %correlation_id,
        session_id = %session_id,
    )
}
