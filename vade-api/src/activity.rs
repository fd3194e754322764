use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, error};

use vade_state::model::ActivityKind;

use crate::client::ApiClient;

const AGENT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Fire-and-forget forwarder for ledger events.
///
/// Never blocks the caller on an error: failures are logged and swallowed.
/// Browsing events are suppressed after the first one in a session so
/// repeated visits do not spam the ledger.
#[derive(Clone, Debug)]
pub struct ActivityLogger {
    api: ApiClient,
    browsing_logged: Arc<AtomicBool>,
}

impl ActivityLogger {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            browsing_logged: Arc::new(AtomicBool::new(false)),
        }
    }

    pub async fn log(&self, kind: ActivityKind, ref_code: &str) {
        if kind == ActivityKind::Browsing && !self.take_browsing_slot() {
            debug!("browsing already logged this session; skipping");
            return;
        }

        let result = match kind {
            ActivityKind::Browsing => {
                // Browsing has its own endpoint; the backend resolves the
                // real client address when we cannot.
                self.api
                    .track_visit(ref_code, "unknown", AGENT_USER_AGENT)
                    .await
            }
            other => {
                let details = serde_json::json!({ "userAgent": AGENT_USER_AGENT });
                self.api.log_activity(other, ref_code, details).await
            }
        };

        if let Err(e) = result {
            error!(?e, kind = kind.wire_name(), "failed to log activity");
        }
    }

    /// Consume the one browsing slot for this session. Stays consumed even
    /// if the request fails, matching the once-per-session suppression.
    fn take_browsing_slot(&self) -> bool {
        !self.browsing_logged.swap(true, Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::ActivityLogger;
    use crate::client::ApiClient;
    use vade_state::model::ActivityKind;

    fn unreachable_logger() -> ActivityLogger {
        // Port 9 (discard) refuses connections locally; log() must swallow
        // the failure either way.
        ActivityLogger::new(ApiClient::new("http://127.0.0.1:9", None).unwrap())
    }

    #[test]
    fn browsing_slot_is_single_use() {
        let logger = unreachable_logger();

        assert!(logger.take_browsing_slot());
        assert!(!logger.take_browsing_slot());
        assert!(!logger.take_browsing_slot());
    }

    #[test]
    fn browsing_slot_is_shared_across_clones() {
        let logger = unreachable_logger();
        let clone = logger.clone();

        assert!(logger.take_browsing_slot());
        assert!(!clone.take_browsing_slot());
    }

    #[tokio::test]
    async fn logging_failures_are_swallowed() {
        let logger = unreachable_logger();

        logger.log(ActivityKind::Browsing, "ADEBAYO2026").await;
        logger.log(ActivityKind::Share, "ADEBAYO2026").await;

        // The slot stays consumed even though the request failed.
        assert!(!logger.take_browsing_slot());
    }
}
