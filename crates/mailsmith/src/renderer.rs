//! HTML preview state.
//!
//! Every render request gets a [`RenderToken`] from a monotonic counter.
//! Responses may arrive in any order; one older than the newest response
//! already applied is dropped, so the preview never regresses.

use mailsmith_client::TransportError;
use tracing::{debug, warn};

/// Identifies one render request. Later requests compare greater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RenderToken(u64);

impl RenderToken {
    /// Raw counter value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

/// What happened to a completed render response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// The HTML is now displayed.
    Applied,
    /// A newer response was already applied; this one was dropped.
    Stale,
    /// The request failed; the previous HTML is kept.
    Failed,
}

/// Tracks in-flight render requests and the displayed HTML.
#[derive(Debug, Default)]
pub struct Renderer {
    issued: u64,
    last_applied: Option<RenderToken>,
    in_flight: usize,
    html: String,
    error: Option<TransportError>,
}

impl Renderer {
    /// Creates a renderer with empty output.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new request and returns its token.
    pub const fn begin(&mut self) -> RenderToken {
        self.issued += 1;
        self.in_flight += 1;
        RenderToken(self.issued)
    }

    /// Records the response for `token`.
    pub fn complete(
        &mut self,
        token: RenderToken,
        result: Result<String, TransportError>,
    ) -> RenderOutcome {
        self.in_flight = self.in_flight.saturating_sub(1);

        if self.last_applied.is_some_and(|last| token < last) {
            debug!("Dropping stale preview {}", token.value());
            return RenderOutcome::Stale;
        }

        match result {
            Ok(html) => {
                self.last_applied = Some(token);
                self.html = html;
                self.error = None;
                RenderOutcome::Applied
            }
            Err(e) => {
                warn!("Preview {} failed: {}", token.value(), e);
                self.error = Some(e);
                RenderOutcome::Failed
            }
        }
    }

    /// The displayed HTML; empty until a render succeeds.
    #[must_use]
    pub fn html(&self) -> &str {
        &self.html
    }

    /// Returns true while any request is unanswered.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    /// Error of the most recent failed render, cleared by the next success.
    #[must_use]
    pub const fn error(&self) -> Option<&TransportError> {
        self.error.as_ref()
    }

    /// Token of the displayed HTML.
    #[must_use]
    pub const fn last_applied(&self) -> Option<RenderToken> {
        self.last_applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mailsmith_client::TransportErrorKind;

    fn network_error() -> TransportError {
        TransportError::new(TransportErrorKind::Network, None)
    }

    #[test]
    fn test_in_order_responses_apply() {
        let mut renderer = Renderer::new();
        let first = renderer.begin();
        let second = renderer.begin();
        assert!(renderer.is_loading());

        assert_eq!(renderer.complete(first, Ok("<p>1</p>".into())), RenderOutcome::Applied);
        assert_eq!(renderer.complete(second, Ok("<p>2</p>".into())), RenderOutcome::Applied);
        assert_eq!(renderer.html(), "<p>2</p>");
        assert!(!renderer.is_loading());
    }

    #[test]
    fn test_late_response_is_dropped() {
        let mut renderer = Renderer::new();
        let first = renderer.begin();
        let second = renderer.begin();

        assert_eq!(renderer.complete(second, Ok("<p>2</p>".into())), RenderOutcome::Applied);
        assert_eq!(renderer.complete(first, Ok("<p>1</p>".into())), RenderOutcome::Stale);
        assert_eq!(renderer.html(), "<p>2</p>");
        assert_eq!(renderer.last_applied(), Some(second));
    }

    #[test]
    fn test_failure_keeps_previous_html() {
        let mut renderer = Renderer::new();
        let first = renderer.begin();
        renderer.complete(first, Ok("<p>ok</p>".into()));

        let second = renderer.begin();
        assert_eq!(renderer.complete(second, Err(network_error())), RenderOutcome::Failed);
        assert_eq!(renderer.html(), "<p>ok</p>");
        assert!(renderer.error().is_some());
        assert!(!renderer.is_loading());
    }

    #[test]
    fn test_stale_failure_is_silent() {
        let mut renderer = Renderer::new();
        let first = renderer.begin();
        let second = renderer.begin();
        renderer.complete(second, Ok("<p>2</p>".into()));

        assert_eq!(renderer.complete(first, Err(network_error())), RenderOutcome::Stale);
        assert!(renderer.error().is_none());
    }
}
