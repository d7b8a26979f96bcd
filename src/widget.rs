use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use crate::client::SearchBackend;
use crate::error::{Result, WidgetError};
use crate::models::SearchResponse;
use crate::render::ResultsContent;
use crate::view::WidgetView;

pub const EMPTY_QUERY_ALERT: &str = "Please enter a query.";
pub const FETCH_FAILED_ALERT: &str =
    "An error occurred while fetching search results. Please try again.";

/// The single user-visible outcome of one click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Query was blank; the user was alerted and nothing was sent.
    Aborted,
    /// The results container was replaced with `count` links (0 means the
    /// empty-state message).
    Rendered { count: usize },
    /// The request failed and the user was alerted.
    ErrorShown,
    /// A later click was issued while this one was in flight, so its
    /// response was dropped.
    Superseded,
}

/// Search widget controller: binds a view to a search backend.
///
/// Every request gets a sequence number. Only the response to the most
/// recently issued request may touch the view; older ones are discarded.
pub struct SearchWidget<V, B> {
    view: V,
    backend: B,
    issued: AtomicU64,
    in_flight: AtomicUsize,
}

impl<V, B> SearchWidget<V, B>
where
    V: WidgetView,
    B: SearchBackend,
{
    pub fn new(view: V, backend: B) -> Self {
        Self {
            view,
            backend,
            issued: AtomicU64::new(0),
            in_flight: AtomicUsize::new(0),
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Number of requests currently awaiting a response.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    pub async fn on_search_click(&self) -> ClickOutcome {
        let query = self.view.query_value();
        if let Err(e) = validate_query(&query) {
            tracing::debug!(error = %e, "search aborted");
            self.view.alert(EMPTY_QUERY_ALERT);
            return ClickOutcome::Aborted;
        }

        let seq = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::info!(seq, query = %query, "searching");

        let result = {
            let _guard = InFlight::enter(&self.in_flight);
            self.backend.search(&query).await
        };

        let latest = self.issued.load(Ordering::SeqCst);
        if latest != seq {
            tracing::debug!(seq, latest, ok = result.is_ok(), "discarding stale response");
            return ClickOutcome::Superseded;
        }

        match result {
            Ok(response) => {
                if let SearchResponse::Other(body) = &response {
                    tracing::warn!(seq, %body, "response is not an array, showing no results");
                }
                let content = ResultsContent::from_results(&response.into_results());
                self.view.replace_results(&content);
                tracing::info!(seq, count = content.len(), "rendered results");
                ClickOutcome::Rendered {
                    count: content.len(),
                }
            }
            Err(e) => {
                tracing::error!(seq, error = %e, "Error fetching search results");
                self.view.alert(FETCH_FAILED_ALERT);
                ClickOutcome::ErrorShown
            }
        }
    }
}

/// Blank queries never reach the backend. The query itself is sent as typed.
pub fn validate_query(query: &str) -> Result<&str> {
    if query.chars().all(is_browser_whitespace) {
        return Err(WidgetError::EmptyQuery);
    }
    Ok(query)
}

// What a browser's `String.prototype.trim` strips: Unicode whitespace plus
// U+FEFF, but not U+0085.
fn is_browser_whitespace(c: char) -> bool {
    c == '\u{feff}' || (c.is_whitespace() && c != '\u{85}')
}

struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        InFlight(counter)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[test]
fn test_validate_query() {
    for blank in ["", " ", "\t\n", "   \u{a0} ", "\u{feff}", " \u{feff}\u{2028}"] {
        assert!(matches!(validate_query(blank), Err(WidgetError::EmptyQuery)));
    }
    assert_eq!(validate_query("  rust ").unwrap(), "  rust ");
    assert_eq!(validate_query("\u{85}").unwrap(), "\u{85}");
}
