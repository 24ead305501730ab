//! Bounded-wait element resolution over a driver session.
//!
//! UI rendering is asynchronous relative to the automation driver; a
//! fixed-interval bounded poll bridges that gap without flaking (no wait)
//! or hanging (unbounded wait). Three entry points share the loop and
//! differ only in failure semantics:
//!
//! - [`Resolver::resolve_one`] gates a required next step; absence is an
//!   error.
//! - [`Resolver::resolve_all`] answers "how many", where zero is a valid,
//!   informative answer and timeouts yield an empty vector.
//! - [`Resolver::probe_visible`] checks optional UI; timeouts become
//!   `false` and never an error.

use crate::locator::{Locator, WaitBudget};
use crate::result::{ComprarError, ComprarResult};
use crate::session::{DriverSession, ElementHandle};
use serde::Serialize;
use std::time::Instant;
use tracing::{debug, warn};

/// Record of a failed required resolution.
///
/// Carries everything a harness needs to persist a page capture: the
/// locator that failed, how long the resolver polled, and where the
/// session was at the time. Capturing the artifact itself is the
/// harness's responsibility.
#[derive(Debug, Clone, Serialize)]
pub struct ResolveDiagnostic {
    /// Rendered locator (label + strategy + selector)
    pub locator: String,
    /// Total wait before giving up, in milliseconds
    pub waited_ms: u64,
    /// Session URL at failure time, when the backend could report one
    pub url: Option<String>,
}

impl ResolveDiagnostic {
    fn into_error(self) -> ComprarError {
        ComprarError::NotFound {
            locator: self.locator,
            waited_ms: self.waited_ms,
        }
    }
}

/// Polls the live document until a locator resolves or its budget runs out.
///
/// Borrows the session; every resolution re-queries the current DOM
/// generation, so handles are never served from a cache.
#[derive(Debug)]
pub struct Resolver<'s, S> {
    session: &'s S,
}

impl<'s, S: DriverSession> Resolver<'s, S> {
    /// Create a resolver over a session
    #[must_use]
    pub const fn new(session: &'s S) -> Self {
        Self { session }
    }

    /// Resolve a single element that must become visible.
    ///
    /// Polls at the budget's interval until an element matching `locator`
    /// is visible (attached, non-zero extent, on screen). Fails with
    /// [`ComprarError::NotFound`] only after at least the full budget has
    /// elapsed; the last poll after the deadline still counts, so a slow
    /// backend round-trip cannot produce an early false failure.
    pub async fn resolve_one(
        &self,
        locator: &Locator,
        budget: WaitBudget,
    ) -> ComprarResult<ElementHandle> {
        let started = Instant::now();
        loop {
            let matches = self.session.find_all(locator.selector()).await?;
            if let Some(element) = matches.into_iter().find(ElementHandle::is_visible) {
                return Ok(element);
            }
            if started.elapsed() >= budget.timeout {
                let diagnostic = ResolveDiagnostic {
                    locator: locator.to_string(),
                    waited_ms: started.elapsed().as_millis() as u64,
                    url: self.session.current_url().await.ok(),
                };
                warn!(
                    locator = %diagnostic.locator,
                    waited_ms = diagnostic.waited_ms,
                    "element never became visible"
                );
                return Err(diagnostic.into_error());
            }
            tokio::time::sleep(budget.poll_interval).await;
        }
    }

    /// Resolve every element currently matching `locator`.
    ///
    /// Polls until at least one match is present (visibility not
    /// required) or the budget elapses, in which case the result is the
    /// empty vector, never a [`ComprarError::NotFound`]. Callers check
    /// emptiness themselves.
    pub async fn resolve_all(
        &self,
        locator: &Locator,
        budget: WaitBudget,
    ) -> ComprarResult<Vec<ElementHandle>> {
        let started = Instant::now();
        loop {
            let matches = self.session.find_all(locator.selector()).await?;
            if !matches.is_empty() {
                return Ok(matches);
            }
            if started.elapsed() >= budget.timeout {
                debug!(
                    locator = %locator,
                    waited_ms = started.elapsed().as_millis() as u64,
                    "no matches within budget"
                );
                return Ok(Vec::new());
            }
            tokio::time::sleep(budget.poll_interval).await;
        }
    }

    /// Visibility probe for optional UI (cookie banners, login state).
    ///
    /// Same polling as [`resolve_one`](Self::resolve_one), but a timeout
    /// is a valid outcome reported as `false`. Backend failures during a
    /// probe also degrade to `false` at debug level; a probe never
    /// raises.
    pub async fn probe_visible(&self, locator: &Locator, budget: WaitBudget) -> bool {
        let started = Instant::now();
        loop {
            match self.session.find_all(locator.selector()).await {
                Ok(matches) => {
                    if matches.iter().any(ElementHandle::is_visible) {
                        return true;
                    }
                }
                Err(error) => {
                    debug!(locator = %locator, error = %error, "probe degraded to false");
                    return false;
                }
            }
            if started.elapsed() >= budget.timeout {
                return false;
            }
            tokio::time::sleep(budget.poll_interval).await;
        }
    }
}
