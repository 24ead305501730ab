//! Interaction primitives: typed entry, click-with-settle, scroll, reads.
//!
//! Every primitive re-resolves its target through the [`Resolver`] and
//! completes (success or timeout) before the caller can issue the next;
//! there is no overlap between the poll-wait of one primitive and the
//! execution of another.

use crate::config::FlowConfig;
use crate::locator::{Locator, WaitBudget};
use crate::resolver::Resolver;
use crate::result::ComprarResult;
use crate::session::{DriverSession, ElementHandle};
use rand::Rng;
use std::time::Duration;

/// Randomized post-interaction pacing.
///
/// This is not a correctness wait; those belong to the resolver budgets.
/// The pause exists to sidestep rate/automation-detection heuristics on
/// the target site and to give its UI a head start on asynchronous
/// updates. Disable it in fast test environments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JitterPolicy {
    enabled: bool,
    min_ms: u64,
    max_ms: u64,
}

impl JitterPolicy {
    /// Uniform pause in the 500–1500ms window after each interaction
    #[must_use]
    pub const fn humanized() -> Self {
        Self {
            enabled: true,
            min_ms: 500,
            max_ms: 1500,
        }
    }

    /// No pacing at all
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            enabled: false,
            min_ms: 0,
            max_ms: 0,
        }
    }

    /// Uniform pause in a custom window
    #[must_use]
    pub const fn uniform(min_ms: u64, max_ms: u64) -> Self {
        Self {
            enabled: true,
            min_ms,
            max_ms,
        }
    }

    /// Whether pacing is active
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub(crate) async fn pause(&self) {
        if !self.enabled {
            return;
        }
        let ms = if self.max_ms > self.min_ms {
            rand::rng().random_range(self.min_ms..=self.max_ms)
        } else {
            self.min_ms
        };
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }
}

/// The primitives every page object action is composed from.
#[derive(Debug)]
pub struct Interactor<'s, S> {
    session: &'s S,
    config: &'s FlowConfig,
}

impl<'s, S: DriverSession> Interactor<'s, S> {
    /// Create an interactor over a session and flow config
    #[must_use]
    pub const fn new(session: &'s S, config: &'s FlowConfig) -> Self {
        Self { session, config }
    }

    fn resolver(&self) -> Resolver<'_, S> {
        Resolver::new(self.session)
    }

    /// Resolve the field under the required budget, clear it, inject `text`
    pub async fn type_text(&self, locator: &Locator, text: &str) -> ComprarResult<()> {
        let element = self.resolver().resolve_one(locator, self.config.required).await?;
        self.session.clear_text(&element).await?;
        self.session.send_keys(&element, text).await
    }

    /// Resolve under the required budget, click, then settle per the
    /// jitter policy
    pub async fn click(&self, locator: &Locator) -> ComprarResult<()> {
        let element = self.resolver().resolve_one(locator, self.config.required).await?;
        self.click_element(&element).await
    }

    /// Click an already-resolved handle with the same settle pause
    pub async fn click_element(&self, element: &ElementHandle) -> ComprarResult<()> {
        self.session.click(element).await?;
        self.config.jitter.pause().await;
        Ok(())
    }

    /// Bring an element into the viewport; some UI layers ignore clicks on
    /// off-screen targets
    pub async fn scroll_into_view(&self, element: &ElementHandle) -> ComprarResult<()> {
        self.session.scroll_into_view(element).await?;
        self.config.jitter.pause().await;
        Ok(())
    }

    /// Trimmed visible text of a required element
    pub async fn get_text(&self, locator: &Locator) -> ComprarResult<String> {
        let element = self.resolver().resolve_one(locator, self.config.required).await?;
        Ok(self.session.read_text(&element).await?.trim().to_string())
    }

    /// Thin alias over the resolver's visibility probe
    pub async fn is_visible(&self, locator: &Locator, budget: WaitBudget) -> bool {
        self.resolver().probe_visible(locator, budget).await
    }
}
