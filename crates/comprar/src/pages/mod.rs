//! Typed page objects over the shared synchronization substrate.
//!
//! Each page models exactly one logical screen and exposes only the
//! actions a user could perform there. Transitions are method return
//! types: a navigating action consumes `self` and hands the session to
//! the page it returns, so a superseded page object cannot be used after
//! the transition; the staleness invariant is enforced by move
//! semantics, not by convention.
//!
//! Two failure policies run through the whole graph:
//!
//! - element-required actions raise a typed failure, because the page is
//!   not in the state the caller assumed;
//! - index-guarded actions over collections return `false` on an empty or
//!   out-of-range target, because "nothing to act on" is an expected
//!   outcome during exploratory testing.

mod auth;
mod cart;
mod checkout;
mod home;
mod product;
mod search;

pub use auth::AuthPage;
pub use cart::CartPage;
pub use checkout::CheckoutPage;
pub use home::HomePage;
pub use product::{ProductInfo, ProductPage};
pub use search::SearchResultsPage;

use crate::config::FlowConfig;
use crate::interact::Interactor;
use crate::locator::Locator;
use crate::profile::SiteProfile;
use crate::resolver::Resolver;
use crate::result::ComprarResult;
use crate::session::DriverSession;
use tracing::debug;

/// Ownership bundle every page wraps.
///
/// The session is handed, not copied, to the next page on transition; no
/// element handles are cached here.
#[derive(Debug)]
pub(crate) struct PageContext<S> {
    pub(crate) session: S,
    pub(crate) profile: SiteProfile,
    pub(crate) config: FlowConfig,
}

impl<S: DriverSession> PageContext<S> {
    pub(crate) fn resolver(&self) -> Resolver<'_, S> {
        Resolver::new(&self.session)
    }

    pub(crate) fn interactor(&self) -> Interactor<'_, S> {
        Interactor::new(&self.session, &self.config)
    }

    pub(crate) fn locator(&self, page: &str, name: &str) -> ComprarResult<Locator> {
        self.profile.locator(page, name)
    }

    /// The uniform index guard: resolve the candidate collection under
    /// the probe budget and act only when `index` is in bounds and the
    /// target is interactable. A miss is `Ok(false)`, never an error.
    pub(crate) async fn guarded_click(
        &self,
        page: &str,
        name: &str,
        index: usize,
    ) -> ComprarResult<bool> {
        let locator = self.locator(page, name)?;
        let candidates = self.resolver().resolve_all(&locator, self.config.probe).await?;
        let Some(element) = candidates.get(index) else {
            debug!(locator = %locator, index, found = candidates.len(), "nothing to act on");
            return Ok(false);
        };
        if !element.is_enabled() {
            debug!(locator = %locator, index, "target is not interactable");
            return Ok(false);
        }
        let interactor = self.interactor();
        interactor.scroll_into_view(element).await?;
        interactor.click_element(element).await?;
        Ok(true)
    }

    /// Probe an optional control and click it when present. `true` means
    /// the control was there and got clicked away.
    pub(crate) async fn dismiss_if_present(&self, page: &str, name: &str) -> bool {
        let Ok(locator) = self.locator(page, name) else {
            return false;
        };
        if !self.interactor().is_visible(&locator, self.config.probe).await {
            return false;
        }
        self.interactor().click(&locator).await.is_ok()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::locator::{BoundingBox, Selector};
    use crate::session::{ElementHandle, MockSession};

    pub(crate) fn profile() -> SiteProfile {
        SiteProfile::marketplace_default()
    }

    pub(crate) fn visible(id: &str, tag: &str) -> ElementHandle {
        ElementHandle::new(id, tag).with_extent(BoundingBox::new(0.0, 0.0, 120.0, 32.0))
    }

    pub(crate) fn selector(page: &str, name: &str) -> Selector {
        profile().locator(page, name).unwrap().selector().clone()
    }

    pub(crate) fn context(session: MockSession) -> PageContext<MockSession> {
        PageContext {
            session,
            profile: profile(),
            config: FlowConfig::fast(),
        }
    }
}
