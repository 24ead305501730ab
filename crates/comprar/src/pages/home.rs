//! The storefront landing page.

use super::{AuthPage, CartPage, PageContext, SearchResultsPage};
use crate::config::FlowConfig;
use crate::profile::SiteProfile;
use crate::result::ComprarResult;
use crate::session::DriverSession;
use tracing::{debug, info};

const PAGE: &str = "home";

/// Landing page: search entry, header navigation, login state.
#[derive(Debug)]
pub struct HomePage<S> {
    pub(crate) ctx: PageContext<S>,
}

impl<S: DriverSession> HomePage<S> {
    /// Navigate to the profile's base URL and best-effort dismiss the
    /// cookie/consent overlay. This is the only way into the flow.
    pub async fn open(
        mut session: S,
        profile: SiteProfile,
        config: FlowConfig,
    ) -> ComprarResult<Self> {
        session.navigate(&profile.base_url).await?;
        info!(url = %profile.base_url, "opened storefront");
        let page = Self {
            ctx: PageContext {
                session,
                profile,
                config,
            },
        };
        if page.dismiss_cookie_banner().await {
            debug!("cookie banner dismissed");
        }
        Ok(page)
    }

    /// Optional-step contract: `true` when a consent overlay was present
    /// and got clicked away, `false` when none appeared. Never fails the
    /// flow, since a non-essential overlay must not abort a scenario.
    pub async fn dismiss_cookie_banner(&self) -> bool {
        self.ctx.dismiss_if_present(PAGE, "cookie_accept").await
    }

    /// Type a query and submit the search.
    pub async fn search(self, query: &str) -> ComprarResult<SearchResultsPage<S>> {
        let input = self.ctx.locator(PAGE, "search_input")?;
        let button = self.ctx.locator(PAGE, "search_button")?;
        let interactor = self.ctx.interactor();
        interactor.type_text(&input, query).await?;
        interactor.click(&button).await?;
        Ok(SearchResultsPage { ctx: self.ctx })
    }

    /// Open the auth popup.
    pub async fn click_login(self) -> ComprarResult<AuthPage<S>> {
        let locator = self.ctx.locator(PAGE, "login_button")?;
        self.ctx.interactor().click(&locator).await?;
        Ok(AuthPage { ctx: self.ctx })
    }

    /// Open the cart via the header control.
    pub async fn open_cart(self) -> ComprarResult<CartPage<S>> {
        let locator = self.ctx.locator(PAGE, "cart_button")?;
        self.ctx.interactor().click(&locator).await?;
        Ok(CartPage { ctx: self.ctx })
    }

    /// Whether the header shows an authenticated profile control.
    pub async fn is_logged_in(&self) -> bool {
        let Ok(locator) = self.ctx.locator(PAGE, "profile_button") else {
            return false;
        };
        self.ctx
            .interactor()
            .is_visible(&locator, self.ctx.config.probe)
            .await
    }

    /// Current page title, for harness assertions.
    pub async fn title(&self) -> ComprarResult<String> {
        self.ctx.session.title().await
    }

    /// Current page URL, for harness assertions.
    pub async fn current_url(&self) -> ComprarResult<String> {
        self.ctx.session.current_url().await
    }

    /// Borrow the underlying session.
    #[must_use]
    pub fn session(&self) -> &S {
        &self.ctx.session
    }

    /// Recover the session, ending the flow.
    #[must_use]
    pub fn into_session(self) -> S {
        self.ctx.session
    }
}
