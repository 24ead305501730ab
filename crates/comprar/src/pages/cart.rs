//! The cart page.

use super::{CheckoutPage, PageContext};
use crate::result::ComprarResult;
use crate::session::DriverSession;

const PAGE: &str = "cart";

/// Cart contents and mutation, plus the checkout transition.
#[derive(Debug)]
pub struct CartPage<S> {
    pub(crate) ctx: PageContext<S>,
}

impl<S: DriverSession> CartPage<S> {
    /// Number of line items. Zero is a valid answer.
    pub async fn items_count(&self) -> ComprarResult<usize> {
        let locator = self.ctx.locator(PAGE, "items")?;
        let items = self.ctx.resolver().resolve_all(&locator, self.ctx.config.probe).await?;
        Ok(items.len())
    }

    /// Names of the line items, in cart order.
    pub async fn item_names(&self) -> ComprarResult<Vec<String>> {
        let locator = self.ctx.locator(PAGE, "item_names")?;
        let elements = self.ctx.resolver().resolve_all(&locator, self.ctx.config.probe).await?;
        let mut names = Vec::new();
        for element in &elements {
            names.push(self.ctx.session.read_text(element).await?.trim().to_string());
        }
        Ok(names)
    }

    /// Rendered order total; `None` when the cart shows no total (an
    /// empty cart is a legitimate state, not a failure).
    pub async fn total_price(&self) -> ComprarResult<Option<String>> {
        let locator = self.ctx.locator(PAGE, "total_price")?;
        let interactor = self.ctx.interactor();
        if !interactor.is_visible(&locator, self.ctx.config.probe).await {
            return Ok(None);
        }
        Ok(Some(interactor.get_text(&locator).await?))
    }

    /// Whether the empty-cart banner is showing.
    pub async fn is_empty(&self) -> bool {
        let Ok(locator) = self.ctx.locator(PAGE, "empty_banner") else {
            return false;
        };
        self.ctx
            .interactor()
            .is_visible(&locator, self.ctx.config.probe)
            .await
    }

    /// Remove the line item at `index`. `false` on a miss; never raises.
    pub async fn remove_item(&self, index: usize) -> ComprarResult<bool> {
        self.ctx.guarded_click(PAGE, "delete_buttons", index).await
    }

    /// Bump the quantity of the line item at `index`.
    pub async fn increase_quantity(&self, index: usize) -> ComprarResult<bool> {
        self.ctx.guarded_click(PAGE, "increase_buttons", index).await
    }

    /// Drop the quantity of the line item at `index`.
    pub async fn decrease_quantity(&self, index: usize) -> ComprarResult<bool> {
        self.ctx.guarded_click(PAGE, "decrease_buttons", index).await
    }

    /// Proceed to checkout. The control is required: a cart page without
    /// it never loaded.
    pub async fn checkout(self) -> ComprarResult<CheckoutPage<S>> {
        let locator = self.ctx.locator(PAGE, "checkout_button")?;
        self.ctx.interactor().click(&locator).await?;
        Ok(CheckoutPage { ctx: self.ctx })
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
