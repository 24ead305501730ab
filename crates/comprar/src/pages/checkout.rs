//! The checkout page.

use super::PageContext;
use crate::result::ComprarResult;
use crate::session::DriverSession;
use tracing::info;

const PAGE: &str = "checkout";

/// Checkout: delivery/payment selection and the stubbed order terminal.
#[derive(Debug)]
pub struct CheckoutPage<S> {
    pub(crate) ctx: PageContext<S>,
}

impl<S: DriverSession> CheckoutPage<S> {
    /// Pick the delivery method at `index`. `false` on a miss.
    pub async fn select_delivery_method(&self, index: usize) -> ComprarResult<bool> {
        self.ctx.guarded_click(PAGE, "delivery_methods", index).await
    }

    /// Pick the pickup point at `index`.
    pub async fn select_pickup_point(&self, index: usize) -> ComprarResult<bool> {
        self.ctx.guarded_click(PAGE, "pickup_points", index).await
    }

    /// Pick the payment method at `index`.
    pub async fn select_payment_method(&self, index: usize) -> ComprarResult<bool> {
        self.ctx.guarded_click(PAGE, "payment_methods", index).await
    }

    /// Whether the checkout rendered: the order button or at least the
    /// delivery section is visible.
    pub async fn is_loaded(&self) -> bool {
        let interactor = self.ctx.interactor();
        if let Ok(order) = self.ctx.locator(PAGE, "order_button") {
            if interactor.is_visible(&order, self.ctx.config.probe).await {
                return true;
            }
        }
        match self.ctx.locator(PAGE, "delivery_methods") {
            Ok(locator) => interactor.is_visible(&locator, self.ctx.config.probe).await,
            Err(_) => false,
        }
    }

    /// Order submission is intentionally stubbed: no driver traffic, no
    /// external state change. Returns the same page.
    #[must_use]
    pub fn place_order(self) -> Self {
        info!("order placement stubbed; checkout left untouched");
        self
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

#[cfg(test)]
mod tests {
    use super::super::fixtures::{context, selector, visible};
    use super::*;
    use crate::session::MockSession;

    #[tokio::test]
    async fn test_delivery_selection_guards_index() {
        let session = MockSession::new();
        session.stage(
            selector("checkout", "delivery_methods"),
            vec![visible("courier", "label"), visible("pickup", "label")],
        );
        let checkout = CheckoutPage { ctx: context(session) };

        assert!(checkout.select_delivery_method(1).await.unwrap());
        assert!(!checkout.select_delivery_method(2).await.unwrap());
        assert!(checkout.session().was_called("click:pickup"));
    }

    #[tokio::test]
    async fn test_payment_selection_on_empty_section_is_soft_miss() {
        let checkout = CheckoutPage { ctx: context(MockSession::new()) };
        assert!(!checkout.select_payment_method(0).await.unwrap());
    }

    #[tokio::test]
    async fn test_is_loaded_accepts_either_signal() {
        let with_order = MockSession::new();
        with_order.stage(selector("checkout", "order_button"), vec![visible("order", "button")]);
        let checkout = CheckoutPage { ctx: context(with_order) };
        assert!(checkout.is_loaded().await);

        let with_delivery = MockSession::new();
        with_delivery.stage(
            selector("checkout", "delivery_methods"),
            vec![visible("courier", "label")],
        );
        let checkout = CheckoutPage { ctx: context(with_delivery) };
        assert!(checkout.is_loaded().await);

        let bare = CheckoutPage { ctx: context(MockSession::new()) };
        assert!(!bare.is_loaded().await);
    }

    #[tokio::test]
    async fn test_place_order_issues_no_driver_traffic() {
        let checkout = CheckoutPage { ctx: context(MockSession::new()) };
        let before = checkout.ctx.session.calls();
        let checkout = checkout.place_order();
        assert_eq!(checkout.ctx.session.calls(), before);
    }
}
