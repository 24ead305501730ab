//! The product detail page.

use super::{CartPage, PageContext};
use crate::result::ComprarResult;
use crate::session::DriverSession;

const PAGE: &str = "product";

/// Title and price snapshot of the product under view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductInfo {
    /// Product title as rendered
    pub title: String,
    /// Final price as rendered, currency included
    pub price: String,
}

/// Product detail: variant selection and cart entry.
#[derive(Debug)]
pub struct ProductPage<S> {
    pub(crate) ctx: PageContext<S>,
}

impl<S: DriverSession> ProductPage<S> {
    /// Product title; required, raises when the page never rendered.
    pub async fn title(&self) -> ComprarResult<String> {
        let locator = self.ctx.locator(PAGE, "title")?;
        self.ctx.interactor().get_text(&locator).await
    }

    /// Final price as rendered.
    pub async fn price(&self) -> ComprarResult<String> {
        let locator = self.ctx.locator(PAGE, "price")?;
        self.ctx.interactor().get_text(&locator).await
    }

    /// Title and price together.
    pub async fn info(&self) -> ComprarResult<ProductInfo> {
        Ok(ProductInfo {
            title: self.title().await?,
            price: self.price().await?,
        })
    }

    /// Pick the size swatch at `index`. Unavailable sizes are reported as
    /// a miss, not an error.
    pub async fn select_size(&self, index: usize) -> ComprarResult<bool> {
        self.ctx.guarded_click(PAGE, "size_options", index).await
    }

    /// Pick the color swatch at `index`.
    pub async fn select_color(&self, index: usize) -> ComprarResult<bool> {
        self.ctx.guarded_click(PAGE, "color_options", index).await
    }

    /// Put the product in the cart and stay on the page. The control is
    /// part of every product layout, so this resolves unconditionally.
    pub async fn add_to_cart(self) -> ComprarResult<Self> {
        let locator = self.ctx.locator(PAGE, "add_to_cart_button")?;
        self.ctx.interactor().click(&locator).await?;
        Ok(self)
    }

    /// Go to the cart, preferring the in-page control and falling back to
    /// the global header control when the in-page one is absent.
    pub async fn go_to_cart(self) -> ComprarResult<CartPage<S>> {
        let in_page = self.ctx.locator(PAGE, "go_to_cart_button")?;
        let interactor = self.ctx.interactor();
        if interactor.is_visible(&in_page, self.ctx.config.probe).await {
            interactor.click(&in_page).await?;
        } else {
            let global = self.ctx.locator("home", "cart_button")?;
            interactor.click(&global).await?;
        }
        Ok(CartPage { ctx: self.ctx })
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
