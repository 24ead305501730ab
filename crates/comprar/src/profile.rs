//! Per-site locator tables as data.
//!
//! Storefront markup drifts between site versions; rather than one page
//! object per snapshot, the locator sets are plain data keyed by logical
//! page and loaded into the same page objects. A profile can be authored
//! in code or deserialized from JSON.

use crate::locator::{Locator, Selector};
use crate::result::{ComprarError, ComprarResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Locator tables for one site version, keyed by logical page name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteProfile {
    /// Profile identifier (site + snapshot)
    pub name: String,
    /// Landing URL the Home page opens
    pub base_url: String,
    /// page -> locator name -> selector
    pub pages: HashMap<String, HashMap<String, Selector>>,
}

impl SiteProfile {
    /// Create an empty profile
    #[must_use]
    pub fn new(name: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base_url: base_url.into(),
            pages: HashMap::new(),
        }
    }

    /// Register a locator, builder-style
    #[must_use]
    pub fn with_locator(mut self, page: &str, name: &str, selector: Selector) -> Self {
        self.pages
            .entry(page.to_string())
            .or_default()
            .insert(name.to_string(), selector);
        self
    }

    /// Look a locator up by page and name.
    ///
    /// A missing entry is a profile authoring error, reported as
    /// [`ComprarError::UnknownLocator`] rather than a page-state failure.
    pub fn locator(&self, page: &str, name: &str) -> ComprarResult<Locator> {
        self.pages
            .get(page)
            .and_then(|table| table.get(name))
            .map(|selector| Locator::new(format!("{page}.{name}"), selector.clone()))
            .ok_or_else(|| ComprarError::UnknownLocator {
                page: page.to_string(),
                name: name.to_string(),
            })
    }

    /// Deserialize a profile from JSON
    pub fn from_json(json: &str) -> ComprarResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a profile from a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> ComprarResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// Serialize the profile to pretty JSON
    pub fn to_json(&self) -> ComprarResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Built-in table for the default storefront snapshot.
    ///
    /// The selector strings are the snapshot's current markup and will
    /// drift; override individual entries or load a newer profile rather
    /// than editing page code.
    #[must_use]
    pub fn marketplace_default() -> Self {
        Self::new("marketplace-default", "https://shop.example.com")
            // landing page header
            .with_locator("home", "search_input", Selector::css("input#searchInput"))
            .with_locator("home", "search_button", Selector::css("button#applySearchBtn"))
            .with_locator("home", "login_button", Selector::css("a[data-header-item='login']"))
            .with_locator("home", "cart_button", Selector::css("a[data-header-item='cart']"))
            .with_locator("home", "profile_button", Selector::css("a[data-header-item='profile']"))
            .with_locator("home", "catalog_button", Selector::css("button.nav-burger"))
            .with_locator(
                "home",
                "cookie_accept",
                Selector::xpath("//button[contains(text(), 'Accept') or contains(text(), 'Agree')]"),
            )
            // auth popup
            .with_locator("auth", "phone_input", Selector::css("input[type='tel']"))
            .with_locator(
                "auth",
                "request_code_button",
                Selector::xpath("//button[contains(text(), 'Get code')]"),
            )
            .with_locator(
                "auth",
                "email_tab",
                Selector::xpath("//button[contains(text(), 'By e-mail')]"),
            )
            .with_locator("auth", "email_input", Selector::css("input[type='email']"))
            .with_locator("auth", "password_input", Selector::css("input[type='password']"))
            .with_locator(
                "auth",
                "submit_button",
                Selector::xpath("//button[contains(text(), 'Sign in')]"),
            )
            .with_locator("auth", "close_button", Selector::css("button.popup-close"))
            // search results grid
            .with_locator("search", "product_cards", Selector::css("article.product-card"))
            .with_locator("search", "product_names", Selector::css("span.product-card__name"))
            .with_locator(
                "search",
                "add_to_cart_buttons",
                Selector::css("button.product-card__add-to-cart"),
            )
            .with_locator("search", "sort_button", Selector::css("button.sort-toggle"))
            .with_locator(
                "search",
                "price_ascending_option",
                Selector::xpath("//span[contains(text(), 'cheapest first')]"),
            )
            // product detail
            .with_locator("product", "title", Selector::css("h1.product-title"))
            .with_locator("product", "price", Selector::css("ins.price-final"))
            .with_locator("product", "add_to_cart_button", Selector::css("button.btn-add-to-cart"))
            .with_locator(
                "product",
                "go_to_cart_button",
                Selector::xpath("//a[contains(text(), 'Go to cart')]"),
            )
            .with_locator("product", "size_options", Selector::css("label.size-option"))
            .with_locator("product", "color_options", Selector::css("li.color-option"))
            // cart
            .with_locator("cart", "items", Selector::css("div.cart-item"))
            .with_locator("cart", "item_names", Selector::css("a.cart-item__name"))
            .with_locator("cart", "delete_buttons", Selector::css("button.cart-item__delete"))
            .with_locator("cart", "increase_buttons", Selector::css("button.count-plus"))
            .with_locator("cart", "decrease_buttons", Selector::css("button.count-minus"))
            .with_locator(
                "cart",
                "checkout_button",
                Selector::xpath("//button[contains(text(), 'Checkout')]"),
            )
            .with_locator(
                "cart",
                "empty_banner",
                Selector::xpath("//h2[contains(text(), 'Cart is empty')]"),
            )
            .with_locator("cart", "total_price", Selector::css("div.total-amount"))
            // checkout
            .with_locator("checkout", "delivery_methods", Selector::css("label.delivery-method"))
            .with_locator("checkout", "pickup_points", Selector::css("label.pickup-point"))
            .with_locator("checkout", "payment_methods", Selector::css("label.payment-method"))
            .with_locator(
                "checkout",
                "order_button",
                Selector::xpath("//button[contains(text(), 'Place order')]"),
            )
    }
}
