//! Locator data model: selection strategies, wait budgets, element geometry.
//!
//! A [`Locator`] is pure data: a strategy plus a selector string, declared
//! once per page table and never mutated. All side effects live in the
//! interaction layer; resolving a locator is the resolver's job.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Default budget for resolutions where absence is a failure (10 seconds)
pub const DEFAULT_REQUIRED_TIMEOUT_MS: u64 = 10_000;

/// Default budget for probes that are allowed to fail (3 seconds)
pub const DEFAULT_PROBE_TIMEOUT_MS: u64 = 3_000;

/// Default polling interval for bounded waits (50ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 50;

/// Selection strategy for locating elements
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "strategy", content = "value", rename_all = "snake_case")]
pub enum Selector {
    /// CSS selector (e.g., "button.checkout")
    Css(String),
    /// XPath selector
    XPath(String),
    /// Text content selector
    Text(String),
    /// Test ID selector (data-testid attribute)
    TestId(String),
}

impl Selector {
    /// Create a CSS selector
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    /// Create an XPath selector
    #[must_use]
    pub fn xpath(selector: impl Into<String>) -> Self {
        Self::XPath(selector.into())
    }

    /// Create a text content selector
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Create a test ID selector
    #[must_use]
    pub fn test_id(id: impl Into<String>) -> Self {
        Self::TestId(id.into())
    }

    /// JavaScript expression evaluating to the array of matching elements,
    /// in document order. Used by the CDP backend.
    #[must_use]
    pub fn to_collector_js(&self) -> String {
        match self {
            Self::Css(s) => format!("Array.from(document.querySelectorAll({s:?}))"),
            Self::XPath(s) => format!(
                "(() => {{ const r = document.evaluate({s:?}, document, null, \
                 XPathResult.ORDERED_NODE_SNAPSHOT_TYPE, null); const out = []; \
                 for (let i = 0; i < r.snapshotLength; i++) out.push(r.snapshotItem(i)); \
                 return out; }})()"
            ),
            Self::Text(t) => format!(
                "Array.from(document.querySelectorAll('a, button, div, span, h1, h2, h3, label'))\
                 .filter(el => el.textContent.includes({t:?}))"
            ),
            Self::TestId(id) => {
                format!("Array.from(document.querySelectorAll('[data-testid={id:?}]'))")
            }
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Css(s) => write!(f, "css:{s}"),
            Self::XPath(s) => write!(f, "xpath:{s}"),
            Self::Text(s) => write!(f, "text:{s}"),
            Self::TestId(s) => write!(f, "test-id:{s}"),
        }
    }
}

/// Immutable descriptor of how to find an element.
///
/// Equality is structural; two locators with the same label and selector
/// are the same locator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Locator {
    label: String,
    selector: Selector,
}

impl Locator {
    /// Create a locator from a label and a selector
    #[must_use]
    pub fn new(label: impl Into<String>, selector: Selector) -> Self {
        Self {
            label: label.into(),
            selector,
        }
    }

    /// Shorthand for a CSS locator
    #[must_use]
    pub fn css(label: impl Into<String>, selector: impl Into<String>) -> Self {
        Self::new(label, Selector::css(selector))
    }

    /// The selection strategy and string
    #[must_use]
    pub const fn selector(&self) -> &Selector {
        &self.selector
    }

    /// The human-readable label used in diagnostics
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label, self.selector)
    }
}

/// Bounded polling window for one resolution attempt.
///
/// Two budgets exist by convention: a short probe budget for checks that
/// are allowed to fail, and a longer required budget for lookups whose
/// absence is a failure. Callers override per call by passing a different
/// budget, not by cancelling an in-flight wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitBudget {
    /// Maximum total wait before the attempt is declared failed/empty
    pub timeout: Duration,
    /// Fixed interval between document polls
    pub poll_interval: Duration,
}

impl WaitBudget {
    /// Budget with the default polling interval
    #[must_use]
    pub const fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
        }
    }

    /// Default budget for required resolutions
    #[must_use]
    pub const fn required() -> Self {
        Self::new(Duration::from_millis(DEFAULT_REQUIRED_TIMEOUT_MS))
    }

    /// Default budget for probes
    #[must_use]
    pub const fn probe() -> Self {
        Self::new(Duration::from_millis(DEFAULT_PROBE_TIMEOUT_MS))
    }

    /// Override the polling interval
    #[must_use]
    pub const fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }
}

/// Element geometry as reported by the backend
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// X position
    pub x: f32,
    /// Y position
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl BoundingBox {
    /// Create a new bounding box
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Whether the box has a non-zero rendered extent
    #[must_use]
    pub fn has_extent(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod selector_tests {
        use super::*;

        #[test]
        fn test_css_selector_collector() {
            let selector = Selector::css("button.checkout");
            let js = selector.to_collector_js();
            assert!(js.contains("querySelectorAll"));
            assert!(js.contains("button.checkout"));
        }

        #[test]
        fn test_xpath_selector_collector() {
            let selector = Selector::xpath("//button[contains(text(), 'Checkout')]");
            let js = selector.to_collector_js();
            assert!(js.contains("document.evaluate"));
            assert!(js.contains("ORDERED_NODE_SNAPSHOT_TYPE"));
        }

        #[test]
        fn test_text_selector_collector() {
            let selector = Selector::text("Go to cart");
            let js = selector.to_collector_js();
            assert!(js.contains("textContent"));
            assert!(js.contains("Go to cart"));
        }

        #[test]
        fn test_test_id_selector_collector() {
            let selector = Selector::test_id("cart-total");
            let js = selector.to_collector_js();
            assert!(js.contains("data-testid"));
            assert!(js.contains("cart-total"));
        }

        #[test]
        fn test_display_tags_strategy() {
            assert_eq!(Selector::css("a.nav").to_string(), "css:a.nav");
            assert_eq!(Selector::text("Sign in").to_string(), "text:Sign in");
        }

        #[test]
        fn test_equality_is_structural() {
            assert_eq!(Selector::css("div.cart-item"), Selector::css("div.cart-item"));
            assert_ne!(Selector::css("div.cart-item"), Selector::xpath("div.cart-item"));
        }

        #[test]
        fn test_serde_round_trip() {
            let selector = Selector::xpath("//h2[contains(text(), 'Cart is empty')]");
            let json = serde_json::to_string(&selector).unwrap();
            assert!(json.contains("xpath"));
            let back: Selector = serde_json::from_str(&json).unwrap();
            assert_eq!(back, selector);
        }
    }

    mod locator_tests {
        use super::*;

        #[test]
        fn test_locator_display_includes_label_and_selector() {
            let locator = Locator::css("home.search_input", "input#search");
            let rendered = locator.to_string();
            assert!(rendered.contains("home.search_input"));
            assert!(rendered.contains("css:input#search"));
        }

        #[test]
        fn test_locator_structural_equality() {
            let a = Locator::new("cart.items", Selector::css("div.cart-item"));
            let b = Locator::new("cart.items", Selector::css("div.cart-item"));
            assert_eq!(a, b);
        }
    }

    mod wait_budget_tests {
        use super::*;

        #[test]
        fn test_required_default() {
            let budget = WaitBudget::required();
            assert_eq!(budget.timeout, Duration::from_millis(10_000));
            assert_eq!(budget.poll_interval, Duration::from_millis(50));
        }

        #[test]
        fn test_probe_is_shorter_than_required() {
            assert!(WaitBudget::probe().timeout < WaitBudget::required().timeout);
        }

        #[test]
        fn test_poll_interval_override() {
            let budget = WaitBudget::probe().with_poll_interval(Duration::from_millis(10));
            assert_eq!(budget.poll_interval, Duration::from_millis(10));
        }
    }

    mod bounding_box_tests {
        use super::*;

        #[test]
        fn test_extent() {
            assert!(BoundingBox::new(0.0, 0.0, 80.0, 24.0).has_extent());
            assert!(!BoundingBox::new(10.0, 10.0, 0.0, 24.0).has_extent());
            assert!(!BoundingBox::new(10.0, 10.0, 80.0, 0.0).has_extent());
        }
    }
}
