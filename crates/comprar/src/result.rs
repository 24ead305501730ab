//! Result and error types for comprar.

use thiserror::Error;

/// Result type for shop-flow operations
pub type ComprarResult<T> = Result<T, ComprarError>;

/// Errors that can occur while driving a shop flow
#[derive(Debug, Error)]
pub enum ComprarError {
    /// A required element never became visible within its wait budget
    #[error("element not found: {locator} (waited {waited_ms}ms)")]
    NotFound {
        /// Locator that failed to resolve
        locator: String,
        /// How long the resolver polled before giving up
        waited_ms: u64,
    },

    /// A required collection resolved empty where emptiness is the failure
    #[error("no products found for {locator}")]
    NoProductsFound {
        /// Locator of the empty collection
        locator: String,
    },

    /// The site profile has no entry for the requested locator
    #[error("no locator named '{name}' for page '{page}' in the site profile")]
    UnknownLocator {
        /// Logical page the lookup targeted
        page: String,
        /// Locator name within the page table
        name: String,
    },

    /// Navigation failed at the backend
    #[error("navigation to {url} failed: {message}")]
    Navigation {
        /// URL that failed
        url: String,
        /// Error message
        message: String,
    },

    /// Driver backend transport or dispatch failure
    #[error("driver session error: {message}")]
    Session {
        /// Error message
        message: String,
    },

    /// Browser launch error (feature `browser`)
    #[error("failed to launch browser: {message}")]
    BrowserLaunch {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
