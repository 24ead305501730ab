//! Comprar: page-object browser automation for storefront shop-flow
//! testing.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                     COMPRAR Architecture                         │
//! ├──────────────────────────────────────────────────────────────────┤
//! │   ┌────────────┐    ┌─────────────┐    ┌───────────────┐         │
//! │   │ Scenario   │    │ Page        │    │ Driver        │         │
//! │   │ (harness)  │───►│ Objects     │───►│ Session       │         │
//! │   │            │    │ + Resolver  │    │ (CDP or mock) │         │
//! │   └────────────┘    └─────────────┘    └───────────────┘         │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The core is the synchronization substrate every page object shares: a
//! bounded-wait element [resolver](Resolver), a tolerant visibility
//! probe, humanized [interaction primitives](Interactor), and typed page
//! transitions: each navigating action consumes its page and returns the
//! next one, handing the session forward.
//!
//! Locator tables are data ([`SiteProfile`]), so a markup drift is a
//! profile update, not a code change. The driver backend is a trait
//! boundary ([`DriverSession`]); unit tests and dry runs use the built-in
//! [`MockSession`], while the `browser` feature adds a chromiumoxide CDP
//! session.
//!
//! # Example
//!
//! ```ignore
//! use comprar::{CdpSession, FlowConfig, HomePage, SessionConfig, SiteProfile};
//!
//! let session = CdpSession::launch(SessionConfig::default()).await?;
//! let home = HomePage::open(session, SiteProfile::marketplace_default(), FlowConfig::new()).await?;
//! let results = home.search("sneakers").await?;
//! assert!(results.product_count().await? > 0);
//! let product = results.open_first_product().await?;
//! let cart = product.add_to_cart().await?.go_to_cart().await?;
//! let checkout = cart.checkout().await?;
//! checkout.place_order().into_session().close().await?;
//! ```

#![warn(missing_docs)]

mod browser;
mod config;
mod interact;
mod locator;
mod profile;
mod resolver;
mod result;
mod session;

pub mod pages;

#[cfg(feature = "browser")]
pub use browser::CdpSession;
pub use browser::SessionConfig;
pub use config::FlowConfig;
pub use interact::{Interactor, JitterPolicy};
pub use locator::{
    BoundingBox, Locator, Selector, WaitBudget, DEFAULT_POLL_INTERVAL_MS,
    DEFAULT_PROBE_TIMEOUT_MS, DEFAULT_REQUIRED_TIMEOUT_MS,
};
pub use pages::{
    AuthPage, CartPage, CheckoutPage, HomePage, ProductInfo, ProductPage, SearchResultsPage,
};
pub use profile::SiteProfile;
pub use resolver::{ResolveDiagnostic, Resolver};
pub use result::{ComprarError, ComprarResult};
pub use session::{DriverSession, ElementHandle, MockSession};
