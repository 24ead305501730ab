//! The search results grid.

use super::{PageContext, ProductPage};
use crate::result::{ComprarError, ComprarResult};
use crate::session::DriverSession;

const PAGE: &str = "search";

/// Search results: product cards, list-level cart actions, sorting.
#[derive(Debug)]
pub struct SearchResultsPage<S> {
    pub(crate) ctx: PageContext<S>,
}

impl<S: DriverSession> SearchResultsPage<S> {
    /// Number of product cards currently rendered. Zero is a valid,
    /// informative answer, so it never raises.
    pub async fn product_count(&self) -> ComprarResult<usize> {
        let locator = self.ctx.locator(PAGE, "product_cards")?;
        let cards = self.ctx.resolver().resolve_all(&locator, self.ctx.config.probe).await?;
        Ok(cards.len())
    }

    /// Names of the first `limit` products.
    pub async fn product_names(&self, limit: usize) -> ComprarResult<Vec<String>> {
        let locator = self.ctx.locator(PAGE, "product_names")?;
        let elements = self.ctx.resolver().resolve_all(&locator, self.ctx.config.probe).await?;
        let mut names = Vec::new();
        for element in elements.iter().take(limit) {
            names.push(self.ctx.session.read_text(element).await?.trim().to_string());
        }
        Ok(names)
    }

    /// Open the first result. Raises [`ComprarError::NoProductsFound`]
    /// when the grid is empty; here emptiness itself is the failure.
    pub async fn open_first_product(self) -> ComprarResult<ProductPage<S>> {
        let locator = self.ctx.locator(PAGE, "product_cards")?;
        let cards = self.ctx.resolver().resolve_all(&locator, self.ctx.config.probe).await?;
        let Some(first) = cards.first() else {
            return Err(ComprarError::NoProductsFound {
                locator: locator.to_string(),
            });
        };
        self.ctx.interactor().click_element(first).await?;
        Ok(ProductPage { ctx: self.ctx })
    }

    /// Add the card at `index` to the cart without leaving the list.
    /// `false` when the index misses; never raises on a miss.
    pub async fn add_to_cart_from_list(&self, index: usize) -> ComprarResult<bool> {
        self.ctx.guarded_click(PAGE, "add_to_cart_buttons", index).await
    }

    /// Re-sort the grid cheapest-first. Stays on this page; a missing
    /// sort control means the results page never loaded, so this raises.
    pub async fn sort_by_price_ascending(&self) -> ComprarResult<()> {
        let sort = self.ctx.locator(PAGE, "sort_button")?;
        let option = self.ctx.locator(PAGE, "price_ascending_option")?;
        let interactor = self.ctx.interactor();
        interactor.click(&sort).await?;
        interactor.click(&option).await
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

    fn results_with_cards(count: usize) -> SearchResultsPage<MockSession> {
        let session = MockSession::new();
        let cards = (0..count)
            .map(|i| visible(&format!("card-{i}"), "article"))
            .collect();
        session.stage(selector("search", "product_cards"), cards);
        SearchResultsPage { ctx: context(session) }
    }

    #[tokio::test]
    async fn test_product_count_counts_cards() {
        let results = results_with_cards(3);
        assert_eq!(results.product_count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_product_count_zero_is_ok() {
        let results = results_with_cards(0);
        assert_eq!(results.product_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_product_names_respects_limit() {
        let session = MockSession::new();
        session.stage(
            selector("search", "product_names"),
            vec![
                visible("name-1", "span").with_text(" Runner X "),
                visible("name-2", "span").with_text("Trail Pro"),
                visible("name-3", "span").with_text("Court Low"),
            ],
        );
        let results = SearchResultsPage { ctx: context(session) };
        let names = results.product_names(2).await.unwrap();
        assert_eq!(names, vec!["Runner X", "Trail Pro"]);
    }

    #[tokio::test]
    async fn test_open_first_product_clicks_first_card() {
        let results = results_with_cards(2);
        let product = results.open_first_product().await.unwrap();
        assert!(product.session().was_called("click:card-0"));
    }

    #[tokio::test]
    async fn test_open_first_product_raises_on_empty_grid() {
        let results = results_with_cards(0);
        let error = results.open_first_product().await.unwrap_err();
        assert!(matches!(error, ComprarError::NoProductsFound { .. }));
    }

    #[tokio::test]
    async fn test_add_to_cart_guards_index() {
        let session = MockSession::new();
        session.stage(
            selector("search", "add_to_cart_buttons"),
            vec![visible("add-0", "button"), visible("add-1", "button")],
        );
        let results = SearchResultsPage { ctx: context(session) };

        assert!(results.add_to_cart_from_list(1).await.unwrap());
        assert!(results.session().was_called("click:add-1"));
        assert!(!results.add_to_cart_from_list(5).await.unwrap());
    }

    #[tokio::test]
    async fn test_add_to_cart_scrolls_before_clicking() {
        let session = MockSession::new();
        session.stage(
            selector("search", "add_to_cart_buttons"),
            vec![visible("add-0", "button").off_screen()],
        );
        let results = SearchResultsPage { ctx: context(session) };

        assert!(results.add_to_cart_from_list(0).await.unwrap());
        let calls = results.session().calls();
        let scroll_at = calls.iter().position(|c| c == "scroll:add-0").unwrap();
        let click_at = calls.iter().position(|c| c == "click:add-0").unwrap();
        assert!(scroll_at < click_at);
    }

    #[tokio::test]
    async fn test_sort_clicks_toggle_then_option() {
        let session = MockSession::new();
        session.stage(selector("search", "sort_button"), vec![visible("sort", "button")]);
        session.stage(
            selector("search", "price_ascending_option"),
            vec![visible("cheapest", "span")],
        );
        let results = SearchResultsPage { ctx: context(session) };

        results.sort_by_price_ascending().await.unwrap();
        assert!(results.session().was_called("click:sort"));
        assert!(results.session().was_called("click:cheapest"));
    }
}
