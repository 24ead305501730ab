//! Driver session boundary: the backend trait, element snapshots, and a
//! staged mock for unit tests and dry runs.
//!
//! The core assumes nothing about the backend beyond this trait: navigate,
//! find matching elements for a selector (with their visibility and
//! interactability state), dispatch click/clear/type/scroll, read text,
//! read the page title and URL. One session drives one linear sequence of
//! operations; each call completes before the next is issued.

use crate::locator::{BoundingBox, Selector};
use crate::result::ComprarResult;
use async_trait::async_trait;
use std::sync::Mutex;

/// Snapshot reference to an in-page element.
///
/// Valid only for the current DOM generation; navigation invalidates it
/// implicitly. Handles are never cached across calls; every operation
/// re-resolves through the session.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementHandle {
    id: String,
    tag: String,
    text: String,
    extent: Option<BoundingBox>,
    in_viewport: bool,
    enabled: bool,
}

impl ElementHandle {
    /// Create a handle with no geometry (present but not rendered)
    #[must_use]
    pub fn new(id: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tag: tag.into(),
            text: String::new(),
            extent: None,
            in_viewport: false,
            enabled: true,
        }
    }

    /// Attach text content
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Attach geometry; the element is assumed on screen until
    /// [`off_screen`](Self::off_screen) says otherwise
    #[must_use]
    pub fn with_extent(mut self, extent: BoundingBox) -> Self {
        self.extent = Some(extent);
        self.in_viewport = true;
        self
    }

    /// Mark the element as rendered outside the viewport
    #[must_use]
    pub fn off_screen(mut self) -> Self {
        self.in_viewport = false;
        self
    }

    /// Mark the element as present but not interactable
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Backend-assigned identifier, stable within one DOM generation
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Lowercase tag name
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Text content captured at resolution time
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Geometry, if the element is rendered
    #[must_use]
    pub const fn extent(&self) -> Option<BoundingBox> {
        self.extent
    }

    /// Whether the backend reports the element as interactable
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Attached, rendered with non-zero extent, and on screen.
    /// Presence alone is insufficient.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.in_viewport && self.extent.is_some_and(|extent| extent.has_extent())
    }
}

/// Backend capability surface required by the automation core.
///
/// Implementations: [`MockSession`] (always built) and `CdpSession`
/// (feature `browser`).
#[async_trait]
pub trait DriverSession: Send + Sync {
    /// Navigate the session to a URL
    async fn navigate(&mut self, url: &str) -> ComprarResult<()>;

    /// All elements currently matching `selector`, in document order.
    /// Zero matches is a valid result, not an error.
    async fn find_all(&self, selector: &Selector) -> ComprarResult<Vec<ElementHandle>>;

    /// Dispatch a click on the element
    async fn click(&self, element: &ElementHandle) -> ComprarResult<()>;

    /// Clear the element's current value
    async fn clear_text(&self, element: &ElementHandle) -> ComprarResult<()>;

    /// Inject text into the element
    async fn send_keys(&self, element: &ElementHandle, text: &str) -> ComprarResult<()>;

    /// Scroll until the element enters the viewport
    async fn scroll_into_view(&self, element: &ElementHandle) -> ComprarResult<()>;

    /// The element's current text content, untrimmed
    async fn read_text(&self, element: &ElementHandle) -> ComprarResult<String>;

    /// Current page title
    async fn title(&self) -> ComprarResult<String>;

    /// Current page URL
    async fn current_url(&self) -> ComprarResult<String>;

    /// Tear the session down
    async fn close(&mut self) -> ComprarResult<()>;
}

#[derive(Debug)]
struct StagedCollection {
    selector: Selector,
    elements: Vec<ElementHandle>,
    appear_after_polls: u32,
    polls: u32,
}

#[derive(Debug, Default)]
struct MockState {
    url: String,
    title: String,
    collections: Vec<StagedCollection>,
    calls: Vec<String>,
    typed: Vec<(String, String)>,
    // clicking element i of .0 removes it and element i of .1
    removal_links: Vec<(Selector, Selector)>,
}

/// In-memory driver double with staged elements and a call history.
///
/// Elements are staged per selector. A collection can be staged to appear
/// only after N polls, which lets tests exercise the resolver's bounded
/// wait loop. Clicks can be linked to removals to model cart mutation.
#[derive(Debug, Default)]
pub struct MockSession {
    state: Mutex<MockState>,
}

impl MockSession {
    /// Create an empty mock session
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title reported by [`DriverSession::title`]
    pub fn set_title(&self, title: impl Into<String>) {
        self.state.lock().unwrap().title = title.into();
    }

    /// Stage elements that match `selector` immediately
    pub fn stage(&self, selector: Selector, elements: Vec<ElementHandle>) {
        self.stage_after_polls(selector, elements, 0);
    }

    /// Stage elements that only start matching after `polls` document polls
    pub fn stage_after_polls(&self, selector: Selector, elements: Vec<ElementHandle>, polls: u32) {
        self.state.lock().unwrap().collections.push(StagedCollection {
            selector,
            elements,
            appear_after_polls: polls,
            polls: 0,
        });
    }

    /// Clicking element i of `buttons` removes it and element i of `items`
    pub fn link_removal(&self, buttons: Selector, items: Selector) {
        self.state.lock().unwrap().removal_links.push((buttons, items));
    }

    /// Full ordered call history
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Whether any recorded call starts with `prefix`
    #[must_use]
    pub fn was_called(&self, prefix: &str) -> bool {
        self.state
            .lock()
            .unwrap()
            .calls
            .iter()
            .any(|call| call.starts_with(prefix))
    }

    /// Text typed into the element with the given id, if any
    #[must_use]
    pub fn typed_into(&self, id: &str) -> Option<String> {
        self.state
            .lock()
            .unwrap()
            .typed
            .iter()
            .rev()
            .find(|(target, _)| target == id)
            .map(|(_, text)| text.clone())
    }
}

#[async_trait]
impl DriverSession for MockSession {
    async fn navigate(&mut self, url: &str) -> ComprarResult<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("navigate:{url}"));
        state.url = url.to_string();
        Ok(())
    }

    async fn find_all(&self, selector: &Selector) -> ComprarResult<Vec<ElementHandle>> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("find_all:{selector}"));
        let Some(collection) = state
            .collections
            .iter_mut()
            .find(|collection| collection.selector == *selector)
        else {
            return Ok(Vec::new());
        };
        collection.polls += 1;
        if collection.polls > collection.appear_after_polls {
            Ok(collection.elements.clone())
        } else {
            Ok(Vec::new())
        }
    }

    async fn click(&self, element: &ElementHandle) -> ComprarResult<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("click:{}", element.id()));

        let Some((collection_index, element_index)) =
            state.collections.iter().enumerate().find_map(|(ci, collection)| {
                collection
                    .elements
                    .iter()
                    .position(|staged| staged.id() == element.id())
                    .map(|ei| (ci, ei))
            })
        else {
            return Ok(());
        };

        let buttons_selector = state.collections[collection_index].selector.clone();
        let Some((_, items_selector)) = state
            .removal_links
            .iter()
            .find(|(buttons, _)| *buttons == buttons_selector)
            .cloned()
        else {
            return Ok(());
        };

        state.collections[collection_index].elements.remove(element_index);
        if let Some(items) = state
            .collections
            .iter_mut()
            .find(|collection| collection.selector == items_selector)
        {
            if element_index < items.elements.len() {
                items.elements.remove(element_index);
            }
        }
        Ok(())
    }

    async fn clear_text(&self, element: &ElementHandle) -> ComprarResult<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("clear:{}", element.id()));
        Ok(())
    }

    async fn send_keys(&self, element: &ElementHandle, text: &str) -> ComprarResult<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("type:{}", element.id()));
        state.typed.push((element.id().to_string(), text.to_string()));
        Ok(())
    }

    async fn scroll_into_view(&self, element: &ElementHandle) -> ComprarResult<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("scroll:{}", element.id()));
        // scrolling brings the staged element on screen for the next poll
        for collection in &mut state.collections {
            for staged in &mut collection.elements {
                if staged.id == element.id {
                    staged.in_viewport = true;
                }
            }
        }
        Ok(())
    }

    async fn read_text(&self, element: &ElementHandle) -> ComprarResult<String> {
        let state = self.state.lock().unwrap();
        let text = state
            .collections
            .iter()
            .flat_map(|collection| collection.elements.iter())
            .find(|staged| staged.id() == element.id())
            .map_or_else(|| element.text().to_string(), |staged| staged.text().to_string());
        Ok(text)
    }

    async fn title(&self) -> ComprarResult<String> {
        Ok(self.state.lock().unwrap().title.clone())
    }

    async fn current_url(&self) -> ComprarResult<String> {
        Ok(self.state.lock().unwrap().url.clone())
    }

    async fn close(&mut self) -> ComprarResult<()> {
        self.state.lock().unwrap().calls.push("close".to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn visible(id: &str, tag: &str) -> ElementHandle {
        ElementHandle::new(id, tag).with_extent(BoundingBox::new(0.0, 0.0, 100.0, 40.0))
    }

    mod element_handle_tests {
        use super::*;

        #[test]
        fn test_presence_alone_is_not_visible() {
            let handle = ElementHandle::new("el-1", "div");
            assert!(!handle.is_visible());
        }

        #[test]
        fn test_zero_extent_is_not_visible() {
            let handle = ElementHandle::new("el-1", "div")
                .with_extent(BoundingBox::new(0.0, 0.0, 0.0, 0.0));
            assert!(!handle.is_visible());
        }

        #[test]
        fn test_off_screen_is_not_visible() {
            let handle = visible("el-1", "button").off_screen();
            assert!(!handle.is_visible());
        }

        #[test]
        fn test_rendered_on_screen_is_visible() {
            assert!(visible("el-1", "button").is_visible());
        }

        #[test]
        fn test_disabled_keeps_visibility() {
            let handle = visible("el-1", "label").disabled();
            assert!(handle.is_visible());
            assert!(!handle.is_enabled());
        }
    }

    mod mock_session_tests {
        use super::*;

        #[tokio::test]
        async fn test_unstaged_selector_finds_nothing() {
            let session = MockSession::new();
            let found = session.find_all(&Selector::css("div.ghost")).await.unwrap();
            assert!(found.is_empty());
            assert!(session.was_called("find_all:css:div.ghost"));
        }

        #[tokio::test]
        async fn test_staged_elements_found_in_order() {
            let session = MockSession::new();
            let selector = Selector::css("article.product-card");
            session.stage(
                selector.clone(),
                vec![visible("card-1", "article"), visible("card-2", "article")],
            );
            let found = session.find_all(&selector).await.unwrap();
            assert_eq!(found.len(), 2);
            assert_eq!(found[0].id(), "card-1");
        }

        #[tokio::test]
        async fn test_delayed_collection_needs_polls() {
            let session = MockSession::new();
            let selector = Selector::css("div.late");
            session.stage_after_polls(selector.clone(), vec![visible("late-1", "div")], 2);

            assert!(session.find_all(&selector).await.unwrap().is_empty());
            assert!(session.find_all(&selector).await.unwrap().is_empty());
            assert_eq!(session.find_all(&selector).await.unwrap().len(), 1);
        }

        #[tokio::test]
        async fn test_navigate_records_and_updates_url() {
            let mut session = MockSession::new();
            session.navigate("https://shop.example.com").await.unwrap();
            assert_eq!(
                session.current_url().await.unwrap(),
                "https://shop.example.com"
            );
            assert!(session.was_called("navigate:"));
        }

        #[tokio::test]
        async fn test_typed_text_is_recorded() {
            let session = MockSession::new();
            let input = visible("search", "input");
            session.send_keys(&input, "sneakers").await.unwrap();
            assert_eq!(session.typed_into("search").as_deref(), Some("sneakers"));
        }

        #[tokio::test]
        async fn test_scroll_brings_element_on_screen() {
            let session = MockSession::new();
            let selector = Selector::css("button.below-fold");
            let element = visible("btn-1", "button").off_screen();
            session.stage(selector.clone(), vec![element.clone()]);

            assert!(!session.find_all(&selector).await.unwrap()[0].is_visible());
            session.scroll_into_view(&element).await.unwrap();
            assert!(session.find_all(&selector).await.unwrap()[0].is_visible());
        }

        #[tokio::test]
        async fn test_linked_removal_shrinks_both_collections() {
            let session = MockSession::new();
            let buttons = Selector::css("button.delete");
            let items = Selector::css("div.cart-item");
            session.stage(
                buttons.clone(),
                vec![visible("del-1", "button"), visible("del-2", "button")],
            );
            session.stage(
                items.clone(),
                vec![visible("item-1", "div"), visible("item-2", "div")],
            );
            session.link_removal(buttons.clone(), items.clone());

            let first = session.find_all(&buttons).await.unwrap()[0].clone();
            session.click(&first).await.unwrap();

            assert_eq!(session.find_all(&buttons).await.unwrap().len(), 1);
            let remaining = session.find_all(&items).await.unwrap();
            assert_eq!(remaining.len(), 1);
            assert_eq!(remaining[0].id(), "item-2");
        }

        #[tokio::test]
        async fn test_read_text_prefers_current_staged_state() {
            let session = MockSession::new();
            let selector = Selector::css("h1.product-title");
            session.stage(
                selector.clone(),
                vec![visible("title", "h1").with_text("  Runner X  ")],
            );
            let handle = session.find_all(&selector).await.unwrap()[0].clone();
            assert_eq!(session.read_text(&handle).await.unwrap(), "  Runner X  ");
        }
    }
}
