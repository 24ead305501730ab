//! Real browser session over the Chrome DevTools Protocol.
//!
//! Compiled with the `browser` feature; uses chromiumoxide for full CDP
//! support. Element queries run as JavaScript against the live document:
//! every match is stamped with a ref attribute so later interactions can
//! address exactly the element a resolution returned, within the same DOM
//! generation. Without the feature the crate builds mock-only.

/// Launch options for the real browser backend
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Run in headless mode
    pub headless: bool,
    /// Viewport width
    pub viewport_width: u32,
    /// Viewport height
    pub viewport_height: u32,
    /// Path to chromium binary (None = auto-detect)
    pub chromium_path: Option<String>,
    /// User agent string
    pub user_agent: Option<String>,
    /// Sandbox mode (disable for containers)
    pub sandbox: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            headless: true,
            viewport_width: 1280,
            viewport_height: 800,
            chromium_path: None,
            user_agent: None,
            sandbox: true,
        }
    }
}

impl SessionConfig {
    /// Set headless mode
    #[must_use]
    pub const fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Set viewport dimensions
    #[must_use]
    pub const fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    /// Set chromium path
    #[must_use]
    pub fn with_chromium_path(mut self, path: impl Into<String>) -> Self {
        self.chromium_path = Some(path.into());
        self
    }

    /// Set user agent
    #[must_use]
    pub fn with_user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Disable sandbox (for containers/CI)
    #[must_use]
    pub const fn with_no_sandbox(mut self) -> Self {
        self.sandbox = false;
        self
    }
}

#[cfg(feature = "browser")]
mod cdp {
    use super::SessionConfig;
    use crate::locator::{BoundingBox, Selector};
    use crate::result::{ComprarError, ComprarResult};
    use crate::session::{DriverSession, ElementHandle};
    use async_trait::async_trait;
    use chromiumoxide::browser::{Browser, BrowserConfig};
    use chromiumoxide::page::Page;
    use futures::StreamExt;
    use serde::Deserialize;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    const REF_ATTR: &str = "data-comprar-ref";

    /// Raw element record returned by the harvest script
    #[derive(Debug, Deserialize)]
    struct Harvested {
        id: String,
        tag: String,
        text: String,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        in_viewport: bool,
        enabled: bool,
    }

    /// Live CDP-backed driver session
    #[derive(Debug)]
    pub struct CdpSession {
        page: Arc<Mutex<Page>>,
        browser: Arc<Mutex<Browser>>,
        #[allow(dead_code)]
        handler: tokio::task::JoinHandle<()>,
    }

    impl CdpSession {
        /// Launch a browser and open a blank page
        ///
        /// # Errors
        ///
        /// Returns [`ComprarError::BrowserLaunch`] if the browser cannot
        /// be started.
        pub async fn launch(config: SessionConfig) -> ComprarResult<Self> {
            let mut builder = BrowserConfig::builder();

            if !config.headless {
                builder = builder.with_head();
            }
            if !config.sandbox {
                builder = builder.no_sandbox();
            }
            if let Some(ref path) = config.chromium_path {
                builder = builder.chrome_executable(path);
            }
            if let Some(ref ua) = config.user_agent {
                builder = builder.arg(format!("--user-agent={ua}"));
            }
            builder = builder.window_size(config.viewport_width, config.viewport_height);

            let cdp_config = builder
                .build()
                .map_err(|e| ComprarError::BrowserLaunch {
                    message: e.to_string(),
                })?;

            let (browser, mut handler) =
                Browser::launch(cdp_config)
                    .await
                    .map_err(|e| ComprarError::BrowserLaunch {
                        message: e.to_string(),
                    })?;

            let handle = tokio::spawn(async move {
                while let Some(event) = handler.next().await {
                    if event.is_err() {
                        break;
                    }
                }
            });

            let page = browser
                .new_page("about:blank")
                .await
                .map_err(|e| ComprarError::Session {
                    message: e.to_string(),
                })?;

            Ok(Self {
                page: Arc::new(Mutex::new(page)),
                browser: Arc::new(Mutex::new(browser)),
                handler: handle,
            })
        }

        async fn eval<T: serde::de::DeserializeOwned>(&self, script: &str) -> ComprarResult<T> {
            let page = self.page.lock().await;
            let result = page.evaluate(script).await.map_err(|e| ComprarError::Session {
                message: e.to_string(),
            })?;
            result.into_value().map_err(|e| ComprarError::Session {
                message: e.to_string(),
            })
        }

        fn harvest_script(selector: &Selector) -> String {
            format!(
                r#"(() => {{
    const found = {collector};
    return found.map((el) => {{
        if (!el.hasAttribute('{attr}')) {{
            window.__comprar_seq = (window.__comprar_seq || 0) + 1;
            el.setAttribute('{attr}', 'ref-' + window.__comprar_seq);
        }}
        const rect = el.getBoundingClientRect();
        const style = window.getComputedStyle(el);
        const rendered = style.visibility !== 'hidden' && style.display !== 'none';
        const onScreen = rect.bottom > 0 && rect.right > 0 &&
            rect.top < window.innerHeight && rect.left < window.innerWidth;
        return {{
            id: el.getAttribute('{attr}'),
            tag: el.tagName.toLowerCase(),
            text: (el.innerText || el.textContent || ''),
            x: rect.x, y: rect.y, width: rect.width, height: rect.height,
            in_viewport: rendered && onScreen,
            enabled: !el.disabled && !(el.className + '').includes('disabled'),
        }};
    }});
}})()"#,
                collector = selector.to_collector_js(),
                attr = REF_ATTR,
            )
        }

        fn by_ref(element: &ElementHandle) -> String {
            format!(
                "document.querySelector('[{REF_ATTR}=\"{id}\"]')",
                id = element.id()
            )
        }

        async fn with_element(&self, element: &ElementHandle, action: &str) -> ComprarResult<()> {
            let script = format!(
                "(() => {{ const el = {lookup}; if (!el) return false; {action} return true; }})()",
                lookup = Self::by_ref(element),
                action = action,
            );
            let found: bool = self.eval(&script).await?;
            if found {
                Ok(())
            } else {
                Err(ComprarError::Session {
                    message: format!("stale element handle: {}", element.id()),
                })
            }
        }
    }

    #[async_trait]
    impl DriverSession for CdpSession {
        async fn navigate(&mut self, url: &str) -> ComprarResult<()> {
            let page = self.page.lock().await;
            page.goto(url).await.map_err(|e| ComprarError::Navigation {
                url: url.to_string(),
                message: e.to_string(),
            })?;
            Ok(())
        }

        async fn find_all(&self, selector: &Selector) -> ComprarResult<Vec<ElementHandle>> {
            let harvested: Vec<Harvested> = self.eval(&Self::harvest_script(selector)).await?;
            Ok(harvested
                .into_iter()
                .map(|raw| {
                    let mut handle = ElementHandle::new(raw.id, raw.tag)
                        .with_text(raw.text)
                        .with_extent(BoundingBox::new(raw.x, raw.y, raw.width, raw.height));
                    if !raw.in_viewport {
                        handle = handle.off_screen();
                    }
                    if !raw.enabled {
                        handle = handle.disabled();
                    }
                    handle
                })
                .collect())
        }

        async fn click(&self, element: &ElementHandle) -> ComprarResult<()> {
            self.with_element(element, "el.click();").await
        }

        async fn clear_text(&self, element: &ElementHandle) -> ComprarResult<()> {
            self.with_element(
                element,
                "el.value = ''; el.dispatchEvent(new Event('input', { bubbles: true }));",
            )
            .await
        }

        async fn send_keys(&self, element: &ElementHandle, text: &str) -> ComprarResult<()> {
            let payload = serde_json::to_string(text)?;
            let action = format!(
                "el.focus(); el.value = el.value + {payload}; \
                 el.dispatchEvent(new Event('input', {{ bubbles: true }}));"
            );
            self.with_element(element, &action).await
        }

        async fn scroll_into_view(&self, element: &ElementHandle) -> ComprarResult<()> {
            self.with_element(
                element,
                "el.scrollIntoView({ block: 'center', inline: 'center' });",
            )
            .await
        }

        async fn read_text(&self, element: &ElementHandle) -> ComprarResult<String> {
            let script = format!(
                "(() => {{ const el = {lookup}; return el ? (el.innerText || el.textContent || '') : ''; }})()",
                lookup = Self::by_ref(element),
            );
            self.eval(&script).await
        }

        async fn title(&self) -> ComprarResult<String> {
            self.eval("document.title").await
        }

        async fn current_url(&self) -> ComprarResult<String> {
            self.eval("window.location.href").await
        }

        async fn close(&mut self) -> ComprarResult<()> {
            let mut browser = self.browser.lock().await;
            browser.close().await.map_err(|e| ComprarError::Session {
                message: e.to_string(),
            })?;
            Ok(())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_harvest_script_stamps_and_measures() {
            let script = CdpSession::harvest_script(&Selector::css("article.product-card"));
            assert!(script.contains("querySelectorAll"));
            assert!(script.contains(REF_ATTR));
            assert!(script.contains("getBoundingClientRect"));
            assert!(script.contains("in_viewport"));
        }

        #[test]
        fn test_ref_lookup_targets_stamped_attribute() {
            let element = ElementHandle::new("ref-7", "button");
            let lookup = CdpSession::by_ref(&element);
            assert!(lookup.contains("data-comprar-ref"));
            assert!(lookup.contains("ref-7"));
        }
    }
}

#[cfg(feature = "browser")]
pub use cdp::CdpSession;
