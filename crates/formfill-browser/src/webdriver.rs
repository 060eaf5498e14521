//! Live WebDriver session on top of thirtyfour.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde_json::json;
use thirtyfour::components::SelectElement;
use thirtyfour::error::WebDriverError;
use thirtyfour::prelude::*;
use tracing::debug;

use crate::error::BrowserError;
use crate::session::{classify, BrowserSession, FieldKind};

/// How often waits re-probe the page.
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Readiness condition for the first mapped field: it must be interactable,
/// not merely attached to the DOM.
const PAGE_READY_WAIT: WaitUntil = WaitUntil::Clickable;

/// Script used for controls that intercept keystrokes: writes the value
/// directly and fires an `input` event so framework bindings notice.
const SET_VALUE_SCRIPT: &str = "arguments[0].value = arguments[1]; \
     arguments[0].dispatchEvent(new Event('input', { bubbles: true }));";

/// Which readiness condition a wait is polling for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WaitUntil {
    Present,
    Visible,
    Clickable,
}

/// A session against a running WebDriver server (chromedriver by default).
pub struct WebDriverSession {
    driver: WebDriver,
}

impl WebDriverSession {
    /// Connect to the WebDriver server and start a Chrome session.
    pub async fn open(server_url: &str) -> Result<Self, BrowserError> {
        let caps = DesiredCapabilities::chrome();
        let driver = WebDriver::new(server_url, caps)
            .await
            .map_err(|e| BrowserError::SessionOpen(e.to_string()))?;
        // Failure to maximize is cosmetic.
        let _ = driver.maximize_window().await;
        Ok(Self { driver })
    }

    async fn find(&self, locator: &str) -> Result<WebElement, WebDriverError> {
        self.driver.find(By::Css(locator)).await
    }

    /// Poll until the element satisfies `until`, or the deadline passes.
    async fn wait_for(
        &self,
        locator: &str,
        timeout: Duration,
        until: WaitUntil,
    ) -> Result<WebElement, BrowserError> {
        let deadline = Instant::now() + timeout;
        loop {
            if let Ok(elem) = self.find(locator).await {
                let ready = match until {
                    WaitUntil::Present => true,
                    WaitUntil::Visible => elem.is_displayed().await?,
                    WaitUntil::Clickable => elem.is_clickable().await?,
                };
                if ready {
                    return Ok(elem);
                }
            }
            if Instant::now() >= deadline {
                return Err(BrowserError::Timeout {
                    locator: locator.to_string(),
                });
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }
}

#[async_trait]
impl BrowserSession for WebDriverSession {
    async fn navigate(&mut self, url: &str) -> Result<(), BrowserError> {
        self.driver.goto(url).await?;
        Ok(())
    }

    async fn await_ready(
        &mut self,
        locator: Option<&str>,
        timeout: Duration,
    ) -> Result<(), BrowserError> {
        match locator {
            // An interactable first mapped field is the readiness signal.
            Some(sel) => {
                self.wait_for(sel, timeout, PAGE_READY_WAIT).await?;
                Ok(())
            }
            None => {
                let deadline = Instant::now() + timeout;
                loop {
                    let state = self
                        .driver
                        .execute("return document.readyState;", vec![])
                        .await?;
                    if state.json() == &json!("complete") {
                        return Ok(());
                    }
                    if Instant::now() >= deadline {
                        return Err(BrowserError::Timeout {
                            locator: "document".to_string(),
                        });
                    }
                    tokio::time::sleep(POLL_INTERVAL).await;
                }
            }
        }
    }

    async fn probe_field(
        &mut self,
        locator: &str,
        visible: Duration,
        clickable: Duration,
    ) -> Result<FieldKind, BrowserError> {
        self.wait_for(locator, visible, WaitUntil::Visible).await?;
        let elem = self.wait_for(locator, clickable, WaitUntil::Clickable).await?;
        let tag = elem.tag_name().await?;
        let input_type = elem.attr("type").await?;
        let kind = classify(&tag, input_type.as_deref());
        debug!(locator, ?kind, "probed form field");
        Ok(kind)
    }

    async fn clear_and_type(&mut self, locator: &str, value: &str) -> Result<(), BrowserError> {
        let elem = self.find(locator).await?;
        elem.clear().await?;
        elem.send_keys(value).await?;
        Ok(())
    }

    async fn set_value_with_event(
        &mut self,
        locator: &str,
        value: &str,
    ) -> Result<(), BrowserError> {
        let elem = self.find(locator).await?;
        self.driver
            .execute(SET_VALUE_SCRIPT, vec![elem.to_json()?, json!(value)])
            .await?;
        Ok(())
    }

    async fn select_by_value(
        &mut self,
        locator: &str,
        value: &str,
    ) -> Result<bool, BrowserError> {
        let elem = self.find(locator).await?;
        let select = SelectElement::new(&elem).await?;
        match select.select_by_value(value).await {
            Ok(()) => Ok(true),
            Err(WebDriverError::NoSuchElement(_)) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn select_by_visible_text(
        &mut self,
        locator: &str,
        text: &str,
    ) -> Result<(), BrowserError> {
        let elem = self.find(locator).await?;
        let select = SelectElement::new(&elem).await?;
        match select.select_by_visible_text(text).await {
            Ok(()) => Ok(()),
            Err(WebDriverError::NoSuchElement(_)) => Err(BrowserError::NoMatchingOption {
                locator: locator.to_string(),
                value: text.to_string(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    async fn close(self) -> Result<(), BrowserError> {
        self.driver.quit().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_ready_requires_an_interactable_first_field() {
        // A present-but-disabled first field must not end the page wait early.
        assert_eq!(PAGE_READY_WAIT, WaitUntil::Clickable);
    }
}
