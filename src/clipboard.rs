//! Copy-to-clipboard for the payment identifier.
//!
//! The async Clipboard API is tried first. When it is missing (insecure
//! context, old browser) or rejects, an off-screen textarea is selected and
//! `document.execCommand("copy")` is used instead.

use crate::dom;
use crate::{UiError, UiResult};
use futures::future::LocalBoxFuture;
use log::{debug, error, warn};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Clipboard, HtmlDocument, HtmlTextAreaElement, MouseEvent};

pub const COPY_SELECTOR: &str = "[data-copy-payment]";

/// The two ways of putting text on the clipboard.
pub trait ClipboardBackend {
    fn has_async_api(&self) -> bool;
    fn write_async(&self, text: &str) -> LocalBoxFuture<'static, UiResult<()>>;
    fn copy_legacy(&self, text: &str) -> UiResult<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied,
    CopiedWithFallback,
    Failed,
}

impl CopyOutcome {
    pub fn succeeded(self) -> bool {
        !matches!(self, CopyOutcome::Failed)
    }

    /// Temporary text for the button that triggered the copy.
    pub fn label(self) -> &'static str {
        if self.succeeded() {
            "✓ Copied!"
        } else {
            "Copy manually"
        }
    }
}

pub async fn copy_text<B>(backend: &B, text: &str) -> CopyOutcome
where
    B: ClipboardBackend + ?Sized,
{
    if backend.has_async_api() {
        match backend.write_async(text).await {
            Ok(()) => return CopyOutcome::Copied,
            Err(e) => warn!("Async clipboard rejected, falling back: {}", e),
        }
    } else {
        debug!("Async clipboard unavailable, using fallback");
    }

    match backend.copy_legacy(text) {
        Ok(()) => CopyOutcome::CopiedWithFallback,
        Err(e) => {
            error!("{}", e);
            CopyOutcome::Failed
        }
    }
}

/// The real browser clipboard.
pub struct BrowserClipboard;

impl BrowserClipboard {
    fn clipboard() -> Option<Clipboard> {
        let navigator = gloo_utils::window().navigator();
        js_sys::Reflect::get(&navigator, &JsValue::from_str("clipboard"))
            .ok()
            .filter(|value| !value.is_undefined() && !value.is_null())
            .map(|value| value.unchecked_into::<Clipboard>())
    }
}

impl ClipboardBackend for BrowserClipboard {
    fn has_async_api(&self) -> bool {
        gloo_utils::window().is_secure_context() && Self::clipboard().is_some()
    }

    fn write_async(&self, text: &str) -> LocalBoxFuture<'static, UiResult<()>> {
        let promise = Self::clipboard().map(|clipboard| clipboard.write_text(text));
        Box::pin(async move {
            let promise =
                promise.ok_or_else(|| UiError::Clipboard("navigator.clipboard missing".to_string()))?;
            JsFuture::from(promise)
                .await
                .map(|_| ())
                .map_err(|e| UiError::Clipboard(UiError::from(e).to_string()))
        })
    }

    fn copy_legacy(&self, text: &str) -> UiResult<()> {
        let document = gloo_utils::document();
        let field: HtmlTextAreaElement = document
            .create_element("textarea")?
            .dyn_into()
            .map_err(|_| UiError::Js("textarea is not an HtmlTextAreaElement".to_string()))?;
        field.set_value(text);
        field.set_attribute("readonly", "")?;
        field.set_attribute("style", "position: fixed; left: -9999px; top: 0; opacity: 0;")?;

        let body = document
            .body()
            .ok_or_else(|| UiError::MissingElement("body".to_string()))?;
        body.append_child(&field)?;
        dom::warn_on_err("Could not focus copy field", field.focus());
        field.select();

        let copied = match document.dyn_into::<HtmlDocument>() {
            Ok(html) => html.exec_command("copy").map_err(UiError::from),
            Err(_) => Err(UiError::Js("document is not an HtmlDocument".to_string())),
        };
        field.remove();

        match copied {
            Ok(true) => Ok(()),
            Ok(false) => Err(UiError::Clipboard("copy command was refused".to_string())),
            Err(e) => Err(UiError::Clipboard(e.to_string())),
        }
    }
}

/// Make every `[data-copy-payment]` button copy its attribute value, or the
/// configured payment id when the attribute is empty.
pub fn bind(payment_id: &str, label_reset_ms: u32) {
    for button in dom::query_all(COPY_SELECTOR) {
        let text = button
            .get_attribute("data-copy-payment")
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| payment_id.to_string());
        let label = dom::FlashingLabel::capture(&button);
        dom::listen::<MouseEvent, _>(&button, "click", move |event| {
            event.prevent_default();
            let text = text.clone();
            let label = label.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let outcome = copy_text(&BrowserClipboard, &text).await;
                label.flash(outcome.label(), label_reset_ms);
            });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::cell::RefCell;

    struct FakeClipboard {
        async_api: Option<UiResult<()>>,
        legacy: UiResult<()>,
        copied: RefCell<Vec<String>>,
    }

    impl FakeClipboard {
        fn new(async_api: Option<UiResult<()>>, legacy: UiResult<()>) -> Self {
            Self {
                async_api,
                legacy,
                copied: RefCell::new(Vec::new()),
            }
        }
    }

    impl ClipboardBackend for FakeClipboard {
        fn has_async_api(&self) -> bool {
            self.async_api.is_some()
        }

        fn write_async(&self, text: &str) -> LocalBoxFuture<'static, UiResult<()>> {
            let result = self.async_api.clone().unwrap_or(Ok(()));
            if result.is_ok() {
                self.copied.borrow_mut().push(text.to_string());
            }
            Box::pin(futures::future::ready(result))
        }

        fn copy_legacy(&self, text: &str) -> UiResult<()> {
            if self.legacy.is_ok() {
                self.copied.borrow_mut().push(format!("legacy:{}", text));
            }
            self.legacy.clone()
        }
    }

    fn refused() -> UiResult<()> {
        Err(UiError::Clipboard("denied".to_string()))
    }

    #[test]
    fn async_api_is_preferred() {
        let backend = FakeClipboard::new(Some(Ok(())), Ok(()));
        assert_eq!(block_on(copy_text(&backend, "feedpaws@upi")), CopyOutcome::Copied);
        assert_eq!(*backend.copied.borrow(), vec!["feedpaws@upi".to_string()]);
    }

    #[test]
    fn missing_async_api_uses_fallback_and_reports_success() {
        let backend = FakeClipboard::new(None, Ok(()));
        let outcome = block_on(copy_text(&backend, "feedpaws@upi"));
        assert_eq!(outcome, CopyOutcome::CopiedWithFallback);
        assert_eq!(outcome.label(), "✓ Copied!");
        assert_eq!(*backend.copied.borrow(), vec!["legacy:feedpaws@upi".to_string()]);
    }

    #[test]
    fn rejected_async_write_falls_back() {
        let backend = FakeClipboard::new(Some(refused()), Ok(()));
        assert_eq!(
            block_on(copy_text(&backend, "x")),
            CopyOutcome::CopiedWithFallback
        );
    }

    #[test]
    fn both_paths_failing_asks_for_manual_copy() {
        let backend = FakeClipboard::new(Some(refused()), refused());
        let outcome = block_on(copy_text(&backend, "x"));
        assert_eq!(outcome, CopyOutcome::Failed);
        assert_eq!(outcome.label(), "Copy manually");
        assert!(backend.copied.borrow().is_empty());
    }
}
