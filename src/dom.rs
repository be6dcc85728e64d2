//! Thin helpers over `web_sys` shared by both controllers.
//!
//! Lookups return `Option`/`Vec` so a missing element simply switches the
//! feature off. Writes that can throw are logged and dropped.

use crate::{UiError, UiResult};
use gloo_timers::callback::Timeout;
use log::warn;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Element, Event, EventTarget, HtmlElement, NodeList, ScrollBehavior, ScrollToOptions,
};

fn collect(list: NodeList) -> Vec<HtmlElement> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect()
}

pub fn query(selector: &str) -> Option<HtmlElement> {
    gloo_utils::document()
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

pub fn require(selector: &str) -> UiResult<HtmlElement> {
    query(selector).ok_or_else(|| UiError::MissingElement(selector.to_string()))
}

pub fn by_id(id: &str) -> Option<HtmlElement> {
    gloo_utils::document()
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

pub fn query_all(selector: &str) -> Vec<HtmlElement> {
    match gloo_utils::document().query_selector_all(selector) {
        Ok(list) => collect(list),
        Err(e) => {
            warn!("Bad selector {}: {}", selector, UiError::from(e));
            Vec::new()
        }
    }
}

pub fn query_all_in(root: &Element, selector: &str) -> Vec<HtmlElement> {
    match root.query_selector_all(selector) {
        Ok(list) => collect(list),
        Err(e) => {
            warn!("Bad selector {}: {}", selector, UiError::from(e));
            Vec::new()
        }
    }
}

/// Log a failed browser call at `warn!` and keep going.
pub fn warn_on_err<T, E>(context: &str, result: Result<T, E>) -> Option<T>
where
    E: Into<UiError>,
{
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("{}: {}", context, e.into());
            None
        }
    }
}

pub fn set_style(el: &HtmlElement, property: &str, value: &str) {
    warn_on_err(
        &format!("Could not set {}", property),
        el.style().set_property(property, value),
    );
}

pub fn set_styles(el: &HtmlElement, styles: &[(&str, &str)]) {
    for (property, value) in styles {
        set_style(el, property, value);
    }
}

pub fn add_class(el: &Element, class: &str) {
    warn_on_err(&format!("Could not add class {}", class), el.class_list().add_1(class));
}

pub fn remove_class(el: &Element, class: &str) {
    warn_on_err(&format!("Could not remove class {}", class), el.class_list().remove_1(class));
}

pub fn set_attribute(el: &Element, name: &str, value: &str) {
    warn_on_err(&format!("Could not set {}", name), el.set_attribute(name, value));
}

pub fn remove_attribute(el: &Element, name: &str) {
    warn_on_err(&format!("Could not remove {}", name), el.remove_attribute(name));
}

/// Attach a listener for the lifetime of the page.
///
/// Events that are not of type `E` are ignored.
pub fn listen<E, F>(target: &EventTarget, event_name: &str, mut handler: F)
where
    E: JsCast + 'static,
    F: FnMut(E) + 'static,
{
    let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        if let Ok(event) = event.dyn_into::<E>() {
            handler(event);
        }
    });
    if let Err(e) =
        target.add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref())
    {
        warn!("Could not bind {} listener: {}", event_name, UiError::from(e));
    }
    closure.forget();
}

/// Run `f` once after `ms` milliseconds.
pub fn after<F>(ms: u32, f: F)
where
    F: FnOnce() + 'static,
{
    Timeout::new(ms, f).forget();
}

/// Wrap `f` so that a burst of calls runs it once, `ms` after the last call.
pub fn debounce<F>(ms: u32, f: F) -> impl FnMut()
where
    F: Fn() + 'static,
{
    let f = Rc::new(f);
    let mut pending: Option<Timeout> = None;
    move || {
        // Dropping a pending timeout clears it.
        drop(pending.take());
        let f = f.clone();
        pending = Some(Timeout::new(ms, move || f()));
    }
}

/// The element an event was dispatched on, if it is one.
pub fn event_element(event: &Event) -> Option<Element> {
    event.target().and_then(|t| t.dyn_into::<Element>().ok())
}

/// Append a `<style>` block to `<head>` unless one with `id` already exists.
pub fn inject_style(id: &str, css: &str) -> UiResult<()> {
    let document = gloo_utils::document();
    if document.get_element_by_id(id).is_some() {
        return Ok(());
    }
    let head = document
        .head()
        .ok_or_else(|| UiError::MissingElement("head".to_string()))?;
    let style = document.create_element("style")?;
    style.set_id(id);
    style.set_text_content(Some(css));
    head.append_child(&style)?;
    Ok(())
}

pub fn scroll_offset() -> f64 {
    gloo_utils::window().scroll_y().unwrap_or(0.0)
}

pub fn viewport_width() -> f64 {
    gloo_utils::window()
        .inner_width()
        .ok()
        .and_then(|w| w.as_f64())
        .unwrap_or(0.0)
}

pub fn smooth_scroll_to(top: f64) {
    let options = ScrollToOptions::new();
    options.set_top(top);
    options.set_behavior(ScrollBehavior::Smooth);
    gloo_utils::window().scroll_to_with_scroll_to_options(&options);
}

/// Resting label of a button plus a ticket for the latest temporary swap.
///
/// Only the most recent swap may put the resting label back, so a second
/// click inside the reset window keeps its own label for the full time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelFlash {
    resting: String,
    ticket: u32,
}

impl LabelFlash {
    pub fn new(resting: &str) -> Self {
        Self {
            resting: resting.trim().to_string(),
            ticket: 0,
        }
    }

    pub fn resting(&self) -> &str {
        &self.resting
    }

    /// Start a swap and return its ticket.
    pub fn flash(&mut self) -> u32 {
        self.ticket = self.ticket.wrapping_add(1);
        self.ticket
    }

    /// Label to restore when swap `ticket` runs out, unless a later swap
    /// has replaced it.
    pub fn expire(&self, ticket: u32) -> Option<&str> {
        (ticket == self.ticket).then_some(self.resting.as_str())
    }
}

/// A button whose text can be swapped for a while and then restored.
///
/// The resting text is read once, when the button is bound. Whatever gets
/// appended later (ripples, spinners) never ends up in the restored label.
#[derive(Clone)]
pub struct FlashingLabel {
    el: HtmlElement,
    state: Rc<RefCell<LabelFlash>>,
}

impl FlashingLabel {
    pub fn capture(el: &HtmlElement) -> Self {
        let resting = el.text_content().unwrap_or_default();
        Self {
            el: el.clone(),
            state: Rc::new(RefCell::new(LabelFlash::new(&resting))),
        }
    }

    pub fn element(&self) -> &HtmlElement {
        &self.el
    }

    pub fn flash(&self, text: &str, ms: u32) {
        self.flash_then(text, ms, || {});
    }

    /// Show `text` for `ms`, then restore the resting label and run
    /// `on_restore`. Superseded swaps do neither.
    pub fn flash_then<F>(&self, text: &str, ms: u32, on_restore: F)
    where
        F: FnOnce() + 'static,
    {
        let ticket = self.state.borrow_mut().flash();
        self.el.set_text_content(Some(text));

        let this = self.clone();
        after(ms, move || {
            let resting = this.state.borrow().expire(ticket).map(str::to_string);
            if let Some(resting) = resting {
                this.el.set_text_content(Some(&resting));
                on_restore();
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restores_the_label_captured_at_bind_time() {
        let mut label = LabelFlash::new("  Copy UPI ID ");
        let ticket = label.flash();
        assert_eq!(label.expire(ticket), Some("Copy UPI ID"));
        // Restoring twice in a row gives the same text, nothing accumulates.
        let again = label.flash();
        assert_eq!(label.expire(again), Some("Copy UPI ID"));
        assert_eq!(label.resting(), "Copy UPI ID");
    }

    #[test]
    fn only_the_latest_swap_restores() {
        let mut label = LabelFlash::new("Notify Me");
        let first = label.flash();
        let second = label.flash();
        assert_eq!(label.expire(first), None);
        assert_eq!(label.expire(second), Some("Notify Me"));
    }

    #[test]
    fn failed_calls_are_swallowed() {
        let failed: Result<(), UiError> = Err(UiError::Js("boom".to_string()));
        assert_eq!(warn_on_err("setting a class", failed), None);
        assert_eq!(warn_on_err::<_, UiError>("reading", Ok(3)), Some(3));
    }
}
