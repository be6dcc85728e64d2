//! Reveal-on-scroll.
//!
//! Each [`observe_once`] call creates one `IntersectionObserver` whose
//! callback fires at most once per element. After that the element is
//! marked `animated` and unobserved, and later intersections are ignored.

use crate::config::{REVEAL_OFFSET, REVEAL_TRANSITION};
use crate::dom;
use crate::UiResult;
use log::debug;
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

pub const ANIMATED_CLASS: &str = "animated";

/// Which keys have already been revealed.
#[derive(Debug, Default)]
pub struct RevealGate {
    next_key: u32,
    revealed: HashSet<u32>,
}

impl RevealGate {
    pub fn register(&mut self) -> u32 {
        let key = self.next_key;
        self.next_key += 1;
        key
    }

    /// `true` only for the first intersecting report of `key`.
    pub fn admit(&mut self, key: u32, intersecting: bool) -> bool {
        intersecting && self.revealed.insert(key)
    }

    pub fn is_revealed(&self, key: u32) -> bool {
        self.revealed.contains(&key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealOptions {
    /// Distinguishes observers that watch the same element.
    pub name: &'static str,
    pub threshold: f64,
    pub root_margin: &'static str,
}

impl RevealOptions {
    pub const CARDS: RevealOptions = RevealOptions {
        name: "cards",
        threshold: 0.1,
        root_margin: "0px 0px -50px 0px",
    };
    pub const COUNTERS: RevealOptions = RevealOptions {
        name: "counters",
        threshold: 0.5,
        root_margin: "0px",
    };
    pub const ACCENTS: RevealOptions = RevealOptions {
        name: "accents",
        threshold: 0.1,
        root_margin: "0px",
    };

    fn key_attribute(&self) -> String {
        format!("data-reveal-{}", self.name)
    }
}

/// Call `on_reveal` the first time each element scrolls into view.
pub fn observe_once<F>(elements: Vec<HtmlElement>, options: RevealOptions, mut on_reveal: F) -> UiResult<()>
where
    F: FnMut(HtmlElement) + 'static,
{
    if elements.is_empty() {
        debug!("Nothing to observe for {} reveal", options.name);
        return Ok(());
    }

    let mut gate = RevealGate::default();
    let attribute = options.key_attribute();
    for el in &elements {
        dom::set_attribute(el, &attribute, &gate.register().to_string());
    }
    let gate = Rc::new(RefCell::new(gate));

    let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
        move |entries: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let entry: IntersectionObserverEntry = entry.unchecked_into();
                let target = entry.target();
                let Some(key) = target
                    .get_attribute(&attribute)
                    .and_then(|k| k.parse::<u32>().ok())
                else {
                    continue;
                };
                if !gate.borrow_mut().admit(key, entry.is_intersecting()) {
                    continue;
                }
                observer.unobserve(&target);
                dom::add_class(&target, ANIMATED_CLASS);
                if let Ok(el) = target.dyn_into::<HtmlElement>() {
                    on_reveal(el);
                }
            }
        },
    );

    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(options.threshold));
    init.set_root_margin(options.root_margin);
    let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
    for el in &elements {
        observer.observe(el);
    }
    debug!("Observing {} {} elements", elements.len(), options.name);

    callback.forget();
    Ok(())
}

/// Hide cards now and fade them up when they first scroll into view.
pub fn reveal_cards(selector: &str) -> UiResult<()> {
    let cards = dom::query_all(selector);
    for card in &cards {
        dom::set_styles(card, &[("opacity", "0"), ("transform", REVEAL_OFFSET)]);
    }
    observe_once(cards, RevealOptions::CARDS, |card| {
        dom::set_styles(
            &card,
            &[
                ("opacity", "1"),
                ("transform", "translateY(0)"),
                ("transition", REVEAL_TRANSITION),
            ],
        );
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_key_is_admitted_once() {
        let mut gate = RevealGate::default();
        let a = gate.register();
        let b = gate.register();
        assert_ne!(a, b);

        assert!(gate.admit(a, true));
        assert!(gate.is_revealed(a));
        // Leaving and re-entering the viewport does not re-trigger.
        assert!(!gate.admit(a, false));
        assert!(!gate.admit(a, true));
        assert!(gate.admit(b, true));
    }

    #[test]
    fn non_intersecting_reports_do_not_mark() {
        let mut gate = RevealGate::default();
        let key = gate.register();
        assert!(!gate.admit(key, false));
        assert!(!gate.is_revealed(key));
        assert!(gate.admit(key, true));
    }

    #[test]
    fn observers_use_distinct_key_attributes() {
        assert_ne!(
            RevealOptions::CARDS.key_attribute(),
            RevealOptions::ACCENTS.key_attribute()
        );
    }
}
