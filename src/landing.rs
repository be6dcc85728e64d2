//! Feed Paws landing page.

use crate::config::SiteConfig;
use crate::menu::{MenuStyle, MobileMenu};
use crate::modal::{self, DonationDialog};
use crate::reveal::{self, RevealOptions};
use crate::utils::{fragment_target, CounterTarget};
use crate::{clipboard, dom, effects, gallery, motion, scroll};
use log::{debug, info, warn};
use web_sys::MouseEvent;

const CARD_SELECTOR: &str =
    ".impact-card, .feature-card, .how-card, .donate-card, .testimonial-card, .gallery-item";
const COUNTER_SELECTOR: &str = "[data-count]";
const BUTTON_SELECTOR: &str = ".btn";
const TOUCH_SELECTOR: &str = ".btn, .donate-card, .gallery-item";

/// Page offset to scroll to so a section lands just below a fixed header.
///
/// `viewport_top` is the section's bounding-rect top, which is relative to
/// the viewport whatever the section is nested in.
pub fn section_scroll_top(viewport_top: f64, scroll_offset: f64, header_height: f64) -> f64 {
    (viewport_top + scroll_offset - header_height).max(0.0)
}

fn bind_section_links(menu: MobileMenu) {
    for anchor in dom::query_all("a[href^='#']") {
        let menu = menu.clone();
        let link = anchor.clone();
        dom::listen::<MouseEvent, _>(&anchor, "click", move |event| {
            let Some(href) = link.get_attribute("href") else {
                return;
            };
            let Some(id) = fragment_target(&href) else {
                return;
            };
            let Some(section) = dom::by_id(id) else {
                debug!("No section #{}", id);
                return;
            };
            event.prevent_default();
            let header_height = dom::query(".header")
                .map(|h| h.offset_height() as f64)
                .unwrap_or(0.0);
            let top = section.get_bounding_client_rect().top();
            dom::smooth_scroll_to(section_scroll_top(top, dom::scroll_offset(), header_height));
            menu.close();
        });
    }
}

fn bind_counters(config: &SiteConfig) {
    let duration = config.counter_duration_ms;
    let result = reveal::observe_once(
        dom::query_all(COUNTER_SELECTOR),
        RevealOptions::COUNTERS,
        move |el| match el.get_attribute("data-count").and_then(|raw| CounterTarget::parse(&raw)) {
            Some(target) => motion::count_up_smooth(el, target, duration),
            None => debug!("Counter without a numeric data-count"),
        },
    );
    if let Err(e) = result {
        warn!("Impact counters disabled: {}", e);
    }
}

pub fn start(config: &SiteConfig) {
    info!("Starting landing page controller");

    let menu = MobileMenu::bind(".nav-menu", ".nav-toggle", MenuStyle::ActiveClass, config.mobile_breakpoint);
    bind_section_links(menu);

    bind_counters(config);
    if let Err(e) = reveal::reveal_cards(CARD_SELECTOR) {
        warn!("Card reveal disabled: {}", e);
    }

    clipboard::bind(&config.payment_id, config.label_reset_ms);
    let dialog = DonationDialog::new(&config.payment_id);
    modal::bind(&dialog, config.label_reset_ms);

    gallery::bind_fallbacks();
    scroll::bind(config);

    effects::bind_ripples(BUTTON_SELECTOR);
    effects::bind_touch_feedback(TOUCH_SELECTOR);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_scroll_accounts_for_header() {
        assert_eq!(section_scroll_top(900.0, 0.0, 80.0), 820.0);
        assert_eq!(section_scroll_top(40.0, 0.0, 80.0), 0.0);
    }

    #[test]
    fn section_scroll_is_measured_from_the_document() {
        // A section 300px below the viewport top after scrolling 1200px sits
        // at 1500px in the document, whatever wrapper it is nested in.
        assert_eq!(section_scroll_top(300.0, 1200.0, 80.0), 1420.0);
        // Already scrolled past it: the rect top is negative.
        assert_eq!(section_scroll_top(-200.0, 1200.0, 80.0), 920.0);
    }
}
