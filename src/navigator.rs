//! Multi-page nonprofit site.
//!
//! Wires the page switcher, loading overlay, counters, scroll reveals,
//! mobile menu and the decorative extras to the site's markup.

use crate::config::{SiteConfig, COUNTER_TICK_MS};
use crate::menu::{MenuStyle, MobileMenu};
use crate::motion;
use crate::pages::PageSwitcher;
use crate::reveal::{self, RevealOptions};
use crate::utils::CounterTarget;
use crate::{dom, effects, konami, loading, newsletter};
use log::{debug, info, warn};

const CARD_SELECTOR: &str =
    ".stat-card, .activity-card, .story-card, .mission-card, .value-card, .timeline-item, .gallery-item";
const COUNTER_SELECTOR: &str = ".stat-number";
const ACCENT_SELECTOR: &str = ".hero-title, .section-title, .timeline-item";
const FLOATING_SELECTOR: &str = ".floating-emoji";
const BUTTON_SELECTOR: &str = ".btn";

const HERO_ENTRANCE: [(&str, u32, &str); 3] = [
    (".hero-title", 200, "fadeInDown 1s cubic-bezier(0.16, 1, 0.3, 1)"),
    (".hero-subtitle", 400, "fadeInUp 1s cubic-bezier(0.16, 1, 0.3, 1)"),
    (".hero-buttons", 600, "fadeInUp 1s cubic-bezier(0.16, 1, 0.3, 1)"),
];

/// Keyframe animation for an accent element, by its classes.
///
/// Timeline items win over section titles, which win over hero titles.
pub fn accent_animation<'a, I>(classes: I) -> Option<&'static str>
where
    I: IntoIterator<Item = &'a str>,
{
    let classes: Vec<&str> = classes.into_iter().collect();
    let has = |name: &str| classes.contains(&name);
    if has("timeline-item") {
        Some("slideInLeft 0.6s cubic-bezier(0.16, 1, 0.3, 1)")
    } else if has("section-title") {
        Some("fadeInUp 0.8s cubic-bezier(0.16, 1, 0.3, 1)")
    } else if has("hero-title") {
        Some("fadeInDown 1s cubic-bezier(0.16, 1, 0.3, 1)")
    } else {
        None
    }
}

fn play_hero_entrance() {
    for (selector, delay, animation) in HERO_ENTRANCE {
        if let Some(el) = dom::query(selector) {
            dom::after(delay, move || dom::set_style(&el, "animation", animation));
        }
    }
    effects::start_floating(FLOATING_SELECTOR, 800, 200);
}

fn bind_counters(config: &SiteConfig) {
    let duration = config.counter_duration_ms;
    let result = reveal::observe_once(
        dom::query_all(COUNTER_SELECTOR),
        RevealOptions::COUNTERS,
        move |el| match el.get_attribute("data-target").and_then(|raw| CounterTarget::parse(&raw)) {
            Some(target) => motion::count_up_stepped(el, target, duration, COUNTER_TICK_MS),
            None => debug!("Counter without a numeric data-target"),
        },
    );
    if let Err(e) = result {
        warn!("Counters disabled: {}", e);
    }
}

fn bind_accents() {
    let result = reveal::observe_once(dom::query_all(ACCENT_SELECTOR), RevealOptions::ACCENTS, |el| {
        let class_name = el.class_name();
        if let Some(animation) = accent_animation(class_name.split_whitespace()) {
            dom::set_style(&el, "animation", animation);
        }
    });
    if let Err(e) = result {
        warn!("Accent animations disabled: {}", e);
    }
}

pub fn start(config: &SiteConfig) {
    info!("Starting multi-page site controller");

    let menu = MobileMenu::bind(".nav", ".hamburger", MenuStyle::Overlay, config.mobile_breakpoint);
    PageSwitcher::bind(menu);

    loading::simulate(play_hero_entrance);
    bind_counters(config);
    if let Err(e) = reveal::reveal_cards(CARD_SELECTOR) {
        warn!("Card reveal disabled: {}", e);
    }
    bind_accents();

    effects::bind_floating(FLOATING_SELECTOR);
    effects::bind_ripples(BUTTON_SELECTOR);
    effects::bind_hover_lift(BUTTON_SELECTOR);
    newsletter::bind();
    konami::bind();
}
