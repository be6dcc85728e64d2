//! Page switching for the multi-page site.
//!
//! Every `.page` element is a "page"; exactly one is shown at a time. Links
//! carrying `data-page`, and in-page `#id` links that name a page, switch
//! pages. Other `#id` links smooth-scroll within the current page.

use crate::config::{HOME_PAGE, PAGE_ANIMATION_DELAY_MS, REVEAL_OFFSET, REVEAL_TRANSITION};
use crate::dom;
use crate::menu::MobileMenu;
use crate::utils::fragment_target;
use log::debug;
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;
use web_sys::{Element, MouseEvent, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition};

const PAGE_SELECTOR: &str = ".page";
const NAV_LINK_SELECTOR: &str = ".nav-link";
const PAGE_CARDS: &str =
    ".stat-card, .activity-card, .story-card, .mission-card, .value-card, .gallery-item, .benefit-item";

/// Which page is shown. Unknown ids are ignored.
#[derive(Debug, Clone, Default)]
pub struct PageSet {
    ids: Vec<String>,
    active: Option<usize>,
    visited: HashSet<usize>,
}

impl PageSet {
    pub fn new<I, S>(ids: I, initial: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self {
            ids: ids.into_iter().map(Into::into).collect(),
            active: None,
            visited: HashSet::new(),
        };
        set.activate(initial);
        set
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|p| p == id)
    }

    pub fn active(&self) -> Option<&str> {
        self.active.map(|i| self.ids[i].as_str())
    }

    /// Make `id` the only active page. Returns `false` and changes nothing
    /// when no page has that id.
    pub fn activate(&mut self, id: &str) -> bool {
        match self.ids.iter().position(|p| p == id) {
            Some(index) => {
                self.active = Some(index);
                true
            }
            None => false,
        }
    }

    /// The active page if this is the first time it is shown, marking it
    /// as seen. The initial page counts as shown.
    pub fn take_first_visit(&mut self) -> Option<&str> {
        let index = self.active?;
        self.visited.insert(index).then(|| self.ids[index].as_str())
    }

    /// `(id, visible)` for every page, in document order.
    pub fn visibility(&self) -> impl Iterator<Item = (&str, bool)> + '_ {
        self.ids
            .iter()
            .enumerate()
            .map(move |(i, id)| (id.as_str(), Some(i) == self.active))
    }
}

/// One staggered group of an entrance animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stagger {
    pub selector: &'static str,
    /// Only match inside the page being entered.
    pub scoped: bool,
    pub delay_ms: u32,
    pub step_ms: u32,
    pub reset: &'static [(&'static str, &'static str)],
    pub reveal: &'static [(&'static str, &'static str)],
}

const CARDS: Stagger = Stagger {
    selector: PAGE_CARDS,
    scoped: true,
    delay_ms: 0,
    step_ms: 100,
    reset: &[("opacity", "0"), ("transform", REVEAL_OFFSET)],
    reveal: &[
        ("opacity", "1"),
        ("transform", "translateY(0)"),
        ("transition", REVEAL_TRANSITION),
    ],
};

const GALLERY: Stagger = Stagger {
    selector: ".gallery-item",
    scoped: false,
    delay_ms: 0,
    step_ms: 150,
    reset: &[],
    reveal: &[
        ("transform", "scale(1)"),
        ("opacity", "1"),
        ("animation", "fadeInUp 0.6s cubic-bezier(0.16, 1, 0.3, 1)"),
    ],
};

const TIMELINE: Stagger = Stagger {
    selector: ".timeline-item",
    scoped: false,
    delay_ms: 0,
    step_ms: 200,
    reset: &[],
    reveal: &[
        ("opacity", "1"),
        ("transform", "translateX(0)"),
        ("animation", "slideInLeft 0.6s cubic-bezier(0.16, 1, 0.3, 1)"),
    ],
};

const VALUE_CARDS: Stagger = Stagger {
    selector: ".value-card",
    scoped: false,
    delay_ms: 0,
    step_ms: 100,
    reset: &[],
    reveal: &[
        ("opacity", "1"),
        ("transform", "translateY(0) rotate(0deg)"),
        ("animation", "fadeInUp 0.6s cubic-bezier(0.16, 1, 0.3, 1)"),
    ],
};

const COMING_SOON: Stagger = Stagger {
    selector: ".coming-soon-content",
    scoped: false,
    delay_ms: 200,
    step_ms: 0,
    reset: &[("opacity", "0"), ("transform", "scale(0.8)")],
    reveal: &[
        ("opacity", "1"),
        ("transform", "scale(1)"),
        ("transition", "all 0.8s cubic-bezier(0.16, 1, 0.3, 1)"),
    ],
};

/// Animations played when `page` is entered.
pub fn entrance_plan(page: &str) -> Vec<Stagger> {
    let mut plan = vec![CARDS];
    match page {
        "work" => plan.push(GALLERY),
        "motive" => plan.extend([TIMELINE, VALUE_CARDS]),
        "donate" | "volunteer" => plan.push(COMING_SOON),
        _ => {}
    }
    plan
}

fn play_entrance(page: &Element, plan: &[Stagger]) {
    for stagger in plan {
        let targets = if stagger.scoped {
            dom::query_all_in(page, stagger.selector)
        } else {
            dom::query_all(stagger.selector)
        };
        for (index, el) in targets.into_iter().enumerate() {
            dom::set_styles(&el, stagger.reset);
            let reveal = stagger.reveal;
            dom::after(stagger.delay_ms + index as u32 * stagger.step_ms, move || {
                dom::set_styles(&el, reveal);
            });
        }
    }
}

/// Promote `data-src` images to `src`.
fn preload(page: &Element) {
    dom::add_class(page, "preloaded");
    for img in dom::query_all_in(page, "[data-src]") {
        if let Some(src) = img.get_attribute("data-src") {
            dom::set_attribute(&img, "src", &src);
            dom::remove_attribute(&img, "data-src");
        }
    }
}

fn highlight_nav(active: &str) {
    for link in dom::query_all(NAV_LINK_SELECTOR) {
        dom::remove_class(&link, "active");
        if link.get_attribute("data-page").as_deref() == Some(active) {
            dom::add_class(&link, "active");
        }
    }
}

fn scroll_into_view(target: &Element) {
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    options.set_block(ScrollLogicalPosition::Start);
    target.scroll_into_view_with_scroll_into_view_options(&options);
}

#[derive(Clone)]
pub struct PageSwitcher {
    pages: Rc<RefCell<PageSet>>,
    menu: MobileMenu,
}

impl PageSwitcher {
    /// Collect the pages, show the home page and start handling link clicks.
    pub fn bind(menu: MobileMenu) -> Self {
        let ids = dom::query_all(PAGE_SELECTOR)
            .into_iter()
            .map(|page| page.id())
            .filter(|id| !id.is_empty());
        let switcher = Self {
            pages: Rc::new(RefCell::new(PageSet::new(ids, HOME_PAGE))),
            menu,
        };

        highlight_nav(HOME_PAGE);
        if let Some(home) = dom::by_id(HOME_PAGE) {
            dom::set_style(&home, "display", "block");
        }
        switcher.preload_first_visit();

        let this = switcher.clone();
        dom::listen::<MouseEvent, _>(&gloo_utils::document(), "click", move |event| {
            this.on_click(&event);
        });

        switcher
    }

    fn preload_first_visit(&self) {
        let first = self.pages.borrow_mut().take_first_visit().map(str::to_string);
        if let Some(page) = first.and_then(|id| dom::by_id(&id)) {
            preload(&page);
        }
    }

    pub fn active(&self) -> Option<String> {
        self.pages.borrow().active().map(str::to_string)
    }

    /// Switch to page `id`. Unknown ids leave the current page untouched.
    pub fn show(&self, id: &str) {
        if !self.pages.borrow_mut().activate(id) {
            debug!("No page named {}", id);
            return;
        }

        for (page_id, visible) in self.pages.borrow().visibility() {
            let Some(page) = dom::by_id(page_id) else {
                continue;
            };
            if visible {
                dom::add_class(&page, "active");
                dom::set_style(&page, "display", "block");
            } else {
                dom::remove_class(&page, "active");
                dom::set_style(&page, "display", "none");
            }
        }

        dom::smooth_scroll_to(0.0);
        highlight_nav(id);
        self.menu.close();

        self.preload_first_visit();
        if let Some(page) = dom::by_id(id) {
            let plan = entrance_plan(id);
            dom::after(PAGE_ANIMATION_DELAY_MS, move || play_entrance(&page, &plan));
        }
    }

    fn on_click(&self, event: &MouseEvent) {
        let Some(target) = dom::event_element(event) else {
            return;
        };

        if let Ok(Some(link)) = target.closest("[data-page]") {
            event.prevent_default();
            if let Some(page) = link.get_attribute("data-page") {
                self.show(&page);
            }
            return;
        }

        let Ok(Some(anchor)) = target.closest("a[href^='#']") else {
            return;
        };
        let Some(href) = anchor.get_attribute("href") else {
            return;
        };
        let Some(fragment) = fragment_target(&href) else {
            return;
        };

        event.prevent_default();
        if self.pages.borrow().contains(fragment) {
            self.show(fragment);
        } else if let Some(section) = gloo_utils::document().get_element_by_id(fragment) {
            scroll_into_view(&section);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site() -> PageSet {
        PageSet::new(["home", "work", "motive", "donate"], "home")
    }

    #[test]
    fn exactly_one_page_visible_after_each_switch() {
        let mut pages = site();
        for id in ["work", "motive", "donate", "home", "work"] {
            assert!(pages.activate(id));
            let visible: Vec<&str> = pages
                .visibility()
                .filter(|(_, shown)| *shown)
                .map(|(id, _)| id)
                .collect();
            assert_eq!(visible, vec![id]);
        }
    }

    #[test]
    fn unknown_page_is_a_no_op() {
        let mut pages = site();
        pages.activate("motive");
        assert!(!pages.activate("missing"));
        assert_eq!(pages.active(), Some("motive"));
    }

    #[test]
    fn missing_initial_page_leaves_nothing_active() {
        let pages = PageSet::new(["about"], "home");
        assert_eq!(pages.active(), None);
        assert!(pages.visibility().all(|(_, shown)| !shown));
    }

    #[test]
    fn initial_page_counts_as_a_first_visit() {
        let mut pages = site();
        assert_eq!(pages.take_first_visit(), Some("home"));
        assert_eq!(pages.take_first_visit(), None);

        pages.activate("work");
        assert_eq!(pages.take_first_visit(), Some("work"));
        pages.activate("home");
        assert_eq!(pages.take_first_visit(), None);
    }

    #[test]
    fn entrance_plans_per_page() {
        assert_eq!(entrance_plan("home"), vec![CARDS]);
        assert_eq!(entrance_plan("work"), vec![CARDS, GALLERY]);
        assert_eq!(entrance_plan("motive"), vec![CARDS, TIMELINE, VALUE_CARDS]);
        assert_eq!(entrance_plan("volunteer"), vec![CARDS, COMING_SOON]);
    }

    #[test]
    fn card_stagger_starts_hidden_and_is_scoped() {
        assert!(CARDS.scoped);
        assert!(CARDS.reset.contains(&("opacity", "0")));
        assert_eq!(COMING_SOON.delay_ms, 200);
    }
}
