//! Mobile navigation menu.
//!
//! [`MenuState`] owns the open flag and decides what the DOM must do;
//! [`MobileMenu`] applies that to the page. The multi-page site turns the
//! `<nav>` into an overlay with inline styles and morphs the hamburger bars
//! into an X, the landing page just toggles an `active` class.

use crate::config::RESIZE_DEBOUNCE_MS;
use crate::dom;
use log::debug;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys::{Event, HtmlElement, MouseEvent};

const NAV_OVERLAY_STYLES: [(&str, &str); 10] = [
    ("display", "block"),
    ("position", "absolute"),
    ("top", "100%"),
    ("left", "0"),
    ("right", "0"),
    ("background", "white"),
    ("box-shadow", "0 4px 6px rgba(0, 0, 0, 0.1)"),
    ("border-radius", "0 0 12px 12px"),
    ("padding", "20px"),
    ("z-index", "1000"),
];

const OPEN_BARS: [(&str, &str); 3] = [
    ("transform", "rotate(45deg) translate(5px, 5px)"),
    ("opacity", "0"),
    ("transform", "rotate(-45deg) translate(7px, -6px)"),
];

const CLOSED_BARS: [(&str, &str); 3] = [
    ("transform", "none"),
    ("opacity", "1"),
    ("transform", "none"),
];

/// What the page has to do after a state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    /// Show the menu panel.
    Open,
    /// Hide the panel on a narrow viewport.
    Collapse,
    /// Wide viewport: drop every override so the desktop layout shows.
    ResetDesktop,
}

#[derive(Debug, Clone)]
pub struct MenuState {
    open: bool,
    breakpoint: f64,
}

impl MenuState {
    pub fn new(breakpoint: f64) -> Self {
        Self {
            open: false,
            breakpoint,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self, viewport_width: f64) -> Option<MenuAction> {
        if self.open {
            self.close(viewport_width)
        } else {
            self.open = true;
            Some(MenuAction::Open)
        }
    }

    /// Close without toggling. Collapsing only matters on narrow viewports.
    pub fn close(&mut self, viewport_width: f64) -> Option<MenuAction> {
        self.open = false;
        (viewport_width <= self.breakpoint).then_some(MenuAction::Collapse)
    }

    /// Above the breakpoint the menu is forced closed whatever its state.
    pub fn on_resize(&mut self, viewport_width: f64) -> Option<MenuAction> {
        if viewport_width > self.breakpoint {
            self.open = false;
            Some(MenuAction::ResetDesktop)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuStyle {
    /// Inline overlay styles plus animated hamburger bars.
    Overlay,
    /// Toggle an `active` class on the nav and the toggle button.
    ActiveClass,
}

#[derive(Clone)]
pub struct MobileMenu {
    state: Rc<RefCell<MenuState>>,
    nav: Option<HtmlElement>,
    toggle: Option<HtmlElement>,
    style: MenuStyle,
}

impl MobileMenu {
    /// Find the nav and its toggle, and wire clicks and viewport resizes.
    pub fn bind(nav_selector: &str, toggle_selector: &str, style: MenuStyle, breakpoint: f64) -> Self {
        let menu = Self {
            state: Rc::new(RefCell::new(MenuState::new(breakpoint))),
            nav: dom::query(nav_selector),
            toggle: dom::query(toggle_selector),
            style,
        };

        if menu.nav.is_none() {
            debug!("No {} on this page, mobile menu disabled", nav_selector);
        }

        if let Some(toggle) = &menu.toggle {
            let this = menu.clone();
            dom::listen::<MouseEvent, _>(toggle, "click", move |_| this.toggle());
        }

        let this = menu.clone();
        let mut on_resize = dom::debounce(RESIZE_DEBOUNCE_MS, move || {
            let action = this.state.borrow_mut().on_resize(dom::viewport_width());
            this.apply(action);
        });
        dom::listen::<Event, _>(&gloo_utils::window(), "resize", move |_| on_resize());

        menu
    }

    pub fn is_open(&self) -> bool {
        self.state.borrow().is_open()
    }

    pub fn toggle(&self) {
        let action = self.state.borrow_mut().toggle(dom::viewport_width());
        self.apply(action);
    }

    pub fn close(&self) {
        let action = self.state.borrow_mut().close(dom::viewport_width());
        self.apply(action);
    }

    fn apply(&self, action: Option<MenuAction>) {
        let (Some(action), Some(nav)) = (action, self.nav.as_ref()) else {
            return;
        };
        match self.style {
            MenuStyle::Overlay => self.apply_overlay(action, nav),
            MenuStyle::ActiveClass => self.apply_class(action, nav),
        }
    }

    fn apply_overlay(&self, action: MenuAction, nav: &HtmlElement) {
        match action {
            MenuAction::Open => {
                dom::set_styles(nav, &NAV_OVERLAY_STYLES);
                self.style_bars(&OPEN_BARS);
            }
            MenuAction::Collapse => {
                dom::set_style(nav, "display", "none");
                self.style_bars(&CLOSED_BARS);
            }
            MenuAction::ResetDesktop => {
                for (property, _) in NAV_OVERLAY_STYLES {
                    dom::set_style(nav, property, "");
                }
                self.style_bars(&CLOSED_BARS);
            }
        }
    }

    fn apply_class(&self, action: MenuAction, nav: &HtmlElement) {
        for el in std::iter::once(nav).chain(self.toggle.as_ref()) {
            match action {
                MenuAction::Open => dom::add_class(el, "active"),
                MenuAction::Collapse | MenuAction::ResetDesktop => dom::remove_class(el, "active"),
            }
        }
    }

    fn style_bars(&self, bars: &[(&str, &str); 3]) {
        let Some(toggle) = &self.toggle else {
            return;
        };
        let spans = dom::query_all_in(toggle, "span");
        for (span, (property, value)) in spans.iter().zip(bars.iter()) {
            dom::set_style(span, property, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_opens_then_collapses_on_mobile() {
        let mut state = MenuState::new(768.0);
        assert_eq!(state.toggle(375.0), Some(MenuAction::Open));
        assert!(state.is_open());
        assert_eq!(state.toggle(375.0), Some(MenuAction::Collapse));
        assert!(!state.is_open());
    }

    #[test]
    fn wide_resize_forces_closed_from_any_state() {
        let mut state = MenuState::new(768.0);
        state.toggle(375.0);
        assert_eq!(state.on_resize(1024.0), Some(MenuAction::ResetDesktop));
        assert!(!state.is_open());

        let mut closed = MenuState::new(768.0);
        assert_eq!(closed.on_resize(769.0), Some(MenuAction::ResetDesktop));
        assert!(!closed.is_open());
    }

    #[test]
    fn narrow_resize_leaves_menu_alone() {
        let mut state = MenuState::new(768.0);
        state.toggle(375.0);
        assert_eq!(state.on_resize(768.0), None);
        assert!(state.is_open());
    }

    #[test]
    fn close_clears_flag_even_on_desktop() {
        let mut state = MenuState::new(768.0);
        state.toggle(375.0);
        assert_eq!(state.close(1200.0), None);
        assert!(!state.is_open());
        // The next click opens again instead of needing two.
        assert_eq!(state.toggle(375.0), Some(MenuAction::Open));
    }
}
