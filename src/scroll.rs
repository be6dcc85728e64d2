//! Scroll-driven header, parallax hero and scroll-to-top button.

use crate::config::SiteConfig;
use crate::dom;
use log::debug;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys::{Event, MouseEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderPosition {
    Shown,
    Hidden,
}

/// What one scroll event asks the page to show.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollFrame {
    pub header: HeaderPosition,
    /// Background offset in px while the hero is still on screen.
    pub parallax: Option<f64>,
    pub show_scroll_top: bool,
}

#[derive(Debug, Clone)]
pub struct ScrollReactor {
    last_offset: f64,
    header_threshold: f64,
    scroll_top_threshold: f64,
    parallax_ratio: f64,
}

impl ScrollReactor {
    pub fn new(config: &SiteConfig) -> Self {
        Self {
            last_offset: 0.0,
            header_threshold: config.header_hide_threshold,
            scroll_top_threshold: config.scroll_top_threshold,
            parallax_ratio: config.parallax_ratio,
        }
    }

    pub fn on_scroll(&mut self, offset: f64, hero_height: f64) -> ScrollFrame {
        let header = if offset > self.last_offset && offset > self.header_threshold {
            HeaderPosition::Hidden
        } else {
            HeaderPosition::Shown
        };
        self.last_offset = offset;

        ScrollFrame {
            header,
            parallax: (offset < hero_height).then(|| offset * self.parallax_ratio),
            show_scroll_top: offset > self.scroll_top_threshold,
        }
    }
}

/// Wire header, hero background and scroll-to-top to window scrolling.
pub fn bind(config: &SiteConfig) {
    let header = dom::query(".header");
    let hero = dom::query(".hero");
    let hero_background = dom::query(".hero-bg");
    let scroll_top = dom::query(".scroll-to-top");

    if let Some(button) = &scroll_top {
        dom::listen::<MouseEvent, _>(button, "click", |_| dom::smooth_scroll_to(0.0));
    } else {
        debug!("No scroll-to-top control");
    }

    let reactor = Rc::new(RefCell::new(ScrollReactor::new(config)));
    dom::listen::<Event, _>(&gloo_utils::window(), "scroll", move |_| {
        let hero_height = hero.as_ref().map(|h| h.offset_height() as f64).unwrap_or(0.0);
        let frame = reactor.borrow_mut().on_scroll(dom::scroll_offset(), hero_height);

        if let Some(header) = &header {
            let transform = match frame.header {
                HeaderPosition::Shown => "translateY(0)",
                HeaderPosition::Hidden => "translateY(-100%)",
            };
            dom::set_style(header, "transform", transform);
        }
        if let (Some(background), Some(offset)) = (&hero_background, frame.parallax) {
            dom::set_style(background, "transform", &format!("translateY({}px)", offset));
        }
        if let Some(button) = &scroll_top {
            if frame.show_scroll_top {
                dom::add_class(button, "visible");
            } else {
                dom::remove_class(button, "visible");
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reactor() -> ScrollReactor {
        ScrollReactor::new(&SiteConfig::default())
    }

    #[test]
    fn header_hides_only_when_scrolling_down_past_threshold() {
        let mut r = reactor();
        assert_eq!(r.on_scroll(50.0, 600.0).header, HeaderPosition::Shown);
        assert_eq!(r.on_scroll(150.0, 600.0).header, HeaderPosition::Hidden);
        assert_eq!(r.on_scroll(120.0, 600.0).header, HeaderPosition::Shown);
        assert_eq!(r.on_scroll(400.0, 600.0).header, HeaderPosition::Hidden);
    }

    #[test]
    fn parallax_applies_inside_hero_only() {
        let mut r = reactor();
        assert_eq!(r.on_scroll(200.0, 600.0).parallax, Some(100.0));
        assert_eq!(r.on_scroll(600.0, 600.0).parallax, None);
        assert_eq!(r.on_scroll(10.0, 0.0).parallax, None);
    }

    #[test]
    fn scroll_top_button_threshold() {
        let mut r = reactor();
        assert!(!r.on_scroll(500.0, 0.0).show_scroll_top);
        assert!(r.on_scroll(501.0, 0.0).show_scroll_top);
        assert!(!r.on_scroll(20.0, 0.0).show_scroll_top);
    }
}
