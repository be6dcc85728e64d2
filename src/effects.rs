//! Decorative effects: button ripples, hover lift, touch feedback and
//! wandering emojis.

use crate::config::RIPPLE_MS;
use crate::dom;
use crate::UiResult;
use gloo_timers::callback::Interval;
use log::warn;
use rand::Rng;
use web_sys::{Event, HtmlElement, MouseEvent};

const RIPPLE_STYLE_ID: &str = "ripple-styles";
const RIPPLE_KEYFRAMES: &str = "
    @keyframes ripple {
        to {
            transform: scale(4);
            opacity: 0;
        }
    }
";

/// Circle drawn under the pointer, in the button's own coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ripple {
    pub size: f64,
    pub left: f64,
    pub top: f64,
}

impl Ripple {
    /// Centre a circle covering the larger side of the button on the click.
    pub fn at(rect_left: f64, rect_top: f64, width: f64, height: f64, x: f64, y: f64) -> Self {
        let size = width.max(height);
        Self {
            size,
            left: x - rect_left - size / 2.0,
            top: y - rect_top - size / 2.0,
        }
    }

    pub fn css(&self) -> String {
        format!(
            "position: absolute; width: {size}px; height: {size}px; left: {left}px; top: {top}px; \
             background: rgba(255, 255, 255, 0.3); border-radius: 50%; transform: scale(0); \
             animation: ripple 0.6s linear; pointer-events: none;",
            size = self.size,
            left = self.left,
            top = self.top,
        )
    }
}

fn spawn_ripple(button: &HtmlElement, event: &MouseEvent) -> UiResult<()> {
    let rect = button.get_bounding_client_rect();
    let ripple = Ripple::at(
        rect.left(),
        rect.top(),
        rect.width(),
        rect.height(),
        event.client_x() as f64,
        event.client_y() as f64,
    );
    let span = gloo_utils::document().create_element("span")?;
    span.set_attribute("style", &ripple.css())?;
    button.append_child(&span)?;
    dom::after(RIPPLE_MS, move || span.remove());
    Ok(())
}

/// Ripple on click for every element matching `selector`.
pub fn bind_ripples(selector: &str) {
    if let Err(e) = dom::inject_style(RIPPLE_STYLE_ID, RIPPLE_KEYFRAMES) {
        warn!("Ripple keyframes unavailable: {}", e);
    }
    for button in dom::query_all(selector) {
        let target = button.clone();
        dom::listen::<MouseEvent, _>(&button, "click", move |event| {
            if let Err(e) = spawn_ripple(&target, &event) {
                warn!("Ripple failed: {}", e);
            }
        });
    }
}

/// Slight lift while hovered.
pub fn bind_hover_lift(selector: &str) {
    for button in dom::query_all(selector) {
        let target = button.clone();
        dom::listen::<MouseEvent, _>(&button, "mouseenter", move |_| {
            dom::set_style(&target, "transform", "translateY(-2px) scale(1.02)");
        });
        let target = button.clone();
        dom::listen::<MouseEvent, _>(&button, "mouseleave", move |_| {
            dom::set_style(&target, "transform", "translateY(0) scale(1)");
        });
    }
}

/// Press-in feedback for touch screens.
pub fn bind_touch_feedback(selector: &str) {
    for el in dom::query_all(selector) {
        let target = el.clone();
        dom::listen::<Event, _>(&el, "touchstart", move |_| {
            dom::set_style(&target, "transform", "scale(0.97)");
        });
        for release in ["touchend", "touchcancel"] {
            let target = el.clone();
            dom::listen::<Event, _>(&el, release, move |_| {
                dom::set_style(&target, "transform", "");
            });
        }
    }
}

/// Randomised timing for one floating emoji.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatingMotion {
    pub delay_s: f64,
    pub duration_s: f64,
    pub relocate_every_ms: u32,
}

impl FloatingMotion {
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            delay_s: rng.random_range(0.0..2.0),
            duration_s: rng.random_range(4.0..8.0),
            relocate_every_ms: rng.random_range(8_000..12_000),
        }
    }
}

/// Random `(left, top)` in percent of the parent.
pub fn random_position<R: Rng + ?Sized>(rng: &mut R) -> (f64, f64) {
    (rng.random_range(0.0..100.0), rng.random_range(0.0..100.0))
}

pub fn bind_floating(selector: &str) {
    let mut rng = rand::rng();
    for emoji in dom::query_all(selector) {
        let motion = FloatingMotion::random(&mut rng);
        let delay = format!("{}s", motion.delay_s);
        let duration = format!("{}s", motion.duration_s);
        dom::set_styles(
            &emoji,
            &[("animation-delay", delay.as_str()), ("animation-duration", duration.as_str())],
        );
        Interval::new(motion.relocate_every_ms, move || {
            let (left, top) = random_position(&mut rand::rng());
            dom::set_style(&emoji, "left", &format!("{}%", left));
            dom::set_style(&emoji, "top", &format!("{}%", top));
        })
        .forget();
    }
}

/// Fade in each decorative emoji one after another with a looping float.
pub fn start_floating(selector: &str, first_delay_ms: u32, step_ms: u32) {
    for (index, emoji) in dom::query_all(selector).into_iter().enumerate() {
        let index = index as u32;
        let animation = format!("float {}s ease-in-out infinite", 4 + index);
        dom::after(first_delay_ms + index * step_ms, move || {
            dom::set_styles(&emoji, &[("opacity", "0.7"), ("animation", animation.as_str())]);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn ripple_is_centred_on_click() {
        let ripple = Ripple::at(100.0, 50.0, 200.0, 40.0, 150.0, 70.0);
        assert_eq!(ripple.size, 200.0);
        assert_eq!(ripple.left, -50.0);
        assert_eq!(ripple.top, -80.0);
        assert!(ripple.css().contains("width: 200px"));
        assert!(ripple.css().contains("animation: ripple 0.6s linear"));
    }

    #[test]
    fn floating_motion_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            let motion = FloatingMotion::random(&mut rng);
            assert!((0.0..2.0).contains(&motion.delay_s));
            assert!((4.0..8.0).contains(&motion.duration_s));
            assert!((8_000..12_000).contains(&motion.relocate_every_ms));
            let (left, top) = random_position(&mut rng);
            assert!((0.0..100.0).contains(&left) && (0.0..100.0).contains(&top));
        }
    }
}
