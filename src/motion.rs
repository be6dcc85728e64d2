//! Timed value animation.
//!
//! [`Tween`] maps elapsed time to a value, [`CounterTicks`] is the fixed-step
//! variant used by the interval counters. The two drivers at the bottom feed
//! either of them from `setInterval` or `requestAnimationFrame`.

use crate::utils::CounterTarget;
use crate::UiError;
use gloo_timers::callback::Interval;
use log::warn;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    Linear,
    EaseOutCubic,
}

impl Easing {
    /// Progress in `[0, 1]` mapped through the curve.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub from: f64,
    pub to: f64,
    pub duration_ms: f64,
    pub easing: Easing,
}

impl Tween {
    pub fn new(from: f64, to: f64, duration_ms: u32, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration_ms: duration_ms as f64,
            easing,
        }
    }

    pub fn is_done(&self, elapsed_ms: f64) -> bool {
        self.duration_ms <= 0.0 || elapsed_ms >= self.duration_ms
    }

    pub fn value_at(&self, elapsed_ms: f64) -> f64 {
        if self.is_done(elapsed_ms) {
            return self.to;
        }
        let progress = self.easing.apply(elapsed_ms / self.duration_ms);
        self.from + (self.to - self.from) * progress
    }

    /// Whole number to display at `elapsed_ms`: floored while running, exact
    /// once finished.
    pub fn whole_at(&self, elapsed_ms: f64) -> u64 {
        if self.is_done(elapsed_ms) {
            return self.to.max(0.0) as u64;
        }
        self.value_at(elapsed_ms).min(self.to).max(0.0).floor() as u64
    }
}

/// Fixed-step count from zero to `target`, one item per tick.
///
/// Each tick adds `target / (duration / tick)` and yields the floor; the last
/// tick yields exactly `target`.
#[derive(Debug, Clone)]
pub struct CounterTicks {
    target: u64,
    increment: f64,
    current: f64,
    finished: bool,
}

impl CounterTicks {
    pub fn new(target: u64, duration_ms: u32, tick_ms: u32) -> Self {
        let steps = (duration_ms / tick_ms.max(1)).max(1);
        Self {
            target,
            increment: target as f64 / steps as f64,
            current: 0.0,
            finished: false,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl Iterator for CounterTicks {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        if self.finished {
            return None;
        }
        self.current += self.increment;
        if self.current >= self.target as f64 {
            self.current = self.target as f64;
            self.finished = true;
            return Some(self.target);
        }
        Some((self.current.floor() as u64).min(self.target))
    }
}

/// Feed `ticks` to `on_tick` every `tick_ms` until the iterator is exhausted.
pub fn animate_ticks<I, F>(ticks: I, tick_ms: u32, mut on_tick: F)
where
    I: Iterator<Item = u64> + 'static,
    F: FnMut(u64) + 'static,
{
    let mut ticks = ticks.peekable();
    let handle: Rc<RefCell<Option<Interval>>> = Rc::new(RefCell::new(None));
    let handle_inner = handle.clone();
    let interval = Interval::new(tick_ms, move || {
        if let Some(value) = ticks.next() {
            on_tick(value);
        }
        if ticks.peek().is_none() {
            // Dropping the interval clears it.
            handle_inner.borrow_mut().take();
        }
    });
    *handle.borrow_mut() = Some(interval);
}

fn request_frame(callback: &Closure<dyn FnMut(f64)>) {
    if let Err(e) = gloo_utils::window().request_animation_frame(callback.as_ref().unchecked_ref())
    {
        warn!("requestAnimationFrame failed: {}", UiError::from(e));
    }
}

/// Drive `tween` on animation frames, handing `on_frame` the elapsed time
/// until the tween completes. The final call always has `elapsed >= duration`.
pub fn animate_frames<F>(tween: Tween, mut on_frame: F)
where
    F: FnMut(&Tween, f64) + 'static,
{
    let frame: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let frame_inner = frame.clone();
    let mut started: Option<f64> = None;

    *frame.borrow_mut() = Some(Closure::<dyn FnMut(f64)>::new(move |now: f64| {
        let start = *started.get_or_insert(now);
        let elapsed = now - start;
        on_frame(&tween, elapsed);
        if tween.is_done(elapsed) {
            frame_inner.borrow_mut().take();
        } else if let Some(callback) = frame_inner.borrow().as_ref() {
            request_frame(callback);
        }
    }));

    if let Some(callback) = frame.borrow().as_ref() {
        request_frame(callback);
    };
}

/// Interval-driven counter used on the multi-page site.
pub fn count_up_stepped(el: HtmlElement, target: CounterTarget, duration_ms: u32, tick_ms: u32) {
    let ticks = CounterTicks::new(target.value, duration_ms, tick_ms);
    animate_ticks(ticks, tick_ms, move |value| {
        el.set_text_content(Some(&target.render(value)));
    });
}

/// Frame-synchronised counter used on the landing page.
pub fn count_up_smooth(el: HtmlElement, target: CounterTarget, duration_ms: u32) {
    let tween = Tween::new(0.0, target.value as f64, duration_ms, Easing::EaseOutCubic);
    animate_frames(tween, move |tween, elapsed| {
        el.set_text_content(Some(&target.render(tween.whole_at(elapsed))));
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_ticks_end_exactly_on_target() {
        let values: Vec<u64> = CounterTicks::new(250, 2000, 50).collect();
        assert_eq!(values.len(), 40);
        assert_eq!(*values.last().unwrap(), 250);
        assert!(values.iter().all(|&v| v <= 250));
        assert!(values.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn counter_ticks_floor_uneven_increments() {
        // 7 / 3 steps = 2.333.. per tick
        let values: Vec<u64> = CounterTicks::new(7, 150, 50).collect();
        assert_eq!(values, vec![2, 4, 7]);
    }

    #[test]
    fn zero_target_finishes_immediately() {
        let mut ticks = CounterTicks::new(0, 2000, 50);
        assert_eq!(ticks.next(), Some(0));
        assert!(ticks.is_finished());
        assert_eq!(ticks.next(), None);
    }

    #[test]
    fn tween_snaps_to_target_and_never_overshoots() {
        let tween = Tween::new(0.0, 250.0, 2000, Easing::EaseOutCubic);
        for step in 0..=40 {
            let elapsed = step as f64 * 50.0;
            assert!(tween.whole_at(elapsed) <= 250);
        }
        assert_eq!(tween.whole_at(1999.0), 249);
        assert_eq!(tween.whole_at(2000.0), 250);
        assert_eq!(tween.whole_at(5000.0), 250);
    }

    #[test]
    fn linear_tween_is_proportional() {
        let tween = Tween::new(10.0, 20.0, 1000, Easing::Linear);
        assert_eq!(tween.value_at(0.0), 10.0);
        assert_eq!(tween.value_at(500.0), 15.0);
        assert!(!tween.is_done(999.0));
        assert!(tween.is_done(1000.0));
    }

    #[test]
    fn easing_clamps_out_of_range_progress() {
        assert_eq!(Easing::EaseOutCubic.apply(-1.0), 0.0);
        assert_eq!(Easing::EaseOutCubic.apply(2.0), 1.0);
        assert!(Easing::EaseOutCubic.apply(0.5) > 0.5);
    }
}
