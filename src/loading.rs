//! Simulated loading overlay.
//!
//! The bar does not track real resources; it grows by a random amount every
//! tick until it reaches 100, then the overlay fades out and is removed.

use crate::config::{
    LOADING_HIDE_DELAY_MS, LOADING_MAX_INCREMENT, LOADING_REMOVE_DELAY_MS, LOADING_TICK_MS,
};
use crate::dom;
use gloo_timers::callback::Interval;
use log::{debug, info};
use rand::Rng;
use std::cell::RefCell;
use std::rc::Rc;

pub const MAX_PROGRESS: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LoadingStep {
    Running(f64),
    Complete,
}

#[derive(Debug, Clone, Default)]
pub struct LoadingProgress {
    progress: f64,
}

impl LoadingProgress {
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Add `increment`; clamps to 100 and reports completion there.
    pub fn advance(&mut self, increment: f64) -> LoadingStep {
        self.progress += increment.max(0.0);
        if self.progress >= MAX_PROGRESS {
            self.progress = MAX_PROGRESS;
            LoadingStep::Complete
        } else {
            LoadingStep::Running(self.progress)
        }
    }

    /// Advance by a random increment in `[0, LOADING_MAX_INCREMENT)`.
    pub fn advance_random<R: Rng + ?Sized>(&mut self, rng: &mut R) -> LoadingStep {
        self.advance(rng.random::<f64>() * LOADING_MAX_INCREMENT)
    }
}

/// Run the overlay sequence, calling `on_done` once the overlay is gone.
///
/// Without an overlay in the markup `on_done` runs straight away.
pub fn simulate<F>(on_done: F)
where
    F: FnOnce() + 'static,
{
    let Some(screen) = dom::by_id("loading-screen") else {
        debug!("No loading screen on this page");
        on_done();
        return;
    };
    let bar = dom::query(".loading-progress");

    let mut progress = LoadingProgress::default();
    let mut on_done = Some(on_done);
    let handle: Rc<RefCell<Option<Interval>>> = Rc::new(RefCell::new(None));
    let handle_inner = handle.clone();

    let interval = Interval::new(LOADING_TICK_MS, move || {
        let step = progress.advance_random(&mut rand::rng());
        if let Some(bar) = &bar {
            dom::set_style(bar, "width", &format!("{}%", progress.progress()));
        }
        if step != LoadingStep::Complete {
            return;
        }

        handle_inner.borrow_mut().take();
        info!("Loading sequence complete");
        let screen = screen.clone();
        let on_done = on_done.take();
        dom::after(LOADING_HIDE_DELAY_MS, move || {
            dom::add_class(&screen, "hidden");
            dom::after(LOADING_REMOVE_DELAY_MS, move || {
                screen.remove();
                if let Some(on_done) = on_done {
                    on_done();
                }
            });
        });
    });
    *handle.borrow_mut() = Some(interval);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn clamps_at_one_hundred() {
        let mut progress = LoadingProgress::default();
        assert_eq!(progress.advance(60.0), LoadingStep::Running(60.0));
        assert_eq!(progress.advance(55.0), LoadingStep::Complete);
        assert_eq!(progress.progress(), MAX_PROGRESS);
    }

    #[test]
    fn negative_increments_are_ignored() {
        let mut progress = LoadingProgress::default();
        progress.advance(-10.0);
        assert_eq!(progress.progress(), 0.0);
    }

    #[test]
    fn random_run_completes_with_bounded_steps() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut progress = LoadingProgress::default();
        let mut previous = 0.0;
        let mut ticks = 0;
        loop {
            ticks += 1;
            match progress.advance_random(&mut rng) {
                LoadingStep::Running(p) => {
                    assert!(p - previous < LOADING_MAX_INCREMENT);
                    previous = p;
                }
                LoadingStep::Complete => break,
            }
            assert!(ticks < 10_000);
        }
        assert_eq!(progress.progress(), MAX_PROGRESS);
    }
}
