//! Single-instance donation dialog.
//!
//! The dialog is a Yew app mounted into a host `<div>` appended to `<body>`.
//! Opening a new dialog while one is showing dismisses the old one first.

use crate::components::{DonationModal, DonationModalProps};
use crate::config::MODAL_FADE_MS;
use crate::dom;
use crate::{UiError, UiResult};
use log::{debug, info, warn};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, KeyboardEvent, MouseEvent};
use yew::{AppHandle, Callback};

pub const DONATE_SELECTOR: &str = "[data-donate-amount]";

/// Holds at most one open dialog.
#[derive(Debug)]
pub struct ModalSlot<H> {
    current: Option<H>,
}

impl<H> Default for ModalSlot<H> {
    fn default() -> Self {
        Self { current: None }
    }
}

impl<H> ModalSlot<H> {
    /// Store `handle`, handing back the dialog it replaces.
    pub fn open(&mut self, handle: H) -> Option<H> {
        self.current.replace(handle)
    }

    pub fn take(&mut self) -> Option<H> {
        self.current.take()
    }

    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }
}

impl<H: DialogView> ModalSlot<H> {
    /// Show `view`, fading out the dialog it replaces. Returns whether one
    /// was replaced.
    pub fn show<S>(&mut self, view: H, scheduler: &S) -> bool
    where
        S: Scheduler + ?Sized,
    {
        match self.open(view) {
            Some(previous) => {
                fade_out(previous, scheduler);
                true
            }
            None => false,
        }
    }

    /// Fade out the open dialog, if any.
    pub fn dismiss<S>(&mut self, scheduler: &S) -> bool
    where
        S: Scheduler + ?Sized,
    {
        match self.take() {
            Some(open) => {
                fade_out(open, scheduler);
                true
            }
            None => false,
        }
    }
}

/// A mounted dialog.
pub trait DialogView: 'static {
    fn begin_fade(&self);
    /// Unmount and detach from the document.
    fn teardown(self);
}

/// Where delayed work is queued.
pub trait Scheduler {
    fn after(&self, ms: u32, task: Box<dyn FnOnce()>);
}

/// Browser timers.
pub struct TimerScheduler;

impl Scheduler for TimerScheduler {
    fn after(&self, ms: u32, task: Box<dyn FnOnce()>) {
        dom::after(ms, task);
    }
}

/// Start the fade now and tear `view` down `MODAL_FADE_MS` later.
pub fn fade_out<V, S>(view: V, scheduler: &S)
where
    V: DialogView,
    S: Scheduler + ?Sized,
{
    view.begin_fade();
    scheduler.after(MODAL_FADE_MS, Box::new(move || view.teardown()));
}

struct OpenDialog {
    host: HtmlElement,
    app: AppHandle<DonationModal>,
}

impl DialogView for OpenDialog {
    fn begin_fade(&self) {
        dom::set_style(&self.host, "opacity", "0");
    }

    fn teardown(self) {
        self.app.destroy();
        self.host.remove();
    }
}

#[derive(Clone)]
pub struct DonationDialog {
    slot: Rc<RefCell<ModalSlot<OpenDialog>>>,
    payment_id: String,
}

impl DonationDialog {
    pub fn new(payment_id: &str) -> Self {
        Self {
            slot: Rc::new(RefCell::new(ModalSlot::default())),
            payment_id: payment_id.to_string(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.slot.borrow().is_open()
    }

    pub fn open(&self, amount: u32) -> UiResult<()> {
        let document = gloo_utils::document();
        let body = document
            .body()
            .ok_or_else(|| UiError::MissingElement("body".to_string()))?;
        let host: HtmlElement = document
            .create_element("div")?
            .dyn_into()
            .map_err(|_| UiError::Js("div is not an HtmlElement".to_string()))?;
        host.set_class_name("donation-modal-host");
        let transition = format!("opacity {}ms ease", MODAL_FADE_MS);
        dom::set_styles(
            &host,
            &[
                ("position", "fixed"),
                ("inset", "0"),
                ("z-index", "2000"),
                ("opacity", "0"),
                ("transition", transition.as_str()),
            ],
        );
        body.append_child(&host)?;

        let dialog = self.clone();
        let props = DonationModalProps {
            amount,
            payment_id: self.payment_id.clone().into(),
            on_close: Callback::from(move |_| dialog.dismiss()),
        };
        let app = yew::Renderer::<DonationModal>::with_root_and_props(Element::from(host.clone()), props)
            .render();

        let fade_in = host.clone();
        dom::after(10, move || dom::set_style(&fade_in, "opacity", "1"));

        info!("Showing donation dialog for {}", amount);
        if self.slot.borrow_mut().show(OpenDialog { host, app }, &TimerScheduler) {
            debug!("Replaced an open donation dialog");
        }
        Ok(())
    }

    pub fn dismiss(&self) {
        self.slot.borrow_mut().dismiss(&TimerScheduler);
    }
}

/// Amount buttons open the dialog and briefly show a confirmation label.
/// Escape closes whatever dialog is open.
pub fn bind(dialog: &DonationDialog, label_reset_ms: u32) {
    for button in dom::query_all(DONATE_SELECTOR) {
        let amount = button
            .get_attribute("data-donate-amount")
            .and_then(|raw| raw.trim().parse::<u32>().ok());
        let Some(amount) = amount else {
            warn!("Donation button without a numeric data-donate-amount");
            continue;
        };

        let dialog = dialog.clone();
        let label = dom::FlashingLabel::capture(&button);
        dom::listen::<MouseEvent, _>(&button, "click", move |event| {
            event.prevent_default();
            if let Err(e) = dialog.open(amount) {
                warn!("Could not open donation dialog: {}", e);
                return;
            }
            label.flash("✓ Thank you!", label_reset_ms);
        });
    }

    let dialog = dialog.clone();
    dom::listen::<KeyboardEvent, _>(&gloo_utils::document(), "keydown", move |event| {
        if event.key() == "Escape" && dialog.is_open() {
            dialog.dismiss();
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    type Log = Rc<RefCell<Vec<String>>>;

    struct FakeView {
        name: &'static str,
        log: Log,
    }

    impl DialogView for FakeView {
        fn begin_fade(&self) {
            self.log.borrow_mut().push(format!("fade {}", self.name));
        }

        fn teardown(self) {
            self.log.borrow_mut().push(format!("removed {}", self.name));
        }
    }

    #[derive(Default)]
    struct ManualTimers {
        queued: RefCell<Vec<(u32, Box<dyn FnOnce()>)>>,
    }

    impl ManualTimers {
        fn delays(&self) -> Vec<u32> {
            self.queued.borrow().iter().map(|(ms, _)| *ms).collect()
        }

        fn fire_all(&self) {
            let queued: Vec<_> = self.queued.borrow_mut().drain(..).collect();
            for (_, task) in queued {
                task();
            }
        }
    }

    impl Scheduler for ManualTimers {
        fn after(&self, ms: u32, task: Box<dyn FnOnce()>) {
            self.queued.borrow_mut().push((ms, task));
        }
    }

    fn view(name: &'static str, log: &Log) -> FakeView {
        FakeView {
            name,
            log: log.clone(),
        }
    }

    #[test]
    fn dismissed_dialog_is_removed_after_the_fade() {
        let log = Log::default();
        let timers = ManualTimers::default();
        let mut slot = ModalSlot::default();

        assert!(!slot.show(view("500", &log), &timers));
        assert!(slot.dismiss(&timers));
        assert!(!slot.is_open());
        // Fading, but still in the document until the delay runs out.
        assert_eq!(*log.borrow(), vec!["fade 500"]);
        assert_eq!(timers.delays(), vec![MODAL_FADE_MS]);

        timers.fire_all();
        assert_eq!(*log.borrow(), vec!["fade 500", "removed 500"]);
    }

    #[test]
    fn showing_a_second_dialog_removes_the_first() {
        let log = Log::default();
        let timers = ManualTimers::default();
        let mut slot = ModalSlot::default();

        slot.show(view("100", &log), &timers);
        assert!(slot.show(view("500", &log), &timers));
        timers.fire_all();
        assert_eq!(*log.borrow(), vec!["fade 100", "removed 100"]);
        assert!(slot.is_open());
    }

    #[test]
    fn dismiss_without_a_dialog_schedules_nothing() {
        let timers = ManualTimers::default();
        let mut slot: ModalSlot<FakeView> = ModalSlot::default();
        assert!(!slot.dismiss(&timers));
        assert!(timers.delays().is_empty());
    }

    #[test]
    fn opening_twice_hands_back_the_first_dialog() {
        let mut slot = ModalSlot::default();
        assert_eq!(slot.open(1), None);
        assert_eq!(slot.open(2), Some(1));
        assert!(slot.is_open());
    }

    #[test]
    fn dismiss_empties_the_slot() {
        let mut slot = ModalSlot::default();
        slot.open("500");
        assert_eq!(slot.take(), Some("500"));
        assert!(!slot.is_open());
        assert_eq!(slot.take(), None);
    }
}
