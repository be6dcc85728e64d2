//! "Notify Me" sign-up buttons on the coming-soon pages.
//!
//! No request is sent anywhere; the button acknowledges the address and
//! resets itself.

use crate::config::{NOTIFY_RESET_MS, SHAKE_MS};
use crate::dom;
use log::{debug, warn};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlButtonElement, HtmlElement, HtmlInputElement, MouseEvent};

const NOTIFY_LABEL: &str = "Notify Me";
const NOTIFY_SELECTOR: &str = "[data-notify], .notify-btn";
const THANKS_LABEL: &str = "Thank You! 🎉";
const SHAKE_STYLE_ID: &str = "shake-styles";
const SHAKE_KEYFRAMES: &str = "
    @keyframes shake {
        0%, 100% { transform: translateX(0); }
        10%, 30%, 50%, 70%, 90% { transform: translateX(-5px); }
        20%, 40%, 60%, 80% { transform: translateX(5px); }
    }
";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyOutcome {
    Accepted,
    MissingEmail,
}

pub fn evaluate(email: &str) -> NotifyOutcome {
    if email.trim().is_empty() {
        NotifyOutcome::MissingEmail
    } else {
        NotifyOutcome::Accepted
    }
}

const CANDIDATE_SELECTOR: &str = "button, .btn, [data-notify], .notify-btn";

fn is_notify_button(el: &Element) -> bool {
    el.matches(NOTIFY_SELECTOR).unwrap_or(false)
        || el.text_content().map(|t| t.trim() == NOTIFY_LABEL).unwrap_or(false)
}

fn set_disabled(button: &HtmlElement, disabled: bool) {
    if let Some(b) = button.dyn_ref::<HtmlButtonElement>() {
        b.set_disabled(disabled);
    }
}

fn acknowledge(label: &dom::FlashingLabel, input: HtmlInputElement) {
    let button = label.element().clone();
    dom::set_style(&button, "background", "#28a745");
    set_disabled(&button, true);

    label.flash_then(THANKS_LABEL, NOTIFY_RESET_MS, move || {
        dom::set_style(&button, "background", "");
        set_disabled(&button, false);
        input.set_value("");
    });
}

fn shake(input: HtmlInputElement) {
    dom::set_style(&input, "animation", "shake 0.5s ease-in-out");
    dom::after(SHAKE_MS, move || dom::set_style(&input, "animation", ""));
}

fn email_field(button: &HtmlElement) -> Option<HtmlInputElement> {
    button
        .parent_element()
        .and_then(|parent| parent.query_selector("input[type='email']").ok().flatten())
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
}

pub fn bind() {
    if let Err(e) = dom::inject_style(SHAKE_STYLE_ID, SHAKE_KEYFRAMES) {
        warn!("Shake keyframes unavailable: {}", e);
    }

    let buttons = dom::query_all(CANDIDATE_SELECTOR)
        .into_iter()
        .filter(|el| is_notify_button(el));
    for button in buttons {
        let label = dom::FlashingLabel::capture(&button);
        dom::listen::<MouseEvent, _>(&button, "click", move |_| {
            let Some(input) = email_field(label.element()) else {
                debug!("Notify button without an email field");
                return;
            };
            match evaluate(&input.value()) {
                NotifyOutcome::Accepted => acknowledge(&label, input),
                NotifyOutcome::MissingEmail => shake(input),
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_email_is_rejected() {
        assert_eq!(evaluate(""), NotifyOutcome::MissingEmail);
        assert_eq!(evaluate("   "), NotifyOutcome::MissingEmail);
        assert_eq!(evaluate("friend@paws.org"), NotifyOutcome::Accepted);
    }

    #[test]
    fn thank_you_swap_comes_back_to_notify_label() {
        let mut label = dom::LabelFlash::new(NOTIFY_LABEL);
        let ticket = label.flash();
        assert_eq!(label.expire(ticket), Some(NOTIFY_LABEL));
    }
}
