//! Yew view components mounted on demand by the landing page.

use crate::utils::group_thousands;
use yew::prelude::*;

/// Thank-you line shown in the donation dialog.
pub fn donation_message(amount: u32, payment_id: &str) -> String {
    format!(
        "Your ₹{} gift keeps a street animal fed. Please send it to {} from any UPI app.",
        group_thousands(amount as u64),
        payment_id
    )
}

#[derive(Properties, PartialEq, Clone)]
pub struct DonationModalProps {
    pub amount: u32,
    pub payment_id: AttrValue,
    pub on_close: Callback<()>,
}

/// Full-screen confirmation for a chosen donation amount.
///
/// Clicking the backdrop, the × or the "Done" button all emit `on_close`.
#[function_component(DonationModal)]
pub fn donation_modal(props: &DonationModalProps) -> Html {
    let close = props.on_close.reform(|_: MouseEvent| ());
    let on_backdrop = {
        let on_close = props.on_close.clone();
        Callback::from(move |e: MouseEvent| {
            if e.target() == e.current_target() {
                on_close.emit(());
            }
        })
    };

    html! {
        <div class="donation-modal-overlay" onclick={on_backdrop}>
            <div class="donation-modal" role="dialog" aria-modal="true">
                <button class="modal-close" aria-label="Close" onclick={close.clone()}>{ "×" }</button>
                <div class="modal-icon">{ "🐾" }</div>
                <h3>{ "Thank you!" }</h3>
                <p class="modal-message">{ donation_message(props.amount, &props.payment_id) }</p>
                <div class="modal-payment-id">
                    <span>{ "UPI ID" }</span>
                    <strong>{ props.payment_id.clone() }</strong>
                </div>
                <button class="btn btn-primary" onclick={close}>{ "Done" }</button>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_names_amount_and_payment_id() {
        let text = donation_message(500, "feedpaws@upi");
        assert!(text.contains("500"));
        assert!(text.contains("feedpaws@upi"));
    }

    #[test]
    fn large_amounts_are_grouped() {
        assert!(donation_message(10_000, "x").contains("₹10,000"));
    }
}
