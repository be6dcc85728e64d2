//! Hidden key-sequence easter egg.

use crate::config::{KONAMI_SEQUENCE, RAINBOW_MS};
use crate::dom;
use log::{info, warn};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use web_sys::KeyboardEvent;

const RAINBOW_STYLE_ID: &str = "rainbow-styles";
const RAINBOW_KEYFRAMES: &str = "
    @keyframes rainbow {
        0% { filter: hue-rotate(0deg); }
        100% { filter: hue-rotate(360deg); }
    }
";

/// Trailing buffer of the last N key codes compared against a fixed sequence.
#[derive(Debug, Clone)]
pub struct KeySequenceDetector {
    sequence: Vec<u32>,
    buffer: VecDeque<u32>,
}

impl KeySequenceDetector {
    pub fn new(sequence: &[u32]) -> Self {
        Self {
            sequence: sequence.to_vec(),
            buffer: VecDeque::with_capacity(sequence.len()),
        }
    }

    pub fn konami() -> Self {
        Self::new(&KONAMI_SEQUENCE)
    }

    /// Record a key press. Returns `true` when the buffer now equals the
    /// sequence, in which case the buffer is cleared.
    pub fn push(&mut self, key_code: u32) -> bool {
        if self.sequence.is_empty() {
            return false;
        }
        self.buffer.push_back(key_code);
        while self.buffer.len() > self.sequence.len() {
            self.buffer.pop_front();
        }
        if self.buffer.iter().eq(self.sequence.iter()) {
            self.buffer.clear();
            return true;
        }
        false
    }

    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }
}

fn celebrate() {
    if let Err(e) = dom::inject_style(RAINBOW_STYLE_ID, RAINBOW_KEYFRAMES) {
        warn!("Rainbow keyframes unavailable: {}", e);
    }
    let Some(body) = gloo_utils::document().body() else {
        return;
    };
    dom::set_style(&body, "animation", "rainbow 2s infinite");
    dom::after(RAINBOW_MS, move || dom::set_style(&body, "animation", ""));
}

/// Listen for the sequence on the whole document.
pub fn bind() {
    let detector = Rc::new(RefCell::new(KeySequenceDetector::konami()));
    dom::listen::<KeyboardEvent, _>(&gloo_utils::document(), "keydown", move |event| {
        if detector.borrow_mut().push(event.key_code()) {
            info!("Easter egg unlocked");
            celebrate();
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(detector: &mut KeySequenceDetector, codes: &[u32]) -> usize {
        codes.iter().filter(|&&c| detector.push(c)).count()
    }

    #[test]
    fn fires_once_for_exact_sequence() {
        let mut detector = KeySequenceDetector::konami();
        assert_eq!(feed(&mut detector, &KONAMI_SEQUENCE), 1);
        assert_eq!(detector.buffered(), 0);
    }

    #[test]
    fn fires_after_leading_noise() {
        let mut detector = KeySequenceDetector::konami();
        let mut codes = vec![13, 38, 65, 38];
        codes.extend_from_slice(&KONAMI_SEQUENCE);
        assert_eq!(feed(&mut detector, &codes), 1);
    }

    #[test]
    fn any_single_wrong_position_does_not_fire() {
        for position in 0..KONAMI_SEQUENCE.len() {
            let mut codes = KONAMI_SEQUENCE;
            codes[position] = 90;
            let mut detector = KeySequenceDetector::konami();
            assert_eq!(feed(&mut detector, &codes), 0, "position {}", position);
        }
    }

    #[test]
    fn buffer_is_bounded() {
        let mut detector = KeySequenceDetector::konami();
        feed(&mut detector, &[1; 25]);
        assert_eq!(detector.buffered(), KONAMI_SEQUENCE.len());
    }

    #[test]
    fn fires_again_after_reset() {
        let mut detector = KeySequenceDetector::konami();
        assert_eq!(feed(&mut detector, &KONAMI_SEQUENCE), 1);
        assert_eq!(feed(&mut detector, &KONAMI_SEQUENCE), 1);
    }
}
