//! Site-level configuration constants and the per-page override block.

use crate::{UiError, UiResult};
use log::{debug, warn};
use serde::Deserialize;

// Layout
pub const MOBILE_BREAKPOINT_PX: f64 = 768.0;
pub const RESIZE_DEBOUNCE_MS: u32 = 250;

// Scroll reactions
pub const HEADER_HIDE_THRESHOLD_PX: f64 = 100.0;
pub const SCROLL_TOP_THRESHOLD_PX: f64 = 500.0;
pub const PARALLAX_RATIO: f64 = 0.5;

// Counters
pub const COUNTER_DURATION_MS: u32 = 2000;
pub const COUNTER_TICK_MS: u32 = 50;

// Loading overlay
pub const LOADING_TICK_MS: u32 = 100;
pub const LOADING_MAX_INCREMENT: f64 = 30.0;
pub const LOADING_HIDE_DELAY_MS: u32 = 500;
pub const LOADING_REMOVE_DELAY_MS: u32 = 300;

// Page switching
pub const PAGE_ANIMATION_DELAY_MS: u32 = 100;
pub const HOME_PAGE: &str = "home";

// Transient feedback
pub const LABEL_RESET_MS: u32 = 2000;
pub const NOTIFY_RESET_MS: u32 = 3000;
pub const SHAKE_MS: u32 = 500;
pub const RIPPLE_MS: u32 = 600;
pub const MODAL_FADE_MS: u32 = 300;
pub const RAINBOW_MS: u32 = 4000;

// Reveal transitions
pub const REVEAL_TRANSITION: &str = "all 0.6s cubic-bezier(0.16, 1, 0.3, 1)";
pub const REVEAL_OFFSET: &str = "translateY(30px)";

/// Up, Up, Down, Down, Left, Right, Left, Right, B, A
pub const KONAMI_SEQUENCE: [u32; 10] = [38, 38, 40, 40, 37, 39, 37, 39, 66, 65];

pub const DEFAULT_PAYMENT_ID: &str = "feedpaws@upi";
pub const CONFIG_ELEMENT_ID: &str = "site-config";

/// Values a page may override through a JSON block in its markup.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteConfig {
    pub payment_id: String,
    pub mobile_breakpoint: f64,
    pub header_hide_threshold: f64,
    pub scroll_top_threshold: f64,
    pub parallax_ratio: f64,
    pub counter_duration_ms: u32,
    pub label_reset_ms: u32,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            payment_id: DEFAULT_PAYMENT_ID.to_string(),
            mobile_breakpoint: MOBILE_BREAKPOINT_PX,
            header_hide_threshold: HEADER_HIDE_THRESHOLD_PX,
            scroll_top_threshold: SCROLL_TOP_THRESHOLD_PX,
            parallax_ratio: PARALLAX_RATIO,
            counter_duration_ms: COUNTER_DURATION_MS,
            label_reset_ms: LABEL_RESET_MS,
        }
    }
}

impl SiteConfig {
    pub fn try_from_json(raw: &str) -> UiResult<Self> {
        serde_json::from_str::<SiteConfig>(raw).map_err(|e| UiError::Config(e.to_string()))
    }

    /// Parse an override block. Invalid JSON falls back to the defaults.
    pub fn from_json(raw: &str) -> Self {
        Self::try_from_json(raw).unwrap_or_else(|e| {
            warn!("Ignoring site config: {}", e);
            Self::default()
        })
    }

    /// Read `<script type="application/json" id="site-config">` from the page.
    pub fn load() -> Self {
        let raw = gloo_utils::document()
            .get_element_by_id(CONFIG_ELEMENT_ID)
            .and_then(|el| el.text_content());
        match raw {
            Some(raw) if !raw.trim().is_empty() => Self::from_json(&raw),
            _ => {
                debug!("No site config block, using defaults");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config = SiteConfig::from_json(r#"{ "paymentId": "paws@bank", "mobileBreakpoint": 900 }"#);
        assert_eq!(config.payment_id, "paws@bank");
        assert_eq!(config.mobile_breakpoint, 900.0);
        assert_eq!(config.parallax_ratio, PARALLAX_RATIO);
        assert_eq!(config.label_reset_ms, LABEL_RESET_MS);
    }

    #[test]
    fn invalid_json_falls_back_to_defaults() {
        assert_eq!(SiteConfig::from_json("{ not json"), SiteConfig::default());
        assert!(matches!(
            SiteConfig::try_from_json("[1, 2]"),
            Err(UiError::Config(_))
        ));
    }
}
