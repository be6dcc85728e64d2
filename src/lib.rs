//! Browser behaviour for the Feed Paws sites.
//!
//! Two independent controllers live here: [`navigator`] drives the multi-page
//! nonprofit site and [`landing`] drives the single-page Feed Paws landing page.
//! Both bind to existing markup; nothing is rendered server-side and nothing is
//! persisted. The state types behind each controller are plain Rust and are
//! tested natively, the DOM wiring only runs inside a browser.

use std::fmt;
use wasm_bindgen::JsValue;

pub mod clipboard;
pub mod components;
pub mod config;
pub mod dom;
pub mod effects;
pub mod gallery;
pub mod konami;
pub mod landing;
pub mod loading;
pub mod menu;
pub mod modal;
pub mod motion;
pub mod navigator;
pub mod newsletter;
pub mod pages;
pub mod reveal;
pub mod scroll;
pub mod utils;

pub use config::SiteConfig;

/// Everything that can go wrong while touching the page.
///
/// None of these reach the visitor: handlers log them and carry on, so the
/// worst outcome is a feature that silently does not activate.
#[derive(Debug, Clone, PartialEq)]
pub enum UiError {
    /// A selector or id the markup was expected to provide is absent.
    MissingElement(String),
    /// A browser API threw.
    Js(String),
    /// Neither clipboard path managed to copy.
    Clipboard(String),
    Config(String),
}

impl fmt::Display for UiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UiError::MissingElement(what) => write!(f, "Element not found: {}", what),
            UiError::Js(msg) => write!(f, "Browser API error: {}", msg),
            UiError::Clipboard(msg) => write!(f, "Clipboard copy failed: {}", msg),
            UiError::Config(msg) => write!(f, "Invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for UiError {}

impl From<JsValue> for UiError {
    fn from(value: JsValue) -> Self {
        UiError::Js(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

pub type UiResult<T> = Result<T, UiError>;
