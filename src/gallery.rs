//! Placeholder tiles for gallery images that fail to load.

use crate::dom;
use crate::UiResult;
use log::{debug, warn};
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlImageElement};

pub const GALLERY_IMAGE_SELECTOR: &str = ".gallery-item img";

/// Captions by gallery position.
pub const CAPTIONS: [&str; 6] = [
    "Morning feeding run",
    "Fresh water for the pack",
    "Rescued and recovering",
    "Volunteers on the street",
    "Vaccination day",
    "Happy tails",
];
pub const DEFAULT_CAPTION: &str = "Feed Paws in action";

const GRADIENTS: [&str; 4] = [
    "linear-gradient(135deg, #ff9a56 0%, #ff6b6b 100%)",
    "linear-gradient(135deg, #4ecdc4 0%, #44a08d 100%)",
    "linear-gradient(135deg, #a18cd1 0%, #fbc2eb 100%)",
    "linear-gradient(135deg, #f6d365 0%, #fda085 100%)",
];

/// Caption for the image at `index`; past the end of the list every image
/// gets the default.
pub fn caption_for(index: usize) -> &'static str {
    CAPTIONS.get(index).copied().unwrap_or(DEFAULT_CAPTION)
}

pub fn gradient_for(index: usize) -> &'static str {
    GRADIENTS[index % GRADIENTS.len()]
}

pub fn placeholder_markup(index: usize) -> String {
    format!(
        r#"<div class="placeholder-icon">🐾</div><p class="placeholder-caption">{}</p>"#,
        caption_for(index)
    )
}

fn replace_with_placeholder(img: &HtmlImageElement, index: usize) -> UiResult<()> {
    let placeholder = gloo_utils::document().create_element("div")?;
    placeholder.set_class_name("gallery-placeholder");
    placeholder.set_attribute(
        "style",
        &format!(
            "background: {}; display: flex; flex-direction: column; align-items: center; \
             justify-content: center; min-height: 200px; color: white; border-radius: inherit;",
            gradient_for(index)
        ),
    )?;
    placeholder.set_inner_html(&placeholder_markup(index));
    img.replace_with_with_node_1(&placeholder)?;
    debug!("Gallery image {} replaced by placeholder", index);
    Ok(())
}

/// Swap every broken gallery image for a captioned placeholder.
pub fn bind_fallbacks() {
    let images = dom::query_all(GALLERY_IMAGE_SELECTOR)
        .into_iter()
        .filter_map(|el| el.dyn_into::<HtmlImageElement>().ok());

    for (index, img) in images.enumerate() {
        // Images that already failed before we got here never fire `error`.
        if img.complete() && img.natural_width() == 0 && !img.src().is_empty() {
            if let Err(e) = replace_with_placeholder(&img, index) {
                warn!("Gallery placeholder failed: {}", e);
            }
            continue;
        }

        let target = img.clone();
        dom::listen::<Event, _>(&img, "error", move |_| {
            if let Err(e) = replace_with_placeholder(&target, index) {
                warn!("Gallery placeholder failed: {}", e);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captions_follow_position_then_default() {
        assert_eq!(caption_for(0), "Morning feeding run");
        assert_eq!(caption_for(5), "Happy tails");
        assert_eq!(caption_for(6), DEFAULT_CAPTION);
        assert_eq!(caption_for(100), DEFAULT_CAPTION);
    }

    #[test]
    fn gradients_cycle() {
        assert_eq!(gradient_for(0), gradient_for(GRADIENTS.len()));
        assert_ne!(gradient_for(0), gradient_for(1));
    }

    #[test]
    fn markup_carries_caption() {
        assert!(placeholder_markup(2).contains("Rescued and recovering"));
    }
}
