use crate::domain::model::Product;
use crate::ui::templates::{self, PRODUCT_CARD};
use crate::utils::error::Result;
use serde_json::{json, Value};

pub const PLACEHOLDER_IMAGE: &str = "/hb-placeholder.svg";
pub const SEPARATOR_GLYPH: &str = "﹢";

/// One selectable product row. Selection itself belongs to the parent bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCard {
    pub sku: String,
    pub title: String,
    pub price: String,
    pub image: String,
    pub selected: bool,
    pub show_separator: bool,
    image_failed: bool,
}

impl ProductCard {
    pub fn new(product: &Product, selected: bool, show_separator: bool) -> Self {
        Self {
            sku: product.sku.clone(),
            title: product.title.clone(),
            price: product.price.clone(),
            image: product.image.clone(),
            selected,
            show_separator,
            image_failed: false,
        }
    }

    /// Starts the card on the placeholder when its image already failed to load.
    pub fn image_failed(mut self, failed: bool) -> Self {
        self.image_failed = failed;
        self
    }

    pub fn image_src(&self) -> &str {
        if self.image_failed || self.image.is_empty() {
            PLACEHOLDER_IMAGE
        } else {
            &self.image
        }
    }

    /// The host reports a broken image; the card switches to the placeholder.
    /// The owning bundle keeps the failure across renders, see
    /// [`crate::core::bundles::BundleOrchestrator::report_image_error`].
    pub fn on_image_error(&mut self) {
        if !self.image_failed {
            tracing::debug!("Image for {} failed to load, using placeholder", self.sku);
        }
        self.image_failed = true;
    }

    pub fn checkbox_label(&self) -> String {
        format!("Select {}", self.title)
    }

    pub fn price_label(&self) -> String {
        format!("£{}", self.price)
    }

    /// Checkbox change: forwards the SKU to the owner of the selection.
    pub fn toggle<F: FnOnce(&str)>(&self, on_toggle: F) {
        on_toggle(&self.sku)
    }

    pub(crate) fn template_data(&self) -> Value {
        json!({
            "sku": self.sku,
            "selected": self.selected,
            "checkbox_label": self.checkbox_label(),
            "image_src": self.image_src(),
            "title": self.title,
            "price_label": self.price_label(),
            "show_separator": self.show_separator,
            "separator": SEPARATOR_GLYPH,
        })
    }

    pub fn render_html(&self) -> Result<String> {
        templates::render(PRODUCT_CARD, &self.template_data())
    }

    pub fn render_text(&self) -> String {
        let mut line = format!(
            "[{}] {}  {}",
            if self.selected { "x" } else { " " },
            self.title,
            self.price_label()
        );
        if self.show_separator {
            line.push('\n');
            line.push_str("    ");
            line.push_str(SEPARATOR_GLYPH);
        }
        line
    }
}
