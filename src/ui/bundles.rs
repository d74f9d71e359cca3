//! View model for the bundle container, derived from the orchestrator state.

use crate::config::BundlesConfig;
use crate::core::bundles::BundleState;
use crate::ui::button::{basket_button, Button};
use crate::ui::product_card::ProductCard;
use crate::ui::templates::{self, format_pounds, BUNDLE_ERROR, BUNDLE_READY, BUNDLE_STATUS};
use crate::utils::error::Result;
use serde::Serialize;
use serde_json::{json, Value};

pub const TITLE: &str = "Frequently bought together";
pub const DISCLAIMER: &str =
    "Please ensure you read the label of all products purchased as part of this bundle before use.";
pub const LOADING_MESSAGE: &str = "Loading products...";
pub const ERROR_HEADLINE: &str = "Unable to load products.";
pub const EMPTY_MESSAGE: &str = "No products available at this time.";
pub const CALCULATING_MESSAGE: &str = "Calculating…";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscountBadge {
    pub savings_label: String,
    pub percent_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadyView {
    pub cards: Vec<ProductCard>,
    pub calculating: bool,
    pub discount_badge: Option<DiscountBadge>,
    pub total_label: String,
    pub button: Button,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BundlesView {
    Loading,
    Error { message: String },
    Empty,
    Ready(ReadyView),
}

impl BundlesView {
    pub fn from_state(state: &BundleState, config: &BundlesConfig) -> Self {
        match state {
            BundleState::Loading => BundlesView::Loading,
            BundleState::Error { message, .. } => BundlesView::Error {
                message: message.clone(),
            },
            BundleState::Empty => BundlesView::Empty,
            BundleState::Ready(ready) => {
                let last = ready.products.len().saturating_sub(1);
                let cards = ready
                    .products
                    .iter()
                    .enumerate()
                    .map(|(index, product)| {
                        ProductCard::new(product, ready.is_selected(&product.sku), index < last)
                            .image_failed(ready.image_failed(&product.sku))
                    })
                    .collect();

                let discount = ready.effective_discount(config.bundle_discount);
                let discount_badge = (discount > 0.0).then(|| DiscountBadge {
                    savings_label: format!("You save {}", format_pounds(ready.pricing.savings)),
                    percent_label: format!("{}% OFF", discount),
                });

                BundlesView::Ready(ReadyView {
                    cards,
                    calculating: ready.calculating,
                    discount_badge,
                    total_label: format!("Total Price: {}", format_pounds(ready.pricing.total)),
                    button: basket_button(ready.selected_count()),
                })
            }
        }
    }

    /// The basket button, only present once products are shown.
    pub fn button(&self) -> Option<&Button> {
        match self {
            BundlesView::Ready(ready) => Some(&ready.button),
            _ => None,
        }
    }

    pub fn render_html(&self) -> Result<String> {
        match self {
            BundlesView::Loading => templates::render(
                BUNDLE_STATUS,
                &json!({ "kind": "loading", "message": LOADING_MESSAGE }),
            ),
            BundlesView::Error { message } => templates::render(
                BUNDLE_ERROR,
                &json!({ "headline": ERROR_HEADLINE, "message": message }),
            ),
            BundlesView::Empty => templates::render(
                BUNDLE_STATUS,
                &json!({ "kind": "empty", "message": EMPTY_MESSAGE }),
            ),
            BundlesView::Ready(ready) => templates::render(BUNDLE_READY, &ready.template_data()),
        }
    }

    pub fn render_text(&self) -> String {
        match self {
            BundlesView::Loading => LOADING_MESSAGE.to_string(),
            BundlesView::Error { message } => format!("{}\n{}", ERROR_HEADLINE, message),
            BundlesView::Empty => EMPTY_MESSAGE.to_string(),
            BundlesView::Ready(ready) => {
                let mut lines = vec![TITLE.to_string(), DISCLAIMER.to_string(), String::new()];
                lines.extend(ready.cards.iter().map(ProductCard::render_text));
                lines.push(String::new());
                if ready.calculating {
                    lines.push(CALCULATING_MESSAGE.to_string());
                }
                if let Some(badge) = &ready.discount_badge {
                    lines.push(format!("{} ({})", badge.savings_label, badge.percent_label));
                }
                lines.push(ready.total_label.clone());
                lines.push(format!(
                    "[ {} ]{}",
                    ready.button.label,
                    if ready.button.disabled { " (disabled)" } else { "" }
                ));
                lines.join("\n")
            }
        }
    }
}

impl ReadyView {
    fn template_data(&self) -> Value {
        let cards: Vec<Value> = self.cards.iter().map(ProductCard::template_data).collect();
        json!({
            "title": TITLE,
            "disclaimer": DISCLAIMER,
            "cards": cards,
            "calculating": self.calculating,
            "calculating_message": CALCULATING_MESSAGE,
            "discount_badge": self.discount_badge,
            "total_label": self.total_label,
            "button": self.button.template_data(),
        })
    }
}
