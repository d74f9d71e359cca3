//! Handlebars markup for the view components.
//!
//! Every `{{value}}` goes through the registry's HTML escaping. Card and button
//! templates double as partials of the bundle template.

use crate::core::pricing::round_to_cents;
use crate::utils::error::{BundlesError, Result};
use handlebars::Handlebars;
use serde::Serialize;

pub const BUTTON: &str = "button";
pub const PRODUCT_CARD: &str = "product_card";
pub const BUNDLE_READY: &str = "bundle_ready";
pub const BUNDLE_STATUS: &str = "bundle_status";
pub const BUNDLE_ERROR: &str = "bundle_error";
const PRODUCT_LIST: &str = "product_list";

const BUTTON_TEMPLATE: &str =
    r#"<button type="button" class="{{classes}}"{{#if disabled}} disabled{{/if}}>{{label}}</button>"#;

const PRODUCT_CARD_TEMPLATE: &str = concat!(
    r#"<div class="cardWrapper"><div class="card">"#,
    r#"<div class="checkboxWrapper"><input type="checkbox" class="checkbox" data-sku="{{sku}}"{{#if selected}} checked{{/if}} aria-label="{{checkbox_label}}"></div>"#,
    r#"<div class="imageWrapper"><img src="{{image_src}}" alt="{{title}}" class="image" onerror="this.onerror=null;this.src='/hb-placeholder.svg'"></div>"#,
    r#"<div><h3 class="productTitle">{{title}}</h3><p class="price">{{price_label}}</p></div>"#,
    r#"</div>"#,
    r#"{{#if show_separator}}<div class="separator" aria-hidden="true">{{separator}}</div>{{/if}}"#,
    r#"</div>"#,
);

const PRODUCT_LIST_TEMPLATE: &str =
    r#"<div class="products">{{#each cards}}{{> product_card}}{{/each}}</div>"#;

const BUNDLE_READY_TEMPLATE: &str = concat!(
    r#"<div class="container"><div class="header">"#,
    r#"<h2 class="title">{{title}}</h2>"#,
    r#"<p class="disclaimer">{{disclaimer}}</p>"#,
    r#"<div class="productsMobile">{{> product_list}}</div>"#,
    r#"{{#if calculating}}<p class="calculating">{{calculating_message}}</p>{{/if}}"#,
    r#"<div class="discountContainer">{{#with discount_badge}}<span class="discountBadge">{{savings_label}}</span><span class="discountPercent">{{percent_label}}</span>{{/with}}</div>"#,
    r#"<p class="total">{{total_label}}</p>"#,
    r#"{{#with button}}{{> button}}{{/with}}"#,
    r#"</div>"#,
    r#"<div class="productsDesktop">{{> product_list}}</div>"#,
    r#"</div>"#,
);

const BUNDLE_STATUS_TEMPLATE: &str = r#"<div class="{{kind}}">{{message}}</div>"#;

const BUNDLE_ERROR_TEMPLATE: &str =
    r#"<div class="error"><p>{{headline}}</p><p>{{message}}</p></div>"#;

const TEMPLATES: [(&str, &str); 6] = [
    (BUTTON, BUTTON_TEMPLATE),
    (PRODUCT_CARD, PRODUCT_CARD_TEMPLATE),
    (PRODUCT_LIST, PRODUCT_LIST_TEMPLATE),
    (BUNDLE_READY, BUNDLE_READY_TEMPLATE),
    (BUNDLE_STATUS, BUNDLE_STATUS_TEMPLATE),
    (BUNDLE_ERROR, BUNDLE_ERROR_TEMPLATE),
];

fn registry() -> Result<Handlebars<'static>> {
    let mut handlebars = Handlebars::new();
    for (name, source) in TEMPLATES {
        handlebars
            .register_template_string(name, source)
            .map_err(|e| BundlesError::TemplateError {
                message: format!("failed to register {} template: {}", name, e),
            })?;
    }
    Ok(handlebars)
}

pub fn render<T: Serialize>(template: &str, data: &T) -> Result<String> {
    registry()?
        .render(template, data)
        .map_err(|e| BundlesError::TemplateError {
            message: format!("failed to render {} template: {}", template, e),
        })
}

/// `£` amount with two decimals; halves round up, like the pricing itself.
pub fn format_pounds(amount: f64) -> String {
    format!("£{:.2}", round_to_cents(amount))
}
