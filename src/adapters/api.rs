//! Normalization of product API payloads into [`Product`] records.
//!
//! Two shapes are understood:
//! - DummyJSON catalog responses, which are remapped field by field
//! - the native format, which is already canonical and only needs unwrapping

use crate::core::pricing::round_to_cents;
use crate::domain::model::{Product, SourceFormat};
use crate::domain::ports::ProductSource;
use crate::utils::error::{BundlesError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

pub const THIRD_PARTY_HOST_MARKER: &str = "dummyjson.com";

const MAX_TITLE_CHARS: usize = 50;
const TRUNCATED_TITLE_CHARS: usize = 47;

#[derive(Debug, Clone, Deserialize)]
struct DummyJsonProduct {
    id: u64,
    title: String,
    price: f64,
    stock: i64,
    thumbnail: String,
    #[serde(default)]
    #[allow(dead_code)]
    images: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct DummyJsonResponse {
    products: Vec<DummyJsonProduct>,
}

impl SourceFormat {
    /// Picks the payload format from the endpoint URL.
    pub fn detect(endpoint: &str) -> Self {
        if endpoint.to_lowercase().contains(THIRD_PARTY_HOST_MARKER) {
            SourceFormat::ThirdPartyCatalog
        } else {
            SourceFormat::Native
        }
    }
}

pub fn normalize(raw: Value, format: SourceFormat) -> Result<Vec<Product>> {
    match format {
        SourceFormat::ThirdPartyCatalog => {
            let response: DummyJsonResponse = serde_json::from_value(raw)?;
            Ok(response.products.into_iter().map(adapt_dummyjson_product).collect())
        }
        SourceFormat::Native => {
            let list = unwrap_native(raw)?;
            Ok(serde_json::from_value(list)?)
        }
    }
}

fn adapt_dummyjson_product(product: DummyJsonProduct) -> Product {
    Product {
        id: product.id,
        image: product.thumbnail,
        sku: format!("DJ{:03}", product.id),
        title: truncate_title(&product.title),
        price: format!("{:.2}", round_to_cents(product.price)),
        stock: product.stock,
    }
}

fn truncate_title(title: &str) -> String {
    if title.chars().count() > MAX_TITLE_CHARS {
        let head: String = title.chars().take(TRUNCATED_TITLE_CHARS).collect();
        format!("{}...", head)
    } else {
        title.to_string()
    }
}

// `{data: {products}}`, then `{products}`, then a bare list. A null wrapper falls through.
fn unwrap_native(mut raw: Value) -> Result<Value> {
    if let Some(products) = raw.pointer_mut("/data/products").filter(|v| !v.is_null()) {
        return Ok(products.take());
    }
    if let Some(products) = raw.get_mut("products").filter(|v| !v.is_null()) {
        return Ok(products.take());
    }
    if raw.is_array() {
        return Ok(raw);
    }

    Err(BundlesError::UnexpectedShape {
        message: "expected data.products, products or a list of products".to_string(),
    })
}

/// Fetches products over HTTP.
#[derive(Debug, Clone, Default)]
pub struct HttpProductSource {
    client: Client,
    format: Option<SourceFormat>,
}

impl HttpProductSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            format: None,
        }
    }

    /// Skip URL-based detection and always parse as `format`.
    pub fn with_format(mut self, format: SourceFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub async fn fetch_with_format(&self, endpoint: &str, format: SourceFormat) -> Result<Vec<Product>> {
        tracing::debug!("Making API request to: {}", endpoint);
        let response = self.client.get(endpoint).send().await?;
        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            return Err(BundlesError::HttpStatus {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        let body = response.bytes().await?;
        let raw: Value = serde_json::from_slice(&body)?;
        let products = normalize(raw, format)?;

        tracing::debug!("📦 Normalized {} products ({:?})", products.len(), format);
        Ok(products)
    }
}

#[async_trait]
impl ProductSource for HttpProductSource {
    async fn fetch_products(&self, endpoint: &str) -> Result<Vec<Product>> {
        let format = self.format.unwrap_or_else(|| SourceFormat::detect(endpoint));
        self.fetch_with_format(endpoint, format).await
    }
}
