use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;

use crate::utils::error::{BundlesError, Result};

/// Canonical product record shared by every source format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    #[serde(default)]
    pub image: String,
    pub sku: String,
    pub title: String,
    #[serde(deserialize_with = "deserialize_price")]
    pub price: String,
    pub stock: i64,
}

impl Product {
    pub fn is_in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Parses the decimal price string.
    pub fn unit_price(&self) -> Result<f64> {
        self.price
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|p| p.is_finite())
            .ok_or_else(|| BundlesError::InvalidPrice {
                sku: self.sku.clone(),
                value: self.price.clone(),
            })
    }
}

// Native feeds usually send "8.99", but a bare number is accepted and kept as written.
fn deserialize_price<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawPrice {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match RawPrice::deserialize(deserializer)? {
        RawPrice::Text(text) => text,
        RawPrice::Number(number) => number.to_string(),
    })
}

/// Immutable snapshot of the selected SKUs.
///
/// Toggling never mutates a snapshot in place; it yields a new one, so holders of
/// an older snapshot keep seeing the selection they priced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    skus: Arc<BTreeSet<String>>,
}

impl Selection {
    pub fn all_of(products: &[Product]) -> Self {
        Self {
            skus: Arc::new(products.iter().map(|p| p.sku.clone()).collect()),
        }
    }

    pub fn contains(&self, sku: &str) -> bool {
        self.skus.contains(sku)
    }

    pub fn len(&self) -> usize {
        self.skus.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skus.is_empty()
    }

    pub fn toggled(&self, sku: &str) -> Self {
        let mut skus = (*self.skus).clone();
        if !skus.remove(sku) {
            skus.insert(sku.to_string());
        }
        Self {
            skus: Arc::new(skus),
        }
    }

    /// Selected products in display order.
    pub fn selected<'a>(&'a self, products: &'a [Product]) -> impl Iterator<Item = &'a Product> {
        products.iter().filter(move |p| self.contains(&p.sku))
    }
}

/// Inputs of one pricing computation. Moved by value into whichever strategy runs it.
#[derive(Debug, Clone, PartialEq)]
pub struct PricingInput {
    pub prices: Vec<f64>,
    pub discount_percent: f64,
    /// Iterations of synthetic CPU work to burn before computing, if any.
    pub heavy_work: Option<u64>,
}

impl PricingInput {
    pub fn subtotal(&self) -> f64 {
        self.prices.iter().sum()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PricingResult {
    pub total: f64,
    pub savings: f64,
}

impl PricingResult {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn from_total(subtotal: f64, total: f64) -> Self {
        Self {
            total,
            savings: subtotal - total,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// DummyJSON catalog payloads.
    ThirdPartyCatalog,
    /// Already in the canonical shape, possibly wrapped.
    Native,
}
