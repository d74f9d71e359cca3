//! The bundle state machine.
//!
//! `Loading -> Error | Empty | Ready`. Every state change goes through `&mut self`,
//! so there is a single writer. Pricing is the only work that may leave the calling
//! task: [`BundleOrchestrator::toggle`] hands back a [`PricingRequest`] that owns
//! a copy of its inputs, and [`BundleOrchestrator::apply_pricing`] only accepts the
//! response of the most recent request.

use crate::config::BundlesConfig;
use crate::core::pricing::{calculator_for, effective_discount};
use crate::domain::model::{PricingInput, PricingResult, Product, Selection};
use crate::domain::ports::{BasketHandler, LoggingBasket, PriceCalculator, ProductSource};
use crate::ui::bundles::BundlesView;
use crate::utils::error::{ErrorSeverity, Result};
use crate::utils::validation::Validate;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Instant;

#[derive(Debug, Clone, PartialEq)]
pub enum BundleState {
    Loading,
    Error {
        message: String,
        severity: ErrorSeverity,
    },
    Empty,
    Ready(ReadyBundle),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReadyBundle {
    pub products: Vec<Product>,
    pub selection: Selection,
    pub pricing: PricingResult,
    /// A dispatched computation has not come back yet.
    pub calculating: bool,
    /// SKUs whose image failed to load; their cards show the placeholder.
    pub failed_images: BTreeSet<String>,
}

impl ReadyBundle {
    pub fn selected_count(&self) -> usize {
        self.selection.len()
    }

    pub fn is_selected(&self, sku: &str) -> bool {
        self.selection.contains(sku)
    }

    pub fn selected_skus(&self) -> Vec<String> {
        self.selection
            .selected(&self.products)
            .map(|p| p.sku.clone())
            .collect()
    }

    pub fn effective_discount(&self, configured_percent: f64) -> f64 {
        effective_discount(self.selected_count(), configured_percent)
    }

    pub fn image_failed(&self, sku: &str) -> bool {
        self.failed_images.contains(sku)
    }
}

/// Drops out-of-stock products, then keeps the first `max_products` in source order.
pub fn displayable_products(products: Vec<Product>, max_products: Option<usize>) -> Vec<Product> {
    products
        .into_iter()
        .filter(Product::is_in_stock)
        .take(max_products.unwrap_or(usize::MAX))
        .collect()
}

/// One dispatched pricing computation.
pub struct PricingRequest {
    generation: u64,
    input: PricingInput,
    calculator: Arc<dyn PriceCalculator>,
    debug: bool,
}

impl PricingRequest {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn input(&self) -> &PricingInput {
        &self.input
    }

    /// Runs the computation. Failures are logged and priced at zero.
    pub async fn execute(self) -> PricingResponse {
        let subtotal = self.input.subtotal();
        let strategy = self.calculator.name();
        let start = Instant::now();

        let result = match self.calculator.compute(self.input).await {
            Ok(total) => PricingResult::from_total(subtotal, total),
            Err(e) => {
                tracing::error!("❌ Pricing on {} failed: {}", strategy, e);
                PricingResult::zero()
            }
        };

        if self.debug {
            tracing::info!(
                "Calculation completed in {} ms ({})",
                start.elapsed().as_millis(),
                strategy
            );
        }

        PricingResponse {
            generation: self.generation,
            result,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricingResponse {
    pub generation: u64,
    pub result: PricingResult,
}

pub struct BundleOrchestrator {
    config: BundlesConfig,
    source: Arc<dyn ProductSource>,
    calculator_override: Option<Arc<dyn PriceCalculator>>,
    basket: Arc<dyn BasketHandler>,
    state: BundleState,
    generation: u64,
}

impl BundleOrchestrator {
    pub fn new(config: BundlesConfig, source: Arc<dyn ProductSource>) -> Self {
        Self {
            config,
            source,
            calculator_override: None,
            basket: Arc::new(LoggingBasket),
            state: BundleState::Loading,
            generation: 0,
        }
    }

    /// Pins the pricing strategy instead of deriving it from `use_worker`.
    pub fn with_calculator(mut self, calculator: Arc<dyn PriceCalculator>) -> Self {
        self.calculator_override = Some(calculator);
        self
    }

    pub fn with_basket(mut self, basket: impl BasketHandler + 'static) -> Self {
        self.basket = Arc::new(basket);
        self
    }

    pub fn state(&self) -> &BundleState {
        &self.state
    }

    pub fn config(&self) -> &BundlesConfig {
        &self.config
    }

    pub fn ready(&self) -> Option<&ReadyBundle> {
        match &self.state {
            BundleState::Ready(ready) => Some(ready),
            _ => None,
        }
    }

    pub fn selected_count(&self) -> usize {
        self.ready().map(ReadyBundle::selected_count).unwrap_or(0)
    }

    pub fn view(&self) -> BundlesView {
        BundlesView::from_state(&self.state, &self.config)
    }

    fn calculator(&self) -> Arc<dyn PriceCalculator> {
        self.calculator_override
            .clone()
            .unwrap_or_else(|| calculator_for(self.config.use_worker))
    }

    /// Fetches products and moves to `Error`, `Empty` or `Ready` (all selected).
    pub async fn load(&mut self) {
        self.state = BundleState::Loading;
        // results of computations dispatched for the previous product list are stale now
        self.generation += 1;

        tracing::info!("🔄 Loading products from {}", self.config.api_endpoint);
        let products = match self.source.fetch_products(&self.config.api_endpoint).await {
            Ok(products) => products,
            Err(e) => {
                tracing::error!("❌ Failed to load products: {}", e);
                self.state = BundleState::Error {
                    message: e.to_string(),
                    severity: e.severity(),
                };
                return;
            }
        };

        let fetched = products.len();
        let products = displayable_products(products, self.config.max_products);
        tracing::info!("📦 Displaying {} of {} fetched products", products.len(), fetched);

        if products.is_empty() {
            self.state = BundleState::Empty;
            return;
        }

        let selection = Selection::all_of(&products);
        self.state = BundleState::Ready(ReadyBundle {
            products,
            selection,
            pricing: PricingResult::zero(),
            calculating: false,
            failed_images: BTreeSet::new(),
        });
        self.reprice().await;
    }

    /// Flips one SKU. Returns the computation to run when pricing must be redone.
    ///
    /// Outside `Ready`, or for a SKU that is not displayed, nothing changes.
    pub fn toggle(&mut self, sku: &str) -> Option<PricingRequest> {
        let BundleState::Ready(ready) = &mut self.state else {
            tracing::debug!("Ignoring toggle of {} outside the ready state", sku);
            return None;
        };

        if !ready.products.iter().any(|p| p.sku == sku) {
            tracing::warn!("Ignoring toggle of unknown SKU {}", sku);
            return None;
        }

        ready.selection = ready.selection.toggled(sku);
        tracing::debug!("Toggled {}, {} selected", sku, ready.selection.len());
        self.begin_pricing()
    }

    /// Toggles and waits for the new price.
    pub async fn toggle_product(&mut self, sku: &str) {
        if let Some(request) = self.toggle(sku) {
            let response = request.execute().await;
            self.apply_pricing(response);
        }
    }

    /// Starts a new pricing generation.
    ///
    /// An empty selection, or a product whose price cannot be parsed, settles the
    /// result at zero immediately and nothing is dispatched.
    pub fn begin_pricing(&mut self) -> Option<PricingRequest> {
        self.generation += 1;
        let generation = self.generation;
        let calculator = self.calculator();
        let configured_discount = self.config.bundle_discount;
        let heavy_work = self.config.heavy_work();
        let debug = self.config.debug;

        let BundleState::Ready(ready) = &mut self.state else {
            return None;
        };

        let prices: Result<Vec<f64>> = ready
            .selection
            .selected(&ready.products)
            .map(Product::unit_price)
            .collect();

        let prices = match prices {
            Ok(prices) if !prices.is_empty() => prices,
            Ok(_) => {
                ready.pricing = PricingResult::zero();
                ready.calculating = false;
                return None;
            }
            Err(e) => {
                tracing::error!("❌ Cannot price selection: {}", e);
                ready.pricing = PricingResult::zero();
                ready.calculating = false;
                return None;
            }
        };

        ready.calculating = true;
        Some(PricingRequest {
            generation,
            input: PricingInput {
                discount_percent: effective_discount(prices.len(), configured_discount),
                prices,
                heavy_work,
            },
            calculator,
            debug,
        })
    }

    /// Stores a finished computation. Responses from superseded generations are dropped.
    pub fn apply_pricing(&mut self, response: PricingResponse) -> bool {
        if response.generation != self.generation {
            tracing::debug!(
                "Discarding stale pricing result (generation {} < {})",
                response.generation,
                self.generation
            );
            return false;
        }

        match &mut self.state {
            BundleState::Ready(ready) => {
                ready.pricing = response.result;
                ready.calculating = false;
                true
            }
            _ => false,
        }
    }

    pub async fn reprice(&mut self) {
        if let Some(request) = self.begin_pricing() {
            let response = request.execute().await;
            self.apply_pricing(response);
        }
    }

    /// Records that a card's image could not be loaded. Returns whether this is new.
    ///
    /// Kept until the next load, so later renders keep showing the placeholder.
    pub fn report_image_error(&mut self, sku: &str) -> bool {
        let BundleState::Ready(ready) = &mut self.state else {
            return false;
        };
        if !ready.products.iter().any(|p| p.sku == sku) {
            tracing::warn!("Ignoring image error for unknown SKU {}", sku);
            return false;
        }

        let recorded = ready.failed_images.insert(sku.to_string());
        if recorded {
            tracing::debug!("Image for {} failed to load, using placeholder", sku);
        }
        recorded
    }

    /// Swaps the configuration; refetches or reprices depending on what changed.
    pub async fn update_config(&mut self, config: BundlesConfig) -> Result<()> {
        config.validate()?;
        let previous = std::mem::replace(&mut self.config, config);

        if previous.requires_refetch(&self.config) {
            self.load().await;
        } else if previous.pricing_changed(&self.config) {
            self.reprice().await;
        }
        Ok(())
    }

    /// Hands the selected SKUs, in display order, to the basket handler.
    pub fn add_to_basket(&self) -> Vec<String> {
        let Some(ready) = self.ready() else {
            tracing::debug!("Add to basket ignored, no products loaded");
            return Vec::new();
        };

        let skus = ready.selected_skus();
        self.basket.add_to_basket(&skus);
        skus
    }
}
