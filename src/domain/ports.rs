use crate::domain::model::{PricingInput, Product};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Where products come from (HTTP, disk, test doubles).
#[async_trait]
pub trait ProductSource: Send + Sync {
    async fn fetch_products(&self, endpoint: &str) -> Result<Vec<Product>>;
}

/// Strategy that turns pricing inputs into a rounded total.
#[async_trait]
pub trait PriceCalculator: Send + Sync {
    async fn compute(&self, input: PricingInput) -> Result<f64>;

    fn name(&self) -> &'static str;
}

/// Receives the SKUs when the shopper clicks the basket button.
pub trait BasketHandler: Send + Sync {
    fn add_to_basket(&self, skus: &[String]);
}

impl<F> BasketHandler for F
where
    F: Fn(&[String]) + Send + Sync,
{
    fn add_to_basket(&self, skus: &[String]) {
        self(skus)
    }
}

/// Default handler: no checkout integration, the SKUs are only logged.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingBasket;

impl BasketHandler for LoggingBasket {
    fn add_to_basket(&self, skus: &[String]) {
        tracing::info!("Adding: {:?}", skus);
    }
}
