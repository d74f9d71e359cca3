pub mod bundles;
pub mod pricing;

pub use crate::domain::model::{PricingInput, PricingResult, Product, Selection};
pub use crate::domain::ports::{BasketHandler, PriceCalculator, ProductSource};
pub use crate::utils::error::Result;
