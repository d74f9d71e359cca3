#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::pricing::DEFAULT_HEAVY_WORK_ITERATIONS;
use crate::utils::error::Result;
use crate::utils::validation::{validate_positive_number, validate_range, validate_url, Validate};
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use toml_config::TomlConfig;

pub const DEFAULT_API_ENDPOINT: &str = "https://hb.demo/products";

/// Every knob the bundle widget exposes. All fields are optional in serialized form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BundlesConfig {
    pub api_endpoint: String,
    /// Percentage in [0, 100], applied to bundles of two or more products.
    pub bundle_discount: f64,
    /// Unbounded when `None`.
    pub max_products: Option<usize>,
    pub use_worker: bool,
    pub simulate_heavy_work: bool,
    pub heavy_work_iterations: u64,
    /// Logs how long each pricing computation took.
    pub debug: bool,
}

impl Default for BundlesConfig {
    fn default() -> Self {
        Self {
            api_endpoint: DEFAULT_API_ENDPOINT.to_string(),
            bundle_discount: 0.0,
            max_products: None,
            use_worker: false,
            simulate_heavy_work: false,
            heavy_work_iterations: DEFAULT_HEAVY_WORK_ITERATIONS,
            debug: false,
        }
    }
}

impl BundlesConfig {
    /// True when a change requires a new fetch rather than just repricing.
    pub fn requires_refetch(&self, other: &BundlesConfig) -> bool {
        self.api_endpoint != other.api_endpoint || self.max_products != other.max_products
    }

    pub fn pricing_changed(&self, other: &BundlesConfig) -> bool {
        self.bundle_discount != other.bundle_discount
            || self.use_worker != other.use_worker
            || self.simulate_heavy_work != other.simulate_heavy_work
            || self.heavy_work_iterations != other.heavy_work_iterations
    }

    pub fn heavy_work(&self) -> Option<u64> {
        self.simulate_heavy_work.then_some(self.heavy_work_iterations)
    }
}

impl Validate for BundlesConfig {
    fn validate(&self) -> Result<()> {
        validate_url("api_endpoint", &self.api_endpoint)?;
        validate_range("bundle_discount", self.bundle_discount, 0.0, 100.0)?;
        if let Some(max) = self.max_products {
            validate_positive_number("max_products", max, 1)?;
        }
        Ok(())
    }
}
