use crate::config::{BundlesConfig, TomlConfig};
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, Validate};
use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Html,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "product-bundles")]
#[command(about = "Render a 'frequently bought together' product bundle")]
pub struct CliConfig {
    /// Optional TOML file; flags below override its values
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(long)]
    pub api_endpoint: Option<String>,

    /// Bundle discount percentage (0-100)
    #[arg(long)]
    pub bundle_discount: Option<f64>,

    #[arg(long)]
    pub max_products: Option<usize>,

    /// Run the pricing computation on a background worker
    #[arg(long)]
    pub use_worker: bool,

    #[arg(long)]
    pub simulate_heavy_work: bool,

    #[arg(long)]
    pub heavy_work_iterations: Option<u64>,

    /// Log computation time
    #[arg(long)]
    pub debug: bool,

    /// Read products from a saved JSON payload instead of the endpoint
    #[arg(long)]
    pub fixture: Option<String>,

    /// SKU to untick after loading (repeatable)
    #[arg(long)]
    pub deselect: Vec<String>,

    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Click the basket button after rendering
    #[arg(long)]
    pub add_to_basket: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

impl CliConfig {
    /// Merges defaults, the optional TOML file and the flags, in that order.
    pub fn resolve(&self) -> Result<(BundlesConfig, Option<String>)> {
        let (mut config, mut fixture) = match &self.config {
            Some(path) => {
                let file = TomlConfig::from_file(path)?;
                (file.to_bundles_config(), file.fixture().map(str::to_string))
            }
            None => (BundlesConfig::default(), None),
        };

        if let Some(endpoint) = &self.api_endpoint {
            config.api_endpoint = endpoint.clone();
        }
        if let Some(discount) = self.bundle_discount {
            config.bundle_discount = discount;
        }
        if let Some(max) = self.max_products {
            config.max_products = Some(max);
        }
        if let Some(iterations) = self.heavy_work_iterations {
            config.heavy_work_iterations = iterations;
        }
        config.use_worker |= self.use_worker;
        config.simulate_heavy_work |= self.simulate_heavy_work;
        config.debug |= self.debug;

        if self.fixture.is_some() {
            fixture = self.fixture.clone();
        }

        config.validate()?;
        if let Some(path) = &fixture {
            validate_path("fixture", path)?;
        }

        Ok((config, fixture))
    }
}
