pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod ui;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{FileProductSource, HttpProductSource};
pub use config::BundlesConfig;
pub use crate::core::bundles::{BundleOrchestrator, BundleState};
pub use crate::core::pricing::{InlineCalculator, WorkerCalculator};
pub use domain::model::{Product, SourceFormat};
pub use ui::BundlesView;
pub use utils::error::{BundlesError, Result};
