// View layer: presentational components rendered from orchestrator state.

pub mod bundles;
pub mod button;
pub mod product_card;
pub mod templates;

pub use bundles::BundlesView;
pub use button::{Button, ButtonVariant};
pub use product_card::ProductCard;
