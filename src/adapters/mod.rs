// Adapters layer: concrete product sources (http, file) and payload normalization.

pub mod api;
pub mod file;

pub use api::{normalize, HttpProductSource};
pub use file::FileProductSource;
