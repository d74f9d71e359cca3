use crate::adapters::api::normalize;
use crate::domain::model::{Product, SourceFormat};
use crate::domain::ports::ProductSource;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::PathBuf;

/// Reads a saved API payload from disk and normalizes it like a live response.
#[derive(Debug, Clone)]
pub struct FileProductSource {
    path: PathBuf,
    format: Option<SourceFormat>,
}

impl FileProductSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            format: None,
        }
    }

    pub fn with_format(mut self, format: SourceFormat) -> Self {
        self.format = Some(format);
        self
    }
}

#[async_trait]
impl ProductSource for FileProductSource {
    /// The endpoint is only used to detect the payload format.
    async fn fetch_products(&self, endpoint: &str) -> Result<Vec<Product>> {
        tracing::debug!("Reading products from {}", self.path.display());
        let data = tokio::fs::read(&self.path).await?;
        let raw: serde_json::Value = serde_json::from_slice(&data)?;
        let format = self.format.unwrap_or_else(|| SourceFormat::detect(endpoint));
        normalize(raw, format)
    }
}
