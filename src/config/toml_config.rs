use crate::config::BundlesConfig;
use crate::utils::error::{BundlesError, Result};
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub pricing: PricingConfig,
    #[serde(default)]
    pub monitoring: MonitoringConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceConfig {
    pub endpoint: Option<String>,
    pub max_products: Option<usize>,
    /// Read products from this JSON file instead of calling the endpoint.
    pub fixture: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PricingConfig {
    pub bundle_discount: Option<f64>,
    pub use_worker: Option<bool>,
    pub simulate_heavy_work: Option<bool>,
    pub heavy_work_iterations: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub debug: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(BundlesError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| BundlesError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${PRODUCTS_API})
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}").map_err(|e| BundlesError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Layers the file values over the defaults.
    pub fn to_bundles_config(&self) -> BundlesConfig {
        let defaults = BundlesConfig::default();
        BundlesConfig {
            api_endpoint: self.source.endpoint.clone().unwrap_or(defaults.api_endpoint),
            bundle_discount: self.pricing.bundle_discount.unwrap_or(defaults.bundle_discount),
            max_products: self.source.max_products.or(defaults.max_products),
            use_worker: self.pricing.use_worker.unwrap_or(defaults.use_worker),
            simulate_heavy_work: self
                .pricing
                .simulate_heavy_work
                .unwrap_or(defaults.simulate_heavy_work),
            heavy_work_iterations: self
                .pricing
                .heavy_work_iterations
                .unwrap_or(defaults.heavy_work_iterations),
            debug: self.monitoring.debug.unwrap_or(defaults.debug),
        }
    }

    pub fn fixture(&self) -> Option<&str> {
        self.source.fixture.as_deref()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(fixture) = self.fixture() {
            crate::utils::validation::validate_path("source.fixture", fixture)?;
        }
        self.to_bundles_config().validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[source]
endpoint = "https://dummyjson.com/products/category/beauty"
max_products = 3

[pricing]
bundle_discount = 15
use_worker = true
simulate_heavy_work = true
heavy_work_iterations = 1000

[monitoring]
debug = true
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        let bundles = config.to_bundles_config();

        assert_eq!(bundles.api_endpoint, "https://dummyjson.com/products/category/beauty");
        assert_eq!(bundles.max_products, Some(3));
        assert_eq!(bundles.bundle_discount, 15.0);
        assert!(bundles.use_worker);
        assert_eq!(bundles.heavy_work(), Some(1000));
        assert!(bundles.debug);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(config.to_bundles_config(), BundlesConfig::default());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("TEST_BUNDLES_ENDPOINT", "https://test.api.com/products");

        let toml_content = r#"
[source]
endpoint = "${TEST_BUNDLES_ENDPOINT}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(
            config.source.endpoint.as_deref(),
            Some("https://test.api.com/products")
        );

        std::env::remove_var("TEST_BUNDLES_ENDPOINT");
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[pricing]
bundle_discount = 150
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = TomlConfig::from_toml_str("[source\nendpoint =").unwrap_err();
        assert!(matches!(err, BundlesError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[source]\nfixture = \"fixtures/hb-products.json\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.fixture(), Some("fixtures/hb-products.json"));
    }
}
