use clap::Parser;
use product_bundles::config::cli::OutputFormat;
use product_bundles::domain::ports::ProductSource;
use product_bundles::utils::error::ErrorSeverity;
use product_bundles::utils::logger;
use product_bundles::{BundleOrchestrator, BundleState, CliConfig, FileProductSource, HttpProductSource};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting product-bundles");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let (config, fixture) = match cli.resolve() {
        Ok(resolved) => resolved,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    let source: Arc<dyn ProductSource> = match &fixture {
        Some(path) => {
            tracing::info!("📁 Using fixture {}", path);
            Arc::new(FileProductSource::new(path))
        }
        None => Arc::new(HttpProductSource::new()),
    };

    let mut bundle = BundleOrchestrator::new(config, source).with_basket(|skus: &[String]| {
        println!("🛒 Adding to basket: {}", skus.join(", "));
    });
    bundle.load().await;

    for sku in &cli.deselect {
        bundle.toggle_product(sku).await;
    }

    let view = bundle.view();
    match cli.format {
        OutputFormat::Text => println!("{}", view.render_text()),
        OutputFormat::Html => println!("{}", view.render_html()?),
    }

    if cli.add_to_basket {
        match view.button() {
            Some(button) => {
                if !button.click(|| {
                    bundle.add_to_basket();
                }) {
                    eprintln!("Nothing selected, basket button is disabled");
                }
            }
            None => eprintln!("No products to add"),
        }
    }

    if let BundleState::Error { message, severity } = bundle.state() {
        tracing::error!("❌ Bundle failed to load: {}", message);
        let exit_code = match severity {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2, // 可重試
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}
