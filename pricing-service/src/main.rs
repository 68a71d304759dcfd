use pricing_service::config::PricingConfig;
use pricing_service::services::init_metrics;
use pricing_service::Application;
use service_core::observability::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = PricingConfig::load()?;

    init_tracing("pricing-service", &config.server)?;
    init_metrics();

    let application = Application::build(config).await?;
    application.run_until_stopped().await?;

    tracing::info!("Pricing service stopped");
    Ok(())
}
