use anyhow::Result;
use subscription_revenue::{config::config_loader, observability};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        error!("Revenue report exited with error: {:?}", error);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    observability::init_observability("subscription-revenue")?;

    let dotenvy_env = config_loader::load()?;
    info!("ENV has been loaded");

    let report = subscription_revenue::run(&dotenvy_env).await?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
