use clap::Parser;
use pm_accessory::{driver, AirQualityAccessory, Config, Platform};

#[tokio::main(flavor = "current_thread")]
async fn main() -> eyre::Result<()> {
    pretty_env_logger::init();
    let config = Config::parse();

    let accessory = AirQualityAccessory::new(&config.accessory()?);
    let platform = Platform::register(accessory, config.query_period());

    let (sender, receiver) = driver::measurement_channel();
    tokio::spawn(driver::run_serial(config.driver(), sender));

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Failed to wait for Ctrl-C: {}", e);
        }
    };
    platform.run(receiver, shutdown).await;
    log::info!("Shutting down.");

    Ok(())
}
