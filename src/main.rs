use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

use alpha_watch::{AlphaClient, Config, Runner, TelegramNotifier};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load config
    let config = Config::from_env()?;

    // Setup logging
    init_logging(&config);

    info!("╔═══════════════════════════════════════╗");
    info!("║     Alpha Competition Watcher         ║");
    info!("╠═══════════════════════════════════════╣");
    info!("║ Fetch timeout: {:22?} ║", config.fetch_timeout);
    info!("║ Fetch attempts: {:21} ║", config.fetch_attempts);
    info!("║ Start announcement: {:17} ║", config.announce_start);
    info!("╚═══════════════════════════════════════╝");

    if config.api_key.is_none() {
        warn!("BINANCE_API_KEY not set, requesting competition list without API key");
    }

    // Bot token and chat id are checked here, before any network traffic
    let notifier = TelegramNotifier::new(&config)?;
    let source = AlphaClient::new(&config)?;
    let mut runner = Runner::new(source, notifier);

    if config.announce_start {
        runner.announce_start().await?;
    }

    let report = runner.run_reporting_failure().await?;
    info!(
        "Pass complete: {} active, {} announced",
        report.active, report.notified
    );

    Ok(())
}

fn init_logging(config: &Config) {
    FmtSubscriber::builder()
        .with_env_filter(config.log_filter())
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .init();
}
