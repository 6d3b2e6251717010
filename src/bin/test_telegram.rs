/// Sends one test message to the configured Telegram chat
///
/// Verifies the bot token and chat id without touching the exchange. Run with:
///   cargo run --bin test_telegram

use anyhow::Result;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

use alpha_watch::{Config, Notifier, TelegramNotifier};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    FmtSubscriber::builder()
        .with_env_filter(config.log_filter())
        .with_target(false)
        .compact()
        .init();

    info!("Config loaded (chat {})", config.chat_id);

    let notifier = TelegramNotifier::new(&config)?;
    notifier
        .notify("🧪 <b>Alpha Competition Watcher</b>\nTest message, configuration OK.")
        .await?;

    info!("✓ Test message sent, check the chat");
    Ok(())
}
