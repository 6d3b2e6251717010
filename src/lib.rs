/// Binance Alpha competition watcher
///
/// Polls the Alpha competitive list once per run, picks out the competitions
/// whose window contains the current time, and announces the ones not yet
/// seen by this process to a Telegram chat. Repeated runs are driven by an
/// external scheduler.

pub mod alerts;
pub mod competition;
pub mod config;
pub mod dedup;
pub mod error;
pub mod format;
pub mod retry;
pub mod runner;
pub mod types;

pub use alerts::{Notifier, TelegramNotifier};
pub use competition::{AlphaClient, CompetitionSource};
pub use config::Config;
pub use dedup::SeenSet;
pub use error::{ConfigError, DeliveryError, Error, FetchError};
pub use runner::{PassReport, RunState, Runner};
pub use types::Competition;
