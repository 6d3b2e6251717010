//! One fetch → filter → dedup → notify pass.
//!
//! The runner owns its [`SeenSet`], so a single instance never announces the
//! same competition twice. Scheduling repeated passes is left to whatever
//! starts the process (cron, a systemd timer, a CI schedule).

use tracing::{error, info};

use crate::alerts::Notifier;
use crate::competition::CompetitionSource;
use crate::dedup::SeenSet;
use crate::error::{DeliveryError, Error};
use crate::format;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running,
    Complete,
    Failed,
}

/// Outcome of a successful pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassReport {
    /// Competitions inside their active window at fetch time
    pub active: usize,
    /// Messages sent for competitions seen for the first time
    pub notified: usize,
}

pub struct Runner<S, N> {
    source: S,
    notifier: N,
    seen: SeenSet,
    state: RunState,
}

impl<S, N> Runner<S, N>
where
    S: CompetitionSource + Send + Sync,
    N: Notifier + Send + Sync,
{
    pub fn new(source: S, notifier: N) -> Self {
        Self::with_seen(source, notifier, SeenSet::new())
    }

    pub fn with_seen(source: S, notifier: N, seen: SeenSet) -> Self {
        Self {
            source,
            notifier,
            seen,
            state: RunState::Idle,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn seen(&self) -> &SeenSet {
        &self.seen
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Send the one-time "started" message
    pub async fn announce_start(&self) -> Result<(), DeliveryError> {
        self.notifier.notify(&format::started_message()).await
    }

    /// Fetch once and announce every competition not seen before, in order.
    ///
    /// An id is marked seen before its message is sent. If that send fails the
    /// pass aborts, and later passes on this runner will not retry the
    /// competition; a fresh process starts with an empty set and announces it.
    pub async fn run_pass(&mut self) -> Result<PassReport, Error> {
        self.state = RunState::Running;
        let result = self.pass().await;
        self.state = match result {
            Ok(_) => RunState::Complete,
            Err(_) => RunState::Failed,
        };
        result
    }

    /// Like [`run_pass`](Self::run_pass), but a failure is also reported to the
    /// chat before being returned.
    pub async fn run_reporting_failure(&mut self) -> Result<PassReport, Error> {
        match self.run_pass().await {
            Ok(report) => Ok(report),
            Err(e) => {
                error!("Pass failed: {}", e);
                if let Err(report_err) = self.notifier.notify(&format::error_message(&e)).await {
                    error!("Failed to report error to Telegram: {}", report_err);
                }
                Err(e)
            }
        }
    }

    async fn pass(&mut self) -> Result<PassReport, Error> {
        let competitions = self.source.fetch_active_competitions().await?;
        let active = competitions.len();
        let mut notified = 0;

        for comp in &competitions {
            if !self.seen.is_new(&comp.id) {
                continue;
            }

            info!("🏆 New competition: {} on {} (id {})", comp.name, comp.symbol, comp.id);
            self.notifier.notify(&format::competition_message(comp)).await?;
            notified += 1;
        }

        if notified == 0 {
            info!("No new competitions found.");
        }

        Ok(PassReport { active, notified })
    }
}
