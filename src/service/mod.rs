mod handlers;

use std::time::Duration;

use chatdigest_ai::Summarizer;
use chatdigest_bot::SummaryPoster;
use chatdigest_monitor::{ChannelSource, SummaryGenerator};
use chrono::Local;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

pub(crate) use handlers::RunReport;

/// Collects, summarizes and posts digests, on demand or on a cron schedule.
pub(crate) struct DigestService<Src, S, P> {
    generator: SummaryGenerator<Src, S>,
    poster: P,
    destination_channel_id: String,
    window_days: u32,
    // held for a whole run so scheduled and manual runs never overlap
    run_lock: Mutex<()>,
}

impl<Src, S, P> DigestService<Src, S, P>
where
    Src: ChannelSource,
    S: Summarizer,
    P: SummaryPoster,
{
    pub fn new(
        generator: SummaryGenerator<Src, S>,
        poster: P,
        destination_channel_id: String,
        window_days: u32,
    ) -> Self {
        Self {
            generator,
            poster,
            destination_channel_id,
            window_days,
            run_lock: Mutex::new(()),
        }
    }

    pub async fn run_now(&self) -> RunReport {
        tracing::info!(window_days = self.window_days, "running summary generation now");
        self.generate_and_post().await
    }

    /// Fire `generate_and_post` at every upcoming local time of `schedule`
    /// until `cancel` is triggered.
    pub async fn run_scheduled(&self, schedule: &cron::Schedule, cancel: &CancellationToken) {
        loop {
            let Some(next) = schedule.upcoming(Local).next() else {
                tracing::warn!("schedule has no upcoming fire time, stopping");
                break;
            };

            let wait = (next - Local::now()).to_std().unwrap_or(Duration::ZERO);
            tracing::info!(next = %next, "next summary run scheduled");

            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("scheduler shutting down");
                    break;
                }

                _ = tokio::time::sleep(wait) => {
                    let report = self.generate_and_post().await;
                    tracing::info!(?report, "scheduled run finished");
                }
            }
        }
    }
}
