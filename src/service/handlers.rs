use chatdigest_ai::Summarizer;
use chatdigest_bot::SummaryPoster;
use chatdigest_monitor::ChannelSource;

use crate::service::DigestService;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct RunReport {
    /// Channels with at least one message in the window.
    pub active_channels: usize,
    /// Channel summaries generated, not counting the combined one.
    pub summarized: usize,
    pub posted: usize,
    pub failed_posts: usize,
    pub combined_posted: bool,
    /// Set when the run failed as a whole and an error was reported.
    pub failure: Option<String>,
}

impl RunReport {
    fn failure_reason(&self) -> Option<&'static str> {
        if self.active_channels > 0 && self.summarized == 0 {
            return Some("no channel could be summarized");
        }

        let attempted = self.posted + self.failed_posts;
        if attempted > 0 && self.posted == 0 && !self.combined_posted {
            return Some("no summary could be posted");
        }

        None
    }
}

impl<Src, S, P> DigestService<Src, S, P>
where
    Src: ChannelSource,
    S: Summarizer,
    P: SummaryPoster,
{
    /// One full run: collect once, post each channel summary, then the
    /// combined summary when more than one channel was collected.
    pub async fn generate_and_post(&self) -> RunReport {
        let _guard = self.run_lock.lock().await;
        let destination = self.destination_channel_id.as_str();

        let collections = self
            .generator
            .collector()
            .collect_for_config(self.window_days)
            .await;

        let mut report = RunReport {
            active_channels: collections.values().filter(|c| !c.is_empty()).count(),
            ..Default::default()
        };

        if report.active_channels == 0 {
            tracing::info!(channels = collections.len(), "no messages in any channel, nothing to post");
            return report;
        }

        let summaries = self.generator.generate_all_from(&collections).await;

        for (channel_id, summary) in &summaries {
            let Some(summary) = summary else {
                continue;
            };

            report.summarized += 1;
            if self.poster.post_summary(destination, summary).await {
                report.posted += 1;
            } else {
                tracing::error!(%channel_id, "failed to post channel summary");
                report.failed_posts += 1;
            }
        }

        if collections.len() > 1 {
            match self.generator.generate_combined_from(&collections).await {
                Some(combined) => {
                    report.combined_posted = self.poster.post_summary(destination, &combined).await;
                    if !report.combined_posted {
                        report.failed_posts += 1;
                    }
                }
                None => tracing::error!("failed to generate combined summary"),
            }
        }

        if let Some(reason) = report.failure_reason() {
            let message = format!("Error in scheduled summary generation: {reason}");
            tracing::error!(%reason, "summary run failed");

            if !self.poster.post_error(destination, &message, None).await {
                tracing::error!("failed to report run failure");
            }
            report.failure = Some(message);
        }

        tracing::info!(
            summarized = report.summarized,
            posted = report.posted,
            failed_posts = report.failed_posts,
            "summary run complete"
        );

        report
    }
}
