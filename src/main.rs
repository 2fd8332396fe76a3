mod config;
mod service;

use std::path::{Path, PathBuf};

use chatdigest_ai::SummarizerBackend;
use chatdigest_bot::DiscordWriter;
use chatdigest_monitor::{
    Capture, CaptureSource, ChannelSource, DiscordReader, MessageCollector, SummaryGenerator,
};
use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::service::DigestService;

#[derive(Parser)]
#[command(name = "chatdigest", version, about = "Collects chat channels and posts LLM digests")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the scheduler (the default)
    Run {
        /// Generate and post once, then exit
        #[arg(long)]
        once: bool,
        /// Read messages from a capture file instead of the live API
        #[arg(long, value_name = "FILE")]
        capture: Option<PathBuf>,
    },
    /// Collect messages with the live reader and write them to a capture file
    Extract {
        #[arg(long, short, value_name = "FILE")]
        output: PathBuf,
        #[arg(long, default_value_t = 4)]
        days: u32,
    },
    /// List the guilds visible to the reader token
    Guilds,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let mut config = Config::load()?;

    init_tracing(config.debug);

    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::warn!("received Ctrl-C, shutting down");
                cancel.cancel();
            }
        });
    }

    match cli.command.unwrap_or(Command::Run {
        once: false,
        capture: None,
    }) {
        Command::Run {
            once,
            capture: Some(path),
        } => {
            let source = load_capture(&path, &mut config)?;
            config.validate()?;
            run(source, &config, once, cancel).await
        }
        Command::Run {
            once,
            capture: None,
        } => {
            config.validate()?;
            let source = DiscordReader::new(&config.reader_config);
            run(source, &config, once, cancel).await
        }
        Command::Extract { output, days } => {
            config.validate()?;
            extract(&config, &output, days, cancel).await
        }
        Command::Guilds => list_guilds(&config).await,
    }
}

fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();
}

async fn run<Src: ChannelSource>(
    source: Src,
    config: &Config,
    once: bool,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let (primary, fallback) = SummarizerBackend::primary_and_fallback(&config.ai_config)?;
    tracing::info!(
        primary = %primary.kind(),
        fallback = ?fallback.as_ref().map(|f| f.kind()),
        "summarizers ready"
    );

    let collector = MessageCollector::from_config(source, &config.reader_config, cancel.clone());
    let service = DigestService::new(
        SummaryGenerator::new(collector, primary, fallback),
        DiscordWriter::new(&config.bot_config),
        config.bot_config.destination_channel_id.clone(),
        config.schedule.days_to_collect,
    );

    if once {
        let report = service.run_now().await;
        tracing::info!(?report, "run finished");
        return Ok(());
    }

    let schedule = config.schedule.schedule()?;
    tracing::info!(cron = %config.schedule.cron_expression(), "starting scheduler");

    if config.debug {
        service.run_now().await;
    }

    service.run_scheduled(&schedule, &cancel).await;

    Ok(())
}

/// Load a capture and, when no scope is configured, cover every captured channel.
fn load_capture(path: &Path, config: &mut Config) -> anyhow::Result<CaptureSource> {
    let capture = Capture::load(path)?;
    tracing::info!(path = %path.display(), messages = capture.message_count(), "loaded capture");

    let reader = &mut config.reader_config;
    if reader.channel_ids.is_empty() && reader.guild_id.is_none() {
        reader.channel_ids = capture.channels.keys().cloned().collect();
    }
    if reader.thread_ids.is_empty() {
        reader.thread_ids = capture.threads.keys().cloned().collect();
    }

    Ok(CaptureSource::new(capture))
}

async fn extract(
    config: &Config,
    output: &Path,
    days: u32,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let source = DiscordReader::new(&config.reader_config);
    let collector = MessageCollector::from_config(source, &config.reader_config, cancel);

    let collections = collector.collect_for_config(days).await;
    let capture = Capture::from_collections(collections.values());
    capture.save(output)?;

    tracing::info!(
        path = %output.display(),
        channels = capture.channels.len(),
        threads = capture.threads.len(),
        messages = capture.message_count(),
        "capture written"
    );

    Ok(())
}

async fn list_guilds(config: &Config) -> anyhow::Result<()> {
    let reader = DiscordReader::new(&config.reader_config);
    let guilds = reader.user_guilds().await;

    if guilds.is_empty() {
        tracing::warn!("no guilds visible to the reader token");
    }

    for guild in guilds {
        println!("{}\t{}", guild.id, guild.name);
    }

    Ok(())
}
