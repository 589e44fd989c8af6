use std::path::PathBuf;
use std::process;

use anyhow::{Context, bail};
use channel_feed::FeedClient;
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use live_vcr::config::ConfigLoader;
use live_vcr::logging;
use live_vcr::monitor::{DEFAULT_YT_DLP, PollCycleEngine, YtDlpClassifier};
use live_vcr::recorder::YtDlpLauncher;
use live_vcr::scheduler::Scheduler;
use live_vcr::seen::SeenStore;

/// Record live broadcasts of the configured channels as they start.
#[derive(Debug, Parser)]
#[command(name = "live-vcr", version, about)]
struct Args {
    /// Path to the configuration file
    #[arg(short = 'c', long = "conf", default_value = "config.yaml")]
    conf: PathBuf,

    /// Working directory holding the seen-state file; relative destinations resolve here
    #[arg(short = 'd', long = "dir", default_value = ".")]
    dir: PathBuf,

    /// Also write logs to daily rotated files in this directory
    #[arg(long, env = "LIVE_VCR_LOG_DIR")]
    log_dir: Option<PathBuf>,

    /// yt-dlp executable used for classification and recording
    #[arg(long = "yt-dlp", env = "YT_DLP_PATH", default_value = DEFAULT_YT_DLP)]
    yt_dlp: String,

    /// Extra argument passed to yt-dlp when recording (repeatable)
    #[arg(long = "yt-dlp-arg", value_name = "ARG", allow_hyphen_values = true)]
    yt_dlp_args: Vec<String>,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let guard = match logging::init_logging(args.log_dir.as_deref()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    if let Err(e) = run(args).await {
        error!("{e:#}");
        drop(guard);
        process::exit(1);
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    if !args.dir.is_dir() {
        bail!("working directory {} does not exist", args.dir.display());
    }

    let loader = ConfigLoader::new(&args.conf, &args.dir);
    let config = loader.load().context("loading startup configuration")?;
    info!(
        config = %args.conf.display(),
        dir = %args.dir.display(),
        channels = config.channels.len(),
        interval_secs = config.interval.as_secs(),
        yt_dlp_args = ?args.yt_dlp_args,
        "live-vcr starting"
    );

    let engine = PollCycleEngine::new(
        FeedClient::new().context("building feed client")?,
        YtDlpClassifier::new(&args.yt_dlp),
        YtDlpLauncher::new(&args.yt_dlp).with_extra_args(args.yt_dlp_args),
    );
    let mut scheduler = Scheduler::new(engine, loader, SeenStore::in_dir(&args.dir), config);

    let cancel = CancellationToken::new();
    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Received Ctrl-C, stopping after the current cycle");
                cancel.cancel();
            }
        }
    });

    scheduler.run(cancel).await;
    Ok(())
}
