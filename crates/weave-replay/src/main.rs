//! weave-replay: run recorded pointer feeds from several devices through one
//! gesture region and print what the gestures emit.

mod config;
mod error;
mod feed;
mod session;

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use crate::config::ReplayConfig;
use crate::error::{ReplayError, ReplayResult};
use crate::session::Session;

/// A `--feed device=path` argument.
#[derive(Debug, Clone, PartialEq)]
struct FeedArg {
    device: String,
    path: PathBuf,
}

fn parse_feed(arg: &str) -> Result<FeedArg, String> {
    let (device, path) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected <device>=<file>, got `{arg}`"))?;
    if device.is_empty() || path.is_empty() {
        return Err(format!("expected <device>=<file>, got `{arg}`"));
    }
    Ok(FeedArg {
        device: device.to_string(),
        path: PathBuf::from(path),
    })
}

#[derive(Parser)]
#[command(name = "weave-replay")]
#[command(about = "Replay multi-device pointer feeds through a gesture region")]
#[command(version)]
struct Cli {
    /// Gesture and device configuration (JSON)
    #[arg(short, long)]
    config: PathBuf,

    /// Event feed of one device, as <device>=<file> (JSON lines)
    #[arg(short, long = "feed", value_parser = parse_feed, required = true)]
    feeds: Vec<FeedArg>,

    /// Pretty-print each emission
    #[arg(long)]
    pretty: bool,
}

fn run(cli: &Cli) -> ReplayResult<()> {
    let config = ReplayConfig::load(&cli.config)?;
    let mut session = Session::new(&config)?;
    log::debug!(
        "Gestures {:?} across {} devices",
        session.region().gesture_names().collect::<Vec<_>>(),
        config.devices.len()
    );

    let mut feeds = Vec::with_capacity(cli.feeds.len());
    for feed in &cli.feeds {
        let file = File::open(&feed.path).map_err(|source| ReplayError::Io {
            path: feed.path.clone(),
            source,
        })?;
        feeds.push(session.load_feed(&feed.device, BufReader::new(file))?);
    }
    let events = feed::merge(feeds);
    log::info!("Replaying {} events from {} feeds", events.len(), cli.feeds.len());

    let stdout = io::stdout();
    let summary = session.run(events, &mut stdout.lock(), cli.pretty)?;
    log::info!(
        "Replay finished: {} emissions, {} dropped events, {} hook failures",
        summary.emissions,
        summary.dropped,
        summary.failures
    );
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            eprintln!("weave-replay: {err}");
            ExitCode::FAILURE
        }
    }
}
