/// Cadence - headless driver for the declarative player
use anyhow::Context;
use cadence_core::PlayerConfig;
use cadence_playback::{Command, HeadlessElement, PlaybackEvent, Player};
use cadence_soundcloud::{prepare_config, SoundCloudClient};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod script;

use script::Step;

#[derive(Parser)]
#[command(name = "cadence")]
#[command(about = "Drive a Cadence player without a browser", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a configuration and list its problems
    Check {
        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Resolve SoundCloud songs and print the resulting collection
    Resolve {
        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Run a command script against a headless player
    Run {
        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Script file (stdin when omitted)
        #[arg(short, long)]
        script: Option<PathBuf>,
        /// Length reported for every song, in seconds
        #[arg(short, long, default_value_t = 180.0)]
        duration: f64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cadence=info,cadence_playback=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check { config } => {
            check(config.as_deref())?;
        }
        Commands::Resolve { config } => {
            let config = load(config.as_deref()).await?;
            println!("{}", serde_json::to_string_pretty(&config.songs)?);
        }
        Commands::Run {
            config,
            script,
            duration,
        } => {
            let config = load(config.as_deref()).await?;
            let text = match script {
                Some(path) => std::fs::read_to_string(&path)
                    .with_context(|| format!("reading {}", path.display()))?,
                None => std::io::read_to_string(std::io::stdin())?,
            };
            for event in run(config, &text, duration)? {
                println!("{}", serde_json::to_string(&event)?);
            }
        }
    }

    Ok(())
}

fn check(path: Option<&Path>) -> anyhow::Result<()> {
    let config = PlayerConfig::load(path)?;

    let issues = config.validate()?;
    if issues.is_empty() {
        println!(
            "ok: {} songs, {} playlists",
            config.songs.len(),
            config.playlists.len()
        );
    } else {
        for issue in &issues {
            println!("warning: {}", issue);
        }
    }

    Ok(())
}

/// Load a configuration and resolve its SoundCloud songs
async fn load(path: Option<&Path>) -> anyhow::Result<PlayerConfig> {
    let mut config = PlayerConfig::load(path)?;

    let Some(client_id) = config.soundcloud.as_ref().map(|s| s.client_id.clone()) else {
        return Ok(config);
    };

    let client = SoundCloudClient::new(client_id)?;
    if let Some(report) = prepare_config(&mut config, &client).await {
        tracing::info!(
            resolved = report.resolved.len(),
            failed = report.failures.len(),
            "SoundCloud songs prepared"
        );
    }

    Ok(config)
}

/// Play a script and collect every change the player reported
fn run(config: PlayerConfig, script: &str, duration: f64) -> anyhow::Result<Vec<PlaybackEvent>> {
    let steps = script::parse_script(script)?;

    let mut media = HeadlessElement::new();
    media.set_duration(duration);

    let mut player = Player::new(config, media)?;
    let mut events = player.drain_events();

    for step in steps {
        match step {
            Step::Command(command) => player.dispatch(command),
            Step::Tick(seconds) => {
                let ended = player.media_mut().advance(seconds);
                player.dispatch(Command::TimeUpdate);
                if ended {
                    player.dispatch(Command::SongEnded);
                }
            }
        }
        events.extend(player.drain_events());
    }

    Ok(events)
}
