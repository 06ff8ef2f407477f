/// Cadence - playlist engine demonstration
use anyhow::Context;
use cadence_cli::{
    catalog::{build_playlist, demo_catalog},
    demo, session, CliConfig, CliError,
};
use cadence_core::TrackFactory;
use cadence_playback::StrategyKind;
use clap::{Parser, Subcommand};
use std::{io::Write, path::PathBuf, process::ExitCode};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "cadence")]
#[command(about = "Composable playlists with swappable playback strategies", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "CADENCE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Walk through every strategy on the catalog (default)
    Demo,
    /// Play the catalog with one strategy
    Play {
        /// Strategy: sequential, shuffle, smart_shuffle or repeat
        #[arg(short, long)]
        strategy: Option<StrategyKind>,
        /// Shuffle seed, overrides the configured one
        #[arg(long)]
        seed: Option<u64>,
        /// Maximum number of items to emit
        #[arg(short, long)]
        limit: Option<usize>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// List registered item kinds
    Kinds,
}

fn main() -> ExitCode {
    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cadence=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let kind = err
                .chain()
                .find_map(|cause| cause.downcast_ref::<CliError>())
                .map_or("error", CliError::kind);
            eprintln!("error[{kind}]: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = CliConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command.unwrap_or(Commands::Demo) {
        Commands::Demo => {
            tracing::info!("Running demo");
            demo::run(&config, &mut out)?;
        }
        Commands::Play {
            strategy,
            seed,
            limit,
            json,
        } => {
            play(&config, strategy, seed, limit, json, &mut out)?;
        }
        Commands::Kinds => {
            for registration in TrackFactory::with_builtin_kinds().registered_kinds() {
                writeln!(
                    out,
                    "{:<10} {}",
                    registration.kind.as_str(),
                    registration.display_name
                )?;
            }
        }
    }

    out.flush()?;
    Ok(())
}

fn play(
    config: &CliConfig,
    strategy: Option<StrategyKind>,
    seed: Option<u64>,
    limit: Option<usize>,
    json: bool,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let entries = if config.catalog.is_empty() {
        demo_catalog()
    } else {
        config.catalog.clone()
    };

    let mut factory = TrackFactory::with_builtin_kinds();
    let playlist = build_playlist(&mut factory, "Catalog", &entries)
        .map_err(CliError::from)
        .context("Failed to build playlist from catalog")?;

    let mut player_config = config.player_config();
    if seed.is_some() {
        player_config.seed = seed;
    }
    let kind = strategy.unwrap_or(config.playback.strategy);

    let report = session::play(
        &playlist,
        kind,
        player_config,
        limit,
        config.playback.repeat_limit,
    );

    if json {
        session::write_json(out, &report)?;
    } else {
        session::write_text(out, &report)?;
    }
    Ok(())
}
