//! Strictly Morris - Unified CLI
//!
//! Referees one match between two player programs and prints the result.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command, MatchArgs};
use rand::seq::SliceRandom;
use std::fs::File;
use std::path::Path;
use std::sync::{Arc, Mutex};
use strictly_morris::{
    Color, LaskerMorris, ProcessPlayer, RefereeConfig, RuleSet, Seats, SharedSpectator,
    SpectatorState, TicTacToe, TurnController, follow, serve,
};
use tokio::sync::{RwLock, mpsc};
use tracing::{info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let (Command::Lasker(args) | Command::Tictactoe(args)) = &cli.command;
    initialize_tracing(args.debug, args.log_file.as_deref())?;

    match cli.command {
        Command::Lasker(args) => {
            let config = load_config(&args)?;
            let game = LaskerMorris::new().with_quiet_move_limit(*config.quiet_move_limit());
            run_match(game, &args, config).await
        }
        Command::Tictactoe(args) => {
            let config = load_config(&args)?;
            run_match(TicTacToe::new(), &args, config).await
        }
    }
}

/// Builds the configuration: defaults, then the file, then flags.
fn load_config(args: &MatchArgs) -> Result<RefereeConfig> {
    let mut config = match &args.config {
        Some(path) => RefereeConfig::from_file(path)?,
        None => RefereeConfig::default(),
    };

    if let Some(timeout_ms) = args.timeout_ms {
        config = config.with_move_timeout_ms(timeout_ms);
    }
    if let Some(port) = args.port {
        config = config.with_port(port);
    }
    if let Some(delay) = args.move_delay_ms {
        config = config.with_move_delay_ms(delay);
    }
    if let Some(limit) = args.quiet_move_limit {
        config = config.with_quiet_move_limit(Some(limit));
    }
    if args.no_visual {
        config = config.with_visual(false);
    }
    if args.web {
        config = config.with_web(true);
    }
    if args.no_random {
        config = config.with_random_colors(false);
    }
    if args.debug {
        config = config.with_forward_stderr(true);
    }

    config.validate()?;
    info!(?config, "Configuration resolved");
    Ok(config)
}

/// Referees one match of `game` and prints the terminal message.
#[instrument(skip_all, fields(game = game.name()))]
async fn run_match<G: RuleSet>(
    game: G,
    args: &MatchArgs,
    config: RefereeConfig,
) -> Result<()> {
    let mut commands = [args.player1.clone(), args.player2.clone()];
    if *config.random_colors() {
        commands.shuffle(&mut rand::thread_rng());
    }
    let [blue_command, orange_command] = commands;
    info!(blue = %blue_command, orange = %orange_command, "Colors assigned");

    let blue = ProcessPlayer::spawn(
        &Color::Blue.to_string(),
        &blue_command,
        *config.forward_stderr(),
    )
    .with_context(|| format!("Failed to start blue player '{}'", blue_command))?;
    let orange = ProcessPlayer::spawn(
        &Color::Orange.to_string(),
        &orange_command,
        *config.forward_stderr(),
    )
    .with_context(|| format!("Failed to start orange player '{}'", orange_command))?;

    let spectators: SharedSpectator = Arc::new(RwLock::new(SpectatorState::new(game.name())));
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let spectator = tokio::spawn(follow(event_rx, Arc::clone(&spectators), *config.visual()));

    let server = config.web().then(|| {
        let state = Arc::clone(&spectators);
        let port = *config.port();
        tokio::spawn(async move {
            if let Err(e) = serve(port, state).await {
                warn!(error = %e, "Visualizer stopped");
            }
        })
    });

    let controller =
        TurnController::new(game, Seats::new(Box::new(blue), Box::new(orange)), &config)
            .with_events(event_tx);
    let report = controller.run().await;

    spectator.await.context("Spectator task failed")?;
    println!("{}", report.message());

    if let Some(server) = server {
        info!("Match over; visualizer still serving. Press Ctrl+C to exit.");
        tokio::signal::ctrl_c().await?;
        server.abort();
    }

    Ok(())
}

/// Installs stderr logging, plus a plain-text copy in `log_file` if given.
fn initialize_tracing(debug: bool, log_file: Option<&Path>) -> Result<()> {
    let default_filter = if debug {
        "debug"
    } else {
        "info,strictly_morris=debug"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let file_layer = match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            Some(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .init();

    Ok(())
}
