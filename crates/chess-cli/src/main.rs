mod config;
mod output;
mod play;

use anyhow::Context;
use chess_core::Color;
use chess_rules::{perft, perft_divide, Game};
use clap::{Parser, Subcommand};
use config::ChessConfig;
use output::{write_json, DivideEntry, GameSummary, MoveListing, PerftReport};
use play::PlayOptions;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "chess")]
#[command(about = "Play and inspect chess positions from the terminal")]
struct Cli {
    /// Configuration file (defaults to chess.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Start from this FEN instead of the configured position
    #[arg(long, global = true)]
    fen: Option<String>,
    /// Emit JSON instead of text
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play moves typed on stdin
    Play,
    /// Print the FEN reached after the given moves
    Fen {
        /// Moves in any accepted notation
        moves: Vec<String>,
    },
    /// List legal moves after the given moves
    Moves {
        /// Side to list moves for (defaults to the side to move)
        #[arg(short, long)]
        color: Option<Color>,
        /// Moves in any accepted notation
        moves: Vec<String>,
    },
    /// Count leaf nodes of the legal move tree
    Perft {
        depth: u32,
        /// Break the count down by root move
        #[arg(long)]
        divide: bool,
    },
}

/// Settings after merging the config file with command-line flags.
struct Settings {
    start_fen: Option<String>,
    show_board: bool,
    json: bool,
}

impl Settings {
    fn resolve(cli: &Cli, config: ChessConfig) -> Self {
        Settings {
            start_fen: cli.fen.clone().or(config.start_fen),
            show_board: config.show_board,
            json: cli.json || config.json,
        }
    }

    fn new_game(&self) -> anyhow::Result<Game> {
        match &self.start_fen {
            Some(fen) => Game::from_fen(fen).with_context(|| format!("loading FEN '{}'", fen)),
            None => Ok(Game::new()),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = ChessConfig::load(cli.config.as_deref()).context("loading configuration")?;
    init_tracing(&config.log_level);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(cli, config, &mut out)
}

/// Logs go to stderr so stdout carries only moves, FEN and JSON.
fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run<W: Write>(cli: Cli, config: ChessConfig, out: &mut W) -> anyhow::Result<()> {
    let settings = Settings::resolve(&cli, config);
    let mut game = settings.new_game()?;
    tracing::info!(fen = %game.fen(), "starting position");

    match cli.command {
        Commands::Play => {
            let options = PlayOptions {
                show_board: settings.show_board,
                json: settings.json,
            };
            play::run(&mut game, io::stdin().lock(), out, options)?;
        }
        Commands::Fen { moves } => {
            play_all(&mut game, &moves)?;
            if settings.json {
                write_json(out, &GameSummary::of(&game))?;
            } else {
                writeln!(out, "{}", game.fen())?;
            }
        }
        Commands::Moves { color, moves } => {
            play_all(&mut game, &moves)?;
            let color = color.unwrap_or_else(|| game.side_to_move());
            let listing = MoveListing {
                color,
                moves: game.legal_moves_for_color(color),
            };
            if settings.json {
                write_json(out, &listing)?;
            } else {
                for mov in &listing.moves {
                    writeln!(out, "{}", mov)?;
                }
            }
        }
        Commands::Perft { depth, divide } => {
            let position = *game.position();
            let divide = divide.then(|| {
                perft_divide(&position, depth)
                    .into_iter()
                    .map(|(mov, nodes)| DivideEntry { mov, nodes })
                    .collect::<Vec<_>>()
            });
            let nodes = match &divide {
                Some(entries) if depth > 0 => entries.iter().map(|e| e.nodes).sum(),
                _ => perft(&position, depth),
            };
            let report = PerftReport {
                fen: position.to_fen(),
                depth,
                nodes,
                divide,
            };

            if settings.json {
                write_json(out, &report)?;
            } else {
                for entry in report.divide.iter().flatten() {
                    writeln!(out, "{}: {}", entry.mov, entry.nodes)?;
                }
                writeln!(out, "nodes: {}", report.nodes)?;
            }
        }
    }

    Ok(())
}

fn play_all(game: &mut Game, moves: &[String]) -> anyhow::Result<()> {
    for text in moves {
        game.make_move_text(text)
            .with_context(|| format!("playing '{}' at ply {}", text, game.ply_count() + 1))?;
    }
    Ok(())
}
