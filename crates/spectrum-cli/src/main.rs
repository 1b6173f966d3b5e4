//! Terminal frontend for Spectrum, a two-player question-and-guessing game.

mod commands;
mod console;
mod render;
mod store;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "spectrum",
    about = "Spectrum: a two-player question-and-guessing game",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game in the terminal
    Play {
        /// Semicolon-delimited question table (id;categories;text)
        #[arg(short, long, default_value = "questions.csv")]
        questions: PathBuf,

        /// RNG seed for a reproducible question order
        #[arg(short, long)]
        seed: Option<u64>,

        /// Write the results table here when the game ends
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also archive each finished game in this directory
        #[arg(long)]
        archive_dir: Option<PathBuf>,
    },

    /// List question categories and how many questions each has
    Categories {
        /// Semicolon-delimited question table (id;categories;text)
        #[arg(short, long, default_value = "questions.csv")]
        questions: PathBuf,
    },
}

/// Log to stderr; stdout belongs to the game screens.
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(true)
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            questions,
            seed,
            output,
            archive_dir,
        } => commands::play::run(&questions, seed, output, archive_dir),
        Commands::Categories { questions } => commands::categories::run(&questions),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
