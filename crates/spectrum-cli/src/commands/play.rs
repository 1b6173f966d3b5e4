use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use colored::Colorize;
use tracing::info;

use spectrum_core::{GameConfig, ResultExporter, RoundController};

use crate::console::Console;
use crate::store::DirStore;

pub fn run(
    questions: &Path,
    seed: Option<u64>,
    output: Option<PathBuf>,
    archive_dir: Option<PathBuf>,
) -> Result<(), String> {
    let repo = super::load_questions(questions)?;

    let config = match seed {
        Some(seed) => GameConfig::default().with_seed(seed),
        None => GameConfig::default(),
    };
    let exporter = match archive_dir {
        Some(dir) => {
            info!(dir = %dir.display(), "archiving results");
            ResultExporter::with_store(Box::new(DirStore::new(dir)))
        }
        None => ResultExporter::local_only(),
    };

    let mut console = Console::new(RoundController::new(repo, config), exporter, output);

    println!("  {} Spectrum", "🎲".bold());
    println!("  Type 'help' for commands, 'quit' to exit.\n");
    println!("{}\n", console.screen());

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    loop {
        print!("> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break, // EOF
            Err(e) => return Err(e.to_string()),
            _ => {}
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match console.process(input) {
            Ok(output) => {
                if !output.is_empty() {
                    println!("{output}\n");
                }
            }
            Err(e) => {
                println!("{}\n", e.yellow());
            }
        }
        if console.has_quit() {
            break;
        }
    }

    info!(
        questions = console.controller().state().questions_asked(),
        "session closed"
    );
    Ok(())
}
