//! Line-based game console.
//!
//! Turns one line of input into one controller action, then renders the
//! resulting screen. Reaching the end screen writes the results table
//! automatically (and archives it once per game when a store is set).
//! Output failures are reported as lines of text; the game state is never
//! rolled back because a file could not be written.

use std::path::{Path, PathBuf};

use chrono::Local;
use spectrum_core::export::to_csv_bytes;
use spectrum_core::question::display_label;
use spectrum_core::{
    ArchiveStatus, GameError, GuesserPoints, ResultExporter, RoundController, RoundOutcome, Step,
};

use crate::render;

/// An interactive game over text commands.
pub struct Console {
    controller: RoundController,
    exporter: ResultExporter,
    output: Option<PathBuf>,
    archived: bool,
    quit: bool,
}

fn err(e: GameError) -> String {
    e.to_string()
}

impl Console {
    /// Wrap a controller. `output` is where the results table is written
    /// when the game ends.
    pub fn new(
        controller: RoundController,
        exporter: ResultExporter,
        output: Option<PathBuf>,
    ) -> Self {
        Self {
            controller,
            exporter,
            output,
            archived: false,
            quit: false,
        }
    }

    /// Whether `quit` was entered.
    pub fn has_quit(&self) -> bool {
        self.quit
    }

    /// The underlying controller.
    pub fn controller(&self) -> &RoundController {
        &self.controller
    }

    /// The current screen.
    pub fn screen(&self) -> String {
        render::screen(&self.controller)
    }

    /// Process a line of input and return the text to show.
    pub fn process(&mut self, input: &str) -> Result<String, String> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(String::new());
        }

        let (cmd, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((cmd, rest)) => (cmd.to_lowercase(), rest.trim()),
            None => (trimmed.to_lowercase(), ""),
        };

        match cmd.as_str() {
            "help" | "?" => return Ok(render::help(self.controller.step())),
            "status" => return Ok(render::status(self.controller.state())),
            "quit" | "q" => {
                self.quit = true;
                return Ok("Goodbye!".to_string());
            }
            _ => {}
        }

        let before = self.controller.step();
        let mut out = self.dispatch(&cmd, rest)?;

        if before != Step::End
            && self.controller.step() == Step::End
            && !self.controller.state().results().is_empty()
        {
            let output = self.output.clone();
            let msg = self.export(output.as_deref());
            push_line(&mut out, &msg);
        }

        push_line(&mut out, &self.screen());
        Ok(out)
    }

    fn dispatch(&mut self, cmd: &str, rest: &str) -> Result<String, String> {
        let step = self.controller.step();
        match (step, cmd) {
            (Step::Setup, "player") => {
                let (slot, name) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                let index = match slot.parse::<usize>() {
                    Ok(n @ 1..=2) => n - 1,
                    _ => return Err("usage: player <1|2> <name>".to_string()),
                };
                self.controller.set_player_name(index, name).map_err(err)?;
                Ok(String::new())
            }
            (Step::Setup, "next") => {
                self.controller.confirm_players().map_err(err)?;
                Ok(String::new())
            }
            (Step::CategorySelect, "toggle") => {
                let name = self.resolve_category(rest);
                let selected = self.controller.toggle_category(&name).map_err(err)?;
                let verb = if selected { "Selected" } else { "Deselected" };
                Ok(format!("{verb} {}", display_label(&name)))
            }
            (Step::CategorySelect, "back") => {
                self.controller.back_to_setup().map_err(err)?;
                Ok(String::new())
            }
            (Step::CategorySelect, "start") => {
                let step = self.controller.confirm_categories().map_err(err)?;
                Ok(exhausted_message(step))
            }
            (Step::Play, "swap") => {
                if self.controller.replace_question().map_err(err)? {
                    Ok(String::new())
                } else {
                    Ok("No other questions left.".to_string())
                }
            }
            (Step::Play, "save") => {
                let outcome = self.controller.save_and_continue().map_err(err)?;
                let saved = self.saved_line();
                Ok(match outcome {
                    RoundOutcome::NextQuestion => saved,
                    RoundOutcome::RoundComplete => format!("{saved} Round complete."),
                    RoundOutcome::Exhausted => format!("{saved} 🎉 No questions left!"),
                })
            }
            (Step::Play, "points") => self.select_points(rest),
            (Step::Play, value) if value.parse::<u8>().is_ok() => self.select_points(value),
            (Step::ContinuePrompt, "continue" | "yes" | "y") => {
                let step = self.controller.continue_game().map_err(err)?;
                Ok(exhausted_message(step))
            }
            (Step::ContinuePrompt, "end" | "no" | "n") => {
                self.controller.end_game().map_err(err)?;
                Ok(String::new())
            }
            (Step::End, "resume") => {
                let step = self.controller.resume().map_err(err)?;
                if step == Step::End {
                    Ok("No questions left to play.".to_string())
                } else {
                    Ok(String::new())
                }
            }
            (Step::End, "again") => {
                self.controller.reset().map_err(err)?;
                self.archived = false;
                Ok("🎮 New game.".to_string())
            }
            (Step::End, "export") => {
                let path = if rest.is_empty() {
                    self.output.clone()
                } else {
                    Some(PathBuf::from(rest))
                };
                if path.is_none() {
                    return Err("usage: export <file>".to_string());
                }
                Ok(self.export(path.as_deref()))
            }
            (step, other) => Err(format!(
                "unknown command '{other}' during {step}, type 'help'"
            )),
        }
    }

    fn select_points(&mut self, value: &str) -> Result<String, String> {
        let raw: u8 = value
            .trim()
            .parse()
            .map_err(|_| "usage: 0|2|3|4".to_string())?;
        let points = GuesserPoints::new(raw).map_err(err)?;
        self.controller.select_points(points).map_err(err)?;
        Ok(String::new())
    }

    /// Accept either a category name or its 1-based number on screen.
    fn resolve_category(&self, arg: &str) -> String {
        let categories = self.controller.repository().categories();
        match arg.parse::<usize>() {
            Ok(n) if (1..=categories.len()).contains(&n) => categories[n - 1].name.clone(),
            _ => arg.to_string(),
        }
    }

    /// The points from the question just scored.
    fn saved_line(&self) -> String {
        match self.controller.state().results().last() {
            Some(r) => format!(
                "💾 Saved: {} +{}, {} +{}.",
                r.guesser, r.guesser_points, r.responder, r.responder_points
            ),
            None => "💾 Saved.".to_string(),
        }
    }

    /// Write the results to `path` and archive the game if not done yet.
    ///
    /// A `.txt` path gets the plain-text log, anything else the table.
    fn export(&mut self, path: Option<&Path>) -> String {
        let results = self.controller.state().results();
        let (table, archive) = if self.archived {
            (to_csv_bytes(results), None)
        } else {
            let today = Local::now().date_naive();
            match self.exporter.export(results, today) {
                Ok(outcome) => (Ok(outcome.bytes), Some(outcome.archive)),
                Err(e) => (Err(e), None),
            }
        };
        if let Some(ArchiveStatus::Stored(_)) = archive {
            self.archived = true;
        }

        let mut out = String::new();
        match (path, table) {
            (_, Err(e)) => push_line(&mut out, &format!("❌ Cannot build results table: {e}")),
            (Some(path), Ok(bytes)) => {
                let written = if is_text(path) {
                    let text = self.controller.state().results().export_text();
                    std::fs::write(path, text)
                } else {
                    std::fs::write(path, &bytes)
                };
                match written {
                    Ok(()) => push_line(
                        &mut out,
                        &format!("💾 Results written to {}", path.display()),
                    ),
                    Err(e) => push_line(
                        &mut out,
                        &format!("❌ Cannot write results to {}: {e}", path.display()),
                    ),
                }
            }
            (None, Ok(_)) => {}
        }

        match archive {
            Some(ArchiveStatus::Stored(name)) => {
                push_line(&mut out, &format!("✅ Results archived as {name}"));
            }
            Some(ArchiveStatus::Failed(reason)) => {
                push_line(&mut out, &format!("❌ Archiving failed: {reason}"));
            }
            Some(ArchiveStatus::LocalOnly) if path.is_none() => {
                push_line(&mut out, "⚠️ Results were not saved anywhere.");
            }
            _ => {}
        }
        out
    }
}

fn is_text(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("txt"))
}

fn exhausted_message(step: Step) -> String {
    if step == Step::End {
        "🎉 No questions left!".to_string()
    } else {
        String::new()
    }
}

fn push_line(out: &mut String, line: &str) {
    if line.is_empty() {
        return;
    }
    if !out.is_empty() {
        out.push('\n');
    }
    out.push_str(line);
}
