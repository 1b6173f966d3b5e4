//! Round state machine and scoring engine for Spectrum, a two-player
//! question-and-guessing game.
//!
//! Provides the question repository (loaded once from a semicolon-delimited
//! table), a draw engine that picks unused questions from the chosen
//! categories, the scoring table, the session state, and a round controller
//! that drives a game from player setup through the final standings. The
//! results log of a finished game can be serialized and archived through the
//! export module.

pub mod config;
pub mod controller;
pub mod draw;
pub mod error;
pub mod export;
pub mod question;
pub mod results;
pub mod scoring;
pub mod session;

pub use config::GameConfig;
pub use controller::{RoundController, RoundOutcome};
pub use error::{ExportError, ExportResult, GameError, GameResult, LoadError, LoadResult};
pub use export::{ArchiveStatus, ArchiveStore, ExportOutcome, ResultExporter};
pub use question::{Question, QuestionRepository};
pub use results::{ResultRecord, ResultsLog};
pub use scoring::{GuesserPoints, Scoreboard};
pub use session::{SessionState, Step};
