//! Session state for a single two-player game.
//!
//! `SessionState` is plain data. Only [`RoundController`](crate::RoundController)
//! mutates it; everything else reads it through the accessors below.

use std::collections::{BTreeSet, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::question::Question;
use crate::results::ResultsLog;
use crate::scoring::{GuesserPoints, Scoreboard};

/// The screen a session is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Step {
    /// Entering player names.
    #[default]
    Setup,
    /// Choosing question categories.
    CategorySelect,
    /// Answering and scoring questions.
    Play,
    /// A round finished; asking whether to go on.
    ContinuePrompt,
    /// Final standings.
    End,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Setup => write!(f, "setup"),
            Self::CategorySelect => write!(f, "category selection"),
            Self::Play => write!(f, "play"),
            Self::ContinuePrompt => write!(f, "continue prompt"),
            Self::End => write!(f, "end"),
        }
    }
}

/// All mutable state of one game.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub(crate) players: [String; 2],
    pub(crate) category_selection: BTreeSet<String>,
    pub(crate) chosen_categories: BTreeSet<String>,
    pub(crate) used_ids: HashSet<u32>,
    pub(crate) current_question: Option<Question>,
    pub(crate) scores: Scoreboard,
    pub(crate) step: Step,
    pub(crate) questions_asked: u32,
    pub(crate) pending_guesser_points: Option<GuesserPoints>,
    pub(crate) results: ResultsLog,
}

impl SessionState {
    /// A fresh session on the setup screen.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return every field to its initial value.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Both player names. Empty strings until entered.
    pub fn players(&self) -> &[String; 2] {
        &self.players
    }

    /// Categories toggled on the selection screen.
    pub fn category_selection(&self) -> &BTreeSet<String> {
        &self.category_selection
    }

    /// Categories locked in for play.
    pub fn chosen_categories(&self) -> &BTreeSet<String> {
        &self.chosen_categories
    }

    /// Ids of every question shown so far.
    pub fn used_ids(&self) -> &HashSet<u32> {
        &self.used_ids
    }

    /// The question on the table.
    pub fn current_question(&self) -> Option<&Question> {
        self.current_question.as_ref()
    }

    /// Running scores.
    pub fn scores(&self) -> &Scoreboard {
        &self.scores
    }

    /// The current screen.
    pub fn step(&self) -> Step {
        self.step
    }

    /// Number of fully scored questions.
    pub fn questions_asked(&self) -> u32 {
        self.questions_asked
    }

    /// The guesser's selection for the current question.
    pub fn pending_guesser_points(&self) -> Option<GuesserPoints> {
        self.pending_guesser_points
    }

    /// Scored questions so far.
    pub fn results(&self) -> &ResultsLog {
        &self.results
    }

    fn turn(&self) -> usize {
        (self.questions_asked % 2) as usize
    }

    /// The player answering the current question.
    pub fn responder(&self) -> &str {
        &self.players[self.turn()]
    }

    /// The player guessing the current question.
    pub fn guesser(&self) -> &str {
        &self.players[1 - self.turn()]
    }

    /// Completed rounds (two questions each).
    pub fn rounds_played(&self) -> u32 {
        self.questions_asked / 2
    }

    /// 1-based number of the round in progress.
    pub fn current_round(&self) -> u32 {
        self.rounds_played() + 1
    }

    /// 1-based number of the question in progress.
    pub fn next_question_number(&self) -> u32 {
        self.questions_asked + 1
    }
}
