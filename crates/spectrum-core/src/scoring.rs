//! Scoring table and running scores.
//!
//! The guesser earns 0, 2, 3 or 4 points for how close the estimate was; the
//! responder earns a smaller share derived from the guesser's points.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{GameError, GameResult};

/// Responder points for a guesser score.
///
/// | guesser | responder |
/// |---------|-----------|
/// | 0       | 0         |
/// | 2       | 1         |
/// | 3       | 1         |
/// | 4       | 2         |
///
/// Any other value yields 0.
pub fn responder_points(guesser: u8) -> u8 {
    match guesser {
        2 | 3 => 1,
        4 => 2,
        _ => 0,
    }
}

/// A guesser score accepted by the scoring table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct GuesserPoints(u8);

impl GuesserPoints {
    /// Every selectable value, in display order.
    pub const ALL: [GuesserPoints; 4] = [
        GuesserPoints(0),
        GuesserPoints(2),
        GuesserPoints(3),
        GuesserPoints(4),
    ];

    /// Accept one of 0, 2, 3 or 4.
    pub fn new(value: u8) -> GameResult<Self> {
        match value {
            0 | 2 | 3 | 4 => Ok(Self(value)),
            other => Err(GameError::InvalidPoints(other)),
        }
    }

    /// The guesser's points.
    pub fn value(self) -> u8 {
        self.0
    }

    /// Points the responder earns alongside this guess.
    pub fn responder_points(self) -> u8 {
        responder_points(self.0)
    }
}

impl TryFrom<u8> for GuesserPoints {
    type Error = GameError;

    fn try_from(value: u8) -> GameResult<Self> {
        Self::new(value)
    }
}

impl From<GuesserPoints> for u8 {
    fn from(points: GuesserPoints) -> u8 {
        points.0
    }
}

impl fmt::Display for GuesserPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Point totals per player, kept in player order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    entries: Vec<(String, u32)>,
}

impl Scoreboard {
    /// A scoreboard with every player at zero.
    pub fn new<I, S>(players: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entries: players.into_iter().map(|p| (p.into(), 0)).collect(),
        }
    }

    /// Add points to a player. Unknown names are ignored.
    pub fn add(&mut self, player: &str, points: u32) {
        if let Some((_, total)) = self.entries.iter_mut().find(|(name, _)| name == player) {
            *total += points;
        }
    }

    /// A player's total.
    pub fn get(&self, player: &str) -> Option<u32> {
        self.entries
            .iter()
            .find(|(name, _)| name == player)
            .map(|(_, total)| *total)
    }

    /// Player names in registration order.
    pub fn players(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Sum of all players' points.
    pub fn total(&self) -> u32 {
        self.entries.iter().map(|(_, total)| total).sum()
    }

    /// Whether no player is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Players sorted by points, highest first. Ties keep registration order.
    pub fn standings(&self) -> Vec<(String, u32)> {
        let mut sorted = self.entries.clone();
        sorted.sort_by(|a, b| b.1.cmp(&a.1));
        sorted
    }
}
