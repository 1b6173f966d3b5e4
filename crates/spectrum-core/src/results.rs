//! Per-question results log.

use serde::{Deserialize, Serialize};

/// The outcome of one scored question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
    /// 1-based position of the question in the session.
    pub question_index: u32,
    /// Category of the question.
    pub category: String,
    /// Question body.
    pub question_text: String,
    /// Player who answered.
    pub responder: String,
    /// Player who guessed.
    pub guesser: String,
    /// Points awarded to the responder.
    pub responder_points: u8,
    /// Points awarded to the guesser.
    pub guesser_points: u8,
}

impl ResultRecord {
    /// Points awarded to both players together.
    pub fn total_points(&self) -> u32 {
        u32::from(self.responder_points) + u32::from(self.guesser_points)
    }
}

/// Chronological, append-only list of scored questions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultsLog {
    records: Vec<ResultRecord>,
}

impl ResultsLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record.
    pub fn append(&mut self, record: ResultRecord) {
        self.records.push(record);
    }

    /// All records in order.
    pub fn entries(&self) -> &[ResultRecord] {
        &self.records
    }

    /// The most recent record.
    pub fn last(&self) -> Option<&ResultRecord> {
        self.records.last()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sum of all points awarded.
    pub fn total_points(&self) -> u32 {
        self.records.iter().map(ResultRecord::total_points).sum()
    }

    /// Export the log as plain text.
    pub fn export_text(&self) -> String {
        let mut out = String::from("Game Results\n============\n\n");
        for r in &self.records {
            out.push_str(&format!(
                "#{} [{}] {}\n",
                r.question_index, r.category, r.question_text
            ));
            out.push_str(&format!(
                "  {} answered (+{}), {} guessed (+{})\n\n",
                r.responder, r.responder_points, r.guesser, r.guesser_points
            ));
        }
        out
    }
}
