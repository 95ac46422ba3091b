use serde::{Deserialize, Serialize};

use crate::config::NotationConfig;
use crate::moves::MoveRecord;

/// Append-only log of executed moves.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MoveHistory {
    records: Vec<MoveRecord>,
}

impl MoveHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stamps the record with its sequence index and stores it.
    pub fn append(&mut self, mut record: MoveRecord) {
        record.index = self.records.len();
        self.records.push(record);
    }

    pub fn records(&self) -> &[MoveRecord] {
        &self.records
    }

    pub fn last(&self) -> Option<&MoveRecord> {
        self.records.last()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Full-move number of the move about to be played (1 before any move,
    /// bumped after every Black reply).
    pub fn move_number(&self) -> usize {
        self.records.len() / 2 + 1
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// The whole game as "1. e4 e5 2. Nf3 Nc6 ...".
    pub fn notation(&self, config: &NotationConfig) -> String {
        let mut parts = Vec::with_capacity(self.records.len() * 3 / 2);
        for (i, record) in self.records.iter().enumerate() {
            if i % 2 == 0 {
                parts.push(format!("{}.", i / 2 + 1));
            }
            parts.push(record.to_algebraic(config));
        }
        parts.join(" ")
    }
}
