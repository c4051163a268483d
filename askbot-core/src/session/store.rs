//! Session data structures

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A conversation session: question/answer records in the order they were asked
#[derive(Debug, Clone, Default, Serialize)]
pub struct Session {
    records: Vec<ConversationRecord>,
}

impl Session {
    /// Create a new, empty session
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a question/answer pair and return the stored record
    pub fn record(
        &mut self,
        question: impl Into<String>,
        answer: impl Into<String>,
    ) -> &ConversationRecord {
        self.records.push(ConversationRecord {
            question: question.into(),
            answer: answer.into(),
            asked_at: Utc::now(),
        });
        &self.records[self.records.len() - 1]
    }

    /// All records, oldest first
    pub fn records(&self) -> &[ConversationRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Drop every record
    pub fn clear(&mut self) {
        self.records.clear();
    }
}

/// One answered question. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversationRecord {
    question: String,
    answer: String,
    asked_at: DateTime<Utc>,
}

impl ConversationRecord {
    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn asked_at(&self) -> DateTime<Utc> {
        self.asked_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_creation() {
        let session = Session::new();
        assert!(session.is_empty());
        assert_eq!(session.len(), 0);
    }

    #[test]
    fn test_records_keep_insertion_order() {
        let mut session = Session::new();
        for i in 0..5 {
            session.record(format!("Question {}", i), format!("Answer {}", i));
        }

        assert_eq!(session.len(), 5);
        for (i, record) in session.records().iter().enumerate() {
            assert_eq!(record.question(), format!("Question {}", i));
            assert_eq!(record.answer(), format!("Answer {}", i));
        }
        assert!(session.records()[0].asked_at() <= session.records()[4].asked_at());
    }

    #[test]
    fn test_record_returns_stored_entry() {
        let mut session = Session::new();
        let asked_at = session.record("Where is Taj Mahal?", "Agra").asked_at();

        assert_eq!(session.records()[0].asked_at(), asked_at);
        assert_eq!(session.records()[0].answer(), "Agra");
    }

    #[test]
    fn test_clear() {
        let mut session = Session::new();
        session.record("Where is Taj Mahal?", "Agra");
        session.clear();

        assert!(session.is_empty());
        session.record("How tall is Mount Everest?", "8849 m");
        assert_eq!(session.len(), 1);
    }
}
