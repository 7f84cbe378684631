//! Aggregation error types.
//!
//! Defined here so callers can match on the offending keys and report
//! precisely which record broke the dataset, without string matching.

use thiserror::Error;

/// Errors that can occur while aggregating submissions.
#[derive(Debug, Error)]
pub enum AggregateError {
    /// A user's answered part references a part key that is not present in
    /// the first-seen definition of the question. This indicates corrupted
    /// or mismatched input data and fails the whole aggregation.
    #[error("user '{user}' answered unknown part '{part}' of question '{question}'")]
    MissingAnswerKey {
        question: String,
        part: String,
        user: String,
    },
}

impl AggregateError {
    /// The question key the failure occurred in.
    pub fn question(&self) -> &str {
        match self {
            AggregateError::MissingAnswerKey { question, .. } => question,
        }
    }

    /// The part key that was not recognized.
    pub fn part(&self) -> &str {
        match self {
            AggregateError::MissingAnswerKey { part, .. } => part,
        }
    }

    /// The user whose submission carried the unknown part.
    pub fn user(&self) -> &str {
        match self {
            AggregateError::MissingAnswerKey { user, .. } => user,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_names_all_keys() {
        let err = AggregateError::MissingAnswerKey {
            question: "q1".into(),
            part: "x".into(),
            user: "bob".into(),
        };

        let message = err.to_string();
        assert!(message.contains("q1"));
        assert!(message.contains("'x'"));
        assert!(message.contains("bob"));
        assert_eq!(err.question(), "q1");
        assert_eq!(err.part(), "x");
        assert_eq!(err.user(), "bob");
    }
}
