//! Domain error types.
//!
//! The `Display` output of every variant is the message shown to the user
//! who issued the command. None of these are fatal to the process.

use thiserror::Error;

/// Top-level domain error type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// A malformed configuration value (bad minute count, blank topic).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The operation needs an active round and none is running.
    #[error("no round is currently active in this channel")]
    NotActive,

    /// A start was requested while a round is already running.
    #[error("a round is already active in this channel")]
    AlreadyActive,

    /// A start was requested before a topic was configured.
    #[error("set a topic before starting the round")]
    MissingTopic,

    /// A start was requested before a time limit was configured.
    #[error("set a time limit before starting the round")]
    MissingTimeLimit,

    /// A submission came from someone who has not joined.
    #[error("you must join the round before submitting")]
    NotAParticipant,

    /// An announcement could not be delivered by the notifier.
    #[error("failed to publish to {destination}: {reason}")]
    PublicationFailure {
        /// Human-readable destination name.
        destination: String,
        /// What went wrong.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_message_includes_detail() {
        let err = DomainError::InvalidInput("time limit must be a positive whole number".into());
        assert_eq!(
            err.to_string(),
            "invalid input: time limit must be a positive whole number"
        );
    }

    #[test]
    fn test_publication_failure_message_names_destination() {
        let err = DomainError::PublicationFailure {
            destination: "gallery-submissions".into(),
            reason: "channel not found".into(),
        };
        assert_eq!(
            err.to_string(),
            "failed to publish to gallery-submissions: channel not found"
        );
    }
}
