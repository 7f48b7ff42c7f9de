//! Outcomes produced by the round aggregate.
//!
//! Every successful operation returns one of these. Their `Display` output is
//! the confirmation shown to the user; their serialized form is the structured
//! payload handed to whatever renders it.

use std::fmt;

use artjam_core::id::{ChannelId, ParticipantId};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::values::{TimeLeft, TimeLimit, plural};

/// Emitted when a topic is configured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicSet {
    /// The stored topic, verbatim.
    pub topic: String,
}

impl fmt::Display for TopicSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Topic set to \"{}\".", self.topic)
    }
}

/// Emitted when a time limit is configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeLimitSet {
    /// The stored limit.
    pub time_limit_minutes: TimeLimit,
}

impl fmt::Display for TimeLimitSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Time limit set to {}.", self.time_limit_minutes)
    }
}

/// Emitted when a participant joins (or rejoins) an active round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParticipantJoined {
    /// Who joined.
    pub participant_id: ParticipantId,
    /// Their display name.
    pub display_name: String,
}

impl fmt::Display for ParticipantJoined {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} joined the round.", self.display_name)
    }
}

/// Result of a leave request on an active round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum LeaveOutcome {
    /// The participant was removed, along with any submission they made.
    Left {
        /// Who left.
        participant_id: ParticipantId,
        /// Their display name.
        display_name: String,
        /// Whether a submission was discarded with them.
        submission_withdrawn: bool,
    },
    /// The requester had not joined; nothing changed.
    NotAParticipant {
        /// Their display name.
        display_name: String,
    },
}

impl fmt::Display for LeaveOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left {
                display_name,
                submission_withdrawn: true,
                ..
            } => write!(
                f,
                "{display_name} left the round and their submission was withdrawn."
            ),
            Self::Left { display_name, .. } => write!(f, "{display_name} left the round."),
            Self::NotAParticipant { display_name } => {
                write!(f, "{display_name} is not a participant in this round.")
            }
        }
    }
}

/// Emitted when a participant's entry is recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntrySubmitted {
    /// Who submitted.
    pub participant_id: ParticipantId,
    /// Their display name.
    pub display_name: String,
    /// The artifact reference now on file.
    pub artifact_reference: String,
    /// When it was recorded.
    pub submitted_at: DateTime<Utc>,
    /// Whether an earlier entry by the same participant was overwritten.
    pub replaced_previous: bool,
}

impl fmt::Display for EntrySubmitted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.replaced_previous {
            write!(f, "Updated the submission from {}.", self.display_name)
        } else {
            write!(f, "Received the submission from {}.", self.display_name)
        }
    }
}

/// Announcement payload produced when a round starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundStarted {
    /// The channel the round runs in.
    pub channel_id: ChannelId,
    /// Identifier of this round cycle.
    pub round_id: Uuid,
    /// The round's topic.
    pub topic: String,
    /// The round's length.
    pub time_limit_minutes: TimeLimit,
    /// When the round started.
    pub started_at: DateTime<Utc>,
    /// When the deadline falls.
    pub ends_at: DateTime<Utc>,
}

impl fmt::Display for RoundStarted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "A new round has started! Topic: \"{}\". You have {}; submissions close at {}.",
            self.topic,
            self.time_limit_minutes,
            self.ends_at.format("%H:%M:%S UTC"),
        )
    }
}

/// How a round came to an end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    /// The deadline task fired.
    Deadline,
    /// An authorized actor ended it early.
    Manual,
}

/// One submission as republished in the results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionRecord {
    /// Who submitted.
    pub participant_id: ParticipantId,
    /// Their display name.
    pub display_name: String,
    /// The artifact reference.
    pub artifact_reference: String,
    /// When it was submitted.
    pub submitted_at: DateTime<Utc>,
}

/// Results payload for an ended round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundResults {
    /// The round's topic.
    pub topic: String,
    /// The round's length.
    pub time_limit_minutes: TimeLimit,
    /// Participants on the roster when the round ended.
    pub participant_count: usize,
    /// Entries on file when the round ended.
    pub submission_count: usize,
    /// All entries, oldest first.
    pub submissions: Vec<SubmissionRecord>,
}

/// Emitted when a round ends by either path. The round has already been
/// reset by the time this value exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundEnded {
    /// The channel the round ran in.
    pub channel_id: ChannelId,
    /// Identifier of the round cycle that ended.
    pub round_id: Uuid,
    /// Why it ended.
    pub reason: EndReason,
    /// When the round started.
    pub started_at: DateTime<Utc>,
    /// When it actually ended.
    pub ended_at: DateTime<Utc>,
    /// Aggregated results.
    pub results: RoundResults,
}

impl fmt::Display for RoundEnded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "The round on \"{}\" has ended with {} from {}.",
            self.results.topic,
            plural(self.results.submission_count as u64, "submission"),
            plural(self.results.participant_count as u64, "participant"),
        )
    }
}

/// Snapshot answered by the status query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RoundStatus {
    /// No round is running. Any configuration already made is reported.
    Inactive {
        /// Topic configured for the next round, if any.
        topic: Option<String>,
        /// Time limit configured for the next round, if any.
        time_limit_minutes: Option<TimeLimit>,
    },
    /// A round is running.
    Active {
        /// The round's topic.
        topic: String,
        /// The round's length.
        time_limit_minutes: TimeLimit,
        /// When the deadline falls.
        ends_at: DateTime<Utc>,
        /// Live time-left computation.
        time_left: TimeLeft,
        /// Joined participants.
        participant_count: usize,
        /// Entries on file.
        submission_count: usize,
    },
}

impl fmt::Display for RoundStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inactive {
                topic,
                time_limit_minutes,
            } => {
                f.write_str("No round is active. Set a topic and a time limit, then start a round.")?;
                if let Some(topic) = topic {
                    write!(f, " Topic so far: \"{topic}\".")?;
                }
                if let Some(limit) = time_limit_minutes {
                    write!(f, " Time limit so far: {limit}.")?;
                }
                Ok(())
            }
            Self::Active {
                topic,
                time_limit_minutes,
                time_left,
                participant_count,
                submission_count,
                ..
            } => write!(
                f,
                "Round in progress. Topic: \"{topic}\". Time limit: {time_limit_minutes}. \
                 Time left: {time_left}. Participants: {participant_count}. \
                 Submissions: {submission_count}."
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, TimeZone};
    use serde_json::json;

    fn started_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap()
    }

    #[test]
    fn test_round_ended_serializes_results_payload() {
        // Arrange
        let round_id = Uuid::new_v4();
        let ended = RoundEnded {
            channel_id: ChannelId::new("gallery"),
            round_id,
            reason: EndReason::Deadline,
            started_at: started_at(),
            ended_at: started_at() + TimeDelta::minutes(15),
            results: RoundResults {
                topic: "Space cats".to_owned(),
                time_limit_minutes: TimeLimit::from_minutes(15).unwrap(),
                participant_count: 2,
                submission_count: 1,
                submissions: vec![SubmissionRecord {
                    participant_id: ParticipantId::new("u-1"),
                    display_name: "Alice".to_owned(),
                    artifact_reference: "https://cdn.example/cat.png".to_owned(),
                    submitted_at: started_at() + TimeDelta::minutes(3),
                }],
            },
        };

        // Act
        let value = serde_json::to_value(&ended).unwrap();

        // Assert
        assert_eq!(value["channel_id"], json!("gallery"));
        assert_eq!(value["round_id"], json!(round_id.to_string()));
        assert_eq!(value["reason"], json!("deadline"));
        assert_eq!(value["started_at"], json!("2026-01-15T10:00:00Z"));
        assert_eq!(
            value["results"],
            json!({
                "topic": "Space cats",
                "time_limit_minutes": 15,
                "participant_count": 2,
                "submission_count": 1,
                "submissions": [{
                    "participant_id": "u-1",
                    "display_name": "Alice",
                    "artifact_reference": "https://cdn.example/cat.png",
                    "submitted_at": "2026-01-15T10:03:00Z",
                }],
            })
        );
    }

    #[test]
    fn test_round_status_is_tagged_by_state() {
        // Arrange
        let status = RoundStatus::Inactive {
            topic: Some("Dragons".to_owned()),
            time_limit_minutes: None,
        };

        // Act
        let value = serde_json::to_value(&status).unwrap();

        // Assert
        assert_eq!(
            value,
            json!({ "state": "inactive", "topic": "Dragons", "time_limit_minutes": null })
        );
    }

    #[test]
    fn test_leave_outcome_is_tagged_by_outcome() {
        // Arrange
        let outcome = LeaveOutcome::NotAParticipant {
            display_name: "Bob".to_owned(),
        };

        // Act
        let value = serde_json::to_value(&outcome).unwrap();

        // Assert
        assert_eq!(
            value,
            json!({ "outcome": "not_a_participant", "display_name": "Bob" })
        );
        assert_eq!(outcome.to_string(), "Bob is not a participant in this round.");
    }
}
