//! Aggregate root for the Rounds context.

use std::collections::HashMap;

use artjam_core::clock::Clock;
use artjam_core::error::DomainError;
use artjam_core::id::{ChannelId, ParticipantId};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::events::{
    EndReason, EntrySubmitted, LeaveOutcome, ParticipantJoined, RoundEnded, RoundResults,
    RoundStarted, RoundStatus, SubmissionRecord, TimeLimitSet, TopicSet,
};
use super::timer::DeadlineTimer;
use super::values::{Submission, TimeLeft, TimeLimit};

/// Bookkeeping that only exists while a round is running.
#[derive(Debug)]
pub(crate) struct ActiveCycle {
    pub round_id: Uuid,
    pub topic: String,
    pub time_limit: TimeLimit,
    pub started_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub timer: Option<DeadlineTimer>,
}

/// The aggregate root for one channel's competition.
///
/// The same value is reused across cycles: configure, start, end, reset,
/// configure again.
#[derive(Debug)]
pub struct Round {
    channel_id: ChannelId,
    /// Topic for the current or next round.
    pub(crate) topic: Option<String>,
    /// Time limit for the current or next round.
    pub(crate) time_limit: Option<TimeLimit>,
    /// Present iff the round is active.
    pub(crate) active: Option<ActiveCycle>,
    /// Joined participants, keyed by id, valued by display name.
    pub(crate) participants: HashMap<ParticipantId, String>,
    /// At most one entry per participant.
    pub(crate) submissions: HashMap<ParticipantId, Submission>,
}

impl Round {
    /// Creates an empty, unconfigured round for `channel_id`.
    #[must_use]
    pub fn new(channel_id: ChannelId) -> Self {
        Self {
            channel_id,
            topic: None,
            time_limit: None,
            active: None,
            participants: HashMap::new(),
            submissions: HashMap::new(),
        }
    }

    /// The channel this round belongs to.
    #[must_use]
    pub fn channel_id(&self) -> &ChannelId {
        &self.channel_id
    }

    /// Whether a round is currently running.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// The configured topic.
    #[must_use]
    pub fn topic(&self) -> Option<&str> {
        self.topic.as_deref()
    }

    /// The configured time limit.
    #[must_use]
    pub fn time_limit(&self) -> Option<TimeLimit> {
        self.time_limit
    }

    /// Identifier of the running cycle.
    #[must_use]
    pub fn round_id(&self) -> Option<Uuid> {
        self.active.as_ref().map(|cycle| cycle.round_id)
    }

    /// Start time of the running cycle.
    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.active.as_ref().map(|cycle| cycle.started_at)
    }

    /// Deadline of the running cycle.
    #[must_use]
    pub fn ends_at(&self) -> Option<DateTime<Utc>> {
        self.active.as_ref().map(|cycle| cycle.ends_at)
    }

    /// Whether a deadline timer is currently held.
    #[must_use]
    pub fn has_pending_timer(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|cycle| cycle.timer.is_some())
    }

    /// Number of joined participants.
    #[must_use]
    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }

    /// Number of entries on file.
    #[must_use]
    pub fn submission_count(&self) -> usize {
        self.submissions.len()
    }

    /// The entry on file for `participant_id`.
    #[must_use]
    pub fn submission(&self, participant_id: &ParticipantId) -> Option<&Submission> {
        self.submissions.get(participant_id)
    }

    /// Stores the topic verbatim. Allowed in any state; a running round
    /// picks up the new topic immediately.
    pub fn set_topic(&mut self, topic: String) -> TopicSet {
        if let Some(cycle) = self.active.as_mut() {
            cycle.topic.clone_from(&topic);
        }
        self.topic = Some(topic.clone());
        TopicSet { topic }
    }

    /// Stores the time limit. Allowed in any state; a running round reports
    /// the new limit in its status and results, but its deadline stays where
    /// it was set at start.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidInput` if `minutes` is not positive.
    pub fn set_time_limit(&mut self, minutes: i64) -> Result<TimeLimitSet, DomainError> {
        let limit = TimeLimit::from_minutes(minutes)?;
        if let Some(cycle) = self.active.as_mut() {
            cycle.time_limit = limit;
        }
        self.time_limit = Some(limit);
        Ok(TimeLimitSet {
            time_limit_minutes: limit,
        })
    }

    /// Time remaining until the deadline.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotActive` if no round is running.
    pub fn time_left(&self, clock: &dyn Clock) -> Result<TimeLeft, DomainError> {
        let cycle = self.active.as_ref().ok_or(DomainError::NotActive)?;
        Ok(TimeLeft::until(cycle.ends_at, clock.now()))
    }

    /// Adds a participant. Rejoining is a no-op apart from refreshing the
    /// display name.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotActive` if no round is running.
    pub fn join(
        &mut self,
        participant_id: ParticipantId,
        display_name: String,
    ) -> Result<ParticipantJoined, DomainError> {
        self.ensure_active()?;
        self.participants
            .insert(participant_id.clone(), display_name.clone());
        Ok(ParticipantJoined {
            participant_id,
            display_name,
        })
    }

    /// Removes a participant and any entry they submitted.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotActive` if no round is running.
    pub fn leave(
        &mut self,
        participant_id: &ParticipantId,
        display_name: String,
    ) -> Result<LeaveOutcome, DomainError> {
        self.ensure_active()?;
        if self.participants.remove(participant_id).is_none() {
            return Ok(LeaveOutcome::NotAParticipant { display_name });
        }
        let submission_withdrawn = self.submissions.remove(participant_id).is_some();
        Ok(LeaveOutcome::Left {
            participant_id: participant_id.clone(),
            display_name,
            submission_withdrawn,
        })
    }

    /// Records (or replaces) a participant's entry, timestamped now.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotActive` if no round is running, or
    /// `DomainError::NotAParticipant` if the submitter has not joined.
    pub fn submit(
        &mut self,
        participant_id: ParticipantId,
        display_name: String,
        artifact_reference: String,
        clock: &dyn Clock,
    ) -> Result<EntrySubmitted, DomainError> {
        self.ensure_active()?;
        if !self.participants.contains_key(&participant_id) {
            return Err(DomainError::NotAParticipant);
        }

        let submitted_at = clock.now();
        let replaced_previous = self
            .submissions
            .insert(
                participant_id.clone(),
                Submission {
                    display_name: display_name.clone(),
                    artifact_reference: artifact_reference.clone(),
                    submitted_at,
                },
            )
            .is_some();

        Ok(EntrySubmitted {
            participant_id,
            display_name,
            artifact_reference,
            submitted_at,
            replaced_previous,
        })
    }

    /// Starts the round. The round is left without a deadline timer; the
    /// start handler arms one with [`Round::arm_timer`] before releasing the
    /// lock, which is why this is not public.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MissingTopic` or `DomainError::MissingTimeLimit`
    /// if configuration is incomplete, and `DomainError::AlreadyActive` if a
    /// round is already running (its deadline is left untouched).
    pub(crate) fn start(&mut self, clock: &dyn Clock) -> Result<RoundStarted, DomainError> {
        let topic = self.topic.clone().ok_or(DomainError::MissingTopic)?;
        let limit = self.time_limit.ok_or(DomainError::MissingTimeLimit)?;
        if self.active.is_some() {
            return Err(DomainError::AlreadyActive);
        }

        let round_id = Uuid::new_v4();
        let started_at = clock.now();
        let ends_at = started_at + limit.as_time_delta();
        self.active = Some(ActiveCycle {
            round_id,
            topic: topic.clone(),
            time_limit: limit,
            started_at,
            ends_at,
            timer: None,
        });

        Ok(RoundStarted {
            channel_id: self.channel_id.clone(),
            round_id,
            topic,
            time_limit_minutes: limit,
            started_at,
            ends_at,
        })
    }

    /// Hands the round its deadline timer. A previously held timer is
    /// cancelled first. A timer for a cycle that is not running is cancelled
    /// immediately.
    pub(crate) fn arm_timer(&mut self, timer: DeadlineTimer) {
        match self.active.as_mut() {
            Some(cycle) if cycle.round_id == timer.round_id() => {
                if let Some(previous) = cycle.timer.replace(timer) {
                    previous.cancel();
                }
            }
            _ => timer.cancel(),
        }
    }

    /// Ends the running round early, cancelling its deadline timer, and
    /// resets the round. The returned value carries everything that needs
    /// to be announced.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotActive` if no round is running. Nothing is
    /// mutated in that case.
    pub fn end(&mut self, clock: &dyn Clock) -> Result<RoundEnded, DomainError> {
        let mut cycle = self.active.take().ok_or(DomainError::NotActive)?;
        if let Some(timer) = cycle.timer.take() {
            timer.cancel();
        }
        Ok(self.conclude(cycle, EndReason::Manual, clock))
    }

    /// Ends the round from its own deadline task.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotActive` if no round is running or the
    /// running cycle is not `round_id` (the cycle the timer was armed for
    /// has already ended by another path).
    pub fn expire(&mut self, round_id: Uuid, clock: &dyn Clock) -> Result<RoundEnded, DomainError> {
        if self.round_id() != Some(round_id) {
            return Err(DomainError::NotActive);
        }
        let mut cycle = self.active.take().ok_or(DomainError::NotActive)?;
        if let Some(timer) = cycle.timer.take() {
            timer.disarm();
        }
        Ok(self.conclude(cycle, EndReason::Deadline, clock))
    }

    /// Summary of the round's current state. Never fails.
    #[must_use]
    pub fn status(&self, clock: &dyn Clock) -> RoundStatus {
        match &self.active {
            Some(cycle) => RoundStatus::Active {
                topic: cycle.topic.clone(),
                time_limit_minutes: cycle.time_limit,
                ends_at: cycle.ends_at,
                time_left: TimeLeft::until(cycle.ends_at, clock.now()),
                participant_count: self.participants.len(),
                submission_count: self.submissions.len(),
            },
            None => RoundStatus::Inactive {
                topic: self.topic.clone(),
                time_limit_minutes: self.time_limit,
            },
        }
    }

    fn ensure_active(&self) -> Result<(), DomainError> {
        if self.active.is_some() {
            Ok(())
        } else {
            Err(DomainError::NotActive)
        }
    }

    /// Builds the results for a cycle that has just been taken out of
    /// `active`, then resets.
    fn conclude(&mut self, cycle: ActiveCycle, reason: EndReason, clock: &dyn Clock) -> RoundEnded {
        let mut submissions: Vec<SubmissionRecord> = self
            .submissions
            .drain()
            .map(|(participant_id, submission)| SubmissionRecord {
                participant_id,
                display_name: submission.display_name,
                artifact_reference: submission.artifact_reference,
                submitted_at: submission.submitted_at,
            })
            .collect();
        submissions.sort_by(|a, b| {
            a.submitted_at
                .cmp(&b.submitted_at)
                .then_with(|| a.participant_id.cmp(&b.participant_id))
        });

        let ended = RoundEnded {
            channel_id: self.channel_id.clone(),
            round_id: cycle.round_id,
            reason,
            started_at: cycle.started_at,
            ended_at: clock.now(),
            results: RoundResults {
                topic: cycle.topic,
                time_limit_minutes: cycle.time_limit,
                participant_count: self.participants.len(),
                submission_count: submissions.len(),
                submissions,
            },
        };

        self.reset();
        ended
    }

    /// Clears all configuration and bookkeeping back to the empty state.
    fn reset(&mut self) {
        self.topic = None;
        self.time_limit = None;
        if let Some(mut cycle) = self.active.take() {
            if let Some(timer) = cycle.timer.take() {
                timer.cancel();
            }
        }
        self.participants.clear();
        self.submissions.clear();
    }
}
