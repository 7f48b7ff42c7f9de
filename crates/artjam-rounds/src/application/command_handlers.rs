//! Command handlers for the Rounds context.
//!
//! Each handler resolves the command's channel to its round through the
//! registry, applies the command under the round's lock, and performs any
//! side effects (arming the deadline, publishing results) after the lock is
//! released.

use artjam_core::command::Command;
use artjam_core::error::DomainError;
use artjam_core::id::ParticipantId;
use tracing::info;

use super::deadline;
use super::publication::{PublicationReport, publish_round_end};
use super::services::RoundServices;
use crate::domain::commands::{
    EndRound, JoinRound, LeaveRound, SetTimeLimit, SetTopic, StartRound, SubmitEntry,
};
use crate::domain::events::{
    EntrySubmitted, LeaveOutcome, ParticipantJoined, RoundEnded, RoundStarted, TimeLimitSet,
    TopicSet,
};
use crate::domain::values::parse_minutes;

/// Result of a manual end request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EndRoundOutcome {
    /// The round ended and its results were published.
    Ended {
        /// The ended round's payload.
        ended: RoundEnded,
        /// Posts attempted and delivered while publishing.
        publication: PublicationReport,
    },
    /// The actor lacks termination rights; the round keeps running.
    NotPermitted {
        /// Who asked.
        actor_id: ParticipantId,
    },
}

fn log_command(command: &dyn Command) {
    info!(
        command_type = command.command_type(),
        correlation_id = %command.correlation_id(),
        channel_id = %command.channel_id(),
        "handling command"
    );
}

/// Handles `SetTopic`.
///
/// # Errors
///
/// Returns `DomainError::InvalidInput` if the topic is blank.
pub fn handle_set_topic(
    command: &SetTopic,
    services: &RoundServices,
) -> Result<TopicSet, DomainError> {
    log_command(command);
    if command.topic.trim().is_empty() {
        return Err(DomainError::InvalidInput("topic must not be empty".to_owned()));
    }
    let round = services.registry.get(&command.channel_id);
    let set = round.lock().set_topic(command.topic.clone());
    Ok(set)
}

/// Handles `SetTimeLimit`.
///
/// # Errors
///
/// Returns `DomainError::InvalidInput` if the minute count is not a positive
/// whole number. The stored limit is left unchanged.
pub fn handle_set_time_limit(
    command: &SetTimeLimit,
    services: &RoundServices,
) -> Result<TimeLimitSet, DomainError> {
    log_command(command);
    let minutes = parse_minutes(&command.minutes)?;
    let round = services.registry.get(&command.channel_id);
    let set = round.lock().set_time_limit(minutes)?;
    Ok(set)
}

/// Handles `JoinRound`.
///
/// # Errors
///
/// Returns `DomainError::NotActive` if no round is running.
pub fn handle_join_round(
    command: &JoinRound,
    services: &RoundServices,
) -> Result<ParticipantJoined, DomainError> {
    log_command(command);
    let round = services.registry.get(&command.channel_id);
    let joined = round
        .lock()
        .join(command.participant_id.clone(), command.display_name.clone())?;
    Ok(joined)
}

/// Handles `LeaveRound`.
///
/// # Errors
///
/// Returns `DomainError::NotActive` if no round is running.
pub fn handle_leave_round(
    command: &LeaveRound,
    services: &RoundServices,
) -> Result<LeaveOutcome, DomainError> {
    log_command(command);
    let round = services.registry.get(&command.channel_id);
    let outcome = round
        .lock()
        .leave(&command.participant_id, command.display_name.clone())?;
    Ok(outcome)
}

/// Handles `SubmitEntry`.
///
/// # Errors
///
/// Returns `DomainError::NotActive` if no round is running, or
/// `DomainError::NotAParticipant` if the submitter has not joined.
pub fn handle_submit_entry(
    command: &SubmitEntry,
    services: &RoundServices,
) -> Result<EntrySubmitted, DomainError> {
    log_command(command);
    let round = services.registry.get(&command.channel_id);
    let submitted = round.lock().submit(
        command.participant_id.clone(),
        command.display_name.clone(),
        command.artifact_reference.clone(),
        services.clock.as_ref(),
    )?;
    Ok(submitted)
}

/// Handles `StartRound`: starts the round and arms its deadline task.
///
/// Must be called from within a Tokio runtime.
///
/// # Errors
///
/// Returns `DomainError::MissingTopic`, `DomainError::MissingTimeLimit`, or
/// `DomainError::AlreadyActive`. A rejected start leaves any running round
/// and its deadline untouched.
pub fn handle_start_round(
    command: &StartRound,
    services: &RoundServices,
) -> Result<RoundStarted, DomainError> {
    log_command(command);
    let round = services.registry.get(&command.channel_id);

    let mut guard = round.lock();
    let started = guard.start(services.clock.as_ref())?;
    let timer = deadline::arm(
        round.clone(),
        started.round_id,
        started.time_limit_minutes.as_duration(),
        services.clone(),
    );
    guard.arm_timer(timer);
    drop(guard);

    info!(
        channel_id = %started.channel_id,
        round_id = %started.round_id,
        topic = %started.topic,
        ends_at = %started.ends_at,
        "round started"
    );
    Ok(started)
}

/// Handles `EndRound`: checks termination rights, ends the round, and
/// publishes its results.
///
/// A denied actor is a normal outcome, not an error. Publication failures
/// are reported in the outcome and never undo the reset.
///
/// # Errors
///
/// Returns `DomainError::NotActive` if no round is running (including when
/// the deadline task got there first). Nothing is published in that case.
pub async fn handle_end_round(
    command: &EndRound,
    services: &RoundServices,
) -> Result<EndRoundOutcome, DomainError> {
    log_command(command);
    if !services
        .permissions
        .can_terminate(&command.actor_id, &command.channel_id)
        .await
    {
        info!(
            channel_id = %command.channel_id,
            actor_id = %command.actor_id,
            "end request denied"
        );
        return Ok(EndRoundOutcome::NotPermitted {
            actor_id: command.actor_id.clone(),
        });
    }

    let round = services.registry.get(&command.channel_id);
    let ended = round.lock().end(services.clock.as_ref())?;
    info!(
        channel_id = %ended.channel_id,
        round_id = %ended.round_id,
        actor_id = %command.actor_id,
        "round ended early"
    );

    let publication = publish_round_end(&ended, services.notifier.as_ref()).await;
    Ok(EndRoundOutcome::Ended { ended, publication })
}
