//! Routes for the Rounds bounded context.
//!
//! Mounted under `/api/v1/channels/{channel_id}/round`. Each route maps one
//! command verb onto the round bound to the channel in the path.

use std::fmt;

use artjam_core::id::{ChannelId, ParticipantId};
use artjam_rounds::application::command_handlers::{self, EndRoundOutcome};
use artjam_rounds::application::query_handlers;
use artjam_rounds::domain::commands;
use artjam_rounds::domain::events::{
    EntrySubmitted, LeaveOutcome, ParticipantJoined, RoundEnded, RoundStarted, RoundStatus,
    TimeLimitSet, TopicSet,
};
use artjam_rounds::domain::values::TimeLeft;
use axum::extract::{Path, State};
use axum::{
    Json, Router,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /topic.
#[derive(Debug, Deserialize)]
pub struct SetTopicRequest {
    /// The topic text.
    pub topic: String,
}

/// A minute count as typed: either a JSON number or a string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum MinutesInput {
    /// `"minutes": 15`
    Number(serde_json::Number),
    /// `"minutes": "15"`
    Text(String),
}

impl fmt::Display for MinutesInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Request body for POST /time-limit.
#[derive(Debug, Deserialize)]
pub struct SetTimeLimitRequest {
    /// The minute count.
    pub minutes: MinutesInput,
}

/// Request body for POST /join and POST /leave.
#[derive(Debug, Deserialize)]
pub struct ParticipantRequest {
    /// The acting participant.
    pub participant_id: ParticipantId,
    /// Their display name.
    pub display_name: String,
}

/// Request body for POST /submit.
#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    /// The submitting participant.
    pub participant_id: ParticipantId,
    /// Their display name.
    pub display_name: String,
    /// Reference to the submitted artifact.
    pub artifact_reference: String,
}

/// Request body for POST /end.
#[derive(Debug, Deserialize)]
pub struct EndRequest {
    /// Who is asking to end the round.
    pub actor_id: ParticipantId,
}

/// Response body for every successful round command or query.
#[derive(Debug, Serialize)]
pub struct RoundResponse<T: Serialize> {
    /// Machine-readable outcome tag.
    pub outcome: &'static str,
    /// Human-readable message for the issuing user.
    pub message: String,
    /// Structured payload for rendering.
    pub payload: T,
}

impl<T: Serialize + fmt::Display> RoundResponse<T> {
    fn from_display(outcome: &'static str, payload: T) -> Json<Self> {
        Json(Self {
            outcome,
            message: payload.to_string(),
            payload,
        })
    }
}

/// Publication counts reported after a manual end.
#[derive(Debug, Serialize)]
pub struct PublicationSummary {
    /// Posts attempted.
    pub attempted: usize,
    /// Posts delivered.
    pub delivered: usize,
    /// Messages for every failed post.
    pub failures: Vec<String>,
}

/// Payload returned by POST /end.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum EndPayload {
    /// The round ended.
    Ended {
        /// The ended round's results.
        ended: RoundEnded,
        /// How publication went.
        publication: PublicationSummary,
    },
    /// The actor may not end rounds.
    NotPermitted {
        /// Who asked.
        actor_id: ParticipantId,
    },
}

/// POST /topic
#[instrument(skip(state, request), fields(channel_id = %channel_id))]
async fn set_topic(
    State(state): State<AppState>,
    Path(channel_id): Path<ChannelId>,
    Json(request): Json<SetTopicRequest>,
) -> Result<Json<RoundResponse<TopicSet>>, ApiError> {
    let command = commands::SetTopic {
        correlation_id: Uuid::new_v4(),
        channel_id,
        topic: request.topic,
    };
    let set = command_handlers::handle_set_topic(&command, &state.rounds)?;
    Ok(RoundResponse::from_display("topic_set", set))
}

/// POST /time-limit
#[instrument(skip(state, request), fields(channel_id = %channel_id))]
async fn set_time_limit(
    State(state): State<AppState>,
    Path(channel_id): Path<ChannelId>,
    Json(request): Json<SetTimeLimitRequest>,
) -> Result<Json<RoundResponse<TimeLimitSet>>, ApiError> {
    let command = commands::SetTimeLimit {
        correlation_id: Uuid::new_v4(),
        channel_id,
        minutes: request.minutes.to_string(),
    };
    let set = command_handlers::handle_set_time_limit(&command, &state.rounds)?;
    Ok(RoundResponse::from_display("time_limit_set", set))
}

/// GET /time-left
#[instrument(skip(state), fields(channel_id = %channel_id))]
async fn time_left(
    State(state): State<AppState>,
    Path(channel_id): Path<ChannelId>,
) -> Result<Json<RoundResponse<TimeLeft>>, ApiError> {
    let time_left = query_handlers::get_time_left(&channel_id, &state.rounds)?;
    Ok(RoundResponse::from_display("time_left", time_left))
}

/// POST /join
#[instrument(skip(state, request), fields(channel_id = %channel_id))]
async fn join(
    State(state): State<AppState>,
    Path(channel_id): Path<ChannelId>,
    Json(request): Json<ParticipantRequest>,
) -> Result<Json<RoundResponse<ParticipantJoined>>, ApiError> {
    let command = commands::JoinRound {
        correlation_id: Uuid::new_v4(),
        channel_id,
        participant_id: request.participant_id,
        display_name: request.display_name,
    };
    let joined = command_handlers::handle_join_round(&command, &state.rounds)?;
    Ok(RoundResponse::from_display("joined", joined))
}

/// POST /leave
#[instrument(skip(state, request), fields(channel_id = %channel_id))]
async fn leave(
    State(state): State<AppState>,
    Path(channel_id): Path<ChannelId>,
    Json(request): Json<ParticipantRequest>,
) -> Result<Json<RoundResponse<LeaveOutcome>>, ApiError> {
    let command = commands::LeaveRound {
        correlation_id: Uuid::new_v4(),
        channel_id,
        participant_id: request.participant_id,
        display_name: request.display_name,
    };
    let outcome = command_handlers::handle_leave_round(&command, &state.rounds)?;
    let tag = match outcome {
        LeaveOutcome::Left { .. } => "left",
        LeaveOutcome::NotAParticipant { .. } => "not_a_participant",
    };
    Ok(RoundResponse::from_display(tag, outcome))
}

/// POST /submit
#[instrument(skip(state, request), fields(channel_id = %channel_id))]
async fn submit(
    State(state): State<AppState>,
    Path(channel_id): Path<ChannelId>,
    Json(request): Json<SubmitRequest>,
) -> Result<Json<RoundResponse<EntrySubmitted>>, ApiError> {
    let command = commands::SubmitEntry {
        correlation_id: Uuid::new_v4(),
        channel_id,
        participant_id: request.participant_id,
        display_name: request.display_name,
        artifact_reference: request.artifact_reference,
    };
    let submitted = command_handlers::handle_submit_entry(&command, &state.rounds)?;
    Ok(RoundResponse::from_display("submitted", submitted))
}

/// POST /start
#[instrument(skip(state), fields(channel_id = %channel_id))]
async fn start(
    State(state): State<AppState>,
    Path(channel_id): Path<ChannelId>,
) -> Result<Json<RoundResponse<RoundStarted>>, ApiError> {
    let command = commands::StartRound {
        correlation_id: Uuid::new_v4(),
        channel_id,
    };
    let started = command_handlers::handle_start_round(&command, &state.rounds)?;
    Ok(RoundResponse::from_display("started", started))
}

/// GET /status
#[instrument(skip(state), fields(channel_id = %channel_id))]
async fn status(
    State(state): State<AppState>,
    Path(channel_id): Path<ChannelId>,
) -> Json<RoundResponse<RoundStatus>> {
    let status = query_handlers::get_round_status(&channel_id, &state.rounds);
    RoundResponse::from_display("status", status)
}

/// POST /end
#[instrument(skip(state, request), fields(channel_id = %channel_id))]
async fn end(
    State(state): State<AppState>,
    Path(channel_id): Path<ChannelId>,
    Json(request): Json<EndRequest>,
) -> Result<Json<RoundResponse<EndPayload>>, ApiError> {
    let command = commands::EndRound {
        correlation_id: Uuid::new_v4(),
        channel_id,
        actor_id: request.actor_id,
    };

    let response = match command_handlers::handle_end_round(&command, &state.rounds).await? {
        EndRoundOutcome::Ended { ended, publication } => {
            let mut message = ended.to_string();
            if !publication.is_complete() {
                message.push_str(&format!(
                    " {} of {} result posts could not be published.",
                    publication.failures.len(),
                    publication.attempted
                ));
            }
            RoundResponse {
                outcome: "ended",
                message,
                payload: EndPayload::Ended {
                    ended,
                    publication: PublicationSummary {
                        attempted: publication.attempted,
                        delivered: publication.delivered,
                        failures: publication.failures.iter().map(ToString::to_string).collect(),
                    },
                },
            }
        }
        EndRoundOutcome::NotPermitted { actor_id } => RoundResponse {
            outcome: "not_permitted",
            message: "You do not have permission to end this round.".to_owned(),
            payload: EndPayload::NotPermitted { actor_id },
        },
    };
    Ok(Json(response))
}

/// Returns the router for the rounds context.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/topic", post(set_topic))
        .route("/time-limit", post(set_time_limit))
        .route("/time-left", get(time_left))
        .route("/join", post(join))
        .route("/leave", post(leave))
        .route("/submit", post(submit))
        .route("/start", post(start))
        .route("/status", get(status))
        .route("/end", post(end))
}
