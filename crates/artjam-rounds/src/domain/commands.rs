//! Commands for the Rounds context.

use artjam_core::command::Command;
use artjam_core::id::{ChannelId, ParticipantId};
use uuid::Uuid;

/// Command to configure the topic of a channel's next (or current) round.
#[derive(Debug, Clone)]
pub struct SetTopic {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The channel whose round is configured.
    pub channel_id: ChannelId,
    /// The topic text, as typed.
    pub topic: String,
}

impl Command for SetTopic {
    fn command_type(&self) -> &'static str {
        "rounds.set_topic"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn channel_id(&self) -> &ChannelId {
        &self.channel_id
    }
}

/// Command to configure the time limit.
#[derive(Debug, Clone)]
pub struct SetTimeLimit {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The channel whose round is configured.
    pub channel_id: ChannelId,
    /// The minute count, as typed. Parsed by the handler.
    pub minutes: String,
}

impl Command for SetTimeLimit {
    fn command_type(&self) -> &'static str {
        "rounds.set_time_limit"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn channel_id(&self) -> &ChannelId {
        &self.channel_id
    }
}

/// Command to join the active round.
#[derive(Debug, Clone)]
pub struct JoinRound {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The channel whose round is joined.
    pub channel_id: ChannelId,
    /// Who is joining.
    pub participant_id: ParticipantId,
    /// Their display name.
    pub display_name: String,
}

impl Command for JoinRound {
    fn command_type(&self) -> &'static str {
        "rounds.join"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn channel_id(&self) -> &ChannelId {
        &self.channel_id
    }
}

/// Command to leave the active round.
#[derive(Debug, Clone)]
pub struct LeaveRound {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The channel whose round is left.
    pub channel_id: ChannelId,
    /// Who is leaving.
    pub participant_id: ParticipantId,
    /// Their display name.
    pub display_name: String,
}

impl Command for LeaveRound {
    fn command_type(&self) -> &'static str {
        "rounds.leave"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn channel_id(&self) -> &ChannelId {
        &self.channel_id
    }
}

/// Command to submit (or replace) an entry.
#[derive(Debug, Clone)]
pub struct SubmitEntry {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The channel whose round receives the entry.
    pub channel_id: ChannelId,
    /// Who is submitting.
    pub participant_id: ParticipantId,
    /// Their display name.
    pub display_name: String,
    /// Reference to the submitted artifact.
    pub artifact_reference: String,
}

impl Command for SubmitEntry {
    fn command_type(&self) -> &'static str {
        "rounds.submit"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn channel_id(&self) -> &ChannelId {
        &self.channel_id
    }
}

/// Command to start the configured round.
#[derive(Debug, Clone)]
pub struct StartRound {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The channel whose round starts.
    pub channel_id: ChannelId,
}

impl Command for StartRound {
    fn command_type(&self) -> &'static str {
        "rounds.start"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn channel_id(&self) -> &ChannelId {
        &self.channel_id
    }
}

/// Command to end the active round early.
#[derive(Debug, Clone)]
pub struct EndRound {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The channel whose round ends.
    pub channel_id: ChannelId,
    /// Who is asking. Checked against termination rights.
    pub actor_id: ParticipantId,
}

impl Command for EndRound {
    fn command_type(&self) -> &'static str {
        "rounds.end"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn channel_id(&self) -> &ChannelId {
        &self.channel_id
    }
}
