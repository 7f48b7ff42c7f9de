//! Renders an ended round into announcements and publishes them.
//!
//! Publication happens after the round has already been reset, so nothing
//! here can leave a round half-ended. Each post is attempted independently.

use artjam_core::error::DomainError;
use artjam_core::notifier::{Destination, Notifier, Payload};
use tracing::{info, warn};

use crate::domain::events::{RoundEnded, RoundResults, SubmissionRecord};

/// What happened while publishing an ended round.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PublicationReport {
    /// Posts attempted.
    pub attempted: usize,
    /// Posts the notifier accepted.
    pub delivered: usize,
    /// Errors for every rejected post, in order.
    pub failures: Vec<DomainError>,
}

impl PublicationReport {
    /// Whether every post was delivered.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// The "round is over" message for the round's own channel.
#[must_use]
pub fn ended_announcement(ended: &RoundEnded) -> Payload {
    Payload::Message {
        title: "Time's up!".to_owned(),
        body: ended.to_string(),
    }
}

/// The results summary posted ahead of the individual entries.
#[must_use]
pub fn results_summary(results: &RoundResults) -> Payload {
    Payload::Message {
        title: format!("Results: {}", results.topic),
        body: format!(
            "Time limit: {}\nParticipants: {}\nSubmissions: {}",
            results.time_limit_minutes, results.participant_count, results.submission_count
        ),
    }
}

/// One republished entry.
#[must_use]
pub fn submission_payload(record: &SubmissionRecord) -> Payload {
    Payload::Image {
        caption: format!(
            "Submitted by {} at {}",
            record.display_name,
            record.submitted_at.format("%H:%M:%S UTC")
        ),
        reference: record.artifact_reference.clone(),
    }
}

/// Posts the ended announcement to the channel, then the summary and every
/// entry to the results destination.
pub async fn publish_round_end(ended: &RoundEnded, notifier: &dyn Notifier) -> PublicationReport {
    let channel = Destination::Channel(ended.channel_id.clone());
    let results = Destination::Results(ended.channel_id.clone());

    let mut posts = Vec::with_capacity(ended.results.submissions.len() + 2);
    posts.push((channel, ended_announcement(ended)));
    posts.push((results.clone(), results_summary(&ended.results)));
    posts.extend(
        ended
            .results
            .submissions
            .iter()
            .map(|record| (results.clone(), submission_payload(record))),
    );

    let mut report = PublicationReport::default();
    for (destination, payload) in &posts {
        report.attempted += 1;
        match notifier.announce(destination, payload).await {
            Ok(()) => report.delivered += 1,
            Err(err) => {
                warn!(
                    channel_id = %ended.channel_id,
                    round_id = %ended.round_id,
                    destination = %destination,
                    error = %err,
                    "failed to publish round results"
                );
                report.failures.push(err);
            }
        }
    }

    info!(
        channel_id = %ended.channel_id,
        round_id = %ended.round_id,
        attempted = report.attempted,
        delivered = report.delivered,
        "published round results"
    );
    report
}
