//! The one-shot task that ends a round when its time limit elapses.

use std::time::Duration;

use tracing::{debug, info};
use uuid::Uuid;

use super::publication::publish_round_end;
use super::services::RoundServices;
use crate::domain::registry::RoundHandle;
use crate::domain::timer::DeadlineTimer;

/// Spawns the deadline task for cycle `round_id` and returns its handle.
///
/// The caller must hold the round's lock and hand the timer to
/// `Round::arm_timer` before releasing it.
pub(crate) fn arm(
    round: RoundHandle,
    round_id: Uuid,
    delay: Duration,
    services: RoundServices,
) -> DeadlineTimer {
    let task = tokio::spawn(async move {
        tokio::time::sleep(delay).await;

        let expired = round.lock().expire(round_id, services.clock.as_ref());
        match expired {
            Ok(ended) => {
                info!(
                    channel_id = %ended.channel_id,
                    round_id = %round_id,
                    "round ended at its deadline"
                );
                publish_round_end(&ended, services.notifier.as_ref()).await;
            }
            Err(err) => {
                debug!(round_id = %round_id, error = %err, "deadline fired after the round already ended");
            }
        }
    });

    DeadlineTimer::new(round_id, task.abort_handle())
}
