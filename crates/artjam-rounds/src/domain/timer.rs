//! Deadline timer handle owned by an active round.

use tokio::task::AbortHandle;
use uuid::Uuid;

/// Handle to the scheduled task that ends a round when its time runs out.
///
/// The handle remembers which round cycle it was armed for so that a task
/// which slipped past cancellation cannot end a later cycle.
#[derive(Debug)]
pub struct DeadlineTimer {
    round_id: Uuid,
    handle: AbortHandle,
}

impl DeadlineTimer {
    /// Wraps the abort handle of a spawned deadline task.
    #[must_use]
    pub fn new(round_id: Uuid, handle: AbortHandle) -> Self {
        Self { round_id, handle }
    }

    /// The round cycle this timer was armed for.
    #[must_use]
    pub fn round_id(&self) -> Uuid {
        self.round_id
    }

    /// Aborts the scheduled task.
    pub fn cancel(self) {
        self.handle.abort();
    }

    /// Releases the handle without aborting. Only the deadline task itself
    /// calls this, since aborting it would cancel its own publication work.
    pub(crate) fn disarm(self) {
        drop(self.handle);
    }
}
