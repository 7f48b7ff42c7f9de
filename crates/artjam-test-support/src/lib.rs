//! Shared test doubles and utilities for the Artjam round engine.

mod clock;
mod notifier;
mod permission;

pub use clock::{FixedClock, ManualClock};
pub use notifier::{FailingNotifier, FlakyNotifier, RecordingNotifier};
pub use permission::{AllowAll, DenyAll};
