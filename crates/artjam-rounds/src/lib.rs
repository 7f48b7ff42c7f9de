//! Artjam: Rounds bounded context.
//!
//! Responsible for the per-channel round lifecycle: configuration, start,
//! join/leave, submission intake, deadline or manual termination, results,
//! and reset.

pub mod application;
pub mod domain;
