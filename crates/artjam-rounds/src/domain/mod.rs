//! Domain model for the Rounds context.

pub mod aggregates;
pub mod commands;
pub mod events;
pub mod registry;
pub mod timer;
pub mod values;
