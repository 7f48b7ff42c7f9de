//! Application layer for the Rounds context.

pub mod command_handlers;
mod deadline;
pub mod publication;
pub mod query_handlers;
mod services;

pub use services::RoundServices;
