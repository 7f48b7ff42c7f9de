//! Artjam Core: shared domain abstractions.
//!
//! This crate defines the fundamental traits and types that the rounds
//! context and the API server depend on. It contains no infrastructure code.

pub mod clock;
pub mod command;
pub mod error;
pub mod id;
pub mod notifier;
pub mod permission;
