//! Artjam API: HTTP command surface for per-channel submission rounds.

pub mod config;
pub mod error;
pub mod notifier;
pub mod permissions;
pub mod routes;
pub mod state;
