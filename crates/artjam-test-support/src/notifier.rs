//! Test notifiers: mock `Notifier` implementations for tests.

use std::collections::HashSet;
use std::sync::Mutex;

use artjam_core::error::DomainError;
use artjam_core::notifier::{Destination, Notifier, Payload};
use async_trait::async_trait;

/// A notifier that records every announcement and always succeeds.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    announced: Mutex<Vec<(Destination, Payload)>>,
}

impl RecordingNotifier {
    /// Creates an empty recording notifier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of everything announced so far, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn announcements(&self) -> Vec<(Destination, Payload)> {
        self.announced.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn announce(
        &self,
        destination: &Destination,
        payload: &Payload,
    ) -> Result<(), DomainError> {
        self.announced
            .lock()
            .unwrap()
            .push((destination.clone(), payload.clone()));
        Ok(())
    }
}

/// A notifier that rejects every announcement. Useful for testing that a
/// failed publication never corrupts round state.
#[derive(Debug)]
pub struct FailingNotifier;

#[async_trait]
impl Notifier for FailingNotifier {
    async fn announce(
        &self,
        destination: &Destination,
        _payload: &Payload,
    ) -> Result<(), DomainError> {
        Err(DomainError::PublicationFailure {
            destination: destination.to_string(),
            reason: "connection refused".into(),
        })
    }
}

/// A notifier that fails on selected calls (zero-based) and records the rest.
#[derive(Debug)]
pub struct FlakyNotifier {
    failing_calls: HashSet<usize>,
    calls: Mutex<usize>,
    delivered: Mutex<Vec<(Destination, Payload)>>,
}

impl FlakyNotifier {
    /// Creates a notifier whose calls at the given indexes fail.
    #[must_use]
    pub fn failing_on(calls: &[usize]) -> Self {
        Self {
            failing_calls: calls.iter().copied().collect(),
            calls: Mutex::new(0),
            delivered: Mutex::new(Vec::new()),
        }
    }

    /// Returns the announcements that were accepted.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn delivered(&self) -> Vec<(Destination, Payload)> {
        self.delivered.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for FlakyNotifier {
    async fn announce(
        &self,
        destination: &Destination,
        payload: &Payload,
    ) -> Result<(), DomainError> {
        let call = {
            let mut calls = self.calls.lock().unwrap();
            let call = *calls;
            *calls += 1;
            call
        };
        if self.failing_calls.contains(&call) {
            return Err(DomainError::PublicationFailure {
                destination: destination.to_string(),
                reason: format!("call {call} rejected"),
            });
        }
        self.delivered
            .lock()
            .unwrap()
            .push((destination.clone(), payload.clone()));
        Ok(())
    }
}
