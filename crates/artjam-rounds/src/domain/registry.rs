//! Channel → round mapping.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

use artjam_core::id::ChannelId;

use super::aggregates::Round;

/// Shared handle to one channel's round.
///
/// Every state transition happens synchronously under the round's lock; the
/// lock is never held across an `.await`.
#[derive(Debug, Clone)]
pub struct RoundHandle(Arc<Mutex<Round>>);

impl RoundHandle {
    fn new(round: Round) -> Self {
        Self(Arc::new(Mutex::new(round)))
    }

    /// Locks the round, recovering a poisoned lock.
    pub fn lock(&self) -> MutexGuard<'_, Round> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Whether two handles point at the same round.
    #[must_use]
    pub fn same_round(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Lazily populated mapping from channel identity to its round.
///
/// Entries are never removed; rounds reset in place.
#[derive(Debug, Default)]
pub struct RoundRegistry {
    rounds: RwLock<HashMap<ChannelId, RoundHandle>>,
}

impl RoundRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the round for `channel_id`, creating an empty one on first
    /// reference. Creation happens at most once per channel even when
    /// callers race.
    pub fn get(&self, channel_id: &ChannelId) -> RoundHandle {
        if let Some(round) = self
            .rounds
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(channel_id)
        {
            return round.clone();
        }

        let mut rounds = self.rounds.write().unwrap_or_else(PoisonError::into_inner);
        rounds
            .entry(channel_id.clone())
            .or_insert_with(|| {
                tracing::debug!(channel_id = %channel_id, "created round for channel");
                RoundHandle::new(Round::new(channel_id.clone()))
            })
            .clone()
    }

    /// Number of channels seen so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rounds
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether no channel has been seen yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_get_creates_empty_round_once() {
        let registry = RoundRegistry::new();
        let channel = ChannelId::new("gallery");

        let first = registry.get(&channel);
        first.lock().set_topic("Space cats".to_owned());
        let second = registry.get(&channel);

        assert!(first.same_round(&second));
        assert_eq!(second.lock().topic(), Some("Space cats"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_channels_are_isolated() {
        let registry = RoundRegistry::new();
        let a = registry.get(&ChannelId::new("a"));
        let b = registry.get(&ChannelId::new("b"));

        a.lock().set_topic("Robots".to_owned());

        assert!(!a.same_round(&b));
        assert!(b.lock().topic().is_none());
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_concurrent_get_creates_single_round_per_channel() {
        let registry = Arc::new(RoundRegistry::new());
        let channel = ChannelId::new("busy");

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let registry = Arc::clone(&registry);
                let channel = channel.clone();
                thread::spawn(move || registry.get(&channel))
            })
            .collect();
        let rounds: Vec<RoundHandle> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert_eq!(registry.len(), 1);
        assert!(rounds.iter().all(|r| r.same_round(&rounds[0])));
    }

    #[test]
    fn test_new_registry_is_empty() {
        let registry = RoundRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }
}
