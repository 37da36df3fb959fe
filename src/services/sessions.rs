use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use uuid::Uuid;

use crate::services::wizard::BookingWizard;

pub type SharedWizard = Arc<tokio::sync::Mutex<BookingWizard>>;

struct SessionEntry {
    wizard: SharedWizard,
    last_touched: Instant,
}

/// In-memory booking sessions. The map lock is only held for lookups;
/// each wizard has its own lock for the slow provider calls.
pub struct SessionStore {
    entries: Mutex<HashMap<Uuid, SessionEntry>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    /// Stores a new wizard after dropping sessions idle for longer than the TTL.
    pub fn insert(&self, wizard: BookingWizard) -> (Uuid, SharedWizard) {
        self.insert_at(wizard, Instant::now())
    }

    pub fn get(&self, id: &Uuid) -> Option<SharedWizard> {
        self.get_at(id, Instant::now())
    }

    pub fn remove(&self, id: &Uuid) -> bool {
        self.lock().remove(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn evict_idle(&self, now: Instant) -> usize {
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|_, entry| now.saturating_duration_since(entry.last_touched) <= self.ttl);
        let evicted = before - entries.len();
        if evicted > 0 {
            tracing::debug!(evicted, remaining = entries.len(), "evicted idle booking sessions");
        }
        evicted
    }

    fn insert_at(&self, wizard: BookingWizard, now: Instant) -> (Uuid, SharedWizard) {
        self.evict_idle(now);

        let id = Uuid::new_v4();
        let wizard = Arc::new(tokio::sync::Mutex::new(wizard));
        self.lock().insert(
            id,
            SessionEntry {
                wizard: Arc::clone(&wizard),
                last_touched: now,
            },
        );
        (id, wizard)
    }

    fn get_at(&self, id: &Uuid, now: Instant) -> Option<SharedWizard> {
        let mut entries = self.lock();
        let entry = entries.get_mut(id)?;
        if now.saturating_duration_since(entry.last_touched) > self.ttl {
            entries.remove(id);
            return None;
        }
        entry.last_touched = now;
        Some(Arc::clone(&entry.wizard))
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<Uuid, SessionEntry>> {
        // A panic while holding the map lock cannot leave an entry half-written.
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::services::booking_sink::LogBookingSink;
    use crate::services::clock::FixedClock;
    use crate::services::otp::FixedCodeOtpProvider;

    fn wizard() -> BookingWizard {
        BookingWizard::new(
            Arc::new(FixedCodeOtpProvider::default()),
            Arc::new(LogBookingSink),
            Arc::new(FixedClock(NaiveDate::from_ymd_opt(2025, 6, 15).unwrap())),
        )
    }

    #[test]
    fn test_insert_and_get() {
        let store = SessionStore::new(Duration::from_secs(60));
        let (id, _) = store.insert(wizard());
        assert!(store.get(&id).is_some());
        assert!(store.get(&Uuid::nil()).is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_idle_session_evicted_on_create() {
        let store = SessionStore::new(Duration::from_secs(60));
        let start = Instant::now();
        let (stale, _) = store.insert_at(wizard(), start);

        let later = start + Duration::from_secs(61);
        let (fresh, _) = store.insert_at(wizard(), later);

        assert_eq!(store.len(), 1);
        assert!(store.get_at(&stale, later).is_none());
        assert!(store.get_at(&fresh, later).is_some());
    }

    #[test]
    fn test_touch_keeps_session_alive() {
        let store = SessionStore::new(Duration::from_secs(60));
        let start = Instant::now();
        let (id, _) = store.insert_at(wizard(), start);

        assert!(store.get_at(&id, start + Duration::from_secs(50)).is_some());
        assert_eq!(store.evict_idle(start + Duration::from_secs(100)), 0);
        assert!(store.get_at(&id, start + Duration::from_secs(100)).is_some());
    }

    #[test]
    fn test_expired_session_not_returned_before_sweep() {
        let store = SessionStore::new(Duration::from_secs(60));
        let start = Instant::now();
        let (id, _) = store.insert_at(wizard(), start);

        assert!(store.get_at(&id, start + Duration::from_secs(61)).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_remove() {
        let store = SessionStore::new(Duration::from_secs(60));
        let (id, _) = store.insert(wizard());
        assert!(store.remove(&id));
        assert!(!store.remove(&id));
        assert!(store.is_empty());
    }
}
