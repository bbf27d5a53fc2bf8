use std::time::{Duration, Instant};

use dashmap::DashMap;
use uuid::Uuid;
use viewport::{FilterSnapshot, SessionView, ViewDecision, Viewport};

pub const SESSION_COOKIE: &str = "isoview_session";

struct SessionEntry {
    view: SessionView,
    last_seen: Instant,
}

impl SessionEntry {
    fn new(now: Instant) -> Self {
        Self {
            view: SessionView::new(),
            last_seen: now,
        }
    }
}

/// Per-browser viewport state, keyed by the session cookie.
pub struct SessionStore {
    sessions: DashMap<String, SessionEntry>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: DashMap::new(),
            ttl,
        }
    }

    /// Session id for a request: the cookie's id when it names a live
    /// session, a fresh one otherwise. The flag is true for a fresh id.
    /// Nothing is stored until `advance` or `observe` runs for the id.
    pub fn resolve(&self, cookie: Option<&str>) -> (String, bool) {
        match cookie {
            Some(id) if self.sessions.contains_key(id) => (id.to_string(), false),
            _ => (Uuid::new_v4().to_string(), true),
        }
    }

    /// Run one render's viewport decision for session `id`.
    pub fn advance(&self, id: &str, current: &FilterSnapshot, default: Viewport) -> ViewDecision {
        let now = Instant::now();
        let mut entry = self
            .sessions
            .entry(id.to_string())
            .or_insert_with(|| SessionEntry::new(now));
        entry.last_seen = now;
        entry.view.advance(current, default)
    }

    /// Record a viewport report for session `id`.
    pub fn observe(&self, id: &str, viewport: Viewport) {
        let now = Instant::now();
        let mut entry = self
            .sessions
            .entry(id.to_string())
            .or_insert_with(|| SessionEntry::new(now));
        entry.last_seen = now;
        entry.view.observe(viewport);
    }

    /// Drop sessions idle for longer than the TTL. Returns how many went.
    pub fn evict_idle(&self, now: Instant) -> usize {
        let before = self.sessions.len();
        self.sessions
            .retain(|_, entry| now.saturating_duration_since(entry.last_seen) <= self.ttl);
        before - self.sessions.len()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::SessionStore;
    use viewport::{FilterSnapshot, LatLng, Viewport};

    fn filters(minutes: u32) -> FilterSnapshot {
        FilterSnapshot {
            center: "Center 1".to_string(),
            minutes,
            show_schools: false,
            show_hospitals: false,
        }
    }

    #[test]
    fn unknown_cookie_gets_fresh_session() {
        let store = SessionStore::new(Duration::from_secs(60));
        let (id, fresh) = store.resolve(Some("not-a-session"));
        assert!(fresh);
        assert_ne!(id, "not-a-session");

        // An id that was handed out but never used is still unknown.
        let (other, fresh) = store.resolve(Some(&id));
        assert!(fresh);
        assert_ne!(other, id);
        assert!(store.is_empty());

        store.advance(&id, &filters(30), Viewport::new(LatLng::new(45.46, 9.19), 12.0));
        let (again, fresh) = store.resolve(Some(&id));
        assert!(!fresh);
        assert_eq!(again, id);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn cookieless_requests_store_nothing_until_used() {
        let store = SessionStore::new(Duration::from_secs(60));
        for _ in 0..5 {
            store.resolve(None);
        }
        assert!(store.is_empty());

        let (id, _) = store.resolve(None);
        store.observe(&id, Viewport::new(LatLng::new(45.6, 9.4), 15.0));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn sessions_do_not_share_viewports() {
        let store = SessionStore::new(Duration::from_secs(60));
        let default = Viewport::new(LatLng::new(45.46, 9.19), 12.0);
        let panned = Viewport::new(LatLng::new(45.6, 9.4), 15.0);
        let (a, _) = store.resolve(None);
        let (b, _) = store.resolve(None);

        store.advance(&a, &filters(30), default);
        store.advance(&b, &filters(30), default);
        store.observe(&a, panned);

        assert_eq!(store.advance(&a, &filters(20), default).viewport, panned);
        assert_eq!(store.advance(&b, &filters(20), default).viewport, default);
    }

    #[test]
    fn idle_sessions_are_evicted() {
        let store = SessionStore::new(Duration::from_secs(60));
        let default = Viewport::new(LatLng::new(45.46, 9.19), 12.0);
        store.advance("a", &filters(30), default);
        store.observe("b", default);
        assert_eq!(store.evict_idle(Instant::now()), 0);

        let later = Instant::now() + Duration::from_secs(61);
        assert_eq!(store.evict_idle(later), 2);
        assert!(store.is_empty());
    }
}
