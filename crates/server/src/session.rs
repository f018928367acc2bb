use shared_types::{AppError, FilterCriteria, Selection, SessionSettings};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Dashboard state owned by one browser session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardSession {
    pub criteria: FilterCriteria,
    pub selection: Selection,
}

struct SessionEntry {
    session: DashboardSession,
    last_seen: Instant,
    /// Monotonic touch counter; the lowest value is the least recently used.
    touched: u64,
}

struct SessionsInner {
    entries: HashMap<Uuid, SessionEntry>,
    clock: u64,
    idle_timeout: Duration,
    max_sessions: usize,
}

impl SessionsInner {
    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    /// Drop idle sessions, then the least recently used ones until there is
    /// room for one more.
    fn prune(&mut self, now: Instant) {
        let idle_timeout = self.idle_timeout;
        self.entries
            .retain(|_, e| now.duration_since(e.last_seen) < idle_timeout);

        while !self.entries.is_empty() && self.entries.len() >= self.max_sessions {
            let oldest = self
                .entries
                .iter()
                .min_by_key(|(_, e)| e.touched)
                .map(|(id, _)| *id);
            match oldest {
                Some(id) => {
                    self.entries.remove(&id);
                    tracing::debug!(session_id = %id, "session evicted, store full");
                }
                None => break,
            }
        }
    }
}

/// In-memory session registry. Clones share the same map.
///
/// Sessions idle for longer than the configured timeout are dropped, and the
/// store never holds more than the configured maximum.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Mutex<SessionsInner>>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    /// Store with the limits from the loaded configuration.
    pub fn new() -> Self {
        Self::from_settings(&crate::config::app_config().sessions)
    }

    pub fn from_settings(settings: &SessionSettings) -> Self {
        Self::with_limits(
            Duration::from_secs(settings.idle_timeout_secs),
            settings.max_sessions,
        )
    }

    /// `max_sessions` is raised to at least one.
    pub fn with_limits(idle_timeout: Duration, max_sessions: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(SessionsInner {
                entries: HashMap::new(),
                clock: 0,
                idle_timeout,
                max_sessions: max_sessions.max(1),
            })),
        }
    }

    /// Register a fresh session with no filters and no selection.
    pub fn create(&self) -> Uuid {
        let id = Uuid::new_v4();
        let now = Instant::now();
        let mut inner = self.lock();
        inner.prune(now);
        let touched = inner.tick();
        inner.entries.insert(
            id,
            SessionEntry {
                session: DashboardSession::default(),
                last_seen: now,
                touched,
            },
        );
        tracing::debug!(session_id = %id, live = inner.entries.len(), "session created");
        id
    }

    /// Run `f` against session `id` while holding the store lock, and mark
    /// the session as used.
    ///
    /// `f` must not block; the lock is never held across an `.await`.
    /// A session past its idle timeout is removed and reported as not found.
    pub fn with_session<R>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut DashboardSession) -> R,
    ) -> Result<R, AppError> {
        let now = Instant::now();
        let mut inner = self.lock();
        let idle_timeout = inner.idle_timeout;

        let expired = match inner.entries.get(&id) {
            Some(entry) => now.duration_since(entry.last_seen) >= idle_timeout,
            None => return Err(not_found(id)),
        };
        if expired {
            inner.entries.remove(&id);
            tracing::debug!(session_id = %id, "session expired");
            return Err(not_found(id));
        }

        let touched = inner.tick();
        let entry = inner.entries.get_mut(&id).ok_or_else(|| not_found(id))?;
        entry.last_seen = now;
        entry.touched = touched;
        Ok(f(&mut entry.session))
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, SessionsInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn not_found(id: Uuid) -> AppError {
    AppError::not_found(format!("Session {} not found", id))
}
