use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use axum::http::HeaderMap;

pub const MAX_REQUESTS_PER_WINDOW: u32 = 60;
pub const WINDOW: Duration = Duration::from_secs(60);

/// Per-client counter state for one fixed window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowCount {
    pub count: u32,
    pub window_reset: Instant,
}

/// Backing store for rate-limit counters. The in-memory map is enough for
/// a single instance; a shared store can implement this for several.
pub trait CounterStore: Send + Sync {
    /// Record one request from `client` at `now` and return the updated
    /// window. A request past `window_reset` starts a new window.
    fn hit(&self, client: &str, now: Instant) -> WindowCount;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Windows>,
}

#[derive(Debug, Default)]
struct Windows {
    by_client: HashMap<String, WindowCount>,
    last_sweep: Option<Instant>,
}

impl MemoryStore {
    #[cfg(test)]
    fn tracked_clients(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .by_client
            .len()
    }
}

impl CounterStore for MemoryStore {
    fn hit(&self, client: &str, now: Instant) -> WindowCount {
        let mut windows = self
            .inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        // Expired windows are swept at most once per window.
        let sweep_due = windows
            .last_sweep
            .map_or(true, |last| now.saturating_duration_since(last) >= WINDOW);
        if sweep_due {
            windows.by_client.retain(|_, w| now <= w.window_reset);
            windows.last_sweep = Some(now);
        }

        let fresh = WindowCount {
            count: 0,
            window_reset: now + WINDOW,
        };
        let entry = windows
            .by_client
            .entry(client.to_string())
            .or_insert(fresh);
        if now > entry.window_reset {
            *entry = fresh;
        }
        entry.count = entry.count.saturating_add(1);
        *entry
    }
}

pub struct RateLimiter {
    store: Box<dyn CounterStore>,
    limit: u32,
}

impl RateLimiter {
    pub fn new(store: Box<dyn CounterStore>, limit: u32) -> Self {
        Self { store, limit }
    }

    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryStore::default()), MAX_REQUESTS_PER_WINDOW)
    }

    /// Count the request and report whether it is within the limit.
    pub fn check(&self, client: &str) -> bool {
        self.check_at(client, Instant::now())
    }

    pub fn check_at(&self, client: &str, now: Instant) -> bool {
        self.store.hit(client, now).count <= self.limit
    }
}

/// First `X-Forwarded-For` entry, else `X-Real-IP`, else "unknown".
pub fn client_id(headers: &HeaderMap) -> String {
    let value = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    };
    value("x-forwarded-for")
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .or_else(|| value("x-real-ip"))
        .unwrap_or("unknown")
        .to_string()
}
