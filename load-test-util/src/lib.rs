pub mod collect;

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use bytes::Bytes;
use http_body_util::Full;
use hyper::Method;
use parking_lot::Mutex;

#[inline]
pub fn empty_body() -> Full<Bytes> {
    Full::new(Bytes::new())
}

/// One observed request, recorded by the target server in arrival order.
/// `path` carries no query string, so parameterized lookups group together.
#[derive(Debug, Clone)]
pub struct Hit {
    pub method: Method,
    pub path: String,
}

#[derive(Clone)]
pub struct HitLog {
    hits: Arc<Mutex<Vec<Hit>>>,
}

impl HitLog {
    #[must_use]
    pub fn new() -> Self {
        Self {
            hits: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn record(&self, method: Method, path: &str) {
        self.hits.lock().push(Hit {
            method,
            path: path.to_string(),
        });
    }

    #[must_use]
    pub fn hits(&self) -> Vec<Hit> {
        self.hits.lock().clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.hits.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hits.lock().is_empty()
    }

    #[must_use]
    pub fn snapshot(&self) -> HitSnapshot {
        let hits = self.hits.lock();
        let mut per_path: BTreeMap<String, usize> = BTreeMap::new();
        for hit in hits.iter() {
            *per_path.entry(hit.path.clone()).or_insert(0) += 1;
        }
        HitSnapshot {
            total: hits.len(),
            per_path,
        }
    }
}

/// Hands out monotonically increasing session ids for `/login`.
#[derive(Clone)]
pub struct SessionCounter {
    next: Arc<AtomicUsize>,
}

impl SessionCounter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            next: Arc::new(AtomicUsize::new(0)),
        }
    }

    #[inline]
    #[must_use]
    pub fn next_session(&self) -> LoginResponse {
        let session = self.next.fetch_add(1, Ordering::AcqRel) + 1;
        LoginResponse { session }
    }
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct LoginResponse {
    pub session: usize,
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ItemResponse {
    pub id: u64,
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct HitSnapshot {
    pub total: usize,
    pub per_path: BTreeMap<String, usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_log_preserves_order_and_counts() {
        let log = HitLog::new();
        log.record(Method::POST, "/login");
        log.record(Method::GET, "/item");
        log.record(Method::GET, "/item");

        let hits = log.hits();
        assert_eq!(hits.len(), 3);
        assert_eq!(hits[0].method, Method::POST);
        assert_eq!(hits[0].path, "/login");

        let snapshot = log.snapshot();
        assert_eq!(snapshot.total, 3);
        assert_eq!(snapshot.per_path.get("/login"), Some(&1));
        assert_eq!(snapshot.per_path.get("/item"), Some(&2));
    }

    #[test]
    fn session_counter_is_monotonic() {
        let counter = SessionCounter::new();
        assert_eq!(counter.next_session().session, 1);
        assert_eq!(counter.next_session().session, 2);
        assert_eq!(counter.clone().next_session().session, 3);
    }
}
