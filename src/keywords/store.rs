//! The live keyword store.
//!
//! # Responsibilities
//! - Own the current keyword set and replace it atomically on reload
//! - Gate lazy reloads behind the configured refresh interval
//! - Serve forced reloads that bypass the gate but honor the fetch cache
//! - Fall back to the default keyword list on an unusable first load
//!
//! # Design Decisions
//! - Readers load an `Arc<KeywordSet>` through `arc-swap`; a reload stores a
//!   whole new set, so no reader ever observes a torn update
//! - The refresh state (last-check instant + cache validators) sits behind
//!   one mutex; `current()` uses `try_lock` so only the reader that lands on
//!   the refresh boundary pays the reload latency
//! - A reload attempt updates the last-check instant whether it succeeds or
//!   not, so a broken source cannot cause a retry storm
//! - Gating runs against an injected `Instant` internally, which keeps the
//!   interval logic testable without sleeping

use arc_swap::ArcSwap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

use crate::keywords::parse::{normalize_keywords, parse_keywords, serialize_keywords};
use crate::keywords::source::{CacheMeta, FetchOutcome, KeywordSource, ReloadError};
use crate::observability::metrics;

/// An ordered, case-normalized keyword list.
///
/// Never empty once the store has completed its first load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordSet {
    entries: Vec<String>,
}

impl KeywordSet {
    /// Wrap an already-normalized keyword list.
    pub fn new(entries: Vec<String>) -> Self {
        Self { entries }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// What a reload attempt did to the in-memory set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadOutcome {
    /// The set was replaced with different contents.
    Changed,
    /// The source was re-read but the contents were identical.
    Unchanged,
    /// The remote source confirmed the cached document is still current.
    NotModified,
}

/// Refresh bookkeeping, guarded together so check-and-maybe-reload is one
/// critical section.
struct RefreshState {
    last_check: Option<Instant>,
    cache: CacheMeta,
}

impl RefreshState {
    fn due(&self, now: Instant, interval: Duration) -> bool {
        match self.last_check {
            None => true,
            Some(checked) => now.saturating_duration_since(checked) >= interval,
        }
    }
}

/// Owner of the live keyword set and its refresh policy.
pub struct KeywordStore {
    live: ArcSwap<KeywordSet>,
    source: KeywordSource,
    refresh_interval: Duration,
    refresh: Mutex<RefreshState>,
}

impl KeywordStore {
    /// Construct the store and perform the first load.
    ///
    /// A missing local file is created with the default list first. If the
    /// source is unreadable or parses to nothing, the store starts from the
    /// default list instead of an empty set; an empty keyword set would
    /// silently disable all matching.
    pub async fn init(
        source: KeywordSource,
        defaults: &[String],
        refresh_interval: Duration,
    ) -> Self {
        let defaults = normalize_keywords(defaults);

        if source.is_file() {
            match source.seed_if_missing(&serialize_keywords(&defaults)).await {
                Ok(true) => {
                    tracing::warn!(
                        source = %source.describe(),
                        "Keyword file missing; created it with the default list"
                    );
                }
                Ok(false) => {}
                Err(e) => {
                    tracing::warn!(
                        source = %source.describe(),
                        error = %e,
                        "Failed to seed missing keyword file"
                    );
                }
            }
        }

        let store = Self {
            live: ArcSwap::from_pointee(KeywordSet::new(defaults.clone())),
            source,
            refresh_interval,
            refresh: Mutex::new(RefreshState {
                last_check: None,
                cache: CacheMeta::default(),
            }),
        };

        {
            let mut state = store.refresh.lock().await;
            state.last_check = Some(Instant::now());
            match store.reload_locked(&mut state).await {
                Ok(outcome) => {
                    tracing::info!(
                        source = %store.source.describe(),
                        keywords = store.live.load().len(),
                        outcome = ?outcome,
                        "Initial keyword load complete"
                    );
                }
                Err(e) => {
                    tracing::warn!(
                        source = %store.source.describe(),
                        error = %e,
                        keywords = defaults.len(),
                        "Initial keyword load failed; falling back to default list"
                    );
                }
            }
        }
        metrics::record_keyword_count(store.live.load().len());

        store
    }

    /// The live keyword set.
    ///
    /// If the refresh interval has elapsed since the last check, one reload
    /// attempt runs first; its failure is logged and swallowed, so this
    /// never fails and never returns a partially-updated set.
    pub async fn current(&self) -> Arc<KeywordSet> {
        self.current_at(Instant::now()).await
    }

    pub(crate) async fn current_at(&self, now: Instant) -> Arc<KeywordSet> {
        // try_lock: a reader that loses the race returns the live set
        // immediately instead of queueing behind the reload.
        if let Ok(mut state) = self.refresh.try_lock() {
            if state.due(now, self.refresh_interval) {
                state.last_check = Some(now);
                if let Err(e) = self.reload_locked(&mut state).await {
                    tracing::warn!(
                        source = %self.source.describe(),
                        error = %e,
                        "Keyword reload failed; keeping previous set"
                    );
                }
            }
        }
        self.live.load_full()
    }

    /// Reload immediately, bypassing the freshness gate.
    ///
    /// Conditional-fetch validators are still honored unless `drop_cache`
    /// is set, so an unchanged remote source is a cheap no-op. Returns
    /// whether the in-memory set changed; failures are logged, never raised.
    pub async fn force_reload(&self, drop_cache: bool) -> bool {
        let mut state = self.refresh.lock().await;
        state.last_check = Some(Instant::now());
        if drop_cache {
            state.cache = CacheMeta::default();
        }
        match self.reload_locked(&mut state).await {
            Ok(ReloadOutcome::Changed) => true,
            Ok(_) => false,
            Err(e) => {
                tracing::warn!(
                    source = %self.source.describe(),
                    error = %e,
                    "Forced keyword reload failed; keeping previous set"
                );
                false
            }
        }
    }

    /// Provenance label for logs and the admin API.
    pub fn source_description(&self) -> String {
        self.source.describe()
    }

    /// Configured minimum interval between reload checks.
    pub fn refresh_interval(&self) -> Duration {
        self.refresh_interval
    }

    /// One reload attempt under the refresh lock. On success the live set
    /// is swapped and (for remote sources) the cache validators advance;
    /// on failure both stay untouched.
    async fn reload_locked(&self, state: &mut RefreshState) -> Result<ReloadOutcome, ReloadError> {
        let outcome = match self.source.fetch(&state.cache).await {
            Ok(FetchOutcome::NotModified) => {
                tracing::debug!(source = %self.source.describe(), "Keyword source not modified");
                Ok(ReloadOutcome::NotModified)
            }
            Ok(FetchOutcome::Fetched { body, cache }) => {
                let keywords = parse_keywords(&body);
                if keywords.is_empty() {
                    Err(ReloadError::EmptyParseResult)
                } else {
                    let next = KeywordSet::new(keywords);
                    let changed = **self.live.load() != next;
                    metrics::record_keyword_count(next.len());
                    if changed {
                        tracing::info!(
                            source = %self.source.describe(),
                            keywords = next.len(),
                            "Keyword set reloaded"
                        );
                    }
                    self.live.store(Arc::new(next));
                    state.cache = cache;
                    if changed {
                        Ok(ReloadOutcome::Changed)
                    } else {
                        Ok(ReloadOutcome::Unchanged)
                    }
                }
            }
            Err(e) => Err(e),
        };

        metrics::record_reload(match &outcome {
            Ok(ReloadOutcome::Changed) => "changed",
            Ok(ReloadOutcome::Unchanged) => "unchanged",
            Ok(ReloadOutcome::NotModified) => "not_modified",
            Err(ReloadError::EmptyParseResult) => "empty",
            Err(ReloadError::SourceUnavailable(_)) => "unavailable",
        });

        outcome
    }
}
