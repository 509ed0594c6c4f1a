//! Parallel search engine
//!
//! The index range is cut into contiguous chunks that are scheduled on a
//! dedicated rayon pool. Workers scan their chunk in increasing index order
//! and poll the cancellation token before every candidate, so at most one
//! extra candidate per active worker is evaluated after a hit.

use crate::app::policy::SearchPolicy;
use crate::domain::cancel::CancellationToken;
use crate::domain::config::{ConfigError, Encoding, SearchConfig};
use crate::domain::indexer::Indexer;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::ops::Range;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, trace};

/// Outcome of a search: nothing found, or a policy-specific payload
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchResult<T> {
    Empty,
    Found(T),
}

impl<T> SearchResult<T> {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn found(&self) -> Option<&T> {
        match self {
            Self::Found(hit) => Some(hit),
            Self::Empty => None,
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Found(hit) => Some(hit),
            Self::Empty => None,
        }
    }
}

impl<T> From<Option<T>> for SearchResult<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(hit) => Self::Found(hit),
            None => Self::Empty,
        }
    }
}

/// Result of a search together with run statistics
#[derive(Clone, Debug)]
pub struct SearchOutcome<T> {
    pub result: SearchResult<T>,
    /// Candidates evaluated across all workers
    pub scanned: u64,
    /// Whether the token was cancelled (by a hit or by the caller)
    pub cancelled: bool,
    pub elapsed: Duration,
}

/// Search failures (configuration problems only; "not found" is a result)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("failed to build worker pool: {0}")]
    WorkerPool(String),
}

/// Marker returned by a worker that stopped because of cancellation
#[derive(Debug)]
struct Stopped;

/// Chunked parallel search driver
pub struct SearchEngine {
    config: SearchConfig,
    indexer: Indexer,
    pool: ThreadPool,
}

impl SearchEngine {
    /// Validate `config` and start its worker pool
    pub fn new(config: SearchConfig) -> Result<Self, SearchError> {
        config.validate()?;
        let indexer = Indexer::from_config(&config)?;

        let mut builder = ThreadPoolBuilder::new().thread_name(|i| format!("hashsearch-{i}"));
        if let Some(workers) = config.workers {
            builder = builder.num_threads(workers);
        }
        let pool = builder
            .build()
            .map_err(|e| SearchError::WorkerPool(e.to_string()))?;

        Ok(Self {
            config,
            indexer,
            pool,
        })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn indexer(&self) -> &Indexer {
        &self.indexer
    }

    /// Number of worker threads
    pub fn workers(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Search `range` until the policy reports a hit or the range is exhausted
    pub fn search<P: SearchPolicy>(
        &self,
        range: Range<u64>,
        policy: &P,
    ) -> Result<SearchOutcome<P::Hit>, SearchError> {
        self.search_with_token(range, policy, &CancellationToken::new())
    }

    /// Search `range` with a caller-supplied cancellation token
    ///
    /// Cancelling `token` from outside stops the search the same way a hit
    /// does. A hit cancels `token`.
    pub fn search_with_token<P: SearchPolicy>(
        &self,
        range: Range<u64>,
        policy: &P,
        token: &CancellationToken,
    ) -> Result<SearchOutcome<P::Hit>, SearchError> {
        self.config.validate_range(&range)?;

        let chunk_size = self.config.chunk_size;
        let chunk_count = (range.end - range.start).div_ceil(chunk_size);
        let slot = OnceLock::new();
        let scanned = AtomicU64::new(0);

        debug!(
            start = range.start,
            end = range.end,
            chunk_size,
            chunk_count,
            workers = self.workers(),
            encoding = ?self.config.encoding,
            "search started"
        );
        let started = Instant::now();

        // Err(Stopped) short-circuits: no further chunks are started.
        let _ = self.pool.install(|| {
            (0..chunk_count).into_par_iter().try_for_each(|chunk| {
                let lo = range.start + chunk * chunk_size;
                let hi = lo.saturating_add(chunk_size).min(range.end);
                self.scan_chunk(lo..hi, policy, token, &slot, &scanned)
            })
        });

        let outcome = SearchOutcome {
            result: slot.into_inner().into(),
            scanned: scanned.into_inner(),
            cancelled: token.is_cancelled(),
            elapsed: started.elapsed(),
        };

        if outcome.cancelled && outcome.result.is_empty() {
            debug!("search cancelled before any hit");
        }
        debug!(
            found = outcome.result.is_found(),
            scanned = outcome.scanned,
            elapsed_ms = outcome.elapsed.as_millis() as u64,
            "search finished"
        );

        Ok(outcome)
    }

    fn scan_chunk<P: SearchPolicy>(
        &self,
        chunk: Range<u64>,
        policy: &P,
        token: &CancellationToken,
        slot: &OnceLock<P::Hit>,
        scanned: &AtomicU64,
    ) -> Result<(), Stopped> {
        let encoding = self.config.encoding;
        let mut candidate = String::with_capacity(self.indexer.max_len() + 4);
        let mut evaluated = 0u64;
        let mut status = Ok(());

        for n in chunk {
            if token.is_cancelled() {
                status = Err(Stopped);
                break;
            }

            self.indexer.encode_with(encoding, n, &mut candidate);
            let digest = policy.digest(&candidate);
            evaluated += 1;

            if let Some(hit) = policy.evaluate(&candidate, &digest) {
                trace!(
                    worker = rayon::current_thread_index(),
                    index = n,
                    candidate = %candidate,
                    digest = %digest,
                    "hit"
                );
                // First hit to arrive wins.
                let _ = slot.set(hit);
                token.cancel();
                status = Err(Stopped);
                break;
            }
        }

        scanned.fetch_add(evaluated, Ordering::Relaxed);
        status
    }
}

/// Scan `range` on the calling thread in index order
///
/// Returns the first hit. This is the reference the parallel engine is
/// checked against.
pub fn search_sequential<P: SearchPolicy>(
    indexer: &Indexer,
    encoding: Encoding,
    mut range: Range<u64>,
    policy: &P,
) -> SearchResult<P::Hit> {
    let mut candidate = String::new();
    range
        .find_map(|n| {
            indexer.encode_with(encoding, n, &mut candidate);
            let digest = policy.digest(&candidate);
            policy.evaluate(&candidate, &digest)
        })
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::policy::{CollisionPolicy, SecondPreimagePolicy};
    use crate::domain::alphabet::Alphabet;
    use crate::domain::hash::SimpleHash;
    use std::sync::atomic::AtomicUsize;

    fn small_config() -> SearchConfig {
        SearchConfig::default()
            .with_max_len(4)
            .with_chunk_size(64)
            .with_workers(Some(4))
    }

    /// Hits on exactly one index, counts every evaluation
    struct NeedlePolicy {
        needle: String,
        evaluations: AtomicUsize,
    }

    impl SearchPolicy for NeedlePolicy {
        type Hit = String;

        fn digest(&self, candidate: &str) -> String {
            candidate.to_string()
        }

        fn evaluate(&self, candidate: &str, _digest: &str) -> Option<String> {
            self.evaluations.fetch_add(1, Ordering::Relaxed);
            (candidate == self.needle).then(|| candidate.to_string())
        }

        fn verify(&self, hit: &String) -> bool {
            *hit == self.needle
        }
    }

    #[test]
    fn test_search_result_conversions() {
        let found: SearchResult<u32> = Some(3).into();
        assert!(found.is_found());
        assert_eq!(found.found(), Some(&3));
        assert_eq!(found.into_option(), Some(3));

        let empty: SearchResult<u32> = None.into();
        assert!(empty.is_empty());
        assert_eq!(empty.found(), None);
    }

    #[test]
    fn test_engine_rejects_invalid_config() {
        let result = SearchEngine::new(SearchConfig::default().with_max_len(0));
        assert!(matches!(
            result,
            Err(SearchError::Config(ConfigError::ZeroMaxLen))
        ));
    }

    #[test]
    fn test_engine_worker_count() {
        let engine = SearchEngine::new(small_config()).unwrap();
        assert_eq!(engine.workers(), 4);
    }

    #[test]
    fn test_search_rejects_empty_range() {
        let engine = SearchEngine::new(small_config()).unwrap();
        let policy = SecondPreimagePolicy::new(SimpleHash, "eliam");
        let result = engine.search(10..10, &policy);
        assert!(matches!(
            result,
            Err(SearchError::Config(ConfigError::EmptyRange { .. }))
        ));
    }

    #[test]
    fn test_search_rejects_range_beyond_space() {
        let engine = SearchEngine::new(small_config()).unwrap();
        let policy = SecondPreimagePolicy::new(SimpleHash, "eliam");
        let space = 62u64.pow(4);
        let result = engine.search(0..space + 1, &policy);
        assert!(matches!(
            result,
            Err(SearchError::Config(ConfigError::RangeOutOfSpace { .. }))
        ));
    }

    #[test]
    fn test_search_finds_needle() {
        let engine = SearchEngine::new(small_config()).unwrap();
        let needle = engine.indexer().encode(10_000);
        let policy = NeedlePolicy {
            needle: needle.clone(),
            evaluations: AtomicUsize::new(0),
        };

        let outcome = engine.search(0..20_000, &policy).unwrap();
        assert_eq!(outcome.result, SearchResult::Found(needle));
        assert!(outcome.cancelled);
        assert!(outcome.scanned >= 1);
        assert_eq!(outcome.scanned, policy.evaluations.load(Ordering::Relaxed) as u64);
    }

    #[test]
    fn test_search_exhausts_without_hit() {
        let engine = SearchEngine::new(small_config()).unwrap();
        let policy = NeedlePolicy {
            needle: "not a candidate".to_string(),
            evaluations: AtomicUsize::new(0),
        };

        let outcome = engine.search(0..1000, &policy).unwrap();
        assert_eq!(outcome.result, SearchResult::Empty);
        assert!(!outcome.cancelled);
        assert_eq!(outcome.scanned, 1000);
    }

    #[test]
    fn test_partial_last_chunk() {
        // 1000 is not a multiple of 64
        let engine = SearchEngine::new(small_config()).unwrap();
        let needle = engine.indexer().encode(999);
        let policy = NeedlePolicy {
            needle: needle.clone(),
            evaluations: AtomicUsize::new(0),
        };

        let outcome = engine.search(0..1000, &policy).unwrap();
        assert_eq!(outcome.result, SearchResult::Found(needle));
    }

    #[test]
    fn test_offset_range_skips_earlier_indices() {
        let engine = SearchEngine::new(small_config()).unwrap();
        let needle = engine.indexer().encode(5);
        let policy = NeedlePolicy {
            needle,
            evaluations: AtomicUsize::new(0),
        };

        let outcome = engine.search(100..1000, &policy).unwrap();
        assert!(outcome.result.is_empty());
        assert_eq!(outcome.scanned, 900);
    }

    #[test]
    fn test_pre_cancelled_token_scans_nothing() {
        let engine = SearchEngine::new(small_config()).unwrap();
        let policy = NeedlePolicy {
            needle: engine.indexer().encode(0),
            evaluations: AtomicUsize::new(0),
        };
        let token = CancellationToken::new();
        token.cancel();

        let outcome = engine.search_with_token(0..10_000, &policy, &token).unwrap();
        assert!(outcome.result.is_empty());
        assert!(outcome.cancelled);
        assert_eq!(outcome.scanned, 0);
    }

    #[test]
    fn test_hit_cancels_caller_token() {
        let engine = SearchEngine::new(small_config()).unwrap();
        let policy = NeedlePolicy {
            needle: engine.indexer().encode(42),
            evaluations: AtomicUsize::new(0),
        };
        let token = CancellationToken::new();

        let outcome = engine.search_with_token(0..10_000, &policy, &token).unwrap();
        assert!(outcome.result.is_found());
        assert!(token.is_cancelled());
    }

    #[test]
    fn test_early_exit_bounds_wasted_work() {
        // Chunk size 1 and a hit at index 0: every other worker can evaluate
        // at most a handful of candidates before seeing the cancellation.
        let config = small_config().with_chunk_size(1);
        let engine = SearchEngine::new(config).unwrap();
        let policy = NeedlePolicy {
            needle: engine.indexer().encode(0),
            evaluations: AtomicUsize::new(0),
        };

        let outcome = engine.search(0..62u64.pow(4), &policy).unwrap();
        assert!(outcome.result.is_found());
        assert!(outcome.scanned < 62u64.pow(4) / 2);
    }

    #[test]
    fn test_cancellation_checked_within_chunk() {
        // Large chunks: if the token were only polled at chunk boundaries,
        // every other worker would finish its whole chunk after the hit.
        const CHUNK: u64 = 1 << 14;
        let config = small_config().with_chunk_size(CHUNK);
        let engine = SearchEngine::new(config).unwrap();
        let policy = NeedlePolicy {
            needle: engine.indexer().encode(0),
            evaluations: AtomicUsize::new(0),
        };

        let outcome = engine.search(0..4 * CHUNK, &policy).unwrap();
        assert_eq!(outcome.result, SearchResult::Found(engine.indexer().encode(0)));
        assert!(
            outcome.scanned < CHUNK / 2,
            "scanned {} candidates after an immediate hit",
            outcome.scanned
        );
    }

    #[test]
    fn test_collision_two_symbol_space() {
        let config = SearchConfig::default()
            .with_alphabet(Alphabet::new("ab").unwrap())
            .with_max_len(2)
            .with_chunk_size(1)
            .with_workers(Some(2));
        let engine = SearchEngine::new(config).unwrap();
        let policy =
            CollisionPolicy::new(|input: &[u8]| String::from_utf8_lossy(&input[..1]).into_owned());

        let outcome = engine.search(0..4, &policy).unwrap();
        let hit = outcome.result.into_option().unwrap();
        assert_eq!(hit.first[..1], hit.second[..1]);
        assert_ne!(hit.first, hit.second);
        assert!(policy.verify(&hit));
    }

    #[test]
    fn test_sequential_returns_first_hit() {
        let indexer = Indexer::new(Alphabet::default(), 4).unwrap();
        let policy = NeedlePolicy {
            needle: indexer.encode(7),
            evaluations: AtomicUsize::new(0),
        };

        let result = search_sequential(&indexer, Encoding::Fixed, 0..100, &policy);
        assert_eq!(result, SearchResult::Found(indexer.encode(7)));
        assert_eq!(policy.evaluations.load(Ordering::Relaxed), 8);
    }

    #[test]
    fn test_variable_encoding_search() {
        let config = small_config().with_encoding(Encoding::Variable);
        let engine = SearchEngine::new(config).unwrap();
        let policy = NeedlePolicy {
            needle: "01".to_string(),
            evaluations: AtomicUsize::new(0),
        };

        let outcome = engine.search(0..1000, &policy).unwrap();
        assert_eq!(outcome.result, SearchResult::Found("01".to_string()));
    }
}
