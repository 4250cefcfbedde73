//! Compiled pattern caching
//!
//! Compiling a path pattern builds a regular expression. Route trees are
//! typically static for the life of a session while matching runs on every
//! navigation, so compilations can be reused: [`PatternCache`] keeps an LRU
//! of compiled patterns keyed by the full [`PathPattern`] (path text, case
//! sensitivity, and end flag all participate in the key).
//!
//! Caching is an optimization only; cached and uncached matching agree.

use crate::diagnostics::Diagnostics;
use crate::matcher::{compile_path, CompiledPath, PathPattern};
use crate::trace_log;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Arc;

/// Cache performance statistics
#[derive(Debug, Clone, Default)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
    pub invalidations: usize,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Compiled pattern cache with LRU eviction
///
/// Default capacity: 256 patterns.
///
/// # Example
///
/// ```
/// use ranked_router::{Diagnostics, PathPattern, PatternCache};
///
/// let mut cache = PatternCache::new();
/// let mut diagnostics = Diagnostics::new();
///
/// let pattern = PathPattern::new("/users/:id");
/// cache.get_or_compile(&pattern, &mut diagnostics);
/// cache.get_or_compile(&pattern, &mut diagnostics);
///
/// assert_eq!(cache.stats().hits, 1);
/// assert_eq!(cache.stats().misses, 1);
/// ```
#[derive(Debug)]
pub struct PatternCache {
    patterns: LruCache<PathPattern, Arc<CompiledPath>>,
    stats: CacheStats,
}

impl PatternCache {
    const DEFAULT_CAPACITY: usize = 256;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let cap = NonZeroUsize::new(capacity).expect("Cache capacity must be non-zero");
        Self {
            patterns: LruCache::new(cap),
            stats: CacheStats::default(),
        }
    }

    /// Fetch the compiled form of a pattern, compiling and recording it on miss
    ///
    /// Advisory diagnostics from compilation are only produced on a miss;
    /// the [`Diagnostics`] collector deduplicates them across calls anyway.
    pub fn get_or_compile(
        &mut self,
        pattern: &PathPattern,
        diagnostics: &mut Diagnostics,
    ) -> Arc<CompiledPath> {
        if let Some(compiled) = self.patterns.get(pattern) {
            self.stats.hits += 1;
            trace_log!("Pattern cache hit for '{}'", pattern.path);
            return Arc::clone(compiled);
        }

        self.stats.misses += 1;
        trace_log!("Pattern cache miss for '{}'", pattern.path);

        let compiled = Arc::new(compile_path(pattern, diagnostics));
        self.patterns.push(pattern.clone(), Arc::clone(&compiled));
        compiled
    }

    pub fn clear(&mut self) {
        trace_log!("Clearing pattern cache");
        self.patterns.clear();
        self.stats.invalidations += 1;
    }

    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = CacheStats::default();
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl Default for PatternCache {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for PatternCache {
    fn clone(&self) -> Self {
        let cap = self.patterns.cap();
        Self {
            patterns: LruCache::new(cap),
            stats: self.stats.clone(),
        }
    }
}
