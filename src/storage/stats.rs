//! Pager statistics tracking.

use std::fmt;

/// Counters kept by the [`Pager`](super::Pager).
///
/// The pager is single-threaded and owns its stats, so these are plain
/// integers updated in place. `PagerStats` is `Copy`; callers get a
/// snapshot via [`Pager::stats`](super::Pager::stats).
///
/// # Example
/// ```
/// use pagedb::PagerStats;
///
/// let stats = PagerStats {
///     cache_hits: 3,
///     cache_misses: 1,
///     ..PagerStats::default()
/// };
/// assert_eq!(stats.hit_rate(), 0.75);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PagerStats {
    /// Number of `get_page` calls served by a resident page.
    pub cache_hits: u64,

    /// Number of `get_page` calls that had to materialize a page.
    pub cache_misses: u64,

    /// Number of pages read from the file.
    ///
    /// A miss on a page past the end of the file allocates without reading,
    /// so this can be lower than `cache_misses`.
    pub pages_read: u64,

    /// Number of flushes written to the file.
    pub pages_written: u64,

    /// Total bytes written by flushes.
    pub bytes_written: u64,
}

impl PagerStats {
    /// Calculate cache hit rate (0.0 to 1.0).
    pub fn hit_rate(&self) -> f64 {
        let total = self.cache_hits + self.cache_misses;

        if total == 0 {
            0.0
        } else {
            self.cache_hits as f64 / total as f64
        }
    }
}

impl fmt::Display for PagerStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hits={} misses={} hit_rate={:.2}% read={} written={} bytes_written={}",
            self.cache_hits,
            self.cache_misses,
            self.hit_rate() * 100.0,
            self.pages_read,
            self.pages_written,
            self.bytes_written,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_default() {
        let stats = PagerStats::default();
        assert_eq!(stats.cache_hits, 0);
        assert_eq!(stats.cache_misses, 0);
        assert_eq!(stats.bytes_written, 0);
    }

    #[test]
    fn test_hit_rate_empty() {
        assert_eq!(PagerStats::default().hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate() {
        let stats = PagerStats {
            cache_hits: 7,
            cache_misses: 3,
            ..PagerStats::default()
        };
        assert!((stats.hit_rate() - 0.7).abs() < f64::EPSILON);
    }

    #[test]
    fn test_display() {
        let stats = PagerStats {
            cache_hits: 1,
            cache_misses: 1,
            pages_read: 1,
            pages_written: 2,
            bytes_written: 4389,
        };
        assert_eq!(
            stats.to_string(),
            "hits=1 misses=1 hit_rate=50.00% read=1 written=2 bytes_written=4389"
        );
    }
}
