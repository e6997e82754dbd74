//! Bounded worker pool for the map and reduce stages

use crate::core::wordcount::{
    collect_frequencies, map_tokens, reduce_groups, shuffle, tokenize, FrequencyMap,
};
use crate::error::{ErrorCode, ErrorExt, Result};
use std::time::Instant;
use tracing::debug;

/// Runs the counting pipeline on a dedicated rayon pool
///
/// Each stage finishes before the next one starts.
pub struct CountEngine {
    pool: rayon::ThreadPool,
}

impl CountEngine {
    pub fn new(threads: usize) -> Result<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("sift-worker-{}", i))
            .build()
            .to_stage_error(
                ErrorCode::STAGE_POOL_BUILD,
                "map",
                format!("cannot start {} worker threads", threads),
            )?;

        debug!("Started count engine with {} workers", pool.current_num_threads());
        Ok(Self { pool })
    }

    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Tokenize `text` and count every word
    pub fn count(&self, text: &str) -> Result<FrequencyMap> {
        let start = Instant::now();

        let tokens = tokenize(text);
        debug!("Tokenized {} bytes into {} tokens", text.len(), tokens.len());

        let mapped = self.pool.install(|| map_tokens(tokens));
        let groups = shuffle(mapped);
        debug!("Shuffled into {} groups", groups.len());

        let reduced = self.pool.install(|| reduce_groups(groups));
        let frequencies = collect_frequencies(reduced)?;

        debug!(
            "Counted {} distinct words in {:?}",
            frequencies.len(),
            start.elapsed()
        );
        Ok(frequencies)
    }
}
