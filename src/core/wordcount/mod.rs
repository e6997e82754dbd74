//! Pure word-frequency business logic
//!
//! Tokenize, map, shuffle, reduce and top-N selection. No I/O happens here;
//! the parallel stages use whatever rayon pool they are installed into.

use crate::error::{ErrorCode, Result, SiftError};
use once_cell::sync::Lazy;
use rayon::prelude::*;
use regex::Regex;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Anything that is neither a word character nor whitespace.
static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s]").expect("Valid regex pattern"));

/// A token paired with its unit count
pub type MappedPair = (String, u64);

/// Final word -> total count result
pub type FrequencyMap = HashMap<String, u64>;

/// All unit counts emitted for one word, in input order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShuffleGroup {
    pub word: String,
    pub counts: Vec<u64>,
}

/// One row of the top-N table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordCount {
    pub word: String,
    pub count: u64,
}

impl From<(String, u64)> for WordCount {
    fn from((word, count): (String, u64)) -> Self {
        Self { word, count }
    }
}

/// Lowercase, blank out punctuation and split on whitespace
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    NON_WORD
        .replace_all(&lowered, " ")
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

pub fn map_token(token: String) -> MappedPair {
    (token, 1)
}

/// Map every token to a unit pair on the current rayon pool
pub fn map_tokens(tokens: Vec<String>) -> Vec<MappedPair> {
    tokens.into_par_iter().map(map_token).collect()
}

/// Group unit counts by word
///
/// Every pair lands in exactly one group. Group order is unspecified.
pub fn shuffle(pairs: Vec<MappedPair>) -> Vec<ShuffleGroup> {
    let mut grouped: HashMap<String, Vec<u64>> = HashMap::new();
    for (word, count) in pairs {
        grouped.entry(word).or_default().push(count);
    }

    grouped
        .into_iter()
        .map(|(word, counts)| ShuffleGroup { word, counts })
        .collect()
}

pub fn reduce_group(group: ShuffleGroup) -> (String, u64) {
    let total = group.counts.iter().sum();
    (group.word, total)
}

/// Reduce every group on the current rayon pool
pub fn reduce_groups(groups: Vec<ShuffleGroup>) -> Vec<(String, u64)> {
    groups.into_par_iter().map(reduce_group).collect()
}

/// Build the frequency map from reduced pairs
///
/// A repeated word means shuffle broke its exclusivity guarantee.
pub fn collect_frequencies(reduced: Vec<(String, u64)>) -> Result<FrequencyMap> {
    let mut frequencies = FrequencyMap::with_capacity(reduced.len());
    for (word, total) in reduced {
        if frequencies.contains_key(&word) {
            return Err(SiftError::stage_with_code(
                ErrorCode::STAGE_DUPLICATE_KEY,
                "reduce",
                format!("word '{}' was reduced more than once", word),
            ));
        }
        frequencies.insert(word, total);
    }
    Ok(frequencies)
}

/// Run the whole map -> shuffle -> reduce chain over `text`
pub fn count_words(text: &str) -> Result<FrequencyMap> {
    let tokens = tokenize(text);
    let mapped = map_tokens(tokens);
    let groups = shuffle(mapped);
    collect_frequencies(reduce_groups(groups))
}

/// The `n` most frequent words, highest count first
///
/// Equal counts are ordered by word ascending so the result is deterministic.
pub fn top_n(frequencies: &FrequencyMap, n: usize) -> Vec<WordCount> {
    if n == 0 {
        return Vec::new();
    }

    let mut entries: Vec<(&String, &u64)> = frequencies.iter().collect();
    entries.sort_by(|a, b| compare_entries(a, b));

    entries
        .into_iter()
        .take(n)
        .map(|(word, count)| WordCount {
            word: word.clone(),
            count: *count,
        })
        .collect()
}

fn compare_entries(a: &(&String, &u64), b: &(&String, &u64)) -> Ordering {
    b.1.cmp(a.1).then_with(|| a.0.cmp(b.0))
}

/// Total number of tokens represented by a frequency map
pub fn total_tokens(frequencies: &FrequencyMap) -> u64 {
    frequencies.values().sum()
}
