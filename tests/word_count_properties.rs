//! Property-based tests for the counting pipeline

use proptest::prelude::*;
use sift::core::wordcount::{
    count_words, map_tokens, reduce_group, shuffle, tokenize, top_n, total_tokens,
};
use std::collections::HashSet;

proptest! {
    #[test]
    fn test_tokenize_is_idempotent(text in any::<String>()) {
        prop_assert_eq!(tokenize(&text), tokenize(&text));
    }

    #[test]
    fn test_tokens_are_normalized(text in "[A-Za-z0-9 .,!?'\\-]{0,200}") {
        for token in tokenize(&text) {
            prop_assert!(!token.is_empty());
            prop_assert!(token.chars().all(|c| c.is_alphanumeric() || c == '_'));
            prop_assert_eq!(token.to_lowercase(), token.clone());
        }
    }

    #[test]
    fn test_counts_conserve_tokens(text in any::<String>()) {
        let frequencies = count_words(&text).unwrap();
        prop_assert_eq!(total_tokens(&frequencies), tokenize(&text).len() as u64);
    }

    #[test]
    fn test_shuffle_is_exclusive(words in prop::collection::vec("[a-d]{1,2}", 0..200)) {
        let pairs = map_tokens(words.clone());
        prop_assert_eq!(pairs.len(), words.len());

        let groups = shuffle(pairs);
        let distinct: HashSet<&String> = words.iter().collect();
        prop_assert_eq!(groups.len(), distinct.len());

        let grouped_units: usize = groups.iter().map(|g| g.counts.len()).sum();
        prop_assert_eq!(grouped_units, words.len());

        for group in groups {
            let expected = words.iter().filter(|w| **w == group.word).count() as u64;
            prop_assert!(group.counts.iter().all(|c| *c == 1));
            prop_assert_eq!(reduce_group(group).1, expected);
        }
    }

    #[test]
    fn test_top_n_is_sorted_and_bounded(
        words in prop::collection::vec("[a-e]{1,3}", 0..100),
        n in 0usize..20,
    ) {
        let frequencies = count_words(&words.join(" ")).unwrap();
        let top = top_n(&frequencies, n);

        prop_assert_eq!(top.len(), n.min(frequencies.len()));
        for pair in top.windows(2) {
            prop_assert!(
                pair[0].count > pair[1].count
                    || (pair[0].count == pair[1].count && pair[0].word < pair[1].word)
            );
        }
    }
}
