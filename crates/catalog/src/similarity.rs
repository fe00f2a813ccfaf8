// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 QuarryDB

//! Edit-distance utilities backing the "did you mean" lookup. Never used for
//! binding resolution.

/// Classic two-row Levenshtein distance over unicode scalar values.
pub(crate) fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0usize; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = previous[j] + usize::from(ca != cb);
            current[j + 1] = substitution.min(previous[j + 1] + 1).min(current[j] + 1);
        }
        std::mem::swap(&mut previous, &mut current);
    }
    previous[b.len()]
}

/// Suggestion threshold: a candidate qualifies when its distance is at most
/// half the query length, rounded up. Keeps suggestions from jumping to
/// unrelated names on short queries.
pub(crate) fn within_threshold(query: &str, distance: usize) -> bool {
    distance <= query.chars().count().div_ceil(2)
}
