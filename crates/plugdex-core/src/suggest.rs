// SPDX-FileCopyrightText: 2026 Plugdex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! "Did you mean" suggestions for unknown names and keys.

/// Minimum Jaro-Winkler similarity for a suggestion. Catches typos like
/// `tap-gitlb` or `log_levl` without suggesting unrelated names.
pub const SUGGESTION_THRESHOLD: f64 = 0.75;

/// The candidate most similar to `unknown`, if any clears the threshold.
///
/// Ties go to the earliest candidate.
pub fn closest_match<'a>(
    unknown: &str,
    candidates: impl IntoIterator<Item = &'a str>,
) -> Option<String> {
    let mut best_score = SUGGESTION_THRESHOLD;
    let mut best_match = None;

    for candidate in candidates {
        let score = strsim::jaro_winkler(unknown, candidate);
        if score > best_score {
            best_score = score;
            best_match = Some(candidate);
        }
    }

    best_match.map(str::to_string)
}
