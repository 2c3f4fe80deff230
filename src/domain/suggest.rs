//! "Did you mean" suggestions for mistyped command names.
//!
//! Candidates are compared to the query with [`osa_distance`] after
//! lowercasing both sides. A candidate is plausible when its distance, or
//! its distance to the query as a prefix (`dev` for `develop`), is at most
//! half the query length. Plausible candidates are ranked by distance.

use std::cmp::min;

use super::distance::osa_distance;

/// At most this many candidates are shown to the user.
pub const MAX_SUGGESTIONS: usize = 3;

const INDENT: &str = "    ";
const HEADER_SINGLE: &str = "Did you mean this?";
const HEADER_MULTI: &str = "Did you mean one of these?";

fn fold(s: &str) -> Vec<char> {
    s.chars().flat_map(char::to_lowercase).collect()
}

/// Returns `(score, full)`: the prefix-aware score used for filtering and the
/// plain distance used for ranking.
fn score(query: &[char], candidate: &str) -> (usize, usize) {
    let candidate = fold(candidate);
    let full = osa_distance(query, &candidate);
    let prefix_len = min(query.len(), candidate.len());
    let prefix = osa_distance(query, &candidate[..prefix_len]);
    (min(full, prefix), full)
}

fn is_plausible(query_len: usize, score: usize) -> bool {
    score * 2 <= query_len
}

/// Rank all plausible candidates, closest first.
///
/// Candidates with equal scores keep their relative order from `candidates`.
/// The result is not truncated; see [`suggest`] for the display policy.
pub fn rank<'a, S: AsRef<str>>(query: &str, candidates: &'a [S]) -> Vec<&'a str> {
    let query = fold(query);
    if query.is_empty() {
        return Vec::new();
    }

    let mut scored: Vec<(usize, &'a str)> = candidates
        .iter()
        .map(AsRef::as_ref)
        .filter_map(|name| {
            let (score, full) = score(&query, name);
            is_plausible(query.len(), score).then_some((full, name))
        })
        .collect();

    // stable: ties stay in registration order
    scored.sort_by_key(|&(full, _)| full);

    scored.into_iter().map(|(_, name)| name).collect()
}

/// Format a suggestion message for `query`, or `""` if nothing is close.
///
/// ```
/// use rsdispatch::domain::suggest;
///
/// let msg = suggest("buidl", &["build", "develop", "serve"]);
/// assert_eq!(msg, "Did you mean this?\n    build\n");
/// assert_eq!(suggest("xyz123", &["build"]), "");
/// ```
pub fn suggest<S: AsRef<str>>(query: &str, candidates: &[S]) -> String {
    let ranked = rank(query, candidates);

    let header = match ranked.len() {
        0 => return String::new(),
        1 => HEADER_SINGLE,
        _ => HEADER_MULTI,
    };

    let mut out = String::from(header);
    out.push('\n');
    for name in ranked.iter().take(MAX_SUGGESTIONS) {
        out.push_str(INDENT);
        out.push_str(name);
        out.push('\n');
    }
    out
}
