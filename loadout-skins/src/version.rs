//! Plugin version ordering for config migration.

use std::cmp::Ordering;

/// Orders two version strings.
///
/// Dot-separated numeric versions compare component-wise, with missing
/// trailing components treated as `0` (`"1.0" == "1.0.0"`,
/// `"1.0.10" > "1.0.9"`). If either side contains a non-numeric component
/// the raw strings are compared ordinally, so an empty or garbled version
/// sorts before any real release.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    match (numeric_components(a), numeric_components(b)) {
        (Some(left), Some(right)) => {
            let len = left.len().max(right.len());
            (0..len)
                .map(|i| {
                    let l = left.get(i).copied().unwrap_or(0);
                    let r = right.get(i).copied().unwrap_or(0);
                    l.cmp(&r)
                })
                .find(|ord| ord.is_ne())
                .unwrap_or(Ordering::Equal)
        }
        _ => a.cmp(b),
    }
}

pub fn is_older(version: &str, than: &str) -> bool {
    compare_versions(version, than) == Ordering::Less
}

fn numeric_components(version: &str) -> Option<Vec<u64>> {
    version
        .trim()
        .split('.')
        .map(|part| part.parse::<u64>().ok())
        .collect()
}
