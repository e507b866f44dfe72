//! Total order over engine version strings.
//!
//! Engine builds ship semver-shaped versions ("1.50.2"), but vendor strings
//! are not guaranteed to parse, so the comparator is lenient: a leading `v`
//! is stripped and missing components are zero-padded before handing the
//! string to `semver`. Strings semver still rejects fall back to a
//! deterministic segment-wise comparison so the order stays total.

use std::cmp::Ordering;

use semver::Version;

/// Compare two version strings, newest-greatest.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    match (parse_lenient(a), parse_lenient(b)) {
        (Some(va), Some(vb)) => va.cmp(&vb),
        _ => compare_segments(a, b),
    }
}

/// Parse a version string, tolerating a `v` prefix and fewer than three
/// numeric components.
fn parse_lenient(raw: &str) -> Option<Version> {
    let trimmed = raw.trim().trim_start_matches(['v', 'V']);
    if let Ok(version) = Version::parse(trimmed) {
        return Some(version);
    }

    // "1" or "1.50" style: pad with zeros, preserving any -pre/+build tail.
    let (core, tail) = match trimmed.find(['-', '+']) {
        Some(idx) => trimmed.split_at(idx),
        None => (trimmed, ""),
    };
    let dots = core.matches('.').count();
    if dots < 2 {
        let padded = format!("{}{}{}", core, ".0".repeat(2 - dots), tail);
        return Version::parse(&padded).ok();
    }
    None
}

/// Dot-separated segment comparison: numeric when both segments are numeric,
/// lexicographic otherwise, shorter string first on a shared prefix.
fn compare_segments(a: &str, b: &str) -> Ordering {
    let left = a.trim().trim_start_matches(['v', 'V']).split('.');
    let mut right = b.trim().trim_start_matches(['v', 'V']).split('.');

    for sa in left {
        let Some(sb) = right.next() else {
            return Ordering::Greater;
        };
        let ordering = match (sa.parse::<u64>(), sb.parse::<u64>()) {
            (Ok(na), Ok(nb)) => na.cmp(&nb),
            _ => sa.cmp(sb),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    if right.next().is_some() {
        Ordering::Less
    } else {
        Ordering::Equal
    }
}
