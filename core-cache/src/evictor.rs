//! Eviction policy: least-recently-accessed victims down to a headroom
//! target.

use crate::models::CacheEntry;
use std::cmp::Ordering;

/// Select victims that bring `prospective_total` down to the headroom
/// target.
///
/// `prospective_total` already includes the bytes about to be inserted.
/// Returns the minimal prefix of entries ordered by ascending
/// `last_accessed` (ties broken by `cached_at`, then `id`) whose removal
/// brings the running total to at most `max_budget * headroom`. Ids are
/// returned in eviction order. No I/O happens here; the caller owns the
/// actual removal.
pub fn select_victims(
    entries: &[CacheEntry],
    prospective_total: u64,
    max_budget: u64,
    headroom: f64,
) -> Vec<String> {
    if prospective_total <= max_budget {
        return Vec::new();
    }

    let target = (max_budget as f64 * headroom) as u64;

    let mut order: Vec<&CacheEntry> = entries.iter().collect();
    order.sort_by(|a, b| compare_eviction_order(a, b));

    let mut running = prospective_total;
    let mut victims = Vec::new();
    for entry in order {
        if running <= target {
            break;
        }
        running = running.saturating_sub(entry.file_size);
        victims.push(entry.id.clone());
    }

    victims
}

fn compare_eviction_order(a: &CacheEntry, b: &CacheEntry) -> Ordering {
    a.last_accessed
        .cmp(&b.last_accessed)
        .then_with(|| a.cached_at.cmp(&b.cached_at))
        .then_with(|| a.id.cmp(&b.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const MB: u64 = 1024 * 1024;

    fn entry(id: &str, file_size: u64, cached_at: i64, last_accessed: i64) -> CacheEntry {
        CacheEntry {
            id: id.to_string(),
            title: format!("Asset {}", id),
            original_file_name: format!("{}.pdf", id),
            mime_type: "application/pdf".to_string(),
            file_size,
            local_location: PathBuf::from(format!("/cache/{}.bin", id)),
            remote_location: format!("https://cdn.example.com/{}.pdf", id),
            cached_at,
            last_accessed,
            download_count: 0,
        }
    }

    #[test]
    fn test_no_eviction_under_budget() {
        let entries = vec![entry("a", 100 * MB, 1, 1)];

        let victims = select_victims(&entries, 110 * MB, 500 * MB, 0.8);
        assert!(victims.is_empty());
    }

    #[test]
    fn test_least_recently_accessed_evicted_first() {
        // A(100MB, t=1), B(100MB, t=2), C(250MB, t=3), D(100MB, t=4) plus an
        // incoming 10MB asset: dropping A leaves 460MB, still above the
        // 400MB target; dropping B leaves 360MB and stops there.
        let entries = vec![
            entry("c", 250 * MB, 3, 3),
            entry("a", 100 * MB, 1, 1),
            entry("d", 100 * MB, 4, 4),
            entry("b", 100 * MB, 2, 2),
        ];

        let victims = select_victims(&entries, 560 * MB, 500 * MB, 0.8);
        assert_eq!(victims, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_eviction_is_minimal() {
        let entries = vec![
            entry("a", 300 * MB, 1, 1),
            entry("b", 300 * MB, 2, 2),
        ];

        let victims = select_victims(&entries, 610 * MB, 500 * MB, 0.8);
        assert_eq!(victims, vec!["a".to_string()]);
    }

    #[test]
    fn test_ties_broken_by_ascending_id() {
        let entries = vec![
            entry("z", 200 * MB, 5, 10),
            entry("m", 200 * MB, 5, 10),
            entry("a", 200 * MB, 5, 10),
        ];

        let victims = select_victims(&entries, 610 * MB, 500 * MB, 0.8);
        assert_eq!(victims, vec!["a".to_string(), "m".to_string()]);
    }

    #[test]
    fn test_access_time_tie_broken_by_cached_at() {
        let entries = vec![
            entry("newer", 300 * MB, 9, 10),
            entry("older", 300 * MB, 2, 10),
        ];

        let victims = select_victims(&entries, 610 * MB, 500 * MB, 0.8);
        assert_eq!(victims, vec!["older".to_string()]);
    }

    #[test]
    fn test_all_entries_may_be_consumed() {
        // A single oversized incoming asset can leave nothing to evict past.
        let entries = vec![entry("a", 50 * MB, 1, 1)];

        let victims = select_victims(&entries, 500 * MB + 1, 500 * MB, 0.8);
        assert_eq!(victims, vec!["a".to_string()]);
    }
}
