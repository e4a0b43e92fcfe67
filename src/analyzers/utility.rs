use std::hash::Hash;

use indexmap::IndexMap;

/// Counts each distinct value, most frequent first.
///
/// Values with equal counts keep the order of their first occurrence.
pub fn value_counts<K, I>(values: I) -> IndexMap<K, usize>
where
    K: Hash + Eq,
    I: IntoIterator<Item = K>,
{
    let mut counts: IndexMap<K, usize> = IndexMap::new();
    for v in values {
        *counts.entry(v).or_insert(0) += 1;
    }
    // stable sort: ties stay in first-occurrence order
    counts.sort_by(|_, a, _, b| b.cmp(a));
    counts
}

/// Most frequent value and its count; ties go to the earliest first occurrence.
/// Returns `None` for empty input.
pub fn mode<K, I>(values: I) -> Option<(K, usize)>
where
    K: Hash + Eq,
    I: IntoIterator<Item = K>,
{
    value_counts(values).into_iter().next()
}

/// Arithmetic mean of `sum` over `count` items. Returns `None` when `count` is zero.
pub fn mean(sum: f64, count: usize) -> Option<f64> {
    if count == 0 {
        return None;
    }
    Some(sum / count as f64)
}

/// Formats whole seconds as elapsed time: `0:02:30`, `1 day, 2:03:04`,
/// `3 days, 0:00:10`. Negative values borrow from the day count, so `-10`
/// renders as `-1 day, 23:59:50`.
pub fn format_elapsed(total_seconds: i64) -> String {
    let days = total_seconds.div_euclid(86_400);
    let rem = total_seconds.rem_euclid(86_400);
    let clock = format!("{}:{:02}:{:02}", rem / 3600, (rem % 3600) / 60, rem % 60);

    if days == 0 {
        clock
    } else {
        let unit = if days.abs() == 1 { "day" } else { "days" };
        format!("{days} {unit}, {clock}")
    }
}
