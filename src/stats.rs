//! Convergence and summary statistics over rank vectors.

use rustc_hash::FxHashMap;

/// Range of per-id change ratios between two iterations.
///
/// Returns `(min, max)` of `cur[i] / prev[i]` over the ids where both values
/// are nonzero, or `None` when no id qualifies. Both bounds drift towards
/// 1.0 as the vector converges, which makes this the cheapest useful
/// progress signal for a fixed-iteration run.
pub fn change_ratio_range(prev: &[f64], cur: &[f64]) -> Option<(f64, f64)> {
    debug_assert_eq!(prev.len(), cur.len());
    let mut min = f64::INFINITY;
    let mut max = 0.0_f64;
    let mut seen = false;
    for (&p, &c) in prev.iter().zip(cur) {
        if p != 0.0 && c != 0.0 {
            let ratio = c / p;
            min = min.min(ratio);
            max = max.max(ratio);
            seen = true;
        }
    }
    seen.then_some((min, max))
}

/// Top `n` pages by rank, as `(log10(rank), title)` pairs in descending rank
/// order. Ids with rank 0 or without a title in the map are skipped.
pub fn top_pages<'a>(
    ranks: &[f64],
    titles: &'a FxHashMap<u32, String>,
    n: usize,
) -> Vec<(f64, &'a str)> {
    let mut indexed: Vec<(usize, f64)> = ranks
        .iter()
        .copied()
        .enumerate()
        .filter(|&(_, rank)| rank > 0.0)
        .collect();
    indexed.sort_unstable_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    indexed
        .into_iter()
        .filter_map(|(id, rank)| {
            titles
                .get(&(id as u32))
                .map(|title| (rank.log10(), title.as_str()))
        })
        .take(n)
        .collect()
}
