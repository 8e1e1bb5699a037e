//! Title ranking and report output.
//!
//! Thin consumer of the final rank vector: orders a caller-supplied set of
//! titles by rank and writes the human-readable report. Scores are shown as
//! `log10(rank)` because raw PageRank values span many orders of magnitude.
//!
//! Titles that cannot be ranked — duplicates, titles outside the id map, or
//! titles whose id holds zero rank — are never silently dropped: every one
//! is collected as a [`SkippedTitle`] diagnostic next to the output, and the
//! run carries on.

use std::io::Write;

use rayon::prelude::*;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::Error;

/// Entries below this count are sorted sequentially.
const PAR_SORT_THRESHOLD: usize = 1 << 14;

/// One ranked title.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedTitle {
    /// Raw probability mass. Always positive: zero-rank titles are skipped
    /// before an entry is created.
    pub rank: f64,
    pub title: String,
}

impl RankedTitle {
    /// The displayed score, `log10(rank)`.
    pub fn score(&self) -> f64 {
        self.rank.log10()
    }
}

/// Why a requested title was left out of the ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The title appeared more than once in the request.
    Duplicate,
    /// The title is not in the id map.
    UnknownTitle,
    /// The title's id holds no rank mass — inactive or out of the id range.
    /// `log10(0)` is undefined, so the title cannot be scored.
    ZeroRank,
}

/// A title excluded from the ranking, with the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedTitle {
    pub title: String,
    pub reason: SkipReason,
}

/// Ranked entries plus the diagnostics for everything that was dropped.
#[derive(Debug, Clone, Default)]
pub struct TitleRanking {
    /// Sorted by descending rank; ties broken by ascending byte-
    /// lexicographic title order.
    pub entries: Vec<RankedTitle>,
    /// Requested titles that could not be ranked, in request order.
    pub skipped: Vec<SkippedTitle>,
}

/// Rank `titles` against the final rank vector.
///
/// `title_to_id` is the page-title map produced by the ingestion subsystem,
/// restricted or not; only the requested titles are ranked.
pub fn rank_titles<I, S>(
    ranks: &[f64],
    title_to_id: &FxHashMap<String, u32>,
    titles: I,
) -> TitleRanking
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut seen = FxHashSet::default();
    let mut entries = Vec::new();
    let mut skipped = Vec::new();

    for title in titles {
        let title: String = title.into();
        if seen.contains(&title) {
            skipped.push(SkippedTitle {
                title,
                reason: SkipReason::Duplicate,
            });
            continue;
        }
        seen.insert(title.clone());

        let Some(&id) = title_to_id.get(&title) else {
            skipped.push(SkippedTitle {
                title,
                reason: SkipReason::UnknownTitle,
            });
            continue;
        };
        let rank = ranks.get(id as usize).copied().unwrap_or(0.0);
        if rank <= 0.0 {
            skipped.push(SkippedTitle {
                title,
                reason: SkipReason::ZeroRank,
            });
            continue;
        }
        entries.push(RankedTitle { rank, title });
    }

    sort_entries(&mut entries);
    TitleRanking { entries, skipped }
}

/// Sort entries by descending rank, ties by ascending title. The comparator
/// is a total order (ranks are finite positives), so sorting is idempotent
/// and deterministic even through the unstable parallel sort.
pub fn sort_entries(entries: &mut [RankedTitle]) {
    let cmp = |a: &RankedTitle, b: &RankedTitle| {
        b.rank.total_cmp(&a.rank).then_with(|| a.title.cmp(&b.title))
    };
    if entries.len() >= PAR_SORT_THRESHOLD {
        entries.par_sort_unstable_by(cmp);
    } else {
        entries.sort_unstable_by(cmp);
    }
}

/// Write the report: one UTF-8 line per entry, `"{:.3}\t{title}"` with the
/// log10 score to three decimals.
pub fn write_report<W: Write>(mut writer: W, ranking: &TitleRanking) -> Result<(), Error> {
    for entry in &ranking.entries {
        writeln!(writer, "{:.3}\t{}", entry.score(), entry.title)?;
    }
    writer.flush()?;
    Ok(())
}
