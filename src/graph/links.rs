//! Packed link store — the run-length encoding of the directed edge set.
//!
//! Edges are grouped by destination into variable-length records laid out in
//! one flat `i32` buffer:
//!
//! ```text
//! (dest, incoming_count, src_0, ..., src_{incoming_count-1}), ...
//! ```
//!
//! This is the only representation of graph edges. A flat buffer with a
//! cursor scans sequentially through cache, which is what the distribute
//! pass of every iteration does; there are no per-edge heap objects.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::Error;

/// Immutable, destination-grouped list of page-to-page links.
///
/// Constructed once from a packed buffer (or an edge list) and read-only
/// thereafter. Page ids are sparse within `[0, id_limit)`; the store holds
/// only the ids that actually occur in some link.
#[derive(Debug, Clone)]
pub struct LinkStore {
    /// Packed records. After construction every id is non-negative and every
    /// record is complete.
    data: Vec<i32>,
}

impl LinkStore {
    /// Build a store from an already-packed buffer, validating it.
    ///
    /// Rejects truncated records, negative counts, negative ids, and
    /// duplicate destination ids. The duplicate check is defensive: the
    /// packing producer is supposed to emit one record per destination, but
    /// a duplicate would make the distribute pass silently overwrite one
    /// record's sum with the other's.
    pub fn from_packed(data: Vec<i32>) -> Result<Self, Error> {
        let mut seen = FxHashSet::default();
        let mut i = 0;
        while i < data.len() {
            if data.len() - i < 2 {
                return Err(Error::TruncatedRecord { offset: i });
            }
            let dest = data[i];
            if dest < 0 {
                return Err(Error::NegativePageId { id: dest, offset: i });
            }
            let count = data[i + 1];
            if count < 0 {
                return Err(Error::NegativeLinkCount {
                    count,
                    offset: i + 1,
                });
            }
            let count = count as usize;
            if data.len() - i - 2 < count {
                return Err(Error::TruncatedRecord { offset: i });
            }
            for j in 0..count {
                let src = data[i + 2 + j];
                if src < 0 {
                    return Err(Error::NegativePageId {
                        id: src,
                        offset: i + 2 + j,
                    });
                }
            }
            if !seen.insert(dest) {
                return Err(Error::DuplicateDestination { id: dest as u32 });
            }
            i += 2 + count;
        }
        Ok(Self { data })
    }

    /// Build a store from `(source, destination)` edge pairs.
    ///
    /// Groups the edges by destination; within a record, sources keep their
    /// input order. Records are emitted in ascending destination order so
    /// the packed buffer is deterministic for a given edge list.
    pub fn from_edges(edges: &[(u32, u32)]) -> Self {
        let mut incoming: FxHashMap<u32, Vec<u32>> = FxHashMap::default();
        for &(src, dest) in edges {
            incoming.entry(dest).or_default().push(src);
        }

        let mut dests: Vec<u32> = incoming.keys().copied().collect();
        dests.sort_unstable();

        let mut data = Vec::with_capacity(edges.len() + 2 * dests.len());
        for dest in dests {
            let sources = &incoming[&dest];
            data.push(dest as i32);
            data.push(sources.len() as i32);
            data.extend(sources.iter().map(|&s| s as i32));
        }
        Self { data }
    }

    /// Sequential cursor over the packed records.
    pub fn records(&self) -> Records<'_> {
        Records {
            data: &self.data,
            pos: 0,
        }
    }

    /// Number of destination records.
    pub fn num_records(&self) -> usize {
        self.records().count()
    }

    /// Total number of edges across all records.
    pub fn num_links(&self) -> usize {
        self.records().map(|r| r.sources.len()).sum()
    }

    /// Returns `true` if the store holds no records at all.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The raw packed buffer, for persistence.
    pub fn as_slice(&self) -> &[i32] {
        &self.data
    }
}

/// One destination group: a destination id and the sources linking to it.
#[derive(Debug, Clone, Copy)]
pub struct LinkRecord<'a> {
    /// Destination page id.
    pub dest: u32,
    /// Source page ids, all non-negative (validated at construction).
    pub sources: &'a [i32],
}

/// Cursor-style iterator over the packed records. Borrows the flat buffer;
/// no allocation per record.
#[derive(Debug, Clone)]
pub struct Records<'a> {
    data: &'a [i32],
    pos: usize,
}

impl<'a> Iterator for Records<'a> {
    type Item = LinkRecord<'a>;

    fn next(&mut self) -> Option<LinkRecord<'a>> {
        if self.pos >= self.data.len() {
            return None;
        }
        let dest = self.data[self.pos] as u32;
        let count = self.data[self.pos + 1] as usize;
        let sources = &self.data[self.pos + 2..self.pos + 2 + count];
        self.pos += 2 + count;
        Some(LinkRecord { dest, sources })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_packed_valid() {
        // Two records: 1 <- {0, 2}, 3 <- {1}
        let store = LinkStore::from_packed(vec![1, 2, 0, 2, 3, 1, 1]).unwrap();
        assert_eq!(store.num_records(), 2);
        assert_eq!(store.num_links(), 3);

        let recs: Vec<_> = store.records().collect();
        assert_eq!(recs[0].dest, 1);
        assert_eq!(recs[0].sources, &[0, 2]);
        assert_eq!(recs[1].dest, 3);
        assert_eq!(recs[1].sources, &[1]);
    }

    #[test]
    fn test_from_packed_empty() {
        let store = LinkStore::from_packed(vec![]).unwrap();
        assert!(store.is_empty());
        assert_eq!(store.num_records(), 0);
    }

    #[test]
    fn test_zero_incoming_record() {
        // A record may carry zero sources; it still marks the destination
        // as having incoming links for activity purposes.
        let store = LinkStore::from_packed(vec![4, 0]).unwrap();
        let recs: Vec<_> = store.records().collect();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].dest, 4);
        assert!(recs[0].sources.is_empty());
    }

    #[test]
    fn test_truncated_header_rejected() {
        let err = LinkStore::from_packed(vec![1]).unwrap_err();
        assert!(matches!(err, Error::TruncatedRecord { offset: 0 }));
    }

    #[test]
    fn test_truncated_sources_rejected() {
        // Claims 3 sources, provides 1.
        let err = LinkStore::from_packed(vec![1, 3, 0]).unwrap_err();
        assert!(matches!(err, Error::TruncatedRecord { offset: 0 }));
    }

    #[test]
    fn test_negative_count_rejected() {
        let err = LinkStore::from_packed(vec![1, -2]).unwrap_err();
        assert!(matches!(
            err,
            Error::NegativeLinkCount {
                count: -2,
                offset: 1
            }
        ));
    }

    #[test]
    fn test_negative_dest_rejected() {
        let err = LinkStore::from_packed(vec![-1, 0]).unwrap_err();
        assert!(matches!(err, Error::NegativePageId { id: -1, .. }));
    }

    #[test]
    fn test_negative_source_rejected() {
        let err = LinkStore::from_packed(vec![1, 1, -5]).unwrap_err();
        assert!(matches!(err, Error::NegativePageId { id: -5, .. }));
    }

    #[test]
    fn test_duplicate_destination_rejected() {
        let err = LinkStore::from_packed(vec![1, 1, 0, 1, 1, 2]).unwrap_err();
        assert!(matches!(err, Error::DuplicateDestination { id: 1 }));
    }

    #[test]
    fn test_from_edges_groups_by_destination() {
        let store = LinkStore::from_edges(&[(0, 1), (2, 1), (1, 3)]);
        let recs: Vec<_> = store.records().collect();
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].dest, 1);
        assert_eq!(recs[0].sources, &[0, 2]);
        assert_eq!(recs[1].dest, 3);
        assert_eq!(recs[1].sources, &[1]);
    }

    #[test]
    fn test_from_edges_is_valid_packed_form() {
        let store = LinkStore::from_edges(&[(0, 1), (1, 0), (2, 0)]);
        // Repacking the same buffer must pass validation.
        let repacked = LinkStore::from_packed(store.as_slice().to_vec()).unwrap();
        assert_eq!(repacked.num_links(), 3);
    }
}
