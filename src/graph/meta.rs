//! Graph metadata derived from a [`LinkStore`] in one linear pass.

use crate::error::Error;
use crate::graph::links::LinkStore;

/// Per-id facts the iteration engine needs: the dense id space size, each
/// id's out-degree, and the active-page classification.
///
/// A page is *active* when it has at least one incoming or outgoing link.
/// Ids inside `[0, id_limit)` that no link mentions stay inactive forever:
/// they receive no share of the probability mass and never appear in ranked
/// output. The dense arrays trade memory for branch-free indexed access
/// during iteration.
#[derive(Debug, Clone)]
pub struct GraphMeta {
    /// Maximum page id referenced by any link, plus one. Sets the length of
    /// every per-id array in the engine.
    pub id_limit: usize,
    /// Number of outgoing links per id. Length `id_limit`.
    pub out_degree: Vec<u32>,
    /// Whether each id has any incoming or outgoing link. Length `id_limit`.
    pub is_active: Vec<bool>,
    /// Number of active ids. Always at least 1.
    pub num_active: usize,
}

impl GraphMeta {
    /// Derive metadata from the packed link store.
    ///
    /// Fails with [`Error::NoActivePages`] when the store mentions no ids at
    /// all — the update divides by `num_active`, so an empty graph is a
    /// degenerate input rather than a silent no-op.
    pub fn derive(links: &LinkStore) -> Result<Self, Error> {
        let mut max_id: i64 = -1;
        for rec in links.records() {
            max_id = max_id.max(i64::from(rec.dest));
            for &src in rec.sources {
                max_id = max_id.max(i64::from(src));
            }
        }
        let id_limit = (max_id + 1) as usize;

        let mut out_degree = vec![0u32; id_limit];
        let mut has_incoming = vec![false; id_limit];
        for rec in links.records() {
            has_incoming[rec.dest as usize] = true;
            for &src in rec.sources {
                out_degree[src as usize] += 1;
            }
        }

        let mut is_active = vec![false; id_limit];
        let mut num_active = 0;
        for id in 0..id_limit {
            if out_degree[id] > 0 || has_incoming[id] {
                is_active[id] = true;
                num_active += 1;
            }
        }
        if num_active == 0 {
            return Err(Error::NoActivePages);
        }

        Ok(Self {
            id_limit,
            out_degree,
            is_active,
            num_active,
        })
    }

    /// An active id with no outgoing links. Its mass cannot flow along edges
    /// and is redistributed uniformly each iteration.
    pub fn is_dangling(&self, id: usize) -> bool {
        self.is_active[id] && self.out_degree[id] == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_basic() {
        // 0 -> 1, 2 -> 1, 1 -> 3
        let store = LinkStore::from_edges(&[(0, 1), (2, 1), (1, 3)]);
        let meta = GraphMeta::derive(&store).unwrap();

        assert_eq!(meta.id_limit, 4);
        assert_eq!(meta.out_degree, vec![1, 1, 1, 0]);
        assert_eq!(meta.is_active, vec![true, true, true, true]);
        assert_eq!(meta.num_active, 4);
    }

    #[test]
    fn test_isolated_ids_inactive() {
        // Only ids 0 and 5 are linked; 1..=4 are gaps in the id space.
        let store = LinkStore::from_edges(&[(0, 5)]);
        let meta = GraphMeta::derive(&store).unwrap();

        assert_eq!(meta.id_limit, 6);
        assert_eq!(meta.num_active, 2);
        for id in 1..5 {
            assert!(!meta.is_active[id]);
        }
        assert!(meta.is_active[0]);
        assert!(meta.is_active[5]);
    }

    #[test]
    fn test_empty_store_is_invalid() {
        let store = LinkStore::from_packed(vec![]).unwrap();
        let err = GraphMeta::derive(&store).unwrap_err();
        assert!(matches!(err, Error::NoActivePages));
    }

    #[test]
    fn test_dangling_classification() {
        let store = LinkStore::from_edges(&[(0, 1)]);
        let meta = GraphMeta::derive(&store).unwrap();

        assert!(!meta.is_dangling(0)); // has an outgoing link
        assert!(meta.is_dangling(1)); // active, no outgoing links
    }

    #[test]
    fn test_zero_incoming_record_marks_active() {
        // A (dest, 0) record mentions the destination without any sources;
        // the id counts as having incoming links and is therefore active.
        let store = LinkStore::from_packed(vec![2, 0]).unwrap();
        let meta = GraphMeta::derive(&store).unwrap();

        assert_eq!(meta.id_limit, 3);
        assert_eq!(meta.num_active, 1);
        assert!(meta.is_active[2]);
        assert!(meta.is_dangling(2));
    }

    #[test]
    fn test_out_degree_counts_every_occurrence() {
        // Source 0 appears in two records and twice in one of them.
        let store = LinkStore::from_packed(vec![1, 2, 0, 0, 2, 1, 0]).unwrap();
        let meta = GraphMeta::derive(&store).unwrap();
        assert_eq!(meta.out_degree[0], 3);
    }
}
