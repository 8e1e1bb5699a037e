//! The fixed-point PageRank update over the packed link store.
//!
//! One iteration is four passes over arrays of length `id_limit` plus one
//! sequential scan of the link store:
//!
//! 1. divide each rank by its out-degree (per-edge share)
//! 2. distribute: per record, sum the sources' shares into the scratch slot
//!    of the destination
//! 3. sum the mass stuck at dangling ids and spread it uniformly
//! 4. combine with damping and the teleport term
//!
//! Passes 1 and 4 are elementwise and run on rayon above a size threshold.
//! The distribute scan and the dangling-mass sum stay sequential so the
//! floating-point accumulation order is fixed: identical inputs produce
//! bit-identical rank vectors regardless of thread count.

use rayon::prelude::*;

use crate::error::Error;
use crate::graph::{GraphMeta, LinkStore};
use crate::pagerank::observer::{IterClock, IterationReport, RankObserver};
use crate::stats;
use crate::types::RankConfig;

/// Below this many ids the elementwise passes run sequentially; rayon's
/// fork overhead dominates on small graphs.
const PAR_THRESHOLD: usize = 1 << 16;

/// PageRank calculator: owns the link store, the derived metadata, the rank
/// vector, and one scratch buffer reused every iteration.
///
/// The rank vector is a probability distribution over the active ids — it
/// sums to 1 after construction and after every completed iteration.
/// [`ranks`](Self::ranks) exposes it between iterations with snapshot
/// semantics: the next [`iterate_once`](Self::iterate_once) overwrites it in
/// place, so callers copy what they need to keep.
#[derive(Debug)]
pub struct Pagerank {
    links: LinkStore,
    meta: GraphMeta,
    ranks: Vec<f64>,
    scratch: Vec<f64>,
}

impl Pagerank {
    /// Derive metadata from `links` and initialize the rank vector
    /// uniformly: `1 / num_active` for every active id, 0 elsewhere.
    ///
    /// Fails with [`Error::NoActivePages`] on an empty or fully
    /// disconnected graph.
    pub fn new(links: LinkStore) -> Result<Self, Error> {
        let meta = GraphMeta::derive(&links)?;

        let init = 1.0 / meta.num_active as f64;
        let mut ranks = vec![0.0; meta.id_limit];
        for (rank, &active) in ranks.iter_mut().zip(&meta.is_active) {
            if active {
                *rank = init;
            }
        }
        let scratch = vec![0.0; meta.id_limit];

        Ok(Self {
            links,
            meta,
            ranks,
            scratch,
        })
    }

    /// The current rank vector, indexed by page id. Valid until the next
    /// iteration.
    pub fn ranks(&self) -> &[f64] {
        &self.ranks
    }

    /// Metadata derived at construction.
    pub fn meta(&self) -> &GraphMeta {
        &self.meta
    }

    /// Consume the engine, keeping only the final rank vector.
    pub fn into_ranks(self) -> Vec<f64> {
        self.ranks
    }

    /// Perform one full-graph update in place.
    ///
    /// `damping` is the probability of following a link rather than
    /// teleporting; values outside `[0, 1]` (including NaN) fail fast with
    /// [`Error::InvalidDamping`] before touching the vector.
    pub fn iterate_once(&mut self, damping: f64) -> Result<(), Error> {
        if !(0.0..=1.0).contains(&damping) {
            return Err(Error::InvalidDamping(damping));
        }

        self.normalize_by_out_degree();
        self.distribute();
        let bias = self.dangling_mass() / self.meta.num_active as f64;
        self.combine(damping, bias);
        Ok(())
    }

    /// Run `cfg.iterations` strictly sequential iterations, reporting each
    /// to `observer` with timing and the change-ratio range.
    pub fn run(
        &mut self,
        cfg: &RankConfig,
        observer: &mut impl RankObserver,
    ) -> Result<(), Error> {
        let mut prev = self.ranks.clone();
        for iteration in 0..cfg.iterations {
            #[cfg(feature = "tracing")]
            let _span =
                tracing::info_span!("pagerank_iteration", iteration = iteration).entered();

            let clock = IterClock::start();
            self.iterate_once(cfg.damping)?;
            let report = IterationReport {
                iteration,
                elapsed: clock.elapsed(),
                change_ratio: stats::change_ratio_range(&prev, &self.ranks),
            };
            observer.on_iteration_end(&report, &self.ranks);
            prev.copy_from_slice(&self.ranks);
        }
        Ok(())
    }

    /// Pass 1: convert each source's total mass into its per-outgoing-edge
    /// share. Ids with no outgoing links keep their mass; pass 3 picks it up
    /// as dangling mass.
    fn normalize_by_out_degree(&mut self) {
        let out_degree = &self.meta.out_degree;
        if self.ranks.len() >= PAR_THRESHOLD {
            self.ranks
                .par_iter_mut()
                .zip(out_degree.par_iter())
                .for_each(|(rank, &degree)| {
                    if degree > 0 {
                        *rank /= f64::from(degree);
                    }
                });
        } else {
            for (rank, &degree) in self.ranks.iter_mut().zip(out_degree) {
                if degree > 0 {
                    *rank /= f64::from(degree);
                }
            }
        }
    }

    /// Pass 2: aggregate incoming shares per destination into the scratch
    /// buffer. Destinations outside any record keep scratch 0. Sequential:
    /// record order fixes the summation order.
    fn distribute(&mut self) {
        self.scratch.fill(0.0);
        let ranks = &self.ranks;
        let scratch = &mut self.scratch;
        for rec in self.links.records() {
            let mut sum = 0.0;
            for &src in rec.sources {
                sum += ranks[src as usize];
            }
            scratch[rec.dest as usize] = sum;
        }
    }

    /// Pass 3: mass trapped at active ids with no outgoing links. Those ids
    /// were untouched by pass 1, so this is their full previous-iteration
    /// mass. Sequential for a fixed summation order.
    fn dangling_mass(&self) -> f64 {
        let mut mass = 0.0;
        for (id, &rank) in self.ranks.iter().enumerate() {
            if self.meta.is_dangling(id) {
                mass += rank;
            }
        }
        mass
    }

    /// Pass 4: `rank[id] = scratch[id] * damping + uniform` for active ids,
    /// where the uniform term folds the dangling bias and the teleport
    /// probability together. Inactive ids stay at 0.
    fn combine(&mut self, damping: f64, bias: f64) {
        let uniform = bias * damping + (1.0 - damping) / self.meta.num_active as f64;
        let is_active = &self.meta.is_active;
        let scratch = &self.scratch;
        if self.ranks.len() >= PAR_THRESHOLD {
            self.ranks
                .par_iter_mut()
                .zip(scratch.par_iter())
                .zip(is_active.par_iter())
                .for_each(|((rank, &sum), &active)| {
                    if active {
                        *rank = sum * damping + uniform;
                    }
                });
        } else {
            for ((rank, &sum), &active) in self.ranks.iter_mut().zip(scratch).zip(is_active) {
                if active {
                    *rank = sum * damping + uniform;
                }
            }
        }
    }
}
