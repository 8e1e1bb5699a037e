//! # wikirank
//!
//! PageRank over an encyclopedia's internal link graph.
//!
//! The crate takes a packed, destination-grouped link list (produced by a
//! separate ingestion step), derives per-id metadata in one pass, runs a
//! fixed number of in-place power iterations with dangling-mass
//! redistribution, and ranks titles by the converged probability vector.
//!
//! ```
//! use wikirank::{LinkStore, NoopObserver, Pagerank, RankConfig};
//!
//! let store = LinkStore::from_edges(&[(0, 1), (1, 2), (2, 0)]);
//! let mut pr = Pagerank::new(store)?;
//! pr.run(&RankConfig::default(), &mut NoopObserver)?;
//!
//! let total: f64 = pr.ranks().iter().sum();
//! assert!((total - 1.0).abs() < 1e-9);
//! # Ok::<(), wikirank::Error>(())
//! ```
//!
//! Raw persistence of link lists and rank vectors lives in [`io`]; title
//! ranking and report output in [`report`]; per-iteration convergence
//! telemetry in [`stats`] and the [`pagerank::RankObserver`] hook.

pub mod error;
pub mod graph;
pub mod io;
pub mod pagerank;
pub mod report;
pub mod stats;
pub mod types;

pub use error::Error;
pub use graph::{GraphMeta, LinkRecord, LinkStore};
pub use pagerank::{IterationReport, NoopObserver, Pagerank, RankObserver, TimingObserver};
pub use report::{rank_titles, write_report, RankedTitle, SkipReason, SkippedTitle, TitleRanking};
pub use types::RankConfig;
