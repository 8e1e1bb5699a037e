//! PageRank iteration engine
//!
//! [`Pagerank`] owns the rank vector and performs the fixed-point update;
//! [`RankObserver`] receives a report after each iteration for progress
//! logging and convergence tracking without coupling callers to the loop.

pub mod engine;
pub mod observer;

pub use engine::Pagerank;
pub use observer::{IterClock, IterationReport, NoopObserver, RankObserver, TimingObserver};
