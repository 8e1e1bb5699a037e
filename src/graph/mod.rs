//! Link-graph representation
//!
//! This module provides the packed, immutable encoding of the directed link
//! graph ([`LinkStore`]) and the metadata derived from it once per run
//! ([`GraphMeta`]).

pub mod links;
pub mod meta;

pub use links::{LinkRecord, LinkStore, Records};
pub use meta::GraphMeta;
