//! Decide whether a set of nodes blocks or satisfies a federated quorum set.
//!
//! Both questions are answered by walking the quorum set tree and counting
//! direct children: [`is_v_blocking`] counts the children the node set makes
//! unusable, [`has_slice_in_set`] the children it satisfies.

#![forbid(unsafe_code)]
#![deny(unused_crate_dependencies, trivial_casts, trivial_numeric_casts)]
#![warn(
    // missing_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::private_intra_doc_links,
    variant_size_differences
)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::panic))]

extern crate alloc;

mod lookup;
mod quorum;
mod v_blocking;

pub use lookup::QuorumSetLookup;
pub use quorum::{
    contains_quorum_for, find_quorum, has_slice_in_set, is_quorum, is_self_sufficient,
    quorum_for,
};
pub use v_blocking::is_v_blocking;

use alloc::collections::BTreeSet;

use fedvote_common::PublicKeyOf;

/// A set of nodes, identified by their public keys.
pub type NodeSet<Ctx> = BTreeSet<PublicKeyOf<Ctx>>;
