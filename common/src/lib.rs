//! Common data types and abstractions

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

mod context;
mod phase;
mod quorum_set;
mod vote;

pub use context::{Context, PublicKey, Statement};
pub use phase::Phase;
pub use quorum_set::{QuorumSet, QuorumSetError};
pub use vote::Vote;

/// Shorthand for the public key type of a context.
pub type PublicKeyOf<Ctx> = <Ctx as Context>::PublicKey;

/// Shorthand for the statement type of a context.
pub type StatementOf<Ctx> = <Ctx as Context>::Statement;
