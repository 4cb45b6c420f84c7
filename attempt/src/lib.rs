//! Per-statement agreement attempt of a node: vote tallies and phase transitions.

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

mod attempt;
mod lookup;
mod transition;

pub use attempt::{AgreementAttempt, Votes};
pub use lookup::VoteLookup;
pub use transition::{Evidence, Transition};
