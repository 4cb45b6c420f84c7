//! Federated voting engine of a single node.
//!
//! The engine is fed with the node's own decision to vote for a statement
//! ([`FederatedVoteEngine::vote_for_statement`]) and with the votes it observes
//! from its peers ([`FederatedVoteEngine::process_vote`]). It answers with the
//! votes that must be sent out, and records what happened as [`Event`]s to be
//! drained by the caller.
//!
//! The engine knows nothing about the network: delivering the returned votes
//! is up to the caller.

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

mod engine;
mod event;
mod validator;

pub use engine::FederatedVoteEngine;
pub use event::Event;
pub use validator::{AcceptAll, StatementValidator};

pub use fedvote_attempt::{AgreementAttempt, Evidence, Transition};
