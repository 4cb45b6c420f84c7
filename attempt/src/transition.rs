use derive_where::derive_where;

use fedvote_common::{Context, Phase};
use fedvote_quorum::NodeSet;

/// Why an agreement attempt was allowed to move to its next phase.
#[derive_where(Clone, Debug, PartialEq, Eq)]
pub enum Evidence<Ctx>
where
    Ctx: Context,
{
    /// The nodes that voted to accept the statement block every slice of the owner.
    VBlocking(NodeSet<Ctx>),

    /// A quorum for the owner voted for, or voted to accept, the statement.
    RatifiedVote(NodeSet<Ctx>),

    /// A quorum for the owner voted to accept the statement.
    RatifiedAccept(NodeSet<Ctx>),
}

impl<Ctx> Evidence<Ctx>
where
    Ctx: Context,
{
    /// The nodes backing the transition.
    pub fn nodes(&self) -> &NodeSet<Ctx> {
        match self {
            Evidence::VBlocking(nodes)
            | Evidence::RatifiedVote(nodes)
            | Evidence::RatifiedAccept(nodes) => nodes,
        }
    }
}

/// A phase change of an agreement attempt, with its justification.
#[derive_where(Clone, Debug, PartialEq, Eq)]
pub struct Transition<Ctx>
where
    Ctx: Context,
{
    pub from: Phase,
    pub to: Phase,
    pub evidence: Evidence<Ctx>,
}

impl<Ctx> Transition<Ctx>
where
    Ctx: Context,
{
    pub fn new(from: Phase, to: Phase, evidence: Evidence<Ctx>) -> Self {
        debug_assert_eq!(from.next(), Some(to), "phases only move one step forward");

        Self { from, to, evidence }
    }
}
