use alloc::collections::BTreeMap;

use fedvote_common::{Context, QuorumSet};
use fedvote_quorum::QuorumSetLookup;

/// Resolves quorum sets from the votes of an agreement attempt first,
/// and from the owner's knowledge of its peers second.
///
/// Accept-votes take precedence over plain votes as they were cast later.
pub struct VoteLookup<'a, Ctx, L>
where
    Ctx: Context,
    L: ?Sized,
{
    votes_to_accept: &'a BTreeMap<Ctx::PublicKey, QuorumSet<Ctx>>,
    votes_for: &'a BTreeMap<Ctx::PublicKey, QuorumSet<Ctx>>,
    peers: &'a L,
}

impl<'a, Ctx, L> VoteLookup<'a, Ctx, L>
where
    Ctx: Context,
    L: QuorumSetLookup<Ctx> + ?Sized,
{
    pub fn new(
        votes_to_accept: &'a BTreeMap<Ctx::PublicKey, QuorumSet<Ctx>>,
        votes_for: &'a BTreeMap<Ctx::PublicKey, QuorumSet<Ctx>>,
        peers: &'a L,
    ) -> Self {
        Self {
            votes_to_accept,
            votes_for,
            peers,
        }
    }
}

impl<Ctx, L> QuorumSetLookup<Ctx> for VoteLookup<'_, Ctx, L>
where
    Ctx: Context,
    L: QuorumSetLookup<Ctx> + ?Sized,
{
    fn quorum_set_of(&self, node: &Ctx::PublicKey) -> Option<&QuorumSet<Ctx>> {
        self.votes_to_accept
            .get(node)
            .or_else(|| self.votes_for.get(node))
            .or_else(|| self.peers.quorum_set_of(node))
    }
}
