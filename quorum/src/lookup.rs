use alloc::collections::BTreeMap;

use fedvote_common::{Context, QuorumSet};

/// Resolves the quorum set of a node while looking for a quorum.
///
/// Nodes the lookup knows nothing about are treated as having the
/// [empty quorum set](QuorumSet::empty), which no node set satisfies.
pub trait QuorumSetLookup<Ctx>
where
    Ctx: Context,
{
    fn quorum_set_of(&self, node: &Ctx::PublicKey) -> Option<&QuorumSet<Ctx>>;
}

impl<Ctx> QuorumSetLookup<Ctx> for BTreeMap<Ctx::PublicKey, QuorumSet<Ctx>>
where
    Ctx: Context,
{
    fn quorum_set_of(&self, node: &Ctx::PublicKey) -> Option<&QuorumSet<Ctx>> {
        self.get(node)
    }
}

impl<Ctx, L> QuorumSetLookup<Ctx> for &L
where
    Ctx: Context,
    L: QuorumSetLookup<Ctx> + ?Sized,
{
    fn quorum_set_of(&self, node: &Ctx::PublicKey) -> Option<&QuorumSet<Ctx>> {
        (**self).quorum_set_of(node)
    }
}
