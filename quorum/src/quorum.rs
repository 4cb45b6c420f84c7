use fedvote_common::{Context, QuorumSet};
use tracing::trace;

use crate::{NodeSet, QuorumSetLookup};

/// Whether `quorum_set` has a slice made only of members of `node_set`.
///
/// A zero-threshold quorum set has no such slice.
pub fn has_slice_in_set<Ctx>(quorum_set: &QuorumSet<Ctx>, node_set: &NodeSet<Ctx>) -> bool
where
    Ctx: Context,
{
    let mut remaining = quorum_set.threshold();
    if remaining == 0 {
        return false;
    }

    for validator in quorum_set.validators() {
        if node_set.contains(validator) {
            remaining -= 1;
            if remaining == 0 {
                return true;
            }
        }
    }

    for inner in quorum_set.inner_quorum_sets() {
        if has_slice_in_set(inner, node_set) {
            remaining -= 1;
            if remaining == 0 {
                return true;
            }
        }
    }

    false
}

/// Whether every member of `candidate` has a slice inside `candidate`, without narrowing.
pub fn is_self_sufficient<Ctx, L>(candidate: &NodeSet<Ctx>, lookup: &L) -> bool
where
    Ctx: Context,
    L: QuorumSetLookup<Ctx> + ?Sized,
{
    !candidate.is_empty() && members_with_slice_in(candidate, lookup).len() == candidate.len()
}

/// Find the largest quorum contained in `candidate`.
///
/// Members without a slice inside the candidate are dropped until the
/// candidate stops shrinking. Each pass removes at least one member,
/// so this takes at most `candidate.len()` passes.
pub fn find_quorum<Ctx, L>(candidate: &NodeSet<Ctx>, lookup: &L) -> Option<NodeSet<Ctx>>
where
    Ctx: Context,
    L: QuorumSetLookup<Ctx> + ?Sized,
{
    let mut candidate = candidate.clone();

    loop {
        if candidate.is_empty() {
            return None;
        }

        let kept = members_with_slice_in(&candidate, lookup);

        if kept.len() == candidate.len() {
            trace!(quorum.size = %kept.len(), "Found quorum");
            return Some(kept);
        }

        trace!(
            candidate.size = %candidate.len(),
            kept.size = %kept.len(),
            "Narrowing quorum candidate"
        );

        candidate = kept;
    }
}

/// Whether `candidate` contains a quorum.
pub fn is_quorum<Ctx, L>(candidate: &NodeSet<Ctx>, lookup: &L) -> bool
where
    Ctx: Context,
    L: QuorumSetLookup<Ctx> + ?Sized,
{
    find_quorum(candidate, lookup).is_some()
}

/// Find a quorum inside `candidate` that also contains a slice of `subject`.
///
/// The subject is typically the node evaluating its own agreement attempt,
/// it does not need to be a member of the candidate: it only needs to be
/// convinced by the quorum.
pub fn quorum_for<Ctx, L>(
    subject: &QuorumSet<Ctx>,
    candidate: &NodeSet<Ctx>,
    lookup: &L,
) -> Option<NodeSet<Ctx>>
where
    Ctx: Context,
    L: QuorumSetLookup<Ctx> + ?Sized,
{
    let quorum = find_quorum(candidate, lookup)?;
    has_slice_in_set(subject, &quorum).then_some(quorum)
}

/// Whether `candidate` contains a quorum for `subject`, see [`quorum_for`].
pub fn contains_quorum_for<Ctx, L>(
    subject: &QuorumSet<Ctx>,
    candidate: &NodeSet<Ctx>,
    lookup: &L,
) -> bool
where
    Ctx: Context,
    L: QuorumSetLookup<Ctx> + ?Sized,
{
    quorum_for(subject, candidate, lookup).is_some()
}

fn members_with_slice_in<Ctx, L>(candidate: &NodeSet<Ctx>, lookup: &L) -> NodeSet<Ctx>
where
    Ctx: Context,
    L: QuorumSetLookup<Ctx> + ?Sized,
{
    let unknown = QuorumSet::empty();

    candidate
        .iter()
        .filter(|member| {
            let quorum_set = lookup.quorum_set_of(member).unwrap_or(&unknown);
            has_slice_in_set(quorum_set, candidate)
        })
        .cloned()
        .collect()
}
