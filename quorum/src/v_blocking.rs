use fedvote_common::{Context, QuorumSet};

use crate::NodeSet;

/// Whether `node_set` intersects every slice of `quorum_set`.
///
/// A zero-threshold quorum set is never blocked: it has no slice to intersect.
pub fn is_v_blocking<Ctx>(quorum_set: &QuorumSet<Ctx>, node_set: &NodeSet<Ctx>) -> bool
where
    Ctx: Context,
{
    if quorum_set.threshold() == 0 {
        return false;
    }

    // Number of children that must be unusable before the threshold can no longer be met.
    // A threshold above the number of children leaves nothing to block.
    let mut left_until_blocked =
        match (quorum_set.child_count() + 1).checked_sub(quorum_set.threshold()) {
            Some(0) | None => return false,
            Some(n) => n,
        };

    for validator in quorum_set.validators() {
        if node_set.contains(validator) {
            left_until_blocked -= 1;
            if left_until_blocked == 0 {
                return true;
            }
        }
    }

    for inner in quorum_set.inner_quorum_sets() {
        if is_v_blocking(inner, node_set) {
            left_until_blocked -= 1;
            if left_until_blocked == 0 {
                return true;
            }
        }
    }

    false
}
