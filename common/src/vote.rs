use core::fmt;

use derive_where::derive_where;

use crate::{Context, QuorumSet};

/// A vote cast by `voter`, either `vote(statement)` or `vote(accept(statement))`.
///
/// The voter's quorum set travels with the vote: tallies use the configuration
/// the voter had when it cast the vote, not whatever we learned about it later.
#[derive_where(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(bound(
        serialize = "Ctx::PublicKey: serde::Serialize, Ctx::Statement: serde::Serialize",
        deserialize = "Ctx::PublicKey: serde::Deserialize<'de>, Ctx::Statement: serde::Deserialize<'de>"
    ))
)]
pub struct Vote<Ctx>
where
    Ctx: Context,
{
    pub statement: Ctx::Statement,
    /// `false` for `vote(statement)`, `true` for `vote(accept(statement))`
    pub accept: bool,
    pub voter: Ctx::PublicKey,
    pub quorum_set: QuorumSet<Ctx>,
}

impl<Ctx> Vote<Ctx>
where
    Ctx: Context,
{
    pub fn new(
        statement: Ctx::Statement,
        accept: bool,
        voter: Ctx::PublicKey,
        quorum_set: QuorumSet<Ctx>,
    ) -> Self {
        Self {
            statement,
            accept,
            voter,
            quorum_set,
        }
    }

    /// `vote(statement)`
    pub fn new_vote(
        statement: Ctx::Statement,
        voter: Ctx::PublicKey,
        quorum_set: QuorumSet<Ctx>,
    ) -> Self {
        Self::new(statement, false, voter, quorum_set)
    }

    /// `vote(accept(statement))`
    pub fn new_accept(
        statement: Ctx::Statement,
        voter: Ctx::PublicKey,
        quorum_set: QuorumSet<Ctx>,
    ) -> Self {
        Self::new(statement, true, voter, quorum_set)
    }

    pub fn is_accept(&self) -> bool {
        self.accept
    }
}

impl<Ctx> fmt::Display for Vote<Ctx>
where
    Ctx: Context,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.accept {
            write!(f, "{}: vote(accept({}))", self.voter, self.statement)
        } else {
            write!(f, "{}: vote({})", self.voter, self.statement)
        }
    }
}
