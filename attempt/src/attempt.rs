use alloc::collections::BTreeMap;

use derive_where::derive_where;
use tracing::trace;

use fedvote_common::{Context, Phase, QuorumSet};
use fedvote_quorum::{is_v_blocking, quorum_for, NodeSet, QuorumSetLookup};

use crate::{Evidence, Transition, VoteLookup};

/// Voters and the quorum set each of them had when casting its vote.
pub type Votes<Ctx> = BTreeMap<<Ctx as Context>::PublicKey, QuorumSet<Ctx>>;

/// An attempt of a node at agreeing on a single statement.
///
/// Tallies the votes seen for the statement and tracks the phase the node is in.
/// A voter can appear both in `votes_for` and in `votes_to_accept`,
/// an accept-vote does not retract the plain vote cast before it.
#[derive_where(Clone, Debug, PartialEq, Eq)]
pub struct AgreementAttempt<Ctx>
where
    Ctx: Context,
{
    statement: Ctx::Statement,
    votes_for: Votes<Ctx>,
    votes_to_accept: Votes<Ctx>,
    phase: Phase,
}

impl<Ctx> AgreementAttempt<Ctx>
where
    Ctx: Context,
{
    pub fn new(statement: Ctx::Statement) -> Self {
        Self {
            statement,
            votes_for: BTreeMap::new(),
            votes_to_accept: BTreeMap::new(),
            phase: Phase::Unknown,
        }
    }

    pub fn statement(&self) -> &Ctx::Statement {
        &self.statement
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Peers that voted for the statement.
    pub fn votes_for(&self) -> &Votes<Ctx> {
        &self.votes_for
    }

    /// Peers that voted to accept the statement.
    pub fn votes_to_accept(&self) -> &Votes<Ctx> {
        &self.votes_to_accept
    }

    /// Peers that voted for the statement or voted to accept it.
    pub fn voters(&self) -> NodeSet<Ctx> {
        self.votes_for
            .keys()
            .chain(self.votes_to_accept.keys())
            .cloned()
            .collect()
    }

    /// Peers that voted to accept the statement.
    pub fn accepting_voters(&self) -> NodeSet<Ctx> {
        self.votes_to_accept.keys().cloned().collect()
    }

    pub fn has_vote_from(&self, voter: &Ctx::PublicKey) -> bool {
        self.votes_for.contains_key(voter) || self.votes_to_accept.contains_key(voter)
    }

    /// Record a vote, replacing any earlier vote of the same kind from the same voter.
    ///
    /// Returns whether the tally changed.
    pub fn add_vote(
        &mut self,
        voter: Ctx::PublicKey,
        quorum_set: QuorumSet<Ctx>,
        accept: bool,
    ) -> bool {
        let votes = if accept {
            &mut self.votes_to_accept
        } else {
            &mut self.votes_for
        };

        if votes.get(&voter) == Some(&quorum_set) {
            return false;
        }

        trace!(%voter, %accept, statement = %self.statement, "Adding vote to agreement attempt");

        votes.insert(voter, quorum_set);
        true
    }

    /// Evidence that the node may accept the statement, if there is any.
    ///
    /// Either the accept-votes are v-blocking for the owner, or the voters
    /// contain a quorum that convinces the owner.
    pub fn accept_evidence<L>(&self, owner: &QuorumSet<Ctx>, peers: &L) -> Option<Evidence<Ctx>>
    where
        L: QuorumSetLookup<Ctx> + ?Sized,
    {
        let accepting = self.accepting_voters();
        if is_v_blocking(owner, &accepting) {
            return Some(Evidence::VBlocking(accepting));
        }

        let lookup = VoteLookup::new(&self.votes_to_accept, &self.votes_for, peers);
        quorum_for(owner, &self.voters(), &lookup).map(Evidence::RatifiedVote)
    }

    /// Evidence that the node may confirm the statement, if there is any.
    pub fn confirm_evidence<L>(&self, owner: &QuorumSet<Ctx>, peers: &L) -> Option<Evidence<Ctx>>
    where
        L: QuorumSetLookup<Ctx> + ?Sized,
    {
        let lookup = VoteLookup::new(&self.votes_to_accept, &self.votes_for, peers);
        quorum_for(owner, &self.accepting_voters(), &lookup).map(Evidence::RatifiedAccept)
    }

    /// Move from `Unknown` to `Accepted` if the tally allows it.
    ///
    /// The owner must make sure none of its other attempts is accepted or confirmed.
    pub fn try_move_to_accept<L>(
        &mut self,
        owner: &QuorumSet<Ctx>,
        peers: &L,
    ) -> Option<Transition<Ctx>>
    where
        L: QuorumSetLookup<Ctx> + ?Sized,
    {
        if self.phase != Phase::Unknown {
            return None;
        }

        let evidence = self.accept_evidence(owner, peers)?;
        Some(self.move_to(Phase::Accepted, evidence))
    }

    /// Move from `Accepted` to `Confirmed` if the tally allows it.
    pub fn try_move_to_confirm<L>(
        &mut self,
        owner: &QuorumSet<Ctx>,
        peers: &L,
    ) -> Option<Transition<Ctx>>
    where
        L: QuorumSetLookup<Ctx> + ?Sized,
    {
        if self.phase != Phase::Accepted {
            return None;
        }

        let evidence = self.confirm_evidence(owner, peers)?;
        Some(self.move_to(Phase::Confirmed, evidence))
    }

    fn move_to(&mut self, phase: Phase, evidence: Evidence<Ctx>) -> Transition<Ctx> {
        let transition = Transition::new(self.phase, phase, evidence);
        self.phase = phase;
        transition
    }
}
