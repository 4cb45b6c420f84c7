use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use core::mem;

use derive_where::derive_where;
use tracing::{debug, trace};

use fedvote_attempt::{AgreementAttempt, Evidence, Transition};
use fedvote_common::{Context, Phase, QuorumSet, Vote};

use crate::{AcceptAll, Event, StatementValidator};

/// Runs federated voting for a single node.
///
/// The node votes for at most one statement per round, and at most one of its
/// agreement attempts is ever accepted or confirmed. Votes may be fed in any
/// order, the resulting tallies and phases do not depend on it.
///
/// A round ends with [`reset_round`](Self::reset_round), or by starting over with a new engine.
#[derive_where(Clone, Debug; V)]
pub struct FederatedVoteEngine<Ctx, V = AcceptAll>
where
    Ctx: Context,
{
    public_key: Ctx::PublicKey,
    quorum_set: QuorumSet<Ctx>,
    peer_quorum_sets: BTreeMap<Ctx::PublicKey, QuorumSet<Ctx>>,
    attempts: BTreeMap<Ctx::Statement, AgreementAttempt<Ctx>>,
    has_voted: bool,
    consensus: Option<Ctx::Statement>,
    round: u64,
    events: Vec<Event<Ctx>>,
    deferred_votes: Vec<Vote<Ctx>>,
    validator: V,
}

impl<Ctx> FederatedVoteEngine<Ctx, AcceptAll>
where
    Ctx: Context,
{
    /// Create an engine accepting any statement.
    pub fn new(public_key: Ctx::PublicKey, quorum_set: QuorumSet<Ctx>) -> Self {
        Self::with_validator(public_key, quorum_set, AcceptAll)
    }
}

impl<Ctx, V> FederatedVoteEngine<Ctx, V>
where
    Ctx: Context,
    V: StatementValidator<Ctx>,
{
    pub fn with_validator(
        public_key: Ctx::PublicKey,
        quorum_set: QuorumSet<Ctx>,
        validator: V,
    ) -> Self {
        Self {
            public_key,
            quorum_set,
            peer_quorum_sets: BTreeMap::new(),
            attempts: BTreeMap::new(),
            has_voted: false,
            consensus: None,
            round: 0,
            events: Vec::new(),
            deferred_votes: Vec::new(),
            validator,
        }
    }

    pub fn public_key(&self) -> &Ctx::PublicKey {
        &self.public_key
    }

    pub fn quorum_set(&self) -> &QuorumSet<Ctx> {
        &self.quorum_set
    }

    pub fn peer_quorum_sets(&self) -> &BTreeMap<Ctx::PublicKey, QuorumSet<Ctx>> {
        &self.peer_quorum_sets
    }

    pub fn has_voted(&self) -> bool {
        self.has_voted
    }

    pub fn has_consensus(&self) -> bool {
        self.consensus.is_some()
    }

    pub fn consensus(&self) -> Option<&Ctx::Statement> {
        self.consensus.as_ref()
    }

    /// Number of rounds completed with [`reset_round`](Self::reset_round).
    pub fn round(&self) -> u64 {
        self.round
    }

    pub fn attempt(&self, statement: &Ctx::Statement) -> Option<&AgreementAttempt<Ctx>> {
        self.attempts.get(statement)
    }

    /// All agreement attempts of the current round, ordered by statement.
    pub fn attempts(&self) -> impl Iterator<Item = &AgreementAttempt<Ctx>> {
        self.attempts.values()
    }

    /// Events produced since the last call to [`drain_events`](Self::drain_events).
    pub fn pending_events(&self) -> &[Event<Ctx>] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<Event<Ctx>> {
        mem::take(&mut self.events)
    }

    /// Accept-votes minted while tallying the node's own vote in
    /// [`vote_for_statement`](Self::vote_for_statement), which only returns that vote.
    pub fn drain_deferred_votes(&mut self) -> Vec<Vote<Ctx>> {
        mem::take(&mut self.deferred_votes)
    }

    /// Replace the node's quorum set.
    ///
    /// Existing attempts are not re-evaluated, the new quorum set is used from the next vote on.
    pub fn update_quorum_set(&mut self, quorum_set: QuorumSet<Ctx>) {
        debug!(public_key = %self.public_key, %quorum_set, "Updating quorum set");
        self.quorum_set = quorum_set;
    }

    /// Record the latest known quorum set of a peer.
    ///
    /// Only used for nodes whose quorum set did not come with a vote. Every node the
    /// engine tallies has voted, so this only matters to callers using
    /// [`VoteLookup`](fedvote_attempt::VoteLookup) directly.
    pub fn update_peer_quorum_set(&mut self, peer: Ctx::PublicKey, quorum_set: QuorumSet<Ctx>) {
        trace!(public_key = %self.public_key, %peer, %quorum_set, "Updating peer quorum set");
        self.peer_quorum_sets.insert(peer, quorum_set);
    }

    /// Start a new round: forget all attempts, the vote cast and the consensus reached.
    ///
    /// Quorum sets are kept.
    pub fn reset_round(&mut self) {
        self.round += 1;

        debug!(public_key = %self.public_key, round = %self.round, "Starting new round");

        self.attempts.clear();
        self.has_voted = false;
        self.consensus = None;
        self.events.clear();
        self.deferred_votes.clear();
    }

    /// Cast the node's vote for `statement`.
    ///
    /// Returns the vote to send to the peers, or `None` if the node already voted
    /// in this round or the statement is invalid.
    pub fn vote_for_statement(&mut self, statement: Ctx::Statement) -> Option<Vote<Ctx>> {
        if self.has_voted {
            debug!(
                public_key = %self.public_key, %statement,
                "Already voted in this round, ignoring"
            );
            return None;
        }

        if !self.validator.is_valid(&statement) {
            debug!(
                public_key = %self.public_key, %statement,
                "Refusing to vote for invalid statement"
            );
            return None;
        }

        self.has_voted = true;

        let vote = Vote::new_vote(
            statement,
            self.public_key.clone(),
            self.quorum_set.clone(),
        );

        debug!(public_key = %self.public_key, %vote, "Voted");

        self.events.push(Event::Voted {
            public_key: self.public_key.clone(),
            vote: vote.clone(),
        });

        if let Some(accept_vote) = self.process_vote(vote.clone()) {
            self.deferred_votes.push(accept_vote);
        }

        Some(vote)
    }

    /// Tally a vote, be it from a peer or from the node itself.
    ///
    /// Returns the node's accept-vote if the vote made the node accept the statement.
    pub fn process_vote(&mut self, vote: Vote<Ctx>) -> Option<Vote<Ctx>> {
        if !self.validator.is_valid(&vote.statement) {
            debug!(
                public_key = %self.public_key, %vote,
                "Ignoring vote for invalid statement"
            );
            return None;
        }

        trace!(public_key = %self.public_key, %vote, "Processing vote");

        let Vote {
            statement,
            accept,
            voter,
            quorum_set,
        } = vote;

        self.attempt_mut(&statement).add_vote(voter, quorum_set, accept);

        if let Some(accept_vote) = self.try_move_to_accept(&statement) {
            // Our own accept-vote counts towards confirming the statement too,
            // the attempt is already accepted so it cannot mint another one
            let echoed = self.process_vote(accept_vote.clone());
            debug_assert!(echoed.is_none());
            return Some(accept_vote);
        }

        if self.try_move_to_confirm(&statement) {
            debug!(public_key = %self.public_key, %statement, "Consensus reached");
            self.consensus = Some(statement);
        }

        None
    }

    fn attempt_mut(&mut self, statement: &Ctx::Statement) -> &mut AgreementAttempt<Ctx> {
        self.attempts.entry(statement.clone()).or_insert_with(|| {
            trace!(public_key = %self.public_key, %statement, "Starting agreement attempt");
            AgreementAttempt::new(statement.clone())
        })
    }

    /// Whether an attempt on another statement is accepted or confirmed.
    fn is_committed_elsewhere(&self, statement: &Ctx::Statement) -> bool {
        self.attempts
            .values()
            .any(|attempt| attempt.statement() != statement && attempt.phase().is_committed())
    }

    fn try_move_to_accept(&mut self, statement: &Ctx::Statement) -> Option<Vote<Ctx>> {
        if self.is_committed_elsewhere(statement) {
            return None;
        }

        let attempt = self.attempts.get_mut(statement)?;
        let transition = attempt.try_move_to_accept(&self.quorum_set, &self.peer_quorum_sets)?;

        self.on_transition(statement, transition);

        Some(Vote::new_accept(
            statement.clone(),
            self.public_key.clone(),
            self.quorum_set.clone(),
        ))
    }

    fn try_move_to_confirm(&mut self, statement: &Ctx::Statement) -> bool {
        if self.is_committed_elsewhere(statement) {
            return false;
        }

        let Some(attempt) = self.attempts.get_mut(statement) else {
            return false;
        };

        match attempt.try_move_to_confirm(&self.quorum_set, &self.peer_quorum_sets) {
            Some(transition) => {
                self.on_transition(statement, transition);
                true
            }
            None => false,
        }
    }

    fn on_transition(&mut self, statement: &Ctx::Statement, transition: Transition<Ctx>) {
        debug!(
            public_key = %self.public_key,
            %statement,
            from = %transition.from,
            to = %transition.to,
            evidence.size = %transition.evidence.nodes().len(),
            "Agreement attempt changed phase"
        );

        let public_key = self.public_key.clone();
        let statement = statement.clone();

        let evidence = match transition.evidence {
            Evidence::VBlocking(v_blocking_set) => Event::AcceptVoteVBlocked {
                public_key: public_key.clone(),
                statement: statement.clone(),
                v_blocking_set,
            },
            Evidence::RatifiedVote(quorum) => Event::VoteRatified {
                public_key: public_key.clone(),
                statement: statement.clone(),
                quorum,
            },
            Evidence::RatifiedAccept(quorum) => Event::AcceptVoteRatified {
                public_key: public_key.clone(),
                statement: statement.clone(),
                quorum,
            },
        };

        let moved = match transition.to {
            Phase::Confirmed => Event::AgreementAttemptMovedToConfirmPhase {
                public_key,
                statement,
                phase: transition.to,
            },
            _ => Event::AgreementAttemptMovedToAcceptPhase {
                public_key,
                statement,
                phase: transition.to,
            },
        };

        self.events.push(evidence);
        self.events.push(moved);

        debug_assert!(
            self.attempts
                .values()
                .filter(|attempt| attempt.phase().is_committed())
                .count()
                <= 1,
            "more than one agreement attempt is accepted or confirmed"
        );
    }
}
