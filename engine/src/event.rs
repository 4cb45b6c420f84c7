use core::fmt;

use derive_where::derive_where;

use fedvote_common::{Context, Phase, Vote};
use fedvote_quorum::NodeSet;

/// What happened while the engine processed a call.
///
/// Events are queued in the order they happen and drained with
/// [`FederatedVoteEngine::drain_events`](crate::FederatedVoteEngine::drain_events).
/// The evidence for a phase change always comes right before the phase change itself.
#[derive_where(Clone, Debug, PartialEq, Eq)]
pub enum Event<Ctx>
where
    Ctx: Context,
{
    /// The node cast its vote for a statement.
    Voted {
        public_key: Ctx::PublicKey,
        vote: Vote<Ctx>,
    },

    /// The nodes that voted to accept the statement are v-blocking for the node.
    AcceptVoteVBlocked {
        public_key: Ctx::PublicKey,
        statement: Ctx::Statement,
        v_blocking_set: NodeSet<Ctx>,
    },

    /// A quorum for the node voted for the statement (or to accept it).
    VoteRatified {
        public_key: Ctx::PublicKey,
        statement: Ctx::Statement,
        quorum: NodeSet<Ctx>,
    },

    AgreementAttemptMovedToAcceptPhase {
        public_key: Ctx::PublicKey,
        statement: Ctx::Statement,
        phase: Phase,
    },

    /// A quorum for the node voted to accept the statement.
    AcceptVoteRatified {
        public_key: Ctx::PublicKey,
        statement: Ctx::Statement,
        quorum: NodeSet<Ctx>,
    },

    AgreementAttemptMovedToConfirmPhase {
        public_key: Ctx::PublicKey,
        statement: Ctx::Statement,
        phase: Phase,
    },
}

impl<Ctx> Event<Ctx>
where
    Ctx: Context,
{
    /// The node that produced the event.
    pub fn public_key(&self) -> &Ctx::PublicKey {
        match self {
            Event::Voted { public_key, .. }
            | Event::AcceptVoteVBlocked { public_key, .. }
            | Event::VoteRatified { public_key, .. }
            | Event::AgreementAttemptMovedToAcceptPhase { public_key, .. }
            | Event::AcceptVoteRatified { public_key, .. }
            | Event::AgreementAttemptMovedToConfirmPhase { public_key, .. } => public_key,
        }
    }

    /// The statement the event is about.
    pub fn statement(&self) -> &Ctx::Statement {
        match self {
            Event::Voted { vote, .. } => &vote.statement,
            Event::AcceptVoteVBlocked { statement, .. }
            | Event::VoteRatified { statement, .. }
            | Event::AgreementAttemptMovedToAcceptPhase { statement, .. }
            | Event::AcceptVoteRatified { statement, .. }
            | Event::AgreementAttemptMovedToConfirmPhase { statement, .. } => statement,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Event::Voted { .. } => "Voted",
            Event::AcceptVoteVBlocked { .. } => "AcceptVoteVBlocked",
            Event::VoteRatified { .. } => "VoteRatified",
            Event::AgreementAttemptMovedToAcceptPhase { .. } => {
                "AgreementAttemptMovedToAcceptPhase"
            }
            Event::AcceptVoteRatified { .. } => "AcceptVoteRatified",
            Event::AgreementAttemptMovedToConfirmPhase { .. } => {
                "AgreementAttemptMovedToConfirmPhase"
            }
        }
    }
}

struct DisplayNodes<'a, Ctx: Context>(&'a NodeSet<Ctx>);

impl<Ctx: Context> fmt::Display for DisplayNodes<'_, Ctx> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, node) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{node}")?;
        }
        write!(f, "}}")
    }
}

impl<Ctx> fmt::Display for Event<Ctx>
where
    Ctx: Context,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}][{}] ", self.public_key(), self.name())?;

        match self {
            Event::Voted { vote, .. } => write!(f, "Vote cast: {vote}"),

            Event::AcceptVoteVBlocked {
                statement,
                v_blocking_set,
                ..
            } => write!(
                f,
                "accept({statement}) votes from {} are v-blocking",
                DisplayNodes::<Ctx>(v_blocking_set)
            ),

            Event::VoteRatified {
                statement, quorum, ..
            } => write!(
                f,
                "vote({statement}) ratified by quorum {}",
                DisplayNodes::<Ctx>(quorum)
            ),

            Event::AcceptVoteRatified {
                statement, quorum, ..
            } => write!(
                f,
                "vote(accept({statement})) ratified by quorum {}",
                DisplayNodes::<Ctx>(quorum)
            ),

            Event::AgreementAttemptMovedToAcceptPhase {
                statement, phase, ..
            }
            | Event::AgreementAttemptMovedToConfirmPhase {
                statement, phase, ..
            } => write!(f, "agreement attempt on {statement} moved to phase {phase}"),
        }
    }
}
