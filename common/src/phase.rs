use core::fmt;

/// Where an agreement attempt currently stands.
///
/// Phases only move forward: `Unknown -> Accepted -> Confirmed`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Phase {
    /// No decision has been taken on the statement yet
    #[default]
    Unknown,
    /// The node voted to accept the statement
    Accepted,
    /// The statement is confirmed, this is terminal
    Confirmed,
}

impl Phase {
    /// Whether the phase commits the node to the statement,
    /// ie. is either `Accepted` or `Confirmed`.
    pub fn is_committed(&self) -> bool {
        matches!(self, Phase::Accepted | Phase::Confirmed)
    }

    /// The phase that follows this one, if any.
    pub fn next(&self) -> Option<Phase> {
        match self {
            Phase::Unknown => Some(Phase::Accepted),
            Phase::Accepted => Some(Phase::Confirmed),
            Phase::Confirmed => None,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Unknown => write!(f, "unknown"),
            Phase::Accepted => write!(f, "accepted"),
            Phase::Confirmed => write!(f, "confirmed"),
        }
    }
}
