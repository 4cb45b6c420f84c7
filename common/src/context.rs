use core::fmt::{Debug, Display};

/// Identifies a participant of the federated voting protocol.
pub trait PublicKey
where
    Self: Clone + Debug + Display + PartialEq + Eq + PartialOrd + Ord,
{
}

/// The value nodes attempt to agree on.
///
/// The engine never looks inside a statement, it only compares them.
pub trait Statement
where
    Self: Clone + Debug + Display + PartialEq + Eq + PartialOrd + Ord,
{
}

/// Binds together the concrete types used by an instance of the engine.
pub trait Context
where
    Self: Sized + Clone + Debug,
{
    type PublicKey: PublicKey;
    type Statement: Statement;
}
