use alloc::collections::BTreeSet;
use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

use derive_where::derive_where;
use thiserror::Error;

use crate::Context;

/// The trust configuration of a node.
///
/// A slice of the quorum set is satisfied by a set of nodes when at least `threshold`
/// of its direct children are satisfied: a validator is satisfied when it is a member
/// of the set, an inner quorum set when one of its own slices is.
///
/// Quorum sets are immutable values, a node that changes its configuration
/// replaces its whole quorum set.
#[derive_where(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(bound(
        serialize = "Ctx::PublicKey: serde::Serialize",
        deserialize = "Ctx::PublicKey: serde::Deserialize<'de>"
    ))
)]
pub struct QuorumSet<Ctx>
where
    Ctx: Context,
{
    threshold: usize,
    #[cfg_attr(feature = "serde", serde(default))]
    validators: BTreeSet<Ctx::PublicKey>,
    #[cfg_attr(feature = "serde", serde(default))]
    inner_quorum_sets: Vec<QuorumSet<Ctx>>,
}

impl<Ctx> QuorumSet<Ctx>
where
    Ctx: Context,
{
    pub fn new(
        threshold: usize,
        validators: impl IntoIterator<Item = Ctx::PublicKey>,
        inner_quorum_sets: impl IntoIterator<Item = QuorumSet<Ctx>>,
    ) -> Self {
        Self {
            threshold,
            validators: validators.into_iter().collect(),
            inner_quorum_sets: inner_quorum_sets.into_iter().collect(),
        }
    }

    /// A quorum set without any nested quorum set.
    pub fn with_validators(
        threshold: usize,
        validators: impl IntoIterator<Item = Ctx::PublicKey>,
    ) -> Self {
        Self::new(threshold, validators, [])
    }

    /// The zero-threshold quorum set without members.
    ///
    /// It can neither be satisfied nor blocked, and is used in place
    /// of the quorum set of peers we know nothing about.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    pub fn validators(&self) -> &BTreeSet<Ctx::PublicKey> {
        &self.validators
    }

    pub fn inner_quorum_sets(&self) -> &[QuorumSet<Ctx>] {
        &self.inner_quorum_sets
    }

    /// Number of direct children, validators and inner quorum sets alike.
    pub fn child_count(&self) -> usize {
        self.validators.len() + self.inner_quorum_sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.child_count() == 0
    }

    /// Whether the key appears anywhere in the tree.
    pub fn contains_validator(&self, key: &Ctx::PublicKey) -> bool {
        self.validators.contains(key)
            || self
                .inner_quorum_sets
                .iter()
                .any(|inner| inner.contains_validator(key))
    }

    /// All validators of the tree, nested ones included.
    pub fn all_validators(&self) -> BTreeSet<Ctx::PublicKey> {
        let mut all = self.validators.clone();
        for inner in &self.inner_quorum_sets {
            all.extend(inner.all_validators());
        }
        all
    }

    /// Number of levels of the tree, a quorum set without inner sets has depth 1.
    pub fn depth(&self) -> usize {
        1 + self
            .inner_quorum_sets
            .iter()
            .map(|inner| inner.depth())
            .max()
            .unwrap_or(0)
    }

    /// Check that every level of the tree can be satisfied at all
    /// and that no validator appears more than once.
    pub fn validate(&self) -> Result<(), QuorumSetError> {
        let mut seen = BTreeSet::new();
        self.validate_at("root", &mut seen)
    }

    fn validate_at<'a>(
        &'a self,
        path: &str,
        seen: &mut BTreeSet<&'a Ctx::PublicKey>,
    ) -> Result<(), QuorumSetError> {
        if self.threshold > self.child_count() {
            return Err(QuorumSetError::ThresholdTooHigh {
                path: path.to_string(),
                threshold: self.threshold,
                children: self.child_count(),
            });
        }

        for validator in &self.validators {
            if !seen.insert(validator) {
                return Err(QuorumSetError::DuplicateValidator {
                    path: path.to_string(),
                    validator: validator.to_string(),
                });
            }
        }

        for (i, inner) in self.inner_quorum_sets.iter().enumerate() {
            inner.validate_at(&format!("{path}.inner[{i}]"), seen)?;
        }

        Ok(())
    }
}

impl<Ctx> fmt::Display for QuorumSet<Ctx>
where
    Ctx: Context,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{t: {}, v: [", self.threshold)?;

        for (i, validator) in self.validators.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{validator}")?;
        }

        write!(f, "]")?;

        if !self.inner_quorum_sets.is_empty() {
            write!(f, ", inner: [")?;
            for (i, inner) in self.inner_quorum_sets.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{inner}")?;
            }
            write!(f, "]")?;
        }

        write!(f, "}}")
    }
}

/// A quorum set that can never be used as intended.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum QuorumSetError {
    #[error("quorum set at {path} has threshold {threshold} but only {children} children")]
    ThresholdTooHigh {
        path: String,
        threshold: usize,
        children: usize,
    },

    #[error("validator {validator} appears more than once, again at {path}")]
    DuplicateValidator { path: String, validator: String },
}
