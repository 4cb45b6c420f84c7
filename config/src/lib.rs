//! Node configuration file
//!
//! A node is configured with its public key, its quorum set and the quorum sets
//! it already knows of its peers, all read from a TOML file:
//!
//! ```toml
//! public_key = "A"
//!
//! [quorum_set]
//! threshold = 2
//! validators = ["A", "B", "C"]
//!
//! [peers.B]
//! threshold = 1
//! validators = ["C"]
//! ```

#![forbid(unsafe_code)]
#![deny(unused_crate_dependencies, trivial_casts, trivial_numeric_casts)]
#![warn(
    // missing_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::private_intra_doc_links,
    variant_size_differences
)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::panic))]

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use derive_where::derive_where;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use fedvote_common::{Context, QuorumSet, QuorumSetError};
use fedvote_engine::{FederatedVoteEngine, StatementValidator};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid quorum set for node {node}: {source}")]
    InvalidQuorumSet {
        node: String,
        source: QuorumSetError,
    },
}

/// Configuration of a single node.
#[derive_where(Clone, Debug, PartialEq, Eq)]
#[derive(Serialize, Deserialize)]
#[serde(bound(
    serialize = "Ctx::PublicKey: Serialize",
    deserialize = "Ctx::PublicKey: Deserialize<'de>"
))]
pub struct NodeConfig<Ctx>
where
    Ctx: Context,
{
    pub public_key: Ctx::PublicKey,

    pub quorum_set: QuorumSet<Ctx>,

    /// Quorum sets of peers known before any vote from them is seen
    #[serde(default)]
    pub peers: BTreeMap<Ctx::PublicKey, QuorumSet<Ctx>>,
}

impl<Ctx> NodeConfig<Ctx>
where
    Ctx: Context,
{
    pub fn new(public_key: Ctx::PublicKey, quorum_set: QuorumSet<Ctx>) -> Self {
        Self {
            public_key,
            quorum_set,
            peers: BTreeMap::new(),
        }
    }

    pub fn with_peer(mut self, peer: Ctx::PublicKey, quorum_set: QuorumSet<Ctx>) -> Self {
        self.peers.insert(peer, quorum_set);
        self
    }

    /// Check the node's quorum set and every known peer quorum set.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let own = core::iter::once((&self.public_key, &self.quorum_set));

        for (node, quorum_set) in own.chain(&self.peers) {
            quorum_set
                .validate()
                .map_err(|source| ConfigError::InvalidQuorumSet {
                    node: node.to_string(),
                    source,
                })?;
        }

        Ok(())
    }

    /// Build an engine for this node, seeded with the known peer quorum sets.
    pub fn into_engine<V>(self, validator: V) -> FederatedVoteEngine<Ctx, V>
    where
        V: StatementValidator<Ctx>,
    {
        let mut engine =
            FederatedVoteEngine::with_validator(self.public_key, self.quorum_set, validator);

        for (peer, quorum_set) in self.peers {
            engine.update_peer_quorum_set(peer, quorum_set);
        }

        engine
    }
}

impl<Ctx> NodeConfig<Ctx>
where
    Ctx: Context,
    Ctx::PublicKey: Serialize + for<'de> Deserialize<'de>,
{
    /// Parse and validate a configuration.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Load and validate the configuration stored at `path`.
pub fn load_config<Ctx>(path: impl AsRef<Path>) -> Result<NodeConfig<Ctx>, ConfigError>
where
    Ctx: Context,
    Ctx::PublicKey: Serialize + for<'de> Deserialize<'de>,
{
    let path = path.as_ref();

    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let config = NodeConfig::from_toml_str(&content)?;

    debug!(
        path = %path.display(),
        public_key = %config.public_key,
        quorum_set = %config.quorum_set,
        peers = %config.peers.len(),
        "Loaded node configuration"
    );

    Ok(config)
}
