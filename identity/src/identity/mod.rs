//! # Identity Module
//!
//! The durable identity of a cluster peer: who it is (peer ID), how it
//! proves it (private key), what humans call it (peername) and which private
//! network it belongs to (cluster secret).
//!
//! The identity stack is layered:
//!
//! 1. **Generator**: [`Identity::generate`] mints fresh material.
//! 2. **Codec**: [`codec`] turns an identity into the `identity.json`
//!    document and back, validating on the way in.
//! 3. **Overlay**: [`env`] applies `CLUSTER_*` environment overrides by
//!    routing them through the same decode path as the file.
//! 4. **Store**: [`store`] reads, writes and removes the file.
//!
//! ## Design Decisions
//!
//! - Fields are `Option`s so that "loaded but incomplete" is representable
//!   and [`validate`](Identity::validate) has something to say. Every
//!   constructor in this crate returns a validated identity.
//! - The secret is `Option<ClusterSecret>`: `None` is the empty secret
//!   (unprotected network), and a secret of any other length than 32 bytes
//!   cannot be built.

pub mod codec;
pub mod env;
pub mod store;

use std::fmt;

use libp2p::identity::Keypair;
use libp2p::PeerId;
use tracing::{debug, info};

use crate::config::DEFAULT_KEY_ALGORITHM;
use crate::crypto::{self, ClusterSecret, KeyAlgorithm};
use crate::error::{IdentityError, Result};

pub use codec::IdentityDocument;

/// A cluster peer's identity.
#[derive(Clone, Default)]
pub struct Identity {
    /// Peer ID, derived from the public half of `private_key`.
    pub id: Option<PeerId>,

    /// Key pair used to authenticate this peer on the network.
    pub private_key: Option<Keypair>,

    /// Human-readable name. Defaults to the local hostname.
    pub peername: String,

    /// Private-network secret. `None` means the cluster runs unprotected.
    pub secret: Option<ClusterSecret>,
}

impl Identity {
    /// Generate a fresh identity with the default key algorithm.
    ///
    /// The result is valid by construction: it has a peer ID, a private key
    /// and a 32-byte secret.
    pub fn generate() -> Result<Self> {
        Self::generate_with(DEFAULT_KEY_ALGORITHM)
    }

    /// Generate a fresh identity with a specific key algorithm.
    pub fn generate_with(algorithm: KeyAlgorithm) -> Result<Self> {
        let peername = local_hostname();

        let keypair = crypto::generate_keypair(algorithm);
        let id = crypto::peer_id_from_public_key(&keypair.public());

        let secret = crypto::generate_secret()
            .map_err(|e| IdentityError::Generation(format!("cluster secret: {}", e)))?;

        info!(
            peer_id = %id,
            peername = %peername,
            key_algorithm = %algorithm,
            "generated new cluster identity"
        );

        Ok(Self {
            id: Some(id),
            private_key: Some(keypair),
            peername,
            secret: Some(secret),
        })
    }

    /// Check that this identity has the fields a working peer needs.
    ///
    /// Fails on a missing peer ID first, then on a missing private key.
    /// The secret and peername are not inspected: the secret length rule is
    /// enforced when the secret is decoded, and any peername is fine.
    pub fn validate(&self) -> Result<()> {
        if self.id.is_none() {
            return Err(IdentityError::MissingId);
        }
        if self.private_key.is_none() {
            return Err(IdentityError::MissingPrivateKey);
        }
        Ok(())
    }

    /// Whether the peer ID is the one derived from the private key.
    ///
    /// Not part of [`validate`](Self::validate): a hand-edited file or a
    /// stray `CLUSTER_ID` can pair a key with someone else's ID, and callers
    /// decide whether that is fatal.
    pub fn key_matches_id(&self) -> bool {
        match (&self.id, &self.private_key) {
            (Some(id), Some(key)) => crypto::peer_id_from_public_key(&key.public()) == *id,
            _ => false,
        }
    }

    /// The peer ID, or [`IdentityError::MissingId`].
    pub fn peer_id(&self) -> Result<PeerId> {
        self.id.ok_or(IdentityError::MissingId)
    }

    /// The private key, or [`IdentityError::MissingPrivateKey`].
    pub fn keypair(&self) -> Result<&Keypair> {
        self.private_key
            .as_ref()
            .ok_or(IdentityError::MissingPrivateKey)
    }

    /// Whether this identity belongs to a private network.
    pub fn is_protected(&self) -> bool {
        self.secret.is_some()
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print key material. The secret's Debug only shows its
        // fingerprint, and the key pair is reduced to its algorithm.
        f.debug_struct("Identity")
            .field("id", &self.id)
            .field("peername", &self.peername)
            .field(
                "private_key",
                &self.private_key.as_ref().map(crypto::key_type_name),
            )
            .field("secret", &self.secret)
            .finish()
    }
}

/// An `identity.json` holding an RSA-2048 key, as written by older peers.
#[cfg(test)]
pub(crate) const RSA_IDENTITY_JSON: &str = include_str!("../../tests/fixtures/rsa_identity.json");

/// The local hostname, or an empty string if it cannot be determined.
pub(crate) fn local_hostname() -> String {
    match hostname::get() {
        Ok(name) => name.into_string().unwrap_or_else(|raw| {
            debug!(hostname = ?raw, "hostname is not valid UTF-8, using empty peername");
            String::new()
        }),
        Err(e) => {
            debug!(error = %e, "could not resolve hostname, using empty peername");
            String::new()
        }
    }
}
