//! # Cluster Secret
//!
//! The 32-byte pre-shared key that fences a cluster into its own private
//! network. Peers with the same secret can talk; everyone else gets a
//! handshake that goes nowhere.
//!
//! On disk the secret is lower-case hex. An empty string is legal and means
//! "no private network", which is allowed but loudly warned about. Every
//! other length is rejected before it can reach an [`Identity`].
//!
//! [`Identity`]: crate::identity::Identity

use std::fmt;

use libp2p::pnet::PreSharedKey;
use rand::rngs::OsRng;
use rand::RngCore;
use thiserror::Error;
use tracing::warn;

use crate::config::SECRET_LENGTH;

/// Errors that can occur while decoding a cluster secret.
#[derive(Debug, Error)]
pub enum SecretError {
    /// The text is not valid hex.
    #[error("invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    /// The decoded secret has the wrong number of bytes.
    #[error("input secret is {got} bytes, cluster secret should be {expected}")]
    InvalidLength {
        /// Number of bytes actually decoded.
        got: usize,
        /// Required number of bytes.
        expected: usize,
    },
}

/// A 32-byte cluster secret.
///
/// No `Display`, and `Debug` only shows the pre-shared key fingerprint.
/// Use [`to_hex`](Self::to_hex) when you really do mean to write it out.
#[derive(Clone, PartialEq, Eq)]
pub struct ClusterSecret {
    bytes: [u8; SECRET_LENGTH],
}

impl ClusterSecret {
    /// Wrap raw secret bytes.
    pub fn from_bytes(bytes: [u8; SECRET_LENGTH]) -> Self {
        Self { bytes }
    }

    /// Build a secret from a slice, enforcing the length rule.
    pub fn try_from_slice(slice: &[u8]) -> Result<Self, SecretError> {
        let bytes: [u8; SECRET_LENGTH] =
            slice.try_into().map_err(|_| SecretError::InvalidLength {
                got: slice.len(),
                expected: SECRET_LENGTH,
            })?;
        Ok(Self { bytes })
    }

    /// Raw secret bytes.
    pub fn as_bytes(&self) -> &[u8; SECRET_LENGTH] {
        &self.bytes
    }

    /// Hex-encoded secret, 64 characters.
    pub fn to_hex(&self) -> String {
        encode_secret(&self.bytes)
    }

    /// The secret as a libp2p private-network key, ready to hand to
    /// `libp2p::pnet::PnetConfig`.
    pub fn to_pre_shared_key(&self) -> PreSharedKey {
        PreSharedKey::new(self.bytes)
    }

    /// Public fingerprint of the secret. Safe to log and compare between
    /// peers without revealing the secret itself.
    pub fn fingerprint(&self) -> String {
        self.to_pre_shared_key().fingerprint().to_string()
    }
}

impl fmt::Debug for ClusterSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClusterSecret(fingerprint={})", self.fingerprint())
    }
}

/// Generate a fresh random secret from the OS CSPRNG.
pub fn generate_secret() -> Result<ClusterSecret, rand::Error> {
    let mut bytes = [0u8; SECRET_LENGTH];
    OsRng.try_fill_bytes(&mut bytes)?;
    Ok(ClusterSecret::from_bytes(bytes))
}

/// Hex-encode secret bytes. Empty input gives an empty string.
pub fn encode_secret(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Parse a hex-encoded cluster secret.
///
/// Returns `Ok(None)` for an empty secret (unprotected network, logged at
/// warn level) and `Ok(Some(_))` for exactly 32 bytes. Anything else fails.
pub fn decode_secret(hex_secret: &str) -> Result<Option<ClusterSecret>, SecretError> {
    let secret = hex::decode(hex_secret)?;
    match secret.len() {
        0 => {
            warn!("cluster secret is empty, cluster will start on unprotected network");
            Ok(None)
        }
        SECRET_LENGTH => ClusterSecret::try_from_slice(&secret).map(Some),
        got => Err(SecretError::InvalidLength {
            got,
            expected: SECRET_LENGTH,
        }),
    }
}
