//! # Identity Configuration & Constants
//!
//! Every magic number the identity layer depends on lives here. The
//! environment variable names in particular are part of the operator-facing
//! contract: renaming one silently breaks every deployment that sets it.

use crate::crypto::keys::KeyAlgorithm;

// ---------------------------------------------------------------------------
// Cryptographic Parameters
// ---------------------------------------------------------------------------

/// Key algorithm used when generating a fresh identity.
///
/// Ed25519: small keys, fast signatures, and the default for libp2p peers.
pub const DEFAULT_KEY_ALGORITHM: KeyAlgorithm = KeyAlgorithm::Ed25519;

/// Cluster secret length in bytes. This is the libp2p private-network
/// pre-shared key size, so it is not negotiable.
pub const SECRET_LENGTH: usize = 32;

// ---------------------------------------------------------------------------
// Persistence
// ---------------------------------------------------------------------------

/// Conventional file name for a persisted identity.
pub const DEFAULT_IDENTITY_FILE: &str = "identity.json";

/// Unix permission bits for the identity file. Owner read/write only: the
/// file holds a private key in the clear.
pub const IDENTITY_FILE_MODE: u32 = 0o600;

/// Indentation used when pretty-printing the identity document.
pub const JSON_INDENT: &[u8] = b"    ";

// ---------------------------------------------------------------------------
// Environment Overrides
// ---------------------------------------------------------------------------

/// Prefix shared by every identity environment variable.
pub const ENV_PREFIX: &str = "CLUSTER";

/// Overrides the peer ID.
pub const ENV_ID: &str = "CLUSTER_ID";

/// Overrides the human-readable peer name.
pub const ENV_PEERNAME: &str = "CLUSTER_PEERNAME";

/// Overrides the base64 private key.
pub const ENV_PRIVATE_KEY: &str = "CLUSTER_PRIVATE_KEY";

/// Overrides the hex cluster secret.
pub const ENV_SECRET: &str = "CLUSTER_SECRET";

/// A field of the persisted identity document that can be overridden from
/// the environment.
///
/// The mapping to variable names is spelled out explicitly rather than
/// derived from field names, so grepping for `CLUSTER_SECRET` finds it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnvField {
    Id,
    Peername,
    PrivateKey,
    Secret,
}

impl EnvField {
    /// Every overridable field, in document order.
    pub const ALL: [EnvField; 4] = [
        EnvField::Id,
        EnvField::Peername,
        EnvField::PrivateKey,
        EnvField::Secret,
    ];

    /// The environment variable that overrides this field.
    pub fn var_name(self) -> &'static str {
        match self {
            EnvField::Id => ENV_ID,
            EnvField::Peername => ENV_PEERNAME,
            EnvField::PrivateKey => ENV_PRIVATE_KEY,
            EnvField::Secret => ENV_SECRET,
        }
    }

    /// The JSON key of this field in the persisted document.
    pub fn json_key(self) -> &'static str {
        match self {
            EnvField::Id => "id",
            EnvField::Peername => "peername",
            EnvField::PrivateKey => "private_key",
            EnvField::Secret => "secret",
        }
    }
}
