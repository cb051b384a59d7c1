//! # Key Management
//!
//! Key pair generation, canonical byte encoding, and peer ID derivation for
//! cluster identities.
//!
//! The actual math lives in `libp2p::identity`. This module is the narrow
//! waist the rest of the crate talks through: nothing outside `crypto`
//! touches libp2p key internals, and nothing outside this file knows the
//! key encoding is protobuf.
//!
//! ## Security considerations
//!
//! - Key generation uses the OS RNG via libp2p. If your OS RNG is broken,
//!   a cluster identity is the least of your worries.
//! - Key bytes are never logged. The peer ID is public and fine to print.

use std::fmt;
use std::str::FromStr;

use libp2p::identity::{Keypair, PublicKey};
use libp2p::PeerId;
use thiserror::Error;

/// Errors that can occur during key operations.
///
/// Deliberately terse about key contents: an error message is a log line,
/// and log lines end up in places private keys should not.
#[derive(Debug, Error)]
pub enum KeyError {
    #[error("peer ID is empty")]
    EmptyPeerId,

    #[error("invalid peer ID: {0}")]
    InvalidPeerId(String),

    #[error("invalid private key bytes: {0}")]
    InvalidPrivateKey(String),

    #[error("private key could not be encoded: {0}")]
    EncodeFailed(String),
}

/// Asymmetric key algorithms a cluster identity can be generated with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAlgorithm {
    /// Ed25519. The default, and what every libp2p peer speaks.
    Ed25519,
    /// Secp256k1, for clusters that share keys with Ethereum-style tooling.
    Secp256k1,
    /// ECDSA over NIST P-256.
    Ecdsa,
}

impl KeyAlgorithm {
    /// Lower-case name, as accepted by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            KeyAlgorithm::Ed25519 => "ed25519",
            KeyAlgorithm::Secp256k1 => "secp256k1",
            KeyAlgorithm::Ecdsa => "ecdsa",
        }
    }
}

impl fmt::Display for KeyAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeyAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ed25519" => Ok(KeyAlgorithm::Ed25519),
            "secp256k1" => Ok(KeyAlgorithm::Secp256k1),
            "ecdsa" | "p256" => Ok(KeyAlgorithm::Ecdsa),
            other => Err(format!(
                "unknown key algorithm '{}' (expected ed25519, secp256k1 or ecdsa)",
                other
            )),
        }
    }
}

/// Generate a fresh key pair for the given algorithm.
pub fn generate_keypair(algorithm: KeyAlgorithm) -> Keypair {
    match algorithm {
        KeyAlgorithm::Ed25519 => Keypair::generate_ed25519(),
        KeyAlgorithm::Secp256k1 => Keypair::generate_secp256k1(),
        KeyAlgorithm::Ecdsa => Keypair::generate_ecdsa(),
    }
}

/// Canonical byte encoding of a private key (libp2p protobuf form).
///
/// The encoding carries the key type, so [`private_key_from_bytes`] can
/// restore any supported algorithm without being told which one it is.
/// RSA keys have no encoding and always fail with [`KeyError::EncodeFailed`].
pub fn private_key_to_bytes(keypair: &Keypair) -> Result<Vec<u8>, KeyError> {
    keypair
        .to_protobuf_encoding()
        .map_err(|e| KeyError::EncodeFailed(e.to_string()))
}

/// Parse a private key from its canonical byte encoding.
///
/// Accepts every algorithm [`KeyAlgorithm`] can generate, plus RSA keys
/// (PKCS#1 inside the protobuf wrapper) from older identity files.
pub fn private_key_from_bytes(bytes: &[u8]) -> Result<Keypair, KeyError> {
    Keypair::from_protobuf_encoding(bytes).map_err(|e| KeyError::InvalidPrivateKey(e.to_string()))
}

/// Derive the peer ID for a public key.
pub fn peer_id_from_public_key(public_key: &PublicKey) -> PeerId {
    PeerId::from_public_key(public_key)
}

/// Parse the base58 string form of a peer ID.
pub fn parse_peer_id(s: &str) -> Result<PeerId, KeyError> {
    if s.is_empty() {
        return Err(KeyError::EmptyPeerId);
    }
    PeerId::from_str(s).map_err(|e| KeyError::InvalidPeerId(e.to_string()))
}

/// Human-readable name of a key pair's algorithm, for display.
pub fn key_type_name(keypair: &Keypair) -> String {
    format!("{:?}", keypair.key_type())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_each_algorithm() {
        for algorithm in [
            KeyAlgorithm::Ed25519,
            KeyAlgorithm::Secp256k1,
            KeyAlgorithm::Ecdsa,
        ] {
            let kp = generate_keypair(algorithm);
            let bytes = private_key_to_bytes(&kp).unwrap();
            assert!(!bytes.is_empty(), "{} produced empty key bytes", algorithm);
        }
    }

    #[test]
    fn test_private_key_bytes_roundtrip() {
        let kp = generate_keypair(KeyAlgorithm::Ed25519);
        let bytes = private_key_to_bytes(&kp).unwrap();
        let restored = private_key_from_bytes(&bytes).unwrap();

        assert_eq!(kp.public(), restored.public());
        assert_eq!(bytes, private_key_to_bytes(&restored).unwrap());
    }

    #[test]
    fn test_roundtrip_preserves_algorithm() {
        let kp = generate_keypair(KeyAlgorithm::Secp256k1);
        let restored = private_key_from_bytes(&private_key_to_bytes(&kp).unwrap()).unwrap();
        assert_eq!(key_type_name(&kp), key_type_name(&restored));
        assert_eq!(key_type_name(&restored), "Secp256k1");
    }

    #[test]
    fn test_garbage_key_bytes_rejected() {
        assert!(matches!(
            private_key_from_bytes(b"definitely not protobuf"),
            Err(KeyError::InvalidPrivateKey(_))
        ));
        assert!(private_key_from_bytes(&[]).is_err());
    }

    #[test]
    fn test_rsa_key_decodes_but_does_not_encode() {
        use base64::{engine::general_purpose::STANDARD as B64, Engine};

        let doc: serde_json::Value =
            serde_json::from_str(crate::identity::RSA_IDENTITY_JSON).unwrap();
        let bytes = B64.decode(doc["private_key"].as_str().unwrap()).unwrap();

        let kp = private_key_from_bytes(&bytes).unwrap();
        assert_eq!(key_type_name(&kp), "RSA");
        assert_eq!(
            peer_id_from_public_key(&kp.public()).to_base58(),
            doc["id"].as_str().unwrap()
        );
        assert!(matches!(
            private_key_to_bytes(&kp),
            Err(KeyError::EncodeFailed(_))
        ));
    }

    #[test]
    fn test_peer_id_is_deterministic() {
        let kp = generate_keypair(KeyAlgorithm::Ed25519);
        let a = peer_id_from_public_key(&kp.public());
        let b = peer_id_from_public_key(&kp.public());
        assert_eq!(a, b);
    }

    #[test]
    fn test_peer_id_string_roundtrip() {
        let kp = generate_keypair(KeyAlgorithm::Ed25519);
        let pid = peer_id_from_public_key(&kp.public());
        assert_eq!(parse_peer_id(&pid.to_base58()).unwrap(), pid);
    }

    #[test]
    fn test_invalid_peer_ids_rejected() {
        assert!(matches!(parse_peer_id(""), Err(KeyError::EmptyPeerId)));
        assert!(matches!(
            parse_peer_id("not-a-valid-id"),
            Err(KeyError::InvalidPeerId(_))
        ));
    }

    #[test]
    fn test_key_algorithm_parsing() {
        assert_eq!("ed25519".parse::<KeyAlgorithm>(), Ok(KeyAlgorithm::Ed25519));
        assert_eq!("SECP256K1".parse::<KeyAlgorithm>(), Ok(KeyAlgorithm::Secp256k1));
        assert_eq!("p256".parse::<KeyAlgorithm>(), Ok(KeyAlgorithm::Ecdsa));
        assert!("rsa".parse::<KeyAlgorithm>().is_err());
    }

    #[test]
    fn test_key_algorithm_display_roundtrip() {
        let alg = KeyAlgorithm::Ecdsa;
        assert_eq!(alg.to_string().parse::<KeyAlgorithm>(), Ok(alg));
    }
}
