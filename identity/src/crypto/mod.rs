//! # Cryptographic Collaborators
//!
//! Thin, type-safe wrappers around the primitives a cluster identity needs:
//!
//! - **keys**: key pair generation, canonical key bytes, peer ID derivation
//!   and parsing (all via `libp2p::identity`).
//! - **secret**: the 32-byte private-network secret, its hex codec and
//!   the `libp2p::pnet` pre-shared key it turns into.
//!
//! We don't roll our own anything here. If a function in this module grows
//! past a handful of lines, it is probably doing something it shouldn't.

pub mod keys;
pub mod secret;

pub use keys::{
    generate_keypair, key_type_name, parse_peer_id, peer_id_from_public_key,
    private_key_from_bytes, private_key_to_bytes, KeyAlgorithm, KeyError,
};
pub use secret::{decode_secret, encode_secret, generate_secret, ClusterSecret, SecretError};
