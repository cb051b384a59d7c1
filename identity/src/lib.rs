// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Cluster Identity: Core Library
//!
//! Every peer in a private cluster needs to know three things about itself
//! before it can say hello to anyone: who it is (a libp2p peer ID), how to
//! prove it (a private key), and which private network it belongs to (a
//! 32-byte cluster secret). It also gets a peername, because humans are bad
//! at reading base58.
//!
//! This crate generates that material, writes it to `identity.json`, reads
//! it back, and lets `CLUSTER_*` environment variables override any of it.
//! It does not open sockets, rotate keys or enforce the private network at
//! the transport layer. It just makes sure whatever reaches the transport is
//! well-formed.
//!
//! ## Architecture
//!
//! - **crypto**: Key pairs, peer IDs and cluster secrets, via libp2p.
//! - **identity**: The `Identity` entity: generation, JSON codec,
//!   environment overlay, file persistence.
//! - **config**: Constants and the environment variable mapping.
//! - **error**: One error enum for the whole crate.
//!
//! ## Quick start
//!
//! ```no_run
//! use cluster_identity::Identity;
//!
//! let identity = Identity::load_or_generate("identity.json")?;
//! println!("I am {}", identity.peer_id()?);
//! # Ok::<(), cluster_identity::IdentityError>(())
//! ```

pub mod config;
pub mod crypto;
pub mod error;
pub mod identity;

pub use crypto::{ClusterSecret, KeyAlgorithm};
pub use error::{ErrorKind, IdentityError, Result};
pub use identity::store::clean;
pub use identity::{Identity, IdentityDocument};
