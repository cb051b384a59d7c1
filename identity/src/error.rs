//! Error types for identity operations.
//!
//! Every fallible operation in this crate returns an [`IdentityError`]. Each
//! variant names the field or file it is about, so an operator reading a log
//! line knows which part of `identity.json` (or which `CLUSTER_*` variable)
//! to go fix.

use std::path::PathBuf;

use thiserror::Error;

use crate::crypto::{KeyError, SecretError};

/// Broad classification of an [`IdentityError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A crypto or randomness collaborator failed while generating material.
    Generation,
    /// Malformed document, base64, hex, peer ID or key bytes.
    Parse,
    /// Well-formed but incomplete or out-of-range identity.
    Validation,
    /// Key bytes could not be extracted while encoding.
    Encoding,
    /// Reading or writing the identity file failed.
    Io,
}

/// Errors that can occur while generating, loading, validating or saving an
/// identity.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// Fresh identity material could not be produced.
    #[error("error generating identity: {0}")]
    Generation(String),

    /// The identity document is not valid JSON of the expected shape.
    #[error("error decoding identity document: {0}")]
    Document(#[source] serde_json::Error),

    /// The `id` field is not a valid peer ID.
    #[error("error decoding cluster ID: {0}")]
    InvalidId(#[source] KeyError),

    /// The `private_key` field is not valid base64.
    #[error("error decoding private_key: {0}")]
    PrivateKeyEncoding(#[source] base64::DecodeError),

    /// The `private_key` field decoded, but the bytes are not a key.
    #[error("error parsing private_key: {0}")]
    PrivateKeyContents(#[source] KeyError),

    /// The `secret` field is malformed or the wrong length.
    #[error("error loading cluster secret: {0}")]
    Secret(#[source] SecretError),

    /// Validation: no peer ID.
    #[error("cluster ID not set")]
    MissingId,

    /// Validation: no private key.
    #[error("no cluster private_key set")]
    MissingPrivateKey,

    /// The identity could not be turned into its persisted form.
    #[error("error encoding identity: {0}")]
    Encoding(String),

    /// Reading or writing the identity file failed.
    #[error("identity file {}: {source}", .path.display())]
    Io {
        /// File the operation was about.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl IdentityError {
    /// Which part of the error taxonomy this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            IdentityError::Generation(_) => ErrorKind::Generation,
            IdentityError::Document(_)
            | IdentityError::InvalidId(_)
            | IdentityError::PrivateKeyEncoding(_)
            | IdentityError::PrivateKeyContents(_) => ErrorKind::Parse,
            IdentityError::Secret(SecretError::InvalidHex(_)) => ErrorKind::Parse,
            IdentityError::Secret(SecretError::InvalidLength { .. }) => ErrorKind::Validation,
            IdentityError::MissingId | IdentityError::MissingPrivateKey => ErrorKind::Validation,
            IdentityError::Encoding(_) => ErrorKind::Encoding,
            IdentityError::Io { .. } => ErrorKind::Io,
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, IdentityError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_errors_split_by_kind() {
        let bad_hex = IdentityError::Secret(SecretError::InvalidHex(
            hex::FromHexError::OddLength,
        ));
        let bad_len = IdentityError::Secret(SecretError::InvalidLength {
            got: 1,
            expected: 32,
        });
        assert_eq!(bad_hex.kind(), ErrorKind::Parse);
        assert_eq!(bad_len.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_messages_name_the_field() {
        assert!(IdentityError::MissingId.to_string().contains("ID"));
        assert!(IdentityError::MissingPrivateKey
            .to_string()
            .contains("private_key"));
        let err = IdentityError::InvalidId(KeyError::EmptyPeerId);
        assert!(err.to_string().starts_with("error decoding cluster ID"));
    }

    #[test]
    fn test_io_error_includes_path() {
        let err = IdentityError::Io {
            path: PathBuf::from("/tmp/identity.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert_eq!(err.kind(), ErrorKind::Io);
        assert!(err.to_string().contains("/tmp/identity.json"));
    }
}
