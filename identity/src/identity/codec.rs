//! # Identity Document Codec
//!
//! Converts an [`Identity`] to and from the `identity.json` document:
//!
//! ```text
//! {
//!     "id": "12D3KooW...",
//!     "peername": "node-1",
//!     "private_key": "CAESQ...",
//!     "secret": "9a3c...e1"
//! }
//! ```
//!
//! Everything is a string so the file stays hand-editable. The private key
//! is standard base64 of libp2p's protobuf key encoding; the secret is hex.
//!
//! Decoding is strict and ordered: the peer ID is parsed before anything
//! else is touched, and the result is always validated.

use base64::{engine::general_purpose::STANDARD as B64, Engine};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::error;

use super::{local_hostname, Identity};
use crate::config::JSON_INDENT;
use crate::crypto;
use crate::error::{IdentityError, Result};

/// The persisted shape of an identity.
///
/// All four keys are always written. On read, a missing or `null` key
/// counts as an empty string; for `id` and `private_key` that is then a
/// parse error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityDocument {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub peername: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub private_key: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub secret: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl IdentityDocument {
    /// Parse a document from raw JSON bytes.
    pub fn from_json(raw: &[u8]) -> Result<Self> {
        serde_json::from_slice(raw).map_err(|e| {
            error!(error = %e, "error unmarshaling identity document");
            IdentityError::Document(e)
        })
    }

    /// Pretty-printed JSON with 4-space indentation.
    pub fn to_json(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(JSON_INDENT);
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)
            .map_err(|e| IdentityError::Encoding(e.to_string()))?;
        Ok(buf)
    }
}

impl Identity {
    /// Human-friendly JSON form of this identity, as written to disk.
    pub fn to_json(&self) -> Result<Vec<u8>> {
        self.to_document()?.to_json()
    }

    /// Convert this identity into its document form.
    ///
    /// Fails with an encoding error if the identity has no peer ID or key,
    /// or if the key cannot produce its canonical bytes.
    pub fn to_document(&self) -> Result<IdentityDocument> {
        let id = self
            .id
            .ok_or_else(|| IdentityError::Encoding("cluster ID not set".to_string()))?;
        let keypair = self
            .private_key
            .as_ref()
            .ok_or_else(|| IdentityError::Encoding("no private_key set".to_string()))?;

        let key_bytes = crypto::private_key_to_bytes(keypair)
            .map_err(|e| IdentityError::Encoding(format!("private_key: {}", e)))?;

        let secret = match &self.secret {
            Some(secret) => secret.to_hex(),
            None => crypto::encode_secret(&[]),
        };

        Ok(IdentityDocument {
            id: id.to_base58(),
            peername: self.peername.clone(),
            private_key: B64.encode(key_bytes),
            secret,
        })
    }

    /// Build an identity from raw JSON, as produced by [`to_json`](Self::to_json).
    ///
    /// The peername starts out as the local hostname and is only replaced if
    /// the document carries a non-empty one.
    pub fn from_json(raw: &[u8]) -> Result<Self> {
        let doc = IdentityDocument::from_json(raw)?;
        Self::from_document(doc)
    }

    /// Build an identity from an already-parsed document.
    pub fn from_document(doc: IdentityDocument) -> Result<Self> {
        let mut identity = Identity {
            peername: local_hostname(),
            ..Identity::default()
        };
        identity.apply_document(doc)?;
        Ok(identity)
    }

    /// Apply a document's fields on top of this identity, then validate.
    ///
    /// Fields are applied in order (id, peername, private_key, secret) and
    /// the first failure stops the process. On error `self` may be partially
    /// updated; callers that need all-or-nothing work on a clone.
    pub(crate) fn apply_document(&mut self, doc: IdentityDocument) -> Result<()> {
        let id = crypto::parse_peer_id(&doc.id).map_err(IdentityError::InvalidId)?;
        self.id = Some(id);

        if !doc.peername.is_empty() {
            self.peername = doc.peername;
        }

        let key_bytes = B64
            .decode(doc.private_key.as_bytes())
            .map_err(IdentityError::PrivateKeyEncoding)?;
        let keypair =
            crypto::private_key_from_bytes(&key_bytes).map_err(IdentityError::PrivateKeyContents)?;
        self.private_key = Some(keypair);

        self.secret = crypto::decode_secret(&doc.secret).map_err(IdentityError::Secret)?;

        self.validate()
    }
}
