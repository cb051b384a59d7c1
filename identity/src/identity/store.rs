//! # Identity Persistence
//!
//! Reads and writes `identity.json`. Writes are a single blocking write
//! with owner-only permissions; there is no write-to-temp-and-rename dance,
//! so a crash mid-write can leave a truncated file behind. Removal is
//! best-effort.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use tracing::{debug, error, info};

use super::Identity;
use crate::error::{IdentityError, Result};

impl Identity {
    /// Save the JSON form of this identity to `path`.
    ///
    /// On Unix the file is created with mode `0o600`, and an existing file
    /// has its permissions tightened to match.
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        info!(path = %path.display(), "saving identity");

        let bytes = self.to_json()?;
        let io_err = |source| IdentityError::Io {
            path: path.to_path_buf(),
            source,
        };

        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(crate::config::IDENTITY_FILE_MODE);
        }

        let mut file = options.open(path).map_err(io_err)?;
        file.write_all(&bytes).map_err(io_err)?;

        // `mode` only applies when the file is created.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(
                path,
                fs::Permissions::from_mode(crate::config::IDENTITY_FILE_MODE),
            )
            .map_err(io_err)?;
        }

        Ok(())
    }

    /// Read and decode an identity file.
    pub fn load_json_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read(path).map_err(|source| {
            error!(path = %path.display(), error = %source, "error reading the identity file");
            IdentityError::Io {
                path: path.to_path_buf(),
                source,
            }
        })?;
        Self::from_json(&raw)
    }

    /// Read an identity file, then apply `CLUSTER_*` environment overrides.
    pub fn load_json_file_and_env(path: impl AsRef<Path>) -> Result<Self> {
        let mut identity = Self::load_json_from_file(path)?;
        identity.apply_env_vars()?;
        Ok(identity)
    }

    /// Load the identity at `path`, or generate and save one if the file
    /// does not exist yet.
    ///
    /// Only a missing file leads to generation. An existing but unreadable
    /// or invalid file is an error, never a reason to silently mint a new
    /// identity.
    pub fn load_or_generate(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match fs::read(path) {
            Ok(raw) => {
                debug!(path = %path.display(), "found existing identity");
                Self::from_json(&raw)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!(path = %path.display(), "no identity found, generating a new one");
                let identity = Self::generate()?;
                identity.save_json(path)?;
                Ok(identity)
            }
            Err(source) => {
                error!(path = %path.display(), error = %source, "error reading the identity file");
                Err(IdentityError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        }
    }
}

/// Remove the identity file at `path`. Best-effort: failures, including a
/// missing file, are logged at debug level and otherwise ignored.
pub fn clean(path: impl AsRef<Path>) {
    let path = path.as_ref();
    if let Err(e) = fs::remove_file(path) {
        debug!(path = %path.display(), error = %e, "could not remove identity file");
    }
}
