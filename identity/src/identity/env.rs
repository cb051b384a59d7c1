//! # Environment Overlay
//!
//! Lets operators override identity fields with `CLUSTER_*` environment
//! variables (see [`EnvField`] for the exact names). Handy for containers,
//! where baking a secret into an image is worse than passing it at runtime.
//!
//! Overrides are applied to the *document* form of the identity, and the
//! result goes through the normal decode path. So a bad `CLUSTER_SECRET`
//! fails exactly like a bad `"secret"` in the file would, with the same
//! error, and there is only one place that enforces the rules.

use tracing::debug;

use super::codec::IdentityDocument;
use super::Identity;
use crate::config::EnvField;
use crate::error::Result;

impl IdentityDocument {
    /// Mutable access to the text of one field.
    fn field_mut(&mut self, field: EnvField) -> &mut String {
        match field {
            EnvField::Id => &mut self.id,
            EnvField::Peername => &mut self.peername,
            EnvField::PrivateKey => &mut self.private_key,
            EnvField::Secret => &mut self.secret,
        }
    }

    /// Replace fields whose variable is set to a non-empty value.
    ///
    /// Returns the fields that were overridden.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Vec<EnvField>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut applied = Vec::new();
        for field in EnvField::ALL {
            match lookup(field.var_name()) {
                Some(value) if !value.is_empty() => {
                    *self.field_mut(field) = value;
                    applied.push(field);
                }
                _ => {}
            }
        }
        applied
    }
}

impl Identity {
    /// Override fields from the process environment.
    pub fn apply_env_vars(&mut self) -> Result<()> {
        self.apply_env_with(|name| std::env::var(name).ok())
    }

    /// Override fields using an arbitrary variable lookup.
    ///
    /// All-or-nothing: if the overridden identity fails to decode or
    /// validate, `self` is left exactly as it was.
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut doc = self.to_document()?;
        let applied = doc.apply_overrides(lookup);

        let mut updated = self.clone();
        updated.apply_document(doc)?;
        *self = updated;

        if !applied.is_empty() {
            let names: Vec<&str> = applied.iter().map(|f| f.var_name()).collect();
            debug!(overrides = ?names, "applied identity environment overrides");
        }
        Ok(())
    }
}
