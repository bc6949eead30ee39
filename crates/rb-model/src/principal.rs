//! Principal domain model.
//!
//! A principal is the federated user whose role assignments are reconciled.
//! Role assignments themselves live behind the [`RoleAssignments`] seam, not
//! on this struct: they are owned by the host runtime and the engine only
//! reads a snapshot per event.
//!
//! [`RoleAssignments`]: crate::universe::RoleAssignments

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A federated user identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Principal {
    /// Unique identifier.
    pub id: Uuid,
    /// Realm this principal belongs to.
    pub realm_id: Uuid,
    /// Unique username within the realm.
    pub username: String,
    /// Whether the account is enabled.
    pub enabled: bool,
    /// Alias of the identity provider this principal was brokered from.
    pub federation_link: Option<String>,
    /// When the principal was created.
    pub created_at: DateTime<Utc>,
    /// When the principal was last updated.
    pub updated_at: DateTime<Utc>,
    /// Custom principal attributes.
    pub attributes: HashMap<String, Vec<String>>,
}

impl Principal {
    /// Creates a new principal with the given username.
    #[must_use]
    pub fn new(realm_id: Uuid, username: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            realm_id,
            username: username.into(),
            enabled: true,
            federation_link: None,
            created_at: now,
            updated_at: now,
            attributes: HashMap::new(),
        }
    }

    /// Sets the identity-provider alias this principal was brokered from.
    #[must_use]
    pub fn with_federation_link(mut self, alias: impl Into<String>) -> Self {
        self.federation_link = Some(alias.into());
        self
    }

    /// Sets an attribute value.
    pub fn set_attribute(&mut self, name: impl Into<String>, values: Vec<String>) {
        self.attributes.insert(name.into(), values);
    }

    /// Gets the first value of an attribute.
    #[must_use]
    pub fn get_first_attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .get(name)
            .and_then(|v| v.first())
            .map(String::as_str)
    }

    /// Checks if this principal was brokered from an external provider.
    #[must_use]
    pub const fn is_federated(&self) -> bool {
        self.federation_link.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn federation_link() {
        let principal = Principal::new(Uuid::now_v7(), "jdoe").with_federation_link("corp-idp");

        assert!(principal.is_federated());
        assert_eq!(principal.federation_link.as_deref(), Some("corp-idp"));
    }
}
