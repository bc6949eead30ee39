//! Role domain model.
//!
//! Roles are the unit of authorization this engine reconciles. They can be
//! realm-level (apply across the realm) or client-level (specific to one
//! client application), and carry string-keyed multi-valued attributes.
//! The engine uses attribute *presence* to decide which roles it is allowed
//! to touch (the marker attribute).

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An authorization role.
///
/// Roles are owned by the host identity runtime; this crate only reads them
/// and assigns or unassigns them to principals. Identity for set arithmetic
/// is [`Role::id`], never the name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Role {
    // === Identity ===
    /// Unique identifier.
    pub id: Uuid,
    /// Role name (unique within realm or client).
    pub name: String,
    /// Role description.
    pub description: Option<String>,

    // === Scope ===
    /// Realm this role belongs to.
    pub realm_id: Uuid,
    /// Client this role belongs to (None for realm roles).
    pub client_id: Option<Uuid>,

    // === Timestamps ===
    /// When the role was created.
    pub created_at: DateTime<Utc>,
    /// When the role was last updated.
    pub updated_at: DateTime<Utc>,

    // === Custom Attributes ===
    /// Custom role attributes (multi-valued).
    pub attributes: HashMap<String, Vec<String>>,
}

impl Role {
    /// Creates a new realm role.
    #[must_use]
    pub fn new_realm_role(realm_id: Uuid, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: name.into(),
            description: None,
            realm_id,
            client_id: None,
            created_at: now,
            updated_at: now,
            attributes: HashMap::new(),
        }
    }

    /// Creates a new client role.
    #[must_use]
    pub fn new_client_role(realm_id: Uuid, client_id: Uuid, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: name.into(),
            description: None,
            realm_id,
            client_id: Some(client_id),
            created_at: now,
            updated_at: now,
            attributes: HashMap::new(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    /// Adds an attribute.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, values: Vec<String>) -> Self {
        self.attributes.insert(name.into(), values);
        self
    }

    /// Adds a marker attribute with no meaningful value.
    ///
    /// Attribute presence, not value, is what scopes a role into a
    /// reconciliation channel.
    #[must_use]
    pub fn with_marker(self, name: impl Into<String>) -> Self {
        self.with_attribute(name, Vec::new())
    }

    /// Checks if this is a realm role.
    #[must_use]
    pub const fn is_realm_role(&self) -> bool {
        self.client_id.is_none()
    }

    /// Checks if this is a client role.
    #[must_use]
    pub const fn is_client_role(&self) -> bool {
        self.client_id.is_some()
    }

    /// Checks whether the role carries an attribute with the given name.
    ///
    /// The attribute's values are irrelevant.
    #[must_use]
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Compares the role name case-insensitively.
    #[must_use]
    pub fn name_matches(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn realm_role_creation() {
        let realm_id = Uuid::now_v7();
        let role = Role::new_realm_role(realm_id, "admin");

        assert_eq!(role.name, "admin");
        assert!(role.is_realm_role());
        assert!(!role.is_client_role());
    }

    #[test]
    fn client_role_creation() {
        let realm_id = Uuid::now_v7();
        let client_id = Uuid::now_v7();
        let role = Role::new_client_role(realm_id, client_id, "manager");

        assert!(role.is_client_role());
        assert_eq!(role.client_id, Some(client_id));
    }

    #[test]
    fn attribute_presence_ignores_values() {
        let realm_id = Uuid::now_v7();
        let role = Role::new_realm_role(realm_id, "admin").with_marker("sync");

        assert!(role.has_attribute("sync"));
        assert!(!role.has_attribute("other"));
    }

    #[test]
    fn name_comparison_is_case_insensitive() {
        let realm_id = Uuid::now_v7();
        let role = Role::new_realm_role(realm_id, "Admin");

        assert!(role.name_matches("admin"));
        assert!(role.name_matches("ADMIN"));
        assert!(!role.name_matches("administrator"));
    }
}
