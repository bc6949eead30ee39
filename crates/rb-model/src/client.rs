//! Client domain model.
//!
//! Clients represent the applications whose client-scoped roles the engine
//! reconciles. Only the fields this engine reads are modeled; the host
//! runtime owns the full client entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A client application within a realm.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    /// Unique identifier.
    pub id: Uuid,
    /// Realm this client belongs to.
    pub realm_id: Uuid,
    /// Human-assigned client identifier, matched case-insensitively by the
    /// client-role channel.
    pub client_id: String,
    /// Display name.
    pub name: Option<String>,
    /// Whether the client is enabled.
    pub enabled: bool,
    /// When the client was created.
    pub created_at: DateTime<Utc>,
    /// When the client was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Client {
    /// Creates a new client with the given client identifier.
    #[must_use]
    pub fn new(realm_id: Uuid, client_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            realm_id,
            client_id: client_id.into(),
            name: None,
            enabled: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Compares the client identifier case-insensitively.
    #[must_use]
    pub fn client_id_matches(&self, client_id: &str) -> bool {
        self.client_id.to_lowercase() == client_id.to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_id_comparison_is_case_insensitive() {
        let client = Client::new(Uuid::now_v7(), "Engineering");

        assert!(client.client_id_matches("engineering"));
        assert!(client.client_id_matches("ENGINEERING"));
        assert!(!client.client_id_matches("marketing"));
    }
}
