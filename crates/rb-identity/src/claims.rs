//! Claim set carried by claims-based federation events.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The claims asserted about a subject by a claims-based identity provider.
///
/// Claim values are arbitrary JSON; list-valued claims are the shape the
/// role channels consume.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClaimSet {
    claims: HashMap<String, Value>,
}

impl ClaimSet {
    /// Creates an empty claim set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a claim.
    #[must_use]
    pub fn with_claim(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.claims.insert(name.into(), value.into());
        self
    }

    /// Gets a claim value by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.claims.get(name)
    }

    /// Whether the set contains no claims.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }
}

impl From<HashMap<String, Value>> for ClaimSet {
    fn from(claims: HashMap<String, Value>) -> Self {
        Self { claims }
    }
}
