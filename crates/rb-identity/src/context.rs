//! Per-event identity context.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::assertion::Assertion;
use crate::claims::ClaimSet;

/// Everything the broker learned about a subject from one federation event.
///
/// Claims-based providers populate [`claims`]; assertion-based providers
/// populate [`assertion`]. Mappers read whichever shape their protocol
/// produces and ignore the other.
///
/// [`claims`]: BrokeredIdentity::claims
/// [`assertion`]: BrokeredIdentity::assertion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrokeredIdentity {
    /// Alias of the identity provider that produced this event.
    pub provider_alias: String,

    /// Subject identifier at the identity provider.
    pub subject: Option<String>,

    /// Claims asserted by a claims-based provider.
    #[serde(default)]
    pub claims: ClaimSet,

    /// Assertion produced by an assertion-based provider.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assertion: Option<Assertion>,
}

impl BrokeredIdentity {
    /// Creates an empty identity context for the given provider.
    #[must_use]
    pub fn new(provider_alias: impl Into<String>) -> Self {
        Self {
            provider_alias: provider_alias.into(),
            subject: None,
            claims: ClaimSet::new(),
            assertion: None,
        }
    }

    /// Sets the subject identifier.
    #[must_use]
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Adds a claim.
    #[must_use]
    pub fn with_claim(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.claims = self.claims.with_claim(name, value);
        self
    }

    /// Sets the assertion.
    #[must_use]
    pub fn with_assertion(mut self, assertion: Assertion) -> Self {
        self.assertion = Some(assertion);
        self
    }
}
