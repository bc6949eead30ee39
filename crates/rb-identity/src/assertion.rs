//! Assertion payload for assertion-based federation events.
//!
//! Only the parts of an assertion this engine reads are modeled: attribute
//! statements carrying named, multi-valued attributes. Parsing, signature
//! validation, and the rest of the assertion are the host runtime's job.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A named, multi-valued attribute within an attribute statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssertionAttribute {
    /// The formal attribute name (typically a URI).
    pub name: String,

    /// A human-readable name for the attribute.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub friendly_name: Option<String>,

    /// The attribute values.
    pub values: Vec<String>,
}

impl AssertionAttribute {
    /// Creates a new attribute with a single value.
    #[must_use]
    pub fn single(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            friendly_name: None,
            values: vec![value.into()],
        }
    }

    /// Creates a new attribute with multiple values.
    #[must_use]
    pub fn multi(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into(),
            friendly_name: None,
            values,
        }
    }

    /// Sets the friendly name.
    #[must_use]
    pub fn with_friendly_name(mut self, name: impl Into<String>) -> Self {
        self.friendly_name = Some(name.into());
        self
    }

    /// Checks whether either name form matches the given name.
    ///
    /// Administrators may configure the friendly display name or the formal
    /// name; both are accepted.
    #[must_use]
    pub fn matches_name(&self, name: &str) -> bool {
        self.friendly_name.as_deref() == Some(name) || self.name == name
    }
}

/// An attribute statement: a group of attributes about the subject.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeStatement {
    /// The attributes in this statement.
    pub attributes: Vec<AssertionAttribute>,
}

impl AttributeStatement {
    /// Creates an empty attribute statement.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            attributes: Vec::new(),
        }
    }

    /// Adds an attribute.
    #[must_use]
    pub fn with_attribute(mut self, attr: AssertionAttribute) -> Self {
        self.attributes.push(attr);
        self
    }

    /// Creates an attribute statement from a name-to-values map.
    #[must_use]
    pub fn from_map(attrs: HashMap<String, Vec<String>>) -> Self {
        let attributes = attrs
            .into_iter()
            .map(|(name, values)| AssertionAttribute {
                name,
                friendly_name: None,
                values,
            })
            .collect();
        Self { attributes }
    }
}

/// The assertion produced by an assertion-based identity provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assertion {
    /// The entity that issued this assertion.
    pub issuer: String,

    /// Attribute statements about the subject.
    pub attribute_statements: Vec<AttributeStatement>,
}

impl Assertion {
    /// Creates a new assertion with no attribute statements.
    #[must_use]
    pub fn new(issuer: impl Into<String>) -> Self {
        Self {
            issuer: issuer.into(),
            attribute_statements: Vec::new(),
        }
    }

    /// Adds an attribute statement.
    #[must_use]
    pub fn with_statement(mut self, statement: AttributeStatement) -> Self {
        self.attribute_statements.push(statement);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_matches_either_name_form() {
        let attr = AssertionAttribute::single("urn:oid:1.3.6.1.4.1.5923.1.1.1.7", "x")
            .with_friendly_name("eduPersonEntitlement");

        assert!(attr.matches_name("eduPersonEntitlement"));
        assert!(attr.matches_name("urn:oid:1.3.6.1.4.1.5923.1.1.1.7"));
        assert!(!attr.matches_name("memberOf"));
    }

    #[test]
    fn statement_from_map() {
        let mut map = HashMap::new();
        map.insert("memberOf".to_string(), vec!["a".to_string(), "b".to_string()]);
        let statement = AttributeStatement::from_map(map);

        assert_eq!(statement.attributes.len(), 1);
        assert_eq!(statement.attributes[0].values.len(), 2);
    }
}
