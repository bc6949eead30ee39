//! Value-extraction adapters.
//!
//! Each adapter turns a brokered identity into the flat, deduplicated set of
//! asserted strings the reconciler consumes. Both tolerate a missing or
//! empty field name and any unexpected payload shape by returning the empty
//! set rather than failing the reconciliation.

use std::collections::HashSet;

use serde_json::Value;

use crate::context::BrokeredIdentity;

/// Reads a named claim and coerces a list-valued claim into a string set.
///
/// Any other claim shape (a scalar, an object, or an absent claim) yields
/// the empty set. Non-string elements within a list are skipped.
#[must_use]
pub fn claim_values(identity: &BrokeredIdentity, field: &str) -> HashSet<String> {
    if field.is_empty() {
        return HashSet::new();
    }
    match identity.claims.get(field) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        _ => HashSet::new(),
    }
}

/// Reads a named attribute from the assertion's attribute statements.
///
/// An attribute matches when either its friendly name or its formal name
/// equals `field`; the values of every matching attribute across every
/// statement are flattened into one set. A missing assertion yields the
/// empty set.
#[must_use]
pub fn attribute_values(identity: &BrokeredIdentity, field: &str) -> HashSet<String> {
    if field.is_empty() {
        return HashSet::new();
    }
    let Some(assertion) = &identity.assertion else {
        return HashSet::new();
    };
    assertion
        .attribute_statements
        .iter()
        .flat_map(|statement| &statement.attributes)
        .filter(|attr| attr.matches_name(field))
        .flat_map(|attr| attr.values.iter().cloned())
        .collect()
}
