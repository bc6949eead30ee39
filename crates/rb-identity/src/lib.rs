//! # rb-identity
//!
//! Brokered identity payloads for role-broker.
//!
//! A successful federation event hands the engine a [`BrokeredIdentity`]:
//! the claims asserted by a claims-based provider and/or the assertion
//! produced by an assertion-based provider. The [`extract`] module turns
//! either shape into the flat set of asserted strings the reconciler
//! consumes.
//!
//! ## Modules
//!
//! - [`assertion`] - Assertion payload with attribute statements
//! - [`claims`] - Claim set carried by claims-based federation events
//! - [`context`] - The per-event identity context handed to mappers
//! - [`extract`] - Value-extraction adapters

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]

pub mod assertion;
pub mod claims;
pub mod context;
pub mod extract;

pub use assertion::{Assertion, AssertionAttribute, AttributeStatement};
pub use claims::ClaimSet;
pub use context::BrokeredIdentity;
pub use extract::{attribute_values, claim_values};
