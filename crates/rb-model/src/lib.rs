//! # rb-model
//!
//! Domain models for role-broker (Role, Client, Principal) and the
//! collaborator seams the reconciliation engine works through.
//!
//! The engine never creates or deletes roles; it only reads snapshots of the
//! role universe and (un)assigns existing roles to a principal. Those two
//! concerns are expressed as the [`RoleUniverse`] and [`RoleAssignments`]
//! traits, implemented by the host identity runtime. [`MemoryRealm`] is the
//! in-memory reference implementation used by the test suites.

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]

pub mod client;
pub mod memory;
pub mod principal;
pub mod role;
pub mod universe;

pub use client::Client;
pub use memory::MemoryRealm;
pub use principal::Principal;
pub use role::Role;
pub use universe::{RealmStore, RoleAssignments, RoleUniverse, UniverseError, UniverseResult};
