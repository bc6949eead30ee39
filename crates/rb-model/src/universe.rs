//! Collaborator seams for the role universe.
//!
//! The role universe (all roles and clients in a realm, plus the principal's
//! current assignments) is owned by the host identity runtime. The engine
//! reads snapshots through [`RoleUniverse`] and applies its grant/revoke
//! decisions through [`RoleAssignments`].
//!
//! ## Implementation Notes
//!
//! - The traits are synchronous: the engine is invoked once per federation
//!   event, inside whatever transactional boundary the host provides.
//! - Errors propagate to the caller uncaught; the engine performs no retry
//!   and no partial-state cleanup.

use thiserror::Error;
use uuid::Uuid;

use crate::client::Client;
use crate::role::Role;

/// Errors raised by the role universe collaborator.
#[derive(Debug, Error)]
pub enum UniverseError {
    /// A referenced role does not exist in the universe.
    #[error("role not found: {0}")]
    RoleNotFound(Uuid),

    /// A referenced client does not exist in the universe.
    #[error("client not found: {0}")]
    ClientNotFound(Uuid),

    /// Underlying persistence failure.
    #[error("storage error: {0}")]
    Storage(String),
}

impl UniverseError {
    /// Creates a storage error.
    #[must_use]
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }
}

/// Result type for role universe operations.
pub type UniverseResult<T> = Result<T, UniverseError>;

/// Read-through view of a realm's role universe.
///
/// All reads are snapshots taken at reconciliation start; the engine never
/// creates or deletes the entities behind them.
pub trait RoleUniverse {
    /// Snapshot of all realm-scoped roles.
    fn realm_roles(&self) -> UniverseResult<Vec<Role>>;

    /// Snapshot of all clients in the realm.
    fn clients(&self) -> UniverseResult<Vec<Client>>;

    /// Snapshot of the roles scoped to one client.
    fn client_roles(&self, client_id: Uuid) -> UniverseResult<Vec<Role>>;
}

/// The principal's mutable role assignments.
///
/// The many-to-many relation between principals and roles is owned by the
/// host runtime; the engine reads a snapshot and issues add/remove
/// operations against it.
pub trait RoleAssignments {
    /// Snapshot of the roles currently assigned to a principal.
    fn assigned_roles(&self, principal_id: Uuid) -> UniverseResult<Vec<Role>>;

    /// Assigns a role to a principal.
    ///
    /// ## Errors
    ///
    /// Returns `UniverseError::RoleNotFound` if the role does not exist.
    fn grant(&mut self, principal_id: Uuid, role_id: Uuid) -> UniverseResult<()>;

    /// Unassigns a role from a principal.
    fn revoke(&mut self, principal_id: Uuid, role_id: Uuid) -> UniverseResult<()>;
}

/// Combined seam for stores that serve both reads and mutations.
///
/// Blanket-implemented so mappers can take a single `&mut dyn RealmStore`.
pub trait RealmStore: RoleUniverse + RoleAssignments {}

impl<T: RoleUniverse + RoleAssignments> RealmStore for T {}
