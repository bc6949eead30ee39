//! In-memory realm store.
//!
//! Reference implementation of the collaborator seams, backed by hash maps.
//! Used by the test suites and by embedders that keep role state in process.

use std::collections::{HashMap, HashSet};

use uuid::Uuid;

use crate::client::Client;
use crate::role::Role;
use crate::universe::{RoleAssignments, RoleUniverse, UniverseError, UniverseResult};

/// An in-memory role universe with principal assignments.
#[derive(Debug, Default)]
pub struct MemoryRealm {
    realm_id: Uuid,
    roles: HashMap<Uuid, Role>,
    clients: HashMap<Uuid, Client>,
    assignments: HashMap<Uuid, HashSet<Uuid>>,
}

impl MemoryRealm {
    /// Creates an empty realm.
    #[must_use]
    pub fn new(realm_id: Uuid) -> Self {
        Self {
            realm_id,
            ..Self::default()
        }
    }

    /// The realm identifier.
    #[must_use]
    pub const fn realm_id(&self) -> Uuid {
        self.realm_id
    }

    /// Adds a role to the universe, returning its id.
    pub fn add_role(&mut self, role: Role) -> Uuid {
        let id = role.id;
        self.roles.insert(id, role);
        id
    }

    /// Adds a client to the universe, returning its id.
    pub fn add_client(&mut self, client: Client) -> Uuid {
        let id = client.id;
        self.clients.insert(id, client);
        id
    }

    /// Seeds an assignment, as if granted by some earlier mechanism.
    ///
    /// ## Errors
    ///
    /// Returns `UniverseError::RoleNotFound` if the role does not exist.
    pub fn assign(&mut self, principal_id: Uuid, role_id: Uuid) -> UniverseResult<()> {
        self.grant(principal_id, role_id)
    }
}

impl RoleUniverse for MemoryRealm {
    fn realm_roles(&self) -> UniverseResult<Vec<Role>> {
        Ok(self
            .roles
            .values()
            .filter(|r| r.is_realm_role())
            .cloned()
            .collect())
    }

    fn clients(&self) -> UniverseResult<Vec<Client>> {
        Ok(self.clients.values().cloned().collect())
    }

    fn client_roles(&self, client_id: Uuid) -> UniverseResult<Vec<Role>> {
        if !self.clients.contains_key(&client_id) {
            return Err(UniverseError::ClientNotFound(client_id));
        }
        Ok(self
            .roles
            .values()
            .filter(|r| r.client_id == Some(client_id))
            .cloned()
            .collect())
    }
}

impl RoleAssignments for MemoryRealm {
    fn assigned_roles(&self, principal_id: Uuid) -> UniverseResult<Vec<Role>> {
        let Some(assigned) = self.assignments.get(&principal_id) else {
            return Ok(Vec::new());
        };
        Ok(assigned
            .iter()
            .filter_map(|id| self.roles.get(id))
            .cloned()
            .collect())
    }

    fn grant(&mut self, principal_id: Uuid, role_id: Uuid) -> UniverseResult<()> {
        if !self.roles.contains_key(&role_id) {
            return Err(UniverseError::RoleNotFound(role_id));
        }
        self.assignments
            .entry(principal_id)
            .or_default()
            .insert(role_id);
        Ok(())
    }

    fn revoke(&mut self, principal_id: Uuid, role_id: Uuid) -> UniverseResult<()> {
        if let Some(assigned) = self.assignments.get_mut(&principal_id) {
            assigned.remove(&role_id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grant_and_revoke_roundtrip() {
        let realm_id = Uuid::now_v7();
        let mut realm = MemoryRealm::new(realm_id);
        let role_id = realm.add_role(Role::new_realm_role(realm_id, "admin"));
        let principal_id = Uuid::now_v7();

        realm.grant(principal_id, role_id).unwrap();
        assert_eq!(realm.assigned_roles(principal_id).unwrap().len(), 1);

        realm.revoke(principal_id, role_id).unwrap();
        assert!(realm.assigned_roles(principal_id).unwrap().is_empty());
    }

    #[test]
    fn grant_of_unknown_role_fails() {
        let mut realm = MemoryRealm::new(Uuid::now_v7());
        let err = realm.grant(Uuid::now_v7(), Uuid::now_v7()).unwrap_err();

        assert!(matches!(err, UniverseError::RoleNotFound(_)));
    }

    #[test]
    fn realm_roles_exclude_client_roles() {
        let realm_id = Uuid::now_v7();
        let mut realm = MemoryRealm::new(realm_id);
        let client_id = realm.add_client(Client::new(realm_id, "app"));
        realm.add_role(Role::new_realm_role(realm_id, "admin"));
        realm.add_role(Role::new_client_role(realm_id, client_id, "viewer"));

        assert_eq!(realm.realm_roles().unwrap().len(), 1);
        assert_eq!(realm.client_roles(client_id).unwrap().len(), 1);
    }

    #[test]
    fn client_roles_of_unknown_client_fail() {
        let realm = MemoryRealm::new(Uuid::now_v7());
        let err = realm.client_roles(Uuid::now_v7()).unwrap_err();

        assert!(matches!(err, UniverseError::ClientNotFound(_)));
    }
}
