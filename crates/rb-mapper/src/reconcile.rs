//! Channelized role reconciliation.
//!
//! One invocation per federation event. Each channel (realm, client,
//! reserved search) is gated on its own regex and marker-attribute settings
//! and evaluated independently: an invalid regex disables that channel for
//! the invocation without aborting its siblings, while collaborator failures
//! propagate to the caller.
//!
//! The algorithm per channel:
//!
//! 1. full-match every asserted value against the channel pattern,
//! 2. scan the universe for roles carrying the marker attribute whose
//!    name equals the capture (case-insensitively); this is the `wanted` set,
//! 3. take the principal's current assignments restricted to the channel's
//!    scope and the marker attribute; this is the `have` set,
//! 4. grant `wanted - have`, then revoke `have - wanted`.
//!
//! Both sets are keyed by role id, so the grant and revoke sets are disjoint
//! by construction and a rerun with unchanged inputs is a no-op. Roles
//! without the marker attribute are never touched, whatever their
//! assignment state.

use std::collections::{HashMap, HashSet};

use uuid::Uuid;

use rb_model::{Principal, RealmStore, Role, RoleUniverse, UniverseResult};

use crate::config::{
    MapperConfig, CLIENT_ROLES_ATTRIBUTE_NAME, CLIENT_ROLES_REGULAR_EXPRESSION,
    REALM_ROLES_ATTRIBUTE_NAME, REALM_ROLES_REGULAR_EXPRESSION, SEARCH_ROLES_ATTRIBUTE_NAME,
    SEARCH_ROLES_REGULAR_EXPRESSION,
};
use crate::error::{MapperError, MapperResult};
use crate::pattern::{RoleCapture, RolePattern};

/// One independently configured reconciliation pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleChannel {
    /// Realm-scoped roles, derived via the `role` capture group.
    Realm,
    /// Client-scoped roles, derived via the `client` and `role` groups.
    Client,
    /// Reserved channel; configured but reconciles as a no-op.
    Search,
}

impl RoleChannel {
    /// Every channel, in evaluation order.
    pub const ALL: [Self; 3] = [Self::Realm, Self::Client, Self::Search];

    /// The channel name used in logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Realm => "realm",
            Self::Client => "client",
            Self::Search => "search",
        }
    }

    /// The config key holding this channel's regular expression.
    #[must_use]
    pub const fn regex_key(self) -> &'static str {
        match self {
            Self::Realm => REALM_ROLES_REGULAR_EXPRESSION,
            Self::Client => CLIENT_ROLES_REGULAR_EXPRESSION,
            Self::Search => SEARCH_ROLES_REGULAR_EXPRESSION,
        }
    }

    /// The config key holding this channel's marker-attribute name.
    #[must_use]
    pub const fn marker_key(self) -> &'static str {
        match self {
            Self::Realm => REALM_ROLES_ATTRIBUTE_NAME,
            Self::Client => CLIENT_ROLES_ATTRIBUTE_NAME,
            Self::Search => SEARCH_ROLES_ATTRIBUTE_NAME,
        }
    }

    fn compile(self, expression: &str) -> MapperResult<RolePattern> {
        match self {
            Self::Realm => RolePattern::realm(expression),
            Self::Client => RolePattern::client(expression),
            Self::Search => RolePattern::search(expression),
        }
    }
}

/// What one channel did during an invocation.
#[derive(Debug)]
pub enum ChannelOutcome {
    /// The channel's regex or marker-attribute setting was empty.
    Disabled,

    /// The reserved search channel was configured; its reconciliation
    /// behavior is deliberately unspecified and nothing was done.
    Reserved,

    /// The channel reconciled; mutations were applied within the call.
    Applied {
        /// Roles granted to the principal.
        granted: Vec<Role>,
        /// Roles revoked from the principal.
        revoked: Vec<Role>,
    },

    /// The channel's regex failed to compile; siblings were unaffected.
    Failed {
        /// The compilation error.
        error: MapperError,
    },
}

impl ChannelOutcome {
    /// Roles granted by this channel, if any.
    #[must_use]
    pub fn granted(&self) -> &[Role] {
        match self {
            Self::Applied { granted, .. } => granted,
            _ => &[],
        }
    }

    /// Roles revoked by this channel, if any.
    #[must_use]
    pub fn revoked(&self) -> &[Role] {
        match self {
            Self::Applied { revoked, .. } => revoked,
            _ => &[],
        }
    }

    /// Whether the channel applied any mutation.
    #[must_use]
    pub fn changed(&self) -> bool {
        !self.granted().is_empty() || !self.revoked().is_empty()
    }
}

/// Per-channel outcomes of one invocation.
#[derive(Debug)]
pub struct ProcessSummary {
    /// Realm-channel outcome.
    pub realm: ChannelOutcome,
    /// Client-channel outcome.
    pub client: ChannelOutcome,
    /// Search-channel outcome.
    pub search: ChannelOutcome,
}

impl ProcessSummary {
    /// Whether any channel applied a mutation.
    #[must_use]
    pub fn changed(&self) -> bool {
        self.realm.changed() || self.client.changed() || self.search.changed()
    }
}

/// Reconciles every channel for one principal.
///
/// Channels are evaluated as siblings: a pattern failure in one is recorded
/// in its outcome and the others still run. Collaborator errors abort the
/// invocation and propagate to the caller.
///
/// ## Errors
///
/// Returns `MapperError::Universe` when a snapshot read or a grant/revoke
/// fails.
pub fn process_principal<S>(
    store: &mut S,
    principal: &Principal,
    config: &MapperConfig,
    asserted_values: &HashSet<String>,
) -> MapperResult<ProcessSummary>
where
    S: RealmStore + ?Sized,
{
    tracing::trace!(principal = %principal.username, "process principal");

    Ok(ProcessSummary {
        realm: run_channel(store, principal, RoleChannel::Realm, config, asserted_values)?,
        client: run_channel(store, principal, RoleChannel::Client, config, asserted_values)?,
        search: run_channel(store, principal, RoleChannel::Search, config, asserted_values)?,
    })
}

/// Runs one channel, converting a pattern failure into its outcome so that
/// sibling channels still run.
fn run_channel<S>(
    store: &mut S,
    principal: &Principal,
    channel: RoleChannel,
    config: &MapperConfig,
    asserted_values: &HashSet<String>,
) -> MapperResult<ChannelOutcome>
where
    S: RealmStore + ?Sized,
{
    match reconcile_channel(store, principal, channel, config, asserted_values) {
        Err(error) if error.is_pattern_error() => {
            tracing::warn!(
                channel = channel.name(),
                %error,
                "invalid pattern; channel skipped for this invocation"
            );
            Ok(ChannelOutcome::Failed { error })
        }
        other => other,
    }
}

/// Reconciles a single channel for one principal.
///
/// ## Errors
///
/// Returns `MapperError::InvalidPattern` if the channel's regex does not
/// compile, or `MapperError::Universe` on collaborator failure.
pub fn reconcile_channel<S>(
    store: &mut S,
    principal: &Principal,
    channel: RoleChannel,
    config: &MapperConfig,
    asserted_values: &HashSet<String>,
) -> MapperResult<ChannelOutcome>
where
    S: RealmStore + ?Sized,
{
    let expression = config.get_or_empty(channel.regex_key());
    let marker = config.get_or_empty(channel.marker_key());
    if expression.is_empty() || marker.is_empty() {
        tracing::debug!(channel = channel.name(), "channel disabled");
        return Ok(ChannelOutcome::Disabled);
    }

    let realm_scoped = match channel {
        RoleChannel::Realm => true,
        RoleChannel::Client => false,
        RoleChannel::Search => {
            tracing::debug!("search channel is reserved; no reconciliation performed");
            return Ok(ChannelOutcome::Reserved);
        }
    };

    tracing::trace!(channel = channel.name(), "adjust role assignments");
    let pattern = channel.compile(expression)?;

    let wanted = if realm_scoped {
        wanted_realm_roles(store, &pattern, marker, asserted_values)?
    } else {
        wanted_client_roles(store, &pattern, marker, asserted_values)?
    };

    // Current assignments, restricted to this channel's scope and marker.
    // Unmarked roles stay invisible to the whole computation.
    let have: HashMap<Uuid, Role> = store
        .assigned_roles(principal.id)?
        .into_iter()
        .filter(|role| {
            if realm_scoped {
                role.is_realm_role()
            } else {
                role.is_client_role()
            }
        })
        .filter(|role| role.has_attribute(marker))
        .map(|role| (role.id, role))
        .collect();

    let granted: Vec<Role> = wanted
        .values()
        .filter(|role| !have.contains_key(&role.id))
        .cloned()
        .collect();
    let revoked: Vec<Role> = have
        .values()
        .filter(|role| !wanted.contains_key(&role.id))
        .cloned()
        .collect();

    for role in &granted {
        store.grant(principal.id, role.id)?;
    }
    for role in &revoked {
        store.revoke(principal.id, role.id)?;
    }

    Ok(ChannelOutcome::Applied { granted, revoked })
}

/// Realm roles the principal should have, keyed by role id.
fn wanted_realm_roles<U>(
    universe: &U,
    pattern: &RolePattern,
    marker: &str,
    asserted_values: &HashSet<String>,
) -> UniverseResult<HashMap<Uuid, Role>>
where
    U: RoleUniverse + ?Sized,
{
    let universe_roles = universe.realm_roles()?;
    let mut wanted = HashMap::new();
    for value in asserted_values {
        let Some(RoleCapture::Realm { role }) = pattern.capture(value) else {
            continue;
        };
        for candidate in &universe_roles {
            if candidate.has_attribute(marker) && candidate.name_matches(&role) {
                wanted.insert(candidate.id, candidate.clone());
            }
        }
    }
    Ok(wanted)
}

/// Client roles the principal should have, keyed by role id.
fn wanted_client_roles<U>(
    universe: &U,
    pattern: &RolePattern,
    marker: &str,
    asserted_values: &HashSet<String>,
) -> UniverseResult<HashMap<Uuid, Role>>
where
    U: RoleUniverse + ?Sized,
{
    let clients = universe.clients()?;
    let mut wanted = HashMap::new();
    for value in asserted_values {
        let Some(RoleCapture::Client { client, role }) = pattern.capture(value) else {
            continue;
        };
        for candidate_client in clients.iter().filter(|c| c.client_id_matches(&client)) {
            for candidate in universe.client_roles(candidate_client.id)? {
                if candidate.has_attribute(marker) && candidate.name_matches(&role) {
                    wanted.insert(candidate.id, candidate);
                }
            }
        }
    }
    Ok(wanted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rb_model::{MemoryRealm, RoleAssignments};

    fn asserted(values: &[&str]) -> HashSet<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    #[test]
    fn disabled_when_either_setting_is_missing() {
        let realm_id = Uuid::now_v7();
        let mut realm = MemoryRealm::new(realm_id);
        let principal = Principal::new(realm_id, "jdoe");

        // Regex without marker.
        let config = MapperConfig::new("roles")
            .with_config(REALM_ROLES_REGULAR_EXPRESSION, r"role:(?<role>\w+)");
        let outcome = reconcile_channel(
            &mut realm,
            &principal,
            RoleChannel::Realm,
            &config,
            &asserted(&["role:admin"]),
        )
        .unwrap();
        assert!(matches!(outcome, ChannelOutcome::Disabled));

        // Marker without regex.
        let config = MapperConfig::new("roles").with_config(REALM_ROLES_ATTRIBUTE_NAME, "sync");
        let outcome = reconcile_channel(
            &mut realm,
            &principal,
            RoleChannel::Realm,
            &config,
            &asserted(&["role:admin"]),
        )
        .unwrap();
        assert!(matches!(outcome, ChannelOutcome::Disabled));
    }

    #[test]
    fn search_channel_is_a_documented_noop() {
        let realm_id = Uuid::now_v7();
        let mut realm = MemoryRealm::new(realm_id);
        realm.add_role(Role::new_realm_role(realm_id, "staff").with_marker("search"));
        let principal = Principal::new(realm_id, "jdoe");

        let config = MapperConfig::new("roles")
            .with_config(SEARCH_ROLES_ATTRIBUTE_NAME, "search")
            .with_config(SEARCH_ROLES_REGULAR_EXPRESSION, r"ou=(?<value>\w+)");

        let outcome = reconcile_channel(
            &mut realm,
            &principal,
            RoleChannel::Search,
            &config,
            &asserted(&["ou=staff"]),
        )
        .unwrap();

        assert!(matches!(outcome, ChannelOutcome::Reserved));
        assert!(realm.assigned_roles(principal.id).unwrap().is_empty());
    }

    #[test]
    fn invalid_pattern_in_one_channel_does_not_abort_siblings() {
        let realm_id = Uuid::now_v7();
        let mut realm = MemoryRealm::new(realm_id);
        let client_id = realm.add_client(rb_model::Client::new(realm_id, "engineering"));
        realm.add_role(Role::new_client_role(realm_id, client_id, "lead").with_marker("sync"));
        let principal = Principal::new(realm_id, "jdoe");

        let config = MapperConfig::new("roles")
            .with_config(REALM_ROLES_ATTRIBUTE_NAME, "sync")
            .with_config(REALM_ROLES_REGULAR_EXPRESSION, r"role:(?<role>")
            .with_config(CLIENT_ROLES_ATTRIBUTE_NAME, "sync")
            .with_config(CLIENT_ROLES_REGULAR_EXPRESSION, r"(?<client>\w+):(?<role>\w+)");

        let summary = process_principal(
            &mut realm,
            &principal,
            &config,
            &asserted(&["engineering:lead"]),
        )
        .unwrap();

        assert!(matches!(summary.realm, ChannelOutcome::Failed { .. }));
        assert_eq!(summary.client.granted().len(), 1);
    }
}
