//! Broker mapper variants.
//!
//! A broker mapper is attached to an identity provider and invoked by the
//! host runtime on the two federation event kinds: first import of a
//! principal and every subsequent update. Both entry points run the same
//! reconciliation sequence; the variants differ only in which part of the
//! brokered identity they extract asserted values from.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use rb_identity::{attribute_values, claim_values, BrokeredIdentity};
use rb_model::{Principal, RealmStore};

use crate::config::{channel_properties, ConfigProperty, MapperConfig, ASSERTION_FIELD_NAME};
use crate::error::MapperResult;
use crate::reconcile::{process_principal, ProcessSummary};

/// How the host keeps brokered principals in sync with the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SyncMode {
    /// Apply mappers only when the principal is first imported.
    Import,
    /// Provider-level legacy behavior.
    Legacy,
    /// Re-apply mappers on every login.
    Force,
}

impl SyncMode {
    /// Every sync mode.
    pub const ALL: [Self; 3] = [Self::Import, Self::Legacy, Self::Force];
}

/// A mapper attachable to an identity provider.
///
/// Variants are selected at configuration time by their [`id`]; dispatch is
/// over this trait, not a class hierarchy.
///
/// [`id`]: BrokerMapper::id
pub trait BrokerMapper {
    /// Unique mapper identifier.
    fn id(&self) -> &'static str;

    /// Display category for configuration UIs.
    fn display_category(&self) -> &'static str {
        "Role Importer"
    }

    /// Display name for configuration UIs.
    fn display_type(&self) -> &'static str;

    /// Help text describing this mapper.
    fn help_text(&self) -> &'static str;

    /// Identity-provider kinds this mapper may be attached to.
    fn compatible_providers(&self) -> &'static [&'static str];

    /// Whether the mapper supports the given sync mode.
    ///
    /// Role reconciliation is idempotent, so every mode is supported.
    fn supports_sync_mode(&self, _mode: SyncMode) -> bool {
        true
    }

    /// The declarative configuration schema for this mapper.
    fn config_properties(&self) -> Vec<ConfigProperty>;

    /// Extracts the asserted values this mapper reconciles against.
    fn asserted_values(&self, config: &MapperConfig, identity: &BrokeredIdentity)
        -> HashSet<String>;

    /// Invoked when a principal is first imported from the provider.
    ///
    /// ## Errors
    ///
    /// Propagates collaborator failures; see [`process_principal`].
    fn import_principal(
        &self,
        store: &mut dyn RealmStore,
        principal: &Principal,
        config: &MapperConfig,
        identity: &BrokeredIdentity,
    ) -> MapperResult<ProcessSummary> {
        tracing::trace!(mapper = self.id(), "import principal");
        self.process(store, principal, config, identity)
    }

    /// Invoked on every subsequent update of a brokered principal.
    ///
    /// Identical in behavior to [`import_principal`].
    ///
    /// ## Errors
    ///
    /// Propagates collaborator failures; see [`process_principal`].
    ///
    /// [`import_principal`]: BrokerMapper::import_principal
    fn update_principal(
        &self,
        store: &mut dyn RealmStore,
        principal: &Principal,
        config: &MapperConfig,
        identity: &BrokeredIdentity,
    ) -> MapperResult<ProcessSummary> {
        tracing::trace!(mapper = self.id(), "update principal");
        self.process(store, principal, config, identity)
    }

    /// The shared reconciliation sequence.
    ///
    /// ## Errors
    ///
    /// Propagates collaborator failures; see [`process_principal`].
    fn process(
        &self,
        store: &mut dyn RealmStore,
        principal: &Principal,
        config: &MapperConfig,
        identity: &BrokeredIdentity,
    ) -> MapperResult<ProcessSummary> {
        let asserted_values = self.asserted_values(config, identity);
        process_principal(store, principal, config, &asserted_values)
    }
}

/// Derives role assignments from a claim of a claims-based provider.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClaimRoleMapper;

impl ClaimRoleMapper {
    /// Mapper identifier.
    pub const ID: &'static str = "regex-role-claim-mapper";

    /// Claims-based provider kinds this mapper may be attached to.
    pub const COMPATIBLE_PROVIDERS: [&'static str; 2] = ["keycloak-oidc", "oidc"];
}

impl BrokerMapper for ClaimRoleMapper {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn display_type(&self) -> &'static str {
        "Regex Realm and Client Role Importer"
    }

    fn help_text(&self) -> &'static str {
        "Derives realm and client role assignments from a claim via regular expressions"
    }

    fn compatible_providers(&self) -> &'static [&'static str] {
        &Self::COMPATIBLE_PROVIDERS
    }

    fn config_properties(&self) -> Vec<ConfigProperty> {
        let mut properties = vec![ConfigProperty::new(ASSERTION_FIELD_NAME, "claim name")
            .with_help("name of the claim to search for asserted values")];
        properties.extend(channel_properties());
        properties
    }

    fn asserted_values(
        &self,
        config: &MapperConfig,
        identity: &BrokeredIdentity,
    ) -> HashSet<String> {
        claim_values(identity, config.get_or_empty(ASSERTION_FIELD_NAME))
    }
}

/// Derives role assignments from an assertion attribute of an
/// assertion-based provider.
#[derive(Debug, Clone, Copy, Default)]
pub struct AttributeRoleMapper;

impl AttributeRoleMapper {
    /// Mapper identifier.
    pub const ID: &'static str = "regex-role-attribute-mapper";

    /// Assertion-based provider kinds this mapper may be attached to.
    pub const COMPATIBLE_PROVIDERS: [&'static str; 1] = ["saml"];
}

impl BrokerMapper for AttributeRoleMapper {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn display_type(&self) -> &'static str {
        "Regex Realm and Client Role Importer"
    }

    fn help_text(&self) -> &'static str {
        "Derives realm and client role assignments from an assertion attribute via \
         regular expressions"
    }

    fn compatible_providers(&self) -> &'static [&'static str] {
        &Self::COMPATIBLE_PROVIDERS
    }

    fn config_properties(&self) -> Vec<ConfigProperty> {
        let mut properties = vec![ConfigProperty::new(ASSERTION_FIELD_NAME, "attribute name")
            .with_help("name of the assertion attribute to search (friendly or otherwise)")];
        properties.extend(channel_properties());
        properties
    }

    fn asserted_values(
        &self,
        config: &MapperConfig,
        identity: &BrokeredIdentity,
    ) -> HashSet<String> {
        attribute_values(identity, config.get_or_empty(ASSERTION_FIELD_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mappers_support_every_sync_mode() {
        for mode in SyncMode::ALL {
            assert!(ClaimRoleMapper.supports_sync_mode(mode));
            assert!(AttributeRoleMapper.supports_sync_mode(mode));
        }
    }

    #[test]
    fn mappers_declare_distinct_provider_kinds() {
        assert!(ClaimRoleMapper
            .compatible_providers()
            .contains(&"keycloak-oidc"));
        assert!(ClaimRoleMapper.compatible_providers().contains(&"oidc"));
        assert_eq!(AttributeRoleMapper.compatible_providers(), ["saml"]);
    }

    #[test]
    fn config_schema_leads_with_the_extraction_field() {
        for properties in [
            ClaimRoleMapper.config_properties(),
            AttributeRoleMapper.config_properties(),
        ] {
            assert_eq!(properties[0].name, ASSERTION_FIELD_NAME);
            assert_eq!(properties.len(), 7);
        }
    }
}
