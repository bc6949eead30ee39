//! Mapper configuration.
//!
//! All settings are string-valued and optional. A missing setting reads as
//! the empty string, which disables the corresponding channel. The config
//! surface is described by a data-only table of [`ConfigProperty`] entries;
//! there is no global registry.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Config key naming the claim or attribute to read asserted values from.
pub const ASSERTION_FIELD_NAME: &str = "assertion-field-name";

/// Config key for the marker attribute restricting eligible client roles.
pub const CLIENT_ROLES_ATTRIBUTE_NAME: &str = "client-roles-attribute-name";

/// Config key for the client-role regex (named groups `client` and `role`).
pub const CLIENT_ROLES_REGULAR_EXPRESSION: &str = "client-roles-regular-expression";

/// Config key for the marker attribute restricting eligible realm roles.
pub const REALM_ROLES_ATTRIBUTE_NAME: &str = "realm-roles-attribute-name";

/// Config key for the realm-role regex (named group `role`).
pub const REALM_ROLES_REGULAR_EXPRESSION: &str = "realm-roles-regular-expression";

/// Config key for the marker attribute of the reserved search channel.
pub const SEARCH_ROLES_ATTRIBUTE_NAME: &str = "search-roles-attribute-name";

/// Config key for the regex of the reserved search channel (named group `value`).
pub const SEARCH_ROLES_REGULAR_EXPRESSION: &str = "search-roles-regular-expression";

/// Configuration for one mapper instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapperConfig {
    /// Mapper instance ID.
    pub id: Uuid,

    /// Mapper name (administrator-defined).
    pub name: String,

    /// Mapper-specific settings.
    #[serde(default)]
    pub config: HashMap<String, String>,
}

impl MapperConfig {
    /// Creates a new mapper config.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: name.into(),
            config: HashMap::new(),
        }
    }

    /// Adds a config value.
    #[must_use]
    pub fn with_config(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.insert(key.into(), value.into());
        self
    }

    /// Gets a config value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.config.get(key).map(String::as_str)
    }

    /// Gets a config value, defaulting to the empty string when absent.
    #[must_use]
    pub fn get_or_empty(&self, key: &str) -> &str {
        self.get(key).unwrap_or("")
    }
}

/// One entry in the declarative configuration schema.
///
/// Consumed at startup by whatever configuration UI or loader the host
/// provides; read-only after construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigProperty {
    /// Config key.
    pub name: String,

    /// Display label.
    pub label: String,

    /// Help text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
}

impl ConfigProperty {
    /// Creates a new property.
    #[must_use]
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            help_text: None,
        }
    }

    /// Sets the help text.
    #[must_use]
    pub fn with_help(mut self, help_text: impl Into<String>) -> Self {
        self.help_text = Some(help_text.into());
        self
    }
}

/// The six channel settings shared by every mapper variant.
#[must_use]
pub fn channel_properties() -> Vec<ConfigProperty> {
    vec![
        ConfigProperty::new(CLIENT_ROLES_ATTRIBUTE_NAME, "client roles attribute name")
            .with_help("only evaluate client roles having an attribute with this name"),
        ConfigProperty::new(
            CLIENT_ROLES_REGULAR_EXPRESSION,
            "client roles regular expression",
        )
        .with_help(
            "regular expression to apply to the asserted values to extract client roles; \
             must specify two named capture groups: client and role",
        ),
        ConfigProperty::new(REALM_ROLES_ATTRIBUTE_NAME, "realm roles attribute name")
            .with_help("only evaluate realm roles having an attribute with this name"),
        ConfigProperty::new(
            REALM_ROLES_REGULAR_EXPRESSION,
            "realm roles regular expression",
        )
        .with_help(
            "regular expression to apply to the asserted values to extract realm roles; \
             must specify one named capture group: role",
        ),
        ConfigProperty::new(SEARCH_ROLES_ATTRIBUTE_NAME, "search roles attribute name")
            .with_help("only evaluate realm or client roles having an attribute with this name"),
        ConfigProperty::new(
            SEARCH_ROLES_REGULAR_EXPRESSION,
            "search roles regular expression",
        )
        .with_help(
            "regular expression to apply to the asserted values to search for roles having \
             this attribute value; must specify one named capture group: value",
        ),
    ]
}
