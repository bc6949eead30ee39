//! # rb-mapper
//!
//! Regex-driven role reconciliation for identity brokering.
//!
//! On every successful federation event the host runtime hands a broker
//! mapper the principal, the mapper's configuration, and the brokered
//! identity. The mapper extracts a set of asserted strings, derives the
//! roles the principal *should* hold by applying named-capture-group
//! regular expressions over the realm and client role universes, and
//! reconciles against the roles the principal *does* hold, granting and
//! revoking only roles that carry the administrator-chosen marker
//! attribute.
//!
//! ## Modules
//!
//! - [`config`] - Mapper settings and the declarative config schema
//! - [`error`] - Mapper error types
//! - [`mapper`] - The claims-based and assertion-based mapper variants
//! - [`pattern`] - Regex compilation and full-string capture matching
//! - [`reconcile`] - The channelized reconciliation algorithm

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]

pub mod config;
pub mod error;
pub mod mapper;
pub mod pattern;
pub mod reconcile;

pub use config::{channel_properties, ConfigProperty, MapperConfig};
pub use error::{MapperError, MapperResult};
pub use mapper::{AttributeRoleMapper, BrokerMapper, ClaimRoleMapper, SyncMode};
pub use pattern::{PatternKind, RoleCapture, RolePattern};
pub use reconcile::{
    process_principal, reconcile_channel, ChannelOutcome, ProcessSummary, RoleChannel,
};
