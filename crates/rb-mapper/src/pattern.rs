//! Pattern matcher.
//!
//! Each reconciliation channel is driven by a regular expression with a
//! declared set of named capture groups. A value contributes a capture only
//! on a full-string match whose group count equals the declared arity and
//! whose declared named groups all participated; anything else is a silent
//! no-match, never an error.

use regex::Regex;

use crate::error::{MapperError, MapperResult};

/// Which named capture groups a pattern must declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    /// One group: `role`.
    Realm,
    /// Two groups: `client` and `role`.
    Client,
    /// One group: `value` (reserved search channel).
    Search,
}

impl PatternKind {
    /// The declared capture-group arity.
    #[must_use]
    pub const fn arity(self) -> usize {
        match self {
            Self::Realm | Self::Search => 1,
            Self::Client => 2,
        }
    }
}

/// What a successful match captured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleCapture {
    /// Realm-channel capture.
    Realm {
        /// The captured `role` group.
        role: String,
    },
    /// Client-channel capture.
    Client {
        /// The captured `client` group.
        client: String,
        /// The captured `role` group.
        role: String,
    },
    /// Reserved search-channel capture.
    Search {
        /// The captured `value` group.
        value: String,
    },
}

/// A compiled channel pattern.
///
/// Immutable once compiled; compiled fresh per reconciliation call.
#[derive(Debug, Clone)]
pub struct RolePattern {
    expression: String,
    regex: Regex,
    kind: PatternKind,
}

impl RolePattern {
    /// Compiles a realm-channel pattern (named group `role`).
    ///
    /// ## Errors
    ///
    /// Returns `MapperError::InvalidPattern` if the expression does not
    /// compile.
    pub fn realm(expression: &str) -> MapperResult<Self> {
        Self::compile(expression, PatternKind::Realm)
    }

    /// Compiles a client-channel pattern (named groups `client` and `role`).
    ///
    /// ## Errors
    ///
    /// Returns `MapperError::InvalidPattern` if the expression does not
    /// compile.
    pub fn client(expression: &str) -> MapperResult<Self> {
        Self::compile(expression, PatternKind::Client)
    }

    /// Compiles a search-channel pattern (named group `value`).
    ///
    /// ## Errors
    ///
    /// Returns `MapperError::InvalidPattern` if the expression does not
    /// compile.
    pub fn search(expression: &str) -> MapperResult<Self> {
        Self::compile(expression, PatternKind::Search)
    }

    fn compile(expression: &str, kind: PatternKind) -> MapperResult<Self> {
        // Anchor the expression so matching is full-string, not search.
        let regex = Regex::new(&format!("^(?:{expression})$"))
            .map_err(|e| MapperError::invalid_pattern(expression, e.to_string()))?;
        Ok(Self {
            expression: expression.to_string(),
            regex,
            kind,
        })
    }

    /// The expression as configured, verbatim.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.expression
    }

    /// The declared pattern kind.
    #[must_use]
    pub const fn kind(&self) -> PatternKind {
        self.kind
    }

    /// Attempts a full-string match against one asserted value.
    ///
    /// Returns `None` when the value does not match, when the pattern's
    /// capture-group count differs from the declared arity, or when a
    /// declared named group did not participate in the match.
    #[must_use]
    pub fn capture(&self, value: &str) -> Option<RoleCapture> {
        let Some(caps) = self.regex.captures(value) else {
            tracing::trace!(pattern = %self.expression, value, "value did not match");
            return None;
        };

        // Group 0 is the implicit whole-match group.
        if self.regex.captures_len() - 1 != self.kind.arity() {
            tracing::trace!(
                pattern = %self.expression,
                arity = self.kind.arity(),
                "capture-group count differs from declared arity"
            );
            return None;
        }

        let group = |name: &str| caps.name(name).map(|m| m.as_str().to_string());
        let capture = match self.kind {
            PatternKind::Realm => RoleCapture::Realm {
                role: group("role")?,
            },
            PatternKind::Client => RoleCapture::Client {
                client: group("client")?,
                role: group("role")?,
            },
            PatternKind::Search => RoleCapture::Search {
                value: group("value")?,
            },
        };
        Some(capture)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_string_match_only() {
        let pattern = RolePattern::realm(r"role:(?<role>\w+)").unwrap();

        assert!(pattern.capture("role:admin").is_some());
        assert!(pattern.capture("xrole:admin").is_none());
        assert!(pattern.capture("role:admin!").is_none());
    }

    #[test]
    fn capture_extracts_named_groups() {
        let pattern = RolePattern::client(r"(?<client>\w+):(?<role>\w+)").unwrap();

        let capture = pattern.capture("engineering:lead").unwrap();
        assert_eq!(
            capture,
            RoleCapture::Client {
                client: "engineering".to_string(),
                role: "lead".to_string(),
            }
        );
    }

    #[test]
    fn wrong_arity_fails_closed() {
        // Two groups on a realm pattern.
        let pattern = RolePattern::realm(r"(?<client>\w+):(?<role>\w+)").unwrap();
        assert!(pattern.capture("engineering:lead").is_none());

        // One group on a client pattern.
        let pattern = RolePattern::client(r"role:(?<role>\w+)").unwrap();
        assert!(pattern.capture("role:admin").is_none());
    }

    #[test]
    fn unnamed_groups_count_toward_arity() {
        let pattern = RolePattern::realm(r"(role):(?<role>\w+)").unwrap();

        assert!(pattern.capture("role:admin").is_none());
    }

    #[test]
    fn missing_named_group_is_a_no_match() {
        // Right arity, wrong group name.
        let pattern = RolePattern::realm(r"role:(?<name>\w+)").unwrap();

        assert!(pattern.capture("role:admin").is_none());
    }

    #[test]
    fn optional_group_that_did_not_participate_is_a_no_match() {
        let pattern = RolePattern::realm(r"role:?(?<role>\w+)?").unwrap();

        assert!(pattern.capture("role:").is_none());
    }

    #[test]
    fn invalid_expression_fails_compilation() {
        let err = RolePattern::realm(r"role:(?<role>").unwrap_err();

        assert!(err.is_pattern_error());
    }

    #[test]
    fn regex_controls_its_own_case_sensitivity() {
        let pattern = RolePattern::realm(r"(?i)ROLE:(?<role>\w+)").unwrap();

        assert!(pattern.capture("role:admin").is_some());
    }

    #[test]
    fn search_pattern_captures_value() {
        let pattern = RolePattern::search(r"ou=(?<value>\w+)").unwrap();

        assert_eq!(
            pattern.capture("ou=staff"),
            Some(RoleCapture::Search {
                value: "staff".to_string()
            })
        );
    }
}
