//! Permission checks evaluated against an effective role matrix.
//!
//! Every function here is a pure function of its inputs. Callers re-evaluate
//! whenever they need an answer; nothing is cached.

use std::fmt::{Display, Formatter};

use pandatur_core::UserId;
use serde::{Deserialize, Deserializer, Serialize};

use crate::matrix::RoleMatrix;
use crate::vocabulary::{Action, Category, Level};

/// Identifier of the user responsible for a record.
///
/// Endpoints send it either as a JSON number or as a string, so it is kept in
/// string form and compared against the current user id as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ResponsibleId(String);

impl ResponsibleId {
    /// Creates a responsible id from any displayable value.
    #[must_use]
    pub fn new(value: impl Display) -> Self {
        Self(value.to_string())
    }

    /// Returns the string form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns whether this id designates the given user.
    #[must_use]
    pub fn matches(&self, user_id: UserId) -> bool {
        self.0 == user_id.to_string()
    }
}

impl From<UserId> for ResponsibleId {
    fn from(value: UserId) -> Self {
        Self::new(value)
    }
}

impl<'de> Deserialize<'de> for ResponsibleId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(serde_json::Number),
            Text(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Number(number) => Self(number.to_string()),
            Raw::Text(text) => Self(text),
        })
    }
}

/// Record context for contextual checks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessContext {
    /// Owner or assignee of the record in context.
    #[serde(default)]
    pub responsible_id: Option<ResponsibleId>,
    /// Grants `IfResponsible` without comparing ids. Used when the caller
    /// already filtered by responsibility.
    #[serde(default)]
    pub skip_context_check: bool,
}

impl AccessContext {
    /// Context for a specific record.
    #[must_use]
    pub fn for_responsible(responsible_id: impl Into<ResponsibleId>) -> Self {
        Self {
            responsible_id: Some(responsible_id.into()),
            skip_context_check: false,
        }
    }

    /// Context for list-level actions that skip the responsibility check.
    #[must_use]
    pub fn skip_context_check() -> Self {
        Self {
            responsible_id: None,
            skip_context_check: true,
        }
    }
}

/// Outcome of a contextual check, with the basis of the decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessDecision {
    /// Level is `Allowed`.
    GrantedAllowed,
    /// Level is `Team`; narrowing by team membership is left to the backend.
    GrantedTeam,
    /// Level is `IfResponsible` and the current user is responsible.
    GrantedResponsible,
    /// Level is `IfResponsible` and the caller skipped the context check.
    GrantedContextSkipped,
    /// Level is `IfResponsible` but the record belongs to someone else or
    /// no record context was given.
    DeniedNotResponsible,
    /// Level is `Denied` or absent.
    DeniedLevel,
}

impl AccessDecision {
    /// Returns whether access is granted.
    #[must_use]
    pub fn is_granted(&self) -> bool {
        matches!(
            self,
            Self::GrantedAllowed
                | Self::GrantedTeam
                | Self::GrantedResponsible
                | Self::GrantedContextSkipped
        )
    }
}

impl Display for AccessDecision {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        let value = match self {
            Self::GrantedAllowed => "granted: allowed",
            Self::GrantedTeam => "granted: team",
            Self::GrantedResponsible => "granted: responsible",
            Self::GrantedContextSkipped => "granted: context check skipped",
            Self::DeniedNotResponsible => "denied: not responsible",
            Self::DeniedLevel => "denied: level",
        };
        formatter.write_str(value)
    }
}

/// Returns whether the effective level equals `required` exactly.
///
/// An absent key compares as `Denied`.
#[must_use]
pub fn has_strict_permission(
    roles: &RoleMatrix,
    category: Category,
    action: Action,
    required: Level,
) -> bool {
    roles.level_for(category, action) == required
}

/// Resolves a contextual check and explains the decision.
#[must_use]
pub fn resolve_access(
    roles: &RoleMatrix,
    current_user: UserId,
    category: Category,
    action: Action,
    context: &AccessContext,
) -> AccessDecision {
    match roles.level_for(category, action) {
        Level::Allowed => AccessDecision::GrantedAllowed,
        Level::Team => AccessDecision::GrantedTeam,
        Level::IfResponsible if context.skip_context_check => {
            AccessDecision::GrantedContextSkipped
        }
        Level::IfResponsible => match &context.responsible_id {
            Some(responsible_id) if responsible_id.matches(current_user) => {
                AccessDecision::GrantedResponsible
            }
            _ => AccessDecision::DeniedNotResponsible,
        },
        Level::Denied => AccessDecision::DeniedLevel,
    }
}

/// Returns whether a gated element should be rendered or enabled.
#[must_use]
pub fn can(
    roles: &RoleMatrix,
    current_user: UserId,
    category: Category,
    action: Action,
    context: &AccessContext,
) -> bool {
    resolve_access(roles, current_user, category, action, context).is_granted()
}
