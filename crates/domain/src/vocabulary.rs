//! Closed permission vocabulary shared by the codec, the evaluator and the
//! matrix editor.
//!
//! Category and action order is significant: it drives the deterministic
//! token order produced by [`crate::encode`].

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use pandatur_core::AppError;
use serde::{Deserialize, Serialize};

/// Functional module of the CRM that permissions are scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    /// User and role administration.
    Users,
    /// Dashboards and widgets.
    Dashboard,
    /// Tickets and leads.
    Leads,
    /// Client chat.
    Chat,
    /// Tasks.
    Task,
    /// Work schedules.
    Schedules,
    /// Analytics reports.
    Analytics,
    /// Sales reports.
    Sales,
    /// Call and activity logs.
    Logs,
}

impl Category {
    /// Returns every category in vocabulary order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[Category] = &[
            Category::Users,
            Category::Dashboard,
            Category::Leads,
            Category::Chat,
            Category::Task,
            Category::Schedules,
            Category::Analytics,
            Category::Sales,
            Category::Logs,
        ];

        ALL
    }

    /// Returns the uppercase wire name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Users => "USERS",
            Self::Dashboard => "DASHBOARD",
            Self::Leads => "LEADS",
            Self::Chat => "CHAT",
            Self::Task => "TASK",
            Self::Schedules => "SCHEDULES",
            Self::Analytics => "ANALYTICS",
            Self::Sales => "SALES",
            Self::Logs => "LOGS",
        }
    }
}

impl Display for Category {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|category| category.as_str() == value)
            .ok_or_else(|| AppError::Validation(format!("unknown permission category '{value}'")))
    }
}

/// Operation being gated within a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    /// Read access.
    View,
    /// Create access.
    Create,
    /// Update access.
    Edit,
    /// Delete access.
    Delete,
}

impl Action {
    /// Returns every action in vocabulary order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[Action] = &[Action::View, Action::Create, Action::Edit, Action::Delete];

        ALL
    }

    /// Returns the uppercase wire name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::View => "VIEW",
            Self::Create => "CREATE",
            Self::Edit => "EDIT",
            Self::Delete => "DELETE",
        }
    }
}

impl Display for Action {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|action| action.as_str() == value)
            .ok_or_else(|| AppError::Validation(format!("unknown permission action '{value}'")))
    }
}

/// Granted degree of access for one permission key.
///
/// Variants are declared in precedence order, so `Ord` compares strictness:
/// `Denied < IfResponsible < Team < Allowed`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Level {
    /// No access. Implicit default for absent keys.
    #[default]
    Denied,
    /// Access only to records the user is responsible for.
    IfResponsible,
    /// Access for anyone on the team.
    Team,
    /// Unconditional access.
    Allowed,
}

impl Level {
    /// Returns every level in display order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[Level] = &[
            Level::Denied,
            Level::IfResponsible,
            Level::Team,
            Level::Allowed,
        ];

        ALL
    }

    /// Returns the persisted level code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Denied => "DENIED",
            Self::IfResponsible => "IFRESPONSIBLE",
            Self::Team => "TEAM",
            Self::Allowed => "ALLOWED",
        }
    }

    /// Resolves a persisted level code. Codes are case-sensitive.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        Self::all().iter().copied().find(|level| level.code() == code)
    }

    /// Returns the color used by the matrix editor for this level.
    #[must_use]
    pub fn color(&self) -> &'static str {
        match self {
            Self::Denied => "red",
            Self::IfResponsible => "orange",
            Self::Team => "blue",
            Self::Allowed => "green",
        }
    }

    /// Returns the human label in the requested locale.
    #[must_use]
    pub fn label(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::Denied, Locale::Ro) => "Interzis",
            (Self::Denied, Locale::Ru) => "Запрещено",
            (Self::Denied, Locale::En) => "Denied",
            (Self::IfResponsible, Locale::Ro) => "Dacă este responsabil",
            (Self::IfResponsible, Locale::Ru) => "Если ответственный",
            (Self::IfResponsible, Locale::En) => "If responsible",
            (Self::Team, Locale::Ro) => "Echipa",
            (Self::Team, Locale::Ru) => "Команда",
            (Self::Team, Locale::En) => "Team",
            (Self::Allowed, Locale::Ro) => "Permis",
            (Self::Allowed, Locale::Ru) => "Разрешено",
            (Self::Allowed, Locale::En) => "Allowed",
        }
    }
}

impl Display for Level {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.code())
    }
}

/// Interface language used for labels and notifications.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// Romanian.
    #[default]
    Ro,
    /// Russian.
    Ru,
    /// English.
    En,
}

impl Locale {
    /// Returns the stable language code.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ro => "ro",
            Self::Ru => "ru",
            Self::En => "en",
        }
    }
}

impl FromStr for Locale {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "ro" => Ok(Self::Ro),
            "ru" => Ok(Self::Ru),
            "en" => Ok(Self::En),
            other => Err(AppError::Validation(format!(
                "unsupported language '{other}', expected one of ro, ru, en"
            ))),
        }
    }
}
