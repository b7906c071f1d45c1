//! User-facing notifications derived from backend responses.

use pandatur_core::AppError;
use pandatur_domain::Locale;
use serde::Serialize;
use serde_json::Value;

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// Operation completed.
    Success,
    /// Operation rejected because of user input.
    Warning,
    /// Operation failed.
    Error,
}

/// Message shown to the user after an operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    /// Severity.
    pub kind: NotificationKind,
    /// Display text.
    pub message: String,
}

impl Notification {
    /// Success notification with the given text.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
        }
    }

    /// Error notification extracted from a backend error body.
    ///
    /// Looks at `message`, `error` and `detail` in that order and falls back
    /// to a localized generic text when none holds a non-empty string.
    #[must_use]
    pub fn from_error_body(body: &Value, locale: Locale) -> Self {
        let message = ["message", "error", "detail"]
            .iter()
            .find_map(|field| body.get(field).and_then(extract_text))
            .or_else(|| extract_text(body))
            .unwrap_or_else(|| generic_error(locale).to_owned());

        Self {
            kind: NotificationKind::Error,
            message,
        }
    }

    /// Notification for a failed application operation.
    #[must_use]
    pub fn from_app_error(error: &AppError, locale: Locale) -> Self {
        match error {
            AppError::Validation(message) => Self {
                kind: NotificationKind::Warning,
                message: message.clone(),
            },
            AppError::Forbidden(_) | AppError::Unauthorized(_) => Self {
                kind: NotificationKind::Error,
                message: access_denied(locale).to_owned(),
            },
            AppError::NotFound(message) | AppError::Conflict(message) => Self {
                kind: NotificationKind::Error,
                message: message.clone(),
            },
            AppError::Internal(_) => Self {
                kind: NotificationKind::Error,
                message: generic_error(locale).to_owned(),
            },
        }
    }
}

fn extract_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) if !text.trim().is_empty() => Some(text.trim().to_owned()),
        Value::Array(items) => {
            let parts = items.iter().filter_map(extract_text).collect::<Vec<_>>();
            (!parts.is_empty()).then(|| parts.join("; "))
        }
        _ => None,
    }
}

fn generic_error(locale: Locale) -> &'static str {
    match locale {
        Locale::Ro => "A apărut o eroare. Încercați din nou.",
        Locale::Ru => "Произошла ошибка. Попробуйте ещё раз.",
        Locale::En => "Something went wrong. Please try again.",
    }
}

fn access_denied(locale: Locale) -> &'static str {
    match locale {
        Locale::Ro => "Nu aveți permisiunea pentru această acțiune.",
        Locale::Ru => "У вас нет прав для этого действия.",
        Locale::En => "You do not have permission for this action.",
    }
}

#[cfg(test)]
mod tests {
    use pandatur_core::AppError;
    use pandatur_domain::Locale;
    use serde_json::json;

    use super::{Notification, NotificationKind};

    #[test]
    fn error_body_prefers_message_field() {
        let notification = Notification::from_error_body(
            &json!({"error": "bad request", "message": "Group name taken"}),
            Locale::En,
        );

        assert_eq!(notification.kind, NotificationKind::Error);
        assert_eq!(notification.message, "Group name taken");
    }

    #[test]
    fn error_body_joins_detail_lists() {
        let notification = Notification::from_error_body(
            &json!({"detail": ["name is required", "roles are invalid"]}),
            Locale::En,
        );

        assert_eq!(notification.message, "name is required; roles are invalid");
    }

    #[test]
    fn unreadable_body_uses_localized_fallback() {
        let notification = Notification::from_error_body(&json!({"status": 500}), Locale::Ru);
        assert_eq!(notification.message, "Произошла ошибка. Попробуйте ещё раз.");

        let notification = Notification::from_error_body(&json!({"message": "  "}), Locale::Ro);
        assert_eq!(notification.message, "A apărut o eroare. Încercați din nou.");
    }

    #[test]
    fn validation_errors_are_warnings() {
        let notification = Notification::from_app_error(
            &AppError::Validation("permission group name is required".to_owned()),
            Locale::En,
        );

        assert_eq!(notification.kind, NotificationKind::Warning);
        assert_eq!(notification.message, "permission group name is required");
    }

    #[test]
    fn internal_errors_hide_details() {
        let notification = Notification::from_app_error(
            &AppError::Internal("connection refused".to_owned()),
            Locale::En,
        );

        assert_eq!(notification.kind, NotificationKind::Error);
        assert!(!notification.message.contains("connection"));
    }
}
