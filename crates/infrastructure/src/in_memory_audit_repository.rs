use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pandatur_application::{AuditEvent, AuditRepository};
use pandatur_core::AppResult;
use tokio::sync::RwLock;
use tracing::debug;

/// Audit event with the time it was appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedAuditEvent {
    /// Appended event.
    pub event: AuditEvent,
    /// Append time.
    pub recorded_at: DateTime<Utc>,
}

/// In-memory append-only audit repository.
#[derive(Debug, Default)]
pub struct InMemoryAuditRepository {
    events: RwLock<Vec<RecordedAuditEvent>>,
}

impl InMemoryAuditRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all recorded events, oldest first.
    pub async fn events(&self) -> Vec<RecordedAuditEvent> {
        self.events.read().await.clone()
    }
}

#[async_trait]
impl AuditRepository for InMemoryAuditRepository {
    async fn append_event(&self, event: AuditEvent) -> AppResult<()> {
        debug!(
            subject = %event.subject,
            action = event.action.as_str(),
            resource_type = %event.resource_type,
            resource_id = %event.resource_id,
            "recorded audit event"
        );

        self.events.write().await.push(RecordedAuditEvent {
            event,
            recorded_at: Utc::now(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pandatur_application::{AuditEvent, AuditRepository};
    use pandatur_core::AppResult;
    use pandatur_domain::AuditAction;

    use super::InMemoryAuditRepository;

    #[tokio::test]
    async fn events_are_kept_in_append_order() -> AppResult<()> {
        let repository = InMemoryAuditRepository::new();
        for action in [
            AuditAction::PermissionGroupCreated,
            AuditAction::PermissionGroupDeleted,
        ] {
            repository
                .append_event(AuditEvent {
                    subject: "1".to_owned(),
                    action,
                    resource_type: "permission_group".to_owned(),
                    resource_id: "4".to_owned(),
                    detail: None,
                })
                .await?;
        }

        let events = repository.events().await;

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].event.action, AuditAction::PermissionGroupCreated);
        assert!(events[0].recorded_at <= events[1].recorded_at);
        Ok(())
    }
}
