use pandatur_core::AppError;
use pandatur_domain::{
    AccessContext, AccessDecision, Action, Category, Level, has_strict_permission, resolve_access,
};
use tracing::debug;

use super::*;

impl AuthorizationService {
    /// Ensures the actor holds exactly `Allowed` for the key.
    pub async fn require_permission(
        &self,
        actor: &UserIdentity,
        category: Category,
        action: Action,
    ) -> AppResult<()> {
        let matrix = self.actor_matrix(actor).await?;

        if has_strict_permission(&matrix, category, action, Level::Allowed) {
            return Ok(());
        }

        Err(AppError::Forbidden(format!(
            "user '{}' is missing permission '{category}_{action}'",
            actor.user_id()
        )))
    }

    /// Resolves a contextual check for the actor.
    pub async fn resolve_access(
        &self,
        actor: &UserIdentity,
        category: Category,
        action: Action,
        context: &AccessContext,
    ) -> AppResult<AccessDecision> {
        let matrix = self.actor_matrix(actor).await?;
        let decision = resolve_access(&matrix, actor.user_id(), category, action, context);

        debug!(
            user_id = %actor.user_id(),
            %category,
            %action,
            %decision,
            "resolved contextual access"
        );

        Ok(decision)
    }

    /// Returns whether the actor passes a contextual check.
    pub async fn can(
        &self,
        actor: &UserIdentity,
        category: Category,
        action: Action,
        context: &AccessContext,
    ) -> AppResult<bool> {
        Ok(self
            .resolve_access(actor, category, action, context)
            .await?
            .is_granted())
    }

    /// Ensures the actor passes a contextual check.
    pub async fn require_access(
        &self,
        actor: &UserIdentity,
        category: Category,
        action: Action,
        context: &AccessContext,
    ) -> AppResult<()> {
        let decision = self
            .resolve_access(actor, category, action, context)
            .await?;

        if decision.is_granted() {
            return Ok(());
        }

        Err(AppError::Forbidden(format!(
            "user '{}' cannot {action} {category} ({decision})",
            actor.user_id()
        )))
    }
}
