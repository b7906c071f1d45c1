use pandatur_application::{AuthorizationService, SecurityAdminService};
use pandatur_domain::Locale;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub security_admin_service: SecurityAdminService,
    pub authorization_service: AuthorizationService,
    pub locale: Locale,
}
