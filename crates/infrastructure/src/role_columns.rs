use pandatur_application::ingest_roles;
use pandatur_domain::{RoleMatrix, RoleToken, RolesPayload};

/// Converts a matrix into the `TEXT[]` column form.
///
/// Explicit `Denied` entries are written as `DENIED` tokens so individual
/// overrides survive a round trip through storage.
pub(crate) fn roles_to_column(roles: &RoleMatrix) -> Vec<String> {
    roles
        .iter()
        .map(|(key, level)| String::from(RoleToken::new(key, level)))
        .collect()
}

/// Normalizes a stored `TEXT[]` column into a matrix.
pub(crate) fn roles_from_column(tokens: Vec<String>, source: &str) -> RoleMatrix {
    ingest_roles(RolesPayload::Tokens(tokens), source)
}

#[cfg(test)]
mod tests {
    use pandatur_domain::{Action, Category, Level, PermissionKey, RoleMatrix};

    use super::{roles_from_column, roles_to_column};

    #[test]
    fn explicit_denied_entries_are_stored() {
        let roles = RoleMatrix::from_iter([
            (
                PermissionKey::new(Category::Leads, Action::View),
                Level::Denied,
            ),
            (
                PermissionKey::new(Category::Sales, Action::Edit),
                Level::Team,
            ),
        ]);

        let column = roles_to_column(&roles);

        assert_eq!(
            column,
            vec![
                "ROLE_LEADS_VIEW_DENIED".to_owned(),
                "ROLE_SALES_EDIT_TEAM".to_owned()
            ]
        );
        assert_eq!(roles_from_column(column, "test"), roles);
    }
}
