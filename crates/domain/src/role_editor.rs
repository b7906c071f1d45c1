//! Working copy of a role matrix while it is being edited.
//!
//! The editor tracks whether the user still follows the permission group it
//! was loaded with. Any edit that makes the encoded token set differ from the
//! group's token set detaches the group and marks the matrix as custom; only
//! [`RoleEditor::select_group`] attaches a group again.

use std::collections::BTreeSet;

use crate::matrix::{PermissionKey, RoleMatrix};
use crate::permission_group::{PermissionGroup, UserRoles};
use crate::role_token::{RoleToken, encode};
use crate::vocabulary::{Action, Category, Level};

/// Effective level change of one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellChange {
    /// Edited cell.
    pub key: PermissionKey,
    /// Effective level before the edit.
    pub previous: Level,
    /// Effective level after the edit.
    pub current: Level,
}

impl CellChange {
    /// Returns whether the effective level changed.
    #[must_use]
    pub fn is_changed(&self) -> bool {
        self.previous != self.current
    }
}

/// Token set difference between the working matrix and the loaded group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenDiff {
    /// Tokens present in the working matrix but not in the group.
    pub added: Vec<RoleToken>,
    /// Tokens present in the group but not in the working matrix.
    pub removed: Vec<RoleToken>,
}

impl TokenDiff {
    /// Computes the difference in both directions.
    #[must_use]
    pub fn between(current: &[RoleToken], baseline: &BTreeSet<RoleToken>) -> Self {
        let current: BTreeSet<&RoleToken> = current.iter().collect();

        Self {
            added: current
                .iter()
                .filter(|token| !baseline.contains(**token))
                .map(|token| (*token).clone())
                .collect(),
            removed: baseline
                .iter()
                .filter(|token| !current.contains(token))
                .cloned()
                .collect(),
        }
    }

    /// Returns whether both directions are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// What must be persisted to store the editor state for a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleSaveRequest {
    /// Assign the group and drop individual overrides.
    AssignGroup {
        /// Group to assign.
        permission_id: i64,
    },
    /// Store individual tokens and detach any group.
    StoreIndividual {
        /// Encoded working matrix.
        roles: Vec<RoleToken>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct GroupSelection {
    permission_id: i64,
    permission_name: String,
}

/// Editor state for one role matrix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleEditor {
    matrix: RoleMatrix,
    selected_group: Option<GroupSelection>,
    group_tokens: BTreeSet<RoleToken>,
    has_custom_changes: bool,
}

impl RoleEditor {
    /// Editor with an empty matrix and no group.
    #[must_use]
    pub fn blank() -> Self {
        Self::default()
    }

    /// Editor over a free-standing matrix, such as a group being edited.
    #[must_use]
    pub fn from_matrix(matrix: RoleMatrix) -> Self {
        Self {
            matrix,
            ..Self::default()
        }
    }

    /// Editor over an existing group's matrix.
    #[must_use]
    pub fn for_group(group: &PermissionGroup) -> Self {
        Self::from_matrix(group.roles().clone())
    }

    /// Editor for a user record.
    ///
    /// The user's own entries take precedence over the group's entries per
    /// key. The group stays selected until the first diverging edit.
    #[must_use]
    pub fn for_user(user: &UserRoles, group: Option<&PermissionGroup>) -> Self {
        let group = group.filter(|group| user.permission_group_id == Some(group.permission_id()));
        let mut editor = Self {
            matrix: user.effective_roles(group),
            selected_group: group.map(|group| GroupSelection {
                permission_id: group.permission_id(),
                permission_name: group.permission_name().as_str().to_owned(),
            }),
            group_tokens: group
                .map(|group| group.tokens().into_iter().collect())
                .unwrap_or_default(),
            has_custom_changes: false,
        };
        editor.has_custom_changes = !editor.diff().is_empty();
        editor
    }

    /// Returns the working matrix.
    #[must_use]
    pub fn matrix(&self) -> &RoleMatrix {
        &self.matrix
    }

    /// Returns the effective level of one cell.
    #[must_use]
    pub fn level(&self, category: Category, action: Action) -> Level {
        self.matrix.level_for(category, action)
    }

    /// Returns the selected group id, if the matrix still follows a group.
    #[must_use]
    pub fn selected_group_id(&self) -> Option<i64> {
        self.selected_group
            .as_ref()
            .map(|selection| selection.permission_id)
    }

    /// Returns the selected group name.
    #[must_use]
    pub fn selected_group_name(&self) -> Option<&str> {
        self.selected_group
            .as_ref()
            .map(|selection| selection.permission_name.as_str())
    }

    /// Returns whether the matrix diverged from the loaded group.
    #[must_use]
    pub fn has_custom_changes(&self) -> bool {
        self.has_custom_changes
    }

    /// Returns the encoded working matrix.
    #[must_use]
    pub fn tokens(&self) -> Vec<RoleToken> {
        encode(&self.matrix)
    }

    /// Returns the difference between the working matrix and the loaded group.
    #[must_use]
    pub fn diff(&self) -> TokenDiff {
        TokenDiff::between(&self.tokens(), &self.group_tokens)
    }

    /// Stores a level for a cell; `None` reverts the cell to implicit `Denied`.
    pub fn set_level(
        &mut self,
        category: Category,
        action: Action,
        level: Option<Level>,
    ) -> CellChange {
        let key = PermissionKey::new(category, action);
        let previous = self.matrix.level(key);
        self.matrix.set(key, level);
        self.commit_edit();

        CellChange {
            key,
            previous,
            current: self.matrix.level(key),
        }
    }

    /// Applies a click on a level button.
    ///
    /// Clicking the active level clears the cell. `Denied` always clears it,
    /// since absence already encodes `Denied`.
    pub fn toggle_level(&mut self, category: Category, action: Action, level: Level) -> CellChange {
        let key = PermissionKey::new(category, action);
        let next = match (self.matrix.get(key), level) {
            (_, Level::Denied) => None,
            (Some(active), _) if active == level => None,
            _ => Some(level),
        };

        self.set_level(category, action, next)
    }

    /// Attaches a group and replaces the working matrix with the group's
    /// matrix, discarding custom entries.
    pub fn select_group(&mut self, group: &PermissionGroup) {
        self.matrix = group.roles().clone();
        self.group_tokens = group.tokens().into_iter().collect();
        self.selected_group = Some(GroupSelection {
            permission_id: group.permission_id(),
            permission_name: group.permission_name().as_str().to_owned(),
        });
        self.has_custom_changes = false;
    }

    /// Detaches the group while keeping the working matrix.
    pub fn clear_group_selection(&mut self) {
        if self.selected_group.take().is_some() {
            self.has_custom_changes = true;
        }
    }

    /// Returns what must be persisted for a user.
    #[must_use]
    pub fn save_request(&self) -> RoleSaveRequest {
        match &self.selected_group {
            Some(selection) if !self.has_custom_changes => RoleSaveRequest::AssignGroup {
                permission_id: selection.permission_id,
            },
            _ => RoleSaveRequest::StoreIndividual {
                roles: self.tokens(),
            },
        }
    }

    fn commit_edit(&mut self) {
        if !self.diff().is_empty() {
            self.has_custom_changes = true;
            self.selected_group = None;
        }
    }
}
