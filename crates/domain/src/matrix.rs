use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use pandatur_core::AppError;
use serde::{Deserialize, Serialize};

use crate::vocabulary::{Action, Category, Level};

/// One cell of the role matrix.
///
/// Ordering is category-major, action-minor in vocabulary order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PermissionKey {
    category: Category,
    action: Action,
}

impl PermissionKey {
    /// Creates a permission key.
    #[must_use]
    pub fn new(category: Category, action: Action) -> Self {
        Self { category, action }
    }

    /// Returns the category.
    #[must_use]
    pub fn category(&self) -> Category {
        self.category
    }

    /// Returns the action.
    #[must_use]
    pub fn action(&self) -> Action {
        self.action
    }

    /// Returns every key of the vocabulary in matrix order.
    pub fn all() -> impl Iterator<Item = Self> {
        Category::all().iter().flat_map(|category| {
            Action::all()
                .iter()
                .map(move |action| Self::new(*category, *action))
        })
    }
}

impl Display for PermissionKey {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}_{}", self.category, self.action)
    }
}

impl FromStr for PermissionKey {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (category, action) = value.rsplit_once('_').ok_or_else(|| {
            AppError::Validation(format!(
                "permission key '{value}' must look like <CATEGORY>_<ACTION>"
            ))
        })?;

        Ok(Self::new(category.parse()?, action.parse()?))
    }
}

/// Mapping from permission key to level.
///
/// A key absent from the matrix is equivalent to [`Level::Denied`]. Explicit
/// `Denied` entries are kept so that an individual override can mask a group
/// grant during [`RoleMatrix::overlay`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleMatrix {
    cells: BTreeMap<PermissionKey, Level>,
}

impl RoleMatrix {
    /// Creates an empty matrix where every key is denied.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the effective level for a key.
    #[must_use]
    pub fn level(&self, key: PermissionKey) -> Level {
        self.cells.get(&key).copied().unwrap_or_default()
    }

    /// Returns the effective level for a category and action.
    #[must_use]
    pub fn level_for(&self, category: Category, action: Action) -> Level {
        self.level(PermissionKey::new(category, action))
    }

    /// Returns the explicitly stored level, if any.
    #[must_use]
    pub fn get(&self, key: PermissionKey) -> Option<Level> {
        self.cells.get(&key).copied()
    }

    /// Stores a level for a key, or removes the key when `level` is `None`.
    ///
    /// Returns the previously stored level.
    pub fn set(&mut self, key: PermissionKey, level: Option<Level>) -> Option<Level> {
        match level {
            Some(level) => self.cells.insert(key, level),
            None => self.cells.remove(&key),
        }
    }

    /// Returns the number of explicit entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns whether the matrix has no explicit entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterates explicit entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (PermissionKey, Level)> + '_ {
        self.cells.iter().map(|(key, level)| (*key, *level))
    }

    /// Returns a matrix where every entry of `overrides` replaces the
    /// entry of `self` for the same key.
    #[must_use]
    pub fn overlay(&self, overrides: &RoleMatrix) -> RoleMatrix {
        let mut merged = self.clone();
        merged
            .cells
            .extend(overrides.cells.iter().map(|(key, level)| (*key, *level)));
        merged
    }
}

impl FromIterator<(PermissionKey, Level)> for RoleMatrix {
    fn from_iter<T: IntoIterator<Item = (PermissionKey, Level)>>(iter: T) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}
