//! User selection state
//!
//! Group and category filters are two separate query modes driven by
//! separate user actions; neither clears the other. Only an engine change
//! discards both.

use indexmap::{IndexMap, IndexSet};

use crate::model::{CategoryName, CategoryValue, EngineId, GroupName};

/// Category name → values chosen in that category's multi-select
pub type CategoryFilters = IndexMap<CategoryName, IndexSet<CategoryValue>>;

/// What the user currently has selected
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectionState {
    engine: Option<EngineId>,
    group: GroupName,
    category_filters: CategoryFilters,
}

impl SelectionState {
    /// Create an empty selection (no engine yet)
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently selected engine, if the catalog has produced one
    pub fn engine(&self) -> Option<&str> {
        self.engine.as_deref()
    }

    /// Currently selected group; empty means idle
    pub fn group(&self) -> &str {
        &self.group
    }

    /// Current category selections
    pub fn category_filters(&self) -> &CategoryFilters {
        &self.category_filters
    }

    /// Values selected for one category (empty when none)
    pub fn selected_values(&self, category: &str) -> Option<&IndexSet<CategoryValue>> {
        self.category_filters.get(category)
    }

    /// Switch engine, discarding the group and every category selection
    pub fn select_engine(&mut self, engine: impl Into<EngineId>) {
        self.engine = Some(engine.into());
        self.group.clear();
        self.category_filters.clear();
    }

    /// Set the group dropdown value
    pub fn select_group(&mut self, group: impl Into<GroupName>) {
        self.group = group.into();
    }

    /// Replace the selection of one category's multi-select
    ///
    /// Selecting nothing removes the category from the filters entirely.
    pub fn set_category_values<I>(&mut self, category: impl Into<CategoryName>, values: I)
    where
        I: IntoIterator<Item = CategoryValue>,
    {
        let category = category.into();
        let values: IndexSet<CategoryValue> = values.into_iter().collect();
        if values.is_empty() {
            self.category_filters.shift_remove(&category);
        } else {
            self.category_filters.insert(category, values);
        }
    }

    /// Check whether any category has a selection
    pub fn has_category_filters(&self) -> bool {
        !self.category_filters.is_empty()
    }
}
