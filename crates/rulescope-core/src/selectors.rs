//! Selector view model: the engine dropdown, the group dropdown and the
//! category filter rows, as plain data a UI adapter can draw.

use serde::Serialize;

use crate::errors::Result;
use crate::model::CatalogInfo;
use crate::selection::SelectionState;

/// One `<option>` of a dropdown or multi-select
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub value: String,
    pub text: String,
}

impl SelectOption {
    /// Option whose value and visible text are the same string
    pub fn plain(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            text: value.clone(),
            value,
        }
    }
}

/// One category filter row: a label and a multi-select over its values
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryRow {
    pub label: String,
    pub options: Vec<SelectOption>,
}

impl CategoryRow {
    /// Check whether the multi-select offers `value`
    pub fn offers(&self, value: &str) -> bool {
        self.options.iter().any(|o| o.value == value)
    }

    /// The selected subset of this row's options, in option order
    pub fn selected_in_order(&self, selection: &SelectionState) -> Vec<String> {
        let Some(chosen) = selection.selected_values(&self.label) else {
            return Vec::new();
        };
        self.options
            .iter()
            .filter(|o| chosen.contains(&o.value))
            .map(|o| o.value.clone())
            .collect()
    }
}

/// Everything the selector area shows
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SelectorView {
    pub engine_options: Vec<SelectOption>,
    pub group_options: Vec<SelectOption>,
    pub category_rows: Vec<CategoryRow>,
    pub category_form_visible: bool,
}

impl SelectorView {
    /// Create an empty view (nothing loaded yet)
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill the engine dropdown from the catalog, in catalog order
    pub fn build_engine_options(&mut self, catalog: &CatalogInfo) {
        self.engine_options = catalog
            .engine_ids()
            .map(|engine| SelectOption::plain(engine.as_str()))
            .collect();
    }

    /// Rebuild the group dropdown and category rows for `engine`
    ///
    /// Previous content is discarded, so rebuilding twice for the same engine
    /// gives the same view.
    ///
    /// # Errors
    ///
    /// Returns `UnknownEngine` if the catalog does not list `engine`; the view
    /// is left cleared in that case.
    pub fn rebuild(&mut self, catalog: &CatalogInfo, engine: &str) -> Result<()> {
        self.clear_engine_selectors();
        let descriptor = catalog.require_engine(engine)?;

        self.group_options.push(SelectOption::plain(""));
        self.group_options.extend(
            descriptor
                .groups
                .iter()
                .map(|g| SelectOption::plain(g.as_str())),
        );

        self.category_rows = descriptor
            .categories
            .iter()
            .map(|(label, values)| CategoryRow {
                label: label.clone(),
                options: values
                    .iter()
                    .map(|v| SelectOption::plain(v.as_str()))
                    .collect(),
            })
            .collect();
        self.category_form_visible = descriptor.has_categories();

        tracing::debug!(
            engine = engine,
            groups = descriptor.groups.len(),
            category_count = self.category_rows.len(),
            "selectors rebuilt"
        );
        Ok(())
    }

    /// Look up a category row by its label
    pub fn category_row(&self, label: &str) -> Option<&CategoryRow> {
        self.category_rows.iter().find(|r| r.label == label)
    }

    /// Group dropdown values in display order, including the leading empty option
    pub fn group_values(&self) -> Vec<&str> {
        self.group_options.iter().map(|o| o.value.as_str()).collect()
    }

    fn clear_engine_selectors(&mut self) {
        self.group_options.clear();
        self.category_rows.clear();
        self.category_form_visible = false;
    }
}
