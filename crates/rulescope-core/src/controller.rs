//! Page controller: the selection state machine
//!
//! The controller owns the catalog, the selection, the selector view, the
//! rendered outline and the open detail views. User events and server
//! completions are applied through the methods below; every method that needs
//! the server returns the `ApiRequest` to execute instead of executing it, so
//! the state machine runs the same with a real transport or none at all.
//!
//! Completions are applied in arrival order with no sequence check: when two
//! rule queries overlap, whichever completes last decides the outline.

use indexmap::IndexMap;

use crate::errors::{Result, RulesError};
use crate::log_op_skip;
use crate::model::{CatalogInfo, RuleMap};
use crate::query::{self, ApiRequest};
use crate::render::{render_rules, ArtifactRef, Outline};
use crate::selection::SelectionState;
use crate::selectors::SelectorView;

/// An artifact detail page shown in its own named view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub artifact: ArtifactRef,
    pub html: String,
    /// How many times this view has been (re)opened
    pub opens: u32,
}

/// Open detail views keyed by view name (`name + appId`)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DetailViews {
    views: IndexMap<String, DetailView>,
}

impl DetailViews {
    /// Show `html` for `artifact`, reusing its view if already open
    pub fn open(&mut self, artifact: &ArtifactRef, html: String) -> &DetailView {
        let view = self
            .views
            .entry(artifact.view_name())
            .or_insert_with(|| DetailView {
                artifact: artifact.clone(),
                html: String::new(),
                opens: 0,
            });
        view.html = html;
        view.opens += 1;
        view
    }

    /// Look up a view by name
    pub fn get(&self, view_name: &str) -> Option<&DetailView> {
        self.views.get(view_name)
    }

    /// Views in the order they were first opened
    pub fn iter(&self) -> impl Iterator<Item = (&String, &DetailView)> {
        self.views.iter()
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }
}

/// The explorer's state machine
#[derive(Debug, Default)]
pub struct PageController {
    catalog: Option<CatalogInfo>,
    selection: SelectionState,
    selectors: SelectorView,
    outline: Outline,
    detail_views: DetailViews,
    listeners_installed: bool,
}

impl PageController {
    pub fn new() -> Self {
        Self::default()
    }

    // ===== Lifecycle =====

    /// Start the page: clear the outline, install listeners, request the catalog
    ///
    /// Returns `None` when already initialised; listeners are installed once.
    pub fn init(&mut self) -> Option<ApiRequest> {
        self.outline.clear();
        if self.listeners_installed {
            tracing::debug!("init called again; listeners already installed");
            return None;
        }
        self.listeners_installed = true;
        Some(query::catalog_info())
    }

    /// Whether `init` has run
    pub fn is_initialised(&self) -> bool {
        self.listeners_installed
    }

    /// Store the catalog and build selectors for its first engine
    ///
    /// The catalog is immutable once loaded; a second load is ignored.
    ///
    /// # Errors
    ///
    /// Propagates selector rebuild failures (not expected for a catalog's own
    /// default engine).
    pub fn on_catalog_loaded(&mut self, catalog: CatalogInfo) -> Result<()> {
        if self.catalog.is_some() {
            tracing::warn!("catalog already loaded; ignoring reload");
            return Ok(());
        }
        self.selectors.build_engine_options(&catalog);
        let default_engine = catalog.default_engine().map(str::to_string);
        self.catalog = Some(catalog);

        match default_engine {
            Some(engine) => self.apply_engine(engine),
            None => {
                tracing::warn!("catalog lists no engines");
                Ok(())
            }
        }
    }

    /// Any request failed: clear the outline and stay interactive
    pub fn on_request_failed(&mut self) {
        self.outline.clear();
    }

    // ===== User events =====

    /// Engine dropdown changed
    ///
    /// Clears the outline and rebuilds the selectors from scratch, discarding
    /// the group and all category selections.
    ///
    /// # Errors
    ///
    /// `CatalogNotLoaded` before the catalog arrives, `UnknownEngine` for ids
    /// the catalog does not list. State is unchanged on error.
    pub fn select_engine(&mut self, engine: &str) -> Result<()> {
        let catalog = self.catalog()?;
        catalog.require_engine(engine)?;
        self.apply_engine(engine.to_string())
    }

    /// Group dropdown changed
    ///
    /// Clears the outline; returns the by-group query for a non-empty group and
    /// `None` for the empty (idle) option.
    ///
    /// # Errors
    ///
    /// `CatalogNotLoaded` before the catalog arrives, `UnknownGroup` for a
    /// group the dropdown does not offer. State is unchanged on error.
    pub fn select_group(&mut self, group: &str) -> Result<Option<ApiRequest>> {
        let engine = self.current_engine()?.to_string();
        if !group.is_empty() && !self.catalog()?.require_engine(&engine)?.has_group(group) {
            return Err(RulesError::UnknownGroup {
                engine,
                group: group.to_string(),
            });
        }

        self.selection.select_group(group);
        self.outline.clear();
        let request = query::rules_by_group(&engine, group);
        if request.is_none() {
            log_op_skip!("select_group", engine = engine.as_str(), reason = "empty group");
        }
        Ok(request)
    }

    /// A category multi-select changed to exactly `values`
    ///
    /// # Errors
    ///
    /// `UnknownCategory` / `UnknownCategoryValue` for anything the current
    /// selectors do not offer. State is unchanged on error.
    pub fn select_category_values(&mut self, category: &str, values: Vec<String>) -> Result<()> {
        let engine = self.current_engine()?.to_string();
        let row = self
            .selectors
            .category_row(category)
            .ok_or_else(|| RulesError::UnknownCategory {
                engine,
                category: category.to_string(),
            })?;
        if let Some(value) = values.iter().find(|v| !row.offers(v)) {
            return Err(RulesError::UnknownCategoryValue {
                category: category.to_string(),
                value: value.clone(),
            });
        }

        self.selection.set_category_values(category, values);
        Ok(())
    }

    /// "Apply categories" clicked
    ///
    /// Clears the outline and always returns a by-category query, even with
    /// no category selected.
    ///
    /// # Errors
    ///
    /// `CatalogNotLoaded` before the catalog arrives.
    pub fn apply_categories(&mut self) -> Result<ApiRequest> {
        let engine = self.current_engine()?.to_string();
        self.outline.clear();
        Ok(query::rules_by_category(
            &engine,
            &self.selectors.category_rows,
            &self.selection,
        ))
    }

    /// An artifact reference was clicked
    pub fn open_artifact(&self, artifact: &ArtifactRef) -> ApiRequest {
        query::ncube_detail(artifact)
    }

    // ===== Completions =====

    /// A rules query completed: replace the outline with the new rules
    pub fn on_rules_loaded(&mut self, rule_map: &RuleMap) {
        self.outline.clear();
        render_rules(&mut self.outline, rule_map);
        tracing::debug!(rule_types = rule_map.len(), "outline rendered");
    }

    /// An artifact detail fetch completed
    pub fn on_artifact_loaded(&mut self, artifact: &ArtifactRef, html: String) -> &DetailView {
        self.detail_views.open(artifact, html)
    }

    // ===== Accessors =====

    /// The loaded catalog
    ///
    /// # Errors
    ///
    /// `CatalogNotLoaded` before `ui/info` has answered.
    pub fn catalog(&self) -> Result<&CatalogInfo> {
        self.catalog.as_ref().ok_or(RulesError::CatalogNotLoaded)
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn selectors(&self) -> &SelectorView {
        &self.selectors
    }

    pub fn outline(&self) -> &Outline {
        &self.outline
    }

    pub fn detail_views(&self) -> &DetailViews {
        &self.detail_views
    }

    fn current_engine(&self) -> Result<&str> {
        self.catalog()?;
        self.selection.engine().ok_or(RulesError::CatalogNotLoaded)
    }

    fn apply_engine(&mut self, engine: String) -> Result<()> {
        self.outline.clear();
        self.selection.select_engine(engine.as_str());
        let catalog = self.catalog.as_ref().ok_or(RulesError::CatalogNotLoaded)?;
        self.selectors.rebuild(catalog, &engine)
    }
}
