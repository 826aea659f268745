//! Explorer session: drives a `PageController` over a `Transport`
//!
//! ## Logging Ownership
//!
//! The session owns lifecycle logging for server calls:
//! - `log_op_start!` when a request leaves
//! - `log_op_end!` when a usable answer was applied
//! - `log_op_error!` on transport or decode failure
//!
//! Every call carries its own `RequestId`, so interleaved calls can be told
//! apart. The controller and transport only use `tracing::debug!`.
//!
//! ## Overlapping requests
//!
//! `fetch` only borrows the session immutably and returns a `Completion`.
//! Several fetches may be in flight at once; each completion is applied with
//! `apply_rules` in whatever order the caller receives them, and the last one
//! applied decides the outline.

use std::time::Instant;

use rulescope_core::{
    ApiRequest, ArtifactRef, CatalogInfo, DetailView, ExError, NCubeHtml, PageController, RuleMap,
};
use rulescope_core::{log_op_end, log_op_error, log_op_start};
use rulescope_core_types::RequestId;
use serde_json::Value;

use crate::errors::{decode_error, Result};
use crate::transport::Transport;

/// The outcome of one server call, not yet applied to the controller
#[derive(Debug)]
pub struct Completion {
    pub request_id: RequestId,
    pub request: ApiRequest,
    pub outcome: Result<Value>,
    started: Instant,
}

impl Completion {
    fn elapsed_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }
}

/// A page controller bound to a transport
pub struct ExplorerSession<T: Transport> {
    transport: T,
    controller: PageController,
}

impl<T: Transport> ExplorerSession<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            controller: PageController::new(),
        }
    }

    /// Initialise the page and load the catalog
    ///
    /// Calling `start` again clears the outline and loads nothing.
    ///
    /// # Errors
    ///
    /// Transport and decode failures of `ui/info`; the outline stays empty
    /// and `start` may be retried only on a fresh session.
    pub async fn start(&mut self) -> Result<()> {
        let Some(request) = self.controller.init() else {
            return Ok(());
        };
        let completion = self.fetch(&request).await;
        self.apply_catalog(completion)
    }

    /// Switch engine; no server call is needed
    ///
    /// # Errors
    ///
    /// `NotReady` before the catalog is loaded, `NotFound` for an unknown engine.
    pub fn select_engine(&mut self, engine: &str) -> Result<()> {
        Ok(self.controller.select_engine(engine)?)
    }

    /// Select a group and, when it is not the empty option, load its rules
    ///
    /// # Errors
    ///
    /// Selection errors from the controller, then transport and decode
    /// failures of `ui/rules` (the outline is left empty).
    pub async fn select_group(&mut self, group: &str) -> Result<()> {
        let Some(request) = self.controller.select_group(group)? else {
            return Ok(());
        };
        let completion = self.fetch(&request).await;
        self.apply_rules(completion)
    }

    /// Record the values chosen in one category multi-select
    ///
    /// # Errors
    ///
    /// `InvalidInput` for a category or value the selectors do not offer.
    pub fn select_category_values(&mut self, category: &str, values: Vec<String>) -> Result<()> {
        Ok(self.controller.select_category_values(category, values)?)
    }

    /// Run the by-category query for the current selection
    ///
    /// # Errors
    ///
    /// `NotReady` before the catalog is loaded, then transport and decode
    /// failures of `ui/rulesByCategory`.
    pub async fn apply_categories(&mut self) -> Result<()> {
        let request = self.controller.apply_categories()?;
        let completion = self.fetch(&request).await;
        self.apply_rules(completion)
    }

    /// Fetch an artifact's detail page into its named view
    ///
    /// # Errors
    ///
    /// Transport and decode failures of `ui/ncube`; like every failed call
    /// this also clears the outline.
    pub async fn open_artifact(&mut self, artifact: &ArtifactRef) -> Result<&DetailView> {
        let request = self.controller.open_artifact(artifact);
        let completion = self.fetch(&request).await;
        self.apply_artifact(artifact, completion)
    }

    // ===== Completions =====

    /// Execute a request without touching the controller
    pub async fn fetch(&self, request: &ApiRequest) -> Completion {
        let request_id = RequestId::new();
        log_op_start!(
            "fetch",
            request_id = request_id.as_str(),
            endpoint = request.endpoint.path()
        );
        let started = Instant::now();
        let outcome = self
            .transport
            .call(request)
            .await
            .map_err(|e| e.with_request_id(request_id.clone()));

        Completion {
            request_id,
            request: request.clone(),
            outcome,
            started,
        }
    }

    /// Apply a rules completion: replace the outline, or clear it on failure
    ///
    /// # Errors
    ///
    /// The completion's own failure, or a decode error if the body is not a
    /// rule map.
    pub fn apply_rules(&mut self, completion: Completion) -> Result<()> {
        let rule_map: RuleMap = self.decode(&completion)?;
        self.controller.on_rules_loaded(&rule_map);
        log_op_end!(
            "fetch",
            duration_ms = completion.elapsed_ms(),
            request_id = completion.request_id.as_str(),
            endpoint = completion.request.endpoint.path(),
            rule_types = rule_map.len()
        );
        Ok(())
    }

    fn apply_catalog(&mut self, completion: Completion) -> Result<()> {
        let catalog: CatalogInfo = self.decode(&completion)?;
        let engines = catalog.len();
        self.controller.on_catalog_loaded(catalog)?;
        log_op_end!(
            "fetch",
            duration_ms = completion.elapsed_ms(),
            request_id = completion.request_id.as_str(),
            endpoint = completion.request.endpoint.path(),
            engines = engines
        );
        Ok(())
    }

    fn apply_artifact(
        &mut self,
        artifact: &ArtifactRef,
        completion: Completion,
    ) -> Result<&DetailView> {
        let detail: NCubeHtml = self.decode(&completion)?;
        log_op_end!(
            "fetch",
            duration_ms = completion.elapsed_ms(),
            request_id = completion.request_id.as_str(),
            endpoint = completion.request.endpoint.path(),
            artifact = artifact.view_name().as_str()
        );
        Ok(self.controller.on_artifact_loaded(artifact, detail.html))
    }

    /// Turn a completion into a typed document, clearing the outline on any failure
    fn decode<D: serde::de::DeserializeOwned>(&mut self, completion: &Completion) -> Result<D> {
        let decoded = match &completion.outcome {
            Ok(value) => serde_json::from_value::<D>(value.clone()).map_err(|e| {
                decode_error(completion.request.endpoint, e)
                    .with_request_id(completion.request_id.clone())
            }),
            Err(err) => Err(err.clone()),
        };

        decoded.map_err(|err: ExError| {
            self.controller.on_request_failed();
            log_op_error!(
                "fetch",
                err.clone(),
                duration_ms = completion.elapsed_ms(),
                request_id = completion.request_id.as_str(),
                endpoint = completion.request.endpoint.path()
            );
            err
        })
    }

    // ===== Accessors =====

    pub fn controller(&self) -> &PageController {
        &self.controller
    }

    /// Direct access to the controller, for driving events whose requests
    /// are fetched and applied separately
    pub fn controller_mut(&mut self) -> &mut PageController {
        &mut self.controller
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}
