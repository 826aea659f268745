use rulescope_core_types::RequestId;
use thiserror::Error;

/// Result of selection and decoding operations
pub type Result<T> = std::result::Result<T, RulesError>;

/// Classification of every failure rulescope can report
///
/// Each kind has a stable `ERR_*` code that the CLI prints and log lines
/// record as `err_code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    /// A selection or argument the catalog does not offer
    InvalidInput,
    /// An engine id missing from the catalog
    NotFound,
    /// The catalog has not been loaded yet
    NotReady,
    /// Connection refused, reset, DNS failure and similar
    Transport,
    /// The configured upper wait elapsed
    Timeout,
    /// Non-2xx answer from the server
    ExternalService,
    /// A body that does not decode into the expected document
    Serialization,
    Io,
    Config,
    Internal,
}

impl ExErrorKind {
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::NotReady => "ERR_NOT_READY",
            ExErrorKind::Transport => "ERR_TRANSPORT",
            ExErrorKind::Timeout => "ERR_TIMEOUT",
            ExErrorKind::ExternalService => "ERR_EXTERNAL_SERVICE",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Config => "ERR_CONFIG",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }

    /// Whether the failure happened while talking to the server
    pub fn is_exchange(&self) -> bool {
        matches!(
            self,
            ExErrorKind::Transport
                | ExErrorKind::Timeout
                | ExErrorKind::ExternalService
                | ExErrorKind::Serialization
        )
    }
}

/// Error reported to callers of the controller, the session and the CLI
///
/// Built from a kind plus whatever context is known where it is raised:
///
/// ```
/// use rulescope_core::{ExError, ExErrorKind};
///
/// let err = ExError::new(ExErrorKind::ExternalService)
///     .with_endpoint("ui/rules")
///     .with_status(502)
///     .with_message("bad gateway");
/// assert_eq!(err.code(), "ERR_EXTERNAL_SERVICE");
/// ```
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    message: String,
    op: Option<String>,
    entity_id: Option<String>,
    endpoint: Option<String>,
    status: Option<u16>,
    request_id: Option<RequestId>,
    source: Option<Box<ExError>>,
}

impl ExError {
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            message: String::new(),
            op: None,
            entity_id: None,
            endpoint: None,
            status: None,
            request_id: None,
            source: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Name of the operation that failed
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Engine, group, category, value or artifact the failure is about
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Server call the failure belongs to
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    pub fn status(&self) -> Option<u16> {
        self.status
    }

    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

/// `[CODE] message`, followed by whichever of op, entity, endpoint, status
/// and request are known
impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if !self.message.is_empty() {
            write!(f, " {}", self.message)?;
        }
        let mut context = Vec::new();
        if let Some(op) = &self.op {
            context.push(format!("op={}", op));
        }
        if let Some(entity_id) = &self.entity_id {
            context.push(format!("entity={}", entity_id));
        }
        if let Some(endpoint) = &self.endpoint {
            context.push(format!("endpoint={}", endpoint));
        }
        if let Some(status) = self.status {
            context.push(format!("status={}", status));
        }
        if let Some(request_id) = &self.request_id {
            context.push(format!("request={}", request_id.short()));
        }
        if !context.is_empty() {
            write!(f, " ({})", context.join(", "))?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// Domain errors raised by the selection state machine and response decoding
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RulesError {
    /// The catalog has no engine with this id
    #[error("Unknown engine: {engine}")]
    UnknownEngine { engine: String },

    /// The selected engine does not list this group
    #[error("Engine {engine} has no group named {group}")]
    UnknownGroup { engine: String, group: String },

    /// The selected engine does not define this category
    #[error("Engine {engine} has no category named {category}")]
    UnknownCategory { engine: String, category: String },

    /// The category does not offer this value
    #[error("Category {category} has no value {value}")]
    UnknownCategoryValue { category: String, value: String },

    /// An operation needs the catalog before `ui/info` has answered
    #[error("Catalog has not been loaded")]
    CatalogNotLoaded,

    /// A server document did not match the expected shape
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl From<RulesError> for ExError {
    fn from(err: RulesError) -> Self {
        match err {
            RulesError::UnknownEngine { engine } => ExError::new(ExErrorKind::NotFound)
                .with_entity_id(engine)
                .with_message("Unknown engine"),

            RulesError::UnknownGroup { engine, group } => ExError::new(ExErrorKind::InvalidInput)
                .with_entity_id(group)
                .with_message(format!("Group not offered by engine {}", engine)),

            RulesError::UnknownCategory { engine, category } => {
                ExError::new(ExErrorKind::InvalidInput)
                    .with_entity_id(category)
                    .with_message(format!("Category not offered by engine {}", engine))
            }

            RulesError::UnknownCategoryValue { category, value } => {
                ExError::new(ExErrorKind::InvalidInput)
                    .with_entity_id(value)
                    .with_message(format!("Value not offered by category {}", category))
            }

            RulesError::CatalogNotLoaded => {
                ExError::new(ExErrorKind::NotReady).with_message("Catalog has not been loaded")
            }

            RulesError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
        }
    }
}

/// Conversion from serde_json::Error to RulesError
impl From<serde_json::Error> for RulesError {
    fn from(err: serde_json::Error) -> Self {
        RulesError::Serialization {
            message: err.to_string(),
        }
    }
}
