//! In-memory event capture for tests
//!
//! All tests in one binary share a single global capture, so each test should
//! look its events up by an `op` name or request id only it uses.

use std::collections::BTreeMap;
use std::fmt::Debug;
use std::sync::{Arc, Mutex, OnceLock};

use rulescope_core_types::schema::{
    FIELD_COMPONENT, FIELD_DURATION_MS, FIELD_ERR_CODE, FIELD_ERR_KIND, FIELD_EVENT, FIELD_OP,
    FIELD_REQUEST_ID,
};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

/// One recorded event, with every field rendered as text
#[derive(Clone, Debug)]
pub struct CapturedEvent {
    pub level: Level,
    fields: BTreeMap<String, String>,
}

impl CapturedEvent {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn component(&self) -> Option<&str> {
        self.field(FIELD_COMPONENT)
    }

    pub fn op(&self) -> Option<&str> {
        self.field(FIELD_OP)
    }

    /// The `schema::EVENT_*` value
    pub fn event(&self) -> Option<&str> {
        self.field(FIELD_EVENT)
    }

    pub fn request_id(&self) -> Option<&str> {
        self.field(FIELD_REQUEST_ID)
    }

    pub fn duration_ms(&self) -> Option<u64> {
        self.field(FIELD_DURATION_MS)?.parse().ok()
    }

    /// `ExErrorKind` in its `Debug` form, on `end_error` events
    pub fn err_kind(&self) -> Option<&str> {
        self.field(FIELD_ERR_KIND)
    }

    pub fn err_code(&self) -> Option<&str> {
        self.field(FIELD_ERR_CODE)
    }
}

struct TextFields<'a>(&'a mut BTreeMap<String, String>);

impl Visit for TextFields<'_> {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name().to_string(), value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn Debug) {
        self.0.insert(field.name().to_string(), format!("{:?}", value));
    }
}

type Store = Arc<Mutex<Vec<CapturedEvent>>>;

struct CaptureLayer {
    store: Store,
}

impl<S: Subscriber> Layer<S> for CaptureLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut fields = BTreeMap::new();
        event.record(&mut TextFields(&mut fields));
        let captured = CapturedEvent {
            level: *event.metadata().level(),
            fields,
        };
        if let Ok(mut events) = self.store.lock() {
            events.push(captured);
        }
    }
}

/// Read side of the capture layer
#[derive(Clone)]
pub struct TestCapture {
    store: Store,
}

impl TestCapture {
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.store.lock().map(|e| e.clone()).unwrap_or_default()
    }

    fn matching(&self, keep: impl Fn(&CapturedEvent) -> bool) -> Vec<CapturedEvent> {
        self.events().into_iter().filter(|e| keep(e)).collect()
    }

    /// Events of one operation, in emission order
    pub fn events_for_op(&self, op: &str) -> Vec<CapturedEvent> {
        self.matching(|e| e.op() == Some(op))
    }

    /// Events stamped with one request id, in emission order
    pub fn events_for_request(&self, request_id: &str) -> Vec<CapturedEvent> {
        self.matching(|e| e.request_id() == Some(request_id))
    }

    /// Sequence of `event` values recorded for one request id
    pub fn lifecycle(&self, request_id: &str) -> Vec<String> {
        self.events_for_request(request_id)
            .iter()
            .filter_map(|e| e.event().map(str::to_string))
            .collect()
    }

    /// # Panics
    ///
    /// Panics when no event with this `op` and `event` was captured.
    pub fn assert_event_exists(&self, op: &str, event: &str) {
        let found = self.events_for_op(op);
        assert!(
            found.iter().any(|e| e.event() == Some(event)),
            "no '{}' event for op '{}' (saw {:?})",
            event,
            op,
            found.iter().filter_map(CapturedEvent::event).collect::<Vec<_>>()
        );
    }
}

static CAPTURE: OnceLock<TestCapture> = OnceLock::new();

/// Install the capture layer as the global subscriber, once per binary
///
/// ```
/// use rulescope_core::log_op_start;
/// use rulescope_core::logging_facility::init_test_capture;
///
/// let capture = init_test_capture();
/// log_op_start!("doc_example_op");
/// capture.assert_event_exists("doc_example_op", "start");
/// ```
pub fn init_test_capture() -> TestCapture {
    CAPTURE
        .get_or_init(|| {
            let store = Store::default();
            let layer = CaptureLayer {
                store: store.clone(),
            };
            let _ = tracing_subscriber::registry().with(layer).try_init();
            TestCapture { store }
        })
        .clone()
}
