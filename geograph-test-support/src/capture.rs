//! A `tracing` layer that keeps every closed span and emitted event so tests
//! can assert on instrumentation.
//!
//! Install it with `tracing::subscriber::with_default` around the code under
//! test and inspect the snapshots afterwards.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::field::{Field, Visit};
use tracing::span::{Attributes, Id, Record};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::Context;
use tracing_subscriber::registry::LookupSpan;

/// Field map keyed by field name; values are rendered as strings.
pub type Fields = BTreeMap<String, String>;

/// A span observed after it closed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CapturedSpan {
    /// Span name from its metadata.
    pub name: String,
    /// Fields recorded at creation or later through `Span::record`.
    pub fields: Fields,
}

/// An event observed when it was emitted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CapturedEvent {
    /// Event level.
    pub level: Level,
    /// Event target, usually the emitting module path.
    pub target: String,
    /// Event fields, including `message`.
    pub fields: Fields,
}

impl CapturedEvent {
    /// Returns the event message, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.fields.get("message").map(String::as_str)
    }

    /// Returns a field rendered as a string.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

#[derive(Default)]
struct Captured {
    spans: Vec<CapturedSpan>,
    events: Vec<CapturedEvent>,
}

/// Layer recording spans in completion order and events in emission order.
///
/// # Examples
/// ```
/// use geograph_test_support::CaptureLayer;
/// use tracing_subscriber::layer::SubscriberExt;
///
/// let layer = CaptureLayer::default();
/// let subscriber = tracing_subscriber::registry().with(layer.clone());
/// tracing::subscriber::with_default(subscriber, || tracing::info!(n = 3, "sampled"));
///
/// let events = layer.events();
/// assert_eq!(events[0].message(), Some("sampled"));
/// assert_eq!(events[0].field("n"), Some("3"));
/// ```
#[derive(Clone, Default)]
pub struct CaptureLayer {
    captured: Arc<Mutex<Captured>>,
}

impl CaptureLayer {
    /// Returns a copy of the spans closed so far.
    #[must_use]
    pub fn spans(&self) -> Vec<CapturedSpan> {
        self.lock().spans.clone()
    }

    /// Returns a copy of the events emitted so far.
    #[must_use]
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.lock().events.clone()
    }

    /// Returns the first closed span called `name`.
    #[must_use]
    pub fn span(&self, name: &str) -> Option<CapturedSpan> {
        self.lock().spans.iter().find(|span| span.name == name).cloned()
    }

    /// Returns whether an event with `level` and `message` was emitted.
    #[must_use]
    pub fn saw_event(&self, level: Level, message: &str) -> bool {
        self.lock()
            .events
            .iter()
            .any(|event| event.level == level && event.message() == Some(message))
    }

    fn lock(&self) -> MutexGuard<'_, Captured> {
        // A panicking test must not hide what was captured before it.
        self.captured.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

struct PendingSpan {
    name: String,
    fields: Fields,
}

impl<S> Layer<S> for CaptureLayer
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    fn on_new_span(&self, attrs: &Attributes<'_>, id: &Id, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else {
            return;
        };
        let mut fields = Fields::new();
        attrs.record(&mut FieldCollector(&mut fields));
        span.extensions_mut().insert(PendingSpan {
            name: attrs.metadata().name().to_owned(),
            fields,
        });
    }

    fn on_record(&self, id: &Id, values: &Record<'_>, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else {
            return;
        };
        if let Some(pending) = span.extensions_mut().get_mut::<PendingSpan>() {
            values.record(&mut FieldCollector(&mut pending.fields));
        }
    }

    fn on_close(&self, id: Id, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(&id) else {
            return;
        };
        let Some(pending) = span.extensions_mut().remove::<PendingSpan>() else {
            return;
        };
        self.lock().spans.push(CapturedSpan {
            name: pending.name,
            fields: pending.fields,
        });
    }

    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut fields = Fields::new();
        event.record(&mut FieldCollector(&mut fields));
        self.lock().events.push(CapturedEvent {
            level: *event.metadata().level(),
            target: event.metadata().target().to_owned(),
            fields,
        });
    }
}

struct FieldCollector<'a>(&'a mut Fields);

impl FieldCollector<'_> {
    fn insert(&mut self, field: &Field, value: impl ToString) {
        self.0.insert(field.name().to_owned(), value.to_string());
    }
}

impl Visit for FieldCollector<'_> {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.insert(field, format!("{value:?}"));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.insert(field, value);
    }

    fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
        self.insert(field, value);
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.insert(field, value);
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.insert(field, value);
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.insert(field, value);
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.insert(field, value);
    }
}
