//! Shared test utilities used across smallworld crates.

pub mod tracing {
    //! A `tracing` layer that captures closed spans and emitted events so
    //! tests can assert on instrumentation.
    use std::collections::HashMap;
    use std::fmt;
    use std::sync::{Arc, Mutex, MutexGuard};

    use tracing::field::{Field, Visit};
    use tracing::span::{Attributes, Id, Record};
    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::Layer;
    use tracing_subscriber::layer::Context;
    use tracing_subscriber::registry::LookupSpan;

    /// Layer recording span and event metadata. Clones share storage, so a
    /// test keeps one handle and installs another in its subscriber.
    ///
    /// # Examples
    /// ```
    /// use smallworld_test_support::tracing::RecordingLayer;
    /// use tracing_subscriber::layer::SubscriberExt;
    ///
    /// let layer = RecordingLayer::default();
    /// let subscriber = tracing_subscriber::registry().with(layer.clone());
    /// tracing::subscriber::with_default(subscriber, || {
    ///     tracing::info_span!("work", items = 3).in_scope(|| tracing::info!("done"));
    /// });
    /// assert_eq!(layer.spans()[0].name, "work");
    /// assert_eq!(layer.spans()[0].fields["items"], "3");
    /// assert_eq!(layer.events().len(), 1);
    /// ```
    #[derive(Clone, Default)]
    pub struct RecordingLayer {
        spans: Arc<Mutex<Vec<SpanRecord>>>,
        events: Arc<Mutex<Vec<EventRecord>>>,
    }

    impl RecordingLayer {
        /// Returns the closed spans in completion order.
        #[must_use]
        pub fn spans(&self) -> Vec<SpanRecord> {
            lock(&self.spans).clone()
        }

        /// Returns the emitted events in emission order.
        #[must_use]
        pub fn events(&self) -> Vec<EventRecord> {
            lock(&self.events).clone()
        }
    }

    /// A closed span's name and recorded fields.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct SpanRecord {
        /// Span name from the tracing metadata.
        pub name: String,
        /// Fields recorded at creation or later via `Span::record`.
        pub fields: HashMap<String, String>,
    }

    /// An emitted event's level, target and fields. The message, when
    /// present, is stored under the `message` key.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct EventRecord {
        /// Event level.
        pub level: Level,
        /// Event target (usually the module path).
        pub target: String,
        /// Structured fields attached to the event.
        pub fields: HashMap<String, String>,
    }

    struct PendingSpan {
        name: String,
        fields: HashMap<String, String>,
    }

    fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
        mutex
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    impl<S> Layer<S> for RecordingLayer
    where
        S: Subscriber + for<'span> LookupSpan<'span>,
    {
        fn on_new_span(&self, attrs: &Attributes<'_>, id: &Id, ctx: Context<'_, S>) {
            let Some(span) = ctx.span(id) else {
                return;
            };
            let mut pending = PendingSpan {
                name: attrs.metadata().name().to_owned(),
                fields: HashMap::new(),
            };
            attrs.record(&mut FieldRecorder(&mut pending.fields));
            span.extensions_mut().insert(pending);
        }

        fn on_record(&self, id: &Id, values: &Record<'_>, ctx: Context<'_, S>) {
            let Some(span) = ctx.span(id) else {
                return;
            };
            let mut extensions = span.extensions_mut();
            if let Some(pending) = extensions.get_mut::<PendingSpan>() {
                values.record(&mut FieldRecorder(&mut pending.fields));
            }
        }

        fn on_close(&self, id: Id, ctx: Context<'_, S>) {
            let Some(span) = ctx.span(&id) else {
                return;
            };
            let Some(pending) = span.extensions_mut().remove::<PendingSpan>() else {
                return;
            };
            lock(&self.spans).push(SpanRecord {
                name: pending.name,
                fields: pending.fields,
            });
        }

        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            let mut fields = HashMap::new();
            event.record(&mut FieldRecorder(&mut fields));
            lock(&self.events).push(EventRecord {
                level: *event.metadata().level(),
                target: event.metadata().target().to_owned(),
                fields,
            });
        }
    }

    /// Stringifies every field; numbers and booleans use `Display`, anything
    /// else `Debug`.
    struct FieldRecorder<'a>(&'a mut HashMap<String, String>);

    impl FieldRecorder<'_> {
        fn insert(&mut self, field: &Field, value: String) {
            self.0.insert(field.name().to_owned(), value);
        }
    }

    impl Visit for FieldRecorder<'_> {
        fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
            self.insert(field, format!("{value:?}"));
        }

        fn record_str(&mut self, field: &Field, value: &str) {
            self.insert(field, value.to_owned());
        }

        fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
            self.insert(field, value.to_string());
        }

        fn record_bool(&mut self, field: &Field, value: bool) {
            self.insert(field, value.to_string());
        }

        fn record_i64(&mut self, field: &Field, value: i64) {
            self.insert(field, value.to_string());
        }

        fn record_u64(&mut self, field: &Field, value: u64) {
            self.insert(field, value.to_string());
        }

        fn record_f64(&mut self, field: &Field, value: f64) {
            self.insert(field, value.to_string());
        }
    }
}
