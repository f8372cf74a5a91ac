//! Terminal input: byte sources and the escape-sequence key decoder.

mod decoder;
mod source;

pub use decoder::{CTRL_C, DEFAULT_READ_TIMEOUT, ESC, KeyDecoder, QUIT_CHAR};
pub use source::{ByteRead, ByteSource, ScriptedSource, StdinSource};

#[cfg(test)]
mod tests {

    use std::fmt;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;
    use tracing::Subscriber;
    use tracing::dispatcher::Dispatch;
    use tracing::field::{Field, Visit};
    use tracing_subscriber::layer::Context;
    use tracing_subscriber::layer::Layer;
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::registry::Registry;

    use super::{KeyDecoder, ScriptedSource};

    #[derive(Clone, Default)]
    struct Capture {
        events: Arc<Mutex<Vec<CapturedEvent>>>,
    }

    #[derive(Clone, Debug)]
    struct CapturedEvent {
        target: String,
        fields: Vec<(String, String)>,
    }

    #[derive(Default)]
    struct FieldCollector {
        fields: Vec<(String, String)>,
    }

    impl Visit for FieldCollector {
        fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
            self.fields
                .push((field.name().to_string(), format!("{:?}", value)));
        }
    }

    impl<S> Layer<S> for Capture
    where
        S: Subscriber,
    {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            let mut collector = FieldCollector::default();
            event.record(&mut collector);
            let meta = event.metadata();
            self.events.lock().unwrap().push(CapturedEvent {
                target: meta.target().to_string(),
                fields: collector.fields,
            });
        }
    }

    #[test]
    fn decode_log_never_carries_typed_bytes() {
        let capture = Capture::default();
        let events = capture.events.clone();
        let subscriber = Registry::default().with(capture);
        let dispatch = Dispatch::new(subscriber);

        tracing::dispatcher::with_default(&dispatch, || {
            let mut dec = KeyDecoder::new(
                ScriptedSource::from_bytes(b"Z\x1b[A"),
                Duration::from_millis(10),
            );
            dec.next_key().unwrap();
            dec.next_key().unwrap();
        });

        let events = events.lock().unwrap();
        let decoded: Vec<_> = events
            .iter()
            .filter(|e| e.target == "input.decode")
            .collect();
        assert_eq!(decoded.len(), 2, "one trace per decoded key");
        for event in decoded {
            let key = event
                .fields
                .iter()
                .find(|(name, _)| name == "key")
                .map(|(_, v)| v.trim_matches('"'))
                .expect("key field missing");
            assert!(key == "char" || key == "up", "unexpected key label {key}");
            assert!(
                event.fields.iter().all(|(_, v)| !v.contains('Z')),
                "typed byte leaked into log: {:?}",
                event.fields
            );
        }
    }
}
