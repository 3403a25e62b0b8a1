#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use tracing::field::{Field, Visit};
    use tracing::span::{Id, Record};
    use tracing::Subscriber;
    use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

    use crate::error::AppError;
    use crate::telemetry::http_request_span;

    type Recorded = Arc<Mutex<Vec<(String, String)>>>;

    struct FieldVisitor<'a>(&'a mut Vec<(String, String)>);

    impl Visit for FieldVisitor<'_> {
        fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
            self.0.push((field.name().to_string(), format!("{:?}", value)));
        }
    }

    /// Keeps every field value recorded on any span after creation.
    struct RecordingLayer {
        recorded: Recorded,
    }

    impl<S: Subscriber> Layer<S> for RecordingLayer {
        fn on_record(&self, _id: &Id, values: &Record<'_>, _ctx: Context<'_, S>) {
            let mut recorded = self.recorded.lock().unwrap();
            values.record(&mut FieldVisitor(&mut *recorded));
        }
    }

    fn recorded_on_request_span(error: AppError) -> Vec<(String, String)> {
        let recorded: Recorded = Arc::default();
        let subscriber = tracing_subscriber::registry().with(RecordingLayer {
            recorded: recorded.clone(),
        });

        tracing::subscriber::with_default(subscriber, || {
            let span = http_request_span("POST", "/scan");
            let _entered = span.enter();
            error.log_and_record("test");
        });

        let values = recorded.lock().unwrap().clone();
        values
    }

    fn value_of<'a>(recorded: &'a [(String, String)], name: &str) -> Option<&'a str> {
        recorded
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }

    #[test]
    fn test_client_error_is_recorded_on_request_span() {
        let recorded =
            recorded_on_request_span(AppError::NotFound("Student not found".to_string()));

        assert_eq!(value_of(&recorded, "error"), Some("true"));
        assert_eq!(value_of(&recorded, "error.type"), Some("not_found_error"));
        assert_eq!(
            value_of(&recorded, "error.message"),
            Some("Student not found")
        );
        assert_eq!(value_of(&recorded, "otel.status_code"), None);
    }

    #[test]
    fn test_server_error_marks_span_status() {
        let recorded = recorded_on_request_span(AppError::Internal("boom".to_string()));

        assert_eq!(value_of(&recorded, "error.type"), Some("internal_error"));
        assert_eq!(value_of(&recorded, "otel.status_code"), Some("ERROR"));
    }
}
