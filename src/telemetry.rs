use once_cell::sync::Lazy;
use opentelemetry::{KeyValue, trace::TracerProvider as _};
use opentelemetry_otlp::{Protocol, WithExportConfig, WithTonicConfig};
use opentelemetry_sdk::{
    Resource,
    trace::{RandomIdGenerator, Sampler, SdkTracerProvider},
};
use opentelemetry_semantic_conventions::{
    SCHEMA_URL,
    attribute::{SERVICE_NAME, SERVICE_VERSION},
    resource::DEPLOYMENT_ENVIRONMENT_NAME,
};
use rocket::{
    Data, Orbit, Request, Response, Rocket,
    fairing::{Fairing, Info, Kind},
};
use std::sync::Mutex;
use std::time::Instant;
use tonic::metadata::MetadataMap;
use tracing::{Span, field, info_span};
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub static TELEMETRY_GUARD: Lazy<Mutex<Option<OtelGuard>>> = Lazy::new(|| Mutex::new(None));

pub struct TelemetryFairing;

/// Per-request span and start time, kept in the request-local cache.
pub struct RequestSpan {
    pub span: Span,
    pub start_time: Instant,
}

/// The `http_request` span with every field later filled in by the
/// response fairing or by `AppError::log_and_record`.
pub fn http_request_span(method: &str, uri: &str) -> Span {
    info_span!(
        "http_request",
        otel.name = format!("{} {}", method, uri),
        http.method = method,
        http.uri = uri,
        http.status_code = field::Empty,
        http.duration_ms = field::Empty,
        error = field::Empty,
        "error.type" = field::Empty,
        error.message = field::Empty,
        "otel.status_code" = field::Empty,
    )
}

/// The span opened for this request in `on_request`, or a disabled span
/// when the fairing is not attached.
pub fn request_span<'r>(request: &'r Request<'_>) -> &'r Span {
    &request
        .local_cache(|| RequestSpan {
            span: Span::none(),
            start_time: Instant::now(),
        })
        .span
}

#[rocket::async_trait]
impl Fairing for TelemetryFairing {
    fn info(&self) -> Info {
        Info {
            name: "Request tracing",
            kind: Kind::Request | Kind::Response | Kind::Shutdown,
        }
    }

    async fn on_request(&self, request: &mut Request<'_>, _: &mut Data<'_>) {
        let span = http_request_span(request.method().as_str(), &request.uri().to_string());

        request.local_cache(|| RequestSpan {
            span,
            start_time: Instant::now(),
        });
    }

    async fn on_response<'r>(&self, request: &'r Request<'_>, response: &mut Response<'r>) {
        let RequestSpan { span, start_time } = request.local_cache(|| RequestSpan {
            span: info_span!("http_request"),
            start_time: Instant::now(),
        });

        let duration = start_time.elapsed();

        span.record("http.status_code", response.status().code);
        span.record("http.duration_ms", duration.as_millis() as i64);

        let _entered = span.enter();
        tracing::info!(
            "Completed request in {}ms with status {}",
            duration.as_millis(),
            response.status().code
        );
    }

    async fn on_shutdown(&self, _rocket: &Rocket<Orbit>) {
        shutdown_telemetry();
    }
}

fn resource() -> Resource {
    let environment = std::env::var("ROCKET_PROFILE").unwrap_or_else(|_| "development".into());

    Resource::builder()
        .with_schema_url(
            [
                KeyValue::new(SERVICE_NAME, env!("CARGO_PKG_NAME")),
                KeyValue::new(SERVICE_VERSION, env!("CARGO_PKG_VERSION")),
                KeyValue::new(DEPLOYMENT_ENVIRONMENT_NAME, environment),
            ],
            SCHEMA_URL,
        )
        .build()
}

fn init_tracer_provider(endpoint: &str) -> anyhow::Result<SdkTracerProvider> {
    let mut exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint)
        .with_protocol(Protocol::Grpc);

    if endpoint.starts_with("https://") {
        exporter =
            exporter.with_tls_config(tonic::transport::ClientTlsConfig::new().with_native_roots());
    }

    if let Ok(api_key) = std::env::var("HONEYCOMB_API_KEY") {
        let mut metadata = MetadataMap::new();
        metadata.insert("x-honeycomb-team", api_key.parse()?);
        exporter = exporter.with_metadata(metadata);
    }

    let tracer_provider = SdkTracerProvider::builder()
        .with_sampler(Sampler::AlwaysOn)
        .with_id_generator(RandomIdGenerator::default())
        .with_resource(resource())
        .with_batch_exporter(exporter.build()?)
        .build();

    Ok(tracer_provider)
}

pub struct OtelGuard {
    tracer_provider: SdkTracerProvider,
}

/// Installs the global subscriber. Spans are also shipped over OTLP when
/// `OTEL_EXPORTER_OTLP_ENDPOINT` is set.
pub fn init_tracing() {
    let tracer_provider = match std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT") {
        Ok(endpoint) if !endpoint.is_empty() => match init_tracer_provider(&endpoint) {
            Ok(provider) => Some(provider),
            Err(e) => {
                eprintln!("Failed to initialise OTLP exporter, continuing without it: {e}");
                None
            }
        },
        _ => None,
    };

    let otel_layer = tracer_provider
        .as_ref()
        .map(|provider| OpenTelemetryLayer::new(provider.tracer(env!("CARGO_PKG_NAME"))));

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    if let Err(e) = tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .with(otel_layer)
        .try_init()
    {
        eprintln!("Tracing subscriber already installed: {e}");
    }

    if let Some(tracer_provider) = tracer_provider {
        if let Ok(mut guard) = TELEMETRY_GUARD.lock() {
            *guard = Some(OtelGuard { tracer_provider });
        }
    }
}

impl Drop for OtelGuard {
    fn drop(&mut self) {
        if let Err(err) = self.tracer_provider.shutdown() {
            eprintln!("Failed to shut down tracer provider: {:?}", err);
        }
    }
}

pub fn shutdown_telemetry() {
    let guard = match TELEMETRY_GUARD.lock() {
        Ok(mut guard) => guard.take(),
        Err(_) => None,
    };

    if guard.is_some() {
        tracing::info!("Flushing telemetry");
    }
    drop(guard);
}
