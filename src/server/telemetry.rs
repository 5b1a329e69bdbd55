use crate::config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

const DEFAULT_FILTER: &str = "stranger_relay=debug,tower_http=debug,axum::rejection=trace,warn";

#[cfg(feature = "telemetry")]
fn telemetry_enabled() -> bool {
    std::env::var("ENABLE_TELEMETRY")
        .unwrap_or_else(|_| "false".to_string())
        .parse::<bool>()
        .unwrap_or(false)
}

pub async fn init_telemetry(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let json_layer = config.log_json.then(|| {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_thread_ids(true)
            .with_line_number(true)
            .with_file(true)
            .json()
    });
    let text_layer = (!config.log_json).then(|| {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_thread_ids(true)
            .with_line_number(true)
            .with_file(true)
            .with_ansi(true)
    });

    let registry = Registry::default()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer);

    #[cfg(feature = "telemetry")]
    {
        if telemetry_enabled() {
            let (tracer, jaeger_endpoint) = jaeger::tracer()?;
            registry
                .with(tracing_opentelemetry::layer().with_tracer(tracer))
                .try_init()?;
            tracing::info!(
                "Telemetry initialized with Jaeger endpoint: {}",
                jaeger_endpoint
            );
            return Ok(());
        }
    }

    registry.try_init()?;
    tracing::info!("Telemetry disabled");
    Ok(())
}

pub fn shutdown_telemetry() {
    #[cfg(feature = "telemetry")]
    {
        if telemetry_enabled() {
            // Flush pending spans.
            opentelemetry::global::shutdown_tracer_provider();
        }
    }
}

#[cfg(feature = "telemetry")]
mod jaeger {
    use opentelemetry::sdk::propagation::TraceContextPropagator;
    use opentelemetry::sdk::{
        trace::{self, RandomIdGenerator, Sampler, Tracer},
        Resource,
    };
    use opentelemetry::{global, KeyValue};
    use std::env;

    pub fn tracer() -> Result<(Tracer, String), Box<dyn std::error::Error>> {
        global::set_text_map_propagator(TraceContextPropagator::new());

        let jaeger_endpoint = env::var("JAEGER_ENDPOINT")
            .unwrap_or_else(|_| "http://jaeger:14268/api/traces".to_string());

        let tracer = opentelemetry_jaeger::new_collector_pipeline()
            .with_service_name(env!("CARGO_PKG_NAME"))
            .with_endpoint(&jaeger_endpoint)
            .with_isahc()
            .with_trace_config(
                trace::config()
                    .with_sampler(Sampler::AlwaysOn)
                    .with_id_generator(RandomIdGenerator::default())
                    .with_max_events_per_span(64)
                    .with_max_attributes_per_span(16)
                    .with_resource(Resource::new(vec![
                        KeyValue::new("service.name", env!("CARGO_PKG_NAME")),
                        KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
                    ])),
            )
            .with_timeout(std::time::Duration::from_secs(2))
            .install_batch(opentelemetry::runtime::Tokio)?;

        Ok((tracer, jaeger_endpoint))
    }
}
