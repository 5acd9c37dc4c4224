//! Tracing subscriber setup.

use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing_subscriber::{
    EnvFilter, Registry,
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
};

use crate::config::{ServerConfig, observability::LogFormat};

use super::ObservabilityError;

/// Dependencies that are chatty below warn. `sqlx` logs every statement at
/// info.
const QUIET_TARGETS: [&str; 6] = ["h2", "hyper", "tonic", "tower", "opentelemetry", "sqlx"];

pub(super) fn init_subscriber(
    config: &ServerConfig,
    tracer_provider: Option<&SdkTracerProvider>,
) -> Result<(), ObservabilityError> {
    let tracer_name = config.observability.otel_service_name.as_str();

    match config.logging.log_format {
        LogFormat::Compact => install(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
            env_filter(&config.logging.log_level),
            tracer_provider.map(|provider| (provider, tracer_name)),
        ),
        LogFormat::Json => install(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(true)
                .with_target(true),
            env_filter(&config.logging.log_level),
            tracer_provider.map(|provider| (provider, tracer_name)),
        ),
    }
}

/// `RUST_LOG` from the environment wins; otherwise `level` plus the quiet
/// target overrides.
fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(level)))
}

fn default_directives(level: &str) -> String {
    QUIET_TARGETS
        .iter()
        .fold(level.to_string(), |mut directives, target| {
            directives.push(',');
            directives.push_str(target);
            directives.push_str("=warn");
            directives
        })
}

fn install<L>(
    fmt_layer: L,
    filter: EnvFilter,
    export: Option<(&SdkTracerProvider, &str)>,
) -> Result<(), ObservabilityError>
where
    L: Layer<Registry> + Send + Sync + 'static,
{
    let subscriber = tracing_subscriber::registry().with(fmt_layer).with(filter);

    match export {
        Some((provider, tracer_name)) => subscriber
            .with(tracing_opentelemetry::layer().with_tracer(provider.tracer(tracer_name.to_owned())))
            .try_init()?,
        None => subscriber.try_init()?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_directives_quiet_noisy_targets() {
        let directives = default_directives("debug");

        assert!(directives.starts_with("debug,"), "level comes first");
        assert!(directives.contains("sqlx=warn"), "sqlx statements are quieted");
        assert!(directives.contains("hyper=warn"), "hyper is quieted");
    }

    #[test]
    fn default_directives_parse_as_filter() {
        let parsed = EnvFilter::try_new(default_directives("info"));

        assert!(parsed.is_ok(), "expected a valid filter, got {parsed:?}");
    }
}
