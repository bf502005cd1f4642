use std::{env, ffi::OsStr};

use tracing::{dispatcher, Subscriber};
use tracing_subscriber::{
    layer::SubscriberExt, registry::LookupSpan, util::SubscriberInitExt, Layer, Registry,
};

const KEY: &str = "RUST_LOG";

fn init_once_opentelemetry(export: bool) {
    // Skip init if has been set
    if dispatcher::has_been_set() {
        return;
    }

    // Set default service name
    {
        const SERVICE_NAME_KEY: &str = "OTEL_SERVICE_NAME";
        const SERVICE_NAME_VALUE: &str = env!("CARGO_CRATE_NAME");

        if env::var_os(SERVICE_NAME_KEY).is_none() {
            env::set_var(SERVICE_NAME_KEY, SERVICE_NAME_VALUE);
        }
    }

    fn init_layer_env_filter<S>() -> impl Layer<S>
    where
        S: Subscriber + for<'span> LookupSpan<'span>,
    {
        ::tracing_subscriber::EnvFilter::from_default_env()
    }

    fn init_layer_stdfmt<S>() -> impl Layer<S>
    where
        S: Subscriber + for<'span> LookupSpan<'span>,
    {
        ::tracing_subscriber::fmt::layer()
    }

    #[cfg(feature = "otlp")]
    fn init_layer_otlp_tracer<S>() -> Option<impl Layer<S>>
    where
        S: Subscriber + for<'span> LookupSpan<'span>,
    {
        use opentelemetry_otlp::WithExportConfig;

        // Export only when a collector is configured
        let endpoint = env::var("OTEL_EXPORTER_OTLP_ENDPOINT").ok()?;
        let exporter = ::opentelemetry_otlp::new_exporter()
            .tonic()
            .with_endpoint(endpoint);

        match ::opentelemetry_otlp::new_pipeline()
            .tracing()
            .with_exporter(exporter)
            .install_batch(::opentelemetry_sdk::runtime::Tokio)
        {
            Ok(tracer) => Some(::tracing_opentelemetry::layer().with_tracer(tracer)),
            Err(error) => {
                eprintln!("failed to init an otlp tracer: {error}");
                None
            }
        }
    }

    let layer = Registry::default()
        .with(init_layer_env_filter())
        .with(init_layer_stdfmt());

    if export {
        #[cfg(feature = "otlp")]
        let layer = layer.with(init_layer_otlp_tracer());

        layer.init()
    } else {
        layer.init()
    }
}

pub fn init_once() {
    init_once_with_default(true)
}

pub fn init_once_with(level: impl AsRef<OsStr>, export: bool) {
    // Skip init if has been set
    if dispatcher::has_been_set() {
        return;
    }

    // set custom tracing level
    env::set_var(KEY, level);

    init_once_opentelemetry(export)
}

pub fn init_once_with_default(export: bool) {
    // Skip init if has been set
    if dispatcher::has_been_set() {
        return;
    }

    // set default tracing level
    if env::var_os(KEY).is_none() {
        env::set_var(KEY, "INFO");
    }

    init_once_opentelemetry(export)
}

pub fn init_once_with_level_int(level: u8, export: bool) {
    init_once_with(level_name(level), export)
}

const fn level_name(level: u8) -> &'static str {
    match level {
        0 => "WARN",
        1 => "INFO",
        2 => "DEBUG",
        _ => "TRACE",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_verbosity_to_level() {
        assert_eq!(level_name(0), "WARN");
        assert_eq!(level_name(1), "INFO");
        assert_eq!(level_name(2), "DEBUG");
        assert_eq!(level_name(3), "TRACE");
        assert_eq!(level_name(9), "TRACE");
    }
}
