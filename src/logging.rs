use crate::config::Environment;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Instala el subscriber global de `tracing` para el detector.
///
/// `RUST_LOG` manda (por defecto `info`). En producción cada evento sale
/// como una línea JSON; en desarrollo, con formato legible y colores.
pub fn setup_logging(environment: &Environment) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let (json, pretty) = match environment {
        Environment::Production => (Some(fmt::layer().json().with_current_span(false)), None),
        Environment::Development => (None, Some(fmt::layer().pretty().with_target(false))),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(json)
        .with(pretty)
        .init();
}
