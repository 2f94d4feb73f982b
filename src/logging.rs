use tracing_subscriber::filter::Directive;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

use crate::config::AppConfig;

pub fn init(config: &AppConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let env_filter = quiet_dependencies(
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
    );

    let stdout_layer = tracing_subscriber::fmt::layer()
        .with_level(true)
        .with_line_number(true)
        .with_writer(std::io::stdout);

    Registry::default()
        .with(env_filter)
        .with(stdout_layer)
        .try_init()?;

    Ok(())
}

/// Caps chatty HTTP dependencies at `warn`; the crate's own level is left to
/// the configured filter.
fn quiet_dependencies(mut env_filter: EnvFilter) -> EnvFilter {
    let directives = ["hyper=warn", "hyper_util=warn", "reqwest=warn"];

    for directive in directives {
        if let Ok(parsed) = directive.parse::<Directive>() {
            env_filter = env_filter.add_directive(parsed);
        }
    }
    env_filter
}
