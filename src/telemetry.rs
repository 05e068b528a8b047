use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Env;

pub const DEFAULT_FILTER: &str = "supplychain_portal=debug,tower_http=info";

/// init_tracing
///
/// Installs the global subscriber. `RUST_LOG` takes priority over
/// `DEFAULT_FILTER`. The output format follows the runtime environment:
/// pretty for local work, JSON for log aggregation in production.
pub fn init_tracing(env: Env) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());

    match env {
        Env::Local => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
        Env::Production => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_targets_this_crate() {
        assert!(EnvFilter::try_new(DEFAULT_FILTER).is_ok());
        let crate_directive = format!("{}=debug", env!("CARGO_CRATE_NAME"));
        assert!(DEFAULT_FILTER.split(',').any(|d| d == crate_directive));
    }
}
