//! Log subscriber setup.
//!
//! `RUST_LOG` picks the filter; `LOG_FORMAT=json` switches from the pretty
//! console output to one JSON object per line.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is unset: handler and store logs at debug.
const DEFAULT_DIRECTIVES: &str = "info,api_server=debug,rongdhonu_infra=debug";

#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub json_logs: bool,
    /// Reported once at startup so shipped logs can be told apart.
    pub service_name: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            json_logs: false,
            service_name: "rongdhonu-api".to_string(),
        }
    }
}

impl TelemetryConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            json_logs: std::env::var("LOG_FORMAT")
                .map(|v| wants_json(&v))
                .unwrap_or(defaults.json_logs),
            service_name: std::env::var("SERVICE_NAME").unwrap_or(defaults.service_name),
        }
    }
}

fn wants_json(format: &str) -> bool {
    format.trim().eq_ignore_ascii_case("json")
}

/// Install the global subscriber. Call once, before the server starts.
pub fn init_telemetry(config: &TelemetryConfig) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));

    let registry = tracing_subscriber::registry().with(env_filter);
    if config.json_logs {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer().pretty()).init();
    }

    tracing::info!(
        service = %config.service_name,
        json_logs = config.json_logs,
        "Logging ready"
    );
}
