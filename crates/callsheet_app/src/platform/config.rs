use std::time::Duration;

use callsheet_engine::ProbeSettings;
use sheet_logging::sheet_warn;

const DEFAULT_PROBE_INTERVAL: Duration = Duration::from_secs(30);

/// Environment-supplied knobs. There is deliberately no config file; the
/// backend and auth token are ambient, everything else has defaults.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub store_url: Option<String>,
    pub api_token: Option<String>,
    pub probe: ProbeSettings,
    pub probe_interval: Duration,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let mut probe = ProbeSettings::default();
        if let Ok(endpoint) = std::env::var("CALLSHEET_PROBE_URL") {
            probe.endpoint = endpoint;
        }

        let probe_interval = match std::env::var("CALLSHEET_PROBE_INTERVAL_SECS") {
            Ok(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    sheet_warn!(
                        "ignoring invalid CALLSHEET_PROBE_INTERVAL_SECS={:?}, using default",
                        raw
                    );
                    DEFAULT_PROBE_INTERVAL
                }
            },
            Err(_) => DEFAULT_PROBE_INTERVAL,
        };

        Self {
            store_url: std::env::var("CALLSHEET_STORE_URL").ok(),
            api_token: std::env::var("CALLSHEET_API_TOKEN").ok(),
            probe,
            probe_interval,
        }
    }
}
