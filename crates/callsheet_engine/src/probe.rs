use std::fmt;
use std::time::Duration;

/// Default liveness oracle; any response at all counts as reachable.
pub const DEFAULT_PROBE_ENDPOINT: &str = "https://www.google.com/generate_204";

#[derive(Debug, Clone)]
pub struct ProbeSettings {
    pub endpoint: String,
    pub connect_timeout: Duration,
    /// Overall deadline; a hung probe becomes a failure instead of wedging
    /// the monitor.
    pub request_timeout: Duration,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_PROBE_ENDPOINT.to_string(),
            connect_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(8),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeError {
    pub kind: ProbeFailure,
    pub message: String,
}

impl ProbeError {
    pub(crate) fn new(kind: ProbeFailure, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeFailure {
    InvalidEndpoint,
    Timeout,
    Network,
}

impl fmt::Display for ProbeFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeFailure::InvalidEndpoint => write!(f, "invalid probe endpoint"),
            ProbeFailure::Timeout => write!(f, "timeout"),
            ProbeFailure::Network => write!(f, "network error"),
        }
    }
}

/// Existence check against an external endpoint. The response body and even
/// the status code are irrelevant; getting any response back proves the
/// network path works.
#[async_trait::async_trait]
pub trait ReachabilityProbe: Send + Sync {
    async fn check(&self) -> Result<(), ProbeError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestProbe {
    settings: ProbeSettings,
}

impl ReqwestProbe {
    pub fn new(settings: ProbeSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, ProbeError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .build()
            .map_err(|err| ProbeError::new(ProbeFailure::Network, err.to_string()))
    }
}

#[async_trait::async_trait]
impl ReachabilityProbe for ReqwestProbe {
    async fn check(&self) -> Result<(), ProbeError> {
        let endpoint = reqwest::Url::parse(&self.settings.endpoint)
            .map_err(|err| ProbeError::new(ProbeFailure::InvalidEndpoint, err.to_string()))?;
        let client = self.build_client()?;

        // Fire-and-forget existence check. An HTTP error status still proves
        // reachability, so the status is deliberately ignored.
        client.get(endpoint).send().await.map_err(map_reqwest_error)?;
        Ok(())
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ProbeError {
    if err.is_timeout() {
        return ProbeError::new(ProbeFailure::Timeout, err.to_string());
    }
    ProbeError::new(ProbeFailure::Network, err.to_string())
}
