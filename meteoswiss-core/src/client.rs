//! Query orchestrator: build URL, fetch, parse, validate, extract.

use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::config::Config;
use crate::error::MeteoSwissError;
use crate::extract;
use crate::model::WeatherReport;
use crate::transport::{HttpTransport, Transport};
use crate::validate::validate;

/// Capacity of the response buffer. The transport truncates anything beyond
/// this, which surfaces downstream as a parse or validation failure.
pub const RESPONSE_BUFFER_SIZE: usize = 16 * 1024;

/// Blocking client for the MeteoSwiss `plzDetail` API.
///
/// Holds no per-query state; each call allocates its own response buffer, so
/// a single client is safe to share across threads.
pub struct MeteoSwissClient {
    transport: Box<dyn Transport>,
    endpoint: String,
    default_postal_code: Option<u32>,
    timeout: Option<Duration>,
}

impl MeteoSwissClient {
    /// Client with the default HTTPS transport and default endpoint.
    pub fn new() -> anyhow::Result<Self> {
        Self::from_config(&Config::default())
    }

    /// Client with the default HTTPS transport and configured endpoint.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Ok(Self::with_transport(
            Box::new(HttpTransport::new()?),
            config,
        ))
    }

    /// Client with a caller-supplied transport. The seam used by tests and by
    /// embedded targets with their own HTTP stack.
    pub fn with_transport(transport: Box<dyn Transport>, config: &Config) -> Self {
        Self {
            transport,
            endpoint: config.endpoint.clone(),
            default_postal_code: config.default_postal_code,
            timeout: config.timeout(),
        }
    }

    /// Query the configured default postal code with the configured timeout.
    pub fn query_default(&self) -> anyhow::Result<WeatherReport> {
        let postal_code = self.default_postal_code.ok_or_else(|| {
            anyhow::anyhow!(
                "No default postal code configured.\n\
                 Hint: run `meteoswiss configure` first."
            )
        })?;

        Ok(self.query(postal_code, self.timeout)?)
    }

    /// Fetch and decode the weather report for a Swiss postal code.
    ///
    /// `timeout: None` lets the request block indefinitely. On any failure no
    /// partial report escapes; the caller gets the error and nothing else.
    pub fn query(
        &self,
        postal_code: u32,
        timeout: Option<Duration>,
    ) -> Result<WeatherReport, MeteoSwissError> {
        let url = self.build_url(postal_code);
        debug!(%url, "querying plzDetail");

        let mut buf = vec![0u8; RESPONSE_BUFFER_SIZE];
        let len = self
            .transport
            .get(&url, &mut buf, timeout)
            .map_err(MeteoSwissError::Transport)?;

        let root: Value = serde_json::from_slice(&buf[..len]).map_err(MeteoSwissError::Parse)?;
        let root_obj = root.as_object().ok_or(MeteoSwissError::NotAnObject)?;

        validate(&root)?;

        let current = root_obj
            .get("currentWeather")
            .and_then(Value::as_object)
            .ok_or(MeteoSwissError::MalformedSection("currentWeather"))?;
        let forecast = root_obj
            .get("forecast")
            .and_then(Value::as_array)
            .ok_or(MeteoSwissError::MalformedSection("forecast"))?;
        let graph = root_obj
            .get("graph")
            .and_then(Value::as_object)
            .ok_or(MeteoSwissError::MalformedSection("graph"))?;

        let report = WeatherReport {
            current: extract::current_weather(current),
            forecast: extract::forecast(forecast),
            graph: extract::graph(graph),
        };

        debug!(forecast_days = report.forecast.len(), "query succeeded");
        Ok(report)
    }

    // The endpoint expects the 4-digit postal code zero-padded and suffixed
    // with "00" (a sub-location discriminator), e.g. 1201 -> plz=120100.
    fn build_url(&self, postal_code: u32) -> String {
        format!("{}?plz={:04}00", self.endpoint, postal_code)
    }
}
