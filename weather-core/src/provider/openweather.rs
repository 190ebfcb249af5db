use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument, warn};

use crate::{
    config::Config,
    error::LookupError,
    model::{CityQuery, CurrentWeatherPayload},
};

use super::WeatherProvider;

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    config: Config,
    http: Client,
}

impl OpenWeatherProvider {
    /// The config is captured here once; the key is checked on every call.
    pub fn new(config: Config) -> Self {
        Self::with_client(config, Client::new())
    }

    pub fn with_client(config: Config, http: Client) -> Self {
        Self { config, http }
    }

    fn current_url(&self) -> String {
        format!("{}/weather", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    #[instrument(skip_all, fields(city = %city))]
    async fn current(&self, city: &CityQuery) -> Result<CurrentWeatherPayload, LookupError> {
        let api_key = self.config.api_key().ok_or(LookupError::MissingCredential)?;

        debug!("requesting current weather");
        let res = self
            .http
            .get(self.current_url())
            .query(&[
                ("q", city.as_str()),
                ("appid", api_key),
                ("units", "metric"),
            ])
            .send()
            .await
            .map_err(|e| {
                // Drop the URL: it carries the key.
                let e = e.without_url();
                warn!(error = %e, "OpenWeather request failed");
                LookupError::from(e)
            })?;

        let status = res.status();
        debug!(%status, "OpenWeather responded");

        if !status.is_success() {
            let err = LookupError::from_status(status);
            warn!(%status, error = ?err, "OpenWeather returned an error status");
            return Err(err);
        }

        let body = res
            .text()
            .await
            .map_err(|e| LookupError::from(e.without_url()))?;

        parse_current(&body)
    }
}

/// Parse a 2xx body. Missing required fields or an empty `weather` list are
/// reported as [`LookupError::MalformedResponse`].
pub fn parse_current(body: &str) -> Result<CurrentWeatherPayload, LookupError> {
    let parsed: CurrentWeatherPayload = serde_json::from_str(body).map_err(|e| {
        warn!(error = %e, body = %truncate_body(body), "unparseable OpenWeather body");
        LookupError::MalformedResponse(e.to_string())
    })?;

    if parsed.weather.is_empty() {
        return Err(LookupError::MalformedResponse(
            "response contained no weather conditions".to_string(),
        ));
    }

    Ok(parsed)
}

fn truncate_body(body: &str) -> &str {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}
