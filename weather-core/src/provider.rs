use async_trait::async_trait;
use std::fmt::Debug;
use tracing::debug;

use crate::{
    error::LookupError,
    mapper::map_payload,
    model::{CityQuery, CurrentWeatherPayload, WeatherSnapshot},
};

pub mod openweather;

pub use openweather::OpenWeatherProvider;

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// One request for the current conditions in `city`. No retries.
    async fn current(&self, city: &CityQuery) -> Result<CurrentWeatherPayload, LookupError>;
}

#[async_trait]
impl<P: WeatherProvider + ?Sized> WeatherProvider for Box<P> {
    async fn current(&self, city: &CityQuery) -> Result<CurrentWeatherPayload, LookupError> {
        (**self).current(city).await
    }
}

/// Fetch and map in one step.
pub async fn fetch_snapshot<P>(provider: &P, city: &CityQuery) -> Result<WeatherSnapshot, LookupError>
where
    P: WeatherProvider + ?Sized,
{
    let payload = provider.current(city).await?;
    let snapshot = map_payload(&payload);
    debug!(city = %snapshot.city, icon = %snapshot.icon, "mapped weather snapshot");
    Ok(snapshot)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    };

    /// Canned provider for unit tests: returns queued outcomes in order.
    #[derive(Debug, Default)]
    pub(crate) struct FakeProvider {
        pub(crate) calls: AtomicUsize,
        pub(crate) outcomes: Mutex<Vec<Result<CurrentWeatherPayload, LookupError>>>,
        pub(crate) seen: Mutex<Vec<String>>,
    }

    impl FakeProvider {
        pub(crate) fn with(outcomes: Vec<Result<CurrentWeatherPayload, LookupError>>) -> Self {
            let mut outcomes = outcomes;
            outcomes.reverse();
            Self {
                outcomes: Mutex::new(outcomes),
                ..Default::default()
            }
        }

        pub(crate) fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl WeatherProvider for FakeProvider {
        async fn current(&self, city: &CityQuery) -> Result<CurrentWeatherPayload, LookupError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen.lock().unwrap().push(city.to_string());
            self.outcomes
                .lock()
                .unwrap()
                .pop()
                .unwrap_or(Err(LookupError::FetchFailed { status: 500 }))
        }
    }

    pub(crate) fn payload(city: &str, country: &str, icon: &str, temp: f64) -> CurrentWeatherPayload {
        serde_json::from_value(serde_json::json!({
            "name": city,
            "dt": 1_700_000_000,
            "timezone": 0,
            "main": {"temp": temp, "humidity": 55},
            "weather": [{"icon": icon}],
            "wind": {"speed": 4.1},
            "sys": {"country": country}
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn fetch_snapshot_maps_provider_payload() {
        let provider = FakeProvider::with(vec![Ok(payload("Oslo", "NO", "13d", -3.5))]);
        let city = CityQuery::parse("Oslo").unwrap();

        let snapshot = fetch_snapshot(&provider, &city).await.unwrap();

        assert_eq!(snapshot.city, "Oslo");
        assert_eq!(snapshot.temperature, -4);
        assert_eq!(snapshot.icon, crate::model::IconCategory::Snow);
        assert!(snapshot.is_day);
        assert_eq!(snapshot.local_time, "22:13");
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn fetch_snapshot_passes_errors_through() {
        let provider = FakeProvider::with(vec![Err(LookupError::NotFound)]);
        let city = CityQuery::parse("Atlantis").unwrap();

        let err = fetch_snapshot(&provider, &city).await.unwrap_err();
        assert_eq!(err, LookupError::NotFound);
    }

    #[tokio::test]
    async fn boxed_provider_delegates() {
        let provider: Box<dyn WeatherProvider> =
            Box::new(FakeProvider::with(vec![Ok(payload("Quito", "EC", "02n", 12.0))]));
        let city = CityQuery::parse("Quito").unwrap();

        let snapshot = fetch_snapshot(&provider, &city).await.unwrap();
        assert_eq!(snapshot.country, "EC");
        assert!(!snapshot.is_day);
    }
}
