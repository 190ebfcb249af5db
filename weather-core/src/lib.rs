//! Core library for the `weather` city lookup.
//!
//! This crate defines:
//! - Configuration & credential loading
//! - The OpenWeather client behind a provider trait
//! - Mapping of provider payloads into display-ready snapshots
//! - Search box state with stale-response protection
//!
//! It is used by `weather-lookup`, but can also be reused by other front ends.

pub mod config;
pub mod error;
pub mod mapper;
pub mod model;
pub mod provider;
pub mod widget;

pub use config::Config;
pub use error::LookupError;
pub use mapper::{country_flag, format_local_time, icon_category, map_payload};
pub use model::{CityQuery, CurrentWeatherPayload, IconCategory, WeatherSnapshot};
pub use provider::{OpenWeatherProvider, WeatherProvider, fetch_snapshot};
pub use widget::{Key, SearchTicket, WeatherWidget, WidgetState};
