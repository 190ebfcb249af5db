//! Pure mapping from the provider payload to the display record.

use chrono::NaiveTime;

use crate::model::{CurrentWeatherPayload, IconCategory, WeatherSnapshot};

const SECONDS_PER_DAY: i64 = 86_400;

/// Unicode Regional Indicator Symbol Letter A.
const REGIONAL_INDICATOR_A: u32 = 0x1F1E6;

const ICON_TABLE: [(&str, IconCategory); 18] = [
    ("01d", IconCategory::Clear),
    ("01n", IconCategory::Clear),
    ("02d", IconCategory::Cloud),
    ("02n", IconCategory::Cloud),
    ("03d", IconCategory::Cloud),
    ("03n", IconCategory::Cloud),
    ("04d", IconCategory::Cloud),
    ("04n", IconCategory::Cloud),
    ("09d", IconCategory::Drizzle),
    ("09n", IconCategory::Drizzle),
    ("10d", IconCategory::Rain),
    ("10n", IconCategory::Rain),
    // thunderstorm
    ("11d", IconCategory::Rain),
    ("11n", IconCategory::Rain),
    ("13d", IconCategory::Snow),
    ("13n", IconCategory::Snow),
    // mist
    ("50d", IconCategory::Cloud),
    ("50n", IconCategory::Cloud),
];

pub fn icon_category(code: &str) -> IconCategory {
    ICON_TABLE
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, category)| *category)
        .unwrap_or(IconCategory::Clear)
}

pub fn is_day(code: &str) -> bool {
    code.ends_with('d')
}

/// Wall-clock `HH:MM` at `timestamp` (unix seconds, UTC) shifted by
/// `offset_secs`. The shifted instant is read as UTC so no host timezone is
/// applied on top.
pub fn format_local_time(timestamp: i64, offset_secs: i64) -> String {
    let local = timestamp.saturating_add(offset_secs);
    // rem_euclid keeps pre-epoch instants on the right side of midnight.
    let secs_of_day = local.rem_euclid(SECONDS_PER_DAY) as u32;

    NaiveTime::from_num_seconds_from_midnight_opt(secs_of_day, 0)
        .map(|t| t.format("%H:%M").to_string())
        .unwrap_or_else(|| "--:--".to_string())
}

/// Flag emoji for an ISO 3166 alpha-2 code, case-insensitive.
///
/// No check is made that the code names a real country.
pub fn country_flag(code: &str) -> String {
    code.to_uppercase()
        .chars()
        .filter_map(|c| {
            let offset = (c as u32).wrapping_sub('A' as u32);
            char::from_u32(REGIONAL_INDICATOR_A.wrapping_add(offset))
        })
        .collect()
}

/// Half away from zero.
pub fn round_temperature(celsius: f64) -> i32 {
    celsius.round() as i32
}

pub fn map_payload(payload: &CurrentWeatherPayload) -> WeatherSnapshot {
    let code = payload.icon_code();

    WeatherSnapshot {
        temperature: round_temperature(payload.main.temp),
        city: payload.name.clone(),
        country: payload.sys.country.clone(),
        humidity: payload.main.humidity,
        wind_speed: payload.wind.speed,
        icon: icon_category(code),
        is_day: is_day(code),
        local_time: format_local_time(payload.dt, payload.timezone),
    }
}
