use std::fmt::Write;

use weather_core::{WeatherSnapshot, WidgetState};

pub fn loading_line() -> &'static str {
    "⏳ Loading..."
}

pub fn error_line(message: &str) -> String {
    format!("⚠️  {message}")
}

pub fn day_night_badge(is_day: bool) -> &'static str {
    if is_day { "🌞 Day" } else { "🌙 Night" }
}

/// Results panel for one snapshot.
pub fn snapshot(s: &WeatherSnapshot) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}  {}", s.icon.glyph(), s.icon);
    let _ = writeln!(out, "{}   🕐 {}", day_night_badge(s.is_day), s.local_time);
    let _ = writeln!(out, "{}°C", s.temperature);

    if s.country.is_empty() {
        let _ = writeln!(out, "{}", s.city);
    } else {
        let _ = writeln!(out, "{}  {} {}", s.city, s.flag(), s.country);
    }

    let _ = writeln!(out, "💧 Humidity  {} %", s.humidity);
    let _ = write!(out, "💨 Wind      {} m/s", s.wind_speed);

    out
}

/// Whole widget: error banner, then either the loading line or the last
/// snapshot. A failed search leaves the previous snapshot under the banner.
pub fn panel(state: &WidgetState) -> String {
    let mut sections = Vec::new();

    if let Some(err) = state.error() {
        sections.push(error_line(&err.to_string()));
    }

    if state.is_loading() {
        sections.push(loading_line().to_string());
    } else if let Some(s) = state.snapshot() {
        sections.push(snapshot(s));
    }

    sections.join("\n")
}
