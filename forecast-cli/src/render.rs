//! Plain-text rendering of lookup results.

use chrono::TimeZone;
use forecast_core::{
    CurrentConditions, DailyForecast, HourlyForecast, LocationCandidate, WeatherCondition,
    WeatherSnapshot,
};
use std::fmt::Display;

const HOURS_SHOWN: usize = 12;

pub fn locations(city: &str, candidates: &[LocationCandidate]) -> String {
    if candidates.is_empty() {
        return format!("No locations found for \"{city}\".\n");
    }

    let mut out = format!("Locations matching \"{city}\":\n");
    for (i, loc) in candidates.iter().enumerate() {
        out.push_str(&format!("  {}. {} ({})\n", i + 1, loc.display_name(), loc.coordinates()));
    }
    out
}

pub fn snapshot<Tz>(title: &str, snapshot: &WeatherSnapshot, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut out = format!("Weather for {title}\n");
    out.push_str(&current_lines(&snapshot.current));

    if !snapshot.hourly.is_empty() {
        out.push_str("\nNext hours:\n");
        for hour in snapshot.hourly.iter().take(HOURS_SHOWN) {
            out.push_str(&hour_line(hour, tz));
        }
    }

    if !snapshot.daily.is_empty() {
        out.push_str("\nNext days:\n");
        for day in &snapshot.daily {
            out.push_str(&day_line(day, tz));
        }
    }

    out
}

fn current_lines(current: &CurrentConditions) -> String {
    format!(
        "Now: {:.1}°C (feels like {:.1}°C), {}\n\
         \x20 Humidity {}%  Pressure {} hPa  UV {:.1}  Visibility {:.1} km\n\
         \x20 Wind {:.1} m/s from {} ({}°)\n",
        current.temp,
        current.feels_like,
        describe(&current.weather),
        current.humidity,
        current.pressure,
        current.uv_index,
        f64::from(current.visibility) / 1000.0,
        current.wind_speed,
        compass(current.wind_deg),
        current.wind_deg
    )
}

fn hour_line<Tz>(hour: &HourlyForecast, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let when = hour
        .time()
        .map(|t| t.with_timezone(tz).format("%H:%M").to_string())
        .unwrap_or_else(|| "--:--".to_string());

    format!(
        "  {when}  {:>5.1}°C  {:>3.0}%  {}\n",
        hour.temp,
        hour.pop * 100.0,
        describe(&hour.weather)
    )
}

fn day_line<Tz>(day: &DailyForecast, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let when = day
        .time()
        .map(|t| t.with_timezone(tz).format("%a %d").to_string())
        .unwrap_or_else(|| "------".to_string());

    format!(
        "  {when}  {:>5.1}°C .. {:>5.1}°C  night {:>5.1}°C  {:>3.0}%  {}\n",
        day.temp.min,
        day.temp.max,
        day.temp.night,
        day.pop * 100.0,
        describe(&day.weather)
    )
}

fn describe(conditions: &[WeatherCondition]) -> &str {
    conditions
        .first()
        .map(|w| w.description.as_str())
        .filter(|d| !d.is_empty())
        .unwrap_or("unknown")
}

fn compass(deg: u16) -> &'static str {
    const POINTS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];
    let idx = ((f64::from(deg % 360) + 22.5) / 45.0) as usize % POINTS.len();
    POINTS[idx]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use forecast_core::DailyTemperature;

    fn rain() -> Vec<WeatherCondition> {
        vec![WeatherCondition {
            main: "Rain".into(),
            description: "light rain".into(),
            icon: "10d".into(),
        }]
    }

    #[test]
    fn compass_points() {
        assert_eq!(compass(0), "N");
        assert_eq!(compass(230), "SW");
        assert_eq!(compass(350), "N");
        assert_eq!(compass(90), "E");
        assert_eq!(compass(360), "N");
    }

    #[test]
    fn empty_locations_message() {
        assert_eq!(locations("Atlantis", &[]), "No locations found for \"Atlantis\".\n");
    }

    #[test]
    fn locations_are_numbered_in_order() {
        let out = locations(
            "Paris",
            &[
                LocationCandidate {
                    name: "Paris".into(),
                    country: "FR".into(),
                    state: Some("Ile-de-France".into()),
                    lat: 48.8589,
                    lon: 2.32,
                },
                LocationCandidate {
                    name: "Paris".into(),
                    country: "US".into(),
                    state: Some("Texas".into()),
                    lat: 33.6609,
                    lon: -95.5555,
                },
            ],
        );

        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines[1], "  1. Paris, Ile-de-France, FR (48.8589, 2.3200)");
        assert!(lines[2].starts_with("  2. Paris, Texas, US"));
    }

    #[test]
    fn snapshot_renders_all_sections() {
        let data = WeatherSnapshot {
            current: CurrentConditions {
                temp: 21.5,
                feels_like: 20.9,
                humidity: 60,
                pressure: 1013,
                uv_index: 3.7,
                visibility: 10000,
                wind_speed: 4.6,
                wind_deg: 230,
                weather: rain(),
            },
            hourly: vec![HourlyForecast {
                dt: 1_700_000_000,
                temp: 21.1,
                weather: rain(),
                pop: 0.2,
            }],
            daily: vec![DailyForecast {
                dt: 1_700_000_000,
                temp: DailyTemperature { day: 22.0, min: 14.3, max: 23.8, night: 15.1 },
                weather: Vec::new(),
                pop: 0.45,
            }],
        };

        let out = snapshot("Warsaw", &data, &Utc);

        assert!(out.starts_with("Weather for Warsaw\n"));
        assert!(out.contains("Now: 21.5°C (feels like 20.9°C), light rain"));
        assert!(out.contains("Humidity 60%  Pressure 1013 hPa  UV 3.7  Visibility 10.0 km"));
        assert!(out.contains("Wind 4.6 m/s from SW (230°)"));
        assert!(out.contains("  22:13   21.1°C   20%  light rain"));
        assert!(out.contains("  Tue 14   14.3°C ..  23.8°C  night  15.1°C   45%  unknown"));
    }

    #[test]
    fn snapshot_without_forecasts_has_no_forecast_headers() {
        let out = snapshot("0.0000, 0.0000", &WeatherSnapshot::default(), &Utc);
        assert!(!out.contains("Next hours"));
        assert!(!out.contains("Next days"));
        assert!(out.contains("Now: 0.0°C (feels like 0.0°C), unknown"));
        assert_eq!(out.lines().count(), 4);
    }

    #[test]
    fn hour_without_valid_timestamp_uses_placeholder() {
        let hour = HourlyForecast { dt: i64::MAX, temp: 5.0, ..Default::default() };
        assert_eq!(hour_line(&hour, &Utc), "  --:--    5.0°C    0%  unknown\n");
    }
}
