//! Terminal rendering of a [`WeatherSnapshot`].

use chrono::{Days, Duration};
use std::fmt;
use whisper_core::{Degrees, MoonPhase, UnitGroup, WeatherSnapshot};

/// Human-readable report for one snapshot.
pub struct Report<'a> {
    snapshot: &'a WeatherSnapshot,
    units: UnitGroup,
}

impl<'a> Report<'a> {
    pub fn new(snapshot: &'a WeatherSnapshot, units: UnitGroup) -> Self {
        Self { snapshot, units }
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.snapshot;
        let temp = self.units.temperature_symbol();
        let speed = self.units.speed_symbol();

        writeln!(f, "{}", s.resolved_address)?;
        writeln!(f, "{}", s.current_time.format("%A %m/%d %-I:%M %p %Z"))?;
        writeln!(f)?;
        writeln!(
            f,
            "{} {}{temp}  {}",
            sky_icon(&s.current.sky_condition, s.is_night),
            s.current.temp,
            s.current.sky_condition
        )?;
        writeln!(
            f,
            "Wind: {} {} {speed}   UV index: {} ({})",
            compass_point(s.current.wind_direction),
            s.current.wind_speed,
            s.current.uv_index,
            uv_band(s.current.uv_index)
        )?;
        writeln!(
            f,
            "Sunrise: {}   Sunset: {}",
            s.sunrise_time.format("%-I:%M %p"),
            s.sunset_time.format("%-I:%M %p")
        )?;
        writeln!(f, "Moon: {} {}", moon_icon(s.moon_phase), s.moon_phase)?;

        writeln!(f)?;
        writeln!(f, "Next 24 hours")?;
        let sunrise = s.sunrise_time.time();
        let sunset = s.sunset_time.time();
        for (i, temp_value) in s.hourly.temps.iter().enumerate() {
            let at = s.current_time + Duration::hours(i as i64 + 1);
            let night = at.time() < sunrise || at.time() >= sunset;
            let alt = alternate_temp(*temp_value, self.units)
                .map(|t| format!(" ({t})"))
                .unwrap_or_default();
            writeln!(
                f,
                "{:>5}  {} {temp_value}{temp}{alt}  {:>3}% precip  {:>3}% hum  {} {} {speed}",
                at.format("%-I %p").to_string(),
                sky_icon(&s.hourly.sky_conditions[i], night),
                s.hourly.precip_probs[i],
                s.hourly.humidities[i],
                compass_point(s.hourly.wind_directions[i]),
                s.hourly.wind_speeds[i],
            )?;
        }

        writeln!(f)?;
        writeln!(f, "Next 15 days")?;
        let today = s.current_time.date_naive();
        for i in 0..s.daily.max_temps.len() {
            let label = today
                .checked_add_days(Days::new(i as u64))
                .map(|d| d.format("%a %m/%d").to_string())
                .unwrap_or_default();
            writeln!(
                f,
                "{label:<10} {} {}{temp}/{}{temp}  {}",
                sky_icon(&s.daily.sky_conditions[i], false),
                s.daily.max_temps[i],
                s.daily.min_temps[i],
                s.daily.sky_conditions[i],
            )?;
        }

        Ok(())
    }
}

/// Eight-point compass label for a wind bearing.
pub fn compass_point(direction: Degrees) -> &'static str {
    let d = direction.value();
    match d {
        d if (75.0..=105.0).contains(&d) => "E",
        d if d > 105.0 && d < 165.0 => "SE",
        d if (165.0..=195.0).contains(&d) => "S",
        d if d > 195.0 && d < 255.0 => "SW",
        d if (255.0..=285.0).contains(&d) => "W",
        d if d > 285.0 && d < 345.0 => "NW",
        d if (345.0..=360.0).contains(&d) || (0.0..=15.0).contains(&d) => "N",
        d if d > 15.0 && d < 75.0 => "NE",
        _ => "?",
    }
}

/// Exposure band for a UV index reading.
pub fn uv_band(uv: f64) -> &'static str {
    match uv {
        uv if uv == 0.0 => "none",
        uv if uv > 0.0 && uv <= 2.0 => "low",
        uv if uv > 2.0 && uv < 6.0 => "moderate",
        uv if (6.0..=7.0).contains(&uv) => "high",
        uv if uv > 7.0 && uv < 11.0 => "very high",
        uv if uv >= 11.0 => "extreme",
        _ => "?",
    }
}

/// Icon for a provider sky condition such as "Rain, Partially cloudy".
pub fn sky_icon(condition: &str, is_night: bool) -> &'static str {
    if condition.contains("Snow") {
        "❄️"
    } else if condition.contains("Rain") {
        "🌧️"
    } else if condition.contains("Overcast") {
        "☁️"
    } else if condition.contains("Partially cloudy") {
        if is_night { "☁️" } else { "⛅" }
    } else if condition.contains("Clear") {
        if is_night { "🌙" } else { "☀️" }
    } else {
        "❔"
    }
}

pub fn moon_icon(phase: MoonPhase) -> &'static str {
    match phase {
        MoonPhase::NewMoon => "🌑",
        MoonPhase::WaxingCrescent => "🌒",
        MoonPhase::FirstQuarter => "🌓",
        MoonPhase::WaxingGibbous => "🌔",
        MoonPhase::FullMoon => "🌕",
        MoonPhase::WaningGibbous => "🌖",
        MoonPhase::LastQuarter => "🌗",
        MoonPhase::WaningCrescent => "🌘",
        MoonPhase::Invalid => "❔",
    }
}

/// The same temperature in the other common scale, one decimal.
fn alternate_temp(value: f64, units: UnitGroup) -> Option<String> {
    match units {
        UnitGroup::Us => Some(format!("{:.1}°C", (value - 32.0) * 5.0 / 9.0)),
        UnitGroup::Metric | UnitGroup::Uk => Some(format!("{:.1}°F", value * 9.0 / 5.0 + 32.0)),
        UnitGroup::Base => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::America::Chicago;
    use whisper_core::{CurrentConditions, DailyForecast, HourlyForecast};

    fn snapshot() -> WeatherSnapshot {
        WeatherSnapshot {
            resolved_address: "Conway, AR, United States".into(),
            timezone: Chicago,
            current_time: Chicago.with_ymd_and_hms(2023, 12, 11, 20, 15, 0).unwrap(),
            sunrise_time: Chicago.with_ymd_and_hms(2023, 12, 11, 7, 7, 50).unwrap(),
            sunset_time: Chicago.with_ymd_and_hms(2023, 12, 11, 16, 55, 12).unwrap(),
            is_night: true,
            moon_phase: MoonPhase::WaningCrescent,
            current: CurrentConditions {
                temp: 41.0,
                sky_condition: "Clear".into(),
                wind_speed: 6.9,
                wind_direction: Degrees(190.0),
                uv_index: 0.0,
            },
            hourly: HourlyForecast {
                temps: std::array::from_fn(|i| 40.0 + i as f64),
                sky_conditions: std::array::from_fn(|_| "Partially cloudy".to_string()),
                wind_speeds: [5.0; 24],
                wind_directions: [Degrees(45.0); 24],
                precip_probs: [10.0; 24],
                humidities: [80.0; 24],
            },
            daily: DailyForecast {
                max_temps: [55.0; 15],
                min_temps: [32.0; 15],
                sky_conditions: std::array::from_fn(|_| "Rain, Overcast".to_string()),
            },
        }
    }

    #[test]
    fn compass_points_follow_sector_boundaries() {
        assert_eq!(compass_point(Degrees(0.0)), "N");
        assert_eq!(compass_point(Degrees(15.0)), "N");
        assert_eq!(compass_point(Degrees(16.0)), "NE");
        assert_eq!(compass_point(Degrees(90.0)), "E");
        assert_eq!(compass_point(Degrees(190.0)), "S");
        assert_eq!(compass_point(Degrees(300.0)), "NW");
        assert_eq!(compass_point(Degrees(360.0)), "N");
        assert_eq!(compass_point(Degrees(-5.0)), "?");
    }

    #[test]
    fn uv_bands_follow_gauge_boundaries() {
        assert_eq!(uv_band(0.0), "none");
        assert_eq!(uv_band(0.5), "low");
        assert_eq!(uv_band(2.0), "low");
        assert_eq!(uv_band(2.5), "moderate");
        assert_eq!(uv_band(6.0), "high");
        assert_eq!(uv_band(7.0), "high");
        assert_eq!(uv_band(7.5), "very high");
        assert_eq!(uv_band(11.0), "extreme");
        assert_eq!(uv_band(-1.0), "?");
    }

    #[test]
    fn night_variants_only_for_clear_and_partly_cloudy() {
        assert_eq!(sky_icon("Clear", true), "🌙");
        assert_eq!(sky_icon("Clear", false), "☀️");
        assert_eq!(sky_icon("Partially cloudy", true), "☁️");
        assert_eq!(sky_icon("Rain, Partially cloudy", true), "🌧️");
        assert_eq!(sky_icon("Snow, Overcast", false), "❄️");
        assert_eq!(sky_icon("Hail", false), "❔");
    }

    #[test]
    fn alternate_temp_converts_between_scales() {
        assert_eq!(alternate_temp(32.0, UnitGroup::Us).as_deref(), Some("0.0°C"));
        assert_eq!(alternate_temp(100.0, UnitGroup::Metric).as_deref(), Some("212.0°F"));
        assert_eq!(alternate_temp(273.15, UnitGroup::Base), None);
    }

    #[test]
    fn report_lists_every_window_entry() {
        let snap = snapshot();
        let text = Report::new(&snap, UnitGroup::Us).to_string();

        assert!(text.starts_with("Conway, AR, United States\n"));
        assert!(text.contains("Sunrise: 7:07 AM   Sunset: 4:55 PM"));
        assert!(text.contains("Moon: 🌘 Waning Crescent"));
        assert!(text.contains("🌙 41°F  Clear"));
        assert!(text.contains("Wind: S 6.9 mph   UV index: 0 (none)"));
        // first hourly row is 9 PM, the last one 8 PM tomorrow
        assert!(text.contains(" 9 PM"));
        assert!(text.contains("63°F"));
        assert!(text.contains("Mon 12/11"));
        assert!(text.contains("Mon 12/25"));
        assert_eq!(text.matches("precip").count(), 24);
        assert_eq!(text.matches("Rain, Overcast").count(), 15);
    }
}
