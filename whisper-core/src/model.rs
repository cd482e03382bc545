use chrono::DateTime;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Number of hourly values in a snapshot, starting with the next full hour.
pub const HOURS_AHEAD: usize = 24;

/// Number of daily values in a snapshot, starting with today.
pub const DAYS_AHEAD: usize = 15;

/// Normalized result of one weather lookup, bound to the instant it was built.
#[derive(Debug, Clone, Serialize)]
pub struct WeatherSnapshot {
    pub resolved_address: String,
    pub timezone: Tz,
    /// "Now" at the location, derived from the system clock.
    pub current_time: DateTime<Tz>,
    pub sunrise_time: DateTime<Tz>,
    pub sunset_time: DateTime<Tz>,
    /// `current_time` falls outside `[sunrise_time, sunset_time)`.
    pub is_night: bool,
    pub moon_phase: MoonPhase,
    pub current: CurrentConditions,
    pub hourly: HourlyForecast,
    pub daily: DailyForecast,
}

/// Point-in-time values copied from the provider's current conditions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentConditions {
    pub temp: f64,
    pub sky_condition: String,
    pub wind_speed: f64,
    pub wind_direction: Degrees,
    pub uv_index: f64,
}

/// Next 24 hours; index 0 is the first full hour after `current_time`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyForecast {
    pub temps: [f64; HOURS_AHEAD],
    pub sky_conditions: [String; HOURS_AHEAD],
    pub wind_speeds: [f64; HOURS_AHEAD],
    pub wind_directions: [Degrees; HOURS_AHEAD],
    pub precip_probs: [f64; HOURS_AHEAD],
    pub humidities: [f64; HOURS_AHEAD],
}

/// Next 15 days; index 0 is today at the location.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyForecast {
    pub max_temps: [f64; DAYS_AHEAD],
    pub min_temps: [f64; DAYS_AHEAD],
    pub sky_conditions: [String; DAYS_AHEAD],
}

/// A compass bearing in degrees, as reported by the provider (0 = north).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Degrees(pub f64);

impl Degrees {
    pub fn value(self) -> f64 {
        self.0
    }
}

/// Eight named phases of the lunar cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoonPhase {
    NewMoon,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
    FullMoon,
    WaningGibbous,
    LastQuarter,
    WaningCrescent,
    /// The provider sent a fraction outside `[0, 1]`.
    Invalid,
}

impl MoonPhase {
    /// Classify a lunar-cycle fraction in `[0, 1]`.
    ///
    /// The quarter points are exact: only `0.25` itself is a first quarter.
    pub fn from_fraction(fraction: f64) -> Self {
        if !(0.0..=1.0).contains(&fraction) {
            MoonPhase::Invalid
        } else if fraction == 0.0 {
            MoonPhase::NewMoon
        } else if fraction < 0.25 {
            MoonPhase::WaxingCrescent
        } else if fraction == 0.25 {
            MoonPhase::FirstQuarter
        } else if fraction < 0.5 {
            MoonPhase::WaxingGibbous
        } else if fraction == 0.5 {
            MoonPhase::FullMoon
        } else if fraction < 0.75 {
            MoonPhase::WaningGibbous
        } else if fraction == 0.75 {
            MoonPhase::LastQuarter
        } else {
            MoonPhase::WaningCrescent
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MoonPhase::NewMoon => "New Moon",
            MoonPhase::WaxingCrescent => "Waxing Crescent",
            MoonPhase::FirstQuarter => "First Quarter",
            MoonPhase::WaxingGibbous => "Waxing Gibbous",
            MoonPhase::FullMoon => "Full Moon",
            MoonPhase::WaningGibbous => "Waning Gibbous",
            MoonPhase::LastQuarter => "Last Quarter",
            MoonPhase::WaningCrescent => "Waning Crescent",
            MoonPhase::Invalid => "Invalid moon phase",
        }
    }
}

impl std::fmt::Display for MoonPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
