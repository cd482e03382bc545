//! Turns a raw timeline payload into a [`WeatherSnapshot`].
//!
//! The build is pure: the caller supplies "now" as a zoned system timestamp,
//! so the provider's own 15-minute `currentConditions.datetime` is never used.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, Offset, TimeZone, Timelike};
use chrono_tz::Tz;
use log::debug;

use crate::{
    WeatherError,
    model::{
        CurrentConditions, DAYS_AHEAD, DailyForecast, HOURS_AHEAD, HourlyForecast, MoonPhase,
        WeatherSnapshot,
    },
    payload::{DayRecord, HourRecord, RawWeatherPayload},
};

const HOURS_PER_DAY: usize = 24;

/// Build a snapshot from one payload.
///
/// `system_time` is the system clock reading in the system's own zone
/// (typically `chrono::Local::now()`); it is re-expressed in the location's
/// zone to become the snapshot's `current_time`.
pub fn build_snapshot<Z: TimeZone>(
    payload: RawWeatherPayload,
    system_time: &DateTime<Z>,
) -> Result<WeatherSnapshot, WeatherError> {
    let timeline = payload.into_timeline()?;

    let timezone: Tz = timeline.timezone.parse().map_err(|_| {
        WeatherError::malformed(format!("unknown timezone `{}`", timeline.timezone))
    })?;
    let current_time = system_time.with_timezone(&timezone);
    let hour = current_time.hour() as usize;
    debug!("building snapshot for {timezone} at {current_time} (anchor hour {hour})");

    let days = timeline.days.as_slice();
    let today = days.first().ok_or_else(|| WeatherError::malformed("`days` is empty"))?;
    let date = NaiveDate::parse_from_str(&today.datetime, "%Y-%m-%d").map_err(|e| {
        WeatherError::malformed(format!("bad `days[0].datetime` {:?}: {e}", today.datetime))
    })?;

    let cc = timeline.current_conditions;
    let offset = current_time.offset().fix();
    let sunrise_time = twilight(date, &cc.sunrise, "sunrise", offset, timezone)?;
    let sunset_time = twilight(date, &cc.sunset, "sunset", offset, timezone)?;
    let is_night = current_time >= sunset_time || current_time < sunrise_time;

    let hourly = HourlyForecast {
        temps: hourly_window(days, hour, "temp", |h| h.temp)?,
        sky_conditions: hourly_window(days, hour, "conditions", |h| h.conditions.clone())?,
        wind_speeds: hourly_window(days, hour, "windspeed", |h| h.windspeed)?,
        wind_directions: hourly_window(days, hour, "winddir", |h| h.winddir)?,
        precip_probs: hourly_window(days, hour, "precipprob", |h| h.precipprob)?,
        humidities: hourly_window(days, hour, "humidity", |h| h.humidity)?,
    };

    let daily = DailyForecast {
        max_temps: daily_window(days, "tempmax", |d| d.tempmax)?,
        min_temps: daily_window(days, "tempmin", |d| d.tempmin)?,
        sky_conditions: daily_window(days, "conditions", |d| d.conditions.clone())?,
    };

    Ok(WeatherSnapshot {
        resolved_address: timeline.resolved_address,
        timezone,
        current_time,
        sunrise_time,
        sunset_time,
        is_night,
        moon_phase: MoonPhase::from_fraction(cc.moonphase),
        current: CurrentConditions {
            temp: cc.temp,
            sky_condition: cc.conditions,
            wind_speed: cc.windspeed,
            wind_direction: cc.winddir,
            uv_index: cc.uvindex,
        },
        hourly,
        daily,
    })
}

/// Today's date + a provider `HH:MM:SS` time-of-day, at the location's
/// current UTC offset.
fn twilight(
    date: NaiveDate,
    time_of_day: &str,
    field: &str,
    offset: FixedOffset,
    timezone: Tz,
) -> Result<DateTime<Tz>, WeatherError> {
    let time = NaiveTime::parse_from_str(time_of_day, "%H:%M:%S").map_err(|e| {
        WeatherError::malformed(format!("bad `currentConditions.{field}` {time_of_day:?}: {e}"))
    })?;

    offset
        .from_local_datetime(&date.and_time(time))
        .single()
        .map(|dt| dt.with_timezone(&timezone))
        .ok_or_else(|| WeatherError::malformed(format!("`{field}` is not a valid instant")))
}

/// The rest of today after `hour`, then tomorrow up to and including `hour`.
fn hourly_window<T, F>(
    days: &[DayRecord],
    hour: usize,
    field: &str,
    get: F,
) -> Result<[T; HOURS_AHEAD], WeatherError>
where
    F: Fn(&HourRecord) -> T,
{
    let [today, tomorrow, ..] = days else {
        return Err(WeatherError::malformed(format!(
            "hourly `{field}` needs today and tomorrow, got {} day(s)",
            days.len()
        )));
    };
    if hour >= HOURS_PER_DAY {
        return Err(WeatherError::malformed(format!("hour {hour} is out of range")));
    }

    let rest_of_today = today.hours.get(hour + 1..HOURS_PER_DAY).ok_or_else(|| {
        WeatherError::malformed(format!("`days[0].hours` has {} entries", today.hours.len()))
    })?;
    let start_of_tomorrow = tomorrow.hours.get(..=hour).ok_or_else(|| {
        WeatherError::malformed(format!("`days[1].hours` has {} entries", tomorrow.hours.len()))
    })?;

    collect_window(rest_of_today.iter().chain(start_of_tomorrow).map(get).collect(), field)
}

/// One value per day, today first.
fn daily_window<T, F>(days: &[DayRecord], field: &str, get: F) -> Result<[T; DAYS_AHEAD], WeatherError>
where
    F: Fn(&DayRecord) -> T,
{
    let window = days.get(..DAYS_AHEAD).ok_or_else(|| {
        WeatherError::malformed(format!(
            "daily `{field}` needs {DAYS_AHEAD} days, got {}",
            days.len()
        ))
    })?;

    collect_window(window.iter().map(get).collect(), field)
}

fn collect_window<T, const N: usize>(values: Vec<T>, field: &str) -> Result<[T; N], WeatherError> {
    values.try_into().map_err(|v: Vec<T>| {
        WeatherError::malformed(format!("`{field}` window has {} values, expected {N}", v.len()))
    })
}
