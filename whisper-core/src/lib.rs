//! Core library for the `whisper` weather CLI.
//!
//! This crate defines:
//! - Configuration handling
//! - The Visual Crossing fetcher and the raw payload it produces
//! - The snapshot builder: local time, twilight, moon phase, hourly and daily windows
//!
//! It is used by `whisper-cli`, but can also be reused by other front ends.

pub mod builder;
pub mod config;
pub mod error;
pub mod location;
pub mod model;
pub mod payload;
pub mod provider;

pub use builder::build_snapshot;
pub use config::{Config, UnitGroup};
pub use error::WeatherError;
pub use location::{decode_location, encode_location};
pub use model::{
    CurrentConditions, DAYS_AHEAD, DailyForecast, Degrees, HOURS_AHEAD, HourlyForecast, MoonPhase,
    WeatherSnapshot,
};
pub use payload::RawWeatherPayload;
pub use provider::{WeatherFetcher, fetch_snapshot, fetcher_from_config};
