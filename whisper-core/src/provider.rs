use crate::{
    Config, RawWeatherPayload, WeatherError, WeatherSnapshot, builder::build_snapshot,
    provider::visualcrossing::VisualCrossingFetcher,
};
use async_trait::async_trait;
use chrono::Local;
use std::fmt::Debug;

pub mod visualcrossing;

/// Source of raw weather payloads for a free-text location.
#[async_trait]
pub trait WeatherFetcher: Send + Sync + Debug {
    /// Fetch the timeline for `location`.
    ///
    /// An unrecognized location is `Ok` with an invalid payload; only
    /// transport-level trouble is an error.
    async fn fetch(&self, location: &str) -> Result<RawWeatherPayload, WeatherError>;
}

/// Construct the fetcher described by `config`.
pub fn fetcher_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherFetcher>> {
    let api_key = config.require_api_key()?;

    let fetcher = VisualCrossingFetcher::new(
        api_key.to_owned(),
        config.base_url.clone(),
        config.unit_group,
        config.timeout(),
    )?;

    Ok(Box::new(fetcher))
}

/// One complete lookup: fetch, then build against the system clock.
pub async fn fetch_snapshot(
    fetcher: &dyn WeatherFetcher,
    location: &str,
) -> Result<WeatherSnapshot, WeatherError> {
    let payload = fetcher.fetch(location).await?;
    build_snapshot(payload, &Local::now())
}
