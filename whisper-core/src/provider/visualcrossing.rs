use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;

use crate::{
    RawWeatherPayload, WeatherError, config::UnitGroup, location::encode_location,
};

use super::WeatherFetcher;

/// Bodies the timeline API answers with when it cannot resolve a location.
const INVALID_LOCATION_BODIES: [&str; 2] = [
    "Bad API Request:Invalid location parameter value.",
    "Bad API Request:A location must be specified",
];

/// Visual Crossing timeline API.
#[derive(Debug, Clone)]
pub struct VisualCrossingFetcher {
    api_key: String,
    base_url: String,
    unit_group: UnitGroup,
    http: Client,
}

impl VisualCrossingFetcher {
    pub fn new(
        api_key: String,
        base_url: String,
        unit_group: UnitGroup,
        timeout: Duration,
    ) -> Result<Self, WeatherError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { api_key, base_url, unit_group, http })
    }

    fn timeline_url(&self, location: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), encode_location(location))
    }
}

#[async_trait]
impl WeatherFetcher for VisualCrossingFetcher {
    async fn fetch(&self, location: &str) -> Result<RawWeatherPayload, WeatherError> {
        if location.trim().is_empty() {
            return Ok(RawWeatherPayload::invalid());
        }

        let url = self.timeline_url(location);
        debug!("Fetching timeline from: {url} (unitGroup={})", self.unit_group);

        let res = self
            .http
            .get(&url)
            .query(&[
                ("unitGroup", self.unit_group.as_str()),
                ("key", self.api_key.as_str()),
                ("contentType", "json"),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        classify_response(status, &body)
    }
}

/// Map a timeline response to a payload, an invalid-location marker or an error.
fn classify_response(status: StatusCode, body: &str) -> Result<RawWeatherPayload, WeatherError> {
    if INVALID_LOCATION_BODIES.contains(&body.trim()) {
        debug!("Provider rejected the location ({status})");
        return Ok(RawWeatherPayload::invalid());
    }

    if !status.is_success() {
        warn!("Visual Crossing request failed with status {status}");
        return Err(WeatherError::Network(format!(
            "Visual Crossing request failed with status {}: {}",
            status,
            truncate_body(body),
        )));
    }

    let json: Value = serde_json::from_str(body)
        .map_err(|e| WeatherError::malformed(format!("response is not JSON: {e}")))?;

    Ok(RawWeatherPayload::valid(json))
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::TcpListener,
        task::JoinHandle,
    };

    /// Answer one request with a canned response; yields the request line.
    async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}/timeline", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }

            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();

            String::from_utf8_lossy(&request).lines().next().unwrap_or_default().to_string()
        });

        (base_url, handle)
    }

    fn fetcher(base_url: &str) -> VisualCrossingFetcher {
        VisualCrossingFetcher::new(
            "KEY".into(),
            base_url.into(),
            UnitGroup::Us,
            Duration::from_secs(1),
        )
        .expect("client should build")
    }

    #[test]
    fn timeline_url_escapes_location() {
        let f = fetcher("https://example.test/timeline/");
        assert_eq!(f.timeline_url("Conway, AR"), "https://example.test/timeline/Conway%2C%20AR");
    }

    #[test]
    fn invalid_location_bodies_mark_payload_invalid() {
        for body in INVALID_LOCATION_BODIES {
            let payload = classify_response(StatusCode::BAD_REQUEST, body).unwrap();
            assert!(!payload.is_valid());
        }
    }

    #[test]
    fn error_status_is_network_error() {
        let err = classify_response(StatusCode::UNAUTHORIZED, "No account found").unwrap_err();
        match err {
            WeatherError::Network(msg) => {
                assert!(msg.contains("401"));
                assert!(msg.contains("No account found"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn success_with_json_is_valid() {
        let payload = classify_response(StatusCode::OK, r#"{"timezone":"UTC"}"#).unwrap();
        assert!(payload.is_valid());
    }

    #[test]
    fn success_with_garbage_is_malformed() {
        let err = classify_response(StatusCode::OK, "<html>").unwrap_err();
        assert!(matches!(err, WeatherError::MalformedPayload(_)));
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let long = "é".repeat(300);
        let out = truncate_body(&long);
        assert!(out.ends_with("..."));
        assert_eq!(out.chars().count(), 203);
        assert_eq!(truncate_body("short"), "short");
    }

    #[tokio::test]
    async fn fetch_sends_escaped_location_and_query() {
        let (base_url, server) = serve_once("200 OK", r#"{"timezone":"America/Chicago"}"#).await;

        let payload = fetcher(&base_url).fetch("Conway, AR").await.unwrap();
        assert!(payload.is_valid());

        let request_line = server.await.unwrap();
        assert_eq!(
            request_line,
            "GET /timeline/Conway%2C%20AR?unitGroup=us&key=KEY&contentType=json HTTP/1.1"
        );
    }

    #[tokio::test]
    async fn fetch_maps_rejected_location_to_invalid_payload() {
        let (base_url, server) =
            serve_once("400 Bad Request", "Bad API Request:Invalid location parameter value.").await;

        let payload = fetcher(&base_url).fetch("Nowhere Land").await.unwrap();
        assert!(!payload.is_valid());
        server.await.unwrap();
    }

    #[tokio::test]
    async fn fetch_maps_server_error_to_network() {
        let (base_url, server) = serve_once("503 Service Unavailable", "try later").await;

        let err = fetcher(&base_url).fetch("Paris").await.unwrap_err();
        assert!(err.is_retryable());
        assert!(err.to_string().contains("503"));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn stalled_server_times_out_without_leaking_the_key() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}/timeline", listener.local_addr().unwrap());
        let _server = tokio::spawn(async move {
            let (socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(5)).await;
            drop(socket);
        });

        let f = VisualCrossingFetcher::new(
            "SECRET".into(),
            base_url,
            UnitGroup::Us,
            Duration::from_millis(300),
        )
        .unwrap();

        let err = f.fetch("Conway, AR").await.unwrap_err();
        match err {
            WeatherError::Network(msg) => {
                assert!(msg.contains("timed out"), "unexpected message: {msg}");
                assert!(!msg.contains("SECRET"), "key leaked: {msg}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn blank_location_is_invalid_without_a_request() {
        let f = fetcher("http://127.0.0.1:9/unreachable");
        let payload = f.fetch("   ").await.unwrap();
        assert!(!payload.is_valid());
    }
}
