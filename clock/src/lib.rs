//! Remote time source resolution with local fallback.
//!
//! The countdown needs one trustworthy "current time" at startup. This
//! crate fetches it from an HTTP time service and, on any failure
//! (transport error, non-success status, malformed payload), falls back to
//! the local system clock. The fallback is logged as a warning and is
//! otherwise invisible to callers: [`resolve_reference`] is infallible and
//! returns a [`ReferenceInstant`] tagged with its [`TimeOrigin`].
//!
//! Failure is modelled as data, not control flow: callers never see an
//! error, only which clock won.

use std::sync::OnceLock;
use std::time::Duration;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;
use thiserror::Error;

use vitrine_types::TimeOrigin;

/// Canonical time-service endpoint (UTC zone).
pub const TIME_API_URL: &str = "https://timeapi.io/api/Time/current/zone?timeZone=UTC";

const CONNECT_TIMEOUT_SECS: u64 = 10;
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Shared HTTP client for time requests.
///
/// The time fetch happens once per page session, but the client is shared
/// so embedders issuing their own requests reuse the pool.
pub fn http_client() -> &'static reqwest::Client {
    static CLIENT: OnceLock<reqwest::Client> = OnceLock::new();
    CLIENT.get_or_init(|| {
        reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .redirect(reqwest::redirect::Policy::none())
            .https_only(true)
            .build()
            .unwrap_or_else(|e| {
                tracing::error!("Failed to build time client: {e}. Using minimal fallback.");
                reqwest::Client::new()
            })
    })
}

/// Errors from the remote time fetch.
///
/// Every variant takes the same recovery path (the local clock); the
/// taxonomy exists for the warning log, not for callers to branch on.
#[derive(Debug, Error)]
pub enum ClockError {
    #[error("time request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("time service returned {status}")]
    Status { status: reqwest::StatusCode },
    #[error("time payload malformed: {0}")]
    MalformedBody(#[from] serde_json::Error),
    #[error("unparseable timestamp {raw:?}")]
    MalformedTimestamp { raw: String },
}

/// JSON body returned by the time service. Any schema deviation is a
/// malformed response.
#[derive(Debug, Deserialize)]
struct TimeApiResponse {
    #[serde(rename = "dateTime")]
    date_time: String,
}

/// The trusted starting point for an independently-advancing local clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceInstant {
    pub instant: DateTime<Utc>,
    pub origin: TimeOrigin,
}

impl ReferenceInstant {
    #[must_use]
    pub fn local_now() -> Self {
        Self {
            instant: Utc::now(),
            origin: TimeOrigin::Local,
        }
    }
}

/// Fetch the current time from the remote service using the shared client.
pub async fn fetch_remote_time(endpoint: &str) -> Result<DateTime<Utc>, ClockError> {
    fetch_remote_time_with(http_client(), endpoint).await
}

/// Fetch the current time with an explicit client.
pub async fn fetch_remote_time_with(
    client: &reqwest::Client,
    endpoint: &str,
) -> Result<DateTime<Utc>, ClockError> {
    let response = client.get(endpoint).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(ClockError::Status { status });
    }

    let body = response.text().await?;
    let payload: TimeApiResponse = serde_json::from_str(&body)?;
    parse_timestamp(&payload.date_time)
}

/// Resolve the countdown reference: remote time if the service answers,
/// local clock otherwise. Never fails.
pub async fn resolve_reference(endpoint: &str) -> ReferenceInstant {
    resolve_reference_with(http_client(), endpoint).await
}

/// Resolve the countdown reference with an explicit client.
pub async fn resolve_reference_with(
    client: &reqwest::Client,
    endpoint: &str,
) -> ReferenceInstant {
    match fetch_remote_time_with(client, endpoint).await {
        Ok(instant) => {
            tracing::debug!(%instant, "Adopted remote time as countdown reference");
            ReferenceInstant {
                instant,
                origin: TimeOrigin::Remote,
            }
        }
        Err(err) => {
            tracing::warn!(error = %err, "Time service unavailable, using local clock instead");
            ReferenceInstant::local_now()
        }
    }
}

/// Parse the service's timestamp.
///
/// The UTC-zone endpoint returns a zone-less ISO timestamp
/// (`2026-08-23T12:34:56.789`); some deployments include an offset, so
/// RFC 3339 is accepted too.
fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, ClockError> {
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(raw) {
        return Ok(with_offset.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|_| ClockError::MalformedTimestamp {
            raw: raw.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_zoneless_service_timestamp() {
        let parsed = parse_timestamp("2026-01-01T11:59:58.123").unwrap();
        let expected = Utc.with_ymd_and_hms(2026, 1, 1, 11, 59, 58).unwrap()
            + chrono::Duration::milliseconds(123);
        assert_eq!(parsed, expected);
    }

    #[test]
    fn parses_rfc3339_timestamp() {
        let parsed = parse_timestamp("2026-01-01T12:00:00+02:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2026, 1, 1, 10, 0, 0).unwrap());
    }

    #[test]
    fn rejects_garbage_timestamp() {
        assert!(matches!(
            parse_timestamp("yesterday-ish"),
            Err(ClockError::MalformedTimestamp { .. })
        ));
    }

    #[test]
    fn malformed_body_is_a_typed_error() {
        let err = serde_json::from_str::<TimeApiResponse>("{\"time\": 12}").unwrap_err();
        let clock_err = ClockError::from(err);
        assert!(matches!(clock_err, ClockError::MalformedBody(_)));
    }
}
