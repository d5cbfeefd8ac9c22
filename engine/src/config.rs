//! Site configuration.
//!
//! Hosts may ship a small TOML file tuning the countdown target, the time
//! endpoint, and the lazy-load lookahead. Every field is optional; the
//! defaults reproduce the shipped site behavior.

use chrono::NaiveDateTime;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::lazy::DEFAULT_LOOKAHEAD_PX;

/// Release instant used when none is configured.
const DEFAULT_TARGET: &str = "2026-01-01T12:00:00";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Default, Deserialize)]
pub struct SiteConfig {
    pub countdown: Option<CountdownConfig>,
    pub gallery: Option<GalleryConfig>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CountdownConfig {
    /// Zone-less release instant, e.g. `"2026-01-01T12:00:00"`. The host
    /// decides which zone it is anchored to.
    pub target: Option<String>,
    /// Override for the remote time-service endpoint.
    pub time_endpoint: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct GalleryConfig {
    /// Proximity lookahead margin in pixels. Consumed by the host when it
    /// constructs its [`ProximityObserver`](crate::host::ProximityObserver);
    /// the engine never measures geometry itself.
    pub lookahead_px: Option<u32>,
}

impl SiteConfig {
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The configured release instant, or the shipped default. An
    /// unparseable value logs a warning and falls back to the default.
    #[must_use]
    pub fn countdown_target(&self) -> NaiveDateTime {
        let raw = self
            .countdown
            .as_ref()
            .and_then(|c| c.target.as_deref())
            .unwrap_or(DEFAULT_TARGET);

        parse_target(raw).unwrap_or_else(|| {
            tracing::warn!(raw, "Unparseable countdown target in config, using default");
            parse_target(DEFAULT_TARGET).unwrap_or_default()
        })
    }

    #[must_use]
    pub fn time_endpoint(&self) -> &str {
        self.countdown
            .as_ref()
            .and_then(|c| c.time_endpoint.as_deref())
            .unwrap_or(vitrine_clock::TIME_API_URL)
    }

    /// Proximity lookahead for the host's observer, in pixels.
    #[must_use]
    pub fn lookahead_px(&self) -> u32 {
        self.gallery
            .as_ref()
            .and_then(|g| g.lookahead_px)
            .unwrap_or(DEFAULT_LOOKAHEAD_PX)
    }
}

fn parse_target(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw.trim(), "%Y-%m-%dT%H:%M:%S").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use std::io::Write;

    fn default_target() -> NaiveDateTime {
        NaiveDateTime::new(
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
        )
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config = SiteConfig::default();
        assert_eq!(config.countdown_target(), default_target());
        assert_eq!(config.time_endpoint(), vitrine_clock::TIME_API_URL);
        assert_eq!(config.lookahead_px(), DEFAULT_LOOKAHEAD_PX);
    }

    #[test]
    fn parses_full_config() {
        let raw = r#"
            [countdown]
            target = "2027-06-15T09:30:00"
            time_endpoint = "https://time.example.com/utc"

            [gallery]
            lookahead_px = 400
        "#;
        let config: SiteConfig = toml::from_str(raw).unwrap();
        assert_eq!(
            config.countdown_target(),
            NaiveDateTime::new(
                NaiveDate::from_ymd_opt(2027, 6, 15).unwrap(),
                NaiveTime::from_hms_opt(9, 30, 0).unwrap(),
            )
        );
        assert_eq!(config.time_endpoint(), "https://time.example.com/utc");
        assert_eq!(config.lookahead_px(), 400);
    }

    #[test]
    fn bad_target_falls_back_to_default() {
        let config: SiteConfig = toml::from_str(
            r#"
            [countdown]
            target = "new years, noonish"
        "#,
        )
        .unwrap();
        assert_eq!(config.countdown_target(), default_target());
    }

    #[test]
    fn load_from_reads_a_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[gallery]\nlookahead_px = 64").unwrap();

        let config = SiteConfig::load_from(file.path()).unwrap();
        assert_eq!(config.lookahead_px(), 64);
    }

    #[test]
    fn load_from_reports_parse_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "this is not toml = = =").unwrap();

        let err = SiteConfig::load_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
