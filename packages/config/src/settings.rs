// ABOUTME: Settings resolved from environment variables
// ABOUTME: Ambient credential fallback, provider endpoint, simulation timing, and UI tick rate

use std::env;
use std::num::ParseIntError;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, info};

use crate::constants::{
    API_KEY, AUDITFLOW_GEMINI_BASE_URL, AUDITFLOW_SIMULATION_DELAYS_MS, AUDITFLOW_TICK_RATE_MS,
    GEMINI_API_KEY,
};

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_SIMULATION_DELAYS_MS: [u64; 3] = [800, 800, 1200];
pub const DEFAULT_TICK_RATE_MS: u64 = 250;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Invalid simulation delays '{0}': expected three comma-separated milliseconds")]
    InvalidDelays(String),
    #[error("Invalid tick rate: {0}")]
    InvalidTickRate(#[from] ParseIntError),
    #[error("Tick rate must be greater than zero")]
    ZeroTickRate,
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

#[derive(Clone)]
pub struct Settings {
    /// Credential used when the user has not entered a Gemini key
    pub ambient_api_key: Option<String>,
    pub gemini_base_url: String,
    pub simulation_delays: [Duration; 3],
    pub tick_rate_ms: u64,
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field(
                "ambient_api_key",
                &self.ambient_api_key.as_ref().map(|_| "<redacted>"),
            )
            .field("gemini_base_url", &self.gemini_base_url)
            .field("simulation_delays", &self.simulation_delays)
            .field("tick_rate_ms", &self.tick_rate_ms)
            .finish()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ambient_api_key: None,
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            simulation_delays: DEFAULT_SIMULATION_DELAYS_MS.map(Duration::from_millis),
            tick_rate_ms: DEFAULT_TICK_RATE_MS,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Resolve settings through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let ambient_api_key = non_empty(GEMINI_API_KEY).or_else(|| non_empty(API_KEY));
        if ambient_api_key.is_none() {
            info!("No ambient Gemini API key set - runs without a user key will be simulated");
        }

        let gemini_base_url = match non_empty(AUDITFLOW_GEMINI_BASE_URL) {
            Some(url) => {
                let url = url.trim().trim_end_matches('/').to_string();
                if !(url.starts_with("http://") || url.starts_with("https://")) {
                    return Err(ConfigError::InvalidBaseUrl(url));
                }
                info!("Using custom Gemini base URL: {}", url);
                url
            }
            None => DEFAULT_GEMINI_BASE_URL.to_string(),
        };

        let simulation_delays = match non_empty(AUDITFLOW_SIMULATION_DELAYS_MS) {
            Some(raw) => parse_delays(&raw)?,
            None => DEFAULT_SIMULATION_DELAYS_MS.map(Duration::from_millis),
        };

        let tick_rate_ms = match non_empty(AUDITFLOW_TICK_RATE_MS) {
            Some(raw) => raw.trim().parse::<u64>()?,
            None => DEFAULT_TICK_RATE_MS,
        };
        if tick_rate_ms == 0 {
            return Err(ConfigError::ZeroTickRate);
        }

        let settings = Settings {
            ambient_api_key,
            gemini_base_url,
            simulation_delays,
            tick_rate_ms,
        };
        debug!("Resolved settings: {:?}", settings);
        Ok(settings)
    }
}

fn parse_delays(raw: &str) -> Result<[Duration; 3], ConfigError> {
    let parsed: Vec<u64> = raw
        .split(',')
        .map(|part| part.trim().parse::<u64>())
        .collect::<Result<_, _>>()
        .map_err(|_| ConfigError::InvalidDelays(raw.to_string()))?;

    match parsed.as_slice() {
        [a, b, c] => Ok([
            Duration::from_millis(*a),
            Duration::from_millis(*b),
            Duration::from_millis(*c),
        ]),
        _ => Err(ConfigError::InvalidDelays(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::from_lookup(lookup(&[])).unwrap();
        assert_eq!(settings.ambient_api_key, None);
        assert_eq!(settings.gemini_base_url, DEFAULT_GEMINI_BASE_URL);
        assert_eq!(
            settings.simulation_delays,
            [
                Duration::from_millis(800),
                Duration::from_millis(800),
                Duration::from_millis(1200)
            ]
        );
        assert_eq!(settings.tick_rate_ms, DEFAULT_TICK_RATE_MS);
    }

    #[test]
    fn test_gemini_key_preferred_over_legacy() {
        let settings =
            Settings::from_lookup(lookup(&[(GEMINI_API_KEY, "primary"), (API_KEY, "legacy")]))
                .unwrap();
        assert_eq!(settings.ambient_api_key.as_deref(), Some("primary"));
    }

    #[test]
    fn test_blank_key_falls_through_to_legacy() {
        let settings =
            Settings::from_lookup(lookup(&[(GEMINI_API_KEY, "  "), (API_KEY, "legacy")])).unwrap();
        assert_eq!(settings.ambient_api_key.as_deref(), Some("legacy"));
    }

    #[test]
    fn test_custom_base_url_trims_slash() {
        let settings =
            Settings::from_lookup(lookup(&[(AUDITFLOW_GEMINI_BASE_URL, "http://localhost:9000/")]))
                .unwrap();
        assert_eq!(settings.gemini_base_url, "http://localhost:9000");
    }

    #[test]
    fn test_base_url_requires_scheme() {
        let err = Settings::from_lookup(lookup(&[(AUDITFLOW_GEMINI_BASE_URL, "localhost:9000")]))
            .unwrap_err();
        assert_eq!(err, ConfigError::InvalidBaseUrl("localhost:9000".to_string()));
    }

    #[test]
    fn test_custom_delays() {
        let settings =
            Settings::from_lookup(lookup(&[(AUDITFLOW_SIMULATION_DELAYS_MS, "0, 10,20")])).unwrap();
        assert_eq!(
            settings.simulation_delays,
            [
                Duration::ZERO,
                Duration::from_millis(10),
                Duration::from_millis(20)
            ]
        );
    }

    #[rstest]
    #[case("100,200")]
    #[case("1,2,3,4")]
    #[case("a,b,c")]
    fn test_invalid_delays(#[case] raw: &str) {
        let err =
            Settings::from_lookup(lookup(&[(AUDITFLOW_SIMULATION_DELAYS_MS, raw)])).unwrap_err();
        assert_eq!(err, ConfigError::InvalidDelays(raw.to_string()));
    }

    #[test]
    fn test_zero_tick_rate_rejected() {
        let err = Settings::from_lookup(lookup(&[(AUDITFLOW_TICK_RATE_MS, "0")])).unwrap_err();
        assert_eq!(err, ConfigError::ZeroTickRate);
    }

    #[test]
    fn test_debug_redacts_key() {
        let settings = Settings::from_lookup(lookup(&[(GEMINI_API_KEY, "secret-key")])).unwrap();
        let rendered = format!("{:?}", settings);
        assert!(!rendered.contains("secret-key"));
        assert!(rendered.contains("<redacted>"));
    }
}
