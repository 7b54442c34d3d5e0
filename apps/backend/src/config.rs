//! Service configuration read from the environment

use std::time::Duration;
use vocab_match_core::{RoundTiming, ShortDeckPolicy};

use crate::error::{ApiError, Result};

pub const DEFAULT_TUTOR_ENDPOINT: &str = "https://api.vercel.ai/chat";
pub const DEFAULT_TUTOR_MODEL: &str = "openai/gpt-4-mini";
pub const DEFAULT_ROUND_RETENTION_MS: u64 = 60_000;

/// Settings for the chat completion endpoint behind the AI tutor
#[derive(Debug, Clone)]
pub struct TutorConfig {
    pub endpoint: String,
    pub token: Option<String>,
    pub model: String,
}

impl Default for TutorConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_TUTOR_ENDPOINT.to_string(),
            token: None,
            model: DEFAULT_TUTOR_MODEL.to_string(),
        }
    }
}

/// Backend configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub timing: RoundTiming,
    pub short_deck_policy: ShortDeckPolicy,
    /// How long a finished round stays queryable before it is released.
    pub round_retention: Duration,
    pub tutor: TutorConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            timing: RoundTiming::default(),
            short_deck_policy: ShortDeckPolicy::default(),
            round_retention: Duration::from_millis(DEFAULT_ROUND_RETENTION_MS),
            tutor: TutorConfig::default(),
        }
    }
}

impl Config {
    /// Build configuration from environment variables.
    ///
    /// Recognised env vars (all optional):
    /// - HOST, PORT: listen address
    /// - ROUND_TICK_MS: real-time length of one timer tick
    /// - ROUND_RESOLUTION_DELAY_MS: pause before a revealed pair is settled
    /// - ROUND_SHORT_DECK_POLICY: "strict" or "lenient"
    /// - ROUND_RETENTION_MS: how long a finished round stays queryable
    /// - AI_TUTOR_ENDPOINT, AI_TUTOR_TOKEN, AI_TUTOR_MODEL: chat completion backend
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = match lookup("PORT") {
            Some(raw) => parse_number("PORT", &raw)?,
            None => defaults.port,
        };
        let tick_interval_ms = match lookup("ROUND_TICK_MS") {
            Some(raw) => parse_number("ROUND_TICK_MS", &raw)?,
            None => defaults.timing.tick_interval_ms,
        };
        let resolution_delay_ms = match lookup("ROUND_RESOLUTION_DELAY_MS") {
            Some(raw) => parse_number("ROUND_RESOLUTION_DELAY_MS", &raw)?,
            None => defaults.timing.resolution_delay_ms,
        };
        if tick_interval_ms == 0 {
            return Err(ApiError::Config("ROUND_TICK_MS must be positive".to_string()));
        }
        let short_deck_policy = match lookup("ROUND_SHORT_DECK_POLICY") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|e| ApiError::Config(format!("ROUND_SHORT_DECK_POLICY: {}", e)))?,
            None => defaults.short_deck_policy,
        };
        let round_retention = match lookup("ROUND_RETENTION_MS") {
            Some(raw) => Duration::from_millis(parse_number("ROUND_RETENTION_MS", &raw)?),
            None => defaults.round_retention,
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port,
            timing: RoundTiming {
                tick_interval_ms,
                resolution_delay_ms,
            },
            short_deck_policy,
            round_retention,
            tutor: TutorConfig {
                endpoint: lookup("AI_TUTOR_ENDPOINT").unwrap_or(defaults.tutor.endpoint),
                token: lookup("AI_TUTOR_TOKEN").filter(|t| !t.is_empty()),
                model: lookup("AI_TUTOR_MODEL").unwrap_or(defaults.tutor.model),
            },
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| ApiError::Config(format!("{}: not a number: {}", key, raw)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.addr(), "0.0.0.0:3000");
        assert_eq!(config.timing, RoundTiming::default());
        assert_eq!(config.short_deck_policy, ShortDeckPolicy::Strict);
        assert_eq!(config.round_retention, Duration::from_secs(60));
        assert_eq!(config.tutor.model, DEFAULT_TUTOR_MODEL);
        assert!(config.tutor.token.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("PORT", "8080"),
            ("ROUND_TICK_MS", "50"),
            ("ROUND_RESOLUTION_DELAY_MS", "10"),
            ("ROUND_SHORT_DECK_POLICY", "lenient"),
            ("ROUND_RETENTION_MS", "250"),
            ("AI_TUTOR_TOKEN", "secret"),
        ]))
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.timing.tick_interval_ms, 50);
        assert_eq!(config.timing.resolution_delay_ms, 10);
        assert_eq!(config.short_deck_policy, ShortDeckPolicy::Lenient);
        assert_eq!(config.round_retention, Duration::from_millis(250));
        assert_eq!(config.tutor.token.as_deref(), Some("secret"));
    }

    #[test]
    fn test_invalid_port() {
        let result = Config::from_lookup(lookup(&[("PORT", "eighty")]));
        assert!(matches!(result, Err(ApiError::Config(_))));
    }

    #[test]
    fn test_zero_tick_rejected() {
        let result = Config::from_lookup(lookup(&[("ROUND_TICK_MS", "0")]));
        assert!(matches!(result, Err(ApiError::Config(_))));
    }

    #[test]
    fn test_unknown_policy() {
        let result = Config::from_lookup(lookup(&[("ROUND_SHORT_DECK_POLICY", "loose")]));
        match result {
            Err(ApiError::Config(message)) => {
                assert_eq!(message, "ROUND_SHORT_DECK_POLICY: unknown short deck policy: loose")
            }
            other => panic!("expected config error, got {:?}", other),
        }
    }
}
