//! Training access configuration.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Token-gated access to internal routes
#[derive(Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Shared training token (sensitive - uses SecretString)
    ///
    /// Without a token nobody is authorized.
    #[serde(default, skip_serializing)]
    pub token: Option<SecretString>,

    /// Lifetime of the session cookie in seconds (default: 8 hours)
    #[serde(default = "default_session_max_age")]
    pub session_max_age_secs: u64,
}

impl std::fmt::Debug for TrainingConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrainingConfig")
            .field(
                "token",
                &if self.token.is_some() {
                    Some("[REDACTED]")
                } else {
                    None
                },
            )
            .field("session_max_age_secs", &self.session_max_age_secs)
            .finish()
    }
}

const fn default_session_max_age() -> u64 {
    8 * 60 * 60
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            token: None,
            session_max_age_secs: default_session_max_age(),
        }
    }
}

impl TrainingConfig {
    /// Get the token as a string reference, ignoring an empty value
    #[must_use]
    pub fn token_str(&self) -> Option<&str> {
        self.token
            .as_ref()
            .map(ExposeSecret::expose_secret)
            .filter(|token| !token.is_empty())
    }

    /// Session cookie lifetime
    #[must_use]
    pub const fn session_max_age(&self) -> Duration {
        Duration::from_secs(self.session_max_age_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_has_no_token() {
        let config = TrainingConfig::default();
        assert!(config.token_str().is_none());
        assert_eq!(config.session_max_age(), Duration::from_secs(28_800));
    }

    #[test]
    fn empty_token_counts_as_absent() {
        let config = TrainingConfig {
            token: Some(SecretString::from(String::new())),
            ..TrainingConfig::default()
        };
        assert!(config.token_str().is_none());
    }

    #[test]
    fn debug_redacts_token() {
        let config = TrainingConfig {
            token: Some(SecretString::from("super-secret".to_string())),
            ..TrainingConfig::default()
        };
        let debug = format!("{config:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("super-secret"));
    }

    #[test]
    fn token_is_never_serialized() {
        let config = TrainingConfig {
            token: Some(SecretString::from("super-secret".to_string())),
            ..TrainingConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("super-secret"));
        assert!(!json.contains("token\""));
    }

    #[test]
    fn token_deserializes() {
        let config: TrainingConfig = serde_json::from_str(r#"{"token": "abc"}"#).unwrap();
        assert_eq!(config.token_str(), Some("abc"));
    }
}
