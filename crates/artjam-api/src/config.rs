//! Startup configuration read from the environment.

use std::collections::HashSet;
use std::net::SocketAddr;

use artjam_core::id::ParticipantId;

use crate::error::AppError;

/// Suffix appended to a channel id to name its results destination.
pub const DEFAULT_RESULTS_SUFFIX: &str = "-submissions";

/// Server configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Appended to a channel id to name where its results are posted.
    pub results_suffix: String,
    /// Actors allowed to end rounds early.
    pub moderators: HashSet<ParticipantId>,
}

impl AppConfig {
    /// Reads configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, which returns the value of a
    /// variable if it is set.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `PORT` is not a valid `u16` or
    /// `RESULTS_SUFFIX` is empty.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port: u16 = lookup("PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()
            .map_err(|e| AppError::Config(format!("PORT must be a valid u16: {e}")))?;

        let results_suffix =
            lookup("RESULTS_SUFFIX").unwrap_or_else(|| DEFAULT_RESULTS_SUFFIX.to_string());
        if results_suffix.trim().is_empty() {
            return Err(AppError::Config(
                "RESULTS_SUFFIX must not be empty".to_string(),
            ));
        }

        let moderators = lookup("ROUND_MODERATORS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|id| !id.is_empty())
                    .map(ParticipantId::new)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            host,
            port,
            results_suffix,
            moderators,
        })
    }

    /// The socket address to listen on.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `host:port` is not a valid address.
    pub fn socket_addr(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_apply_when_nothing_is_set() {
        let config = AppConfig::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.results_suffix, DEFAULT_RESULTS_SUFFIX);
        assert!(config.moderators.is_empty());
        assert_eq!(config.socket_addr().unwrap().port(), 3000);
    }

    #[test]
    fn test_moderators_are_split_and_trimmed() {
        let config =
            AppConfig::from_lookup(lookup_from(&[("ROUND_MODERATORS", " u-1, u-2 ,,")])).unwrap();

        assert_eq!(config.moderators.len(), 2);
        assert!(config.moderators.contains(&ParticipantId::new("u-1")));
        assert!(config.moderators.contains(&ParticipantId::new("u-2")));
    }

    #[test]
    fn test_invalid_port_is_a_config_error() {
        let result = AppConfig::from_lookup(lookup_from(&[("PORT", "eighty")]));

        match result {
            Err(AppError::Config(message)) => assert!(message.contains("PORT")),
            other => panic!("expected Config error, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_results_suffix_is_rejected() {
        let result = AppConfig::from_lookup(lookup_from(&[("RESULTS_SUFFIX", " ")]));
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_invalid_host_is_reported_by_socket_addr() {
        let config = AppConfig::from_lookup(lookup_from(&[("HOST", "not a host")])).unwrap();
        assert!(matches!(config.socket_addr(), Err(AppError::Config(_))));
    }
}
