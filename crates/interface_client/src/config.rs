//! Client configuration

use serde::Deserialize;

/// Environment variable prefix, e.g. `SIMULATIONS_API_BASE_URL`
const ENV_PREFIX: &str = "SIMULATIONS_API";

const DEFAULT_BASE_URL: &str = "http://localhost:8088";
const DEFAULT_BASE_PATH: &str = "/api/v1";

/// Where the simulations API lives
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientConfig {
    /// Scheme, host and port
    pub base_url: String,
    /// Path prefix the `simulations` resource is mounted under
    pub base_path: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            base_path: DEFAULT_BASE_PATH.to_string(),
        }
    }
}

impl ClientConfig {
    /// Creates a configuration for a base URL with the default path
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Loads configuration from the environment
    ///
    /// Reads a `.env` file if present, then `SIMULATIONS_API_BASE_URL` and
    /// `SIMULATIONS_API_BASE_PATH`. Unset values keep their defaults.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        config::Config::builder()
            .set_default("base_url", DEFAULT_BASE_URL)?
            .set_default("base_path", DEFAULT_BASE_PATH)?
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()?
            .try_deserialize()
    }

    /// Returns the URL of the simulations collection
    pub fn simulations_url(&self) -> String {
        let base_url = self.base_url.trim_end_matches('/');
        let base_path = self.base_path.trim_matches('/');

        if base_path.is_empty() {
            format!("{base_url}/simulations")
        } else {
            format!("{base_url}/{base_path}/simulations")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:8088");
        assert_eq!(config.base_path, "/api/v1");
        assert_eq!(config.simulations_url(), "http://localhost:8088/api/v1/simulations");
    }

    #[test]
    fn test_simulations_url_normalizes_slashes() {
        let config = ClientConfig {
            base_url: "http://127.0.0.1:3000/".to_string(),
            base_path: "api/v1/".to_string(),
        };
        assert_eq!(config.simulations_url(), "http://127.0.0.1:3000/api/v1/simulations");
    }

    #[test]
    fn test_simulations_url_without_base_path() {
        let config = ClientConfig {
            base_url: "http://127.0.0.1:3000".to_string(),
            base_path: String::new(),
        };
        assert_eq!(config.simulations_url(), "http://127.0.0.1:3000/simulations");
    }

    // The only test touching these variables, so no other test races it
    #[test]
    fn test_from_env_reads_prefixed_variables() {
        std::env::set_var("SIMULATIONS_API_BASE_URL", "http://simulations.test:9090");
        std::env::set_var("SIMULATIONS_API_BASE_PATH", "/api/v2");

        let config = ClientConfig::from_env().unwrap();
        let client = crate::SimulationsClient::from_env().unwrap();

        std::env::remove_var("SIMULATIONS_API_BASE_URL");
        std::env::remove_var("SIMULATIONS_API_BASE_PATH");

        assert_eq!(config.base_url, "http://simulations.test:9090");
        assert_eq!(config.simulations_url(), "http://simulations.test:9090/api/v2/simulations");
        assert_eq!(
            client.simulations_url().as_str(),
            "http://simulations.test:9090/api/v2/simulations"
        );
    }

    #[test]
    fn test_with_base_url_keeps_default_path() {
        let config = ClientConfig::with_base_url("http://127.0.0.1:4000");
        assert_eq!(config.base_path, "/api/v1");
    }
}
