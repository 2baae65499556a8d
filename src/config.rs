//! Application configuration loaded from environment variables.

use std::env;

/// Which backend serves auth and profile storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// In-process store, for tests and local development.
    Memory,
    /// The hosted service (auth, table store, object storage).
    Supabase,
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// Key used to sign session cookies (raw bytes)
    pub session_signing_key: Vec<u8>,
    /// Selected auth/storage backend
    pub backend: Backend,
    /// Hosted service base URL (supabase backend only)
    pub supabase_url: String,
    /// Anonymous-access API key (supabase backend only)
    pub supabase_anon_key: String,
    /// Privileged service-role key; enables profile auto-creation at
    /// registration. Optional.
    pub supabase_service_role_key: Option<String>,
    /// Set the Secure attribute on session cookies (HTTPS deployments)
    pub cookie_secure: bool,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// The supabase connection variables are only required when the
    /// supabase backend is selected.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let backend = match env::var("BACKEND") {
            Ok(value) if value == "memory" => Backend::Memory,
            Ok(value) if value == "supabase" => Backend::Supabase,
            Ok(value) => return Err(ConfigError::Invalid("BACKEND", value)),
            Err(_) => Backend::Supabase,
        };

        let (supabase_url, supabase_anon_key) = match backend {
            Backend::Supabase => (
                env::var("SUPABASE_URL").map_err(|_| ConfigError::Missing("SUPABASE_URL"))?,
                env::var("SUPABASE_ANON_KEY")
                    .map(|v| v.trim().to_string())
                    .map_err(|_| ConfigError::Missing("SUPABASE_ANON_KEY"))?,
            ),
            Backend::Memory => (String::new(), String::new()),
        };

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            session_signing_key: env::var("SESSION_SIGNING_KEY")
                .map_err(|_| ConfigError::Missing("SESSION_SIGNING_KEY"))?
                .into_bytes(),
            backend,
            supabase_url,
            supabase_anon_key,
            supabase_service_role_key: env::var("SUPABASE_SERVICE_ROLE_KEY")
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
            cookie_secure: env::var("COOKIE_SECURE")
                .map(|v| v == "1" || v == "true")
                .unwrap_or(false),
        })
    }

    /// Config for tests: in-memory backend, known signing key.
    pub fn test_default() -> Self {
        Self {
            port: 8080,
            session_signing_key: b"test_session_key_32_bytes_min!!!".to_vec(),
            backend: Backend::Memory,
            supabase_url: String::new(),
            supabase_anon_key: String::new(),
            supabase_service_role_key: None,
            cookie_secure: false,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test: the environment is process-global, so the BACKEND
    // variations must not run in parallel.
    #[test]
    fn test_config_from_env() {
        env::set_var("SESSION_SIGNING_KEY", "test_session_key_32_bytes_min!!!");
        env::remove_var("SUPABASE_URL");
        env::remove_var("SUPABASE_ANON_KEY");

        env::set_var("BACKEND", "memory");
        let config = Config::from_env().expect("Config should load");
        assert_eq!(config.backend, Backend::Memory);
        assert_eq!(config.port, 8080);
        assert!(config.supabase_url.is_empty());

        env::set_var("BACKEND", "cloud");
        let err = Config::from_env().expect_err("unknown backend should fail");
        assert!(matches!(err, ConfigError::Invalid("BACKEND", _)));

        env::set_var("BACKEND", "supabase");
        let err = Config::from_env().expect_err("supabase backend needs a URL");
        assert!(matches!(err, ConfigError::Missing("SUPABASE_URL")));

        env::set_var("BACKEND", "memory");
    }
}
