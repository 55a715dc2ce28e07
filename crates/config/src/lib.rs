use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

const DEFAULT_CONFIG_FILES: &[&str] = &[
    "padikk.toml",
    "config/padikk.toml",
    "crates/config/padikk.toml",
    "../padikk.toml",
    "../config/padikk.toml",
    "../crates/config/padikk.toml",
];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub http: HttpConfig,
    pub semsense: SemSenseConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub address: String,
    pub port: u16,
    #[serde(default = "HttpConfig::default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

impl HttpConfig {
    fn default_allowed_origins() -> Vec<String> {
        vec![
            "http://localhost:5176".to_string(),
            "http://localhost:5173".to_string(),
            "http://localhost:3000".to_string(),
        ]
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1".to_string(),
            port: 5000,
            allowed_origins: Self::default_allowed_origins(),
        }
    }
}

/// Settings for the semester planning relay and its Gemini upstream.
///
/// ```
/// use padikk_config::SemSenseConfig;
///
/// let semsense = SemSenseConfig::default();
/// assert_eq!(semsense.model, "gemini-1.5-flash");
/// assert_eq!(semsense.request_timeout_seconds, 60);
/// assert!(semsense.api_key.is_none());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SemSenseConfig {
    #[serde(default = "SemSenseConfig::default_model")]
    pub model: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "SemSenseConfig::default_base_url")]
    pub base_url: String,
    #[serde(default = "SemSenseConfig::default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl SemSenseConfig {
    fn default_model() -> String {
        "gemini-1.5-flash".to_string()
    }

    fn default_base_url() -> String {
        "https://generativelanguage.googleapis.com/v1beta".to_string()
    }

    const fn default_request_timeout() -> u64 {
        60
    }
}

impl Default for SemSenseConfig {
    fn default() -> Self {
        Self {
            model: Self::default_model(),
            api_key: None,
            base_url: Self::default_base_url(),
            request_timeout_seconds: Self::default_request_timeout(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://padikk.db".to_string(),
            max_connections: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "AuthConfig::default_session_ttl")]
    pub session_ttl_seconds: u64,
    #[serde(default = "AuthConfig::default_min_password_length")]
    pub min_password_length: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_ttl_seconds: Self::default_session_ttl(),
            min_password_length: Self::default_min_password_length(),
        }
    }
}

impl AuthConfig {
    fn default_session_ttl() -> u64 {
        86_400
    }

    const fn default_min_password_length() -> usize {
        6
    }
}

/// Load the application configuration by combining defaults, files, and environment overrides.
///
/// A bare `PORT` variable acts as the default listen port so the backend keeps
/// working on hosts that only set that.
///
/// ```
/// use padikk_config::load;
///
/// std::env::remove_var("PADIKK_CONFIG");
///
/// let config = load().expect("configuration should load with defaults");
/// assert!(!config.http.address.is_empty());
/// ```
pub fn load() -> anyhow::Result<AppConfig> {
    let defaults = AppConfig::default();

    let port = match std::env::var("PORT") {
        Ok(value) => value
            .parse::<u16>()
            .with_context(|| format!("invalid PORT value {value:?}"))?,
        Err(_) => defaults.http.port,
    };

    let session_ttl = defaults.auth.session_ttl_seconds;
    let session_ttl_i64 = i64::try_from(session_ttl).unwrap_or(i64::MAX);

    let builder = config::Config::builder()
        .set_default("http.address", defaults.http.address.clone())?
        .set_default("http.port", i64::from(port))?
        .set_default("http.allowed_origins", defaults.http.allowed_origins.clone())?
        .set_default("semsense.model", defaults.semsense.model.clone())?
        .set_default("semsense.base_url", defaults.semsense.base_url.clone())?
        .set_default(
            "semsense.request_timeout_seconds",
            i64::try_from(defaults.semsense.request_timeout_seconds).unwrap_or(i64::MAX),
        )?
        .set_default("database.url", defaults.database.url.clone())?
        .set_default(
            "database.max_connections",
            i64::from(defaults.database.max_connections),
        )?
        .set_default("auth.session_ttl_seconds", session_ttl_i64)?
        .set_default(
            "auth.min_password_length",
            i64::try_from(defaults.auth.min_password_length).unwrap_or(i64::MAX),
        )?;

    let environment_overrides = config::Environment::with_prefix("PADIKK")
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("http.allowed_origins");

    let mut builder = builder;
    let mut config_file_attached = false;

    if let Ok(path) = std::env::var("PADIKK_CONFIG") {
        builder = builder.add_source(config::File::from(PathBuf::from(&path)));
        config_file_attached = true;
        debug!(path, "loading configuration via PADIKK_CONFIG");
    } else if let Ok(cwd) = std::env::current_dir() {
        let fallback = DEFAULT_CONFIG_FILES
            .iter()
            .map(|candidate| cwd.join(candidate))
            .find(|path| path.exists());

        if let Some(path) = fallback {
            debug!(path = %path.display(), "loading configuration file");
            builder = builder.add_source(config::File::from(path));
            config_file_attached = true;
        }
    }

    if !config_file_attached {
        debug!("no configuration file found, relying on defaults and environment overrides");
    }

    builder = builder.add_source(environment_overrides);

    let cfg = builder.build().context("unable to build configuration")?;

    let mut config = cfg
        .try_deserialize::<AppConfig>()
        .context("invalid configuration")?;

    if config.auth.session_ttl_seconds > i64::MAX as u64 {
        config.auth.session_ttl_seconds = i64::MAX as u64;
    }

    debug!(
        address = %config.http.address,
        port = config.http.port,
        database = %config.database.url,
        model = %config.semsense.model,
        gemini_key_configured = config.semsense.api_key.is_some(),
        "loaded backend configuration"
    );
    Ok(config)
}
