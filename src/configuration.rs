use config::{Config, ConfigError, Environment as ConfigEnvironment, File};
use secrecy::Secret;
use serde_aux::field_attributes::deserialize_number_from_string;
use tracing::info;

#[derive(serde::Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    #[serde(default)]
    pub ai: AiSettings,
    /// When absent the service runs rules-only and the menu rule answers with
    /// a canned line instead of a live lookup.
    pub database: Option<DatabaseSettings>,
}

#[derive(serde::Deserialize, Clone)]
pub struct ApplicationSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub host: String,
}

#[derive(serde::Deserialize, Clone)]
pub struct AiSettings {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    pub api_key: Option<Secret<String>>,
}

impl Default for AiSettings {
    fn default() -> Self {
        Self {
            model: default_model(),
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            api_key: None,
        }
    }
}

impl AiSettings {
    /// Settings may carry the key directly (`APP_AI__API_KEY`); the bare
    /// `GEMINI_API_KEY` variable is honored as a fallback.
    pub fn resolved_api_key(&self) -> Option<Secret<String>> {
        self.api_key
            .clone()
            .or_else(|| std::env::var("GEMINI_API_KEY").ok().map(Secret::new))
    }
}

#[derive(serde::Deserialize, Clone)]
pub struct DatabaseSettings {
    pub username: String,
    pub password: Secret<String>,
    #[serde(deserialize_with = "deserialize_number_from_string", default = "default_db_port")]
    pub port: u16,
    pub host: String,
    pub database_name: String,
    #[serde(default = "default_true")]
    pub require_ssl: bool,
    #[serde(default = "default_max_connection_retries")]
    pub max_connection_retries: u32,
}

fn default_model() -> String {
    "gemini-2.5-flash-lite".to_string()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_db_port() -> u16 {
    5432
}

fn default_true() -> bool {
    true
}

fn default_max_connection_retries() -> u32 {
    3
}

pub fn get_configuration() -> Result<Settings, ConfigError> {
    let base_path = std::env::current_dir()
        .expect("Failed to determine current directory")
        .join("configuration");

    let environment: AppEnvironment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .expect("Failed to parse APP_ENVIRONMENT");

    let environment_filename = format!("{}.yaml", environment.as_str());

    let settings = Config::builder()
        .add_source(File::from(base_path.join("base.yaml")))
        .add_source(File::from(base_path.join(&environment_filename)))
        .add_source(
            ConfigEnvironment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    let settings = settings.try_deserialize::<Settings>()?;

    info!(
        "Configuration loaded: {} on {}:{}, menu lookup {}",
        environment.as_str(),
        settings.application.host,
        settings.application.port,
        if settings.database.is_some() {
            "enabled"
        } else {
            "disabled"
        }
    );

    Ok(settings)
}

pub enum AppEnvironment {
    Local,
    Production,
}

impl AppEnvironment {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppEnvironment::Local => "local",
            AppEnvironment::Production => "production",
        }
    }
}

impl TryFrom<String> for AppEnvironment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. Use either `local` or `production`.",
                other
            )),
        }
    }
}
