use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub email: EmailConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EmailConfig {
    /// Provider region, used to derive the SMTP endpoint when `smtp_host` is unset
    #[serde(default = "default_region")]
    pub region: String,
    #[serde(default)]
    pub smtp_host: String,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    #[serde(default)]
    pub smtp_username: String,
    #[serde(default)]
    pub smtp_password: String,
    /// Sender address, must be verified with the provider
    #[serde(default = "default_contact_address")]
    pub from_address: String,
    /// Mailbox that receives every submission
    #[serde(default = "default_contact_address")]
    pub contact_address: String,
    /// Build messages but skip SMTP delivery
    #[serde(default)]
    pub dry_run: bool,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            region: default_region(),
            smtp_host: String::new(),
            smtp_port: default_smtp_port(),
            smtp_username: String::new(),
            smtp_password: String::new(),
            from_address: default_contact_address(),
            contact_address: default_contact_address(),
            dry_run: false,
        }
    }
}

impl EmailConfig {
    /// SMTP host to connect to, falling back to the regional provider endpoint
    pub fn smtp_endpoint(&self) -> String {
        if self.smtp_host.is_empty() {
            format!("email-smtp.{}.amazonaws.com", self.region)
        } else {
            self.smtp_host.to_owned()
        }
    }
}

fn default_region() -> String {
    "us-east-2".to_string()
}

fn default_smtp_port() -> u16 {
    587
}

fn default_contact_address() -> String {
    "contato@treid.com.br".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    #[serde(default = "default_allow_origin")]
    pub allow_origin: String,
    #[serde(default = "default_allow_headers")]
    pub allow_headers: String,
    #[serde(default = "default_allow_methods")]
    pub allow_methods: String,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allow_origin: default_allow_origin(),
            allow_headers: default_allow_headers(),
            allow_methods: default_allow_methods(),
        }
    }
}

fn default_allow_origin() -> String {
    "https://treid.com.br".to_string()
}

fn default_allow_headers() -> String {
    "Content-Type, Origin".to_string()
}

fn default_allow_methods() -> String {
    "POST, OPTIONS".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (TREID__EMAIL__SMTP_HOST, etc.)
    /// 2. Config file specified by path
    /// 3. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        builder = builder
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        // The file is optional, defaults cover every field
        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("TREID")
                .separator("__")
                .try_parsing(true),
        );

        // Conventional SMTP credential variables without prefix
        if let Ok(username) = env::var("SMTP_USERNAME") {
            builder = builder.set_override("email.smtp_username", username)?;
        }
        if let Ok(password) = env::var("SMTP_PASSWORD") {
            builder = builder.set_override("email.smtp_password", password)?;
        }

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.server.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }
        if self.email.smtp_port == 0 {
            return Err("SMTP port must be greater than 0".to_string());
        }
        if !self.email.from_address.contains('@') {
            return Err(format!(
                "Sender address '{}' is not an email address",
                self.email.from_address
            ));
        }
        if !self.email.contact_address.contains('@') {
            return Err(format!(
                "Contact address '{}' is not an email address",
                self.email.contact_address
            ));
        }
        if self.cors.allow_origin.is_empty() {
            return Err("CORS allow_origin must not be empty".to_string());
        }
        Ok(())
    }
}
