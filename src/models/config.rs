//! Configuration model loaded from external sources.

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub app_name: String,
    pub domain: String,
    pub address: String,
    pub port: u16,
    pub database_url: String,
    pub templates_dir: String,
    pub secret: String,
    pub smtp: SmtpConfig,
}

#[derive(Clone, Debug, Deserialize)]
/// SMTP relay used for onboarding mail.
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    /// `"starttls"` (default), `"tls"` or `"none"`.
    #[serde(default = "default_encryption")]
    pub encryption: String,
    pub from: String,
    /// Support contact shown in outgoing mail.
    pub cs_email: String,
    pub cs_phone: String,
}

fn default_encryption() -> String {
    "starttls".to_string()
}
