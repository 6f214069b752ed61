use std::env;
use std::fmt;

use axum::http::Method;

use crate::forms::FormKind;

const DEFAULT_ORIGINS: &str =
    "http://localhost:8080,https://soteria.studio,https://www.soteria.studio";
const DEFAULT_METHODS: &str = "GET,POST,OPTIONS";

#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub smtp: SmtpConfig,
    pub cors: CorsConfig,
    pub form_kind: FormKind,
    pub senders: SenderNames,
    pub health_banner: String,
    pub expose_error_details: bool,
}

/// Credentials and endpoint of the outbound mail relay.
#[derive(Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    /// TLS from the first byte. When false the session upgrades with STARTTLS if offered.
    pub implicit_tls: bool,
}

impl fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("implicit_tls", &self.implicit_tls)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub allowed_methods: AllowedMethods,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowedMethods {
    Any,
    List(Vec<Method>),
}

/// Display names shown in the `From` header. The address is always the SMTP account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SenderNames {
    /// Used on mail addressed to the operator
    pub contact: String,
    /// Used on mail addressed to submitters
    pub brand: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(key))
        };
        let or_default = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let smtp = SmtpConfig {
            host: required("EMAIL_HOST")?,
            port: parse_port("EMAIL_PORT", &required("EMAIL_PORT")?)?,
            username: required("EMAIL_USER")?,
            password: required("EMAIL_PASS")?,
            implicit_tls: parse_bool("EMAIL_SECURE", &or_default("EMAIL_SECURE", "false"))?,
        };

        let cors = CorsConfig {
            allowed_origins: split_list(&or_default("CORS_ALLOWED_ORIGINS", DEFAULT_ORIGINS)),
            allowed_methods: parse_methods(&or_default("CORS_ALLOWED_METHODS", DEFAULT_METHODS))?,
        };

        let form_kind: FormKind = or_default("FORM_SCHEMA", "contact")
            .parse()
            .map_err(|_| ConfigError::Invalid("FORM_SCHEMA"))?;

        Ok(Config {
            server_host: or_default("SERVER_HOST", "0.0.0.0"),
            server_port: parse_port("PORT", &or_default("PORT", "5000"))?,
            smtp,
            cors,
            form_kind,
            senders: SenderNames {
                contact: or_default("MAIL_CONTACT_SENDER_NAME", "Website Contact"),
                brand: or_default("MAIL_BRAND_SENDER_NAME", "Soteria Studio"),
            },
            health_banner: or_default("HEALTH_BANNER", "Soteria Email API Running 🚀"),
            expose_error_details: parse_bool(
                "EXPOSE_ERROR_DETAILS",
                &or_default("EXPOSE_ERROR_DETAILS", "false"),
            )?,
        })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn parse_port(key: &'static str, raw: &str) -> Result<u16, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::Invalid(key))
}

fn parse_bool(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid(key)),
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_methods(raw: &str) -> Result<AllowedMethods, ConfigError> {
    let items = split_list(raw);
    if items.iter().any(|m| m == "*") {
        return Ok(AllowedMethods::Any);
    }
    items
        .iter()
        .map(|m| {
            m.to_ascii_uppercase()
                .parse::<Method>()
                .map_err(|_| ConfigError::Invalid("CORS_ALLOWED_METHODS"))
        })
        .collect::<Result<Vec<_>, _>>()
        .map(AllowedMethods::List)
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    Missing(&'static str),
    #[error("{0} environment variable has an invalid value")]
    Invalid(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn base_env() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            ("EMAIL_HOST", "smtp.example.com"),
            ("EMAIL_PORT", "587"),
            ("EMAIL_USER", "studio@example.com"),
            ("EMAIL_PASS", "hunter2"),
        ])
    }

    fn load(env: &HashMap<&'static str, &'static str>) -> Result<Config, ConfigError> {
        Config::from_lookup(|key| env.get(key).map(|v| v.to_string()))
    }

    #[test]
    fn test_defaults() {
        let config = load(&base_env()).expect("Should load config");

        assert_eq!(config.server_port, 5000);
        assert_eq!(config.server_addr(), "0.0.0.0:5000");
        assert_eq!(config.smtp.port, 587);
        assert!(!config.smtp.implicit_tls);
        assert_eq!(config.form_kind, FormKind::Contact);
        assert_eq!(config.senders.contact, "Website Contact");
        assert_eq!(config.senders.brand, "Soteria Studio");
        assert!(!config.expose_error_details);
        assert_eq!(
            config.cors.allowed_origins,
            vec![
                "http://localhost:8080",
                "https://soteria.studio",
                "https://www.soteria.studio"
            ]
        );
        assert_eq!(
            config.cors.allowed_methods,
            AllowedMethods::List(vec![Method::GET, Method::POST, Method::OPTIONS])
        );
    }

    #[test]
    fn test_missing_credentials_fail_fast() {
        for key in ["EMAIL_HOST", "EMAIL_PORT", "EMAIL_USER", "EMAIL_PASS"] {
            let mut env = base_env();
            env.remove(key);
            assert_eq!(load(&env).unwrap_err(), ConfigError::Missing(key));
        }
    }

    #[test]
    fn test_blank_value_counts_as_missing() {
        let mut env = base_env();
        env.insert("EMAIL_PASS", "   ");
        assert_eq!(load(&env).unwrap_err(), ConfigError::Missing("EMAIL_PASS"));
    }

    #[test]
    fn test_invalid_ports() {
        let mut env = base_env();
        env.insert("EMAIL_PORT", "smtp");
        assert_eq!(load(&env).unwrap_err(), ConfigError::Invalid("EMAIL_PORT"));

        let mut env = base_env();
        env.insert("PORT", "99999");
        assert_eq!(load(&env).unwrap_err(), ConfigError::Invalid("PORT"));
    }

    #[test]
    fn test_overrides() {
        let mut env = base_env();
        env.insert("PORT", "8081");
        env.insert("EMAIL_SECURE", "true");
        env.insert("FORM_SCHEMA", "project");
        env.insert("CORS_ALLOWED_ORIGINS", "https://a.test , https://b.test");
        env.insert("CORS_ALLOWED_METHODS", "post");
        env.insert("EXPOSE_ERROR_DETAILS", "yes");

        let config = load(&env).expect("Should load config");

        assert_eq!(config.server_port, 8081);
        assert!(config.smtp.implicit_tls);
        assert_eq!(config.form_kind, FormKind::Project);
        assert_eq!(
            config.cors.allowed_origins,
            vec!["https://a.test", "https://b.test"]
        );
        assert_eq!(
            config.cors.allowed_methods,
            AllowedMethods::List(vec![Method::POST])
        );
        assert!(config.expose_error_details);
    }

    #[test]
    fn test_wildcard_methods() {
        let mut env = base_env();
        env.insert("CORS_ALLOWED_METHODS", "*");
        let config = load(&env).expect("Should load config");
        assert_eq!(config.cors.allowed_methods, AllowedMethods::Any);
    }

    #[test]
    fn test_unknown_form_schema() {
        let mut env = base_env();
        env.insert("FORM_SCHEMA", "survey");
        assert_eq!(load(&env).unwrap_err(), ConfigError::Invalid("FORM_SCHEMA"));
    }

    #[test]
    fn test_debug_redacts_password() {
        let config = load(&base_env()).expect("Should load config");
        let rendered = format!("{:?}", config.smtp);
        assert!(!rendered.contains("hunter2"));
    }
}
