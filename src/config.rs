use std::env;
use chrono_tz::Tz;
use crate::error::AppError;

#[derive(Clone, Debug)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub venue_timezone: Tz,
    pub admin_email: String,
    pub mail_from: String,
    pub mail_service_url: Option<String>,
    pub mail_service_token: String,
    pub smtp: Option<SmtpConfig>,
    pub notifications_enabled: bool,
    pub static_dir: Option<String>,
    pub log_dir: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite://bookings.db".to_string(),
            port: 3000,
            venue_timezone: chrono_tz::Asia::Jerusalem,
            admin_email: "admin@eleganteventshall.com".to_string(),
            mail_from: "Elegant Events Hall <noreply@eleganteventshall.com>".to_string(),
            mail_service_url: None,
            mail_service_token: String::new(),
            smtp: None,
            notifications_enabled: true,
            static_dir: None,
            log_dir: "./logs".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let defaults = Self::default();

        let port = match env::var("PORT") {
            Ok(raw) => raw.parse().map_err(|_| AppError::Config(format!("PORT must be a number, got '{}'", raw)))?,
            Err(_) => defaults.port,
        };

        let venue_timezone = match env::var("VENUE_TIMEZONE") {
            Ok(raw) => raw.parse::<Tz>().map_err(|_| AppError::Config(format!("Invalid VENUE_TIMEZONE '{}'", raw)))?,
            Err(_) => defaults.venue_timezone,
        };

        let smtp = match env::var("SMTP_HOST") {
            Ok(host) => {
                let port = match env::var("SMTP_PORT") {
                    Ok(raw) => raw.parse().map_err(|_| AppError::Config(format!("SMTP_PORT must be a number, got '{}'", raw)))?,
                    Err(_) => 587,
                };
                Some(SmtpConfig {
                    host,
                    port,
                    username: env::var("SMTP_USERNAME").ok(),
                    password: env::var("SMTP_PASSWORD").ok(),
                })
            }
            Err(_) => None,
        };

        let notifications_enabled = match env::var("NOTIFICATIONS_ENABLED") {
            Ok(raw) => parse_bool(&raw).ok_or_else(|| AppError::Config(format!("NOTIFICATIONS_ENABLED must be a boolean, got '{}'", raw)))?,
            Err(_) => defaults.notifications_enabled,
        };

        Ok(Self {
            database_url: env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            port,
            venue_timezone,
            admin_email: env::var("ADMIN_EMAIL").unwrap_or(defaults.admin_email),
            mail_from: env::var("MAIL_FROM").unwrap_or(defaults.mail_from),
            mail_service_url: env::var("MAIL_SERVICE_URL").ok(),
            mail_service_token: env::var("MAIL_SERVICE_TOKEN").unwrap_or_default(),
            smtp,
            notifications_enabled,
            static_dir: env::var("STATIC_DIR").ok(),
            log_dir: env::var("LOG_DIR").unwrap_or(defaults.log_dir),
        })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool(" off "), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }

    #[test]
    fn test_defaults_point_at_local_sqlite() {
        let config = Config::default();
        assert!(config.database_url.starts_with("sqlite://"));
        assert_eq!(config.port, 3000);
        assert_eq!(config.venue_timezone, chrono_tz::Asia::Jerusalem);
    }
}
