use std::time::Duration;

use clap::Args;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Serialize;

/// Everything outside RFC 3986 `unreserved` is escaped in URL userinfo and path.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Connection settings for the relational store.
///
/// `DATABASE_URL` wins over the individual `DB_*` parts when set.
#[derive(Debug, Clone, Args, Serialize)]
pub struct DatabaseConfig {
    #[arg(
        id = "database_url",
        long = "database-url",
        env = "DATABASE_URL",
        hide_env_values = true
    )]
    #[serde(skip)]
    pub url: Option<String>,

    #[arg(id = "db_name", long = "db-name", env = "DB_NAME", default_value = "chirp")]
    pub name: String,

    #[arg(id = "db_user", long = "db-user", env = "DB_USER", default_value = "chirp")]
    pub user: String,

    #[arg(
        id = "db_password",
        long = "db-password",
        env = "DB_PASSWORD",
        default_value = "",
        hide_env_values = true,
        hide_default_value = true
    )]
    #[serde(skip)]
    pub password: String,

    #[arg(id = "db_host", long = "db-host", env = "DB_HOST", default_value = "localhost")]
    pub host: String,

    #[arg(id = "db_port", long = "db-port", env = "DB_PORT", default_value_t = 5432)]
    pub port: u16,

    /// Delay between readiness probes while waiting for the database.
    #[arg(
        id = "db_poll_interval_ms",
        long = "db-poll-interval-ms",
        env = "DB_POLL_INTERVAL_MS",
        default_value_t = 1000
    )]
    pub poll_interval_ms: u64,

    #[arg(
        id = "db_max_connections",
        long = "db-max-connections",
        env = "DB_MAX_CONNECTIONS",
        default_value_t = 10
    )]
    pub max_connections: u32,
}

impl DatabaseConfig {
    pub fn url(&self) -> String {
        match &self.url {
            Some(url) => url.clone(),
            None if self.password.is_empty() => self.postgres_url(None),
            None => self.postgres_url(Some(&encode(&self.password))),
        }
    }

    /// Connection target safe to log.
    pub fn display_url(&self) -> String {
        match &self.url {
            Some(url) => redact_password(url),
            None if self.password.is_empty() => self.postgres_url(None),
            None => self.postgres_url(Some("***")),
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// `password` must already be percent-encoded.
    fn postgres_url(&self, password: Option<&str>) -> String {
        let user = encode(&self.user);
        let credentials = match password {
            Some(password) => format!("{user}:{password}"),
            None => user,
        };
        format!(
            "postgres://{credentials}@{}:{}/{}",
            self.host,
            self.port,
            encode(&self.name)
        )
    }
}

fn encode(component: &str) -> String {
    utf8_percent_encode(component, COMPONENT).to_string()
}

fn redact_password(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_string();
    };
    let Some((userinfo, host)) = rest.rsplit_once('@') else {
        return url.to_string();
    };
    match userinfo.split_once(':') {
        Some((user, _)) => format!("{scheme}://{user}:***@{host}"),
        None => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use percent_encoding::percent_decode_str;
    use rstest::rstest;
    use url::Url;

    fn config() -> DatabaseConfig {
        DatabaseConfig {
            url: None,
            name: "chirp".into(),
            user: "chirp".into(),
            password: "s3cret".into(),
            host: "db".into(),
            port: 5432,
            poll_interval_ms: 1000,
            max_connections: 10,
        }
    }

    #[test]
    fn url_from_parts() {
        let cfg = config();
        assert_eq!(cfg.url(), "postgres://chirp:s3cret@db:5432/chirp");
        assert_eq!(cfg.display_url(), "postgres://chirp:***@db:5432/chirp");
    }

    #[test]
    fn url_without_password() {
        let cfg = DatabaseConfig {
            password: String::new(),
            ..config()
        };
        assert_eq!(cfg.url(), "postgres://chirp@db:5432/chirp");
        assert_eq!(cfg.display_url(), cfg.url());
    }

    #[test]
    fn explicit_url_overrides_parts() {
        let cfg = DatabaseConfig {
            url: Some("sqlite://chirp.db?mode=rwc".into()),
            ..config()
        };
        assert_eq!(cfg.url(), "sqlite://chirp.db?mode=rwc");
    }

    #[rstest]
    #[case::reserved("p@ss/w:rd#1", "p%40ss%2Fw%3Ard%231")]
    #[case::query_and_space("a?b c&d", "a%3Fb%20c%26d")]
    #[case::percent("100%", "100%25")]
    #[case::unreserved("Az09-._~", "Az09-._~")]
    fn password_is_percent_encoded(#[case] password: &str, #[case] encoded: &str) {
        let cfg = DatabaseConfig {
            password: password.into(),
            ..config()
        };
        let url = cfg.url();
        assert_eq!(url, format!("postgres://chirp:{encoded}@db:5432/chirp"));

        let parsed = Url::parse(&url).unwrap();
        assert_eq!(parsed.host_str(), Some("db"));
        assert_eq!(parsed.port(), Some(5432));
        assert_eq!(parsed.path(), "/chirp");
        assert_eq!(parsed.username(), "chirp");
        let decoded = percent_decode_str(parsed.password().unwrap())
            .decode_utf8()
            .unwrap();
        assert_eq!(decoded, password);

        assert_eq!(cfg.display_url(), "postgres://chirp:***@db:5432/chirp");
    }

    #[test]
    fn user_and_name_are_encoded_too() {
        let cfg = DatabaseConfig {
            user: "app@corp".into(),
            name: "db/x".into(),
            password: String::new(),
            ..config()
        };
        assert_eq!(cfg.url(), "postgres://app%40corp@db:5432/db%2Fx");
    }

    #[rstest]
    #[case("postgres://u:p@h:5432/d", "postgres://u:***@h:5432/d")]
    #[case("postgres://u@h/d", "postgres://u@h/d")]
    #[case("sqlite://chirp.db", "sqlite://chirp.db")]
    fn redacts_passwords(#[case] url: &str, #[case] expected: &str) {
        assert_eq!(redact_password(url), expected);
    }
}
