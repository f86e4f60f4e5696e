use std::env;
use std::io;
use std::net::SocketAddr;
use std::path::Path;

use jsonwebtoken::Algorithm;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::fs::File;
use tokio::io::AsyncReadExt;

macro_rules! from_environment {
    ($config:expr, $($key:expr, $name:tt),*$(,)?) => {{
        $(
            {
                if let Ok(value) = env::var($key) {
                    if let Ok(value) = value.parse() {
                        $config.$name = value;
                    }
                }
            }
        )*
    }};
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    pub database: Database,
    pub loglevel: LevelFilter,
    pub bind: SocketAddr,
    pub authorization: Authorization,
    #[serde(default)]
    pub matchmaking: Matchmaking,
}

impl Config {
    pub async fn from_file<P>(path: P) -> Result<Self, ConfigError>
    where
        P: AsRef<Path>,
    {
        let mut file = File::open(path).await?;

        let mut buf = Vec::new();
        file.read_to_end(&mut buf).await?;

        Ok(toml::from_slice(&buf)?)
    }

    /// Overrides config values with their environment counterparts
    /// where set.
    pub fn with_environment(mut self) -> Self {
        from_environment!(self, "RS_LOGLEVEL", loglevel, "RS_BIND", bind);
        self.database = self.database.with_environment();
        self.authorization = self.authorization.with_environment();
        self.matchmaking = self.matchmaking.with_environment();

        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Database::default(),
            loglevel: LevelFilter::Info,
            bind: SocketAddr::new([0, 0, 0, 0].into(), 3000),
            authorization: Authorization::default(),
            matchmaking: Matchmaking::default(),
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Database {
    pub driver: String,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
    pub prefix: String,
}

impl Database {
    pub fn connect_string(&self) -> String {
        format!(
            "{}://{}:{}@{}:{}/{}?ssl-mode=DISABLED",
            self.driver, self.user, self.password, self.host, self.port, self.database
        )
    }

    pub fn with_environment(mut self) -> Self {
        from_environment!(
            self,
            "RS_DB_DRIVER",
            driver,
            "RS_DB_HOST",
            host,
            "RS_DB_PORT",
            port,
            "RS_DB_USER",
            user,
            "RS_DB_PASSWORD",
            password,
            "RS_DB_DATABASE",
            database,
            "RS_DB_PREFIX",
            prefix,
        );

        self
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Authorization {
    pub alg: Algorithm,
}

impl Authorization {
    pub fn with_environment(mut self) -> Self {
        from_environment!(self, "RS_AUTH_ALG", alg);

        self
    }
}

/// Matchmaking defaults, configurable instead of compiled into the
/// matcher.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Matchmaking {
    /// Capacity of brackets the matcher creates on its own.
    pub default_max_competitors: u32,
    /// Rule style every auto-created division is matched under.
    pub rule_style: String,
}

impl Matchmaking {
    pub fn with_environment(mut self) -> Self {
        from_environment!(
            self,
            "RS_MATCH_MAX_COMPETITORS",
            default_max_competitors,
            "RS_MATCH_RULE_STYLE",
            rule_style,
        );

        self
    }
}

impl Default for Matchmaking {
    fn default() -> Self {
        Self {
            default_max_competitors: 4,
            rule_style: String::from("Standard Single Elimination"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::Config;

    #[test]
    fn test_config_from_toml() {
        let input = r#"
loglevel = "info"
bind = "0.0.0.0:3000"

[database]
driver = "mysql"
host = "localhost"
port = 3306
user = "ringside"
password = "ringside"
database = "ringside"
prefix = ""

[authorization]
alg = "HS256"
"#;

        let config: Config = toml::from_str(input).unwrap();

        assert_eq!(config.bind, "0.0.0.0:3000".parse().unwrap());
        assert_eq!(config.database.port, 3306);

        // The matchmaking section is optional and falls back to the
        // defaults.
        assert_eq!(config.matchmaking.default_max_competitors, 4);
        assert_eq!(config.matchmaking.rule_style, "Standard Single Elimination");
    }

    #[test]
    fn test_connect_string() {
        let config: Config = toml::from_str(
            r#"
loglevel = "debug"
bind = "127.0.0.1:8000"

[database]
driver = "mysql"
host = "db"
port = 3306
user = "u"
password = "p"
database = "ringside"
prefix = "rs_"

[authorization]
alg = "HS256"
"#,
        )
        .unwrap();

        assert_eq!(
            config.database.connect_string(),
            "mysql://u:p@db:3306/ringside?ssl-mode=DISABLED"
        );
    }
}
