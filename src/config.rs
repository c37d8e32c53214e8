// ABOUTME: Connection configuration loaded from YAML and composed into a database URL
// ABOUTME: Rejects unknown backends and malformed targets with Configuration errors

use serde::Deserialize;
use std::path::Path;

use crate::error::{Error, Result};

/// Target database description, as read from a config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConnectionConfig {
    pub backend: String,
    pub user: String,
    pub password: String,
    pub host: String,
    pub port: Option<u16>,
    pub db_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Sqlite,
    Postgres,
    MySql,
}

impl Backend {
    pub fn parse(name: &str) -> Result<Self> {
        match name {
            "sqlite" => Ok(Backend::Sqlite),
            "postgres" | "postgresql" => Ok(Backend::Postgres),
            "mysql" => Ok(Backend::MySql),
            other => Err(Error::Configuration(format!(
                "unrecognized backend {:?}",
                other
            ))),
        }
    }
}

impl ConnectionConfig {
    /// Convenience constructor for a file-backed SQLite database.
    pub fn sqlite(path: impl AsRef<Path>) -> Self {
        Self {
            backend: "sqlite".to_string(),
            db_name: path.as_ref().display().to_string(),
            ..Self::default()
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|err| {
            Error::Configuration(format!("cannot read {}: {}", path.display(), err))
        })?;
        Self::from_yaml(&contents)
    }

    pub fn from_yaml(contents: &str) -> Result<Self> {
        serde_yml::from_str(contents)
            .map_err(|err| Error::Configuration(format!("invalid config: {}", err)))
    }

    pub fn backend(&self) -> Result<Backend> {
        Backend::parse(&self.backend)
    }

    /// Builds `backend://[user[:password]@]host[:port]/db_name`.
    pub fn connection_string(&self) -> Result<String> {
        let backend = self.backend()?;
        if self.db_name.is_empty() {
            return Err(Error::Configuration("db_name is empty".to_string()));
        }
        if backend == Backend::Sqlite
            && (!self.user.is_empty()
                || !self.password.is_empty()
                || !self.host.is_empty()
                || self.port.is_some())
        {
            return Err(Error::Configuration(
                "sqlite takes no credentials, host or port".to_string(),
            ));
        }
        if self.user.is_empty() && !self.password.is_empty() {
            return Err(Error::Configuration(
                "password given without a user".to_string(),
            ));
        }

        let mut credentials = urlencoding::encode(&self.user).into_owned();
        if !self.password.is_empty() {
            credentials.push(':');
            credentials.push_str(&urlencoding::encode(&self.password));
        }
        if !credentials.is_empty() {
            credentials.push('@');
        }

        let mut hostname = self.host.clone();
        if let Some(port) = self.port {
            hostname.push_str(&format!(":{}", port));
        }

        let composed = format!(
            "{}://{}{}/{}",
            self.backend, credentials, hostname, self.db_name
        );
        url::Url::parse(&composed)
            .map_err(|err| Error::Configuration(format!("wrong database URL: {}", err)))?;

        Ok(composed)
    }

    /// URL handed to the driver. SQLite files are opened relative to the
    /// working directory and created on first use.
    pub fn driver_url(&self) -> Result<String> {
        let composed = self.connection_string()?;
        match self.backend()? {
            Backend::Sqlite => Ok(format!("sqlite:{}?mode=rwc", self.db_name)),
            Backend::Postgres | Backend::MySql => Ok(composed),
        }
    }
}
