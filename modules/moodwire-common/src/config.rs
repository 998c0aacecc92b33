use std::env;
use std::path::PathBuf;

use tracing::info;

use crate::error::MoodwireError;

/// Destination for the loader: a schema-qualified Postgres table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRef {
    pub schema: String,
    pub table: String,
}

impl TableRef {
    pub fn new(schema: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            table: table.into(),
        }
    }

    /// Schema-qualified name for interpolation into DDL.
    /// Both parts must pass [`validate_identifier`] first.
    pub fn qualified(&self) -> String {
        format!("{}.{}", self.schema, self.table)
    }
}

/// How the loader treats the destination table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadMode {
    /// Drop and recreate the table every run. The table holds only the
    /// latest batch; callers wanting history must snapshot externally.
    #[default]
    Replace,
    /// Create the table if absent and append rows. Opt-in.
    Append,
}

impl LoadMode {
    pub fn parse(s: &str) -> Result<Self, MoodwireError> {
        match s.to_ascii_lowercase().as_str() {
            "replace" => Ok(LoadMode::Replace),
            "append" => Ok(LoadMode::Append),
            other => Err(MoodwireError::Config(format!(
                "LOAD_MODE must be 'replace' or 'append', got '{other}'"
            ))),
        }
    }
}

/// Application configuration loaded from environment variables.
///
/// Everything has a documented default so a bare environment still runs:
/// a missing bearer token means the live fetch fails and the synthetic
/// generator takes over, which is the intended degraded mode.
#[derive(Debug, Clone)]
pub struct Config {
    // Live sources
    pub twitter_bearer_token: Option<String>,
    pub reddit_user_agent: String,

    // Postgres
    pub postgres_host: String,
    pub postgres_port: u16,
    pub postgres_db: String,
    pub postgres_user: String,
    pub postgres_password: String,

    // Destination
    pub destination: TableRef,
    pub load_mode: LoadMode,

    // Batch artifacts
    pub data_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, MoodwireError> {
        let load_mode = LoadMode::parse(&optional_env("LOAD_MODE", "replace"))?;
        Ok(Self {
            twitter_bearer_token: env::var("TWITTER_BEARER_TOKEN").ok(),
            reddit_user_agent: optional_env("REDDIT_USER_AGENT", "moodwire/0.1"),
            postgres_host: optional_env("POSTGRES_HOST", "localhost"),
            postgres_port: optional_env("POSTGRES_PORT", "5432")
                .parse()
                .map_err(|_| {
                    MoodwireError::Config("POSTGRES_PORT must be a number".to_string())
                })?,
            postgres_db: optional_env("POSTGRES_DB", "airflow"),
            postgres_user: optional_env("POSTGRES_USER", "airflow"),
            postgres_password: optional_env("POSTGRES_PASSWORD", "airflow"),
            destination: TableRef::new(
                optional_env("DEST_SCHEMA", "raw_data"),
                optional_env("DEST_TABLE", "processed_comments"),
            ),
            load_mode,
            data_dir: PathBuf::from(optional_env("DATA_DIR", "data")),
        })
    }

    /// Postgres connection string for sqlx.
    pub fn database_url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.postgres_user,
            self.postgres_password,
            self.postgres_host,
            self.postgres_port,
            self.postgres_db
        )
    }

    /// Log the effective configuration without credentials.
    pub fn log_redacted(&self) {
        info!(
            twitter_auth = self.twitter_bearer_token.is_some(),
            postgres_host = self.postgres_host.as_str(),
            postgres_port = self.postgres_port,
            postgres_db = self.postgres_db.as_str(),
            destination = self.destination.qualified().as_str(),
            load_mode = ?self.load_mode,
            data_dir = %self.data_dir.display(),
            "Configuration loaded"
        );
    }
}

fn optional_env(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Reject schema/table names that cannot be safely interpolated into DDL.
pub fn validate_identifier(name: &str) -> Result<(), MoodwireError> {
    let ok = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !name.starts_with(|c: char| c.is_ascii_digit());
    if ok {
        Ok(())
    } else {
        Err(MoodwireError::Config(format!(
            "invalid SQL identifier '{name}'"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_mode_parses_case_insensitively() {
        assert_eq!(LoadMode::parse("Replace").unwrap(), LoadMode::Replace);
        assert_eq!(LoadMode::parse("APPEND").unwrap(), LoadMode::Append);
        assert!(LoadMode::parse("upsert").is_err());
    }

    #[test]
    fn identifier_validation() {
        assert!(validate_identifier("raw_data").is_ok());
        assert!(validate_identifier("processed_comments").is_ok());
        assert!(validate_identifier("").is_err());
        assert!(validate_identifier("1table").is_err());
        assert!(validate_identifier("raw-data").is_err());
        assert!(validate_identifier("x; DROP TABLE y").is_err());
    }

    #[test]
    fn table_ref_qualified() {
        let t = TableRef::new("raw_data", "processed_comments");
        assert_eq!(t.qualified(), "raw_data.processed_comments");
    }
}
