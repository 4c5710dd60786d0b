//! Connection settings, resolved once at process start.
//!
//! Resolution order: the `--conn` flag, then `DATABASE_URL`, then the
//! individual `DB_*` variables. `DB_SCHEMA` selects the schema in every
//! case (default `public`) and is applied through `search_path` so the
//! store can use unqualified table names.

use std::str::FromStr;

use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};

use crate::CliError;

const DEFAULT_PORT: u16 = 5432;
const DEFAULT_SCHEMA: &str = "public";

#[derive(Debug, Clone)]
pub struct DbSettings {
    options: PgConnectOptions,
    pub schema: String,
}

impl DbSettings {
    /// Resolve settings from the flag or the environment.
    pub fn resolve(conn: Option<&str>) -> Result<Self, CliError> {
        let schema = env_var("DB_SCHEMA").unwrap_or_else(|| DEFAULT_SCHEMA.to_string());

        let options = if let Some(url) = conn.map(str::to_string).or_else(|| env_var("DATABASE_URL"))
        {
            PgConnectOptions::from_str(&url)
                .map_err(|err| CliError::InvalidConfig(format!("bad connection string: {err}")))?
        } else {
            let name = require_var("DB_NAME")?;
            let user = require_var("DB_USER")?;
            let password = require_var("DB_PASSWORD")?;
            let host = env_var("DB_HOST").unwrap_or_else(|| "localhost".to_string());
            let port = match env_var("DB_PORT") {
                Some(raw) => raw
                    .parse::<u16>()
                    .map_err(|_| CliError::InvalidConfig(format!("bad DB_PORT '{raw}'")))?,
                None => DEFAULT_PORT,
            };
            PgConnectOptions::new()
                .host(&host)
                .port(port)
                .database(&name)
                .username(&user)
                .password(&password)
        };

        let options = options.options([("search_path", schema.as_str())]);
        Ok(Self { options, schema })
    }

    /// Open a pool sized for the single sequential writer.
    pub async fn connect(&self) -> Result<PgPool, CliError> {
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .connect_with(self.options.clone())
            .await?;
        Ok(pool)
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}

fn require_var(name: &str) -> Result<String, CliError> {
    env_var(name).ok_or_else(|| {
        CliError::InvalidConfig(format!(
            "set {name} (or DATABASE_URL, or pass --conn)"
        ))
    })
}
