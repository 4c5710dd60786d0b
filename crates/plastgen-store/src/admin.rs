//! Administrative operations: catalog queries and the reset used between
//! runs. Not part of generation proper.

use sqlx::PgPool;
use tracing::info;

use plastgen_core::{Error, Result};

/// Names of every base table (ordinary or partitioned) in the schema.
pub async fn list_base_tables(pool: &PgPool, schema: &str) -> Result<Vec<String>> {
    sqlx::query_scalar::<_, String>(
        "select c.relname \
         from pg_class c \
         join pg_namespace n on n.oid = c.relnamespace \
         where n.nspname = $1 and c.relkind in ('r', 'p') \
         order by c.relname",
    )
    .bind(schema)
    .fetch_all(pool)
    .await
    .map_err(|err| Error::Db(err.to_string()))
}

/// Truncate every base table in the schema, restarting identity sequences
/// and cascading to dependents. Returns the number of tables cleared.
pub async fn reset_all(pool: &PgPool, schema: &str) -> Result<usize> {
    let tables = list_base_tables(pool, schema).await?;
    if tables.is_empty() {
        info!(schema, "nothing to reset");
        return Ok(0);
    }

    let targets = tables
        .iter()
        .map(|table| format!("\"{schema}\".\"{table}\""))
        .collect::<Vec<_>>()
        .join(", ");
    sqlx::query(&format!(
        "truncate table {targets} restart identity cascade"
    ))
    .execute(pool)
    .await
    .map_err(|err| Error::Db(err.to_string()))?;

    info!(schema, tables = tables.len(), "all tables truncated");
    Ok(tables.len())
}
