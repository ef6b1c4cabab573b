use sqlx::{Connection, PgConnection};

use crate::config::Config;

/// Opens a single connection, asks the server for its version, and closes it.
pub async fn fetch_version(config: &Config) -> Result<String, sqlx::Error> {
    fetch_text_then_close(config, "SELECT version()").await
}

async fn fetch_text_then_close(config: &Config, sql: &str) -> Result<String, sqlx::Error> {
    let mut conn = PgConnection::connect_with(&config.db_connect_options()).await?;

    let result: Result<(String,), sqlx::Error> = sqlx::query_as(sql).fetch_one(&mut conn).await;

    // Close before reporting, whether or not the query succeeded.
    conn.close().await?;
    let (text,) = result?;
    Ok(text)
}
