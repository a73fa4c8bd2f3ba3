//! Database access layer for ambient-dash
//!
//! The dashboard only reads: connections are opened in SQLite read-only mode.

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use std::path::Path;

mod wellness;
pub use wellness::{format_point_date, load_wellness_trend, WellnessPoint};

/// Connect to database with read-only mode
pub async fn connect_readonly(db_path: &Path) -> Result<SqlitePool> {
    if !db_path.exists() {
        anyhow::bail!("Database not found: {}", db_path.display());
    }

    // mode=ro: Read-only mode
    let db_url = format!("sqlite://{}?mode=ro", db_path.display());

    let pool = SqlitePool::connect(&db_url)
        .await
        .context("Failed to connect to database in read-only mode")?;

    Ok(pool)
}
