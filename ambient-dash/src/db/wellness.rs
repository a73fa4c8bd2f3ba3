//! Wellness score trend from `behavioral_data`

use ambient_common::Result;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::warn;

/// One point of the wellness trend chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WellnessPoint {
    /// Short date label, e.g. "Mar 7"
    pub date: String,
    pub score: f64,
}

/// Load all scored rows, oldest first
///
/// Rows with a NULL score are left out by the query since there is nothing
/// to plot; rows with an unparseable `created_at` are skipped.
pub async fn load_wellness_trend(pool: &SqlitePool) -> Result<Vec<WellnessPoint>> {
    let rows: Vec<(String, f64)> = sqlx::query_as(
        "SELECT created_at, CAST(overall_risk_score AS REAL) \
         FROM behavioral_data \
         WHERE overall_risk_score IS NOT NULL \
         ORDER BY created_at ASC",
    )
    .fetch_all(pool)
    .await?;

    let points = rows
        .into_iter()
        .filter_map(|(created_at, score)| match format_point_date(&created_at) {
            Some(date) => Some(WellnessPoint { date, score }),
            None => {
                warn!(created_at = %created_at, "Skipping behavioral_data row with unparseable timestamp");
                None
            }
        })
        .collect();

    Ok(points)
}

/// Format a stored timestamp as a chart label ("%b %-d")
///
/// Accepts RFC 3339, SQLite `datetime()` text, and bare dates.
pub fn format_point_date(created_at: &str) -> Option<String> {
    let s = created_at.trim();

    let date = DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.date_naive())
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f").map(|dt| dt.date()))
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f").map(|dt| dt.date()))
        .or_else(|_| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .ok()?;

    Some(date.format("%b %-d").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn pool_with_rows(dir: &tempfile::TempDir, rows: &[(&str, Option<f64>)]) -> SqlitePool {
        let db_path = dir.path().join("wellness.db");
        let pool = SqlitePool::connect(&format!("sqlite://{}?mode=rwc", db_path.display()))
            .await
            .unwrap();
        sqlx::query(
            "CREATE TABLE behavioral_data (id INTEGER PRIMARY KEY, created_at TEXT NOT NULL, overall_risk_score REAL)",
        )
        .execute(&pool)
        .await
        .unwrap();
        for (created_at, score) in rows {
            sqlx::query("INSERT INTO behavioral_data (created_at, overall_risk_score) VALUES (?, ?)")
                .bind(*created_at)
                .bind(*score)
                .execute(&pool)
                .await
                .unwrap();
        }
        pool
    }

    #[tokio::test]
    async fn test_trend_skips_bad_timestamp_and_null_score() {
        let dir = tempfile::tempdir().unwrap();
        let pool = pool_with_rows(
            &dir,
            &[
                ("garbage", Some(1.0)),
                ("2026-01-02T00:00:00Z", Some(50.0)),
                ("2026-01-03T00:00:00Z", None),
            ],
        )
        .await;

        let trend = load_wellness_trend(&pool).await.unwrap();
        assert_eq!(
            trend,
            vec![WellnessPoint {
                date: "Jan 2".to_string(),
                score: 50.0,
            }]
        );
    }

    #[tokio::test]
    async fn test_trend_sorted_oldest_first() {
        let dir = tempfile::tempdir().unwrap();
        let pool = pool_with_rows(
            &dir,
            &[("2026-02-10 08:00:00", Some(70.0)), ("2026-02-09 08:00:00", Some(65.5))],
        )
        .await;

        let trend = load_wellness_trend(&pool).await.unwrap();
        let dates: Vec<_> = trend.iter().map(|p| p.date.as_str()).collect();
        assert_eq!(dates, vec!["Feb 9", "Feb 10"]);
        assert_eq!(trend[1].score, 70.0);
    }

    #[tokio::test]
    async fn test_missing_table_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let pool = SqlitePool::connect(&format!(
            "sqlite://{}?mode=rwc",
            dir.path().join("empty.db").display()
        ))
        .await
        .unwrap();

        assert!(load_wellness_trend(&pool).await.is_err());
    }

    #[test]
    fn test_format_rfc3339() {
        assert_eq!(
            format_point_date("2026-03-07T14:22:01.123456+00:00").as_deref(),
            Some("Mar 7")
        );
        assert_eq!(format_point_date("2026-12-25T00:00:00Z").as_deref(), Some("Dec 25"));
    }

    #[test]
    fn test_format_sqlite_datetime() {
        assert_eq!(format_point_date("2026-01-05 08:00:00").as_deref(), Some("Jan 5"));
        assert_eq!(format_point_date("2026-01-05T08:00:00").as_deref(), Some("Jan 5"));
    }

    #[test]
    fn test_format_bare_date() {
        assert_eq!(format_point_date("2026-10-16").as_deref(), Some("Oct 16"));
    }

    #[test]
    fn test_format_garbage() {
        assert_eq!(format_point_date("yesterday"), None);
        assert_eq!(format_point_date(""), None);
    }
}
