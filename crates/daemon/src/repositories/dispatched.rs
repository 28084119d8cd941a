use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::models::{CreateDispatchedJob, DispatchedJob};

/// Common SELECT fields for ledger queries
const SELECT_DISPATCHED_JOB: &str = r#"
    SELECT id, dedup_key, title, link, dispatched_at
    FROM dispatched_job
"#;

pub struct DispatchedJobRepository;

impl DispatchedJobRepository {
    /// Record a dispatched job.
    ///
    /// Returns false when the identity was already recorded; the
    /// existing row is left untouched. This makes the mark idempotent
    /// even if two writers race on the same key.
    pub async fn create(
        pool: &SqlitePool,
        data: CreateDispatchedJob,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO dispatched_job (dedup_key, title, link, dispatched_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (dedup_key) DO NOTHING
            "#,
        )
        .bind(&data.dedup_key)
        .bind(&data.title)
        .bind(&data.link)
        .bind(Utc::now())
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Check whether a job identity has already been dispatched
    pub async fn exists(pool: &SqlitePool, dedup_key: &str) -> Result<bool, sqlx::Error> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM dispatched_job WHERE dedup_key = $1",
        )
        .bind(dedup_key)
        .fetch_one(pool)
        .await?;

        Ok(count > 0)
    }

    /// Get a ledger entry by its dedup key
    pub async fn get_by_key(
        pool: &SqlitePool,
        dedup_key: &str,
    ) -> Result<Option<DispatchedJob>, sqlx::Error> {
        let query = format!("{} WHERE dedup_key = $1", SELECT_DISPATCHED_JOB);
        let row = sqlx::query_as::<_, DispatchedJobRow>(&query)
            .bind(dedup_key)
            .fetch_optional(pool)
            .await?;

        Ok(row.map(Into::into))
    }

    /// Count all ledger entries
    pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM dispatched_job")
            .fetch_one(pool)
            .await
    }

    /// Delete entries older than the cutoff. Returns the number removed.
    pub async fn prune_older_than(
        pool: &SqlitePool,
        cutoff: DateTime<Utc>,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM dispatched_job WHERE dispatched_at < $1")
            .bind(cutoff)
            .execute(pool)
            .await?;

        Ok(result.rows_affected())
    }
}

/// Internal row type for mapping SQLite results
#[derive(Debug, sqlx::FromRow)]
struct DispatchedJobRow {
    id: i64,
    dedup_key: String,
    title: String,
    link: String,
    dispatched_at: DateTime<Utc>,
}

impl From<DispatchedJobRow> for DispatchedJob {
    fn from(row: DispatchedJobRow) -> Self {
        Self {
            id: row.id,
            dedup_key: row.dedup_key,
            title: row.title,
            link: row.link,
            dispatched_at: row.dispatched_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;
    use std::time::{SystemTime, UNIX_EPOCH};

    async fn test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        sqlx::migrate!("../../migrations").run(&pool).await.unwrap();
        pool
    }

    fn entry(key: &str) -> CreateDispatchedJob {
        CreateDispatchedJob {
            dedup_key: key.to_string(),
            title: format!("title for {}", key),
            link: key.to_string(),
        }
    }

    #[tokio::test]
    async fn create_and_lookup() {
        let pool = test_pool().await;

        assert!(!DispatchedJobRepository::exists(&pool, "https://example.com/a.torrent")
            .await
            .unwrap());

        let created =
            DispatchedJobRepository::create(&pool, entry("https://example.com/a.torrent"))
                .await
                .unwrap();
        assert!(created);

        assert!(DispatchedJobRepository::exists(&pool, "https://example.com/a.torrent")
            .await
            .unwrap());

        let job = DispatchedJobRepository::get_by_key(&pool, "https://example.com/a.torrent")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(job.dedup_key, "https://example.com/a.torrent");
        assert_eq!(job.title, "title for https://example.com/a.torrent");
    }

    #[tokio::test]
    async fn duplicate_create_is_a_no_op() {
        let pool = test_pool().await;

        let first = DispatchedJobRepository::create(&pool, entry("k1")).await.unwrap();
        let second = DispatchedJobRepository::create(&pool, entry("k1")).await.unwrap();

        assert!(first);
        assert!(!second);
        assert_eq!(DispatchedJobRepository::count(&pool).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn different_keys_are_distinct_entries() {
        let pool = test_pool().await;

        assert!(DispatchedJobRepository::create(&pool, entry("k1")).await.unwrap());
        assert!(DispatchedJobRepository::create(&pool, entry("k2")).await.unwrap());

        assert_eq!(DispatchedJobRepository::count(&pool).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn prune_removes_only_old_entries() {
        let pool = test_pool().await;

        DispatchedJobRepository::create(&pool, entry("old")).await.unwrap();
        DispatchedJobRepository::create(&pool, entry("fresh")).await.unwrap();

        // Age the first entry well past any realistic retention window.
        let old_stamp = Utc::now() - chrono::Duration::days(400);
        sqlx::query("UPDATE dispatched_job SET dispatched_at = $1 WHERE dedup_key = 'old'")
            .bind(old_stamp)
            .execute(&pool)
            .await
            .unwrap();

        let cutoff = Utc::now() - chrono::Duration::days(30);
        let removed = DispatchedJobRepository::prune_older_than(&pool, cutoff)
            .await
            .unwrap();

        assert_eq!(removed, 1);
        assert!(!DispatchedJobRepository::exists(&pool, "old").await.unwrap());
        assert!(DispatchedJobRepository::exists(&pool, "fresh").await.unwrap());
    }

    #[tokio::test]
    async fn prune_with_nothing_old_removes_nothing() {
        let pool = test_pool().await;

        DispatchedJobRepository::create(&pool, entry("fresh")).await.unwrap();

        let cutoff = Utc::now() - chrono::Duration::days(30);
        let removed = DispatchedJobRepository::prune_older_than(&pool, cutoff)
            .await
            .unwrap();

        assert_eq!(removed, 0);
        assert_eq!(DispatchedJobRepository::count(&pool).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn marks_survive_reopening_the_database() {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let db_path = std::env::temp_dir().join(format!("feedarr-test-{}.db", nanos));
        let url = format!("sqlite:{}?mode=rwc", db_path.display());

        {
            let pool = crate::db::create_pool(&url).await.unwrap();
            assert!(DispatchedJobRepository::create(&pool, entry("persisted"))
                .await
                .unwrap());
            pool.close().await;
        }

        // Same file, fresh pool: the mark must still be there.
        let pool = crate::db::create_pool(&url).await.unwrap();
        assert!(DispatchedJobRepository::exists(&pool, "persisted").await.unwrap());
        assert!(!DispatchedJobRepository::create(&pool, entry("persisted"))
            .await
            .unwrap());
        pool.close().await;

        let _ = std::fs::remove_file(&db_path);
    }
}
