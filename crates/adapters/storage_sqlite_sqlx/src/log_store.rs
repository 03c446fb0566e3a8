//! `SQLite` implementation of [`LogStore`].

use std::future::Future;
use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use sentra_app::ports::{LogQuery, LogStore};
use sentra_domain::error::SentraError;
use sentra_domain::id::{DeviceId, LogId};
use sentra_domain::log::{LogLevel, LogRecord};
use sentra_domain::metrics::MetricSet;

use crate::error::StorageError;

struct Wrapper(LogRecord);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: uuid::Uuid = row.try_get("id")?;
        let device_id: String = row.try_get("device_id")?;
        let metrics_json: String = row.try_get("metrics")?;
        let level: String = row.try_get("level")?;
        let message: String = row.try_get("message")?;
        let timestamp: String = row.try_get("timestamp")?;

        let id = LogId::from_uuid(id);
        let device_id =
            DeviceId::from_str(&device_id).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let metrics: MetricSet = serde_json::from_str(&metrics_json)
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let level = LogLevel::from_str(&level).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let timestamp = chrono::DateTime::parse_from_rfc3339(&timestamp)
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))?
            .to_utc();

        Ok(Self(LogRecord {
            id,
            device_id,
            metrics,
            level,
            message,
            timestamp,
        }))
    }
}

const INSERT: &str = r"
    INSERT INTO logs (id, device_id, metrics, level, message, timestamp)
    VALUES (?, ?, ?, ?, ?, ?)
";

// Unset filters are passed as NULL and match everything.
const SELECT_RECENT: &str = r"
    SELECT * FROM logs
    WHERE (?1 IS NULL OR device_id = ?1)
      AND (?2 IS NULL OR level = ?2)
    ORDER BY timestamp DESC
    LIMIT ?3
";

const COUNT: &str = "SELECT COUNT(*) FROM logs";
const COUNT_BY_LEVEL: &str = "SELECT COUNT(*) FROM logs WHERE level = ?";

/// `SQLite`-backed append-only log store.
pub struct SqliteLogStore {
    pool: SqlitePool,
}

impl SqliteLogStore {
    /// Create a new log store using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl LogStore for SqliteLogStore {
    fn append(
        &self,
        record: LogRecord,
    ) -> impl Future<Output = Result<LogRecord, SentraError>> + Send {
        let pool = self.pool.clone();
        async move {
            let metrics_json =
                serde_json::to_string(&record.metrics).map_err(StorageError::from)?;

            sqlx::query(INSERT)
                .bind(record.id.as_uuid())
                .bind(record.device_id.as_str())
                .bind(&metrics_json)
                .bind(record.level.as_str())
                .bind(&record.message)
                .bind(record.timestamp.to_rfc3339())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(record)
        }
    }

    fn recent(
        &self,
        query: LogQuery,
    ) -> impl Future<Output = Result<Vec<LogRecord>, SentraError>> + Send {
        let pool = self.pool.clone();
        async move {
            let limit =
                i64::try_from(query.limit.unwrap_or(LogQuery::DEFAULT_LIMIT)).unwrap_or(i64::MAX);
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_RECENT)
                .bind(query.device_id.as_ref().map(DeviceId::as_str))
                .bind(query.level.map(LogLevel::as_str))
                .bind(limit)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn count(&self) -> impl Future<Output = Result<u64, SentraError>> + Send {
        let pool = self.pool.clone();
        async move {
            let (count,): (i64,) = sqlx::query_as(COUNT)
                .fetch_one(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(count.unsigned_abs())
        }
    }

    fn count_by_level(
        &self,
        level: LogLevel,
    ) -> impl Future<Output = Result<u64, SentraError>> + Send {
        let pool = self.pool.clone();
        async move {
            let (count,): (i64,) = sqlx::query_as(COUNT_BY_LEVEL)
                .bind(level.as_str())
                .fetch_one(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(count.unsigned_abs())
        }
    }
}
