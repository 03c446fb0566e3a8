//! `SQLite` implementation of [`DeviceRepository`].

use std::future::Future;
use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use sentra_app::ports::DeviceRepository;
use sentra_domain::device::{Device, DeviceStatus};
use sentra_domain::error::SentraError;
use sentra_domain::id::DeviceId;
use sentra_domain::variant::Variant;

use crate::error::StorageError;

/// Wrapper for converting database rows into domain [`Device`].
struct Wrapper(Device);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Device> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let name: String = row.try_get("name")?;
        let kind: String = row.try_get("kind")?;
        let variant: String = row.try_get("variant")?;
        let status: String = row.try_get("status")?;
        let updated_at: String = row.try_get("updated_at")?;

        let id = DeviceId::from_str(&id).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let variant =
            Variant::from_str(&variant).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let status = match status.as_str() {
            "online" => DeviceStatus::Online,
            _ => DeviceStatus::Offline,
        };
        let updated_at = chrono::DateTime::parse_from_rfc3339(&updated_at)
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))?
            .to_utc();

        Ok(Self(Device {
            id,
            name,
            kind,
            variant,
            status,
            updated_at,
        }))
    }
}

// The upsert touches only the activity fields; name and kind keep whatever
// the record was created with.
const UPSERT: &str = r"
    INSERT INTO devices (id, name, kind, variant, status, updated_at)
    VALUES (?, ?, ?, ?, ?, ?)
    ON CONFLICT(id) DO UPDATE SET
        variant = excluded.variant,
        status = excluded.status,
        updated_at = excluded.updated_at
";
const SELECT_BY_ID: &str = "SELECT * FROM devices WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM devices ORDER BY id";
const COUNT: &str = "SELECT COUNT(*) FROM devices";
const COUNT_BY_STATUS: &str = "SELECT COUNT(*) FROM devices WHERE status = ?";

/// `SQLite`-backed device repository.
pub struct SqliteDeviceRepository {
    pool: SqlitePool,
}

impl SqliteDeviceRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl DeviceRepository for SqliteDeviceRepository {
    fn upsert(&self, device: Device) -> impl Future<Output = Result<Device, SentraError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(UPSERT)
                .bind(device.id.as_str())
                .bind(&device.name)
                .bind(&device.kind)
                .bind(device.variant.as_str())
                .bind(device.status.to_string())
                .bind(device.updated_at.to_rfc3339())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(device)
        }
    }

    fn get_by_id(
        &self,
        id: &DeviceId,
    ) -> impl Future<Output = Result<Option<Device>, SentraError>> + Send {
        let pool = self.pool.clone();
        let id = id.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(id.as_str())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Device>, SentraError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
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

    fn count_by_status(
        &self,
        status: DeviceStatus,
    ) -> impl Future<Output = Result<u64, SentraError>> + Send {
        let pool = self.pool.clone();
        async move {
            let (count,): (i64,) = sqlx::query_as(COUNT_BY_STATUS)
                .bind(status.to_string())
                .fetch_one(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(count.unsigned_abs())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::Config;

    async fn setup() -> SqliteDeviceRepository {
        let db = Config {
            database_url: "sqlite::memory:".to_string(),
        }
        .build()
        .await
        .unwrap();
        SqliteDeviceRepository::new(db.pool().clone())
    }

    fn device_id(raw: &str) -> DeviceId {
        DeviceId::new(raw).unwrap()
    }

    fn test_device(raw_id: &str, variant: Variant) -> Device {
        Device::registered(device_id(raw_id), variant)
    }

    #[tokio::test]
    async fn should_create_and_retrieve_device() {
        let repo = setup().await;
        let device = test_device("dev_home_01", Variant::Home);

        repo.upsert(device.clone()).await.unwrap();

        let fetched = repo.get_by_id(&device.id).await.unwrap().unwrap();
        assert_eq!(fetched.id, device.id);
        assert_eq!(fetched.name, "Device dev_home_01");
        assert_eq!(fetched.variant, Variant::Home);
        assert_eq!(fetched.status, DeviceStatus::Online);
    }

    #[tokio::test]
    async fn should_return_none_when_device_not_found() {
        let repo = setup().await;
        let result = repo.get_by_id(&device_id("dev_ghost_01")).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn should_refresh_activity_fields_but_preserve_name_on_conflict() {
        let repo = setup().await;
        let mut device = test_device("dev_home_01", Variant::Home);
        device.name = "Hallway Sensor".to_string();
        repo.upsert(device.clone()).await.unwrap();

        // A later ingestion re-registers the device with the generic shape.
        let refreshed = test_device("dev_home_01", Variant::Farm);
        repo.upsert(refreshed).await.unwrap();

        let fetched = repo.get_by_id(&device.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "Hallway Sensor");
        assert_eq!(fetched.variant, Variant::Farm);
    }

    #[tokio::test]
    async fn should_not_duplicate_on_repeated_upserts() {
        let repo = setup().await;
        for _ in 0..3 {
            repo.upsert(test_device("dev_home_01", Variant::Home))
                .await
                .unwrap();
        }
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn should_list_all_devices() {
        let repo = setup().await;
        repo.upsert(test_device("dev_home_01", Variant::Home))
            .await
            .unwrap();
        repo.upsert(test_device("dev_farm_01", Variant::Farm))
            .await
            .unwrap();

        let all = repo.get_all().await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn should_count_devices_by_status() {
        let repo = setup().await;
        repo.upsert(test_device("dev_home_01", Variant::Home))
            .await
            .unwrap();
        let mut offline = test_device("dev_farm_01", Variant::Farm);
        offline.status = DeviceStatus::Offline;
        repo.upsert(offline).await.unwrap();

        assert_eq!(repo.count().await.unwrap(), 2);
        assert_eq!(
            repo.count_by_status(DeviceStatus::Online).await.unwrap(),
            1
        );
        assert_eq!(
            repo.count_by_status(DeviceStatus::Offline).await.unwrap(),
            1
        );
    }

    #[tokio::test]
    async fn should_preserve_timestamp_through_roundtrip() {
        let repo = setup().await;
        let device = test_device("dev_traf_01", Variant::Traffic);
        let expected = device.updated_at;
        repo.upsert(device.clone()).await.unwrap();

        let fetched = repo.get_by_id(&device.id).await.unwrap().unwrap();
        assert_eq!(fetched.updated_at, expected);
    }
}
