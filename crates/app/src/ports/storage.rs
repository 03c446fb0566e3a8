//! Storage ports — repository traits for persistence.

use std::future::Future;

use sentra_domain::device::{Device, DeviceStatus};
use sentra_domain::error::SentraError;
use sentra_domain::id::DeviceId;
use sentra_domain::log::{LogLevel, LogRecord};

/// Persistence of device records.
pub trait DeviceRepository {
    /// Create or refresh a device record in one atomic operation.
    ///
    /// When a record with the same id exists, only `status`, `variant`, and
    /// `updated_at` are refreshed (last writer wins); `name` and `kind` keep
    /// their original values.
    fn upsert(&self, device: Device) -> impl Future<Output = Result<Device, SentraError>> + Send;

    /// Look up a device by id.
    fn get_by_id(
        &self,
        id: &DeviceId,
    ) -> impl Future<Output = Result<Option<Device>, SentraError>> + Send;

    /// List all devices.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Device>, SentraError>> + Send;

    /// Total number of devices.
    fn count(&self) -> impl Future<Output = Result<u64, SentraError>> + Send;

    /// Number of devices with the given status.
    fn count_by_status(
        &self,
        status: DeviceStatus,
    ) -> impl Future<Output = Result<u64, SentraError>> + Send;
}

impl<T: DeviceRepository + Send + Sync> DeviceRepository for std::sync::Arc<T> {
    fn upsert(&self, device: Device) -> impl Future<Output = Result<Device, SentraError>> + Send {
        (**self).upsert(device)
    }

    fn get_by_id(
        &self,
        id: &DeviceId,
    ) -> impl Future<Output = Result<Option<Device>, SentraError>> + Send {
        (**self).get_by_id(id)
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Device>, SentraError>> + Send {
        (**self).get_all()
    }

    fn count(&self) -> impl Future<Output = Result<u64, SentraError>> + Send {
        (**self).count()
    }

    fn count_by_status(
        &self,
        status: DeviceStatus,
    ) -> impl Future<Output = Result<u64, SentraError>> + Send {
        (**self).count_by_status(status)
    }
}

/// Filter for log queries. Unset fields match everything.
#[derive(Debug, Clone, Default)]
pub struct LogQuery {
    pub device_id: Option<DeviceId>,
    pub level: Option<LogLevel>,
    pub limit: Option<usize>,
}

impl LogQuery {
    /// Limit applied when the caller does not specify one.
    pub const DEFAULT_LIMIT: usize = 100;
}

/// Append-only persistence of log records.
pub trait LogStore {
    /// Append an immutable log record.
    fn append(
        &self,
        record: LogRecord,
    ) -> impl Future<Output = Result<LogRecord, SentraError>> + Send;

    /// Fetch matching records, newest first.
    fn recent(
        &self,
        query: LogQuery,
    ) -> impl Future<Output = Result<Vec<LogRecord>, SentraError>> + Send;

    /// Total number of records.
    fn count(&self) -> impl Future<Output = Result<u64, SentraError>> + Send;

    /// Number of records with the given level.
    fn count_by_level(
        &self,
        level: LogLevel,
    ) -> impl Future<Output = Result<u64, SentraError>> + Send;
}

impl<T: LogStore + Send + Sync> LogStore for std::sync::Arc<T> {
    fn append(
        &self,
        record: LogRecord,
    ) -> impl Future<Output = Result<LogRecord, SentraError>> + Send {
        (**self).append(record)
    }

    fn recent(
        &self,
        query: LogQuery,
    ) -> impl Future<Output = Result<Vec<LogRecord>, SentraError>> + Send {
        (**self).recent(query)
    }

    fn count(&self) -> impl Future<Output = Result<u64, SentraError>> + Send {
        (**self).count()
    }

    fn count_by_level(
        &self,
        level: LogLevel,
    ) -> impl Future<Output = Result<u64, SentraError>> + Send {
        (**self).count_by_level(level)
    }
}
