//! Device service — read-side use-cases for device records.
//!
//! Devices register themselves through ingestion; this service only answers
//! queries about them.

use sentra_domain::device::Device;
use sentra_domain::error::{NotFoundError, SentraError};
use sentra_domain::id::DeviceId;

use crate::ports::DeviceRepository;

/// Application service for device queries.
pub struct DeviceService<R> {
    repo: R,
}

impl<R: DeviceRepository> DeviceService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Look up a device by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`SentraError::NotFound`] when no device with `id` exists,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_device(&self, id: &DeviceId) -> Result<Device, SentraError> {
        self.repo.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Device",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// List all devices.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_devices(&self) -> Result<Vec<Device>, SentraError> {
        self.repo.get_all().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::future::Future;
    use std::sync::Mutex;

    use sentra_domain::device::DeviceStatus;
    use sentra_domain::variant::Variant;

    #[derive(Default)]
    struct InMemoryDeviceRepo {
        store: Mutex<HashMap<DeviceId, Device>>,
    }

    impl DeviceRepository for InMemoryDeviceRepo {
        fn upsert(&self, device: Device) -> impl Future<Output = Result<Device, SentraError>> + Send {
            let mut store = self.store.lock().unwrap();
            store.insert(device.id.clone(), device.clone());
            async { Ok(device) }
        }

        fn get_by_id(
            &self,
            id: &DeviceId,
        ) -> impl Future<Output = Result<Option<Device>, SentraError>> + Send {
            let result = self.store.lock().unwrap().get(id).cloned();
            async { Ok(result) }
        }

        fn get_all(&self) -> impl Future<Output = Result<Vec<Device>, SentraError>> + Send {
            let result: Vec<Device> = self.store.lock().unwrap().values().cloned().collect();
            async { Ok(result) }
        }

        fn count(&self) -> impl Future<Output = Result<u64, SentraError>> + Send {
            let result = self.store.lock().unwrap().len() as u64;
            async move { Ok(result) }
        }

        fn count_by_status(
            &self,
            status: DeviceStatus,
        ) -> impl Future<Output = Result<u64, SentraError>> + Send {
            let result = self
                .store
                .lock()
                .unwrap()
                .values()
                .filter(|d| d.status == status)
                .count() as u64;
            async move { Ok(result) }
        }
    }

    fn make_service() -> DeviceService<InMemoryDeviceRepo> {
        DeviceService::new(InMemoryDeviceRepo::default())
    }

    fn device(raw_id: &str, variant: Variant) -> Device {
        Device::registered(DeviceId::new(raw_id).unwrap(), variant)
    }

    #[tokio::test]
    async fn should_get_device_when_present() {
        let svc = make_service();
        let registered = device("dev_home_01", Variant::Home);
        svc.repo.upsert(registered.clone()).await.unwrap();

        let fetched = svc.get_device(&registered.id).await.unwrap();
        assert_eq!(fetched, registered);
    }

    #[tokio::test]
    async fn should_return_not_found_when_device_missing() {
        let svc = make_service();
        let id = DeviceId::new("dev_ghost_01").unwrap();
        let result = svc.get_device(&id).await;
        assert!(matches!(result, Err(SentraError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_list_all_devices() {
        let svc = make_service();
        svc.repo
            .upsert(device("dev_home_01", Variant::Home))
            .await
            .unwrap();
        svc.repo
            .upsert(device("dev_farm_01", Variant::Farm))
            .await
            .unwrap();

        let all = svc.list_devices().await.unwrap();
        assert_eq!(all.len(), 2);
    }
}
