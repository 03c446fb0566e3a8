//! Device — a simulated or real emitter of metric readings.

use serde::{Deserialize, Serialize};

use crate::error::{SentraError, ValidationError};
use crate::id::DeviceId;
use crate::time::Timestamp;
use crate::variant::Variant;

/// Connectivity status of a device, derived from ingestion activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceStatus {
    Online,
    #[default]
    Offline,
}

impl std::fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Online => f.write_str("online"),
            Self::Offline => f.write_str("offline"),
        }
    }
}

/// A registered device record.
///
/// Devices register themselves implicitly on first ingestion; the identifier
/// is whatever the device reports, not a generated one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub id: DeviceId,
    pub name: String,
    pub kind: String,
    pub variant: Variant,
    pub status: DeviceStatus,
    pub updated_at: Timestamp,
}

impl Device {
    /// Create a builder for constructing a [`Device`].
    #[must_use]
    pub fn builder() -> DeviceBuilder {
        DeviceBuilder::default()
    }

    /// The record shape written by ingestion-time registration: a generic
    /// online device named after its identifier.
    #[must_use]
    pub fn registered(id: DeviceId, variant: Variant) -> Self {
        let name = format!("Device {id}");
        Self {
            id,
            name,
            kind: "Generic".to_string(),
            variant,
            status: DeviceStatus::Online,
            updated_at: crate::time::now(),
        }
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`SentraError::Validation`] when `name` is empty.
    pub fn validate(&self) -> Result<(), SentraError> {
        if self.name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        Ok(())
    }
}

/// Step-by-step builder for [`Device`].
#[derive(Debug, Default)]
pub struct DeviceBuilder {
    id: Option<DeviceId>,
    name: Option<String>,
    kind: Option<String>,
    variant: Option<Variant>,
    status: DeviceStatus,
    updated_at: Option<Timestamp>,
}

impl DeviceBuilder {
    #[must_use]
    pub fn id(mut self, id: DeviceId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    #[must_use]
    pub fn variant(mut self, variant: Variant) -> Self {
        self.variant = Some(variant);
        self
    }

    #[must_use]
    pub fn status(mut self, status: DeviceStatus) -> Self {
        self.status = status;
        self
    }

    #[must_use]
    pub fn updated_at(mut self, updated_at: Timestamp) -> Self {
        self.updated_at = Some(updated_at);
        self
    }

    /// Consume the builder, validate, and return a [`Device`].
    ///
    /// # Errors
    ///
    /// Returns [`SentraError::Validation`] if `id` is missing/empty or
    /// `name` is empty.
    pub fn build(self) -> Result<Device, SentraError> {
        let id = match self.id {
            Some(id) => id,
            None => return Err(ValidationError::EmptyDeviceId.into()),
        };
        let device = Device {
            name: self.name.unwrap_or_default(),
            kind: self.kind.unwrap_or_else(|| "Generic".to_string()),
            variant: self.variant.unwrap_or(Variant::Home),
            status: self.status,
            updated_at: self.updated_at.unwrap_or_else(crate::time::now),
            id,
        };
        device.validate()?;
        Ok(device)
    }
}
