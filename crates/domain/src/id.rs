//! Typed identifier newtypes.
//!
//! Log records get random UUIDs; devices keep the identifier the device
//! itself reports (e.g. `dev_home_01`), validated to be non-empty.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

macro_rules! define_id {
    ($(#[doc = $doc:expr])* $name:ident) => {
        $(#[doc = $doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(uuid::Uuid);

        impl Default for $name {
            fn default() -> Self {
                Self(uuid::Uuid::new_v4())
            }
        }

        impl $name {
            /// Generate a new random identifier.
            #[must_use]
            pub fn new() -> Self {
                Self::default()
            }

            /// Wrap an existing UUID.
            #[must_use]
            pub fn from_uuid(uuid: uuid::Uuid) -> Self {
                Self(uuid)
            }

            /// Access the inner UUID.
            #[must_use]
            pub fn as_uuid(self) -> uuid::Uuid {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                uuid::Uuid::parse_str(s).map(Self)
            }
        }
    };
}

define_id!(
    /// Unique identifier for a [`LogRecord`](crate::log::LogRecord).
    LogId
);

/// Identifier of a [`Device`](crate::device::Device), as reported by the
/// device itself.
///
/// Invariant: never empty. Enforced on every construction path, including
/// deserialization, so downstream code can rely on it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DeviceId(String);

impl DeviceId {
    /// Wrap a raw identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyDeviceId`] when `id` is empty.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ValidationError::EmptyDeviceId);
        }
        Ok(Self(id))
    }

    /// Borrow the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for DeviceId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DeviceId> for String {
    fn from(id: DeviceId) -> Self {
        id.0
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for DeviceId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_generate_unique_log_ids_when_called_twice() {
        let a = LogId::new();
        let b = LogId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn should_roundtrip_log_id_through_display_and_from_str() {
        let id = LogId::new();
        let text = id.to_string();
        let parsed: LogId = text.parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn should_roundtrip_log_id_through_serde_json() {
        let id = LogId::new();
        let json = serde_json::to_string(&id).unwrap();
        let parsed: LogId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn should_accept_non_empty_device_id() {
        let id = DeviceId::new("dev_home_01").unwrap();
        assert_eq!(id.as_str(), "dev_home_01");
    }

    #[test]
    fn should_reject_empty_device_id() {
        assert_eq!(
            DeviceId::new("").unwrap_err(),
            ValidationError::EmptyDeviceId
        );
    }

    #[test]
    fn should_reject_empty_device_id_during_deserialization() {
        let result: Result<DeviceId, _> = serde_json::from_str("\"\"");
        assert!(result.is_err());
    }

    #[test]
    fn should_serialize_device_id_as_plain_string() {
        let id = DeviceId::new("dev_farm_01").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"dev_farm_01\"");
    }
}
