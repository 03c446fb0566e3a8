//! Variant — one of the five fixed monitoring contexts.

use serde::{Deserialize, Serialize};

/// The closed set of monitoring contexts a device can belong to.
///
/// Each variant selects its own threshold rules, widget layout, and alert
/// messages. The set is fixed at compile time; an identifier outside it is
/// a recoverable lookup failure, never a panic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Home,
    Hospital,
    Factory,
    Traffic,
    Farm,
}

impl Variant {
    /// Every variant, in display order.
    pub const ALL: [Self; 5] = [
        Self::Home,
        Self::Hospital,
        Self::Factory,
        Self::Traffic,
        Self::Farm,
    ];

    /// The lowercase wire identifier.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Hospital => "hospital",
            Self::Factory => "factory",
            Self::Traffic => "traffic",
            Self::Farm => "farm",
        }
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse failure for [`Variant`] identifiers.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown variant: {0}")]
pub struct UnknownVariant(pub String);

impl std::str::FromStr for Variant {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "home" => Ok(Self::Home),
            "hospital" => Ok(Self::Hospital),
            "factory" => Ok(Self::Factory),
            "traffic" => Ok(Self::Traffic),
            "farm" => Ok(Self::Farm),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}
