//! Static, in-process implementation of [`VariantConfigSource`].

use std::future::Future;

use sentra_domain::error::SentraError;
use sentra_domain::variant::Variant;
use sentra_domain::variant_config::{self, VariantConfig};

use crate::ports::VariantConfigSource;

/// Serves variant configuration straight from the built-in table.
///
/// The table covers the whole closed variant set, so lookups cannot fail;
/// the fallible port signature exists for remote implementations.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticVariantConfigs;

impl VariantConfigSource for StaticVariantConfigs {
    fn fetch(
        &self,
        variant: Variant,
    ) -> impl Future<Output = Result<VariantConfig, SentraError>> + Send {
        let config = variant_config::get(variant).clone();
        async { Ok(config) }
    }
}
