//! Variant configuration port — lookup of per-variant dashboard config.

use std::future::Future;

use sentra_domain::error::SentraError;
use sentra_domain::variant::Variant;
use sentra_domain::variant_config::VariantConfig;

/// Resolves the configuration a dashboard needs when switching variants.
///
/// Fetches happen once per variant switch; implementations may be a static
/// table or a remote call, and callers must treat failure as recoverable.
pub trait VariantConfigSource {
    /// Fetch the configuration for `variant`.
    fn fetch(
        &self,
        variant: Variant,
    ) -> impl Future<Output = Result<VariantConfig, SentraError>> + Send;
}

impl<T: VariantConfigSource + Send + Sync> VariantConfigSource for std::sync::Arc<T> {
    fn fetch(
        &self,
        variant: Variant,
    ) -> impl Future<Output = Result<VariantConfig, SentraError>> + Send {
        (**self).fetch(variant)
    }
}
