//! Provider capability interface and the bundled providers.
//!
//! Every provider is an independent struct that can `invoke` a named
//! endpoint with string parameters and hand back a [`ResultEnvelope`]. How
//! it gets there (a REST GET, a SOAP call) is its own business.

mod dgii;
mod digital;
mod rest;

pub use dgii::{Dgii, SearchPattern};
pub use digital::DigitalGob;
pub use rest::RestProvider;

use async_trait::async_trait;

use crate::core::{AlError, ResultEnvelope};

/// Something that answers named endpoint calls with a [`ResultEnvelope`].
#[async_trait]
pub trait Provider: Send + Sync {
    /// Short identifier, e.g. `dgii`.
    fn name(&self) -> &str;

    /// Call `endpoint` with `params`.
    ///
    /// For REST providers `endpoint` is a path below the provider base and
    /// `params` become the query string; for SOAP providers it is the
    /// operation name and `params` its arguments.
    async fn invoke(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<ResultEnvelope, AlError>;
}
