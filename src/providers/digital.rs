use async_trait::async_trait;

use super::{Provider, RestProvider};
use crate::core::{AlClient, AlError, ResultEnvelope};

/// The digital.gob.do API gateway: fuel prices, territories, ID validation.
#[derive(Debug, Clone)]
pub struct DigitalGob {
    rest: RestProvider,
}

impl DigitalGob {
    pub fn new(client: &AlClient) -> Self {
        Self {
            rest: RestProvider::new(client, "digital", client.base_digital().clone()),
        }
    }

    /// Fuel prices filtered by one parameter, e.g. `("date", "2021-12-12")`.
    ///
    /// # Errors
    ///
    /// See [`crate::transport::call`].
    pub async fn fuel_prices(&self, param: &str, value: &str) -> Result<ResultEnvelope, AlError> {
        self.rest.invoke("v1/fuels", &[(param, value)]).await
    }

    /// Territories of one kind (`regions`, `provinces`, `municipalities`, ...).
    ///
    /// # Errors
    ///
    /// `AlError::InvalidParams` if `kind` is not a single path segment,
    /// otherwise see [`crate::transport::call`].
    pub async fn territories(
        &self,
        kind: &str,
        params: &[(&str, &str)],
    ) -> Result<ResultEnvelope, AlError> {
        self.rest
            .fetch_segments(&["v1", "territories", kind], params)
            .await
    }

    /// Validate a citizen ID (cédula) number.
    ///
    /// # Errors
    ///
    /// `AlError::InvalidParams` if `cedula` is not a single path segment,
    /// otherwise see [`crate::transport::call`].
    pub async fn validate_cedula(&self, cedula: &str) -> Result<ResultEnvelope, AlError> {
        self.rest
            .fetch_segments(&["v3", "cedulas", cedula, "validate"], &[])
            .await
    }
}

#[async_trait]
impl Provider for DigitalGob {
    fn name(&self) -> &str {
        self.rest.name()
    }

    async fn invoke(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<ResultEnvelope, AlError> {
        self.rest.invoke(endpoint, params).await
    }
}
