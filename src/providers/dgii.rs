use async_trait::async_trait;

use super::Provider;
use crate::core::client::constants::DGII_NAMESPACE;
use crate::core::{AlClient, AlError, ResultEnvelope};
use crate::soap::{self, SoapOperation, SoapService};

/// How a taxpayer search term is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPattern {
    /// Exact RNC or cédula.
    Rnc,
    /// Name or business name.
    Name,
}

impl SearchPattern {
    const fn as_str(self) -> &'static str {
        match self {
            SearchPattern::Rnc => "0",
            SearchPattern::Name => "1",
        }
    }
}

/// DGII (tax authority) mobile web service, spoken over SOAP 1.2.
///
/// Results are whatever the `...Result` node carried: a decoded JSON
/// document when it was one, otherwise the raw text.
#[derive(Debug, Clone)]
pub struct Dgii {
    client: AlClient,
    service: SoapService,
}

impl Dgii {
    pub fn new(client: &AlClient) -> Self {
        Self {
            client: client.clone(),
            service: SoapService::new(client.base_dgii().clone(), DGII_NAMESPACE),
        }
    }

    pub fn service(&self) -> &SoapService {
        &self.service
    }

    async fn call(&self, operation: &str, params: &[(&str, &str)]) -> Result<ResultEnvelope, AlError> {
        let op = SoapOperation::with_params(
            operation,
            &self.service.namespace,
            params.iter().copied(),
        )?;
        soap::invoke(&self.client, &self.service, &op).await
    }

    /// Taxpayers matching `value`, one page of `page_size` rows starting at `first_row`.
    ///
    /// # Errors
    ///
    /// See [`soap::invoke`].
    pub async fn contribuyentes(
        &self,
        value: &str,
        pattern: SearchPattern,
        first_row: u32,
        page_size: u32,
        imei: &str,
    ) -> Result<ResultEnvelope, AlError> {
        let first_row = first_row.to_string();
        let page_size = page_size.to_string();
        self.call(
            "GetContribuyentes",
            &[
                ("value", value),
                ("patronBusqueda", pattern.as_str()),
                ("inicioFilas", first_row.as_str()),
                ("filaFilas", page_size.as_str()),
                ("IMEI", imei),
            ],
        )
        .await
    }

    /// Number of taxpayers matching `value`.
    ///
    /// # Errors
    ///
    /// See [`soap::invoke`].
    pub async fn contribuyentes_count(
        &self,
        value: &str,
        pattern: SearchPattern,
        imei: &str,
    ) -> Result<ResultEnvelope, AlError> {
        self.call(
            "GetContribuyentesCount",
            &[
                ("value", value),
                ("patronBusqueda", pattern.as_str()),
                ("IMEI", imei),
            ],
        )
        .await
    }

    /// A document by its search code.
    ///
    /// # Errors
    ///
    /// See [`soap::invoke`].
    pub async fn documento(
        &self,
        code: &str,
        pattern: u32,
        imei: &str,
    ) -> Result<ResultEnvelope, AlError> {
        let pattern = pattern.to_string();
        self.call(
            "GetDocumento",
            &[
                ("codigoBusqueda", code),
                ("patronBusqueda", pattern.as_str()),
                ("IMEI", imei),
            ],
        )
        .await
    }

    /// Vehicle data by the DATAMATRIX code printed on its registration.
    ///
    /// # Errors
    ///
    /// See [`soap::invoke`].
    pub async fn vehiculo_por_datamatrix(
        &self,
        value: &str,
        imei: &str,
    ) -> Result<ResultEnvelope, AlError> {
        self.call("GetVehiculoPorDATAMATRIX", &[("value", value), ("IMEI", imei)])
            .await
    }

    /// Validity of a fiscal receipt number (NCF) issued by `rnc`.
    ///
    /// # Errors
    ///
    /// See [`soap::invoke`].
    pub async fn ncf(&self, rnc: &str, ncf: &str, imei: &str) -> Result<ResultEnvelope, AlError> {
        self.call("GetNCF", &[("RNC", rnc), ("NCF", ncf), ("IMEI", imei)])
            .await
    }

    /// Electronic receipt (e-NCF) check, which also needs the buyer's RNC and
    /// the security code printed on the receipt.
    ///
    /// # Errors
    ///
    /// See [`soap::invoke`].
    pub async fn ncf2(
        &self,
        rnc: &str,
        ncf: &str,
        buyer_rnc: &str,
        security_code: &str,
        imei: &str,
    ) -> Result<ResultEnvelope, AlError> {
        self.call(
            "GetNCF2",
            &[
                ("RNC", rnc),
                ("NCF", ncf),
                ("RNCComprador", buyer_rnc),
                ("CodigoSeguridad", security_code),
                ("IMEI", imei),
            ],
        )
        .await
    }

    /// Status of a filing request made by `rnc`.
    ///
    /// # Errors
    ///
    /// See [`soap::invoke`].
    pub async fn solicitud(
        &self,
        rnc: &str,
        request_number: &str,
        imei: &str,
    ) -> Result<ResultEnvelope, AlError> {
        self.call(
            "GetSolicitud",
            &[("RNC", rnc), ("Solicitud", request_number), ("IMEI", imei)],
        )
        .await
    }
}

#[async_trait]
impl Provider for Dgii {
    fn name(&self) -> &str {
        "dgii"
    }

    async fn invoke(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<ResultEnvelope, AlError> {
        self.call(endpoint, params).await
    }
}
