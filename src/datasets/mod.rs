//! Resolve a dataset name into decoded tables.
//!
//! The listing page of the dataset is scraped for resources of one format,
//! then every match is downloaded and decoded. With several matches the
//! downloads run concurrently and the output keeps discovery order. Any
//! single failure fails the whole resolution; the remaining downloads are
//! dropped.

mod model;

pub use model::{DatasetResolution, DatasetTable};

use futures::future::try_join_all;
use url::Url;

use crate::core::client::constants::{DEFAULT_ANCHOR_MARKER, DEFAULT_RESOURCE_FORMAT};
use crate::core::{AlClient, AlError};
use crate::scrape::{self, DatasetResource};
use crate::tabular;
use crate::transport::{join_segments, provider_host};

/// Entry point to a CKAN-style open-data portal.
///
/// # Example
///
/// ```no_run
/// # use aletheia_rs::{AlClient, DatasetPortal, DatasetResolution};
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = AlClient::default();
/// let portal = DatasetPortal::new(&client);
///
/// match portal.resolve("recaudaciones-sirite-2021-2022").await? {
///     DatasetResolution::Single(t) => println!("{} rows", t.table.len()),
///     DatasetResolution::Many(ts) => println!("{} resources", ts.len()),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct DatasetPortal {
    client: AlClient,
    anchor_marker: String,
    format: String,
}

impl DatasetPortal {
    /// Creates a portal over the client's dataset base, resolving CSV resources.
    #[must_use]
    pub fn new(client: &AlClient) -> Self {
        Self {
            client: client.clone(),
            anchor_marker: DEFAULT_ANCHOR_MARKER.to_string(),
            format: DEFAULT_RESOURCE_FORMAT.to_string(),
        }
    }

    /// CSS class of the download anchors. (Default: `resource-url-analytics`)
    #[must_use]
    pub fn anchor_marker(mut self, marker: impl Into<String>) -> Self {
        self.anchor_marker = marker.into();
        self
    }

    /// Format label a resource must carry to be resolved. (Default: `csv`)
    #[must_use]
    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    /// Listing page URL of `dataset_id`.
    ///
    /// # Errors
    ///
    /// `AlError::InvalidParams` for an id that is not a single path segment
    /// (empty, `.`, `..`, or containing `/`, `\`, `?` or `#`).
    pub fn listing_url(&self, dataset_id: &str) -> Result<Url, AlError> {
        join_segments(self.client.base_datasets(), &[dataset_id.trim()]).map_err(|_| {
            AlError::InvalidParams(format!("invalid dataset id `{dataset_id}`"))
        })
    }

    /// Resources of the configured format listed for `dataset_id`, in page order.
    ///
    /// # Errors
    ///
    /// Transport errors for the listing fetch.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    pub async fn resource_urls(&self, dataset_id: &str) -> Result<Vec<DatasetResource>, AlError> {
        let listing = self.listing_url(dataset_id)?;
        scrape::discover_resources(&self.client, listing.as_str(), &self.anchor_marker, &self.format)
            .await
    }

    /// Resolve `dataset_id` into one table (`Single`) or several (`Many`).
    ///
    /// # Errors
    ///
    /// `AlError::NoResource` when nothing matched; otherwise the first
    /// transport or decode error of any resource.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    pub async fn resolve(&self, dataset_id: &str) -> Result<DatasetResolution, AlError> {
        let listing = self.listing_url(dataset_id)?;
        let listing_endpoint = listing.to_string();
        let provider = provider_host(&listing_endpoint)?;

        let resources = scrape::discover_resources(
            &self.client,
            &listing_endpoint,
            &self.anchor_marker,
            &self.format,
        )
        .await?;

        match resources.as_slice() {
            [] => Err(AlError::NoResource {
                dataset: dataset_id.to_string(),
            }),
            [only] => {
                let table = self.fetch_one(only, &provider, &listing_endpoint).await?;
                Ok(DatasetResolution::Single(table))
            }
            many => {
                let futures = many
                    .iter()
                    .map(|res| self.fetch_one(res, &provider, &listing_endpoint));
                let tables = try_join_all(futures).await?;
                Ok(DatasetResolution::Many(tables))
            }
        }
    }

    async fn fetch_one(
        &self,
        resource: &DatasetResource,
        provider: &str,
        listing_endpoint: &str,
    ) -> Result<DatasetTable, AlError> {
        #[cfg(feature = "tracing")]
        tracing::debug!(position = resource.position, url = %resource.url, "fetching resource");

        let table = tabular::fetch_table(&self.client, &resource.url).await?;

        #[cfg(feature = "tracing")]
        tracing::debug!(position = resource.position, rows = table.len(), "resource decoded");

        Ok(DatasetTable {
            table,
            provider_host: provider.to_string(),
            resource_url: resource.url.clone(),
            listing_endpoint: listing_endpoint.to_string(),
        })
    }
}
