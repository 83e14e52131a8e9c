//! # aletheia-rs
//!
//! An async client that puts heterogeneous Dominican public-data providers
//! behind one result shape. Every call returns a [`ResultEnvelope`] (the
//! decoded payload plus the provider host and the exact endpoint), or a
//! [`DatasetResolution`] for open-data portal datasets.
//!
//! Three kinds of upstream are handled:
//!
//! - **REST JSON** endpoints, through [`transport`] and the [`providers`].
//! - The **DGII SOAP 1.2** service, through the generic [`soap`] adapter:
//!   one adapter drives every operation, and the JSON document the service
//!   embeds as text in each `...Result` node is decoded a second time.
//! - **CKAN dataset portals**, through [`DatasetPortal`]: the dataset page
//!   is scraped for CSV resources ([`scrape`]), each resource is downloaded,
//!   decoded from its legacy codepage and parsed ([`tabular`]).
//!
//! The crate does not cache, retry or rate-limit.
//!
//! ## Quick start
//!
//! ```no_run
//! use aletheia_rs::{AlClient, DatasetPortal, Dgii, SearchPattern};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = AlClient::builder().api_key("YOUR_API_KEY").build()?;
//!
//! let taxpayer = Dgii::new(&client)
//!     .contribuyentes("130102058", SearchPattern::Rnc, 1, 1, "")
//!     .await?;
//! println!("{} answered {:?}", taxpayer.provider_host, taxpayer.payload);
//!
//! let dataset = DatasetPortal::new(&client)
//!     .resolve("recaudaciones-sirite-2021-2022")
//!     .await?;
//! for t in dataset.tables() {
//!     println!("{}: {} rows", t.resource_url, t.table.len());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Features
//!
//! - `tracing`: emit spans and events through the `tracing` crate.
//! - `tracing-subscriber`: pulls in a subscriber for demos and tests.
//! - `test-mode`: with `AL_RECORD=1`, response bodies are written to
//!   `tests/fixtures/` (or `AL_FIXDIR`).

pub mod core;
pub mod datasets;
pub mod providers;
pub mod scrape;
pub mod soap;
pub mod tabular;
pub mod transport;

pub use crate::core::{AlClient, AlClientBuilder, AlError, Payload, ResultEnvelope};
pub use datasets::{DatasetPortal, DatasetResolution, DatasetTable};
pub use providers::{Dgii, DigitalGob, Provider, RestProvider, SearchPattern};
pub use scrape::DatasetResource;
pub use soap::{SoapOperation, SoapService};
pub use tabular::{LegacyCodepage, ParsedTable, Record, TextDecoding};
