//! Core components of the `aletheia-rs` client.
//!
//! This module contains the foundational building blocks of the library, including:
//! - The main [`AlClient`] and its builder.
//! - The primary [`AlError`] type.
//! - The uniform [`ResultEnvelope`] every external call returns.
//! - Internal body readers shared by the transport, scraper and decoder.

/// The main client (`AlClient`), builder, and configuration.
pub mod client;
/// The primary error type (`AlError`) for the crate.
pub mod error;
/// Shared result shapes (`ResultEnvelope`, `Payload`).
pub mod models;

#[cfg(feature = "test-mode")]
pub(crate) mod fixtures;

pub(crate) mod net;

// convenient re-exports so most code can just `use crate::core::AlClient`
pub use client::{AlClient, AlClientBuilder};
pub use error::AlError;
pub use models::{Payload, ResultEnvelope};
