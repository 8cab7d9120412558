//! Simulations API Client
//!
//! This crate wraps the credit simulations REST API. Each operation issues a
//! single HTTP round trip and returns either a decoded `Simulation` or one of
//! the typed errors from `domain_simulation`.
//!
//! # Architecture
//!
//! - **Client**: `SimulationsClient`, one method per endpoint and scenario
//! - **Config**: Base URL and path, loaded from the environment
//! - **Error Handling**: `ClientError` for transport, decoding and status mismatches
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_client::{ClientConfig, SimulationsClient};
//!
//! let client = SimulationsClient::new(ClientConfig::default())?;
//! let simulations = client.get_all_simulations().await?;
//! ```

pub mod config;
pub mod error;
pub mod client;

pub use client::SimulationsClient;
pub use config::ClientConfig;
pub use error::ClientError;
