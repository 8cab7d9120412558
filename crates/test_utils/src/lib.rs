//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! simulations API test suite.
//!
//! # Modules
//!
//! - `fixtures`: Fixed simulation data and the invalid payload scenarios
//! - `validation`: The API's validation rules and messages
//! - `stub_api`: In-process simulations API seeded with the fixtures
//! - `assertions`: Custom assertion helpers for simulations
//! - `logging`: Test tracing subscriber

pub mod fixtures;
pub mod validation;
pub mod stub_api;
pub mod assertions;
pub mod logging;

pub use fixtures::*;
pub use stub_api::*;
pub use assertions::*;
pub use logging::*;
