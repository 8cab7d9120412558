//! Credit Simulation Domain
//!
//! Value types exchanged with the simulations API.
//!
//! # Modules
//!
//! - `simulation`: The `Simulation` record and its builder
//! - `error`: Typed errors decoded from non-2xx API responses

pub mod simulation;
pub mod error;

pub use simulation::{Simulation, SimulationBuilder};
pub use error::{ApiError, ConflictError, NotFoundError, UnprocessableEntityError};
