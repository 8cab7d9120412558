//! Simulation record
//!
//! A credit simulation as the API stores it, keyed by the CPF (the Brazilian
//! national ID). Uniqueness of the CPF is enforced server-side.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A credit simulation
///
/// Equality is value-based across every field. Fields the API adds on top of
/// these (such as its internal `id`) are ignored when decoding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Simulation {
    /// Name of the person requesting the credit
    pub name: String,
    /// National ID, the resource key
    pub cpf: String,
    /// Contact e-mail
    pub email: String,
    /// Requested amount
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    /// Number of installments
    pub installments: u32,
    /// Whether credit insurance was taken
    pub insurance: bool,
}

impl Simulation {
    /// Returns a copy of this simulation with another CPF
    pub fn with_cpf(mut self, cpf: impl Into<String>) -> Self {
        self.cpf = cpf.into();
        self
    }

    /// Returns a copy of this simulation with another insurance flag
    pub fn with_insurance(mut self, insurance: bool) -> Self {
        self.insurance = insurance;
        self
    }
}

/// Builder for request payloads
///
/// Performs no validation: invalid payloads are built on purpose to exercise
/// the API's validation. Unset fields keep their type default.
#[derive(Debug, Clone, Default)]
pub struct SimulationBuilder {
    name: String,
    cpf: String,
    email: String,
    amount: Decimal,
    installments: u32,
    insurance: bool,
}

impl SimulationBuilder {
    /// Creates an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the name
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the CPF
    pub fn cpf(mut self, cpf: impl Into<String>) -> Self {
        self.cpf = cpf.into();
        self
    }

    /// Sets the e-mail
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Sets the amount
    pub fn amount(mut self, amount: Decimal) -> Self {
        self.amount = amount;
        self
    }

    /// Sets the number of installments
    pub fn installments(mut self, installments: u32) -> Self {
        self.installments = installments;
        self
    }

    /// Sets the insurance flag
    pub fn insurance(mut self, insurance: bool) -> Self {
        self.insurance = insurance;
        self
    }

    /// Builds the simulation
    pub fn build(self) -> Simulation {
        Simulation {
            name: self.name,
            cpf: self.cpf,
            email: self.email,
            amount: self.amount,
            installments: self.installments,
            insurance: self.insurance,
        }
    }
}

impl From<Simulation> for SimulationBuilder {
    fn from(simulation: Simulation) -> Self {
        Self {
            name: simulation.name,
            cpf: simulation.cpf,
            email: simulation.email,
            amount: simulation.amount,
            installments: simulation.installments,
            insurance: simulation.insurance,
        }
    }
}
