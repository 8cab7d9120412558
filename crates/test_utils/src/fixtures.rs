//! Pre-built Test Fixtures
//!
//! Fixed simulation data. The stub API is seeded from
//! `SimulationDataFactory::all_existing_simulations`, so "existing" and
//! "non-existent" hold by construction rather than by assumption about an
//! external system.

use domain_simulation::{Simulation, SimulationBuilder};
use rust_decimal_macros::dec;

use crate::validation::{
    AMOUNT_ABOVE_MAXIMUM, AMOUNT_BELOW_MINIMUM, EMAIL_INVALID, INSTALLMENTS_ABOVE_MAXIMUM,
    INSTALLMENTS_BELOW_MINIMUM, NAME_EMPTY,
};

/// Fixture for simulation test data
pub struct SimulationDataFactory;

impl SimulationDataFactory {
    /// A simulation present in the seeded data
    pub fn one_existing_simulation() -> Simulation {
        SimulationBuilder::new()
            .name("Tiago")
            .cpf("66414919004")
            .email("tiago@email.com")
            .amount(dec!(11000.00))
            .installments(3)
            .insurance(true)
            .build()
    }

    /// A second seeded simulation, distinct from `one_existing_simulation`
    pub fn another_existing_simulation() -> Simulation {
        SimulationBuilder::new()
            .name("Vivian")
            .cpf("17822386034")
            .email("vivian@email.com")
            .amount(dec!(20000.00))
            .installments(5)
            .insurance(false)
            .build()
    }

    /// Every seeded simulation
    pub fn all_existing_simulations() -> Vec<Simulation> {
        vec![
            Self::one_existing_simulation(),
            Self::another_existing_simulation(),
        ]
    }

    /// A CPF no seeded simulation uses
    pub fn not_existent_cpf() -> String {
        "12345678909".to_string()
    }

    /// A simulation passing every validation rule, under a CPF that is not seeded
    pub fn valid_simulation() -> Simulation {
        SimulationBuilder::new()
            .name("Maria Souza")
            .cpf("52998224725")
            .email("maria.souza@email.com")
            .amount(dec!(15000.00))
            .installments(10)
            .insurance(false)
            .build()
    }

    /// A valid simulation to create
    pub fn new_simulation() -> Simulation {
        SimulationBuilder::new()
            .name("Elias")
            .cpf("98765432109")
            .email("elias@elias.com")
            .amount(dec!(30000.00))
            .installments(5)
            .insurance(true)
            .build()
    }
}

/// Payloads rejected by the API's validation, one per rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidScenario {
    EmptyName,
    BlankName,
    InvalidEmail,
    AmountBelowMinimum,
    AmountAboveMaximum,
    InstallmentsBelowMinimum,
    InstallmentsAboveMaximum,
}

impl InvalidScenario {
    pub const ALL: [InvalidScenario; 7] = [
        InvalidScenario::EmptyName,
        InvalidScenario::BlankName,
        InvalidScenario::InvalidEmail,
        InvalidScenario::AmountBelowMinimum,
        InvalidScenario::AmountAboveMaximum,
        InvalidScenario::InstallmentsBelowMinimum,
        InvalidScenario::InstallmentsAboveMaximum,
    ];

    /// The invalid payload, addressed to an existing CPF
    pub fn simulation(&self) -> Simulation {
        let existing_cpf = SimulationDataFactory::one_existing_simulation().cpf;
        let builder = SimulationBuilder::from(SimulationDataFactory::valid_simulation()).cpf(existing_cpf);

        let invalid = match self {
            InvalidScenario::EmptyName => builder.name(""),
            InvalidScenario::BlankName => builder.name("   "),
            InvalidScenario::InvalidEmail => builder.email("not-an-email"),
            InvalidScenario::AmountBelowMinimum => builder.amount(dec!(999.99)),
            InvalidScenario::AmountAboveMaximum => builder.amount(dec!(40000.01)),
            InvalidScenario::InstallmentsBelowMinimum => builder.installments(1),
            InvalidScenario::InstallmentsAboveMaximum => builder.installments(49),
        };
        invalid.build()
    }

    /// Field path the API reports the failure under
    pub fn path(&self) -> &'static str {
        match self {
            InvalidScenario::EmptyName | InvalidScenario::BlankName => "name",
            InvalidScenario::InvalidEmail => "email",
            InvalidScenario::AmountBelowMinimum | InvalidScenario::AmountAboveMaximum => "amount",
            InvalidScenario::InstallmentsBelowMinimum
            | InvalidScenario::InstallmentsAboveMaximum => "installments",
        }
    }

    /// Validation message the API reports
    pub fn message(&self) -> &'static str {
        match self {
            InvalidScenario::EmptyName | InvalidScenario::BlankName => NAME_EMPTY,
            InvalidScenario::InvalidEmail => EMAIL_INVALID,
            InvalidScenario::AmountBelowMinimum => AMOUNT_BELOW_MINIMUM,
            InvalidScenario::AmountAboveMaximum => AMOUNT_ABOVE_MAXIMUM,
            InvalidScenario::InstallmentsBelowMinimum => INSTALLMENTS_BELOW_MINIMUM,
            InvalidScenario::InstallmentsAboveMaximum => INSTALLMENTS_ABOVE_MAXIMUM,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validation_errors;

    #[test]
    fn test_not_existent_cpf_is_not_seeded() {
        let cpf = SimulationDataFactory::not_existent_cpf();
        assert!(SimulationDataFactory::all_existing_simulations()
            .iter()
            .all(|s| s.cpf != cpf));
    }

    #[test]
    fn test_valid_and_new_simulations_are_not_seeded() {
        let seeded = SimulationDataFactory::all_existing_simulations();
        assert!(!seeded.iter().any(|s| s.cpf == SimulationDataFactory::valid_simulation().cpf));
        assert!(!seeded.iter().any(|s| s.cpf == SimulationDataFactory::new_simulation().cpf));
    }

    #[test]
    fn test_fixtures_pass_validation() {
        let mut simulations = SimulationDataFactory::all_existing_simulations();
        simulations.push(SimulationDataFactory::valid_simulation());
        simulations.push(SimulationDataFactory::new_simulation());

        for simulation in &simulations {
            assert!(
                validation_errors(simulation).is_empty(),
                "fixture {} should be valid",
                simulation.cpf
            );
        }
    }

    #[test]
    fn test_each_scenario_fails_only_its_own_rule() {
        for scenario in InvalidScenario::ALL {
            let errors = validation_errors(&scenario.simulation());
            assert_eq!(errors.len(), 1, "{scenario:?} should break exactly one rule");
            assert_eq!(errors.get(scenario.path()).map(String::as_str), Some(scenario.message()));
        }
    }
}
