//! Simulation validation rules
//!
//! The rules and messages the credit simulations API applies to create and
//! update payloads. Failures are keyed by field path.
//!
//! # Rules
//!
//! - `name` must not be empty or blank
//! - `email` must be a valid address
//! - `amount` must lie within [1000, 40000]
//! - `installments` must lie within [2, 48]

use std::borrow::Cow;
use std::collections::BTreeMap;

use domain_simulation::Simulation;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use validator::{Validate, ValidationError};

pub const NAME_EMPTY: &str = "Name cannot be empty";
pub const EMAIL_INVALID: &str = "E-mail must be valid";
pub const AMOUNT_BELOW_MINIMUM: &str = "Amount must be equal or greater than $ 1.000";
pub const AMOUNT_ABOVE_MAXIMUM: &str = "Amount must be equal or less than than $ 40.000";
pub const INSTALLMENTS_BELOW_MINIMUM: &str = "Installments must be equal or greater than 2";
pub const INSTALLMENTS_ABOVE_MAXIMUM: &str = "Installments must be equal or less than 48";

const MIN_AMOUNT: Decimal = dec!(1000);
const MAX_AMOUNT: Decimal = dec!(40000);
const MIN_INSTALLMENTS: u32 = 2;
const MAX_INSTALLMENTS: u32 = 48;

/// Text fields checked through `validator`
#[derive(Debug, Validate)]
struct ContactFields {
    #[validate(custom(function = "not_blank", message = "Name cannot be empty"))]
    name: String,
    #[validate(email(message = "E-mail must be valid"))]
    email: String,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("blank");
        error.message = Some(Cow::from(NAME_EMPTY));
        return Err(error);
    }
    Ok(())
}

/// Returns one message per rejected field; empty when the payload is valid
pub fn validation_errors(simulation: &Simulation) -> BTreeMap<String, String> {
    let mut errors = BTreeMap::new();

    let contact = ContactFields {
        name: simulation.name.clone(),
        email: simulation.email.clone(),
    };
    if let Err(failures) = contact.validate() {
        for (field, field_errors) in failures.field_errors() {
            if let Some(message) = field_errors.first().and_then(|e| e.message.as_ref()) {
                errors.insert(field.to_string(), message.to_string());
            }
        }
    }

    if simulation.amount < MIN_AMOUNT {
        errors.insert("amount".to_string(), AMOUNT_BELOW_MINIMUM.to_string());
    } else if simulation.amount > MAX_AMOUNT {
        errors.insert("amount".to_string(), AMOUNT_ABOVE_MAXIMUM.to_string());
    }

    if simulation.installments < MIN_INSTALLMENTS {
        errors.insert("installments".to_string(), INSTALLMENTS_BELOW_MINIMUM.to_string());
    } else if simulation.installments > MAX_INSTALLMENTS {
        errors.insert("installments".to_string(), INSTALLMENTS_ABOVE_MAXIMUM.to_string());
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::SimulationDataFactory;
    use domain_simulation::SimulationBuilder;

    #[test]
    fn test_bounds_are_inclusive() {
        let lowest = SimulationBuilder::from(SimulationDataFactory::valid_simulation())
            .amount(dec!(1000))
            .installments(2)
            .build();
        let highest = SimulationBuilder::from(SimulationDataFactory::valid_simulation())
            .amount(dec!(40000))
            .installments(48)
            .build();

        assert!(validation_errors(&lowest).is_empty());
        assert!(validation_errors(&highest).is_empty());
    }

    #[test]
    fn test_whitespace_only_name_is_rejected() {
        let simulation = SimulationBuilder::from(SimulationDataFactory::valid_simulation())
            .name("   ")
            .build();
        let errors = validation_errors(&simulation);

        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("name").map(String::as_str), Some(NAME_EMPTY));
    }

    #[test]
    fn test_reports_every_failing_field() {
        let simulation = SimulationBuilder::new().cpf("66414919004").build();
        let errors = validation_errors(&simulation);

        assert_eq!(errors.get("name").map(String::as_str), Some(NAME_EMPTY));
        assert_eq!(errors.get("email").map(String::as_str), Some(EMAIL_INVALID));
        assert_eq!(errors.get("amount").map(String::as_str), Some(AMOUNT_BELOW_MINIMUM));
        assert_eq!(
            errors.get("installments").map(String::as_str),
            Some(INSTALLMENTS_BELOW_MINIMUM)
        );
    }
}
