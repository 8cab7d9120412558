//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for simulations that give
//! more meaningful error messages than standard assertions.

use std::collections::HashMap;

use domain_simulation::Simulation;

/// Asserts that every field but the CPF matches
///
/// All mismatching fields are reported together rather than stopping at the
/// first one.
///
/// # Panics
///
/// Panics if name, e-mail, amount, installments or insurance differ
pub fn assert_simulation_matches(actual: &Simulation, expected: &Simulation) {
    let mut mismatches = Vec::new();

    if actual.name != expected.name {
        mismatches.push(format!("name: actual={:?}, expected={:?}", actual.name, expected.name));
    }
    if actual.email != expected.email {
        mismatches.push(format!("email: actual={:?}, expected={:?}", actual.email, expected.email));
    }
    if actual.amount != expected.amount {
        mismatches.push(format!("amount: actual={}, expected={}", actual.amount, expected.amount));
    }
    if actual.installments != expected.installments {
        mismatches.push(format!(
            "installments: actual={}, expected={}",
            actual.installments, expected.installments
        ));
    }
    if actual.insurance != expected.insurance {
        mismatches.push(format!(
            "insurance: actual={}, expected={}",
            actual.insurance, expected.insurance
        ));
    }

    assert!(
        mismatches.is_empty(),
        "Simulation {} does not match:\n  {}",
        actual.cpf,
        mismatches.join("\n  ")
    );
}

/// Asserts that both slices hold the same simulations, ignoring order
///
/// # Panics
///
/// Panics if any simulation is missing, unexpected, or present a different
/// number of times
pub fn assert_contains_exactly_in_any_order(actual: &[Simulation], expected: &[Simulation]) {
    let mut counts: HashMap<&Simulation, isize> = HashMap::new();
    for simulation in expected {
        *counts.entry(simulation).or_default() += 1;
    }
    for simulation in actual {
        *counts.entry(simulation).or_default() -= 1;
    }

    let missing: Vec<&str> = counts
        .iter()
        .filter(|(_, count)| **count > 0)
        .map(|(simulation, _)| simulation.cpf.as_str())
        .collect();
    let unexpected: Vec<&str> = counts
        .iter()
        .filter(|(_, count)| **count < 0)
        .map(|(simulation, _)| simulation.cpf.as_str())
        .collect();

    assert!(
        missing.is_empty() && unexpected.is_empty(),
        "Simulations differ: missing={missing:?}, unexpected={unexpected:?}"
    );
}
