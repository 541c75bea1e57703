//! Stationary coupled solves.

mod common;

use common::{INLET, channel_heat_gain, reference_setup, symmetric_setup};
use tc_core::units::watts;
use tc_solver::CoupledSolver;

#[test]
fn symmetric_unheated_channels_stay_identical() {
    let mut solver = CoupledSolver::new(&symmetric_setup(20)).unwrap();
    let report = solver.solve_stationary().unwrap();
    assert!(report.converged);

    let precision = solver.coupling.precision;
    for i in 0..=20 {
        let f1 = solver.fluid_1.state.temperatures_current[i];
        let f2 = solver.fluid_2.state.temperatures_current[i];
        assert!((f1 - f2).abs() <= precision, "cell {i}: {f1} vs {f2}");
        assert!((f1 - INLET).abs() <= precision, "cell {i}: {f1}");
    }
    for i in 1..=20 {
        let s = solver.solid.state.temperatures_current[i];
        assert!((s - INLET).abs() <= precision, "cell {i}: {s}");
    }
}

#[test]
fn symmetric_heated_channels_stay_identical() {
    let mut setup = symmetric_setup(20);
    setup.solid.total_power = watts(2.0e5);
    let mut solver = CoupledSolver::new(&setup).unwrap();
    assert!(solver.solve_stationary().unwrap().converged);

    for i in 1..=20 {
        let f1 = solver.fluid_1.state.temperatures_current[i];
        let f2 = solver.fluid_2.state.temperatures_current[i];
        assert!((f1 - f2).abs() < 1e-6, "cell {i}: {f1} vs {f2}");
        assert!(solver.solid.state.temperatures_current[i] > f1);
    }
}

#[test]
fn stationary_energy_balance_closes() {
    let setup = reference_setup();
    let mut solver = CoupledSolver::new(&setup).unwrap();
    let report = solver.solve_stationary().unwrap();
    assert!(report.converged, "residual {}", report.residual);

    let gain_1 = channel_heat_gain(1.0, 0.01, 1.0, &solver.fluid_1.state.temperatures_current);
    let gain_2 = channel_heat_gain(
        1.0 / 3.0,
        0.03,
        1.0,
        &solver.fluid_2.state.temperatures_current,
    );
    let total = gain_1 + gain_2;
    assert!(
        ((total - 1.0e6) / 1.0e6).abs() < 1e-4,
        "channels carry {total} W"
    );
    // The better-cooled side takes the larger share.
    assert!(gain_2 > gain_1);
}

#[test]
fn channel_profiles_rise_monotonically() {
    let mut solver = CoupledSolver::new(&reference_setup()).unwrap();
    solver.solve_stationary().unwrap();
    for fluid in [&solver.fluid_1, &solver.fluid_2] {
        let t = &fluid.state.temperatures_current;
        for i in 1..t.len() {
            assert!(t[i] > t[i - 1]);
        }
    }
}

#[test]
fn converged_state_is_a_fixed_point() {
    let mut solver = CoupledSolver::new(&reference_setup()).unwrap();
    assert!(solver.solve_stationary().unwrap().converged);
    solver.validate();

    let again = solver.solve_stationary().unwrap();
    assert_eq!(again.iterations, 1);
    assert!(again.residual < solver.coupling.precision);
}

#[test]
fn outer_budget_caps_iterations() {
    let mut setup = reference_setup();
    setup.numerics.coupling.max_iter = 1;
    let mut solver = CoupledSolver::new(&setup).unwrap();
    let report = solver.solve_stationary().unwrap();
    assert_eq!(report.iterations, 1);
    assert!(!report.converged);
    assert_eq!(solver.coupling.residual, report.residual);
}
