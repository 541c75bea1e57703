//! Transient coupled solves.

mod common;

use common::{INLET, reference_setup};
use tc_solver::{CoupledSolver, DomainState};

#[test]
fn heating_raises_solid_step_after_step() {
    let mut solver = CoupledSolver::new(&reference_setup()).unwrap();
    let mut previous = solver.solid.state.temperatures_current[10];
    for _ in 0..5 {
        solver.validate();
        let report = solver.solve_time_step(0.05).unwrap();
        assert!(report.converged, "residual {}", report.residual);
        let current = solver.solid.state.temperatures_current[10];
        assert!(current > previous);
        previous = current;
    }
    // Inlets never move.
    assert_eq!(solver.fluid_1.state.temperatures_current[0], INLET);
    assert_eq!(solver.fluid_2.state.temperatures_current[0], INLET);
}

#[test]
fn old_level_only_moves_on_validation() {
    let mut solver = CoupledSolver::new(&reference_setup()).unwrap();
    let old = solver.solid.state.temperatures_old.clone();
    solver.solve_time_step(0.05).unwrap();
    assert_eq!(solver.solid.state.temperatures_old, old);
    assert!(solver.solid.state.change_since_validation() > 0.0);
    solver.validate_solid();
    assert_eq!(
        solver.solid.state.temperatures_old,
        solver.solid.state.temperatures_current
    );
}

#[test]
fn larger_budget_never_raises_channel_residual() {
    let mut base = CoupledSolver::new(&reference_setup()).unwrap();
    // Put the solid well above the channel so the first sweeps move a lot.
    for t in base.solid.state.temperatures_current.iter_mut().skip(1) {
        *t += 150.0;
    }

    let mut residuals = Vec::new();
    for max_iter in 1..=6 {
        let mut solver = base.clone();
        solver.fluid_1.state.params.max_iter = max_iter;
        let report = solver.solve_fluid_1_time_step(0.05).unwrap();
        residuals.push(report.residual);
    }
    for pair in residuals.windows(2) {
        assert!(pair[1] <= pair[0] + 1e-12, "{residuals:?}");
    }
}

#[test]
fn larger_budget_never_raises_coupling_residual() {
    let base = CoupledSolver::new(&reference_setup()).unwrap();
    let mut residuals = Vec::new();
    for max_iter in 1..=5 {
        let mut solver = base.clone();
        solver.coupling.max_iter = max_iter;
        residuals.push(solver.solve_stationary().unwrap().residual);
    }
    for pair in residuals.windows(2) {
        assert!(pair[1] <= pair[0] + 1e-12, "{residuals:?}");
    }
}

#[test]
fn long_transient_approaches_stationary_state() {
    let mut steady = CoupledSolver::new(&reference_setup()).unwrap();
    assert!(steady.solve_stationary().unwrap().converged);

    let mut solver = CoupledSolver::new(&reference_setup()).unwrap();
    // Light solid so the transient settles quickly.
    solver.solid.state.vol_heat_capacity = 3.0e3;
    for _ in 0..400 {
        solver.validate();
        solver.solve_time_step(0.05).unwrap();
    }

    for i in 1..=solver.num_cells() {
        let a = solver.solid.state.temperatures_current[i];
        let b = steady.solid.state.temperatures_current[i];
        assert!((a - b).abs() < 1e-2, "cell {i}: {a} vs {b}");
    }
}
