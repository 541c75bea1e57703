//! Solid solves.
//!
//! Per cell, with `h1`, `h2` the volumetric exchange coefficients evaluated at the
//! current solid temperature and `C` the volumetric heat capacity:
//!
//! ```text
//! transient:  T = (T_old + dt/C (h1 Tf1 + h2 Tf2 + p)) / (1 + dt/C (h1 + h2))
//! stationary: T = (h1 Tf1 + h2 Tf2 + p) / (h1 + h2)
//! ```
//!
//! The coefficients depend on `T`, so the update is swept to a fixed point.

use crate::domain::SolidDomain;
use crate::error::{SolverError, SolverResult};
use crate::fixed_point::{IterationReport, fixed_point};

fn check_lengths(solid: &SolidDomain, fluid_1: &[f64], fluid_2: &[f64]) -> SolverResult<()> {
    let expected = solid.state.temperatures_current.len();
    for got in [fluid_1.len(), fluid_2.len()] {
        if got != expected {
            return Err(SolverError::LengthMismatch {
                what: "fluid temperatures",
                expected,
                got,
            });
        }
    }
    Ok(())
}

pub fn solve_time_step(
    solid: &mut SolidDomain,
    dt: f64,
    fluid_1: &[f64],
    fluid_2: &[f64],
) -> SolverResult<IterationReport> {
    check_lengths(solid, fluid_1, fluid_2)?;

    let domain = &*solid;
    let state = &domain.state;
    let ratio = dt / state.vol_heat_capacity;
    let (precision, max_iter) = (state.params.precision, state.params.max_iter);
    let mut temperatures = state.temperatures_current.clone();

    let report = fixed_point(precision, max_iter, || {
        let mut residual: f64 = 0.0;
        for i in 1..temperatures.len() {
            let (h1, h2) = domain.volumetric_exchange(temperatures[i]);
            let updated = (state.temperatures_old[i]
                + ratio * (h1 * fluid_1[i] + h2 * fluid_2[i] + state.vol_powers[i]))
                / (1.0 + ratio * (h1 + h2));
            residual = residual.max((updated - temperatures[i]).abs());
            temperatures[i] = updated;
        }
        Ok(residual)
    })?;

    solid.state.temperatures_current = temperatures;
    solid.state.params.residual = report.residual;
    Ok(report)
}

pub fn solve_stationary(
    solid: &mut SolidDomain,
    fluid_1: &[f64],
    fluid_2: &[f64],
) -> SolverResult<IterationReport> {
    check_lengths(solid, fluid_1, fluid_2)?;

    let domain = &*solid;
    let state = &domain.state;
    let (precision, max_iter) = (state.params.precision, state.params.max_iter);
    let mut temperatures = state.temperatures_current.clone();

    let report = fixed_point(precision, max_iter, || {
        let mut residual: f64 = 0.0;
        for i in 1..temperatures.len() {
            let (h1, h2) = domain.volumetric_exchange(temperatures[i]);
            if h1 + h2 <= 0.0 {
                return Err(SolverError::InvalidState {
                    what: format!("solid cell {i} exchanges no heat with either channel"),
                });
            }
            let updated =
                (h1 * fluid_1[i] + h2 * fluid_2[i] + state.vol_powers[i]) / (h1 + h2);
            residual = residual.max((updated - temperatures[i]).abs());
            temperatures[i] = updated;
        }
        Ok(residual)
    })?;

    solid.state.temperatures_current = temperatures;
    solid.state.params.residual = report.residual;
    Ok(report)
}
