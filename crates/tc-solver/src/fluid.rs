//! Channel solves.
//!
//! Transient balance for cell `i` (explicit upwind advection from the old level,
//! exchange evaluated with the current fluid temperature):
//!
//! ```text
//! h_i = h_old_i + dt/ρ · ( -u ρ (h_old_i - h_old_{i-1}) / dz + q_i (Ts_i - Tf_i) )
//! ```
//!
//! Stationary balance, a forward substitution along the channel:
//!
//! ```text
//! h_i = h_{i-1} + dz / (u ρ) · q_i (Ts_i - Tf_i)
//! ```
//!
//! where `q_i` is the volumetric exchange coefficient at the solid temperature.
//! Both are swept until the largest temperature change drops below the channel
//! precision; the last residual is stored whether or not that happens.

use crate::domain::FluidDomain;
use crate::error::{SolverError, SolverResult};
use crate::fixed_point::{IterationReport, fixed_point};
use tc_props::{InversionConfig, temperature_from_enthalpy};

fn check_lengths(fluid: &FluidDomain, solid_temperatures: &[f64]) -> SolverResult<()> {
    let expected = fluid.state.temperatures_current.len();
    if solid_temperatures.len() != expected {
        return Err(SolverError::LengthMismatch {
            what: "solid temperatures",
            expected,
            got: solid_temperatures.len(),
        });
    }
    Ok(())
}

/// One implicit-in-exchange time step of a channel against a frozen solid profile.
pub fn solve_time_step(
    fluid: &mut FluidDomain,
    dt: f64,
    dz: f64,
    solid_temperatures: &[f64],
    inversion: &InversionConfig,
) -> SolverResult<IterationReport> {
    check_lengths(fluid, solid_temperatures)?;

    let exchange: Vec<f64> = solid_temperatures
        .iter()
        .map(|&t| fluid.volumetric_exchange(t))
        .collect();
    let model = fluid.enthalpy_model().clone();
    let enthalpies_old: Vec<f64> = fluid
        .state
        .temperatures_old
        .iter()
        .map(|&t| model.enthalpy(t))
        .collect();

    let state = &mut fluid.state;
    let (density, speed) = (state.density, state.speed);
    let (precision, max_iter) = (state.params.precision, state.params.max_iter);
    let temperatures = &mut state.temperatures_current;

    let report = fixed_point(precision, max_iter, || {
        let mut residual: f64 = 0.0;
        for i in 1..enthalpies_old.len() {
            let advection =
                -speed * density * (enthalpies_old[i] - enthalpies_old[i - 1]) / dz;
            let transfer = exchange[i] * (solid_temperatures[i] - temperatures[i]);
            let enthalpy = enthalpies_old[i] + dt / density * (advection + transfer);
            let updated =
                temperature_from_enthalpy(model.as_ref(), enthalpy, temperatures[i], inversion)?;
            residual = residual.max((updated - temperatures[i]).abs());
            temperatures[i] = updated;
        }
        Ok(residual)
    })?;

    state.params.residual = report.residual;
    Ok(report)
}

/// Stationary channel profile against a frozen solid profile.
pub fn solve_stationary(
    fluid: &mut FluidDomain,
    dz: f64,
    solid_temperatures: &[f64],
    inversion: &InversionConfig,
) -> SolverResult<IterationReport> {
    check_lengths(fluid, solid_temperatures)?;

    let mass_flux = fluid.state.speed * fluid.state.density;
    if !mass_flux.is_finite() || mass_flux <= 0.0 {
        return Err(SolverError::InvalidState {
            what: format!("stationary channel needs a positive mass flux (got {mass_flux})"),
        });
    }

    let exchange: Vec<f64> = solid_temperatures
        .iter()
        .map(|&t| fluid.volumetric_exchange(t))
        .collect();
    let model = fluid.enthalpy_model().clone();
    let mut enthalpies: Vec<f64> = fluid
        .state
        .temperatures_current
        .iter()
        .map(|&t| model.enthalpy(t))
        .collect();

    let state = &mut fluid.state;
    let (precision, max_iter) = (state.params.precision, state.params.max_iter);
    let temperatures = &mut state.temperatures_current;

    let report = fixed_point(precision, max_iter, || {
        let mut residual: f64 = 0.0;
        for i in 1..enthalpies.len() {
            enthalpies[i] = enthalpies[i - 1]
                + dz / mass_flux * exchange[i] * (solid_temperatures[i] - temperatures[i]);
            let updated = temperature_from_enthalpy(
                model.as_ref(),
                enthalpies[i],
                temperatures[i],
                inversion,
            )?;
            residual = residual.max((updated - temperatures[i]).abs());
            temperatures[i] = updated;
        }
        Ok(residual)
    })?;

    state.params.residual = report.residual;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tc_props::{ConstantExchange, LinearEnthalpy};

    const CP: f64 = 5.0e3;

    fn channel(num_cells: usize, inlet: f64) -> FluidDomain {
        let mut fluid = FluidDomain::new(
            num_cells,
            0.01,
            Arc::new(LinearEnthalpy::new(CP, 273.15, 0.0).unwrap()),
            Arc::new(ConstantExchange::new(1.0e3).unwrap()),
        );
        fluid.state.density = 1000.0;
        fluid.state.speed = 1.0;
        fluid.state.temperatures_current = vec![inlet; num_cells + 1];
        fluid.state.temperatures_old = vec![inlet; num_cells + 1];
        fluid
    }

    #[test]
    fn isothermal_channel_stays_put() {
        let mut fluid = channel(5, 573.15);
        let solid = vec![573.15; 6];
        let report =
            solve_time_step(&mut fluid, 0.05, 0.1, &solid, &InversionConfig::default()).unwrap();
        assert!(report.converged);
        for t in &fluid.state.temperatures_current {
            assert!((t - 573.15).abs() < 1e-9);
        }
    }

    #[test]
    fn hot_solid_heats_channel() {
        let mut fluid = channel(5, 573.15);
        let solid = vec![673.15; 6];
        let report =
            solve_time_step(&mut fluid, 0.05, 0.1, &solid, &InversionConfig::default()).unwrap();
        assert!(report.converged);
        assert_eq!(fluid.state.params.residual, report.residual);
        for t in &fluid.state.temperatures_current[1..] {
            assert!(*t > 573.15);
        }
        assert_eq!(fluid.state.temperatures_current[0], 573.15);
    }

    #[test]
    fn stationary_profile_increases_downstream() {
        let mut fluid = channel(10, 573.15);
        let solid = vec![673.15; 11];
        let report =
            solve_stationary(&mut fluid, 0.1, &solid, &InversionConfig::default()).unwrap();
        assert!(report.converged);
        let t = &fluid.state.temperatures_current;
        for i in 1..t.len() {
            assert!(t[i] > t[i - 1]);
            assert!(t[i] < 673.15);
        }
    }

    #[test]
    fn stationary_needs_flow() {
        let mut fluid = channel(3, 573.15);
        fluid.state.speed = 0.0;
        let solid = vec![600.0; 4];
        let err =
            solve_stationary(&mut fluid, 0.1, &solid, &InversionConfig::default()).unwrap_err();
        assert!(matches!(err, SolverError::InvalidState { .. }));
    }

    #[test]
    fn residual_is_stored_without_convergence() {
        let mut fluid = channel(5, 573.15);
        fluid.state.params.max_iter = 1;
        let solid = vec![873.15; 6];
        let report =
            solve_time_step(&mut fluid, 0.05, 0.1, &solid, &InversionConfig::default()).unwrap();
        assert_eq!(report.iterations, 1);
        assert!(!report.converged);
        assert_eq!(fluid.state.params.residual, report.residual);
    }

    #[test]
    fn mismatched_solid_profile_is_rejected() {
        let mut fluid = channel(5, 573.15);
        let err = solve_time_step(&mut fluid, 0.05, 0.1, &[600.0; 3], &InversionConfig::default())
            .unwrap_err();
        assert!(matches!(err, SolverError::LengthMismatch { .. }));
    }
}
