//! Block Gauss-Seidel coupling of the two channels and the solid.

use crate::domain::{DomainState, FluidDomain, IterationParams, SolidDomain};
use crate::error::{SolverError, SolverResult};
use crate::fixed_point::{IterationReport, fixed_point};
use crate::setup::{ChannelSetup, Geometry, SolverSetup};
use crate::{fluid, solid};
use tc_core::max_abs_diff;
use tc_props::InversionConfig;
use tracing::debug;

/// Owner of the three domains and of the outer loop controls.
#[derive(Clone, Debug)]
pub struct CoupledSolver {
    geometry: Geometry,
    inversion: InversionConfig,
    pub fluid_1: FluidDomain,
    pub fluid_2: FluidDomain,
    pub solid: SolidDomain,
    pub coupling: IterationParams,
}

fn build_channel(geometry: &Geometry, setup: &ChannelSetup, params: IterationParams) -> FluidDomain {
    let mut channel = FluidDomain::new(
        geometry.num_cells,
        setup.thickness.value,
        setup.enthalpy.clone(),
        setup.exchange.clone(),
    );
    channel.state.density = setup.density.value;
    channel.state.speed = setup.speed.value;
    channel.state.params = params;
    channel.set_inlet_temperature(setup.inlet_temperature.value);
    channel
}

impl CoupledSolver {
    /// Build the three domains, uniform power in the solid and initial profiles
    /// (channels at their inlet temperature, solid at the channel mean).
    pub fn new(setup: &SolverSetup) -> SolverResult<Self> {
        let geometry = setup.validate()?;

        let fluid_1 = build_channel(&geometry, &setup.fluid_1, setup.numerics.fluid_1);
        let fluid_2 = build_channel(&geometry, &setup.fluid_2, setup.numerics.fluid_2);

        let mut solid = SolidDomain::new(
            geometry.num_cells,
            setup.solid.thickness.value,
            setup.fluid_1.exchange.clone(),
            setup.fluid_2.exchange.clone(),
        );
        solid.state.vol_heat_capacity = setup.solid.vol_heat_capacity;
        solid.state.params = setup.numerics.solid;

        let mut solver = Self {
            geometry,
            inversion: InversionConfig::default(),
            fluid_1,
            fluid_2,
            solid,
            coupling: setup.numerics.coupling,
        };

        let cell_power = setup.solid.total_power.value / geometry.num_cells as f64;
        solver.set_powers(&vec![cell_power; geometry.num_cells])?;
        solver.initialize_temperatures();
        Ok(solver)
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn num_cells(&self) -> usize {
        self.geometry.num_cells
    }

    pub fn set_inversion(&mut self, inversion: InversionConfig) {
        self.inversion = inversion;
    }

    pub fn set_fluid_1_inlet_temperature(&mut self, value: f64) {
        self.fluid_1.set_inlet_temperature(value);
    }

    pub fn set_fluid_2_inlet_temperature(&mut self, value: f64) {
        self.fluid_2.set_inlet_temperature(value);
    }

    /// Set the power [W] deposited in each of the `N` cells.
    pub fn set_powers(&mut self, values: &[f64]) -> SolverResult<()> {
        let num_cells = self.num_cells();
        if values.len() != num_cells {
            return Err(SolverError::LengthMismatch {
                what: "cell powers",
                expected: num_cells,
                got: values.len(),
            });
        }
        let cell_volume = self.geometry.dz * self.geometry.dy * self.solid.thickness();
        for (dst, value) in self.solid.state.vol_powers[1..].iter_mut().zip(values) {
            *dst = value / cell_volume;
        }
        Ok(())
    }

    /// Power [W] per cell, the inverse of [`Self::set_powers`].
    pub fn powers(&self) -> Vec<f64> {
        let cell_volume = self.geometry.dz * self.geometry.dy * self.solid.thickness();
        self.solid.state.vol_powers[1..]
            .iter()
            .map(|p| p * cell_volume)
            .collect()
    }

    /// Fill the channels with their inlet temperature and the solid with the
    /// channel mean. Old levels are aligned with the current ones.
    pub fn initialize_temperatures(&mut self) {
        let inlet_1 = self.fluid_1.inlet_temperature();
        let inlet_2 = self.fluid_2.inlet_temperature();
        for i in 1..=self.num_cells() {
            self.fluid_1.state.temperatures_current[i] = inlet_1;
            self.fluid_2.state.temperatures_current[i] = inlet_2;
            self.solid.state.temperatures_current[i] = 0.5 * (inlet_1 + inlet_2);
        }
        self.validate();
    }

    pub fn solve_fluid_1_time_step(&mut self, dt: f64) -> SolverResult<IterationReport> {
        fluid::solve_time_step(
            &mut self.fluid_1,
            dt,
            self.geometry.dz,
            &self.solid.state.temperatures_current,
            &self.inversion,
        )
    }

    pub fn solve_fluid_2_time_step(&mut self, dt: f64) -> SolverResult<IterationReport> {
        fluid::solve_time_step(
            &mut self.fluid_2,
            dt,
            self.geometry.dz,
            &self.solid.state.temperatures_current,
            &self.inversion,
        )
    }

    pub fn solve_solid_time_step(&mut self, dt: f64) -> SolverResult<IterationReport> {
        solid::solve_time_step(
            &mut self.solid,
            dt,
            &self.fluid_1.state.temperatures_current,
            &self.fluid_2.state.temperatures_current,
        )
    }

    pub fn solve_fluid_1_stationary(&mut self) -> SolverResult<IterationReport> {
        fluid::solve_stationary(
            &mut self.fluid_1,
            self.geometry.dz,
            &self.solid.state.temperatures_current,
            &self.inversion,
        )
    }

    pub fn solve_fluid_2_stationary(&mut self) -> SolverResult<IterationReport> {
        fluid::solve_stationary(
            &mut self.fluid_2,
            self.geometry.dz,
            &self.solid.state.temperatures_current,
            &self.inversion,
        )
    }

    pub fn solve_solid_stationary(&mut self) -> SolverResult<IterationReport> {
        solid::solve_stationary(
            &mut self.solid,
            &self.fluid_1.state.temperatures_current,
            &self.fluid_2.state.temperatures_current,
        )
    }

    /// Couple the three domains over one time step of size `dt`.
    pub fn solve_time_step(&mut self, dt: f64) -> SolverResult<IterationReport> {
        self.couple(|solver| {
            solver.solve_fluid_1_time_step(dt)?;
            solver.solve_fluid_2_time_step(dt)?;
            solver.solve_solid_time_step(dt)?;
            Ok(())
        })
    }

    /// Couple the three domains to a stationary state.
    pub fn solve_stationary(&mut self) -> SolverResult<IterationReport> {
        self.couple(|solver| {
            solver.solve_fluid_1_stationary()?;
            solver.solve_fluid_2_stationary()?;
            solver.solve_solid_stationary()?;
            Ok(())
        })
    }

    /// Outer loop: run `pass` until the solid profile moves less than the
    /// coupling precision between two passes.
    fn couple<F>(&mut self, mut pass: F) -> SolverResult<IterationReport>
    where
        F: FnMut(&mut Self) -> SolverResult<()>,
    {
        let IterationParams {
            precision,
            max_iter,
            ..
        } = self.coupling;
        let mut previous = self.solid.state.temperatures_current.clone();
        let mut outer = 0;

        let report = fixed_point(precision, max_iter, || {
            previous.copy_from_slice(&self.solid.state.temperatures_current);
            pass(&mut *self)?;
            let residual = max_abs_diff(&previous, &self.solid.state.temperatures_current);
            outer += 1;
            debug!(outer, residual, "coupling iteration");
            Ok(residual)
        })?;

        self.coupling.residual = report.residual;
        Ok(report)
    }

    pub fn validate_fluid_1(&mut self) {
        self.fluid_1.state.validate();
    }

    pub fn validate_fluid_2(&mut self) {
        self.fluid_2.state.validate();
    }

    pub fn validate_solid(&mut self) {
        self.solid.state.validate();
    }

    pub fn validate(&mut self) {
        self.validate_fluid_1();
        self.validate_fluid_2();
        self.validate_solid();
    }

    pub fn is_stationary(&self, precision: f64) -> bool {
        self.fluid_1.state.is_stationary(precision)
            && self.fluid_2.state.is_stationary(precision)
            && self.solid.state.is_stationary(precision)
    }
}
