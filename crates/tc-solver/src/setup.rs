//! Construction-time description of a coupled problem.

use crate::domain::IterationParams;
use crate::error::{SolverError, SolverResult};
use tc_core::units::{Density, Length, Power, Temperature, Velocity};
use tc_props::{SharedEnthalpy, SharedExchange};

/// Mesh shared by the three domains.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    /// Number of physical cells `N`
    pub num_cells: usize,
    /// Cell pitch along the flow [m]
    pub dz: f64,
    /// Depth of the slab [m]
    pub dy: f64,
}

/// One fluid channel.
#[derive(Clone)]
pub struct ChannelSetup {
    pub thickness: Length,
    pub density: Density,
    pub speed: Velocity,
    pub inlet_temperature: Temperature,
    pub enthalpy: SharedEnthalpy,
    /// Exchange with the solid on this channel's side
    pub exchange: SharedExchange,
}

/// The heated solid.
#[derive(Debug, Clone, PartialEq)]
pub struct SolidSetup {
    pub thickness: Length,
    /// Volumetric heat capacity ρc [J/(m³·K)]
    pub vol_heat_capacity: f64,
    /// Power spread uniformly over the cells
    pub total_power: Power,
}

/// Convergence controls for each inner solve and for the coupling loop.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NumericsSetup {
    pub fluid_1: IterationParams,
    pub fluid_2: IterationParams,
    pub solid: IterationParams,
    pub coupling: IterationParams,
}

/// Everything needed to build a [`crate::CoupledSolver`].
#[derive(Clone)]
pub struct SolverSetup {
    pub num_cells: usize,
    pub dz: Length,
    pub dy: Length,
    pub fluid_1: ChannelSetup,
    pub fluid_2: ChannelSetup,
    pub solid: SolidSetup,
    pub numerics: NumericsSetup,
}

fn positive(value: f64, what: &str) -> SolverResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(SolverError::ProblemSetup {
            what: format!("{what} must be positive and finite (got {value})"),
        })
    }
}

fn non_negative(value: f64, what: &str) -> SolverResult<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(SolverError::ProblemSetup {
            what: format!("{what} must be non-negative and finite (got {value})"),
        })
    }
}

impl SolverSetup {
    /// Check the setup and return the shared mesh.
    pub fn validate(&self) -> SolverResult<Geometry> {
        if self.num_cells == 0 {
            return Err(SolverError::ProblemSetup {
                what: "at least one cell is required".to_string(),
            });
        }
        let dz = positive(self.dz.value, "dz")?;
        let dy = positive(self.dy.value, "dy")?;

        for (name, channel) in [("fluid_1", &self.fluid_1), ("fluid_2", &self.fluid_2)] {
            positive(channel.thickness.value, &format!("{name} thickness"))?;
            positive(channel.density.value, &format!("{name} density"))?;
            non_negative(channel.speed.value, &format!("{name} speed"))?;
            positive(
                channel.inlet_temperature.value,
                &format!("{name} inlet temperature"),
            )?;
        }

        positive(self.solid.thickness.value, "solid thickness")?;
        positive(self.solid.vol_heat_capacity, "solid volumetric heat capacity")?;
        non_negative(self.solid.total_power.value, "solid total power")?;

        for (name, params) in [
            ("fluid_1", &self.numerics.fluid_1),
            ("fluid_2", &self.numerics.fluid_2),
            ("solid", &self.numerics.solid),
            ("coupling", &self.numerics.coupling),
        ] {
            positive(params.precision, &format!("{name} precision"))?;
        }

        Ok(Geometry {
            num_cells: self.num_cells,
            dz,
            dy,
        })
    }
}
