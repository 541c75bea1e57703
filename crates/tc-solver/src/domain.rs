//! Per-domain data: construction-time constants plus a clonable simulation state.
//!
//! The `*State` records are what the lifecycle snapshots for abort, save and
//! restore. They own their arrays, so a clone never aliases live data.

use tc_core::max_abs_diff;
use tc_props::{SharedEnthalpy, SharedExchange};

/// Convergence controls of one iterated solve, plus the residual it last reached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IterationParams {
    /// Threshold on the sweep residual (max |ΔT|)
    pub precision: f64,
    /// Maximum number of sweeps
    pub max_iter: usize,
    /// Residual of the last solve, written by the solver only
    pub residual: f64,
}

impl Default for IterationParams {
    fn default() -> Self {
        Self {
            precision: 1e-6,
            max_iter: 100,
            residual: 0.0,
        }
    }
}

impl IterationParams {
    pub fn new(precision: f64, max_iter: usize) -> Self {
        Self {
            precision,
            max_iter,
            residual: 0.0,
        }
    }
}

/// Behaviour shared by the fluid and solid simulation states.
pub trait DomainState: Clone {
    fn temperatures_current(&self) -> &[f64];
    fn temperatures_current_mut(&mut self) -> &mut Vec<f64>;
    fn temperatures_old(&self) -> &[f64];
    fn temperatures_old_mut(&mut self) -> &mut Vec<f64>;
    fn params(&self) -> &IterationParams;
    fn params_mut(&mut self) -> &mut IterationParams;
    fn present_time(&self) -> f64;
    fn set_present_time(&mut self, time: f64);

    /// Archive the current profile as the old time level.
    fn validate(&mut self) {
        let current = self.temperatures_current().to_vec();
        self.temperatures_old_mut().copy_from_slice(&current);
    }

    /// Largest change between the current and the old profile.
    fn change_since_validation(&self) -> f64 {
        max_abs_diff(self.temperatures_current(), self.temperatures_old())
    }

    fn is_stationary(&self, precision: f64) -> bool {
        self.change_since_validation() <= precision
    }
}

/// Mutable state of one fluid channel.
#[derive(Debug, Clone, PartialEq)]
pub struct FluidState {
    /// Index 0 is the inlet temperature and is never solved for
    pub temperatures_current: Vec<f64>,
    pub temperatures_old: Vec<f64>,
    /// Density [kg/m³]
    pub density: f64,
    /// Flow speed [m/s]
    pub speed: f64,
    pub params: IterationParams,
    pub present_time: f64,
}

impl FluidState {
    pub fn new(num_cells: usize) -> Self {
        Self {
            temperatures_current: vec![0.0; num_cells + 1],
            temperatures_old: vec![0.0; num_cells + 1],
            density: 1.0,
            speed: 1.0,
            params: IterationParams::default(),
            present_time: 0.0,
        }
    }
}

/// Mutable state of the solid.
#[derive(Debug, Clone, PartialEq)]
pub struct SolidState {
    /// Index 0 is a placeholder kept for uniform indexing
    pub temperatures_current: Vec<f64>,
    pub temperatures_old: Vec<f64>,
    /// Volumetric heat capacity ρc [J/(m³·K)]
    pub vol_heat_capacity: f64,
    /// Volumetric power per cell [W/m³]
    pub vol_powers: Vec<f64>,
    pub params: IterationParams,
    pub present_time: f64,
}

impl SolidState {
    pub fn new(num_cells: usize) -> Self {
        Self {
            temperatures_current: vec![0.0; num_cells + 1],
            temperatures_old: vec![0.0; num_cells + 1],
            vol_heat_capacity: 1.0,
            vol_powers: vec![0.0; num_cells + 1],
            params: IterationParams::default(),
            present_time: 0.0,
        }
    }
}

macro_rules! impl_domain_state {
    ($ty:ty) => {
        impl DomainState for $ty {
            fn temperatures_current(&self) -> &[f64] {
                &self.temperatures_current
            }
            fn temperatures_current_mut(&mut self) -> &mut Vec<f64> {
                &mut self.temperatures_current
            }
            fn temperatures_old(&self) -> &[f64] {
                &self.temperatures_old
            }
            fn temperatures_old_mut(&mut self) -> &mut Vec<f64> {
                &mut self.temperatures_old
            }
            fn params(&self) -> &IterationParams {
                &self.params
            }
            fn params_mut(&mut self) -> &mut IterationParams {
                &mut self.params
            }
            fn present_time(&self) -> f64 {
                self.present_time
            }
            fn set_present_time(&mut self, time: f64) {
                self.present_time = time;
            }
        }
    };
}

impl_domain_state!(FluidState);
impl_domain_state!(SolidState);

/// One fluid channel: geometry and property models fixed at construction,
/// plus its simulation state.
#[derive(Clone)]
pub struct FluidDomain {
    thickness: f64,
    enthalpy: SharedEnthalpy,
    exchange: SharedExchange,
    pub state: FluidState,
}

impl FluidDomain {
    pub fn new(
        num_cells: usize,
        thickness: f64,
        enthalpy: SharedEnthalpy,
        exchange: SharedExchange,
    ) -> Self {
        Self {
            thickness,
            enthalpy,
            exchange,
            state: FluidState::new(num_cells),
        }
    }

    /// Channel thickness `dx` [m]
    pub fn thickness(&self) -> f64 {
        self.thickness
    }

    pub fn enthalpy_model(&self) -> &SharedEnthalpy {
        &self.enthalpy
    }

    /// Exchange coefficient per unit channel volume [W/(m³·K)].
    pub fn volumetric_exchange(&self, solid_temperature: f64) -> f64 {
        self.exchange.coefficient(solid_temperature) / self.thickness
    }

    pub fn set_inlet_temperature(&mut self, value: f64) {
        self.state.temperatures_current[0] = value;
        self.state.temperatures_old[0] = value;
    }

    pub fn inlet_temperature(&self) -> f64 {
        self.state.temperatures_current[0]
    }
}

impl std::fmt::Debug for FluidDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FluidDomain")
            .field("thickness", &self.thickness)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

/// The solid between the channels.
#[derive(Clone)]
pub struct SolidDomain {
    thickness: f64,
    exchange_1: SharedExchange,
    exchange_2: SharedExchange,
    pub state: SolidState,
}

impl SolidDomain {
    pub fn new(
        num_cells: usize,
        thickness: f64,
        exchange_1: SharedExchange,
        exchange_2: SharedExchange,
    ) -> Self {
        Self {
            thickness,
            exchange_1,
            exchange_2,
            state: SolidState::new(num_cells),
        }
    }

    /// Solid thickness `dx` [m]
    pub fn thickness(&self) -> f64 {
        self.thickness
    }

    /// Volumetric exchange coefficients towards channel 1 and channel 2 [W/(m³·K)].
    pub fn volumetric_exchange(&self, temperature: f64) -> (f64, f64) {
        (
            self.exchange_1.coefficient(temperature) / self.thickness,
            self.exchange_2.coefficient(temperature) / self.thickness,
        )
    }
}

impl std::fmt::Debug for SolidDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SolidDomain")
            .field("thickness", &self.thickness)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
