//! Coupled solver for two flowing channels separated by a heated solid.
//!
//! Each domain (channel 1, channel 2, solid) owns a 1-D row of `N + 1` cells where
//! index 0 is the channel inlet (or an unused placeholder for the solid). Channels
//! are solved in specific enthalpy and converted back to temperature through
//! [`tc_props::temperature_from_enthalpy`]; the solid is an algebraic balance of the
//! two wall fluxes and a volumetric source. A block Gauss-Seidel loop couples the
//! three domains for either one time step or a stationary state.
//!
//! Non-convergence is reported through [`IterationReport`], never as an error.
//! Errors are reserved for root-finder failures and invalid states.

pub mod coupling;
pub mod domain;
pub mod error;
pub mod fixed_point;
pub mod fluid;
pub mod setup;
pub mod solid;

pub use coupling::CoupledSolver;
pub use domain::{DomainState, FluidDomain, FluidState, IterationParams, SolidDomain, SolidState};
pub use error::{SolverError, SolverResult};
pub use fixed_point::{IterationReport, fixed_point};
pub use setup::{ChannelSetup, Geometry, NumericsSetup, SolidSetup, SolverSetup};
