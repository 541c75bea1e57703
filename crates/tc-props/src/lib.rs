//! tc-props: property functions consumed by the two-channel solver.
//!
//! Provides:
//! - `EnthalpyModel` (specific enthalpy as a function of temperature)
//! - `ExchangeModel` (fluid/solid heat-transfer coefficient as a function of solid temperature)
//! - Enthalpy inversion (temperature from a target enthalpy)
//! - A few concrete models: constant cp, tabulated, constant and series exchange
//!
//! # Architecture
//!
//! The solver never looks inside a property model. Anything implementing the two
//! traits can be plugged in, including plain closures:
//!
//! ```
//! use tc_props::{EnthalpyModel, InversionConfig, temperature_from_enthalpy};
//!
//! let water = |t: f64| 4200.0 * (t - 273.15);
//! let t = temperature_from_enthalpy(&water, 4200.0 * 300.0, 500.0, &InversionConfig::default())
//!     .unwrap();
//! assert!((t - 573.15).abs() < 1e-6);
//! ```

pub mod error;
pub mod exchange;
pub mod inversion;
pub mod linear;
pub mod model;
pub mod tabulated;

pub use error::{PropsError, PropsResult};
pub use exchange::{ConstantExchange, LinearConductivity, SeriesExchange};
pub use inversion::{InversionConfig, temperature_from_enthalpy};
pub use linear::LinearEnthalpy;
pub use model::{EnthalpyModel, ExchangeModel, SharedEnthalpy, SharedExchange};
pub use tabulated::TabulatedEnthalpy;
