//! Property model traits.

use std::sync::Arc;

/// Specific enthalpy [J/kg] as a function of temperature [K].
///
/// Implementations must be pure: the same temperature always gives the same value.
pub trait EnthalpyModel: Send + Sync {
    fn enthalpy(&self, temperature: f64) -> f64;
}

/// Fluid/solid heat-transfer coefficient [W/(m²·K)] as a function of the local
/// solid temperature [K].
pub trait ExchangeModel: Send + Sync {
    fn coefficient(&self, solid_temperature: f64) -> f64;
}

impl<F> EnthalpyModel for F
where
    F: Fn(f64) -> f64 + Send + Sync,
{
    fn enthalpy(&self, temperature: f64) -> f64 {
        self(temperature)
    }
}

impl<F> ExchangeModel for F
where
    F: Fn(f64) -> f64 + Send + Sync,
{
    fn coefficient(&self, solid_temperature: f64) -> f64 {
        self(solid_temperature)
    }
}

/// Shared handle to an enthalpy model (both channels usually carry the same fluid).
pub type SharedEnthalpy = Arc<dyn EnthalpyModel>;

/// Shared handle to an exchange model (read by a fluid channel and by the solid).
pub type SharedExchange = Arc<dyn ExchangeModel>;
