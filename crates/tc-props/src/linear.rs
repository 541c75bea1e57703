//! Constant specific heat enthalpy model.

use crate::error::{PropsError, PropsResult};
use crate::model::EnthalpyModel;

/// Enthalpy with a frozen specific heat capacity:
///
/// ```text
/// h(T) = h_ref + cp * (T - T_ref)
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearEnthalpy {
    /// Specific heat capacity at constant pressure [J/(kg·K)]
    pub cp: f64,
    /// Reference temperature [K]
    pub t_ref: f64,
    /// Enthalpy at the reference temperature [J/kg]
    pub h_ref: f64,
}

impl LinearEnthalpy {
    pub fn new(cp: f64, t_ref: f64, h_ref: f64) -> PropsResult<Self> {
        if !cp.is_finite() || cp <= 0.0 {
            return Err(PropsError::NonPhysical {
                what: "cp must be positive and finite",
            });
        }
        if !t_ref.is_finite() || !h_ref.is_finite() {
            return Err(PropsError::InvalidArg {
                what: "reference state must be finite",
            });
        }
        Ok(Self { cp, t_ref, h_ref })
    }

    /// Closed-form inverse, `T(h) = T_ref + (h - h_ref) / cp`.
    pub fn temperature(&self, h: f64) -> f64 {
        self.t_ref + (h - self.h_ref) / self.cp
    }
}

impl EnthalpyModel for LinearEnthalpy {
    fn enthalpy(&self, temperature: f64) -> f64 {
        self.h_ref + self.cp * (temperature - self.t_ref)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enthalpy_at_reference() {
        let model = LinearEnthalpy::new(5000.0, 273.15, 1.0e5).unwrap();
        assert!((model.enthalpy(273.15) - 1.0e5).abs() < 1e-9);
        assert!((model.enthalpy(283.15) - 1.5e5).abs() < 1e-6);
    }

    #[test]
    fn temperature_inverts_enthalpy() {
        let model = LinearEnthalpy::new(4186.0, 273.15, 0.0).unwrap();
        let h = model.enthalpy(573.15);
        assert!((model.temperature(h) - 573.15).abs() < 1e-9);
    }

    #[test]
    fn rejects_non_positive_cp() {
        assert!(LinearEnthalpy::new(0.0, 273.15, 0.0).is_err());
        assert!(LinearEnthalpy::new(-1.0, 273.15, 0.0).is_err());
        assert!(LinearEnthalpy::new(f64::NAN, 273.15, 0.0).is_err());
    }
}
