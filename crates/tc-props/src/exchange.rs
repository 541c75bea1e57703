//! Heat-transfer coefficients between a channel and the solid.

use crate::error::{PropsError, PropsResult};
use crate::model::ExchangeModel;

/// Temperature-independent coefficient [W/(m²·K)].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantExchange {
    pub h: f64,
}

impl ConstantExchange {
    pub fn new(h: f64) -> PropsResult<Self> {
        if !h.is_finite() || h < 0.0 {
            return Err(PropsError::NonPhysical {
                what: "exchange coefficient must be non-negative and finite",
            });
        }
        Ok(Self { h })
    }
}

impl ExchangeModel for ConstantExchange {
    fn coefficient(&self, _solid_temperature: f64) -> f64 {
        self.h
    }
}

/// Solid conductivity `λ(T) = a + b·T` [W/(m·K)].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearConductivity {
    pub a: f64,
    pub b: f64,
}

impl LinearConductivity {
    pub fn at(&self, temperature: f64) -> f64 {
        self.a + self.b * temperature
    }
}

/// Wall conduction (half solid thickness) in series with a film coefficient.
///
/// ```text
/// h_solid = 2 λ(T) / e
/// h       = h_solid h_fluid / (h_solid + h_fluid)
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesExchange {
    /// Film coefficient on the fluid side [W/(m²·K)]
    pub h_fluid: f64,
    /// Solid conductivity law
    pub conductivity: LinearConductivity,
    /// Full solid thickness `e` [m]
    pub solid_thickness: f64,
}

impl SeriesExchange {
    pub fn new(
        h_fluid: f64,
        conductivity: LinearConductivity,
        solid_thickness: f64,
    ) -> PropsResult<Self> {
        if !h_fluid.is_finite() || h_fluid < 0.0 {
            return Err(PropsError::NonPhysical {
                what: "fluid film coefficient must be non-negative and finite",
            });
        }
        if !solid_thickness.is_finite() || solid_thickness <= 0.0 {
            return Err(PropsError::NonPhysical {
                what: "solid thickness must be positive and finite",
            });
        }
        if !conductivity.a.is_finite() || !conductivity.b.is_finite() {
            return Err(PropsError::InvalidArg {
                what: "conductivity coefficients must be finite",
            });
        }
        Ok(Self {
            h_fluid,
            conductivity,
            solid_thickness,
        })
    }
}

impl ExchangeModel for SeriesExchange {
    fn coefficient(&self, solid_temperature: f64) -> f64 {
        let h_solid = self.conductivity.at(solid_temperature) * 2.0 / self.solid_thickness;
        let sum = h_solid + self.h_fluid;
        if sum == 0.0 {
            return 0.0;
        }
        h_solid * self.h_fluid / sum
    }
}
