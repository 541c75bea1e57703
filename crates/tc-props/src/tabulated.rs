//! Piecewise-linear enthalpy table.

use crate::error::{PropsError, PropsResult};
use crate::model::EnthalpyModel;

/// Enthalpy interpolated from `(T, h)` points.
///
/// Outside the table the first/last segment is extrapolated. Both columns must be
/// strictly increasing so that the inversion has a unique root.
#[derive(Debug, Clone, PartialEq)]
pub struct TabulatedEnthalpy {
    temperatures: Vec<f64>,
    enthalpies: Vec<f64>,
}

impl TabulatedEnthalpy {
    pub fn new(points: &[(f64, f64)]) -> PropsResult<Self> {
        if points.len() < 2 {
            return Err(PropsError::InvalidArg {
                what: "enthalpy table needs at least two points",
            });
        }
        if points.iter().any(|(t, h)| !t.is_finite() || !h.is_finite()) {
            return Err(PropsError::InvalidArg {
                what: "enthalpy table entries must be finite",
            });
        }
        for pair in points.windows(2) {
            if pair[1].0 <= pair[0].0 {
                return Err(PropsError::InvalidArg {
                    what: "enthalpy table temperatures must be strictly increasing",
                });
            }
            if pair[1].1 <= pair[0].1 {
                return Err(PropsError::NonPhysical {
                    what: "enthalpy must increase with temperature",
                });
            }
        }

        Ok(Self {
            temperatures: points.iter().map(|(t, _)| *t).collect(),
            enthalpies: points.iter().map(|(_, h)| *h).collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.temperatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.temperatures.is_empty()
    }

    /// Index `i` of the segment `[i, i+1]` used for `temperature`.
    fn segment(&self, temperature: f64) -> usize {
        let last = self.temperatures.len() - 2;
        match self
            .temperatures
            .binary_search_by(|t| t.total_cmp(&temperature))
        {
            Ok(i) => i.min(last),
            Err(i) => i.saturating_sub(1).min(last),
        }
    }
}

impl EnthalpyModel for TabulatedEnthalpy {
    fn enthalpy(&self, temperature: f64) -> f64 {
        let i = self.segment(temperature);
        let (t0, t1) = (self.temperatures[i], self.temperatures[i + 1]);
        let (h0, h1) = (self.enthalpies[i], self.enthalpies[i + 1]);
        h0 + (h1 - h0) * (temperature - t0) / (t1 - t0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> TabulatedEnthalpy {
        TabulatedEnthalpy::new(&[(500.0, 1.0e6), (600.0, 1.5e6), (700.0, 2.2e6)]).unwrap()
    }

    #[test]
    fn hits_table_points() {
        let t = table();
        assert_eq!(t.enthalpy(500.0), 1.0e6);
        assert_eq!(t.enthalpy(600.0), 1.5e6);
        assert_eq!(t.enthalpy(700.0), 2.2e6);
    }

    #[test]
    fn interpolates_inside() {
        let t = table();
        assert!((t.enthalpy(550.0) - 1.25e6).abs() < 1e-6);
        assert!((t.enthalpy(650.0) - 1.85e6).abs() < 1e-6);
    }

    #[test]
    fn extrapolates_outside() {
        let t = table();
        assert!((t.enthalpy(450.0) - 0.75e6).abs() < 1e-6);
        assert!((t.enthalpy(750.0) - 2.55e6).abs() < 1e-6);
    }

    #[test]
    fn rejects_bad_tables() {
        assert!(TabulatedEnthalpy::new(&[(500.0, 1.0)]).is_err());
        assert!(TabulatedEnthalpy::new(&[(500.0, 1.0), (500.0, 2.0)]).is_err());
        assert!(TabulatedEnthalpy::new(&[(500.0, 2.0), (600.0, 1.0)]).is_err());
        assert!(TabulatedEnthalpy::new(&[(500.0, 1.0), (f64::NAN, 2.0)]).is_err());
    }
}
