//! Temperature from specific enthalpy.
//!
//! The fluid solver works in enthalpy and converts back to temperature once per
//! interior cell and per sweep, so this routine dominates the cost of a fluid solve.
//! It is a secant-style Newton iteration with a fixed forward probe:
//!
//! ```text
//! slope = (h(T + dT) - h(T)) / dT
//! T    <- T + (h_target - h(T)) / slope
//! ```

use crate::error::{PropsError, PropsResult};
use crate::model::EnthalpyModel;

/// Inversion parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InversionConfig {
    /// Temperature probe used for the finite-difference slope [K]
    pub probe_step: f64,
    /// Absolute enthalpy tolerance [J/kg]
    pub precision: f64,
    /// Maximum number of Newton updates
    pub max_iter: usize,
}

impl Default for InversionConfig {
    fn default() -> Self {
        Self {
            probe_step: 1e-2,
            precision: 1e-6,
            max_iter: 100,
        }
    }
}

/// Find `T` such that `|h(T) - target| < precision`, starting from `guess`.
///
/// Fails with [`PropsError::InversionDiverged`] when the iteration budget is spent,
/// when the probed slope vanishes, or when the iterate stops being finite.
pub fn temperature_from_enthalpy<M>(
    model: &M,
    target: f64,
    guess: f64,
    config: &InversionConfig,
) -> PropsResult<f64>
where
    M: EnthalpyModel + ?Sized,
{
    let mut temperature = guess;
    let mut residual = config.precision + 1.0;
    let mut iter = 0;

    while residual >= config.precision && iter < config.max_iter {
        let enthalpy = model.enthalpy(temperature);
        residual = (enthalpy - target).abs();
        if residual >= config.precision {
            let slope = (model.enthalpy(temperature + config.probe_step) - enthalpy)
                / config.probe_step;
            if slope == 0.0 || !slope.is_finite() {
                return Err(diverged(target, temperature, residual));
            }
            temperature += (target - enthalpy) / slope;
        }
        iter += 1;
    }

    if residual.is_nan() || residual >= config.precision || !temperature.is_finite() {
        tracing::warn!(target, temperature, residual, "enthalpy inversion failed");
        return Err(diverged(target, temperature, residual));
    }
    Ok(temperature)
}

fn diverged(target: f64, temperature: f64, residual: f64) -> PropsError {
    PropsError::InversionDiverged {
        target,
        temperature,
        residual,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_model_converges() {
        let cp = 5000.0;
        let model = move |t: f64| cp * t;
        let config = InversionConfig::default();
        let t = temperature_from_enthalpy(&model, cp * 600.0, 550.0, &config).unwrap();
        assert!((t - 600.0).abs() < 1e-9);
    }

    #[test]
    fn exact_guess_needs_no_update() {
        let model = |t: f64| 10.0 * t;
        let config = InversionConfig {
            max_iter: 1,
            ..InversionConfig::default()
        };
        let t = temperature_from_enthalpy(&model, 3000.0, 300.0, &config).unwrap();
        assert_eq!(t, 300.0);
    }

    #[test]
    fn nonlinear_model_converges() {
        // h = 4000 T + 0.5 T^2
        let model = |t: f64| 4000.0 * t + 0.5 * t * t;
        let target = model(612.3);
        let t =
            temperature_from_enthalpy(&model, target, 573.15, &InversionConfig::default()).unwrap();
        assert!((model(t) - target).abs() < 1e-6);
        assert!((t - 612.3).abs() < 1e-6);
    }

    #[test]
    fn flat_model_diverges() {
        let model = |_t: f64| 1.0;
        let err = temperature_from_enthalpy(&model, 2.0, 300.0, &InversionConfig::default())
            .unwrap_err();
        assert!(matches!(err, PropsError::InversionDiverged { .. }));
    }

    #[test]
    fn exhausted_budget_is_an_error() {
        // Strongly curved model, far guess and a single update allowed.
        let model = |t: f64| t.powi(4);
        let config = InversionConfig {
            max_iter: 1,
            ..InversionConfig::default()
        };
        let err = temperature_from_enthalpy(&model, 1.0e12, 10.0, &config).unwrap_err();
        assert!(matches!(err, PropsError::InversionDiverged { .. }));
    }

    #[test]
    fn nan_model_is_reported() {
        let model = |_t: f64| f64::NAN;
        let result = temperature_from_enthalpy(&model, 1.0, 300.0, &InversionConfig::default());
        assert!(result.is_err());
    }
}
