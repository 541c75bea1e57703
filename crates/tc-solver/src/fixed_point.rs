//! Shared sweep loop used by every domain solve and by the coupling loop.

use crate::error::SolverResult;

/// Outcome of an iterated solve.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IterationReport {
    /// Residual of the last sweep (max |ΔT| over cells)
    pub residual: f64,
    /// Number of sweeps performed
    pub iterations: usize,
    /// `residual < precision`
    pub converged: bool,
}

/// Repeat `sweep` until it returns a residual below `precision` or `max_iter`
/// sweeps have run.
///
/// With `max_iter == 0` no sweep runs and the reported residual is `precision + 1`.
pub fn fixed_point<F>(precision: f64, max_iter: usize, mut sweep: F) -> SolverResult<IterationReport>
where
    F: FnMut() -> SolverResult<f64>,
{
    let mut residual = precision + 1.0;
    let mut iterations = 0;

    while residual >= precision && iterations < max_iter {
        residual = sweep()?;
        iterations += 1;
    }

    Ok(IterationReport {
        residual,
        iterations,
        converged: residual < precision,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SolverError;

    #[test]
    fn stops_on_precision() {
        let mut r = 1.0;
        let report = fixed_point(1e-3, 100, || {
            r *= 0.1;
            Ok(r)
        })
        .unwrap();
        assert!(report.converged);
        assert_eq!(report.iterations, 3);
    }

    #[test]
    fn stops_on_budget() {
        let report = fixed_point(1e-3, 4, || Ok(1.0)).unwrap();
        assert!(!report.converged);
        assert_eq!(report.iterations, 4);
        assert_eq!(report.residual, 1.0);
    }

    #[test]
    fn zero_budget_reports_unconverged() {
        let report = fixed_point(1e-6, 0, || Ok(0.0)).unwrap();
        assert_eq!(report.iterations, 0);
        assert!(!report.converged);
        assert!(report.residual > 1e-6);
    }

    #[test]
    fn sweep_errors_propagate() {
        let result = fixed_point(1e-6, 10, || {
            Err(SolverError::InvalidState {
                what: "boom".to_string(),
            })
        });
        assert!(result.is_err());
    }
}
