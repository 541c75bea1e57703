//! Property model errors.

use tc_core::TcError;
use thiserror::Error;

/// Result type for property operations.
pub type PropsResult<T> = Result<T, PropsError>;

/// Errors that can occur while building or evaluating property models.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PropsError {
    /// Non-physical values (non-positive cp, conductivity, etc.).
    #[error("Non-physical value for {what}")]
    NonPhysical { what: &'static str },

    /// Invalid argument.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// The enthalpy root-finder could not reach the target.
    #[error(
        "Non convergence of enthalpy inversion (target={target}, last temperature={temperature}, residual={residual})"
    )]
    InversionDiverged {
        target: f64,
        temperature: f64,
        residual: f64,
    },
}

impl From<PropsError> for TcError {
    fn from(err: PropsError) -> Self {
        match err {
            PropsError::NonPhysical { what } => TcError::Invariant { what },
            PropsError::InvalidArg { what } => TcError::InvalidArg { what },
            PropsError::InversionDiverged { .. } => TcError::Invariant {
                what: "enthalpy inversion diverged",
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = PropsError::NonPhysical { what: "cp" };
        assert!(err.to_string().contains("cp"));

        let err = PropsError::InversionDiverged {
            target: 1.0,
            temperature: 2.0,
            residual: 3.0,
        };
        assert!(err.to_string().contains("enthalpy inversion"));
    }

    #[test]
    fn error_to_tc_error() {
        let tc_err: TcError = PropsError::InvalidArg { what: "table" }.into();
        assert!(matches!(tc_err, TcError::InvalidArg { .. }));
    }
}
