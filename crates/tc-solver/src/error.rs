//! Error types for solver operations.

use tc_core::error::TcError;
use tc_props::PropsError;
use thiserror::Error;

/// Errors that can occur while building or running the coupled solver.
///
/// Plain non-convergence is not an error; see [`crate::IterationReport`].
#[derive(Error, Debug)]
pub enum SolverError {
    #[error("Problem setup error: {what}")]
    ProblemSetup { what: String },

    #[error("Invalid state: {what}")]
    InvalidState { what: String },

    #[error("Length mismatch for {what}: expected {expected} values, got {got}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("Property error: {0}")]
    Props(#[from] PropsError),
}

pub type SolverResult<T> = Result<T, SolverError>;

impl From<SolverError> for TcError {
    fn from(e: SolverError) -> Self {
        match e {
            SolverError::ProblemSetup { what: _ } => TcError::InvalidArg {
                what: "problem setup",
            },
            SolverError::InvalidState { what: _ } => TcError::Invariant { what: "state" },
            SolverError::LengthMismatch {
                what,
                expected,
                got,
            } => TcError::LengthMismatch {
                what,
                expected,
                got,
            },
            SolverError::Props(e) => e.into(),
        }
    }
}
