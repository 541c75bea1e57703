//! Errors surfaced to the caller of the lifecycle.

use thiserror::Error;

/// Protocol and argument errors.
///
/// Numerical failures are never returned through this type.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProblemError {
    /// The call is not allowed in the current lifecycle state.
    #[error("{problem}::{method}: wrong context, {precondition}")]
    WrongContext {
        problem: &'static str,
        method: &'static str,
        precondition: String,
    },

    /// An argument violates its contract.
    #[error("{problem}::{method}: wrong argument '{arg}', {condition}")]
    WrongArgument {
        problem: &'static str,
        method: &'static str,
        arg: &'static str,
        condition: String,
    },
}

pub type ProblemResult<T> = Result<T, ProblemError>;

impl ProblemError {
    pub fn wrong_context(method: &'static str, precondition: impl Into<String>) -> Self {
        ProblemError::WrongContext {
            problem: crate::PROBLEM_NAME,
            method,
            precondition: precondition.into(),
        }
    }

    pub fn wrong_argument(
        method: &'static str,
        arg: &'static str,
        condition: impl Into<String>,
    ) -> Self {
        ProblemError::WrongArgument {
            problem: crate::PROBLEM_NAME,
            method,
            arg,
            condition: condition.into(),
        }
    }

    pub fn is_wrong_context(&self) -> bool {
        matches!(self, ProblemError::WrongContext { .. })
    }

    pub fn is_wrong_argument(&self) -> bool {
        matches!(self, ProblemError::WrongArgument { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_call() {
        let err = ProblemError::wrong_context("solveTimeStep", "outside TIME_STEP_DEFINED");
        assert!(err.is_wrong_context());
        let msg = err.to_string();
        assert!(msg.contains("solveTimeStep"));
        assert!(msg.contains("outside TIME_STEP_DEFINED"));

        let err = ProblemError::wrong_argument("initTimeStep", "dt", "dt must be > 0");
        assert!(err.is_wrong_argument());
        assert!(err.to_string().contains("'dt'"));
    }
}
