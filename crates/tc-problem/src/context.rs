//! Outer-loop context and per-domain solved flags.

use crate::mode::{Elementary, Mode};
use std::fmt;

/// Which kind of calculation, if any, is currently open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CalculationContext {
    #[default]
    None,
    TimeStepDefined,
    StationaryDefined,
}

impl fmt::Display for CalculationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CalculationContext::None => "NONE",
            CalculationContext::TimeStepDefined => "TIME_STEP_DEFINED",
            CalculationContext::StationaryDefined => "STATIONARY_DEFINED",
        })
    }
}

/// Elementary domains solved since the context was opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SolvedFlags(u8);

impl SolvedFlags {
    pub fn is_solved(self, elementary: Elementary) -> bool {
        self.0 & elementary.bit() != 0
    }

    /// First domain of `mode` already solved, if any.
    pub fn first_solved(self, mode: Mode) -> Option<Elementary> {
        mode.decompose().into_iter().find(|e| self.is_solved(*e))
    }

    /// First domain of `mode` not solved yet, if any.
    pub fn first_unsolved(self, mode: Mode) -> Option<Elementary> {
        mode.decompose().into_iter().find(|e| !self.is_solved(*e))
    }

    pub fn mark(&mut self, mode: Mode) {
        self.0 |= mode.bits();
    }

    pub fn clear(&mut self, mode: Mode) {
        self.0 &= !mode.bits();
    }
}
