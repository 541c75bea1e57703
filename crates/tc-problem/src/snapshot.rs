//! Independent copies of domain state for abort and save/restore.
//!
//! A [`Snapshot`] only ever holds owned clones. Mutating the live solver after
//! a capture never changes what a later apply writes back.

use crate::mode::{Elementary, Mode};
use std::fmt;
use std::str::FromStr;
use tc_solver::{CoupledSolver, DomainState, FluidState, SolidState};

/// What a save keeps for each active domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveContent {
    /// Full variable state
    All,
    /// Current temperatures only
    Temperatures,
}

impl FromStr for SaveContent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(SaveContent::All),
            "temperatures" => Ok(SaveContent::Temperatures),
            other => Err(format!(
                "unknown content '{other}', expected 'all' or 'temperatures'"
            )),
        }
    }
}

impl fmt::Display for SaveContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SaveContent::All => "all",
            SaveContent::Temperatures => "temperatures",
        })
    }
}

/// Where saved states live. Only memory is supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistenceMethod {
    Memory,
}

impl FromStr for PersistenceMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "memory" => Ok(PersistenceMethod::Memory),
            other => Err(format!("unsupported method '{other}', only 'memory' is available")),
        }
    }
}

/// Saved data of one domain.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainRecord<S> {
    State(S),
    Temperatures(Vec<f64>),
}

impl<S: DomainState> DomainRecord<S> {
    pub fn capture(state: &S, content: SaveContent) -> Self {
        match content {
            SaveContent::All => DomainRecord::State(state.clone()),
            SaveContent::Temperatures => {
                DomainRecord::Temperatures(state.temperatures_current().to_vec())
            }
        }
    }

    pub fn content(&self) -> SaveContent {
        match self {
            DomainRecord::State(_) => SaveContent::All,
            DomainRecord::Temperatures(_) => SaveContent::Temperatures,
        }
    }

    pub fn apply(&self, state: &mut S) {
        match self {
            DomainRecord::State(saved) => *state = saved.clone(),
            DomainRecord::Temperatures(saved) => {
                state.temperatures_current_mut().clone_from(saved);
            }
        }
    }
}

/// Records of the domains that were active at capture time.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub mode: Mode,
    pub content: SaveContent,
    pub fluid_1: Option<DomainRecord<FluidState>>,
    pub fluid_2: Option<DomainRecord<FluidState>>,
    pub solid: Option<DomainRecord<SolidState>>,
}

impl Snapshot {
    pub fn capture(solver: &CoupledSolver, mode: Mode, content: SaveContent) -> Self {
        let take = |e: Elementary| mode.is_activated(e);
        Self {
            mode,
            content,
            fluid_1: take(Elementary::Fluid1)
                .then(|| DomainRecord::capture(&solver.fluid_1.state, content)),
            fluid_2: take(Elementary::Fluid2)
                .then(|| DomainRecord::capture(&solver.fluid_2.state, content)),
            solid: take(Elementary::Solid)
                .then(|| DomainRecord::capture(&solver.solid.state, content)),
        }
    }

    /// First domain of `mode` this snapshot has no record for.
    pub fn missing(&self, mode: Mode) -> Option<Elementary> {
        mode.decompose().into_iter().find(|e| !self.mode.is_activated(*e))
    }

    /// Write back the records of the domains in `mode`.
    ///
    /// Domains without a record are left untouched; callers check
    /// [`Self::missing`] first.
    pub fn apply(&self, solver: &mut CoupledSolver, mode: Mode) {
        if mode.is_activated(Elementary::Fluid1) {
            if let Some(record) = &self.fluid_1 {
                record.apply(&mut solver.fluid_1.state);
            }
        }
        if mode.is_activated(Elementary::Fluid2) {
            if let Some(record) = &self.fluid_2 {
                record.apply(&mut solver.fluid_2.state);
            }
        }
        if mode.is_activated(Elementary::Solid) {
            if let Some(record) = &self.solid {
                record.apply(&mut solver.solid.state);
            }
        }
    }
}
