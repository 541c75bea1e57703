//! Calculation lifecycle for the two-channel solver.
//!
//! [`Problem`] is the state machine an orchestrator drives:
//!
//! ```text
//! initialize ─┬─ init_time_step ── solve/iterate ── validate | abort ─┐
//!             ├─ init_stationary ─ solve/iterate ── validate | abort ─┤
//!             └─ save / restore / forget (idle only) ◄────────────────┘
//! terminate
//! ```
//!
//! Every call may be restricted to a subset of the three domains through a
//! [`Mode`]. Protocol violations and bad arguments come back as [`ProblemError`];
//! numerical trouble never does, it is reported as `Ok(false)` together with
//! [`Problem::last_error_message`].

pub mod context;
pub mod error;
pub mod mesh;
pub mod mode;
pub mod names;
pub mod problem;
pub mod snapshot;

pub use context::{CalculationContext, SolvedFlags};
pub use error::{ProblemError, ProblemResult};
pub use mesh::{CellField, FieldNature, Mesh1D, TimeSemantics};
pub use mode::{Elementary, InvalidMode, Mode};
pub use names::{FieldName, ValueName, ValueType};
pub use problem::{PROBLEM_NAME, Problem};
pub use snapshot::{DomainRecord, PersistenceMethod, SaveContent, Snapshot};
