//! The calculation lifecycle.

use crate::context::{CalculationContext, SolvedFlags};
use crate::error::{ProblemError, ProblemResult};
use crate::mesh::{CellField, FieldNature, Mesh1D, TimeSemantics};
use crate::mode::{Elementary, Mode};
use crate::names::{FieldName, ValueName, ValueType};
use crate::snapshot::{PersistenceMethod, SaveContent, Snapshot};
use nalgebra::DVector;
use std::collections::HashMap;
use tc_props::InversionConfig;
use tc_solver::{CoupledSolver, DomainState, IterationParams, SolverResult, SolverSetup};
use tracing::{debug, info, warn};

pub const PROBLEM_NAME: &str = "twochannel";

/// Step bound reported when no fluid is active.
const NO_TIME_STEP_LIMIT: f64 = 1e30;
/// Solid heat capacity factor applied while the stationary mode is on.
const STATIONARY_CAPACITY_FACTOR: f64 = 1e-3;
/// Relative change per unit `dt` under which a domain is stationary.
const STATIONARY_THRESHOLD: f64 = 1e-3;
/// Allowed present time spread between domains joined by a mode switch.
const TIME_SYNC_TOLERANCE: f64 = 1e-10;

const NOT_INITIALIZED: &str = "cannot be called before initialize()";
const VALUE_UNIT: &str = "NA";
const VALUE_TIME_SEMANTICS: &str = "NA";

/// Two channels and a solid behind a strict call protocol.
///
/// Built from a validated [`SolverSetup`]; the domains themselves only exist
/// between [`Problem::initialize`] and [`Problem::terminate`].
pub struct Problem {
    setup: SolverSetup,
    inversion: InversionConfig,
    session: Option<Session>,
}

/// Everything created at initialize and dropped at terminate.
#[derive(Debug)]
struct Session {
    solver: CoupledSolver,
    mesh: Mesh1D,
    mode: Mode,
    context: CalculationContext,
    /// Size of the last step opened
    dt: Option<f64>,
    solved: SolvedFlags,
    /// State of the active domains when the open context started
    abort: Option<Snapshot>,
    saved: HashMap<String, Snapshot>,
    stationary_mode: bool,
    last_error: String,
}

impl std::fmt::Debug for Problem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Problem")
            .field("num_cells", &self.setup.num_cells)
            .field("inversion", &self.inversion)
            .field("session", &self.session)
            .finish()
    }
}

/// Iteration control written by `set_input_double_value`.
#[derive(Debug, Clone, Copy)]
enum IterationSetting {
    Precision(f64),
    MaxIter(usize),
}

impl IterationSetting {
    fn apply(self, params: &mut IterationParams) {
        match self {
            IterationSetting::Precision(value) => params.precision = value,
            IterationSetting::MaxIter(value) => params.max_iter = value,
        }
    }
}

impl Problem {
    pub fn new(setup: SolverSetup) -> ProblemResult<Self> {
        setup
            .validate()
            .map_err(|e| ProblemError::wrong_argument("new", "setup", e.to_string()))?;
        Ok(Self {
            setup,
            inversion: InversionConfig::default(),
            session: None,
        })
    }

    /// Replace the enthalpy inversion controls used by the next initialize.
    pub fn with_inversion(mut self, inversion: InversionConfig) -> Self {
        self.inversion = inversion;
        self
    }

    pub fn setup(&self) -> &SolverSetup {
        &self.setup
    }

    pub fn is_initialized(&self) -> bool {
        self.session.is_some()
    }

    fn session(&self, method: &'static str) -> ProblemResult<&Session> {
        self.session
            .as_ref()
            .ok_or_else(|| ProblemError::wrong_context(method, NOT_INITIALIZED))
    }

    fn session_mut(&mut self, method: &'static str) -> ProblemResult<&mut Session> {
        self.session
            .as_mut()
            .ok_or_else(|| ProblemError::wrong_context(method, NOT_INITIALIZED))
    }

    /// Idle session with a freshly built solver.
    pub fn initialize(&mut self) -> ProblemResult<bool> {
        if self.session.is_some() {
            return Err(ProblemError::wrong_context(
                "initialize",
                "cannot be called twice",
            ));
        }
        let mut solver = CoupledSolver::new(&self.setup)
            .map_err(|e| ProblemError::wrong_argument("initialize", "setup", e.to_string()))?;
        solver.set_inversion(self.inversion);
        let geometry = *solver.geometry();
        info!(
            problem = PROBLEM_NAME,
            num_cells = geometry.num_cells,
            dz = geometry.dz,
            "initialized"
        );
        self.session = Some(Session {
            mesh: Mesh1D::uniform(Mesh1D::DEFAULT_NAME, geometry.num_cells, geometry.dz),
            solver,
            mode: Mode::ALL,
            context: CalculationContext::None,
            dt: None,
            solved: SolvedFlags::default(),
            abort: None,
            saved: HashMap::new(),
            stationary_mode: false,
            last_error: String::new(),
        });
        Ok(true)
    }

    pub fn terminate(&mut self) -> ProblemResult<()> {
        let session = self.session("terminate")?;
        session.require_idle("terminate")?;
        self.session = None;
        info!(problem = PROBLEM_NAME, "terminated");
        Ok(())
    }

    pub fn last_error_message(&self) -> ProblemResult<&str> {
        Ok(&self.session("last_error_message")?.last_error)
    }

    /// Read access to the domains, for orchestrators and diagnostics.
    pub fn solver(&self) -> ProblemResult<&CoupledSolver> {
        Ok(&self.session("solver")?.solver)
    }

    pub fn context(&self) -> ProblemResult<CalculationContext> {
        Ok(self.session("context")?.context)
    }

    pub fn mode(&self) -> ProblemResult<Mode> {
        Ok(self.session("mode")?.mode)
    }

    /// Present time of the first active domain.
    pub fn present_time(&self) -> ProblemResult<f64> {
        let session = self.session("present_time")?;
        Ok(session.domain_time(session.mode.first()))
    }

    /// Largest advisable step, and whether the calculation should stop.
    ///
    /// Inside an open time step the answer is always below that step.
    pub fn compute_time_step(&self) -> ProblemResult<(f64, bool)> {
        let session = self.session("compute_time_step")?;
        if session.context == CalculationContext::StationaryDefined {
            return Err(ProblemError::wrong_context(
                "compute_time_step",
                "cannot be called inside the STATIONARY_DEFINED context",
            ));
        }
        let mut dt = session.stable_time_step();
        if session.context == CalculationContext::TimeStepDefined {
            if let Some(open) = session.dt {
                if dt >= open {
                    dt = 0.5 * open;
                }
            }
        }
        Ok((dt, false))
    }

    /// Open a time step of size `dt`.
    ///
    /// Returns whether `dt` respects the transport bound of
    /// [`Problem::compute_time_step`].
    pub fn init_time_step(&mut self, dt: f64) -> ProblemResult<bool> {
        let session = self.session_mut("init_time_step")?;
        session.require_idle("init_time_step")?;
        if !(dt.is_finite() && dt > 0.0) {
            return Err(ProblemError::wrong_argument(
                "init_time_step",
                "dt",
                format!("dt must be > 0, got {dt}"),
            ));
        }
        let stable = session.stable_time_step();
        session.open(CalculationContext::TimeStepDefined);
        session.dt = Some(dt);
        info!(dt, mode = %session.mode, "time step opened");
        Ok(dt <= stable)
    }

    /// One full solve of the open time step. Fails if any active domain was
    /// already solved in this step.
    pub fn solve_time_step(&mut self) -> ProblemResult<bool> {
        let session = self.session_mut("solve_time_step")?;
        session.require(CalculationContext::TimeStepDefined, "solve_time_step")?;
        session.require_unsolved("solve_time_step")?;
        let (succeeded, converged) = self.iterate_time_step()?;
        Ok(self.finish_solve(succeeded, converged, "solve_time_step"))
    }

    /// Returns `(succeeded, converged)`. May be repeated within a step.
    pub fn iterate_time_step(&mut self) -> ProblemResult<(bool, bool)> {
        let session = self.session_mut("iterate_time_step")?;
        session.require(CalculationContext::TimeStepDefined, "iterate_time_step")?;
        let Some(dt) = session.dt else {
            return Err(ProblemError::wrong_context(
                "iterate_time_step",
                "no time step size was defined",
            ));
        };

        let capacity = session.solver.solid.state.vol_heat_capacity;
        if session.stationary_mode {
            session.solver.solid.state.vol_heat_capacity = capacity * STATIONARY_CAPACITY_FACTOR;
        }
        let outcome = session.run_time_step(dt);
        session.solver.solid.state.vol_heat_capacity = capacity;

        Ok(session.conclude(outcome, "iterate_time_step"))
    }

    /// Close the step and advance the active domains by `dt`.
    pub fn validate_time_step(&mut self) -> ProblemResult<()> {
        let session = self.session_mut("validate_time_step")?;
        session.close(CalculationContext::TimeStepDefined, "validate_time_step")?;
        if let Some(dt) = session.dt {
            for elementary in session.mode.decompose() {
                let time = session.domain_time(elementary) + dt;
                session.set_domain_time(elementary, time);
            }
        }
        info!(time = session.domain_time(session.mode.first()), "time step validated");
        Ok(())
    }

    /// Close the step and restore the active domains as they were when it opened.
    pub fn abort_time_step(&mut self) -> ProblemResult<()> {
        let session = self.session_mut("abort_time_step")?;
        session.rollback(CalculationContext::TimeStepDefined, "abort_time_step")?;
        info!(mode = %session.mode, "time step aborted");
        Ok(())
    }

    pub fn set_stationary_mode(&mut self, stationary: bool) -> ProblemResult<()> {
        let session = self.session_mut("set_stationary_mode")?;
        session.require_idle("set_stationary_mode")?;
        session.stationary_mode = stationary;
        Ok(())
    }

    pub fn stationary_mode(&self) -> ProblemResult<bool> {
        let session = self.session("stationary_mode")?;
        session.require_idle("stationary_mode")?;
        Ok(session.stationary_mode)
    }

    /// Whether the last step changed no active domain by more than
    /// `1e-3 * dt` in any cell.
    pub fn is_stationary(&self) -> ProblemResult<bool> {
        let session = self.session("is_stationary")?;
        session.require_idle("is_stationary")?;
        let Some(dt) = session.dt else {
            return Err(ProblemError::wrong_context(
                "is_stationary",
                "requires a previous time step",
            ));
        };
        let precision = STATIONARY_THRESHOLD * dt;
        let solver = &session.solver;
        Ok(session.mode.decompose().into_iter().all(|e| match e {
            Elementary::Fluid1 => solver.fluid_1.state.is_stationary(precision),
            Elementary::Fluid2 => solver.fluid_2.state.is_stationary(precision),
            Elementary::Solid => solver.solid.state.is_stationary(precision),
        }))
    }

    pub fn reset_time(&mut self, time: f64) -> ProblemResult<()> {
        let session = self.session_mut("reset_time")?;
        session.require_idle("reset_time")?;
        if !time.is_finite() {
            return Err(ProblemError::wrong_argument(
                "reset_time",
                "time",
                format!("time must be finite, got {time}"),
            ));
        }
        for elementary in session.mode.decompose() {
            session.set_domain_time(elementary, time);
        }
        Ok(())
    }

    pub fn init_stationary(&mut self) -> ProblemResult<()> {
        let session = self.session_mut("init_stationary")?;
        session.require_idle("init_stationary")?;
        session.open(CalculationContext::StationaryDefined);
        info!(mode = %session.mode, "stationary solve opened");
        Ok(())
    }

    pub fn solve_stationary(&mut self) -> ProblemResult<bool> {
        let session = self.session_mut("solve_stationary")?;
        session.require(CalculationContext::StationaryDefined, "solve_stationary")?;
        session.require_unsolved("solve_stationary")?;
        let (succeeded, converged) = self.iterate_stationary()?;
        Ok(self.finish_solve(succeeded, converged, "solve_stationary"))
    }

    /// Returns `(succeeded, converged)`.
    pub fn iterate_stationary(&mut self) -> ProblemResult<(bool, bool)> {
        let session = self.session_mut("iterate_stationary")?;
        session.require(CalculationContext::StationaryDefined, "iterate_stationary")?;
        let outcome = session.run_stationary();
        Ok(session.conclude(outcome, "iterate_stationary"))
    }

    /// Close the stationary solve. Present time is unchanged.
    pub fn validate_stationary(&mut self) -> ProblemResult<()> {
        let session = self.session_mut("validate_stationary")?;
        session.close(CalculationContext::StationaryDefined, "validate_stationary")?;
        info!(mode = %session.mode, "stationary solve validated");
        Ok(())
    }

    pub fn abort_stationary(&mut self) -> ProblemResult<()> {
        let session = self.session_mut("abort_stationary")?;
        session.rollback(CalculationContext::StationaryDefined, "abort_stationary")?;
        info!(mode = %session.mode, "stationary solve aborted");
        Ok(())
    }

    /// Copy the active domains under `label`, replacing any earlier entry.
    pub fn save(&mut self, label: &str, method: &str, content: &str) -> ProblemResult<()> {
        let session = self.session_mut("save")?;
        session.require_idle("save")?;
        parse_method("save", method)?;
        let content = parse_content("save", content)?;
        let snapshot = Snapshot::capture(&session.solver, session.mode, content);
        session.saved.insert(label.to_owned(), snapshot);
        info!(label, %content, mode = %session.mode, "state saved");
        Ok(())
    }

    /// Overwrite the active domains from `label`.
    pub fn restore(&mut self, label: &str, method: &str, content: &str) -> ProblemResult<()> {
        let session = self.session_mut("restore")?;
        session.require_idle("restore")?;
        parse_method("restore", method)?;
        let content = parse_content("restore", content)?;
        let Some(snapshot) = session.saved.get(label) else {
            return Err(ProblemError::wrong_argument(
                "restore",
                "label",
                format!("unknown label '{label}'"),
            ));
        };
        if snapshot.content != content {
            return Err(ProblemError::wrong_argument(
                "restore",
                "content",
                format!("'{label}' was saved with content '{}'", snapshot.content),
            ));
        }
        if let Some(missing) = snapshot.missing(session.mode) {
            return Err(ProblemError::wrong_argument(
                "restore",
                "label",
                format!("'{label}' holds no data for {missing}"),
            ));
        }
        snapshot.apply(&mut session.solver, session.mode);
        info!(label, %content, mode = %session.mode, "state restored");
        Ok(())
    }

    /// Discard `label`. Unknown labels are ignored.
    pub fn forget(&mut self, label: &str, method: &str) -> ProblemResult<()> {
        let session = self.session_mut("forget")?;
        session.require_idle("forget")?;
        parse_method("forget", method)?;
        if session.saved.remove(label).is_some() {
            debug!(label, "saved state forgotten");
        }
        Ok(())
    }

    // Fields

    pub fn input_field_names(&self) -> ProblemResult<Vec<&'static str>> {
        self.session("input_field_names")?;
        Ok(FieldName::INPUTS.iter().map(|n| n.as_str()).collect())
    }

    pub fn output_field_names(&self) -> ProblemResult<Vec<&'static str>> {
        self.session("output_field_names")?;
        Ok(FieldName::OUTPUTS.iter().map(|n| n.as_str()).collect())
    }

    pub fn mesh(&self) -> ProblemResult<&Mesh1D> {
        Ok(&self.session("mesh")?.mesh)
    }

    pub fn mesh_unit(&self) -> ProblemResult<&'static str> {
        self.session("mesh_unit")?;
        Ok(Mesh1D::UNIT)
    }

    pub fn field_unit(&self, name: &str) -> ProblemResult<&'static str> {
        self.session("field_unit")?;
        Ok(field_unit(parse_field("field_unit", name)?))
    }

    pub fn field_time_semantics(&self, name: &str) -> ProblemResult<TimeSemantics> {
        self.session("field_time_semantics")?;
        Ok(field_time_semantics(parse_field(
            "field_time_semantics",
            name,
        )?))
    }

    pub fn field_mesh_name(&self, name: &str) -> ProblemResult<&str> {
        let session = self.session("field_mesh_name")?;
        parse_field("field_mesh_name", name)?;
        Ok(session.mesh.name())
    }

    /// Zero-valued field with the layout `set_input_field` expects.
    pub fn input_field_template(&self, name: &str) -> ProblemResult<CellField> {
        let session = self.session("input_field_template")?;
        let field = parse_input_field("input_field_template", name)?;
        Ok(session.cell_field(field, vec![0.0; session.solver.num_cells()]))
    }

    /// Set the power [W] of each cell from a field.
    pub fn set_input_field(&mut self, name: &str, field: &CellField) -> ProblemResult<()> {
        let session = self.session_mut("set_input_field")?;
        parse_input_field("set_input_field", name)?;
        session
            .solver
            .set_powers(&field.values)
            .map_err(|e| ProblemError::wrong_argument("set_input_field", "field", e.to_string()))
    }

    pub fn output_field(&self, name: &str) -> ProblemResult<CellField> {
        let session = self.session("output_field")?;
        let field = parse_field("output_field", name)?;
        if !field.is_temperature() {
            return Err(ProblemError::wrong_argument(
                "output_field",
                "name",
                format!("'{name}' is not an output field"),
            ));
        }
        let values = session.interior_temperatures(field).to_vec();
        Ok(session.cell_field(field, values))
    }

    // Algebraic data

    pub fn algebraic_data_names(&self) -> ProblemResult<Vec<&'static str>> {
        self.session("algebraic_data_names")?;
        Ok(FieldName::OUTPUTS.iter().map(|n| n.as_str()).collect())
    }

    pub fn algebraic_data_time_semantics(&self) -> ProblemResult<TimeSemantics> {
        self.session("algebraic_data_time_semantics")?;
        Ok(TimeSemantics::EndOfTimeStep)
    }

    /// Current interior temperatures of one domain.
    pub fn algebraic_data(&self, name: &str) -> ProblemResult<DVector<f64>> {
        let session = self.session("algebraic_data")?;
        let field = parse_temperature("algebraic_data", name)?;
        Ok(DVector::from_column_slice(
            session.interior_temperatures(field),
        ))
    }

    /// Overwrite the current interior temperatures of one domain.
    pub fn set_algebraic_data(&mut self, name: &str, data: &DVector<f64>) -> ProblemResult<()> {
        let session = self.session_mut("set_algebraic_data")?;
        let field = parse_temperature("set_algebraic_data", name)?;
        let num_cells = session.solver.num_cells();
        if data.len() != num_cells {
            return Err(ProblemError::wrong_argument(
                "set_algebraic_data",
                "data",
                format!("expected {num_cells} values, got {}", data.len()),
            ));
        }
        session
            .interior_temperatures_mut(field)
            .copy_from_slice(data.as_slice());
        Ok(())
    }

    // Values

    pub fn input_value_names(&self) -> ProblemResult<Vec<&'static str>> {
        self.session("input_value_names")?;
        Ok(ValueName::INPUTS.iter().map(|n| n.as_str()).collect())
    }

    pub fn output_value_names(&self) -> ProblemResult<Vec<&'static str>> {
        self.session("output_value_names")?;
        Ok(ValueName::OUTPUTS.iter().map(|n| n.as_str()).collect())
    }

    pub fn value_type(&self, name: &str) -> ProblemResult<ValueType> {
        self.session("value_type")?;
        Ok(parse_value("value_type", name)?.value_type())
    }

    pub fn value_unit(&self, name: &str) -> ProblemResult<&'static str> {
        self.session("value_unit")?;
        parse_value("value_unit", name)?;
        Ok(VALUE_UNIT)
    }

    pub fn value_time_semantics(&self, name: &str) -> ProblemResult<&'static str> {
        self.session("value_time_semantics")?;
        parse_value("value_time_semantics", name)?;
        Ok(VALUE_TIME_SEMANTICS)
    }

    /// Only `"mode"` is an integer input.
    ///
    /// While a context is open the new mode must stay within the mode it was
    /// opened with, and its domains must share the same present time.
    pub fn set_input_int_value(&mut self, name: &str, value: i64) -> ProblemResult<()> {
        const METHOD: &str = "set_input_int_value";
        let session = self.session_mut(METHOD)?;
        if parse_value(METHOD, name)? != ValueName::Mode {
            return Err(ProblemError::wrong_argument(
                METHOD,
                "name",
                format!("'{name}' is not an integer input"),
            ));
        }
        let mode = Mode::from_bits(value)
            .map_err(|e| ProblemError::wrong_argument(METHOD, "value", e.to_string()))?;

        if let Some(opened) = session.abort.as_ref().map(|a| a.mode) {
            if !opened.contains(mode) {
                return Err(ProblemError::wrong_argument(
                    METHOD,
                    "value",
                    format!(
                        "mode {mode} is not included in mode {opened} active when the context was opened"
                    ),
                ));
            }
        }

        let times: Vec<f64> = mode
            .decompose()
            .into_iter()
            .map(|e| session.domain_time(e))
            .collect();
        if times
            .iter()
            .any(|t| (t - times[0]).abs() > TIME_SYNC_TOLERANCE)
        {
            return Err(ProblemError::wrong_argument(
                METHOD,
                "value",
                format!("the domains of mode {mode} do not share the same present time"),
            ));
        }

        debug!(from = %session.mode, to = %mode, "mode switched");
        session.mode = mode;
        Ok(())
    }

    pub fn output_int_value(&self, name: &str) -> ProblemResult<i64> {
        const METHOD: &str = "output_int_value";
        let session = self.session(METHOD)?;
        match parse_value(METHOD, name)? {
            ValueName::Mode => Ok(i64::from(session.mode.bits())),
            _ => Err(ProblemError::wrong_argument(
                METHOD,
                "name",
                format!("'{name}' is not an integer output"),
            )),
        }
    }

    /// `"precision"` and `"max_iter"` go to the coupling loop under mode All,
    /// otherwise to every active domain.
    pub fn set_input_double_value(&mut self, name: &str, value: f64) -> ProblemResult<()> {
        const METHOD: &str = "set_input_double_value";
        let session = self.session_mut(METHOD)?;
        let setting = match parse_value(METHOD, name)? {
            ValueName::Precision => {
                if !(value.is_finite() && value > 0.0) {
                    return Err(ProblemError::wrong_argument(
                        METHOD,
                        "value",
                        format!("precision must be > 0, got {value}"),
                    ));
                }
                IterationSetting::Precision(value)
            }
            ValueName::MaxIter => {
                if !(value.is_finite() && value >= 0.0 && value.fract() == 0.0) {
                    return Err(ProblemError::wrong_argument(
                        METHOD,
                        "value",
                        format!("max_iter must be a non-negative integer, got {value}"),
                    ));
                }
                IterationSetting::MaxIter(value as usize)
            }
            _ => {
                return Err(ProblemError::wrong_argument(
                    METHOD,
                    "name",
                    format!("'{name}' is not a real input"),
                ));
            }
        };

        if session.mode == Mode::ALL {
            setting.apply(&mut session.solver.coupling);
        } else {
            for elementary in session.mode.decompose() {
                setting.apply(session.params_mut(elementary));
            }
        }
        Ok(())
    }

    /// Scalars of the coupling loop under mode All, otherwise of the first
    /// active domain.
    pub fn output_double_value(&self, name: &str) -> ProblemResult<f64> {
        const METHOD: &str = "output_double_value";
        let session = self.session(METHOD)?;
        let params = session.scoped_params();
        match parse_value(METHOD, name)? {
            ValueName::Precision => Ok(params.precision),
            ValueName::MaxIter => Ok(params.max_iter as f64),
            ValueName::Residual => Ok(params.residual),
            ValueName::Mode => Err(ProblemError::wrong_argument(
                METHOD,
                "name",
                format!("'{name}' is not a real output"),
            )),
        }
    }

    fn finish_solve(&mut self, succeeded: bool, converged: bool, method: &'static str) -> bool {
        if succeeded && !converged {
            if let Some(session) = self.session.as_mut() {
                session.last_error = format!("non convergence of {method}()");
                warn!(method, "coupling did not converge");
            }
        }
        succeeded && converged
    }
}

impl Session {
    fn require(&self, expected: CalculationContext, method: &'static str) -> ProblemResult<()> {
        if self.context == expected {
            Ok(())
        } else {
            Err(ProblemError::wrong_context(
                method,
                format!("cannot be called outside the {expected} context"),
            ))
        }
    }

    fn require_idle(&self, method: &'static str) -> ProblemResult<()> {
        if self.context == CalculationContext::None {
            Ok(())
        } else {
            Err(ProblemError::wrong_context(
                method,
                format!("cannot be called inside the {} context", self.context),
            ))
        }
    }

    fn require_unsolved(&self, method: &'static str) -> ProblemResult<()> {
        match self.solved.first_solved(self.mode) {
            Some(elementary) => Err(ProblemError::wrong_context(
                method,
                format!("cannot be called twice for the same elementary mode ({elementary})"),
            )),
            None => Ok(()),
        }
    }

    /// Snapshot the active domains, archive their old level and enter `context`.
    fn open(&mut self, context: CalculationContext) {
        self.abort = Some(Snapshot::capture(&self.solver, self.mode, SaveContent::All));
        for elementary in self.mode.decompose() {
            match elementary {
                Elementary::Fluid1 => self.solver.validate_fluid_1(),
                Elementary::Fluid2 => self.solver.validate_fluid_2(),
                Elementary::Solid => self.solver.validate_solid(),
            }
        }
        self.solved.clear(Mode::ALL);
        self.context = context;
    }

    fn require_opening_mode(&self, method: &'static str) -> ProblemResult<()> {
        match self.abort.as_ref().map(|a| a.mode) {
            Some(opened) if opened == self.mode => Ok(()),
            Some(opened) => Err(ProblemError::wrong_context(
                method,
                format!(
                    "called in mode {} whereas the context was opened in mode {opened}",
                    self.mode
                ),
            )),
            None => Err(ProblemError::wrong_context(
                method,
                "no abort data was recorded for the open context",
            )),
        }
    }

    /// Leave `context` keeping the solved state.
    fn close(&mut self, context: CalculationContext, method: &'static str) -> ProblemResult<()> {
        self.require(context, method)?;
        self.require_opening_mode(method)?;
        if let Some(elementary) = self.solved.first_unsolved(self.mode) {
            return Err(ProblemError::wrong_context(
                method,
                format!("elementary mode {elementary} was not solved"),
            ));
        }
        self.abort = None;
        self.solved.clear(self.mode);
        self.context = CalculationContext::None;
        Ok(())
    }

    /// Leave `context` restoring the state it was opened with.
    fn rollback(&mut self, context: CalculationContext, method: &'static str) -> ProblemResult<()> {
        self.require(context, method)?;
        self.require_opening_mode(method)?;
        if let Some(snapshot) = self.abort.take() {
            snapshot.apply(&mut self.solver, self.mode);
        }
        self.solved.clear(self.mode);
        self.context = CalculationContext::None;
        Ok(())
    }

    fn run_time_step(&mut self, dt: f64) -> SolverResult<()> {
        if self.mode == Mode::ALL {
            self.solver.solve_time_step(dt)?;
            return Ok(());
        }
        for elementary in self.mode.decompose() {
            match elementary {
                Elementary::Fluid1 => self.solver.solve_fluid_1_time_step(dt),
                Elementary::Fluid2 => self.solver.solve_fluid_2_time_step(dt),
                Elementary::Solid => self.solver.solve_solid_time_step(dt),
            }?;
        }
        Ok(())
    }

    fn run_stationary(&mut self) -> SolverResult<()> {
        if self.mode == Mode::ALL {
            self.solver.solve_stationary()?;
            return Ok(());
        }
        for elementary in self.mode.decompose() {
            match elementary {
                Elementary::Fluid1 => self.solver.solve_fluid_1_stationary(),
                Elementary::Fluid2 => self.solver.solve_fluid_2_stationary(),
                Elementary::Solid => self.solver.solve_solid_stationary(),
            }?;
        }
        Ok(())
    }

    /// Turn a solve outcome into `(succeeded, converged)`.
    fn conclude(&mut self, outcome: SolverResult<()>, method: &'static str) -> (bool, bool) {
        match outcome {
            Ok(()) => {
                self.solved.mark(self.mode);
                let params = self.scoped_params();
                let converged = params.residual <= params.precision;
                debug!(
                    method,
                    mode = %self.mode,
                    residual = params.residual,
                    converged,
                    "solve finished"
                );
                (true, converged)
            }
            Err(err) => {
                warn!(method, error = %err, "solve failed");
                self.last_error = err.to_string();
                (false, false)
            }
        }
    }

    fn scoped_params(&self) -> IterationParams {
        if self.mode == Mode::ALL {
            return self.solver.coupling;
        }
        match self.mode.first() {
            Elementary::Fluid1 => self.solver.fluid_1.state.params,
            Elementary::Fluid2 => self.solver.fluid_2.state.params,
            Elementary::Solid => self.solver.solid.state.params,
        }
    }

    fn params_mut(&mut self, elementary: Elementary) -> &mut IterationParams {
        match elementary {
            Elementary::Fluid1 => &mut self.solver.fluid_1.state.params,
            Elementary::Fluid2 => &mut self.solver.fluid_2.state.params,
            Elementary::Solid => &mut self.solver.solid.state.params,
        }
    }

    fn domain_time(&self, elementary: Elementary) -> f64 {
        match elementary {
            Elementary::Fluid1 => self.solver.fluid_1.state.present_time,
            Elementary::Fluid2 => self.solver.fluid_2.state.present_time,
            Elementary::Solid => self.solver.solid.state.present_time,
        }
    }

    fn set_domain_time(&mut self, elementary: Elementary, time: f64) {
        match elementary {
            Elementary::Fluid1 => self.solver.fluid_1.state.set_present_time(time),
            Elementary::Fluid2 => self.solver.fluid_2.state.set_present_time(time),
            Elementary::Solid => self.solver.solid.state.set_present_time(time),
        }
    }

    /// Minimum transit time of one cell over the active channels.
    fn stable_time_step(&self) -> f64 {
        let dz = self.solver.geometry().dz;
        [
            (Elementary::Fluid1, &self.solver.fluid_1),
            (Elementary::Fluid2, &self.solver.fluid_2),
        ]
        .into_iter()
        .filter(|(e, channel)| self.mode.is_activated(*e) && channel.state.speed > 0.0)
        .map(|(_, channel)| dz / channel.state.speed)
        .fold(NO_TIME_STEP_LIMIT, f64::min)
    }

    fn interior_temperatures(&self, field: FieldName) -> &[f64] {
        let all = match field {
            FieldName::TemperatureFluid1 => &self.solver.fluid_1.state.temperatures_current,
            FieldName::TemperatureFluid2 => &self.solver.fluid_2.state.temperatures_current,
            FieldName::TemperatureSolid | FieldName::Power => {
                &self.solver.solid.state.temperatures_current
            }
        };
        &all[1..]
    }

    fn interior_temperatures_mut(&mut self, field: FieldName) -> &mut [f64] {
        let all = match field {
            FieldName::TemperatureFluid1 => &mut self.solver.fluid_1.state.temperatures_current,
            FieldName::TemperatureFluid2 => &mut self.solver.fluid_2.state.temperatures_current,
            FieldName::TemperatureSolid | FieldName::Power => {
                &mut self.solver.solid.state.temperatures_current
            }
        };
        &mut all[1..]
    }

    fn cell_field(&self, field: FieldName, values: Vec<f64>) -> CellField {
        CellField {
            name: field.as_str().to_owned(),
            mesh_name: self.mesh.name().to_owned(),
            values,
            nature: if field.is_temperature() {
                FieldNature::IntensiveMaximum
            } else {
                FieldNature::ExtensiveMaximum
            },
            unit: field_unit(field),
            time_semantics: field_time_semantics(field),
        }
    }
}

fn field_unit(field: FieldName) -> &'static str {
    if field.is_temperature() { "K" } else { "W" }
}

fn field_time_semantics(field: FieldName) -> TimeSemantics {
    if field.is_temperature() {
        TimeSemantics::EndOfTimeStep
    } else {
        TimeSemantics::Constant
    }
}

fn parse_field(method: &'static str, name: &str) -> ProblemResult<FieldName> {
    FieldName::parse(name).ok_or_else(|| {
        ProblemError::wrong_argument(method, "name", format!("unknown field name '{name}'"))
    })
}

fn parse_input_field(method: &'static str, name: &str) -> ProblemResult<FieldName> {
    match parse_field(method, name)? {
        FieldName::Power => Ok(FieldName::Power),
        _ => Err(ProblemError::wrong_argument(
            method,
            "name",
            format!("'{name}' is not an input field, only 'power' is available"),
        )),
    }
}

fn parse_temperature(method: &'static str, name: &str) -> ProblemResult<FieldName> {
    match FieldName::parse(name) {
        Some(field) if field.is_temperature() => Ok(field),
        _ => Err(ProblemError::wrong_argument(
            method,
            "name",
            format!("unknown algebraic data name '{name}'"),
        )),
    }
}

fn parse_value(method: &'static str, name: &str) -> ProblemResult<ValueName> {
    ValueName::parse(name).ok_or_else(|| {
        ProblemError::wrong_argument(method, "name", format!("unknown value name '{name}'"))
    })
}

fn parse_method(method: &'static str, value: &str) -> ProblemResult<PersistenceMethod> {
    value
        .parse()
        .map_err(|e: String| ProblemError::wrong_argument(method, "method", e))
}

fn parse_content(method: &'static str, value: &str) -> ProblemResult<SaveContent> {
    value
        .parse()
        .map_err(|e: String| ProblemError::wrong_argument(method, "content", e))
}
