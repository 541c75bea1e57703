//! Orchestration of a problem through its lifecycle.

use crate::error::{CliError, CliResult};
use serde::Serialize;
use tc_problem::Problem;
use tracing::{info, warn};

/// Smallest step tried before a transient gives up.
const MIN_DT: f64 = 1e-9;

#[derive(Debug, Clone, Serialize)]
pub struct CellRow {
    pub z_m: f64,
    pub fluid_1_k: f64,
    pub fluid_2_k: f64,
    pub solid_k: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Profiles {
    pub time_s: f64,
    pub residual: f64,
    pub steps: usize,
    pub cutbacks: usize,
    pub cells: Vec<CellRow>,
}

pub fn steady(problem: &mut Problem) -> CliResult<Profiles> {
    problem.init_stationary()?;
    if !problem.solve_stationary()? {
        let message = problem.last_error_message()?.to_string();
        problem.abort_stationary()?;
        return Err(CliError::Solve(message));
    }
    problem.validate_stationary()?;
    profiles(problem, 0, 0)
}

pub struct TransientOptions {
    pub dt: f64,
    pub t_end: f64,
    pub stationary_mode: bool,
    pub stop_when_stationary: bool,
}

/// March to `t_end`, halving the step after each failed solve.
pub fn transient(problem: &mut Problem, options: &TransientOptions) -> CliResult<Profiles> {
    if !(options.dt > 0.0 && options.t_end > 0.0) {
        return Err(CliError::InvalidInput(format!(
            "dt and t_end must be positive (dt = {}, t_end = {})",
            options.dt, options.t_end
        )));
    }
    problem.set_stationary_mode(options.stationary_mode)?;

    let mut dt = options.dt;
    let mut steps = 0;
    let mut cutbacks = 0;
    loop {
        let time = problem.present_time()?;
        let remaining = options.t_end - time;
        if remaining <= 1e-12 * options.t_end {
            break;
        }
        let step = dt.min(remaining);

        if !problem.init_time_step(step)? {
            warn!(dt = step, "step exceeds the transport bound");
        }
        if problem.solve_time_step()? {
            problem.validate_time_step()?;
            steps += 1;
            info!(time = time + step, dt = step, "step validated");
            if options.stop_when_stationary && problem.is_stationary()? {
                info!(time = time + step, "stationary state reached");
                break;
            }
            dt = options.dt.min(2.0 * dt);
        } else {
            let message = problem.last_error_message()?.to_string();
            problem.abort_time_step()?;
            cutbacks += 1;
            dt = 0.5 * step;
            warn!(dt, reason = %message, "step rejected, retrying");
            if dt < MIN_DT {
                return Err(CliError::Solve(message));
            }
        }
    }
    profiles(problem, steps, cutbacks)
}

fn profiles(problem: &Problem, steps: usize, cutbacks: usize) -> CliResult<Profiles> {
    let fluid_1 = problem.algebraic_data("temperature_fluid_1")?;
    let fluid_2 = problem.algebraic_data("temperature_fluid_2")?;
    let solid = problem.algebraic_data("temperature_solid")?;
    let centers = problem.mesh()?.cell_centers();

    let cells = centers
        .iter()
        .enumerate()
        .map(|(i, z)| CellRow {
            z_m: *z,
            fluid_1_k: fluid_1[i],
            fluid_2_k: fluid_2[i],
            solid_k: solid[i],
        })
        .collect();

    Ok(Profiles {
        time_s: problem.present_time()?,
        residual: problem.output_double_value("residual")?,
        steps,
        cutbacks,
        cells,
    })
}
