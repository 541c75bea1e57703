//! Setups shared by the lifecycle integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use tc_core::units::{k, kg_m3, m, mps, watts};
use tc_problem::Problem;
use tc_props::{ConstantExchange, LinearEnthalpy};
use tc_solver::{ChannelSetup, NumericsSetup, SolidSetup, SolverSetup};

pub const INLET: f64 = 573.15;
pub const MEMORY: &str = "memory";

pub fn channel(thickness: f64, speed: f64, h: f64) -> ChannelSetup {
    ChannelSetup {
        thickness: m(thickness),
        density: kg_m3(1000.0),
        speed: mps(speed),
        inlet_temperature: k(INLET),
        enthalpy: Arc::new(LinearEnthalpy::new(5.0e3, 273.15, 0.0).unwrap()),
        exchange: Arc::new(ConstantExchange::new(h).unwrap()),
    }
}

/// 20 cells of 0.1 m, heated slab between a fast thin and a slow wide channel.
pub fn reference_setup() -> SolverSetup {
    SolverSetup {
        num_cells: 20,
        dz: m(0.1),
        dy: m(1.0),
        fluid_1: channel(0.01, 1.0, 1.0e3),
        fluid_2: channel(0.03, 1.0 / 3.0, 2.0e3),
        solid: SolidSetup {
            thickness: m(0.01),
            vol_heat_capacity: 3.0e6,
            total_power: watts(1.0e6),
        },
        numerics: NumericsSetup::default(),
    }
}

pub fn symmetric_setup(num_cells: usize) -> SolverSetup {
    SolverSetup {
        num_cells,
        dz: m(0.1),
        dy: m(1.0),
        fluid_1: channel(0.01, 1.0, 1.5e3),
        fluid_2: channel(0.01, 1.0, 1.5e3),
        solid: SolidSetup {
            thickness: m(0.01),
            vol_heat_capacity: 3.0e6,
            total_power: watts(0.0),
        },
        numerics: NumericsSetup::default(),
    }
}

pub fn initialized(setup: SolverSetup) -> Problem {
    let mut problem = Problem::new(setup).unwrap();
    assert!(problem.initialize().unwrap());
    problem
}

/// Drive the whole problem to its stationary state.
pub fn converge_stationary(problem: &mut Problem) {
    problem.init_stationary().unwrap();
    assert!(problem.solve_stationary().unwrap());
    problem.validate_stationary().unwrap();
}

pub fn step(problem: &mut Problem, dt: f64) -> bool {
    problem.init_time_step(dt).unwrap();
    let converged = problem.solve_time_step().unwrap();
    problem.validate_time_step().unwrap();
    converged
}
