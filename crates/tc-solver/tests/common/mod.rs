//! Shared setups for the coupled solver integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use tc_core::units::{k, kg_m3, m, mps, watts};
use tc_props::{ConstantExchange, LinearEnthalpy, SharedEnthalpy, SharedExchange};
use tc_solver::{ChannelSetup, NumericsSetup, SolidSetup, SolverSetup};

pub const CP: f64 = 5.0e3;
pub const INLET: f64 = 573.15;

pub fn enthalpy() -> SharedEnthalpy {
    Arc::new(LinearEnthalpy::new(CP, 273.15, 0.0).unwrap())
}

pub fn exchange(h: f64) -> SharedExchange {
    Arc::new(ConstantExchange::new(h).unwrap())
}

pub fn channel(thickness: f64, speed: f64, h: f64) -> ChannelSetup {
    ChannelSetup {
        thickness: m(thickness),
        density: kg_m3(1000.0),
        speed: mps(speed),
        inlet_temperature: k(INLET),
        enthalpy: enthalpy(),
        exchange: exchange(h),
    }
}

/// Two channels of different width and speed around a 1 MW slab, 20 cells.
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

/// Mirror-symmetric channels, no power.
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

/// Heat carried away by a channel [W]: u ρ e dy cp (T_out - T_in).
pub fn channel_heat_gain(speed: f64, thickness: f64, dy: f64, temperatures: &[f64]) -> f64 {
    let outlet = temperatures[temperatures.len() - 1];
    speed * 1000.0 * thickness * dy * CP * (outlet - temperatures[0])
}
