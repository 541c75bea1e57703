//! Turn a validated case into a solver setup.

use crate::schema::{CaseDef, ChannelDef, EnthalpyDef, ExchangeDef, IterationDef};
use crate::{ProjectError, ProjectResult};
use std::sync::Arc;
use tc_core::units::{k, kg_m3, m, mps, watts};
use tc_props::{
    ConstantExchange, LinearConductivity, LinearEnthalpy, SeriesExchange, SharedEnthalpy,
    SharedExchange, TabulatedEnthalpy,
};
use tc_solver::{ChannelSetup, IterationParams, NumericsSetup, SolidSetup, SolverSetup};

pub fn compile_case(case: &CaseDef) -> ProjectResult<SolverSetup> {
    crate::validate_case(case)?;

    let enthalpy = compile_enthalpy(&case.enthalpy)?;
    let solid_thickness = case.solid.thickness_m;
    let channel = |def: &ChannelDef, what: &str| -> ProjectResult<ChannelSetup> {
        Ok(ChannelSetup {
            thickness: m(def.thickness_m),
            density: kg_m3(def.density_kg_m3),
            speed: mps(def.speed_mps),
            inlet_temperature: k(def.inlet_temperature_k),
            enthalpy: enthalpy.clone(),
            exchange: compile_exchange(&def.exchange, solid_thickness, what)?,
        })
    };

    Ok(SolverSetup {
        num_cells: case.mesh.num_cells,
        dz: m(case.mesh.dz_m),
        dy: m(case.mesh.dy_m),
        fluid_1: channel(&case.fluid_1, "fluid_1 exchange")?,
        fluid_2: channel(&case.fluid_2, "fluid_2 exchange")?,
        solid: SolidSetup {
            thickness: m(solid_thickness),
            vol_heat_capacity: case.solid.vol_heat_capacity_j_m3k,
            total_power: watts(case.solid.total_power_w),
        },
        numerics: NumericsSetup {
            fluid_1: iteration(&case.numerics.fluid_1),
            fluid_2: iteration(&case.numerics.fluid_2),
            solid: iteration(&case.numerics.solid),
            coupling: iteration(&case.numerics.coupling),
        },
    })
}

fn compile_enthalpy(def: &EnthalpyDef) -> ProjectResult<SharedEnthalpy> {
    let model: SharedEnthalpy = match def {
        EnthalpyDef::Linear {
            cp_j_kgk,
            t_ref_k,
            h_ref_j_kg,
        } => Arc::new(
            LinearEnthalpy::new(*cp_j_kgk, *t_ref_k, *h_ref_j_kg).map_err(|e| compile_error("enthalpy", e))?,
        ),
        EnthalpyDef::Tabulated { points } => {
            let pairs: Vec<(f64, f64)> = points
                .iter()
                .map(|p| (p.temperature_k, p.enthalpy_j_kg))
                .collect();
            Arc::new(TabulatedEnthalpy::new(&pairs).map_err(|e| compile_error("enthalpy", e))?)
        }
    };
    Ok(model)
}

fn compile_exchange(
    def: &ExchangeDef,
    solid_thickness: f64,
    what: &str,
) -> ProjectResult<SharedExchange> {
    let model: SharedExchange = match def {
        ExchangeDef::Constant { h_w_m2k } => {
            Arc::new(ConstantExchange::new(*h_w_m2k).map_err(|e| compile_error(what, e))?)
        }
        ExchangeDef::Series {
            h_fluid_w_m2k,
            conductivity,
        } => {
            let conductivity = LinearConductivity {
                a: conductivity.a,
                b: conductivity.b,
            };
            Arc::new(
                SeriesExchange::new(*h_fluid_w_m2k, conductivity, solid_thickness)
                    .map_err(|e| compile_error(what, e))?,
            )
        }
    };
    Ok(model)
}

fn iteration(def: &IterationDef) -> IterationParams {
    IterationParams::new(def.precision, def.max_iter)
}

fn compile_error(what: &str, err: impl std::fmt::Display) -> ProjectError {
    ProjectError::Compile {
        what: format!("{what}: {err}"),
    }
}
