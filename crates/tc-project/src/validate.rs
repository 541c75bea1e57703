//! Case validation.

use crate::schema::{CaseDef, ChannelDef, EnthalpyDef, ExchangeDef, IterationDef};

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

/// Every problem found in a case.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationReport {
    pub issues: Vec<ValidationError>,
}

impl std::fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} problem(s) in case", self.issues.len())?;
        for issue in &self.issues {
            write!(f, "\n  - {issue}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationReport {}

#[derive(Default)]
struct Collector {
    issues: Vec<ValidationError>,
}

impl Collector {
    fn invalid(&mut self, field: &str, value: impl ToString, reason: &str) {
        self.issues.push(ValidationError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        });
    }

    fn positive(&mut self, field: &str, value: f64) {
        if !(value.is_finite() && value > 0.0) {
            self.invalid(field, value, "must be positive and finite");
        }
    }

    fn non_negative(&mut self, field: &str, value: f64) {
        if !(value.is_finite() && value >= 0.0) {
            self.invalid(field, value, "must be non-negative and finite");
        }
    }

    fn finite(&mut self, field: &str, value: f64) {
        if !value.is_finite() {
            self.invalid(field, value, "must be finite");
        }
    }
}

pub fn validate_case(case: &CaseDef) -> Result<(), ValidationReport> {
    let mut c = Collector::default();

    if case.version > crate::CASE_VERSION {
        c.issues.push(ValidationError::UnsupportedVersion {
            version: case.version,
        });
    }

    if case.mesh.num_cells == 0 {
        c.invalid("mesh.num_cells", 0, "at least one cell is required");
    }
    c.positive("mesh.dz_m", case.mesh.dz_m);
    c.positive("mesh.dy_m", case.mesh.dy_m);

    validate_enthalpy(&mut c, &case.enthalpy);
    validate_channel(&mut c, "fluid_1", &case.fluid_1);
    validate_channel(&mut c, "fluid_2", &case.fluid_2);

    c.positive("solid.thickness_m", case.solid.thickness_m);
    c.positive(
        "solid.vol_heat_capacity_j_m3k",
        case.solid.vol_heat_capacity_j_m3k,
    );
    c.finite("solid.total_power_w", case.solid.total_power_w);

    for (name, params) in [
        ("fluid_1", &case.numerics.fluid_1),
        ("fluid_2", &case.numerics.fluid_2),
        ("solid", &case.numerics.solid),
        ("coupling", &case.numerics.coupling),
    ] {
        validate_iteration(&mut c, name, params);
    }

    if c.issues.is_empty() {
        Ok(())
    } else {
        Err(ValidationReport { issues: c.issues })
    }
}

fn validate_enthalpy(c: &mut Collector, enthalpy: &EnthalpyDef) {
    match enthalpy {
        EnthalpyDef::Linear {
            cp_j_kgk,
            t_ref_k,
            h_ref_j_kg,
        } => {
            c.positive("enthalpy.cp_j_kgk", *cp_j_kgk);
            c.finite("enthalpy.t_ref_k", *t_ref_k);
            c.finite("enthalpy.h_ref_j_kg", *h_ref_j_kg);
        }
        EnthalpyDef::Tabulated { points } => {
            if points.len() < 2 {
                c.invalid("enthalpy.points", points.len(), "at least two points are required");
            }
            for (i, pair) in points.windows(2).enumerate() {
                if !(pair[1].temperature_k > pair[0].temperature_k) {
                    c.invalid(
                        &format!("enthalpy.points[{}].temperature_k", i + 1),
                        pair[1].temperature_k,
                        "temperatures must be strictly increasing",
                    );
                }
                if !(pair[1].enthalpy_j_kg > pair[0].enthalpy_j_kg) {
                    c.invalid(
                        &format!("enthalpy.points[{}].enthalpy_j_kg", i + 1),
                        pair[1].enthalpy_j_kg,
                        "enthalpy must increase with temperature",
                    );
                }
            }
        }
    }
}

fn validate_channel(c: &mut Collector, name: &str, channel: &ChannelDef) {
    c.positive(&format!("{name}.thickness_m"), channel.thickness_m);
    c.non_negative(&format!("{name}.speed_mps"), channel.speed_mps);
    c.positive(&format!("{name}.density_kg_m3"), channel.density_kg_m3);
    c.positive(
        &format!("{name}.inlet_temperature_k"),
        channel.inlet_temperature_k,
    );
    match &channel.exchange {
        ExchangeDef::Constant { h_w_m2k } => {
            c.non_negative(&format!("{name}.exchange.h_w_m2k"), *h_w_m2k);
        }
        ExchangeDef::Series {
            h_fluid_w_m2k,
            conductivity,
        } => {
            c.non_negative(&format!("{name}.exchange.h_fluid_w_m2k"), *h_fluid_w_m2k);
            c.finite(&format!("{name}.exchange.conductivity.a"), conductivity.a);
            c.finite(&format!("{name}.exchange.conductivity.b"), conductivity.b);
        }
    }
}

fn validate_iteration(c: &mut Collector, name: &str, params: &IterationDef) {
    c.positive(&format!("numerics.{name}.precision"), params.precision);
}
