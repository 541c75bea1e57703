//! Case file schema.

use serde::{Deserialize, Serialize};

/// One two-channel problem.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CaseDef {
    pub version: u32,
    pub name: String,
    pub mesh: MeshDef,
    /// Shared by both channels
    pub enthalpy: EnthalpyDef,
    pub fluid_1: ChannelDef,
    pub fluid_2: ChannelDef,
    pub solid: SolidDef,
    #[serde(default)]
    pub numerics: NumericsDef,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MeshDef {
    pub num_cells: usize,
    pub dz_m: f64,
    pub dy_m: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum EnthalpyDef {
    Linear {
        cp_j_kgk: f64,
        t_ref_k: f64,
        h_ref_j_kg: f64,
    },
    Tabulated {
        points: Vec<TablePointDef>,
    },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TablePointDef {
    pub temperature_k: f64,
    pub enthalpy_j_kg: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChannelDef {
    pub thickness_m: f64,
    pub speed_mps: f64,
    pub density_kg_m3: f64,
    pub inlet_temperature_k: f64,
    pub exchange: ExchangeDef,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum ExchangeDef {
    Constant {
        h_w_m2k: f64,
    },
    /// Half solid thickness of conduction in series with a film coefficient
    Series {
        h_fluid_w_m2k: f64,
        conductivity: ConductivityDef,
    },
}

/// `λ(T) = a + b·T` [W/(m·K)]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ConductivityDef {
    pub a: f64,
    #[serde(default)]
    pub b: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SolidDef {
    pub thickness_m: f64,
    pub vol_heat_capacity_j_m3k: f64,
    #[serde(default)]
    pub total_power_w: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct NumericsDef {
    #[serde(default)]
    pub fluid_1: IterationDef,
    #[serde(default)]
    pub fluid_2: IterationDef,
    #[serde(default)]
    pub solid: IterationDef,
    #[serde(default)]
    pub coupling: IterationDef,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct IterationDef {
    #[serde(default = "default_precision")]
    pub precision: f64,
    #[serde(default = "default_max_iter")]
    pub max_iter: usize,
}

fn default_precision() -> f64 {
    1e-6
}

fn default_max_iter() -> usize {
    100
}

impl Default for IterationDef {
    fn default() -> Self {
        Self {
            precision: default_precision(),
            max_iter: default_max_iter(),
        }
    }
}

impl CaseDef {
    /// Pressurized water on both sides of a 1 MW oxide plate, 20 cells.
    pub fn template() -> Self {
        let conductivity = ConductivityDef { a: 6.0, b: -3.0e-3 };
        let channel = |thickness_m: f64, speed_mps: f64, h_fluid_w_m2k: f64| ChannelDef {
            thickness_m,
            speed_mps,
            density_kg_m3: 1000.0,
            inlet_temperature_k: 573.15,
            exchange: ExchangeDef::Series {
                h_fluid_w_m2k,
                conductivity,
            },
        };
        Self {
            version: crate::CASE_VERSION,
            name: "two-channel plate".to_string(),
            mesh: MeshDef {
                num_cells: 20,
                dz_m: 0.1,
                dy_m: 1.0,
            },
            enthalpy: EnthalpyDef::Linear {
                cp_j_kgk: 5.5e3,
                t_ref_k: 573.15,
                h_ref_j_kg: 1.344e6,
            },
            fluid_1: channel(0.01, 1.0, 1.0e3),
            fluid_2: channel(0.03, 1.0 / 3.0, 2.0e3),
            solid: SolidDef {
                thickness_m: 0.01,
                vol_heat_capacity_j_m3k: 3.3e6,
                total_power_w: 1.0e6,
            },
            numerics: NumericsDef::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tagged_models_read_from_yaml() {
        let yaml = r#"
type: Series
h_fluid_w_m2k: 1500.0
conductivity:
  a: 4.0
"#;
        let exchange: ExchangeDef = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            exchange,
            ExchangeDef::Series {
                h_fluid_w_m2k: 1500.0,
                conductivity: ConductivityDef { a: 4.0, b: 0.0 },
            }
        );
    }

    #[test]
    fn numerics_block_is_optional() {
        let mut value = serde_json::to_value(CaseDef::template()).unwrap();
        value.as_object_mut().unwrap().remove("numerics");
        let case: CaseDef = serde_json::from_value(value).unwrap();
        assert_eq!(case.numerics, NumericsDef::default());
        assert_eq!(case.numerics.coupling.max_iter, 100);
    }
}
