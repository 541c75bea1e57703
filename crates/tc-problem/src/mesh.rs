//! One-dimensional mesh and cell fields handed across the problem boundary.

use std::fmt;

/// Conservation nature of a cell field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldNature {
    /// Sums under refinement (powers)
    ExtensiveMaximum,
    /// Averages under refinement (temperatures)
    IntensiveMaximum,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeSemantics {
    Constant,
    EndOfTimeStep,
}

impl TimeSemantics {
    pub fn as_str(self) -> &'static str {
        match self {
            TimeSemantics::Constant => "constant",
            TimeSemantics::EndOfTimeStep => "end_of_time_step",
        }
    }
}

impl fmt::Display for TimeSemantics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Uniform 1-D mesh of `N` cells along the flow direction.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh1D {
    name: String,
    coordinates: Vec<f64>,
}

impl Mesh1D {
    pub const DEFAULT_NAME: &'static str = "1DMesh";
    pub const UNIT: &'static str = "m";

    /// `num_cells + 1` nodes starting at 0 with pitch `dz`.
    pub fn uniform(name: impl Into<String>, num_cells: usize, dz: f64) -> Self {
        Self {
            name: name.into(),
            coordinates: (0..=num_cells).map(|i| i as f64 * dz).collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn num_cells(&self) -> usize {
        self.coordinates.len().saturating_sub(1)
    }

    pub fn coordinates(&self) -> &[f64] {
        &self.coordinates
    }

    pub fn cell_centers(&self) -> Vec<f64> {
        self.coordinates
            .windows(2)
            .map(|w| 0.5 * (w[0] + w[1]))
            .collect()
    }
}

/// Cell-centered scalar field on a [`Mesh1D`].
#[derive(Debug, Clone, PartialEq)]
pub struct CellField {
    pub name: String,
    pub mesh_name: String,
    pub values: Vec<f64>,
    pub nature: FieldNature,
    pub unit: &'static str,
    pub time_semantics: TimeSemantics,
}

impl CellField {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_nodes_and_centers() {
        let mesh = Mesh1D::uniform(Mesh1D::DEFAULT_NAME, 4, 0.5);
        assert_eq!(mesh.name(), "1DMesh");
        assert_eq!(mesh.num_cells(), 4);
        assert_eq!(mesh.coordinates(), &[0.0, 0.5, 1.0, 1.5, 2.0]);
        assert_eq!(mesh.cell_centers(), vec![0.25, 0.75, 1.25, 1.75]);
    }
}
