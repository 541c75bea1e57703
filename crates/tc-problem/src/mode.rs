//! Domain selection.

use std::fmt;
use std::ops::BitOr;
use thiserror::Error;

/// One of the three indivisible domains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Elementary {
    Fluid1 = 1,
    Fluid2 = 2,
    Solid = 4,
}

impl Elementary {
    /// Ascending bit order.
    pub const ALL: [Elementary; 3] = [Elementary::Fluid1, Elementary::Fluid2, Elementary::Solid];

    pub fn bit(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Elementary::Fluid1 => "Fluid_1",
            Elementary::Fluid2 => "Fluid_2",
            Elementary::Solid => "Solid",
        }
    }
}

impl fmt::Display for Elementary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("unknown mode {0}")]
pub struct InvalidMode(pub i64);

/// Non-empty union of elementary domains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Mode(u8);

impl Mode {
    pub const FLUID_1: Mode = Mode(1);
    pub const FLUID_2: Mode = Mode(2);
    pub const FLUID: Mode = Mode(3);
    pub const SOLID: Mode = Mode(4);
    pub const ALL: Mode = Mode(7);

    pub fn from_bits(value: i64) -> Result<Self, InvalidMode> {
        if (1..=i64::from(Mode::ALL.0)).contains(&value) {
            Ok(Mode(value as u8))
        } else {
            Err(InvalidMode(value))
        }
    }

    /// Union of `parts`, `None` when empty.
    pub fn from_elementary<I>(parts: I) -> Option<Self>
    where
        I: IntoIterator<Item = Elementary>,
    {
        let bits = parts.into_iter().fold(0, |acc, e| acc | e.bit());
        (bits != 0).then_some(Mode(bits))
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn is_activated(self, elementary: Elementary) -> bool {
        self.0 & elementary.bit() != 0
    }

    /// Elementary domains present, in ascending bit order.
    pub fn decompose(self) -> Vec<Elementary> {
        Elementary::ALL
            .into_iter()
            .filter(|e| self.is_activated(*e))
            .collect()
    }

    /// Lowest elementary domain present.
    pub fn first(self) -> Elementary {
        if self.is_activated(Elementary::Fluid1) {
            Elementary::Fluid1
        } else if self.is_activated(Elementary::Fluid2) {
            Elementary::Fluid2
        } else {
            Elementary::Solid
        }
    }

    /// `true` when every domain of `other` is also in `self`.
    pub fn contains(self, other: Mode) -> bool {
        other.0 & !self.0 == 0
    }
}

impl Default for Mode {
    fn default() -> Self {
        Mode::ALL
    }
}

impl From<Elementary> for Mode {
    fn from(e: Elementary) -> Self {
        Mode(e.bit())
    }
}

impl TryFrom<i64> for Mode {
    type Error = InvalidMode;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Mode::from_bits(value)
    }
}

impl BitOr for Mode {
    type Output = Mode;

    fn bitor(self, rhs: Mode) -> Mode {
        Mode(self.0 | rhs.0)
    }
}

impl BitOr<Elementary> for Mode {
    type Output = Mode;

    fn bitor(self, rhs: Elementary) -> Mode {
        Mode(self.0 | rhs.bit())
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Mode::FLUID => f.write_str("Fluid"),
            Mode::ALL => f.write_str("All"),
            _ => {
                let names: Vec<&str> = self.decompose().into_iter().map(Elementary::name).collect();
                f.write_str(&names.join("+"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_constants() {
        assert_eq!(Mode::FLUID, Mode::FLUID_1 | Mode::FLUID_2);
        assert_eq!(Mode::ALL, Mode::FLUID | Elementary::Solid);
        assert_eq!(Mode::default(), Mode::ALL);
    }

    #[test]
    fn rejects_values_outside_the_flags() {
        assert!(Mode::from_bits(0).is_err());
        assert!(Mode::from_bits(8).is_err());
        assert!(Mode::from_bits(-1).is_err());
        assert_eq!(Mode::try_from(5).unwrap().decompose(), vec![
            Elementary::Fluid1,
            Elementary::Solid
        ]);
    }

    #[test]
    fn activation_and_inclusion() {
        let fluid = Mode::FLUID;
        assert!(fluid.is_activated(Elementary::Fluid1));
        assert!(fluid.is_activated(Elementary::Fluid2));
        assert!(!fluid.is_activated(Elementary::Solid));
        assert!(Mode::ALL.contains(fluid));
        assert!(!fluid.contains(Mode::SOLID));
        assert!(fluid.contains(Mode::FLUID_2));
        assert_eq!(fluid.first(), Elementary::Fluid1);
        assert_eq!(Mode::from_bits(6).unwrap().first(), Elementary::Fluid2);
    }

    #[test]
    fn display_names() {
        assert_eq!(Mode::FLUID_1.to_string(), "Fluid_1");
        assert_eq!(Mode::FLUID.to_string(), "Fluid");
        assert_eq!(Mode::ALL.to_string(), "All");
        assert_eq!(Mode::from_bits(6).unwrap().to_string(), "Fluid_2+Solid");
    }

    #[test]
    fn empty_union_is_none() {
        assert_eq!(Mode::from_elementary([]), None);
        assert_eq!(
            Mode::from_elementary([Elementary::Solid, Elementary::Fluid1]),
            Mode::from_bits(5).ok()
        );
    }
}
