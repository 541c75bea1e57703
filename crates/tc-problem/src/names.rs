//! Names accepted by the field, array and value interfaces.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldName {
    /// Input: power per cell [W]
    Power,
    TemperatureFluid1,
    TemperatureFluid2,
    TemperatureSolid,
}

impl FieldName {
    pub const INPUTS: [FieldName; 1] = [FieldName::Power];
    pub const OUTPUTS: [FieldName; 3] = [
        FieldName::TemperatureFluid1,
        FieldName::TemperatureFluid2,
        FieldName::TemperatureSolid,
    ];

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "power" => Some(FieldName::Power),
            "temperature_fluid_1" => Some(FieldName::TemperatureFluid1),
            "temperature_fluid_2" => Some(FieldName::TemperatureFluid2),
            "temperature_solid" => Some(FieldName::TemperatureSolid),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FieldName::Power => "power",
            FieldName::TemperatureFluid1 => "temperature_fluid_1",
            FieldName::TemperatureFluid2 => "temperature_fluid_2",
            FieldName::TemperatureSolid => "temperature_solid",
        }
    }

    pub fn is_temperature(self) -> bool {
        self != FieldName::Power
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueName {
    Mode,
    Precision,
    MaxIter,
    /// Output only
    Residual,
}

impl ValueName {
    pub const INPUTS: [ValueName; 3] = [ValueName::Mode, ValueName::Precision, ValueName::MaxIter];
    pub const OUTPUTS: [ValueName; 4] = [
        ValueName::Mode,
        ValueName::Precision,
        ValueName::MaxIter,
        ValueName::Residual,
    ];

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "mode" => Some(ValueName::Mode),
            "precision" => Some(ValueName::Precision),
            "max_iter" => Some(ValueName::MaxIter),
            "residual" => Some(ValueName::Residual),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ValueName::Mode => "mode",
            ValueName::Precision => "precision",
            ValueName::MaxIter => "max_iter",
            ValueName::Residual => "residual",
        }
    }

    pub fn value_type(self) -> ValueType {
        match self {
            ValueName::Mode => ValueType::Int,
            _ => ValueType::Double,
        }
    }
}

impl fmt::Display for ValueName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Int,
    Double,
    String,
}
