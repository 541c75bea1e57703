// tc-core/src/units.rs

use uom::si::f64::{
    Length as UomLength, MassDensity as UomMassDensity, Power as UomPower,
    ThermodynamicTemperature as UomThermodynamicTemperature, Velocity as UomVelocity,
};

// Public canonical unit types (SI, f64)
pub type Length = UomLength;
pub type Density = UomMassDensity;
pub type Power = UomPower;
pub type Temperature = UomThermodynamicTemperature;
pub type Velocity = UomVelocity;

#[inline]
pub fn k(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::kelvin;
    Temperature::new::<kelvin>(v)
}

#[inline]
pub fn m(v: f64) -> Length {
    use uom::si::length::meter;
    Length::new::<meter>(v)
}

#[inline]
pub fn mps(v: f64) -> Velocity {
    use uom::si::velocity::meter_per_second;
    Velocity::new::<meter_per_second>(v)
}

#[inline]
pub fn kg_m3(v: f64) -> Density {
    use uom::si::mass_density::kilogram_per_cubic_meter;
    Density::new::<kilogram_per_cubic_meter>(v)
}

#[inline]
pub fn watts(v: f64) -> Power {
    use uom::si::power::watt;
    Power::new::<watt>(v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_smoke() {
        let _t = k(573.15);
        let _l = m(0.1);
        let _u = mps(1.0);
        let _rho = kg_m3(1000.0);
        let _p = watts(1.0e6);
    }

    #[test]
    fn constructors_store_si_values() {
        assert_eq!(k(573.15).value, 573.15);
        assert_eq!(m(0.01).value, 0.01);
        assert_eq!(mps(1.0 / 3.0).value, 1.0 / 3.0);
        assert_eq!(kg_m3(600.0).value, 600.0);
    }
}
