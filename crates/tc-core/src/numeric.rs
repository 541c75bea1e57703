/// Floating point type used throughout system
pub type Real = f64;

/// Largest absolute pointwise difference between two profiles.
///
/// Extra trailing entries of the longer slice are ignored.
pub fn max_abs_diff(a: &[Real], b: &[Real]) -> Real {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, Real::max)
}
