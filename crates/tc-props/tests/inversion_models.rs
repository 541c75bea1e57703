//! Inversion against the concrete enthalpy models.

use std::sync::Arc;
use tc_props::{
    EnthalpyModel, InversionConfig, LinearEnthalpy, SharedEnthalpy, TabulatedEnthalpy,
    temperature_from_enthalpy,
};

#[test]
fn tabulated_inversion_lands_on_segment() {
    let table = TabulatedEnthalpy::new(&[
        (500.0, 1.00e6),
        (550.0, 1.24e6),
        (600.0, 1.50e6),
        (650.0, 1.80e6),
    ])
    .unwrap();
    let target = table.enthalpy(587.5);
    let t = temperature_from_enthalpy(&table, target, 520.0, &InversionConfig::default()).unwrap();
    assert!((t - 587.5).abs() < 1e-6, "got {t}");
}

#[test]
fn shared_handle_inverts_like_the_model() {
    let linear = LinearEnthalpy::new(5.5e3, 273.15, 0.0).unwrap();
    let shared: SharedEnthalpy = Arc::new(linear);
    let target = linear.enthalpy(580.0);
    let t = temperature_from_enthalpy(shared.as_ref(), target, 573.15, &InversionConfig::default())
        .unwrap();
    assert!((t - linear.temperature(target)).abs() < 1e-9);
}

#[test]
fn tight_budget_reports_divergence() {
    let table = TabulatedEnthalpy::new(&[(300.0, 0.0), (301.0, 1.0), (900.0, 1.0e7)]).unwrap();
    let config = InversionConfig {
        max_iter: 1,
        ..InversionConfig::default()
    };
    let result = temperature_from_enthalpy(&table, 5.0e6, 300.0, &config);
    assert!(result.is_err());
}
