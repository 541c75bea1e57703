use tc_project::*;

#[test]
fn template_is_valid() {
    validate_case(&CaseDef::template()).unwrap();
}

#[test]
fn every_problem_is_reported() {
    let mut case = CaseDef::template();
    case.mesh.num_cells = 0;
    case.fluid_1.speed_mps = -1.0;
    case.fluid_2.density_kg_m3 = f64::NAN;
    case.solid.vol_heat_capacity_j_m3k = 0.0;
    case.numerics.coupling.precision = 0.0;

    let report = validate_case(&case).unwrap_err();
    assert_eq!(report.issues.len(), 5);

    let fields: Vec<String> = report
        .issues
        .iter()
        .filter_map(|issue| match issue {
            ValidationError::InvalidValue { field, .. } => Some(field.clone()),
            _ => None,
        })
        .collect();
    assert!(fields.contains(&"mesh.num_cells".to_string()));
    assert!(fields.contains(&"fluid_1.speed_mps".to_string()));
    assert!(fields.contains(&"fluid_2.density_kg_m3".to_string()));
    assert!(fields.contains(&"numerics.coupling.precision".to_string()));
    assert!(report.to_string().starts_with("5 problem(s)"));
}

#[test]
fn table_must_increase() {
    let mut case = CaseDef::template();
    case.enthalpy = EnthalpyDef::Tabulated {
        points: vec![
            TablePointDef {
                temperature_k: 600.0,
                enthalpy_j_kg: 1.5e6,
            },
            TablePointDef {
                temperature_k: 550.0,
                enthalpy_j_kg: 1.4e6,
            },
        ],
    };
    let report = validate_case(&case).unwrap_err();
    assert_eq!(report.issues.len(), 2);
}

#[test]
fn newer_versions_are_rejected() {
    let mut case = CaseDef::template();
    case.version = CASE_VERSION + 1;
    let report = validate_case(&case).unwrap_err();
    assert_eq!(
        report.issues,
        vec![ValidationError::UnsupportedVersion {
            version: CASE_VERSION + 1
        }]
    );
}
