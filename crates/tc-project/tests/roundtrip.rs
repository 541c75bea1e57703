use tc_project::*;

fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(name)
}

#[test]
fn roundtrip_yaml_template() {
    let case = CaseDef::template();
    validate_case(&case).unwrap();

    let path = temp_path("tc_project_roundtrip_template.yaml");
    save_yaml(&path, &case).unwrap();
    let loaded = load_yaml(&path).unwrap();

    assert_eq!(case, loaded);
}

#[test]
fn roundtrip_json_tabulated_case() {
    let mut case = CaseDef::template();
    case.name = "tabulated water".to_string();
    case.enthalpy = EnthalpyDef::Tabulated {
        points: vec![
            TablePointDef {
                temperature_k: 550.0,
                enthalpy_j_kg: 1.22e6,
            },
            TablePointDef {
                temperature_k: 600.0,
                enthalpy_j_kg: 1.50e6,
            },
            TablePointDef {
                temperature_k: 620.0,
                enthalpy_j_kg: 1.64e6,
            },
        ],
    };
    case.fluid_2.exchange = ExchangeDef::Constant { h_w_m2k: 2.0e3 };
    case.numerics.coupling = IterationDef {
        precision: 1e-8,
        max_iter: 250,
    };

    let path = temp_path("tc_project_roundtrip_tabulated.json");
    save_json(&path, &case).unwrap();
    assert_eq!(load_case(&path).unwrap(), case);
}

#[test]
fn saving_an_invalid_case_fails() {
    let mut case = CaseDef::template();
    case.mesh.dz_m = -1.0;
    let path = temp_path("tc_project_invalid.yaml");
    assert!(matches!(
        save_yaml(&path, &case),
        Err(ProjectError::Validation(_))
    ));
}

#[test]
fn loading_rejects_unknown_model_tags() {
    let path = temp_path("tc_project_unknown_tag.yaml");
    let yaml = serde_yaml::to_string(&CaseDef::template())
        .unwrap()
        .replace("type: Linear", "type: Cubic");
    std::fs::write(&path, yaml).unwrap();
    assert!(matches!(load_yaml(&path), Err(ProjectError::Yaml(_))));
}
