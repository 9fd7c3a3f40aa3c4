use super::*;

#[test]
fn builtin_presets_all_validate() {
    let presets = builtin_presets();
    assert!(presets.len() >= 5);
    for p in &presets {
        p.curve()
            .unwrap_or_else(|e| panic!("{}: {}", p.label, e.user_message()));
    }
}

#[test]
fn parse_presets_reads_panel_format() {
    let json = r#"[
        { "label": "Snappy", "tooltip": "Fast out", "bezier": "0.1,0.9,0.2,1" },
        { "label": "Broken", "bezier": "2,0,0,0" }
    ]"#;
    let presets = parse_presets(json).unwrap();
    assert_eq!(presets.len(), 2);
    assert_eq!(presets[1].tooltip, "");
    assert_eq!(
        presets[0].curve().unwrap(),
        BezierCurve::new(0.1, 0.9, 0.2, 1.0)
    );
    assert!(matches!(presets[1].curve(), Err(CurveError::Range(_))));
}

#[test]
fn malformed_json_is_a_serde_error() {
    assert!(matches!(
        parse_presets(r#"{"label":"x"}"#),
        Err(CurveError::Serde(_))
    ));
}

#[test]
fn missing_file_is_reported_with_path() {
    let err = load_presets(Path::new("target/definitely/missing/graphs.json")).unwrap_err();
    assert!(matches!(err, CurveError::Other(_)));
    assert!(err.to_string().contains("graphs.json"));
}

#[test]
fn find_preset_ignores_case() {
    let presets = builtin_presets();
    assert_eq!(find_preset(&presets, "EASE-IN").unwrap().label, "ease-in");
    assert!(find_preset(&presets, "nope").is_none());
}
