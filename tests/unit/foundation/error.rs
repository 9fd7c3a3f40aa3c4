use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(CurveError::parse("x").to_string().contains("parse error:"));
    assert!(
        CurveError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        CurveError::host("x")
            .to_string()
            .contains("host unavailable:")
    );
    assert!(
        CurveError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn range_errors_join_fields_in_order() {
    let err = CurveError::range(vec![
        "a must be between 0 and 1".to_string(),
        "d must be a number".to_string(),
    ]);
    assert_eq!(
        err.to_string(),
        "range error: a must be between 0 and 1; d must be a number"
    );
    assert_eq!(
        err.user_message(),
        "a must be between 0 and 1; d must be a number"
    );
}

#[test]
fn selection_issues_have_distinct_messages() {
    let none = CurveError::selection(SelectionIssue::NoPropertySelected).user_message();
    let keys = CurveError::selection(SelectionIssue::NoKeyframesSelected).user_message();
    let comp = CurveError::selection(SelectionIssue::NoComposition).user_message();
    assert_ne!(none, keys);
    assert_ne!(none, comp);
    assert!(keys.contains("two keyframes"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = CurveError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
