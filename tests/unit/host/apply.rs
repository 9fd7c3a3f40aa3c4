use super::*;
use crate::ease::convert::KeyframeSample;
use crate::host::accessor::{PropertyId, PropertySelection, SelectedKey};
use crate::host::memory::InMemoryHost;

fn host_with_position() -> InMemoryHost {
    let mut host = InMemoryHost::new();
    let p = host.add_property("Position", true).unwrap();
    host.add_key(p, KeyframeSample::new(0.0, vec![0.0, 0.0]), true);
    host.add_key(p, KeyframeSample::new(1.0, vec![100.0, 50.0]), true);
    host.add_key(p, KeyframeSample::new(3.0, vec![100.0, 250.0]), true);
    host
}

#[test]
fn middle_key_gets_in_from_earlier_pair_and_out_from_later_pair() {
    let mut host = host_with_position();
    let report = apply_curve(&mut host, BezierCurve::new(0.5, 1.0, 0.5, 0.0)).unwrap();
    assert_eq!(report.applied, vec!["Position".to_string()]);
    assert_eq!(report.pairs, 2);
    assert_eq!(report.plan.len(), 3);

    let id = PropertyId(0);
    let first = report.plan.get(id, 0).unwrap();
    assert!(first.in_ease.is_none());
    let middle = report.plan.get(id, 1).unwrap();
    let last = report.plan.get(id, 2).unwrap();
    assert!(last.out_ease.is_none());

    // pair 0->1: avg (100, 50); pair 1->2: avg (0, 100)
    let middle_in: Vec<f64> = middle.in_ease.as_ref().unwrap().iter().map(|e| e.speed).collect();
    let middle_out: Vec<f64> = middle.out_ease.as_ref().unwrap().iter().map(|e| e.speed).collect();
    assert_eq!(middle_in, vec![200.0, 100.0]);
    assert_eq!(middle_out, vec![0.0, 200.0]);
    assert_eq!(host.write_count(), 1);
}

#[test]
fn single_selected_key_is_insufficient_and_never_writes() {
    let mut host = InMemoryHost::new();
    let p = host.add_property("Opacity", true).unwrap();
    host.add_key(p, KeyframeSample::new(0.0, 0.0), true);
    host.add_key(p, KeyframeSample::new(1.0, 100.0), false);

    let err = apply_curve(&mut host, BezierCurve::new(0.25, 0.0, 0.75, 1.0)).unwrap_err();
    assert!(matches!(
        err,
        CurveError::InsufficientSelection(SelectionIssue::NoKeyframesSelected)
    ));
    assert_eq!(host.read_count(), 1);
    assert_eq!(host.write_count(), 0);
}

#[test]
fn no_property_and_no_composition_are_distinct() {
    let curve = BezierCurve::new(0.25, 0.0, 0.75, 1.0);

    let mut empty = InMemoryHost::new();
    let p = empty.add_property("Scale", false).unwrap();
    empty.add_key(p, KeyframeSample::new(0.0, 1.0), true);
    empty.add_key(p, KeyframeSample::new(1.0, 2.0), true);
    assert!(matches!(
        apply_curve(&mut empty, curve),
        Err(CurveError::InsufficientSelection(
            SelectionIssue::NoPropertySelected
        ))
    ));

    let mut closed = InMemoryHost::closed();
    assert!(matches!(
        apply_curve(&mut closed, curve),
        Err(CurveError::InsufficientSelection(SelectionIssue::NoComposition))
    ));
}

#[test]
fn ineligible_properties_are_skipped_not_fatal() {
    let mut host = host_with_position();
    let r = host.add_property("Rotation", true).unwrap();
    host.add_key(r, KeyframeSample::new(0.0, 0.0), true);

    let report = apply_curve(&mut host, BezierCurve::new(0.3, 0.0, 0.7, 1.0)).unwrap();
    assert_eq!(report.applied, vec!["Position".to_string()]);
    assert_eq!(report.skipped, vec!["Rotation".to_string()]);
    assert!(report.plan.writes().all(|w| w.property == PropertyId(0)));
}

#[test]
fn invalid_curve_is_rejected_before_reading_the_host() {
    let mut host = host_with_position();
    let err = apply_curve(&mut host, BezierCurve::new(1.5, 0.0, 0.5, 0.5)).unwrap_err();
    assert!(matches!(err, CurveError::Range(_)));
    assert_eq!(host.read_count(), 0);
}

#[test]
fn host_failure_propagates_and_leaves_keys_untouched() {
    let mut host = host_with_position();
    let before = host.property("Position").unwrap().clone();
    host.set_fail_writes(true);

    let err = apply_curve(&mut host, BezierCurve::new(0.4, 0.2, 0.6, 0.8)).unwrap_err();
    assert!(matches!(err, CurveError::HostUnavailable(_)));
    assert_eq!(host.property("Position").unwrap(), &before);
}

#[test]
fn unsorted_selection_is_applied_in_key_order() {
    struct Scrambled;

    impl HostAccessor for Scrambled {
        fn read_selection(&mut self) -> CurveResult<Selection> {
            Ok(Selection::Properties(vec![PropertySelection {
                id: PropertyId(2),
                name: "Value".into(),
                keys: vec![
                    SelectedKey {
                        index: 7,
                        sample: KeyframeSample::new(2.0, 20.0),
                    },
                    SelectedKey {
                        index: 3,
                        sample: KeyframeSample::new(0.0, 0.0),
                    },
                ],
            }]))
        }

        fn write_ease(&mut self, _plan: &EasePlan) -> CurveResult<()> {
            Ok(())
        }
    }

    let report = apply_curve(&mut Scrambled, BezierCurve::new(0.5, 1.0, 0.5, 1.0)).unwrap();
    let out = report.plan.get(PropertyId(2), 3).unwrap().out_ease.as_ref().unwrap();
    assert_eq!(out[0].speed, 20.0);
    assert!(report.plan.get(PropertyId(2), 7).unwrap().in_ease.is_some());
}

#[test]
fn same_named_properties_on_different_layers_are_written_separately() {
    struct TwoLayers {
        written: Option<EasePlan>,
    }

    impl HostAccessor for TwoLayers {
        fn read_selection(&mut self) -> CurveResult<Selection> {
            let position = |id, to: f64| PropertySelection {
                id: PropertyId(id),
                name: "Position".into(),
                keys: vec![
                    SelectedKey {
                        index: 0,
                        sample: KeyframeSample::new(0.0, 0.0),
                    },
                    SelectedKey {
                        index: 1,
                        sample: KeyframeSample::new(1.0, to),
                    },
                ],
            };
            Ok(Selection::Properties(vec![
                position(0, 10.0),
                position(1, 1000.0),
            ]))
        }

        fn write_ease(&mut self, plan: &EasePlan) -> CurveResult<()> {
            self.written = Some(plan.clone());
            Ok(())
        }
    }

    let mut host = TwoLayers { written: None };
    let report = apply_curve(&mut host, BezierCurve::new(0.5, 0.5, 0.5, 0.5)).unwrap();
    assert_eq!(report.applied.len(), 2);
    assert_eq!(report.plan.len(), 4);

    let plan = host.written.unwrap();
    let out_speed = |id| plan.get(PropertyId(id), 0).unwrap().out_ease.as_ref().unwrap()[0].speed;
    assert_eq!(out_speed(0), 10.0);
    assert_eq!(out_speed(1), 1000.0);
}
