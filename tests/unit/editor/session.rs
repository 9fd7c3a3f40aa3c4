use super::*;

fn canvas() -> CanvasSize {
    CanvasSize(400.0)
}

#[test]
fn initial_handles_match_panel_defaults() {
    let s = EditorState::new(canvas());
    assert_eq!(s.curve(), BezierCurve::new(0.5, 0.0, 0.0, 1.0));
    assert_eq!(s.active_handle(), None);
}

#[test]
fn pointer_down_picks_the_nearest_handle() {
    let space = CurveSpace::default();
    let s = EditorState::new(canvas());
    let (c1, c2) = s.handle_positions(&space);

    let near_first = s.apply(&space, EditorEvent::PointerDown(c1 + kurbo::Vec2::new(3.0, -2.0)));
    assert_eq!(near_first.active_handle(), Some(Handle::First));
    assert_eq!(near_first.curve(), s.curve());

    let near_second = s.apply(&space, EditorEvent::PointerDown(c2));
    assert_eq!(near_second.active_handle(), Some(Handle::Second));
}

#[test]
fn drag_moves_only_the_active_handle() {
    let space = CurveSpace::default();
    let s = EditorState::new(canvas());
    let (c1, _) = s.handle_positions(&space);

    let bounds = s.bounds(&space);
    let target = space.logical_to_canvas(Point::new(0.25, 0.6), &bounds, s.canvas());
    let s = apply_drag(s, &space, EditorEvent::PointerDown(c1));
    let s = apply_drag(s, &space, EditorEvent::PointerMove(target));

    let p1 = s.handle(Handle::First);
    assert!((p1.x - 0.25).abs() < 1e-9);
    assert!((p1.y - 0.6).abs() < 1e-9);
    assert_eq!(s.handle(Handle::Second), Point::new(0.0, 1.0));

    let s = s.apply(&space, EditorEvent::PointerUp);
    assert_eq!(s.active_handle(), None);
}

#[test]
fn moves_without_a_drag_are_ignored() {
    let space = CurveSpace::default();
    let s = EditorState::new(canvas());
    let moved = s.apply(&space, EditorEvent::PointerMove(Point::new(10.0, 10.0)));
    assert_eq!(moved, s);
}

#[test]
fn drag_clamps_time_axis_but_not_value_axis() {
    let space = CurveSpace::default();
    let s = EditorState::new(canvas());
    let (_, c2) = s.handle_positions(&space);
    let s = s.apply(&space, EditorEvent::PointerDown(c2));

    let far = Point::new(-500.0, -900.0);
    let s = s.apply(&space, EditorEvent::PointerMove(far));
    let p2 = s.handle(Handle::Second);
    assert_eq!(p2.x, 0.0);
    assert!(p2.y > 1.0);

    let bounds = s.bounds(&space);
    assert!(bounds.contains(p2));
}

#[test]
fn resize_keeps_the_curve() {
    let space = CurveSpace::default();
    let s = EditorState::with_curve(canvas(), BezierCurve::new(0.2, 0.4, 0.6, 0.8));
    let r = s.apply(&space, EditorEvent::Resize(CanvasSize(123.0)));
    assert_eq!(r.curve(), s.curve());
    assert_eq!(r.canvas(), CanvasSize(123.0));
}

#[test]
fn text_input_replaces_handles_or_keeps_prior_state() {
    let s = EditorState::new(canvas());
    let updated = s.apply_input("0.1, -0.5, 0.9, 1.5").unwrap();
    assert_eq!(updated.curve(), BezierCurve::new(0.1, -0.5, 0.9, 1.5));

    let err = updated.apply_input("2, 0, 0.5, 0.5").unwrap_err();
    assert!(err.user_message().contains("a must be between 0 and 1"));
    assert_eq!(updated.curve(), BezierCurve::new(0.1, -0.5, 0.9, 1.5));
}

#[test]
fn set_curve_ends_any_drag() {
    let space = CurveSpace::default();
    let s = EditorState::new(canvas());
    let (c1, _) = s.handle_positions(&space);
    let s = s.apply(&space, EditorEvent::PointerDown(c1));
    let s = s.apply(&space, EditorEvent::SetCurve(BezierCurve::LINEAR));
    assert_eq!(s.active_handle(), None);
    assert_eq!(s.curve(), BezierCurve::LINEAR);
}

#[test]
fn set_curve_clamps_time_axis_and_ignores_non_finite() {
    let space = CurveSpace::default();
    let s = EditorState::new(canvas())
        .apply(&space, EditorEvent::SetCurve(BezierCurve::new(5.0, 2.0, -1.0, -0.5)));
    assert_eq!(s.curve(), BezierCurve::new(1.0, 2.0, 0.0, -0.5));

    let bounds = s.bounds(&space);
    assert!(bounds.min_x <= 0.0 && bounds.max_x >= 1.0);

    let kept = s.apply(
        &space,
        EditorEvent::SetCurve(BezierCurve::new(f64::NAN, 0.0, 0.5, 1.0)),
    );
    assert_eq!(kept, s);
}
