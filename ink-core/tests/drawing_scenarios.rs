//! End-to-end drawing scenarios through the session event queue.
//!
//! Covers:
//! - Surface lifecycle (initialize, reset, snapshot)
//! - Stroke color fixing across palette changes
//! - Export payload contents

use ink_core::{
    decode_data_url, CanvasEvent, Color, DrawingSession, PointerEvent, SessionConfig,
    StrokeState, VariableContext, SWATCHES,
};
use proptest::prelude::*;

const RED: Color = SWATCHES[1];
const BLUE: Color = SWATCHES[6];

fn session(width: u32, height: u32) -> DrawingSession {
    DrawingSession::with_viewport(SessionConfig::default(), width, height).expect("session")
}

fn stroke(session: &mut DrawingSession, points: &[(f32, f32)]) {
    let (first, rest) = points.split_first().expect("at least one point");
    session.push(PointerEvent::down(first.0, first.1));
    for &(x, y) in rest {
        session.push(PointerEvent::moved(x, y));
    }
    let last = points[points.len() - 1];
    session.push(PointerEvent::up(last.0, last.1));
    session.process_pending();
}

fn assert_uniform(image: &image::RgbaImage, color: Color) {
    assert!(
        image.pixels().all(|p| p.0 == color.to_rgba()),
        "expected every pixel to be {color}"
    );
}

// ==========================================================================
// Surface lifecycle
// ==========================================================================

#[test]
fn test_initialized_snapshot_is_uniform_background() {
    let s = session(64, 48);
    let snapshot = s.surface().snapshot().expect("snapshot");
    let image = snapshot.decode().expect("decode");

    assert_eq!(image.dimensions(), (64, 48));
    assert_uniform(&image, Color::BLACK);
}

#[test]
fn test_processed_reset_matches_fresh_initialize() {
    let mut s = session(120, 80);
    stroke(&mut s, &[(10.0, 10.0), (110.0, 70.0), (10.0, 70.0)]);
    s.dispatch(CanvasEvent::SelectColor { color: RED });
    stroke(&mut s, &[(60.0, 0.0), (60.0, 80.0)]);

    s.request_reset();
    s.process_pending();

    let fresh = session(120, 80);
    assert_eq!(
        s.surface().snapshot().expect("after reset"),
        fresh.surface().snapshot().expect("fresh")
    );
}

#[test]
fn test_stroke_then_reset_scenario_800x600() {
    let mut s = session(800, 600);
    s.dispatch(PointerEvent::down(100.0, 100.0));
    s.dispatch(PointerEvent::moved(200.0, 100.0));
    s.dispatch(PointerEvent::up(200.0, 100.0));
    assert_eq!(s.surface().pixel(150, 100), Some(Color::WHITE));

    s.request_reset();
    s.process_pending();

    let image = s.surface().snapshot().expect("snapshot").decode().expect("decode");
    assert_eq!(image.dimensions(), (800, 600));
    assert_uniform(&image, Color::BLACK);
}

// ==========================================================================
// Stroke colors
// ==========================================================================

#[test]
fn test_palette_change_mid_stroke_does_not_recolor() {
    let mut s = session(40, 20);
    s.dispatch(CanvasEvent::SelectColor { color: RED });
    s.dispatch(PointerEvent::down(0.0, 10.0));
    s.dispatch(PointerEvent::moved(10.0, 10.0));
    assert_eq!(s.surface().pixel(5, 10), Some(RED));

    s.dispatch(CanvasEvent::SelectColor { color: BLUE });
    s.dispatch(PointerEvent::moved(20.0, 10.0));

    assert_eq!(s.surface().pixel(5, 10), Some(RED));
    assert_eq!(s.surface().pixel(15, 10), Some(RED));

    // The next stroke picks up the new selection.
    s.dispatch(PointerEvent::up(20.0, 10.0));
    s.dispatch(PointerEvent::down(0.0, 2.0));
    s.dispatch(PointerEvent::moved(39.0, 2.0));
    assert_eq!(s.surface().pixel(30, 2), Some(BLUE));
}

#[test]
fn test_two_strokes_keep_their_own_colors() {
    let mut s = session(100, 100);

    s.dispatch(CanvasEvent::SelectColor { color: RED });
    stroke(&mut s, &[(10.0, 20.0), (90.0, 20.0)]);

    s.dispatch(CanvasEvent::SelectColor { color: BLUE });
    stroke(&mut s, &[(10.0, 80.0), (90.0, 80.0)]);

    let image = s.surface().snapshot().expect("snapshot").decode().expect("decode");

    for y in 0..100 {
        for x in 0..100 {
            let px = Color::from_rgba(image.get_pixel(x, y).0);
            if px == RED {
                assert!(y < 50, "red pixel in blue stroke region at ({x}, {y})");
            } else if px == BLUE {
                assert!(y >= 50, "blue pixel in red stroke region at ({x}, {y})");
            } else {
                assert_eq!(px, Color::BLACK, "unexpected color at ({x}, {y})");
            }
        }
    }
    assert_eq!(s.surface().pixel(50, 20), Some(RED));
    assert_eq!(s.surface().pixel(50, 80), Some(BLUE));
}

#[test]
fn test_leaving_surface_ends_stroke() {
    let mut s = session(50, 50);
    s.dispatch(PointerEvent::down(10.0, 10.0));
    s.dispatch(PointerEvent::moved(49.0, 10.0));
    s.dispatch(PointerEvent::leave(55.0, 10.0));
    assert_eq!(s.stroke_state(), StrokeState::Idle);

    let before = s.surface().snapshot().expect("before");
    s.dispatch(PointerEvent::moved(10.0, 40.0));
    assert_eq!(s.surface().snapshot().expect("after"), before);
}

// ==========================================================================
// Export payload
// ==========================================================================

#[test]
fn test_blank_export_payload() {
    let mut s = session(100, 100);
    let payload = s.capture_payload().expect("capture");

    assert!(payload.variables.is_empty());
    let image = decode_data_url(&payload.image).expect("decode");
    assert_eq!(image.dimensions(), (100, 100));
    assert_uniform(&image, Color::BLACK);
}

#[test]
fn test_export_payload_carries_context_unmodified() {
    let mut s = session(10, 10);
    s.context_mut().insert("x", 12);
    s.context_mut().insert("label", "area");

    let payload = s.capture_payload().expect("capture");
    let mut expected = VariableContext::new();
    expected.insert("x", 12);
    expected.insert("label", "area");
    assert_eq!(payload.variables, expected);
}

#[test]
fn test_export_payload_reflects_latest_segment() {
    let mut s = session(30, 30);
    s.dispatch(PointerEvent::down(0.0, 15.0));
    s.dispatch(PointerEvent::moved(29.0, 15.0));

    // Stroke still in progress; the painted segment is already visible.
    let payload = s.capture_payload().expect("capture");
    let image = payload.decode_image().expect("decode");
    assert_eq!(image.get_pixel(15, 15).0, Color::WHITE.to_rgba());
}

// ==========================================================================
// Properties
// ==========================================================================

fn coord() -> impl Strategy<Value = (f32, f32)> {
    (-10.0f32..70.0, -10.0f32..70.0)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_down_moves_up_ends_idle(
        start in coord(),
        moves in prop::collection::vec(coord(), 0..20),
        end in coord(),
    ) {
        let mut s = session(60, 60);
        s.push(PointerEvent::down(start.0, start.1));
        for (x, y) in &moves {
            s.push(PointerEvent::moved(*x, *y));
        }
        s.push(PointerEvent::up(end.0, end.1));
        s.process_pending();
        prop_assert_eq!(s.stroke_state(), StrokeState::Idle);
    }

    #[test]
    fn prop_idle_moves_never_touch_surface(
        moves in prop::collection::vec(coord(), 1..20),
    ) {
        let mut s = session(60, 60);
        stroke(&mut s, &[(5.0, 5.0), (50.0, 50.0)]);
        let before = s.surface().image().cloned();

        for (x, y) in &moves {
            s.dispatch(PointerEvent::moved(*x, *y));
        }
        prop_assert_eq!(s.surface().image().cloned(), before);
    }

    #[test]
    fn prop_reset_always_restores_blank(
        strokes in prop::collection::vec(prop::collection::vec(coord(), 1..6), 0..5),
    ) {
        let mut s = session(60, 60);
        for points in &strokes {
            stroke(&mut s, points);
        }
        s.request_reset();
        s.process_pending();
        let blank = session(60, 60);
        prop_assert_eq!(s.surface().image(), blank.surface().image());
    }
}
