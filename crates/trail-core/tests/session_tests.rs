// Host-side end-to-end tests: events in, frames out, on a virtual clock.

use glam::Vec2;
use std::time::Duration;
use trail_core::*;

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn make_session(params: MotionParams) -> (MotionSession<VirtualClock>, VirtualClock) {
    let clock = VirtualClock::new();
    let session = MotionSession::new(params, clock.clone()).expect("valid params");
    (session, clock)
}

fn completed(events: &[SessionEvent]) -> Vec<BatchId> {
    events
        .iter()
        .filter_map(|e| match e {
            SessionEvent::Trail(AnimatorEvent::BatchCompleted { batch, .. }) => Some(*batch),
            _ => None,
        })
        .collect()
}

#[test]
fn default_session_starts_at_slowest() {
    let (s, _clock) = make_session(MotionParams::default());
    assert_eq!(s.speed(), MIN_SPEED);
    assert_eq!(s.duration(), ms(2000));
    assert_eq!(s.speed_bucket(), SpeedBucket::Slowest);
    assert_eq!(s.slider_state(), SliderState::Closed);

    let frame = s.frame();
    assert_eq!(frame.elements.len(), TRAIL_COUNT);
    assert!(frame
        .elements
        .iter()
        .all(|e| e.position == initial_position_vec2()));
    assert_eq!(frame.rotation_degrees(), 0.0);
    assert_eq!(frame.speed_label(), "Slowest");
    assert!(!frame.animating);
}

#[test]
fn end_to_end_fastest_tap() {
    let (mut s, clock) = make_session(MotionParams::default());
    s.on_toggle_control_visibility();
    s.on_speed_control_change(2000.0);
    s.on_speed_control_complete();
    assert_eq!(s.duration(), ms(150));
    assert_eq!(s.frame().speed_label(), "Fastest");
    assert!(s.control().timer().is_armed());

    let events = s.on_surface_touch(100.0, 100.0);
    assert!(matches!(
        events.first(),
        Some(SessionEvent::Slider(SliderTransition {
            to: SliderState::Closed,
            cause: SliderCause::SurfaceTouch,
            ..
        }))
    ));
    assert!(!s.control().timer().is_armed());

    clock.advance_ms(599);
    assert!(completed(&s.tick()).is_empty());
    assert!(s.frame().animating);
    assert_eq!(s.frame().rotation, 1.0);

    clock.advance_ms(1);
    assert_eq!(completed(&s.tick()), vec![BatchId(0)]);
    let frame = s.frame();
    assert_eq!(frame.rotation, 0.0);
    assert!(frame
        .elements
        .iter()
        .all(|e| e.position == Vec2::new(100.0, 100.0)));
}

#[test]
fn rotation_degrees_track_lead_job() {
    let params = MotionParams::default()
        .with_initial_speed(2000.0)
        .with_easing(Easing::Linear);
    let (mut s, clock) = make_session(params);
    s.on_surface_touch(0.0, 0.0);
    clock.advance_ms(75);
    s.tick();
    assert!((s.frame().rotation_degrees() - 180.0).abs() < 1e-2);
}

#[test]
fn tap_mid_flight_continues_from_current_position() {
    let (mut s, clock) = make_session(MotionParams::default());
    s.on_surface_touch(100.0, 100.0);
    clock.advance_ms(1000);
    s.tick();
    let before = s.animator().position(0).unwrap();
    assert_ne!(before, initial_position_vec2());
    assert_ne!(before, Vec2::new(100.0, 100.0));

    let events = s.on_surface_touch(300.0, 300.0);
    assert!(events.contains(&SessionEvent::Trail(AnimatorEvent::BatchSuperseded {
        batch: BatchId(0),
        at: ms(1000),
    })));
    let from = events.iter().find_map(|e| match e {
        SessionEvent::Trail(AnimatorEvent::JobStarted {
            batch: BatchId(1),
            index: 0,
            from,
            ..
        }) => Some(*from),
        _ => None,
    });
    assert_eq!(from, Some(before));

    clock.advance_ms(10_000);
    let events = s.tick();
    assert_eq!(completed(&events), vec![BatchId(1)]);
    assert_eq!(s.last_target(), Some(Vec2::new(300.0, 300.0)));
    assert!(s
        .animator()
        .positions()
        .iter()
        .all(|p| *p == Vec2::new(300.0, 300.0)));
}

#[test]
fn auto_hide_fires_through_tick() {
    let (mut s, clock) = make_session(MotionParams::default());
    s.on_toggle_control_visibility();
    s.on_speed_control_change(800.0);
    s.on_speed_control_complete();

    clock.advance_ms(AUTO_HIDE_MS - 1);
    assert!(s.tick().is_empty());
    clock.advance_ms(1);
    let events = s.tick();
    assert_eq!(events.len(), 1);
    assert!(matches!(
        events[0],
        SessionEvent::Slider(SliderTransition {
            cause: SliderCause::AutoHide,
            to: SliderState::Closed,
            ..
        })
    ));
}

#[test]
fn touch_before_auto_hide_leaves_control_closed() {
    let (mut s, clock) = make_session(MotionParams::default());
    s.on_toggle_control_visibility();
    s.on_speed_control_change(800.0);
    s.on_speed_control_complete();
    clock.advance_ms(200);
    s.on_surface_touch(10.0, 10.0);
    assert_eq!(s.slider_state(), SliderState::Closed);

    clock.advance_ms(AUTO_HIDE_MS * 2);
    let events = s.tick();
    assert!(!events
        .iter()
        .any(|e| matches!(e, SessionEvent::Slider(_))));
    assert_eq!(s.slider_state(), SliderState::Closed);
}

#[test]
fn double_toggle_arms_nothing() {
    let (mut s, clock) = make_session(MotionParams::default());
    s.on_toggle_control_visibility();
    s.on_toggle_control_visibility();
    assert!(!s.control().timer().is_armed());
    clock.advance_ms(AUTO_HIDE_MS * 2);
    assert!(s.tick().is_empty());
}

#[test]
fn dispatch_processes_events_in_arrival_order() {
    let (mut s, _clock) = make_session(MotionParams::default());
    let script = [
        InputEvent::ToggleControlVisibility,
        InputEvent::SpeedControlChange(1075.0),
        InputEvent::SpeedControlComplete,
        InputEvent::ColorSelected(ColorToken::new("#00ff00")),
    ];
    let transitions: Vec<(SliderState, SliderState)> = script
        .into_iter()
        .flat_map(|e| s.dispatch(e))
        .filter_map(|e| match e {
            SessionEvent::Slider(t) => Some((t.from, t.to)),
            _ => None,
        })
        .collect();
    assert_eq!(
        transitions,
        vec![
            (SliderState::Closed, SliderState::OpenIdle),
            (SliderState::OpenIdle, SliderState::OpenAdjusting),
            (SliderState::OpenAdjusting, SliderState::OpenIdle),
        ]
    );
    assert_eq!(s.speed_bucket(), SpeedBucket::Medium);
    assert_eq!(s.color().as_str(), "#00ff00");
}

#[test]
fn speed_change_clamps_out_of_range_values() {
    let (mut s, _clock) = make_session(MotionParams::default());
    s.on_speed_control_change(99_999.0);
    assert_eq!(s.speed(), MAX_SPEED);
    s.on_speed_control_change(-5.0);
    assert_eq!(s.speed(), MIN_SPEED);
}

#[test]
fn non_finite_touch_closes_control_without_animating() {
    let (mut s, _clock) = make_session(MotionParams::default());
    s.on_toggle_control_visibility();
    let events = s.on_surface_touch(f32::NAN, 10.0);
    assert_eq!(events.len(), 1);
    assert_eq!(s.slider_state(), SliderState::Closed);
    assert!(!s.animator().is_animating());
}

#[test]
fn single_element_trail_is_the_plain_variant() {
    let (mut s, clock) = make_session(MotionParams::default().with_trail_count(1));
    s.on_surface_touch(5.0, 5.0);
    clock.advance(s.duration());
    assert_eq!(completed(&s.tick()), vec![BatchId(0)]);
}

#[test]
fn instances_carry_selected_color_back_to_front() {
    let (mut s, _clock) = make_session(MotionParams::default());
    s.on_color_selected(ColorToken::new("rgba(0,255,0,1)"));
    let instances = s.instances();
    assert_eq!(instances.len(), TRAIL_COUNT);
    assert_eq!(instances[0].color, [0.0, 1.0, 0.0, 1.0]);
    assert_eq!(instances[TRAIL_COUNT - 1].size, ELEMENT_SIZE);
    assert_eq!(instances[TRAIL_COUNT - 1].opacity, 1.0);
    let bytes: &[u8] = bytemuck::cast_slice(&instances);
    assert_eq!(bytes.len(), instances.len() * std::mem::size_of::<ElementInstance>());
}

#[test]
fn unparsable_color_falls_back_to_default() {
    let (mut s, _clock) = make_session(MotionParams::default());
    s.on_color_selected(ColorToken::new("not-a-colour"));
    let expected = ColorToken::default().to_rgba().unwrap();
    assert!(s.instances().iter().all(|i| i.color == expected));
}

#[test]
fn teardown_cancels_pending_timer() {
    let (mut s, clock) = make_session(MotionParams::default());
    s.on_toggle_control_visibility();
    s.on_speed_control_change(800.0);
    s.on_speed_control_complete();
    s.teardown();
    assert!(!s.control().timer().is_armed());
    clock.advance_ms(AUTO_HIDE_MS * 2);
    assert!(s.tick().is_empty());
}

#[test]
fn invalid_params_are_rejected() {
    let clock = VirtualClock::new();
    let cases = [
        (
            MotionParams::default().with_trail_count(0),
            MotionError::EmptyTrail,
        ),
        (
            MotionParams::default().with_speed_range(2000.0, 150.0),
            MotionError::InvertedSpeedRange {
                min: 2000.0,
                max: 150.0,
            },
        ),
        (
            MotionParams::default().with_decay(1.5, 0.85),
            MotionError::InvalidDecay {
                field: "size_decay",
                value: 1.5,
            },
        ),
    ];
    for (params, expected) in cases {
        assert_eq!(params.validate(), Err(expected));
        assert!(MotionSession::new(params, clock.clone()).is_err());
    }
}

#[test]
fn oversized_timings_are_rejected() {
    let clock = VirtualClock::new();
    let limit = ms(MAX_TIMING_MS);
    let cases = [
        (
            MotionParams::default().with_stagger(Duration::MAX),
            MotionError::DurationTooLong {
                field: "stagger",
                value: Duration::MAX,
                max: limit,
            },
        ),
        (
            MotionParams::default().with_auto_hide(limit + ms(1)),
            MotionError::DurationTooLong {
                field: "auto_hide",
                value: limit + ms(1),
                max: limit,
            },
        ),
        (
            MotionParams {
                zoom_duration: Duration::MAX,
                ..MotionParams::default()
            },
            MotionError::DurationTooLong {
                field: "zoom_duration",
                value: Duration::MAX,
                max: limit,
            },
        ),
        (
            MotionParams {
                slide_duration: Duration::MAX,
                ..MotionParams::default()
            },
            MotionError::DurationTooLong {
                field: "slide_duration",
                value: Duration::MAX,
                max: limit,
            },
        ),
        (
            MotionParams::default().with_trail_count(MAX_TRAIL_COUNT + 1),
            MotionError::TrailTooLong {
                count: MAX_TRAIL_COUNT + 1,
                max: MAX_TRAIL_COUNT,
            },
        ),
        (
            MotionParams::default().with_speed_range(MIN_SPEED, 1e30),
            MotionError::SpeedRangeTooWide {
                value: 1e30,
                limit: MAX_TIMING_MS as f32,
            },
        ),
    ];
    for (params, expected) in cases {
        assert_eq!(params.validate(), Err(expected));
        assert!(MotionSession::new(params, clock.clone()).is_err());
    }
}

#[test]
fn longest_accepted_timings_run_to_completion() {
    let limit = ms(MAX_TIMING_MS);
    let params = MotionParams::default()
        .with_speed_range(MIN_SPEED, MAX_TIMING_MS as f32)
        .with_trail_count(MAX_TRAIL_COUNT)
        .with_stagger(limit)
        .with_auto_hide(limit);
    let (mut s, clock) = make_session(params);

    s.on_toggle_control_visibility();
    s.on_speed_control_change(500.0);
    s.on_speed_control_complete();
    assert_eq!(s.control().timer().deadline(), Some(limit));
    clock.advance(limit);
    let events = s.tick();
    assert!(events.iter().any(|e| matches!(
        e,
        SessionEvent::Slider(SliderTransition {
            cause: SliderCause::AutoHide,
            ..
        })
    )));

    s.on_surface_touch(1.0, 1.0);
    assert!(s.animator().is_animating());
    clock.advance(limit * (MAX_TRAIL_COUNT as u32 + 1));
    let events = s.tick();
    assert_eq!(completed(&events), vec![BatchId(0)]);
    assert!(s.animator().positions().iter().all(|p| *p == Vec2::ONE));
}

#[test]
fn direct_direction_is_configurable() {
    let params = MotionParams::default()
        .with_direction(DurationDirection::Direct)
        .with_initial_speed(MAX_SPEED);
    let (s, _clock) = make_session(params);
    assert_eq!(s.duration(), ms(2000));
    assert_eq!(s.speed_bucket(), SpeedBucket::Slowest);
}
