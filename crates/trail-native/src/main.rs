use anyhow::Context;
use std::time::Duration;

use trail_core::{
    Clock, ColorToken, InputEvent, MotionParams, MotionSession, Palette, SessionEvent,
    VirtualClock, AUTO_HIDE_MS, MAX_SPEED, PALETTE_RANDOM_COUNT, PALETTE_SEED,
};

// ~60 Hz
const FRAME: Duration = Duration::from_micros(16_667);
const LOG_EVERY_FRAMES: u64 = 15;

struct ScriptStep {
    at: Duration,
    event: InputEvent,
}

fn step(at_ms: u64, event: InputEvent) -> ScriptStep {
    ScriptStep {
        at: Duration::from_millis(at_ms),
        event,
    }
}

/// Adjust the speed, release, tap twice (the second tap lands mid-flight),
/// toggle the control open and closed, then pick a colour and tap again.
fn build_script(palette: &Palette) -> Vec<ScriptStep> {
    let accent = palette.get(3).cloned().unwrap_or_default();
    vec![
        step(100, InputEvent::ToggleControlVisibility),
        step(300, InputEvent::SpeedControlChange(900.0)),
        step(400, InputEvent::SpeedControlChange(1500.0)),
        step(500, InputEvent::SpeedControlChange(MAX_SPEED - 200.0)),
        step(600, InputEvent::SpeedControlComplete),
        step(900, InputEvent::SurfaceTouch { x: 100.0, y: 100.0 }),
        step(1150, InputEvent::SurfaceTouch { x: 320.0, y: 480.0 }),
        step(2000, InputEvent::ToggleControlVisibility),
        step(2050, InputEvent::ToggleControlVisibility),
        step(2200, InputEvent::ColorSelected(accent)),
        step(2400, InputEvent::SurfaceTouch { x: 60.0, y: 400.0 }),
        step(2600, InputEvent::ToggleControlVisibility),
        step(2700, InputEvent::SpeedControlChange(150.0)),
        step(2800, InputEvent::SpeedControlComplete),
    ]
}

fn log_event(ev: &SessionEvent) {
    match ev {
        SessionEvent::Slider(t) => {
            log::info!("[{:.0?}] slider {:?} -> {:?} ({:?})", t.at, t.from, t.to, t.cause);
        }
        SessionEvent::Trail(e) => log::debug!("[{:.0?}] {:?}", e.at(), e),
    }
}

fn log_frame(session: &MotionSession<VirtualClock>) {
    let frame = session.frame();
    let lead = frame.elements.first().map(|e| e.position).unwrap_or_default();
    let tail = frame.elements.last().map(|e| e.position).unwrap_or_default();
    log::info!(
        "[frame] t={:?} lead=({:.1},{:.1}) tail=({:.1},{:.1}) rot={:.0}deg control=({:.1}px x{:.3}) {} {}",
        session.now(),
        lead.x,
        lead.y,
        tail.x,
        tail.y,
        frame.rotation_degrees(),
        frame.control_offset,
        frame.control_scale,
        frame.speed_label(),
        frame.color
    );
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let clock = VirtualClock::new();
    let params = MotionParams::default();
    let mut session =
        MotionSession::new(params, clock.clone()).context("invalid motion parameters")?;

    let palette = Palette::generate(PALETTE_SEED, PALETTE_RANDOM_COUNT);
    log::info!(
        "[color] palette: {}",
        palette
            .colors()
            .iter()
            .map(ColorToken::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    );

    let script = build_script(&palette);
    let end = script.last().map(|s| s.at).unwrap_or_default()
        + Duration::from_millis(AUTO_HIDE_MS)
        + session.mapper().duration_bounds().1;
    let mut steps = script.into_iter().peekable();

    let mut frame_index: u64 = 0;
    while clock.now() <= end {
        for ev in session.tick() {
            log_event(&ev);
        }
        while let Some(next) = steps.next_if(|s| s.at <= clock.now()) {
            log::info!("[input] {:?}", next.event);
            for ev in session.dispatch(next.event) {
                log_event(&ev);
            }
        }
        if frame_index % LOG_EVERY_FRAMES == 0 {
            log_frame(&session);
        }
        frame_index += 1;
        clock.advance(FRAME);
    }

    for ev in session.teardown() {
        log_event(&ev);
    }
    log_frame(&session);
    log::info!(
        "[session] replay finished after {} frames; {} instance records in the final frame",
        frame_index,
        session.instances().len()
    );
    Ok(())
}
