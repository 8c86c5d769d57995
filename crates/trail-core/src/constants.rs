use glam::Vec2;

// Tuned defaults for the touch trail. `MotionParams::default()` is built from
// these; front-ends override individual values through the params builder.

// Speed control range (raw slider units, one unit per millisecond of duration)
pub const MIN_SPEED: f32 = 150.0;
pub const MAX_SPEED: f32 = 2000.0;
pub const BUCKET_COUNT: usize = 5; // Slowest..=Fastest

// Trail
pub const TRAIL_COUNT: usize = 10; // after-images; 4-10 reads well, more gets muddy
pub const STAGGER_MS: u64 = 50; // start offset between consecutive elements
pub const ELEMENT_SIZE: f32 = 50.0; // edge length of the lead element
pub const SIZE_DECAY: f32 = 0.8; // per-index size ratio
pub const OPACITY_DECAY: f32 = 0.85; // per-index opacity ratio
pub const INITIAL_POSITION: [f32; 2] = [200.0, 200.0];

// Speed control presentation
pub const AUTO_HIDE_MS: u64 = 1500; // quiet period after a drag before the control hides
pub const ZOOM_MS: u64 = 150;
pub const ZOOM_ACTIVE_SCALE: f32 = 1.05; // control scale while being dragged
pub const ZOOM_IDLE_SCALE: f32 = 1.0;
pub const SLIDE_MS: u64 = 300;
pub const SLIDER_WIDTH: f32 = 70.0; // closed offset is -SLIDER_WIDTH
pub const SLIDER_OPEN_OFFSET: f32 = 8.0;

// Validation limits
pub const MAX_TIMING_MS: u64 = 3_600_000; // longest accepted delay, stagger or animation
pub const MAX_TRAIL_COUNT: usize = 1024;

// Colour
pub const DEFAULT_COLOR: &str = "#ef4f4f";
pub const PALETTE_RANDOM_COUNT: usize = 10;
pub const PALETTE_SEED: u64 = 42;

// Rotation
pub const DEGREES_PER_TURN: f32 = 360.0;

#[inline]
pub fn initial_position_vec2() -> Vec2 {
    Vec2::new(INITIAL_POSITION[0], INITIAL_POSITION[1])
}
