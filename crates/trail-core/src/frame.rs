//! Values produced for the presentation layer once per frame.

use crate::constants::DEGREES_PER_TURN;
use crate::palette::ColorToken;
use crate::speed::SpeedBucket;
use glam::Vec2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ElementFrame {
    /// Element centre in surface coordinates.
    pub position: Vec2,
    pub size: f32,
    pub opacity: f32,
}

impl ElementFrame {
    /// Top-left corner for layouts that position by origin.
    pub fn top_left(&self) -> Vec2 {
        self.position - Vec2::splat(self.size / 2.0)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FrameSnapshot {
    pub elements: Vec<ElementFrame>,
    /// Shared rotation in \[0, 1\] turns.
    pub rotation: f32,
    pub control_offset: f32,
    pub control_scale: f32,
    pub slider_visible: bool,
    pub speed_bucket: SpeedBucket,
    pub color: ColorToken,
    pub animating: bool,
}

impl FrameSnapshot {
    pub fn rotation_degrees(&self) -> f32 {
        self.rotation * DEGREES_PER_TURN
    }

    pub fn speed_label(&self) -> &'static str {
        self.speed_bucket.label()
    }

    /// GPU-ready records, back to front so the lead element draws last.
    pub fn instances(&self, rgba: [f32; 4]) -> Vec<ElementInstance> {
        let rotation_radians = self.rotation_degrees().to_radians();
        self.elements
            .iter()
            .rev()
            .map(|e| ElementInstance {
                center: e.position.to_array(),
                size: e.size,
                opacity: e.opacity,
                rotation_radians,
                color: rgba,
            })
            .collect()
    }
}

/// Per-instance vertex data for a quad renderer.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ElementInstance {
    pub center: [f32; 2],
    pub size: f32,
    pub opacity: f32,
    pub rotation_radians: f32,
    pub color: [f32; 4],
}
