//! Colour tokens for the trail and the selectable palette.
//!
//! Tokens are opaque to the timing core; they are only parsed when a frame
//! is turned into GPU instance records.

use crate::constants::DEFAULT_COLOR;
use crate::error::{MotionError, Result};
use rand::prelude::*;
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ColorToken(String);

impl ColorToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse `#rrggbb` or `rgba(r,g,b,a)` into normalised RGBA.
    pub fn to_rgba(&self) -> Result<[f32; 4]> {
        let s = self.0.trim();
        parse_hex(s)
            .or_else(|| parse_rgba(s))
            .ok_or_else(|| MotionError::InvalidColor(self.0.clone()))
    }
}

impl Default for ColorToken {
    fn default() -> Self {
        Self::new(DEFAULT_COLOR)
    }
}

impl fmt::Display for ColorToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ColorToken {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

fn parse_hex(s: &str) -> Option<[f32; 4]> {
    let hex = s.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some([
        channel(0)? as f32 / 255.0,
        channel(2)? as f32 / 255.0,
        channel(4)? as f32 / 255.0,
        1.0,
    ])
}

fn parse_rgba(s: &str) -> Option<[f32; 4]> {
    let body = s.strip_prefix("rgba(")?.strip_suffix(')')?;
    let parts: Vec<f32> = body
        .split(',')
        .map(|p| p.trim().parse::<f32>())
        .collect::<std::result::Result<_, _>>()
        .ok()?;
    if parts.len() != 4 || parts.iter().any(|v| !v.is_finite()) {
        return None;
    }
    Some([
        (parts[0] / 255.0).clamp(0.0, 1.0),
        (parts[1] / 255.0).clamp(0.0, 1.0),
        (parts[2] / 255.0).clamp(0.0, 1.0),
        parts[3].clamp(0.0, 1.0),
    ])
}

/// Selectable colours: the default first, then random opaque colours.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    colors: Vec<ColorToken>,
}

impl Palette {
    /// Deterministic for a given seed.
    pub fn generate(seed: u64, random_count: usize) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut colors = Vec::with_capacity(random_count + 1);
        colors.push(ColorToken::default());
        colors.extend((0..random_count).map(|_| {
            let [r, g, b]: [u8; 3] = rng.gen();
            ColorToken::new(format!("rgba({r},{g},{b},1)"))
        }));
        Self { colors }
    }

    pub fn colors(&self) -> &[ColorToken] {
        &self.colors
    }

    pub fn get(&self, index: usize) -> Option<&ColorToken> {
        self.colors.get(index)
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}
