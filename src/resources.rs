use bevy::prelude::*;

use crate::simulation::Overlay;

// --- Window Defaults ---
/// Initial window width in logical pixels.
pub const WINDOW_WIDTH: u32 = 1000;
/// Initial window height in logical pixels.
pub const WINDOW_HEIGHT: u32 = 500;

// --- Input ---
/// Zoom units reported for one line of mouse-wheel scroll.
pub const WHEEL_UNITS_PER_LINE: f64 = 120.0;

// --- Rendering ---
/// Smallest on-screen radius so distant bodies stay visible.
pub const MIN_SCREEN_RADIUS: f32 = 1.5;
/// Maximum stored points per trail.
pub const TRAIL_LENGTH: usize = 200;
/// Seconds between two trail samples.
pub const TRAIL_SAMPLE_SECONDS: f32 = 0.05;

/// User-facing display toggles.
#[derive(Resource, Default)]
pub struct ViewSettings {
    pub show_trails: bool,
}

/// Color hints from the scenario, indexed by body tag.
#[derive(Resource, Default)]
pub struct ColorHints(pub Vec<Option<String>>);

/// Overlay values from the latest render pass.
#[derive(Resource, Default)]
pub struct FrameOverlay(pub Option<Overlay>);
