use bevy::math::DVec2;

use crate::body::{Body, BodyTag};

/// Base of the exponential zoom factor.
pub const ZOOM_BASE: f64 = 1.2;
/// Wheel units per zoom step (one mouse-wheel notch).
pub const ZOOM_STEP_UNITS: f64 = 120.0;
/// Viewport used until the shell reports the real window size.
pub const DEFAULT_VIEWPORT: DVec2 = DVec2::new(1000.0, 500.0);

/// View transform over the world plus an optional hooked body to follow.
///
/// `screen = (world + position) · zoom + viewport / 2`
#[derive(Debug, Clone, PartialEq)]
pub struct ViewCamera {
    pub position: DVec2,
    pub zoom: f64,
    hooked: Option<BodyTag>,
    drag_anchor: DVec2,
    viewport: DVec2,
}

impl Default for ViewCamera {
    fn default() -> Self {
        Self::new(DVec2::ZERO, 1.0)
    }
}

impl ViewCamera {
    pub fn new(position: DVec2, zoom: f64) -> Self {
        Self {
            position,
            zoom,
            hooked: None,
            drag_anchor: position,
            viewport: DEFAULT_VIEWPORT,
        }
    }

    pub fn hooked(&self) -> Option<BodyTag> {
        self.hooked
    }

    pub fn viewport(&self) -> DVec2 {
        self.viewport
    }

    pub fn set_viewport(&mut self, size: DVec2) {
        self.viewport = size;
    }

    pub fn viewport_center(&self) -> DVec2 {
        self.viewport / 2.0
    }

    pub fn world_to_screen(&self, world: DVec2) -> DVec2 {
        (world + self.position) * self.zoom + self.viewport_center()
    }

    pub fn screen_to_world(&self, screen: DVec2) -> DVec2 {
        (screen - self.viewport_center()) / self.zoom - self.position
    }

    /// Records where a drag started so later pointer moves pan relative to it.
    pub fn begin_drag(&mut self, pointer: DVec2) {
        self.drag_anchor = self.position - pointer / self.zoom;
    }

    /// Pans so the world point under the drag start stays under the pointer.
    /// Ignored while a body is hooked.
    pub fn drag_to(&mut self, pointer: DVec2) {
        if self.hooked.is_some() {
            return;
        }
        self.position = pointer / self.zoom + self.drag_anchor;
    }

    /// Multiplies the zoom by `1.2^(delta / 120)`.
    pub fn zoom_by(&mut self, delta: f64) {
        self.zoom *= ZOOM_BASE.powf(delta / ZOOM_STEP_UNITS);
    }

    /// Hooks the body under the screen-space `pointer`, or clears the hook.
    pub fn hook_at(&mut self, pointer: DVec2, bodies: &[Body]) -> Option<BodyTag> {
        let world = self.screen_to_world(pointer);
        self.hooked = bodies
            .iter()
            .filter(|body| body.contains(world))
            .min_by(|a, b| {
                a.position
                    .distance_squared(world)
                    .total_cmp(&b.position.distance_squared(world))
            })
            .map(Body::tag);
        self.hooked
    }

    /// Centers the view on the hooked body. A hook that no longer resolves is
    /// dropped.
    pub fn follow(&mut self, bodies: &[Body]) {
        let Some(tag) = self.hooked else {
            return;
        };
        match bodies.iter().find(|body| body.tag() == tag) {
            Some(body) => self.position = -body.position,
            None => self.hooked = None,
        }
    }
}
