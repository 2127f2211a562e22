use bevy::math::DVec2;
use bevy::prelude::*;
use std::collections::VecDeque;

use crate::body::BodyTag;
use crate::resources::TRAIL_SAMPLE_SECONDS;

/// Links a rendered entity to the body it draws.
#[derive(Component, Deref, DerefMut, Clone, Copy, Debug)]
pub struct BodyHandle(pub BodyTag);

/// Recent world positions of a body, for rendering motion lines.
#[derive(Component)]
pub struct Trail {
    pub history: VecDeque<DVec2>,
    pub timer: Timer,
}

impl Default for Trail {
    fn default() -> Self {
        Self {
            history: VecDeque::new(),
            timer: Timer::from_seconds(TRAIL_SAMPLE_SECONDS, TimerMode::Repeating),
        }
    }
}
