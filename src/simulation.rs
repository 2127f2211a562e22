use std::time::Duration;

use bevy::log::{debug, info};
use bevy::math::DVec2;
use bevy::prelude::Resource;

use crate::body::{Body, BodyTag};
use crate::camera::ViewCamera;
use crate::config::SimulationConfig;
use crate::force::ForceModel;
use crate::integrator;

/// Pause flag plus the wall-clock accumulator that paces physics ticks.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationClock {
    tick_interval: f64,
    wall_interval: Duration,
    accumulated: Duration,
    running: bool,
}

impl SimulationClock {
    pub fn new(tick_interval: f64, wall_interval: Duration) -> Self {
        Self {
            tick_interval,
            wall_interval,
            accumulated: Duration::ZERO,
            running: true,
        }
    }

    pub fn tick_interval(&self) -> f64 {
        self.tick_interval
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Integration step: the tick interval while running, zero while paused.
    pub fn effective_dt(&self) -> f64 {
        if self.running { self.tick_interval } else { 0.0 }
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.running = !self.running;
        self.running
    }

    /// Adds elapsed wall time; returns true (and empties the accumulator) once
    /// a full interval has passed. Never reports more than one tick per call.
    pub fn accumulate(&mut self, elapsed: Duration) -> bool {
        self.accumulated = self.accumulated.saturating_add(elapsed);
        if self.accumulated >= self.wall_interval {
            self.accumulated = Duration::ZERO;
            true
        } else {
            false
        }
    }
}

/// Semantic input accepted by the simulation. Pointer positions are in
/// screen pixels, origin at the top-left of the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    PanStart(DVec2),
    PanTo(DVec2),
    Zoom(f64),
    Hook(DVec2),
    TogglePause,
    Stop,
}

/// What the renderer needs for one body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodySprite {
    pub tag: BodyTag,
    pub screen_radius: f64,
    pub screen_position: DVec2,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Overlay {
    pub cursor_world: Option<DVec2>,
    pub camera: DVec2,
    pub zoom: f64,
    pub ticks: u64,
    pub paused: bool,
    pub hooked: Option<BodyTag>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub bodies: Vec<BodySprite>,
    pub overlay: Overlay,
}

/// Owns the body arena, the camera and the clock. Only [`Simulation::tick`]
/// moves bodies; only [`Simulation::dispatch`] and
/// [`Simulation::follow_hook`] move the camera.
#[derive(Resource, Debug)]
pub struct Simulation {
    bodies: Vec<Body>,
    camera: ViewCamera,
    clock: SimulationClock,
    model: ForceModel,
    ticks: u64,
    stopped: bool,
}

impl Simulation {
    pub fn new(bodies: Vec<Body>, camera: ViewCamera, clock: SimulationClock, model: ForceModel) -> Self {
        Self {
            bodies,
            camera,
            clock,
            model,
            ticks: 0,
            stopped: false,
        }
    }

    pub fn from_config(config: &SimulationConfig) -> Self {
        let bodies = config
            .bodies
            .iter()
            .enumerate()
            .map(|(i, bc)| Body::new(BodyTag(i), bc.mass, bc.density, bc.position(), bc.velocity()))
            .collect();
        let camera = ViewCamera::new(DVec2::new(config.camera.x, config.camera.y), config.camera.zoom);
        let clock = SimulationClock::new(config.tick_interval, config.wall_interval());
        Self::new(bodies, camera, clock, ForceModel::new(config.gravity_const))
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn body(&self, tag: BodyTag) -> Option<&Body> {
        self.bodies.get(tag.0).filter(|body| body.tag() == tag)
    }

    pub fn camera(&self) -> &ViewCamera {
        &self.camera
    }

    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn set_viewport(&mut self, size: DVec2) {
        self.camera.set_viewport(size);
    }

    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::PanStart(pointer) => self.camera.begin_drag(pointer),
            Action::PanTo(pointer) => self.camera.drag_to(pointer),
            Action::Zoom(delta) => self.camera.zoom_by(delta),
            Action::Hook(pointer) => {
                let previous = self.camera.hooked();
                let hooked = self.camera.hook_at(pointer, &self.bodies);
                if hooked != previous {
                    match hooked {
                        Some(tag) => info!("camera hooked to body {}", tag),
                        None => info!("camera released"),
                    }
                }
            }
            Action::TogglePause => {
                let running = self.clock.toggle_pause();
                info!("simulation {}", if running { "resumed" } else { "paused" });
            }
            Action::Stop => {
                if !self.stopped {
                    info!("simulation stopped after {} ticks", self.ticks);
                }
                self.stopped = true;
            }
        }
    }

    /// Feeds wall time to the clock and runs one tick when it is due.
    pub fn advance(&mut self, elapsed: Duration) -> bool {
        if self.stopped || !self.clock.accumulate(elapsed) {
            return false;
        }
        self.tick();
        true
    }

    /// One integrator pass with the clock's effective step. Forces are
    /// evaluated even while paused.
    pub fn tick(&mut self) {
        let dt = self.clock.effective_dt();
        integrator::step(&mut self.bodies, &self.model, dt);
        self.ticks += 1;
        debug!("tick {} (dt = {})", self.ticks, dt);
    }

    pub fn follow_hook(&mut self) {
        let was_hooked = self.camera.hooked();
        self.camera.follow(&self.bodies);
        if was_hooked.is_some() && self.camera.hooked().is_none() {
            info!("hooked body vanished; camera released");
        }
    }

    pub fn frame(&self, cursor: Option<DVec2>) -> RenderFrame {
        let bodies = self
            .bodies
            .iter()
            .map(|body| BodySprite {
                tag: body.tag(),
                screen_radius: body.radius() * self.camera.zoom,
                screen_position: self.camera.world_to_screen(body.position),
            })
            .collect();
        RenderFrame {
            bodies,
            overlay: Overlay {
                cursor_world: cursor.map(|c| self.camera.screen_to_world(c)),
                camera: self.camera.position,
                zoom: self.camera.zoom,
                ticks: self.ticks,
                paused: !self.clock.is_running(),
                hooked: self.camera.hooked(),
            },
        }
    }
}
