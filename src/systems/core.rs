use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::math::DVec2;
use bevy::prelude::MessageReader;
use bevy::prelude::*;
use bevy::window::{MonitorSelection, PrimaryWindow, WindowMode};
use bevy_egui::input::EguiWantsInput;
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::components::*;
use crate::resources::*;
use crate::simulation::{Action, Simulation};

/// Maps a top-left-origin screen position onto the centered, y-up 2D canvas.
pub fn screen_to_canvas(screen: DVec2, viewport: DVec2) -> Vec2 {
    let centered = screen - viewport / 2.0;
    Vec2::new(centered.x as f32, -centered.y as f32)
}

/// Parses a hex color hint, falling back to a random hue.
pub fn resolve_color(hint: Option<&str>, rng: &mut impl Rng) -> Color {
    if let Some(hint) = hint {
        match Srgba::hex(hint) {
            Ok(color) => return color.into(),
            Err(err) => warn!("ignoring color hint {:?}: {}", hint, err),
        }
    }
    Color::hsl(rng.random_range(0.0..360.0), 0.8, 0.6)
}

/// Sets up the camera and one circle per simulated body.
pub fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    simulation: Res<Simulation>,
    hints: Res<ColorHints>,
) {
    commands.spawn(Camera2d);

    info!(
        "starting with {} bodies, {} s per tick",
        simulation.bodies().len(),
        simulation.clock().tick_interval()
    );

    let mesh_handle = meshes.add(Circle::new(1.0));
    let mut rng = StdRng::from_os_rng();

    for body in simulation.bodies() {
        let hint = hints.0.get(body.tag().0).and_then(|h| h.as_deref());
        let color = resolve_color(hint, &mut rng);

        commands.spawn((
            Mesh2d(mesh_handle.clone()),
            MeshMaterial2d(materials.add(ColorMaterial::from(color))),
            Transform::default(),
            BodyHandle(body.tag()),
            Trail::default(),
        ));
    }
}

/// Turns mouse drag, wheel and right-click into pan, zoom and hook actions.
pub fn handle_pointer_input(
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mut mouse_wheel: MessageReader<MouseWheel>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut simulation: ResMut<Simulation>,
    egui_input: Res<EguiWantsInput>,
) {
    let blocked = egui_input.wants_any_pointer_input();

    for event in mouse_wheel.read() {
        if blocked {
            continue;
        }
        let units = match event.unit {
            MouseScrollUnit::Line => event.y as f64 * WHEEL_UNITS_PER_LINE,
            MouseScrollUnit::Pixel => event.y as f64,
        };
        if units != 0.0 {
            simulation.dispatch(Action::Zoom(units));
        }
    }

    let Ok(window) = windows.single() else {
        return;
    };
    simulation.set_viewport(DVec2::new(window.width() as f64, window.height() as f64));

    if blocked {
        return;
    }
    let Some(pointer) = window.cursor_position().map(|v| v.as_dvec2()) else {
        return;
    };

    if mouse_buttons.just_pressed(MouseButton::Left) {
        simulation.dispatch(Action::PanStart(pointer));
    } else if mouse_buttons.pressed(MouseButton::Left) {
        simulation.dispatch(Action::PanTo(pointer));
    }

    if mouse_buttons.just_pressed(MouseButton::Right) {
        simulation.dispatch(Action::Hook(pointer));
    }
}

/// Space pauses, Escape stops, F11 toggles fullscreen, T toggles trails.
pub fn handle_keyboard_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
    mut simulation: ResMut<Simulation>,
    mut settings: ResMut<ViewSettings>,
    egui_input: Res<EguiWantsInput>,
) {
    if egui_input.wants_any_keyboard_input() {
        return;
    }

    if keyboard.just_pressed(KeyCode::Space) {
        simulation.dispatch(Action::TogglePause);
    }
    if keyboard.just_pressed(KeyCode::Escape) {
        simulation.dispatch(Action::Stop);
    }
    if keyboard.just_pressed(KeyCode::KeyT) {
        settings.show_trails = !settings.show_trails;
    }
    if keyboard.just_pressed(KeyCode::F11)
        && let Ok(mut window) = windows.single_mut()
    {
        window.mode = match window.mode {
            WindowMode::Windowed => WindowMode::BorderlessFullscreen(MonitorSelection::Current),
            _ => WindowMode::Windowed,
        };
    }
}

/// Feeds real elapsed time to the simulation clock, running a tick when due.
pub fn step_simulation(time: Res<Time<Real>>, mut simulation: ResMut<Simulation>) {
    simulation.advance(time.delta());
}

/// Ends the app once a stop has been requested.
pub fn exit_when_stopped(simulation: Res<Simulation>, mut exit: MessageWriter<AppExit>) {
    if simulation.is_stopped() {
        exit.write(AppExit::Success);
    }
}

/// Re-centers the camera on the hooked body, if any.
pub fn follow_hooked_body(mut simulation: ResMut<Simulation>) {
    simulation.follow_hook();
}

/// Moves and scales body sprites to the current view and publishes the overlay.
pub fn sync_body_sprites(
    simulation: Res<Simulation>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut overlay: ResMut<FrameOverlay>,
    mut query: Query<(&BodyHandle, &mut Transform)>,
) {
    let cursor = windows
        .single()
        .ok()
        .and_then(|window| window.cursor_position())
        .map(|v| v.as_dvec2());
    let frame = simulation.frame(cursor);
    let viewport = simulation.camera().viewport();

    for (handle, mut transform) in &mut query {
        if let Some(sprite) = frame.bodies.iter().find(|sprite| sprite.tag == **handle) {
            transform.translation = screen_to_canvas(sprite.screen_position, viewport).extend(0.0);
            transform.scale = Vec3::splat((sprite.screen_radius as f32).max(MIN_SCREEN_RADIUS));
        }
    }

    overlay.0 = Some(frame.overlay);
}

/// Draws motion trails for bodies when enabled in settings.
pub fn draw_trails(
    mut gizmos: Gizmos,
    mut query: Query<(&BodyHandle, &mut Trail)>,
    simulation: Res<Simulation>,
    time: Res<Time>,
    settings: Res<ViewSettings>,
) {
    if !settings.show_trails {
        return;
    }

    let camera = simulation.camera();
    for (handle, mut trail) in query.iter_mut() {
        trail.timer.tick(time.delta());
        if trail.timer.just_finished()
            && let Some(body) = simulation.body(**handle)
        {
            trail.history.push_back(body.position);
            if trail.history.len() > TRAIL_LENGTH {
                trail.history.pop_front();
            }
        }

        if trail.history.len() >= 2 {
            gizmos.linestrip_2d(
                trail
                    .history
                    .iter()
                    .map(|p| screen_to_canvas(camera.world_to_screen(*p), camera.viewport())),
                Color::srgba(0.5, 0.8, 1.0, 0.3),
            );
        }
    }
}
