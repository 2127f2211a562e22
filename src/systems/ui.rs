use bevy::prelude::*;
use bevy_egui::EguiContexts;
use bevy_egui::egui;

use crate::resources::{FrameOverlay, ViewSettings};
use crate::simulation::{Action, Simulation};

pub fn overlay_panel(
    mut contexts: EguiContexts,
    overlay: Res<FrameOverlay>,
    mut simulation: ResMut<Simulation>,
    mut settings: ResMut<ViewSettings>,
    mut frames_rendered: Local<usize>,
) {
    if *frames_rendered < 5 {
        *frames_rendered += 1;
        return;
    }
    let Some(overlay) = overlay.0 else {
        return;
    };

    if let Ok(ctx) = contexts.ctx_mut() {
        egui::Window::new("GravSim")
            .default_pos(egui::pos2(10.0, 10.0))
            .max_size([320.0, 300.0])
            .show(ctx, |ui| {
                ui.heading("View");
                match overlay.cursor_world {
                    Some(cursor) => ui.label(format!("cursor  x: {:.4e}  y: {:.4e}", cursor.x, cursor.y)),
                    None => ui.label("cursor  outside window"),
                };
                ui.label(format!(
                    "camera  x: {:.4e}  y: {:.4e}",
                    overlay.camera.x, overlay.camera.y
                ));
                ui.label(format!("zoom  {:.4e}", overlay.zoom));

                ui.separator();
                ui.heading("Simulation");
                ui.label(format!("ticks  {}", overlay.ticks));
                match overlay.hooked {
                    Some(tag) => ui.label(format!("following body {tag}")),
                    None => ui.label("free camera"),
                };
                let pause_label = if overlay.paused { "Resume" } else { "Pause" };
                if ui.button(pause_label).clicked() {
                    simulation.dispatch(Action::TogglePause);
                }
                ui.checkbox(&mut settings.show_trails, "Show Trails");

                ui.separator();
                ui.heading("Controls");
                ui.label("Pan: Left Drag");
                ui.label("Zoom: Scroll Wheel");
                ui.label("Follow Body: Right Click");
                ui.label("Pause: Space   Trails: T");
                ui.label("Fullscreen: F11   Quit: Esc");
            });
    }
}
