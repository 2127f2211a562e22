mod body;
mod camera;
mod components;
mod config;
mod force;
mod integrator;
mod resources;
mod simulation;
mod systems;
mod vector;

use std::path::PathBuf;

use bevy::prelude::*;
use bevy::window::WindowResolution;
use bevy_egui::{EguiPlugin, EguiPrimaryContextPass};
use clap::Parser;

use crate::config::{ConfigError, DEFAULT_CONFIG_FILE, SimulationConfig};
use crate::resources::{ColorHints, FrameOverlay, ViewSettings};
use crate::resources::{WINDOW_HEIGHT, WINDOW_WIDTH};
use crate::simulation::Simulation;
use crate::systems::*;

#[derive(Parser, Debug)]
#[command(about = "Interactive Newtonian gravity simulator")]
struct Args {
    /// Scenario file, or a directory containing config.json.
    #[arg(default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,
}

fn main() -> Result<(), ConfigError> {
    let args = Args::parse();
    let config = SimulationConfig::load(&args.config)?;

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "GravSim".into(),
                resolution: WindowResolution::new(WINDOW_WIDTH, WINDOW_HEIGHT),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(EguiPlugin::default())
        .insert_resource(ClearColor(Color::srgb_u8(0x00, 0x00, 0x22)))
        .insert_resource(Simulation::from_config(&config))
        .insert_resource(ColorHints(
            config.bodies.iter().map(|b| b.color.clone()).collect(),
        ))
        .insert_resource(ViewSettings {
            show_trails: config.trails,
        })
        .init_resource::<FrameOverlay>()
        .add_systems(EguiPrimaryContextPass, overlay_panel)
        .add_systems(Startup, setup_scene)
        .add_systems(
            Update,
            (
                handle_pointer_input,
                handle_keyboard_input,
                step_simulation,
                exit_when_stopped,
                follow_hooked_body,
                sync_body_sprites,
                draw_trails,
            )
                .chain(),
        )
        .run();

    Ok(())
}
