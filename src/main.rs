use asteroids::constants::{SCREEN_HEIGHT, SCREEN_WIDTH};
use asteroids::game::Game;
use asteroids::menu::OverlayPlugin;
use asteroids::simulation::SimulationPlugin;
use asteroids::{audio, graphics, rendering};
use bevy::prelude::*;
use bevy::window::WindowResolution;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Asteroids".into(),
                resolution: WindowResolution::new(SCREEN_WIDTH as u32, SCREEN_HEIGHT as u32),
                resizable: false,
                ..Default::default()
            }),
            ..Default::default()
        }))
        .insert_resource(ClearColor(Color::BLACK))
        // OverlayPlugin registers GameState, which SimulationPlugin mirrors into.
        .add_plugins((OverlayPlugin, SimulationPlugin))
        .add_systems(
            Startup,
            (
                graphics::setup_camera,
                rendering::setup_hud,
                audio::load_cue_library,
            ),
        )
        .add_systems(
            Update,
            (rendering::game_render_system, rendering::hud_display_system)
                .run_if(resource_exists::<Game>),
        )
        .run();
}
