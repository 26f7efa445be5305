//! Standalone room grid editor
//!
//! Run with: cargo run -p room_grid_editor --features app

use bevy::prelude::*;
use bevy::window::WindowResolution;
use room_grid_editor::app::RoomGridEditorPlugin;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Room Grid Editor".to_string(),
                resolution: WindowResolution::new(1600, 900),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(RoomGridEditorPlugin)
        .run();
}
