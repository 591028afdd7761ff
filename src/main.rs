mod acquisition;
mod content;
mod controls;
mod core;
#[cfg(feature = "dev-tools")]
mod debug;
mod inventory;
mod movement;
mod sprites;
mod ui;
mod zones;

use avian2d::prelude::*;
use bevy::prelude::*;

fn main() {
    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Collect Zones".to_string(),
            resolution: (1280, 720).into(),
            resizable: true,
            ..default()
        }),
        ..default()
    }))
    .add_plugins(PhysicsPlugins::default())
    .insert_resource(Gravity(Vec2::ZERO))
    .add_plugins((
        core::CorePlugin,
        content::ContentPlugin,
        sprites::SpritesPlugin,
        inventory::InventoryPlugin,
        controls::ControlsPlugin,
        zones::ZonesPlugin,
        acquisition::AcquisitionPlugin,
        movement::MovementPlugin,
        ui::UiPlugin,
    ));

    #[cfg(feature = "dev-tools")]
    app.add_plugins(debug::DebugPlugin);

    app.run();
}
