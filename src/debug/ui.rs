//! Debug domain: status line overlay.

use bevy::prelude::*;

use crate::debug::state::DebugState;

/// Marker for status message text
#[derive(Component, Debug)]
pub struct DebugStatusMessage;

pub(crate) fn spawn_debug_status(mut commands: Commands) {
    commands.spawn((
        DebugStatusMessage,
        Text::new(""),
        TextFont {
            font_size: 14.0,
            ..default()
        },
        TextColor(Color::srgb(1.0, 1.0, 0.5)),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(16.0),
            bottom: Val::Px(8.0),
            ..default()
        },
    ));
}

pub(crate) fn update_debug_status(
    debug_state: Res<DebugState>,
    mut query: Query<&mut Text, With<DebugStatusMessage>>,
) {
    if !debug_state.is_changed() {
        return;
    }

    let message = debug_state
        .status_message
        .as_ref()
        .map_or(String::new(), |(msg, _)| msg.clone());
    for mut text in &mut query {
        **text = message.clone();
    }
}
