//! UI domain: container for collected item cards.

use bevy::prelude::*;

use crate::inventory::CollectionGrid;

pub(crate) fn spawn_collection_grid(mut commands: Commands) {
    commands.spawn((
        CollectionGrid,
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(16.0),
            right: Val::Px(16.0),
            top: Val::Px(48.0),
            flex_wrap: FlexWrap::Wrap,
            column_gap: Val::Px(8.0),
            row_gap: Val::Px(8.0),
            ..default()
        },
    ));
}
