//! UI domain: loading overlay shown while a claim is in flight.

use bevy::prelude::*;

use crate::acquisition::AcquisitionController;

/// Marker for the loading overlay
#[derive(Component)]
pub struct LoadingOverlayUI;

pub(crate) fn spawn_loading_overlay(mut commands: Commands) {
    commands
        .spawn((
            LoadingOverlayUI,
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(0.0),
                right: Val::Px(0.0),
                top: Val::Px(0.0),
                bottom: Val::Px(0.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                display: Display::None,
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.6)),
            // Above the controls and cards
            ZIndex(100),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("Confirming claim..."),
                TextFont {
                    font_size: 32.0,
                    ..default()
                },
                TextColor(Color::srgb(0.9, 0.9, 0.9)),
            ));
        });
}

pub(crate) fn update_loading_overlay(
    controller: Option<Res<AcquisitionController>>,
    mut query: Query<&mut Node, With<LoadingOverlayUI>>,
) {
    let Some(controller) = controller else {
        return;
    };
    if !controller.is_changed() {
        return;
    }

    let display = if controller.loading_visible() {
        Display::Flex
    } else {
        Display::None
    };
    for mut node in &mut query {
        if node.display != display {
            node.display = display;
        }
    }
}
