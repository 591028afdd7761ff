//! Inventory domain: display cards for collected items.

use bevy::prelude::*;
use thiserror::Error;

use crate::content::CardDef;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CardError {
    #[error("Card prefab is not configured")]
    MissingPrefab,
    #[error("Card grid container is missing")]
    MissingContainer,
}

/// Render layer that shows one card per collected item.
pub trait CardDisplay<A> {
    /// Remove every card currently shown.
    fn clear_cards(&mut self);
    /// Add a card whose single image element shows `asset`.
    fn spawn_card(&mut self, asset: A) -> Result<(), CardError>;
}

/// Marker for the UI node that holds collection cards
#[derive(Component, Debug)]
pub struct CollectionGrid;

/// Marker for a spawned collection card
#[derive(Component, Debug)]
pub struct CollectionCard;

/// Bevy UI implementation of [`CardDisplay`], built per system run.
pub struct CardGrid<'a, 'w, 's> {
    commands: &'a mut Commands<'w, 's>,
    container: Option<Entity>,
    prefab: Option<&'a CardDef>,
    existing: Vec<Entity>,
}

impl<'a, 'w, 's> CardGrid<'a, 'w, 's> {
    pub fn new(
        commands: &'a mut Commands<'w, 's>,
        container: Option<Entity>,
        prefab: Option<&'a CardDef>,
        existing: impl IntoIterator<Item = Entity>,
    ) -> Self {
        Self {
            commands,
            container,
            prefab,
            existing: existing.into_iter().collect(),
        }
    }
}

impl CardDisplay<Handle<Image>> for CardGrid<'_, '_, '_> {
    fn clear_cards(&mut self) {
        for entity in self.existing.drain(..) {
            self.commands.entity(entity).despawn();
        }
    }

    fn spawn_card(&mut self, asset: Handle<Image>) -> Result<(), CardError> {
        let prefab = self.prefab.ok_or(CardError::MissingPrefab)?;
        let container = self.container.ok_or(CardError::MissingContainer)?;
        let (r, g, b, a) = prefab.background;

        self.commands.entity(container).with_children(|grid| {
            grid.spawn((
                CollectionCard,
                Node {
                    width: Val::Px(prefab.width),
                    height: Val::Px(prefab.height),
                    padding: UiRect::all(Val::Px(prefab.padding)),
                    ..default()
                },
                BackgroundColor(Color::srgba(r, g, b, a)),
            ))
            .with_child((
                ImageNode::new(asset),
                Node {
                    width: Val::Percent(100.0),
                    height: Val::Percent(100.0),
                    ..default()
                },
            ));
        });
        Ok(())
    }
}
