//! Sprite registry and fallback asset loading.
//!
//! Builds a name-to-asset table from the configured item catalog at startup.
//! Names missing from the table are looked up on disk through a fallback
//! loader, using `folder/name` or the bare name when no folder is configured.

use bevy::prelude::*;
use std::collections::HashMap;
use std::path::PathBuf;

/// External asset loader used when a sprite is not in the catalog.
pub trait SpriteLoader<A>: Send + Sync {
    /// Load the asset at `path`, or `None` if nothing exists there.
    fn load(&self, path: &str) -> Option<A>;
}

/// Resource mapping sprite names to loaded assets.
#[derive(Resource)]
pub struct SpriteRegistry<A = Handle<Image>>
where
    A: Clone + Send + Sync + 'static,
{
    sprites: HashMap<String, A>,
    folder: Option<String>,
    fallback: Option<Box<dyn SpriteLoader<A>>>,
}

impl<A> SpriteRegistry<A>
where
    A: Clone + Send + Sync + 'static,
{
    /// Build the registry from `(name, asset)` catalog entries.
    /// Entries without an asset are skipped; for duplicate names the first wins.
    pub fn build<I>(catalog: I, folder: Option<String>) -> Self
    where
        I: IntoIterator<Item = (String, Option<A>)>,
    {
        let mut sprites = HashMap::new();
        for (name, asset) in catalog {
            let Some(asset) = asset else {
                continue;
            };
            sprites.entry(name).or_insert(asset);
        }

        Self {
            sprites,
            folder: folder.filter(|f| !f.is_empty()),
            fallback: None,
        }
    }

    /// Attach the loader used for catalog misses.
    pub fn with_fallback(mut self, loader: impl SpriteLoader<A> + 'static) -> Self {
        self.fallback = Some(Box::new(loader));
        self
    }

    /// Resolve a sprite: catalog first, then the fallback loader.
    pub fn resolve(&self, name: &str) -> Option<A> {
        if let Some(asset) = self.sprites.get(name) {
            return Some(asset.clone());
        }

        let path = self.fallback_path(name);
        let loader = self.fallback.as_ref()?;
        debug!("Sprite '{}' not in catalog, checking '{}'", name, path);
        loader.load(&path)
    }

    /// Path tried by the fallback loader for `name`.
    pub fn fallback_path(&self, name: &str) -> String {
        match &self.folder {
            Some(folder) => format!("{}/{}", folder, name),
            None => name.to_string(),
        }
    }

    /// Check if a sprite is in the catalog.
    pub fn contains(&self, name: &str) -> bool {
        self.sprites.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }
}

/// Fallback loader reading images from the asset folder on disk.
pub struct AssetFolderLoader {
    server: AssetServer,
    root: PathBuf,
}

impl AssetFolderLoader {
    const EXTENSIONS: [&'static str; 2] = ["png", "jpg"];

    pub fn new(server: AssetServer, root: impl Into<PathBuf>) -> Self {
        Self {
            server,
            root: root.into(),
        }
    }

    fn find_on_disk(&self, path: &str) -> Option<String> {
        if self.root.join(path).is_file() {
            return Some(path.to_string());
        }
        Self::EXTENSIONS
            .iter()
            .map(|ext| format!("{}.{}", path, ext))
            .find(|candidate| self.root.join(candidate).is_file())
    }
}

impl SpriteLoader<Handle<Image>> for AssetFolderLoader {
    fn load(&self, path: &str) -> Option<Handle<Image>> {
        let found = self.find_on_disk(path)?;
        Some(self.server.load(found))
    }
}
