//! Loader for the RON collection file at startup.

use ron::Options;
use std::fs;
use std::path::Path;
use thiserror::Error;

use super::data::CollectionDef;

/// Error type for content loading failures.
#[derive(Debug, Error)]
pub enum ContentLoadError {
    #[error("Failed to load {file}: IO error: {source}")]
    Io {
        file: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to load {file}: Parse error: {source}")]
    Parse {
        file: String,
        #[source]
        source: ron::error::SpannedError,
    },
}

/// Create RON options with extensions enabled for more flexible parsing.
fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

/// Parse collection content from RON text. `file` is only used for error context.
pub fn parse_collection(contents: &str, file: &str) -> Result<CollectionDef, ContentLoadError> {
    ron_options()
        .from_str(contents)
        .map_err(|source| ContentLoadError::Parse {
            file: file.to_string(),
            source,
        })
}

/// Load the collection definition from disk.
pub fn load_collection(path: &Path) -> Result<CollectionDef, ContentLoadError> {
    let file_name = path.display().to_string();
    let contents = fs::read_to_string(path).map_err(|source| ContentLoadError::Io {
        file: file_name.clone(),
        source,
    })?;

    parse_collection(&contents, &file_name)
}
