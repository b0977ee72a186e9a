//! Error types for the fallible edges of the game: loading level content and
//! reading settings. Gameplay itself never fails.

use std::io;

/// Errors produced while parsing or validating a level catalog.
#[derive(thiserror::Error, Debug)]
pub enum CatalogError {
    #[error("Catalog parsing failed: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Catalog must contain exactly {expected} levels, found {found}")]
    LevelCount { expected: usize, found: usize },

    #[error("Item id {0} appears more than once in the catalog")]
    DuplicateItemId(u32),

    #[error("Hazard id {0:?} appears more than once in the catalog")]
    DuplicateHazardId(String),

    #[error("Level {level}: {what} lies outside the play-field")]
    OutOfBounds { level: usize, what: String },
}

/// Errors produced while loading driver settings.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Settings parsing failed: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid settings: {0}")]
    Invalid(String),
}

/// Anything that can stop the game from starting.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}
