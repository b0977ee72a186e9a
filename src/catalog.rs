//! Level catalog
//!
//! The eight hand-authored levels. Content ships as `assets/levels.json`
//! embedded in the binary; any other catalog with the same shape can be
//! loaded with [`Catalog::from_json`]. The engine only ever reads it.

use std::collections::HashSet;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::LEVEL_COUNT;
use crate::error::CatalogError;
use crate::sim::collision::Rect;
use crate::sim::hazard::HazardConfig;

/// Static obstacles are plain rectangles
pub type Obstacle = Rect;

const BUILTIN_LEVELS: &str = include_str!("../assets/levels.json");

/// Item category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Heart,
    Star,
    Gift,
    Sparkle,
}

/// A collectible with its reward message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Unique across the whole catalog
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub kind: ItemKind,
    pub message: String,
    pub glyph: String,
}

impl Item {
    #[inline]
    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// Difficulty label shown with the level name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Expert,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Expert => "Expert",
        }
    }
}

/// One level definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub name: String,
    /// Presentation theme tag
    pub theme: String,
    pub difficulty: Difficulty,
    pub items: Vec<Item>,
    pub obstacles: Vec<Obstacle>,
    pub hazards: Vec<HazardConfig>,
}

impl Level {
    /// Ids of every item in this level
    pub fn item_ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.items.iter().map(|item| item.id)
    }
}

/// Ordered, immutable set of levels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    levels: Vec<Level>,
}

impl Catalog {
    /// The levels shipped with the game
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_LEVELS)
    }

    /// Parse and validate a catalog from JSON
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = serde_json::from_str(json)?;
        catalog.validate()?;
        log::info!(
            "Loaded catalog: {} levels, {} items, {} hazards",
            catalog.len(),
            catalog.total_items(),
            catalog.total_hazards()
        );
        Ok(catalog)
    }

    /// Build a catalog from already-constructed levels
    pub fn from_levels(levels: Vec<Level>) -> Result<Self, CatalogError> {
        let catalog = Self { levels };
        catalog.validate()?;
        Ok(catalog)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        if self.levels.len() != LEVEL_COUNT {
            return Err(CatalogError::LevelCount {
                expected: LEVEL_COUNT,
                found: self.levels.len(),
            });
        }

        let mut item_ids = HashSet::new();
        let mut hazard_ids = HashSet::new();
        let in_field = |v: f32| (0.0..=100.0).contains(&v);

        for (index, level) in self.levels.iter().enumerate() {
            if level.items.is_empty() {
                // Only completes once something else has been collected this run
                log::warn!("Level {} ({}) has no items", index + 1, level.name);
            }

            for item in &level.items {
                if !item_ids.insert(item.id) {
                    return Err(CatalogError::DuplicateItemId(item.id));
                }
                if !in_field(item.x) || !in_field(item.y) {
                    return Err(CatalogError::OutOfBounds {
                        level: index,
                        what: format!("item {}", item.id),
                    });
                }
            }

            for (i, obs) in level.obstacles.iter().enumerate() {
                let fits = in_field(obs.x)
                    && in_field(obs.y)
                    && in_field(obs.max_x())
                    && in_field(obs.max_y())
                    && obs.width > 0.0
                    && obs.height > 0.0;
                if !fits {
                    return Err(CatalogError::OutOfBounds {
                        level: index,
                        what: format!("obstacle {}", i),
                    });
                }
            }

            for hazard in &level.hazards {
                if !hazard_ids.insert(hazard.id.clone()) {
                    return Err(CatalogError::DuplicateHazardId(hazard.id.clone()));
                }
                if !in_field(hazard.start_x) || !in_field(hazard.start_y) {
                    return Err(CatalogError::OutOfBounds {
                        level: index,
                        what: format!("hazard {}", hazard.id),
                    });
                }
            }
        }

        Ok(())
    }

    pub fn level(&self, index: usize) -> Option<&Level> {
        self.levels.get(index)
    }

    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn total_items(&self) -> usize {
        self.levels.iter().map(|l| l.items.len()).sum()
    }

    pub fn total_hazards(&self) -> usize {
        self.levels.iter().map(|l| l.hazards.len()).sum()
    }
}
