//! Collectible items

use serde::{Deserialize, Serialize};

use super::body::{Rect, SpatialBody};
use super::player::Player;
use crate::consts::GEM_VALUE;

/// Item kinds that can appear in level data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    Gem,
}

impl ItemKind {
    pub fn value(&self) -> u64 {
        match self {
            ItemKind::Gem => GEM_VALUE,
        }
    }
}

/// A pickup sitting in the level until the player touches it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub body: SpatialBody,
    pub kind: ItemKind,
    pub value: u64,
}

impl Item {
    pub fn new(rect: Rect, kind: ItemKind) -> Self {
        Self {
            body: SpatialBody::new(rect),
            kind,
            value: kind.value(),
        }
    }

    /// Pickup effect; called once, after the item left the level
    pub fn apply(&self, player: &mut Player) {
        player.score += self.value;
    }
}
