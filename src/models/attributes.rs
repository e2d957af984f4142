//! Enumerated creature attributes.
//!
//! Each attribute set is independent of the others: adding a species never
//! requires touching the accessory or background tables.

use serde::{Deserialize, Serialize};

/// Creature body template. Each species has one grayscale sprite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Species {
    Cat,
    Dog,
    Slime,
    Ghost,
    Dino,
}

impl Species {
    /// Every species, in table order
    pub const ALL: [Species; 5] = [Species::Cat, Species::Dog, Species::Slime, Species::Ghost, Species::Dino];

    pub fn as_str(&self) -> &'static str {
        match self {
            Species::Cat => "cat",
            Species::Dog => "dog",
            Species::Slime => "slime",
            Species::Ghost => "ghost",
            Species::Dino => "dino",
        }
    }
}

impl std::fmt::Display for Species {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Overlay drawn on top of the tinted body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Accessory {
    Crown,
    Headphones,
    Glasses,
    Hat,
    Scarf,
}

impl Accessory {
    /// Every accessory, in table order
    pub const ALL: [Accessory; 5] =
        [Accessory::Crown, Accessory::Headphones, Accessory::Glasses, Accessory::Hat, Accessory::Scarf];

    pub fn as_str(&self) -> &'static str {
        match self {
            Accessory::Crown => "crown",
            Accessory::Headphones => "headphones",
            Accessory::Glasses => "glasses",
            Accessory::Hat => "hat",
            Accessory::Scarf => "scarf",
        }
    }
}

impl std::fmt::Display for Accessory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scene behind the creature. Not part of the pixel transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Background {
    Grass,
    Space,
    Cloud,
    Desert,
    Forest,
}

impl Background {
    /// Every background, in table order
    pub const ALL: [Background; 5] =
        [Background::Grass, Background::Space, Background::Cloud, Background::Desert, Background::Forest];

    pub fn as_str(&self) -> &'static str {
        match self {
            Background::Grass => "grass",
            Background::Space => "space",
            Background::Cloud => "cloud",
            Background::Desert => "desert",
            Background::Forest => "forest",
        }
    }
}

impl std::fmt::Display for Background {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
