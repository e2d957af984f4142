//! Pixel Incubator - focus timer that hatches procedurally tinted pixel pets
//!
//! This library provides functionality to:
//! - Run an incubation countdown that hatches a creature on expiry
//! - Generate creatures from species, palette, accessory and background tables
//! - Recolor grayscale template sprites per creature and composite accessories
//! - Persist the hatched collection as a single JSON record
//! - Drive a background music playlist

pub mod assets;
pub mod audio;
pub mod clock;
pub mod color;
pub mod compositor;
pub mod config;
pub mod generator;
pub mod incubator;
pub mod models;
pub mod palettes;
pub mod store;
pub mod surface;
pub mod tint;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use compositor::Compositor;
pub use incubator::{Incubator, Tick};
pub use models::CreatureDescriptor;
