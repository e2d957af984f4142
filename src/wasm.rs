//! WASM API module for browser/JS interop
//!
//! The page owns the canvas, timers and `localStorage`; these bindings give it
//! the creature generator, the tint pass and collection (de)serialization.

use rand::rngs::StdRng;
use rand::SeedableRng;
use wasm_bindgen::prelude::*;

use crate::color::parse_hex_color;
use crate::generator::generate;
use crate::models::CreatureDescriptor;
use crate::store::{decode_collection, encode_collection, Collection};
use crate::tint::tint_rgba_bytes;

/// Initialize panic hook for better error messages in WASM
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    #[cfg(feature = "wasm")]
    console_error_panic_hook::set_once();
}

/// Tint the near-white pixels of a canvas `ImageData` buffer.
///
/// # Arguments
/// * `pixels` - RGBA bytes, 4 per pixel
/// * `color_hex` - `#RRGGBB` target color
///
/// # Returns
/// The recolored buffer, or the input unchanged if `color_hex` is invalid
#[wasm_bindgen]
pub fn tint_rgba(mut pixels: Vec<u8>, color_hex: &str) -> Vec<u8> {
    if let Ok(target) = parse_hex_color(color_hex) {
        tint_rgba_bytes(&mut pixels, target);
    }
    pixels
}

/// Generate a creature as descriptor JSON.
///
/// # Arguments
/// * `seed` - random seed (e.g. from `crypto.getRandomValues`)
/// * `now_ms` - `Date.now()`
#[wasm_bindgen]
pub fn hatch_creature(seed: u64, now_ms: f64) -> String {
    let mut rng = StdRng::seed_from_u64(seed);
    let creature = generate(&mut rng, now_ms as i64);
    serde_json::to_string(&creature).unwrap_or_default()
}

/// Turn whatever `localStorage` holds into a well-formed record.
///
/// # Returns
/// `{"collection": [...]}`, empty when `raw` is missing or malformed
#[wasm_bindgen]
pub fn normalize_collection(raw: Option<String>) -> String {
    let collection = decode_collection(raw.as_deref());
    encode_collection(&collection).unwrap_or_default()
}

/// Prepend a creature (descriptor JSON) to a saved record.
///
/// # Returns
/// The updated record, or the normalized input record if `creature_json`
/// is not a valid descriptor
#[wasm_bindgen]
pub fn append_creature(raw: Option<String>, creature_json: &str) -> String {
    let collection = decode_collection(raw.as_deref());
    let updated = match serde_json::from_str::<CreatureDescriptor>(creature_json) {
        Ok(creature) => {
            let mut creatures = vec![creature];
            creatures.extend(collection.iter().cloned());
            Collection::from(creatures)
        }
        Err(_) => collection,
    };
    encode_collection(&updated).unwrap_or_default()
}

/// `m:ss` label for the countdown display.
#[wasm_bindgen]
pub fn countdown_label(remaining_ms: f64) -> String {
    crate::incubator::format_countdown(remaining_ms as i64)
}
