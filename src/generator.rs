//! Procedural creature generation
//!
//! Draws species, palette entry and background independently and uniformly.
//! An accessory is attached with probability [`ACCESSORY_CHANCE`]. There are
//! no exclusion rules between attributes.

use chrono::DateTime;
use rand::Rng;

use crate::models::{Accessory, Background, CreatureDescriptor, Species};
use crate::palettes::PALETTE;

/// Probability that a freshly hatched creature wears an accessory
pub const ACCESSORY_CHANCE: f64 = 0.3;

/// Generate a creature at `now_ms` (unix milliseconds).
///
/// # Examples
///
/// ```
/// use pixel_incubator::generator::generate;
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let creature = generate(&mut rng, 1_700_000_000_000);
/// assert_eq!(creature.id, 1_700_000_000_000);
/// assert_eq!(creature.captured_at, "11/14/2023");
/// ```
pub fn generate<R: Rng + ?Sized>(rng: &mut R, now_ms: i64) -> CreatureDescriptor {
    let species = Species::ALL[rng.random_range(0..Species::ALL.len())];
    let palette = PALETTE[rng.random_range(0..PALETTE.len())];
    let background = Background::ALL[rng.random_range(0..Background::ALL.len())];

    let accessory = if rng.random_bool(ACCESSORY_CHANCE) {
        Some(Accessory::ALL[rng.random_range(0..Accessory::ALL.len())])
    } else {
        None
    };

    CreatureDescriptor {
        id: now_ms,
        species,
        color_hex: palette.hex.to_string(),
        color_name: palette.name.to_string(),
        accessory,
        background,
        captured_at: format_capture_date(now_ms),
    }
}

/// `M/D/YYYY` in UTC; empty when the timestamp is out of chrono's range.
pub fn format_capture_date(now_ms: i64) -> String {
    DateTime::from_timestamp_millis(now_ms)
        .map(|t| t.format("%-m/%-d/%Y").to_string())
        .unwrap_or_default()
}
