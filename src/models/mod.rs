//! Data models for hatched creatures

mod attributes;
mod creature;

// Re-export all public types
pub use attributes::{Accessory, Background, Species};
pub use creature::CreatureDescriptor;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_display_matches_serde() {
        for species in Species::ALL {
            let json = serde_json::to_string(&species).unwrap();
            assert_eq!(json, format!("\"{}\"", species));
        }
        for accessory in Accessory::ALL {
            let json = serde_json::to_string(&accessory).unwrap();
            assert_eq!(json, format!("\"{}\"", accessory));
        }
        for background in Background::ALL {
            let json = serde_json::to_string(&background).unwrap();
            assert_eq!(json, format!("\"{}\"", background));
        }
    }
}
