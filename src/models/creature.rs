//! The creature descriptor produced by a hatch.

use image::Rgb;
use serde::{Deserialize, Serialize};

use super::attributes::{Accessory, Background, Species};
use crate::color::{parse_hex_color, ColorError};

/// Immutable record of one hatched creature's visual attributes.
///
/// Field names match the persisted JSON layout. The `bg` and `date` aliases
/// accept collections saved by the first browser release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatureDescriptor {
    /// Creation timestamp in unix milliseconds
    pub id: i64,
    pub species: Species,
    /// `#RRGGBB` tint, always paired with `color_name`
    pub color_hex: String,
    pub color_name: String,
    /// `null` in JSON when the creature has no accessory
    #[serde(default)]
    pub accessory: Option<Accessory>,
    #[serde(alias = "bg")]
    pub background: Background,
    /// Display-only capture date
    #[serde(alias = "date")]
    pub captured_at: String,
}

impl CreatureDescriptor {
    /// The body tint parsed from `color_hex`.
    pub fn tint_color(&self) -> Result<Rgb<u8>, ColorError> {
        parse_hex_color(&self.color_hex)
    }

    /// Short uppercase label, e.g. `SKY SLIME`.
    pub fn headline(&self) -> String {
        format!("{} {}", self.color_name, self.species).to_uppercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CreatureDescriptor {
        CreatureDescriptor {
            id: 1_760_000_000_000,
            species: Species::Slime,
            color_hex: "#29ADFF".to_string(),
            color_name: "Sky".to_string(),
            accessory: None,
            background: Background::Cloud,
            captured_at: "10/9/2025".to_string(),
        }
    }

    #[test]
    fn test_serializes_camel_case_with_null_accessory() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["colorHex"], "#29ADFF");
        assert_eq!(json["colorName"], "Sky");
        assert_eq!(json["capturedAt"], "10/9/2025");
        assert_eq!(json["background"], "cloud");
        assert_eq!(json["species"], "slime");
        assert!(json["accessory"].is_null());
    }

    #[test]
    fn test_accepts_legacy_field_names() {
        let legacy = r##"{"id":5,"species":"cat","colorHex":"#FF004D","colorName":"Crimson",
            "accessory":"crown","bg":"space","date":"1/2/2025"}"##;
        let parsed: CreatureDescriptor = serde_json::from_str(legacy).unwrap();
        assert_eq!(parsed.background, Background::Space);
        assert_eq!(parsed.accessory, Some(Accessory::Crown));
        assert_eq!(parsed.captured_at, "1/2/2025");
    }

    #[test]
    fn test_missing_accessory_defaults_to_none() {
        let json = r##"{"id":5,"species":"dino","colorHex":"#00E436","colorName":"Lime",
            "background":"forest","capturedAt":"x"}"##;
        let parsed: CreatureDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.accessory, None);
    }

    #[test]
    fn test_unknown_species_is_rejected() {
        let json = r##"{"id":5,"species":"dragon","colorHex":"#00E436","colorName":"Lime",
            "background":"forest","capturedAt":"x"}"##;
        assert!(serde_json::from_str::<CreatureDescriptor>(json).is_err());
    }

    #[test]
    fn test_headline_and_tint() {
        let creature = sample();
        assert_eq!(creature.headline(), "SKY SLIME");
        assert_eq!(creature.tint_color(), Ok(Rgb([41, 173, 255])));
    }
}
