//! Built-in creature color palette.
//!
//! Every hatched creature draws exactly one entry from this table. Names and
//! hex values travel together into the descriptor; they are never mixed.
//! Colors are PICO-8 inspired.
//! Reference: https://lospec.com/palette-list/pico-8

/// A named tint color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteEntry {
    /// Display name, shown in the hatch announcement
    pub name: &'static str,
    /// `#RRGGBB` tint color
    pub hex: &'static str,
}

const fn entry(name: &'static str, hex: &'static str) -> PaletteEntry {
    PaletteEntry { name, hex }
}

/// The creature palette. None of these are near-white, so a tinted body is
/// never re-tinted by a second pass.
pub const PALETTE: &[PaletteEntry] = &[
    entry("Crimson", "#FF004D"),
    entry("Tangerine", "#FFA300"),
    entry("Lemon", "#FFEC27"),
    entry("Lime", "#00E436"),
    entry("Sky", "#29ADFF"),
    entry("Lavender", "#83769C"),
    entry("Bubblegum", "#FF77A8"),
    entry("Peach", "#FFCCAA"),
    entry("Moss", "#008751"),
    entry("Cocoa", "#AB5236"),
    entry("Midnight", "#1D2B53"),
];

/// Returns all palette entries.
pub fn list_entries() -> &'static [PaletteEntry] {
    PALETTE
}

/// Looks up an entry by its display name (case-sensitive).
pub fn get_entry(name: &str) -> Option<PaletteEntry> {
    PALETTE.iter().copied().find(|e| e.name == name)
}
