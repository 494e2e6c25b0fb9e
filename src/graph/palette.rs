//! Deterministic node color palette.
//!
//! Colors come from five well-known sequential scales. The union is
//! deduplicated in first-seen order and then shuffled with a fixed seed, so
//! neighboring palette slots contrast instead of blending and every run
//! assigns identical colors.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

const PALETTE_SEED: u64 = 42;

const VIRIDIS: [&str; 10] = [
    "#440154", "#482878", "#3e4989", "#31688e", "#26828e", "#1f9e89", "#35b779", "#6ece58",
    "#b5de2b", "#fde725",
];

const PLASMA: [&str; 10] = [
    "#0d0887", "#46039f", "#7201a8", "#9c179e", "#bd3786", "#d8576b", "#ed7953", "#fb9f3a",
    "#fdca26", "#f0f921",
];

const MAGMA: [&str; 10] = [
    "#000004", "#180f3d", "#440f76", "#721f81", "#9e2f7f", "#cd4071", "#f1605d", "#fd9567",
    "#feca8d", "#fcfdbf",
];

const INFERNO: [&str; 10] = [
    "#000004", "#1b0c41", "#4a0c6b", "#781c6d", "#a52c60", "#cf4446", "#ed6925", "#fb9b06",
    "#f7d03c", "#fcffa4",
];

const CIVIDIS: [&str; 10] = [
    "#00224e", "#123570", "#3b496c", "#575d6d", "#707173", "#8a8678", "#a59c74", "#c3b369",
    "#e1cc55", "#fee838",
];

/// Builds the shuffled fallback palette used for nodes without an explicit
/// color. The result is identical on every call.
pub fn shuffled_palette() -> Vec<&'static str> {
    let mut colors: Vec<&'static str> = Vec::new();
    let mut seen = HashSet::new();
    for scale in [VIRIDIS, PLASMA, MAGMA, INFERNO, CIVIDIS] {
        for color in scale {
            if seen.insert(color) {
                colors.push(color);
            }
        }
    }

    let mut rng = StdRng::seed_from_u64(PALETTE_SEED);
    colors.shuffle(&mut rng);
    colors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_deduplicates_shared_colors() {
        // Magma and Inferno both start at #000004, so the union is one short
        // of the raw 50.
        let palette = shuffled_palette();
        assert_eq!(palette.len(), 49);

        let unique: HashSet<_> = palette.iter().collect();
        assert_eq!(unique.len(), palette.len());
    }

    #[test]
    fn palette_is_stable_across_calls() {
        assert_eq!(shuffled_palette(), shuffled_palette());
    }

    #[test]
    fn palette_entries_are_hex_colors() {
        for color in shuffled_palette() {
            assert!(color.starts_with('#') && color.len() == 7, "{color}");
            assert!(color[1..].chars().all(|c| c.is_ascii_hexdigit()));
        }
    }

    #[test]
    fn shuffle_actually_reorders() {
        let palette = shuffled_palette();
        assert_ne!(&palette[..10], &VIRIDIS[..]);
    }
}
