use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: brand → Color32
// ---------------------------------------------------------------------------

/// Maps every brand of a dataset to a distinct colour, so a brand keeps its
/// colour whatever the current filter.
#[derive(Debug, Clone, Default)]
pub struct BrandColors {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl BrandColors {
    pub fn new(brands: &[String]) -> Self {
        let mapping = brands
            .iter()
            .cloned()
            .zip(generate_palette(brands.len()))
            .collect();

        BrandColors {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a brand.
    pub fn color_for(&self, brand: &str) -> Color32 {
        self.mapping
            .get(brand)
            .copied()
            .unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_distinct_colours() {
        let colours = generate_palette(4);
        assert_eq!(colours.len(), 4);
        for (i, a) in colours.iter().enumerate() {
            assert!(colours[i + 1..].iter().all(|b| a != b));
        }
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn unknown_brand_is_gray() {
        let colors = BrandColors::new(&["Canon".to_string(), "Nikon".to_string()]);
        assert_ne!(colors.color_for("Canon"), colors.color_for("Nikon"));
        assert_eq!(colors.color_for("Minolta"), Color32::GRAY);
    }
}
