use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::DimensionValue;

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
// Color mapping: group key → Color32
// ---------------------------------------------------------------------------

/// Maps the grouping dimension's values to distinct colours. Built from
/// the dataset's full value set so colours stay stable while filtering.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<DimensionValue, Color32>,
    default_color: Color32,
}

impl ColorMap {
    /// Build a colour map for the grouping dimension's unique values.
    pub fn new(unique_values: &BTreeSet<DimensionValue>) -> Self {
        let palette = generate_palette(unique_values.len());
        let mapping: BTreeMap<DimensionValue, Color32> = unique_values
            .iter()
            .zip(palette.into_iter())
            .map(|(v, c): (&DimensionValue, Color32)| (*v, c))
            .collect();

        ColorMap {
            mapping,
            default_color: Color32::LIGHT_BLUE,
        }
    }

    /// Map for an ungrouped chart: every box gets the default colour.
    pub fn empty() -> Self {
        ColorMap {
            mapping: BTreeMap::new(),
            default_color: Color32::LIGHT_BLUE,
        }
    }

    /// Look up the colour for a group key; `None` is the ungrouped box.
    pub fn color_for(&self, key: Option<DimensionValue>) -> Color32 {
        key.and_then(|v| self.mapping.get(&v).copied())
            .unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_is_distinct_and_sized() {
        let colors = generate_palette(5);
        assert_eq!(colors.len(), 5);
        let mut unique = colors.clone();
        unique.dedup();
        assert_eq!(unique.len(), 5);
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn color_map_is_stable_per_value() {
        let mut values = BTreeSet::new();
        values.insert(DimensionValue::Integer(4));
        values.insert(DimensionValue::Integer(8));
        let map = ColorMap::new(&values);
        assert_eq!(
            map.color_for(Some(DimensionValue::Integer(4))),
            map.color_for(Some(DimensionValue::Integer(4)))
        );
        assert_ne!(
            map.color_for(Some(DimensionValue::Integer(4))),
            map.color_for(Some(DimensionValue::Integer(8)))
        );
    }

    #[test]
    fn unknown_key_falls_back_to_default() {
        let map = ColorMap::empty();
        assert_eq!(map.color_for(None), Color32::LIGHT_BLUE);
        assert_eq!(
            map.color_for(Some(DimensionValue::Integer(99))),
            Color32::LIGHT_BLUE
        );
    }
}
