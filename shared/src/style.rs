use serde::{Deserialize, Serialize};

use crate::colors::{self, Rgb};
use crate::language::Language;

/// Leaflet path options for one region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionStyle {
    pub fill_color: String,
    pub color: String,
    pub weight: u32,
    pub fill_opacity: f64,
}

impl RegionStyle {
    fn new(fill: Rgb, weight: u32, fill_opacity: f64) -> Self {
        Self {
            fill_color: colors::to_hex(fill),
            color: colors::STROKE.to_owned(),
            weight,
            fill_opacity,
        }
    }

    /// Region colored by its dominant language.
    pub fn for_language(language: Language) -> Self {
        Self::new(language.color_rgb(), 1, 0.7)
    }

    /// Region with no matched language data.
    pub fn neutral() -> Self {
        Self::new(colors::NO_DATA, 1, 0.3)
    }

    pub fn highlight() -> Self {
        Self::new(colors::HIGHLIGHT, 2, 0.7)
    }

    pub fn for_dominant(dominant: Option<Language>) -> Self {
        dominant.map_or_else(Self::neutral, Self::for_language)
    }
}

#[cfg(test)]
mod tests {
    use super::RegionStyle;
    use crate::language::Language;

    #[test]
    fn matched_region_uses_language_color() {
        let style = RegionStyle::for_dominant(Some(Language::Hakka));
        assert_eq!(style.fill_color, "#6B8EFF");
        assert_eq!(style.color, "black");
        assert_eq!(style.weight, 1);
        assert_eq!(style.fill_opacity, 0.7);
    }

    #[test]
    fn unmatched_region_is_neutral_and_faded() {
        let style = RegionStyle::for_dominant(None);
        assert_eq!(style, RegionStyle::neutral());
        assert_eq!(style.fill_color, "#CCCCCC");
        assert_eq!(style.fill_opacity, 0.3);
    }

    #[test]
    fn serializes_with_leaflet_option_names() {
        let value = serde_json::to_value(RegionStyle::highlight()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "fillColor": "#43484A",
                "color": "black",
                "weight": 2,
                "fillOpacity": 0.7
            })
        );
    }
}
