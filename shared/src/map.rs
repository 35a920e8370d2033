use serde::{Deserialize, Serialize};

use crate::dataset::LanguageDataset;
use crate::geo::{BoundaryFeature, FeatureCollection};
use crate::language::{DisplayMode, Language, LanguageRecord};
use crate::matcher::{RegionMatch, match_region};
use crate::names::NameAliases;
use crate::popup::popup_html;
use crate::style::RegionStyle;

pub const UNNAMED_REGION: &str = "未命名區域";

/// Everything one map build reads from. Built once, never mutated.
#[derive(Debug, Clone)]
pub struct MapContext {
    aliases: NameAliases,
    dataset: LanguageDataset,
    name_property: String,
}

/// What the renderer draws for one region in one mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionView {
    pub display_name: String,
    pub matched: bool,
    pub dominant: Option<Language>,
    pub style: RegionStyle,
    pub popup: String,
}

/// Region views for both display modes, index-aligned with the boundary
/// features.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ModeViews {
    #[serde(rename = "normal")]
    pub include_mandarin: Vec<RegionView>,
    #[serde(rename = "exclude")]
    pub exclude_mandarin: Vec<RegionView>,
}

impl ModeViews {
    pub fn get(&self, mode: DisplayMode) -> &[RegionView] {
        match mode {
            DisplayMode::IncludeMandarin => &self.include_mandarin,
            DisplayMode::ExcludeMandarin => &self.exclude_mandarin,
        }
    }

    fn get_mut(&mut self, mode: DisplayMode) -> &mut Vec<RegionView> {
        match mode {
            DisplayMode::IncludeMandarin => &mut self.include_mandarin,
            DisplayMode::ExcludeMandarin => &mut self.exclude_mandarin,
        }
    }
}

/// Reconciled view of one boundary feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionSummary {
    pub feature_name: Option<String>,
    pub matched_key: Option<String>,
    pub record: Option<LanguageRecord>,
    pub note: Option<String>,
    pub dominant: Option<Language>,
    pub dominant_excluding_mandarin: Option<Language>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapModel {
    pub highlight: RegionStyle,
    pub views: ModeViews,
    pub summaries: Vec<RegionSummary>,
}

impl MapModel {
    pub fn region_count(&self) -> usize {
        self.summaries.len()
    }

    pub fn matched_count(&self) -> usize {
        self.summaries
            .iter()
            .filter(|summary| summary.matched_key.is_some())
            .count()
    }
}

impl MapContext {
    pub fn new(
        aliases: NameAliases,
        dataset: LanguageDataset,
        name_property: impl Into<String>,
    ) -> Self {
        Self {
            aliases,
            dataset,
            name_property: name_property.into(),
        }
    }

    pub fn match_feature(&self, feature: &BoundaryFeature) -> Option<RegionMatch<'_>> {
        let name = feature.name(&self.name_property)?;
        match_region(name, &self.dataset, &self.aliases)
    }

    /// Style and popup for `feature` in `mode`. Unmatched features get the
    /// neutral style and a no-data popup.
    pub fn region_view(&self, feature: &BoundaryFeature, mode: DisplayMode) -> RegionView {
        self.view_for(feature, self.match_feature(feature), mode)
    }

    pub fn summarize(&self, feature: &BoundaryFeature) -> RegionSummary {
        self.summary_for(feature, self.match_feature(feature))
    }

    /// Run matching once per feature, then styling and popups for both
    /// modes.
    pub fn build_model(&self, boundaries: &FeatureCollection) -> MapModel {
        let mut views = ModeViews::default();
        let mut summaries = Vec::with_capacity(boundaries.len());
        for feature in &boundaries.features {
            let matched = self.match_feature(feature);
            for mode in DisplayMode::ALL {
                views.get_mut(mode).push(self.view_for(feature, matched, mode));
            }
            summaries.push(self.summary_for(feature, matched));
        }

        MapModel {
            highlight: RegionStyle::highlight(),
            views,
            summaries,
        }
    }

    fn view_for(
        &self,
        feature: &BoundaryFeature,
        matched: Option<RegionMatch<'_>>,
        mode: DisplayMode,
    ) -> RegionView {
        match matched {
            Some(matched) => {
                let dominant = matched.record.dominant(mode).map(|(language, _)| language);
                RegionView {
                    display_name: matched.key.to_owned(),
                    matched: true,
                    dominant,
                    style: RegionStyle::for_dominant(dominant),
                    popup: popup_html(
                        matched.key,
                        Some(matched.record),
                        self.dataset.note(matched.key),
                        mode,
                    ),
                }
            }
            None => {
                let display_name = self.fallback_name(feature);
                RegionView {
                    popup: popup_html(&display_name, None, None, mode),
                    display_name,
                    matched: false,
                    dominant: None,
                    style: RegionStyle::neutral(),
                }
            }
        }
    }

    fn summary_for(
        &self,
        feature: &BoundaryFeature,
        matched: Option<RegionMatch<'_>>,
    ) -> RegionSummary {
        let dominant_in = |mode: DisplayMode| {
            matched
                .and_then(|m| m.record.dominant(mode))
                .map(|(language, _)| language)
        };
        RegionSummary {
            feature_name: feature.name(&self.name_property).map(str::to_owned),
            matched_key: matched.map(|m| m.key.to_owned()),
            record: matched.map(|m| *m.record),
            note: matched
                .and_then(|m| self.dataset.note(m.key))
                .map(str::to_owned),
            dominant: dominant_in(DisplayMode::IncludeMandarin),
            dominant_excluding_mandarin: dominant_in(DisplayMode::ExcludeMandarin),
        }
    }

    fn fallback_name(&self, feature: &BoundaryFeature) -> String {
        feature
            .name(&self.name_property)
            .map(|name| self.aliases.normalize(name))
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| UNNAMED_REGION.to_owned())
    }
}
