use serde::{Deserialize, Serialize};

use crate::colors::{self, Rgb};

/// Home languages tracked by the census table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    Mandarin,
    Hokkien,
    Hakka,
    Indigenous,
}

impl Language {
    /// Column order of the source table. Also the tie-break priority for
    /// [`dominant`]: earlier entries win on equal percentages.
    pub const ALL: [Language; 4] = [
        Language::Mandarin,
        Language::Hokkien,
        Language::Hakka,
        Language::Indigenous,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Mandarin => "華語",
            Self::Hokkien => "閩南語",
            Self::Hakka => "客家話",
            Self::Indigenous => "原住民語",
        }
    }

    pub fn color_rgb(self) -> Rgb {
        match self {
            Self::Mandarin => colors::MANDARIN,
            Self::Hokkien => colors::HOKKIEN,
            Self::Hakka => colors::HAKKA,
            Self::Indigenous => colors::INDIGENOUS,
        }
    }

    pub fn color_hex(self) -> String {
        colors::to_hex(self.color_rgb())
    }
}

/// Usage percentages for one county. Values may exceed 100 because the
/// source sums primary and secondary use.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LanguageRecord {
    pub mandarin: f64,
    pub hokkien: f64,
    pub hakka: f64,
    pub indigenous: f64,
}

impl LanguageRecord {
    pub const fn new(mandarin: f64, hokkien: f64, hakka: f64, indigenous: f64) -> Self {
        Self {
            mandarin,
            hokkien,
            hakka,
            indigenous,
        }
    }

    pub const fn get(&self, language: Language) -> f64 {
        match language {
            Language::Mandarin => self.mandarin,
            Language::Hokkien => self.hokkien,
            Language::Hakka => self.hakka,
            Language::Indigenous => self.indigenous,
        }
    }

    /// Entries in priority order.
    pub fn iter(&self) -> impl Iterator<Item = (Language, f64)> + '_ {
        Language::ALL
            .into_iter()
            .map(move |language| (language, self.get(language)))
    }

    /// Entries sorted by percentage, highest first. Equal values keep
    /// priority order.
    pub fn sorted_desc(&self) -> Vec<(Language, f64)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by(|a, b| b.1.total_cmp(&a.1));
        entries
    }

    pub fn dominant(&self, mode: DisplayMode) -> Option<(Language, f64)> {
        dominant(self, mode)
    }
}

/// The two mutually exclusive map modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    #[default]
    IncludeMandarin,
    ExcludeMandarin,
}

impl DisplayMode {
    pub const ALL: [DisplayMode; 2] = [DisplayMode::IncludeMandarin, DisplayMode::ExcludeMandarin];

    pub const fn from_exclude_mandarin(exclude_mandarin: bool) -> Self {
        if exclude_mandarin {
            Self::ExcludeMandarin
        } else {
            Self::IncludeMandarin
        }
    }

    pub const fn excludes_mandarin(self) -> bool {
        matches!(self, Self::ExcludeMandarin)
    }

    pub fn includes(self, language: Language) -> bool {
        !(self.excludes_mandarin() && language == Language::Mandarin)
    }

    /// Value used by the toggle control in the rendered page.
    pub fn key(self) -> &'static str {
        match self {
            Self::IncludeMandarin => "normal",
            Self::ExcludeMandarin => "exclude",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::IncludeMandarin => "包含華語",
            Self::ExcludeMandarin => "排除華語",
        }
    }
}

/// Highest-percentage language among those the mode compares.
///
/// Ties go to the language listed first in [`Language::ALL`]. Returns `None`
/// only if the mode leaves nothing to compare.
pub fn dominant(record: &LanguageRecord, mode: DisplayMode) -> Option<(Language, f64)> {
    let mut best: Option<(Language, f64)> = None;
    for (language, value) in record.iter().filter(|(language, _)| mode.includes(*language)) {
        match best {
            Some((_, current)) if value <= current => {}
            _ => best = Some((language, value)),
        }
    }
    best
}
