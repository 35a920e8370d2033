use crate::dataset::LanguageDataset;
use crate::language::LanguageRecord;
use crate::names::NameAliases;

const COUNTY_SUFFIX: char = '縣';
const CITY_SUFFIX: char = '市';

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionMatch<'a> {
    /// Dataset key that matched; also the display name of the region.
    pub key: &'a str,
    pub record: &'a LanguageRecord,
}

/// Lookup keys for a boundary feature name, in priority order and without
/// duplicates: normalized, raw, normalized with `縣` → `市`, raw with `縣` → `市`.
pub fn candidate_keys(feature_name: &str, aliases: &NameAliases) -> Vec<String> {
    let normalized = aliases.normalize(feature_name);
    let county_to_city = [swap_county_suffix(&normalized), swap_county_suffix(feature_name)];

    let mut candidates: Vec<String> = Vec::with_capacity(4);
    for candidate in [Some(normalized), Some(feature_name.to_owned())]
        .into_iter()
        .chain(county_to_city)
        .flatten()
    {
        if !candidates.contains(&candidate) {
            candidates.push(candidate);
        }
    }
    candidates
}

/// First candidate key of `feature_name` present in `dataset`.
pub fn match_region<'a>(
    feature_name: &str,
    dataset: &'a LanguageDataset,
    aliases: &NameAliases,
) -> Option<RegionMatch<'a>> {
    candidate_keys(feature_name, aliases)
        .iter()
        .find_map(|candidate| dataset.get_key_value(candidate))
        .map(|(key, record)| RegionMatch { key, record })
}

fn swap_county_suffix(name: &str) -> Option<String> {
    name.strip_suffix(COUNTY_SUFFIX)
        .map(|stem| format!("{stem}{CITY_SUFFIX}"))
}
