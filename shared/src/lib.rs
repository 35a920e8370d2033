pub mod colors;
pub mod dataset;
pub mod geo;
pub mod language;
pub mod map;
pub mod matcher;
pub mod names;
pub mod popup;
pub mod style;

pub use dataset::{LanguageDataset, ParsedDataset, RowError, parse_language_table};
pub use geo::{BoundaryFeature, FeatureCollection, GeoJsonError};
pub use language::{DisplayMode, Language, LanguageRecord, dominant};
pub use map::{MapContext, MapModel, ModeViews, RegionSummary, RegionView};
pub use matcher::{RegionMatch, candidate_keys, match_region};
pub use names::{AliasTableError, NameAliases, normalize};
pub use style::RegionStyle;
