use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use langmap_shared::{LanguageDataset, NameAliases, parse_language_table};
use tracing::{info, warn};

/// Load the census table at `path`.
///
/// A missing or unreadable file yields an empty dataset, so every region
/// renders neutral. Bad rows are logged and skipped.
pub fn load_dataset(path: &Path, aliases: &NameAliases) -> LanguageDataset {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            warn!(
                path = %path.display(),
                error = %e,
                "language table unavailable; continuing with an empty dataset"
            );
            return LanguageDataset::new();
        }
    };

    let parsed = parse_language_table(BufReader::new(file), aliases);
    for row_error in &parsed.row_errors {
        warn!(path = %path.display(), "skipped language table row: {row_error}");
    }

    if parsed.dataset.is_empty() {
        warn!(path = %path.display(), "language table contained no usable rows");
    } else {
        info!(
            keys = parsed.dataset.len(),
            skipped_rows = parsed.row_errors.len(),
            "loaded language data"
        );
    }
    parsed.dataset
}
