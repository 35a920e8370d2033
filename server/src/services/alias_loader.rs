use std::path::Path;

use langmap_shared::NameAliases;
use tracing::{info, warn};

/// Alias table from `path`, or the built-in one when no path is configured
/// or the file cannot be used.
pub fn load_aliases(path: Option<&Path>) -> NameAliases {
    let Some(path) = path else {
        return NameAliases::builtin().clone();
    };

    let loaded = std::fs::read_to_string(path)
        .map_err(|e| e.to_string())
        .and_then(|json| NameAliases::from_json(&json).map_err(|e| e.to_string()));

    match loaded {
        Ok(aliases) => {
            info!(
                path = %path.display(),
                renames = aliases.rename_count(),
                "loaded name alias table"
            );
            aliases
        }
        Err(e) => {
            warn!(
                path = %path.display(),
                error = %e,
                "failed to load name alias table; using built-in table"
            );
            NameAliases::builtin().clone()
        }
    }
}
