use std::path::{Path, PathBuf};

use chrono::Utc;
use langmap_shared::{MapContext, MapModel};
use thiserror::Error;
use tracing::info;

use crate::config::Settings;
use crate::render;
use crate::services::{alias_loader, boundary_fetcher, dataset_loader};
use crate::state;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to build HTTP client: {0}")]
    HttpClient(String),
    #[error("failed to load boundary data: {0}")]
    Boundaries(String),
    #[error("failed to render map document: {0}")]
    Render(#[from] serde_json::Error),
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Output of one successful build.
#[derive(Debug, Clone)]
pub struct BuiltMap {
    pub model: MapModel,
    pub document: String,
}

/// Fetch boundaries, load the language table, reconcile and render.
///
/// Only boundary or rendering failures abort the build. A missing table or
/// bad rows degrade to neutral regions.
pub async fn build_map(settings: &Settings) -> Result<BuiltMap, PipelineError> {
    let client = state::http_client(settings.http_timeout, settings.connect_timeout)
        .map_err(PipelineError::HttpClient)?;
    let boundaries = boundary_fetcher::load_boundaries(&client, &settings.boundary_source)
        .await
        .map_err(PipelineError::Boundaries)?;

    let aliases = alias_loader::load_aliases(settings.aliases_path.as_deref());
    let dataset = dataset_loader::load_dataset(&settings.language_csv, &aliases);
    let context = MapContext::new(aliases, dataset, settings.name_property.as_str());

    let model = context.build_model(&boundaries);
    info!(
        regions = model.region_count(),
        matched = model.matched_count(),
        "reconciled regions with language data"
    );

    let document = render::render_document(&boundaries, &model, Utc::now())?;
    Ok(BuiltMap { model, document })
}

pub async fn write_document(path: &Path, document: &str) -> Result<(), PipelineError> {
    tokio::fs::write(path, document)
        .await
        .map_err(|source| PipelineError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    info!(path = %path.display(), bytes = document.len(), "map document written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::time::Duration;

    use langmap_shared::{DisplayMode, Language};

    use super::{PipelineError, build_map, write_document};
    use crate::config::{BoundarySource, Settings};

    const GEOJSON: &str = r#"{"type": "FeatureCollection", "features": [
        {"type": "Feature", "properties": {"COUNTYNAME": "臺北縣"}, "geometry": null},
        {"type": "Feature", "properties": {"COUNTYNAME": "苗栗縣"}, "geometry": null},
        {"type": "Feature", "properties": {"COUNTYNAME": "金門縣"}, "geometry": null}
    ]}"#;

    const TABLE: &str = "\
標題,,,,,
縣市,華語,閩南語,客家話,原住民語,備註
台北縣,97.0,70.9,5.5,1.2,
苗慄縣,92.8,45.0,65.2,1.3,客家人口比例高
";

    fn settings(dir: &Path) -> Settings {
        Settings {
            boundary_source: BoundarySource::File(dir.join("counties.geojson")),
            language_csv: dir.join("language_data.csv"),
            aliases_path: None,
            output: dir.join("map.html"),
            name_property: "COUNTYNAME".to_owned(),
            http_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(1),
            port: 0,
        }
    }

    #[tokio::test]
    async fn builds_model_and_document_from_local_inputs() {
        let dir = tempfile::tempdir().expect("temp dir");
        std::fs::write(dir.path().join("counties.geojson"), GEOJSON).unwrap();
        std::fs::write(dir.path().join("language_data.csv"), TABLE).unwrap();

        let built = build_map(&settings(dir.path())).await.expect("build map");
        assert_eq!(built.model.region_count(), 3);
        assert_eq!(built.model.matched_count(), 2);

        let exclude = built.model.views.get(DisplayMode::ExcludeMandarin);
        assert_eq!(exclude[0].display_name, "新北市");
        assert_eq!(exclude[1].dominant, Some(Language::Hakka));
        assert!(!exclude[2].matched);
        assert!(built.document.contains("langmap-data"));
    }

    #[tokio::test]
    async fn missing_language_table_still_renders_neutral_map() {
        let dir = tempfile::tempdir().expect("temp dir");
        std::fs::write(dir.path().join("counties.geojson"), GEOJSON).unwrap();

        let built = build_map(&settings(dir.path())).await.expect("build map");
        assert_eq!(built.model.region_count(), 3);
        assert_eq!(built.model.matched_count(), 0);
    }

    #[tokio::test]
    async fn missing_boundaries_abort_the_build() {
        let dir = tempfile::tempdir().expect("temp dir");
        std::fs::write(dir.path().join("language_data.csv"), TABLE).unwrap();

        let err = build_map(&settings(dir.path())).await.unwrap_err();
        assert!(matches!(err, PipelineError::Boundaries(_)), "{err}");
    }

    #[tokio::test]
    async fn write_document_reports_the_path_on_failure() {
        let dir = tempfile::tempdir().expect("temp dir");
        let target = dir.path().join("missing-dir").join("map.html");

        let err = write_document(&target, "<html></html>").await.unwrap_err();
        assert!(err.to_string().contains("missing-dir"), "{err}");

        let ok_target = dir.path().join("map.html");
        write_document(&ok_target, "<html></html>").await.unwrap();
        assert_eq!(std::fs::read_to_string(ok_target).unwrap(), "<html></html>");
    }
}
