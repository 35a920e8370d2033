use std::path::Path;

use langmap_shared::FeatureCollection;
use tracing::info;

use crate::config::BoundarySource;

const BODY_PREVIEW_CHARS: usize = 200;

pub async fn load_boundaries(
    client: &reqwest::Client,
    source: &BoundarySource,
) -> Result<FeatureCollection, String> {
    let boundaries = match source {
        BoundarySource::Url(url) => fetch_boundaries(client, url).await?,
        BoundarySource::File(path) => read_boundaries(path).await?,
    };
    info!(features = boundaries.len(), "loaded county boundaries");
    Ok(boundaries)
}

pub async fn fetch_boundaries(
    client: &reqwest::Client,
    url: &str,
) -> Result<FeatureCollection, String> {
    let resp = client
        .get(url)
        .send()
        .await
        .map_err(|e| format!("request to {url} failed: {e}"))?;
    let status = resp.status();
    let bytes = resp
        .bytes()
        .await
        .map_err(|e| format!("failed to read response body: {e}"))?;

    if !status.is_success() {
        return Err(format!(
            "upstream status {status}; body preview: {}",
            body_preview(&bytes)
        ));
    }

    FeatureCollection::from_slice(bytes.as_ref()).map_err(|e| {
        format!(
            "failed to decode boundary payload: {e}; body preview: {}",
            body_preview(&bytes)
        )
    })
}

async fn read_boundaries(path: &Path) -> Result<FeatureCollection, String> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
    FeatureCollection::from_slice(&bytes)
        .map_err(|e| format!("failed to decode {}: {e}", path.display()))
}

fn body_preview(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .chars()
        .take(BODY_PREVIEW_CHARS)
        .collect()
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::net::SocketAddr;

    use axum::Router;
    use axum::http::StatusCode;
    use axum::routing::get;

    use super::{body_preview, fetch_boundaries, load_boundaries};
    use crate::config::BoundarySource;

    const GEOJSON: &str = r#"{"type": "FeatureCollection", "features": [
        {"type": "Feature", "properties": {"COUNTYNAME": "臺北縣"}, "geometry": null}
    ]}"#;

    async fn spawn_test_server(app: Router) -> (SocketAddr, tokio::task::JoinHandle<()>) {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind test listener");
        let addr = listener.local_addr().expect("listener address");
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve test app");
        });
        (addr, handle)
    }

    fn test_app() -> Router {
        Router::new()
            .route("/geo.json", get(|| async { GEOJSON }))
            .route(
                "/down",
                get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "maintenance window") }),
            )
            .route("/html", get(|| async { "<html>not geojson</html>" }))
    }

    #[tokio::test]
    async fn fetches_and_decodes_feature_collection() {
        let (addr, handle) = spawn_test_server(test_app()).await;
        let client = reqwest::Client::new();

        let boundaries = fetch_boundaries(&client, &format!("http://{addr}/geo.json"))
            .await
            .expect("fetch boundaries");
        assert_eq!(boundaries.len(), 1);
        assert_eq!(boundaries.features[0].name("COUNTYNAME"), Some("臺北縣"));

        handle.abort();
    }

    #[tokio::test]
    async fn non_success_status_reports_status_and_body() {
        let (addr, handle) = spawn_test_server(test_app()).await;
        let client = reqwest::Client::new();

        let err = fetch_boundaries(&client, &format!("http://{addr}/down"))
            .await
            .unwrap_err();
        assert!(err.contains("503"), "{err}");
        assert!(err.contains("maintenance window"), "{err}");

        handle.abort();
    }

    #[tokio::test]
    async fn undecodable_payload_is_an_error() {
        let (addr, handle) = spawn_test_server(test_app()).await;
        let client = reqwest::Client::new();

        let err = fetch_boundaries(&client, &format!("http://{addr}/html"))
            .await
            .unwrap_err();
        assert!(err.starts_with("failed to decode boundary payload"), "{err}");
        assert!(err.contains("<html>not geojson</html>"), "{err}");

        handle.abort();
    }

    #[tokio::test]
    async fn loads_boundaries_from_local_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(GEOJSON.as_bytes()).expect("write geojson");

        let source = BoundarySource::File(file.path().to_path_buf());
        let boundaries = load_boundaries(&reqwest::Client::new(), &source)
            .await
            .expect("load boundaries");
        assert_eq!(boundaries.len(), 1);
    }

    #[tokio::test]
    async fn missing_local_file_is_an_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let source = BoundarySource::File(dir.path().join("missing.geojson"));
        let err = load_boundaries(&reqwest::Client::new(), &source)
            .await
            .unwrap_err();
        assert!(err.starts_with("failed to read"), "{err}");
    }

    #[test]
    fn body_preview_is_truncated_by_characters() {
        let body = "臺".repeat(300);
        assert_eq!(body_preview(body.as_bytes()).chars().count(), 200);
    }
}
