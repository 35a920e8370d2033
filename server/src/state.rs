use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use langmap_shared::RegionSummary;
use tracing::warn;

use crate::pipeline::BuiltMap;

const USER_AGENT: &str = concat!("taiwan-langmap/", env!("CARGO_PKG_VERSION"));

/// Shared state of the preview server. Everything is serialized once at
/// startup and handed out by reference count.
#[derive(Clone)]
pub struct AppState {
    pub document: Arc<Bytes>,
    pub regions_json: Arc<Bytes>,
    pub region_count: usize,
    pub matched_count: usize,
}

impl AppState {
    pub fn new(built: &BuiltMap) -> Result<Self, serde_json::Error> {
        let regions: &[RegionSummary] = &built.model.summaries;
        let regions_json = serde_json::to_vec(regions)?;
        Ok(Self {
            document: Arc::new(Bytes::from(built.document.clone())),
            regions_json: Arc::new(Bytes::from(regions_json)),
            region_count: built.model.region_count(),
            matched_count: built.model.matched_count(),
        })
    }
}

pub fn http_client(
    request_timeout: Duration,
    connect_timeout: Duration,
) -> Result<reqwest::Client, String> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(request_timeout)
        .connect_timeout(connect_timeout)
        .build()
        .or_else(|e| {
            warn!(
                error = %e,
                "failed to build configured HTTP client, retrying without custom user-agent"
            );
            reqwest::Client::builder()
                .timeout(request_timeout)
                .connect_timeout(connect_timeout)
                .build()
        })
        .map_err(|e| e.to_string())
}
