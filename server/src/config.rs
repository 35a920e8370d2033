use std::path::PathBuf;
use std::time::Duration;

pub const BOUNDARY_URL: &str =
    "https://raw.githubusercontent.com/g0v/twgeojson/master/json/twCounty2010.geo.json";
pub const DEFAULT_LANGUAGE_CSV: &str = "language_data.csv";
pub const DEFAULT_OUTPUT: &str = "taiwan_language_map.html";
pub const DEFAULT_NAME_PROPERTY: &str = "COUNTYNAME";

pub const DEFAULT_UPSTREAM_HTTP_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_UPSTREAM_CONNECT_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_SERVER_PORT: u16 = 3000;

/// Where county boundaries come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundarySource {
    Url(String),
    File(PathBuf),
}

/// Settings for one run, read once from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub boundary_source: BoundarySource,
    pub language_csv: PathBuf,
    pub aliases_path: Option<PathBuf>,
    pub output: PathBuf,
    pub name_property: String,
    pub http_timeout: Duration,
    pub connect_timeout: Duration,
    pub port: u16,
}

impl Settings {
    pub fn from_env() -> Self {
        Self {
            boundary_source: boundary_source(),
            language_csv: language_csv(),
            aliases_path: aliases_path(),
            output: output_path(),
            name_property: name_property(),
            http_timeout: upstream_http_timeout(),
            connect_timeout: upstream_connect_timeout(),
            port: server_port(),
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

/// A local file (`LANGMAP_BOUNDARY_PATH`) wins over the URL.
pub fn boundary_source() -> BoundarySource {
    if let Some(path) = non_empty_var("LANGMAP_BOUNDARY_PATH") {
        return BoundarySource::File(PathBuf::from(path));
    }
    BoundarySource::Url(
        non_empty_var("LANGMAP_BOUNDARY_URL").unwrap_or_else(|| BOUNDARY_URL.to_owned()),
    )
}

pub fn language_csv() -> PathBuf {
    non_empty_var("LANGMAP_LANGUAGE_CSV")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LANGUAGE_CSV))
}

pub fn aliases_path() -> Option<PathBuf> {
    non_empty_var("LANGMAP_ALIASES_PATH").map(PathBuf::from)
}

pub fn output_path() -> PathBuf {
    non_empty_var("LANGMAP_OUTPUT")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT))
}

pub fn name_property() -> String {
    non_empty_var("LANGMAP_NAME_PROPERTY").unwrap_or_else(|| DEFAULT_NAME_PROPERTY.to_owned())
}

pub fn upstream_http_timeout() -> Duration {
    std::env::var("UPSTREAM_HTTP_TIMEOUT_SECS")
        .ok()
        .and_then(|value| value.trim().parse::<u64>().ok())
        .filter(|value| *value > 0)
        .map(Duration::from_secs)
        .unwrap_or_else(|| Duration::from_secs(DEFAULT_UPSTREAM_HTTP_TIMEOUT_SECS))
}

pub fn upstream_connect_timeout() -> Duration {
    std::env::var("UPSTREAM_CONNECT_TIMEOUT_SECS")
        .ok()
        .and_then(|value| value.trim().parse::<u64>().ok())
        .filter(|value| *value > 0)
        .map(Duration::from_secs)
        .unwrap_or_else(|| Duration::from_secs(DEFAULT_UPSTREAM_CONNECT_TIMEOUT_SECS))
}

pub fn server_port() -> u16 {
    std::env::var("LANGMAP_PORT")
        .ok()
        .and_then(|value| value.trim().parse::<u16>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(DEFAULT_SERVER_PORT)
}
