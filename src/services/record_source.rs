//! Record sources: randomuser.me over HTTP, or a saved payload on disk

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::Url;
use serde::Deserialize;
use tracing::{debug, info};

use crate::config::Config;
use crate::types::{Result, UserRecord, UserStatsError};

/// Trait for anything that can hand over a batch of user records
pub trait RecordSource: Send + Sync {
    /// Source name for display (e.g. "randomuser.me")
    fn name(&self) -> &str;

    /// Produce the full batch
    fn fetch(&self) -> Result<Vec<UserRecord>>;
}

// ========== payload format ==========

/// randomuser.me response body (only the fields we use)
#[derive(Debug, Deserialize)]
struct Payload {
    results: Vec<PayloadUser>,
    #[serde(default)]
    info: Option<PayloadInfo>,
}

#[derive(Debug, Deserialize)]
struct PayloadInfo {
    #[serde(default)]
    seed: Option<String>,
    #[serde(default)]
    results: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct PayloadUser {
    gender: String,
    dob: PayloadDob,
    location: PayloadLocation,
    registered: PayloadRegistered,
}

#[derive(Debug, Deserialize)]
struct PayloadDob {
    age: u32,
}

#[derive(Debug, Deserialize)]
struct PayloadLocation {
    country: String,
}

#[derive(Debug, Deserialize)]
struct PayloadRegistered {
    date: String,
}

impl From<PayloadUser> for UserRecord {
    fn from(user: PayloadUser) -> Self {
        UserRecord {
            gender: user.gender,
            age: user.dob.age,
            country: user.location.country,
            registered_at: user.registered.date,
        }
    }
}

/// Decode a randomuser.me payload into records.
/// The buffer is used as scratch space by simd-json.
pub fn parse_payload(bytes: &mut [u8]) -> Result<Vec<UserRecord>> {
    let payload: Payload =
        simd_json::serde::from_slice(bytes).map_err(|e| UserStatsError::Parse(e.to_string()))?;

    if let Some(info) = &payload.info {
        debug!(seed = ?info.seed, results = ?info.results, "payload info");
    }

    Ok(payload.results.into_iter().map(UserRecord::from).collect())
}

// ========== randomuser.me ==========

/// Fetches one batch from the randomuser.me API
pub struct RandomUserSource {
    endpoint: Url,
    timeout: Duration,
}

impl RandomUserSource {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            endpoint: build_url(config)?,
            timeout: Duration::from_secs(config.timeout_secs),
        })
    }

    /// Fully-qualified request URL, query included
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

/// Build the request URL: `results` always, `nat` and `seed` when set
pub fn build_url(config: &Config) -> Result<Url> {
    let mut params: Vec<(&str, String)> = vec![("results", config.results.to_string())];

    let nat = config
        .nationalities
        .iter()
        .map(|n| n.trim().to_ascii_lowercase())
        .filter(|n| !n.is_empty())
        .collect::<Vec<_>>()
        .join(",");
    if !nat.is_empty() {
        params.push(("nat", nat));
    }
    if let Some(seed) = config.seed.as_deref().filter(|s| !s.is_empty()) {
        params.push(("seed", seed.to_string()));
    }

    Url::parse_with_params(&config.api_url, &params)
        .map_err(|e| UserStatsError::Config(format!("invalid api_url: {}", e)))
}

impl RecordSource for RandomUserSource {
    fn name(&self) -> &str {
        "randomuser.me"
    }

    fn fetch(&self) -> Result<Vec<UserRecord>> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| UserStatsError::Fetch(format!("HTTP client error: {}", e)))?;

        info!(url = %self.endpoint, "fetching users");
        let response = client
            .get(self.endpoint.clone())
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| UserStatsError::Fetch(format!("HTTP request failed: {}", e)))?;

        let mut body = response
            .bytes()
            .map_err(|e| UserStatsError::Fetch(format!("failed to read body: {}", e)))?
            .to_vec();

        let records = parse_payload(&mut body)?;
        info!(count = records.len(), "fetched users");
        Ok(records)
    }
}

// ========== saved payload ==========

/// Reads a saved randomuser.me payload from disk
pub struct FileSource {
    path: PathBuf,
    name: String,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path.display().to_string();
        Self { path, name }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordSource for FileSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch(&self) -> Result<Vec<UserRecord>> {
        let mut content = fs::read(&self.path)?;
        let records = parse_payload(&mut content)?;
        debug!(path = %self.path.display(), count = records.len(), "loaded users from file");
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLE: &str = r#"{
        "results": [
            {
                "gender": "female",
                "name": {"title": "Ms", "first": "Ana", "last": "Costa"},
                "location": {"city": "Natal", "country": "Brazil"},
                "dob": {"date": "1990-04-02T11:22:33.000Z", "age": 34},
                "registered": {"date": "2015-06-25T05:50:33.498Z", "age": 9}
            },
            {
                "gender": "male",
                "location": {"country": "Finland"},
                "dob": {"age": 71},
                "registered": {"date": "2009-01-15T00:00:00.000Z"}
            }
        ],
        "info": {"seed": "abc", "results": 2, "page": 1, "version": "1.4"}
    }"#;

    #[test]
    fn test_parse_payload_maps_fields() {
        let mut bytes = SAMPLE.as_bytes().to_vec();
        let records = parse_payload(&mut bytes).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0],
            UserRecord::new("female", 34, "Brazil", "2015-06-25T05:50:33.498Z")
        );
        assert_eq!(records[1].country, "Finland");
        assert_eq!(records[1].age, 71);
    }

    #[test]
    fn test_parse_payload_without_info() {
        let mut bytes = br#"{"results": []}"#.to_vec();
        let records = parse_payload(&mut bytes).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_parse_payload_invalid() {
        let mut bytes = b"{\"error\": \"Uh oh\"}".to_vec();
        let err = parse_payload(&mut bytes).unwrap_err();
        assert!(matches!(err, UserStatsError::Parse(_)));
    }

    #[test]
    fn test_build_url_defaults() {
        let url = build_url(&Config::default()).unwrap();
        assert_eq!(url.as_str(), "https://randomuser.me/api/?results=25");
    }

    #[test]
    fn test_build_url_with_filters() {
        let config = Config {
            results: 100,
            nationalities: vec!["BR".into(), " us ".into(), "".into()],
            seed: Some("demo".into()),
            ..Config::default()
        };
        let url = build_url(&config).unwrap();
        assert_eq!(
            url.as_str(),
            "https://randomuser.me/api/?results=100&nat=br%2Cus&seed=demo"
        );
    }

    #[test]
    fn test_build_url_skips_empty_seed() {
        let config = Config {
            seed: Some(String::new()),
            ..Config::default()
        };
        let url = build_url(&config).unwrap();
        assert!(!url.as_str().contains("seed"));
    }

    #[test]
    fn test_random_user_source_endpoint() {
        let source = RandomUserSource::new(&Config::default()).unwrap();
        assert_eq!(source.name(), "randomuser.me");
        assert_eq!(source.endpoint().host_str(), Some("randomuser.me"));
    }

    #[test]
    fn test_file_source_reads_payload() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("users.json");
        fs::write(&path, SAMPLE).unwrap();

        let source = FileSource::new(&path);
        assert_eq!(source.path(), path.as_path());
        let records = source.fetch().unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_file_source_missing_file() {
        let source = FileSource::new("/definitely/not/here.json");
        let err = source.fetch().unwrap_err();
        assert!(matches!(err, UserStatsError::Io(_)));
    }
}
