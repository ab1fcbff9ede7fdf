//! Client configuration: where the backend lives and how uploads are sent.

use std::str::FromStr;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_UPLOAD_JSON_PATH: &str = "/upload_data";
pub const DEFAULT_UPLOAD_MULTIPART_PATH: &str = "/upload_files";
pub const DEFAULT_CAMPAIGN_PATH: &str = "/send_rewards";

/// Which submission protocol the upload uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    /// The whole file set as one JSON object of decoded text.
    #[default]
    Json,
    /// One multipart part per ready category, carrying the original file.
    Multipart,
}

impl FromStr for TransportKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(TransportKind::Json),
            "multipart" => Ok(TransportKind::Multipart),
            _ => Err(ConfigError::UnknownTransport(s.to_string())),
        }
    }
}

/// Dialect of the CSV export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CsvQuoting {
    /// Id, email and reward wrapped in double quotes, embedded quotes left as is.
    #[default]
    Verbatim,
    /// Standard quoting: fields quoted only when needed, quotes doubled.
    Rfc4180,
}

impl FromStr for CsvQuoting {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "verbatim" => Ok(CsvQuoting::Verbatim),
            "rfc4180" => Ok(CsvQuoting::Rfc4180),
            _ => Err(ConfigError::UnknownCsvQuoting(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub transport: TransportKind,
    pub upload_json_path: String,
    /// `/upload_files`; some deployments expose `/upload-csv` instead.
    pub upload_multipart_path: String,
    pub campaign_path: String,
    pub csv_quoting: CsvQuoting,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            transport: TransportKind::default(),
            upload_json_path: DEFAULT_UPLOAD_JSON_PATH.to_string(),
            upload_multipart_path: DEFAULT_UPLOAD_MULTIPART_PATH.to_string(),
            campaign_path: DEFAULT_CAMPAIGN_PATH.to_string(),
            csv_quoting: CsvQuoting::default(),
        }
    }
}

impl ClientConfig {
    /// Path of the upload endpoint for the configured protocol.
    pub fn upload_path(&self) -> &str {
        match self.transport {
            TransportKind::Json => &self.upload_json_path,
            TransportKind::Multipart => &self.upload_multipart_path,
        }
    }

    /// Path of the campaign endpoint for `model_id`, encoded as one segment.
    pub fn campaign_path_for(&self, model_id: &str) -> String {
        join_url(&self.campaign_path, &urlencoding::encode(model_id))
    }

    /// Layers build-time overrides on top of `self`. Blank values are skipped;
    /// unparsable ones are logged and leave the current setting in place.
    pub fn with_overrides(
        mut self,
        api_base_url: Option<&str>,
        transport: Option<&str>,
        csv_quoting: Option<&str>,
    ) -> Self {
        if let Some(url) = api_base_url.map(str::trim).filter(|u| !u.is_empty()) {
            self.api_base_url = url.to_string();
        }
        if let Some(raw) = transport.filter(|t| !t.trim().is_empty()) {
            match raw.parse() {
                Ok(kind) => self.transport = kind,
                Err(err) => warn!("{}; keeping {:?}", err, self.transport),
            }
        }
        if let Some(raw) = csv_quoting.filter(|q| !q.trim().is_empty()) {
            match raw.parse() {
                Ok(quoting) => self.csv_quoting = quoting,
                Err(err) => warn!("{}; keeping {:?}", err, self.csv_quoting),
            }
        }
        self
    }

    /// Absolute URL for an endpoint path.
    pub fn url(&self, path: &str) -> String {
        join_url(&self.api_base_url, path)
    }
}

/// Joins two URL pieces with exactly one `/` between them.
pub fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        return base.to_string();
    }
    format!("{}/{}", base, path)
}
