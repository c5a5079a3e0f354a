use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body returned by `POST /gerar-pix` on success.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ChargeResponse {
    pub qrcode_url: String,
    pub pix_code: String,
    pub message: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
    pub environment: String,
    pub api_key_configured: bool,
    pub response_mapping: String,
    pub uptime_seconds: u64,
    pub timestamp: DateTime<Utc>,
}
