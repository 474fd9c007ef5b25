//! Coalition provider client.
//!
//! The provider exposes the patient feed as one JSON array behind HTTP
//! Basic auth. Sync performs a single GET per trigger; any failure
//! aborts that sync with no retry.
//!
//! `fetch_patients` uses the blocking reqwest client, so it must run
//! on the blocking thread pool (`tokio::task::spawn_blocking`), never
//! on a runtime worker thread.

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::config::AppConfig;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Cannot reach provider at {0}")]
    Connection(String),

    #[error("Provider request timed out after {0}s")]
    Timeout(u64),

    #[error("Provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Cannot decode provider response: {0}")]
    Decode(String),

    #[error("Provider request failed: {0}")]
    Http(String),
}

// ═══════════════════════════════════════════════════════════════════════════
// Feed payload
// ═══════════════════════════════════════════════════════════════════════════

/// One patient entry in the provider feed.
///
/// Only `name` is required. Absent scalars become NULL locally and
/// absent collections are treated as empty sets.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderPatient {
    pub name: String,
    pub gender: Option<String>,
    pub age: Option<i64>,
    pub profile_picture: Option<String>,
    /// Provider format is `MM/DD/YYYY`; see [`normalize_date_of_birth`].
    pub date_of_birth: Option<String>,
    pub phone_number: Option<String>,
    pub emergency_contact: Option<String>,
    pub insurance_type: Option<String>,
    #[serde(default)]
    pub diagnosis_history: Vec<ProviderDiagnosisEntry>,
    #[serde(default)]
    pub diagnostic_list: Vec<ProviderDiagnostic>,
    #[serde(default)]
    pub lab_results: Vec<String>,
}

/// One month of vitals in the feed. The four vital objects are
/// required; a history entry without them is a malformed feed and
/// fails the whole decode.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderDiagnosisEntry {
    pub month: Option<String>,
    pub year: Option<i64>,
    pub blood_pressure: ProviderBloodPressure,
    pub heart_rate: ProviderVital,
    pub respiratory_rate: ProviderVital,
    pub temperature: ProviderTemperature,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderBloodPressure {
    pub systolic: ProviderPressureReading,
    pub diastolic: ProviderPressureReading,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderPressureReading {
    pub value: Option<i64>,
    pub levels: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderVital {
    pub value: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderTemperature {
    pub value: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderDiagnostic {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
}

/// Normalize a provider date of birth from `MM/DD/YYYY` to `YYYY-MM-DD`.
///
/// Only a value with exactly three `/`-separated parts is reordered.
/// Anything else is stored as received: the provider is the source of
/// truth and no range validation happens on this side.
pub fn normalize_date_of_birth(raw: Option<&str>) -> Option<String> {
    let raw = raw?;
    let parts: Vec<&str> = raw.split('/').collect();
    if parts.len() == 3 {
        Some(format!("{}-{}-{}", parts[2], parts[0], parts[1]))
    } else {
        Some(raw.to_string())
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Clients
// ═══════════════════════════════════════════════════════════════════════════

/// Source of patient records for sync. Implemented by the live
/// Coalition client and by test doubles.
pub trait PatientSource: Send + Sync {
    fn fetch_patients(&self) -> Result<Vec<ProviderPatient>, ProviderError>;
}

/// HTTP client for the Coalition patient feed.
pub struct CoalitionClient {
    url: String,
    username: String,
    password: String,
    timeout_secs: u64,
}

impl CoalitionClient {
    pub fn new(url: &str, username: &str, password: &str, timeout_secs: u64) -> Self {
        Self {
            url: url.trim_end_matches('/').to_string(),
            username: username.to_string(),
            password: password.to_string(),
            timeout_secs,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            &config.provider_url,
            &config.provider_username,
            &config.provider_password,
            config.provider_timeout_secs,
        )
    }
}

impl PatientSource for CoalitionClient {
    fn fetch_patients(&self) -> Result<Vec<ProviderPatient>, ProviderError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(self.timeout_secs))
            .build()
            .map_err(|e| ProviderError::Http(e.to_string()))?;

        tracing::debug!(url = %self.url, "Fetching provider feed");

        let response = client
            .get(&self.url)
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout(self.timeout_secs)
                } else if e.is_connect() {
                    ProviderError::Connection(self.url.clone())
                } else {
                    ProviderError::Http(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json()
            .map_err(|e| ProviderError::Decode(e.to_string()))
    }
}

/// Fixed-payload source for tests and offline development.
pub struct MockPatientSource {
    patients: Vec<ProviderPatient>,
    error: Option<String>,
}

impl MockPatientSource {
    pub fn new(patients: Vec<ProviderPatient>) -> Self {
        Self {
            patients,
            error: None,
        }
    }

    /// A source whose fetch always fails with the given message.
    pub fn failing(message: &str) -> Self {
        Self {
            patients: Vec::new(),
            error: Some(message.to_string()),
        }
    }
}

impl PatientSource for MockPatientSource {
    fn fetch_patients(&self) -> Result<Vec<ProviderPatient>, ProviderError> {
        match &self.error {
            Some(message) => Err(ProviderError::Http(message.clone())),
            None => Ok(self.patients.clone()),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════
