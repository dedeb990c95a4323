//! HTTP client for the upstream patient-list endpoint.
//!
//! The endpoint serves the whole patient list in one authenticated GET; there
//! is no pagination and no query surface. Fetching is one-shot by contract:
//! no retry, no backoff, and failures at this boundary are logged and leave
//! the dashboard empty rather than surfacing to the user.

use reqwest::StatusCode;
use thiserror::Error;
use tracing::{error, info};
use vitals_core::{DashboardState, PatientRecord};

const DEFAULT_ENDPOINT_URL: &str =
    "https://fedskillstest.coalitiontechnologies.workers.dev/patients";
const DEFAULT_USERNAME: &str = "coalition";
const DEFAULT_PASSWORD: &str = "skills-test";

const ENDPOINT_URL_VAR: &str = "VITALS_ENDPOINT_URL";
const USERNAME_VAR: &str = "VITALS_API_USERNAME";
const PASSWORD_VAR: &str = "VITALS_API_PASSWORD";

/// Endpoint location and the Basic credential pair.
///
/// The defaults are the fixed upstream pair; each field can be overridden
/// from the environment so deployments are not tied to literals in source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub endpoint_url: String,
    pub username: String,
    pub password: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint_url: DEFAULT_ENDPOINT_URL.to_string(),
            username: DEFAULT_USERNAME.to_string(),
            password: DEFAULT_PASSWORD.to_string(),
        }
    }
}

impl ApiConfig {
    /// Resolve the config from `VITALS_ENDPOINT_URL`, `VITALS_API_USERNAME`
    /// and `VITALS_API_PASSWORD`, falling back to the built-in defaults for
    /// any variable that is unset.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            endpoint_url: std::env::var(ENDPOINT_URL_VAR).unwrap_or(defaults.endpoint_url),
            username: std::env::var(USERNAME_VAR).unwrap_or(defaults.username),
            password: std::env::var(PASSWORD_VAR).unwrap_or(defaults.password),
        }
    }
}

/// Fetch failure taxonomy. Credential rejections get their own variant even
/// though callers currently treat them the same as transport failures.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("patient endpoint unreachable: {0}")]
    Network(String),
    #[error("credentials rejected with status {status}")]
    Auth { status: u16 },
    #[error("malformed patient payload: {0}")]
    Decode(String),
}

/// Blocking client for the patient-list endpoint.
pub struct PatientClient {
    config: ApiConfig,
    client: reqwest::blocking::Client,
}

impl PatientClient {
    /// The fetch is one-shot and not cancellable, so the client carries no
    /// request timeout.
    pub fn new(config: ApiConfig) -> Self {
        Self {
            config,
            client: reqwest::blocking::Client::new(),
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// GET the patient list with the Basic credential pair.
    pub fn fetch_patients(&self) -> Result<Vec<PatientRecord>, ApiError> {
        let response = self
            .client
            .get(&self.config.endpoint_url)
            .basic_auth(&self.config.username, Some(&self.config.password))
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .send()
            .map_err(|err| ApiError::Network(err.to_string()))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ApiError::Auth {
                status: status.as_u16(),
            });
        }
        if !status.is_success() {
            return Err(ApiError::Network(format!("unexpected status {status}")));
        }

        let body = response
            .text()
            .map_err(|err| ApiError::Network(err.to_string()))?;
        decode_patients(&body)
    }

    /// Fetch and populate the dashboard state. On failure the error is
    /// logged and the state is left empty with no selection; callers get no
    /// error surface and there is no retry.
    pub fn load_into(&self, state: &mut DashboardState) {
        match self.fetch_patients() {
            Ok(patients) => {
                info!(count = patients.len(), "patient list fetched");
                state.apply_fetched(patients);
            }
            Err(err) => {
                error!(%err, "patient fetch failed, dashboard left empty");
            }
        }
    }
}

/// Decode a patient-list body. Split out of the transport path so payload
/// handling is testable offline.
pub fn decode_patients(body: &str) -> Result<Vec<PatientRecord>, ApiError> {
    serde_json::from_str(body).map_err(|err| ApiError::Decode(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_env_resolution_with_and_without_overrides() {
        // One test touches the variables so parallel tests cannot race on
        // process environment.
        std::env::remove_var(ENDPOINT_URL_VAR);
        std::env::remove_var(USERNAME_VAR);
        std::env::remove_var(PASSWORD_VAR);
        assert_eq!(ApiConfig::from_env(), ApiConfig::default());

        std::env::set_var(ENDPOINT_URL_VAR, "http://localhost:9000/patients");
        std::env::set_var(USERNAME_VAR, "staging");
        std::env::set_var(PASSWORD_VAR, "staging-secret");
        let config = ApiConfig::from_env();
        assert_eq!(config.endpoint_url, "http://localhost:9000/patients");
        assert_eq!(config.username, "staging");
        assert_eq!(config.password, "staging-secret");

        std::env::remove_var(ENDPOINT_URL_VAR);
        std::env::remove_var(USERNAME_VAR);
        std::env::remove_var(PASSWORD_VAR);
    }

    #[test]
    fn decode_rejects_non_array_payloads() {
        let err = decode_patients(r#"{"message": "not a list"}"#).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
