//! Blocking JSON-over-HTTP binding of [`KioskBackend`].

use super::wire::{
    EditRequestBody, MyHoursBody, PunchBody, PunchReply, VerifyBody, VerifyReply, punch_request,
};
use super::{BackendError, HoursQuery, KioskBackend, PunchCommand, PunchLookup};
use crate::errors::{AppError, AppResult};
use crate::models::{EditRequest, HoursEntry, TenantContext};
use crate::utils::redact;
use reqwest::Url;
use reqwest::blocking::{Client, Response};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

/// Path segment every kiosk operation lives under.
pub const KIOSK_PATH: &str = "kiosk";

pub struct HttpBackend {
    base: String,
    client: Client,
}

impl HttpBackend {
    /// Build a client for `base_url`.
    ///
    /// The API key, when present, is sent as a bearer token on every call.
    pub fn new(base_url: &str, api_key: Option<&str>, timeout: Duration) -> AppResult<Self> {
        let base = validate_base_url(base_url)?;

        let mut headers = HeaderMap::new();
        if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", key.trim()))
                .map_err(|_| AppError::Config("api_key contains invalid characters".into()))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self { base, client })
    }

    pub fn endpoint(&self, op: &str) -> String {
        format!("{}/{}/{}", self.base, KIOSK_PATH, op)
    }

    fn post<T: Serialize + ?Sized>(&self, op: &str, body: &T) -> Result<Response, BackendError> {
        let url = self.endpoint(op);
        let response = self.client.post(&url).json(body).send().map_err(|e| {
            warn!(op, error = %e, "kiosk request failed");
            BackendError::Transport(redact(&e.to_string(), &[]))
        })?;

        let status = response.status();
        debug!(op, status = status.as_u16(), "kiosk request completed");

        if status.is_success() {
            return Ok(response);
        }

        Err(match status.as_u16() {
            404 => BackendError::NotFound,
            429 => BackendError::RateLimited,
            other => BackendError::Rejected { status: other },
        })
    }

    fn post_json<T: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        op: &str,
        body: &T,
    ) -> Result<R, BackendError> {
        let response = self.post(op, body)?;
        response.json::<R>().map_err(|e| {
            if e.is_decode() {
                BackendError::InvalidResponse(e.to_string())
            } else {
                BackendError::Transport(redact(&e.to_string(), &[]))
            }
        })
    }
}

/// Accepts http(s) URLs only; trailing slashes are dropped.
pub fn validate_base_url(raw: &str) -> AppResult<String> {
    let parsed = Url::parse(raw.trim()).map_err(|e| AppError::InvalidApiUrl(format!("{raw}: {e}")))?;

    if parsed.scheme() != "https" && parsed.scheme() != "http" {
        return Err(AppError::InvalidApiUrl(format!(
            "{raw}: scheme must be http or https"
        )));
    }

    Ok(parsed.as_str().trim_end_matches('/').to_string())
}

impl KioskBackend for HttpBackend {
    fn verify_store(&self, code: &str) -> Result<TenantContext, BackendError> {
        let reply: VerifyReply = self.post_json("verify", &VerifyBody { code })?;
        Ok(reply.into())
    }

    fn lookup_pin(&self, tenant_id: &str, pin: &str) -> Result<PunchLookup, BackendError> {
        let reply: PunchReply = self.post_json("punch", &PunchBody { tenant_id, pin })?;
        PunchLookup::try_from(reply)
    }

    fn execute_punch(&self, command: &PunchCommand) -> Result<(), BackendError> {
        let (op, body) = punch_request(command);
        self.post(op, &body).map(|_| ())
    }

    fn my_hours(&self, query: &HoursQuery) -> Result<Vec<HoursEntry>, BackendError> {
        self.post_json("my-hours", &MyHoursBody::from(query))
    }

    fn submit_edit_request(
        &self,
        tenant_id: &str,
        employee_id: &str,
        request: &EditRequest,
    ) -> Result<(), BackendError> {
        let body = EditRequestBody::new(tenant_id, employee_id, request);
        self.post("edit-request", &body).map(|_| ())
    }
}
