//! Response handling shared by both clients.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::Response;
use serde::de::DeserializeOwned;

use crate::error::{ClientError, Result, Service};

/// HTTP request timeout.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// User agent string for API requests.
pub const USER_AGENT_VALUE: &str = concat!("cardsync/", env!("CARGO_PKG_VERSION"));

/// Read the body and map non-success statuses to a [`ClientError`].
pub(crate) fn read_success(service: Service, resource: &str, response: Response) -> Result<String> {
    let status = response.status();
    let body = response.text()?;
    check_status(service, resource, status, body)
}

/// Classify a status code. Success returns the body unchanged.
pub(crate) fn check_status(
    service: Service,
    resource: &str,
    status: StatusCode,
    body: String,
) -> Result<String> {
    if status.is_success() {
        return Ok(body);
    }
    match status {
        StatusCode::UNAUTHORIZED => Err(ClientError::Unauthorized { service }),
        StatusCode::NOT_FOUND => Err(ClientError::NotFound {
            service,
            resource: resource.to_string(),
        }),
        _ => Err(ClientError::Status {
            service,
            status: status.as_u16(),
            body,
        }),
    }
}

/// Decode a JSON body.
pub(crate) fn decode<T: DeserializeOwned>(body: &str) -> Result<T> {
    Ok(serde_json::from_str(body)?)
}
