//! Sachet alerts API client
//!
//! Fetches location-wise alerts from the NDMA Sachet public API and validates
//! the response envelope before handing the raw alert records on.

use reqwest::Client;
use serde_json::Value;

use super::{AlertRecord, SUCCESS_MESSAGE};
use crate::config::FetchConfig;
use crate::error::RunError;

/// Client for fetching alerts from the Sachet API
#[derive(Debug, Clone)]
pub struct SachetClient {
    /// HTTP client for making requests
    http_client: Client,
    /// Full request URL, including the location query
    url: String,
}

impl SachetClient {
    /// Creates a client for the location described by `config`
    pub fn new(config: &FetchConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    /// Creates a client with a custom HTTP client
    pub fn with_client(http_client: Client, config: &FetchConfig) -> Self {
        Self {
            http_client,
            url: config.request_url(),
        }
    }

    /// The URL this client requests
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetches the current alerts
    ///
    /// # Returns
    /// * `Ok(Vec<AlertRecord>)` - Alert records in response order
    /// * `Err(RunError::Request)` / `Err(RunError::Status)` - network failure or non-2xx status
    /// * `Err(RunError::InvalidBody)` - body is not JSON
    /// * `Err(RunError::Envelope)` / `Err(RunError::InvalidAlert)` - body is not a successful alerts payload
    pub async fn fetch_alerts(&self) -> Result<Vec<AlertRecord>, RunError> {
        let response = self.http_client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RunError::Status(status));
        }

        let text = response.text().await?;
        let body: Value = serde_json::from_str(&text).map_err(RunError::InvalidBody)?;

        parse_envelope(body)
    }
}

/// Validates a response body and extracts its alert records
///
/// The body must carry `responseMessage == "Success"` and an `alerts` array
/// whose elements are all JSON objects.
pub fn parse_envelope(body: Value) -> Result<Vec<AlertRecord>, RunError> {
    let Value::Object(mut envelope) = body else {
        return Err(RunError::Envelope("response is not a JSON object".to_string()));
    };

    match envelope.get("responseMessage") {
        Some(Value::String(message)) if message == SUCCESS_MESSAGE => {}
        Some(other) => {
            return Err(RunError::Envelope(format!(
                "responseMessage is {}, expected \"{}\"",
                other, SUCCESS_MESSAGE
            )))
        }
        None => return Err(RunError::Envelope("missing responseMessage".to_string())),
    }

    let alerts = match envelope.remove("alerts") {
        Some(Value::Array(alerts)) => alerts,
        Some(other) => {
            return Err(RunError::Envelope(format!(
                "alerts is not an array: {}",
                type_name(&other)
            )))
        }
        None => return Err(RunError::Envelope("missing alerts".to_string())),
    };

    alerts
        .into_iter()
        .enumerate()
        .map(|(index, alert)| match alert {
            Value::Object(record) => Ok(record),
            other => Err(RunError::InvalidAlert {
                index,
                reason: format!("expected an object, got {}", type_name(&other)),
            }),
        })
        .collect()
}

/// JSON type name for error messages
fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
