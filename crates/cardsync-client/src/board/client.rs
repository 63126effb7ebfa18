//! Board API client.

use cardsync_model::BoardSettings;
use reqwest::Url;
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, trace};

use super::types::{BoardList, Card, CustomFieldDefinition};
use crate::api::BoardApi;
use crate::error::{ClientError, Result, Service};
use crate::http::{REQUEST_TIMEOUT, USER_AGENT_VALUE, decode, read_success};

/// Client for the board service. Every request carries `key` and `token`.
pub struct BoardClient {
    client: Client,
    base_url: String,
    api_key: String,
    token: String,
}

impl BoardClient {
    /// Create a client from the board settings.
    pub fn new(settings: &BoardSettings) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ClientError::Network(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
            token: settings.token.clone(),
        })
    }

    /// Build an endpoint URL with the credential query parameters attached.
    fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {e}", self.base_url)))?;
        url.path_segments_mut()
            .map_err(|()| ClientError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(segments);
        url.query_pairs_mut()
            .append_pair("key", &self.api_key)
            .append_pair("token", &self.token);
        Ok(url)
    }

    fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T> {
        let url = self.url(segments)?;
        let resource = segments.join("/");
        debug!(resource = %resource, "board request");

        let response = self.client.get(url).send()?;
        let body = read_success(Service::Board, &resource, response)?;
        trace!(resource = %resource, body = %body, "board response");
        decode(&body)
    }

    /// Fetch the custom field definitions declared on a board.
    pub fn custom_fields(&self, board_id: &str) -> Result<Vec<CustomFieldDefinition>> {
        self.get_json(&["boards", board_id, "customFields"])
    }
}

impl BoardApi for BoardClient {
    fn lists(&self, board_id: &str) -> Result<Vec<BoardList>> {
        self.get_json(&["boards", board_id, "lists"])
    }

    fn cards(&self, list_id: &str) -> Result<Vec<Card>> {
        self.get_json(&["lists", list_id, "cards"])
    }

    fn card_field_items(&self, card_id: &str) -> Result<Vec<Value>> {
        self.get_json(&["cards", card_id, "customFieldItems"])
    }
}
