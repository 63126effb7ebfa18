//! Record store API client.

use cardsync_model::{DestinationRecord, StoreSettings};
use reqwest::Url;
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use tracing::{debug, trace, warn};

use super::types::{BaseSchema, CreateRecordRequest, CreatedRecord, TableSchema};
use crate::api::RecordStoreApi;
use crate::error::{ClientError, Result, Service};
use crate::http::{REQUEST_TIMEOUT, USER_AGENT_VALUE, decode, read_success};

/// Client for one table of the record store, authenticated with a bearer token.
pub struct StoreClient {
    client: Client,
    base_url: String,
    base_id: String,
    table: String,
}

impl StoreClient {
    /// Create a client from the store settings.
    pub fn new(settings: &StoreSettings) -> Result<Self> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", settings.api_key))
            .map_err(|_| ClientError::InvalidCredential(Service::RecordStore))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
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
            base_id: settings.base_id.clone(),
            table: settings.table.clone(),
        })
    }

    fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {e}", self.base_url)))?;
        url.path_segments_mut()
            .map_err(|()| ClientError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Records endpoint of the destination table.
    fn table_url(&self) -> Result<Url> {
        self.url(&[self.base_id.as_str(), self.table.as_str()])
    }

    /// Metadata endpoint listing every table of the base.
    fn schema_url(&self) -> Result<Url> {
        self.url(&["meta", "bases", self.base_id.as_str(), "tables"])
    }

    fn table_resource(&self) -> String {
        format!("base {} table {}", self.base_id, self.table)
    }

    /// Fetch the schema of every table in the base.
    pub fn base_schema(&self) -> Result<BaseSchema> {
        let url = self.schema_url()?;
        debug!(base_id = %self.base_id, "fetching base schema");
        let response = self.client.get(url).send()?;
        let body = read_success(Service::RecordStore, &format!("base {}", self.base_id), response)?;
        decode(&body)
    }
}

impl RecordStoreApi for StoreClient {
    fn probe(&self) -> Result<()> {
        let mut url = self.table_url()?;
        url.query_pairs_mut().append_pair("maxRecords", "1");
        debug!(table = %self.table, "probing record store");
        let response = self.client.get(url).send()?;
        read_success(Service::RecordStore, &self.table_resource(), response)?;
        Ok(())
    }

    fn table_schema(&self) -> Result<TableSchema> {
        self.base_schema()?
            .table(&self.table)
            .cloned()
            .ok_or_else(|| ClientError::TableNotFound(self.table.clone()))
    }

    fn create_record(&self, record: &DestinationRecord) -> Result<CreatedRecord> {
        let url = self.table_url()?;
        let request = CreateRecordRequest { fields: record };
        trace!(record = ?record, "posting record");
        let response = self.client.post(url).json(&request).send()?;
        let body = read_success(Service::RecordStore, &self.table_resource(), response)?;
        // A 2xx means the record was written, whatever the body says.
        let created = decode(&body).unwrap_or_else(|error| {
            warn!(%error, "record created but the reply could not be read");
            CreatedRecord::unconfirmed()
        });
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardsync_model::config::DEFAULT_STORE_URL;

    fn settings(api_key: &str, table: &str) -> StoreSettings {
        StoreSettings {
            api_key: api_key.to_string(),
            base_id: "appXYZ".to_string(),
            table: table.to_string(),
            base_url: DEFAULT_STORE_URL.to_string(),
        }
    }

    #[test]
    fn test_client_creation() {
        assert!(StoreClient::new(&settings("pat123", "Employees")).is_ok());
    }

    #[test]
    fn test_rejects_header_unsafe_key() {
        assert!(matches!(
            StoreClient::new(&settings("bad\nkey", "Employees")),
            Err(ClientError::InvalidCredential(Service::RecordStore))
        ));
    }

    #[test]
    fn test_table_url_escapes_name() {
        let client = StoreClient::new(&settings("pat123", "Loan Pipeline")).unwrap();
        assert_eq!(
            client.table_url().unwrap().as_str(),
            "https://api.airtable.com/v0/appXYZ/Loan%20Pipeline"
        );
    }

    #[test]
    fn test_schema_url() {
        let client = StoreClient::new(&settings("pat123", "Employees")).unwrap();
        assert_eq!(
            client.schema_url().unwrap().as_str(),
            "https://api.airtable.com/v0/meta/bases/appXYZ/tables"
        );
    }
}
