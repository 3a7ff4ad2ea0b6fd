//! The outbound call to the climate-data provider.

use crate::weather::error::RequestError;
use crate::weather::query::WeatherQuery;
use log::{info, warn};
use reqwest::Client;
use serde_json::Value;
use std::future::Future;

pub const DEFAULT_ENDPOINT: &str = "https://my.meteoblue.com/dataset/query";

/// Something that can answer a [`WeatherQuery`] with the provider's raw JSON.
///
/// Implementations make exactly one attempt per call. Transport failures, non-2xx
/// statuses and bodies that are not JSON are all reported as [`RequestError`].
pub trait WeatherProvider {
    fn fetch(
        &self,
        query: &WeatherQuery,
    ) -> impl Future<Output = Result<Value, RequestError>> + Send;
}

/// [`WeatherProvider`] backed by the meteoblue dataset API.
#[derive(Debug, Clone)]
pub struct MeteoblueClient {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl Default for MeteoblueClient {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT, None)
    }
}

impl MeteoblueClient {
    pub fn new(endpoint: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            api_key,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl WeatherProvider for MeteoblueClient {
    async fn fetch(&self, query: &WeatherQuery) -> Result<Value, RequestError> {
        let url = self.endpoint.clone();
        info!(
            "Requesting GDU data from {} for {}",
            url,
            query.time_intervals.join(", ")
        );

        let mut request = self.client.post(&url).json(query);
        if let Some(api_key) = &self.api_key {
            request = request.query(&[("apikey", api_key)]);
        }

        // `without_url` keeps the API key out of error messages.
        let response = request
            .send()
            .await
            .map_err(|e| RequestError::NetworkRequest(url.clone(), e.without_url()))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HTTP error for {}: {:?}", url, e.status());
                return Err(if let Some(status) = e.status() {
                    RequestError::HttpStatus {
                        url,
                        status,
                        source: e.without_url(),
                    }
                } else {
                    RequestError::NetworkRequest(url, e.without_url())
                });
            }
        };

        response
            .json::<Value>()
            .await
            .map_err(|e| RequestError::InvalidJson(url, e.without_url()))
    }
}
