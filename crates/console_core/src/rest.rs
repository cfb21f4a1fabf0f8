//! `reqwest`-backed [`ResourceClient`] for the management API.

use async_trait::async_trait;
use reqwest::header::LOCATION;
use reqwest::{Client, Response};
use serde_json::Value;
use shared::domain::{FilterExpression, ResourceKind};
use shared::error::ApiError;
use shared::protocol::{ResourceHandle, SearchRequest, SearchResponse};
use tracing::debug;

use crate::capabilities::ResourceClient;
use crate::error::RemoteError;

pub struct RestResourceClient {
    http: Client,
    base_url: String,
}

impl RestResourceClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: Client::new(),
            base_url,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    async fn rejection(response: Response) -> RemoteError {
        let status = response.status();
        match response.json::<ApiError>().await {
            Ok(body) => RemoteError::Api(body),
            Err(_) => RemoteError::UnexpectedResponse(format!(
                "status {status} with an unreadable error body"
            )),
        }
    }
}

#[async_trait]
impl ResourceClient for RestResourceClient {
    async fn create(
        &self,
        kind: ResourceKind,
        payload: Value,
    ) -> Result<ResourceHandle, RemoteError> {
        let response = self
            .http
            .post(self.endpoint(&kind.collection_path()))
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }

        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(ToString::to_string);
        debug!(resource = kind.label(), ?location, "created resource");

        Ok(ResourceHandle { location })
    }

    async fn query(
        &self,
        kind: ResourceKind,
        filter: &FilterExpression,
    ) -> Result<u64, RemoteError> {
        let request = SearchRequest::new(filter.to_string());
        let response = self
            .http
            .post(self.endpoint(&kind.search_path()))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }

        let body: SearchResponse = response.json().await?;
        debug!(
            resource = kind.label(),
            filter = %filter,
            total = body.total_results,
            "search query answered"
        );
        Ok(body.total_results)
    }

    async fn fetch_all(&self, kind: ResourceKind) -> Result<Vec<Value>, RemoteError> {
        let response = self
            .http
            .get(self.endpoint(&kind.collection_path()))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }

        let body: Vec<Value> = response.json().await?;
        Ok(body)
    }
}
