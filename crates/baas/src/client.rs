//! HTTP client for the hosted backend.
//!
//! Repositories and the auth provider share one client. Each call names the
//! user-facing operation it performs ("load expenses", "sign in", ...) so
//! failures read "failed to <operation>: ...".

use log::debug;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use serde::Serialize;

use budgetpal_core::errors::{Error, RemoteError, Result};

use crate::config::BaasConfig;
use crate::errors::{decode_error, status_error, transport_error};
use crate::query::{RestQuery, PAGE_SIZE};

/// Asks the REST endpoint to echo written rows back.
const PREFER_REPRESENTATION: (&str, &str) = ("Prefer", "return=representation");

/// Client for the backend's REST and auth endpoints.
///
/// Construction never fails on unconfigured credentials; every call checks
/// the configuration first and fails with `Error::Configuration` instead.
#[derive(Debug, Clone)]
pub struct BaasClient {
    http: reqwest::Client,
    config: BaasConfig,
}

impl BaasClient {
    pub fn new(config: BaasConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Unexpected(format!("Failed to initialize HTTP client: {}", e)))?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &BaasConfig {
        &self.config
    }

    pub fn ensure_configured(&self) -> Result<()> {
        self.config.validate()
    }

    /// `apikey` plus a bearer token: the user's access token when given,
    /// otherwise the anon key.
    fn headers(&self, access_token: Option<&str>) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            HeaderName::from_static("apikey"),
            HeaderValue::from_str(&self.config.anon_key)
                .map_err(|e| Error::Configuration(format!("Invalid anon key format: {}", e)))?,
        );
        let bearer = access_token.unwrap_or(&self.config.anon_key);
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", bearer))
                .map_err(|e| Error::Unauthorized(format!("Invalid access token format: {}", e)))?,
        );
        Ok(headers)
    }

    /// Sends a request and returns the body of a successful response.
    async fn send(&self, operation: &str, request: RequestBuilder) -> Result<String> {
        let response = request
            .send()
            .await
            .map_err(|e| transport_error(operation, e))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| transport_error(operation, e))?;

        if !status.is_success() {
            debug!("[Baas] {} failed with {}: {}", operation, status, body);
            return Err(status_error(operation, status.as_u16(), &body));
        }
        Ok(body)
    }

    fn decode<T: DeserializeOwned>(operation: &str, body: &str) -> Result<T> {
        serde_json::from_str(body).map_err(|e| decode_error(operation, e, body))
    }

    fn rest_url(&self, table: &str, query: &RestQuery) -> String {
        let query_string = query.to_query_string();
        if query_string.is_empty() {
            self.config.rest_url(table)
        } else {
            format!("{}?{}", self.config.rest_url(table), query_string)
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // REST Endpoints
    // ─────────────────────────────────────────────────────────────────────────

    /// Reads every row matching `query`, one page of `PAGE_SIZE` at a time.
    pub async fn select<T: DeserializeOwned>(
        &self,
        operation: &str,
        access_token: &str,
        table: &str,
        query: RestQuery,
    ) -> Result<Vec<T>> {
        self.ensure_configured()?;
        let mut rows: Vec<T> = Vec::new();
        let mut offset = 0;
        loop {
            let url = self.rest_url(table, &query.clone().page(PAGE_SIZE, offset));
            debug!("[Baas] GET {}", url);
            let request = self
                .http
                .get(&url)
                .headers(self.headers(Some(access_token))?);
            let body = self.send(operation, request).await?;
            let page: Vec<T> = Self::decode(operation, &body)?;
            let fetched = page.len();
            rows.extend(page);
            if fetched < PAGE_SIZE {
                break;
            }
            offset += fetched;
        }
        Ok(rows)
    }

    /// Inserts one row and returns it as stored.
    pub async fn insert<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        operation: &str,
        access_token: &str,
        table: &str,
        row: &B,
    ) -> Result<T> {
        self.ensure_configured()?;
        let url = self.config.rest_url(table);
        debug!("[Baas] POST {}", url);
        let request = self
            .http
            .post(&url)
            .headers(self.headers(Some(access_token))?)
            .header(PREFER_REPRESENTATION.0, PREFER_REPRESENTATION.1)
            .json(row);
        let body = self.send(operation, request).await?;
        let mut stored: Vec<T> = Self::decode(operation, &body)?;
        if stored.is_empty() {
            return Err(Error::Remote(RemoteError::InvalidResponse {
                operation: operation.to_string(),
                message: "insert returned no rows".to_string(),
            }));
        }
        Ok(stored.swap_remove(0))
    }

    /// Updates the rows matching `query` and returns them. An empty result
    /// means no row matched, which conditional updates use to detect conflicts.
    pub async fn update<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        operation: &str,
        access_token: &str,
        table: &str,
        query: RestQuery,
        patch: &B,
    ) -> Result<Vec<T>> {
        self.ensure_configured()?;
        if !query.has_filters() {
            return Err(Error::Unexpected(format!(
                "Refusing to {} without a row filter",
                operation
            )));
        }
        let url = self.rest_url(table, &query);
        debug!("[Baas] PATCH {}", url);
        let request = self
            .http
            .patch(&url)
            .headers(self.headers(Some(access_token))?)
            .header(PREFER_REPRESENTATION.0, PREFER_REPRESENTATION.1)
            .json(patch);
        let body = self.send(operation, request).await?;
        Self::decode(operation, &body)
    }

    /// Deletes the rows matching `query` and returns them.
    pub async fn delete<T: DeserializeOwned>(
        &self,
        operation: &str,
        access_token: &str,
        table: &str,
        query: RestQuery,
    ) -> Result<Vec<T>> {
        self.ensure_configured()?;
        if !query.has_filters() {
            return Err(Error::Unexpected(format!(
                "Refusing to {} without a row filter",
                operation
            )));
        }
        let url = self.rest_url(table, &query);
        debug!("[Baas] DELETE {}", url);
        let request = self
            .http
            .delete(&url)
            .headers(self.headers(Some(access_token))?)
            .header(PREFER_REPRESENTATION.0, PREFER_REPRESENTATION.1);
        let body = self.send(operation, request).await?;
        Self::decode(operation, &body)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Auth Endpoints
    // ─────────────────────────────────────────────────────────────────────────

    pub async fn auth_post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        operation: &str,
        path: &str,
        access_token: Option<&str>,
        payload: &B,
    ) -> Result<T> {
        self.ensure_configured()?;
        let url = self.config.auth_url(path);
        debug!("[Baas] POST {}", url);
        let request = self
            .http
            .post(&url)
            .headers(self.headers(access_token)?)
            .json(payload);
        let body = self.send(operation, request).await?;
        Self::decode(operation, &body)
    }

    /// POST whose response body is ignored (e.g. logout answers 204).
    pub async fn auth_post_no_content(
        &self,
        operation: &str,
        path: &str,
        access_token: &str,
    ) -> Result<()> {
        self.ensure_configured()?;
        let url = self.config.auth_url(path);
        debug!("[Baas] POST {}", url);
        let request = self
            .http
            .post(&url)
            .headers(self.headers(Some(access_token))?);
        self.send(operation, request).await.map(|_| ())
    }

    pub async fn auth_get<T: DeserializeOwned>(
        &self,
        operation: &str,
        path: &str,
        access_token: &str,
    ) -> Result<T> {
        self.ensure_configured()?;
        let url = self.config.auth_url(path);
        debug!("[Baas] GET {}", url);
        let request = self
            .http
            .get(&url)
            .headers(self.headers(Some(access_token))?);
        let body = self.send(operation, request).await?;
        Self::decode(operation, &body)
    }
}
