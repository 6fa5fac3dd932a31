//! HTTP transport shared by every endpoint

use std::fmt;
use std::sync::Arc;

use reqwest::{multipart::Form, Method, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tomon_common::ApiConfig;

use crate::error::{RestError, RestResult};

/// Statuses every endpoint except login accepts
const SUCCESS: &[StatusCode] = &[StatusCode::OK, StatusCode::NO_CONTENT];

/// Tomon REST client
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone)]
pub struct RestClient {
    http: reqwest::Client,
    api: ApiConfig,
    token: Option<Arc<str>>,
}

impl RestClient {
    /// Create an unauthenticated client (enough for login)
    pub fn new(api: &ApiConfig) -> RestResult<Self> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("tomon-rs/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = api.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            api: api.clone(),
            token: None,
        })
    }

    /// Clone of this client that sends `Authorization: Bearer <token>`
    #[must_use]
    pub fn with_token(&self, token: impl Into<Arc<str>>) -> Self {
        Self {
            http: self.http.clone(),
            api: self.api.clone(),
            token: Some(token.into()),
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn base_url(&self) -> &str {
        &self.api.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, self.api.url(path));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder, accepted: &[StatusCode]) -> RestResult<Response> {
        let response = builder.send().await?;
        let status = response.status();

        if accepted.contains(&status) {
            Ok(response)
        } else {
            tracing::debug!(status = %status, url = %response.url(), "REST request rejected");
            Err(RestError::from_status(status))
        }
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> RestResult<T> {
        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(RestError::Decode)
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> RestResult<T> {
        tracing::trace!(path = %path, "GET");
        let response = self.send(self.request(Method::GET, path), SUCCESS).await?;
        Self::decode(response).await
    }

    pub(crate) async fn post_json<B, T>(&self, path: &str, body: &B) -> RestResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.post_json_expecting(path, body, SUCCESS).await
    }

    pub(crate) async fn post_json_expecting<B, T>(
        &self,
        path: &str,
        body: &B,
        accepted: &[StatusCode],
    ) -> RestResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        tracing::trace!(path = %path, "POST");
        let response = self
            .send(self.request(Method::POST, path).json(body), accepted)
            .await?;
        Self::decode(response).await
    }

    pub(crate) async fn post_multipart<T: DeserializeOwned>(&self, path: &str, form: Form) -> RestResult<T> {
        tracing::trace!(path = %path, "POST multipart");
        let response = self
            .send(self.request(Method::POST, path).multipart(form), SUCCESS)
            .await?;
        Self::decode(response).await
    }

    pub(crate) async fn delete(&self, path: &str) -> RestResult<()> {
        tracing::trace!(path = %path, "DELETE");
        self.send(self.request(Method::DELETE, path), SUCCESS).await?;
        Ok(())
    }
}

impl fmt::Debug for RestClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RestClient")
            .field("base_url", &self.api.base_url)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}
