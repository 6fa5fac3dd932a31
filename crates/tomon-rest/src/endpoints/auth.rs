//! Login endpoint

use reqwest::StatusCode;
use serde::Deserialize;
use tomon_core::{Credential, SelfUser};

use crate::client::RestClient;
use crate::error::RestResult;

/// Body returned by `POST /auth/login`
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(flatten)]
    pub user: SelfUser,
}

impl RestClient {
    /// Exchange a credential for a bearer token and the account's identity
    ///
    /// Only a 200 answer counts as success. Never retried.
    pub async fn login(&self, credential: &Credential) -> RestResult<LoginResponse> {
        tracing::debug!(kind = credential.kind(), "Logging in");
        self.post_json_expecting("/auth/login", credential, &[StatusCode::OK])
            .await
    }
}
