//! Firebase Auth emulator client (Identity Toolkit v1 REST API).

use async_trait::async_trait;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::store::{IdentityStore, StoreError, UserRecord};
use super::{OWNER_TOKEN, api_error, origin};

#[derive(Serialize, Debug)]
struct CreateAccountRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct CreateAccountResponse {
    local_id: String,
}

#[derive(Serialize, Debug)]
struct LookupRequest<'a> {
    email: &'a [String],
}

#[derive(Deserialize, Debug)]
struct LookupResponse {
    #[serde(default)]
    users: Vec<AccountInfo>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct AccountInfo {
    local_id: String,
    #[serde(default)]
    email: String,
}

pub struct AuthEmulator {
    accounts_url: String,
    client: reqwest::Client,
}

impl AuthEmulator {
    /// `host` is `FIREBASE_AUTH_EMULATOR_HOST` style (`localhost:9099`) or a full URL.
    pub fn new(host: &str, project_id: &str) -> Self {
        let accounts_url = format!(
            "{}/identitytoolkit.googleapis.com/v1/projects/{}/accounts",
            origin(host),
            project_id
        );
        info!("Auth emulator endpoint: {}", accounts_url);
        Self {
            accounts_url,
            client: reqwest::Client::new(),
        }
    }

    async fn post<B: Serialize + Sync, T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<T, StoreError> {
        debug!("POST {}", url);
        let response = self
            .client
            .post(url)
            .bearer_auth(OWNER_TOKEN)
            .json(body)
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;
        debug!("Auth emulator response status: {}", response.status());
        if !response.status().is_success() {
            return Err(api_error("Auth", response).await);
        }
        response
            .json::<T>()
            .await
            .map_err(|e| StoreError::Parse(e.to_string()))
    }
}

#[async_trait]
impl IdentityStore for AuthEmulator {
    async fn create_user(&self, email: &str, password: &str) -> Result<String, StoreError> {
        let request = CreateAccountRequest { email, password };
        let created: CreateAccountResponse = self.post(&self.accounts_url, &request).await?;
        Ok(created.local_id)
    }

    async fn lookup_by_email(&self, emails: &[String]) -> Result<Vec<UserRecord>, StoreError> {
        if emails.is_empty() {
            return Ok(Vec::new());
        }
        let url = format!("{}:lookup", self.accounts_url);
        let found: LookupResponse = self.post(&url, &LookupRequest { email: emails }).await?;
        Ok(found
            .users
            .into_iter()
            .map(|account| UserRecord {
                uid: account.local_id,
                email: account.email,
            })
            .collect())
    }
}
