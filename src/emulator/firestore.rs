//! Firestore emulator client over the v1 REST API.
//!
//! Document paths look like
//! `projects/<project>/databases/(default)/documents/<collection>/<id>`;
//! only top-level collections are addressed here.

use async_trait::async_trait;
use log::{debug, info};
use serde::Deserialize;
use serde_json::{Map, Value, json};

use super::store::{Document, DocumentStore, StoreError};
use super::value::{decode_fields, encode_fields};
use super::{OWNER_TOKEN, api_error, origin};

const PAGE_SIZE: u32 = 300;

// ============================================================================
// REST Response Types
// ============================================================================

#[derive(Deserialize, Debug)]
struct RestDocument {
    name: String,
    #[serde(default)]
    fields: Map<String, Value>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct ListDocumentsResponse {
    #[serde(default)]
    documents: Vec<RestDocument>,
    next_page_token: Option<String>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct ListCollectionIdsResponse {
    #[serde(default)]
    collection_ids: Vec<String>,
    next_page_token: Option<String>,
}

/// Last path segment of a resource name.
fn document_id(name: &str) -> &str {
    name.rsplit('/').next().unwrap_or(name)
}

/// Collection and document ids must be a single non-empty path segment.
fn check_segment(kind: &str, segment: &str) -> Result<(), StoreError> {
    if segment.is_empty() || segment.contains('/') {
        return Err(StoreError::Config(format!("invalid {kind} name '{segment}'")));
    }
    Ok(())
}

// ============================================================================
// Client
// ============================================================================

pub struct FirestoreEmulator {
    documents_url: String,
    client: reqwest::Client,
}

impl FirestoreEmulator {
    /// `host` is `FIRESTORE_EMULATOR_HOST` style (`localhost:8080`) or a full URL.
    pub fn new(host: &str, project_id: &str) -> Self {
        let documents_url = format!(
            "{}/v1/projects/{}/databases/(default)/documents",
            origin(host),
            project_id
        );
        info!("Firestore emulator endpoint: {}", documents_url);
        Self {
            documents_url,
            client: reqwest::Client::new(),
        }
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, StoreError> {
        let response = request
            .bearer_auth(OWNER_TOKEN)
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;
        debug!("Firestore emulator response status: {}", response.status());
        if !response.status().is_success() {
            return Err(api_error("Firestore", response).await);
        }
        Ok(response)
    }

    async fn parse<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> Result<T, StoreError> {
        response
            .json::<T>()
            .await
            .map_err(|e| StoreError::Parse(e.to_string()))
    }
}

#[async_trait]
impl DocumentStore for FirestoreEmulator {
    async fn add_document(
        &self,
        collection: &str,
        fields: &Map<String, Value>,
    ) -> Result<String, StoreError> {
        check_segment("collection", collection)?;
        let url = format!("{}/{}", self.documents_url, collection);
        debug!("POST {}", url);
        let body = json!({ "fields": encode_fields(fields) });
        let response = self.send(self.client.post(&url).json(&body)).await?;
        let created: RestDocument = Self::parse(response).await?;
        Ok(document_id(&created.name).to_string())
    }

    async fn set_document(
        &self,
        collection: &str,
        id: &str,
        fields: &Map<String, Value>,
    ) -> Result<(), StoreError> {
        check_segment("collection", collection)?;
        check_segment("document", id)?;
        let url = format!("{}/{}/{}", self.documents_url, collection, id);
        debug!("PATCH {}", url);
        let body = json!({ "fields": encode_fields(fields) });
        self.send(self.client.patch(&url).json(&body)).await?;
        Ok(())
    }

    async fn list_documents(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        check_segment("collection", collection)?;
        let url = format!("{}/{}", self.documents_url, collection);
        let mut documents = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut query = vec![("pageSize", PAGE_SIZE.to_string())];
            if let Some(token) = page_token.take() {
                query.push(("pageToken", token));
            }
            debug!("GET {} {:?}", url, query);
            let response = self.send(self.client.get(&url).query(&query)).await?;
            let page: ListDocumentsResponse = Self::parse(response).await?;

            for doc in page.documents {
                documents.push(Document {
                    id: document_id(&doc.name).to_string(),
                    fields: decode_fields(&doc.fields)?,
                });
            }

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }
        Ok(documents)
    }

    async fn list_collections(&self) -> Result<Vec<String>, StoreError> {
        let url = format!("{}:listCollectionIds", self.documents_url);
        let mut collections = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut body = json!({ "pageSize": PAGE_SIZE });
            if let Some(token) = page_token.take() {
                body["pageToken"] = Value::String(token);
            }
            debug!("POST {}", url);
            let response = self.send(self.client.post(&url).json(&body)).await?;
            let page: ListCollectionIdsResponse = Self::parse(response).await?;
            collections.extend(page.collection_ids);

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }
        Ok(collections)
    }
}
