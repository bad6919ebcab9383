use reqwest::header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::{de::DeserializeOwned, Serialize};

use roopsnap_core::storage::Result;
use roopsnap_core::studio::RecordId;

use super::error::{map_decode_error, map_request_error, map_status_error};

/// HTTP client for one Supabase project.
///
/// Reads are sent with the read key. Writes use the write key when one is
/// set and fall back to the read key otherwise.
#[derive(Debug, Clone)]
pub struct SupabaseClient {
    http: reqwest::Client,
    base_url: String,
    read_key: String,
    write_key: Option<String>,
}

impl SupabaseClient {
    /// Create a client for the project at `base_url`.
    pub fn new(
        base_url: impl Into<String>,
        read_key: impl Into<String>,
        write_key: Option<String>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            read_key: read_key.into(),
            write_key,
        }
    }

    fn write_key(&self) -> &str {
        self.write_key.as_deref().unwrap_or(&self.read_key)
    }

    /// Build a URL for a REST table.
    pub fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    /// Build the upload URL for an object.
    pub fn object_url(&self, bucket: &str, key: &str) -> String {
        format!("{}/storage/v1/object/{}/{}", self.base_url, bucket, key)
    }

    /// Build the public download URL for an object.
    pub fn public_object_url(&self, bucket: &str, key: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url, bucket, key
        )
    }

    fn request(
        &self,
        method: reqwest::Method,
        url: String,
        key: &str,
    ) -> reqwest::RequestBuilder {
        self.http
            .request(method, url)
            .header("apikey", key)
            .header(AUTHORIZATION, format!("Bearer {key}"))
    }

    /// Select every row of a table, newest first.
    pub async fn select_all<T: DeserializeOwned>(&self, table: &str) -> Result<Vec<T>> {
        let response = self
            .request(reqwest::Method::GET, self.table_url(table), &self.read_key)
            .query(&[("select", "*"), ("order", "created_at.desc")])
            .send()
            .await
            .map_err(map_request_error)?;

        self.handle_response(response).await
    }

    /// Insert one row and return the rows the table reports back.
    pub async fn insert<B, T>(&self, table: &str, row: &B) -> Result<Vec<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .request(reqwest::Method::POST, self.table_url(table), self.write_key())
            .header("Prefer", "return=representation")
            .json(row)
            .send()
            .await
            .map_err(map_request_error)?;

        self.handle_response(response).await
    }

    /// Delete rows by `id` and return the deleted rows.
    pub async fn delete_by_id<T: DeserializeOwned>(
        &self,
        table: &str,
        id: &RecordId,
    ) -> Result<Vec<T>> {
        let response = self
            .request(
                reqwest::Method::DELETE,
                self.table_url(table),
                self.write_key(),
            )
            .header("Prefer", "return=representation")
            .query(&[("id", format!("eq.{id}"))])
            .send()
            .await
            .map_err(map_request_error)?;

        self.handle_response(response).await
    }

    /// Upload an object, replacing any object already stored under `key`.
    pub async fn upload(
        &self,
        bucket: &str,
        key: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<()> {
        let content_type = HeaderValue::from_str(content_type)
            .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream"));

        let response = self
            .request(
                reqwest::Method::POST,
                self.object_url(bucket, key),
                self.write_key(),
            )
            .header(CONTENT_TYPE, content_type)
            .header("x-upsert", "true")
            .body(bytes)
            .send()
            .await
            .map_err(map_request_error)?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(map_status_error(status, &body))
        }
    }

    /// Decode a success body or turn the response into an error.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            response.json().await.map_err(map_decode_error)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(map_status_error(status, &body))
        }
    }
}
