use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use rn_core::common::error::{Result, RunNorwayError};

/// Thin PostgREST client for the hosted Supabase backend.
///
/// Config via env:
/// - SUPABASE_URL (e.g., https://xyzcompany.supabase.co) OR
///   SUPABASE_PROJECT_REF (e.g., ihkgojiseqpwinwdowvm)
/// - SUPABASE_ANON_KEY (anon/publishable key)
pub struct SupabaseClient {
    base_url: String,
    http: reqwest::Client,
}

fn backend_error(err: reqwest::Error) -> RunNorwayError {
    RunNorwayError::Backend {
        message: err.to_string(),
    }
}

impl SupabaseClient {
    pub fn from_env() -> Result<Self> {
        // Allow either a full URL or a project ref
        let url = match std::env::var("SUPABASE_URL") {
            Ok(u) => u,
            Err(_) => {
                let project_ref = std::env::var("SUPABASE_PROJECT_REF")?;
                format!("https://{}.supabase.co", project_ref)
            }
        };
        let key = std::env::var("SUPABASE_ANON_KEY")?;
        Self::new(url, &key)
    }

    pub fn new(base_url: String, api_key: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let bearer = HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(|_| {
            RunNorwayError::Backend {
                message: "invalid characters in API key".to_string(),
            }
        })?;
        let apikey = HeaderValue::from_str(api_key).map_err(|_| RunNorwayError::Backend {
            message: "invalid characters in API key".to_string(),
        })?;
        headers.insert(AUTHORIZATION, bearer);
        headers.insert("apikey", apikey);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(backend_error)?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    /// `GET /rest/v1/{table}` with PostgREST query parameters, decoding
    /// the JSON array response.
    pub async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<T>> {
        let resp = self
            .http
            .get(self.table_url(table))
            .query(query)
            .send()
            .await
            .map_err(backend_error)?;
        let resp = Self::check(resp, table).await?;
        debug!("Fetched rows from {}", table);
        resp.json().await.map_err(backend_error)
    }

    pub async fn insert<B: Serialize>(&self, table: &str, body: &B) -> Result<()> {
        let resp = self
            .http
            .post(self.table_url(table))
            .header("Prefer", "return=minimal")
            .json(body)
            .send()
            .await
            .map_err(backend_error)?;
        Self::check(resp, table).await?;
        Ok(())
    }

    /// Insert-or-update on the table's unique constraint.
    pub async fn upsert<B: Serialize>(&self, table: &str, body: &B) -> Result<()> {
        let resp = self
            .http
            .post(self.table_url(table))
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(body)
            .send()
            .await
            .map_err(backend_error)?;
        Self::check(resp, table).await?;
        Ok(())
    }

    pub async fn delete(&self, table: &str, query: &[(&str, &str)]) -> Result<()> {
        let resp = self
            .http
            .delete(self.table_url(table))
            .query(query)
            .send()
            .await
            .map_err(backend_error)?;
        Self::check(resp, table).await?;
        Ok(())
    }

    async fn check(resp: reqwest::Response, table: &str) -> Result<reqwest::Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        Err(RunNorwayError::Backend {
            message: format!("{table}: {status} - {body}"),
        })
    }
}
