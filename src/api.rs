// HTTP client for the membership service REST API

use crate::config::Config;
use crate::record::Record;
use eyre::{Context, Result, eyre};
use reqwest::StatusCode;
use reqwest::blocking::{Client, Response};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error};
use uuid::Uuid;

/// List endpoints answer with a Spring-style page envelope; some return a
/// bare array. Both decode to the record list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ListPayload<T> {
    Envelope { content: Vec<T> },
    Bare(Vec<T>),
}

impl<T> ListPayload<T> {
    fn into_records(self) -> Vec<T> {
        match self {
            ListPayload::Envelope { content } => content,
            ListPayload::Bare(records) => records,
        }
    }
}

/// Blocking JSON client for `/api/{collection}` endpoints
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch one server page of a collection
    ///
    /// `page` is the server's 0-based page index, unrelated to the 1-based
    /// pages the query engine serves out of the loaded collection.
    pub fn fetch_page<T: Record>(&self, page: usize, size: usize) -> Result<Vec<T>> {
        let request_id = Uuid::now_v7();
        let url = self.list_url::<T>(page, size);
        debug!(%request_id, %url, "fetching collection page");

        let response = self
            .client
            .get(&url)
            .send()
            .with_context(|| format!("GET {} failed", url))?;
        let response = check_status(response, request_id)?;

        let payload: ListPayload<T> = response
            .json()
            .with_context(|| format!("Failed to decode {} payload", T::collection_name()))?;
        Ok(payload.into_records())
    }

    pub fn create<T: Record>(&self, record: &T) -> Result<T> {
        let request_id = Uuid::now_v7();
        let url = format!("{}/api/{}", self.base_url, T::collection_name());
        debug!(%request_id, %url, "creating record");

        let response = self
            .client
            .post(&url)
            .json(record)
            .send()
            .with_context(|| format!("POST {} failed", url))?;
        let response = check_status(response, request_id)?;
        response.json().context("Failed to decode created record")
    }

    pub fn update<T: Record>(&self, record: &T) -> Result<T> {
        let request_id = Uuid::now_v7();
        let url = format!("{}/api/{}/{}", self.base_url, T::collection_name(), record.id());
        debug!(%request_id, %url, "updating record");

        let response = self
            .client
            .put(&url)
            .json(record)
            .send()
            .with_context(|| format!("PUT {} failed", url))?;
        let response = check_status(response, request_id)?;
        response.json().context("Failed to decode updated record")
    }

    pub fn delete<T: Record>(&self, id: u64) -> Result<()> {
        let request_id = Uuid::now_v7();
        let url = format!("{}/api/{}/{}", self.base_url, T::collection_name(), id);
        debug!(%request_id, %url, "deleting record");

        let response = self
            .client
            .delete(&url)
            .send()
            .with_context(|| format!("DELETE {} failed", url))?;
        check_status(response, request_id)?;
        Ok(())
    }

    fn list_url<T: Record>(&self, page: usize, size: usize) -> String {
        format!(
            "{}/api/{}?page={}&size={}",
            self.base_url,
            T::collection_name(),
            page,
            size
        )
    }
}

fn check_status(response: Response, request_id: Uuid) -> Result<Response> {
    verify_status(response.status(), request_id)?;
    Ok(response)
}

/// Map HTTP status to errors; 401 is an authentication failure signal,
/// logged and surfaced without retry
fn verify_status(status: StatusCode, request_id: Uuid) -> Result<()> {
    if status == StatusCode::UNAUTHORIZED {
        error!(%request_id, "authentication failed (401)");
        return Err(eyre!("Authentication failed (401)"));
    }
    if !status.is_success() {
        return Err(eyre!("Request failed with status {}", status));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Member, MemberStatus};

    #[test]
    fn test_envelope_payload_decodes() {
        let json = r#"{"content":[{"id":1,"memberCode":"MEM0001","firstName":"太郎",
            "lastName":"山田","email":"taro@example.com","phone":null,"status":"ACTIVE",
            "enrollmentDate":"2024-01-15","enrollmentMethod":"TABLET"}]}"#;
        let payload: ListPayload<Member> = serde_json::from_str(json).unwrap();
        let records = payload.into_records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].member_code, "MEM0001");
        assert_eq!(records[0].status, MemberStatus::Active);
    }

    #[test]
    fn test_bare_array_payload_decodes() {
        let json = r#"[{"id":2,"memberCode":"MEM0002","firstName":"花子",
            "lastName":"佐藤","email":"hanako@example.com","phone":"090-0000-0002",
            "status":"INACTIVE","enrollmentDate":"2023-11-02","enrollmentMethod":"WEB"}]"#;
        let payload: ListPayload<Member> = serde_json::from_str(json).unwrap();
        assert_eq!(payload.into_records().len(), 1);
    }

    #[test]
    fn test_empty_envelope_decodes() {
        let payload: ListPayload<Member> = serde_json::from_str(r#"{"content":[]}"#).unwrap();
        assert!(payload.into_records().is_empty());
    }

    #[test]
    fn test_list_url_trims_trailing_slash() {
        let config = Config {
            api_url: "http://localhost:8080/".to_string(),
            ..Config::default()
        };
        let client = ApiClient::new(&config).unwrap();
        assert_eq!(
            client.list_url::<Member>(0, 20),
            "http://localhost:8080/api/members?page=0&size=20"
        );
    }

    #[test]
    fn test_status_mapping() {
        let request_id = Uuid::now_v7();
        assert!(verify_status(StatusCode::OK, request_id).is_ok());
        assert!(verify_status(StatusCode::CREATED, request_id).is_ok());

        let auth = verify_status(StatusCode::UNAUTHORIZED, request_id).unwrap_err();
        assert!(auth.to_string().contains("Authentication failed"));

        let server = verify_status(StatusCode::INTERNAL_SERVER_ERROR, request_id).unwrap_err();
        assert!(server.to_string().contains("500"));
    }
}
