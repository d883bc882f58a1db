// src/backend/rest.rs
//
// PostgREST table gateway over HTTPS.
//
// ARCHITECTURE:
// - One reqwest call per gateway method
// - Authenticates every request with the project API key
// - Maps non-2xx answers to BackendError without reinterpreting them
//
// CRITICAL RULES:
// - Never retries
// - Refuses unfiltered UPDATE / DELETE before anything is sent

use async_trait::async_trait;
use log::{debug, error, info};
use reqwest::{header, Client, Method, RequestBuilder, Response};
use serde::Deserialize;
use std::time::Duration;

use crate::backend::gateway::TableGateway;
use crate::backend::query::{filter_params, Filter, Query};
use crate::config::BackendConfig;
use crate::domain::Record;
use crate::error::{AppError, AppResult, BackendError};

const PREFER: &str = "Prefer";

/// Error body returned by PostgREST and the storage API.
///
/// PostgREST sends `code/message/details/hint`; storage sends
/// `statusCode/error/message`. Both are read leniently.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    code: Option<String>,
    message: Option<String>,
    details: Option<String>,
    hint: Option<String>,
    error: Option<String>,
}

/// Table gateway backed by the hosted REST API
pub struct RestBackend {
    rest_url: String,
    api_key: String,
    http_client: Client,
}

impl RestBackend {
    pub fn new(config: &BackendConfig) -> AppResult<Self> {
        Ok(Self {
            rest_url: config.rest_url(),
            api_key: config.api_key.clone(),
            http_client: build_http_client(config)?,
        })
    }

    pub fn rest_url(&self) -> &str {
        &self.rest_url
    }

    fn request(&self, method: Method, table: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.rest_url, table);
        authorize(self.http_client.request(method, url), &self.api_key)
            .header(header::ACCEPT, "application/json")
    }

    async fn rows(response: Response) -> AppResult<Vec<Record>> {
        let rows: Vec<Record> = response.json().await?;
        Ok(rows)
    }

    fn first_row(table: &str, rows: Vec<Record>) -> AppResult<Record> {
        rows.into_iter()
            .next()
            .ok_or_else(|| AppError::Other(format!("Backend returned no row for '{}'", table)))
    }
}

#[async_trait]
impl TableGateway for RestBackend {
    async fn select(&self, table: &str, query: &Query) -> AppResult<Vec<Record>> {
        let params = query.to_params();
        debug!("GET {} {:?}", table, params);

        let response = send(self.request(Method::GET, table).query(&params)).await?;
        Self::rows(response).await
    }

    async fn insert(&self, table: &str, record: Record) -> AppResult<Record> {
        debug!("POST {}", table);

        let request = self
            .request(Method::POST, table)
            .header(PREFER, "return=representation")
            .query(&[("select", "*")])
            .json(&[record]);

        let rows = Self::rows(send(request).await?).await?;
        info!("Inserted row into {}", table);
        Self::first_row(table, rows)
    }

    async fn update(
        &self,
        table: &str,
        filters: &[Filter],
        changes: Record,
    ) -> AppResult<Vec<Record>> {
        ensure_filtered("update", table, filters)?;
        let mut params = filter_params(filters);
        params.push(("select".to_string(), "*".to_string()));
        debug!("PATCH {} {:?}", table, params);

        let request = self
            .request(Method::PATCH, table)
            .header(PREFER, "return=representation")
            .query(&params)
            .json(&changes);

        let rows = Self::rows(send(request).await?).await?;
        info!("Updated {} row(s) in {}", rows.len(), table);
        Ok(rows)
    }

    async fn delete(&self, table: &str, filters: &[Filter]) -> AppResult<()> {
        ensure_filtered("delete", table, filters)?;
        let params = filter_params(filters);
        debug!("DELETE {} {:?}", table, params);

        let request = self
            .request(Method::DELETE, table)
            .header(PREFER, "return=minimal")
            .query(&params);

        send(request).await?;
        info!("Deleted from {} where {:?}", table, params);
        Ok(())
    }

    async fn upsert(&self, table: &str, record: Record, on_conflict: &str) -> AppResult<Record> {
        debug!("POST {} (upsert on {})", table, on_conflict);

        let request = self
            .request(Method::POST, table)
            .header(PREFER, "resolution=merge-duplicates,return=representation")
            .query(&[("on_conflict", on_conflict), ("select", "*")])
            .json(&[record]);

        let rows = Self::rows(send(request).await?).await?;
        info!("Upserted row into {}", table);
        Self::first_row(table, rows)
    }

    async fn count(&self, table: &str, filters: &[Filter]) -> AppResult<u64> {
        let mut params = vec![("select".to_string(), "*".to_string())];
        params.extend(filter_params(filters));
        debug!("HEAD {} {:?}", table, params);

        let request = self
            .request(Method::HEAD, table)
            .header(PREFER, "count=exact")
            .query(&params);

        let response = send(request).await?;
        let content_range = response
            .headers()
            .get(header::CONTENT_RANGE)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::Other(format!("No Content-Range in count of '{}'", table)))?;

        parse_content_range_total(content_range).ok_or_else(|| {
            AppError::Other(format!("Unreadable Content-Range '{}'", content_range))
        })
    }
}

// ============================================================================
// SHARED HTTP HELPERS (also used by the object store)
// ============================================================================

pub(crate) fn build_http_client(config: &BackendConfig) -> AppResult<Client> {
    let client = Client::builder()
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .build()?;
    Ok(client)
}

pub(crate) fn authorize(request: RequestBuilder, api_key: &str) -> RequestBuilder {
    request
        .header("apikey", api_key)
        .header(header::AUTHORIZATION, format!("Bearer {}", api_key))
}

/// Send and turn any non-2xx status into [`AppError::Backend`]
pub(crate) async fn send(request: RequestBuilder) -> AppResult<Response> {
    let response = request.send().await?;
    if response.status().is_success() {
        return Ok(response);
    }

    let err = backend_error(response).await;
    error!("Backend request failed: {}", err);
    Err(AppError::Backend(err))
}

async fn backend_error(response: Response) -> BackendError {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    let body: ErrorBody = serde_json::from_str(&text).unwrap_or_default();

    let message = body
        .message
        .or(body.error)
        .filter(|m| !m.is_empty())
        .or_else(|| (!text.trim().is_empty()).then(|| text.trim().to_string()))
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string()
        });

    BackendError {
        status: status.as_u16(),
        code: body.code,
        message,
        details: body.details,
        hint: body.hint,
    }
}

fn ensure_filtered(action: &str, table: &str, filters: &[Filter]) -> AppResult<()> {
    if filters.is_empty() {
        return Err(AppError::InvalidInput(format!(
            "Refusing to {} every row of '{}'",
            action, table
        )));
    }
    Ok(())
}

/// Total from `0-24/3573` or `*/0`
fn parse_content_range_total(value: &str) -> Option<u64> {
    value.rsplit_once('/')?.1.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn backend_for(server: &MockServer) -> RestBackend {
        let config = BackendConfig::new(server.uri(), "anon-key").unwrap();
        RestBackend::new(&config).unwrap()
    }

    fn record(value: serde_json::Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_content_range_parsing() {
        assert_eq!(parse_content_range_total("0-24/3573"), Some(3573));
        assert_eq!(parse_content_range_total("*/0"), Some(0));
        assert_eq!(parse_content_range_total("*/*"), None);
        assert_eq!(parse_content_range_total("garbage"), None);
    }

    #[tokio::test]
    async fn test_select_sends_query_and_credentials() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/sermons"))
            .and(query_param("select", "*"))
            .and(query_param("is_featured", "eq.true"))
            .and(query_param("order", "sermon_date.desc"))
            .and(query_param("limit", "3"))
            .and(header("apikey", "anon-key"))
            .and(header("authorization", "Bearer anon-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "id": "s1", "title": "Grace" }
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let query = Query::new()
            .filter(Filter::eq("is_featured", true))
            .order(crate::backend::query::Order::desc("sermon_date"))
            .limit(3);

        let rows = backend_for(&server).select("sermons", &query).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["title"], json!("Grace"));
    }

    #[tokio::test]
    async fn test_insert_asks_for_representation() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rest/v1/members"))
            .and(header("prefer", "return=representation"))
            .and(body_json(json!([{ "name": "Ruth" }])))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(json!([{ "id": "m1", "name": "Ruth" }])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let stored = backend_for(&server)
            .insert("members", record(json!({ "name": "Ruth" })))
            .await
            .unwrap();
        assert_eq!(stored["id"], json!("m1"));
    }

    #[tokio::test]
    async fn test_update_targets_filtered_rows() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/rest/v1/profiles"))
            .and(query_param("id", "eq.u1"))
            .and(body_json(json!({ "role": "user" })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([{ "id": "u1", "role": "user" }])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let rows = backend_for(&server)
            .update(
                "profiles",
                &[Filter::eq("id", "u1")],
                record(json!({ "role": "user" })),
            )
            .await
            .unwrap();
        assert_eq!(rows[0]["role"], json!("user"));
    }

    #[tokio::test]
    async fn test_unfiltered_delete_is_refused_locally() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(204))
            .expect(0)
            .mount(&server)
            .await;

        let err = backend_for(&server).delete("events", &[]).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_upsert_merges_on_conflict_key() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rest/v1/stripe_settings"))
            .and(query_param("on_conflict", "id"))
            .and(|req: &wiremock::Request| {
                req.headers.get("prefer").and_then(|v| v.to_str().ok())
                    == Some("resolution=merge-duplicates,return=representation")
            })
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(json!([{ "id": 1, "currency": "usd" }])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let stored = backend_for(&server)
            .upsert(
                "stripe_settings",
                record(json!({ "id": 1, "currency": "usd" })),
                "id",
            )
            .await
            .unwrap();
        assert_eq!(stored["currency"], json!("usd"));
    }

    #[tokio::test]
    async fn test_count_reads_content_range() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .and(path("/rest/v1/profiles"))
            .and(query_param("role", "eq.admin"))
            .and(header("prefer", "count=exact"))
            .respond_with(ResponseTemplate::new(200).insert_header("content-range", "*/2"))
            .expect(1)
            .mount(&server)
            .await;

        let count = backend_for(&server)
            .count("profiles", &[Filter::eq("role", "admin")])
            .await
            .unwrap();
        assert_eq!(count, 2);
    }

    #[tokio::test]
    async fn test_backend_error_body_is_preserved() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rest/v1/email_subscribers"))
            .respond_with(ResponseTemplate::new(409).set_body_json(json!({
                "code": "23505",
                "message": "duplicate key value violates unique constraint",
                "details": "Key (email)=(a@b.org) already exists.",
                "hint": null
            })))
            .mount(&server)
            .await;

        let err = backend_for(&server)
            .insert("email_subscribers", record(json!({ "email": "a@b.org" })))
            .await
            .unwrap_err();

        match err {
            AppError::Backend(e) => {
                assert_eq!(e.status, 409);
                assert_eq!(e.code.as_deref(), Some("23505"));
                assert_eq!(e.message, "duplicate key value violates unique constraint");
                assert!(e.details.unwrap().contains("a@b.org"));
            }
            other => panic!("expected backend error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_plain_text_error_falls_back_to_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
            .mount(&server)
            .await;

        let err = backend_for(&server)
            .select("events", &Query::new())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Backend(e) if e.message == "upstream unavailable" && e.status == 503));
    }
}
