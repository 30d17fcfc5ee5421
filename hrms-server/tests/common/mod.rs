//! Router harness shared by the API integration tests

#![allow(dead_code)]

use axum::Router;
use axum::body::{Body, to_bytes};
use http::{Method, Request, StatusCode};
use hrms_server::{AppState, Config, DbService, create_router};
use serde_json::Value;
use tower::ServiceExt;

pub const TENANT: &str = "pb.amritsar";

pub struct TestApp {
    router: Router,
}

impl TestApp {
    /// Fresh in-memory database, ID generation disabled
    pub async fn new() -> Self {
        Self::with_config(Config::default()).await
    }

    pub async fn with_config(config: Config) -> Self {
        let db = DbService::in_memory().await.expect("in-memory database");
        let state = AppState::new(config, db.pool).expect("application state");
        Self {
            router: create_router(state),
        }
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        tenant: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let headers: Vec<(&str, &str)> = tenant.map(|t| ("X-Tenant-ID", t)).into_iter().collect();
        self.send_with_headers(method, uri, &headers, body).await
    }

    pub async fn send_with_headers(
        &self,
        method: Method,
        uri: &str,
        headers: &[(&str, &str)],
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        let request = match body {
            Some(body) => builder
                .header(http::header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("valid request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("readable body");
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("JSON body")
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, Some(TENANT), None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(TENANT), Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::PUT, uri, Some(TENANT), Some(body)).await
    }

    pub async fn patch(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::PATCH, uri, Some(TENANT), Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::DELETE, uri, Some(TENANT), None).await
    }

    /// Create one employee and return its id
    pub async fn create_employee(&self, code: Option<&str>) -> String {
        let mut body = serde_json::json!({
            "employeeType": "PERMANENT",
            "department": "HR",
            "designation": "Clerk"
        });
        if let Some(code) = code {
            body["code"] = code.into();
        }
        let (status, json) = self.post("/employees/v3", Value::Array(vec![body])).await;
        assert_eq!(status, StatusCode::CREATED, "{json}");
        json[0]["id"].as_str().expect("employee id").to_string()
    }
}
