#![allow(dead_code)]

use anyhow::{Context, Result};
use axum::{
    body::{to_bytes, Body},
    http::{HeaderMap, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use collectibles_api::config::AppConfig;
use collectibles_api::{router, AppState};

/// The full router over fresh in-memory stores, driven without a socket
#[derive(Clone)]
pub struct TestApp {
    router: Router,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub text: String,
}

impl TestResponse {
    pub fn json(&self) -> Result<Value> {
        serde_json::from_str(&self.text).with_context(|| format!("response is not JSON: {}", self.text))
    }
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(AppConfig::in_memory())
    }

    pub fn with_config(config: AppConfig) -> Self {
        Self { router: router(AppState::in_memory(config)) }
    }

    pub async fn send(&self, request: Request<Body>) -> Result<TestResponse> {
        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await?;
        let text = String::from_utf8(bytes.to_vec()).context("response body is not UTF-8")?;
        Ok(TestResponse { status, headers, text })
    }

    /// Send a request and decode the JSON reply
    pub async fn call(&self, method: &str, uri: &str, body: Option<Value>) -> Result<(StatusCode, Value)> {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(value) => {
                builder = builder.header("content-type", "application/json");
                Body::from(serde_json::to_vec(&value)?)
            }
            None => Body::empty(),
        };
        let response = self.send(builder.body(body)?).await?;
        Ok((response.status, response.json()?))
    }

    pub async fn get(&self, uri: &str) -> Result<(StatusCode, Value)> {
        self.call("GET", uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> Result<(StatusCode, Value)> {
        self.call("POST", uri, Some(body)).await
    }

    pub async fn patch(&self, uri: &str, body: Value) -> Result<(StatusCode, Value)> {
        self.call("PATCH", uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> Result<(StatusCode, Value)> {
        self.call("DELETE", uri, None).await
    }
}

/// Names of the records in a list response, in order
pub fn names(list: &Value) -> Vec<String> {
    list.as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item["name"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}
