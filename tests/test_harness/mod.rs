#![allow(dead_code)]

use std::{path::PathBuf, sync::Arc};

use anyhow::Result;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Extension, Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use workshop_tracker::{
    api,
    infrastructure::{config::Config, state::AppState},
};

pub struct TestApp {
    pub router: Router,
    pub state: Arc<AppState>,
}

/// Fresh in-memory workshop with the sample data and no profile images.
pub async fn spawn_app() -> Result<TestApp> {
    spawn_app_with(|_| {}).await
}

pub async fn spawn_app_with<F>(customize: F) -> Result<TestApp>
where
    F: FnOnce(&mut Config),
{
    let mut config = Config::default();
    config.seed.images_dir = PathBuf::from("target/no-such-images-dir");
    customize(&mut config);

    let config = Arc::new(config);
    let state = Arc::new(AppState::initialize(Arc::clone(&config)).await?);
    let router = api::build_router(Arc::clone(&config)).layer(Extension(Arc::clone(&state)));

    Ok(TestApp { router, state })
}

impl TestApp {
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> Result<(StatusCode, Value)> {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&json)?))?,
            None => builder.body(Body::empty())?,
        };

        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await?;
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)?
        };

        Ok((status, body))
    }

    pub async fn get(&self, uri: &str) -> Result<(StatusCode, Value)> {
        self.request(Method::GET, uri, None).await
    }

    pub async fn graphql(&self, query: &str, variables: Value) -> Result<Value> {
        let (status, body) = self
            .request(
                Method::POST,
                "/graphql",
                Some(json!({ "query": query, "variables": variables })),
            )
            .await?;
        assert_eq!(status, StatusCode::OK, "unexpected graphql status: {body}");
        Ok(body)
    }
}

/// Message and `extensions.code` of the first GraphQL error.
pub fn first_error(body: &Value) -> (String, String) {
    let error = &body["errors"][0];
    (
        error["message"].as_str().unwrap_or_default().to_string(),
        error["extensions"]["code"]
            .as_str()
            .unwrap_or_default()
            .to_string(),
    )
}

pub fn ids(orders: &Value) -> Vec<String> {
    orders
        .as_array()
        .map(|orders| {
            orders
                .iter()
                .filter_map(|order| order["id"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}
