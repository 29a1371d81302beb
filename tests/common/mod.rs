#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{Context, Result};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use user_records_api::config::AppConfig;
use user_records_api::database::UserStore;
use user_records_api::testing::MemoryUserStore;
use user_records_api::AppState;

pub const AUTH_USER: &str = "admin";
pub const AUTH_PASS: &str = "s3cret";

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub client: reqwest::Client,
}

impl TestServer {
    /// Full URL for a path under the API prefix
    pub fn api(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.client.get(self.api(path)).basic_auth(AUTH_USER, Some(AUTH_PASS))
    }

    pub fn post(&self, path: &str, body: &Value) -> reqwest::RequestBuilder {
        self.client.post(self.api(path)).basic_auth(AUTH_USER, Some(AUTH_PASS)).json(body)
    }

    pub fn put(&self, path: &str, body: &Value) -> reqwest::RequestBuilder {
        self.client.put(self.api(path)).basic_auth(AUTH_USER, Some(AUTH_PASS)).json(body)
    }

    pub fn patch(&self, path: &str, body: &Value) -> reqwest::RequestBuilder {
        self.client.patch(self.api(path)).basic_auth(AUTH_USER, Some(AUTH_PASS)).json(body)
    }

    pub fn delete(&self, path: &str) -> reqwest::RequestBuilder {
        self.client.delete(self.api(path)).basic_auth(AUTH_USER, Some(AUTH_PASS))
    }
}

/// Development profile with known credentials and quiet request logging
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::development();
    config.security.auth_user = Some(AUTH_USER.to_string());
    config.security.auth_pass = Some(AUTH_PASS.to_string());
    config.api.enable_request_logging = false;
    config
}

/// Serve the router in-process on a free port
pub async fn spawn_with(config: AppConfig, store: Arc<dyn UserStore>) -> Result<TestServer> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();

    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let listener = TcpListener::bind(("127.0.0.1", port))
        .await
        .with_context(|| format!("failed to bind port {}", port))?;

    let app = user_records_api::app(AppState::new(config, store));
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    Ok(TestServer {
        port,
        base_url: format!("http://127.0.0.1:{}", port),
        client: reqwest::Client::new(),
    })
}

/// Server backed by an empty in-memory store
pub async fn spawn() -> Result<(TestServer, Arc<MemoryUserStore>)> {
    let store = Arc::new(MemoryUserStore::new());
    let server = spawn_with(test_config(), store.clone()).await?;
    Ok((server, store))
}

pub fn john() -> Value {
    json!({
        "email": "john@example.com",
        "name": "John Doe",
        "age": 30,
        "city": "NY",
        "zipCode": "10001"
    })
}

/// POST a user and return the created body
pub async fn create_user(server: &TestServer, body: &Value) -> Result<Value> {
    let res = server.post("/users", body).send().await?;
    anyhow::ensure!(res.status() == reqwest::StatusCode::CREATED, "create failed: {}", res.status());
    Ok(res.json().await?)
}
