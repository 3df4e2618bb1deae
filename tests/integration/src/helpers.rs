//! Test helpers for integration tests
//!
//! Provides a spawned test server, HTTP request shortcuts, admin tokens and
//! photo seeding.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use gallery_api::{create_app, create_app_state};
use gallery_common::{AppConfig, JwtService};
use gallery_core::{Snowflake, SnowflakeGenerator};
use gallery_db::PgPool;
use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Worker id for ids minted by the tests themselves, away from the server's
fn test_worker_id() -> u16 {
    1000 + (std::process::id() % 24) as u16
}

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    pub pool: PgPool,
    jwt: JwtService,
    ids: SnowflakeGenerator,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server
    pub async fn start() -> Result<Self> {
        let config = test_config()?;
        Self::start_with_config(config).await
    }

    /// Start a test server with custom config
    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        let state = create_app_state(config).await?;
        let pool = state.pool().clone();
        let jwt = state.jwt_service().clone();

        let app = create_app(state);

        // Port 0 so parallel test binaries never collide
        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        // Wait for server to be ready
        tokio::time::sleep(Duration::from_millis(100)).await;

        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            addr,
            client,
            pool,
            jwt,
            ids: SnowflakeGenerator::new(test_worker_id()),
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    /// A fresh id, e.g. for an event nobody has touched yet
    pub fn new_id(&self) -> Snowflake {
        self.ids.generate()
    }

    /// Token for an organizer, signed with the server's secret
    pub fn admin_token(&self) -> Result<String> {
        Ok(self.jwt.issue_admin_token(self.new_id())?.token)
    }

    /// Insert a photo row the way the upload pipeline would
    pub async fn seed_photo(&self, event_id: Snowflake, category: Option<&str>) -> Result<Snowflake> {
        let id = self.new_id();
        let url = format!("https://cdn.example.com/{event_id}/IMG_{id}.jpg");
        self.insert_photo(id, event_id, category, &url).await?;
        Ok(id)
    }

    /// Insert a photo whose url is served by this test server
    pub async fn seed_downloadable_photo(&self, event_id: Snowflake) -> Result<Snowflake> {
        let id = self.new_id();
        let url = self.url("/health");
        self.insert_photo(id, event_id, None, &url).await?;
        Ok(id)
    }

    async fn insert_photo(
        &self,
        id: Snowflake,
        event_id: Snowflake,
        category: Option<&str>,
        url: &str,
    ) -> Result<()> {
        sqlx::query(
            "INSERT INTO photos (id, event_id, filename, url, category) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(id.into_inner())
        .bind(event_id.into_inner())
        .bind(format!("IMG_{id}.jpg"))
        .bind(url)
        .bind(category)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.client.get(self.url(path)).send().await?)
    }

    /// Make a GET request with auth token
    pub async fn get_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self
            .client
            .get(self.url(path))
            .header("Authorization", format!("Bearer {token}"))
            .send()
            .await?)
    }

    /// Make a POST request without a body
    pub async fn post_empty(&self, path: &str) -> Result<Response> {
        Ok(self.client.post(self.url(path)).send().await?)
    }

    /// Make a POST request with JSON body
    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        Ok(self.client.post(self.url(path)).json(body).send().await?)
    }

    /// Make a POST request with auth token
    pub async fn post_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        Ok(self
            .client
            .post(self.url(path))
            .header("Authorization", format!("Bearer {token}"))
            .json(body)
            .send()
            .await?)
    }

    /// Make a PATCH request with auth token
    pub async fn patch_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        Ok(self
            .client
            .patch(self.url(path))
            .header("Authorization", format!("Bearer {token}"))
            .json(body)
            .send()
            .await?)
    }

    /// Make a DELETE request with auth token
    pub async fn delete_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self
            .client
            .delete(self.url(path))
            .header("Authorization", format!("Bearer {token}"))
            .send()
            .await?)
    }
}

/// Create a test configuration
///
/// Migrations are resolved from this crate's manifest so the tests work from
/// any working directory, and the rate limit is lifted.
pub fn test_config() -> Result<AppConfig> {
    dotenvy::dotenv().ok();

    let mut config = AppConfig::from_env().map_err(|e| anyhow::anyhow!("Config error: {e}"))?;
    config.database.run_migrations = true;
    config.database.migrations_dir =
        concat!(env!("CARGO_MANIFEST_DIR"), "/../../crates/gallery-db/migrations").to_string();
    config.rate_limit.requests_per_second = 1000;
    config.rate_limit.burst = 10_000;

    Ok(config)
}

/// Helper to check if test environment is available
pub async fn check_test_env() -> bool {
    dotenvy::dotenv().ok();

    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("Skipping test: DATABASE_URL not set");
        return false;
    }

    if std::env::var("JWT_SECRET").is_err() {
        eprintln!("Skipping test: JWT_SECRET not set");
        return false;
    }

    true
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(())
}
