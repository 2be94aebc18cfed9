//! Test helpers for integration tests
//!
//! Provides a server running on an ephemeral port over a throwaway database
//! and upload directory, and cookie-keeping clients that act as browsers.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use desk_api::{create_app, create_app_state, AppState};
use desk_common::AppConfig;
use reqwest::{header, multipart, redirect::Policy, Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::fixtures::{ADMIN_EMAIL, ADMIN_PASSWORD, ADMIN_USERNAME};

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub state: AppState,
    upload_dir: PathBuf,
    _dir: TempDir,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server with the default test settings
    pub async fn start() -> Result<Self> {
        Self::start_with(&[]).await
    }

    /// Start a test server, overriding individual settings
    pub async fn start_with(overrides: &[(&str, &str)]) -> Result<Self> {
        let dir = TempDir::new()?;
        let upload_dir = dir.path().join("uploads");

        let mut vars = test_vars(dir.path(), &upload_dir);
        for (key, value) in overrides {
            vars.insert((*key).to_string(), (*value).to_string());
        }
        let config = AppConfig::from_lookup(|key| vars.get(key).cloned())
            .map_err(|e| anyhow::anyhow!("Config error: {e}"))?;

        let state = create_app_state(config).await?;
        let app = create_app(state.clone())?;

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
                .await
                .ok();
        });

        Ok(Self {
            addr,
            state,
            upload_dir,
            _dir: dir,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// A fresh client with its own cookie jar
    pub fn browser(&self) -> Browser {
        Browser::new(self.base_url())
    }

    /// Directory attachments are written to
    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    /// Files currently in the upload directory
    pub fn stored_files(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in std::fs::read_dir(&self.upload_dir)? {
            names.push(entry?.file_name().to_string_lossy().into_owned());
        }
        names.sort();
        Ok(names)
    }
}

fn test_vars(root: &Path, upload_dir: &Path) -> HashMap<String, String> {
    [
        ("APP_ENV", "development".to_string()),
        (
            "DATABASE_URL",
            format!("sqlite://{}", root.join("site.db").display()),
        ),
        ("SECRET_KEY", "integration-test-secret-key-0123456789abcdef".to_string()),
        ("UPLOAD_DIR", upload_dir.display().to_string()),
        ("MAX_FILE_SIZE_MB", "1".to_string()),
        ("RATE_LIMIT_REQUESTS_PER_SECOND", "1000".to_string()),
        ("RATE_LIMIT_BURST", "1000".to_string()),
        ("ADMIN_EMAIL", ADMIN_EMAIL.to_string()),
        ("ADMIN_USERNAME", ADMIN_USERNAME.to_string()),
        ("ADMIN_PASSWORD", ADMIN_PASSWORD.to_string()),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect()
}

/// A client that keeps cookies and does not follow redirects
pub struct Browser {
    client: Client,
    base_url: String,
}

impl Browser {
    fn new(base_url: String) -> Self {
        let client = Client::builder()
            .cookie_store(true)
            .redirect(Policy::none())
            .timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to build HTTP client");
        Self { client, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.client.get(self.url(path)).send().await?)
    }

    /// Make a POST request with a URL-encoded form body
    pub async fn post_form<T: Serialize + ?Sized>(&self, path: &str, form: &T) -> Result<Response> {
        Ok(self.client.post(self.url(path)).form(form).send().await?)
    }

    /// Make a POST request with a multipart body
    pub async fn post_multipart(&self, path: &str, form: multipart::Form) -> Result<Response> {
        Ok(self.client.post(self.url(path)).multipart(form).send().await?)
    }

    pub async fn register(&self, username: &str, email: &str, password: &str) -> Result<Response> {
        self.post_form(
            "/register",
            &[("username", username), ("email", email), ("password", password)],
        )
        .await
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<Response> {
        self.post_form("/login", &[("email", email), ("password", password)])
            .await
    }

    /// Register an account and log in with it, failing unless both succeed
    pub async fn sign_up(&self, username: &str, email: &str, password: &str) -> Result<()> {
        assert_redirect(self.register(username, email, password).await?, "/login").await?;
        assert_redirect(self.login(email, password).await?, "/dashboard").await?;
        Ok(())
    }

    /// File a ticket with an optional `(filename, bytes)` attachment
    pub async fn create_ticket(
        &self,
        title: &str,
        description: &str,
        file: Option<(&str, Vec<u8>)>,
    ) -> Result<Response> {
        let mut form = multipart::Form::new()
            .text("title", title.to_string())
            .text("description", description.to_string());
        if let Some((name, bytes)) = file {
            form = form.part("file", multipart::Part::bytes(bytes).file_name(name.to_string()));
        }
        self.post_multipart("/create_ticket", form).await
    }

    /// Fetch a JSON page, failing on anything but `200`
    pub async fn page(&self, path: &str) -> Result<serde_json::Value> {
        assert_json(self.get(path).await?, StatusCode::OK).await
    }
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(response: Response, expected_status: StatusCode) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(())
}

/// Assert a `303 See Other` to `location`
pub async fn assert_redirect(response: Response, location: &str) -> Result<()> {
    let actual = response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string);

    if response.status() != StatusCode::SEE_OTHER || actual.as_deref() != Some(location) {
        let status = response.status();
        let body = response.text().await?;
        anyhow::bail!(
            "Expected redirect to {location}, got {status} to {actual:?}. Body: {body}"
        );
    }
    Ok(())
}
