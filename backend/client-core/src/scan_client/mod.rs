use crate::config::ServerConfig;
use crate::error::scan_client::ScanClientError;

use common::{ErrorLocation, HttpStatusCode};
use models::signup::USER_EXISTS_MARKER;
use models::{
    ActionResponse, Credentials, HistoryRecord, RawAnalysisResponse, SelectedFile, SignupForm,
    SignupReply,
};

use std::panic::Location;
use std::time::Duration;

use const_format::concatcp;
use log::debug;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use url::Url;

const API_PREFIX: &str = "api/";
pub const LOGIN_ENDPOINT: &str = concatcp!(API_PREFIX, "login");
pub const ANALYZE_ENDPOINT: &str = concatcp!(API_PREFIX, "analyze");
pub const HISTORY_ENDPOINT: &str = concatcp!(API_PREFIX, "history");
pub const HISTORY_DELETE_ENDPOINT: &str = concatcp!(HISTORY_ENDPOINT, "/delete");
pub const UPLOAD_FIELD_NAME: &str = "file";

// Page routes, not API routes: they answer with HTML and redirects.
pub const SIGNUP_ENDPOINT: &str = "signup";
pub const LOGOUT_ENDPOINT: &str = "logout";

/// HTTP capability shared by the controllers.
///
/// Clones share one connection pool and one cookie jar, so the session cookie
/// set by a successful login rides along on every later call.
#[derive(Clone)]
pub struct ScanClient {
    base_url: Url,
    client: Client,
}

impl ScanClient {
    pub fn new(base_url_str: &str) -> Result<Self, ScanClientError> {
        Self::with_timeout(base_url_str, None)
    }

    /// Build a client with an optional whole-request timeout.
    ///
    /// `None` leaves requests unbounded.
    pub fn with_timeout(
        base_url_str: &str,
        timeout: Option<Duration>,
    ) -> Result<Self, ScanClientError> {
        let mut base_url = Url::parse(base_url_str)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let mut builder = Client::builder().cookie_store(true);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self { base_url, client })
    }

    pub fn from_config(config: &ServerConfig) -> Result<Self, ScanClientError> {
        Self::with_timeout(&config.base_url, config.request_timeout())
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `POST /api/login` with the credentials as a JSON body.
    pub async fn login(&self, credentials: &Credentials) -> Result<ActionResponse, ScanClientError> {
        let url = self.base_url.join(LOGIN_ENDPOINT)?;

        let response = self.client.post(url).json(credentials).send().await?;

        read_json(response).await
    }

    /// `POST /api/analyze` with the file as multipart field `file`.
    pub async fn analyze(
        &self,
        file: &SelectedFile,
    ) -> Result<RawAnalysisResponse, ScanClientError> {
        let url = self.base_url.join(ANALYZE_ENDPOINT)?;

        let part = Part::bytes(file.bytes.clone())
            .file_name(file.file_name.clone())
            .mime_str(&file.mime_type)
            .map_err(|e| ScanClientError::Multipart {
                message: format!("Invalid MIME type {}: {e}", file.mime_type),
                location: ErrorLocation::from(Location::caller()),
            })?;
        let form = Form::new().part(UPLOAD_FIELD_NAME, part);

        let response = self.client.post(url).multipart(form).send().await?;

        read_json(response).await
    }

    /// `GET /api/history`, newest first as ordered by the server.
    pub async fn list_history(&self) -> Result<Vec<HistoryRecord>, ScanClientError> {
        let url = self.base_url.join(HISTORY_ENDPOINT)?;

        let response = self.client.get(url).send().await?;

        read_json(response).await
    }

    /// `DELETE /api/history/delete/{id}`.
    pub async fn delete_history(&self, id: i64) -> Result<ActionResponse, ScanClientError> {
        let url = self
            .base_url
            .join(&format!("{HISTORY_DELETE_ENDPOINT}/{id}"))?;

        let response = self.client.delete(url).send().await?;

        read_json(response).await
    }

    /// `POST /signup` with the form fields url-encoded.
    ///
    /// A created account is recognized by the redirect away from the signup
    /// page; redirects are followed, so that shows up as a different final URL.
    pub async fn signup(&self, form: &SignupForm) -> Result<SignupReply, ScanClientError> {
        let url = self.base_url.join(SIGNUP_ENDPOINT)?;

        let response = self.client.post(url.clone()).form(form).send().await?;

        let status = HttpStatusCode::from(response.status().as_u16());
        let redirected = response.url().path() != url.path();
        let body = response.text().await?;

        debug!("Signup answered HTTP {} (redirected: {})", status, redirected);

        if redirected && status.is_success() {
            Ok(SignupReply::Created)
        } else if body.contains(USER_EXISTS_MARKER) {
            Ok(SignupReply::UserExists)
        } else {
            Ok(SignupReply::Failed(status))
        }
    }

    /// `GET /logout`. The server drops the session and redirects to the login
    /// page; the cookie jar picks up the cleared session cookie on the way.
    pub async fn logout(&self) -> Result<(), ScanClientError> {
        let url = self.base_url.join(LOGOUT_ENDPOINT)?;

        let response = self.client.get(url).send().await?;

        let status = HttpStatusCode::from(response.status().as_u16());
        if status.is_success() {
            Ok(())
        } else {
            Err(ScanClientError::Status {
                status,
                message: String::from("Logout was not accepted"),
                location: ErrorLocation::from(Location::caller()),
            })
        }
    }
}

/// Decode a JSON body whatever the status code.
///
/// The service reports failures as JSON bodies on 4xx/5xx responses, so the
/// status only matters when the body cannot be decoded.
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ScanClientError> {
    let status = HttpStatusCode::from(response.status().as_u16());
    let url = response.url().clone();
    let body = response.bytes().await?;

    debug!("{} answered HTTP {} ({} bytes)", url, status, body.len());

    serde_json::from_slice(&body).map_err(|e| ScanClientError::Decode {
        status,
        message: e.to_string(),
        location: ErrorLocation::from(Location::caller()),
    })
}
