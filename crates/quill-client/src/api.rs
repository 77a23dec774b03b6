use http::header::HeaderMap;
use http::StatusCode;
use quill_types::{
    Ack, ApiErrorBody, Category, CreatedPost, MeResponse, NewCategory, Post, PostInput,
    UploadResponse,
};
use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::ClientError;
use crate::session::SessionStore;

/// HTTP client bound to the remote API origin.
#[derive(Clone)]
pub struct ApiClient {
    base: Url,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base: &str) -> Result<Self, ClientError> {
        let invalid = |reason: String| ClientError::InvalidBaseUrl {
            url: base.to_string(),
            reason,
        };

        let parsed = Url::parse(base.trim()).map_err(|e| invalid(e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme {}", parsed.scheme())));
        }
        if parsed.cannot_be_a_base() {
            return Err(invalid("not a base URL".into()));
        }

        Ok(Self {
            base: parsed,
            http: reqwest::Client::new(),
        })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Joins `path` onto the base, keeping any base path prefix. Each
    /// segment is percent-encoded.
    pub fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        let mut url = self.base.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| ClientError::InvalidBaseUrl {
                    url: self.base.to_string(),
                    reason: "not a base URL".into(),
                })?;
            segments.pop_if_empty();
            for segment in path.split('/').filter(|s| !s.is_empty()) {
                segments.push(segment);
            }
        }
        Ok(url)
    }

    /// `base + path` for server-relative asset paths such as upload results.
    pub fn asset_url(&self, path: &str) -> String {
        asset_url(self.base.as_str(), path)
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        headers: &HeaderMap,
    ) -> Result<T, ClientError> {
        let request = self.request(Method::GET, path, headers)?;
        self.send(path, request).await
    }

    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        headers: &HeaderMap,
    ) -> Result<T, ClientError> {
        let request = self.request(Method::POST, path, headers)?.json(body);
        self.send(path, request).await
    }

    pub async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        headers: &HeaderMap,
    ) -> Result<T, ClientError> {
        let request = self.request(Method::PUT, path, headers)?.json(body);
        self.send(path, request).await
    }

    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        headers: &HeaderMap,
    ) -> Result<T, ClientError> {
        let request = self.request(Method::DELETE, path, headers)?;
        self.send(path, request).await
    }

    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
        headers: &HeaderMap,
    ) -> Result<T, ClientError> {
        let request = self.request(Method::POST, path, headers)?.multipart(form);
        self.send(path, request).await
    }

    fn request(
        &self,
        method: Method,
        path: &str,
        headers: &HeaderMap,
    ) -> Result<RequestBuilder, ClientError> {
        let url = self.endpoint(path)?;
        debug!("{method} {url}");
        Ok(self.http.request(method, url).headers(headers.clone()))
    }

    async fn send<T: DeserializeOwned>(
        &self,
        path: &str,
        request: RequestBuilder,
    ) -> Result<T, ClientError> {
        let network = |source: reqwest::Error| {
            warn!("request to {path} failed: {source}");
            ClientError::Network {
                path: path.to_string(),
                source,
            }
        };

        let response = request.send().await.map_err(network)?;
        let status = response.status();
        let body = response.bytes().await.map_err(network)?;

        if !status.is_success() {
            let message = error_message(status, &body);
            warn!("{path} returned {status}: {message}");
            return Err(ClientError::Status {
                path: path.to_string(),
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_slice(&body).map_err(|source| ClientError::Decode {
            path: path.to_string(),
            source,
        })
    }
}

fn error_message(status: StatusCode, body: &[u8]) -> String {
    if let Ok(doc) = serde_json::from_slice::<ApiErrorBody>(body) {
        return match doc.detail {
            Some(detail) if !detail.is_empty() => format!("{} ({detail})", doc.error),
            _ => doc.error,
        };
    }

    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if !text.is_empty() {
        return text.chars().take(200).collect();
    }

    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| status.to_string())
}

/// Resolves an upload path like `/uploads/a.png` against the API origin.
/// Absolute URLs are returned unchanged.
pub fn asset_url(base: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// An image picked in the editor, ready for `POST /api/upload`.
#[derive(Clone, Debug)]
pub struct Upload {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

/// Typed endpoints of the remote blog API. Mutations carry the session's
/// bearer token and are refused locally when there is none.
#[derive(Clone)]
pub struct BlogApi {
    client: ApiClient,
    session: SessionStore,
}

impl BlogApi {
    pub fn new(client: ApiClient, session: SessionStore) -> Self {
        Self { client, session }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Identity entry point; the remote API redirects on to the provider.
    pub fn login_url(&self) -> Result<Url, ClientError> {
        self.client.endpoint("/auth/google")
    }

    pub fn asset_url(&self, path: &str) -> String {
        self.client.asset_url(path)
    }

    /// `GET /api/me`. Returns `None` without a request when no token is stored.
    pub async fn me(&self) -> Result<Option<MeResponse>, ClientError> {
        let headers = self.session.auth_headers();
        if headers.is_empty() {
            return Ok(None);
        }
        self.client.get("/api/me", &headers).await.map(Some)
    }

    pub async fn list_posts(&self) -> Result<Vec<Post>, ClientError> {
        self.client.get("/api/posts", &HeaderMap::new()).await
    }

    pub async fn post_by_slug(&self, slug: &str) -> Result<Post, ClientError> {
        self.client
            .get(&format!("/api/posts/{slug}"), &HeaderMap::new())
            .await
    }

    pub async fn post_by_id(&self, id: i64) -> Result<Post, ClientError> {
        self.client
            .get(&format!("/api/post_by_id/{id}"), &HeaderMap::new())
            .await
    }

    pub async fn list_categories(&self) -> Result<Vec<Category>, ClientError> {
        self.client.get("/api/categories", &HeaderMap::new()).await
    }

    pub async fn create_category(&self, name: &str) -> Result<Category, ClientError> {
        let headers = self.require_auth()?;
        let body = NewCategory {
            name: name.trim().to_string(),
        };
        self.client.post("/api/categories", &body, &headers).await
    }

    pub async fn create_post(&self, input: &PostInput) -> Result<CreatedPost, ClientError> {
        let headers = self.require_auth()?;
        self.client.post("/api/posts", input, &headers).await
    }

    pub async fn update_post(&self, id: i64, input: &PostInput) -> Result<Ack, ClientError> {
        let headers = self.require_auth()?;
        self.client
            .put(&format!("/api/posts/{id}"), input, &headers)
            .await
    }

    pub async fn delete_post(&self, id: i64) -> Result<Ack, ClientError> {
        let headers = self.require_auth()?;
        self.client
            .delete(&format!("/api/posts/{id}"), &headers)
            .await
    }

    pub async fn upload_image(&self, upload: Upload) -> Result<UploadResponse, ClientError> {
        let headers = self.require_auth()?;

        let mut part = Part::bytes(upload.bytes).file_name(upload.file_name);
        if let Some(contentType) = upload.content_type.filter(|c| !c.is_empty()) {
            part = part
                .mime_str(&contentType)
                .map_err(|e| ClientError::Invalid(format!("bad content type {contentType}: {e}")))?;
        }
        let form = Form::new().part("file", part);

        self.client
            .post_multipart("/api/upload", form, &headers)
            .await
    }

    /// Drops the local token. The remote logout only clears its own cookie
    /// session, so its failure is not fatal.
    pub async fn sign_out(&self) -> Result<(), ClientError> {
        let result: Result<Ack, ClientError> = self
            .client
            .post("/auth/logout", &serde_json::json!({}), &HeaderMap::new())
            .await;
        if let Err(e) = result {
            debug!("remote logout failed: {e}");
        }
        self.session.clear()
    }

    fn require_auth(&self) -> Result<HeaderMap, ClientError> {
        let headers = self.session.auth_headers();
        if headers.is_empty() {
            return Err(ClientError::NotSignedIn);
        }
        Ok(headers)
    }
}
