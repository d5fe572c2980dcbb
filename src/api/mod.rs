use crate::models::{
    CombinedFavorite, HelpfulLink, Library, OpenContentCategory, OpenContentItem,
    OpenContentProvider, PaginationMeta, User, Video,
};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub(crate) enum ApiError {
    #[error("network error: {0}")]
    Network(String),

    #[error("unexpected response body: {0}")]
    Parse(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Not found")]
    NotFound,

    #[error("request failed ({status}): {body}")]
    Http { status: u16, body: String },

    /// The backend answered with `success: false`.
    #[error("{0}")]
    Backend(String),
}

impl ApiError {
    fn network(e: reqwest::Error) -> Self {
        Self::Network(e.to_string())
    }

    fn parse(e: impl std::fmt::Display) -> Self {
        Self::Parse(e.to_string())
    }

    /// Text shown in the toast for this failure.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Backend(msg) if !msg.trim().is_empty() => msg.clone(),
            ApiError::Unauthorized => "Your session has expired".to_string(),
            ApiError::NotFound => "Not found".to_string(),
            _ => "Something went wrong. Please try again.".to_string(),
        }
    }
}

pub(crate) type ApiResult<T> = Result<T, ApiError>;

/// Envelope for single-entity calls.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct ServerResponseOne<T> {
    #[serde(default = "default_true")]
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
}

fn default_true() -> bool {
    true
}

impl<T> ServerResponseOne<T> {
    fn into_result(self) -> ApiResult<Self> {
        if self.success {
            Ok(self)
        } else {
            Err(ApiError::Backend(self.message))
        }
    }

    fn require_data(self) -> ApiResult<T> {
        let message = self.message;
        self.data
            .ok_or_else(|| ApiError::Parse(format!("response has no data: {message}")))
    }
}

/// Envelope for collection calls.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct ServerResponseMany<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(default)]
    pub meta: PaginationMeta,
}

impl<T: DeserializeOwned> ServerResponseMany<T> {
    pub(crate) fn from_value(v: serde_json::Value) -> ApiResult<Self> {
        if v.get("success").and_then(|s| s.as_bool()) == Some(false) {
            let msg = v
                .get("message")
                .and_then(|m| m.as_str())
                .unwrap_or_default()
                .to_string();
            return Err(ApiError::Backend(msg));
        }
        serde_json::from_value(v).map_err(ApiError::parse)
    }
}

/// Library favorite operation against `PUT /open-content/{id}/save`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum SaveOpenContent {
    Upsert {
        name: String,
        content_url: String,
        open_content_provider_id: u32,
    },
    Remove,
}

impl SaveOpenContent {
    pub fn upsert_library(library_id: u32, name: &str, provider_id: u32) -> Self {
        Self::Upsert {
            name: name.to_string(),
            content_url: library_proxy_path(library_id),
            open_content_provider_id: provider_id,
        }
    }
}

#[derive(Serialize)]
struct SaveOpenContentWire<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    content_url: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    open_content_provider_id: Option<u32>,
}

// The backend reads an empty `name` as "remove"; that convention stays here.
impl Serialize for SaveOpenContent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let wire = match self {
            SaveOpenContent::Upsert {
                name,
                content_url,
                open_content_provider_id,
            } => SaveOpenContentWire {
                name,
                content_url: Some(content_url),
                open_content_provider_id: Some(*open_content_provider_id),
            },
            SaveOpenContent::Remove => SaveOpenContentWire {
                name: "",
                content_url: None,
                open_content_provider_id: None,
            },
        };
        wire.serialize(serializer)
    }
}

/// Path of the embeddable proxy for a library, relative to the API prefix.
pub(crate) fn library_proxy_path(library_id: u32) -> String {
    format!("/api/proxy/libraries/{library_id}/")
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct ConsentAcceptRequest {
    pub consent_challenge: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct ConsentAcceptResponse {
    pub redirect_to: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct SortOrderBody {
    pub sort_order: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct ActivityRedirect {
    pub url: String,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ApiClient {
    pub(crate) base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub(crate) fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn with_credentials(req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        req.fetch_credentials_include()
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn with_credentials(req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        req
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&impl Serialize>,
    ) -> ApiResult<reqwest::Response> {
        let client = reqwest::Client::new();
        let url = self.url(path);
        tracing::debug!(%method, %url, "api request");

        let mut req = Self::with_credentials(client.request(method, url));
        if let Some(b) = body {
            req = req.json(b);
        }

        let res = req.send().await.map_err(ApiError::network)?;
        let status = res.status();
        if status.is_success() {
            return Ok(res);
        }

        let body = res.text().await.unwrap_or_default();
        Err(Self::error_for_status(status, body))
    }

    fn error_for_status(status: StatusCode, body: String) -> ApiError {
        match status.as_u16() {
            401 => ApiError::Unauthorized,
            404 => ApiError::NotFound,
            _ => {
                // Failed calls still carry the envelope message when the backend produced one.
                let msg = serde_json::from_str::<serde_json::Value>(&body)
                    .ok()
                    .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(String::from));
                match msg {
                    Some(m) => ApiError::Backend(m),
                    None => ApiError::Http {
                        status: status.as_u16(),
                        body,
                    },
                }
            }
        }
    }

    /// Raw GET used by the fetch cache; `key` is `path?query`.
    pub async fn get_value(&self, key: &str) -> ApiResult<serde_json::Value> {
        let res = self.send(Method::GET, key, None::<&()>).await?;
        res.json().await.map_err(ApiError::parse)
    }

    async fn request_one<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&impl Serialize>,
    ) -> ApiResult<ServerResponseOne<T>> {
        let res = self.send(method, path, body).await?;
        let parsed: ServerResponseOne<T> = res.json().await.map_err(ApiError::parse)?;
        parsed.into_result()
    }

    async fn get_many<T: DeserializeOwned>(&self, path: &str) -> ApiResult<ServerResponseMany<T>> {
        ServerResponseMany::from_value(self.get_value(path).await?)
    }

    pub async fn current_user(&self) -> ApiResult<User> {
        self.request_one::<User>(Method::GET, "/auth/check", None::<&()>)
            .await?
            .require_data()
    }

    pub async fn get_library(&self, id: u32) -> ApiResult<Library> {
        self.request_one::<Library>(Method::GET, &format!("/libraries/{id}"), None::<&()>)
            .await?
            .require_data()
    }

    pub async fn get_video(&self, id: u32) -> ApiResult<Video> {
        self.request_one::<Video>(Method::GET, &format!("/videos/{id}"), None::<&()>)
            .await?
            .require_data()
    }

    /// Flip a library's visibility. Returns the server message for the toast.
    pub async fn toggle_library_visibility(&self, id: u32) -> ApiResult<String> {
        let resp = self
            .request_one::<serde_json::Value>(
                Method::PUT,
                &format!("/libraries/{id}"),
                Some(&serde_json::json!({})),
            )
            .await?;
        Ok(resp.message)
    }

    pub async fn save_open_content(&self, id: u32, op: &SaveOpenContent) -> ApiResult<String> {
        let resp = self
            .request_one::<serde_json::Value>(
                Method::PUT,
                &format!("/open-content/{id}/save"),
                Some(op),
            )
            .await?;
        Ok(resp.message)
    }

    pub async fn toggle_video_favorite(&self, id: u32) -> ApiResult<String> {
        let resp = self
            .request_one::<serde_json::Value>(
                Method::PUT,
                &format!("/videos/{id}/favorite"),
                None::<&()>,
            )
            .await?;
        Ok(resp.message)
    }

    pub async fn list_favorites(&self) -> ApiResult<Vec<CombinedFavorite>> {
        Ok(self.get_many(FAVORITES_KEY).await?.data)
    }

    pub async fn list_providers(&self) -> ApiResult<Vec<OpenContentProvider>> {
        Ok(self.get_many("/open-content").await?.data)
    }

    pub async fn list_categories(&self) -> ApiResult<Vec<OpenContentCategory>> {
        Ok(self.get_many("/open-content/categories").await?.data)
    }

    pub async fn top_facility_content(&self) -> ApiResult<Vec<OpenContentItem>> {
        Ok(self.get_many("/open-content/activity").await?.data)
    }

    pub async fn top_user_content(&self, user_id: u32) -> ApiResult<Vec<OpenContentItem>> {
        Ok(self
            .get_many(&format!("/open-content/activity/{user_id}"))
            .await?
            .data)
    }

    pub async fn helpful_links_sort(&self) -> ApiResult<String> {
        let resp = self
            .request_one::<SortOrderBody>(Method::GET, "/helpful-links/sort", None::<&()>)
            .await?;
        Ok(resp.require_data()?.sort_order)
    }

    pub async fn set_helpful_links_sort(&self, sort_order: &str) -> ApiResult<()> {
        self.request_one::<serde_json::Value>(
            Method::PUT,
            "/helpful-links/sort",
            Some(&SortOrderBody {
                sort_order: sort_order.to_string(),
            }),
        )
        .await?;
        Ok(())
    }

    pub async fn list_helpful_links(&self, sort_order: &str) -> ApiResult<Vec<HelpfulLink>> {
        Ok(self
            .get_many(&helpful_links_key(sort_order))
            .await?
            .data)
    }

    /// Count a click and return the URL to open.
    pub async fn record_helpful_link_activity(&self, id: u32) -> ApiResult<String> {
        let resp = self
            .request_one::<ActivityRedirect>(
                Method::PUT,
                &format!("/helpful-links/activity/{id}"),
                None::<&()>,
            )
            .await?;
        Ok(resp.require_data()?.url)
    }

    pub async fn accept_consent(&self, challenge: &str) -> ApiResult<String> {
        let resp = self
            .request_one::<ConsentAcceptResponse>(
                Method::POST,
                "/consent/accept",
                Some(&ConsentAcceptRequest {
                    consent_challenge: challenge.to_string(),
                }),
            )
            .await?;
        Ok(resp.require_data()?.redirect_to)
    }

    /// Follow the proxy endpoint and return the final URL for the viewer iframe.
    pub async fn resolve_library_proxy(&self, id: u32) -> ApiResult<String> {
        let res = self
            .send(
                Method::GET,
                &format!("/proxy/libraries/{id}/"),
                None::<&()>,
            )
            .await?;
        Ok(res.url().to_string())
    }
}

pub(crate) const LIBRARIES_KEY: &str = "/libraries";
pub(crate) const VIDEOS_KEY: &str = "/videos";
pub(crate) const FAVORITES_KEY: &str = "/open-content/favorites";

pub(crate) fn helpful_links_key(sort_order: &str) -> String {
    format!(
        "/helpful-links?order_by={}&page=1&per_page=50",
        urlencoding::encode(sort_order)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_upsert_wire_format() {
        let op = SaveOpenContent::upsert_library(12, "Wikipedia", 3);
        let v = serde_json::to_value(&op).expect("should serialize");
        assert_eq!(
            v,
            serde_json::json!({
                "name": "Wikipedia",
                "content_url": "/api/proxy/libraries/12/",
                "open_content_provider_id": 3
            })
        );
    }

    #[test]
    fn test_save_remove_is_empty_name_on_the_wire() {
        let v = serde_json::to_value(SaveOpenContent::Remove).expect("should serialize");
        assert_eq!(v, serde_json::json!({ "name": "" }));
    }

    #[test]
    fn test_single_envelope_failure_becomes_backend_error() {
        let json = r#"{"success": false, "message": "library is hidden"}"#;
        let parsed: ServerResponseOne<Library> = serde_json::from_str(json).expect("parse");
        let err = parsed.into_result().expect_err("should fail");
        assert_eq!(err, ApiError::Backend("library is hidden".to_string()));
        assert_eq!(err.user_message(), "library is hidden");
    }

    #[test]
    fn test_single_envelope_success_with_data() {
        let json = r#"{"success": true, "message": "ok", "data": {"redirect_to": "https://idp/cb"}}"#;
        let parsed: ServerResponseOne<ConsentAcceptResponse> =
            serde_json::from_str(json).expect("parse");
        let data = parsed
            .into_result()
            .and_then(|r| r.require_data())
            .expect("data");
        assert_eq!(data.redirect_to, "https://idp/cb");
    }

    #[test]
    fn test_many_envelope_meta_and_default() {
        let v = serde_json::json!({
            "success": true,
            "message": "",
            "data": [{"id": 1, "name": "Math"}],
            "meta": {"total": 41, "per_page": 20, "page": 2, "current_page": 2, "last_page": 3}
        });
        let parsed = ServerResponseMany::<OpenContentCategory>::from_value(v).expect("parse");
        assert_eq!(parsed.data.len(), 1);
        assert_eq!(parsed.meta.last_page, 3);

        let parsed = ServerResponseMany::<OpenContentCategory>::from_value(serde_json::json!({
            "data": []
        }))
        .expect("parse");
        assert_eq!(parsed.meta, PaginationMeta::default());
    }

    #[test]
    fn test_many_envelope_reports_backend_failure() {
        let v = serde_json::json!({"success": false, "message": "nope", "data": null});
        let err = ServerResponseMany::<OpenContentCategory>::from_value(v).expect_err("fail");
        assert_eq!(err, ApiError::Backend("nope".to_string()));
    }

    #[test]
    fn test_error_for_status() {
        assert_eq!(
            ApiClient::error_for_status(StatusCode::UNAUTHORIZED, String::new()),
            ApiError::Unauthorized
        );
        assert_eq!(
            ApiClient::error_for_status(StatusCode::NOT_FOUND, String::new()),
            ApiError::NotFound
        );
        assert_eq!(
            ApiClient::error_for_status(
                StatusCode::BAD_REQUEST,
                r#"{"success":false,"message":"bad id"}"#.to_string()
            ),
            ApiError::Backend("bad id".to_string())
        );
        assert_eq!(
            ApiClient::error_for_status(StatusCode::BAD_GATEWAY, "upstream".to_string()),
            ApiError::Http {
                status: 502,
                body: "upstream".to_string()
            }
        );
    }

    #[test]
    fn test_transport_errors_use_generic_message() {
        let e = ApiError::Network("connection refused".to_string());
        assert_eq!(e.user_message(), "Something went wrong. Please try again.");
        let e = ApiError::Backend(String::new());
        assert_eq!(e.user_message(), "Something went wrong. Please try again.");
    }

    #[test]
    fn test_api_client_url_join() {
        let c = ApiClient::new("/api/");
        assert_eq!(c.base_url, "/api");
        assert_eq!(c.url("/libraries?page=1"), "/api/libraries?page=1");
        assert_eq!(c.url("consent/accept"), "/api/consent/accept");
    }

    #[test]
    fn test_helpful_links_key_encodes_sort() {
        assert_eq!(
            helpful_links_key("created_at DESC"),
            "/helpful-links?order_by=created_at%20DESC&page=1&per_page=50"
        );
    }
}
