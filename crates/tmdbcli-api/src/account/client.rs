//! `AccountClient` - TMDB account API client implementation.

use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::instrument;
use url::Url;

use super::api::LocalAccountApi;
use super::error::AccountError;
use super::params::PageParams;
use super::types::{
    AccountDetails, AccountList, ErrorBody, ListedMedia, MediaKind, MediaPage, Page, RatedEpisode,
    RatedMedia, StatusResponse,
};

/// Default base URL for TMDB API v3.
const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3/";

/// Account ID placeholder resolved by TMDB from the bearer token.
const DEFAULT_ACCOUNT_ID: &str = "null";

/// Hard ceiling for a single request, connect to last body byte.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// TMDB account API client.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct AccountClient {
    /// HTTP client.
    http_client: Client,
    /// Base URL for API requests (always ends with `/`).
    base_url: Url,
    /// Bearer API token.
    api_token: String,
    /// Account ID used in every endpoint path.
    account_id: String,
}

/// Builder for `AccountClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct AccountClientBuilder {
    base_url: Option<Url>,
    api_token: Option<String>,
    user_agent: Option<String>,
    account_id: Option<String>,
}

/// Body of `POST account/{account_id}/favorite`.
#[derive(Debug, Serialize)]
struct FavoriteBody {
    media_type: MediaKind,
    media_id: u64,
    favorite: bool,
}

/// Body of `POST account/{account_id}/watchlist`.
#[derive(Debug, Serialize)]
struct WatchlistBody {
    media_type: MediaKind,
    media_id: u64,
    watchlist: bool,
}

impl AccountClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            api_token: None,
            user_agent: None,
            account_id: None,
        }
    }

    /// Overrides the base URL (`--api-root`, wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the API bearer token (required).
    #[must_use]
    pub fn api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    /// Sets the User-Agent (required).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Sets the account ID (default: `null`).
    #[must_use]
    pub fn account_id(mut self, id: impl Into<String>) -> Self {
        self.account_id = Some(id.into());
        self
    }

    /// Builds the client.
    ///
    /// Logs a warning when the base URL is plain HTTP.
    ///
    /// # Errors
    ///
    /// - `api_token` is not set.
    /// - `user_agent` is not set.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<AccountClient, AccountError> {
        let api_token = self
            .api_token
            .ok_or_else(|| AccountError::Build(String::from("api_token is required")))?;
        let user_agent = self
            .user_agent
            .ok_or_else(|| AccountError::Build(String::from("user_agent is required")))?;

        let base_url = if let Some(url) = self.base_url {
            url
        } else {
            Url::parse(DEFAULT_BASE_URL)
                .map_err(|e| AccountError::Build(format!("invalid default base URL: {e}")))?
        };
        let base_url = with_trailing_slash(base_url);

        if base_url.scheme() == "http" {
            tracing::warn!(
                url = %base_url,
                "API root is plain HTTP, the bearer token will be sent unencrypted"
            );
        }

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .gzip(true)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AccountError::Build(format!("failed to build HTTP client: {e}")))?;

        Ok(AccountClient {
            http_client,
            base_url,
            api_token,
            account_id: self
                .account_id
                .unwrap_or_else(|| String::from(DEFAULT_ACCOUNT_ID)),
        })
    }
}

/// Appends `/` to the URL path so that `Url::join` keeps the last segment.
fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

/// Extracts TMDB's `status_message` from an error body, falling back to the raw text.
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .map_or_else(|_| String::from(body.trim()), |e| e.status_message)
}

/// Decodes a JSON body, tagging failures with the endpoint path.
fn decode<T: DeserializeOwned>(path: &str, body: &str) -> Result<T, AccountError> {
    serde_json::from_str(body).map_err(|source| AccountError::Decode {
        path: String::from(path),
        source,
    })
}

/// Expected status of a favorite/watchlist write: 201 when adding, 200 when removing.
const fn write_status(enabled: bool) -> StatusCode {
    if enabled {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    }
}

impl AccountClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> AccountClientBuilder {
        AccountClientBuilder::new()
    }

    /// Returns `account/{account_id}` or `account/{account_id}/{resource}`.
    fn account_path(&self, resource: &str) -> String {
        if resource.is_empty() {
            format!("account/{}", self.account_id)
        } else {
            format!("account/{}/{resource}", self.account_id)
        }
    }

    /// Sends a request with Bearer auth and returns the body when the status
    /// equals `expected`.
    ///
    /// A 404 maps to `NotFound`, any other mismatch to `InvalidResponse`.
    #[instrument(skip_all)]
    async fn send_request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&B>,
        expected: StatusCode,
    ) -> Result<String, AccountError> {
        let url = self
            .base_url
            .join(path)
            .map_err(|source| AccountError::InvalidUrl {
                path: String::from(path),
                source,
            })?;

        let mut builder = self
            .http_client
            .request(method, url)
            .bearer_auth(&self.api_token)
            .header(ACCEPT, "application/json");
        if !query.is_empty() {
            builder = builder.query(query);
        }
        if let Some(body) = body {
            let payload = serde_json::to_vec(body).map_err(AccountError::Encode)?;
            builder = builder
                .header(CONTENT_TYPE, "application/json")
                .body(payload);
        }
        let request = builder
            .build()
            .map_err(|e| AccountError::Build(format!("failed to build request {path}: {e}")))?;

        tracing::debug!(method = %request.method(), url = %request.url(), "TMDB API request");

        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(AccountError::Connection)?;
        let status = response.status();
        tracing::debug!(%status, expected = %expected, "TMDB API response");

        let text = response.text().await.map_err(AccountError::Connection)?;
        if status != expected {
            let message = error_message(&text);
            if status == StatusCode::NOT_FOUND {
                return Err(AccountError::NotFound { message });
            }
            return Err(AccountError::InvalidResponse { status, message });
        }

        Ok(text)
    }

    /// Sends a GET request expecting 200 and decodes the JSON body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, AccountError> {
        let text = self
            .send_request::<()>(Method::GET, path, query, None, StatusCode::OK)
            .await?;
        decode(path, &text)
    }

    /// Sends a JSON POST request expecting `expected` and decodes the JSON body.
    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        expected: StatusCode,
    ) -> Result<T, AccountError> {
        let text = self
            .send_request(Method::POST, path, &[], Some(body), expected)
            .await?;
        decode(path, &text)
    }

    /// Fetches `{resource}/{movies,tv}` and decodes it into the matching variant.
    async fn get_media_page<M: DeserializeOwned, T: DeserializeOwned>(
        &self,
        resource: &str,
        kind: MediaKind,
        params: &PageParams,
    ) -> Result<MediaPage<M, T>, AccountError> {
        let path = self.account_path(&format!("{resource}/{}", kind.path_segment()));
        let query = params.to_query();
        let page = match kind {
            MediaKind::Movie => MediaPage::Movies(self.get_json(&path, &query).await?),
            MediaKind::Tv => MediaPage::Tv(self.get_json(&path, &query).await?),
        };
        Ok(page)
    }
}

impl LocalAccountApi for AccountClient {
    #[instrument(skip_all)]
    async fn details(&self) -> Result<AccountDetails, AccountError> {
        self.get_json(&self.account_path(""), &[]).await
    }

    #[instrument(skip_all)]
    async fn lists(&self, page: u32) -> Result<Page<AccountList>, AccountError> {
        let query = [("page", page.to_string())];
        self.get_json(&self.account_path("lists"), &query).await
    }

    #[instrument(skip_all)]
    async fn add_favorite(
        &self,
        kind: MediaKind,
        media_id: u64,
        favorite: bool,
    ) -> Result<StatusResponse, AccountError> {
        let body = FavoriteBody {
            media_type: kind,
            media_id,
            favorite,
        };
        self.post_json(
            &self.account_path("favorite"),
            &body,
            write_status(favorite),
        )
        .await
    }

    #[instrument(skip_all)]
    async fn favorites(
        &self,
        kind: MediaKind,
        params: &PageParams,
    ) -> Result<ListedMedia, AccountError> {
        self.get_media_page("favorite", kind, params).await
    }

    #[instrument(skip_all)]
    async fn add_to_watchlist(
        &self,
        kind: MediaKind,
        media_id: u64,
        watchlist: bool,
    ) -> Result<StatusResponse, AccountError> {
        let body = WatchlistBody {
            media_type: kind,
            media_id,
            watchlist,
        };
        self.post_json(
            &self.account_path("watchlist"),
            &body,
            write_status(watchlist),
        )
        .await
    }

    #[instrument(skip_all)]
    async fn watchlist(
        &self,
        kind: MediaKind,
        params: &PageParams,
    ) -> Result<ListedMedia, AccountError> {
        self.get_media_page("watchlist", kind, params).await
    }

    #[instrument(skip_all)]
    async fn rated(
        &self,
        kind: MediaKind,
        params: &PageParams,
    ) -> Result<RatedMedia, AccountError> {
        self.get_media_page("rated", kind, params).await
    }

    #[instrument(skip_all)]
    async fn rated_episodes(
        &self,
        params: &PageParams,
    ) -> Result<Page<RatedEpisode>, AccountError> {
        let query = params.to_query();
        self.get_json(&self.account_path("rated/tv/episodes"), &query)
            .await
    }
}
