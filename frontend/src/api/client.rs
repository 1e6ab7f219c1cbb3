use std::sync::{Arc, Mutex};

use reqwest::header::{HeaderMap, AUTHORIZATION};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::api::types::{list_from_envelope, ApiError, LoginResponse, Role};
use crate::config;

pub(crate) const ACCESS_TOKEN_KEY: &str = "access_token";
pub(crate) const REFRESH_TOKEN_KEY: &str = "refresh_token";
pub(crate) const CURRENT_USER_KEY: &str = "current_user";

#[derive(Debug, Clone)]
pub(crate) struct SessionTokens {
    pub access_token: String,
    pub refresh_token: String,
}

/// The one configured HTTP client every page goes through. Attaches the
/// bearer token, resolves the base URL from runtime config (or a per-client
/// override, which is how tests point at a mock server), retries exactly once
/// after a token refresh on 401, and tears the session down when that fails.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Option<String>,
    tokens: Arc<Mutex<Option<SessionTokens>>>,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

/// `{base}/company/{role}/{rest}`; the only way company-scoped URLs are
/// built, so a page can never reach outside its role prefix.
pub(crate) fn company_url(base_url: &str, role: Role, rest: &str) -> String {
    format!("{}/company/{}/{}", base_url, role.path_segment(), rest)
}

/// `{base}/platform/{rest}`; the super-admin tenant domain.
pub(crate) fn platform_url(base_url: &str, rest: &str) -> String {
    format!("{base_url}/platform/{rest}")
}

impl ApiClient {
    pub fn new() -> Self {
        let client = Self {
            client: Client::new(),
            base_url: None,
            tokens: Arc::new(Mutex::new(None)),
        };
        client.restore_session();
        client
    }

    pub fn new_with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: Some(base_url.into()),
            tokens: Arc::new(Mutex::new(None)),
        }
    }

    /// Seeds the in-memory session; host tests use this instead of the
    /// login flow.
    pub fn with_session_tokens(self, access_token: &str, refresh_token: &str) -> Self {
        self.set_tokens(Some(SessionTokens {
            access_token: access_token.to_string(),
            refresh_token: refresh_token.to_string(),
        }));
        self
    }

    pub(crate) fn http_client(&self) -> &Client {
        &self.client
    }

    pub(crate) async fn resolved_base_url(&self) -> String {
        if let Some(base) = &self.base_url {
            base.clone()
        } else {
            config::await_api_base_url().await
        }
    }

    pub fn has_session(&self) -> bool {
        self.tokens
            .lock()
            .map(|guard| guard.is_some())
            .unwrap_or(false)
    }

    fn set_tokens(&self, tokens: Option<SessionTokens>) {
        if let Ok(mut guard) = self.tokens.lock() {
            *guard = tokens;
        }
    }

    fn access_token(&self) -> Option<String> {
        self.tokens
            .lock()
            .ok()
            .and_then(|guard| guard.as_ref().map(|t| t.access_token.clone()))
    }

    pub(crate) fn refresh_token_value(&self) -> Option<String> {
        self.tokens
            .lock()
            .ok()
            .and_then(|guard| guard.as_ref().map(|t| t.refresh_token.clone()))
    }

    pub(crate) fn get_auth_headers(&self) -> Result<HeaderMap, ApiError> {
        let token = self
            .access_token()
            .ok_or_else(|| ApiError::unauthorized("Not signed in"))?;
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            format!("Bearer {token}")
                .parse()
                .map_err(|_| ApiError::unknown("Invalid token format"))?,
        );
        Ok(headers)
    }

    pub(crate) fn store_session(&self, response: &LoginResponse) {
        self.set_tokens(Some(SessionTokens {
            access_token: response.access_token.clone(),
            refresh_token: response.refresh_token.clone(),
        }));
        #[cfg(target_arch = "wasm32")]
        persist_session_to_storage(response);
    }

    pub(crate) fn clear_session(&self) {
        self.set_tokens(None);
        #[cfg(target_arch = "wasm32")]
        clear_session_storage();
    }

    fn restore_session(&self) {
        #[cfg(target_arch = "wasm32")]
        if let Ok(storage) = crate::utils::storage::local_storage() {
            let access = storage.get_item(ACCESS_TOKEN_KEY).ok().flatten();
            let refresh = storage.get_item(REFRESH_TOKEN_KEY).ok().flatten();
            if let (Some(access_token), Some(refresh_token)) = (access, refresh) {
                self.set_tokens(Some(SessionTokens {
                    access_token,
                    refresh_token,
                }));
            }
        }
    }

    pub(crate) fn handle_unauthorized_status(&self, status: StatusCode) {
        if status == StatusCode::UNAUTHORIZED {
            self.clear_session();
            redirect_to_login_if_needed();
        }
    }

    /// Sends the request built by `build`; on 401, refreshes the session once
    /// and resends. A second 401 (or a failed refresh) falls through to the
    /// caller's status handling.
    pub(crate) async fn send_with_refresh<F>(&self, build: F) -> Result<Response, ApiError>
    where
        F: Fn() -> Result<reqwest::RequestBuilder, ApiError>,
    {
        let response = build()?
            .send()
            .await
            .map_err(|e| ApiError::request_failed(format!("Request failed: {e}")))?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }
        if self.refresh_session().await.is_err() {
            return Ok(response);
        }
        build()?
            .send()
            .await
            .map_err(|e| ApiError::request_failed(format!("Request failed: {e}")))
    }

    pub(crate) async fn read_json<T: DeserializeOwned>(
        &self,
        response: Response,
    ) -> Result<T, ApiError> {
        let status = response.status();
        self.handle_unauthorized_status(status);
        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| ApiError::unknown(format!("Failed to parse response: {e}")))
        } else {
            Err(Self::error_from_response(status, response).await)
        }
    }

    pub(crate) async fn read_list<T: DeserializeOwned>(
        &self,
        response: Response,
        envelope_key: &str,
    ) -> Result<Vec<T>, ApiError> {
        let value: Value = self.read_json(response).await?;
        list_from_envelope(value, envelope_key)
    }

    pub(crate) async fn read_unit(&self, response: Response) -> Result<(), ApiError> {
        let status = response.status();
        self.handle_unauthorized_status(status);
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::error_from_response(status, response).await)
        }
    }

    pub(crate) async fn read_bytes(&self, response: Response) -> Result<Vec<u8>, ApiError> {
        let status = response.status();
        self.handle_unauthorized_status(status);
        if status.is_success() {
            response
                .bytes()
                .await
                .map(|b| b.to_vec())
                .map_err(|e| ApiError::unknown(format!("Failed to read response body: {e}")))
        } else {
            Err(Self::error_from_response(status, response).await)
        }
    }

    pub(crate) async fn error_from_response(status: StatusCode, response: Response) -> ApiError {
        match response.json::<ApiError>().await {
            Ok(mut err) => {
                if err.code.is_empty() {
                    err.code = ApiError::code_for_status(status.as_u16());
                }
                err
            }
            Err(_) => ApiError::from_status(status.as_u16()),
        }
    }
}

fn redirect_to_login_if_needed() {
    #[cfg(target_arch = "wasm32")]
    if let Some(window) = web_sys::window() {
        let location = window.location();
        if let Ok(pathname) = location.pathname() {
            if pathname == "/login" {
                return;
            }
        }
        let _ = location.set_href("/login");
    }
}

#[cfg(target_arch = "wasm32")]
fn persist_session_to_storage(response: &LoginResponse) {
    if let Ok(storage) = crate::utils::storage::local_storage() {
        let _ = storage.set_item(ACCESS_TOKEN_KEY, &response.access_token);
        let _ = storage.set_item(REFRESH_TOKEN_KEY, &response.refresh_token);
        if let Ok(user_json) = serde_json::to_string(&response.user) {
            let _ = storage.set_item(CURRENT_USER_KEY, &user_json);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn clear_session_storage() {
    if let Ok(storage) = crate::utils::storage::local_storage() {
        let _ = storage.remove_item(ACCESS_TOKEN_KEY);
        let _ = storage.remove_item(REFRESH_TOKEN_KEY);
        let _ = storage.remove_item(CURRENT_USER_KEY);
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn company_urls_embed_the_role_segment() {
        let base = "http://api.test/api/v1";
        assert_eq!(
            company_url(base, Role::Manager, "attendance"),
            "http://api.test/api/v1/company/manager/attendance"
        );
        assert_eq!(
            company_url(base, Role::Hr, "leaves/lv-1/approve"),
            "http://api.test/api/v1/company/hr/leaves/lv-1/approve"
        );
    }

    #[test]
    fn platform_urls_use_the_dedicated_prefix() {
        assert_eq!(
            platform_url("http://api.test/api/v1", "invoices/inv-1/download"),
            "http://api.test/api/v1/platform/invoices/inv-1/download"
        );
    }

    #[test]
    fn auth_headers_require_a_session() {
        let client = ApiClient::new_with_base_url("http://api.test");
        assert!(client.get_auth_headers().is_err());

        let client = client.with_session_tokens("token-1", "refresh-1");
        let headers = client.get_auth_headers().unwrap();
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer token-1");
    }

    #[test]
    fn clear_session_drops_tokens() {
        let client =
            ApiClient::new_with_base_url("http://api.test").with_session_tokens("a", "r");
        assert!(client.has_session());
        client.clear_session();
        assert!(!client.has_session());
    }
}
