use serde_json::json;

use super::client::ApiClient;
use super::types::{ApiError, CurrentUser, LoginRequest, LoginResponse};

impl ApiClient {
    /// `POST /auth/login`. On success the session tokens and profile are
    /// stored for every subsequent request.
    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .http_client()
            .post(format!("{base_url}/auth/login"))
            .json(&request)
            .send()
            .await
            .map_err(|e| ApiError::request_failed(format!("Request failed: {e}")))?;

        let status = response.status();
        if status.is_success() {
            let login: LoginResponse = response
                .json()
                .await
                .map_err(|e| ApiError::unknown(format!("Failed to parse response: {e}")))?;
            self.store_session(&login);
            Ok(login)
        } else {
            Err(Self::error_from_response(status, response).await)
        }
    }

    /// `POST /auth/refresh`. Called by `send_with_refresh`; a failure here
    /// means the session is gone.
    pub(crate) async fn refresh_session(&self) -> Result<LoginResponse, ApiError> {
        let refresh_token = self
            .refresh_token_value()
            .ok_or_else(|| ApiError::unauthorized("No active session"))?;
        let base_url = self.resolved_base_url().await;
        let response = self
            .http_client()
            .post(format!("{base_url}/auth/refresh"))
            .json(&json!({ "refresh_token": refresh_token }))
            .send()
            .await
            .map_err(|e| ApiError::request_failed(format!("Request failed: {e}")))?;

        let status = response.status();
        if status.is_success() {
            let login: LoginResponse = response
                .json()
                .await
                .map_err(|e| ApiError::unknown(format!("Failed to parse response: {e}")))?;
            self.store_session(&login);
            Ok(login)
        } else {
            Err(Self::error_from_response(status, response).await)
        }
    }

    /// `POST /auth/logout`. The local session is dropped whether or not the
    /// server call succeeds.
    pub async fn logout(&self) -> Result<(), ApiError> {
        let base_url = self.resolved_base_url().await;
        let body = match self.refresh_token_value() {
            Some(refresh_token) => json!({ "refresh_token": refresh_token }),
            None => json!({}),
        };
        let response = self
            .send_with_refresh(|| {
                let headers = self.get_auth_headers()?;
                Ok(self
                    .http_client()
                    .post(format!("{base_url}/auth/logout"))
                    .headers(headers)
                    .json(&body))
            })
            .await;
        self.clear_session();
        self.read_unit(response?).await
    }

    /// `GET /auth/me`; session bootstrap on app start.
    pub async fn get_me(&self) -> Result<CurrentUser, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send_with_refresh(|| {
                let headers = self.get_auth_headers()?;
                Ok(self
                    .http_client()
                    .get(format!("{base_url}/auth/me"))
                    .headers(headers))
            })
            .await?;
        self.read_json(response).await
    }
}
