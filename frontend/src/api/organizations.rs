use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde_json::json;

use super::client::{platform_url, ApiClient};
use super::types::{
    ApiError, CreateOrganizationRequest, CreatePlanRequest, Invoice, Organization, Subscription,
    SubscriptionPlan, UpdateOrganizationRequest, UpdateSubscriptionRequest,
};

/// Super-admin tenant domain. All endpoints live under `/platform/...` and
/// answer with the `{ "data": [...] }` envelope for lists.
impl ApiClient {
    /// `GET /platform/organizations?search`.
    pub async fn list_organizations(
        &self,
        search: Option<&str>,
    ) -> Result<Vec<Organization>, ApiError> {
        let base_url = self.resolved_base_url().await;
        let mut url = platform_url(&base_url, "organizations");
        if let Some(search) = search {
            if !search.is_empty() {
                url.push_str(&format!(
                    "?search={}",
                    utf8_percent_encode(search, NON_ALPHANUMERIC)
                ));
            }
        }
        let response = self
            .send_with_refresh(|| {
                let headers = self.get_auth_headers()?;
                Ok(self.http_client().get(&url).headers(headers))
            })
            .await?;
        self.read_list(response, "data").await
    }

    /// `POST /platform/organizations`.
    pub async fn create_organization(
        &self,
        payload: &CreateOrganizationRequest,
    ) -> Result<Organization, ApiError> {
        let base_url = self.resolved_base_url().await;
        let url = platform_url(&base_url, "organizations");
        let response = self
            .send_with_refresh(|| {
                let headers = self.get_auth_headers()?;
                Ok(self.http_client().post(&url).headers(headers).json(payload))
            })
            .await?;
        self.read_json(response).await
    }

    /// `PUT /platform/organizations/{id}`.
    pub async fn update_organization(
        &self,
        id: &str,
        payload: &UpdateOrganizationRequest,
    ) -> Result<Organization, ApiError> {
        let base_url = self.resolved_base_url().await;
        let url = platform_url(&base_url, &format!("organizations/{id}"));
        let response = self
            .send_with_refresh(|| {
                let headers = self.get_auth_headers()?;
                Ok(self.http_client().put(&url).headers(headers).json(payload))
            })
            .await?;
        self.read_json(response).await
    }

    /// `PUT /platform/organizations/{id}/status`.
    pub async fn update_organization_status(
        &self,
        id: &str,
        status: &str,
    ) -> Result<Organization, ApiError> {
        let base_url = self.resolved_base_url().await;
        let url = platform_url(&base_url, &format!("organizations/{id}/status"));
        let response = self
            .send_with_refresh(|| {
                let headers = self.get_auth_headers()?;
                Ok(self
                    .http_client()
                    .put(&url)
                    .headers(headers)
                    .json(&json!({ "status": status })))
            })
            .await?;
        self.read_json(response).await
    }

    /// `DELETE /platform/organizations/{id}`.
    pub async fn delete_organization(&self, id: &str) -> Result<(), ApiError> {
        let base_url = self.resolved_base_url().await;
        let url = platform_url(&base_url, &format!("organizations/{id}"));
        let response = self
            .send_with_refresh(|| {
                let headers = self.get_auth_headers()?;
                Ok(self.http_client().delete(&url).headers(headers))
            })
            .await?;
        self.read_unit(response).await
    }

    /// `GET /platform/plans`.
    pub async fn list_plans(&self) -> Result<Vec<SubscriptionPlan>, ApiError> {
        let base_url = self.resolved_base_url().await;
        let url = platform_url(&base_url, "plans");
        let response = self
            .send_with_refresh(|| {
                let headers = self.get_auth_headers()?;
                Ok(self.http_client().get(&url).headers(headers))
            })
            .await?;
        self.read_list(response, "data").await
    }

    /// `POST /platform/plans`.
    pub async fn create_plan(&self, payload: &CreatePlanRequest) -> Result<SubscriptionPlan, ApiError> {
        let base_url = self.resolved_base_url().await;
        let url = platform_url(&base_url, "plans");
        let response = self
            .send_with_refresh(|| {
                let headers = self.get_auth_headers()?;
                Ok(self.http_client().post(&url).headers(headers).json(payload))
            })
            .await?;
        self.read_json(response).await
    }

    /// `DELETE /platform/plans/{id}`.
    pub async fn delete_plan(&self, id: &str) -> Result<(), ApiError> {
        let base_url = self.resolved_base_url().await;
        let url = platform_url(&base_url, &format!("plans/{id}"));
        let response = self
            .send_with_refresh(|| {
                let headers = self.get_auth_headers()?;
                Ok(self.http_client().delete(&url).headers(headers))
            })
            .await?;
        self.read_unit(response).await
    }

    /// `GET /platform/subscriptions`.
    pub async fn list_subscriptions(&self) -> Result<Vec<Subscription>, ApiError> {
        let base_url = self.resolved_base_url().await;
        let url = platform_url(&base_url, "subscriptions");
        let response = self
            .send_with_refresh(|| {
                let headers = self.get_auth_headers()?;
                Ok(self.http_client().get(&url).headers(headers))
            })
            .await?;
        self.read_list(response, "data").await
    }

    /// `PUT /platform/subscriptions/{id}`; change plan, cycle, or status.
    pub async fn update_subscription(
        &self,
        id: &str,
        payload: &UpdateSubscriptionRequest,
    ) -> Result<Subscription, ApiError> {
        let base_url = self.resolved_base_url().await;
        let url = platform_url(&base_url, &format!("subscriptions/{id}"));
        let response = self
            .send_with_refresh(|| {
                let headers = self.get_auth_headers()?;
                Ok(self.http_client().put(&url).headers(headers).json(payload))
            })
            .await?;
        self.read_json(response).await
    }

    /// `GET /platform/invoices?status`.
    pub async fn list_invoices(&self, status: Option<&str>) -> Result<Vec<Invoice>, ApiError> {
        let base_url = self.resolved_base_url().await;
        let mut url = platform_url(&base_url, "invoices");
        if let Some(status) = status {
            url.push_str(&format!("?status={status}"));
        }
        let response = self
            .send_with_refresh(|| {
                let headers = self.get_auth_headers()?;
                Ok(self.http_client().get(&url).headers(headers))
            })
            .await?;
        self.read_list(response, "data").await
    }

    /// `GET /platform/invoices/{id}/download`; raw PDF bytes, opened via an
    /// object URL by the page.
    pub async fn download_invoice(&self, id: &str) -> Result<Vec<u8>, ApiError> {
        let base_url = self.resolved_base_url().await;
        let url = platform_url(&base_url, &format!("invoices/{id}/download"));
        let response = self
            .send_with_refresh(|| {
                let headers = self.get_auth_headers()?;
                Ok(self.http_client().get(&url).headers(headers))
            })
            .await?;
        self.read_bytes(response).await
    }
}
