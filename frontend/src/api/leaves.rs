use super::client::{company_url, ApiClient};
use super::types::{ApiError, CreateLeavePayload, LeaveRequest, RejectLeavePayload, Role};

impl ApiClient {
    /// `GET /company/employee/leaves`; bare array, no envelope.
    pub async fn my_leaves(&self) -> Result<Vec<LeaveRequest>, ApiError> {
        let base_url = self.resolved_base_url().await;
        let url = company_url(&base_url, Role::Employee, "leaves");
        let response = self
            .send_with_refresh(|| {
                let headers = self.get_auth_headers()?;
                Ok(self.http_client().get(&url).headers(headers))
            })
            .await?;
        self.read_json(response).await
    }

    /// `POST /company/employee/leaves`.
    pub async fn create_leave(&self, payload: &CreateLeavePayload) -> Result<LeaveRequest, ApiError> {
        let base_url = self.resolved_base_url().await;
        let url = company_url(&base_url, Role::Employee, "leaves");
        let response = self
            .send_with_refresh(|| {
                let headers = self.get_auth_headers()?;
                Ok(self.http_client().post(&url).headers(headers).json(payload))
            })
            .await?;
        self.read_json(response).await
    }

    /// `DELETE /company/employee/leaves/{id}`; cancel an own pending
    /// request.
    pub async fn cancel_leave(&self, id: &str) -> Result<(), ApiError> {
        let base_url = self.resolved_base_url().await;
        let url = company_url(&base_url, Role::Employee, &format!("leaves/{id}"));
        let response = self
            .send_with_refresh(|| {
                let headers = self.get_auth_headers()?;
                Ok(self.http_client().delete(&url).headers(headers))
            })
            .await?;
        self.read_unit(response).await
    }

    /// `GET /company/{role}/leaves?status`; bare array, no envelope.
    pub async fn leaves(
        &self,
        role: Role,
        status: Option<&str>,
    ) -> Result<Vec<LeaveRequest>, ApiError> {
        let base_url = self.resolved_base_url().await;
        let mut url = company_url(&base_url, role, "leaves");
        if let Some(status) = status {
            url.push_str(&format!("?status={status}"));
        }
        let response = self
            .send_with_refresh(|| {
                let headers = self.get_auth_headers()?;
                Ok(self.http_client().get(&url).headers(headers))
            })
            .await?;
        self.read_json(response).await
    }

    /// `PUT /company/{role}/leaves/{id}/approve`. The client never checks
    /// transition legality; the backend is authoritative.
    pub async fn approve_leave(&self, role: Role, id: &str) -> Result<LeaveRequest, ApiError> {
        let base_url = self.resolved_base_url().await;
        let url = company_url(&base_url, role, &format!("leaves/{id}/approve"));
        let response = self
            .send_with_refresh(|| {
                let headers = self.get_auth_headers()?;
                Ok(self.http_client().put(&url).headers(headers))
            })
            .await?;
        self.read_json(response).await
    }

    /// `PUT /company/{role}/leaves/{id}/reject`.
    pub async fn reject_leave(
        &self,
        role: Role,
        id: &str,
        rejection_reason: &str,
    ) -> Result<LeaveRequest, ApiError> {
        let base_url = self.resolved_base_url().await;
        let url = company_url(&base_url, role, &format!("leaves/{id}/reject"));
        let payload = RejectLeavePayload {
            rejection_reason: rejection_reason.to_string(),
        };
        let response = self
            .send_with_refresh(|| {
                let headers = self.get_auth_headers()?;
                Ok(self
                    .http_client()
                    .put(&url)
                    .headers(headers)
                    .json(&payload))
            })
            .await?;
        self.read_json(response).await
    }
}
