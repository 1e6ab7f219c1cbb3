use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde_json::json;

use super::client::{company_url, ApiClient};
use super::types::{
    ApiError, CreateEmployeeRequest, Employee, EmployeeListQuery, Role, UpdateEmployeeRequest,
};

impl ApiClient {
    /// `GET /company/{role}/employees`; envelope `{ "data": [...] }`.
    pub async fn list_employees(
        &self,
        role: Role,
        query: &EmployeeListQuery,
    ) -> Result<Vec<Employee>, ApiError> {
        let base_url = self.resolved_base_url().await;
        let mut url = company_url(&base_url, role, "employees");
        let mut query_params = Vec::new();

        if let Some(search) = &query.search {
            if !search.is_empty() {
                query_params.push(format!(
                    "search={}",
                    utf8_percent_encode(search, NON_ALPHANUMERIC)
                ));
            }
        }
        if let Some(status) = &query.status {
            query_params.push(format!("status={status}"));
        }
        if let Some(department) = &query.department {
            query_params.push(format!(
                "department={}",
                utf8_percent_encode(department, NON_ALPHANUMERIC)
            ));
        }
        if let Some(limit) = query.limit {
            query_params.push(format!("limit={limit}"));
        }

        if !query_params.is_empty() {
            url.push('?');
            url.push_str(&query_params.join("&"));
        }

        let response = self
            .send_with_refresh(|| {
                let headers = self.get_auth_headers()?;
                Ok(self.http_client().get(&url).headers(headers))
            })
            .await?;
        self.read_list(response, "data").await
    }

    /// `GET /company/{role}/employees/{id}`.
    pub async fn get_employee(&self, role: Role, id: &str) -> Result<Employee, ApiError> {
        let base_url = self.resolved_base_url().await;
        let url = company_url(&base_url, role, &format!("employees/{id}"));
        let response = self
            .send_with_refresh(|| {
                let headers = self.get_auth_headers()?;
                Ok(self.http_client().get(&url).headers(headers))
            })
            .await?;
        self.read_json(response).await
    }

    /// `POST /company/{role}/employees`. A 409 means the email is already
    /// taken; the page maps that onto a specific message.
    pub async fn create_employee(
        &self,
        role: Role,
        payload: &CreateEmployeeRequest,
    ) -> Result<Employee, ApiError> {
        let base_url = self.resolved_base_url().await;
        let url = company_url(&base_url, role, "employees");
        let response = self
            .send_with_refresh(|| {
                let headers = self.get_auth_headers()?;
                Ok(self.http_client().post(&url).headers(headers).json(payload))
            })
            .await?;
        self.read_json(response).await
    }

    /// `PUT /company/{role}/employees/{id}`.
    pub async fn update_employee(
        &self,
        role: Role,
        id: &str,
        payload: &UpdateEmployeeRequest,
    ) -> Result<Employee, ApiError> {
        let base_url = self.resolved_base_url().await;
        let url = company_url(&base_url, role, &format!("employees/{id}"));
        let response = self
            .send_with_refresh(|| {
                let headers = self.get_auth_headers()?;
                Ok(self.http_client().put(&url).headers(headers).json(payload))
            })
            .await?;
        self.read_json(response).await
    }

    /// `PUT /company/{role}/employees/{id}/status`.
    pub async fn update_employee_status(
        &self,
        role: Role,
        id: &str,
        status: &str,
    ) -> Result<Employee, ApiError> {
        let base_url = self.resolved_base_url().await;
        let url = company_url(&base_url, role, &format!("employees/{id}/status"));
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

    /// `DELETE /company/{role}/employees/{id}`.
    pub async fn delete_employee(&self, role: Role, id: &str) -> Result<(), ApiError> {
        let base_url = self.resolved_base_url().await;
        let url = company_url(&base_url, role, &format!("employees/{id}"));
        let response = self
            .send_with_refresh(|| {
                let headers = self.get_auth_headers()?;
                Ok(self.http_client().delete(&url).headers(headers))
            })
            .await?;
        self.read_unit(response).await
    }
}
