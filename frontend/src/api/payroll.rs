use super::client::{company_url, ApiClient};
use super::types::{ApiError, GeneratePayslipPayload, Payslip, Role};

impl ApiClient {
    /// `GET /company/{role}/payslips?month&year`; envelope
    /// `{ "payslips": [...] }`.
    pub async fn payslips(
        &self,
        role: Role,
        month: Option<u32>,
        year: Option<i32>,
    ) -> Result<Vec<Payslip>, ApiError> {
        let base_url = self.resolved_base_url().await;
        let mut url = company_url(&base_url, role, "payslips");
        let mut query_params = Vec::new();

        if let Some(month) = month {
            query_params.push(format!("month={month}"));
        }
        if let Some(year) = year {
            query_params.push(format!("year={year}"));
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
        self.read_list(response, "payslips").await
    }

    /// `GET /company/employee/payslips?year`; envelope
    /// `{ "payslips": [...] }`.
    pub async fn my_payslips(&self, year: Option<i32>) -> Result<Vec<Payslip>, ApiError> {
        self.payslips(Role::Employee, None, year).await
    }

    /// `GET /company/{role}/payslips/{id}`; full record with the
    /// earning/deduction breakdown.
    pub async fn get_payslip(&self, role: Role, id: &str) -> Result<Payslip, ApiError> {
        let base_url = self.resolved_base_url().await;
        let url = company_url(&base_url, role, &format!("payslips/{id}"));
        let response = self
            .send_with_refresh(|| {
                let headers = self.get_auth_headers()?;
                Ok(self.http_client().get(&url).headers(headers))
            })
            .await?;
        self.read_json(response).await
    }

    /// `POST /company/admin/payslips/generate`; the backend computes the
    /// payslip; the client only names employee and period.
    pub async fn generate_payslip(
        &self,
        payload: &GeneratePayslipPayload,
    ) -> Result<Payslip, ApiError> {
        let base_url = self.resolved_base_url().await;
        let url = company_url(&base_url, Role::Admin, "payslips/generate");
        let response = self
            .send_with_refresh(|| {
                let headers = self.get_auth_headers()?;
                Ok(self.http_client().post(&url).headers(headers).json(payload))
            })
            .await?;
        self.read_json(response).await
    }

    /// `DELETE /company/admin/payslips/{id}`.
    pub async fn delete_payslip(&self, id: &str) -> Result<(), ApiError> {
        let base_url = self.resolved_base_url().await;
        let url = company_url(&base_url, Role::Admin, &format!("payslips/{id}"));
        let response = self
            .send_with_refresh(|| {
                let headers = self.get_auth_headers()?;
                Ok(self.http_client().delete(&url).headers(headers))
            })
            .await?;
        self.read_unit(response).await
    }
}
