use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde_json::json;

use super::client::{company_url, ApiClient};
use super::types::{ApiError, AttendanceListQuery, AttendanceRecord, Role, TodayAttendance};

impl ApiClient {
    /// `POST /company/employee/attendance/checkin`.
    pub async fn check_in(&self) -> Result<AttendanceRecord, ApiError> {
        let base_url = self.resolved_base_url().await;
        let url = company_url(&base_url, Role::Employee, "attendance/checkin");
        let response = self
            .send_with_refresh(|| {
                let headers = self.get_auth_headers()?;
                Ok(self
                    .http_client()
                    .post(&url)
                    .headers(headers)
                    .json(&json!({})))
            })
            .await?;
        self.read_json(response).await
    }

    /// `POST /company/employee/attendance/checkout`.
    pub async fn check_out(&self) -> Result<AttendanceRecord, ApiError> {
        let base_url = self.resolved_base_url().await;
        let url = company_url(&base_url, Role::Employee, "attendance/checkout");
        let response = self
            .send_with_refresh(|| {
                let headers = self.get_auth_headers()?;
                Ok(self
                    .http_client()
                    .post(&url)
                    .headers(headers)
                    .json(&json!({})))
            })
            .await?;
        self.read_json(response).await
    }

    /// `GET /company/employee/attendance/today`.
    pub async fn today_attendance(&self) -> Result<TodayAttendance, ApiError> {
        let base_url = self.resolved_base_url().await;
        let url = company_url(&base_url, Role::Employee, "attendance/today");
        let response = self
            .send_with_refresh(|| {
                let headers = self.get_auth_headers()?;
                Ok(self.http_client().get(&url).headers(headers))
            })
            .await?;
        self.read_json(response).await
    }

    /// `GET /company/employee/attendance?month&year`; envelope
    /// `{ "records": [...] }`.
    pub async fn my_attendance(
        &self,
        month: Option<u32>,
        year: Option<i32>,
    ) -> Result<Vec<AttendanceRecord>, ApiError> {
        let base_url = self.resolved_base_url().await;
        let mut url = company_url(&base_url, Role::Employee, "attendance");
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
        self.read_list(response, "records").await
    }

    /// `GET /company/{role}/attendance?{filters}`; envelope
    /// `{ "records": [...] }`. For managers the backend scopes to the
    /// caller's department and answers with the department-membership error
    /// when there is none.
    pub async fn attendance_records(
        &self,
        role: Role,
        query: &AttendanceListQuery,
    ) -> Result<Vec<AttendanceRecord>, ApiError> {
        let base_url = self.resolved_base_url().await;
        let mut url = company_url(&base_url, role, "attendance");
        let mut query_params = Vec::new();

        if let Some(start_date) = query.start_date {
            query_params.push(format!("start_date={start_date}"));
        }
        if let Some(end_date) = query.end_date {
            query_params.push(format!("end_date={end_date}"));
        }
        if let Some(status) = &query.status {
            query_params.push(format!("status={status}"));
        }
        if let Some(search) = &query.search {
            if !search.is_empty() {
                query_params.push(format!(
                    "search={}",
                    utf8_percent_encode(search, NON_ALPHANUMERIC)
                ));
            }
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
        self.read_list(response, "records").await
    }
}
