use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Permission tier encoded into every company-scoped endpoint path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    SuperAdmin,
    Admin,
    Hr,
    Manager,
    Employee,
}

impl Role {
    pub fn path_segment(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "superadmin",
            Role::Admin => "admin",
            Role::Hr => "hr",
            Role::Manager => "manager",
            Role::Employee => "employee",
        }
    }

    /// Backend role strings are not a closed set; anything unrecognized
    /// lands on the least-privileged tier.
    pub fn parse(raw: &str) -> Role {
        match raw {
            "super_admin" | "superadmin" => Role::SuperAdmin,
            "admin" => Role::Admin,
            "hr" => Role::Hr,
            "manager" => Role::Manager,
            _ => Role::Employee,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Role::SuperAdmin => "Super admin",
            Role::Admin => "Admin",
            Role::Hr => "HR",
            Role::Manager => "Manager",
            Role::Employee => "Employee",
        };
        write!(f, "{label}")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: CurrentUser,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    #[serde(default)]
    pub organization_id: Option<String>,
    #[serde(default)]
    pub organization_name: Option<String>,
}

impl CurrentUser {
    pub fn role_tier(&self) -> Role {
        Role::parse(&self.role)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: String,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    pub status: String,
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEmployeeRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateEmployeeRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
}

/// Query filters for employee listings. Only set fields become query
/// parameters; `search` is server-side on the admin page and unused by the
/// HR directory, which filters in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeListQuery {
    pub search: Option<String>,
    pub status: Option<String>,
    pub department: Option<String>,
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub id: String,
    pub employee_id: String,
    #[serde(default)]
    pub employee_name: Option<String>,
    pub date: NaiveDate,
    pub check_in_time: Option<NaiveDateTime>,
    pub check_out_time: Option<NaiveDateTime>,
    pub total_hours: Option<f64>,
    pub status: String,
}

/// Today's check-in context for the signed-in employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodayAttendance {
    pub checked_in: bool,
    pub checked_out: bool,
    #[serde(default)]
    pub record: Option<AttendanceRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttendanceListQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveRequest {
    pub id: String,
    pub employee_id: String,
    #[serde(default)]
    pub employee_name: Option<String>,
    pub leave_type: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub days: f64,
    #[serde(default)]
    pub reason: Option<String>,
    pub status: String,
    #[serde(default)]
    pub rejection_reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLeavePayload {
    pub leave_type: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RejectLeavePayload {
    pub rejection_reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayslipComponent {
    pub name: String,
    /// `earning` or `deduction`.
    pub kind: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payslip {
    pub id: String,
    pub employee_id: String,
    #[serde(default)]
    pub employee_name: Option<String>,
    pub month: u32,
    pub year: i32,
    pub gross_salary: f64,
    pub net_salary: f64,
    #[serde(default)]
    pub components: Vec<PayslipComponent>,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratePayslipPayload {
    pub employee_id: String,
    pub month: u32,
    pub year: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    pub id: String,
    pub name: String,
    pub contact_email: String,
    #[serde(default)]
    pub plan_id: Option<String>,
    #[serde(default)]
    pub plan_name: Option<String>,
    pub status: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrganizationRequest {
    pub name: String,
    pub contact_email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateOrganizationRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionPlan {
    pub id: String,
    pub name: String,
    pub price_monthly: f64,
    pub max_employees: i64,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlanRequest {
    pub name: String,
    pub price_monthly: f64,
    pub max_employees: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    pub id: String,
    pub organization_id: String,
    #[serde(default)]
    pub organization_name: Option<String>,
    pub plan_id: String,
    #[serde(default)]
    pub plan_name: Option<String>,
    /// `monthly` or `yearly`.
    pub billing_cycle: String,
    pub status: String,
    #[serde(default)]
    pub current_period_end: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateSubscriptionRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_cycle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: String,
    pub organization_id: String,
    #[serde(default)]
    pub organization_name: Option<String>,
    pub invoice_number: String,
    pub amount: f64,
    #[serde(default)]
    pub issued_on: Option<NaiveDate>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    pub status: String,
}

use leptos::*;

/// Backend error message that marks a manager without a department; the
/// manager attendance page branches into a dedicated empty state on it.
pub const DEPARTMENT_MISSING_MESSAGE: &str = "User does not belong to a department";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, thiserror::Error)]
#[error("{error}")]
pub struct ApiError {
    pub error: String,
    #[serde(default)]
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub details: Option<Value>,
}

impl From<ApiError> for String {
    fn from(error: ApiError) -> Self {
        error.error
    }
}

impl IntoView for ApiError {
    fn into_view(self) -> View {
        self.error.into_view()
    }
}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            code: "VALIDATION_ERROR".to_string(),
            details: None,
        }
    }

    pub fn unknown(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            code: "UNKNOWN".to_string(),
            details: None,
        }
    }

    pub fn request_failed(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            code: "REQUEST_FAILED".to_string(),
            details: None,
        }
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            code: "UNAUTHORIZED".to_string(),
            details: None,
        }
    }

    pub fn code_for_status(status: u16) -> String {
        match status {
            401 => "UNAUTHORIZED".to_string(),
            403 => "FORBIDDEN".to_string(),
            404 => "NOT_FOUND".to_string(),
            409 => "CONFLICT".to_string(),
            422 => "VALIDATION_ERROR".to_string(),
            other => format!("HTTP_{other}"),
        }
    }

    pub fn from_status(status: u16) -> Self {
        Self {
            error: format!("Request failed with status {status}"),
            code: Self::code_for_status(status),
            details: None,
        }
    }

    pub fn is_conflict(&self) -> bool {
        self.code == "CONFLICT"
    }

    pub fn is_unauthorized(&self) -> bool {
        self.code == "UNAUTHORIZED"
    }

    pub fn is_missing_department(&self) -> bool {
        self.error == DEPARTMENT_MISSING_MESSAGE
    }
}

/// Unwraps a list response. Each endpoint documents its envelope key
/// (`data`, `records`, `payslips`); a bare top-level array is also accepted
/// since a few backend endpoints skip the wrapper entirely.
pub fn list_from_envelope<T: DeserializeOwned>(value: Value, key: &str) -> Result<Vec<T>, ApiError> {
    let items = match value {
        Value::Array(items) => Value::Array(items),
        Value::Object(mut map) => map
            .remove(key)
            .ok_or_else(|| ApiError::unknown(format!("Response envelope missing `{key}`")))?,
        _ => {
            return Err(ApiError::unknown(format!(
                "Expected a list or `{key}` envelope"
            )))
        }
    };
    serde_json::from_value(items)
        .map_err(|e| ApiError::unknown(format!("Failed to parse response: {e}")))
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn serialize_create_leave_payload_snake_case_fields() {
        let payload = CreateLeavePayload {
            leave_type: "annual".into(),
            start_date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 3, 4).unwrap(),
            reason: None,
        };
        let v = serde_json::to_value(&payload).unwrap();
        assert_eq!(v["leave_type"], serde_json::json!("annual"));
        assert_eq!(v["start_date"], serde_json::json!("2026-03-02"));
        assert!(v.get("reason").is_none());
    }

    #[wasm_bindgen_test]
    fn deserialize_current_user_without_organization() {
        let raw = r#"{ "id": "u1", "name": "Ana", "email": "ana@acme.test", "role": "hr" }"#;
        let user: CurrentUser = serde_json::from_str(raw).unwrap();
        assert_eq!(user.role_tier(), Role::Hr);
        assert!(user.organization_id.is_none());
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn role_path_segments_match_the_url_contract() {
        assert_eq!(Role::Admin.path_segment(), "admin");
        assert_eq!(Role::Hr.path_segment(), "hr");
        assert_eq!(Role::Manager.path_segment(), "manager");
        assert_eq!(Role::Employee.path_segment(), "employee");
        assert_eq!(Role::SuperAdmin.path_segment(), "superadmin");
    }

    #[test]
    fn unknown_role_strings_fall_back_to_employee_tier() {
        assert_eq!(Role::parse("super_admin"), Role::SuperAdmin);
        assert_eq!(Role::parse("team_lead"), Role::Employee);
        assert_eq!(Role::parse("intern"), Role::Employee);
        assert_eq!(Role::parse(""), Role::Employee);
    }

    #[test]
    fn api_error_helpers_set_expected_codes() {
        assert_eq!(ApiError::validation("bad").code, "VALIDATION_ERROR");
        assert_eq!(ApiError::unknown("boom").code, "UNKNOWN");
        assert_eq!(ApiError::request_failed("net").code, "REQUEST_FAILED");
        assert_eq!(ApiError::unauthorized("who").code, "UNAUTHORIZED");
    }

    #[test]
    fn api_error_status_synthesis_covers_the_taxonomy() {
        assert!(ApiError::from_status(409).is_conflict());
        assert!(ApiError::from_status(401).is_unauthorized());
        assert_eq!(ApiError::from_status(422).code, "VALIDATION_ERROR");
        assert_eq!(ApiError::from_status(500).code, "HTTP_500");
    }

    #[test]
    fn department_membership_error_is_matched_by_message() {
        let err = ApiError {
            error: DEPARTMENT_MISSING_MESSAGE.into(),
            code: "BAD_REQUEST".into(),
            details: None,
        };
        assert!(err.is_missing_department());
        assert!(!ApiError::unknown("other").is_missing_department());
    }

    #[test]
    fn api_error_display_and_string_conversion_match_error_text() {
        let error = ApiError::unknown("boom");
        assert_eq!(format!("{}", error), "boom");
        let raw: String = ApiError::validation("bad input").into();
        assert_eq!(raw, "bad input");
    }

    #[test]
    fn list_from_envelope_accepts_documented_key() {
        let value = json!({ "records": [ {
            "id": "att-1",
            "employee_id": "e1",
            "date": "2026-03-02",
            "check_in_time": "2026-03-02T09:00:00",
            "check_out_time": null,
            "total_hours": null,
            "status": "present"
        } ] });
        let records: Vec<AttendanceRecord> = list_from_envelope(value, "records").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].status, "present");
    }

    #[test]
    fn list_from_envelope_accepts_bare_array() {
        let value = json!([{ "name": "Base", "kind": "earning", "amount": 1000.0 }]);
        let components: Vec<PayslipComponent> = list_from_envelope(value, "data").unwrap();
        assert_eq!(components.len(), 1);
    }

    #[test]
    fn list_from_envelope_rejects_wrong_key() {
        let value = json!({ "data": [] });
        let result: Result<Vec<PayslipComponent>, _> = list_from_envelope(value, "payslips");
        assert!(result.is_err());
    }

    #[test]
    fn deserialize_leave_request_with_unknown_status() {
        let leave: LeaveRequest = serde_json::from_value(json!({
            "id": "lv-1",
            "employee_id": "e1",
            "employee_name": "Ana Ruiz",
            "leave_type": "sick",
            "start_date": "2026-02-02",
            "end_date": "2026-02-03",
            "days": 2.0,
            "reason": null,
            "status": "escalated",
            "rejection_reason": null,
            "created_at": "2026-02-01T08:00:00Z"
        }))
        .unwrap();
        // Statuses are open strings so new backend states still render.
        assert_eq!(leave.status, "escalated");
    }

    #[test]
    fn deserialize_payslip_defaults_missing_components() {
        let payslip: Payslip = serde_json::from_value(json!({
            "id": "ps-1",
            "employee_id": "e1",
            "month": 2,
            "year": 2026,
            "gross_salary": 5200.0,
            "net_salary": 4100.5,
            "status": "generated"
        }))
        .unwrap();
        assert!(payslip.components.is_empty());
        assert!(payslip.employee_name.is_none());
    }
}
