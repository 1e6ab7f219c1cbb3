use super::*;
use httpmock::prelude::*;
use serde_json::json;

fn employee_json(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "first_name": "Ana",
        "last_name": "Ruiz",
        "email": "ana@acme.test",
        "role": "employee",
        "position": "Accountant",
        "department": "Finance",
        "status": "active"
    })
}

fn attendance_json(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "employee_id": "e1",
        "employee_name": "Ana Ruiz",
        "date": "2026-03-02",
        "check_in_time": "2026-03-02T09:02:00",
        "check_out_time": null,
        "total_hours": null,
        "status": "present"
    })
}

fn leave_json(id: &str, status: &str) -> serde_json::Value {
    json!({
        "id": id,
        "employee_id": "e1",
        "employee_name": "Ana Ruiz",
        "leave_type": "annual",
        "start_date": "2026-03-09",
        "end_date": "2026-03-11",
        "days": 3.0,
        "reason": "family trip",
        "status": status,
        "rejection_reason": null,
        "created_at": "2026-03-01T08:00:00Z"
    })
}

fn payslip_json(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "employee_id": "e1",
        "employee_name": "Ana Ruiz",
        "month": 2,
        "year": 2026,
        "gross_salary": 5200.0,
        "net_salary": 4104.5,
        "components": [
            { "name": "Base salary", "kind": "earning", "amount": 5000.0 },
            { "name": "Income tax", "kind": "deduction", "amount": 895.5 }
        ],
        "status": "generated"
    })
}

fn organization_json(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": "Acme GmbH",
        "contact_email": "billing@acme.test",
        "plan_id": "plan-1",
        "plan_name": "Growth",
        "status": "active",
        "created_at": "2025-11-01T00:00:00Z"
    })
}

fn invoice_json(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "organization_id": "org-1",
        "organization_name": "Acme GmbH",
        "invoice_number": "INV-2026-0042",
        "amount": 499.0,
        "issued_on": "2026-03-01",
        "due_date": "2026-03-15",
        "status": "open"
    })
}

fn login_json(access: &str) -> serde_json::Value {
    json!({
        "access_token": access,
        "refresh_token": "refresh-1",
        "user": {
            "id": "u1",
            "name": "Ana Ruiz",
            "email": "ana@acme.test",
            "role": "hr",
            "organization_id": "org-1",
            "organization_name": "Acme GmbH"
        }
    })
}

fn api_client(server: &MockServer) -> ApiClient {
    ApiClient::new_with_base_url(server.url("/api")).with_session_tokens("token-1", "refresh-1")
}

#[tokio::test]
async fn login_stores_session_and_me_uses_it() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(POST).path("/api/auth/login");
        then.status(200).json_body(login_json("acc-1"));
    });
    server.mock(|when, then| {
        when.method(GET)
            .path("/api/auth/me")
            .header("authorization", "Bearer acc-1");
        then.status(200).json_body(login_json("acc-1")["user"].clone());
    });

    let client = ApiClient::new_with_base_url(server.url("/api"));
    assert!(!client.has_session());

    let login = client
        .login(LoginRequest {
            email: "ana@acme.test".into(),
            password: "secret".into(),
        })
        .await
        .unwrap();
    assert_eq!(login.user.role_tier(), Role::Hr);
    assert!(client.has_session());

    let me = client.get_me().await.unwrap();
    assert_eq!(me.id, "u1");
}

#[tokio::test]
async fn login_failure_surfaces_backend_error() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(POST).path("/api/auth/login");
        then.status(401)
            .json_body(json!({ "error": "Invalid credentials", "code": "UNAUTHORIZED" }));
    });

    let client = ApiClient::new_with_base_url(server.url("/api"));
    let err = client
        .login(LoginRequest {
            email: "ana@acme.test".into(),
            password: "wrong".into(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.error, "Invalid credentials");
    assert!(err.is_unauthorized());
    assert!(!client.has_session());
}

#[tokio::test]
async fn expired_token_is_refreshed_once_and_request_retried() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(GET)
            .path("/api/company/employee/leaves")
            .header("authorization", "Bearer expired");
        then.status(401)
            .json_body(json!({ "error": "Token expired", "code": "UNAUTHORIZED" }));
    });
    let refresh = server.mock(|when, then| {
        when.method(POST).path("/api/auth/refresh");
        then.status(200).json_body(login_json("fresh"));
    });
    let retried = server.mock(|when, then| {
        when.method(GET)
            .path("/api/company/employee/leaves")
            .header("authorization", "Bearer fresh");
        then.status(200).json_body(json!([leave_json("lv-1", "pending")]));
    });

    let client =
        ApiClient::new_with_base_url(server.url("/api")).with_session_tokens("expired", "refresh-1");
    let leaves = client.my_leaves().await.unwrap();
    assert_eq!(leaves.len(), 1);
    refresh.assert_hits(1);
    retried.assert_hits(1);
}

#[tokio::test]
async fn failed_refresh_clears_the_session() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(GET).path("/api/company/employee/leaves");
        then.status(401)
            .json_body(json!({ "error": "Token expired", "code": "UNAUTHORIZED" }));
    });
    server.mock(|when, then| {
        when.method(POST).path("/api/auth/refresh");
        then.status(401)
            .json_body(json!({ "error": "Refresh token revoked", "code": "UNAUTHORIZED" }));
    });

    let client = api_client(&server);
    let err = client.my_leaves().await.unwrap_err();
    assert!(err.is_unauthorized());
    assert!(!client.has_session());
}

#[tokio::test]
async fn logout_clears_session_even_when_server_fails() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(POST).path("/api/auth/logout");
        then.status(500).json_body(json!({ "error": "boom" }));
    });

    let client = api_client(&server);
    let result = client.logout().await;
    assert!(result.is_err());
    assert!(!client.has_session());
}

#[tokio::test]
async fn employee_endpoints_use_the_admin_prefix_and_data_envelope() {
    let server = MockServer::start_async().await;
    let list = server.mock(|when, then| {
        when.method(GET)
            .path("/api/company/admin/employees")
            .query_param("search", "Doe, Jane")
            .query_param("status", "active")
            .query_param("limit", "100");
        then.status(200)
            .json_body(json!({ "data": [employee_json("e1")] }));
    });
    server.mock(|when, then| {
        when.method(POST).path("/api/company/admin/employees");
        then.status(201).json_body(employee_json("e2"));
    });
    server.mock(|when, then| {
        when.method(GET).path("/api/company/admin/employees/e1");
        then.status(200).json_body(employee_json("e1"));
    });
    server.mock(|when, then| {
        when.method(PUT).path("/api/company/admin/employees/e1/status");
        then.status(200).json_body(employee_json("e1"));
    });
    server.mock(|when, then| {
        when.method(PUT).path("/api/company/admin/employees/e1");
        then.status(200).json_body(employee_json("e1"));
    });
    server.mock(|when, then| {
        when.method(DELETE).path("/api/company/admin/employees/e1");
        then.status(200).json_body(json!({}));
    });

    let client = api_client(&server);
    let query = EmployeeListQuery {
        search: Some("Doe, Jane".into()),
        status: Some("active".into()),
        department: None,
        limit: Some(100),
    };
    let employees = client.list_employees(Role::Admin, &query).await.unwrap();
    assert_eq!(employees.len(), 1);
    assert_eq!(employees[0].full_name(), "Ana Ruiz");
    list.assert_hits(1);

    let created = client
        .create_employee(
            Role::Admin,
            &CreateEmployeeRequest {
                first_name: "Jane".into(),
                last_name: "Doe".into(),
                email: "jane@acme.test".into(),
                password: "initial".into(),
                role: "employee".into(),
                position: None,
                department: Some("Finance".into()),
            },
        )
        .await
        .unwrap();
    assert_eq!(created.id, "e2");

    let fetched = client.get_employee(Role::Admin, "e1").await.unwrap();
    assert_eq!(fetched.email, "ana@acme.test");

    client
        .update_employee_status(Role::Admin, "e1", "suspended")
        .await
        .unwrap();
    client
        .update_employee(Role::Admin, "e1", &UpdateEmployeeRequest::default())
        .await
        .unwrap();
    client.delete_employee(Role::Admin, "e1").await.unwrap();
}

#[tokio::test]
async fn duplicate_email_conflict_is_classified() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(POST).path("/api/company/admin/employees");
        then.status(409)
            .json_body(json!({ "error": "Email already in use" }));
    });

    let client = api_client(&server);
    let err = client
        .create_employee(
            Role::Admin,
            &CreateEmployeeRequest {
                first_name: "Jane".into(),
                last_name: "Doe".into(),
                email: "jane@acme.test".into(),
                password: "initial".into(),
                role: "employee".into(),
                position: None,
                department: None,
            },
        )
        .await
        .unwrap_err();
    // Body had no code, so it is synthesized from the 409.
    assert!(err.is_conflict());
    assert_eq!(err.error, "Email already in use");
}

#[tokio::test]
async fn attendance_endpoints_cover_checkin_history_and_role_boards() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(POST)
            .path("/api/company/employee/attendance/checkin");
        then.status(200).json_body(attendance_json("att-1"));
    });
    server.mock(|when, then| {
        when.method(POST)
            .path("/api/company/employee/attendance/checkout");
        then.status(200).json_body(attendance_json("att-1"));
    });
    server.mock(|when, then| {
        when.method(GET)
            .path("/api/company/employee/attendance/today");
        then.status(200).json_body(json!({
            "checked_in": true,
            "checked_out": false,
            "record": attendance_json("att-1")
        }));
    });
    server.mock(|when, then| {
        when.method(GET)
            .path("/api/company/employee/attendance")
            .query_param("month", "3")
            .query_param("year", "2026");
        then.status(200)
            .json_body(json!({ "records": [attendance_json("att-1")] }));
    });
    server.mock(|when, then| {
        when.method(GET)
            .path("/api/company/admin/attendance")
            .query_param("start_date", "2026-03-01")
            .query_param("end_date", "2026-03-31")
            .query_param("status", "late");
        then.status(200)
            .json_body(json!({ "records": [attendance_json("att-2")] }));
    });

    let client = api_client(&server);
    assert_eq!(client.check_in().await.unwrap().id, "att-1");
    assert_eq!(client.check_out().await.unwrap().id, "att-1");
    let today = client.today_attendance().await.unwrap();
    assert!(today.checked_in && !today.checked_out);

    let mine = client.my_attendance(Some(3), Some(2026)).await.unwrap();
    assert_eq!(mine.len(), 1);

    let query = AttendanceListQuery {
        start_date: chrono::NaiveDate::from_ymd_opt(2026, 3, 1),
        end_date: chrono::NaiveDate::from_ymd_opt(2026, 3, 31),
        status: Some("late".into()),
        search: None,
    };
    let board = client
        .attendance_records(Role::Admin, &query)
        .await
        .unwrap();
    assert_eq!(board[0].id, "att-2");
}

#[tokio::test]
async fn manager_board_calls_only_the_manager_prefix() {
    let server = MockServer::start_async().await;
    let manager = server.mock(|when, then| {
        when.method(GET).path("/api/company/manager/attendance");
        then.status(200).json_body(json!({ "records": [] }));
    });
    let hr = server.mock(|when, then| {
        when.method(GET).path("/api/company/hr/attendance");
        then.status(200).json_body(json!({ "records": [] }));
    });

    let client = api_client(&server);
    let records = client
        .attendance_records(Role::Manager, &AttendanceListQuery::default())
        .await
        .unwrap();
    assert!(records.is_empty());
    manager.assert_hits(1);
    assert_eq!(hr.hits(), 0);
}

#[tokio::test]
async fn manager_without_department_is_distinguishable() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(GET).path("/api/company/manager/attendance");
        then.status(400)
            .json_body(json!({ "error": DEPARTMENT_MISSING_MESSAGE, "code": "BAD_REQUEST" }));
    });

    let client = api_client(&server);
    let err = client
        .attendance_records(Role::Manager, &AttendanceListQuery::default())
        .await
        .unwrap_err();
    assert!(err.is_missing_department());
}

#[tokio::test]
async fn leave_endpoints_cover_the_request_lifecycle() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(GET).path("/api/company/employee/leaves");
        then.status(200)
            .json_body(json!([leave_json("lv-1", "pending")]));
    });
    server.mock(|when, then| {
        when.method(POST).path("/api/company/employee/leaves");
        then.status(201).json_body(leave_json("lv-2", "pending"));
    });
    server.mock(|when, then| {
        when.method(DELETE).path("/api/company/employee/leaves/lv-2");
        then.status(200).json_body(json!({}));
    });
    server.mock(|when, then| {
        when.method(GET)
            .path("/api/company/hr/leaves")
            .query_param("status", "pending");
        then.status(200)
            .json_body(json!([leave_json("lv-1", "pending")]));
    });
    server.mock(|when, then| {
        when.method(PUT).path("/api/company/hr/leaves/lv-1/approve");
        then.status(200).json_body(leave_json("lv-1", "approved"));
    });
    let reject = server.mock(|when, then| {
        when.method(PUT)
            .path("/api/company/manager/leaves/lv-1/reject")
            .json_body(json!({ "rejection_reason": "No coverage that week" }));
        then.status(200).json_body(leave_json("lv-1", "rejected"));
    });

    let client = api_client(&server);
    assert_eq!(client.my_leaves().await.unwrap().len(), 1);

    let created = client
        .create_leave(&CreateLeavePayload {
            leave_type: "annual".into(),
            start_date: chrono::NaiveDate::from_ymd_opt(2026, 3, 9).unwrap(),
            end_date: chrono::NaiveDate::from_ymd_opt(2026, 3, 11).unwrap(),
            reason: Some("family trip".into()),
        })
        .await
        .unwrap();
    assert_eq!(created.id, "lv-2");
    client.cancel_leave("lv-2").await.unwrap();

    let pending = client.leaves(Role::Hr, Some("pending")).await.unwrap();
    assert_eq!(pending.len(), 1);

    let approved = client.approve_leave(Role::Hr, "lv-1").await.unwrap();
    assert_eq!(approved.status, "approved");

    let rejected = client
        .reject_leave(Role::Manager, "lv-1", "No coverage that week")
        .await
        .unwrap();
    assert_eq!(rejected.status, "rejected");
    reject.assert_hits(1);
}

#[tokio::test]
async fn payslip_endpoints_use_the_payslips_envelope() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(GET)
            .path("/api/company/admin/payslips")
            .query_param("month", "2")
            .query_param("year", "2026");
        then.status(200)
            .json_body(json!({ "payslips": [payslip_json("ps-1")] }));
    });
    server.mock(|when, then| {
        when.method(GET)
            .path("/api/company/employee/payslips")
            .query_param("year", "2026");
        then.status(200)
            .json_body(json!({ "payslips": [payslip_json("ps-1")] }));
    });
    server.mock(|when, then| {
        when.method(GET).path("/api/company/employee/payslips/ps-1");
        then.status(200).json_body(payslip_json("ps-1"));
    });
    server.mock(|when, then| {
        when.method(POST)
            .path("/api/company/admin/payslips/generate")
            .json_body(json!({ "employee_id": "e1", "month": 2, "year": 2026 }));
        then.status(201).json_body(payslip_json("ps-2"));
    });
    server.mock(|when, then| {
        when.method(DELETE).path("/api/company/admin/payslips/ps-2");
        then.status(200).json_body(json!({}));
    });

    let client = api_client(&server);
    let slips = client
        .payslips(Role::Admin, Some(2), Some(2026))
        .await
        .unwrap();
    assert_eq!(slips.len(), 1);
    assert_eq!(slips[0].components.len(), 2);

    assert_eq!(client.my_payslips(Some(2026)).await.unwrap().len(), 1);
    assert_eq!(
        client.get_payslip(Role::Employee, "ps-1").await.unwrap().id,
        "ps-1"
    );

    let generated = client
        .generate_payslip(&GeneratePayslipPayload {
            employee_id: "e1".into(),
            month: 2,
            year: 2026,
        })
        .await
        .unwrap();
    assert_eq!(generated.id, "ps-2");
    client.delete_payslip("ps-2").await.unwrap();
}

#[tokio::test]
async fn platform_endpoints_cover_the_tenant_domain() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(GET).path("/api/platform/organizations");
        then.status(200)
            .json_body(json!({ "data": [organization_json("org-1")] }));
    });
    server.mock(|when, then| {
        when.method(POST).path("/api/platform/organizations");
        then.status(201).json_body(organization_json("org-2"));
    });
    server.mock(|when, then| {
        when.method(PUT)
            .path("/api/platform/organizations/org-1")
            .json_body(json!({ "contact_email": "finance@acme.test" }));
        then.status(200).json_body(organization_json("org-1"));
    });
    server.mock(|when, then| {
        when.method(PUT)
            .path("/api/platform/organizations/org-1/status")
            .json_body(json!({ "status": "suspended" }));
        then.status(200).json_body(organization_json("org-1"));
    });
    server.mock(|when, then| {
        when.method(DELETE).path("/api/platform/organizations/org-2");
        then.status(200).json_body(json!({}));
    });
    server.mock(|when, then| {
        when.method(GET).path("/api/platform/plans");
        then.status(200).json_body(json!({ "data": [{
            "id": "plan-1",
            "name": "Growth",
            "price_monthly": 499.0,
            "max_employees": 250,
            "status": "active"
        }] }));
    });
    server.mock(|when, then| {
        when.method(GET).path("/api/platform/subscriptions");
        then.status(200).json_body(json!({ "data": [{
            "id": "sub-1",
            "organization_id": "org-1",
            "organization_name": "Acme GmbH",
            "plan_id": "plan-1",
            "plan_name": "Growth",
            "billing_cycle": "monthly",
            "status": "active",
            "current_period_end": "2026-04-01"
        }] }));
    });
    server.mock(|when, then| {
        when.method(PUT)
            .path("/api/platform/subscriptions/sub-1")
            .json_body(json!({ "billing_cycle": "yearly" }));
        then.status(200).json_body(json!({
            "id": "sub-1",
            "organization_id": "org-1",
            "plan_id": "plan-1",
            "billing_cycle": "yearly",
            "status": "active",
            "current_period_end": "2027-04-01"
        }));
    });
    server.mock(|when, then| {
        when.method(GET)
            .path("/api/platform/invoices")
            .query_param("status", "open");
        then.status(200)
            .json_body(json!({ "data": [invoice_json("inv-1")] }));
    });
    server.mock(|when, then| {
        when.method(GET).path("/api/platform/invoices/inv-1/download");
        then.status(200).body("%PDF-1.7 fake");
    });

    let client = api_client(&server);
    assert_eq!(client.list_organizations(None).await.unwrap().len(), 1);

    let created = client
        .create_organization(&CreateOrganizationRequest {
            name: "Beta Ltd".into(),
            contact_email: "ops@beta.test".into(),
            plan_id: Some("plan-1".into()),
        })
        .await
        .unwrap();
    assert_eq!(created.id, "org-2");

    client
        .update_organization(
            "org-1",
            &UpdateOrganizationRequest {
                name: None,
                contact_email: Some("finance@acme.test".into()),
                plan_id: None,
            },
        )
        .await
        .unwrap();
    client
        .update_organization_status("org-1", "suspended")
        .await
        .unwrap();
    client.delete_organization("org-2").await.unwrap();

    assert_eq!(client.list_plans().await.unwrap()[0].name, "Growth");
    assert_eq!(
        client.list_subscriptions().await.unwrap()[0].billing_cycle,
        "monthly"
    );

    let updated = client
        .update_subscription(
            "sub-1",
            &UpdateSubscriptionRequest {
                plan_id: None,
                billing_cycle: Some("yearly".into()),
                status: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.billing_cycle, "yearly");

    let invoices = client.list_invoices(Some("open")).await.unwrap();
    assert_eq!(invoices[0].invoice_number, "INV-2026-0042");

    let pdf = client.download_invoice("inv-1").await.unwrap();
    assert!(pdf.starts_with(b"%PDF"));
}

#[tokio::test]
async fn unparseable_error_bodies_fall_back_to_status_codes() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(GET).path("/api/company/employee/leaves");
        then.status(503).body("upstream unavailable");
    });

    let client = api_client(&server);
    let err = client.my_leaves().await.unwrap_err();
    assert_eq!(err.code, "HTTP_503");
}
