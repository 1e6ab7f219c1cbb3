use leptos::*;
use leptos_router::*;

pub mod api;
pub mod components;
pub mod config;
pub mod pages;
pub mod state;
pub mod utils;

#[cfg(test)]
pub mod test_support;

use api::{ApiClient, Role};
use components::guard::{RequireAuth, RequireRole};
use pages::{
    admin::{AdminAttendancePage, AdminEmployeesPage, AdminLeavesPage, AdminPayrollPage},
    dashboard::DashboardPage,
    employee::{EmployeeAttendancePage, EmployeeLeavesPage, EmployeePayslipsPage},
    home::HomePage,
    hr::{HrAttendancePage, HrEmployeesPage, HrLeavesPage},
    login::LoginPage,
    manager::{ManagerAttendancePage, ManagerLeavesPage},
    super_admin::{InvoicesPage, OrganizationsPage, PlansPage, SubscriptionsPage},
};

#[component]
pub fn App() -> impl IntoView {
    provide_context(ApiClient::new());
    view! {
        <state::session::SessionProvider>
            <Router>
                <Routes>
                    <Route path="/" view=HomePage/>
                    <Route path="/login" view=LoginPage/>
                    <Route path="/dashboard" view=ProtectedDashboard/>

                    <Route path="/platform/organizations" view=ProtectedOrganizations/>
                    <Route path="/platform/plans" view=ProtectedPlans/>
                    <Route path="/platform/subscriptions" view=ProtectedSubscriptions/>
                    <Route path="/platform/invoices" view=ProtectedInvoices/>

                    <Route path="/admin/employees" view=ProtectedAdminEmployees/>
                    <Route path="/admin/attendance" view=ProtectedAdminAttendance/>
                    <Route path="/admin/leaves" view=ProtectedAdminLeaves/>
                    <Route path="/admin/payroll" view=ProtectedAdminPayroll/>

                    <Route path="/hr/employees" view=ProtectedHrEmployees/>
                    <Route path="/hr/attendance" view=ProtectedHrAttendance/>
                    <Route path="/hr/leaves" view=ProtectedHrLeaves/>

                    <Route path="/manager/attendance" view=ProtectedManagerAttendance/>
                    <Route path="/manager/leaves" view=ProtectedManagerLeaves/>

                    <Route path="/me/attendance" view=ProtectedMyAttendance/>
                    <Route path="/me/leaves" view=ProtectedMyLeaves/>
                    <Route path="/me/payslips" view=ProtectedMyPayslips/>
                </Routes>
            </Router>
        </state::session::SessionProvider>
    }
}

#[component]
fn ProtectedDashboard() -> impl IntoView {
    view! { <RequireAuth><DashboardPage/></RequireAuth> }
}

#[component]
fn ProtectedOrganizations() -> impl IntoView {
    view! { <RequireRole required=Role::SuperAdmin><OrganizationsPage/></RequireRole> }
}

#[component]
fn ProtectedPlans() -> impl IntoView {
    view! { <RequireRole required=Role::SuperAdmin><PlansPage/></RequireRole> }
}

#[component]
fn ProtectedSubscriptions() -> impl IntoView {
    view! { <RequireRole required=Role::SuperAdmin><SubscriptionsPage/></RequireRole> }
}

#[component]
fn ProtectedInvoices() -> impl IntoView {
    view! { <RequireRole required=Role::SuperAdmin><InvoicesPage/></RequireRole> }
}

#[component]
fn ProtectedAdminEmployees() -> impl IntoView {
    view! { <RequireRole required=Role::Admin><AdminEmployeesPage/></RequireRole> }
}

#[component]
fn ProtectedAdminAttendance() -> impl IntoView {
    view! { <RequireRole required=Role::Admin><AdminAttendancePage/></RequireRole> }
}

#[component]
fn ProtectedAdminLeaves() -> impl IntoView {
    view! { <RequireRole required=Role::Admin><AdminLeavesPage/></RequireRole> }
}

#[component]
fn ProtectedAdminPayroll() -> impl IntoView {
    view! { <RequireRole required=Role::Admin><AdminPayrollPage/></RequireRole> }
}

#[component]
fn ProtectedHrEmployees() -> impl IntoView {
    view! { <RequireRole required=Role::Hr><HrEmployeesPage/></RequireRole> }
}

#[component]
fn ProtectedHrAttendance() -> impl IntoView {
    view! { <RequireRole required=Role::Hr><HrAttendancePage/></RequireRole> }
}

#[component]
fn ProtectedHrLeaves() -> impl IntoView {
    view! { <RequireRole required=Role::Hr><HrLeavesPage/></RequireRole> }
}

#[component]
fn ProtectedManagerAttendance() -> impl IntoView {
    view! { <RequireRole required=Role::Manager><ManagerAttendancePage/></RequireRole> }
}

#[component]
fn ProtectedManagerLeaves() -> impl IntoView {
    view! { <RequireRole required=Role::Manager><ManagerLeavesPage/></RequireRole> }
}

#[component]
fn ProtectedMyAttendance() -> impl IntoView {
    view! { <RequireRole required=Role::Employee><EmployeeAttendancePage/></RequireRole> }
}

#[component]
fn ProtectedMyLeaves() -> impl IntoView {
    view! { <RequireRole required=Role::Employee><EmployeeLeavesPage/></RequireRole> }
}

#[component]
fn ProtectedMyPayslips() -> impl IntoView {
    view! { <RequireRole required=Role::Employee><EmployeePayslipsPage/></RequireRole> }
}
