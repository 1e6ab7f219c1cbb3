use crate::api::Role;
use crate::components::layout::Layout;
use crate::pages::leave_review::LeaveReviewPanel;
use leptos::*;

#[component]
pub fn ManagerLeavesPage() -> impl IntoView {
    view! {
        <Layout>
            <LeaveReviewPanel role=Role::Manager empty_message="No leave requests from your team." />
        </Layout>
    }
}
