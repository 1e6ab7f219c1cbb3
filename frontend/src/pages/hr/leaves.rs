use crate::api::Role;
use crate::components::layout::Layout;
use crate::pages::leave_review::LeaveReviewPanel;
use leptos::*;

#[component]
pub fn HrLeavesPage() -> impl IntoView {
    view! {
        <Layout>
            <LeaveReviewPanel role=Role::Hr empty_message="No leave requests found." />
        </Layout>
    }
}
