use crate::api::Role;
use crate::components::layout::Layout;
use crate::pages::leave_review::LeaveReviewPanel;
use leptos::*;

#[component]
pub fn AdminLeavesPage() -> impl IntoView {
    view! {
        <Layout>
            <LeaveReviewPanel role=Role::Admin empty_message="No leave requests found." />
        </Layout>
    }
}
