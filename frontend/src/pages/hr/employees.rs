use crate::api::{ApiClient, Employee, EmployeeListQuery, Role};
use crate::components::badge::StatusBadge;
use crate::components::empty_state::EmptyState;
use crate::components::layout::{ErrorMessage, Layout, LoadingSpinner};
use leptos::*;

const EMPTY_MESSAGE: &str = "No employees found.";

/// In-memory directory filter: name, email, or department.
fn matches_directory_filter(employee: &Employee, search: &str) -> bool {
    if search.trim().is_empty() {
        return true;
    }
    let needle = search.to_lowercase();
    employee.full_name().to_lowercase().contains(&needle)
        || employee.email.to_lowercase().contains(&needle)
        || employee
            .department
            .as_deref()
            .map(|d| d.to_lowercase().contains(&needle))
            .unwrap_or(false)
}

#[component]
pub fn HrEmployeesPage() -> impl IntoView {
    let api = use_context::<ApiClient>().unwrap_or_default();
    // The directory is fetched once and filtered on every keystroke in
    // memory; HR does not round-trip searches.
    let search = create_rw_signal(String::new());

    let api_for_list = api.clone();
    let employees = create_resource(
        || (),
        move |_| {
            let api = api_for_list.clone();
            async move { api.list_employees(Role::Hr, &EmployeeListQuery::default()).await }
        },
    );

    let filtered = create_memo(move |_| {
        employees.get().map(|result| {
            result.map(|items| {
                let needle = search.get();
                items
                    .into_iter()
                    .filter(|employee| matches_directory_filter(employee, &needle))
                    .collect::<Vec<_>>()
            })
        })
    });

    view! {
        <Layout>
            <div class="bg-surface-elevated shadow rounded-lg p-6 space-y-4">
                <div class="flex items-center justify-between gap-3">
                    <h2 class="text-lg font-medium text-fg">"Employee directory"</h2>
                    <input
                        class="border border-border rounded px-3 py-1.5 text-sm w-64"
                        placeholder="Filter by name, email, department"
                        on:input=move |ev| search.set(event_target_value(&ev))
                    />
                </div>

                {move || match filtered.get() {
                    None => view! { <LoadingSpinner /> }.into_view(),
                    Some(Err(err)) => view! { <ErrorMessage message=format!("Failed to load employees: {}", err.error) /> }.into_view(),
                    Some(Ok(items)) if items.is_empty() => {
                        view! { <EmptyState title=EMPTY_MESSAGE /> }.into_view()
                    }
                    Some(Ok(items)) => view! {
                        <div class="overflow-x-auto">
                            <table class="min-w-full divide-y divide-border">
                                <thead>
                                    <tr>
                                        <th class="px-4 py-3 text-left text-xs font-medium text-fg-muted uppercase tracking-wider">"Name"</th>
                                        <th class="px-4 py-3 text-left text-xs font-medium text-fg-muted uppercase tracking-wider">"Email"</th>
                                        <th class="px-4 py-3 text-left text-xs font-medium text-fg-muted uppercase tracking-wider">"Position"</th>
                                        <th class="px-4 py-3 text-left text-xs font-medium text-fg-muted uppercase tracking-wider">"Department"</th>
                                        <th class="px-4 py-3 text-left text-xs font-medium text-fg-muted uppercase tracking-wider">"Status"</th>
                                    </tr>
                                </thead>
                                <tbody class="divide-y divide-border">
                                    <For each=move || items.clone() key=|employee| employee.id.clone() children=|employee| {
                                        view! {
                                            <tr>
                                                <td class="px-4 py-3 text-sm text-fg">{employee.full_name()}</td>
                                                <td class="px-4 py-3 text-sm text-fg-muted">{employee.email.clone()}</td>
                                                <td class="px-4 py-3 text-sm text-fg-muted">{employee.position.clone().unwrap_or_default()}</td>
                                                <td class="px-4 py-3 text-sm text-fg-muted">{employee.department.clone().unwrap_or_default()}</td>
                                                <td class="px-4 py-3"><StatusBadge status=employee.status.clone() /></td>
                                            </tr>
                                        }
                                    } />
                                </tbody>
                            </table>
                        </div>
                    }.into_view(),
                }}
            </div>
        </Layout>
    }
}
