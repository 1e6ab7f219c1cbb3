use crate::api::{
    ApiClient, CreateEmployeeRequest, Employee, EmployeeListQuery, Role, UpdateEmployeeRequest,
};
use crate::components::badge::StatusBadge;
use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::empty_state::EmptyState;
use crate::components::layout::{ErrorMessage, Layout, LoadingSpinner, SuccessMessage};
use leptos::*;

const EMPTY_MESSAGE: &str = "No employees found.";
const DUPLICATE_EMAIL_MESSAGE: &str = "An employee with this email already exists.";
const SEARCH_DEBOUNCE_MS: u32 = 500;
const PAGE_LIMIT: u32 = 100;

#[derive(Clone, PartialEq, Eq, Debug)]
struct EmployeesQuery {
    search: String,
    status: Option<String>,
    token: u32,
}

impl EmployeesQuery {
    fn initial() -> Self {
        Self {
            search: String::new(),
            status: None,
            token: 0,
        }
    }

    fn with_search(&self, search: String) -> Self {
        Self {
            search,
            status: self.status.clone(),
            token: self.token.wrapping_add(1),
        }
    }

    fn with_status(&self, status: Option<String>) -> Self {
        Self {
            search: self.search.clone(),
            status,
            token: self.token.wrapping_add(1),
        }
    }

    fn refresh(&self) -> Self {
        Self {
            search: self.search.clone(),
            status: self.status.clone(),
            token: self.token.wrapping_add(1),
        }
    }

    fn to_list_query(&self) -> EmployeeListQuery {
        EmployeeListQuery {
            search: if self.search.is_empty() {
                None
            } else {
                Some(self.search.clone())
            },
            status: self.status.clone(),
            department: None,
            limit: Some(PAGE_LIMIT),
        }
    }
}

fn next_status(current: &str) -> &'static str {
    if current == "active" {
        "inactive"
    } else {
        "active"
    }
}

#[component]
pub fn AdminEmployeesPage() -> impl IntoView {
    let api = use_context::<ApiClient>().unwrap_or_default();
    let query = create_rw_signal(EmployeesQuery::initial());
    let error = create_rw_signal(Option::<String>::None);
    let success = create_rw_signal(Option::<String>::None);

    let api_for_list = api.clone();
    let employees = create_resource(
        move || query.get(),
        move |q| {
            let api = api_for_list.clone();
            async move { api.list_employees(Role::Admin, &q.to_list_query()).await }
        },
    );

    // Debounced server-side search: refetch only when the input has been
    // quiet for the debounce window.
    let debounce_token = create_rw_signal(0u32);
    let on_search_input = move |ev: leptos::ev::Event| {
        let value = event_target_value(&ev);
        let token = debounce_token.get_untracked().wrapping_add(1);
        debounce_token.set(token);
        spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(SEARCH_DEBOUNCE_MS).await;
            if debounce_token.get_untracked() == token {
                query.update(|q| *q = q.with_search(value.clone()));
            }
        });
    };

    let on_status_filter = move |ev: leptos::ev::Event| {
        let value = event_target_value(&ev);
        let status = if value == "all" { None } else { Some(value) };
        query.update(|q| *q = q.with_status(status));
    };

    // Create form
    let show_create = create_rw_signal(false);
    let first_name = create_rw_signal(String::new());
    let last_name = create_rw_signal(String::new());
    let email = create_rw_signal(String::new());
    let password = create_rw_signal(String::new());
    let new_role = create_rw_signal(String::from("employee"));
    let department = create_rw_signal(String::new());
    let position = create_rw_signal(String::new());

    let api_for_create = api.clone();
    let create_employee_action = create_action(move |payload: &CreateEmployeeRequest| {
        let api = api_for_create.clone();
        let payload = payload.clone();
        async move { api.create_employee(Role::Admin, &payload).await }
    });
    create_effect(move |_| {
        if let Some(result) = create_employee_action.value().get() {
            match result {
                Ok(employee) => {
                    success.set(Some(format!("Employee '{}' created", employee.full_name())));
                    show_create.set(false);
                    first_name.set(String::new());
                    last_name.set(String::new());
                    email.set(String::new());
                    password.set(String::new());
                    new_role.set(String::from("employee"));
                    department.set(String::new());
                    position.set(String::new());
                    query.update(|q| *q = q.refresh());
                }
                Err(err) => {
                    log::error!("Failed to create employee: {err}");
                    if err.is_conflict() {
                        error.set(Some(DUPLICATE_EMAIL_MESSAGE.to_string()));
                    } else {
                        error.set(Some(format!("Failed to create employee: {}", err.error)));
                    }
                }
            }
        }
    });

    let on_create_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        error.set(None);
        success.set(None);
        let department_value = department.get();
        let position_value = position.get();
        create_employee_action.dispatch(CreateEmployeeRequest {
            first_name: first_name.get(),
            last_name: last_name.get(),
            email: email.get(),
            password: password.get(),
            role: new_role.get(),
            position: (!position_value.is_empty()).then_some(position_value),
            department: (!department_value.is_empty()).then_some(department_value),
        });
    };

    // Status toggle
    let api_for_status = api.clone();
    let status_action = create_action(move |input: &(String, String)| {
        let api = api_for_status.clone();
        let (id, status) = input.clone();
        async move { api.update_employee_status(Role::Admin, &id, &status).await }
    });
    create_effect(move |_| {
        if let Some(result) = status_action.value().get() {
            match result {
                Ok(_) => query.update(|q| *q = q.refresh()),
                Err(err) => {
                    log::error!("Failed to update employee status: {err}");
                    error.set(Some(format!("Failed to update status: {}", err.error)));
                }
            }
        }
    });

    // Edit dialog
    let edit_target = create_rw_signal(Option::<Employee>::None);
    let edit_role = create_rw_signal(String::new());
    let edit_department = create_rw_signal(String::new());
    let edit_position = create_rw_signal(String::new());

    let api_for_edit = api.clone();
    let edit_action = create_action(move |input: &(String, UpdateEmployeeRequest)| {
        let api = api_for_edit.clone();
        let (id, payload) = input.clone();
        async move { api.update_employee(Role::Admin, &id, &payload).await }
    });
    create_effect(move |_| {
        if let Some(result) = edit_action.value().get() {
            edit_target.set(None);
            match result {
                Ok(employee) => {
                    success.set(Some(format!("Employee '{}' updated", employee.full_name())));
                    query.update(|q| *q = q.refresh());
                }
                Err(err) => {
                    log::error!("Failed to update employee: {err}");
                    error.set(Some(format!("Failed to update employee: {}", err.error)));
                }
            }
        }
    });

    // Delete confirm
    let delete_target = create_rw_signal(Option::<Employee>::None);
    let api_for_delete = api.clone();
    let delete_action = create_action(move |id: &String| {
        let api = api_for_delete.clone();
        let id = id.clone();
        async move { api.delete_employee(Role::Admin, &id).await }
    });
    create_effect(move |_| {
        if let Some(result) = delete_action.value().get() {
            delete_target.set(None);
            match result {
                Ok(()) => query.update(|q| *q = q.refresh()),
                Err(err) => {
                    log::error!("Failed to delete employee: {err}");
                    error.set(Some(format!("Failed to delete employee: {}", err.error)));
                }
            }
        }
    });

    let delete_open = Signal::derive(move || delete_target.get().is_some());
    let delete_message = Signal::derive(move || {
        delete_target
            .get()
            .map(|employee| {
                format!(
                    "Remove {} ({})? This cannot be undone.",
                    employee.full_name(),
                    employee.email
                )
            })
            .unwrap_or_default()
    });

    view! {
        <Layout>
            <div class="space-y-6">
                <div class="bg-surface-elevated shadow rounded-lg p-6">
                    <div class="flex flex-wrap items-center justify-between gap-3 mb-4">
                        <h2 class="text-lg font-medium text-fg">"Employees"</h2>
                        <div class="flex items-center gap-2">
                            <input
                                class="border border-border rounded px-3 py-1.5 text-sm"
                                placeholder="Search by name or email"
                                on:input=on_search_input
                            />
                            <select class="border border-border rounded px-2 py-1.5 text-sm" on:change=on_status_filter>
                                <option value="all" selected>"All statuses"</option>
                                <option value="active">"Active"</option>
                                <option value="inactive">"Inactive"</option>
                                <option value="suspended">"Suspended"</option>
                                <option value="terminated">"Terminated"</option>
                            </select>
                            <button
                                class="px-3 py-1.5 text-sm rounded bg-action-primary-bg text-action-primary-text"
                                on:click=move |_| show_create.update(|open| *open = !*open)
                            >
                                "Add employee"
                            </button>
                        </div>
                    </div>

                    {move || error.get().map(|message| view! { <ErrorMessage message=message /> })}
                    {move || success.get().map(|message| view! { <SuccessMessage message=message /> })}

                    <Show when=move || show_create.get()>
                        <form class="grid grid-cols-1 md:grid-cols-2 gap-4 mb-6 p-4 border border-border rounded" on:submit=on_create_submit>
                            <div>
                                <label class="block text-sm font-medium text-fg-muted">"First name"</label>
                                <input class="mt-1 w-full border border-border rounded px-2 py-1" on:input=move |ev| first_name.set(event_target_value(&ev)) />
                            </div>
                            <div>
                                <label class="block text-sm font-medium text-fg-muted">"Last name"</label>
                                <input class="mt-1 w-full border border-border rounded px-2 py-1" on:input=move |ev| last_name.set(event_target_value(&ev)) />
                            </div>
                            <div>
                                <label class="block text-sm font-medium text-fg-muted">"Email"</label>
                                <input type="email" class="mt-1 w-full border border-border rounded px-2 py-1" on:input=move |ev| email.set(event_target_value(&ev)) />
                            </div>
                            <div>
                                <label class="block text-sm font-medium text-fg-muted">"Initial password"</label>
                                <input type="password" class="mt-1 w-full border border-border rounded px-2 py-1" on:input=move |ev| password.set(event_target_value(&ev)) />
                            </div>
                            <div>
                                <label class="block text-sm font-medium text-fg-muted">"Role"</label>
                                <select class="mt-1 w-full border border-border rounded px-2 py-1" on:change=move |ev| new_role.set(event_target_value(&ev))>
                                    <option value="employee" selected>"employee"</option>
                                    <option value="team_lead">"team_lead"</option>
                                    <option value="manager">"manager"</option>
                                    <option value="hr">"hr"</option>
                                    <option value="admin">"admin"</option>
                                </select>
                            </div>
                            <div>
                                <label class="block text-sm font-medium text-fg-muted">"Department"</label>
                                <input class="mt-1 w-full border border-border rounded px-2 py-1" on:input=move |ev| department.set(event_target_value(&ev)) />
                            </div>
                            <div>
                                <label class="block text-sm font-medium text-fg-muted">"Position"</label>
                                <input class="mt-1 w-full border border-border rounded px-2 py-1" on:input=move |ev| position.set(event_target_value(&ev)) />
                            </div>
                            <div class="md:col-span-2">
                                <button
                                    type="submit"
                                    disabled=move || create_employee_action.pending().get()
                                    class="px-4 py-2 bg-action-primary-bg text-action-primary-text rounded disabled:opacity-50"
                                >
                                    {move || if create_employee_action.pending().get() { "Creating..." } else { "Create employee" }}
                                </button>
                            </div>
                        </form>
                    </Show>

                    {move || match employees.get() {
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
                                            <th class="px-4 py-3 text-left text-xs font-medium text-fg-muted uppercase tracking-wider">"Role"</th>
                                            <th class="px-4 py-3 text-left text-xs font-medium text-fg-muted uppercase tracking-wider">"Department"</th>
                                            <th class="px-4 py-3 text-left text-xs font-medium text-fg-muted uppercase tracking-wider">"Status"</th>
                                            <th class="px-4 py-3"></th>
                                        </tr>
                                    </thead>
                                    <tbody class="divide-y divide-border">
                                        <For each=move || items.clone() key=|employee| employee.id.clone() children=move |employee| {
                                            let toggle_id = employee.id.clone();
                                            let toggle_to = next_status(&employee.status);
                                            let edit_employee = employee.clone();
                                            let delete_employee = employee.clone();
                                            view! {
                                                <tr>
                                                    <td class="px-4 py-3 text-sm text-fg">{employee.full_name()}</td>
                                                    <td class="px-4 py-3 text-sm text-fg-muted">{employee.email.clone()}</td>
                                                    <td class="px-4 py-3 text-sm text-fg">{employee.role.clone()}</td>
                                                    <td class="px-4 py-3 text-sm text-fg-muted">{employee.department.clone().unwrap_or_default()}</td>
                                                    <td class="px-4 py-3"><StatusBadge status=employee.status.clone() /></td>
                                                    <td class="px-4 py-3 text-right space-x-2 whitespace-nowrap">
                                                        <button
                                                            class="px-3 py-1 text-sm rounded bg-surface-muted text-fg"
                                                            on:click=move |_| {
                                                                error.set(None);
                                                                success.set(None);
                                                                status_action.dispatch((toggle_id.clone(), toggle_to.to_string()));
                                                            }
                                                        >
                                                            {move || if toggle_to == "active" { "Activate" } else { "Deactivate" }}
                                                        </button>
                                                        <button
                                                            class="px-3 py-1 text-sm rounded bg-surface-muted text-fg"
                                                            on:click=move |_| {
                                                                error.set(None);
                                                                success.set(None);
                                                                edit_role.set(edit_employee.role.clone());
                                                                edit_department.set(edit_employee.department.clone().unwrap_or_default());
                                                                edit_position.set(edit_employee.position.clone().unwrap_or_default());
                                                                edit_target.set(Some(edit_employee.clone()));
                                                            }
                                                        >
                                                            "Edit"
                                                        </button>
                                                        <button
                                                            class="px-3 py-1 text-sm rounded bg-action-danger-bg text-action-danger-text"
                                                            on:click=move |_| {
                                                                error.set(None);
                                                                success.set(None);
                                                                delete_target.set(Some(delete_employee.clone()));
                                                            }
                                                        >
                                                            "Delete"
                                                        </button>
                                                    </td>
                                                </tr>
                                            }
                                        } />
                                    </tbody>
                                </table>
                            </div>
                        }.into_view(),
                    }}
                </div>
            </div>

            <Show when=move || edit_target.get().is_some()>
                <div class="fixed inset-0 z-[70] flex items-center justify-center p-4">
                    <button
                        type="button"
                        aria-label="Close"
                        class="absolute inset-0 bg-overlay-backdrop"
                        on:click=move |_| edit_target.set(None)
                    ></button>
                    <div class="relative z-[71] w-full max-w-md rounded-lg bg-surface-elevated shadow-xl border border-border p-6 space-y-4" role="dialog" aria-modal="true">
                        <h2 class="text-lg font-semibold text-fg">
                            {move || edit_target.get().map(|e| format!("Edit {}", e.full_name()))}
                        </h2>
                        <div>
                            <label class="block text-sm font-medium text-fg-muted">"Role"</label>
                            <select
                                class="mt-1 w-full border border-border rounded px-2 py-1"
                                on:change=move |ev| edit_role.set(event_target_value(&ev))
                            >
                                <option value="employee" selected=move || edit_role.get() == "employee">"employee"</option>
                                <option value="team_lead" selected=move || edit_role.get() == "team_lead">"team_lead"</option>
                                <option value="manager" selected=move || edit_role.get() == "manager">"manager"</option>
                                <option value="hr" selected=move || edit_role.get() == "hr">"hr"</option>
                                <option value="admin" selected=move || edit_role.get() == "admin">"admin"</option>
                            </select>
                        </div>
                        <div>
                            <label class="block text-sm font-medium text-fg-muted">"Department"</label>
                            <input
                                class="mt-1 w-full border border-border rounded px-2 py-1"
                                prop:value=move || edit_department.get()
                                on:input=move |ev| edit_department.set(event_target_value(&ev))
                            />
                        </div>
                        <div>
                            <label class="block text-sm font-medium text-fg-muted">"Position"</label>
                            <input
                                class="mt-1 w-full border border-border rounded px-2 py-1"
                                prop:value=move || edit_position.get()
                                on:input=move |ev| edit_position.set(event_target_value(&ev))
                            />
                        </div>
                        <div class="flex justify-end gap-2">
                            <button
                                type="button"
                                class="px-4 py-2 text-sm rounded bg-surface-muted text-fg"
                                on:click=move |_| edit_target.set(None)
                            >
                                "Cancel"
                            </button>
                            <button
                                type="button"
                                class="px-4 py-2 text-sm rounded bg-action-primary-bg text-action-primary-text disabled:opacity-50"
                                disabled=move || edit_action.pending().get()
                                on:click=move |_| {
                                    if let Some(employee) = edit_target.get() {
                                        let department_value = edit_department.get();
                                        let position_value = edit_position.get();
                                        edit_action.dispatch((
                                            employee.id,
                                            UpdateEmployeeRequest {
                                                first_name: None,
                                                last_name: None,
                                                role: Some(edit_role.get()),
                                                position: (!position_value.is_empty()).then_some(position_value),
                                                department: (!department_value.is_empty()).then_some(department_value),
                                            },
                                        ));
                                    }
                                }
                            >
                                "Save changes"
                            </button>
                        </div>
                    </div>
                </div>
            </Show>

            <ConfirmDialog
                is_open=delete_open
                title="Delete employee".to_string()
                message=delete_message
                confirm_label="Delete".to_string()
                destructive=true
                on_confirm=Callback::new(move |_| {
                    if let Some(employee) = delete_target.get() {
                        delete_action.dispatch(employee.id);
                    }
                })
                on_cancel=Callback::new(move |_| delete_target.set(None))
            />
        </Layout>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_toggle_flips_between_active_and_inactive() {
        assert_eq!(next_status("active"), "inactive");
        assert_eq!(next_status("inactive"), "active");
        assert_eq!(next_status("suspended"), "active");
    }

    #[test]
    fn list_query_omits_empty_search_and_caps_the_page() {
        let query = EmployeesQuery::initial();
        let list_query = query.to_list_query();
        assert!(list_query.search.is_none());
        assert_eq!(list_query.limit, Some(PAGE_LIMIT));

        let searched = query.with_search("ana".into());
        assert_eq!(searched.to_list_query().search.as_deref(), Some("ana"));
        assert_ne!(query, searched);
    }

    #[test]
    fn refresh_changes_the_query_identity_but_not_the_filters() {
        let query = EmployeesQuery::initial().with_status(Some("active".into()));
        let refreshed = query.refresh();
        assert_eq!(refreshed.status.as_deref(), Some("active"));
        assert_ne!(query, refreshed);
    }
}
