use crate::api::{ApiClient, CreateOrganizationRequest, Organization};
use crate::components::badge::StatusBadge;
use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::empty_state::EmptyState;
use crate::components::layout::{ErrorMessage, Layout, LoadingSpinner, SuccessMessage};
use leptos::*;

const EMPTY_MESSAGE: &str = "No organizations yet.";

#[derive(Clone, PartialEq, Eq, Debug)]
struct OrganizationsQuery {
    search: String,
    token: u32,
}

impl OrganizationsQuery {
    fn initial() -> Self {
        Self {
            search: String::new(),
            token: 0,
        }
    }

    fn with_search(&self, search: String) -> Self {
        Self {
            search,
            token: self.token.wrapping_add(1),
        }
    }

    fn refresh(&self) -> Self {
        Self {
            search: self.search.clone(),
            token: self.token.wrapping_add(1),
        }
    }
}

fn next_status(current: &str) -> &'static str {
    if current == "active" {
        "suspended"
    } else {
        "active"
    }
}

#[component]
pub fn OrganizationsPage() -> impl IntoView {
    let api = use_context::<ApiClient>().unwrap_or_default();
    let query = create_rw_signal(OrganizationsQuery::initial());
    let error = create_rw_signal(Option::<String>::None);
    let success = create_rw_signal(Option::<String>::None);

    let api_for_list = api.clone();
    let organizations = create_resource(
        move || query.get(),
        move |q| {
            let api = api_for_list.clone();
            async move {
                let search = (!q.search.is_empty()).then_some(q.search.as_str());
                api.list_organizations(search).await
            }
        },
    );

    let search_input = create_rw_signal(String::new());
    let on_search = move |_| {
        query.update(|q| *q = q.with_search(search_input.get()));
    };

    // Create form
    let show_create = create_rw_signal(false);
    let name = create_rw_signal(String::new());
    let contact_email = create_rw_signal(String::new());

    let api_for_create = api.clone();
    let create_org_action = create_action(move |payload: &CreateOrganizationRequest| {
        let api = api_for_create.clone();
        let payload = payload.clone();
        async move { api.create_organization(&payload).await }
    });
    create_effect(move |_| {
        if let Some(result) = create_org_action.value().get() {
            match result {
                Ok(organization) => {
                    success.set(Some(format!("Organization '{}' created", organization.name)));
                    show_create.set(false);
                    name.set(String::new());
                    contact_email.set(String::new());
                    query.update(|q| *q = q.refresh());
                }
                Err(err) => {
                    log::error!("Failed to create organization: {err}");
                    error.set(Some(format!("Failed to create organization: {}", err.error)));
                }
            }
        }
    });

    let on_create_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        error.set(None);
        success.set(None);
        create_org_action.dispatch(CreateOrganizationRequest {
            name: name.get(),
            contact_email: contact_email.get(),
            plan_id: None,
        });
    };

    // Status toggle
    let api_for_status = api.clone();
    let status_action = create_action(move |input: &(String, String)| {
        let api = api_for_status.clone();
        let (id, status) = input.clone();
        async move { api.update_organization_status(&id, &status).await }
    });
    create_effect(move |_| {
        if let Some(result) = status_action.value().get() {
            match result {
                Ok(_) => query.update(|q| *q = q.refresh()),
                Err(err) => {
                    log::error!("Failed to update organization status: {err}");
                    error.set(Some(format!("Failed to update status: {}", err.error)));
                }
            }
        }
    });

    // Delete
    let delete_target = create_rw_signal(Option::<Organization>::None);
    let api_for_delete = api.clone();
    let delete_action = create_action(move |id: &String| {
        let api = api_for_delete.clone();
        let id = id.clone();
        async move { api.delete_organization(&id).await }
    });
    create_effect(move |_| {
        if let Some(result) = delete_action.value().get() {
            delete_target.set(None);
            match result {
                Ok(()) => query.update(|q| *q = q.refresh()),
                Err(err) => {
                    log::error!("Failed to delete organization: {err}");
                    error.set(Some(format!("Failed to delete organization: {}", err.error)));
                }
            }
        }
    });

    let delete_open = Signal::derive(move || delete_target.get().is_some());
    let delete_message = Signal::derive(move || {
        delete_target
            .get()
            .map(|organization| {
                format!(
                    "Delete '{}' and all of its tenant data? This cannot be undone.",
                    organization.name
                )
            })
            .unwrap_or_default()
    });

    view! {
        <Layout>
            <div class="bg-surface-elevated shadow rounded-lg p-6 space-y-4">
                <div class="flex flex-wrap items-center justify-between gap-3">
                    <h2 class="text-lg font-medium text-fg">"Organizations"</h2>
                    <div class="flex items-center gap-2">
                        <input
                            class="border border-border rounded px-3 py-1.5 text-sm"
                            placeholder="Search organizations"
                            on:input=move |ev| search_input.set(event_target_value(&ev))
                        />
                        <button class="px-3 py-1.5 text-sm rounded bg-surface-muted text-fg" on:click=on_search>
                            "Search"
                        </button>
                        <button
                            class="px-3 py-1.5 text-sm rounded bg-action-primary-bg text-action-primary-text"
                            on:click=move |_| show_create.update(|open| *open = !*open)
                        >
                            "Add organization"
                        </button>
                    </div>
                </div>

                {move || error.get().map(|message| view! { <ErrorMessage message=message /> })}
                {move || success.get().map(|message| view! { <SuccessMessage message=message /> })}

                <Show when=move || show_create.get()>
                    <form class="grid grid-cols-1 md:grid-cols-2 gap-4 p-4 border border-border rounded" on:submit=on_create_submit>
                        <div>
                            <label class="block text-sm font-medium text-fg-muted">"Name"</label>
                            <input class="mt-1 w-full border border-border rounded px-2 py-1" on:input=move |ev| name.set(event_target_value(&ev)) />
                        </div>
                        <div>
                            <label class="block text-sm font-medium text-fg-muted">"Billing contact"</label>
                            <input type="email" class="mt-1 w-full border border-border rounded px-2 py-1" on:input=move |ev| contact_email.set(event_target_value(&ev)) />
                        </div>
                        <div class="md:col-span-2">
                            <button
                                type="submit"
                                disabled=move || create_org_action.pending().get()
                                class="px-4 py-2 bg-action-primary-bg text-action-primary-text rounded disabled:opacity-50"
                            >
                                {move || if create_org_action.pending().get() { "Creating..." } else { "Create organization" }}
                            </button>
                        </div>
                    </form>
                </Show>

                {move || match organizations.get() {
                    None => view! { <LoadingSpinner /> }.into_view(),
                    Some(Err(err)) => view! { <ErrorMessage message=format!("Failed to load organizations: {}", err.error) /> }.into_view(),
                    Some(Ok(items)) if items.is_empty() => {
                        view! { <EmptyState title=EMPTY_MESSAGE /> }.into_view()
                    }
                    Some(Ok(items)) => view! {
                        <div class="overflow-x-auto">
                            <table class="min-w-full divide-y divide-border">
                                <thead>
                                    <tr>
                                        <th class="px-4 py-3 text-left text-xs font-medium text-fg-muted uppercase tracking-wider">"Name"</th>
                                        <th class="px-4 py-3 text-left text-xs font-medium text-fg-muted uppercase tracking-wider">"Billing contact"</th>
                                        <th class="px-4 py-3 text-left text-xs font-medium text-fg-muted uppercase tracking-wider">"Plan"</th>
                                        <th class="px-4 py-3 text-left text-xs font-medium text-fg-muted uppercase tracking-wider">"Status"</th>
                                        <th class="px-4 py-3"></th>
                                    </tr>
                                </thead>
                                <tbody class="divide-y divide-border">
                                    <For each=move || items.clone() key=|organization| organization.id.clone() children=move |organization| {
                                        let toggle_id = organization.id.clone();
                                        let toggle_to = next_status(&organization.status);
                                        let delete_organization = organization.clone();
                                        view! {
                                            <tr>
                                                <td class="px-4 py-3 text-sm text-fg">{organization.name.clone()}</td>
                                                <td class="px-4 py-3 text-sm text-fg-muted">{organization.contact_email.clone()}</td>
                                                <td class="px-4 py-3 text-sm text-fg-muted">{organization.plan_name.clone().unwrap_or_else(|| "—".into())}</td>
                                                <td class="px-4 py-3"><StatusBadge status=organization.status.clone() /></td>
                                                <td class="px-4 py-3 text-right space-x-2 whitespace-nowrap">
                                                    <button
                                                        class="px-3 py-1 text-sm rounded bg-surface-muted text-fg"
                                                        on:click=move |_| {
                                                            error.set(None);
                                                            success.set(None);
                                                            status_action.dispatch((toggle_id.clone(), toggle_to.to_string()));
                                                        }
                                                    >
                                                        {move || if toggle_to == "active" { "Reactivate" } else { "Suspend" }}
                                                    </button>
                                                    <button
                                                        class="px-3 py-1 text-sm rounded bg-action-danger-bg text-action-danger-text"
                                                        on:click=move |_| {
                                                            error.set(None);
                                                            success.set(None);
                                                            delete_target.set(Some(delete_organization.clone()));
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

            <ConfirmDialog
                is_open=delete_open
                title="Delete organization".to_string()
                message=delete_message
                confirm_label="Delete".to_string()
                destructive=true
                on_confirm=Callback::new(move |_| {
                    if let Some(organization) = delete_target.get() {
                        delete_action.dispatch(organization.id);
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
    fn status_toggle_suspends_active_tenants() {
        assert_eq!(next_status("active"), "suspended");
        assert_eq!(next_status("suspended"), "active");
        assert_eq!(next_status("trial"), "active");
    }

    #[test]
    fn search_submissions_are_distinct_queries() {
        let query = OrganizationsQuery::initial();
        let searched = query.with_search("acme".into());
        assert_ne!(query, searched);
        assert_ne!(searched, searched.refresh());
    }
}
