use crate::api::{ApiClient, CreatePlanRequest, SubscriptionPlan};
use crate::components::badge::StatusBadge;
use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::empty_state::EmptyState;
use crate::components::layout::{ErrorMessage, Layout, LoadingSpinner, SuccessMessage};
use leptos::*;

const EMPTY_MESSAGE: &str = "No subscription plans configured.";

fn parse_plan_form(
    name: &str,
    price: &str,
    max_employees: &str,
) -> Result<CreatePlanRequest, String> {
    if name.trim().is_empty() {
        return Err("Plan name is required.".to_string());
    }
    let price_monthly = price
        .parse::<f64>()
        .map_err(|_| "Enter a valid monthly price.".to_string())?;
    if price_monthly < 0.0 {
        return Err("Price must not be negative.".to_string());
    }
    let max_employees = max_employees
        .parse::<i64>()
        .map_err(|_| "Enter a valid employee cap.".to_string())?;
    Ok(CreatePlanRequest {
        name: name.trim().to_string(),
        price_monthly,
        max_employees,
    })
}

#[component]
pub fn PlansPage() -> impl IntoView {
    let api = use_context::<ApiClient>().unwrap_or_default();
    let error = create_rw_signal(Option::<String>::None);
    let success = create_rw_signal(Option::<String>::None);

    let list_token = create_rw_signal(0u32);
    let api_for_list = api.clone();
    let plans = create_resource(
        move || list_token.get(),
        move |_| {
            let api = api_for_list.clone();
            async move { api.list_plans().await }
        },
    );
    let refresh = move || list_token.update(|t| *t = t.wrapping_add(1));

    let name = create_rw_signal(String::new());
    let price = create_rw_signal(String::new());
    let max_employees = create_rw_signal(String::new());

    let api_for_create = api.clone();
    let create_plan_action = create_action(move |payload: &CreatePlanRequest| {
        let api = api_for_create.clone();
        let payload = payload.clone();
        async move { api.create_plan(&payload).await }
    });
    create_effect(move |_| {
        if let Some(result) = create_plan_action.value().get() {
            match result {
                Ok(plan) => {
                    success.set(Some(format!("Plan '{}' created", plan.name)));
                    name.set(String::new());
                    price.set(String::new());
                    max_employees.set(String::new());
                    refresh();
                }
                Err(err) => {
                    log::error!("Failed to create plan: {err}");
                    error.set(Some(format!("Failed to create plan: {}", err.error)));
                }
            }
        }
    });

    let on_create_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        error.set(None);
        success.set(None);
        match parse_plan_form(&name.get(), &price.get(), &max_employees.get()) {
            Ok(payload) => create_plan_action.dispatch(payload),
            Err(message) => error.set(Some(message)),
        }
    };

    let delete_target = create_rw_signal(Option::<SubscriptionPlan>::None);
    let api_for_delete = api.clone();
    let delete_action = create_action(move |id: &String| {
        let api = api_for_delete.clone();
        let id = id.clone();
        async move { api.delete_plan(&id).await }
    });
    create_effect(move |_| {
        if let Some(result) = delete_action.value().get() {
            delete_target.set(None);
            match result {
                Ok(()) => refresh(),
                Err(err) => {
                    log::error!("Failed to delete plan: {err}");
                    error.set(Some(format!("Failed to delete plan: {}", err.error)));
                }
            }
        }
    });

    let delete_open = Signal::derive(move || delete_target.get().is_some());
    let delete_message = Signal::derive(move || {
        delete_target
            .get()
            .map(|plan| format!("Delete plan '{}'?", plan.name))
            .unwrap_or_default()
    });

    view! {
        <Layout>
            <div class="space-y-6">
                <div class="bg-surface-elevated shadow rounded-lg p-6">
                    <h2 class="text-lg font-medium text-fg mb-4">"New plan"</h2>
                    {move || error.get().map(|message| view! { <ErrorMessage message=message /> })}
                    {move || success.get().map(|message| view! { <SuccessMessage message=message /> })}
                    <form class="grid grid-cols-1 md:grid-cols-3 gap-4" on:submit=on_create_submit>
                        <div>
                            <label class="block text-sm font-medium text-fg-muted">"Name"</label>
                            <input
                                class="mt-1 w-full border border-border rounded px-2 py-1"
                                prop:value=move || name.get()
                                on:input=move |ev| name.set(event_target_value(&ev))
                            />
                        </div>
                        <div>
                            <label class="block text-sm font-medium text-fg-muted">"Monthly price"</label>
                            <input
                                type="number"
                                step="0.01"
                                class="mt-1 w-full border border-border rounded px-2 py-1"
                                prop:value=move || price.get()
                                on:input=move |ev| price.set(event_target_value(&ev))
                            />
                        </div>
                        <div>
                            <label class="block text-sm font-medium text-fg-muted">"Employee cap"</label>
                            <input
                                type="number"
                                class="mt-1 w-full border border-border rounded px-2 py-1"
                                prop:value=move || max_employees.get()
                                on:input=move |ev| max_employees.set(event_target_value(&ev))
                            />
                        </div>
                        <div class="md:col-span-3">
                            <button
                                type="submit"
                                disabled=move || create_plan_action.pending().get()
                                class="px-4 py-2 bg-action-primary-bg text-action-primary-text rounded disabled:opacity-50"
                            >
                                {move || if create_plan_action.pending().get() { "Creating..." } else { "Create plan" }}
                            </button>
                        </div>
                    </form>
                </div>

                <div class="bg-surface-elevated shadow rounded-lg p-6">
                    <h2 class="text-lg font-medium text-fg mb-4">"Plans"</h2>
                    {move || match plans.get() {
                        None => view! { <LoadingSpinner /> }.into_view(),
                        Some(Err(err)) => view! { <ErrorMessage message=format!("Failed to load plans: {}", err.error) /> }.into_view(),
                        Some(Ok(items)) if items.is_empty() => {
                            view! { <EmptyState title=EMPTY_MESSAGE /> }.into_view()
                        }
                        Some(Ok(items)) => view! {
                            <div class="overflow-x-auto">
                                <table class="min-w-full divide-y divide-border">
                                    <thead>
                                        <tr>
                                            <th class="px-4 py-3 text-left text-xs font-medium text-fg-muted uppercase tracking-wider">"Name"</th>
                                            <th class="px-4 py-3 text-right text-xs font-medium text-fg-muted uppercase tracking-wider">"Monthly price"</th>
                                            <th class="px-4 py-3 text-right text-xs font-medium text-fg-muted uppercase tracking-wider">"Employee cap"</th>
                                            <th class="px-4 py-3 text-left text-xs font-medium text-fg-muted uppercase tracking-wider">"Status"</th>
                                            <th class="px-4 py-3"></th>
                                        </tr>
                                    </thead>
                                    <tbody class="divide-y divide-border">
                                        <For each=move || items.clone() key=|plan| plan.id.clone() children=move |plan| {
                                            let delete_plan = plan.clone();
                                            view! {
                                                <tr>
                                                    <td class="px-4 py-3 text-sm text-fg">{plan.name.clone()}</td>
                                                    <td class="px-4 py-3 text-sm text-fg text-right">{format!("{:.2}", plan.price_monthly)}</td>
                                                    <td class="px-4 py-3 text-sm text-fg text-right">{plan.max_employees}</td>
                                                    <td class="px-4 py-3"><StatusBadge status=plan.status.clone() /></td>
                                                    <td class="px-4 py-3 text-right">
                                                        <button
                                                            class="px-3 py-1 text-sm rounded bg-action-danger-bg text-action-danger-text"
                                                            on:click=move |_| {
                                                                error.set(None);
                                                                success.set(None);
                                                                delete_target.set(Some(delete_plan.clone()));
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

            <ConfirmDialog
                is_open=delete_open
                title="Delete plan".to_string()
                message=delete_message
                confirm_label="Delete".to_string()
                destructive=true
                on_confirm=Callback::new(move |_| {
                    if let Some(plan) = delete_target.get() {
                        delete_action.dispatch(plan.id);
                    }
                })
                on_cancel=Callback::new(move |_| delete_target.set(None))
            />
        </Layout>
    }
}
