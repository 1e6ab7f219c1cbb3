use crate::api::{ApiClient, Subscription, UpdateSubscriptionRequest};
use crate::components::badge::StatusBadge;
use crate::components::empty_state::EmptyState;
use crate::components::layout::{ErrorMessage, Layout, LoadingSpinner, SuccessMessage};
use leptos::*;

const EMPTY_MESSAGE: &str = "No subscriptions yet.";

fn other_cycle(current: &str) -> &'static str {
    if current == "monthly" {
        "yearly"
    } else {
        "monthly"
    }
}

#[component]
pub fn SubscriptionsPage() -> impl IntoView {
    let api = use_context::<ApiClient>().unwrap_or_default();
    let error = create_rw_signal(Option::<String>::None);
    let success = create_rw_signal(Option::<String>::None);

    let list_token = create_rw_signal(0u32);
    let api_for_list = api.clone();
    let subscriptions = create_resource(
        move || list_token.get(),
        move |_| {
            let api = api_for_list.clone();
            async move { api.list_subscriptions().await }
        },
    );
    let refresh = move || list_token.update(|t| *t = t.wrapping_add(1));

    let api_for_update = api.clone();
    let update_action = create_action(move |input: &(String, UpdateSubscriptionRequest)| {
        let api = api_for_update.clone();
        let (id, payload) = input.clone();
        async move { api.update_subscription(&id, &payload).await }
    });
    create_effect(move |_| {
        if let Some(result) = update_action.value().get() {
            match result {
                Ok(subscription) => {
                    success.set(Some(format!(
                        "Subscription for {} updated",
                        subscription
                            .organization_name
                            .unwrap_or(subscription.organization_id)
                    )));
                    refresh();
                }
                Err(err) => {
                    log::error!("Failed to update subscription: {err}");
                    error.set(Some(format!("Failed to update subscription: {}", err.error)));
                }
            }
        }
    });

    view! {
        <Layout>
            <div class="bg-surface-elevated shadow rounded-lg p-6 space-y-4">
                <h2 class="text-lg font-medium text-fg">"Subscriptions"</h2>

                {move || error.get().map(|message| view! { <ErrorMessage message=message /> })}
                {move || success.get().map(|message| view! { <SuccessMessage message=message /> })}

                {move || match subscriptions.get() {
                    None => view! { <LoadingSpinner /> }.into_view(),
                    Some(Err(err)) => view! { <ErrorMessage message=format!("Failed to load subscriptions: {}", err.error) /> }.into_view(),
                    Some(Ok(items)) if items.is_empty() => {
                        view! { <EmptyState title=EMPTY_MESSAGE /> }.into_view()
                    }
                    Some(Ok(items)) => view! {
                        <div class="overflow-x-auto">
                            <table class="min-w-full divide-y divide-border">
                                <thead>
                                    <tr>
                                        <th class="px-4 py-3 text-left text-xs font-medium text-fg-muted uppercase tracking-wider">"Organization"</th>
                                        <th class="px-4 py-3 text-left text-xs font-medium text-fg-muted uppercase tracking-wider">"Plan"</th>
                                        <th class="px-4 py-3 text-left text-xs font-medium text-fg-muted uppercase tracking-wider">"Billing cycle"</th>
                                        <th class="px-4 py-3 text-left text-xs font-medium text-fg-muted uppercase tracking-wider">"Period ends"</th>
                                        <th class="px-4 py-3 text-left text-xs font-medium text-fg-muted uppercase tracking-wider">"Status"</th>
                                        <th class="px-4 py-3"></th>
                                    </tr>
                                </thead>
                                <tbody class="divide-y divide-border">
                                    <For each=move || items.clone() key=|subscription: &Subscription| subscription.id.clone() children=move |subscription| {
                                        let cycle_id = subscription.id.clone();
                                        let cycle_to = other_cycle(&subscription.billing_cycle);
                                        let cancel_id = subscription.id.clone();
                                        let is_cancelled = subscription.status == "cancelled";
                                        view! {
                                            <tr>
                                                <td class="px-4 py-3 text-sm text-fg">{subscription.organization_name.clone().unwrap_or_else(|| subscription.organization_id.clone())}</td>
                                                <td class="px-4 py-3 text-sm text-fg-muted">{subscription.plan_name.clone().unwrap_or_else(|| subscription.plan_id.clone())}</td>
                                                <td class="px-4 py-3 text-sm text-fg">{subscription.billing_cycle.clone()}</td>
                                                <td class="px-4 py-3 text-sm text-fg-muted">{subscription.current_period_end.map(|d| d.to_string()).unwrap_or_else(|| "—".into())}</td>
                                                <td class="px-4 py-3"><StatusBadge status=subscription.status.clone() /></td>
                                                <td class="px-4 py-3 text-right space-x-2 whitespace-nowrap">
                                                    <button
                                                        class="px-3 py-1 text-sm rounded bg-surface-muted text-fg"
                                                        on:click=move |_| {
                                                            error.set(None);
                                                            success.set(None);
                                                            update_action.dispatch((
                                                                cycle_id.clone(),
                                                                UpdateSubscriptionRequest {
                                                                    plan_id: None,
                                                                    billing_cycle: Some(cycle_to.to_string()),
                                                                    status: None,
                                                                },
                                                            ));
                                                        }
                                                    >
                                                        {format!("Switch to {cycle_to}")}
                                                    </button>
                                                    <button
                                                        class="px-3 py-1 text-sm rounded bg-action-danger-bg text-action-danger-text disabled:opacity-50"
                                                        disabled=is_cancelled
                                                        on:click=move |_| {
                                                            error.set(None);
                                                            success.set(None);
                                                            update_action.dispatch((
                                                                cancel_id.clone(),
                                                                UpdateSubscriptionRequest {
                                                                    plan_id: None,
                                                                    billing_cycle: None,
                                                                    status: Some("cancelled".to_string()),
                                                                },
                                                            ));
                                                        }
                                                    >
                                                        "Cancel"
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
        </Layout>
    }
}

#[cfg(test)]
mod tests {
    use super::other_cycle;

    #[test]
    fn billing_cycle_toggles_between_monthly_and_yearly() {
        assert_eq!(other_cycle("monthly"), "yearly");
        assert_eq!(other_cycle("yearly"), "monthly");
        assert_eq!(other_cycle("weekly"), "monthly");
    }
}
