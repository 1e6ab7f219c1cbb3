use crate::api::{ApiClient, LeaveRequest, Role};
use crate::components::badge::StatusBadge;
use crate::components::empty_state::EmptyState;
use crate::components::layout::{ErrorMessage, LoadingSpinner};
use leptos::*;

/// Approve is never gated on input; reject requires a reason before the
/// button enables.
pub fn rejection_reason_valid(reason: &str) -> bool {
    !reason.trim().is_empty()
}

pub fn can_review(status: &str) -> bool {
    status == "pending"
}

#[derive(Clone, PartialEq, Eq)]
struct LeavesQuery {
    status: Option<String>,
    token: u32,
}

impl LeavesQuery {
    fn initial() -> Self {
        Self {
            status: None,
            token: 0,
        }
    }

    fn with_status(&self, status: Option<String>) -> Self {
        Self {
            status,
            token: self.token.wrapping_add(1),
        }
    }

    fn refresh(&self) -> Self {
        Self {
            status: self.status.clone(),
            token: self.token.wrapping_add(1),
        }
    }
}

/// Review board shared by the admin, HR, and manager leave pages. The role
/// fixes which `/company/{role}/leaves` prefix every call goes through.
#[component]
pub fn LeaveReviewPanel(role: Role, #[prop(into)] empty_message: String) -> impl IntoView {
    let api = use_context::<ApiClient>().unwrap_or_default();
    let query = create_rw_signal(LeavesQuery::initial());
    let error = create_rw_signal(Option::<String>::None);

    let api_for_list = api.clone();
    let leaves = create_resource(
        move || query.get(),
        move |q| {
            let api = api_for_list.clone();
            async move { api.leaves(role, q.status.as_deref()).await }
        },
    );

    let api_for_approve = api.clone();
    let approve_action = create_action(move |id: &String| {
        let api = api_for_approve.clone();
        let id = id.clone();
        async move { api.approve_leave(role, &id).await }
    });
    create_effect(move |_| {
        if let Some(result) = approve_action.value().get() {
            match result {
                Ok(_) => query.update(|q| *q = q.refresh()),
                Err(err) => {
                    log::error!("Failed to approve leave: {err}");
                    error.set(Some(format!("Failed to approve leave: {}", err.error)));
                }
            }
        }
    });

    let reject_target = create_rw_signal(Option::<LeaveRequest>::None);
    let reject_reason = create_rw_signal(String::new());
    let api_for_reject = api.clone();
    let reject_action = create_action(move |input: &(String, String)| {
        let api = api_for_reject.clone();
        let (id, reason) = input.clone();
        async move { api.reject_leave(role, &id, &reason).await }
    });
    create_effect(move |_| {
        if let Some(result) = reject_action.value().get() {
            reject_target.set(None);
            reject_reason.set(String::new());
            match result {
                Ok(_) => query.update(|q| *q = q.refresh()),
                Err(err) => {
                    log::error!("Failed to reject leave: {err}");
                    error.set(Some(format!("Failed to reject leave: {}", err.error)));
                }
            }
        }
    });

    let on_filter_change = move |ev: leptos::ev::Event| {
        let value = event_target_value(&ev);
        let status = if value == "all" { None } else { Some(value) };
        error.set(None);
        query.update(|q| *q = q.with_status(status));
    };

    let reject_pending = reject_action.pending();

    view! {
        <div class="space-y-6">
            <div class="bg-surface-elevated shadow rounded-lg p-6">
                <div class="flex items-center justify-between mb-4">
                    <h2 class="text-lg font-medium text-fg">"Leave requests"</h2>
                    <select class="border border-border rounded px-2 py-1 text-sm" on:change=on_filter_change>
                        <option value="all" selected>"All statuses"</option>
                        <option value="pending">"Pending"</option>
                        <option value="approved">"Approved"</option>
                        <option value="rejected">"Rejected"</option>
                        <option value="cancelled">"Cancelled"</option>
                    </select>
                </div>

                {move || error.get().map(|message| view! { <ErrorMessage message=message /> })}

                {move || match leaves.get() {
                    None => view! { <LoadingSpinner /> }.into_view(),
                    Some(Err(err)) => view! { <ErrorMessage message=format!("Failed to load leave requests: {}", err.error) /> }.into_view(),
                    Some(Ok(items)) if items.is_empty() => {
                        view! { <EmptyState title=empty_message.clone() /> }.into_view()
                    }
                    Some(Ok(items)) => view! {
                        <div class="overflow-x-auto">
                            <table class="min-w-full divide-y divide-border">
                                <thead>
                                    <tr>
                                        <th class="px-4 py-3 text-left text-xs font-medium text-fg-muted uppercase tracking-wider">"Employee"</th>
                                        <th class="px-4 py-3 text-left text-xs font-medium text-fg-muted uppercase tracking-wider">"Type"</th>
                                        <th class="px-4 py-3 text-left text-xs font-medium text-fg-muted uppercase tracking-wider">"Dates"</th>
                                        <th class="px-4 py-3 text-left text-xs font-medium text-fg-muted uppercase tracking-wider">"Days"</th>
                                        <th class="px-4 py-3 text-left text-xs font-medium text-fg-muted uppercase tracking-wider">"Reason"</th>
                                        <th class="px-4 py-3 text-left text-xs font-medium text-fg-muted uppercase tracking-wider">"Status"</th>
                                        <th class="px-4 py-3"></th>
                                    </tr>
                                </thead>
                                <tbody class="divide-y divide-border">
                                    <For each=move || items.clone() key=|leave| leave.id.clone() children=move |leave| {
                                        let reviewable = can_review(&leave.status);
                                        let approve_id = leave.id.clone();
                                        let reject_leave = leave.clone();
                                        view! {
                                            <tr>
                                                <td class="px-4 py-3 text-sm text-fg">{leave.employee_name.clone().unwrap_or_else(|| leave.employee_id.clone())}</td>
                                                <td class="px-4 py-3 text-sm text-fg">{leave.leave_type.clone()}</td>
                                                <td class="px-4 py-3 text-sm text-fg-muted">{format!("{} – {}", leave.start_date, leave.end_date)}</td>
                                                <td class="px-4 py-3 text-sm text-fg">{leave.days}</td>
                                                <td class="px-4 py-3 text-sm text-fg-muted">{leave.reason.clone().unwrap_or_default()}</td>
                                                <td class="px-4 py-3"><StatusBadge status=leave.status.clone() /></td>
                                                <td class="px-4 py-3 text-right space-x-2 whitespace-nowrap">
                                                    <button
                                                        class="px-3 py-1 text-sm rounded bg-action-primary-bg text-action-primary-text disabled:opacity-50"
                                                        disabled=!reviewable
                                                        on:click=move |_| {
                                                            error.set(None);
                                                            approve_action.dispatch(approve_id.clone());
                                                        }
                                                    >
                                                        "Approve"
                                                    </button>
                                                    <button
                                                        class="px-3 py-1 text-sm rounded bg-action-danger-bg text-action-danger-text disabled:opacity-50"
                                                        disabled=!reviewable
                                                        on:click=move |_| {
                                                            error.set(None);
                                                            reject_reason.set(String::new());
                                                            reject_target.set(Some(reject_leave.clone()));
                                                        }
                                                    >
                                                        "Reject"
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

            <Show when=move || reject_target.get().is_some()>
                <div class="fixed inset-0 z-[70] flex items-center justify-center p-4">
                    <button
                        type="button"
                        aria-label="Close"
                        class="absolute inset-0 bg-overlay-backdrop"
                        on:click=move |_| reject_target.set(None)
                    ></button>
                    <div class="relative z-[71] w-full max-w-md rounded-lg bg-surface-elevated shadow-xl border border-border p-6 space-y-4" role="dialog" aria-modal="true">
                        <h2 class="text-lg font-semibold text-fg">"Reject leave request"</h2>
                        <p class="text-sm text-fg-muted">
                            {move || reject_target.get().map(|leave| {
                                format!(
                                    "Rejecting {} – {} for {}.",
                                    leave.start_date,
                                    leave.end_date,
                                    leave.employee_name.unwrap_or(leave.employee_id)
                                )
                            })}
                        </p>
                        <textarea
                            class="w-full border border-border rounded px-3 py-2 text-sm"
                            rows="3"
                            placeholder="Reason for rejection (required)"
                            prop:value=move || reject_reason.get()
                            on:input=move |ev| reject_reason.set(event_target_value(&ev))
                        ></textarea>
                        <div class="flex justify-end gap-2">
                            <button
                                type="button"
                                class="px-4 py-2 text-sm rounded bg-surface-muted text-fg"
                                on:click=move |_| reject_target.set(None)
                            >
                                "Cancel"
                            </button>
                            <button
                                type="button"
                                class="px-4 py-2 text-sm rounded bg-action-danger-bg text-action-danger-text disabled:opacity-50"
                                disabled=move || {
                                    !rejection_reason_valid(&reject_reason.get()) || reject_pending.get()
                                }
                                on:click=move |_| {
                                    if let Some(leave) = reject_target.get() {
                                        reject_action.dispatch((leave.id, reject_reason.get()));
                                    }
                                }
                            >
                                "Reject request"
                            </button>
                        </div>
                    </div>
                </div>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::{can_review, rejection_reason_valid};

    #[test]
    fn reject_requires_a_non_empty_reason() {
        assert!(!rejection_reason_valid(""));
        assert!(!rejection_reason_valid("   "));
        assert!(!rejection_reason_valid("\n\t"));
        assert!(rejection_reason_valid("No coverage that week"));
    }

    #[test]
    fn only_pending_requests_are_reviewable() {
        assert!(can_review("pending"));
        assert!(!can_review("approved"));
        assert!(!can_review("rejected"));
        assert!(!can_review("cancelled"));
        assert!(!can_review("escalated"));
    }
}
