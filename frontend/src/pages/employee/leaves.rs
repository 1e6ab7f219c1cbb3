use crate::api::{ApiClient, CreateLeavePayload, LeaveRequest};
use crate::components::badge::StatusBadge;
use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::empty_state::EmptyState;
use crate::components::layout::{ErrorMessage, Layout, LoadingSpinner, SuccessMessage};
use chrono::NaiveDate;
use leptos::*;

const EMPTY_MESSAGE: &str = "You have no leave requests yet.";

fn parse_range(from: &str, to: &str) -> Result<(NaiveDate, NaiveDate), String> {
    let start = NaiveDate::parse_from_str(from, "%Y-%m-%d")
        .map_err(|_| "Enter a valid start date.".to_string())?;
    let end = NaiveDate::parse_from_str(to, "%Y-%m-%d")
        .map_err(|_| "Enter a valid end date.".to_string())?;
    if start > end {
        return Err("Start date must not be after end date.".to_string());
    }
    Ok((start, end))
}

fn can_cancel(status: &str) -> bool {
    status == "pending"
}

#[component]
pub fn EmployeeLeavesPage() -> impl IntoView {
    let api = use_context::<ApiClient>().unwrap_or_default();
    let error = create_rw_signal(Option::<String>::None);
    let success = create_rw_signal(Option::<String>::None);

    let list_token = create_rw_signal(0u32);
    let api_for_list = api.clone();
    let leaves = create_resource(
        move || list_token.get(),
        move |_| {
            let api = api_for_list.clone();
            async move { api.my_leaves().await }
        },
    );
    let refresh = move || list_token.update(|t| *t = t.wrapping_add(1));

    // Request form
    let leave_type = create_rw_signal(String::from("annual"));
    let from_input = create_rw_signal(String::new());
    let to_input = create_rw_signal(String::new());
    let reason = create_rw_signal(String::new());

    let api_for_create = api.clone();
    let create_leave_action = create_action(move |payload: &CreateLeavePayload| {
        let api = api_for_create.clone();
        let payload = payload.clone();
        async move { api.create_leave(&payload).await }
    });
    create_effect(move |_| {
        if let Some(result) = create_leave_action.value().get() {
            match result {
                Ok(_) => {
                    success.set(Some("Leave request submitted.".into()));
                    from_input.set(String::new());
                    to_input.set(String::new());
                    reason.set(String::new());
                    refresh();
                }
                Err(err) => {
                    log::error!("Failed to submit leave request: {err}");
                    error.set(Some(format!("Failed to submit leave request: {}", err.error)));
                }
            }
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        error.set(None);
        success.set(None);
        match parse_range(&from_input.get(), &to_input.get()) {
            Ok((start_date, end_date)) => {
                let reason_value = reason.get();
                create_leave_action.dispatch(CreateLeavePayload {
                    leave_type: leave_type.get(),
                    start_date,
                    end_date,
                    reason: (!reason_value.trim().is_empty()).then_some(reason_value),
                });
            }
            Err(message) => error.set(Some(message)),
        }
    };

    // Cancel
    let cancel_target = create_rw_signal(Option::<LeaveRequest>::None);
    let api_for_cancel = api.clone();
    let cancel_action = create_action(move |id: &String| {
        let api = api_for_cancel.clone();
        let id = id.clone();
        async move { api.cancel_leave(&id).await }
    });
    create_effect(move |_| {
        if let Some(result) = cancel_action.value().get() {
            cancel_target.set(None);
            match result {
                Ok(()) => refresh(),
                Err(err) => {
                    log::error!("Failed to cancel leave request: {err}");
                    error.set(Some(format!("Failed to cancel leave request: {}", err.error)));
                }
            }
        }
    });

    let cancel_open = Signal::derive(move || cancel_target.get().is_some());
    let cancel_message = Signal::derive(move || {
        cancel_target
            .get()
            .map(|leave| {
                format!(
                    "Cancel your {} leave from {} to {}?",
                    leave.leave_type, leave.start_date, leave.end_date
                )
            })
            .unwrap_or_default()
    });

    view! {
        <Layout>
            <div class="space-y-6">
                <div class="bg-surface-elevated shadow rounded-lg p-6">
                    <h2 class="text-lg font-medium text-fg mb-4">"Request leave"</h2>
                    {move || error.get().map(|message| view! { <ErrorMessage message=message /> })}
                    {move || success.get().map(|message| view! { <SuccessMessage message=message /> })}
                    <form class="grid grid-cols-1 md:grid-cols-4 gap-4" on:submit=on_submit>
                        <div>
                            <label class="block text-sm font-medium text-fg-muted">"Type"</label>
                            <select class="mt-1 w-full border border-border rounded px-2 py-1" on:change=move |ev| leave_type.set(event_target_value(&ev))>
                                <option value="annual" selected>"Annual"</option>
                                <option value="sick">"Sick"</option>
                                <option value="unpaid">"Unpaid"</option>
                                <option value="parental">"Parental"</option>
                            </select>
                        </div>
                        <div>
                            <label class="block text-sm font-medium text-fg-muted">"From"</label>
                            <input
                                type="date"
                                class="mt-1 w-full border border-border rounded px-2 py-1"
                                prop:value=move || from_input.get()
                                on:input=move |ev| from_input.set(event_target_value(&ev))
                            />
                        </div>
                        <div>
                            <label class="block text-sm font-medium text-fg-muted">"To"</label>
                            <input
                                type="date"
                                class="mt-1 w-full border border-border rounded px-2 py-1"
                                prop:value=move || to_input.get()
                                on:input=move |ev| to_input.set(event_target_value(&ev))
                            />
                        </div>
                        <div>
                            <label class="block text-sm font-medium text-fg-muted">"Reason"</label>
                            <input
                                class="mt-1 w-full border border-border rounded px-2 py-1"
                                placeholder="Optional"
                                prop:value=move || reason.get()
                                on:input=move |ev| reason.set(event_target_value(&ev))
                            />
                        </div>
                        <div class="md:col-span-4">
                            <button
                                type="submit"
                                disabled=move || create_leave_action.pending().get()
                                class="px-4 py-2 bg-action-primary-bg text-action-primary-text rounded disabled:opacity-50"
                            >
                                {move || if create_leave_action.pending().get() { "Submitting..." } else { "Submit request" }}
                            </button>
                        </div>
                    </form>
                </div>

                <div class="bg-surface-elevated shadow rounded-lg p-6">
                    <h2 class="text-lg font-medium text-fg mb-4">"My leave requests"</h2>
                    {move || match leaves.get() {
                        None => view! { <LoadingSpinner /> }.into_view(),
                        Some(Err(err)) => view! { <ErrorMessage message=format!("Failed to load leave requests: {}", err.error) /> }.into_view(),
                        Some(Ok(items)) if items.is_empty() => {
                            view! { <EmptyState title=EMPTY_MESSAGE /> }.into_view()
                        }
                        Some(Ok(items)) => view! {
                            <div class="overflow-x-auto">
                                <table class="min-w-full divide-y divide-border">
                                    <thead>
                                        <tr>
                                            <th class="px-4 py-3 text-left text-xs font-medium text-fg-muted uppercase tracking-wider">"Type"</th>
                                            <th class="px-4 py-3 text-left text-xs font-medium text-fg-muted uppercase tracking-wider">"Dates"</th>
                                            <th class="px-4 py-3 text-left text-xs font-medium text-fg-muted uppercase tracking-wider">"Days"</th>
                                            <th class="px-4 py-3 text-left text-xs font-medium text-fg-muted uppercase tracking-wider">"Status"</th>
                                            <th class="px-4 py-3 text-left text-xs font-medium text-fg-muted uppercase tracking-wider">"Decision note"</th>
                                            <th class="px-4 py-3"></th>
                                        </tr>
                                    </thead>
                                    <tbody class="divide-y divide-border">
                                        <For each=move || items.clone() key=|leave| leave.id.clone() children=move |leave| {
                                            let cancellable = can_cancel(&leave.status);
                                            let cancel_leave = leave.clone();
                                            view! {
                                                <tr>
                                                    <td class="px-4 py-3 text-sm text-fg">{leave.leave_type.clone()}</td>
                                                    <td class="px-4 py-3 text-sm text-fg-muted">{format!("{} – {}", leave.start_date, leave.end_date)}</td>
                                                    <td class="px-4 py-3 text-sm text-fg">{leave.days}</td>
                                                    <td class="px-4 py-3"><StatusBadge status=leave.status.clone() /></td>
                                                    <td class="px-4 py-3 text-sm text-fg-muted">{leave.rejection_reason.clone().unwrap_or_default()}</td>
                                                    <td class="px-4 py-3 text-right">
                                                        <button
                                                            class="px-3 py-1 text-sm rounded bg-surface-muted text-fg disabled:opacity-50"
                                                            disabled=!cancellable
                                                            on:click=move |_| {
                                                                error.set(None);
                                                                success.set(None);
                                                                cancel_target.set(Some(cancel_leave.clone()));
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
            </div>

            <ConfirmDialog
                is_open=cancel_open
                title="Cancel leave request".to_string()
                message=cancel_message
                confirm_label="Cancel request".to_string()
                destructive=true
                on_confirm=Callback::new(move |_| {
                    if let Some(leave) = cancel_target.get() {
                        cancel_action.dispatch(leave.id);
                    }
                })
                on_cancel=Callback::new(move |_| cancel_target.set(None))
            />
        </Layout>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_must_parse_and_be_ordered() {
        assert!(parse_range("2026-03-02", "2026-03-04").is_ok());
        assert!(parse_range("2026-03-04", "2026-03-02").is_err());
        assert!(parse_range("", "2026-03-04").is_err());
        assert!(parse_range("2026-03-02", "not-a-date").is_err());
    }

    #[test]
    fn single_day_ranges_are_valid() {
        let (start, end) = parse_range("2026-03-02", "2026-03-02").unwrap();
        assert_eq!(start, end);
    }

    #[test]
    fn only_pending_requests_can_be_cancelled() {
        assert!(can_cancel("pending"));
        assert!(!can_cancel("approved"));
        assert!(!can_cancel("rejected"));
        assert!(!can_cancel("cancelled"));
    }
}
