use crate::api::{ApiClient, TodayAttendance};
use crate::components::empty_state::EmptyState;
use crate::components::layout::{ErrorMessage, Layout, LoadingSpinner};
use crate::pages::attendance_board::AttendanceTable;
use crate::utils::time::today_in_org_tz;
use chrono::Datelike;
use leptos::*;

const EMPTY_MESSAGE: &str = "No attendance records found for this month.";

fn can_check_in(today: &TodayAttendance) -> bool {
    !today.checked_in
}

fn can_check_out(today: &TodayAttendance) -> bool {
    today.checked_in && !today.checked_out
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
struct HistoryQuery {
    month: u32,
    year: i32,
    token: u32,
}

impl HistoryQuery {
    fn current() -> Self {
        let today = today_in_org_tz();
        Self {
            month: today.month(),
            year: today.year(),
            token: 0,
        }
    }

    fn with_period(self, month: u32, year: i32) -> Self {
        Self {
            month,
            year,
            token: self.token.wrapping_add(1),
        }
    }

    fn refresh(self) -> Self {
        Self {
            token: self.token.wrapping_add(1),
            ..self
        }
    }
}

#[component]
pub fn EmployeeAttendancePage() -> impl IntoView {
    let api = use_context::<ApiClient>().unwrap_or_default();
    let error = create_rw_signal(Option::<String>::None);

    let today_token = create_rw_signal(0u32);
    let api_for_today = api.clone();
    let today = create_resource(
        move || today_token.get(),
        move |_| {
            let api = api_for_today.clone();
            async move { api.today_attendance().await }
        },
    );

    let history_query = create_rw_signal(HistoryQuery::current());
    let api_for_history = api.clone();
    let history = create_resource(
        move || history_query.get(),
        move |q| {
            let api = api_for_history.clone();
            async move { api.my_attendance(Some(q.month), Some(q.year)).await }
        },
    );

    let api_for_check_in = api.clone();
    let check_in_action = create_action(move |_: &()| {
        let api = api_for_check_in.clone();
        async move { api.check_in().await }
    });
    let api_for_check_out = api.clone();
    let check_out_action = create_action(move |_: &()| {
        let api = api_for_check_out.clone();
        async move { api.check_out().await }
    });

    create_effect(move |_| {
        if let Some(result) = check_in_action.value().get() {
            match result {
                Ok(_) => {
                    today_token.update(|t| *t = t.wrapping_add(1));
                    history_query.update(|q| *q = q.refresh());
                }
                Err(err) => {
                    log::error!("Check-in failed: {err}");
                    error.set(Some(format!("Check-in failed: {}", err.error)));
                }
            }
        }
    });
    create_effect(move |_| {
        if let Some(result) = check_out_action.value().get() {
            match result {
                Ok(_) => {
                    today_token.update(|t| *t = t.wrapping_add(1));
                    history_query.update(|q| *q = q.refresh());
                }
                Err(err) => {
                    log::error!("Check-out failed: {err}");
                    error.set(Some(format!("Check-out failed: {}", err.error)));
                }
            }
        }
    });

    let month_input = create_rw_signal(history_query.get_untracked().month.to_string());
    let year_input = create_rw_signal(history_query.get_untracked().year.to_string());
    let on_load_period = move |_| {
        error.set(None);
        let month = month_input.get().parse::<u32>().ok();
        let year = year_input.get().parse::<i32>().ok();
        match (month, year) {
            (Some(month @ 1..=12), Some(year)) => {
                history_query.update(|q| *q = q.with_period(month, year));
            }
            _ => error.set(Some("Enter a valid month (1-12) and year.".into())),
        }
    };

    let busy = Signal::derive(move || {
        check_in_action.pending().get() || check_out_action.pending().get()
    });

    view! {
        <Layout>
            <div class="space-y-6">
                <div class="bg-surface-elevated shadow rounded-lg p-6">
                    <h2 class="text-lg font-medium text-fg mb-4">"Today"</h2>
                    {move || error.get().map(|message| view! { <ErrorMessage message=message /> })}
                    {move || match today.get() {
                        None => view! { <LoadingSpinner /> }.into_view(),
                        Some(Err(err)) => view! { <ErrorMessage message=format!("Failed to load today's status: {}", err.error) /> }.into_view(),
                        Some(Ok(status)) => {
                            let check_in_enabled = can_check_in(&status);
                            let check_out_enabled = can_check_out(&status);
                            let record = status.record.clone();
                            view! {
                                <div class="flex flex-wrap items-center gap-4">
                                    <button
                                        class="px-4 py-2 rounded bg-action-primary-bg text-action-primary-text disabled:opacity-50"
                                        disabled=move || !check_in_enabled || busy.get()
                                        on:click=move |_| {
                                            error.set(None);
                                            check_in_action.dispatch(());
                                        }
                                    >
                                        "Check in"
                                    </button>
                                    <button
                                        class="px-4 py-2 rounded bg-surface-muted text-fg disabled:opacity-50"
                                        disabled=move || !check_out_enabled || busy.get()
                                        on:click=move |_| {
                                            error.set(None);
                                            check_out_action.dispatch(());
                                        }
                                    >
                                        "Check out"
                                    </button>
                                    {record.map(|record| view! {
                                        <div class="text-sm text-fg-muted">
                                            {format!(
                                                "Checked in {} · Checked out {}",
                                                record.check_in_time.map(|t| t.format("%H:%M").to_string()).unwrap_or_else(|| "—".into()),
                                                record.check_out_time.map(|t| t.format("%H:%M").to_string()).unwrap_or_else(|| "—".into()),
                                            )}
                                        </div>
                                    })}
                                </div>
                            }.into_view()
                        }
                    }}
                </div>

                <div class="bg-surface-elevated shadow rounded-lg p-6 space-y-4">
                    <div class="flex flex-wrap items-end justify-between gap-3">
                        <h2 class="text-lg font-medium text-fg">"My attendance"</h2>
                        <div class="flex items-end gap-2">
                            <div>
                                <label class="block text-xs text-fg-muted">"Month"</label>
                                <input
                                    type="number"
                                    min="1"
                                    max="12"
                                    class="border border-border rounded px-2 py-1 text-sm w-20"
                                    prop:value=move || month_input.get()
                                    on:input=move |ev| month_input.set(event_target_value(&ev))
                                />
                            </div>
                            <div>
                                <label class="block text-xs text-fg-muted">"Year"</label>
                                <input
                                    type="number"
                                    class="border border-border rounded px-2 py-1 text-sm w-24"
                                    prop:value=move || year_input.get()
                                    on:input=move |ev| year_input.set(event_target_value(&ev))
                                />
                            </div>
                            <button class="px-3 py-1.5 text-sm rounded bg-action-primary-bg text-action-primary-text" on:click=on_load_period>
                                "Load"
                            </button>
                        </div>
                    </div>

                    {move || match history.get() {
                        None => view! { <LoadingSpinner /> }.into_view(),
                        Some(Err(err)) => view! { <ErrorMessage message=format!("Failed to load attendance: {}", err.error) /> }.into_view(),
                        Some(Ok(items)) if items.is_empty() => {
                            view! { <EmptyState title=EMPTY_MESSAGE /> }.into_view()
                        }
                        Some(Ok(items)) => view! { <AttendanceTable records=items /> }.into_view(),
                    }}
                </div>
            </div>
        </Layout>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today(checked_in: bool, checked_out: bool) -> TodayAttendance {
        TodayAttendance {
            checked_in,
            checked_out,
            record: None,
        }
    }

    #[test]
    fn check_in_only_before_first_checkin() {
        assert!(can_check_in(&today(false, false)));
        assert!(!can_check_in(&today(true, false)));
        assert!(!can_check_in(&today(true, true)));
    }

    #[test]
    fn check_out_only_while_checked_in() {
        assert!(!can_check_out(&today(false, false)));
        assert!(can_check_out(&today(true, false)));
        assert!(!can_check_out(&today(true, true)));
    }

    #[test]
    fn history_period_changes_are_distinct_queries() {
        let query = HistoryQuery {
            month: 3,
            year: 2026,
            token: 0,
        };
        assert_ne!(query, query.with_period(2, 2026));
        assert_ne!(query, query.refresh());
    }
}
