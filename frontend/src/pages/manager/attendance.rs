use crate::api::{ApiClient, AttendanceListQuery, AttendanceRecord, Role};
use crate::components::empty_state::EmptyState;
use crate::components::layout::{ErrorMessage, Layout, LoadingSpinner, SuccessMessage};
use crate::pages::attendance_board::{
    attendance_csv, attendance_export_filename, AttendanceQuery, AttendanceTable,
};
use crate::utils::time::{month_bounds, today_in_org_tz};
use crate::utils::trigger_csv_download;
use chrono::NaiveDate;
use leptos::*;

const EMPTY_MESSAGE: &str = "No attendance records found for this date.";
const NO_DEPARTMENT_TITLE: &str = "You are not assigned to a department yet.";
const NO_DEPARTMENT_HINT: &str = "Ask your administrator to add you to a department to see your team's attendance.";

/// The backend refuses team queries for managers without a department; that
/// specific error gets its own empty state instead of the failure banner.
enum BoardState {
    Loading,
    Failed(String),
    NoDepartment,
    Empty,
    Loaded(Vec<AttendanceRecord>),
}

fn board_state(result: Option<Result<Vec<AttendanceRecord>, crate::api::ApiError>>) -> BoardState {
    match result {
        None => BoardState::Loading,
        Some(Err(err)) if err.is_missing_department() => BoardState::NoDepartment,
        Some(Err(err)) => BoardState::Failed(format!("Failed to load attendance: {}", err.error)),
        Some(Ok(items)) if items.is_empty() => BoardState::Empty,
        Some(Ok(items)) => BoardState::Loaded(items),
    }
}

#[component]
pub fn ManagerAttendancePage() -> impl IntoView {
    let api = use_context::<ApiClient>().unwrap_or_default();
    let today = today_in_org_tz();

    let from_input = create_rw_signal(today.to_string());
    let to_input = create_rw_signal(today.to_string());
    let range_error = create_rw_signal(Option::<String>::None);
    let export_error = create_rw_signal(Option::<String>::None);
    let export_success = create_rw_signal(Option::<String>::None);

    let query = create_rw_signal(AttendanceQuery::new(Some(today), Some(today)));

    let api_for_list = api.clone();
    let records = create_resource(
        move || query.get(),
        move |q| {
            let api = api_for_list.clone();
            async move {
                let list_query = AttendanceListQuery {
                    start_date: q.start_date,
                    end_date: q.end_date,
                    status: None,
                    search: None,
                };
                api.attendance_records(Role::Manager, &list_query).await
            }
        },
    );

    let on_load_range = move |_| {
        range_error.set(None);
        export_error.set(None);
        export_success.set(None);
        let from = NaiveDate::parse_from_str(&from_input.get(), "%Y-%m-%d").ok();
        let to = NaiveDate::parse_from_str(&to_input.get(), "%Y-%m-%d").ok();
        if let (Some(from), Some(to)) = (from, to) {
            if from > to {
                range_error.set(Some("Start date must not be after end date.".into()));
                return;
            }
        }
        query.update(|q| *q = q.with_range(from, to));
    };

    let on_current_month = move |_| {
        range_error.set(None);
        let today = today_in_org_tz();
        let Some((first_day, last_day)) = month_bounds(today) else {
            return;
        };
        from_input.set(first_day.to_string());
        to_input.set(last_day.to_string());
        query.update(|q| *q = q.with_range(Some(first_day), Some(last_day)));
    };

    let on_export = move |_| {
        export_error.set(None);
        export_success.set(None);
        let Some(Ok(items)) = records.get() else {
            export_error.set(Some("Nothing to export yet.".into()));
            return;
        };
        let q = query.get();
        let filename = attendance_export_filename(q.start_date, q.end_date);
        match trigger_csv_download(&filename, &attendance_csv(&items)) {
            Ok(()) => export_success.set(Some(format!("Downloaded {filename}"))),
            Err(err) => {
                log::error!("CSV download failed: {err}");
                export_error.set(Some(format!("CSV download failed: {err}")));
            }
        }
    };

    view! {
        <Layout>
            <div class="bg-surface-elevated shadow rounded-lg p-6 space-y-4">
                <div class="flex flex-wrap items-end justify-between gap-3">
                    <h2 class="text-lg font-medium text-fg">"Team attendance"</h2>
                    <div class="flex flex-wrap items-end gap-2">
                        <div>
                            <label class="block text-xs text-fg-muted">"From"</label>
                            <input
                                type="date"
                                class="border border-border rounded px-2 py-1 text-sm"
                                prop:value=move || from_input.get()
                                on:input=move |ev| from_input.set(event_target_value(&ev))
                            />
                        </div>
                        <div>
                            <label class="block text-xs text-fg-muted">"To"</label>
                            <input
                                type="date"
                                class="border border-border rounded px-2 py-1 text-sm"
                                prop:value=move || to_input.get()
                                on:input=move |ev| to_input.set(event_target_value(&ev))
                            />
                        </div>
                        <button class="px-3 py-1.5 text-sm rounded bg-action-primary-bg text-action-primary-text" on:click=on_load_range>
                            "Load"
                        </button>
                        <button class="px-3 py-1.5 text-sm rounded bg-surface-muted text-fg" on:click=on_current_month>
                            "Current month"
                        </button>
                        <button class="px-3 py-1.5 text-sm rounded bg-surface-muted text-fg" on:click=on_export>
                            "Export CSV"
                        </button>
                    </div>
                </div>

                {move || range_error.get().map(|message| view! { <ErrorMessage message=message /> })}
                {move || export_error.get().map(|message| view! { <ErrorMessage message=message /> })}
                {move || export_success.get().map(|message| view! { <SuccessMessage message=message /> })}

                {move || match board_state(records.get()) {
                    BoardState::Loading => view! { <LoadingSpinner /> }.into_view(),
                    BoardState::Failed(message) => view! { <ErrorMessage message=message /> }.into_view(),
                    BoardState::NoDepartment => view! {
                        <EmptyState title=NO_DEPARTMENT_TITLE description=NO_DEPARTMENT_HINT.to_string() />
                    }.into_view(),
                    BoardState::Empty => view! { <EmptyState title=EMPTY_MESSAGE /> }.into_view(),
                    BoardState::Loaded(items) => view! { <AttendanceTable records=items /> }.into_view(),
                }}
            </div>
        </Layout>
    }
}
