use crate::api::{
    ApiClient, EmployeeListQuery, GeneratePayslipPayload, Payslip, Role,
};
use crate::components::badge::StatusBadge;
use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::empty_state::EmptyState;
use crate::components::layout::{ErrorMessage, Layout, LoadingSpinner, SuccessMessage};
use crate::utils::time::today_in_org_tz;
use chrono::Datelike;
use leptos::*;

const EMPTY_MESSAGE: &str = "No payslips found for this period.";

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
struct PayrollQuery {
    month: u32,
    year: i32,
    token: u32,
}

impl PayrollQuery {
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

fn format_amount(amount: f64) -> String {
    format!("{amount:.2}")
}

#[component]
pub fn AdminPayrollPage() -> impl IntoView {
    let api = use_context::<ApiClient>().unwrap_or_default();
    let query = create_rw_signal(PayrollQuery::current());
    let error = create_rw_signal(Option::<String>::None);
    let success = create_rw_signal(Option::<String>::None);

    let api_for_list = api.clone();
    let payslips = create_resource(
        move || query.get(),
        move |q| {
            let api = api_for_list.clone();
            async move { api.payslips(Role::Admin, Some(q.month), Some(q.year)).await }
        },
    );

    // Employee select for the generate form.
    let api_for_employees = api.clone();
    let employees = create_resource(
        || (),
        move |_| {
            let api = api_for_employees.clone();
            async move {
                api.list_employees(Role::Admin, &EmployeeListQuery::default())
                    .await
            }
        },
    );

    let month_input = create_rw_signal(query.get_untracked().month.to_string());
    let year_input = create_rw_signal(query.get_untracked().year.to_string());
    let selected_employee = create_rw_signal(String::new());

    let on_load_period = move |_| {
        error.set(None);
        success.set(None);
        let month = month_input.get().parse::<u32>().ok();
        let year = year_input.get().parse::<i32>().ok();
        match (month, year) {
            (Some(month @ 1..=12), Some(year)) => {
                query.update(|q| *q = q.with_period(month, year));
            }
            _ => error.set(Some("Enter a valid month (1-12) and year.".into())),
        }
    };

    let api_for_generate = api.clone();
    let generate_action = create_action(move |payload: &GeneratePayslipPayload| {
        let api = api_for_generate.clone();
        let payload = payload.clone();
        async move { api.generate_payslip(&payload).await }
    });
    create_effect(move |_| {
        if let Some(result) = generate_action.value().get() {
            match result {
                Ok(payslip) => {
                    success.set(Some(format!(
                        "Payslip generated for {}",
                        payslip
                            .employee_name
                            .unwrap_or_else(|| payslip.employee_id.clone())
                    )));
                    query.update(|q| *q = q.refresh());
                }
                Err(err) => {
                    log::error!("Failed to generate payslip: {err}");
                    error.set(Some(format!("Failed to generate payslip: {}", err.error)));
                }
            }
        }
    });

    let on_generate = move |_| {
        error.set(None);
        success.set(None);
        let employee_id = selected_employee.get();
        if employee_id.is_empty() {
            error.set(Some("Select an employee first.".into()));
            return;
        }
        let q = query.get();
        generate_action.dispatch(GeneratePayslipPayload {
            employee_id,
            month: q.month,
            year: q.year,
        });
    };

    let delete_target = create_rw_signal(Option::<Payslip>::None);
    let api_for_delete = api.clone();
    let delete_action = create_action(move |id: &String| {
        let api = api_for_delete.clone();
        let id = id.clone();
        async move { api.delete_payslip(&id).await }
    });
    create_effect(move |_| {
        if let Some(result) = delete_action.value().get() {
            delete_target.set(None);
            match result {
                Ok(()) => query.update(|q| *q = q.refresh()),
                Err(err) => {
                    log::error!("Failed to delete payslip: {err}");
                    error.set(Some(format!("Failed to delete payslip: {}", err.error)));
                }
            }
        }
    });

    let delete_open = Signal::derive(move || delete_target.get().is_some());
    let delete_message = Signal::derive(move || {
        delete_target
            .get()
            .map(|payslip| {
                format!(
                    "Delete the {}-{:02} payslip for {}?",
                    payslip.year,
                    payslip.month,
                    payslip
                        .employee_name
                        .unwrap_or_else(|| payslip.employee_id.clone())
                )
            })
            .unwrap_or_default()
    });

    view! {
        <Layout>
            <div class="space-y-6">
                <div class="bg-surface-elevated shadow rounded-lg p-6 space-y-4">
                    <div class="flex flex-wrap items-end justify-between gap-3">
                        <h2 class="text-lg font-medium text-fg">"Payroll"</h2>
                        <div class="flex flex-wrap items-end gap-2">
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

                    {move || error.get().map(|message| view! { <ErrorMessage message=message /> })}
                    {move || success.get().map(|message| view! { <SuccessMessage message=message /> })}

                    <div class="flex flex-wrap items-end gap-2 p-4 border border-border rounded">
                        <div class="grow">
                            <label class="block text-xs text-fg-muted">"Employee"</label>
                            <select
                                class="mt-1 w-full border border-border rounded px-2 py-1 text-sm"
                                on:change=move |ev| selected_employee.set(event_target_value(&ev))
                            >
                                <option value="" selected>"Select an employee"</option>
                                {move || match employees.get() {
                                    Some(Ok(items)) => items
                                        .into_iter()
                                        .map(|employee| {
                                            view! {
                                                <option value=employee.id.clone()>{employee.full_name()}</option>
                                            }
                                        })
                                        .collect_view(),
                                    _ => ().into_view(),
                                }}
                            </select>
                        </div>
                        <button
                            class="px-3 py-1.5 text-sm rounded bg-action-primary-bg text-action-primary-text disabled:opacity-50"
                            disabled=move || generate_action.pending().get()
                            on:click=on_generate
                        >
                            {move || if generate_action.pending().get() { "Generating..." } else { "Generate payslip" }}
                        </button>
                    </div>

                    {move || match payslips.get() {
                        None => view! { <LoadingSpinner /> }.into_view(),
                        Some(Err(err)) => view! { <ErrorMessage message=format!("Failed to load payslips: {}", err.error) /> }.into_view(),
                        Some(Ok(items)) if items.is_empty() => {
                            view! { <EmptyState title=EMPTY_MESSAGE /> }.into_view()
                        }
                        Some(Ok(items)) => view! {
                            <div class="overflow-x-auto">
                                <table class="min-w-full divide-y divide-border">
                                    <thead>
                                        <tr>
                                            <th class="px-4 py-3 text-left text-xs font-medium text-fg-muted uppercase tracking-wider">"Employee"</th>
                                            <th class="px-4 py-3 text-left text-xs font-medium text-fg-muted uppercase tracking-wider">"Period"</th>
                                            <th class="px-4 py-3 text-right text-xs font-medium text-fg-muted uppercase tracking-wider">"Gross"</th>
                                            <th class="px-4 py-3 text-right text-xs font-medium text-fg-muted uppercase tracking-wider">"Net"</th>
                                            <th class="px-4 py-3 text-left text-xs font-medium text-fg-muted uppercase tracking-wider">"Status"</th>
                                            <th class="px-4 py-3"></th>
                                        </tr>
                                    </thead>
                                    <tbody class="divide-y divide-border">
                                        <For each=move || items.clone() key=|payslip| payslip.id.clone() children=move |payslip| {
                                            let delete_payslip = payslip.clone();
                                            view! {
                                                <tr>
                                                    <td class="px-4 py-3 text-sm text-fg">{payslip.employee_name.clone().unwrap_or_else(|| payslip.employee_id.clone())}</td>
                                                    <td class="px-4 py-3 text-sm text-fg-muted">{format!("{}-{:02}", payslip.year, payslip.month)}</td>
                                                    <td class="px-4 py-3 text-sm text-fg text-right">{format_amount(payslip.gross_salary)}</td>
                                                    <td class="px-4 py-3 text-sm text-fg text-right">{format_amount(payslip.net_salary)}</td>
                                                    <td class="px-4 py-3"><StatusBadge status=payslip.status.clone() /></td>
                                                    <td class="px-4 py-3 text-right">
                                                        <button
                                                            class="px-3 py-1 text-sm rounded bg-action-danger-bg text-action-danger-text"
                                                            on:click=move |_| {
                                                                error.set(None);
                                                                success.set(None);
                                                                delete_target.set(Some(delete_payslip.clone()));
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
                title="Delete payslip".to_string()
                message=delete_message
                confirm_label="Delete".to_string()
                destructive=true
                on_confirm=Callback::new(move |_| {
                    if let Some(payslip) = delete_target.get() {
                        delete_action.dispatch(payslip.id);
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
    fn period_changes_bump_the_query_token() {
        let query = PayrollQuery {
            month: 3,
            year: 2026,
            token: 0,
        };
        let next = query.with_period(4, 2026);
        assert_eq!(next.month, 4);
        assert_ne!(query, next);
        assert_ne!(next, next.refresh());
    }

    #[test]
    fn amounts_render_with_two_decimals() {
        assert_eq!(format_amount(4104.5), "4104.50");
        assert_eq!(format_amount(5200.0), "5200.00");
    }
}
