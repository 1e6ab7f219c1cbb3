use crate::api::{ApiClient, Payslip, PayslipComponent, Role};
use crate::components::badge::StatusBadge;
use crate::components::empty_state::EmptyState;
use crate::components::layout::{ErrorMessage, Layout, LoadingSpinner};
use crate::utils::time::today_in_org_tz;
use chrono::Datelike;
use leptos::*;

const EMPTY_MESSAGE: &str = "No payslips available for this year.";

fn split_components(components: &[PayslipComponent]) -> (Vec<PayslipComponent>, Vec<PayslipComponent>) {
    let earnings = components
        .iter()
        .filter(|component| component.kind == "earning")
        .cloned()
        .collect();
    let deductions = components
        .iter()
        .filter(|component| component.kind != "earning")
        .cloned()
        .collect();
    (earnings, deductions)
}

#[component]
pub fn EmployeePayslipsPage() -> impl IntoView {
    let api = use_context::<ApiClient>().unwrap_or_default();
    let year = create_rw_signal(today_in_org_tz().year());

    let api_for_list = api.clone();
    let payslips = create_resource(
        move || year.get(),
        move |year| {
            let api = api_for_list.clone();
            async move { api.my_payslips(Some(year)).await }
        },
    );

    // Detail fetch keyed on the selected payslip id; `None` closes the panel.
    let selected = create_rw_signal(Option::<String>::None);
    let api_for_detail = api.clone();
    let detail = create_resource(
        move || selected.get(),
        move |id| {
            let api = api_for_detail.clone();
            async move {
                match id {
                    Some(id) => api.get_payslip(Role::Employee, &id).await.map(Some),
                    None => Ok(None),
                }
            }
        },
    );

    let year_input = create_rw_signal(today_in_org_tz().year().to_string());
    let year_error = create_rw_signal(Option::<String>::None);
    let on_load_year = move |_| {
        year_error.set(None);
        match year_input.get().parse::<i32>() {
            Ok(value) => year.set(value),
            Err(_) => year_error.set(Some("Enter a valid year.".into())),
        }
    };

    view! {
        <Layout>
            <div class="space-y-6">
                <div class="bg-surface-elevated shadow rounded-lg p-6 space-y-4">
                    <div class="flex flex-wrap items-end justify-between gap-3">
                        <h2 class="text-lg font-medium text-fg">"My payslips"</h2>
                        <div class="flex items-end gap-2">
                            <div>
                                <label class="block text-xs text-fg-muted">"Year"</label>
                                <input
                                    type="number"
                                    class="border border-border rounded px-2 py-1 text-sm w-24"
                                    prop:value=move || year_input.get()
                                    on:input=move |ev| year_input.set(event_target_value(&ev))
                                />
                            </div>
                            <button class="px-3 py-1.5 text-sm rounded bg-action-primary-bg text-action-primary-text" on:click=on_load_year>
                                "Load"
                            </button>
                        </div>
                    </div>

                    {move || year_error.get().map(|message| view! { <ErrorMessage message=message /> })}

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
                                            <th class="px-4 py-3 text-left text-xs font-medium text-fg-muted uppercase tracking-wider">"Period"</th>
                                            <th class="px-4 py-3 text-right text-xs font-medium text-fg-muted uppercase tracking-wider">"Gross"</th>
                                            <th class="px-4 py-3 text-right text-xs font-medium text-fg-muted uppercase tracking-wider">"Net"</th>
                                            <th class="px-4 py-3 text-left text-xs font-medium text-fg-muted uppercase tracking-wider">"Status"</th>
                                            <th class="px-4 py-3"></th>
                                        </tr>
                                    </thead>
                                    <tbody class="divide-y divide-border">
                                        <For each=move || items.clone() key=|payslip: &Payslip| payslip.id.clone() children=move |payslip| {
                                            let detail_id = payslip.id.clone();
                                            view! {
                                                <tr>
                                                    <td class="px-4 py-3 text-sm text-fg">{format!("{}-{:02}", payslip.year, payslip.month)}</td>
                                                    <td class="px-4 py-3 text-sm text-fg text-right">{format!("{:.2}", payslip.gross_salary)}</td>
                                                    <td class="px-4 py-3 text-sm text-fg text-right">{format!("{:.2}", payslip.net_salary)}</td>
                                                    <td class="px-4 py-3"><StatusBadge status=payslip.status.clone() /></td>
                                                    <td class="px-4 py-3 text-right">
                                                        <button
                                                            class="px-3 py-1 text-sm rounded bg-surface-muted text-fg"
                                                            on:click=move |_| selected.set(Some(detail_id.clone()))
                                                        >
                                                            "View breakdown"
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

                <Show when=move || selected.get().is_some()>
                    <div class="bg-surface-elevated shadow rounded-lg p-6 space-y-4">
                        <div class="flex items-center justify-between">
                            <h2 class="text-lg font-medium text-fg">"Breakdown"</h2>
                            <button class="text-sm text-fg-muted hover:text-fg" on:click=move |_| selected.set(None)>
                                "Close"
                            </button>
                        </div>
                        {move || match detail.get() {
                            None => view! { <LoadingSpinner /> }.into_view(),
                            Some(Err(err)) => view! { <ErrorMessage message=format!("Failed to load payslip: {}", err.error) /> }.into_view(),
                            Some(Ok(None)) => ().into_view(),
                            Some(Ok(Some(payslip))) => {
                                let (earnings, deductions) = split_components(&payslip.components);
                                view! {
                                    <div class="grid grid-cols-1 md:grid-cols-2 gap-6">
                                        <div>
                                            <h3 class="text-sm font-semibold text-fg mb-2">"Earnings"</h3>
                                            <For each=move || earnings.clone() key=|component| component.name.clone() children=|component| {
                                                view! {
                                                    <div class="flex justify-between text-sm py-1 border-b border-border">
                                                        <span class="text-fg-muted">{component.name.clone()}</span>
                                                        <span class="text-fg">{format!("{:.2}", component.amount)}</span>
                                                    </div>
                                                }
                                            } />
                                        </div>
                                        <div>
                                            <h3 class="text-sm font-semibold text-fg mb-2">"Deductions"</h3>
                                            <For each=move || deductions.clone() key=|component| component.name.clone() children=|component| {
                                                view! {
                                                    <div class="flex justify-between text-sm py-1 border-b border-border">
                                                        <span class="text-fg-muted">{component.name.clone()}</span>
                                                        <span class="text-fg">{format!("{:.2}", component.amount)}</span>
                                                    </div>
                                                }
                                            } />
                                        </div>
                                        <div class="md:col-span-2 flex justify-end gap-8 text-sm font-semibold text-fg">
                                            <span>{format!("Gross {:.2}", payslip.gross_salary)}</span>
                                            <span>{format!("Net {:.2}", payslip.net_salary)}</span>
                                        </div>
                                    </div>
                                }.into_view()
                            }
                        }}
                    </div>
                </Show>
            </div>
        </Layout>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn component(name: &str, kind: &str, amount: f64) -> PayslipComponent {
        PayslipComponent {
            name: name.into(),
            kind: kind.into(),
            amount,
        }
    }

    #[test]
    fn components_split_by_kind() {
        let components = vec![
            component("Base salary", "earning", 5000.0),
            component("Bonus", "earning", 200.0),
            component("Income tax", "deduction", 895.5),
        ];
        let (earnings, deductions) = split_components(&components);
        assert_eq!(earnings.len(), 2);
        assert_eq!(deductions.len(), 1);
        assert_eq!(deductions[0].name, "Income tax");
    }

    #[test]
    fn unknown_kinds_count_as_deductions() {
        let (earnings, deductions) = split_components(&[component("Adjustment", "other", 10.0)]);
        assert!(earnings.is_empty());
        assert_eq!(deductions.len(), 1);
    }
}
