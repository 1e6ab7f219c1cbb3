use crate::api::ApiClient;
use crate::components::badge::StatusBadge;
use crate::components::empty_state::EmptyState;
use crate::components::layout::{ErrorMessage, Layout, LoadingSpinner};
use crate::utils::open_pdf_in_new_tab;
use leptos::*;

const EMPTY_MESSAGE: &str = "No invoices for this filter.";

#[derive(Clone, PartialEq, Eq)]
struct InvoicesQuery {
    status: Option<String>,
    token: u32,
}

impl InvoicesQuery {
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
}

#[component]
pub fn InvoicesPage() -> impl IntoView {
    let api = use_context::<ApiClient>().unwrap_or_default();
    let query = create_rw_signal(InvoicesQuery::initial());
    let error = create_rw_signal(Option::<String>::None);

    let api_for_list = api.clone();
    let invoices = create_resource(
        move || query.get(),
        move |q| {
            let api = api_for_list.clone();
            async move { api.list_invoices(q.status.as_deref()).await }
        },
    );

    let api_for_download = api.clone();
    let download_action = create_action(move |id: &String| {
        let api = api_for_download.clone();
        let id = id.clone();
        async move { api.download_invoice(&id).await }
    });
    create_effect(move |_| {
        if let Some(result) = download_action.value().get() {
            match result {
                Ok(bytes) => {
                    if let Err(err) = open_pdf_in_new_tab(&bytes) {
                        log::error!("Failed to open invoice PDF: {err}");
                        error.set(Some(format!("Failed to open invoice PDF: {err}")));
                    }
                }
                Err(err) => {
                    log::error!("Failed to download invoice: {err}");
                    error.set(Some(format!("Failed to download invoice: {}", err.error)));
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

    view! {
        <Layout>
            <div class="bg-surface-elevated shadow rounded-lg p-6 space-y-4">
                <div class="flex items-center justify-between">
                    <h2 class="text-lg font-medium text-fg">"Invoices"</h2>
                    <select class="border border-border rounded px-2 py-1 text-sm" on:change=on_filter_change>
                        <option value="all" selected>"All statuses"</option>
                        <option value="open">"Open"</option>
                        <option value="paid">"Paid"</option>
                        <option value="overdue">"Overdue"</option>
                    </select>
                </div>

                {move || error.get().map(|message| view! { <ErrorMessage message=message /> })}

                {move || match invoices.get() {
                    None => view! { <LoadingSpinner /> }.into_view(),
                    Some(Err(err)) => view! { <ErrorMessage message=format!("Failed to load invoices: {}", err.error) /> }.into_view(),
                    Some(Ok(items)) if items.is_empty() => {
                        view! { <EmptyState title=EMPTY_MESSAGE /> }.into_view()
                    }
                    Some(Ok(items)) => view! {
                        <div class="overflow-x-auto">
                            <table class="min-w-full divide-y divide-border">
                                <thead>
                                    <tr>
                                        <th class="px-4 py-3 text-left text-xs font-medium text-fg-muted uppercase tracking-wider">"Invoice"</th>
                                        <th class="px-4 py-3 text-left text-xs font-medium text-fg-muted uppercase tracking-wider">"Organization"</th>
                                        <th class="px-4 py-3 text-right text-xs font-medium text-fg-muted uppercase tracking-wider">"Amount"</th>
                                        <th class="px-4 py-3 text-left text-xs font-medium text-fg-muted uppercase tracking-wider">"Due"</th>
                                        <th class="px-4 py-3 text-left text-xs font-medium text-fg-muted uppercase tracking-wider">"Status"</th>
                                        <th class="px-4 py-3"></th>
                                    </tr>
                                </thead>
                                <tbody class="divide-y divide-border">
                                    <For each=move || items.clone() key=|invoice| invoice.id.clone() children=move |invoice| {
                                        let download_id = invoice.id.clone();
                                        view! {
                                            <tr>
                                                <td class="px-4 py-3 text-sm text-fg">{invoice.invoice_number.clone()}</td>
                                                <td class="px-4 py-3 text-sm text-fg-muted">{invoice.organization_name.clone().unwrap_or_else(|| invoice.organization_id.clone())}</td>
                                                <td class="px-4 py-3 text-sm text-fg text-right">{format!("{:.2}", invoice.amount)}</td>
                                                <td class="px-4 py-3 text-sm text-fg-muted">{invoice.due_date.map(|d| d.to_string()).unwrap_or_else(|| "—".into())}</td>
                                                <td class="px-4 py-3"><StatusBadge status=invoice.status.clone() /></td>
                                                <td class="px-4 py-3 text-right">
                                                    <button
                                                        class="px-3 py-1 text-sm rounded bg-surface-muted text-fg disabled:opacity-50"
                                                        disabled=move || download_action.pending().get()
                                                        on:click=move |_| {
                                                            error.set(None);
                                                            download_action.dispatch(download_id.clone());
                                                        }
                                                    >
                                                        "Download PDF"
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
