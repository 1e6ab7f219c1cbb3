use crate::components::layout::{nav_links, Layout};
use crate::state::session::use_session;
use leptos::*;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let (session, _) = use_session();
    let greeting = create_memo(move |_| {
        session
            .get()
            .user
            .as_ref()
            .map(|user| format!("Welcome back, {}", user.name))
            .unwrap_or_else(|| "Welcome".to_string())
    });
    let tier_label = create_memo(move |_| {
        session
            .get()
            .user
            .as_ref()
            .map(|user| user.role_tier().to_string())
    });
    let quick_links = create_memo(move |_| {
        nav_links(session.get().user.as_ref().map(|user| user.role_tier()))
            .into_iter()
            .filter(|(href, _)| *href != "/dashboard")
            .collect::<Vec<_>>()
    });

    view! {
        <Layout>
            <div class="space-y-6">
                <div class="bg-surface-elevated shadow rounded-lg p-6">
                    <h2 class="text-lg font-medium text-fg">{move || greeting.get()}</h2>
                    {move || tier_label.get().map(|label| view! {
                        <p class="text-sm text-fg-muted mt-1">{label}</p>
                    })}
                </div>
                <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
                    <For
                        each=move || quick_links.get()
                        key=|link| link.0
                        children=|(href, label)| {
                            view! {
                                <a
                                    href=href
                                    class="block bg-surface-elevated shadow rounded-lg p-6 hover:bg-surface-muted"
                                >
                                    <span class="text-sm font-medium text-fg">{label}</span>
                                </a>
                            }
                        }
                    />
                </div>
            </div>
        </Layout>
    }
}
