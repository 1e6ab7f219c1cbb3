use crate::api::ApiClient;
use leptos::*;

#[component]
pub fn HomePage() -> impl IntoView {
    let api = use_context::<ApiClient>().unwrap_or_default();
    create_effect(move |_| {
        if let Some(win) = web_sys::window() {
            let target = if api.has_session() {
                "/dashboard"
            } else {
                "/login"
            };
            let _ = win.location().set_href(target);
        }
    });
    view! {
        <div class="min-h-screen flex items-center justify-center text-fg-muted">
            "Redirecting..."
        </div>
    }
}
