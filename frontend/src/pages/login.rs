use crate::api::LoginRequest;
use crate::components::layout::ErrorMessage;
use crate::state::session::use_login_action;
use leptos::*;

#[component]
pub fn LoginPage() -> impl IntoView {
    let email = create_rw_signal(String::new());
    let password = create_rw_signal(String::new());
    let error = create_rw_signal(Option::<String>::None);

    let login_action = use_login_action();
    let pending = login_action.pending();

    create_effect(move |_| {
        if let Some(result) = login_action.value().get() {
            match result {
                Ok(()) => {
                    if let Some(win) = web_sys::window() {
                        let _ = win.location().set_href("/dashboard");
                    }
                }
                Err(err) => {
                    log::error!("Login failed: {err}");
                    error.set(Some(err.error));
                }
            }
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        error.set(None);
        login_action.dispatch(LoginRequest {
            email: email.get(),
            password: password.get(),
        });
    };

    view! {
        <div class="min-h-screen flex items-center justify-center bg-surface px-4">
            <div class="w-full max-w-md bg-surface-elevated shadow rounded-lg p-8 space-y-6">
                <h1 class="text-2xl font-semibold text-fg text-center">"PeopleOS"</h1>
                {move || error.get().map(|message| view! { <ErrorMessage message=message /> })}
                <form class="space-y-4" on:submit=on_submit>
                    <div>
                        <label class="block text-sm font-medium text-fg-muted">"Email"</label>
                        <input
                            type="email"
                            class="mt-1 w-full border border-border rounded px-3 py-2"
                            placeholder="you@company.com"
                            on:input=move |ev| email.set(event_target_value(&ev))
                        />
                    </div>
                    <div>
                        <label class="block text-sm font-medium text-fg-muted">"Password"</label>
                        <input
                            type="password"
                            class="mt-1 w-full border border-border rounded px-3 py-2"
                            on:input=move |ev| password.set(event_target_value(&ev))
                        />
                    </div>
                    <button
                        type="submit"
                        disabled=move || pending.get()
                        class="w-full px-4 py-2 bg-action-primary-bg text-action-primary-text rounded disabled:opacity-50"
                    >
                        {move || if pending.get() { "Signing in..." } else { "Sign in" }}
                    </button>
                </form>
            </div>
        </div>
    }
}
