use leptos::*;

use crate::api::CurrentUser;
use crate::state::session::SessionState;

pub fn with_runtime<T>(f: impl FnOnce() -> T) -> T {
    let runtime = leptos::create_runtime();
    let result = f();
    runtime.dispose();
    result
}

#[cfg(not(target_arch = "wasm32"))]
pub fn render_to_string<F, N>(view: F) -> String
where
    F: FnOnce() -> N + 'static,
    N: IntoView + 'static,
{
    leptos_reactive::suppress_resource_load(true);
    let html = with_runtime(|| view().into_view().render_to_string().to_string());
    leptos_reactive::suppress_resource_load(false);
    html
}

fn user_with_role(role: &str) -> CurrentUser {
    CurrentUser {
        id: format!("u-{role}"),
        name: "Ana Ruiz".into(),
        email: "ana@acme.test".into(),
        role: role.into(),
        organization_id: Some("org-1".into()),
        organization_name: Some("Acme GmbH".into()),
    }
}

pub fn hr_user() -> CurrentUser {
    user_with_role("hr")
}

pub fn admin_user() -> CurrentUser {
    user_with_role("admin")
}

pub fn manager_user() -> CurrentUser {
    user_with_role("manager")
}

pub fn employee_user() -> CurrentUser {
    user_with_role("employee")
}

pub fn super_admin_user() -> CurrentUser {
    user_with_role("super_admin")
}

pub fn provide_session(
    user: Option<CurrentUser>,
) -> (ReadSignal<SessionState>, WriteSignal<SessionState>) {
    let (session, set_session) = create_signal(SessionState {
        is_authenticated: user.is_some(),
        user,
        loading: false,
    });
    provide_context((session, set_session));
    (session, set_session)
}
