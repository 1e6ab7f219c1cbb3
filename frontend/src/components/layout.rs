use crate::api::Role;
use crate::state::session::{use_logout_action, use_session};
use leptos::*;

/// Navigation is derived from the session tier; a page outside the tier is
/// never even linked.
pub fn nav_links(role: Option<Role>) -> Vec<(&'static str, &'static str)> {
    let mut links = vec![("/dashboard", "Dashboard")];
    match role {
        Some(Role::SuperAdmin) => links.extend([
            ("/platform/organizations", "Organizations"),
            ("/platform/plans", "Plans"),
            ("/platform/subscriptions", "Subscriptions"),
            ("/platform/invoices", "Invoices"),
        ]),
        Some(Role::Admin) => links.extend([
            ("/admin/employees", "Employees"),
            ("/admin/attendance", "Attendance"),
            ("/admin/leaves", "Leaves"),
            ("/admin/payroll", "Payroll"),
        ]),
        Some(Role::Hr) => links.extend([
            ("/hr/employees", "Employees"),
            ("/hr/attendance", "Attendance"),
            ("/hr/leaves", "Leaves"),
        ]),
        Some(Role::Manager) => links.extend([
            ("/manager/attendance", "Team attendance"),
            ("/manager/leaves", "Team leaves"),
        ]),
        Some(Role::Employee) => links.extend([
            ("/me/attendance", "My attendance"),
            ("/me/leaves", "My leaves"),
            ("/me/payslips", "My payslips"),
        ]),
        None => {}
    }
    links
}

#[component]
pub fn Header() -> impl IntoView {
    let (session, _set_session) = use_session();
    let links =
        create_memo(move |_| nav_links(session.get().user.as_ref().map(|user| user.role_tier())));
    let organization = create_memo(move |_| {
        session
            .get()
            .user
            .as_ref()
            .and_then(|user| user.organization_name.clone())
    });

    let logout_action = use_logout_action();
    let logout_pending = logout_action.pending();
    create_effect(move |_| {
        if logout_action.value().get().is_some() {
            if let Some(win) = web_sys::window() {
                let _ = win.location().set_href("/login");
            }
        }
    });
    let on_logout = move |_| {
        if logout_pending.get_untracked() {
            return;
        }
        logout_action.dispatch(());
    };

    view! {
        <header class="bg-surface-elevated shadow-sm border-b border-border">
            <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8">
                <div class="flex justify-between items-center h-16">
                    <div class="flex items-center gap-3">
                        <h1 class="text-xl font-semibold text-fg">"PeopleOS"</h1>
                        {move || organization.get().map(|name| view! {
                            <span class="text-sm text-fg-muted">{name}</span>
                        })}
                    </div>
                    <nav class="flex space-x-4">
                        <For
                            each=move || links.get()
                            key=|link| link.0
                            children=|(href, label)| {
                                view! {
                                    <a
                                        href=href
                                        class="text-fg-muted hover:text-fg px-3 py-2 rounded-md text-sm font-medium hover:bg-action-ghost-bg-hover"
                                    >
                                        {label}
                                    </a>
                                }
                            }
                        />
                        <button
                            on:click=on_logout
                            class="text-fg-muted hover:text-fg px-3 py-2 rounded-md text-sm font-medium disabled:opacity-50 hover:bg-action-ghost-bg-hover"
                            disabled=move || logout_pending.get()
                        >
                            "Sign out"
                        </button>
                    </nav>
                </div>
            </div>
        </header>
    }
}

#[component]
pub fn Layout(children: Children) -> impl IntoView {
    view! {
        <div class="min-h-screen bg-surface">
            <Header />
            <main class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 py-6">
                {children()}
            </main>
        </div>
    }
}

#[component]
pub fn LoadingSpinner() -> impl IntoView {
    view! {
        <div class="flex justify-center items-center py-12">
            <div class="animate-spin rounded-full h-8 w-8 border-b-2 border-action-primary-bg"></div>
        </div>
    }
}

#[component]
pub fn ErrorMessage(message: String) -> impl IntoView {
    view! {
        <div class="bg-status-error-bg border border-status-error-border text-status-error-text px-4 py-3 rounded mb-4">
            <p class="text-sm">{message}</p>
        </div>
    }
}

#[component]
pub fn SuccessMessage(message: String) -> impl IntoView {
    view! {
        <div class="bg-status-success-bg border border-status-success-border text-status-success-text px-4 py-3 rounded mb-4">
            <p class="text-sm">{message}</p>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::nav_links;
    use crate::api::Role;

    #[test]
    fn every_tier_gets_only_its_own_links() {
        let manager: Vec<_> = nav_links(Some(Role::Manager))
            .into_iter()
            .map(|(href, _)| href)
            .collect();
        assert!(manager.contains(&"/manager/attendance"));
        assert!(!manager.iter().any(|href| href.starts_with("/hr/")));
        assert!(!manager.iter().any(|href| href.starts_with("/admin/")));

        let employee: Vec<_> = nav_links(Some(Role::Employee))
            .into_iter()
            .map(|(href, _)| href)
            .collect();
        assert!(employee.contains(&"/me/payslips"));
        assert!(!employee.iter().any(|href| href.starts_with("/platform/")));
    }

    #[test]
    fn signed_out_nav_is_just_the_dashboard() {
        assert_eq!(nav_links(None), vec![("/dashboard", "Dashboard")]);
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::{hr_user, provide_session, render_to_string};

    #[test]
    fn header_renders_hr_links_for_hr_session() {
        let html = render_to_string(move || {
            provide_session(Some(hr_user()));
            view! { <Header /> }
        });
        assert!(html.contains("/hr/leaves"));
        assert!(!html.contains("/admin/payroll"));
        assert!(html.contains("Sign out"));
    }

    #[test]
    fn layout_renders_children() {
        let html = render_to_string(move || {
            provide_session(Some(hr_user()));
            view! { <Layout><div>"child"</div></Layout> }
        });
        assert!(html.contains("child"));
    }

    #[test]
    fn renders_feedback_components() {
        let html = render_to_string(move || {
            view! {
                <div>
                    <LoadingSpinner />
                    <ErrorMessage message="something failed".into() />
                    <SuccessMessage message="saved".into() />
                </div>
            }
        });
        assert!(html.contains("something failed"));
        assert!(html.contains("saved"));
        assert!(html.contains("animate-spin"));
    }
}
