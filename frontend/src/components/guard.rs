use crate::{
    api::{CurrentUser, Role},
    components::layout::LoadingSpinner,
    state::session::use_session,
};
use leptos::*;

#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let (session, _) = use_session();
    let is_authenticated = create_memo(move |_| session.get().is_authenticated);
    let is_loading = create_memo(move |_| session.get().loading);
    create_effect(move |_| {
        let state = session.get();
        if state.loading || state.is_authenticated {
            return;
        }
        if let Some(win) = web_sys::window() {
            let _ = win.location().set_href("/login");
        }
    });
    view! {
        <Show
            when=move || should_render_children(is_authenticated.get(), is_loading.get())
            fallback=move || {
                if is_loading.get() {
                    view! { <LoadingSpinner /> }.into_view()
                } else {
                    ().into_view()
                }
            }
        >
            {children()}
        </Show>
    }
}

fn should_render_children(is_authenticated: bool, is_loading: bool) -> bool {
    is_authenticated && !is_loading
}

/// Scopes a route to one permission tier. Signed-in users on the wrong tier
/// are bounced to their own dashboard instead of the login page.
#[component]
pub fn RequireRole(required: Role, children: ChildrenFn) -> impl IntoView {
    let (session, _) = use_session();
    let is_authenticated = create_memo(move |_| session.get().is_authenticated);
    let is_loading = create_memo(move |_| session.get().loading);
    let has_role = create_memo(move |_| role_allows(required, session.get().user.as_ref()));
    create_effect(move |_| {
        let state = session.get();
        if state.loading {
            return;
        }
        let target = if !state.is_authenticated {
            "/login"
        } else if !role_allows(required, state.user.as_ref()) {
            "/dashboard"
        } else {
            return;
        };
        if let Some(win) = web_sys::window() {
            let _ = win.location().set_href(target);
        }
    });
    view! {
        <Show
            when=move || {
                should_render_role_children(is_authenticated.get(), is_loading.get(), has_role.get())
            }
            fallback=move || {
                if is_loading.get() {
                    view! { <LoadingSpinner /> }.into_view()
                } else {
                    ().into_view()
                }
            }
        >
            {children()}
        </Show>
    }
}

fn role_allows(required: Role, user: Option<&CurrentUser>) -> bool {
    user.map(|u| u.role_tier() == required).unwrap_or(false)
}

fn should_render_role_children(is_authenticated: bool, is_loading: bool, has_role: bool) -> bool {
    is_authenticated && has_role && !is_loading
}

#[cfg(test)]
mod tests {
    use super::{role_allows, should_render_children, should_render_role_children};
    use crate::api::{CurrentUser, Role};

    fn user_with_role(role: &str) -> CurrentUser {
        CurrentUser {
            id: "u1".into(),
            name: "Ana Ruiz".into(),
            email: "ana@acme.test".into(),
            role: role.into(),
            organization_id: Some("org-1".into()),
            organization_name: None,
        }
    }

    #[test]
    fn guard_blocks_until_authenticated() {
        assert!(!should_render_children(false, true));
        assert!(!should_render_children(false, false));
        assert!(!should_render_children(true, true));
        assert!(should_render_children(true, false));
    }

    #[test]
    fn role_guard_requires_the_exact_tier() {
        let hr = user_with_role("hr");
        let manager = user_with_role("manager");
        assert!(role_allows(Role::Hr, Some(&hr)));
        assert!(!role_allows(Role::Hr, Some(&manager)));
        assert!(!role_allows(Role::Hr, None));
    }

    #[test]
    fn super_admin_is_not_implicitly_allowed_on_company_tiers() {
        let root = user_with_role("super_admin");
        assert!(role_allows(Role::SuperAdmin, Some(&root)));
        assert!(!role_allows(Role::Admin, Some(&root)));
    }

    #[test]
    fn unknown_roles_only_reach_employee_pages() {
        let intern = user_with_role("intern");
        assert!(role_allows(Role::Employee, Some(&intern)));
        assert!(!role_allows(Role::Manager, Some(&intern)));
    }

    #[test]
    fn role_guard_blocks_while_loading() {
        assert!(!should_render_role_children(true, true, true));
        assert!(!should_render_role_children(true, false, false));
        assert!(should_render_role_children(true, false, true));
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::{RequireAuth, RequireRole};
    use crate::api::Role;
    use crate::state::session::SessionState;
    use crate::test_support::{
        admin_user, employee_user, hr_user, manager_user, provide_session, render_to_string,
        super_admin_user,
    };
    use leptos::*;

    #[test]
    fn require_auth_renders_children_when_authenticated() {
        let html = render_to_string(move || {
            provide_session(Some(hr_user()));
            view! {
                <RequireAuth>
                    {|| view! { <div>"protected-content"</div> }}
                </RequireAuth>
            }
        });
        assert!(html.contains("protected-content"));
    }

    #[test]
    fn require_auth_hides_children_when_unauthenticated() {
        let html = render_to_string(move || {
            let (session, set_session) = create_signal(SessionState::default());
            provide_context((session, set_session));
            view! {
                <RequireAuth>
                    {|| view! { <div>"protected-content"</div> }}
                </RequireAuth>
            }
        });
        assert!(!html.contains("protected-content"));
    }

    #[test]
    fn require_role_renders_children_for_matching_tier() {
        let html = render_to_string(move || {
            provide_session(Some(hr_user()));
            view! {
                <RequireRole required=Role::Hr>
                    {|| view! { <div>"hr-protected"</div> }}
                </RequireRole>
            }
        });
        assert!(html.contains("hr-protected"));
    }

    #[test]
    fn require_role_matches_every_tier() {
        for (user, role) in [
            (super_admin_user(), Role::SuperAdmin),
            (admin_user(), Role::Admin),
            (manager_user(), Role::Manager),
            (employee_user(), Role::Employee),
        ] {
            let html = render_to_string(move || {
                provide_session(Some(user));
                view! {
                    <RequireRole required=role>
                        {|| view! { <div>"tier-ok"</div> }}
                    </RequireRole>
                }
            });
            assert!(html.contains("tier-ok"));
        }
    }

    #[test]
    fn require_role_hides_children_for_other_tiers() {
        let html = render_to_string(move || {
            provide_session(Some(hr_user()));
            view! {
                <RequireRole required=Role::Admin>
                    {|| view! { <div>"admin-protected"</div> }}
                </RequireRole>
            }
        });
        assert!(!html.contains("admin-protected"));
    }
}
