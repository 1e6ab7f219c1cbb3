use crate::api::{ApiClient, ApiError, CurrentUser, LoginRequest};
use leptos::*;

type SessionContext = (ReadSignal<SessionState>, WriteSignal<SessionState>);

/// Process-wide session: set up on login, torn down on logout. Injected via
/// context so pages never reach for ambient globals.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub user: Option<CurrentUser>,
    pub is_authenticated: bool,
    pub loading: bool,
}

fn create_session_context() -> SessionContext {
    let (session, set_session) = create_signal(SessionState::default());
    set_session.update(|state| state.loading = true);

    let api = use_context::<ApiClient>().unwrap_or_default();
    let set_session_for_boot = set_session;
    spawn_local(async move {
        match bootstrap_session(&api).await {
            Ok(user) => set_session_for_boot.update(|state| {
                state.user = Some(user);
                state.is_authenticated = true;
                state.loading = false;
            }),
            Err(_) => set_session_for_boot.update(|state| {
                state.user = None;
                state.is_authenticated = false;
                state.loading = false;
            }),
        }
    });

    (session, set_session)
}

#[component]
pub fn SessionProvider(children: Children) -> impl IntoView {
    let ctx = create_session_context();
    provide_context::<SessionContext>(ctx);
    view! { <>{children()}</> }
}

pub fn use_session() -> SessionContext {
    use_context::<SessionContext>().unwrap_or_else(|| create_signal(SessionState::default()))
}

async fn bootstrap_session(api: &ApiClient) -> Result<CurrentUser, ApiError> {
    if !api.has_session() {
        return Err(ApiError::unauthorized("Not signed in"));
    }
    api.get_me().await
}

pub async fn login_request(
    request: LoginRequest,
    api: &ApiClient,
    set_session: WriteSignal<SessionState>,
) -> Result<(), ApiError> {
    set_session.update(|state| state.loading = true);

    match api.login(request).await {
        Ok(response) => {
            set_session.update(|state| {
                state.user = Some(response.user);
                state.is_authenticated = true;
                state.loading = false;
            });
            Ok(())
        }
        Err(error) => {
            set_session.update(|state| state.loading = false);
            Err(error)
        }
    }
}

pub async fn logout(
    api: &ApiClient,
    set_session: WriteSignal<SessionState>,
) -> Result<(), ApiError> {
    let result = api.logout().await;

    set_session.update(|state| {
        state.user = None;
        state.is_authenticated = false;
        state.loading = false;
    });

    result
}

pub fn use_login_action() -> Action<LoginRequest, Result<(), ApiError>> {
    let (_session, set_session) = use_session();
    let api = use_context::<ApiClient>().unwrap_or_default();

    create_action(move |request: &LoginRequest| {
        let payload = request.clone();
        let api = api.clone();
        async move { login_request(payload, &api, set_session).await }
    })
}

pub fn use_logout_action() -> Action<(), Result<(), ApiError>> {
    let (_session, set_session) = use_session();
    let api = use_context::<ApiClient>().unwrap_or_default();

    create_action(move |_: &()| {
        let api = api.clone();
        async move { logout(&api, set_session).await }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::with_runtime;

    #[test]
    fn use_session_returns_default_without_context() {
        with_runtime(|| {
            let (state, _set_state) = use_session();
            let snapshot = state.get();
            assert!(!snapshot.is_authenticated);
            assert!(snapshot.user.is_none());
            assert!(!snapshot.loading);
        });
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn login_and_logout_update_session_state() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/api/auth/login");
            then.status(200).json_body(serde_json::json!({
                "access_token": "acc-1",
                "refresh_token": "ref-1",
                "user": {
                    "id": "u1",
                    "name": "Ana Ruiz",
                    "email": "ana@acme.test",
                    "role": "hr",
                    "organization_id": "org-1"
                }
            }));
        });
        server.mock(|when, then| {
            when.method(POST).path("/api/auth/logout");
            then.status(200).json_body(serde_json::json!({}));
        });

        let runtime = create_runtime();
        let (state, set_state) = create_signal(SessionState::default());
        let api = ApiClient::new_with_base_url(server.url("/api"));

        login_request(
            LoginRequest {
                email: "ana@acme.test".into(),
                password: "secret".into(),
            },
            &api,
            set_state,
        )
        .await
        .unwrap();

        let snapshot = state.get();
        assert!(snapshot.is_authenticated);
        assert_eq!(snapshot.user.as_ref().unwrap().name, "Ana Ruiz");

        logout(&api, set_state).await.unwrap();
        let snapshot = state.get();
        assert!(!snapshot.is_authenticated);
        assert!(snapshot.user.is_none());
        runtime.dispose();
    }

    #[tokio::test]
    async fn failed_login_resets_loading_and_stays_signed_out() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/api/auth/login");
            then.status(401)
                .json_body(serde_json::json!({ "error": "Invalid credentials" }));
        });

        let runtime = create_runtime();
        let (state, set_state) = create_signal(SessionState::default());
        let api = ApiClient::new_with_base_url(server.url("/api"));

        let err = login_request(
            LoginRequest {
                email: "ana@acme.test".into(),
                password: "nope".into(),
            },
            &api,
            set_state,
        )
        .await
        .unwrap_err();
        assert!(err.is_unauthorized());

        let snapshot = state.get();
        assert!(!snapshot.is_authenticated);
        assert!(!snapshot.loading);
        runtime.dispose();
    }
}
