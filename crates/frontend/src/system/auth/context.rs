use contracts::system::auth::{LoginResponse, UserInfo};
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{api, storage};

#[derive(Clone, Debug, Default)]
pub struct AuthState {
    pub access_token: Option<String>,
    pub user_info: Option<UserInfo>,
}

impl AuthState {
    pub fn is_admin(&self) -> bool {
        self.user_info.as_ref().map(|u| u.is_admin).unwrap_or(false)
    }
}

/// Провайдер состояния входа. Сессия восстанавливается из localStorage
#[component]
pub fn AuthProvider(children: ChildrenFn) -> impl IntoView {
    let (auth_state, set_auth_state) = signal(AuthState::default());

    Effect::new(move |_| {
        spawn_local(async move {
            let Some(access_token) = storage::get_access_token() else {
                return;
            };
            match api::get_current_user().await {
                Ok(user_info) => set_auth_state.set(AuthState {
                    access_token: Some(access_token),
                    user_info: Some(user_info),
                }),
                Err(e) => {
                    log::warn!("Stored session rejected: {}", e);
                    storage::clear_tokens();
                }
            }
        });
    });

    provide_context(auth_state);
    provide_context(set_auth_state);

    children()
}

pub fn use_auth() -> (ReadSignal<AuthState>, WriteSignal<AuthState>) {
    let auth_state =
        use_context::<ReadSignal<AuthState>>().expect("AuthProvider not found in component tree");
    let set_auth_state =
        use_context::<WriteSignal<AuthState>>().expect("AuthProvider not found in component tree");

    (auth_state, set_auth_state)
}

/// Сохранить токен и переключить приложение в режим "вошёл"
pub fn apply_login(response: LoginResponse, set_auth_state: WriteSignal<AuthState>) {
    storage::save_access_token(&response.access_token);
    set_auth_state.set(AuthState {
        access_token: Some(response.access_token),
        user_info: Some(response.user),
    });
}

pub fn do_logout(set_auth_state: WriteSignal<AuthState>) {
    storage::clear_tokens();
    set_auth_state.set(AuthState::default());
}
