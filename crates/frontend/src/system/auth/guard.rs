use leptos::prelude::*;

use super::context::use_auth;

/// Содержимое только для администратора; остальным: сообщение об отказе
#[component]
pub fn RequireAdmin(children: ChildrenFn) -> impl IntoView {
    let (auth_state, _) = use_auth();

    view! {
        <Show
            when=move || {
                let state = auth_state.get();
                state.access_token.is_some() && state.is_admin()
            }
            fallback=|| view! { <div class="warning-box">"Access denied. Admin privileges required."</div> }
        >
            {children()}
        </Show>
    }
}
