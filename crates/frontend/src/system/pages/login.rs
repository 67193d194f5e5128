use contracts::system::auth::RegisterRequest;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::system::auth::api;
use crate::system::auth::context::{apply_login, use_auth};

fn optional(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let (registering, set_registering) = signal(false);
    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (full_name, set_full_name) = signal(String::new());
    let (error_message, set_error_message) = signal(Option::<String>::None);
    let (is_loading, set_is_loading) = signal(false);

    let (_, set_auth_state) = use_auth();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        let username_val = username.get();
        let password_val = password.get();
        let register = registering.get();

        let request = RegisterRequest {
            username: username_val.trim().to_string(),
            password: password_val.clone(),
            email: optional(email.get()),
            full_name: optional(full_name.get()),
        };
        if register {
            if let Err(e) = request.validate() {
                set_error_message.set(Some(e));
                return;
            }
        }

        set_is_loading.set(true);
        set_error_message.set(None);

        spawn_local(async move {
            let result = if register {
                api::register(request).await
            } else {
                api::login(username_val, password_val).await
            };
            match result {
                // переключает AppShell на основной layout
                Ok(response) => apply_login(response, set_auth_state),
                Err(e) => {
                    let action = if register { "Registration" } else { "Login" };
                    set_error_message.set(Some(format!("{} failed: {}", action, e)));
                }
            }
            set_is_loading.set(false);
        });
    };

    view! {
        <div class="login-container">
            <div class="login-box">
                <h1>"Rishta"</h1>
                <h2>{move || if registering.get() { "Create an account" } else { "Sign in" }}</h2>

                <Show when=move || error_message.get().is_some()>
                    <div class="error-message">
                        {move || error_message.get().unwrap_or_default()}
                    </div>
                </Show>

                <form on:submit=on_submit>
                    <div class="form-group">
                        <label for="username">"Username"</label>
                        <input
                            type="text"
                            id="username"
                            prop:value=move || username.get()
                            on:input=move |ev| set_username.set(event_target_value(&ev))
                            required
                            disabled=move || is_loading.get()
                        />
                    </div>

                    <div class="form-group">
                        <label for="password">"Password"</label>
                        <input
                            type="password"
                            id="password"
                            prop:value=move || password.get()
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                            required
                            disabled=move || is_loading.get()
                        />
                    </div>

                    <Show when=move || registering.get()>
                        <div class="form-group">
                            <label for="email">"Email"</label>
                            <input
                                type="email"
                                id="email"
                                prop:value=move || email.get()
                                on:input=move |ev| set_email.set(event_target_value(&ev))
                                disabled=move || is_loading.get()
                            />
                        </div>
                        <div class="form-group">
                            <label for="full_name">"Full name"</label>
                            <input
                                type="text"
                                id="full_name"
                                prop:value=move || full_name.get()
                                on:input=move |ev| set_full_name.set(event_target_value(&ev))
                                disabled=move || is_loading.get()
                            />
                        </div>
                    </Show>

                    <button
                        type="submit"
                        class="btn-primary"
                        disabled=move || is_loading.get()
                    >
                        {move || match (is_loading.get(), registering.get()) {
                            (true, _) => "Please wait...",
                            (false, true) => "Register",
                            (false, false) => "Sign in",
                        }}
                    </button>
                </form>

                <div class="login-info">
                    <button
                        class="link-button"
                        on:click=move |_| {
                            set_error_message.set(None);
                            set_registering.update(|r| *r = !*r);
                        }
                    >
                        {move || if registering.get() {
                            "Already have an account? Sign in"
                        } else {
                            "No account yet? Register"
                        }}
                    </button>
                </div>
            </div>
        </div>
    }
}
