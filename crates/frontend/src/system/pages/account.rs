use contracts::system::account::{
    validate_password_strength, AccountSettings, ChangePasswordDto, PhoneVerification, UpdateAccountDto,
};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::shared::components::error_banner::ErrorBanner;
use crate::shared::components::page_header::PageHeader;
use crate::shared::components::status_badge::verification_badge;
use crate::system::auth::api;

/// Форма с полями `email`, `full name`, `phone`
#[derive(Debug, Clone, Default, PartialEq)]
struct AccountForm {
    email: String,
    full_name: String,
    phone: String,
}

impl From<&AccountSettings> for AccountForm {
    fn from(a: &AccountSettings) -> Self {
        Self {
            email: a.email.clone().unwrap_or_default(),
            full_name: a.full_name.clone().unwrap_or_default(),
            phone: a.phone.clone().unwrap_or_default(),
        }
    }
}

impl AccountForm {
    fn to_dto(&self) -> UpdateAccountDto {
        UpdateAccountDto {
            email: Some(self.email.trim().to_string()),
            full_name: Some(self.full_name.trim().to_string()),
            phone: Some(self.phone.trim().to_string()),
        }
    }
}

#[component]
fn AccountSection(account: RwSignal<Option<AccountSettings>>, on_saved: Callback<()>) -> impl IntoView {
    let form = RwSignal::new(AccountForm::default());
    let error = RwSignal::new(None::<String>);
    let success = RwSignal::new(None::<String>);
    let saving = RwSignal::new(false);

    // форма следует за загруженными данными
    Effect::new(move |_| {
        if let Some(a) = account.get() {
            form.set(AccountForm::from(&a));
        }
    });

    let save = move |_| {
        let dto = form.with_untracked(|f| f.to_dto());
        if let Err(e) = dto.validate() {
            error.set(Some(e));
            return;
        }
        let resets = account.with_untracked(|a| {
            dto.resets_verification(a.as_ref().and_then(|a| a.phone.as_deref()))
        });
        saving.set(true);
        error.set(None);
        success.set(None);
        spawn_local(async move {
            match api::update_account(&dto).await {
                Ok(updated) => {
                    account.set(Some(updated));
                    success.set(Some(if resets {
                        "Saved. Your phone number needs to be verified again.".to_string()
                    } else {
                        "Saved".to_string()
                    }));
                    on_saved.run(());
                }
                Err(e) => error.set(Some(e)),
            }
            saving.set(false);
        });
    };

    let input = move |label: &'static str, kind: &'static str, get: fn(&AccountForm) -> String, set: fn(&mut AccountForm, String)| {
        view! {
            <div class="form-group">
                <label>{label}</label>
                <input
                    type=kind
                    prop:value=move || form.with(get)
                    on:input=move |ev| form.update(|f| set(f, event_target_value(&ev)))
                />
            </div>
        }
    };

    view! {
        <div class="details-section">
            <h3 class="details-section__title">"Account"</h3>
            <div class="field-row">
                <span class="field-row__label">"Username"</span>
                <span class="field-row__value">
                    {move || account.with(|a| a.as_ref().map(|a| a.username.clone()).unwrap_or_default())}
                </span>
            </div>
            {input("Email", "email", |f| f.email.clone(), |f, v| f.email = v)}
            {input("Full name", "text", |f| f.full_name.clone(), |f, v| f.full_name = v)}
            {input("Phone", "tel", |f| f.phone.clone(), |f, v| f.phone = v)}
            <ErrorBanner error=Signal::derive(move || error.get()) />
            {move || success.get().map(|s| view! { <div class="success">{s}</div> })}
            <div class="details-actions">
                <Button
                    appearance=ButtonAppearance::Primary
                    disabled=Signal::derive(move || saving.get() || account.with(|a| a.is_none()))
                    on_click=save
                >
                    {move || if saving.get() { "Saving..." } else { "Save" }}
                </Button>
            </div>
        </div>
    }
}

#[component]
fn PasswordSection() -> impl IntoView {
    let current = RwSignal::new(String::new());
    let new_password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let success = RwSignal::new(None::<String>);
    let saving = RwSignal::new(false);

    // подсказка по мере ввода
    let hint = Memo::new(move |_| {
        let new_value = new_password.get();
        if new_value.is_empty() {
            return None;
        }
        if let Err(e) = validate_password_strength(&new_value) {
            return Some(e);
        }
        if confirm.with(|c| !c.is_empty() && *c != new_value) {
            return Some("Passwords do not match".to_string());
        }
        None
    });

    let submit = move |_| {
        if new_password.get_untracked() != confirm.get_untracked() {
            error.set(Some("Passwords do not match".to_string()));
            return;
        }
        let dto = ChangePasswordDto {
            current_password: current.get_untracked(),
            new_password: new_password.get_untracked(),
        };
        if let Err(e) = dto.validate() {
            error.set(Some(e));
            return;
        }
        saving.set(true);
        error.set(None);
        success.set(None);
        spawn_local(async move {
            match api::change_password(&dto).await {
                Ok(()) => {
                    current.set(String::new());
                    new_password.set(String::new());
                    confirm.set(String::new());
                    success.set(Some("Password changed".to_string()));
                }
                Err(e) => error.set(Some(e)),
            }
            saving.set(false);
        });
    };

    let password_input = move |label: &'static str, value: RwSignal<String>| {
        view! {
            <div class="form-group">
                <label>{label}</label>
                <input
                    type="password"
                    prop:value=move || value.get()
                    on:input=move |ev| value.set(event_target_value(&ev))
                />
            </div>
        }
    };

    view! {
        <div class="details-section">
            <h3 class="details-section__title">"Change password"</h3>
            {password_input("Current password", current)}
            {password_input("New password", new_password)}
            {password_input("Repeat new password", confirm)}
            {move || hint.get().map(|h| view! { <div class="field-error">{h}</div> })}
            <ErrorBanner error=Signal::derive(move || error.get()) />
            {move || success.get().map(|s| view! { <div class="success">{s}</div> })}
            <div class="details-actions">
                <Button
                    appearance=ButtonAppearance::Primary
                    disabled=Signal::derive(move || {
                        saving.get() || current.with(String::is_empty) || hint.with(Option::is_some)
                            || new_password.with(String::is_empty)
                    })
                    on_click=submit
                >
                    "Change password"
                </Button>
            </div>
        </div>
    }
}

#[component]
fn PhoneSection(reload: RwSignal<u32>) -> impl IntoView {
    let verification = RwSignal::new(None::<PhoneVerification>);
    let error = RwSignal::new(None::<String>);
    let submitting = RwSignal::new(false);

    Effect::new(move |_| {
        reload.track();
        spawn_local(async move {
            match api::get_phone_verification().await {
                Ok(v) => {
                    verification.set(Some(v));
                    error.set(None);
                }
                Err(e) => error.set(Some(e)),
            }
        });
    });

    let submit = move |_| {
        submitting.set(true);
        error.set(None);
        spawn_local(async move {
            match api::submit_phone_verification().await {
                Ok(v) => verification.set(Some(v)),
                Err(e) => error.set(Some(e)),
            }
            submitting.set(false);
        });
    };

    let can_submit = Signal::derive(move || {
        verification.with(|v| {
            v.as_ref()
                .map(|v| v.phone.is_some() && v.status.can_submit())
                .unwrap_or(false)
        }) && !submitting.get()
    });

    view! {
        <div class="details-section">
            <h3 class="details-section__title">"Phone verification"</h3>
            {move || verification.get().map(|v| view! {
                <div class="field-row">
                    <span class="field-row__label">{v.phone.clone().unwrap_or_else(|| "No phone number".to_string())}</span>
                    <span class="field-row__value">{verification_badge(v.status)}</span>
                </div>
                {v.note.clone().map(|n| view! { <div class="hint">{format!("Note: {}", n)}</div> })}
            })}
            <ErrorBanner error=Signal::derive(move || error.get()) />
            <div class="details-actions">
                <Button appearance=ButtonAppearance::Secondary disabled=Signal::derive(move || !can_submit.get()) on_click=submit>
                    "Submit for verification"
                </Button>
            </div>
        </div>
    }
}

/// Настройки учётной записи: данные, пароль, подтверждение телефона
#[component]
pub fn AccountSettingsPage() -> impl IntoView {
    let account = RwSignal::new(None::<AccountSettings>);
    let load_error = RwSignal::new(None::<String>);
    // после сохранения аккаунта статус телефона мог сброситься
    let phone_reload = RwSignal::new(0u32);

    let fetch = move || {
        spawn_local(async move {
            match api::get_account().await {
                Ok(a) => {
                    account.set(Some(a));
                    load_error.set(None);
                }
                Err(e) => load_error.set(Some(e)),
            }
        });
    };

    fetch();

    view! {
        <div class="page account-settings">
            <PageHeader title="Account settings".to_string()>
                {move || account.with(|a| a.as_ref().map(|a| view! {
                    <span class="hint">{format!("Signed in as {}", a.username)}</span>
                }))}
            </PageHeader>
            <ErrorBanner
                error=Signal::derive(move || load_error.get())
                on_retry=Callback::new(move |_| fetch())
            />
            <div class="details-grid">
                <AccountSection account=account on_saved=Callback::new(move |_| phone_reload.update(|n| *n += 1)) />
                <PhoneSection reload=phone_reload />
                <PasswordSection />
            </div>
        </div>
    }
}
