//! Ключ вкладки → View. Все ключи собраны здесь

use super::tab_labels::{taxonomy_domain_for_key, PROFILE_DETAIL_PREFIX, PROFILE_EDIT_PREFIX};
use crate::domain::a001_taxonomy::ui::TaxonomyPage;
use crate::domain::a002_profile::ui::details::ProfileReview;
use crate::domain::a002_profile::ui::edit::ProfileEdit;
use crate::domain::a002_profile::ui::list::ProfileList;
use crate::domain::a003_profile_draft::ui::ProfileWizard;
use crate::layout::global_context::AppGlobalContext;
use crate::system::auth::guard::RequireAdmin;
use crate::system::pages::account::AccountSettingsPage;
use crate::system::verification::ui::VerificationQueue;
use leptos::prelude::*;

pub fn render_tab_content(key: &str, tabs_store: AppGlobalContext) -> AnyView {
    let key_for_close = key.to_string();
    let on_close = Callback::new(move |_: ()| tabs_store.close_tab(&key_for_close));

    if let Some(domain) = taxonomy_domain_for_key(key) {
        return view! {
            <RequireAdmin>
                <TaxonomyPage domain=domain />
            </RequireAdmin>
        }
        .into_any();
    }
    if let Some(id) = key.strip_prefix(PROFILE_DETAIL_PREFIX) {
        let id = id.to_string();
        return view! {
            <RequireAdmin>
                <ProfileReview id=id.clone() on_close=on_close />
            </RequireAdmin>
        }
        .into_any();
    }
    if let Some(id) = key.strip_prefix(PROFILE_EDIT_PREFIX) {
        let id = id.to_string();
        return view! {
            <RequireAdmin>
                <ProfileEdit id=id.clone() on_close=on_close />
            </RequireAdmin>
        }
        .into_any();
    }

    match key {
        "a002_profile" => view! {
            <RequireAdmin>
                <ProfileList />
            </RequireAdmin>
        }
        .into_any(),
        "sys_verification" => view! {
            <RequireAdmin>
                <VerificationQueue />
            </RequireAdmin>
        }
        .into_any(),
        "a003_profile_wizard" => view! { <ProfileWizard /> }.into_any(),
        "sys_account" => view! { <AccountSettingsPage /> }.into_any(),
        _ => {
            log::warn!("Unknown tab key: {}", key);
            view! { <div class="placeholder">"Not implemented yet"</div> }.into_any()
        }
    }
}
