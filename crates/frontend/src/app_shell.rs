//! Корневые компоненты после `App`
//!
//! - `AppShell` - вход или основной layout
//! - `MainLayout` - Shell с боковой панелью и вкладками

use crate::layout::center::EmptyCenter;
use crate::layout::global_context::{AppGlobalContext, Tab as TabData};
use crate::layout::left::sidebar::Sidebar;
use crate::layout::tabs::TabPage;
use crate::layout::Shell;
use crate::system::auth::context::use_auth;
use crate::system::pages::login::LoginPage;
use leptos::prelude::*;

/// Sidebar слева, открытые вкладки в центре. Активная вкладка синхронизируется с `?active=`
#[component]
fn MainLayout() -> impl IntoView {
    let tabs_store = use_context::<AppGlobalContext>().expect("AppGlobalContext context not found");

    tabs_store.init_router_integration();

    view! {
        <Shell
            left=|| view! { <Sidebar /> }.into_any()
            center=move || {
                view! {
                    <EmptyCenter />
                    <For
                        each=move || tabs_store.opened.get()
                        key=|tab| tab.key.clone()
                        children=move |tab: TabData| {
                            view! { <TabPage tab=tab tabs_store=tabs_store /> }
                        }
                    />
                }
                .into_any()
            }
        />
    }
}

/// Без токена показывает форму входа
#[component]
pub fn AppShell() -> impl IntoView {
    let (auth_state, _) = use_auth();

    view! {
        <Show
            when=move || auth_state.get().access_token.is_some()
            fallback=|| view! { <LoginPage /> }
        >
            <MainLayout />
        </Show>
    }
}
