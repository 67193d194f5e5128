use crate::layout::global_context::{AppGlobalContext, Tab as TabData};
use leptos::ev;
use leptos::prelude::*;

#[component]
fn TabButton(tab: TabData) -> impl IntoView {
    let tabs_store = use_context::<AppGlobalContext>().expect("AppGlobalContext context not found");

    let key = StoredValue::new(tab.key.clone());
    let is_active =
        Memo::new(move |_| tabs_store.active.get().as_deref() == Some(key.get_value().as_str()));

    let on_click = move |_| tabs_store.activate_tab(&key.get_value());
    let on_close = move |ev: ev::MouseEvent| {
        ev.stop_propagation();
        tabs_store.close_tab(&key.get_value());
    };

    view! {
        <div class="tab" class:active=is_active on:click=on_click>
            <span>{move || {
                let k = key.get_value();
                tabs_store
                    .opened
                    .with(|tabs| tabs.iter().find(|t| t.key == k).map(|t| t.title.clone()))
                    .unwrap_or_default()
            }}</span>
            <button class="tab-close" on:click=on_close>"×"</button>
        </div>
    }
}

/// Полоса открытых вкладок над контентом
#[component]
pub fn TabStrip() -> impl IntoView {
    let tabs_store = use_context::<AppGlobalContext>().expect("AppGlobalContext context not found");

    view! {
        <div class="tabs-strip">
            <For
                each=move || tabs_store.opened.get()
                key=|tab| tab.key.clone()
                children=move |tab: TabData| view! { <TabButton tab=tab /> }
            />
        </div>
    }
}
