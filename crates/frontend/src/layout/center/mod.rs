pub mod tab_strip;

use crate::layout::global_context::AppGlobalContext;
use leptos::prelude::*;
use tab_strip::TabStrip;

#[component]
pub fn Center(children: Children) -> impl IntoView {
    view! {
        <div data-zone="center" class="app-tabs" style="flex: 1; overflow: auto;">
            <TabStrip />
            {children()}
        </div>
    }
}

/// Пустой центр: ни одной вкладки не открыто
#[component]
pub fn EmptyCenter() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext context not found");
    view! {
        <Show when=move || ctx.opened.with(|tabs| tabs.is_empty())>
            <div class="placeholder">"Choose a section in the sidebar"</div>
        </Show>
    }
}
