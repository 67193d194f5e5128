use crate::shared::icons::icon;
use leptos::prelude::*;

/// Листалка для ответов `PageEnvelope`. Страницы нумеруются с 1
#[component]
pub fn PaginationControls(
    #[prop(into)] page: Signal<u64>,
    #[prop(into)] total_pages: Signal<u64>,
    #[prop(into)] total: Signal<u64>,
    on_page_change: Callback<u64>,
) -> impl IntoView {
    view! {
        <div class="pagination-controls">
            <button
                class="pagination-btn"
                on:click=move |_| {
                    let p = page.get();
                    if p > 1 {
                        on_page_change.run(p - 1);
                    }
                }
                disabled=move || { page.get() <= 1 }
                title="Previous page"
            >
                {icon("chevron-left")}
            </button>
            <span class="pagination-info">
                {move || format!("{} / {} ({})", page.get(), total_pages.get().max(1), total.get())}
            </span>
            <button
                class="pagination-btn"
                on:click=move |_| {
                    let p = page.get();
                    if p < total_pages.get() {
                        on_page_change.run(p + 1);
                    }
                }
                disabled=move || { page.get() >= total_pages.get() }
                title="Next page"
            >
                {icon("chevron-right")}
            </button>
        </div>
    }
}
