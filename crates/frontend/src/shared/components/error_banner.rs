use leptos::prelude::*;

/// Ошибка уровня страницы. Повтор только вручную, кнопкой
#[component]
pub fn ErrorBanner(
    #[prop(into)] error: Signal<Option<String>>,
    #[prop(optional)] on_retry: Option<Callback<()>>,
) -> impl IntoView {
    view! {
        {move || error.get().map(|e| view! {
            <div class="warning-box warning-box--error" role="alert">
                <span class="warning-box__icon">"⚠"</span>
                <span class="warning-box__text">{e}</span>
                {on_retry.map(|retry| view! {
                    <button class="button button--secondary" on:click=move |_| retry.run(())>
                        "Try again"
                    </button>
                })}
            </div>
        })}
    }
}
