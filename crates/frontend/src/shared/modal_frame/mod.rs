use gloo_timers::future::TimeoutFuture;
use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Оверлей с окном диалога: заголовок, тело, кнопка закрытия
///
/// Закрытие по оверлею срабатывает только если и нажатие, и отпускание
/// мыши пришлись на сам оверлей (выделение текста в форме не закрывает окно).
#[component]
pub fn ModalFrame(
    #[prop(into)] title: Signal<String>,
    on_close: Callback<()>,
    /// Пока идёт запрос, закрыть окно нельзя
    #[prop(optional, into)]
    locked: Signal<bool>,
    #[prop(optional)] width: Option<&'static str>,
    children: Children,
) -> impl IntoView {
    let overlay_mouse_down = RwSignal::new(false);

    let is_direct = |ev: &ev::MouseEvent| match (ev.target(), ev.current_target()) {
        (Some(t), Some(ct)) => t == ct,
        _ => false,
    };

    let request_close = move || {
        if locked.get_untracked() {
            return;
        }
        // закрываем на следующем тике: обработчик клика не должен удалять свой же узел
        spawn_local(async move {
            TimeoutFuture::new(0).await;
            on_close.run(());
        });
    };

    let surface_style = format!(
        "position: relative; max-width: {}; width: 95vw;",
        width.unwrap_or("560px")
    );

    view! {
        <div
            class="modal-overlay"
            style="z-index: 1000;"
            on:mousedown=move |ev| overlay_mouse_down.set(is_direct(&ev))
            on:click=move |ev| {
                let should_close = overlay_mouse_down.get_untracked() && is_direct(&ev);
                overlay_mouse_down.set(false);
                if should_close {
                    request_close();
                }
            }
        >
            <div class="modal" style=surface_style on:click=|ev: ev::MouseEvent| ev.stop_propagation()>
                <div class="modal__header">
                    <h3 class="modal__title">{move || title.get()}</h3>
                    <button
                        class="modal__close"
                        disabled=move || locked.get()
                        on:click=move |_| request_close()
                    >
                        "×"
                    </button>
                </div>
                <div class="modal__body">
                    {children()}
                </div>
            </div>
        </div>
    }
}
