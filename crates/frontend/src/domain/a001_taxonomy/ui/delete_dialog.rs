use contracts::domain::a001_taxonomy::delete_flow::{cascade_warning, DeleteFlow};
use contracts::domain::a001_taxonomy::node::OriginTerminology;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::api;
use crate::shared::modal_frame::ModalFrame;

/// Подтверждение каскадного удаления
///
/// Состояние живёт в `flow` у родителя: диалог виден, пока `flow.is_open()`.
/// Ошибка DELETE остаётся в диалоге, список перечитывается только после успеха.
#[component]
pub fn DeleteDialog(
    flow: RwSignal<DeleteFlow>,
    /// Терминология ветки происхождения, к которой относится удаляемая запись
    #[prop(into)]
    terminology: Signal<Option<OriginTerminology>>,
    on_deleted: Callback<u64>,
) -> impl IntoView {
    let warning = Memo::new(move |_| {
        flow.with(|f| {
            f.target()
                .map(|t| cascade_warning(t, terminology.get().as_ref()))
                .unwrap_or_default()
        })
    });
    let in_flight = Signal::derive(move || flow.with(|f| f.is_in_flight()));

    let confirm = move || {
        let Some(path) = flow.try_update(|f| f.confirm()).flatten() else {
            return;
        };
        spawn_local(async move {
            match api::delete_node(&path).await {
                Ok(deleted) => {
                    flow.update(|f| f.succeeded());
                    on_deleted.run(deleted);
                }
                Err(e) => flow.update(|f| f.failed(e)),
            }
        });
    };

    let close = Callback::new(move |_| flow.update(|f| f.cancel()));

    view! {
        <Show when=move || flow.with(|f| f.is_open())>
            <ModalFrame
                title="Confirm delete".to_string()
                on_close=close
                locked=in_flight
                width="460px"
            >
                <p class="delete-warning">{move || warning.get()}</p>
                {move || flow.with(|f| f.error().map(|e| e.to_string()))
                    .map(|e| view! { <div class="error">{e}</div> })}
                <div class="details-actions">
                    <Button
                        appearance=ButtonAppearance::Primary
                        disabled=in_flight
                        on_click=move |_| confirm()
                    >
                        {move || if in_flight.get() { "Deleting..." } else { "Delete" }}
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        disabled=in_flight
                        on_click=move |_| close.run(())
                    >
                        "Cancel"
                    </Button>
                </div>
            </ModalFrame>
        </Show>
    }
}
