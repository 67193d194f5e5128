use contracts::domain::a001_taxonomy::kind::RecordKind;
use contracts::domain::lookup::{LookupItem, LookupQuery, LookupResponse};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::api_utils::get_json;

pub async fn fetch_lookup(kind: RecordKind, parent_id: Option<&str>) -> Result<Vec<LookupItem>, String> {
    let query = LookupQuery::new(kind, parent_id);
    let response: LookupResponse =
        get_json(&format!("/api/lookup?{}", query.to_query_string())).await?;
    Ok(response.items)
}

/// Выпадающий список записей справочника
///
/// Для дочерних типов список грузится заново при смене `parent_id`;
/// пока родитель не выбран, список пуст и выключен. Ответ на устаревший
/// запрос отбрасывается.
#[component]
pub fn LookupSelect(
    kind: RecordKind,
    #[prop(into)] label: Signal<String>,
    #[prop(into)] value: Signal<Option<String>>,
    on_change: Callback<Option<String>>,
    #[prop(optional, into)] parent_id: Option<Signal<Option<String>>>,
    #[prop(optional)] required: bool,
) -> impl IntoView {
    let items = RwSignal::new(Vec::<LookupItem>::new());
    let error = RwSignal::new(None::<String>);
    let loading = RwSignal::new(false);
    let generation = StoredValue::new(0u64);

    let needs_parent = kind.parent_kind().is_some();
    // Memo: перезагрузка только при реальной смене родителя
    let current_parent = Memo::new(move |_| parent_id.and_then(|p| p.get()));

    Effect::new(move |_| {
        let parent = current_parent.get();
        generation.update_value(|g| *g += 1);
        let ticket = generation.get_value();

        if needs_parent && parent.is_none() {
            items.set(Vec::new());
            return;
        }

        loading.set(true);
        spawn_local(async move {
            let result = fetch_lookup(kind, parent.as_deref()).await;
            if generation.get_value() != ticket {
                return;
            }
            loading.set(false);
            match result {
                Ok(list) => {
                    items.set(list);
                    error.set(None);
                }
                Err(e) => error.set(Some(e)),
            }
        });
    });

    let disabled = move || loading.get() || (needs_parent && current_parent.with(|p| p.is_none()));

    view! {
        <div class="form-group">
            <label>
                {move || label.get()}
                {required.then(|| view! { <span class="required">" *"</span> })}
            </label>
            <select
                prop:value=move || value.get().unwrap_or_default()
                disabled=disabled
                on:change=move |ev| {
                    let v = event_target_value(&ev);
                    on_change.run(if v.is_empty() { None } else { Some(v) });
                }
            >
                <option value="">{move || if loading.get() { "Loading..." } else { "Select..." }}</option>
                {move || items.get().into_iter().map(|item| {
                    let text = match &item.native_label {
                        Some(native) if !native.is_empty() => format!("{} ({})", item.label, native),
                        _ => item.label.clone(),
                    };
                    let text = if item.is_popular { format!("★ {}", text) } else { text };
                    let selected_id = item.id.clone();
                    view! {
                        <option
                            value=item.id
                            selected=move || value.get().as_deref() == Some(selected_id.as_str())
                        >
                            {text}
                        </option>
                    }
                }).collect_view()}
            </select>
            {move || error.get().map(|e| view! { <div class="field-error">{e}</div> })}
        </div>
    }
}
