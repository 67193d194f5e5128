//! Поля мастера, привязанные к `RwSignal<ProfileDraft>` через пары get/set

use contracts::domain::a001_taxonomy::kind::RecordKind;
use contracts::domain::a003_profile_draft::ProfileDraft;
use leptos::prelude::*;

use crate::shared::components::lookup_select::LookupSelect;

pub type Getter<T> = fn(&ProfileDraft) -> T;
pub type Setter<T> = fn(&mut ProfileDraft, T);

fn label_view(label: &'static str, required: bool) -> impl IntoView {
    view! {
        <label>
            {label}
            {required.then(|| view! { <span class="required">" *"</span> })}
        </label>
    }
}

pub fn text_field(
    draft: RwSignal<ProfileDraft>,
    label: &'static str,
    required: bool,
    get: Getter<String>,
    set: Setter<String>,
) -> impl IntoView {
    view! {
        <div class="form-group">
            {label_view(label, required)}
            <input
                type="text"
                prop:value=move || draft.with(get)
                on:input=move |ev| draft.update(|d| set(d, event_target_value(&ev)))
            />
        </div>
    }
}

pub fn text_area(
    draft: RwSignal<ProfileDraft>,
    label: &'static str,
    required: bool,
    get: Getter<String>,
    set: Setter<String>,
) -> impl IntoView {
    view! {
        <div class="form-group">
            {label_view(label, required)}
            <textarea
                rows="6"
                prop:value=move || draft.with(get)
                on:input=move |ev| draft.update(|d| set(d, event_target_value(&ev)))
            ></textarea>
        </div>
    }
}

pub fn date_field(
    draft: RwSignal<ProfileDraft>,
    label: &'static str,
    get: Getter<String>,
    set: Setter<String>,
) -> impl IntoView {
    view! {
        <div class="form-group">
            {label_view(label, true)}
            <input
                type="date"
                prop:value=move || draft.with(get)
                on:change=move |ev| draft.update(|d| set(d, event_target_value(&ev)))
            />
        </div>
    }
}

/// Числовое поле; пустой или нечисловой ввод даёт None
pub fn number_field<T>(
    draft: RwSignal<ProfileDraft>,
    label: &'static str,
    required: bool,
    get: Getter<Option<T>>,
    set: Setter<Option<T>>,
) -> impl IntoView
where
    T: std::str::FromStr + ToString + Send + Sync + 'static,
{
    view! {
        <div class="form-group">
            {label_view(label, required)}
            <input
                type="number"
                min="0"
                prop:value=move || draft.with(get).map(|v| v.to_string()).unwrap_or_default()
                on:input=move |ev| {
                    let parsed = event_target_value(&ev).trim().parse::<T>().ok();
                    draft.update(|d| set(d, parsed));
                }
            />
        </div>
    }
}

/// Выбор из фиксированного списка `(value, title)`
pub fn choice_field(
    draft: RwSignal<ProfileDraft>,
    label: &'static str,
    required: bool,
    options: &'static [(&'static str, &'static str)],
    get: Getter<String>,
    set: Setter<String>,
) -> impl IntoView {
    view! {
        <div class="form-group">
            {label_view(label, required)}
            <select
                prop:value=move || draft.with(get)
                on:change=move |ev| draft.update(|d| set(d, event_target_value(&ev)))
            >
                <option value="">"Select..."</option>
                {options.iter().map(|(value, title)| view! {
                    <option value=*value selected=move || draft.with(get) == *value>{*title}</option>
                }).collect_view()}
            </select>
        </div>
    }
}

/// Выбор из справочника. `parent` задаёт каскад: без родителя список выключен
pub fn lookup_field(
    draft: RwSignal<ProfileDraft>,
    kind: RecordKind,
    label: &'static str,
    required: bool,
    get: Getter<Option<String>>,
    parent: Option<Getter<Option<String>>>,
    set: Setter<Option<String>>,
) -> impl IntoView {
    let label = Signal::derive(move || label.to_string());
    let value = Signal::derive(move || draft.with(get));
    let on_change = Callback::new(move |v: Option<String>| draft.update(|d| set(d, v)));
    match parent {
        Some(parent) => view! {
            <LookupSelect
                kind=kind
                label=label
                value=value
                parent_id=Signal::derive(move || draft.with(parent))
                on_change=on_change
                required=required
            />
        }
        .into_any(),
        None => view! {
            <LookupSelect
                kind=kind
                label=label
                value=value
                on_change=on_change
                required=required
            />
        }
        .into_any(),
    }
}
