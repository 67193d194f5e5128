use contracts::domain::a001_taxonomy::form::RecordForm;
use contracts::domain::a001_taxonomy::node::{TaxonomyNode, OTHER_LANGUAGE_SLUG};
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::api;
use crate::shared::modal_frame::ModalFrame;

/// Сколько висит сообщение об успехе перед автозакрытием
const AUTO_CLOSE_MS: u32 = 1_500;

/// Открытая форма: значения и id редактируемой записи (None: создание)
#[derive(Debug, Clone, PartialEq)]
pub struct FormSession {
    pub form: RecordForm,
    pub editing_id: Option<String>,
    /// Название типа с учётом терминологии ветки ("Tribe" вместо "Ethnicity")
    pub kind_title: String,
}

impl FormSession {
    pub fn create(form: RecordForm, kind_title: String) -> Self {
        Self {
            form,
            editing_id: None,
            kind_title,
        }
    }

    pub fn edit(node: &TaxonomyNode, kind_title: String) -> Self {
        Self {
            form: RecordForm::from_node(node),
            editing_id: Some(node.id.clone()),
            kind_title,
        }
    }

    fn title(&self) -> String {
        match self.editing_id {
            Some(_) => format!("Edit {}", self.kind_title.to_lowercase()),
            None => format!("New {}", self.kind_title.to_lowercase()),
        }
    }
}

#[component]
fn TextField(
    label: &'static str,
    #[prop(into)] value: Signal<String>,
    on_input: Callback<String>,
    #[prop(optional)] required: bool,
    #[prop(optional, into)] disabled: Signal<bool>,
    #[prop(optional)] placeholder: &'static str,
) -> impl IntoView {
    view! {
        <div class="form-group">
            <label>
                {label}
                {required.then(|| view! { <span class="required">" *"</span> })}
            </label>
            <input
                type="text"
                placeholder=placeholder
                prop:value=move || value.get()
                disabled=move || disabled.get()
                on:input=move |ev| on_input.run(event_target_value(&ev))
            />
        </div>
    }
}

#[component]
fn CheckField(
    label: &'static str,
    #[prop(into)] checked: Signal<bool>,
    on_toggle: Callback<bool>,
) -> impl IntoView {
    view! {
        <label class="form-check">
            <input
                type="checkbox"
                prop:checked=move || checked.get()
                on:change=move |ev| on_toggle.run(event_target_checked(&ev))
            />
            <span>{label}</span>
        </label>
    }
}

/// Диалог создания/редактирования записи справочника
///
/// Поля рисуются по варианту `RecordForm`. После успешного сохранения
/// вызывается `on_saved`, сообщение висит 1.5 с, затем окно закрывается.
#[component]
pub fn EntityFormDialog(
    session: FormSession,
    on_saved: Callback<TaxonomyNode>,
    on_close: Callback<()>,
) -> impl IntoView {
    let title = session.title();
    let editing_id = StoredValue::new(session.editing_id.clone());
    let slug_locked = session.editing_id.is_some()
        && session.form.common().slug == OTHER_LANGUAGE_SLUG;

    let form = RwSignal::new(session.form);
    let error = RwSignal::new(None::<String>);
    let success = RwSignal::new(None::<String>);
    let saving = RwSignal::new(false);

    let missing = Memo::new(move |_| form.with(|f| f.missing_required().join(", ")));
    let can_submit = Signal::derive(move || {
        form.with(|f| f.can_submit()) && !saving.get() && success.get().is_none()
    });

    let submit = move || {
        let Some(target) = form.with_untracked(|f| f.submit_target(editing_id.get_value().as_deref()))
        else {
            return;
        };
        saving.set(true);
        error.set(None);
        spawn_local(async move {
            match api::submit_form(target).await {
                Ok(node) => {
                    saving.set(false);
                    success.set(Some(format!("\"{}\" saved", node.label)));
                    on_saved.run(node);
                    TimeoutFuture::new(AUTO_CLOSE_MS).await;
                    on_close.run(());
                }
                Err(e) => {
                    saving.set(false);
                    error.set(Some(e));
                }
            }
        });
    };

    // Общие поля
    let common_fields = view! {
        <TextField
            label="Slug"
            required=true
            placeholder="lowercase_slug"
            value=Signal::derive(move || form.with(|f| f.common().slug.clone()))
            on_input=Callback::new(move |v: String| form.update(|f| f.common_mut().slug = v))
            disabled=Signal::derive(move || slug_locked)
        />
        <TextField
            label="Label"
            required=true
            value=Signal::derive(move || form.with(|f| f.common().label.clone()))
            on_input=Callback::new(move |v: String| form.update(|f| f.common_mut().label = v))
        />
        <TextField
            label="Native label"
            value=Signal::derive(move || form.with(|f| f.common().native_label.clone()))
            on_input=Callback::new(move |v: String| form.update(|f| f.common_mut().native_label = v))
        />
        <div class="form-group">
            <label>"Sort order"</label>
            <input
                type="number"
                min="0"
                max="9999"
                prop:value=move || form.with(|f| f.common().sort_order.to_string())
                on:input=move |ev| {
                    // нечисловой ввод даёт -1 и выключает кнопку сохранения
                    let v = event_target_value(&ev).trim().parse::<i32>().unwrap_or(-1);
                    form.update(|f| f.common_mut().sort_order = v);
                }
            />
            <Show when=move || !form.with(|f| f.sort_order_in_bounds())>
                <div class="field-error">"Sort order must be between 0 and 9999"</div>
            </Show>
        </div>
        <CheckField
            label="Active"
            checked=Signal::derive(move || form.with(|f| f.common().is_active))
            on_toggle=Callback::new(move |v: bool| form.update(|f| f.common_mut().is_active = v))
        />
    };

    // Поля конкретного варианта. Вариант за время сессии не меняется
    let variant_fields = match form.with_untracked(|f| f.clone()) {
        RecordForm::Plain { .. } | RecordForm::Nested { .. } => ().into_any(),
        RecordForm::Leaf { .. } => view! {
            <CheckField
                label="Popular"
                checked=Signal::derive(move || {
                    form.with(|f| matches!(f, RecordForm::Leaf { is_popular: true, .. }))
                })
                on_toggle=Callback::new(move |v: bool| form.update(|f| {
                    if let RecordForm::Leaf { is_popular, .. } = f {
                        *is_popular = v;
                    }
                }))
            />
        }
        .into_any(),
        RecordForm::Origin { .. } => view! { <OriginFields form=form /> }.into_any(),
    };

    view! {
        <ModalFrame
            title=title
            on_close=on_close
            locked=Signal::derive(move || saving.get())
        >
            <div class="details-form">
                {common_fields}
                {variant_fields}
            </div>

            {move || error.get().map(|e| view! { <div class="error">{e}</div> })}
            {move || success.get().map(|s| view! { <div class="success">{s}</div> })}

            <div class="details-actions">
                <Show when=move || !missing.get().is_empty()>
                    <span class="hint">{move || format!("Required: {}", missing.get())}</span>
                </Show>
                <Button
                    appearance=ButtonAppearance::Primary
                    disabled=Signal::derive(move || !can_submit.get())
                    on_click=move |_| submit()
                >
                    {move || if saving.get() { "Saving..." } else { "Save" }}
                </Button>
                <Button
                    appearance=ButtonAppearance::Secondary
                    disabled=Signal::derive(move || saving.get())
                    on_click=move |_| on_close.run(())
                >
                    "Cancel"
                </Button>
            </div>
        </ModalFrame>
    }
}

/// Эмодзи и терминология подуровней Origin
#[component]
fn OriginFields(form: RwSignal<RecordForm>) -> impl IntoView {
    fn terminology_field(
        form: RwSignal<RecordForm>,
        label: &'static str,
        required: bool,
        get: fn(&contracts::domain::a001_taxonomy::node::OriginTerminology) -> String,
        set: fn(&mut contracts::domain::a001_taxonomy::node::OriginTerminology, String),
    ) -> impl IntoView {
        view! {
            <TextField
                label=label
                required=required
                value=Signal::derive(move || form.with(|f| match f {
                    RecordForm::Origin { terminology, .. } => get(terminology),
                    _ => String::new(),
                }))
                on_input=Callback::new(move |v: String| form.update(|f| {
                    if let RecordForm::Origin { terminology, .. } = f {
                        set(terminology, v);
                    }
                }))
            />
        }
    }

    view! {
        <TextField
            label="Emoji"
            value=Signal::derive(move || form.with(|f| match f {
                RecordForm::Origin { emoji, .. } => emoji.clone(),
                _ => String::new(),
            }))
            on_input=Callback::new(move |v: String| form.update(|f| {
                if let RecordForm::Origin { emoji, .. } = f {
                    *emoji = v;
                }
            }))
        />
        <fieldset class="form-fieldset">
            <legend>"Sub-level terminology"</legend>
            {terminology_field(form, "Level 1 label", true, |t| t.level1_label.clone(), |t, v| t.level1_label = v)}
            {terminology_field(form, "Level 1 label (plural)", false, |t| t.level1_label_plural.clone(), |t, v| t.level1_label_plural = v)}
            <CheckField
                label="Enable level 2"
                checked=Signal::derive(move || form.with(|f| f.shows_level2_fields()))
                on_toggle=Callback::new(move |v: bool| form.update(|f| f.set_level2_enabled(v)))
            />
            <Show when=move || form.with(|f| f.shows_level2_fields())>
                {terminology_field(form, "Level 2 label", true, |t| t.level2_label.clone(), |t, v| t.level2_label = v)}
                {terminology_field(form, "Level 2 label (plural)", false, |t| t.level2_label_plural.clone(), |t, v| t.level2_label_plural = v)}
            </Show>
        </fieldset>
    }
}
