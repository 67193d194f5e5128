use contracts::domain::a001_taxonomy::kind::{RecordKind, TaxonomyDomain};
use contracts::domain::a001_taxonomy::node::{AttachLanguageRequest, CountryLanguage, TaxonomyNode};
use contracts::domain::a001_taxonomy::reorder::{MoveDirection, ReorderScope, ReorderState};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::api;
use crate::shared::components::error_banner::ErrorBanner;
use crate::shared::icons::icon;

/// Языки, привязанные к стране, с порядком показа в анкете
#[component]
pub fn CountryLanguages(country_id: String, country_label: String) -> impl IntoView {
    let country_id = StoredValue::new(country_id);
    let attached = RwSignal::new(ReorderState::<CountryLanguage>::default());
    let all_languages = RwSignal::new(Vec::<TaxonomyNode>::new());
    let picked = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let load = move || {
        let id = country_id.get_value();
        spawn_local(async move {
            match api::fetch_country_languages(id).await {
                Ok(items) => {
                    attached.update(|s| s.replace(items));
                    error.set(None);
                }
                Err(e) => error.set(Some(e)),
            }
        });
    };

    load();
    spawn_local(async move {
        match api::fetch_nodes(RecordKind::Language, None).await {
            Ok(items) => all_languages.set(items),
            Err(e) => error.set(Some(e)),
        }
    });

    // Ещё не привязанные языки
    let available = Memo::new(move |_| {
        let taken: Vec<String> =
            attached.with(|s| s.items().iter().map(|l| l.language_id.clone()).collect());
        all_languages.with(|all| {
            all.iter()
                .filter(|l| !taken.contains(&l.id))
                .map(|l| (l.id.clone(), l.label.clone()))
                .collect::<Vec<_>>()
        })
    });

    let attach = move |_| {
        let language_id = picked.get_untracked();
        if language_id.is_empty() {
            return;
        }
        let request = AttachLanguageRequest {
            country_id: country_id.get_value(),
            language_id,
        };
        busy.set(true);
        spawn_local(async move {
            match api::attach_language(request).await {
                Ok(items) => {
                    attached.update(|s| s.replace(items));
                    picked.set(String::new());
                    error.set(None);
                }
                Err(e) => error.set(Some(e)),
            }
            busy.set(false);
        });
    };

    let detach = move |language_id: String| {
        busy.set(true);
        let country = country_id.get_value();
        spawn_local(async move {
            match api::detach_language(&country, &language_id).await {
                Ok(()) => load(),
                Err(e) => error.set(Some(e)),
            }
            busy.set(false);
        });
    };

    let move_row = move |index: usize, direction: MoveDirection| {
        let Some(ordered_ids) = attached.try_update(|s| s.begin_move(index, direction)).flatten() else {
            return;
        };
        let request = ReorderScope::country_languages(country_id.get_value()).request(ordered_ids);
        spawn_local(async move {
            match api::reorder(TaxonomyDomain::Languages, &request).await {
                Ok(()) => attached.update(|s| s.commit_succeeded()),
                Err(e) => {
                    attached.update(|s| s.commit_failed(e));
                    load();
                }
            }
        });
    };

    view! {
        <div class="country-languages">
            <h3>{format!("Languages of {}", country_label)}</h3>
            <ErrorBanner error=Signal::derive(move || error.get()) />
            {move || attached.with(|s| s.error().map(|e| e.to_string())).map(|e| view! {
                <div class="warning-box warning-box--error">{format!("Reorder failed: {}", e)}</div>
            })}

            <ul class="country-languages__list">
                {move || {
                    let rows = attached.with(|s| {
                        s.items()
                            .iter()
                            .cloned()
                            .enumerate()
                            .map(|(i, l)| (i, l, s.can_move(i, MoveDirection::Up), s.can_move(i, MoveDirection::Down)))
                            .collect::<Vec<_>>()
                    });
                    if rows.is_empty() {
                        return view! { <li class="empty-row">"No languages attached"</li> }.into_any();
                    }
                    rows.into_iter()
                        .map(|(index, lang, can_up, can_down)| {
                            let language_id = lang.language_id.clone();
                            view! {
                                <li class="country-languages__item">
                                    <span>{lang.label}</span>
                                    <button class="icon-btn" title="Move up" disabled=!can_up
                                        on:click=move |_| move_row(index, MoveDirection::Up)>
                                        {icon("arrow-up")}
                                    </button>
                                    <button class="icon-btn" title="Move down" disabled=!can_down
                                        on:click=move |_| move_row(index, MoveDirection::Down)>
                                        {icon("arrow-down")}
                                    </button>
                                    <button class="icon-btn icon-btn--danger" title="Detach"
                                        disabled=move || busy.get()
                                        on:click=move |_| detach(language_id.clone())>
                                        {icon("x")}
                                    </button>
                                </li>
                            }
                        })
                        .collect_view()
                        .into_any()
                }}
            </ul>

            <div class="country-languages__attach">
                <select
                    prop:value=move || picked.get()
                    on:change=move |ev| picked.set(event_target_value(&ev))
                >
                    <option value="">"Select language..."</option>
                    {move || available.get().into_iter().map(|(id, label)| view! {
                        <option value=id>{label}</option>
                    }).collect_view()}
                </select>
                <Button
                    appearance=ButtonAppearance::Secondary
                    disabled=Signal::derive(move || busy.get() || picked.get().is_empty())
                    on_click=attach
                >
                    "Attach"
                </Button>
            </div>
        </div>
    }
}
