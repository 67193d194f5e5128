use contracts::domain::a001_taxonomy::kind::RecordKind;
use contracts::domain::a002_profile::edit::{ProfileEditData, ProfileEditRequest, ProfileRefs, SuggestedField};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::api;
use crate::shared::components::error_banner::ErrorBanner;
use crate::shared::components::lookup_select::LookupSelect;
use crate::shared::components::page_header::PageHeader;

/// Текстовое предложение пользователя и флажок "стереть после сопоставления"
#[component]
fn SuggestionNote(
    field: SuggestedField,
    data: RwSignal<Option<ProfileEditData>>,
    refs: RwSignal<ProfileRefs>,
    clear: RwSignal<Vec<SuggestedField>>,
) -> impl IntoView {
    let suggestion = move || data.with(|d| d.as_ref().and_then(|d| d.suggestion(field)).map(str::to_string));
    let mapped = move || refs.with(|r| r.target_id(field).is_some());

    // без выбранной ссылки стирать нечего
    Effect::new(move |_| {
        if !mapped() {
            clear.update(|c| c.retain(|f| *f != field));
        }
    });

    view! {
        {move || suggestion().map(|text| view! {
            <div class="suggestion-note">
                <span class="suggestion-note__text">{format!("User suggested: \"{}\"", text)}</span>
                <label class="form-check">
                    <input
                        type="checkbox"
                        disabled=move || !mapped()
                        prop:checked=move || clear.with(|c| c.contains(&field))
                        on:change=move |ev| {
                            let on = event_target_checked(&ev);
                            clear.update(|c| {
                                c.retain(|f| *f != field);
                                if on {
                                    c.push(field);
                                }
                            });
                        }
                    />
                    <span>"Clear suggestion after saving"</span>
                </label>
            </div>
        })}
    }
}

/// Сопоставление текстовых значений анкеты со справочниками
#[component]
pub fn ProfileEdit(id: String, on_close: Callback<()>) -> impl IntoView {
    let profile_id = StoredValue::new(id);
    let data = RwSignal::new(None::<ProfileEditData>);
    let refs = RwSignal::new(ProfileRefs::default());
    let clear = RwSignal::new(Vec::<SuggestedField>::new());
    let error = RwSignal::new(None::<String>);
    let save_error = RwSignal::new(None::<String>);
    let success = RwSignal::new(None::<String>);
    let saving = RwSignal::new(false);

    let apply = move |d: ProfileEditData| {
        refs.set(d.refs.clone());
        clear.set(Vec::new());
        data.set(Some(d));
    };

    let fetch = move || {
        let id = profile_id.get_value();
        spawn_local(async move {
            match api::fetch_edit_data(&id).await {
                Ok(d) => {
                    apply(d);
                    error.set(None);
                }
                Err(e) => error.set(Some(e)),
            }
        });
    };

    fetch();

    let save = move |_| {
        let request = ProfileEditRequest {
            refs: refs.get_untracked(),
            clear_suggestions: clear.get_untracked(),
        };
        if let Err(e) = request.validate() {
            save_error.set(Some(e));
            return;
        }
        saving.set(true);
        save_error.set(None);
        success.set(None);
        let id = profile_id.get_value();
        spawn_local(async move {
            match api::save_edit(&id, &request).await {
                Ok(d) => {
                    apply(d);
                    success.set(Some("Profile references saved".to_string()));
                }
                Err(e) => save_error.set(Some(e)),
            }
            saving.set(false);
        });
    };

    let value_of = move |get: fn(&ProfileRefs) -> Option<String>| Signal::derive(move || refs.with(get));

    view! {
        <div class="page profile-edit">
            <PageHeader
                title="Edit profile references".to_string()
                subtitle="Map free-text suggestions onto taxonomy records".to_string()
            >
                <Button
                    appearance=ButtonAppearance::Primary
                    disabled=Signal::derive(move || saving.get() || data.with(|d| d.is_none()))
                    on_click=save
                >
                    {move || if saving.get() { "Saving..." } else { "Save" }}
                </Button>
                <Button appearance=ButtonAppearance::Subtle on_click=move |_| on_close.run(())>
                    "Close"
                </Button>
            </PageHeader>

            <ErrorBanner
                error=Signal::derive(move || error.get())
                on_retry=Callback::new(move |_| fetch())
            />
            <ErrorBanner error=Signal::derive(move || save_error.get()) />
            {move || success.get().map(|s| view! { <div class="success">{s}</div> })}

            <Show when=move || data.with(|d| d.is_some())>
                <div class="details-grid">
                    <div class="details-section">
                        <h3 class="details-section__title">"Location"</h3>
                        <LookupSelect
                            kind=RecordKind::Country
                            label="Country".to_string()
                            value=value_of(|r| r.country_id.clone())
                            on_change=Callback::new(move |v: Option<String>| refs.update(|r| r.set_country(v)))
                        />
                        <LookupSelect
                            kind=RecordKind::State
                            label="State".to_string()
                            value=value_of(|r| r.state_id.clone())
                            parent_id=value_of(|r| r.country_id.clone())
                            on_change=Callback::new(move |v: Option<String>| refs.update(|r| r.set_state(v)))
                        />
                        <LookupSelect
                            kind=RecordKind::City
                            label="City".to_string()
                            value=value_of(|r| r.city_id.clone())
                            parent_id=value_of(|r| r.state_id.clone())
                            on_change=Callback::new(move |v: Option<String>| refs.update(|r| r.city_id = v))
                        />
                        <SuggestionNote field=SuggestedField::City data=data refs=refs clear=clear />
                    </div>

                    <div class="details-section">
                        <h3 class="details-section__title">"Origin"</h3>
                        <LookupSelect
                            kind=RecordKind::Origin
                            label="Origin".to_string()
                            value=value_of(|r| r.origin_id.clone())
                            on_change=Callback::new(move |v: Option<String>| refs.update(|r| r.set_origin(v)))
                        />
                        <LookupSelect
                            kind=RecordKind::Ethnicity
                            label="Ethnicity".to_string()
                            value=value_of(|r| r.ethnicity_id.clone())
                            parent_id=value_of(|r| r.origin_id.clone())
                            on_change=Callback::new(move |v: Option<String>| refs.update(|r| r.set_ethnicity(v)))
                        />
                        <LookupSelect
                            kind=RecordKind::Caste
                            label="Caste".to_string()
                            value=value_of(|r| r.caste_id.clone())
                            parent_id=value_of(|r| r.ethnicity_id.clone())
                            on_change=Callback::new(move |v: Option<String>| refs.update(|r| r.caste_id = v))
                        />
                        <SuggestionNote field=SuggestedField::Caste data=data refs=refs clear=clear />
                    </div>

                    <div class="details-section">
                        <h3 class="details-section__title">"Language"</h3>
                        <LookupSelect
                            kind=RecordKind::Language
                            label="Mother tongue".to_string()
                            value=value_of(|r| r.mother_tongue_id.clone())
                            on_change=Callback::new(move |v: Option<String>| refs.update(|r| r.mother_tongue_id = v))
                        />
                        <SuggestionNote field=SuggestedField::MotherTongue data=data refs=refs clear=clear />
                    </div>
                </div>
            </Show>
        </div>
    }
}
