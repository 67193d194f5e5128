use contracts::domain::a002_profile::moderation::{ModerateRequest, ModerationAction};
use contracts::domain::a002_profile::photo::{PhotoAction, PhotoModerationRequest, PhotoStatus, ProfilePhoto};
use contracts::domain::a002_profile::snapshot::{ref_or_suggested, RefLabel};
use contracts::domain::a002_profile::ProfileSnapshot;
use contracts::domain::a001_taxonomy::kind::RecordKind;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::collections::HashSet;
use thaw::*;

use super::api;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::tab_labels::{detail_tab_label, PROFILE_EDIT_PREFIX};
use crate::shared::components::error_banner::ErrorBanner;
use crate::shared::components::status_badge::{moderation_badge, photo_badge, verification_badge};
use crate::shared::date_utils::{format_date, format_timestamp, or_dash};
use crate::shared::modal_frame::ModalFrame;

fn ref_label(r: &Option<RefLabel>) -> String {
    or_dash(r.as_ref().map(|r| r.label.as_str()))
}

/// Строка "подпись: значение"
fn field(label: impl Into<String>, value: String) -> impl IntoView {
    view! {
        <div class="field-row">
            <span class="field-row__label">{label.into()}</span>
            <span class="field-row__value">{value}</span>
        </div>
    }
}

fn section(title: &'static str, rows: Vec<AnyView>) -> impl IntoView {
    view! {
        <div class="details-section">
            <h3 class="details-section__title">{title}</h3>
            {rows}
        </div>
    }
}

/// Разделы анкеты только для чтения
fn snapshot_sections(p: &ProfileSnapshot) -> impl IntoView {
    let t = &p.origin.terminology;
    let height = p.physical.height_cm.map(|h| format!("{} cm", h));
    let siblings = p.family.siblings.map(|s| s.to_string());
    let age = p.basic.age.map(|a| format!(" ({} y.o.)", a)).unwrap_or_default();

    view! {
        <div class="details-grid">
            {section("Basic info", vec![
                field("Display name", or_dash(Some(p.basic.display_name.as_str()))).into_any(),
                field("Profile for", or_dash(Some(p.basic.profile_for.as_str()))).into_any(),
                field("Gender", or_dash(Some(p.basic.gender.as_str()))).into_any(),
                field("Date of birth", format!("{}{}", format_date(&p.basic.date_of_birth), age)).into_any(),
                field("Marital status", or_dash(Some(p.basic.marital_status.as_str()))).into_any(),
            ])}
            {section("Location", vec![
                field("Country", ref_label(&p.location.country)).into_any(),
                field("State", ref_label(&p.location.state)).into_any(),
                field("City", ref_or_suggested(&p.location.city, &p.location.suggested_city)).into_any(),
            ])}
            {section("Origin", vec![
                field("Origin", ref_label(&p.origin.origin)).into_any(),
                field(t.label_for(RecordKind::Ethnicity, false), ref_label(&p.origin.ethnicity)).into_any(),
                field(t.label_for(RecordKind::Caste, false), ref_or_suggested(&p.origin.caste, &p.origin.suggested_caste)).into_any(),
                field("Mother tongue", ref_or_suggested(&p.origin.mother_tongue, &p.origin.suggested_mother_tongue)).into_any(),
            ])}
            {section("Religion", vec![
                field("Sect", ref_label(&p.religion.sect)).into_any(),
                field("Maslak", ref_label(&p.religion.maslak)).into_any(),
                field("Religiosity", or_dash(Some(p.religion.religiosity.as_str()))).into_any(),
            ])}
            {section("Family", vec![
                field("Family type", or_dash(Some(p.family.family_type.as_str()))).into_any(),
                field("Father's occupation", or_dash(Some(p.family.father_occupation.as_str()))).into_any(),
                field("Siblings", or_dash(siblings.as_deref())).into_any(),
            ])}
            {section("Physical", vec![
                field("Height", or_dash(height.as_deref())).into_any(),
                field("Body type", or_dash(Some(p.physical.body_type.as_str()))).into_any(),
                field("Complexion", or_dash(Some(p.physical.complexion.as_str()))).into_any(),
            ])}
            {section("Education & career", vec![
                field("Education level", ref_label(&p.education.level)).into_any(),
                field("Field of study", ref_label(&p.education.field)).into_any(),
                field("Occupation", or_dash(Some(p.education.occupation.as_str()))).into_any(),
                field("Annual income", or_dash(Some(p.education.annual_income.as_str()))).into_any(),
            ])}
            {section("Bio", vec![
                field("About", or_dash(Some(p.bio.about.as_str()))).into_any(),
                field("Visibility", or_dash(Some(p.bio.visibility.as_str()))).into_any(),
            ])}
            {section("Account", vec![
                field("Username", p.account.username.clone()).into_any(),
                field("Email", or_dash(p.account.email.as_deref())).into_any(),
                field("Phone", or_dash(p.account.phone.as_deref())).into_any(),
                view! {
                    <div class="field-row">
                        <span class="field-row__label">"Phone verification"</span>
                        <span class="field-row__value">{verification_badge(p.account.phone_verification)}</span>
                    </div>
                }.into_any(),
                field("Account", if p.account.is_active { "Active" } else { "Disabled" }.to_string()).into_any(),
            ])}
        </div>
    }
}

/// Карточка анкеты для модератора: данные, решение, фото
#[component]
pub fn ProfileReview(id: String, on_close: Callback<()>) -> impl IntoView {
    let tabs_store =
        use_context::<AppGlobalContext>().expect("AppGlobalContext context not found");
    let profile_id = StoredValue::new(id);

    let profile = RwSignal::new(None::<ProfileSnapshot>);
    let error = RwSignal::new(None::<String>);
    let action_error = RwSignal::new(None::<String>);
    let acting = RwSignal::new(false);
    let feedback = RwSignal::new(String::new());
    let photo_busy = RwSignal::new(HashSet::<String>::new());
    // Фото, для которого открыт диалог отказа, и причина
    let rejecting = RwSignal::new(None::<String>);
    let reject_reason = RwSignal::new(String::new());

    let fetch = move || {
        let id = profile_id.get_value();
        spawn_local(async move {
            match api::fetch_profile(&id).await {
                Ok(p) => {
                    profile.set(Some(p));
                    error.set(None);
                }
                Err(e) => error.set(Some(e)),
            }
        });
    };

    fetch();

    let moderate = move |action: ModerationAction| {
        let request = ModerateRequest {
            action,
            feedback: Some(feedback.get_untracked()),
        };
        acting.set(true);
        action_error.set(None);
        let id = profile_id.get_value();
        spawn_local(async move {
            match api::moderate(&id, &request).await {
                Ok(response) => {
                    log::info!("profile {} → {}", id, response.status.as_str());
                    feedback.set(String::new());
                    fetch();
                }
                Err(e) => action_error.set(Some(e)),
            }
            acting.set(false);
        });
    };

    let replace_photo = move |photo: ProfilePhoto| {
        profile.update(|p| {
            if let Some(p) = p {
                if let Some(slot) = p.photos.iter_mut().find(|x| x.id == photo.id) {
                    *slot = photo;
                }
            }
        });
    };

    let decide_photo = move |photo_id: String, request: PhotoModerationRequest| {
        photo_busy.update(|s| {
            s.insert(photo_id.clone());
        });
        action_error.set(None);
        let id = profile_id.get_value();
        spawn_local(async move {
            let result = api::moderate_photo(&id, &photo_id, &request).await;
            photo_busy.update(|s| {
                s.remove(&photo_id);
            });
            match result {
                Ok(photo) => {
                    replace_photo(photo);
                    rejecting.set(None);
                }
                Err(e) => action_error.set(Some(e)),
            }
        });
    };

    let delete_photo = move |photo_id: String| {
        let confirmed = web_sys::window()
            .and_then(|w| w.confirm_with_message("Delete this photo permanently?").ok())
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        photo_busy.update(|s| {
            s.insert(photo_id.clone());
        });
        let id = profile_id.get_value();
        spawn_local(async move {
            let result = api::delete_photo(&id, &photo_id).await;
            photo_busy.update(|s| {
                s.remove(&photo_id);
            });
            match result {
                Ok(()) => profile.update(|p| {
                    if let Some(p) = p {
                        p.photos.retain(|x| x.id != photo_id);
                    }
                }),
                Err(e) => action_error.set(Some(e)),
            }
        });
    };

    let open_edit = move |_| {
        let id = profile_id.get_value();
        let name = profile.with_untracked(|p| {
            p.as_ref().map(|p| p.basic.display_name.clone()).unwrap_or_else(|| id.clone())
        });
        tabs_store.open_tab(
            &format!("{}{}", PROFILE_EDIT_PREFIX, id),
            &detail_tab_label("Edit profile", &name),
        );
    };

    let submit_reject = move || {
        let Some(photo_id) = rejecting.get_untracked() else {
            return;
        };
        let request = PhotoModerationRequest {
            action: PhotoAction::Reject,
            reason: Some(reject_reason.get_untracked()),
        };
        // проверяем причину до запроса тем же правилом, что и сервер
        if let Err(e) = request.decide(PhotoStatus::Pending) {
            action_error.set(Some(e));
            return;
        }
        decide_photo(photo_id, request);
    };

    let photos_view = move || {
        profile.with(|p| p.as_ref().map(|p| p.photos.clone()).unwrap_or_default())
            .into_iter()
            .map(|photo| {
                let busy_id = photo.id.clone();
                let busy = Signal::derive(move || photo_busy.with(|s| s.contains(&busy_id)));
                let is_pending = photo.status == PhotoStatus::Pending;
                let approve_id = photo.id.clone();
                let reject_id = photo.id.clone();
                let delete_id = photo.id.clone();
                view! {
                    <div class="photo-card" class:photo-card--primary=photo.is_primary>
                        <img src=photo.url.clone() alt="Profile photo" loading="lazy" />
                        <div class="photo-card__meta">
                            {photo_badge(photo.status)}
                            {photo.is_primary.then(|| view! { <span class="photo-card__primary">"Primary"</span> })}
                            {photo.rejection_reason.clone().map(|r| view! {
                                <div class="photo-card__reason">{r}</div>
                            })}
                        </div>
                        <div class="photo-card__actions">
                            <Show when=move || is_pending>
                                <Button
                                    size=ButtonSize::Small
                                    appearance=ButtonAppearance::Primary
                                    disabled=busy
                                    on_click={
                                        let approve_id = approve_id.clone();
                                        move |_| decide_photo(approve_id.clone(), PhotoModerationRequest {
                                            action: PhotoAction::Approve,
                                            reason: None,
                                        })
                                    }
                                >
                                    "Approve"
                                </Button>
                                <Button
                                    size=ButtonSize::Small
                                    disabled=busy
                                    on_click={
                                        let reject_id = reject_id.clone();
                                        move |_| {
                                            reject_reason.set(String::new());
                                            rejecting.set(Some(reject_id.clone()));
                                        }
                                    }
                                >
                                    "Reject"
                                </Button>
                            </Show>
                            <Button
                                size=ButtonSize::Small
                                appearance=ButtonAppearance::Subtle
                                disabled=busy
                                on_click=move |_| delete_photo(delete_id.clone())
                            >
                                "Delete"
                            </Button>
                        </div>
                    </div>
                }
            })
            .collect_view()
    };

    view! {
        <div class="page profile-review">
            <ErrorBanner
                error=Signal::derive(move || error.get())
                on_retry=Callback::new(move |_| fetch())
            />

            {move || profile.get().map(|p| {
                let status = p.moderation_status;
                let actions = status.allowed_actions();
                let pending_photos = p.pending_photo_count();
                let has_suggestions = p.has_suggestions();
                view! {
                    <div class="page-header">
                        <div class="page-header__content">
                            <h1 class="page-header__title">{p.basic.display_name.clone()}</h1>
                            <div class="page-header__subtitle">
                                {moderation_badge(status)}
                                {format!(" {}% complete · updated {}",
                                    p.completion_percentage,
                                    format_timestamp(&p.metadata.updated_at.to_rfc3339()))}
                            </div>
                        </div>
                        <div class="page-header__actions">
                            <Button appearance=ButtonAppearance::Secondary on_click=open_edit>
                                {if has_suggestions { "Map suggestions" } else { "Edit references" }}
                            </Button>
                            <Button appearance=ButtonAppearance::Subtle on_click=move |_| on_close.run(())>
                                "Close"
                            </Button>
                        </div>
                    </div>

                    {p.moderation_feedback.clone().map(|f| view! {
                        <div class="info-box">{format!("Last feedback: {}", f)}</div>
                    })}

                    {snapshot_sections(&p)}

                    <div class="details-section">
                        <h3 class="details-section__title">
                            {format!("Photos ({} pending)", pending_photos)}
                        </h3>
                        <div class="photo-grid">{photos_view}</div>
                    </div>

                    <div class="details-section moderation-panel">
                        <h3 class="details-section__title">"Moderation"</h3>
                        {if actions.is_empty() {
                            view! {
                                <div class="hint">{format!("No actions available for {} profiles", status.title().to_lowercase())}</div>
                            }.into_any()
                        } else {
                            view! {
                                <textarea
                                    class="moderation-panel__feedback"
                                    placeholder="Feedback for the user (optional)"
                                    prop:value=move || feedback.get()
                                    on:input=move |ev| feedback.set(event_target_value(&ev))
                                ></textarea>
                                <div class="details-actions">
                                    {actions.iter().map(|action| {
                                        let action = *action;
                                        let appearance = match action {
                                            ModerationAction::Approve => ButtonAppearance::Primary,
                                            _ => ButtonAppearance::Secondary,
                                        };
                                        let label = match action {
                                            ModerationAction::Approve => "Approve",
                                            ModerationAction::Reject => "Reject",
                                            ModerationAction::Ban => "Ban",
                                        };
                                        view! {
                                            <Button
                                                appearance=appearance
                                                disabled=Signal::derive(move || acting.get())
                                                on_click=move |_| moderate(action)
                                            >
                                                {label}
                                            </Button>
                                        }
                                    }).collect_view()}
                                </div>
                            }.into_any()
                        }}
                    </div>
                }
            })}

            <ErrorBanner error=Signal::derive(move || action_error.get()) />

            {move || rejecting.get().map(|_| view! {
                <ModalFrame
                    title="Reject photo".to_string()
                    on_close=Callback::new(move |_| rejecting.set(None))
                    width="420px"
                >
                    <div class="form-group">
                        <label>"Reason"<span class="required">" *"</span></label>
                        <textarea
                            prop:value=move || reject_reason.get()
                            on:input=move |ev| reject_reason.set(event_target_value(&ev))
                        ></textarea>
                    </div>
                    <div class="details-actions">
                        <Button
                            appearance=ButtonAppearance::Primary
                            disabled=Signal::derive(move || reject_reason.with(|r| r.trim().is_empty()))
                            on_click=move |_| submit_reject()
                        >
                            "Reject"
                        </Button>
                        <Button on_click=move |_| rejecting.set(None)>"Cancel"</Button>
                    </div>
                </ModalFrame>
            })}
        </div>
    }
}
