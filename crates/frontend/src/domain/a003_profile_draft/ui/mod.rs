pub mod api;
pub mod fields;
pub mod steps;

use contracts::domain::a002_profile::moderation::ModerationStatus;
use contracts::domain::a003_profile_draft::draft::SaveStepRequest;
use contracts::domain::a003_profile_draft::step::{resume_step, StepProgress};
use contracts::domain::a003_profile_draft::{ProfileDraft, WizardStep};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::shared::components::error_banner::ErrorBanner;
use crate::shared::components::page_header::PageHeader;
use crate::shared::components::status_badge::moderation_badge;
use steps::step_fields;

/// Мастер анкеты: 7 шагов, каждый шаг сохраняется на сервере
///
/// После перезагрузки мастер продолжает с шага, вычисленного по проценту
/// заполнения. Любое сохранение отправляет анкету на повторную модерацию.
#[component]
pub fn ProfileWizard() -> impl IntoView {
    let draft = RwSignal::new(ProfileDraft::default());
    let step = RwSignal::new(WizardStep::BasicInfo);
    let profile_id = RwSignal::new(None::<String>);
    let completion = RwSignal::new(0u8);
    let status = RwSignal::new(None::<ModerationStatus>);
    let feedback = RwSignal::new(None::<String>);
    let loading = RwSignal::new(true);
    let load_error = RwSignal::new(None::<String>);
    let save_error = RwSignal::new(None::<String>);
    let saving = RwSignal::new(false);
    let finished = RwSignal::new(false);

    let fetch = move || {
        loading.set(true);
        spawn_local(async move {
            match api::fetch_my_profile().await {
                Ok(me) => {
                    if me.profile_id.is_some() {
                        step.set(resume_step(me.completion_percentage));
                    }
                    profile_id.set(me.profile_id);
                    completion.set(me.completion_percentage);
                    status.set(me.moderation_status);
                    feedback.set(me.moderation_feedback);
                    draft.set(me.draft);
                    load_error.set(None);
                }
                Err(e) => load_error.set(Some(e)),
            }
            loading.set(false);
        });
    };

    fetch();

    let missing = Memo::new(move |_| {
        let current = step.get();
        draft.with(|d| d.missing_fields(current).join(", "))
    });
    // заблокированную анкету владелец не редактирует
    let locked = Signal::derive(move || status.get().is_some_and(|s| !s.owner_can_edit()));
    let can_continue = Signal::derive(move || {
        let current = step.get();
        draft.with(|d| d.can_continue(current)) && !saving.get() && !locked.get()
    });

    let save_and_continue = move |_| {
        let current = step.get_untracked();
        let request = SaveStepRequest {
            step: current,
            draft: draft.get_untracked(),
        };
        if !request.draft.can_continue(current) || locked.get_untracked() {
            return;
        }
        let exists = profile_id.with_untracked(|p| p.is_some());
        saving.set(true);
        save_error.set(None);
        spawn_local(async move {
            match api::save_step(&request, exists).await {
                Ok(response) => {
                    profile_id.set(Some(response.profile_id));
                    completion.set(response.completion_percentage);
                    status.set(Some(ModerationStatus::Pending));
                    match current.next() {
                        Some(next) => step.set(next),
                        None => finished.set(true),
                    }
                }
                Err(e) => save_error.set(Some(e)),
            }
            saving.set(false);
        });
    };

    let go_back = move |_| {
        if let Some(prev) = step.get_untracked().prev() {
            save_error.set(None);
            finished.set(false);
            step.set(prev);
        }
    };

    view! {
        <div class="page profile-wizard">
            <PageHeader title="My profile".to_string()>
                <span class="hint">{move || format!("{}% complete", completion.get())}</span>
                {move || status.get().map(moderation_badge)}
            </PageHeader>

            <ErrorBanner
                error=Signal::derive(move || load_error.get())
                on_retry=Callback::new(move |_| fetch())
            />

            {move || feedback.get().filter(|_| status.get() == Some(ModerationStatus::Rejected)).map(|f| view! {
                <div class="warning-box">{format!("Moderator feedback: {}", f)}</div>
            })}

            <Show when=move || locked.get()>
                <div class="warning-box">"This profile has been banned and can no longer be edited."</div>
            </Show>

            <ol class="wizard-steps">
                {WizardStep::all().iter().map(|s| {
                    let s = *s;
                    view! {
                        <li
                            class="wizard-steps__item"
                            class:active=move || { s.progress(step.get()) == StepProgress::Active }
                            class:done=move || { s.progress(step.get()) == StepProgress::Done }
                        >
                            <span class="wizard-steps__number">{s.number()}</span>
                            <span class="wizard-steps__title">{s.title()}</span>
                        </li>
                    }
                }).collect_view()}
            </ol>

            <Show
                when=move || !loading.get()
                fallback=|| view! { <div class="loading">"Loading..."</div> }
            >
                <div class="wizard-body">
                    <h2>{move || format!("Step {} of {}: {}", step.get().number(), WizardStep::all().len(), step.get().title())}</h2>
                    <div class="details-form">
                        // пересобираем поля только при смене шага
                        {move || step_fields(step.get(), draft)}
                    </div>

                    <ErrorBanner error=Signal::derive(move || save_error.get()) />
                    <Show when=move || finished.get()>
                        <div class="success">"Your profile has been submitted for review."</div>
                    </Show>

                    <div class="details-actions">
                        <Show when=move || !missing.get().is_empty()>
                            <span class="hint">{move || format!("Required: {}", missing.get())}</span>
                        </Show>
                        <Button
                            appearance=ButtonAppearance::Secondary
                            disabled=Signal::derive(move || step.get().is_first() || saving.get())
                            on_click=go_back
                        >
                            "Back"
                        </Button>
                        <Button
                            appearance=ButtonAppearance::Primary
                            disabled=Signal::derive(move || !can_continue.get())
                            on_click=save_and_continue
                        >
                            {move || match (saving.get(), step.get().is_last()) {
                                (true, _) => "Saving...",
                                (false, true) => "Submit",
                                (false, false) => "Save & continue",
                            }}
                        </Button>
                    </div>
                </div>
            </Show>
        </div>
    }
}
