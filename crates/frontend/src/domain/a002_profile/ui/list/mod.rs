use contracts::domain::a002_profile::moderation::{ModerateRequest, ModerationAction, ModerationStatus};
use contracts::domain::a002_profile::snapshot::{ProfileListItem, ProfileListQuery};
use contracts::shared::paging::{PageEnvelope, DEFAULT_PAGE_SIZE};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::collections::HashSet;

use super::api;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::tab_labels::{detail_tab_label, PROFILE_DETAIL_PREFIX};
use crate::shared::components::error_banner::ErrorBanner;
use crate::shared::components::page_header::PageHeader;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::status_badge::moderation_badge;
use crate::shared::date_utils::{format_timestamp, or_dash};
use crate::shared::icons::icon;

/// Очередь модерации анкет
#[component]
#[allow(non_snake_case)]
pub fn ProfileList() -> impl IntoView {
    let tabs_store =
        use_context::<AppGlobalContext>().expect("AppGlobalContext context not found");

    let (status, set_status) = signal(Some(ModerationStatus::Pending));
    let (page, set_page) = signal(1u64);
    let (envelope, set_envelope) = signal(None::<PageEnvelope<ProfileListItem>>);
    let (error, set_error) = signal(None::<String>);
    let (action_error, set_action_error) = signal(None::<String>);
    // Строки, по которым сейчас идёт действие
    let in_flight = RwSignal::new(HashSet::<String>::new());

    let fetch = move || {
        let query = ProfileListQuery {
            status: status.get_untracked(),
            page: Some(page.get_untracked()),
            limit: Some(DEFAULT_PAGE_SIZE),
        };
        spawn_local(async move {
            match api::fetch_list(&query).await {
                Ok(env) => {
                    set_envelope.set(Some(env));
                    set_error.set(None);
                }
                Err(e) => set_error.set(Some(e)),
            }
        });
    };

    fetch();

    let quick_action = move |id: String, action: ModerationAction| {
        if in_flight.with_untracked(|s| s.contains(&id)) {
            return;
        }
        in_flight.update(|s| {
            s.insert(id.clone());
        });
        set_action_error.set(None);
        let request = ModerateRequest {
            action,
            feedback: None,
        };
        spawn_local(async move {
            let result = api::moderate(&id, &request).await;
            in_flight.update(|s| {
                s.remove(&id);
            });
            match result {
                Ok(_) => fetch(),
                Err(e) => set_action_error.set(Some(e)),
            }
        });
    };

    let open_details = move |item: &ProfileListItem| {
        let key = format!("{}{}", PROFILE_DETAIL_PREFIX, item.id);
        tabs_store.open_tab(&key, &detail_tab_label("Profile", &item.display_name));
    };

    let has_data = move || envelope.with(|e| e.is_some());

    view! {
        <div class="page">
            <PageHeader title="Profiles".to_string() subtitle="Moderation queue".to_string()>
                <select
                    class="filter-select"
                    on:change=move |ev| {
                        set_status.set(ModerationStatus::from_str(&event_target_value(&ev)));
                        set_page.set(1);
                        fetch();
                    }
                >
                    <option value="">"All statuses"</option>
                    {ModerationStatus::all().iter().map(|s| {
                        let s = *s;
                        view! {
                            <option value=s.as_str() selected=move || status.get() == Some(s)>
                                {s.title()}
                            </option>
                        }
                    }).collect_view()}
                </select>
                <button class="button button--secondary" on:click=move |_| fetch()>
                    {icon("refresh")}
                    "Refresh"
                </button>
            </PageHeader>

            <Show
                when=has_data
                fallback=move || view! {
                    <Show
                        when=move || error.get().is_some()
                        fallback=|| view! { <div class="loading">"Loading..."</div> }
                    >
                        <div class="page-error">
                            <ErrorBanner
                                error=Signal::derive(move || error.get())
                                on_retry=Callback::new(move |_| fetch())
                            />
                        </div>
                    </Show>
                }
            >
                <ErrorBanner error=Signal::derive(move || error.get()) />
                <ErrorBanner error=Signal::derive(move || action_error.get()) />

                <table class="data-table">
                    <thead>
                        <tr>
                            <th>"Name"</th>
                            <th>"User"</th>
                            <th>"Gender"</th>
                            <th>"City"</th>
                            <th>"Origin"</th>
                            <th class="col-num">"Complete"</th>
                            <th class="col-num">"Photos"</th>
                            <th>"Status"</th>
                            <th>"Updated"</th>
                            <th class="col-actions"></th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            let items = envelope.with(|e| e.as_ref().map(|e| e.items.clone()).unwrap_or_default());
                            if items.is_empty() {
                                return view! {
                                    <tr><td colspan="10" class="empty-row">"No profiles"</td></tr>
                                }
                                .into_any();
                            }
                            items.into_iter().map(|item| {
                                let allowed = item.moderation_status.allowed_actions();
                                let can_approve = allowed.contains(&ModerationAction::Approve);
                                let can_reject = allowed.contains(&ModerationAction::Reject);
                                let busy_id = item.id.clone();
                                let busy = move || in_flight.with(|s| s.contains(&busy_id));
                                let approve_id = item.id.clone();
                                let reject_id = item.id.clone();
                                let row = item.clone();
                                view! {
                                    <tr class="clickable" on:click=move |_| open_details(&row)>
                                        <td>{item.display_name.clone()}</td>
                                        <td class="mono">{item.username.clone()}</td>
                                        <td>{item.gender.clone()}</td>
                                        <td>{or_dash(item.city.as_deref())}</td>
                                        <td>{or_dash(item.origin.as_deref())}</td>
                                        <td class="col-num">{format!("{}%", item.completion_percentage)}</td>
                                        <td class="col-num">
                                            {item.photo_count}
                                            {(item.pending_photo_count > 0).then(|| view! {
                                                <span class="pending-mark">{format!(" ({} pending)", item.pending_photo_count)}</span>
                                            })}
                                        </td>
                                        <td>{moderation_badge(item.moderation_status)}</td>
                                        <td>{format_timestamp(&item.updated_at)}</td>
                                        <td class="col-actions" on:click=|ev| ev.stop_propagation()>
                                            {can_approve.then(|| view! {
                                                <button
                                                    class="icon-btn icon-btn--success"
                                                    title="Approve"
                                                    disabled=busy.clone()
                                                    on:click=move |_| quick_action(approve_id.clone(), ModerationAction::Approve)
                                                >
                                                    {icon("check")}
                                                </button>
                                            })}
                                            {can_reject.then(|| view! {
                                                <button
                                                    class="icon-btn icon-btn--danger"
                                                    title="Reject"
                                                    disabled=busy.clone()
                                                    on:click=move |_| quick_action(reject_id.clone(), ModerationAction::Reject)
                                                >
                                                    {icon("x")}
                                                </button>
                                            })}
                                        </td>
                                    </tr>
                                }
                            }).collect_view().into_any()
                        }}
                    </tbody>
                </table>

                <PaginationControls
                    page=Signal::derive(move || page.get())
                    total_pages=Signal::derive(move || envelope.with(|e| e.as_ref().map(|e| e.total_pages).unwrap_or(0)))
                    total=Signal::derive(move || envelope.with(|e| e.as_ref().map(|e| e.total).unwrap_or(0)))
                    on_page_change=Callback::new(move |p: u64| {
                        set_page.set(p);
                        fetch();
                    })
                />
            </Show>
        </div>
    }
}
