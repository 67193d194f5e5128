use contracts::shared::paging::{PageEnvelope, DEFAULT_PAGE_SIZE};
use contracts::system::users::{
    VerificationAction, VerificationDecision, VerificationQueueItem, VerificationQueueQuery,
    VerificationStatus,
};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::collections::HashSet;
use thaw::*;

use super::api;
use crate::shared::components::error_banner::ErrorBanner;
use crate::shared::components::page_header::PageHeader;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::status_badge::verification_badge;
use crate::shared::date_utils::{format_timestamp, or_dash};
use crate::shared::icons::icon;
use crate::shared::modal_frame::ModalFrame;

const STATUSES: [VerificationStatus; 4] = [
    VerificationStatus::Pending,
    VerificationStatus::Verified,
    VerificationStatus::Rejected,
    VerificationStatus::Unverified,
];

/// Решение, ожидающее комментария модератора
#[derive(Debug, Clone)]
struct PendingDecision {
    user_id: String,
    username: String,
    action: VerificationAction,
}

/// Очередь подтверждения телефонов
#[component]
pub fn VerificationQueue() -> impl IntoView {
    let (status, set_status) = signal(Some(VerificationStatus::Pending));
    let (page, set_page) = signal(1u64);
    let (envelope, set_envelope) = signal(None::<PageEnvelope<VerificationQueueItem>>);
    let (error, set_error) = signal(None::<String>);
    let (action_error, set_action_error) = signal(None::<String>);
    let in_flight = RwSignal::new(HashSet::<String>::new());
    let decision = RwSignal::new(None::<PendingDecision>);
    let note = RwSignal::new(String::new());

    let fetch = move || {
        let query = VerificationQueueQuery {
            status: status.get_untracked(),
            page: Some(page.get_untracked()),
            limit: Some(DEFAULT_PAGE_SIZE),
        };
        spawn_local(async move {
            match api::fetch_queue(&query).await {
                Ok(env) => {
                    set_envelope.set(Some(env));
                    set_error.set(None);
                }
                Err(e) => set_error.set(Some(e)),
            }
        });
    };

    fetch();

    // занимает ключ строки; false, если по ней уже идёт запрос
    let acquire = move |user_id: &str| -> bool {
        in_flight
            .try_update(|s| s.insert(user_id.to_string()))
            .unwrap_or(false)
    };
    let release = move |user_id: &str| {
        in_flight.update(|s| {
            s.remove(user_id);
        });
    };

    let submit_decision = move || {
        let Some(pending) = decision.get_untracked() else {
            return;
        };
        if !acquire(&pending.user_id) {
            return;
        }
        let request = VerificationDecision {
            user_id: pending.user_id.clone(),
            action: pending.action,
            note: Some(note.get_untracked().trim().to_string()).filter(|n| !n.is_empty()),
        };
        set_action_error.set(None);
        spawn_local(async move {
            let result = api::decide(&request).await;
            release(&request.user_id);
            match result {
                Ok(response) => {
                    log::info!(
                        "Verification of {} set to {}",
                        pending.username,
                        response.status.as_str()
                    );
                    decision.set(None);
                    note.set(String::new());
                    fetch();
                }
                Err(e) => set_action_error.set(Some(e)),
            }
        });
    };

    let requeue = move |user_id: String| {
        if !acquire(&user_id) {
            return;
        }
        set_action_error.set(None);
        spawn_local(async move {
            let result = api::requeue(&user_id).await;
            release(&user_id);
            match result {
                Ok(_) => fetch(),
                Err(e) => set_action_error.set(Some(e)),
            }
        });
    };

    let open_decision = move |item: &VerificationQueueItem, action: VerificationAction| {
        note.set(String::new());
        decision.set(Some(PendingDecision {
            user_id: item.user_id.clone(),
            username: item.username.clone(),
            action,
        }));
    };

    let dialog_busy = Signal::derive(move || {
        decision.with(|d| {
            d.as_ref()
                .map(|d| in_flight.with(|s| s.contains(&d.user_id)))
                .unwrap_or(false)
        })
    });

    let has_data = move || envelope.with(|e| e.is_some());

    view! {
        <div class="page">
            <PageHeader title="Phone verification".to_string() subtitle="Verification requests".to_string()>
                <select
                    class="filter-select"
                    on:change=move |ev| {
                        set_status.set(VerificationStatus::from_str(&event_target_value(&ev)));
                        set_page.set(1);
                        fetch();
                    }
                >
                    <option value="">"All statuses"</option>
                    {STATUSES.iter().map(|s| {
                        let s = *s;
                        view! {
                            <option value=s.as_str() selected=move || status.get() == Some(s)>
                                {s.as_str()}
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
                            <th>"User"</th>
                            <th>"Full name"</th>
                            <th>"Phone"</th>
                            <th>"Status"</th>
                            <th>"Note"</th>
                            <th>"Submitted"</th>
                            <th class="col-actions"></th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            let items = envelope.with(|e| e.as_ref().map(|e| e.items.clone()).unwrap_or_default());
                            if items.is_empty() {
                                return view! {
                                    <tr><td colspan="7" class="empty-row">"No verification requests"</td></tr>
                                }
                                .into_any();
                            }
                            items.into_iter().map(|item| {
                                let busy_id = item.user_id.clone();
                                let busy = move || in_flight.with(|s| s.contains(&busy_id));
                                let pending = item.status == VerificationStatus::Pending;
                                let approve_item = item.clone();
                                let reject_item = item.clone();
                                let requeue_id = item.user_id.clone();
                                view! {
                                    <tr>
                                        <td class="mono">{item.username.clone()}</td>
                                        <td>{or_dash(item.full_name.as_deref())}</td>
                                        <td>{or_dash(item.phone.as_deref())}</td>
                                        <td>{verification_badge(item.status)}</td>
                                        <td>{or_dash(item.note.as_deref())}</td>
                                        <td>{or_dash(item.submitted_at.as_deref().map(format_timestamp).as_deref())}</td>
                                        <td class="col-actions">
                                            {if pending {
                                                view! {
                                                    <button
                                                        class="icon-btn icon-btn--success"
                                                        title="Approve"
                                                        disabled=busy.clone()
                                                        on:click=move |_| open_decision(&approve_item, VerificationAction::Approve)
                                                    >
                                                        {icon("check")}
                                                    </button>
                                                    <button
                                                        class="icon-btn icon-btn--danger"
                                                        title="Reject"
                                                        disabled=busy.clone()
                                                        on:click=move |_| open_decision(&reject_item, VerificationAction::Reject)
                                                    >
                                                        {icon("x")}
                                                    </button>
                                                }
                                                .into_any()
                                            } else {
                                                view! {
                                                    <button
                                                        class="icon-btn"
                                                        title="Return to queue"
                                                        disabled=busy.clone()
                                                        on:click=move |_| requeue(requeue_id.clone())
                                                    >
                                                        {icon("refresh")}
                                                    </button>
                                                }
                                                .into_any()
                                            }}
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

            {move || decision.get().map(|d| {
                let title = match d.action {
                    VerificationAction::Approve => format!("Approve {}", d.username),
                    VerificationAction::Reject => format!("Reject {}", d.username),
                };
                let confirm_label = match d.action {
                    VerificationAction::Approve => "Approve",
                    VerificationAction::Reject => "Reject",
                };
                view! {
                    <ModalFrame
                        title=title
                        on_close=Callback::new(move |_| decision.set(None))
                        locked=dialog_busy
                        width="420px"
                    >
                        <div class="form-group">
                            <label>"Note"</label>
                            <textarea
                                prop:value=move || note.get()
                                on:input=move |ev| note.set(event_target_value(&ev))
                            ></textarea>
                        </div>
                        <div class="details-actions">
                            <Button
                                appearance=ButtonAppearance::Primary
                                disabled=dialog_busy
                                on_click=move |_| submit_decision()
                            >
                                {confirm_label}
                            </Button>
                            <Button disabled=dialog_busy on_click=move |_| decision.set(None)>"Cancel"</Button>
                        </div>
                    </ModalFrame>
                }
            })}
        </div>
    }
}
