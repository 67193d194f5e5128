use contracts::domain::a001_taxonomy::delete_flow::DeleteFlow;
use contracts::domain::a001_taxonomy::form::RecordForm;
use contracts::domain::a001_taxonomy::kind::{RecordKind, TaxonomyDomain};
use contracts::domain::a001_taxonomy::navigator::{HierarchyNavigator, LoadTicket};
use contracts::domain::a001_taxonomy::node::{OriginTerminology, TaxonomyNode};
use contracts::domain::a001_taxonomy::reorder::{MoveDirection, ReorderScope, ReorderState};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::api;
use super::country_languages::CountryLanguages;
use super::delete_dialog::DeleteDialog;
use super::form_dialog::{EntityFormDialog, FormSession};
use super::node_list::NodeList;
use crate::shared::components::error_banner::ErrorBanner;
use crate::shared::icons::icon;

/// Одна цепочка уровней домена: вкладки уровней, список активного уровня,
/// диалоги записи и удаления
#[component]
pub fn HierarchySection(domain: TaxonomyDomain, chain: &'static [RecordKind]) -> impl IntoView {
    let nav = RwSignal::new(HierarchyNavigator::new(chain));
    let list = RwSignal::new(ReorderState::<TaxonomyNode>::default());
    let loading = RwSignal::new(false);
    let load_error = RwSignal::new(None::<String>);
    let form_session = RwSignal::new(None::<FormSession>);
    let delete_flow = RwSignal::new(DeleteFlow::default());

    // Терминология выбранного Origin (только для цепочки Origin → ...)
    let terminology = Memo::new(move |_| {
        nav.with(|n| match n.chain().first() {
            Some(RecordKind::Origin) => n.selection(0).and_then(|o| o.terminology().cloned()),
            _ => None,
        })
    });

    let kind_title = move |kind: RecordKind| -> String {
        terminology.with_untracked(|t| match t {
            Some(t) => t.label_for(kind, false),
            None => kind.singular().to_string(),
        })
    };

    let load = move |ticket: LoadTicket| {
        let (kind, parent_id) = nav.with_untracked(|n| (n.active_kind(), n.active_parent_id()));
        let scope = ReorderScope::for_kind(kind, parent_id.clone());
        loading.set(true);
        load_error.set(None);
        spawn_local(async move {
            let result = api::fetch_nodes(kind, parent_id).await;
            // пользователь успел уйти на другой уровень
            if !nav.with_untracked(|n| n.accepts(ticket)) {
                return;
            }
            loading.set(false);
            match result {
                Ok(items) => list.update(|s| s.load_succeeded(scope, items)),
                Err(e) => {
                    list.update(|s| s.load_failed(&scope));
                    load_error.set(Some(e));
                }
            }
        });
    };

    let reload = move || {
        if let Some(ticket) = nav.try_update(|n| n.reload()) {
            load(ticket);
        }
    };

    reload();

    let on_select = Callback::new(move |node: TaxonomyNode| {
        let level = nav.with_untracked(|n| n.active_level());
        list.update(|s| s.clear_error());
        match nav.try_update(|n| n.select_node(level, node)) {
            Some(Ok(ticket)) => load(ticket),
            Some(Err(e)) => load_error.set(Some(e.to_string())),
            None => {}
        }
    });

    let go_back = move |level: usize| {
        if nav.with_untracked(|n| level >= n.active_level()) {
            return;
        }
        list.update(|s| s.clear_error());
        if let Some(ticket) = nav.try_update(|n| n.go_back(level)) {
            load(ticket);
        }
    };

    let on_move = Callback::new(move |(index, direction): (usize, MoveDirection)| {
        let Some(ordered_ids) = list.try_update(|s| s.begin_move(index, direction)).flatten() else {
            return;
        };
        let request = nav.with_untracked(|n| {
            ReorderScope::for_kind(n.active_kind(), n.active_parent_id()).request(ordered_ids)
        });
        spawn_local(async move {
            match api::reorder(domain, &request).await {
                Ok(()) => list.update(|s| s.commit_succeeded()),
                Err(e) => {
                    log::warn!("reorder rejected: {}", e);
                    list.update(|s| s.commit_failed(e));
                    // локальный порядок недостоверен, берём серверный
                    reload();
                }
            }
        });
    });

    let open_create = move |_| {
        let (kind, parent_id) = nav.with_untracked(|n| (n.active_kind(), n.active_parent_id()));
        let next_sort_order = list.with_untracked(|s| s.items().len() as i32);
        let form = RecordForm::empty(kind, parent_id, next_sort_order);
        form_session.set(Some(FormSession::create(form, kind_title(kind))));
    };

    let on_edit = Callback::new(move |node: TaxonomyNode| {
        let title = kind_title(node.kind);
        form_session.set(Some(FormSession::edit(&node, title)));
    });

    let on_delete = Callback::new(move |node: TaxonomyNode| {
        delete_flow.update(|f| {
            f.open(node);
        });
    });

    let on_saved = Callback::new(move |node: TaxonomyNode| {
        nav.update(|n| n.refresh_selection(&node));
        reload();
    });

    let on_deleted = Callback::new(move |deleted: u64| {
        log::info!("deleted {} record(s)", deleted);
        reload();
    });

    let child_label = Signal::derive(move || {
        nav.with(|n| {
            let next = n.active_level() + 1;
            if next < n.chain().len() {
                n.level_label(next)
            } else {
                "Children".to_string()
            }
        })
    });

    let selected_id = Signal::derive(move || {
        nav.with(|n| n.selection(n.active_level()).map(|s| s.id.clone()))
    });

    let can_descend = Signal::derive(move || nav.with(|n| n.can_descend(n.active_level())));

    // Выбранная страна, для панели языков
    let selected_country = Memo::new(move |_| {
        nav.with(|n| {
            n.selection(0)
                .filter(|s| s.kind == RecordKind::Country)
                .map(|c| (c.id.clone(), c.label.clone()))
        })
    });

    let delete_terminology = Signal::derive(move || -> Option<OriginTerminology> { terminology.get() });

    view! {
        <section class="taxonomy-section">
            <div class="level-tabs">
                {(0..chain.len())
                    .map(|level| {
                        view! {
                            <button
                                class="level-tab"
                                class:active=move || nav.with(|n| n.active_level() == level)
                                disabled=move || !nav.with(|n| n.is_tab_enabled(level))
                                on:click=move |_| go_back(level)
                            >
                                {move || nav.with(|n| n.level_label(level))}
                                {move || nav.with(|n| n.selection(level).map(|s| s.label.clone()))
                                    .map(|label| view! { <span class="level-tab__selection">{format!(": {}", label)}</span> })}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>

            <div class="section-toolbar">
                <span class="section-toolbar__title">
                    {move || nav.with(|n| {
                        let parent = n.parent_for(n.active_level()).map(|p| format!(" in {}", p.label));
                        format!("{}{}", n.level_label(n.active_level()), parent.unwrap_or_default())
                    })}
                </span>
                <Button appearance=ButtonAppearance::Primary on_click=open_create>
                    {icon("plus")}
                    {move || format!("Add {}", kind_title(nav.with(|n| n.active_kind())).to_lowercase())}
                </Button>
                <Button appearance=ButtonAppearance::Subtle on_click=move |_| reload()>
                    {icon("refresh")}
                </Button>
            </div>

            <ErrorBanner
                error=Signal::derive(move || load_error.get())
                on_retry=Callback::new(move |_| reload())
            />
            {move || list.with(|s| s.error().map(|e| e.to_string())).map(|e| view! {
                <div class="warning-box warning-box--error">{format!("Reorder failed: {}", e)}</div>
            })}

            <Show
                when=move || !loading.get()
                fallback=|| view! { <div class="loading">"Loading..."</div> }
            >
                <NodeList
                    state=list
                    can_descend=can_descend
                    selected_id=selected_id
                    child_label=child_label
                    on_select=on_select
                    on_move=on_move
                    on_edit=on_edit
                    on_delete=on_delete
                />
            </Show>

            {move || selected_country.get().map(|(country_id, country_label)| view! {
                <CountryLanguages country_id=country_id country_label=country_label />
            })}

            {move || form_session.get().map(|session| view! {
                <EntityFormDialog
                    session=session
                    on_saved=on_saved
                    on_close=Callback::new(move |_| form_session.set(None))
                />
            })}

            <DeleteDialog
                flow=delete_flow
                terminology=delete_terminology
                on_deleted=on_deleted
            />
        </section>
    }
}
