use contracts::domain::a001_taxonomy::node::TaxonomyNode;
use contracts::domain::a001_taxonomy::reorder::{MoveDirection, ReorderState};
use leptos::prelude::*;

use crate::shared::icons::icon;

/// Таблица записей одного уровня со сдвигом вверх/вниз
///
/// Пока перестановка в полёте, стрелки выключены у всех строк.
#[component]
pub fn NodeList(
    state: RwSignal<ReorderState<TaxonomyNode>>,
    /// Клик по строке проваливается в детей
    #[prop(into)]
    can_descend: Signal<bool>,
    #[prop(into)] selected_id: Signal<Option<String>>,
    #[prop(into)] child_label: Signal<String>,
    on_select: Callback<TaxonomyNode>,
    on_move: Callback<(usize, MoveDirection)>,
    on_edit: Callback<TaxonomyNode>,
    on_delete: Callback<TaxonomyNode>,
) -> impl IntoView {
    let rows = move || {
        state.with(|s| {
            s.items()
                .iter()
                .cloned()
                .enumerate()
                .map(|(index, node)| {
                    let can_up = s.can_move(index, MoveDirection::Up);
                    let can_down = s.can_move(index, MoveDirection::Down);
                    (index, node, can_up, can_down)
                })
                .collect::<Vec<_>>()
        })
    };

    view! {
        <table class="data-table taxonomy-table">
            <thead>
                <tr>
                    <th class="col-order">"#"</th>
                    <th>"Label"</th>
                    <th>"Slug"</th>
                    <th>"Status"</th>
                    <th class="col-num">{move || child_label.get()}</th>
                    <th class="col-num">"Profiles"</th>
                    <th class="col-actions"></th>
                </tr>
            </thead>
            <tbody>
                {move || {
                    let items = rows();
                    if items.is_empty() {
                        return view! {
                            <tr><td colspan="7" class="empty-row">"No records yet"</td></tr>
                        }
                        .into_any();
                    }
                    items
                        .into_iter()
                        .map(|(index, node, can_up, can_down)| {
                            let is_selected = selected_id.get().as_deref() == Some(node.id.as_str());
                            let protected = node.is_delete_protected();
                            let for_select = node.clone();
                            let for_edit = node.clone();
                            let for_delete = node.clone();
                            view! {
                                <tr
                                    class:selected=is_selected
                                    class:clickable=move || can_descend.get()
                                    class:inactive=!node.is_active
                                    on:click=move |_| {
                                        if can_descend.get_untracked() {
                                            on_select.run(for_select.clone());
                                        }
                                    }
                                >
                                    <td class="col-order">{node.sort_order}</td>
                                    <td>
                                        {node.display_label()}
                                        {node.is_popular.then(|| view! { <span class="popular-mark" title="Popular">"★"</span> })}
                                    </td>
                                    <td class="mono">{node.slug.clone()}</td>
                                    <td>
                                        {if node.is_active { "Active" } else { "Inactive" }}
                                        {protected.then(|| view! {
                                            <span class="protected-mark" title="Protected record">{icon("lock")}</span>
                                        })}
                                    </td>
                                    <td class="col-num">{node.child_count}</td>
                                    <td class="col-num">{node.profile_count}</td>
                                    <td class="col-actions" on:click=|ev| ev.stop_propagation()>
                                        <button
                                            class="icon-btn"
                                            title="Move up"
                                            disabled=!can_up
                                            on:click=move |_| on_move.run((index, MoveDirection::Up))
                                        >
                                            {icon("arrow-up")}
                                        </button>
                                        <button
                                            class="icon-btn"
                                            title="Move down"
                                            disabled=!can_down
                                            on:click=move |_| on_move.run((index, MoveDirection::Down))
                                        >
                                            {icon("arrow-down")}
                                        </button>
                                        <button
                                            class="icon-btn"
                                            title="Edit"
                                            on:click=move |_| on_edit.run(for_edit.clone())
                                        >
                                            {icon("edit")}
                                        </button>
                                        <button
                                            class="icon-btn icon-btn--danger"
                                            title=if protected { "Protected record" } else { "Delete" }
                                            disabled=protected
                                            on:click=move |_| on_delete.run(for_delete.clone())
                                        >
                                            {icon("delete")}
                                        </button>
                                    </td>
                                </tr>
                            }
                        })
                        .collect_view()
                        .into_any()
                }}
            </tbody>
        </table>
    }
}
