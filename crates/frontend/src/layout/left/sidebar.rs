//! Боковое меню с раскрывающимися группами

use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::tab_label_for_key;
use crate::layout::tabs::tab_labels::taxonomy_tab_key;
use crate::shared::icons::icon;
use crate::system::auth::context::use_auth;
use contracts::domain::a001_taxonomy::kind::TaxonomyDomain;
use leptos::prelude::*;

#[derive(Clone, Debug, PartialEq)]
struct MenuGroup {
    id: &'static str,
    label: &'static str,
    icon: &'static str,
    /// (tab key, label, icon)
    items: Vec<(String, &'static str, &'static str)>,
    admin_only: bool,
}

fn item(key: &str, icon_name: &'static str) -> (String, &'static str, &'static str) {
    (key.to_string(), tab_label_for_key(key), icon_name)
}

fn domain_icon(domain: TaxonomyDomain) -> &'static str {
    match domain {
        TaxonomyDomain::Education => "book",
        TaxonomyDomain::Languages => "message-square",
        TaxonomyDomain::Locations => "map-pin",
        TaxonomyDomain::Origins => "users",
        TaxonomyDomain::Sects => "star",
    }
}

fn get_menu_groups() -> Vec<MenuGroup> {
    vec![
        MenuGroup {
            id: "me",
            label: "My account",
            icon: "user",
            items: vec![
                item("a003_profile_wizard", "file-text"),
                item("sys_account", "settings"),
            ],
            admin_only: false,
        },
        MenuGroup {
            id: "moderation",
            label: "Moderation",
            icon: "shield",
            items: vec![
                item("a002_profile", "users"),
                item("sys_verification", "phone"),
            ],
            admin_only: true,
        },
        MenuGroup {
            id: "global_settings",
            label: "Global settings",
            icon: "database",
            items: TaxonomyDomain::all()
                .iter()
                .map(|d| item(&taxonomy_tab_key(*d), domain_icon(*d)))
                .collect(),
            admin_only: true,
        },
    ]
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let (auth_state, _) = use_auth();

    let expanded_groups = RwSignal::new(vec!["me".to_string()]);

    view! {
        <div class="app-sidebar__content">
            {move || {
                let is_admin = auth_state.with(|s| s.is_admin());
                get_menu_groups()
                    .into_iter()
                    .filter(|group| is_admin || !group.admin_only)
                    .map(|group| {
                        let group_id = group.id.to_string();
                        let gid_click = group_id.clone();
                        let gid_chevron = group_id.clone();
                        let gid_show = group_id;
                        let items = StoredValue::new(group.items);

                        view! {
                            <div>
                                <div
                                    class="app-sidebar__item"
                                    style:padding-left="12px"
                                    on:click=move |_| {
                                        let gid = gid_click.clone();
                                        expanded_groups.update(move |groups| {
                                            if let Some(pos) = groups.iter().position(|x| x == &gid) {
                                                groups.remove(pos);
                                            } else {
                                                groups.push(gid);
                                            }
                                        });
                                    }
                                >
                                    <div class="app-sidebar__item-content">
                                        {icon(group.icon)}
                                        <span>{group.label}</span>
                                    </div>
                                    <div
                                        class="app-sidebar__chevron"
                                        class:app-sidebar__chevron--expanded=move || expanded_groups.get().contains(&gid_chevron)
                                    >
                                        {icon("chevron-right")}
                                    </div>
                                </div>

                                <Show when=move || expanded_groups.get().contains(&gid_show)>
                                    <div class="app-sidebar__children">
                                        {items.get_value().into_iter().map(|(key, label, icon_name)| {
                                            let key = StoredValue::new(key);
                                            view! {
                                                <div
                                                    class="app-sidebar__item"
                                                    class:app-sidebar__item--active=move || {
                                                        ctx.active.get().as_deref() == Some(key.get_value().as_str())
                                                    }
                                                    style:padding-left="10px"
                                                    on:click=move |_| ctx.open_tab(&key.get_value(), label)
                                                >
                                                    <div class="app-sidebar__item-content">
                                                        {icon(icon_name)}
                                                        <span>{label}</span>
                                                    </div>
                                                </div>
                                            }
                                        }).collect_view()}
                                    </div>
                                </Show>
                            </div>
                        }
                    })
                    .collect_view()
            }}
        </div>
    }
}
