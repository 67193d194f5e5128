pub mod api;
pub mod country_languages;
pub mod delete_dialog;
pub mod form_dialog;
pub mod node_list;
pub mod section;

use contracts::domain::a001_taxonomy::kind::TaxonomyDomain;
use leptos::prelude::*;

use crate::shared::components::page_header::PageHeader;
use section::HierarchySection;

/// Экран справочного домена: по секции на каждую независимую цепочку
#[component]
pub fn TaxonomyPage(domain: TaxonomyDomain) -> impl IntoView {
    let subtitle = match domain.sections().len() {
        1 => "Select a record to manage its children".to_string(),
        n => format!("{} independent lists", n),
    };

    view! {
        <div class="page taxonomy-page">
            <PageHeader title=domain.title().to_string() subtitle=subtitle>
                {()}
            </PageHeader>
            {domain
                .sections()
                .iter()
                .map(|chain| view! { <HierarchySection domain=domain chain=*chain /> })
                .collect_view()}
        </div>
    }
}
