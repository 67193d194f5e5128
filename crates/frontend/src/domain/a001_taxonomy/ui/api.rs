use contracts::domain::a001_taxonomy::form::{SubmitMethod, SubmitTarget};
use contracts::domain::a001_taxonomy::kind::{RecordKind, TaxonomyDomain};
use contracts::domain::a001_taxonomy::node::{
    AttachLanguageRequest, CountryLanguage, CountryLanguageListResponse, CountryLanguageQuery,
    DeleteResponse, ListQuery, NodeListResponse, NodeResponse, TaxonomyNode,
};
use contracts::domain::a001_taxonomy::reorder::{ReorderRequest, ReorderResponse};

use crate::shared::api_utils::{delete_json, get_json, patch_json, post_json, query_string};

/// Записи типа `kind` под родителем (None: корень)
pub async fn fetch_nodes(kind: RecordKind, parent_id: Option<String>) -> Result<Vec<TaxonomyNode>, String> {
    let query = query_string(&ListQuery { parent_id });
    let response: NodeListResponse =
        get_json(&format!("{}{}", kind.collection_path(), query)).await?;
    Ok(response.items)
}

pub async fn submit_form(target: SubmitTarget) -> Result<TaxonomyNode, String> {
    let response: NodeResponse = match target.method {
        SubmitMethod::Post => post_json(&target.path, &target.payload).await?,
        SubmitMethod::Patch => patch_json(&target.path, &target.payload).await?,
    };
    Ok(response.item)
}

/// Удаление вместе с потомками; возвращает число удалённых записей
pub async fn delete_node(path: &str) -> Result<u64, String> {
    let response: DeleteResponse = delete_json(path).await?;
    Ok(response.deleted)
}

pub async fn reorder(domain: TaxonomyDomain, request: &ReorderRequest) -> Result<(), String> {
    let path = format!("/api/admin/global-settings/{}/reorder", domain.slug());
    let response: ReorderResponse = post_json(&path, request).await?;
    if response.success {
        Ok(())
    } else {
        Err("Reorder was not applied".to_string())
    }
}

const BY_COUNTRY_PATH: &str = "/api/admin/global-settings/languages/by-country";

pub async fn fetch_country_languages(country_id: String) -> Result<Vec<CountryLanguage>, String> {
    let query = query_string(&CountryLanguageQuery { country_id });
    let response: CountryLanguageListResponse =
        get_json(&format!("{}{}", BY_COUNTRY_PATH, query)).await?;
    Ok(response.items)
}

pub async fn attach_language(request: AttachLanguageRequest) -> Result<Vec<CountryLanguage>, String> {
    let response: CountryLanguageListResponse = post_json(BY_COUNTRY_PATH, &request).await?;
    Ok(response.items)
}

pub async fn detach_language(country_id: &str, language_id: &str) -> Result<(), String> {
    let _: DeleteResponse =
        delete_json(&format!("{}/{}/{}", BY_COUNTRY_PATH, country_id, language_id)).await?;
    Ok(())
}
