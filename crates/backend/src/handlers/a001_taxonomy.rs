use axum::extract::{Path, Query};
use axum::Json;
use contracts::domain::a001_taxonomy::kind::{RecordKind, TaxonomyDomain};
use contracts::domain::a001_taxonomy::node::{
    AttachLanguageRequest, CountryLanguageListResponse, CountryLanguageQuery, DeleteResponse,
    ListQuery, NodeListResponse, NodePayload, NodeResponse,
};
use contracts::domain::a001_taxonomy::reorder::{ReorderRequest, ReorderResponse};

use crate::domain::a001_taxonomy::service;
use crate::shared::error::AppResult;

// Обработчики параметризуются типом записи; роутер регистрирует их для каждого типа

/// GET /api/admin/global-settings/<domain>
pub async fn list_domain(domain: TaxonomyDomain) -> AppResult<Json<NodeListResponse>> {
    let items = service::list(domain.primary_kind(), None).await?;
    Ok(Json(NodeListResponse { items }))
}

/// GET <collection>?parentId=
pub async fn list(kind: RecordKind, query: ListQuery) -> AppResult<Json<NodeListResponse>> {
    let items = service::list(kind, query.parent_id).await?;
    Ok(Json(NodeListResponse { items }))
}

/// POST <collection>
pub async fn create(kind: RecordKind, payload: NodePayload) -> AppResult<Json<NodeResponse>> {
    let item = service::create(kind, payload).await?;
    Ok(Json(NodeResponse { item }))
}

/// PATCH <collection>/:id
pub async fn update(
    kind: RecordKind,
    id: String,
    payload: NodePayload,
) -> AppResult<Json<NodeResponse>> {
    let item = service::update(kind, &id, payload).await?;
    Ok(Json(NodeResponse { item }))
}

/// DELETE <collection>/:id
pub async fn delete(kind: RecordKind, id: String) -> AppResult<Json<DeleteResponse>> {
    let deleted = service::delete(kind, &id).await?;
    Ok(Json(DeleteResponse { deleted }))
}

/// POST /api/admin/global-settings/<domain>/reorder
pub async fn reorder(
    domain: TaxonomyDomain,
    request: ReorderRequest,
) -> AppResult<Json<ReorderResponse>> {
    service::reorder(domain, request).await?;
    Ok(Json(ReorderResponse { success: true }))
}

/// GET /api/admin/global-settings/languages/by-country?countryId=
pub async fn list_country_languages(
    Query(query): Query<CountryLanguageQuery>,
) -> AppResult<Json<CountryLanguageListResponse>> {
    let items = service::list_country_languages(&query.country_id).await?;
    Ok(Json(CountryLanguageListResponse { items }))
}

/// POST /api/admin/global-settings/languages/by-country
pub async fn attach_language(
    Json(request): Json<AttachLanguageRequest>,
) -> AppResult<Json<CountryLanguageListResponse>> {
    let items = service::attach_language(&request.country_id, &request.language_id).await?;
    Ok(Json(CountryLanguageListResponse { items }))
}

/// DELETE /api/admin/global-settings/languages/by-country/:country_id/:language_id
pub async fn detach_language(
    Path((country_id, language_id)): Path<(String, String)>,
) -> AppResult<Json<DeleteResponse>> {
    service::detach_language(&country_id, &language_id).await?;
    Ok(Json(DeleteResponse { deleted: 1 }))
}
