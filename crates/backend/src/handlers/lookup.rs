use axum::extract::Query;
use axum::Json;
use contracts::domain::a001_taxonomy::node::NodeResponse;
use contracts::domain::lookup::{LookupFlagUpdate, LookupQuery, LookupResponse};

use crate::domain::a001_taxonomy::service;
use crate::shared::error::{AppError, AppResult};
use crate::system::auth::extractor::CurrentUser;

/// GET /api/lookup?table=<kind>&parentId=<id>
pub async fn list(Query(query): Query<LookupQuery>) -> AppResult<Json<LookupResponse>> {
    let kind = query.kind().map_err(AppError::Validation)?;
    let items = service::lookup(kind, query.parent_id).await?;
    Ok(Json(LookupResponse { items }))
}

/// PATCH /api/lookup?table=<kind>, только администратор
pub async fn update_flags(
    user: CurrentUser,
    Query(query): Query<LookupQuery>,
    Json(update): Json<LookupFlagUpdate>,
) -> AppResult<Json<NodeResponse>> {
    user.require_admin()?;
    let kind = query.kind().map_err(AppError::Validation)?;
    let item = service::update_flags(kind, update).await?;
    Ok(Json(NodeResponse { item }))
}
