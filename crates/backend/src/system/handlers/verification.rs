use axum::extract::Query;
use axum::Json;
use contracts::shared::paging::PageEnvelope;
use contracts::system::users::{
    RequeueRequest, VerificationDecision, VerificationQueueItem, VerificationQueueQuery,
    VerificationUpdateResponse,
};

use crate::shared::error::AppResult;
use crate::system::users::service;

/// GET /api/admin/users/verification
pub async fn list(
    Query(query): Query<VerificationQueueQuery>,
) -> AppResult<Json<PageEnvelope<VerificationQueueItem>>> {
    Ok(Json(service::list_verification(query).await?))
}

/// POST /api/admin/users/verification
pub async fn decide(
    Json(decision): Json<VerificationDecision>,
) -> AppResult<Json<VerificationUpdateResponse>> {
    let status = service::decide_verification(decision).await?;
    Ok(Json(VerificationUpdateResponse { status }))
}

/// PUT /api/admin/users/verification
pub async fn requeue(
    Json(request): Json<RequeueRequest>,
) -> AppResult<Json<VerificationUpdateResponse>> {
    let status = service::requeue(request).await?;
    Ok(Json(VerificationUpdateResponse { status }))
}
