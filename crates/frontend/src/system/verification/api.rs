use contracts::shared::paging::PageEnvelope;
use contracts::system::users::{
    RequeueRequest, VerificationDecision, VerificationQueueItem, VerificationQueueQuery,
    VerificationUpdateResponse,
};

use crate::shared::api_utils::{get_json, post_json, put_json, query_string};

const BASE: &str = "/api/admin/users/verification";

pub async fn fetch_queue(
    query: &VerificationQueueQuery,
) -> Result<PageEnvelope<VerificationQueueItem>, String> {
    get_json(&format!("{}{}", BASE, query_string(query))).await
}

pub async fn decide(decision: &VerificationDecision) -> Result<VerificationUpdateResponse, String> {
    post_json(BASE, decision).await
}

/// Вернуть заявку в PENDING
pub async fn requeue(user_id: &str) -> Result<VerificationUpdateResponse, String> {
    let request = RequeueRequest {
        user_id: user_id.to_string(),
    };
    put_json(BASE, &request).await
}
