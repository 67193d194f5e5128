use contracts::domain::a002_profile::edit::{ProfileEditData, ProfileEditRequest};
use contracts::domain::a002_profile::moderation::{ModerateRequest, ModerateResponse};
use contracts::domain::a002_profile::photo::{PhotoModerationRequest, ProfilePhoto, PhotoResponse};
use contracts::domain::a002_profile::snapshot::{ProfileListItem, ProfileListQuery, ProfileResponse};
use contracts::domain::a002_profile::ProfileSnapshot;
use contracts::shared::api_error::SuccessResponse;
use contracts::shared::paging::PageEnvelope;

use crate::shared::api_utils::{delete_json, get_json, patch_json, post_json, query_string};

const BASE: &str = "/api/admin/profiles";

pub async fn fetch_list(query: &ProfileListQuery) -> Result<PageEnvelope<ProfileListItem>, String> {
    get_json(&format!("{}{}", BASE, query_string(query))).await
}

pub async fn fetch_profile(id: &str) -> Result<ProfileSnapshot, String> {
    let response: ProfileResponse = get_json(&format!("{}/{}", BASE, id)).await?;
    Ok(response.profile)
}

pub async fn moderate(id: &str, request: &ModerateRequest) -> Result<ModerateResponse, String> {
    post_json(&format!("{}/{}/moderate", BASE, id), request).await
}

pub async fn moderate_photo(
    profile_id: &str,
    photo_id: &str,
    request: &PhotoModerationRequest,
) -> Result<ProfilePhoto, String> {
    let response: PhotoResponse =
        patch_json(&format!("{}/{}/photos/{}", BASE, profile_id, photo_id), request).await?;
    Ok(response.photo)
}

pub async fn delete_photo(profile_id: &str, photo_id: &str) -> Result<(), String> {
    let _: SuccessResponse =
        delete_json(&format!("{}/{}/photos/{}", BASE, profile_id, photo_id)).await?;
    Ok(())
}

pub async fn fetch_edit_data(id: &str) -> Result<ProfileEditData, String> {
    get_json(&format!("{}/{}/edit", BASE, id)).await
}

pub async fn save_edit(id: &str, request: &ProfileEditRequest) -> Result<ProfileEditData, String> {
    patch_json(&format!("{}/{}/edit", BASE, id), request).await
}
